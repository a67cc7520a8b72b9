//! # Error Types
//!
//! Every way a buffer operation can fail.
//!
//! We use `thiserror` to generate the `Error` trait implementations and the
//! messages. A failed operation never leaves partial state behind, so callers
//! can inspect the error and carry on with the same session.

use std::io;

use thiserror::Error;

/// Main error type for buffer operations
///
/// ## Error Categories
///
/// 1. **Cursor errors**: InvalidOffset, InvalidArgument
/// 2. **Resource errors**: OutOfSpace
/// 3. **Transfer errors**: TransferFault
///
/// None of these are retried internally. Read at the end of the buffer is not
/// an error (it returns 0 bytes), but write at the end is [`FcdError::OutOfSpace`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FcdError
{
    /// A seek target fell outside `[0, capacity]`
    ///
    /// `target` is the computed target, if it could be computed without
    /// overflowing a signed 64-bit value.
    #[error("Invalid offset: target {target:?} is outside [0, {capacity}]")]
    InvalidOffset
    {
        /// The computed seek target (`None` if the arithmetic overflowed)
        target: Option<i64>,
        /// Capacity of the buffer the seek was issued against
        capacity: usize,
    },

    /// Invalid argument passed to a buffer operation
    ///
    /// Examples:
    /// - An unrecognised seek mode (whence) value
    /// - A zero capacity at construction time
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A write was attempted with the cursor already at capacity
    ///
    /// Writing needs forward progress, so zero remaining space is an error
    /// rather than a zero-length write.
    #[error("Out of space: buffer of {capacity} bytes is full at the cursor")]
    OutOfSpace
    {
        /// Capacity of the exhausted buffer
        capacity: usize,
    },

    /// Copying bytes across the caller boundary failed
    ///
    /// The transfer primitive could not read from the caller's source or
    /// write into the caller's destination. No cursor or storage mutation
    /// happened.
    #[error("Transfer fault: {0}")]
    TransferFault(String),
}

impl FcdError
{
    /// POSIX errno matching this error, as the character driver reports it
    ///
    /// | Error             | errno    |
    /// |-------------------|----------|
    /// | `InvalidOffset`   | `EINVAL` |
    /// | `InvalidArgument` | `EINVAL` |
    /// | `OutOfSpace`      | `ENOMEM` |
    /// | `TransferFault`   | `EFAULT` |
    pub const fn errno(&self) -> i32
    {
        match self {
            FcdError::InvalidOffset { .. } | FcdError::InvalidArgument(_) => libc::EINVAL,
            FcdError::OutOfSpace { .. } => libc::ENOMEM,
            FcdError::TransferFault(_) => libc::EFAULT,
        }
    }
}

impl From<FcdError> for io::Error
{
    fn from(err: FcdError) -> Self
    {
        let kind = match err {
            FcdError::InvalidOffset { .. } | FcdError::InvalidArgument(_) => io::ErrorKind::InvalidInput,
            FcdError::OutOfSpace { .. } => io::ErrorKind::WriteZero,
            FcdError::TransferFault(_) => io::ErrorKind::Other,
        };
        io::Error::new(kind, err)
    }
}

/// Convenience type alias for `Result<T, FcdError>`
///
/// ```rust
/// use fcd_core::error::FcdResult;
/// fn foo() -> FcdResult<()>
/// {
///     Ok(())
/// }
/// ```
pub type FcdResult<T> = std::result::Result<T, FcdError>;
