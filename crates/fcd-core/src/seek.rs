//! # Seek Modes
//!
//! How a seek offset is interpreted, and the arithmetic that turns an
//! offset into a new cursor position.
//!
//! All three modes share one legality check: the target must land in
//! `[0, capacity]`. Arithmetic is done in `i64` with overflow checks, so a
//! wildly out-of-range offset is rejected as [`FcdError::InvalidOffset`]
//! rather than wrapping.

use crate::error::{FcdError, FcdResult};

/// Reference point for a seek
///
/// Mirrors the POSIX `whence` argument of `lseek(2)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SeekMode
{
    /// Target is `offset`
    FromStart,
    /// Target is `position + offset`
    FromCurrent,
    /// Target is `capacity + offset` (usually a negative offset)
    FromEnd,
}

impl SeekMode
{
    /// The POSIX `whence` value for this mode
    pub const fn whence(self) -> i32
    {
        match self {
            SeekMode::FromStart => libc::SEEK_SET,
            SeekMode::FromCurrent => libc::SEEK_CUR,
            SeekMode::FromEnd => libc::SEEK_END,
        }
    }
}

impl TryFrom<i32> for SeekMode
{
    type Error = FcdError;

    /// Map a raw `whence` value onto a seek mode
    ///
    /// Anything other than `SEEK_SET`, `SEEK_CUR` or `SEEK_END` is rejected.
    ///
    /// ```rust
    /// use fcd_core::SeekMode;
    ///
    /// assert_eq!(SeekMode::try_from(libc::SEEK_END).unwrap(), SeekMode::FromEnd);
    /// assert!(SeekMode::try_from(42).is_err());
    /// ```
    fn try_from(whence: i32) -> FcdResult<Self>
    {
        match whence {
            libc::SEEK_SET => Ok(SeekMode::FromStart),
            libc::SEEK_CUR => Ok(SeekMode::FromCurrent),
            libc::SEEK_END => Ok(SeekMode::FromEnd),
            other => Err(FcdError::InvalidArgument(format!("unknown seek mode (whence = {other})"))),
        }
    }
}

/// Compute the position a seek would land on
///
/// `position` must already satisfy `position <= capacity`, and `capacity`
/// must fit in an `i64` (both are guaranteed by [`crate::BoundedBuffer`]).
pub(crate) fn resolve_target(mode: SeekMode, offset: i64, position: usize, capacity: usize) -> FcdResult<usize>
{
    let invalid = |target| FcdError::InvalidOffset { target, capacity };

    let base = match mode {
        SeekMode::FromStart => 0,
        SeekMode::FromCurrent => position,
        SeekMode::FromEnd => capacity,
    };
    let base = i64::try_from(base).map_err(|_| invalid(None))?;
    let target = base.checked_add(offset).ok_or_else(|| invalid(None))?;

    match usize::try_from(target) {
        Ok(t) if t <= capacity => Ok(t),
        _ => Err(invalid(Some(target))),
    }
}
