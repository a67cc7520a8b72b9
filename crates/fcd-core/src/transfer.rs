//! # Transfer Primitives
//!
//! The boundary between caller memory and the buffer's storage.
//!
//! A device binding copies bytes between a caller-supplied region and the
//! buffer. The buffer itself only needs to know whether that copy succeeded,
//! so both directions are expressed as small traits:
//!
//! - [`UserSink`]: where read bytes go (`copy_to_user` in driver terms)
//! - [`UserSource`]: where written bytes come from (`copy_from_user`)
//!
//! A transfer either completes in full or fails with
//! [`FcdError::TransferFault`]; implementations must not report a partial copy.
//!
//! Plain slices, arrays and vectors implement both traits, so most callers
//! never name them.

use crate::error::{FcdError, FcdResult};

/// Destination of a read
pub trait UserSink
{
    /// Copy all of `src` into the caller's memory
    ///
    /// ## Errors
    ///
    /// `TransferFault` if the destination cannot take `src.len()` bytes.
    fn copy_to_user(&mut self, src: &[u8]) -> FcdResult<()>;
}

/// Origin of a write
pub trait UserSource
{
    /// Number of bytes the caller offered
    fn len(&self) -> usize;

    /// Whether the caller offered no bytes at all
    fn is_empty(&self) -> bool
    {
        self.len() == 0
    }

    /// Fill `dst` with the first `dst.len()` bytes of the source
    ///
    /// Callers never ask for more than [`UserSource::len`] bytes.
    ///
    /// ## Errors
    ///
    /// `TransferFault` if the source bytes cannot be read.
    fn copy_from_user(&self, dst: &mut [u8]) -> FcdResult<()>;
}

impl UserSink for [u8]
{
    fn copy_to_user(&mut self, src: &[u8]) -> FcdResult<()>
    {
        let held = self.len();
        let dst = self.get_mut(..src.len()).ok_or_else(|| {
            FcdError::TransferFault(format!(
                "destination holds {held} bytes, transfer needs {}",
                src.len()
            ))
        })?;
        dst.copy_from_slice(src);
        Ok(())
    }
}

impl<const N: usize> UserSink for [u8; N]
{
    fn copy_to_user(&mut self, src: &[u8]) -> FcdResult<()>
    {
        self.as_mut_slice().copy_to_user(src)
    }
}

impl UserSink for Vec<u8>
{
    fn copy_to_user(&mut self, src: &[u8]) -> FcdResult<()>
    {
        self.extend_from_slice(src);
        Ok(())
    }
}

impl<T: UserSink + ?Sized> UserSink for &mut T
{
    fn copy_to_user(&mut self, src: &[u8]) -> FcdResult<()>
    {
        (**self).copy_to_user(src)
    }
}

impl UserSource for [u8]
{
    fn len(&self) -> usize
    {
        <[u8]>::len(self)
    }

    fn copy_from_user(&self, dst: &mut [u8]) -> FcdResult<()>
    {
        let src = self.get(..dst.len()).ok_or_else(|| {
            FcdError::TransferFault(format!(
                "source holds {} bytes, transfer needs {}",
                <[u8]>::len(self),
                dst.len()
            ))
        })?;
        dst.copy_from_slice(src);
        Ok(())
    }
}

impl<const N: usize> UserSource for [u8; N]
{
    fn len(&self) -> usize
    {
        N
    }

    fn copy_from_user(&self, dst: &mut [u8]) -> FcdResult<()>
    {
        self.as_slice().copy_from_user(dst)
    }
}

impl UserSource for Vec<u8>
{
    fn len(&self) -> usize
    {
        Vec::len(self)
    }

    fn copy_from_user(&self, dst: &mut [u8]) -> FcdResult<()>
    {
        self.as_slice().copy_from_user(dst)
    }
}

impl<T: UserSource + ?Sized> UserSource for &T
{
    fn len(&self) -> usize
    {
        (**self).len()
    }

    fn copy_from_user(&self, dst: &mut [u8]) -> FcdResult<()>
    {
        (**self).copy_from_user(dst)
    }
}
