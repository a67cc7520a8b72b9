//! # Device Binding
//!
//! A character-device style front end over a [`BoundedBuffer`].
//!
//! This is the layer a driver's file-operations table would call into: it
//! takes raw `whence` values and caller-declared byte counts, and answers
//! with either a count/position or a POSIX errno, the way `open`, `llseek`,
//! `read`, `write` and `release` do in a character driver.
//!
//! Registering a device node (number allocation, class/sysfs entries, module
//! load and unload) is not done here. [`DeviceNumber`] is only carried as an
//! identifier.
//!
//! ## Example
//!
//! ```rust
//! use fcd_core::binding::{CharDevice, DeviceNumber};
//!
//! let device = CharDevice::new("fcd", DeviceNumber::new(240, 0)?, 512)?;
//! let mut file = device.open();
//!
//! assert_eq!(device.write(&mut file, b"abc", 3), Ok(3));
//! assert_eq!(device.llseek(&mut file, 0, libc::SEEK_SET), Ok(0));
//!
//! let mut out = [0u8; 3];
//! assert_eq!(device.read(&mut file, &mut out, 3), Ok(3));
//! assert_eq!(&out, b"abc");
//!
//! device.release(file);
//! # Ok::<(), fcd_core::FcdError>(())
//! ```

use std::fmt;

use tracing::debug;

use crate::buffer::BoundedBuffer;
use crate::cursor::Cursor;
use crate::error::{FcdError, FcdResult};
use crate::seek::SeekMode;
use crate::transfer::{UserSink, UserSource};

const MINOR_BITS: u32 = 20;
const MINOR_MASK: u32 = (1 << MINOR_BITS) - 1;

/// Largest major number a packed `dev_t` can hold
pub const MAX_MAJOR: u32 = (1 << (u32::BITS - MINOR_BITS)) - 1;
/// Largest minor number a packed `dev_t` can hold
pub const MAX_MINOR: u32 = MINOR_MASK;

/// Major/minor pair identifying a character device
///
/// Always fits the 12-bit major / 20-bit minor `dev_t` layout, so
/// `from_raw(n.raw()) == n` holds for every value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DeviceNumber
{
    major: u32,
    minor: u32,
}

impl DeviceNumber
{
    /// ## Errors
    ///
    /// `InvalidArgument` if `major > MAX_MAJOR` or `minor > MAX_MINOR`.
    pub fn new(major: u32, minor: u32) -> FcdResult<Self>
    {
        if major > MAX_MAJOR {
            return Err(FcdError::InvalidArgument(format!(
                "major number {major} exceeds {MAX_MAJOR}"
            )));
        }
        if minor > MAX_MINOR {
            return Err(FcdError::InvalidArgument(format!(
                "minor number {minor} exceeds {MAX_MINOR}"
            )));
        }
        Ok(Self { major, minor })
    }

    /// Split a packed kernel-internal `dev_t` (12-bit major, 20-bit minor)
    pub const fn from_raw(raw: u32) -> Self
    {
        Self {
            major: raw >> MINOR_BITS,
            minor: raw & MINOR_MASK,
        }
    }

    /// Pack into a kernel-internal `dev_t`
    pub const fn raw(self) -> u32
    {
        (self.major << MINOR_BITS) | self.minor
    }

    /// Driver class number
    pub const fn major(self) -> u32
    {
        self.major
    }

    /// Instance number within the driver
    pub const fn minor(self) -> u32
    {
        self.minor
    }
}

impl fmt::Display for DeviceNumber
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        write!(f, "{}:{}", self.major, self.minor)
    }
}

/// POSIX error number returned by a device call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Errno(pub i32);

impl Errno
{
    pub const EINVAL: Errno = Errno(libc::EINVAL);
    pub const ENOMEM: Errno = Errno(libc::ENOMEM);
    pub const EFAULT: Errno = Errno(libc::EFAULT);

    /// Symbolic name for the errno values this binding produces
    pub const fn name(self) -> Option<&'static str>
    {
        match self.0 {
            libc::EINVAL => Some("EINVAL"),
            libc::ENOMEM => Some("ENOMEM"),
            libc::EFAULT => Some("EFAULT"),
            _ => None,
        }
    }
}

impl From<FcdError> for Errno
{
    fn from(err: FcdError) -> Self
    {
        Errno(err.errno())
    }
}

impl fmt::Display for Errno
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        match self.name() {
            Some(name) => write!(f, "{name} ({})", self.0),
            None => write!(f, "errno {}", self.0),
        }
    }
}

/// An open file on a [`CharDevice`]
///
/// Holds only the file position; all data lives in the device's buffer.
#[derive(Debug)]
pub struct FileHandle
{
    cursor: Cursor,
}

impl FileHandle
{
    /// Current file position
    pub fn position(&self) -> usize
    {
        self.cursor.position()
    }
}

/// Caller memory as the driver sees it: a region plus a declared byte count
///
/// When the declared count exceeds the region, the copy faults just like a
/// `copy_from_user` over an unmapped tail would.
struct Declared<'s, S: ?Sized>
{
    region: &'s S,
    count: usize,
}

impl<S: UserSource + ?Sized> UserSource for Declared<'_, S>
{
    fn len(&self) -> usize
    {
        self.count
    }

    fn copy_from_user(&self, dst: &mut [u8]) -> FcdResult<()>
    {
        self.region.copy_from_user(dst)
    }
}

/// A named character device backed by one bounded buffer
#[derive(Debug)]
pub struct CharDevice
{
    name: String,
    number: DeviceNumber,
    buffer: BoundedBuffer,
}

impl CharDevice
{
    /// Create a device with a fresh zero-filled buffer
    ///
    /// ## Errors
    ///
    /// `InvalidArgument` if the name is empty or the capacity is invalid
    /// (see [`BoundedBuffer::new`]).
    pub fn new(name: impl Into<String>, number: DeviceNumber, capacity: usize) -> FcdResult<Self>
    {
        let name = name.into();
        if name.is_empty() {
            return Err(FcdError::InvalidArgument("device name must not be empty".to_string()));
        }
        let buffer = BoundedBuffer::new(capacity)?;
        debug!("Device {} number <major>:<minor> = {}", name, number);
        Ok(Self { name, number, buffer })
    }

    pub fn name(&self) -> &str
    {
        &self.name
    }

    pub fn number(&self) -> DeviceNumber
    {
        self.number
    }

    /// Backing buffer
    pub fn buffer(&self) -> &BoundedBuffer
    {
        &self.buffer
    }

    pub fn open(&self) -> FileHandle
    {
        FileHandle {
            cursor: self.buffer.open(),
        }
    }

    /// Reposition `file` and return the new position
    ///
    /// ## Errors
    ///
    /// `EINVAL` for an unknown `whence` or an out-of-range target.
    pub fn llseek(&self, file: &mut FileHandle, offset: i64, whence: i32) -> Result<i64, Errno>
    {
        let mode = SeekMode::try_from(whence)?;
        let position = self.buffer.seek(&mut file.cursor, offset, mode)?;
        i64::try_from(position).map_err(|_| Errno::EINVAL)
    }

    /// Read up to `count` bytes into `dest`
    ///
    /// ## Errors
    ///
    /// `EFAULT` if `dest` cannot take the clamped transfer.
    pub fn read<S>(&self, file: &mut FileHandle, dest: &mut S, count: usize) -> Result<usize, Errno>
    where
        S: UserSink + ?Sized,
    {
        Ok(self.buffer.read(&mut file.cursor, count, dest)?)
    }

    /// Write `count` bytes taken from `src`
    ///
    /// ## Errors
    ///
    /// - `ENOMEM` when the file position is already at capacity
    /// - `EFAULT` when `src` holds fewer bytes than the clamped transfer
    pub fn write<S>(&self, file: &mut FileHandle, src: &S, count: usize) -> Result<usize, Errno>
    where
        S: UserSource + ?Sized,
    {
        let declared = Declared { region: src, count };
        Ok(self.buffer.write(&mut file.cursor, &declared)?)
    }

    pub fn release(&self, file: FileHandle)
    {
        self.buffer.close(file.cursor);
    }
}
