//! # Bounded Buffer
//!
//! A fixed-capacity, zero-initialised byte store with file-like access.
//!
//! The buffer owns its storage and enforces all offset and length arithmetic
//! for read, write and seek. It holds no per-session state: every open
//! session gets its own [`Cursor`], and the buffer can be shared between
//! sessions (and threads) by reference or through an `Arc`.
//!
//! ## Concurrency
//!
//! The whole storage array sits behind one `parking_lot::Mutex`. Reads and
//! writes from different sessions are serialised; there is no range locking.
//! Seek only touches the caller's cursor and never takes the lock.
//!
//! ## Example
//!
//! ```rust
//! use fcd_core::{BoundedBuffer, SeekMode};
//!
//! let buffer = BoundedBuffer::new(16)?;
//! let mut cursor = buffer.open();
//!
//! assert_eq!(buffer.write(&mut cursor, b"hello")?, 5);
//! buffer.seek(&mut cursor, 0, SeekMode::FromStart)?;
//!
//! let mut out = Vec::new();
//! assert_eq!(buffer.read(&mut cursor, 5, &mut out)?, 5);
//! assert_eq!(out, b"hello");
//!
//! buffer.close(cursor);
//! # Ok::<(), fcd_core::FcdError>(())
//! ```

use std::fmt;

use parking_lot::Mutex;
use tracing::{debug, info, trace, warn};

use crate::cursor::{BufferId, Cursor};
use crate::error::{FcdError, FcdResult};
use crate::seek::{resolve_target, SeekMode};
use crate::session::Session;
use crate::transfer::{UserSink, UserSource};

/// Capacity of the reference device, in bytes
pub const DEFAULT_CAPACITY: usize = 512;

/// Fixed-capacity byte store with cursor-based access
pub struct BoundedBuffer
{
    id: BufferId,
    capacity: usize,
    storage: Mutex<Box<[u8]>>,
}

impl BoundedBuffer
{
    /// Create a zero-filled buffer of `capacity` bytes
    ///
    /// ## Errors
    ///
    /// `InvalidArgument` if `capacity` is zero or does not fit a signed
    /// 64-bit seek offset.
    pub fn new(capacity: usize) -> FcdResult<Self>
    {
        if capacity == 0 {
            return Err(FcdError::InvalidArgument("capacity must be positive".to_string()));
        }
        if i64::try_from(capacity).is_err() {
            return Err(FcdError::InvalidArgument(format!(
                "capacity {capacity} does not fit a signed 64-bit offset"
            )));
        }

        Ok(Self::zeroed(capacity))
    }

    /// `capacity` must already be validated by the caller
    fn zeroed(capacity: usize) -> Self
    {
        let buffer = Self {
            id: BufferId::next(),
            capacity,
            storage: Mutex::new(vec![0u8; capacity].into_boxed_slice()),
        };
        debug!("Created buffer {} with capacity {}", buffer.id.raw(), capacity);
        buffer
    }

    /// Fixed capacity in bytes
    pub const fn capacity(&self) -> usize
    {
        self.capacity
    }

    /// Identity used to match cursors with this buffer
    pub const fn id(&self) -> BufferId
    {
        self.id
    }

    /// Copy of the current storage contents
    pub fn snapshot(&self) -> Vec<u8>
    {
        self.storage.lock().to_vec()
    }

    /// Start a new session, positioned at offset 0
    ///
    /// Never fails and never touches storage.
    pub fn open(&self) -> Cursor
    {
        info!("Open on buffer {} was successful", self.id.raw());
        Cursor::new(self.id)
    }

    /// Start a new session wrapped in a [`Session`] handle
    ///
    /// The session borrows the buffer and implements `std::io::{Read, Write, Seek}`.
    pub fn open_session(&self) -> Session<'_>
    {
        Session::new(self, self.open())
    }

    /// End a session
    ///
    /// Consumes the cursor, so no further operation can use it.
    pub fn close(&self, cursor: Cursor)
    {
        info!(
            "Close on buffer {} was successful (final position {})",
            self.id.raw(),
            cursor.position()
        );
        drop(cursor);
    }

    /// Move the cursor
    ///
    /// Returns the new position. The target must land in `[0, capacity]`.
    ///
    /// ## Errors
    ///
    /// - `InvalidOffset`: the target is out of range or the arithmetic overflowed.
    ///   The cursor is left where it was.
    /// - `InvalidArgument`: the cursor was opened on another buffer.
    pub fn seek(&self, cursor: &mut Cursor, offset: i64, mode: SeekMode) -> FcdResult<usize>
    {
        self.check_owner(cursor)?;
        debug!(
            "Seek requested: offset {} from {:?}, current position {}",
            offset,
            mode,
            cursor.position()
        );

        match resolve_target(mode, offset, cursor.position(), self.capacity) {
            Ok(target) => {
                cursor.set_position(target);
                debug!("New position = {}", target);
                Ok(target)
            }
            Err(err) => {
                warn!("Rejected seek: {err}");
                Err(err)
            }
        }
    }

    /// Read up to `requested` bytes at the cursor into `dest`
    ///
    /// The transfer is clamped to the bytes left before capacity. Returns the
    /// number of bytes copied, which is 0 once the cursor reaches the end.
    ///
    /// ## Errors
    ///
    /// - `TransferFault`: `dest` could not take the bytes. The cursor does not move.
    /// - `InvalidArgument`: the cursor was opened on another buffer.
    pub fn read<S>(&self, cursor: &mut Cursor, requested: usize, dest: &mut S) -> FcdResult<usize>
    where
        S: UserSink + ?Sized,
    {
        self.check_owner(cursor)?;
        let start = cursor.position();
        debug!("Read requested for {} bytes, current position {}", requested, start);

        let count = requested.min(self.remaining(cursor));
        {
            let storage = self.storage.lock();
            trace!("Acquired storage lock for read");
            dest.copy_to_user(&storage[start..start + count])?;
        }

        cursor.advance(count);
        debug!(
            "Number of bytes successfully read = {}, updated position = {}",
            count,
            cursor.position()
        );
        Ok(count)
    }

    /// Write bytes from `src` at the cursor
    ///
    /// The transfer is clamped to the bytes left before capacity, so a write
    /// may be short. Returns the number of bytes stored.
    ///
    /// ## Errors
    ///
    /// - `OutOfSpace`: the cursor is already at capacity. Nothing is copied.
    /// - `TransferFault`: `src` could not be read. Storage and cursor are unchanged.
    /// - `InvalidArgument`: the cursor was opened on another buffer.
    pub fn write<S>(&self, cursor: &mut Cursor, src: &S) -> FcdResult<usize>
    where
        S: UserSource + ?Sized,
    {
        self.check_owner(cursor)?;
        let start = cursor.position();
        debug!("Write requested for {} bytes, current position {}", src.len(), start);

        let available = self.remaining(cursor);
        if available == 0 {
            warn!("Write rejected: buffer {} is full at the cursor", self.id.raw());
            return Err(FcdError::OutOfSpace {
                capacity: self.capacity,
            });
        }

        // Stage first so a faulting source leaves storage untouched
        let count = src.len().min(available);
        let mut staged = vec![0u8; count];
        src.copy_from_user(&mut staged)?;

        {
            let mut storage = self.storage.lock();
            trace!("Acquired storage lock for write");
            storage[start..start + count].copy_from_slice(&staged);
        }

        cursor.advance(count);
        debug!(
            "Number of bytes successfully written = {}, updated position = {}",
            count,
            cursor.position()
        );
        Ok(count)
    }

    /// Bytes between the cursor and the end of the buffer
    pub fn remaining(&self, cursor: &Cursor) -> usize
    {
        self.capacity.saturating_sub(cursor.position())
    }

    fn check_owner(&self, cursor: &Cursor) -> FcdResult<()>
    {
        if cursor.owner() == self.id {
            Ok(())
        } else {
            Err(FcdError::InvalidArgument(format!(
                "cursor belongs to buffer {}, not buffer {}",
                cursor.owner().raw(),
                self.id.raw()
            )))
        }
    }
}

impl Default for BoundedBuffer
{
    fn default() -> Self
    {
        Self::zeroed(DEFAULT_CAPACITY)
    }
}

impl fmt::Debug for BoundedBuffer
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        f.debug_struct("BoundedBuffer")
            .field("id", &self.id)
            .field("capacity", &self.capacity)
            .finish_non_exhaustive()
    }
}
