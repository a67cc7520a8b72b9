//! # Sessions
//!
//! An open session on a [`BoundedBuffer`]: a borrowed buffer plus the
//! session's own [`Cursor`].
//!
//! The session state machine is `Opened → (Seek|Read|Write)* → Closed`.
//! [`Session::close`] consumes the session, so the compiler rules out any
//! operation after `Closed`. Dropping a session without calling `close`
//! simply releases its cursor.
//!
//! Sessions also implement `std::io::{Read, Write, Seek}`, which lets the
//! buffer stand in anywhere a seekable stream is expected.

use std::io::{self, SeekFrom};

use crate::buffer::BoundedBuffer;
use crate::cursor::Cursor;
use crate::error::{FcdError, FcdResult};
use crate::seek::SeekMode;
use crate::transfer::{UserSink, UserSource};

/// One open session on a buffer
#[derive(Debug)]
pub struct Session<'a>
{
    buffer: &'a BoundedBuffer,
    cursor: Cursor,
}

impl<'a> Session<'a>
{
    pub(crate) fn new(buffer: &'a BoundedBuffer, cursor: Cursor) -> Self
    {
        Self { buffer, cursor }
    }

    /// The buffer this session reads and writes
    pub fn buffer(&self) -> &'a BoundedBuffer
    {
        self.buffer
    }

    /// Current cursor position
    pub fn position(&self) -> usize
    {
        self.cursor.position()
    }

    /// See [`BoundedBuffer::seek`]
    pub fn seek_to(&mut self, offset: i64, mode: SeekMode) -> FcdResult<usize>
    {
        self.buffer.seek(&mut self.cursor, offset, mode)
    }

    /// See [`BoundedBuffer::read`]
    pub fn read_into<S>(&mut self, requested: usize, dest: &mut S) -> FcdResult<usize>
    where
        S: UserSink + ?Sized,
    {
        self.buffer.read(&mut self.cursor, requested, dest)
    }

    /// See [`BoundedBuffer::write`]
    pub fn write_from<S>(&mut self, src: &S) -> FcdResult<usize>
    where
        S: UserSource + ?Sized,
    {
        self.buffer.write(&mut self.cursor, src)
    }

    /// End the session
    pub fn close(self)
    {
        self.buffer.close(self.cursor);
    }
}

impl io::Read for Session<'_>
{
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize>
    {
        let requested = buf.len();
        Ok(self.read_into(requested, buf)?)
    }
}

impl io::Write for Session<'_>
{
    fn write(&mut self, buf: &[u8]) -> io::Result<usize>
    {
        Ok(self.write_from(buf)?)
    }

    fn flush(&mut self) -> io::Result<()>
    {
        Ok(())
    }
}

impl io::Seek for Session<'_>
{
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64>
    {
        let capacity = self.buffer.capacity();
        let (mode, offset) = match pos {
            SeekFrom::Start(offset) => {
                let offset = i64::try_from(offset).map_err(|_| FcdError::InvalidOffset {
                    target: None,
                    capacity,
                })?;
                (SeekMode::FromStart, offset)
            }
            SeekFrom::Current(offset) => (SeekMode::FromCurrent, offset),
            SeekFrom::End(offset) => (SeekMode::FromEnd, offset),
        };
        let position = self.seek_to(offset, mode)?;
        u64::try_from(position).map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))
    }
}
