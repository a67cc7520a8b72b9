//! Per-session position tracking.

use std::sync::atomic::{AtomicU64, Ordering};

/// Identity of a [`crate::BoundedBuffer`], used to tie cursors to their buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BufferId(u64);

impl BufferId
{
    pub(crate) fn next() -> Self
    {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        BufferId(NEXT.fetch_add(1, Ordering::Relaxed))
    }

    /// Raw numeric identifier
    pub const fn raw(self) -> u64
    {
        self.0
    }
}

/// Read/write position of one open session
///
/// A cursor is only created by [`crate::BoundedBuffer::open`] and always
/// satisfies `0 <= position <= capacity` for the buffer that created it.
/// It is deliberately neither `Clone` nor `Copy`: each open session owns
/// exactly one cursor, and closing the session consumes it.
#[derive(Debug, PartialEq, Eq)]
pub struct Cursor
{
    owner: BufferId,
    position: usize,
}

impl Cursor
{
    pub(crate) const fn new(owner: BufferId) -> Self
    {
        Self { owner, position: 0 }
    }

    /// Current position in bytes from the start of the buffer
    pub const fn position(&self) -> usize
    {
        self.position
    }

    /// Buffer this cursor was opened against
    pub const fn owner(&self) -> BufferId
    {
        self.owner
    }

    pub(crate) fn set_position(&mut self, position: usize)
    {
        self.position = position;
    }

    pub(crate) fn advance(&mut self, count: usize)
    {
        self.position += count;
    }
}
