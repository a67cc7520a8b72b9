//! # fcd-core
//!
//! A fixed-capacity in-memory byte buffer behind a file-like interface.
//!
//! This crate provides the cursor and bounds logic of a faux character
//! device:
//! - A bounded, zero-initialised buffer ([`BoundedBuffer`])
//! - Per-session cursors with open/seek/read/write/close ([`Cursor`], [`Session`])
//! - Transfer primitives for copying to and from caller memory ([`transfer`])
//! - A character-device style binding that speaks `whence` and errno ([`binding`])
//!
//! ## Semantics at the edges
//!
//! - Seek targets must land in `[0, capacity]`, for every mode.
//! - Reads and writes are clamped to the remaining space ("short" transfers).
//! - Reading at the end returns 0 bytes; writing at the end is
//!   [`FcdError::OutOfSpace`].
//! - A failed operation leaves the buffer and cursor exactly as they were.

pub mod binding;
pub mod buffer;
pub mod cursor;
pub mod error;
pub mod prelude;
pub mod seek;
pub mod session;
pub mod transfer;

pub use buffer::{BoundedBuffer, DEFAULT_CAPACITY};
pub use cursor::{BufferId, Cursor};
// Re-export commonly used types
pub use error::{FcdError, FcdResult};
pub use seek::SeekMode;
pub use session::Session;
