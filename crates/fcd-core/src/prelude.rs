//! Common module for library exports

pub use crate::binding::{CharDevice, DeviceNumber, Errno, FileHandle};
pub use crate::buffer::{BoundedBuffer, DEFAULT_CAPACITY};
pub use crate::cursor::Cursor;
pub use crate::error::{FcdError, FcdResult};
pub use crate::seek::SeekMode;
pub use crate::session::Session;
pub use crate::transfer::{UserSink, UserSource};
