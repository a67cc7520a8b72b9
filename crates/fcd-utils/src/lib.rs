//! # fcd Utilities
//!
//! Shared utilities, logging, and config for fcd.
//!
//! This crate provides the logging setup (built on `tracing`) and the device
//! configuration shared by the fcd binaries.

pub mod config;
pub mod logging;

pub use config::{ConfigError, DeviceConfig};
// Re-export commonly used logging functions for convenience
pub use logging::{dated_log_path, init_logging, LogConfig, LogFormat, LogLevel, LoggingError, LoggingGuard};
pub use tracing::{debug, error, info, trace, warn};
