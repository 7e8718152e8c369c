//! Logging utilities.
//!
//! Centralizes logger initialization on top of the `log` facade. The backend
//! is `env_logger`, optionally teeing every record into a log file.

mod init;

pub use init::{init_logging, LoggingConfig};
