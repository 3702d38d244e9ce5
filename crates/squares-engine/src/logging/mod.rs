//! Logging utilities.
//!
//! Centralizes logger initialization behind the `log` facade.

mod init;

pub use init::{default_filter, init_logging, LoggingConfig};
