//! Logging utilities.
//!
//! Centralizes logger initialization behind the `log` facade; everything in
//! the engine logs through `log::...` macros.

mod init;

pub use init::{LoggingConfig, init_logging};
