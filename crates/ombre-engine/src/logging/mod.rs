//! Logging utilities.
//!
//! The engine only talks to the `log` facade; this module wires up
//! `env_logger` for binaries that want a ready-made backend.

mod init;

pub use init::{LoggingConfig, init_logging};
