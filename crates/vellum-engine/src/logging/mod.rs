//! Logger installation for binaries built on the engine.
//!
//! Library code logs through the `log` facade only.

mod init;

pub use init::{init_logging, LoggingConfig};
