//! Shared utilities for the voting-power workspace.

pub mod error;
pub mod logging;

pub use error::LoggingError;
pub use logging::{init_logging, try_init_logging, LogFormat};
