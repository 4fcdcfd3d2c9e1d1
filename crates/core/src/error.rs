//! Error types for the hook protocol.

use thiserror::Error;

/// Result type alias for protocol operations.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Main error type for the hook protocol.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("Unknown command '{0}' (expected 'serve' or 'build')")]
    UnknownCommand(String),

    #[error("Unknown change event '{0}' (expected 'create', 'update' or 'delete')")]
    UnknownChangeEvent(String),
}
