//! Engine error types.

use std::path::PathBuf;

use thiserror::Error;

use crate::engine::Phase;

/// Error type for host-side operations.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Config file could not be parsed.
    #[error("Invalid config: {0}")]
    Config(String),

    /// Failed to read or write a file.
    #[error("IO error on {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// No plugin resolved a bare specifier.
    #[error("Cannot resolve '{specifier}' imported from {importer}")]
    UnresolvedImport { specifier: String, importer: String },

    /// A non-file id that no plugin was willing to load.
    #[error("No plugin could load '{0}'")]
    LoadFailed(String),

    /// A session operation was called in the wrong lifecycle phase.
    #[error("Out of order: expected phase {expected:?}, engine is in {actual:?}")]
    OutOfOrder { expected: Phase, actual: Phase },
}

impl EngineError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        EngineError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;
