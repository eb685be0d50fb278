//! Error types for progress persistence.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur while persisting progress.
///
/// Reading is never an error: missing or corrupt state loads as defaults.
/// Only writes can fail, and the caller keeps its in-memory state when they do.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No per-user data directory could be determined.
    #[error("Could not determine a data directory for progress files")]
    NoDataDir,

    /// Filesystem error while writing or removing the state file.
    #[error("Failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// State could not be serialized.
    #[error("Failed to serialize progress: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }
}
