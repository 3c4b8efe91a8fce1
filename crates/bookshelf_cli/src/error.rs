use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort a CLI invocation.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// I/O error
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// Could not create a directory the configuration points at
    #[error("Failed to create directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The library database could not be opened or used
    #[error("{0}")]
    Store(#[from] bookshelf_core::StoreError),

    /// JSON rendering failed
    #[error("Output error: {0}")]
    Json(#[from] serde_json::Error),
}
