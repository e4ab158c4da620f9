use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while reading language files and the mapping table.
#[derive(Error, Debug)]
pub enum InputError {
    /// Error when failing to read a file
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Error when a JSON document is malformed
    #[error("Failed to parse JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    /// Error when the file extension is neither `.lang` nor `.json`
    #[error("Unsupported language file extension: {0}")]
    UnsupportedExtension(PathBuf),
    /// Error when the loader's semaphore was closed
    #[error("File loader is shut down")]
    Closed(#[from] tokio::sync::AcquireError),
}
