//! Output boundary: reconciled files and review reports.
mod writer;

use std::path::PathBuf;

use thiserror::Error;

pub use writer::{
    save_language_file,
    save_report,
    to_json_string,
    to_lang_string,
};

#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize output: {0}")]
    Json(#[from] serde_json::Error),
}
