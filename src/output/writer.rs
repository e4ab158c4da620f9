//! Sorted language files and audit reports.

use std::fmt::Write as _;
use std::path::{
    Path,
    PathBuf,
};

use serde::Serialize;

use super::OutputError;
use crate::config::LangFormat;
use crate::types::LanguageData;

/// Renders `key=value` lines in key order, each ending in `\n`.
///
/// Line breaks inside a value are written as the two characters `\n` so that
/// every entry stays on one line.
#[must_use]
pub fn to_lang_string(data: &LanguageData) -> String {
    data.iter().fold(String::new(), |mut out, (key, value)| {
        if value.contains(['\n', '\r']) {
            tracing::warn!(key = %key, "Escaping line break in .lang value");
            let escaped = value.replace("\r\n", "\\n").replace(['\n', '\r'], "\\n");
            let _ = writeln!(out, "{key}={escaped}");
        } else {
            let _ = writeln!(out, "{key}={value}");
        }
        out
    })
}

/// Renders a pretty-printed JSON object in key order.
///
/// # Errors
/// Returns error if serialization fails.
pub fn to_json_string(data: &LanguageData) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(data)
}

/// Writes a reconciled table in the given format, creating parent directories.
///
/// # Errors
/// Returns error if the directory or file cannot be written.
pub async fn save_language_file(
    data: &LanguageData,
    path: &Path,
    format: LangFormat,
) -> Result<(), OutputError> {
    let content = match format {
        LangFormat::Lang => to_lang_string(data),
        LangFormat::Json => to_json_string(data)?,
    };
    write_file(path, content).await?;

    tracing::debug!(path = %path.display(), entries = data.len(), "Saved language file");
    Ok(())
}

/// Writes review records as a JSON array; nothing is written when `records` is empty.
///
/// Returns whether a file was written.
///
/// # Errors
/// Returns error if serialization or the write fails.
pub async fn save_report<T: Serialize>(path: &Path, records: &[T]) -> Result<bool, OutputError> {
    if records.is_empty() {
        return Ok(false);
    }

    let content = serde_json::to_string_pretty(records)?;
    write_file(path, content).await?;

    tracing::debug!(path = %path.display(), records = records.len(), "Saved report");
    Ok(true)
}

/// Creates parent directories, then writes `content`.
async fn write_file(path: &Path, content: String) -> Result<(), OutputError> {
    let io_error = |source| OutputError::Io { path: PathBuf::from(path), source };

    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await.map_err(io_error)?;
    }
    tokio::fs::write(path, content).await.map_err(io_error)
}
