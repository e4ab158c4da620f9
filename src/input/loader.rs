//! Concurrent loading of language files.

use std::path::{
    Path,
    PathBuf,
};
use std::sync::Arc;

use tokio::sync::Semaphore;

use super::InputError;
use super::json::parse_json;
use super::lang::parse_lang;
use crate::config::LangFormat;
use crate::types::LanguageData;

/// Loads `.lang` and `.json` files relative to a root, at most `limit` at a time.
///
/// A file that cannot be read or parsed loads as an empty table: the failure is
/// logged and the caller sees "no entries" instead of an error.
#[derive(Debug, Clone)]
pub struct LangFileLoader {
    root: PathBuf,
    semaphore: Arc<Semaphore>,
}

impl LangFileLoader {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>, limit: usize) -> Self {
        Self { root: root.into(), semaphore: Arc::new(Semaphore::new(limit.max(1))) }
    }

    /// Loads one file, or an empty table on failure.
    pub async fn load_file(&self, path: &Path) -> LanguageData {
        let absolute_path = self.root.join(path);
        match self.try_load_file(&absolute_path).await {
            Ok(data) => {
                tracing::debug!(path = %absolute_path.display(), entries = data.len(), "Loaded");
                data
            }
            Err(e) => {
                tracing::warn!(path = %absolute_path.display(), "Failed to load language file: {e}");
                LanguageData::new()
            }
        }
    }

    /// Loads several files concurrently; output order follows `paths`.
    pub async fn load_files(&self, paths: &[PathBuf]) -> Vec<LanguageData> {
        let futures: Vec<_> = paths.iter().map(|path| self.load_file(path)).collect();
        futures::future::join_all(futures).await
    }

    async fn try_load_file(&self, path: &Path) -> Result<LanguageData, InputError> {
        let Some(format) = LangFormat::from_path(path) else {
            return Err(InputError::UnsupportedExtension(path.to_path_buf()));
        };

        let _permit = self.semaphore.acquire().await?;
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| InputError::Io { path: path.to_path_buf(), source })?;

        match format {
            LangFormat::Lang => Ok(parse_lang(&content)),
            LangFormat::Json => parse_json(&content)
                .map_err(|source| InputError::Json { path: path.to_path_buf(), source }),
        }
    }
}
