//! Hand-maintained legacy -> modern key overrides.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use super::InputError;
use crate::types::OneOrMany;

/// Legacy keys whose modern name cannot be derived from a prefix rule.
///
/// Loaded from a JSON object whose values are a modern key or a list of them:
///
/// ```json
/// {
///   "tile.stonebrick.name": "block.minecraft.cobblestone",
///   "item.record.name": ["item.minecraft.music_disc_13", "item.minecraft.music_disc_cat"]
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "BTreeMap<String, OneOrMany>")]
pub struct DirectMappingTable {
    entries: BTreeMap<String, Vec<String>>,
}

impl From<BTreeMap<String, OneOrMany>> for DirectMappingTable {
    fn from(raw: BTreeMap<String, OneOrMany>) -> Self {
        Self { entries: raw.into_iter().map(|(k, v)| (k, v.into_vec())).collect() }
    }
}

impl<K, I, S> FromIterator<(K, I)> for DirectMappingTable
where
    K: Into<String>,
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, I)>>(iter: T) -> Self {
        let entries = iter
            .into_iter()
            .map(|(legacy, modern)| (legacy.into(), modern.into_iter().map(Into::into).collect()))
            .collect();
        Self { entries }
    }
}

impl DirectMappingTable {
    /// Reads the table from a JSON file.
    ///
    /// # Errors
    /// Returns error if the file cannot be read or is not a JSON object of
    /// strings / string lists.
    pub fn load(path: &Path) -> Result<Self, InputError> {
        let content = std::fs::read_to_string(path)
            .map_err(|source| InputError::Io { path: path.to_path_buf(), source })?;
        let table: Self = serde_json::from_str(&content)
            .map_err(|source| InputError::Json { path: path.to_path_buf(), source })?;

        tracing::info!(path = %path.display(), entries = table.len(), "Loaded direct key mappings");
        Ok(table)
    }

    /// Iterates `(legacy_key, modern_keys)` in legacy-key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries.iter().map(|(legacy, modern)| (legacy.as_str(), modern.as_slice()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
