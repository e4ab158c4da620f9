//! Core types used throughout the project.

use std::collections::BTreeMap;

use serde::{
    Deserialize,
    Deserializer,
    Serialize,
};

/// A flat translation table for one release and one language (key -> text).
///
/// Ordered by key so that every pass over it, and every file written from it,
/// is deterministic.
pub type LanguageData = BTreeMap<String, String>;

/// Latest-release key -> the older-release keys it corresponds to, in discovery order.
pub type CorrespondenceMap = BTreeMap<String, Vec<String>>;

/// Builds a [`LanguageData`] from `(key, text)` pairs.
///
/// # Examples
/// ```
/// use lang_reconcile::types::language_data;
///
/// let data = language_data([("block.minecraft.stone", "Stone")]);
/// assert_eq!(data.get("block.minecraft.stone").map(String::as_str), Some("Stone"));
/// ```
#[must_use]
pub fn language_data<K, V, I>(entries: I) -> LanguageData
where
    K: Into<String>,
    V: Into<String>,
    I: IntoIterator<Item = (K, V)>,
{
    entries.into_iter().map(|(k, v)| (k.into(), v.into())).collect()
}

/// A JSON value that is either a single string or a list of strings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl OneOrMany {
    #[must_use]
    pub fn into_vec(self) -> Vec<String> {
        match self {
            Self::One(value) => vec![value],
            Self::Many(values) => values,
        }
    }
}

/// `deserialize_with` helper accepting `"a"` as well as `["a", "b"]`.
pub(crate) fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    OneOrMany::deserialize(deserializer).map(OneOrMany::into_vec)
}

/// Appends `old_key` to the correspondence list of `new_key`, ignoring repeats.
pub(crate) fn push_correspondence(map: &mut CorrespondenceMap, new_key: &str, old_key: &str) {
    let old_keys = map.entry(new_key.to_string()).or_default();
    if !old_keys.iter().any(|k| k == old_key) {
        old_keys.push(old_key.to_string());
    }
}
