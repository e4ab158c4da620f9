//! Types shared by the key mapper and the change classifier.

use serde::{
    Deserialize,
    Serialize,
};

use crate::types::{
    CorrespondenceMap,
    LanguageData,
};

/// Key naming scheme used by a release.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyConvention {
    /// Pre-flattening keys, e.g. `tile.stone.name`.
    Legacy,
    /// Namespaced keys, e.g. `block.minecraft.stone`.
    Modern,
}

/// Structural correspondence between a modern key prefix and its legacy prefixes.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PrefixRule {
    pub modern: String,
    #[serde(deserialize_with = "crate::types::one_or_many")]
    pub legacy: Vec<String>,
}

impl PrefixRule {
    #[must_use]
    pub fn new<I, S>(modern: impl Into<String>, legacy: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { modern: modern.into(), legacy: legacy.into_iter().map(Into::into).collect() }
    }

    /// Returns true if the pair satisfies this rule.
    #[must_use]
    pub fn matches(&self, modern_key: &str, legacy_key: &str) -> bool {
        modern_key.starts_with(&self.modern)
            && self.legacy.iter().any(|prefix| legacy_key.starts_with(prefix.as_str()))
    }
}

/// The built-in rule list, highest priority first.
///
/// More specific modern prefixes must come before the generic ones they share a
/// start with (`item.minecraft.potion.effect.` before `item.minecraft.`).
#[must_use]
pub fn default_prefix_rules() -> Vec<PrefixRule> {
    vec![
        PrefixRule::new("item.minecraft.lingering_potion.effect.", ["lingering_potion.effect."]),
        PrefixRule::new("item.minecraft.splash_potion.effect.", ["splash_potion.effect."]),
        PrefixRule::new("item.minecraft.potion.effect.", ["potion.effect."]),
        PrefixRule::new("effect.minecraft.", ["effect."]),
        PrefixRule::new("entity.minecraft.", ["entity."]),
        PrefixRule::new("block.minecraft.", ["tile.", "item."]),
        PrefixRule::new("item.minecraft.", ["tile.", "item."]),
        PrefixRule::new("enchantment.minecraft.", ["enchantment."]),
    ]
}

/// Output of the key mapper, split by whether the source text is unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyCorrespondence {
    /// Source text identical in both releases.
    pub same: CorrespondenceMap,
    /// Source text changed between the releases.
    pub diff: CorrespondenceMap,
}

impl KeyCorrespondence {
    /// Iterates every `(new_key, old_key)` pair, `same` first.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.same.iter().chain(self.diff.iter()).flat_map(|(new_key, old_keys)| {
            old_keys.iter().map(move |old_key| (new_key.as_str(), old_key.as_str()))
        })
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.same.is_empty() && self.diff.is_empty()
    }
}

/// Source text unchanged, translation changed. Propagated and kept for audit.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SummaryRecord {
    pub old_key: String,
    pub old_value: String,
    pub new_key: String,
    pub new_value: String,
    pub source_text: Option<String>,
}

/// Source text changed and translation changed. Propagated but needs review.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ManualCheckRecord {
    pub old_key: String,
    pub old_value: String,
    pub old_source_text: Option<String>,
    pub new_key: String,
    pub new_value: String,
    pub new_source_text: Option<String>,
}

/// An old key that received two different translations in one run.
///
/// The later write wins; this only reports that it happened.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Conflict {
    pub old_key: String,
    pub replaced: String,
    pub kept: String,
}

/// Output of the change classifier.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classification {
    /// Old key -> translation that should replace it.
    pub result: LanguageData,
    pub summary: Vec<SummaryRecord>,
    pub manual_check: Vec<ManualCheckRecord>,
    pub conflicts: Vec<Conflict>,
}
