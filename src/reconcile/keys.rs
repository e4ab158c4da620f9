//! Matches latest-release keys to the keys of an older release.

use std::collections::{
    HashMap,
    HashSet,
};

use super::types::{
    KeyConvention,
    KeyCorrespondence,
    PrefixRule,
};
use crate::input::DirectMappingTable;
use crate::types::{
    LanguageData,
    push_correspondence,
};

/// Finds which old keys denote the same string as each latest key.
///
/// Pure: holds only the read-only override table and rule list, so one instance
/// can serve any number of concurrent runs.
#[derive(Debug, Clone, Default)]
pub struct KeyMapper {
    direct: DirectMappingTable,
    rules: Vec<PrefixRule>,
}

impl KeyMapper {
    /// `rules` are tried in order.
    #[must_use]
    pub const fn new(direct: DirectMappingTable, rules: Vec<PrefixRule>) -> Self {
        Self { direct, rules }
    }

    #[must_use]
    pub const fn direct_mappings(&self) -> &DirectMappingTable {
        &self.direct
    }

    #[must_use]
    pub fn prefix_rules(&self) -> &[PrefixRule] {
        &self.rules
    }

    /// Splits the correspondences between `new_source` (modern keys) and
    /// `old_source` into those whose source text is unchanged and those whose
    /// text changed.
    ///
    /// Keys without a counterpart appear in neither map.
    #[must_use]
    pub fn reconcile_keys(
        &self,
        new_source: &LanguageData,
        old_source: &LanguageData,
        old_convention: KeyConvention,
    ) -> KeyCorrespondence {
        let correspondence = match old_convention {
            KeyConvention::Modern => match_by_identity(new_source, old_source),
            KeyConvention::Legacy => self.match_legacy(new_source, old_source),
        };

        tracing::debug!(
            ?old_convention,
            same = correspondence.same.len(),
            diff = correspondence.diff.len(),
            "Reconciled keys"
        );
        correspondence
    }

    /// Override table first, then prefix rules over keys sharing identical text.
    fn match_legacy(
        &self,
        new_source: &LanguageData,
        old_source: &LanguageData,
    ) -> KeyCorrespondence {
        let mut correspondence = KeyCorrespondence::default();
        let mut claimed: HashSet<&str> = HashSet::new();

        for (legacy_key, modern_keys) in self.direct.iter() {
            let Some(old_text) = old_source.get(legacy_key) else {
                continue;
            };
            for modern_key in modern_keys {
                let Some((modern_key, new_text)) = new_source.get_key_value(modern_key.as_str())
                else {
                    continue;
                };
                let bucket = if new_text == old_text {
                    &mut correspondence.same
                } else {
                    &mut correspondence.diff
                };
                push_correspondence(bucket, modern_key, legacy_key);
                claimed.insert(modern_key.as_str());
            }
        }

        // Structural matches require equal text, so they only ever land in `same`.
        let by_text = index_by_text(old_source);
        for (modern_key, text) in new_source {
            if claimed.contains(modern_key.as_str()) {
                continue;
            }
            let Some(candidates) = by_text.get(text.as_str()) else {
                continue;
            };
            for legacy_key in candidates {
                if self.is_structural_match(modern_key, legacy_key) {
                    push_correspondence(&mut correspondence.same, modern_key, legacy_key);
                }
            }
        }

        correspondence
    }

    /// A prefix rule accepts the pair, or failing that the keys are identical.
    fn is_structural_match(&self, modern_key: &str, legacy_key: &str) -> bool {
        self.rules.iter().any(|rule| rule.matches(modern_key, legacy_key))
            || modern_key == legacy_key
    }
}

/// Same key in both releases; the text decides the bucket.
fn match_by_identity(new_source: &LanguageData, old_source: &LanguageData) -> KeyCorrespondence {
    let mut correspondence = KeyCorrespondence::default();

    for (key, new_text) in new_source {
        let Some(old_text) = old_source.get(key) else {
            continue;
        };
        let bucket =
            if new_text == old_text { &mut correspondence.same } else { &mut correspondence.diff };
        bucket.insert(key.clone(), vec![key.clone()]);
    }

    correspondence
}

/// Text -> keys carrying it, keys in map order.
fn index_by_text(source: &LanguageData) -> HashMap<&str, Vec<&str>> {
    let mut index: HashMap<&str, Vec<&str>> = HashMap::new();
    for (key, text) in source {
        index.entry(text.as_str()).or_default().push(key.as_str());
    }
    index
}
