//! Decides which old translations to replace and what to report for review.

use super::types::{
    Classification,
    Conflict,
    KeyCorrespondence,
    ManualCheckRecord,
    SummaryRecord,
};
use crate::types::LanguageData;

/// Walks every correspondence and carries the latest translation back to the old key.
///
/// When `old_target` is empty the variant did not exist in the old release, so
/// every correspondence whose latest key is translated is copied without
/// records. Otherwise only pairs whose translations both exist and differ are
/// written, each with a [`SummaryRecord`] (source text unchanged) or a
/// [`ManualCheckRecord`] (source text changed).
///
/// `same` is walked before `diff`, each in key order; if an old key is written
/// twice with different text the later write wins and a [`Conflict`] is recorded.
#[must_use]
pub fn classify(
    new_source: &LanguageData,
    old_source: &LanguageData,
    new_target: &LanguageData,
    old_target: &LanguageData,
    correspondence: &KeyCorrespondence,
) -> Classification {
    if old_target.is_empty() {
        return carry_forward(new_target, correspondence);
    }

    let mut classification = Classification::default();

    for (new_key, old_keys) in &correspondence.same {
        let Some(new_value) = new_target.get(new_key) else {
            continue;
        };
        for old_key in old_keys {
            let Some(old_value) = old_target.get(old_key) else {
                continue;
            };
            if old_value == new_value {
                continue;
            }
            classification.summary.push(SummaryRecord {
                old_key: old_key.clone(),
                old_value: old_value.clone(),
                new_key: new_key.clone(),
                new_value: new_value.clone(),
                source_text: new_source.get(new_key).cloned(),
            });
            write_result(&mut classification, old_key, new_value);
        }
    }

    for (new_key, old_keys) in &correspondence.diff {
        let Some(new_value) = new_target.get(new_key) else {
            continue;
        };
        for old_key in old_keys {
            let Some(old_value) = old_target.get(old_key) else {
                continue;
            };
            if old_value == new_value {
                continue;
            }
            classification.manual_check.push(ManualCheckRecord {
                old_key: old_key.clone(),
                old_value: old_value.clone(),
                old_source_text: old_source.get(old_key).cloned(),
                new_key: new_key.clone(),
                new_value: new_value.clone(),
                new_source_text: new_source.get(new_key).cloned(),
            });
            write_result(&mut classification, old_key, new_value);
        }
    }

    classification
}

/// Cold variant: nothing to compare against, copy everything reachable.
fn carry_forward(new_target: &LanguageData, correspondence: &KeyCorrespondence) -> Classification {
    let mut classification = Classification::default();
    for (new_key, old_key) in correspondence.pairs() {
        if let Some(new_value) = new_target.get(new_key) {
            write_result(&mut classification, old_key, new_value);
        }
    }
    classification
}

/// Inserts into `result`, recording a [`Conflict`] if a different value is replaced.
fn write_result(classification: &mut Classification, old_key: &str, value: &str) {
    if let Some(replaced) = classification.result.insert(old_key.to_string(), value.to_string())
        && replaced != value
    {
        tracing::warn!(old_key, %replaced, kept = value, "Old key received two different translations");
        classification.conflicts.push(Conflict {
            old_key: old_key.to_string(),
            replaced,
            kept: value.to_string(),
        });
    }
}
