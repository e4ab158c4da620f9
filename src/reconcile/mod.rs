//! Key reconciliation and change detection between two releases.
//!
//! Both steps are pure functions over loaded tables:
//! [`KeyMapper::reconcile_keys`] pairs latest keys with old keys, then
//! [`classify`] decides per old key whether its translation is replaced and
//! what is reported for review.
mod classify;
mod keys;
mod types;

pub use classify::classify;
pub use keys::KeyMapper;
pub use types::{
    Classification,
    Conflict,
    KeyConvention,
    KeyCorrespondence,
    ManualCheckRecord,
    PrefixRule,
    SummaryRecord,
    default_prefix_rules,
};
