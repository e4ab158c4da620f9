//! lang-reconcile
//!
//! Carries translations from the latest game release back to older releases,
//! following keys through the legacy to modern key migration.

pub mod config;
pub mod input;
pub mod output;
pub mod pack;
pub mod pipeline;
pub mod reconcile;
pub mod types;

#[cfg(test)]
mod test_utils;

pub use pipeline::Pipeline;
