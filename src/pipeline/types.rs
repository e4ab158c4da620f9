//! Pipeline type definitions.

use std::time::Duration;

use thiserror::Error;

use crate::input::InputError;
use crate::output::OutputError;
use crate::pack::PackError;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Unknown release '{0}'. Add it to `versions` in the settings file")]
    UnknownVersion(String),

    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Output(#[from] OutputError),

    #[error(transparent)]
    Pack(#[from] PackError),
}

/// Outcome for one variant of one release.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantReport {
    pub variant: String,
    /// Variant absent from the release; everything was carried forward.
    pub extra: bool,
    /// Old keys whose translation was replaced.
    pub updated: usize,
    pub summary: usize,
    pub manual_check: usize,
    pub conflicts: usize,
}

/// Outcome for one release.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionReport {
    pub version: String,
    pub elapsed: Duration,
    pub variants: Vec<VariantReport>,
}

impl VersionReport {
    #[must_use]
    pub fn variant(&self, variant: &str) -> Option<&VariantReport> {
        self.variants.iter().find(|report| report.variant == variant)
    }
}
