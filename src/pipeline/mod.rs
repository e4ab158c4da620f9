//! Runs reconciliation for configured releases and writes the results.
mod runner;
mod types;

pub use runner::Pipeline;
pub use types::{
    PipelineError,
    VariantReport,
    VersionReport,
};
