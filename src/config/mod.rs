//! Settings for a reconciliation run.
/// Settings file loader
mod loader;
/// Settings holder
mod manager;
/// Settings types and validation
mod types;

pub use loader::CONFIG_FILE_NAME;
pub use manager::ConfigManager;
pub use types::{
    ConfigError,
    EpochConfig,
    LangFormat,
    Settings,
    ValidationError,
};
