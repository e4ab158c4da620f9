//! Reads the settings file from a project root.

use std::path::Path;

use super::{
    ConfigError,
    Settings,
};

/// Name of the settings file looked up in the project root.
pub const CONFIG_FILE_NAME: &str = ".lang-reconcile.json";

/// Loads `.lang-reconcile.json` from `root`.
///
/// # Returns
/// - `Ok(Some(settings))`: file found and parsed
/// - `Ok(None)`: no settings file
/// - `Err(ConfigError)`: read or parse failure
///
/// # Errors
/// - File read error
/// - JSON parse error
pub(super) fn load_from_root(root: &Path) -> Result<Option<Settings>, ConfigError> {
    let config_path = root.join(CONFIG_FILE_NAME);

    if !config_path.exists() {
        tracing::debug!(path = %config_path.display(), "Configuration file not found");
        return Ok(None);
    }

    tracing::debug!(path = %config_path.display(), "Loading configuration");

    let content = std::fs::read_to_string(&config_path)?;
    let settings: Settings = serde_json::from_str(&content)?;

    Ok(Some(settings))
}
