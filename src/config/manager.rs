//! Owns the active settings and the project root they were loaded from.

use std::path::{
    Path,
    PathBuf,
};

use super::{
    ConfigError,
    Settings,
    loader,
};

#[derive(Default, Debug, Clone)]
pub struct ConfigManager {
    current_settings: Settings,

    /// Relative paths in the settings resolve against this.
    root: PathBuf,
}

impl ConfigManager {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { current_settings: Settings::default(), root: root.into() }
    }

    /// Loads and validates the settings file under the root, falling back to defaults.
    ///
    /// # Errors
    /// - File read error
    /// - JSON parse error
    /// - Validation error
    pub fn load_settings(&mut self) -> Result<(), ConfigError> {
        tracing::debug!(root = %self.root.display(), "Loading settings");

        let settings = loader::load_from_root(&self.root)?.unwrap_or_else(|| {
            tracing::debug!("No settings file, using defaults");
            Settings::default()
        });

        settings.validate().map_err(ConfigError::ValidationErrors)?;

        self.current_settings = settings;
        tracing::debug!(versions = self.current_settings.versions.len(), "Settings loaded");

        Ok(())
    }

    /// Replaces the settings after validating them.
    ///
    /// # Errors
    /// Validation error
    pub fn update_settings(&mut self, new_settings: Settings) -> Result<(), ConfigError> {
        new_settings.validate().map_err(ConfigError::ValidationErrors)?;
        self.current_settings = new_settings;
        Ok(())
    }

    #[must_use]
    pub const fn get_settings(&self) -> &Settings {
        &self.current_settings
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolves a settings path against the root.
    #[must_use]
    pub fn resolve(&self, path: &Path) -> PathBuf {
        self.root.join(path)
    }
}
