//! Fixture projects shared by the test modules.
#![cfg(test)]
#![allow(clippy::unwrap_used)]

use std::fs;
use std::path::Path;

use tempfile::TempDir;

use crate::config::{
    CONFIG_FILE_NAME,
    ConfigManager,
};

/// Writes `content` to `root/name`, creating parent directories.
pub(crate) fn write_file(root: &Path, name: &str, content: impl AsRef<[u8]>) {
    let path = root.join(name);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

/// Creates a project with the given settings file and an empty mapping table,
/// and loads its settings.
pub(crate) fn create_project(settings: &str) -> (TempDir, ConfigManager) {
    let dir = TempDir::new().unwrap();
    write_file(dir.path(), CONFIG_FILE_NAME, settings);
    write_file(dir.path(), "data/mapping.json", "{}");

    let mut config = ConfigManager::new(dir.path());
    config.load_settings().unwrap();
    (dir, config)
}
