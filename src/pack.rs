//! Resource pack archives for reconciled releases.

use std::fs::File;
use std::io::Write;
use std::path::{
    Path,
    PathBuf,
};

use thiserror::Error;
use zip::CompressionMethod;
use zip::write::FileOptions;

use crate::config::{
    ConfigManager,
    EpochConfig,
};

#[derive(Error, Debug)]
pub enum PackError {
    #[error("Failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write archive: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("Packing task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Everything that goes into one release's archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackLayout {
    pub version: String,
    pub archive: PathBuf,
    pub manifest: PathBuf,
    pub icon: PathBuf,
    /// (file on disk, path inside the archive)
    pub lang_files: Vec<(PathBuf, String)>,
}

impl PackLayout {
    /// Collects the reconciled files of the release's regular variants that exist.
    ///
    /// Extra variants are left out: the release itself cannot load them.
    #[must_use]
    pub fn for_epoch(config: &ConfigManager, epoch: &EpochConfig) -> Self {
        let settings = config.get_settings();
        let output_dir = config.resolve(&settings.output_dir).join(&epoch.version);

        let lang_files = epoch
            .variants
            .iter()
            .map(|variant| {
                let file_name = epoch.file_name(variant);
                let entry = format!("{}/{file_name}", settings.lang_asset_dir.trim_end_matches('/'));
                (output_dir.join(file_name), entry)
            })
            .filter(|(path, _)| path.exists())
            .collect();

        Self {
            version: epoch.version.clone(),
            archive: output_dir.join(format!("{}_{}.zip", settings.pack_name, epoch.version)),
            manifest: config.resolve(&settings.data_dir).join(&epoch.version).join("pack.mcmeta"),
            icon: config.resolve(&settings.pack_icon),
            lang_files,
        }
    }
}

/// Writes the archive described by `layout`, replacing any previous one.
///
/// # Errors
/// Returns error if an input file is missing or the archive cannot be written.
pub fn write_pack(layout: &PackLayout) -> Result<(), PackError> {
    let mut entries = vec![
        ("pack.mcmeta", read_input(&layout.manifest)?),
        ("pack.png", read_input(&layout.icon)?),
    ];
    for (path, entry) in &layout.lang_files {
        entries.push((entry.as_str(), read_input(path)?));
    }

    if let Some(parent) = layout.archive.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|source| PackError::Io { path: parent.to_path_buf(), source })?;
    }
    let file = File::create(&layout.archive)
        .map_err(|source| PackError::Io { path: layout.archive.clone(), source })?;

    let mut zip = zip::ZipWriter::new(file);
    let options = FileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .compression_level(Some(6));

    for (entry, content) in &entries {
        zip.start_file(*entry, options)?;
        zip.write_all(content)
            .map_err(|source| PackError::Io { path: layout.archive.clone(), source })?;
    }
    zip.finish()?;

    tracing::info!(
        version = %layout.version,
        archive = %layout.archive.display(),
        files = layout.lang_files.len(),
        "Wrote resource pack"
    );
    Ok(())
}

fn read_input(path: &Path) -> Result<Vec<u8>, PackError> {
    std::fs::read(path).map_err(|source| PackError::Io { path: path.to_path_buf(), source })
}

/// Packs several releases concurrently on the blocking pool.
///
/// # Errors
/// Returns the first failure; the other archives are still attempted.
pub async fn build_packs(layouts: Vec<PackLayout>) -> Result<Vec<PathBuf>, PackError> {
    let tasks: Vec<_> = layouts
        .into_iter()
        .map(|layout| {
            tokio::task::spawn_blocking(move || write_pack(&layout).map(|()| layout.archive))
        })
        .collect();

    futures::future::join_all(tasks).await.into_iter().map(|joined| joined?).collect()
}
