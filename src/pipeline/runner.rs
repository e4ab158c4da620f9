//! Per-release orchestration around the pure reconciliation core.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use super::types::{
    PipelineError,
    VariantReport,
    VersionReport,
};
use crate::config::{
    ConfigManager,
    EpochConfig,
};
use crate::input::{
    DirectMappingTable,
    LangFileLoader,
};
use crate::output::{
    save_language_file,
    save_report,
};
use crate::pack::{
    PackLayout,
    build_packs,
};
use crate::reconcile::{
    KeyMapper,
    classify,
};
use crate::types::LanguageData;

/// Loads inputs, runs the key mapper and classifier, and saves the outputs.
#[derive(Debug, Clone)]
pub struct Pipeline {
    /// Settings and root for every path.
    config: Arc<ConfigManager>,
    mapper: Arc<KeyMapper>,
    loader: LangFileLoader,
}

impl Pipeline {
    #[must_use]
    pub fn new(config: ConfigManager, mapper: KeyMapper) -> Self {
        let loader = LangFileLoader::new(config.root(), config.get_settings().concurrency_limit());
        Self { config: Arc::new(config), mapper: Arc::new(mapper), loader }
    }

    /// Builds a pipeline whose key mapper uses the configured mapping file and prefix rules.
    ///
    /// # Errors
    /// Returns error if the mapping file cannot be read or parsed.
    pub fn from_config(config: ConfigManager) -> Result<Self, PipelineError> {
        let settings = config.get_settings();
        let direct = DirectMappingTable::load(&config.resolve(&settings.mapping_file))?;
        let mapper = KeyMapper::new(direct, settings.prefix_rules.clone());
        Ok(Self::new(config, mapper))
    }

    #[must_use]
    pub fn config(&self) -> &ConfigManager {
        &self.config
    }

    /// Resolves release names to their settings; an empty list selects all.
    ///
    /// # Errors
    /// Returns error for a name not in the settings.
    pub fn select(&self, versions: &[String]) -> Result<Vec<&EpochConfig>, PipelineError> {
        let settings = self.config.get_settings();
        if versions.is_empty() {
            return Ok(settings.versions.iter().collect());
        }
        versions
            .iter()
            .map(|version| {
                settings.epoch(version).ok_or_else(|| PipelineError::UnknownVersion(version.clone()))
            })
            .collect()
    }

    /// Reconciles the selected releases concurrently; reports follow settings order.
    ///
    /// # Errors
    /// Returns the first release that failed to write its outputs.
    pub async fn run(&self, versions: &[String]) -> Result<Vec<VersionReport>, PipelineError> {
        let epochs = self.select(versions)?;
        tracing::info!(
            releases = epochs.len(),
            direct_mappings = self.mapper.direct_mappings().len(),
            prefix_rules = self.mapper.prefix_rules().len(),
            "Starting reconciliation"
        );

        let futures: Vec<_> = epochs.into_iter().map(|epoch| self.process_version(epoch)).collect();
        futures::future::join_all(futures).await.into_iter().collect()
    }

    /// Reconciles every variant of one release against the latest release.
    ///
    /// # Errors
    /// Returns error if an output file cannot be written.
    pub async fn process_version(&self, epoch: &EpochConfig) -> Result<VersionReport, PipelineError> {
        let start = Instant::now();
        let settings = self.config.get_settings();
        let version_data_dir = settings.data_dir.join(&epoch.version);
        let version_output_dir = self.config.resolve(&settings.output_dir).join(&epoch.version);

        tracing::info!(version = %epoch.version, format = ?epoch.format, "Processing release");

        let new_source_path = self.latest_file(&settings.latest_source);
        let old_source_path = version_data_dir.join(epoch.file_name(&epoch.source));
        let (new_source, old_source) = tokio::join!(
            self.loader.load_file(&new_source_path),
            self.loader.load_file(&old_source_path),
        );

        let correspondence =
            self.mapper.reconcile_keys(&new_source, &old_source, epoch.format.convention());

        let latest_targets: Vec<PathBuf> = epoch
            .all_variants()
            .map(|(variant, _)| self.latest_file(&variant.to_lowercase()))
            .collect();
        let new_targets = self.loader.load_files(&latest_targets).await;

        let mut variants = Vec::new();
        for ((variant, extra), new_target) in epoch.all_variants().zip(new_targets) {
            let old_target_path = version_data_dir.join(epoch.file_name(variant));
            let old_target = if !extra && self.config.resolve(&old_target_path).exists() {
                self.loader.load_file(&old_target_path).await
            } else {
                LanguageData::new()
            };

            let classification =
                classify(&new_source, &old_source, &new_target, &old_target, &correspondence);

            let report_name = format!("{variant}.json");
            save_report(
                &version_output_dir.join("manually_check").join(&report_name),
                &classification.manual_check,
            )
            .await?;
            save_report(&version_output_dir.join("summary").join(&report_name), &classification.summary)
                .await?;
            save_language_file(
                &classification.result,
                &version_output_dir.join(epoch.file_name(variant)),
                epoch.format,
            )
            .await?;

            tracing::debug!(
                version = %epoch.version,
                variant,
                extra,
                updated = classification.result.len(),
                summary = classification.summary.len(),
                manual_check = classification.manual_check.len(),
                "Variant reconciled"
            );
            variants.push(VariantReport {
                variant: variant.to_string(),
                extra,
                updated: classification.result.len(),
                summary: classification.summary.len(),
                manual_check: classification.manual_check.len(),
                conflicts: classification.conflicts.len(),
            });
        }

        Ok(VersionReport { version: epoch.version.clone(), elapsed: start.elapsed(), variants })
    }

    /// Archives the reconciled output of the selected releases.
    ///
    /// # Errors
    /// Returns error for an unknown release or a failed archive.
    pub async fn pack(&self, versions: &[String]) -> Result<Vec<PathBuf>, PipelineError> {
        let layouts = self
            .select(versions)?
            .into_iter()
            .map(|epoch| PackLayout::for_epoch(&self.config, epoch))
            .collect();
        Ok(build_packs(layouts).await?)
    }

    /// `<latestLangDir>/<stem>.json`
    fn latest_file(&self, stem: &str) -> PathBuf {
        self.config.get_settings().latest_lang_dir.join(format!("{stem}.json"))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use std::fs;

    use googletest::prelude::*;
    use rstest::rstest;
    use tempfile::TempDir;

    use super::*;
    use crate::test_utils::{
        create_project as project,
        write_file as write,
    };

    #[rstest]
    fn select_rejects_unknown_version() {
        let (_dir, config) = project("{}");
        let pipeline = Pipeline::from_config(config).unwrap();

        let result = pipeline.select(&["0.0.1".to_string()]);

        assert!(matches!(result, Err(PipelineError::UnknownVersion(v)) if v == "0.0.1"));
    }

    #[rstest]
    fn select_empty_means_all_in_settings_order() {
        let (_dir, config) = project("{}");
        let pipeline = Pipeline::from_config(config).unwrap();

        let selected: Vec<&str> =
            pipeline.select(&[]).unwrap().iter().map(|epoch| epoch.version.as_str()).collect();

        assert_that!(selected, len(eq(13)));
        assert_eq!(selected[0], "1.7.10");
        assert_eq!(selected[12], "1.19.2");
    }

    #[rstest]
    fn from_config_requires_mapping_file() {
        let dir = TempDir::new().unwrap();
        let config = ConfigManager::new(dir.path());

        let result = Pipeline::from_config(config);

        assert!(matches!(result, Err(PipelineError::Input(_))));
    }

    #[tokio::test]
    async fn process_modern_release_writes_outputs() {
        let (dir, config) = project(
            r#"{"versions": [{"version": "1.16.5", "format": "json", "source": "en_us",
                "variants": ["zh_cn"], "extraVariants": ["lzh"]}]}"#,
        );
        let root = dir.path();
        write(root, "mc_lang/full/en_us.json", r#"{"a": "Hello", "b": "Hello there", "c": "Bye"}"#);
        write(root, "mc_lang/full/zh_cn.json", r#"{"a": "你好", "b": "你好呀", "c": "再见"}"#);
        write(root, "mc_lang/full/lzh.json", r#"{"a": "安", "c": "別"}"#);
        write(root, "data/1.16.5/en_us.json", r#"{"a": "Hello", "b": "Hello", "c": "Bye"}"#);
        write(root, "data/1.16.5/zh_cn.json", r#"{"a": "您好", "b": "您好", "c": "再见"}"#);
        let pipeline = Pipeline::from_config(config).unwrap();
        let epoch = pipeline.config().get_settings().versions[0].clone();

        let report = pipeline.process_version(&epoch).await.unwrap();

        let zh_cn = report.variant("zh_cn").unwrap();
        assert_that!(zh_cn.updated, eq(2));
        assert_that!(zh_cn.summary, eq(1));
        assert_that!(zh_cn.manual_check, eq(1));
        let lzh = report.variant("lzh").unwrap();
        assert!(lzh.extra);
        assert_that!(lzh.updated, eq(2));

        let out = root.join("output/1.16.5");
        assert_eq!(
            fs::read_to_string(out.join("zh_cn.json")).unwrap(),
            "{\n  \"a\": \"你好\",\n  \"b\": \"你好呀\"\n}"
        );
        assert!(out.join("summary/zh_cn.json").exists());
        assert!(out.join("manually_check/zh_cn.json").exists());
        assert!(!out.join("summary/lzh.json").exists());
        assert!(out.join("lzh.json").exists());
    }

    #[tokio::test]
    async fn process_legacy_release_uses_prefix_rules() {
        let (dir, config) = project(
            r#"{"versions": [{"version": "1.12.2", "format": "lang", "source": "en_us",
                "variants": ["zh_cn"]}]}"#,
        );
        let root = dir.path();
        write(root, "mc_lang/full/en_us.json", r#"{"block.minecraft.stone": "Stone"}"#);
        write(root, "mc_lang/full/zh_cn.json", r#"{"block.minecraft.stone": "石头"}"#);
        write(root, "data/1.12.2/en_us.lang", "tile.stone.name=Stone\n");
        write(root, "data/1.12.2/zh_cn.lang", "tile.stone.name=石\n");
        let pipeline = Pipeline::from_config(config).unwrap();

        let reports = pipeline.run(&[]).await.unwrap();

        assert_that!(reports, len(eq(1)));
        assert_eq!(
            fs::read_to_string(root.join("output/1.12.2/zh_cn.lang")).unwrap(),
            "tile.stone.name=石头\n"
        );
    }

    #[tokio::test]
    async fn regular_variant_without_old_file_is_carried_forward() {
        let (dir, config) = project(
            r#"{"versions": [{"version": "1.16.5", "format": "json", "source": "en_us",
                "variants": ["zh_hk"]}]}"#,
        );
        let root = dir.path();
        write(root, "mc_lang/full/en_us.json", r#"{"a": "Hello"}"#);
        write(root, "mc_lang/full/zh_hk.json", r#"{"a": "你好"}"#);
        write(root, "data/1.16.5/en_us.json", r#"{"a": "Hello"}"#);
        let pipeline = Pipeline::from_config(config).unwrap();

        let reports = pipeline.run(&["1.16.5".to_string()]).await.unwrap();

        let zh_hk = reports[0].variant("zh_hk").unwrap();
        assert_that!(zh_hk.updated, eq(1));
        assert_that!(zh_hk.summary, eq(0));
    }

    #[tokio::test]
    async fn missing_sources_produce_empty_outputs() {
        let (dir, config) = project(
            r#"{"versions": [{"version": "1.16.5", "format": "json", "source": "en_us",
                "variants": ["zh_cn"]}]}"#,
        );
        let pipeline = Pipeline::from_config(config).unwrap();

        let reports = pipeline.run(&[]).await.unwrap();

        assert_that!(reports[0].variants[0].updated, eq(0));
        assert_eq!(fs::read_to_string(dir.path().join("output/1.16.5/zh_cn.json")).unwrap(), "{}");
    }
}
