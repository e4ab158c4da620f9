use std::collections::HashSet;
use std::path::{
    Path,
    PathBuf,
};

use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

use crate::reconcile::{
    KeyConvention,
    PrefixRule,
    default_prefix_rules,
};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Configuration error in '{field_path}': {message}")]
pub struct ValidationError {
    /// JSON path to the field (e.g., "versions[2].variants")
    pub field_path: String,
    pub message: String,
}

impl ValidationError {
    #[must_use]
    pub fn new(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field_path: field_path.into(), message: message.into() }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration validation failed:\n{}", format_validation_errors(.0))]
    ValidationErrors(Vec<ValidationError>),

    #[error("Failed to load configuration file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),
}

fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .enumerate()
        .map(|(i, err)| format!("  {}. {} - {}", i + 1, err.field_path, err.message))
        .collect::<Vec<_>>()
        .join("\n")
}

/// On-disk format of a release's language files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LangFormat {
    /// Line-oriented `key=value`.
    Lang,
    /// Flat JSON object.
    Json,
}

impl LangFormat {
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Lang => "lang",
            Self::Json => "json",
        }
    }

    /// Infers the format from a file extension.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("lang") => Some(Self::Lang),
            Some("json") => Some(Self::Json),
            _ => None,
        }
    }

    /// `.lang` releases predate the namespaced key scheme.
    #[must_use]
    pub const fn convention(self) -> KeyConvention {
        match self {
            Self::Lang => KeyConvention::Legacy,
            Self::Json => KeyConvention::Modern,
        }
    }
}

/// One historical release to reconcile against.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EpochConfig {
    pub version: String,
    pub format: LangFormat,
    /// Source-language file stem (`en_US` before 1.11, `en_us` after).
    pub source: String,
    /// Variants that already existed in this release.
    pub variants: Vec<String>,
    /// Variants added later; always carried forward without diffing.
    #[serde(default)]
    pub extra_variants: Vec<String>,
}

impl EpochConfig {
    /// `{stem}.{lang|json}`
    #[must_use]
    pub fn file_name(&self, stem: &str) -> String {
        format!("{stem}.{}", self.format.extension())
    }

    /// All variants with an `is_extra` flag, regular ones first.
    pub fn all_variants(&self) -> impl Iterator<Item = (&str, bool)> {
        self.variants
            .iter()
            .map(|v| (v.as_str(), false))
            .chain(self.extra_variants.iter().map(|v| (v.as_str(), true)))
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Per-release inputs live in `<dataDir>/<version>/`.
    pub data_dir: PathBuf,
    pub output_dir: PathBuf,

    /// Directory holding the latest release's JSON files.
    pub latest_lang_dir: PathBuf,
    pub latest_source: String,

    /// Legacy key -> modern key(s) overrides.
    pub mapping_file: PathBuf,

    pub pack_icon: PathBuf,
    pub pack_name: String,
    /// Path of the language files inside the archive.
    pub lang_asset_dir: String,

    /// Max files read at once.
    /// Default: 80% of CPU cores (minimum 1).
    pub concurrency: Option<usize>,

    pub prefix_rules: Vec<PrefixRule>,

    /// Releases in processing and reporting order.
    pub versions: Vec<EpochConfig>,
}

impl Settings {
    #[must_use]
    pub fn epoch(&self, version: &str) -> Option<&EpochConfig> {
        self.versions.iter().find(|epoch| epoch.version == version)
    }

    #[must_use]
    pub fn concurrency_limit(&self) -> usize {
        self.concurrency.unwrap_or_else(|| (num_cpus::get() * 4 / 5).max(1))
    }

    /// # Errors
    /// - Required field is empty
    /// - Release declared twice, or without variants
    /// - Variant listed twice within a release
    /// - Empty prefix in a prefix rule
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        let required_paths = [
            ("dataDir", &self.data_dir),
            ("outputDir", &self.output_dir),
            ("latestLangDir", &self.latest_lang_dir),
            ("mappingFile", &self.mapping_file),
            ("packIcon", &self.pack_icon),
        ];
        for (field, path) in required_paths {
            if path.as_os_str().is_empty() {
                errors.push(ValidationError::new(field, "The path cannot be empty"));
            }
        }

        if self.latest_source.is_empty() {
            errors.push(ValidationError::new(
                "latestSource",
                "The source file name cannot be empty. Example: \"en_us\"",
            ));
        }

        if self.pack_name.is_empty() {
            errors.push(ValidationError::new("packName", "The archive name cannot be empty"));
        }

        if self.concurrency == Some(0) {
            errors.push(ValidationError::new(
                "concurrency",
                "Must be at least 1, or removed to use the CPU-based default",
            ));
        }

        for (index, rule) in self.prefix_rules.iter().enumerate() {
            if rule.modern.is_empty() {
                errors.push(ValidationError::new(
                    format!("prefixRules[{index}].modern"),
                    "The prefix cannot be empty",
                ));
            }
            if rule.legacy.is_empty() || rule.legacy.iter().any(String::is_empty) {
                errors.push(ValidationError::new(
                    format!("prefixRules[{index}].legacy"),
                    "At least one non-empty legacy prefix is required",
                ));
            }
        }

        if self.versions.is_empty() {
            errors.push(ValidationError::new(
                "versions",
                "At least one release is required. Example: [{\"version\": \"1.12.2\", \"format\": \"lang\", ...}]",
            ));
        }

        let mut seen_versions = HashSet::new();
        for (index, epoch) in self.versions.iter().enumerate() {
            validate_epoch(index, epoch, &mut errors);
            if !seen_versions.insert(epoch.version.as_str()) {
                errors.push(ValidationError::new(
                    format!("versions[{index}].version"),
                    format!("Release '{}' is declared more than once", epoch.version),
                ));
            }
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

fn validate_epoch(index: usize, epoch: &EpochConfig, errors: &mut Vec<ValidationError>) {
    if epoch.version.is_empty() {
        errors.push(ValidationError::new(
            format!("versions[{index}].version"),
            "The version cannot be empty",
        ));
    }

    if epoch.source.is_empty() {
        errors.push(ValidationError::new(
            format!("versions[{index}].source"),
            "The source file name cannot be empty",
        ));
    }

    if epoch.variants.is_empty() {
        errors.push(ValidationError::new(
            format!("versions[{index}].variants"),
            format!("Release '{}' declares no variants", epoch.version),
        ));
    }

    let mut seen = HashSet::new();
    for (variant, _) in epoch.all_variants() {
        if variant.is_empty() {
            errors.push(ValidationError::new(
                format!("versions[{index}].variants"),
                "Variant names cannot be empty",
            ));
        } else if !seen.insert(variant) {
            errors.push(ValidationError::new(
                format!("versions[{index}].variants"),
                format!("Variant '{variant}' is listed more than once"),
            ));
        }
    }
}

fn epoch(
    version: &str,
    format: LangFormat,
    source: &str,
    variants: &[&str],
    extra_variants: &[&str],
) -> EpochConfig {
    EpochConfig {
        version: version.to_string(),
        format,
        source: source.to_string(),
        variants: variants.iter().map(ToString::to_string).collect(),
        extra_variants: extra_variants.iter().map(ToString::to_string).collect(),
    }
}

/// Minecraft Java releases with Chinese translations.
fn default_versions() -> Vec<EpochConfig> {
    use LangFormat::{
        Json,
        Lang,
    };

    let mut versions = Vec::new();
    for version in ["1.7.10", "1.8.9", "1.9.4", "1.10.2"] {
        versions.push(epoch(version, Lang, "en_US", &["zh_CN", "zh_TW"], &["zh_HK", "lzh"]));
    }
    for version in ["1.11.2", "1.12.2"] {
        versions.push(epoch(version, Lang, "en_us", &["zh_cn", "zh_tw"], &["zh_hk", "lzh"]));
    }
    for version in ["1.13.2", "1.14.4"] {
        versions.push(epoch(version, Json, "en_us", &["zh_cn", "zh_tw"], &["zh_hk", "lzh"]));
    }
    for version in ["1.15.2", "1.16.5", "1.17.1", "1.18.2", "1.19.2"] {
        versions.push(epoch(version, Json, "en_us", &["zh_cn", "zh_hk", "zh_tw", "lzh"], &[]));
    }
    versions
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            output_dir: PathBuf::from("output"),
            latest_lang_dir: PathBuf::from("mc_lang/full"),
            latest_source: "en_us".to_string(),
            mapping_file: PathBuf::from("data/mapping.json"),
            pack_icon: PathBuf::from("pack.png"),
            pack_name: "translation_pack".to_string(),
            lang_asset_dir: "assets/minecraft/lang".to_string(),
            concurrency: None,
            prefix_rules: default_prefix_rules(),
            versions: default_versions(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing, clippy::expect_used, clippy::panic)]
mod tests {
    use googletest::prelude::*;
    use rstest::*;

    use super::*;

    #[rstest]
    #[case::lang("data/1.12.2/zh_cn.lang", Some(LangFormat::Lang))]
    #[case::json("mc_lang/full/en_us.json", Some(LangFormat::Json))]
    #[case::multiple_dots("data/1.7.10/en_US.old.lang", Some(LangFormat::Lang))]
    #[case::unknown_ext("pack.mcmeta", None)]
    #[case::no_ext("README", None)]
    fn test_from_path(#[case] path: &str, #[case] expected: Option<LangFormat>) {
        assert_eq!(LangFormat::from_path(Path::new(path)), expected);
    }

    #[rstest]
    fn validate_valid_settings() {
        let settings = Settings::default();

        assert_that!(settings.validate(), ok(anything()));
    }

    #[rstest]
    fn default_versions_switch_format_at_flattening() {
        let settings = Settings::default();

        assert_that!(settings.versions, len(eq(13)));
        assert_eq!(settings.epoch("1.12.2").unwrap().format, LangFormat::Lang);
        assert_eq!(settings.epoch("1.13.2").unwrap().format, LangFormat::Json);
        assert_eq!(settings.epoch("1.7.10").unwrap().source, "en_US");
        assert!(settings.epoch("1.15.2").unwrap().extra_variants.is_empty());
        assert_that!(settings.epoch("1.20.1"), none());
    }

    #[rstest]
    fn deserialize_partial_settings() {
        let json = r#"{"outputDir": "build", "concurrency": 2}"#;

        let settings: Settings = serde_json::from_str(json).unwrap();

        assert_eq!(settings.output_dir, PathBuf::from("build"));
        assert_that!(settings.concurrency_limit(), eq(2));
        assert_that!(settings.latest_source, eq("en_us"));
        assert_that!(settings.prefix_rules, len(eq(8)));
    }

    #[rstest]
    fn deserialize_versions_replaces_default_table() {
        let json = r#"{
            "versions": [
                {"version": "1.12.2", "format": "lang", "source": "en_us", "variants": ["zh_cn"]}
            ]
        }"#;

        let settings: Settings = serde_json::from_str(json).unwrap();

        assert_that!(settings.versions, len(eq(1)));
        let epoch = &settings.versions[0];
        assert_that!(epoch.format.convention(), eq(KeyConvention::Legacy));
        assert!(epoch.extra_variants.is_empty());
        assert_that!(epoch.file_name("zh_cn"), eq("zh_cn.lang"));
    }

    #[rstest]
    fn deserialize_unknown_format_fails() {
        let json = r#"{"versions": [{"version": "1.0", "format": "xml", "source": "en", "variants": ["fr"]}]}"#;

        let result: std::result::Result<Settings, _> = serde_json::from_str(json);

        assert!(result.is_err());
    }

    #[rstest]
    fn concurrency_default_is_at_least_one() {
        let settings = Settings::default();

        assert_that!(settings.concurrency_limit(), ge(1));
    }

    #[rstest]
    fn all_variants_flags_extras() {
        let settings = Settings::default();
        let epoch = settings.epoch("1.12.2").unwrap();

        let variants: Vec<(&str, bool)> = epoch.all_variants().collect();

        assert_eq!(
            variants,
            vec![("zh_cn", false), ("zh_tw", false), ("zh_hk", true), ("lzh", true)]
        );
    }

    #[rstest]
    fn validate_epoch_without_variants() {
        let mut settings = Settings::default();
        settings.versions = vec![epoch("1.12.2", LangFormat::Lang, "en_us", &[], &["lzh"])];

        let result = settings.validate();

        assert_that!(
            result,
            err(elements_are![all![
                field!(ValidationError.field_path, eq("versions[0].variants")),
                field!(ValidationError.message, contains_substring("declares no variants"))
            ]])
        );
    }

    #[rstest]
    fn validate_variant_both_regular_and_extra() {
        let mut settings = Settings::default();
        settings.versions =
            vec![epoch("1.12.2", LangFormat::Lang, "en_us", &["zh_cn"], &["zh_cn"])];

        let result = settings.validate();

        assert_that!(
            result,
            err(elements_are![all![
                field!(ValidationError.field_path, eq("versions[0].variants")),
                field!(ValidationError.message, contains_substring("'zh_cn'"))
            ]])
        );
    }

    #[rstest]
    fn validate_duplicate_version() {
        let mut settings = Settings::default();
        let duplicate = settings.versions[0].clone();
        settings.versions.push(duplicate);

        let result = settings.validate();

        assert_that!(
            result,
            err(elements_are![all![
                field!(ValidationError.field_path, eq("versions[13].version")),
                field!(ValidationError.message, contains_substring("more than once"))
            ]])
        );
    }

    #[rstest]
    fn validate_empty_prefix_rule() {
        let settings = Settings {
            prefix_rules: vec![PrefixRule::new("", Vec::<String>::new())],
            ..Settings::default()
        };

        let result = settings.validate();

        assert_that!(
            result,
            err(elements_are![
                field!(ValidationError.field_path, eq("prefixRules[0].modern")),
                field!(ValidationError.field_path, eq("prefixRules[0].legacy"))
            ])
        );
    }

    #[rstest]
    fn validate_zero_concurrency() {
        let settings = Settings { concurrency: Some(0), ..Settings::default() };

        let result = settings.validate();

        assert_that!(
            result,
            err(elements_are![field!(ValidationError.field_path, eq("concurrency"))])
        );
    }

    #[rstest]
    fn config_error_validation_errors_format() {
        let settings = Settings {
            latest_source: String::new(),
            versions: vec![],
            ..Settings::default()
        };

        let validation_result = settings.validate();
        let errors = validation_result.unwrap_err();
        let config_error = ConfigError::ValidationErrors(errors);

        let error_message = format!("{config_error}");
        assert_that!(error_message, contains_substring("Configuration validation failed"));
        assert_that!(error_message, contains_substring("1. latestSource"));
        assert_that!(error_message, contains_substring("2. versions"));
        assert_that!(error_message, contains_substring("At least one release"));
    }
}
