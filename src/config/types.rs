//! Configuration types for openapi-delta operations.

use crate::diff::DiffOptions;
use crate::error::Result;
use crate::reports::{ReportConfig, ReportFormat, ReportMetadata};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// ============================================================================
// Unified Application Configuration
// ============================================================================

/// Unified application configuration that can be loaded from CLI args or config files.
///
/// CLI arguments are layered over the file with [`AppConfig::merge`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppConfig {
    /// Comparison settings
    pub diff: DiffSettings,
    /// Output configuration (format, file, colors)
    pub output: OutputConfig,
    /// Behavior flags
    pub behavior: BehaviorConfig,
}

impl AppConfig {
    /// Create a new `AppConfig` with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an `AppConfig` builder.
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }

    /// Engine options for these settings. Fails on an invalid filter pattern.
    pub fn to_diff_options(&self) -> Result<DiffOptions> {
        self.diff.to_diff_options()
    }
}

// ============================================================================
// Builder for AppConfig
// ============================================================================

/// Builder for constructing `AppConfig` with fluent API.
#[derive(Debug, Default)]
#[must_use]
pub struct AppConfigBuilder {
    config: AppConfig,
}

impl AppConfigBuilder {
    /// Keep only breaking changes.
    pub const fn breaking_only(mut self, enabled: bool) -> Self {
        self.config.diff.breaking_only = enabled;
        self
    }

    /// Ignore description fields.
    pub const fn exclude_description(mut self, enabled: bool) -> Self {
        self.config.diff.exclude_description = enabled;
        self
    }

    /// Compare examples.
    pub const fn include_examples(mut self, enabled: bool) -> Self {
        self.config.diff.include_examples = enabled;
        self
    }

    /// Set the base path prefix.
    pub fn prefix(mut self, prefix: Option<String>) -> Self {
        self.config.diff.prefix = prefix;
        self
    }

    /// Set the path filter pattern.
    pub fn filter(mut self, filter: Option<String>) -> Self {
        self.config.diff.filter = filter;
        self
    }

    /// Set the output format.
    pub const fn output_format(mut self, format: ReportFormat) -> Self {
        self.config.output.format = format;
        self
    }

    /// Set the output file.
    pub fn output_file(mut self, file: Option<PathBuf>) -> Self {
        self.config.output.file = file;
        self
    }

    /// Disable colored output.
    pub const fn no_color(mut self, no_color: bool) -> Self {
        self.config.output.no_color = no_color;
        self
    }

    /// Only emit the summary.
    pub const fn summary_only(mut self, summary_only: bool) -> Self {
        self.config.output.summary_only = summary_only;
        self
    }

    /// Exit with code 1 if any change is found.
    pub const fn fail_on_diff(mut self, fail: bool) -> Self {
        self.config.behavior.fail_on_diff = fail;
        self
    }

    /// Exit with code 2 if a breaking change is found.
    pub const fn fail_on_breaking(mut self, fail: bool) -> Self {
        self.config.behavior.fail_on_breaking = fail;
        self
    }

    /// Enable quiet mode.
    pub const fn quiet(mut self, quiet: bool) -> Self {
        self.config.behavior.quiet = quiet;
        self
    }

    /// Build the configuration.
    pub fn build(self) -> AppConfig {
        self.config
    }
}

// ============================================================================
// Operation Configuration
// ============================================================================

/// Configuration for a single diff run
#[derive(Debug, Clone)]
pub struct DiffConfig {
    /// Documents to compare
    pub paths: DiffPaths,
    /// Comparison settings
    pub diff: DiffSettings,
    /// Output configuration
    pub output: OutputConfig,
    /// Behavior flags
    pub behavior: BehaviorConfig,
}

impl DiffConfig {
    /// Bind an application configuration to a pair of documents.
    #[must_use]
    pub fn new(paths: DiffPaths, config: AppConfig) -> Self {
        Self {
            paths,
            diff: config.diff,
            output: config.output,
            behavior: config.behavior,
        }
    }

    /// Report settings for this run.
    #[must_use]
    pub fn report_config(&self) -> ReportConfig {
        ReportConfig {
            title: self.output.title.clone(),
            summary_only: self.output.summary_only,
            metadata: ReportMetadata {
                base_source: Some(self.paths.base.clone()),
                revision_source: Some(self.paths.revision.clone()),
            },
        }
    }
}

/// Sources of the compared documents: file paths or URLs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffPaths {
    /// Base (original) document
    pub base: String,
    /// Revision (modified) document
    pub revision: String,
}

// ============================================================================
// Sub-configuration Types
// ============================================================================

/// Comparison settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct DiffSettings {
    /// Only report changes that break existing clients
    pub breaking_only: bool,
    /// Ignore `description` fields
    pub exclude_description: bool,
    /// Compare `example` and `examples` fields
    pub include_examples: bool,
    /// Prefix stripped from base document paths before matching
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    /// Regular expression selecting the paths to compare
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
}

impl DiffSettings {
    /// Engine options for these settings.
    pub fn to_diff_options(&self) -> Result<DiffOptions> {
        let mut options = DiffOptions::new()
            .breaking_only(self.breaking_only)
            .exclude_description(self.exclude_description)
            .include_examples(self.include_examples);
        if let Some(prefix) = &self.prefix {
            options = options.path_prefix(prefix.as_str());
        }
        if let Some(filter) = &self.filter {
            options = options.path_filter(filter)?;
        }
        Ok(options)
    }
}

/// Output-related configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct OutputConfig {
    /// Output format
    pub format: ReportFormat,
    /// Output file path (None for stdout)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
    /// Report title
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Emit only the summary
    pub summary_only: bool,
    /// Disable colored output
    pub no_color: bool,
}

/// Behavior flags for diff operations
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct BehaviorConfig {
    /// Exit with code 1 if any change is found
    pub fail_on_diff: bool,
    /// Exit with code 2 if a breaking change is found
    pub fail_on_breaking: bool,
    /// Suppress non-essential output
    pub quiet: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let config = AppConfig::builder()
            .breaking_only(true)
            .prefix(Some("/api".to_string()))
            .output_format(ReportFormat::Json)
            .fail_on_breaking(true)
            .build();
        assert!(config.diff.breaking_only);
        assert_eq!(config.output.format, ReportFormat::Json);
        assert!(config.behavior.fail_on_breaking);
        assert!(!config.behavior.fail_on_diff);
    }

    #[test]
    fn test_to_diff_options() {
        let config = AppConfig::builder()
            .exclude_description(true)
            .prefix(Some("/api/v1".to_string()))
            .filter(Some("^/pets".to_string()))
            .build();
        let options = config.to_diff_options().expect("valid");
        assert!(options.exclude_description);
        assert_eq!(options.normalize_base_path("/api/v1/pets"), "/pets");
        assert!(options.includes_path("/pets"));
        assert!(!options.includes_path("/owners"));

        let bad = AppConfig::builder().filter(Some("[".to_string())).build();
        assert!(bad.to_diff_options().is_err());
    }

    #[test]
    fn test_report_config() {
        let run = DiffConfig::new(
            DiffPaths {
                base: "v1.yaml".to_string(),
                revision: "v2.yaml".to_string(),
            },
            AppConfig::builder().summary_only(true).build(),
        );
        let report = run.report_config();
        assert!(report.summary_only);
        assert_eq!(report.metadata.revision_source.as_deref(), Some("v2.yaml"));
    }

    #[test]
    fn test_deserialize_partial() {
        let config: AppConfig =
            serde_yaml::from_str("diff:\n  breaking_only: true\noutput:\n  format: summary\n")
                .expect("parse");
        assert!(config.diff.breaking_only);
        assert_eq!(config.output.format, ReportFormat::Summary);
        assert_eq!(config.behavior, BehaviorConfig::default());
    }
}
