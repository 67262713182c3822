//! Configuration file loading and discovery.
//!
//! Supports loading configuration from YAML files with automatic discovery.

use super::types::AppConfig;
use crate::reports::ReportFormat;
use std::path::{Path, PathBuf};
use thiserror::Error;

// ============================================================================
// Configuration File Discovery
// ============================================================================

/// Standard config file names to search for.
const CONFIG_FILE_NAMES: &[&str] = &[
    ".openapi-delta.yaml",
    ".openapi-delta.yml",
    "openapi-delta.yaml",
    "openapi-delta.yml",
];

/// Directory name under the user config directory.
const CONFIG_DIR_NAME: &str = "openapi-delta";

/// Discover a config file by searching standard locations.
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Current directory
/// 3. Git repository root (if in a repo)
/// 4. User config directory (~/.config/openapi-delta/)
/// 5. Home directory
#[must_use]
pub fn discover_config_file(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        if path.exists() {
            return Some(path.to_path_buf());
        }
    }

    let cwd = std::env::current_dir().ok();
    if let Some(path) = cwd.as_deref().and_then(find_config_in_dir) {
        return Some(path);
    }

    if let Some(path) = cwd
        .as_deref()
        .and_then(find_git_root)
        .and_then(|root| find_config_in_dir(&root))
    {
        return Some(path);
    }

    if let Some(path) =
        dirs::config_dir().and_then(|dir| find_config_in_dir(&dir.join(CONFIG_DIR_NAME)))
    {
        return Some(path);
    }

    dirs::home_dir().and_then(|home| find_config_in_dir(&home))
}

/// Find a config file in a specific directory.
fn find_config_in_dir(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILE_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.exists())
}

/// Find the git repository root by walking up from `start`.
fn find_git_root(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| dir.join(".git").exists())
        .map(Path::to_path_buf)
}

/// Default location for `config init`.
#[must_use]
pub fn default_config_path() -> PathBuf {
    PathBuf::from(CONFIG_FILE_NAMES[0])
}

// ============================================================================
// Configuration File Loading
// ============================================================================

/// Error type for config file operations.
#[derive(Debug, Error)]
pub enum ConfigFileError {
    /// File not found
    #[error("Config file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// IO error reading file
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    /// YAML parsing error
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] serde_yaml::Error),
}

/// Load an `AppConfig` from a YAML file.
pub fn load_config_file(path: &Path) -> Result<AppConfig, ConfigFileError> {
    if !path.exists() {
        return Err(ConfigFileError::NotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)?;
    if content.trim().is_empty() {
        return Ok(AppConfig::default());
    }
    let config: AppConfig = serde_yaml::from_str(&content)?;
    Ok(config)
}

/// Load config from discovered file, or return default.
#[must_use]
pub fn load_or_default(explicit_path: Option<&Path>) -> (AppConfig, Option<PathBuf>) {
    discover_config_file(explicit_path).map_or_else(
        || (AppConfig::default(), None),
        |path| match load_config_file(&path) {
            Ok(config) => {
                tracing::debug!("Loaded config from {}", path.display());
                (config, Some(path))
            }
            Err(e) => {
                tracing::warn!("Failed to load config from {}: {}", path.display(), e);
                (AppConfig::default(), None)
            }
        },
    )
}

// ============================================================================
// Configuration Merging
// ============================================================================

impl AppConfig {
    /// Merge another config into this one, with `other` taking precedence.
    ///
    /// Flags only ever switch on; options override when set.
    pub fn merge(&mut self, other: &Self) {
        // Diff settings
        if other.diff.breaking_only {
            self.diff.breaking_only = true;
        }
        if other.diff.exclude_description {
            self.diff.exclude_description = true;
        }
        if other.diff.include_examples {
            self.diff.include_examples = true;
        }
        if other.diff.prefix.is_some() {
            self.diff.prefix.clone_from(&other.diff.prefix);
        }
        if other.diff.filter.is_some() {
            self.diff.filter.clone_from(&other.diff.filter);
        }

        // Output config - only override if explicitly set
        if other.output.format != ReportFormat::default() {
            self.output.format = other.output.format;
        }
        if other.output.file.is_some() {
            self.output.file.clone_from(&other.output.file);
        }
        if other.output.title.is_some() {
            self.output.title.clone_from(&other.output.title);
        }
        if other.output.summary_only {
            self.output.summary_only = true;
        }
        if other.output.no_color {
            self.output.no_color = true;
        }

        // Behavior config
        if other.behavior.fail_on_diff {
            self.behavior.fail_on_diff = true;
        }
        if other.behavior.fail_on_breaking {
            self.behavior.fail_on_breaking = true;
        }
        if other.behavior.quiet {
            self.behavior.quiet = true;
        }
    }

    /// Load from file and merge with CLI overrides.
    #[must_use]
    pub fn from_file_with_overrides(
        config_path: Option<&Path>,
        cli_overrides: &Self,
    ) -> (Self, Option<PathBuf>) {
        let (mut config, loaded_from) = load_or_default(config_path);
        config.merge(cli_overrides);
        (config, loaded_from)
    }
}

// ============================================================================
// Example Config Generation
// ============================================================================

/// Generate a commented example config with all options.
#[must_use]
pub fn generate_example_config() -> String {
    r"# openapi-delta configuration
#
# Place this file at .openapi-delta.yaml in your project root or at
# ~/.config/openapi-delta/openapi-delta.yaml for a user-wide default.
# CLI arguments always override file settings.

diff:
  # Only report changes that break existing clients
  breaking_only: false
  # Ignore description fields
  exclude_description: false
  # Compare example and examples fields
  include_examples: false
  # Prefix stripped from base paths, e.g. when the revision drops /api/v1
  # prefix: /api/v1
  # Only compare paths matching this regular expression
  # filter: ^/pets

output:
  # Format: yaml, json, html, summary
  format: yaml
  # Output file path (omit for stdout)
  # file: openapi-diff.yaml
  # Report title for html and summary output
  # title: Pet Store API changes
  summary_only: false
  no_color: false

behavior:
  # Exit with code 1 if any change is found
  fail_on_diff: false
  # Exit with code 2 if a breaking change is found
  fail_on_breaking: false
  quiet: false
"
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    #[test]
    fn test_load_config_file() {
        let mut file = NamedTempFile::new().expect("temp file");
        writeln!(
            file,
            "diff:\n  filter: ^/pets\noutput:\n  format: json\nbehavior:\n  fail_on_breaking: true"
        )
        .expect("write");

        let config = load_config_file(file.path()).expect("load");
        assert_eq!(config.diff.filter.as_deref(), Some("^/pets"));
        assert_eq!(config.output.format, ReportFormat::Json);
        assert!(config.behavior.fail_on_breaking);
    }

    #[test]
    fn test_missing_file() {
        let err = load_config_file(Path::new("/no/such/config.yaml")).unwrap_err();
        assert!(matches!(err, ConfigFileError::NotFound(_)));
    }

    #[test]
    fn test_invalid_yaml() {
        let mut file = NamedTempFile::new().expect("temp file");
        writeln!(file, "diff: [unclosed").expect("write");
        assert!(matches!(
            load_config_file(file.path()),
            Err(ConfigFileError::Parse(_))
        ));
    }

    #[test]
    fn test_find_config_in_dir() {
        let dir = TempDir::new().expect("temp dir");
        assert!(find_config_in_dir(dir.path()).is_none());
        std::fs::write(dir.path().join("openapi-delta.yml"), "{}").expect("write");
        assert_eq!(
            find_config_in_dir(dir.path()),
            Some(dir.path().join("openapi-delta.yml"))
        );
    }

    #[test]
    fn test_find_git_root() {
        let dir = TempDir::new().expect("temp dir");
        let nested = dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).expect("mkdir");
        std::fs::create_dir(dir.path().join(".git")).expect("mkdir");
        assert_eq!(find_git_root(&nested), Some(dir.path().to_path_buf()));
    }

    #[test]
    fn test_merge_cli_over_file() {
        let mut file_config = AppConfig::builder()
            .filter(Some("^/pets".to_string()))
            .output_format(ReportFormat::Html)
            .build();
        let cli = AppConfig::builder()
            .filter(Some("^/owners".to_string()))
            .breaking_only(true)
            .build();
        file_config.merge(&cli);

        assert_eq!(file_config.diff.filter.as_deref(), Some("^/owners"));
        assert!(file_config.diff.breaking_only);
        assert_eq!(file_config.output.format, ReportFormat::Html);
    }

    #[test]
    fn test_example_config_parses() {
        let config: AppConfig =
            serde_yaml::from_str(&generate_example_config()).expect("example parses");
        assert_eq!(config, AppConfig::default());
    }
}
