//! Configuration validation for openapi-delta.

use super::types::{AppConfig, BehaviorConfig, DiffConfig, DiffSettings, OutputConfig};
use crate::reports::ReportFormat;

// ============================================================================
// Configuration Error
// ============================================================================

/// Error type for configuration validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{field}: {message}")]
pub struct ConfigError {
    /// The field that failed validation
    pub field: String,
    /// Description of the validation error
    pub message: String,
}

impl ConfigError {
    fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

// ============================================================================
// Validation Trait
// ============================================================================

/// Trait for validatable configuration types.
pub trait Validatable {
    /// Validate the configuration, returning any errors found.
    fn validate(&self) -> Vec<ConfigError>;

    /// Check if the configuration is valid.
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

// ============================================================================
// Validation Implementations
// ============================================================================

impl Validatable for AppConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        errors.extend(self.diff.validate());
        errors.extend(self.output.validate());
        errors.extend(self.behavior.validate());
        errors
    }
}

impl Validatable for DiffSettings {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if let Some(filter) = &self.filter {
            if let Err(e) = regex::Regex::new(filter) {
                errors.push(ConfigError::new(
                    "diff.filter",
                    format!("Invalid regular expression '{filter}': {e}"),
                ));
            }
        }

        if let Some(prefix) = &self.prefix {
            if !prefix.is_empty() && !prefix.starts_with('/') {
                errors.push(ConfigError::new(
                    "diff.prefix",
                    format!("Prefix must start with '/', got '{prefix}'"),
                ));
            }
        }

        errors
    }
}

impl Validatable for OutputConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if let Some(parent) = self.file.as_deref().and_then(std::path::Path::parent) {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                errors.push(ConfigError::new(
                    "output.file",
                    format!("Parent directory does not exist: {}", parent.display()),
                ));
            }
        }

        if self.summary_only && self.format == ReportFormat::Summary {
            errors.push(ConfigError::new(
                "output.summary_only",
                "The summary format is already a summary; drop summary_only",
            ));
        }

        errors
    }
}

impl Validatable for BehaviorConfig {
    fn validate(&self) -> Vec<ConfigError> {
        Vec::new()
    }
}

impl Validatable for DiffConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        if self.paths.base.trim().is_empty() {
            errors.push(ConfigError::new("paths.base", "Base document is required"));
        }
        if self.paths.revision.trim().is_empty() {
            errors.push(ConfigError::new(
                "paths.revision",
                "Revision document is required",
            ));
        }
        errors.extend(self.diff.validate());
        errors.extend(self.output.validate());
        errors
    }
}
