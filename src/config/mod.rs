//! Configuration module for openapi-delta.
//!
//! This module provides a unified configuration system with:
//! - Type-safe configuration structures
//! - Validation for all configuration values
//! - YAML config file loading and discovery
//! - CLI argument merging
//!
//! # Quick Start
//!
//! ```rust
//! use openapi_delta::config::{AppConfig, Validatable};
//!
//! let config = AppConfig::builder()
//!     .breaking_only(true)
//!     .filter(Some("^/pets".to_string()))
//!     .build();
//! assert!(config.is_valid());
//! ```
//!
//! # Configuration File
//!
//! Place a `.openapi-delta.yaml` file in your project root or
//! `~/.config/openapi-delta/`:
//!
//! ```yaml
//! diff:
//!   breaking_only: true
//!   prefix: /api/v1
//! behavior:
//!   fail_on_breaking: true
//! ```

pub mod file;
mod types;
mod validation;

pub use types::{
    AppConfig, AppConfigBuilder, BehaviorConfig, DiffConfig, DiffPaths, DiffSettings,
    OutputConfig,
};
pub use validation::{ConfigError, Validatable};

pub use file::{
    default_config_path, discover_config_file, generate_example_config, load_config_file,
    load_or_default, ConfigFileError,
};

/// Generate a JSON Schema for the `AppConfig` configuration format.
///
/// This schema documents all configuration options that can be set in
/// `.openapi-delta.yaml` config files. It can be used by editors for
/// validation and autocompletion.
pub fn generate_json_schema() -> Result<String, serde_json::Error> {
    let schema = schemars::schema_for!(AppConfig);
    serde_json::to_string_pretty(&schema)
}
