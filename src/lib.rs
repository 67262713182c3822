//! **Structural diff and breaking-change detection for OpenAPI 3.x documents.**
//!
//! `openapi-delta` loads two OpenAPI documents (YAML or JSON, from disk or
//! over HTTP), compares them element by element and produces a typed delta
//! tree together with a per-category summary. The delta can be pruned to the
//! changes that break existing clients, taking into account whether a value
//! flows from client to server (request) or back (response).
//!
//! ## Core Concepts & Modules
//!
//! - **[`model`]**: The normalized document. Non-schema `$ref`s are resolved
//!   eagerly; schemas live in an arena so recursive schema graphs can be
//!   represented and compared by identity.
//! - **[`parsers`]**: Loading and normalization of raw documents.
//! - **[`diff`]**: The [`DiffEngine`], the per-element delta records and the
//!   breaking-change rules.
//! - **[`reports`]**: YAML, JSON, HTML and terminal summary output.
//! - **[`config`]**: File-based configuration with discovery and validation.
//! - **[`pipeline`]**: The load → diff → report stages used by the CLI.
//!
//! ## Getting Started
//!
//! ```no_run
//! use openapi_delta::{load_spec, DiffEngine, DiffOptions};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let base = load_spec("petstore-v1.yaml")?;
//!     let revision = load_spec("petstore-v2.yaml")?;
//!
//!     let engine = DiffEngine::new().with_options(DiffOptions::new().breaking_only(true));
//!     let result = engine.diff(&base, &revision)?;
//!
//!     for change in result.changed_operations() {
//!         println!("{} {:?} {}", change.kind.as_str(), change.method, change.path);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! - `remote` (default): load documents from `http(s)` URLs with `reqwest`.
//!
//! ## Command-Line Interface (CLI)
//!
//! The `openapi-delta` binary wraps this library; run
//! `openapi-delta diff --help` for its options.

// Lint to discourage unwrap() in production code - prefer explicit error handling
#![warn(clippy::unwrap_used)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::struct_excessive_bools,
    clippy::module_name_repetitions,
    // self is kept for API consistency across reporter impls
    clippy::unused_self
)]

pub mod cli;
pub mod config;
pub mod diff;
pub mod error;
pub mod model;
pub mod parsers;
pub mod pipeline;
pub mod reports;

// Re-export main types for convenience
pub use config::{AppConfig, AppConfigBuilder, BehaviorConfig, DiffSettings, OutputConfig};
pub use config::{ConfigError, DiffConfig, Validatable};
pub use diff::{DiffEngine, DiffOptions, DiffResult, Direction, SpecDiff, Summary};
pub use error::{ErrorContext, OptionContext, Result, SpecDiffError};
pub use model::{Document, Schema, SchemaArena, SchemaId};
pub use parsers::{load_spec, parse_spec_str, OpenApiParser};
pub use reports::{ReportFormat, ReportGenerator};
