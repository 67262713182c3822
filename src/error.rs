//! Unified error types for openapi-delta.
//!
//! The diff core only ever fails on references it cannot follow; every
//! other absence (no body, no schema, missing map key) is a valid state and
//! is reported as a change rather than an error.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for openapi-delta operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum SpecDiffError {
    /// Errors while loading a specification document
    #[error("Failed to load specification: {context}")]
    Load {
        context: String,
        #[source]
        source: LoadErrorKind,
    },

    /// Errors during diff computation
    #[error("Diff computation failed: {context}")]
    Diff {
        context: String,
        #[source]
        source: DiffErrorKind,
    },

    /// Errors during report generation
    #[error("Report generation failed: {context}")]
    Report {
        context: String,
        #[source]
        source: ReportErrorKind,
    },

    /// IO errors with context
    #[error("IO error at {path:?}: {message}")]
    Io {
        path: Option<PathBuf>,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration errors
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Validation errors
    #[error("Validation failed: {0}")]
    Validation(String),
}

/// Specific load error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum LoadErrorKind {
    #[error("Invalid document structure: {0}")]
    InvalidStructure(String),

    #[error("Unsupported OpenAPI version: {0} (expected 3.x)")]
    UnsupportedVersion(String),

    #[error("Unresolved schema reference: {0}")]
    UnresolvedSchemaRef(String),

    #[error("Remote fetch failed: {0}")]
    Remote(String),
}

/// Specific diff error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum DiffErrorKind {
    /// A reference that must be compared has no resolved value.
    #[error("{kind} reference {reference:?} could not be resolved")]
    MalformedReference { kind: String, reference: String },

    /// Single-media-type comparison saw a content map with other than one entry.
    #[error("expected exactly one media type, found {count}")]
    AmbiguousMediaType { count: usize },

    #[error("Invalid path filter: {0}")]
    InvalidFilter(String),
}

/// Specific report error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ReportErrorKind {
    #[error("Serialization failed: {0}")]
    SerializationError(String),

    #[error("Output format not supported for this operation: {0}")]
    UnsupportedFormat(String),
}

// ============================================================================
// Result type alias
// ============================================================================

/// Convenient Result type for openapi-delta operations
pub type Result<T> = std::result::Result<T, SpecDiffError>;

// ============================================================================
// Error construction helpers
// ============================================================================

impl SpecDiffError {
    /// Create a load error with context
    pub fn load(context: impl Into<String>, source: LoadErrorKind) -> Self {
        Self::Load {
            context: context.into(),
            source,
        }
    }

    /// Create a diff error
    pub fn diff(context: impl Into<String>, source: DiffErrorKind) -> Self {
        Self::Diff {
            context: context.into(),
            source,
        }
    }

    /// Create a diff error for a dangling reference
    pub fn malformed_reference(kind: impl Into<String>, reference: impl Into<String>) -> Self {
        Self::diff(
            "",
            DiffErrorKind::MalformedReference {
                kind: kind.into(),
                reference: reference.into(),
            },
        )
    }

    /// Create a report error
    pub fn report(context: impl Into<String>, source: ReportErrorKind) -> Self {
        Self::Report {
            context: context.into(),
            source,
        }
    }

    /// Create an IO error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let message = format!("{source}");
        Self::Io {
            path: Some(path.into()),
            message,
            source,
        }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// True for the lenient single-media-type failure that callers skip.
    #[must_use]
    pub fn is_ambiguous_media_type(&self) -> bool {
        matches!(
            self,
            Self::Diff {
                source: DiffErrorKind::AmbiguousMediaType { .. },
                ..
            }
        )
    }
}

// ============================================================================
// Conversions from existing error types
// ============================================================================

impl From<std::io::Error> for SpecDiffError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            path: None,
            message: format!("{err}"),
            source: err,
        }
    }
}

impl From<serde_yaml::Error> for SpecDiffError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::load(
            "document deserialization",
            LoadErrorKind::InvalidStructure(err.to_string()),
        )
    }
}

impl From<serde_json::Error> for SpecDiffError {
    fn from(err: serde_json::Error) -> Self {
        Self::report(
            "JSON serialization",
            ReportErrorKind::SerializationError(err.to_string()),
        )
    }
}

// ============================================================================
// Error context extension trait
// ============================================================================

/// Extension trait for adding context to errors.
///
/// Context strings chain outermost-first, so a dangling parameter reference
/// deep inside an operation reads like
/// `paths /pets: GET: parameters: ...`.
pub trait ErrorContext<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context from a closure, evaluated only on error.
    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T, E: Into<SpecDiffError>> ErrorContext<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        let ctx: String = context.into();
        self.map_err(|e| add_context_to_error(e.into(), &ctx))
    }

    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.map_err(|e| {
            let ctx: String = f().into();
            add_context_to_error(e.into(), &ctx)
        })
    }
}

fn add_context_to_error(err: SpecDiffError, new_ctx: &str) -> SpecDiffError {
    match err {
        SpecDiffError::Load {
            context: existing,
            source,
        } => SpecDiffError::Load {
            context: chain_context(new_ctx, &existing),
            source,
        },
        SpecDiffError::Diff {
            context: existing,
            source,
        } => SpecDiffError::Diff {
            context: chain_context(new_ctx, &existing),
            source,
        },
        SpecDiffError::Report {
            context: existing,
            source,
        } => SpecDiffError::Report {
            context: chain_context(new_ctx, &existing),
            source,
        },
        SpecDiffError::Io {
            path,
            message,
            source,
        } => SpecDiffError::Io {
            path,
            message: chain_context(new_ctx, &message),
            source,
        },
        SpecDiffError::Config(msg) => SpecDiffError::Config(chain_context(new_ctx, &msg)),
        SpecDiffError::Validation(msg) => SpecDiffError::Validation(chain_context(new_ctx, &msg)),
    }
}

/// Returns "`new`: `existing`", or just `new` when nothing is chained yet.
fn chain_context(new: &str, existing: &str) -> String {
    if existing.is_empty() {
        new.to_string()
    } else {
        format!("{new}: {existing}")
    }
}

/// Extension trait for Option types to convert to errors with context.
pub trait OptionContext<T> {
    /// Convert None to an error with the given context.
    fn context_none(self, context: impl Into<String>) -> Result<T>;
}

impl<T> OptionContext<T> for Option<T> {
    fn context_none(self, context: impl Into<String>) -> Result<T> {
        self.ok_or_else(|| SpecDiffError::Validation(context.into()))
    }
}
