//! Configuration types for the diff engine.

use crate::error::{DiffErrorKind, Result, SpecDiffError};
use regex::Regex;

/// Options consumed by [`DiffEngine`](super::DiffEngine).
#[derive(Debug, Clone, Default)]
pub struct DiffOptions {
    /// Prune the delta down to changes that break existing clients
    pub breaking_only: bool,
    /// Skip `description` fields everywhere
    pub exclude_description: bool,
    /// Compare `example`/`examples` fields
    pub include_examples: bool,
    /// Literal prefix stripped from base paths before matching
    pub path_prefix: Option<String>,
    /// Only paths matching this pattern are compared
    pub path_filter: Option<Regex>,
}

impl DiffOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn breaking_only(mut self, enabled: bool) -> Self {
        self.breaking_only = enabled;
        self
    }

    #[must_use]
    pub const fn exclude_description(mut self, enabled: bool) -> Self {
        self.exclude_description = enabled;
        self
    }

    #[must_use]
    pub const fn include_examples(mut self, enabled: bool) -> Self {
        self.include_examples = enabled;
        self
    }

    #[must_use]
    pub fn path_prefix(mut self, prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        self.path_prefix = (!prefix.is_empty()).then_some(prefix);
        self
    }

    /// Compile and set the path filter. An empty pattern clears it.
    pub fn path_filter(mut self, pattern: &str) -> Result<Self> {
        if pattern.is_empty() {
            self.path_filter = None;
            return Ok(self);
        }
        let regex = Regex::new(pattern).map_err(|e| {
            SpecDiffError::diff(
                format!("pattern {pattern:?}"),
                DiffErrorKind::InvalidFilter(e.to_string()),
            )
        })?;
        self.path_filter = Some(regex);
        Ok(self)
    }

    /// Base path after prefix stripping.
    #[must_use]
    pub fn normalize_base_path<'p>(&self, path: &'p str) -> &'p str {
        match &self.path_prefix {
            Some(prefix) => path.strip_prefix(prefix.as_str()).unwrap_or(path),
            None => path,
        }
    }

    /// True when a path passes the filter.
    #[must_use]
    pub fn includes_path(&self, path: &str) -> bool {
        self.path_filter
            .as_ref()
            .map_or(true, |filter| filter.is_match(path))
    }
}
