//! Specification loading stage.

use crate::model::Document;
use anyhow::{Context, Result};

/// A loaded specification and where it came from
#[derive(Debug)]
pub struct ParsedSpec {
    /// The normalized document
    pub document: Document,
    /// File path or URL it was loaded from
    pub source: String,
}

impl ParsedSpec {
    /// Get a reference to the document
    #[must_use]
    pub const fn document(&self) -> &Document {
        &self.document
    }
}

/// Load a specification with the source in error messages
pub fn parse_spec_with_context(source: &str, quiet: bool) -> Result<ParsedSpec> {
    if !quiet {
        tracing::info!("Loading specification: {source}");
    }

    let document = crate::parsers::load_spec(source)
        .with_context(|| format!("Failed to load specification: {source}"))?;

    if !quiet {
        tracing::info!(
            "Loaded OpenAPI {} document with {} paths and {} schemas",
            document.openapi,
            document.paths.len(),
            document.components.schemas.len()
        );
    }

    Ok(ParsedSpec {
        document,
        source: source.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_with_context() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(
            file,
            "openapi: 3.0.3\ninfo:\n  title: t\n  version: '1'\npaths:\n  /pets: {{}}"
        )
        .expect("write");
        let source = file.path().to_string_lossy().to_string();

        let parsed = parse_spec_with_context(&source, true).expect("parse");
        assert_eq!(parsed.source, source);
        assert_eq!(parsed.document().paths.len(), 1);
    }

    #[test]
    fn test_error_names_source() {
        let err = parse_spec_with_context("missing-spec.yaml", true).unwrap_err();
        assert!(err.to_string().contains("missing-spec.yaml"));
    }
}
