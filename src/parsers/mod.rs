//! Specification loading.
//!
//! Documents are read from a local path or, with the `remote` feature, from
//! an `http(s)` URL, then parsed by [`OpenApiParser`] into a [`Document`].
//!
//! ```no_run
//! use openapi_delta::parsers::load_spec;
//!
//! let base = load_spec("specs/petstore-v1.yaml").unwrap();
//! println!("{} paths", base.paths.len());
//! ```

mod openapi;

pub use openapi::OpenApiParser;

use crate::error::{LoadErrorKind, Result, SpecDiffError};
use crate::model::Document;
use std::path::Path;

/// Maximum specification size (64 MB).
const MAX_SPEC_FILE_SIZE: u64 = 64 * 1024 * 1024;

/// Load a specification from a file path or URL.
pub fn load_spec(source: &str) -> Result<Document> {
    if is_remote(source) {
        let content = fetch_remote(source)?;
        return parse_spec_str(&content);
    }
    parse_spec_file(Path::new(source))
}

/// Load a specification from a local file.
pub fn parse_spec_file(path: &Path) -> Result<Document> {
    let metadata = std::fs::metadata(path).map_err(|e| SpecDiffError::io(path, e))?;
    if metadata.len() > MAX_SPEC_FILE_SIZE {
        return Err(SpecDiffError::load(
            format!("{}", path.display()),
            LoadErrorKind::InvalidStructure(format!(
                "file is {} MB, exceeding the {} MB limit",
                metadata.len() / (1024 * 1024),
                MAX_SPEC_FILE_SIZE / (1024 * 1024),
            )),
        ));
    }
    let content = std::fs::read_to_string(path).map_err(|e| SpecDiffError::io(path, e))?;
    parse_spec_str(&content)
}

/// Parse a specification from JSON or YAML text.
pub fn parse_spec_str(content: &str) -> Result<Document> {
    OpenApiParser::new().parse_str(content)
}

/// True when `source` looks like an `http://` or `https://` URL.
#[must_use]
pub fn is_remote(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

#[cfg(feature = "remote")]
fn fetch_remote(url: &str) -> Result<String> {
    tracing::debug!(url, "fetching remote specification");
    let response = reqwest::blocking::get(url)
        .and_then(reqwest::blocking::Response::error_for_status)
        .map_err(|e| SpecDiffError::load(url, LoadErrorKind::Remote(e.to_string())))?;
    response
        .text()
        .map_err(|e| SpecDiffError::load(url, LoadErrorKind::Remote(e.to_string())))
}

#[cfg(not(feature = "remote"))]
fn fetch_remote(url: &str) -> Result<String> {
    Err(SpecDiffError::load(
        url,
        LoadErrorKind::Remote("built without the `remote` feature".to_string()),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_is_remote() {
        assert!(is_remote("https://example.com/openapi.yaml"));
        assert!(is_remote("http://localhost:8080/spec.json"));
        assert!(!is_remote("specs/openapi.yaml"));
        assert!(!is_remote("/abs/path/http.yaml"));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "openapi: 3.0.0\ninfo:\n  title: t\n  version: 1.0\npaths: {{}}")
            .expect("write");
        let doc = load_spec(file.path().to_str().expect("utf8 path")).expect("load");
        assert_eq!(doc.info.version, "1.0");
        assert!(doc.paths.is_empty());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_spec("/definitely/not/here.yaml").unwrap_err();
        assert!(matches!(err, SpecDiffError::Io { .. }));
    }
}
