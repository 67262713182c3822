//! YAML report generator.
//!
//! Emits the bare delta tree, or the summary when the config asks for it.
//! An unchanged pair of documents renders as `{}`.

use super::{ReportConfig, ReportError, ReportFormat, ReportGenerator};
use crate::diff::DiffResult;

/// YAML report generator
#[derive(Debug, Default)]
pub struct YamlReporter;

impl YamlReporter {
    /// Create a new YAML reporter
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl ReportGenerator for YamlReporter {
    fn generate_diff_report(
        &self,
        result: &DiffResult,
        config: &ReportConfig,
    ) -> Result<String, ReportError> {
        let yaml = if config.summary_only {
            serde_yaml::to_string(&result.summary)?
        } else {
            serde_yaml::to_string(&result.diff)?
        };
        Ok(yaml)
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Yaml
    }
}
