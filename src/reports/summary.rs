//! Summary report generator for shell output.
//!
//! Provides a compact, human-readable summary for terminal usage.

use super::escape::strip_control_chars;
use super::{ReportConfig, ReportError, ReportFormat, ReportGenerator};
use crate::diff::{ChangeKind, DiffResult};

/// Apply ANSI color formatting if colored output is enabled.
fn ansi_color(text: &str, color: &str, colored: bool) -> String {
    if colored {
        match color {
            "red" => format!("\x1b[31m{text}\x1b[0m"),
            "green" => format!("\x1b[32m{text}\x1b[0m"),
            "yellow" => format!("\x1b[33m{text}\x1b[0m"),
            "cyan" => format!("\x1b[36m{text}\x1b[0m"),
            "bold" => format!("\x1b[1m{text}\x1b[0m"),
            "dim" => format!("\x1b[2m{text}\x1b[0m"),
            _ => text.to_string(),
        }
    } else {
        text.to_string()
    }
}

/// Summary reporter for shell output
pub struct SummaryReporter {
    /// Use colored output
    colored: bool,
}

impl SummaryReporter {
    /// Create a new summary reporter
    #[must_use]
    pub const fn new() -> Self {
        Self { colored: true }
    }

    /// Disable colored output
    #[must_use]
    pub const fn no_color(mut self) -> Self {
        self.colored = false;
        self
    }

    fn color(&self, text: &str, color: &str) -> String {
        ansi_color(text, color, self.colored)
    }

    fn counts(&self, added: usize, deleted: usize, modified: usize) -> String {
        let mut parts = Vec::new();
        if added > 0 {
            parts.push(self.color(&format!("+{added}"), "green"));
        }
        if deleted > 0 {
            parts.push(self.color(&format!("-{deleted}"), "red"));
        }
        if modified > 0 {
            parts.push(self.color(&format!("~{modified}"), "yellow"));
        }
        parts.join(" ")
    }
}

impl Default for SummaryReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for SummaryReporter {
    fn generate_diff_report(
        &self,
        result: &DiffResult,
        config: &ReportConfig,
    ) -> Result<String, ReportError> {
        let mut lines = Vec::new();

        let title = config.title.as_deref().unwrap_or(if result.breaking_only {
            "OpenAPI Breaking Changes"
        } else {
            "OpenAPI Diff Summary"
        });
        lines.push(self.color(title, "bold"));
        lines.push(self.color("─".repeat(40).as_str(), "dim"));

        if let (Some(base), Some(revision)) = (
            &config.metadata.base_source,
            &config.metadata.revision_source,
        ) {
            lines.push(format!(
                "{}  {} → {}",
                self.color("Files:", "cyan"),
                strip_control_chars(base),
                strip_control_chars(revision)
            ));
            lines.push(String::new());
        }

        if !result.has_changes() {
            lines.push(format!("  {}", self.color("No changes", "dim")));
            return Ok(lines.join("\n"));
        }

        lines.push(self.color("Changes:", "bold"));
        if let Some(version) = &result.diff.openapi {
            lines.push(format!(
                "  {:<16} {} → {}",
                "openapi",
                strip_control_chars(&version.from),
                strip_control_chars(&version.to)
            ));
        }
        for (category, details) in &result.summary.components {
            lines.push(format!(
                "  {:<16} {}",
                category.as_str(),
                self.counts(details.added, details.deleted, details.modified)
            ));
        }

        let operations = result.changed_operations();
        if !config.summary_only && !operations.is_empty() {
            lines.push(String::new());
            lines.push(self.color("Endpoints:", "bold"));
            for change in operations {
                let (marker, color) = match change.kind {
                    ChangeKind::Added => ("+", "green"),
                    ChangeKind::Deleted => ("-", "red"),
                    ChangeKind::Modified => ("~", "yellow"),
                };
                let target = match &change.method {
                    Some(method) => format!("{} {}", method.to_uppercase(), change.path),
                    None => change.path.clone(),
                };
                lines.push(format!(
                    "  {} {}",
                    self.color(marker, color),
                    strip_control_chars(&target)
                ));
            }
        }

        Ok(lines.join("\n"))
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Summary
    }
}
