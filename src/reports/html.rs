//! HTML report generator.

use super::escape::{escape_html, escape_html_opt};
use super::{ReportConfig, ReportError, ReportFormat, ReportGenerator};
use crate::diff::{ChangeKind, DiffResult};
use std::fmt::Write;

/// HTML report generator
pub struct HtmlReporter {
    /// Include inline CSS
    include_styles: bool,
}

impl HtmlReporter {
    /// Create a new HTML reporter
    #[must_use]
    pub const fn new() -> Self {
        Self {
            include_styles: true,
        }
    }

    /// Leave out the inline stylesheet
    #[must_use]
    pub const fn without_styles(mut self) -> Self {
        self.include_styles = false;
        self
    }

    fn get_styles(&self) -> &'static str {
        r#"
        <style>
            :root {
                --bg-color: #1e1e2e;
                --text-color: #cdd6f4;
                --accent-color: #89b4fa;
                --success-color: #a6e3a1;
                --warning-color: #f9e2af;
                --error-color: #f38ba8;
                --border-color: #45475a;
                --card-bg: #313244;
            }

            body {
                font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
                background-color: var(--bg-color);
                color: var(--text-color);
                margin: 0;
                padding: 20px;
                line-height: 1.6;
            }

            .container { max-width: 1200px; margin: 0 auto; }
            h1, h2, h3 { color: var(--accent-color); }

            .header {
                border-bottom: 2px solid var(--border-color);
                padding-bottom: 20px;
                margin-bottom: 30px;
            }

            table {
                width: 100%;
                border-collapse: collapse;
                margin-bottom: 30px;
                background-color: var(--card-bg);
                border-radius: 8px;
                overflow: hidden;
            }

            th, td {
                padding: 12px 15px;
                text-align: left;
                border-bottom: 1px solid var(--border-color);
            }

            th { background-color: #45475a; font-weight: 600; }
            tr:hover { background-color: #3b3d4d; }
            td.added { color: var(--success-color); }
            td.deleted { color: var(--error-color); }
            td.modified { color: var(--warning-color); }

            .badge {
                display: inline-block;
                padding: 2px 8px;
                border-radius: 4px;
                font-size: 0.85em;
                font-weight: 500;
            }

            .badge-added { background-color: rgba(166, 227, 161, 0.2); color: var(--success-color); }
            .badge-deleted { background-color: rgba(243, 139, 168, 0.2); color: var(--error-color); }
            .badge-modified { background-color: rgba(249, 226, 175, 0.2); color: var(--warning-color); }

            pre {
                background-color: var(--card-bg);
                border: 1px solid var(--border-color);
                border-radius: 8px;
                padding: 15px;
                overflow-x: auto;
            }

            .section { margin-bottom: 40px; }

            .footer {
                margin-top: 40px;
                padding-top: 20px;
                border-top: 1px solid var(--border-color);
                font-size: 0.9em;
                color: #a6adc8;
            }
        </style>
        "#
    }
}

impl Default for HtmlReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for HtmlReporter {
    fn generate_diff_report(
        &self,
        result: &DiffResult,
        config: &ReportConfig,
    ) -> Result<String, ReportError> {
        let mut html = String::new();

        let title = config
            .title
            .clone()
            .unwrap_or_else(|| "OpenAPI Diff Report".to_string());

        writeln!(html, "<!DOCTYPE html>")?;
        writeln!(html, "<html lang=\"en\">")?;
        writeln!(html, "<head>")?;
        writeln!(html, "    <meta charset=\"UTF-8\">")?;
        writeln!(
            html,
            "    <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">"
        )?;
        writeln!(html, "    <title>{}</title>", escape_html(&title))?;
        if self.include_styles {
            writeln!(html, "{}", self.get_styles())?;
        }
        writeln!(html, "</head>")?;
        writeln!(html, "<body>")?;
        writeln!(html, "<div class=\"container\">")?;

        // Header
        writeln!(html, "<div class=\"header\">")?;
        writeln!(html, "    <h1>{}</h1>", escape_html(&title))?;
        writeln!(
            html,
            "    <p>{} &rarr; {}</p>",
            escape_html_opt(config.metadata.base_source.as_deref(), "base"),
            escape_html_opt(config.metadata.revision_source.as_deref(), "revision"),
        )?;
        if result.breaking_only {
            writeln!(html, "    <p>Showing breaking changes only.</p>")?;
        }
        writeln!(html, "</div>")?;

        // Summary
        writeln!(html, "<div class=\"section\">")?;
        writeln!(html, "    <h2>Summary</h2>")?;
        if result.has_changes() {
            writeln!(html, "    <table>")?;
            writeln!(
                html,
                "        <tr><th>Category</th><th>Added</th><th>Deleted</th><th>Modified</th></tr>"
            )?;
            for (category, details) in &result.summary.components {
                writeln!(
                    html,
                    "        <tr><td>{}</td><td class=\"added\">{}</td><td class=\"deleted\">{}</td><td class=\"modified\">{}</td></tr>",
                    category.as_str(),
                    details.added,
                    details.deleted,
                    details.modified
                )?;
            }
            writeln!(html, "    </table>")?;
        } else {
            writeln!(html, "    <p>No changes.</p>")?;
        }
        writeln!(html, "</div>")?;

        // Endpoints
        let operations = result.changed_operations();
        if !operations.is_empty() {
            writeln!(html, "<div class=\"section\">")?;
            writeln!(html, "    <h2>Endpoints</h2>")?;
            writeln!(html, "    <table>")?;
            writeln!(
                html,
                "        <tr><th>Change</th><th>Method</th><th>Path</th></tr>"
            )?;
            for change in &operations {
                writeln!(
                    html,
                    "        <tr><td><span class=\"badge {}\">{}</span></td><td>{}</td><td>{}</td></tr>",
                    badge_class(change.kind),
                    change.kind.as_str(),
                    escape_html_opt(change.method.as_deref(), ""),
                    escape_html(&change.path)
                )?;
            }
            writeln!(html, "    </table>")?;
            writeln!(html, "</div>")?;
        }

        // Full delta
        if !config.summary_only && result.has_changes() {
            let yaml = serde_yaml::to_string(&result.diff)?;
            writeln!(html, "<div class=\"section\">")?;
            writeln!(html, "    <h2>Details</h2>")?;
            writeln!(html, "    <pre>{}</pre>", escape_html(&yaml))?;
            writeln!(html, "</div>")?;
        }

        // Footer
        writeln!(html, "<div class=\"footer\">")?;
        writeln!(
            html,
            "    <p>Generated by {} v{} on {}</p>",
            env!("CARGO_PKG_NAME"),
            env!("CARGO_PKG_VERSION"),
            chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
        )?;
        writeln!(html, "</div>")?;

        writeln!(html, "</div>")?;
        writeln!(html, "</body>")?;
        writeln!(html, "</html>")?;

        Ok(html)
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Html
    }
}

const fn badge_class(kind: ChangeKind) -> &'static str {
    match kind {
        ChangeKind::Added => "badge-added",
        ChangeKind::Deleted => "badge-deleted",
        ChangeKind::Modified => "badge-modified",
    }
}
