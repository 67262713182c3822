//! Report output stage.

use super::{should_use_color, write_output, OutputTarget};
use crate::config::DiffConfig;
use crate::diff::DiffResult;
use crate::reports::create_reporter_with_options;
use anyhow::{Context, Result};

/// Render the report for a diff result without writing it.
pub fn render_report(config: &DiffConfig, result: &DiffResult, use_color: bool) -> Result<String> {
    let reporter = create_reporter_with_options(config.output.format, use_color);
    reporter
        .generate_diff_report(result, &config.report_config())
        .with_context(|| format!("Failed to generate {} report", config.output.format))
}

/// Output a diff report to the configured destination.
pub fn output_report(config: &DiffConfig, result: &DiffResult) -> Result<()> {
    let target = OutputTarget::from_option(config.output.file.clone());
    let use_color = should_use_color(config.output.no_color, &target);
    let report = render_report(config, result, use_color)?;
    write_output(&report, &target, config.behavior.quiet)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AppConfig, DiffPaths};
    use crate::reports::ReportFormat;

    #[test]
    fn test_output_report_to_file() {
        let dir = tempfile::TempDir::new().expect("temp dir");
        let path = dir.path().join("diff.json");
        let config = DiffConfig::new(
            DiffPaths {
                base: "v1.yaml".to_string(),
                revision: "v2.yaml".to_string(),
            },
            AppConfig::builder()
                .output_format(ReportFormat::Json)
                .output_file(Some(path.clone()))
                .quiet(true)
                .build(),
        );

        output_report(&config, &DiffResult::default()).expect("report");
        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(path).expect("read")).expect("json");
        assert_eq!(written["metadata"]["revision"], "v2.yaml");
        assert_eq!(written["summary"]["diff"], false);
    }
}
