//! Diff computation stage.

use super::exit_codes;
use crate::config::DiffConfig;
use crate::diff::{DiffEngine, DiffResult};
use crate::model::Document;
use anyhow::{Context, Result};

/// Run the core diff computation between two documents.
pub fn compute_diff(config: &DiffConfig, base: &Document, revision: &Document) -> Result<DiffResult> {
    let quiet = config.behavior.quiet;
    let options = config
        .diff
        .to_diff_options()
        .context("Invalid diff settings")?;

    if !quiet {
        if let Some(prefix) = &options.path_prefix {
            tracing::info!("Stripping prefix {prefix} from base paths");
        }
        if let Some(filter) = &options.path_filter {
            tracing::info!("Comparing paths matching {}", filter.as_str());
        }
        tracing::info!("Computing diff...");
    }

    let result = DiffEngine::new()
        .with_options(options)
        .diff(base, revision)
        .context("Failed to compute diff")?;

    if !quiet {
        let changed: usize = result
            .summary
            .components
            .values()
            .map(crate::diff::SummaryDetails::total)
            .sum();
        tracing::info!(
            "Diff complete: {} changed entries across {} categories",
            changed,
            result.summary.components.len()
        );
    }

    Ok(result)
}

/// Determine the appropriate exit code based on diff results and config flags.
#[must_use]
pub fn determine_exit_code(config: &DiffConfig, result: &DiffResult) -> i32 {
    if config.behavior.fail_on_breaking && result.has_breaking_changes() {
        return exit_codes::BREAKING_CHANGES;
    }
    if config.behavior.fail_on_diff && result.has_changes() {
        return exit_codes::CHANGES_DETECTED;
    }
    exit_codes::SUCCESS
}
