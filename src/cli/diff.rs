//! Diff command handler.
//!
//! Implements the `diff` subcommand for comparing two OpenAPI documents.

use crate::config::{DiffConfig, Validatable};
use crate::pipeline::{compute_diff, determine_exit_code, output_report, parse_spec_with_context};
use anyhow::Result;

/// Run the diff command, returning the desired exit code.
///
/// The caller is responsible for calling `std::process::exit()` with the
/// returned code when it is non-zero.
#[allow(clippy::needless_pass_by_value)]
pub fn run_diff(config: DiffConfig) -> Result<i32> {
    let errors = config.validate();
    if !errors.is_empty() {
        let messages: Vec<String> = errors.iter().map(ToString::to_string).collect();
        anyhow::bail!("Invalid configuration:\n  {}", messages.join("\n  "));
    }

    let quiet = config.behavior.quiet;
    let base = parse_spec_with_context(&config.paths.base, quiet)?;
    let revision = parse_spec_with_context(&config.paths.revision, quiet)?;

    let result = compute_diff(&config, base.document(), revision.document())?;
    let exit_code = determine_exit_code(&config, &result);

    output_report(&config, &result)?;

    Ok(exit_code)
}
