//! Pipeline orchestration for diff runs.
//!
//! Shared load → diff → report logic used by the CLI command handlers.

mod diff_stage;
mod output;
mod parse;
mod report_stage;

pub use diff_stage::{compute_diff, determine_exit_code};
pub use output::{should_use_color, write_output, OutputTarget};
pub use parse::{parse_spec_with_context, ParsedSpec};
pub use report_stage::{output_report, render_report};

/// Exit codes for CI/CD integration
pub mod exit_codes {
    /// Success - no changes detected, or no failure flag set
    pub const SUCCESS: i32 = 0;
    /// Changes were detected (with `--fail-on-diff`)
    pub const CHANGES_DETECTED: i32 = 1;
    /// Breaking changes were detected (with `--fail-on-breaking`)
    pub const BREAKING_CHANGES: i32 = 2;
    /// An error occurred
    pub const ERROR: i32 = 3;
}
