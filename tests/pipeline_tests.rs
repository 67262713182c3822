//! Pipeline and configuration tests.
//!
//! Drives the same handlers the CLI uses, with config files and report
//! files in temporary directories.

use openapi_delta::{
    cli::run_diff,
    config::{load_config_file, AppConfig, DiffConfig, DiffPaths, Validatable},
    pipeline::exit_codes,
    reports::ReportFormat,
};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const FIXTURES_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures");

fn fixture_source(name: &str) -> String {
    Path::new(FIXTURES_DIR).join(name).to_string_lossy().to_string()
}

fn petstore_run(config: AppConfig) -> DiffConfig {
    DiffConfig::new(
        DiffPaths {
            base: fixture_source("petstore-base.yaml"),
            revision: fixture_source("petstore-revision.yaml"),
        },
        config,
    )
}

fn output_file(dir: &TempDir, name: &str) -> PathBuf {
    dir.path().join(name)
}

#[test]
fn test_config_file_drives_diff() {
    let dir = TempDir::new().expect("temp dir");
    let report = output_file(&dir, "breaking.json");
    let config_path = dir.path().join(".openapi-delta.yaml");
    std::fs::write(
        &config_path,
        format!(
            "diff:\n  breaking_only: true\noutput:\n  format: json\n  file: {}\nbehavior:\n  quiet: true\n",
            report.display()
        ),
    )
    .expect("write config");

    let config = load_config_file(&config_path).expect("load config");
    assert!(config.is_valid());

    let code = run_diff(petstore_run(config)).expect("run");
    assert_eq!(code, exit_codes::SUCCESS);

    let written: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&report).expect("read report"))
            .expect("json report");
    assert_eq!(written["metadata"]["breakingOnly"], true);
    assert!(written["diff"]["paths"].get("added").is_none());
    assert_eq!(
        written["diff"]["paths"]["modified"]["/pets/{petId}"]["operations"]["deleted"],
        serde_json::json!(["DELETE"])
    );
}

#[test]
fn test_cli_overrides_file() {
    let file_config = AppConfig::builder()
        .output_format(ReportFormat::Html)
        .filter(Some("^/owners".to_string()))
        .build();
    let cli = AppConfig::builder()
        .filter(Some("^/pets".to_string()))
        .fail_on_diff(true)
        .build();

    let mut merged = file_config;
    merged.merge(&cli);
    assert_eq!(merged.output.format, ReportFormat::Html);
    assert_eq!(merged.diff.filter.as_deref(), Some("^/pets"));
    assert!(merged.behavior.fail_on_diff);
}

#[test]
fn test_exit_code_on_any_change() {
    let dir = TempDir::new().expect("temp dir");
    let config = AppConfig::builder()
        .output_format(ReportFormat::Summary)
        .output_file(Some(output_file(&dir, "summary.txt")))
        .no_color(true)
        .fail_on_diff(true)
        .quiet(true)
        .build();

    assert_eq!(
        run_diff(petstore_run(config)).expect("run"),
        exit_codes::CHANGES_DETECTED
    );
    let summary = std::fs::read_to_string(output_file(&dir, "summary.txt")).expect("read");
    assert!(summary.contains("OpenAPI Diff Summary"));
    assert!(!summary.contains('\x1b'));
}

#[test]
fn test_exit_code_on_breaking_change() {
    let dir = TempDir::new().expect("temp dir");
    let config = AppConfig::builder()
        .output_file(Some(output_file(&dir, "diff.yaml")))
        .fail_on_diff(true)
        .fail_on_breaking(true)
        .quiet(true)
        .build();

    assert_eq!(
        run_diff(petstore_run(config)).expect("run"),
        exit_codes::BREAKING_CHANGES
    );
}

#[test]
fn test_filtered_to_additive_paths() {
    let dir = TempDir::new().expect("temp dir");
    let config = AppConfig::builder()
        .filter(Some("^/owners".to_string()))
        .output_file(Some(output_file(&dir, "diff.yaml")))
        .fail_on_breaking(true)
        .quiet(true)
        .build();

    // Only the new /owners path is compared among paths, but component
    // schemas still carry breaking changes.
    assert_eq!(
        run_diff(petstore_run(config)).expect("run"),
        exit_codes::BREAKING_CHANGES
    );
    let diff: serde_yaml::Value =
        serde_yaml::from_str(&std::fs::read_to_string(output_file(&dir, "diff.yaml")).expect("read"))
            .expect("yaml");
    assert_eq!(diff["paths"]["added"][0].as_str(), Some("/owners"));
    assert!(diff["paths"].get("modified").is_none());
}

#[test]
fn test_missing_document_is_an_error() {
    let run = DiffConfig::new(
        DiffPaths {
            base: fixture_source("does-not-exist.yaml"),
            revision: fixture_source("petstore-revision.yaml"),
        },
        AppConfig::builder().quiet(true).build(),
    );
    let err = run_diff(run).unwrap_err();
    assert!(format!("{err:#}").contains("does-not-exist.yaml"));
}
