//! Integration tests for openapi-delta
//!
//! These tests verify end-to-end functionality of loading, the diff engine,
//! breaking-change pruning and report generation.

use openapi_delta::{
    diff::{Category, DiffEngine, DiffOptions, SummaryDetails},
    parsers::{load_spec, parse_spec_str},
    reports::{create_reporter_with_options, ReportConfig, ReportFormat},
    Document,
};
use serde_json::{json, Value};
use std::path::Path;

// ============================================================================
// Test Fixtures
// ============================================================================

const FIXTURES_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures");

fn fixture(name: &str) -> Document {
    let path = Path::new(FIXTURES_DIR).join(name);
    load_spec(path.to_str().expect("utf8 path")).expect("Failed to load fixture")
}

fn petstore() -> (Document, Document) {
    (
        fixture("petstore-base.yaml"),
        fixture("petstore-revision.yaml"),
    )
}

fn to_json<T: serde::Serialize>(value: &T) -> Value {
    serde_json::to_value(value).expect("serialize")
}

// ============================================================================
// Full Diff
// ============================================================================

mod full_diff_tests {
    use super::*;

    #[test]
    fn test_identical_documents_have_no_changes() {
        let (base, _) = petstore();
        let result = DiffEngine::new().diff(&base, &base).expect("diff");
        assert!(!result.has_changes());
        assert_eq!(to_json(&result.diff), json!({}));
        assert_eq!(to_json(&result.summary), json!({"diff": false}));
    }

    #[test]
    fn test_petstore_delta() {
        let (base, revision) = petstore();
        let result = DiffEngine::new().diff(&base, &revision).expect("diff");
        let diff = to_json(&result.diff);

        assert_eq!(diff["paths"]["added"], json!(["/owners"]));
        assert_eq!(
            diff["paths"]["modified"]["/pets/{petId}"]["operations"]["deleted"],
            json!(["DELETE"])
        );

        let list_pets = &diff["paths"]["modified"]["/pets"]["operations"]["modified"]["GET"];
        assert_eq!(list_pets["parameters"]["added"], json!({"query": ["shelter"]}));
        assert_eq!(
            list_pets["parameters"]["modified"]["query"]["limit"]["schema"]["maximum"],
            json!({"from": 100.0, "to": 50.0})
        );

        let status = &diff["schemas"]["modified"]["Pet"]["properties"]["modified"]["status"];
        assert_eq!(status["enum"]["added"], json!(["adopted"]));
        assert_eq!(
            diff["schemas"]["modified"]["NewPet"]["properties"]["added"],
            json!(["age"])
        );
        assert_eq!(diff["info"]["version"], json!({"from": "1.0.0", "to": "2.0.0"}));
        assert_eq!(diff["tags"]["added"], json!(["owners"]));
    }

    #[test]
    fn test_summary_counts() {
        let (base, revision) = petstore();
        let result = DiffEngine::new().diff(&base, &revision).expect("diff");

        assert!(result.summary.diff);
        assert_eq!(
            result.summary.details(Category::Paths),
            Some(&SummaryDetails {
                added: 1,
                deleted: 0,
                modified: 2
            })
        );
        assert_eq!(
            result.summary.details(Category::Schemas).map(|d| d.modified),
            Some(2)
        );
        assert_eq!(result.summary.details(Category::Tags).map(|d| d.added), Some(1));
        assert!(result.summary.details(Category::Servers).is_none());
        assert!(result.summary.details(Category::Parameters).is_none());
    }

    #[test]
    fn test_excluding_descriptions() {
        let (base, revision) = petstore();
        let options = DiffOptions::new().exclude_description(true);
        let result = DiffEngine::new()
            .with_options(options)
            .diff(&base, &revision)
            .expect("diff");
        let info = to_json(&result.diff)["info"].clone();
        assert!(info.get("description").is_none());
        assert!(info.get("version").is_some());
    }

    #[test]
    fn test_recursive_schema_terminates() {
        let base = fixture("tree-base.yaml");
        let revision = fixture("tree-revision.yaml");
        let result = DiffEngine::new().diff(&base, &revision).expect("diff");
        let diff = to_json(&result.diff);

        let node = &diff["schemas"]["modified"]["Node"];
        assert_eq!(
            node["properties"]["modified"]["label"]["maxLength"],
            json!({"from": null, "to": 32})
        );
        assert!(diff["paths"]["modified"]["/tree"].is_object());
    }

    #[test]
    fn test_recursive_schema_against_itself() {
        let base = fixture("tree-base.yaml");
        let result = DiffEngine::new().diff(&base, &base).expect("diff");
        assert!(!result.has_changes());
    }
}

// ============================================================================
// Breaking Changes
// ============================================================================

mod breaking_tests {
    use super::*;

    fn breaking(base: &Document, revision: &Document) -> Value {
        let options = DiffOptions::new().breaking_only(true);
        let result = DiffEngine::new()
            .with_options(options)
            .diff(base, revision)
            .expect("diff");
        assert!(result.breaking_only);
        to_json(&result.diff)
    }

    #[test]
    fn test_petstore_breaking_changes() {
        let (base, revision) = petstore();
        let diff = breaking(&base, &revision);

        assert!(diff.get("info").is_none());
        assert!(diff.get("tags").is_none());
        assert!(diff["paths"].get("added").is_none());
        assert_eq!(
            diff["paths"]["modified"]["/pets/{petId}"]["operations"]["deleted"],
            json!(["DELETE"])
        );

        let list_pets = &diff["paths"]["modified"]["/pets"]["operations"]["modified"]["GET"];
        assert_eq!(list_pets["parameters"]["added"], json!({"query": ["shelter"]}));
        assert!(list_pets["parameters"]["modified"]["query"]["limit"]["schema"]["maximum"]
            .is_object());

        // An optional request property is additive.
        assert!(diff["schemas"]["modified"].get("NewPet").is_none());
        assert!(diff["schemas"]["modified"].get("Pet").is_some());
    }

    #[test]
    fn test_breaking_is_subset_of_full() {
        let (base, revision) = petstore();
        let full = DiffEngine::new().diff(&base, &revision).expect("diff");
        let pruned = DiffEngine::new()
            .with_options(DiffOptions::new().breaking_only(true))
            .diff(&base, &revision)
            .expect("diff");

        for (category, details) in &pruned.summary.components {
            let full_details = full
                .summary
                .details(*category)
                .expect("category present in full diff");
            assert!(details.added <= full_details.added);
            assert!(details.deleted <= full_details.deleted);
            assert!(details.modified <= full_details.modified);
        }
    }

    #[test]
    fn test_reversed_direction_is_breaking_too() {
        let (base, revision) = petstore();
        let diff = breaking(&revision, &base);

        // Deleting a path is breaking.
        assert_eq!(diff["paths"]["deleted"], json!(["/owners"]));
        // Component schemas are checked for both directions.
        let status = &diff["schemas"]["modified"]["Pet"]["properties"]["modified"]["status"];
        assert_eq!(status["enum"]["deleted"], json!(["adopted"]));
    }

    #[test]
    fn test_required_body_becomes_optional() {
        let base = parse_spec_str(BODY_SPEC).expect("parse");
        let revision =
            parse_spec_str(&BODY_SPEC.replace("required: true", "required: false")).expect("parse");

        let full = DiffEngine::new().diff(&base, &revision).expect("diff");
        let body = &to_json(&full.diff)["paths"]["modified"]["/pets"]["operations"]["modified"]
            ["POST"]["requestBody"];
        assert_eq!(body["required"], json!({"from": true, "to": false}));

        let diff = breaking(&base, &revision);
        assert_eq!(diff, json!({}));

        // The other way around breaks existing clients.
        let diff = breaking(&revision, &base);
        let body = &diff["paths"]["modified"]["/pets"]["operations"]["modified"]["POST"]
            ["requestBody"];
        assert_eq!(body["required"], json!({"from": false, "to": true}));
    }

    const BODY_SPEC: &str = "
openapi: 3.0.3
info: {title: body, version: '1'}
paths:
  /pets:
    post:
      requestBody:
        required: true
        content:
          application/json:
            schema: {type: object}
      responses:
        '201': {description: created}
";
}

// ============================================================================
// Scenarios
// ============================================================================

mod scenario_tests {
    use super::*;

    fn pair(name: &str) -> (Document, Document) {
        (
            fixture(&format!("{name}-base.yaml")),
            fixture(&format!("{name}-revision.yaml")),
        )
    }

    fn run(base: &Document, revision: &Document, breaking_only: bool) -> Value {
        let result = DiffEngine::new()
            .with_options(DiffOptions::new().breaking_only(breaking_only))
            .diff(base, revision)
            .expect("diff");
        to_json(&result.diff)
    }

    #[test]
    fn test_new_operation_and_swapped_media_type() {
        let (base, revision) = pair("pets");
        let diff = run(&base, &revision, false);

        let operations = &diff["paths"]["modified"]["/pets"]["operations"];
        assert_eq!(operations["added"], json!(["DELETE"]));
        let content = &operations["modified"]["GET"]["responses"]["modified"]["200"]["content"];
        assert_eq!(content["mediaTypeDeleted"], json!(["application/json"]));
        assert_eq!(content["mediaTypeAdded"], json!(["application/xml"]));
    }

    #[test]
    fn test_swapped_media_type_breaking_only() {
        let (base, revision) = pair("pets");
        let diff = run(&base, &revision, true);

        let operations = &diff["paths"]["modified"]["/pets"]["operations"];
        assert!(operations.get("added").is_none());
        let content = &operations["modified"]["GET"]["responses"]["modified"]["200"]["content"];
        assert_eq!(content["mediaTypeDeleted"], json!(["application/json"]));
        assert!(content.get("mediaTypeAdded").is_none());
    }

    #[test]
    fn test_mutual_cycle_against_itself() {
        let (base, _) = pair("cycle");
        let result = DiffEngine::new().diff(&base, &base).expect("diff");
        assert_eq!(to_json(&result.diff), json!({}));
        assert_eq!(to_json(&result.summary), json!({"diff": false}));
    }

    #[test]
    fn test_mutual_cycle_with_property_change() {
        let (base, revision) = pair("cycle");
        let result = DiffEngine::new().diff(&base, &revision).expect("diff");
        let diff = to_json(&result.diff);

        let schemas = &diff["schemas"]["modified"];
        assert_eq!(schemas["Pet"]["properties"]["added"], json!(["nickname"]));
        assert_eq!(
            schemas["Owner"]["properties"]["modified"]["pet"]["properties"]["added"],
            json!(["nickname"])
        );
        assert_eq!(
            result.summary.details(Category::Schemas),
            Some(&SummaryDetails {
                added: 0,
                deleted: 0,
                modified: 2
            })
        );

        // A new response property is additive.
        assert_eq!(run(&base, &revision, true), json!({}));
    }

    #[test]
    fn test_enum_addition_breaks_responses_only() {
        let (base, revision) = pair("orders");
        let post = |diff: &Value| {
            diff["paths"]["modified"]["/orders"]["operations"]["modified"]["POST"].clone()
        };
        let status =
            |schema: &Value| schema["properties"]["modified"]["status"]["enum"]["added"].clone();

        let full = post(&run(&base, &revision, false));
        let request =
            &full["requestBody"]["content"]["mediaTypeModified"]["application/json"]["schema"];
        let response = &full["responses"]["modified"]["201"]["content"]["mediaTypeModified"]
            ["application/json"]["schema"];
        assert_eq!(status(request), json!(["pending"]));
        assert_eq!(status(response), json!(["pending"]));

        let pruned = post(&run(&base, &revision, true));
        assert!(pruned.get("requestBody").is_none());
        let response = &pruned["responses"]["modified"]["201"]["content"]["mediaTypeModified"]
            ["application/json"]["schema"];
        assert_eq!(status(response), json!(["pending"]));
    }
}

// ============================================================================
// Path selection
// ============================================================================

mod path_selection_tests {
    use super::*;

    const VERSIONED: &str = r#"{
        "openapi": "3.0.3",
        "info": {"title": "versioned", "version": "1"},
        "paths": {
            "/api/v1/pets": {"get": {"responses": {"200": {"description": "ok"}}}},
            "/api/v1/owners": {"get": {"responses": {"200": {"description": "ok"}}}}
        }
    }"#;

    #[test]
    fn test_prefix_and_filter_from_json() {
        let base = parse_spec_str(VERSIONED).expect("parse json");
        let (_, revision) = petstore();

        let options = DiffOptions::new()
            .path_prefix("/api/v1")
            .path_filter("^/pets$")
            .expect("valid filter");
        let result = DiffEngine::new()
            .with_options(options)
            .diff(&base, &revision)
            .expect("diff");

        let paths = result.diff.paths.expect("paths");
        assert!(paths.added.is_empty());
        assert!(paths.deleted.is_empty());
        assert_eq!(paths.modified.keys().collect::<Vec<_>>(), vec!["/pets"]);
    }
}

// ============================================================================
// Reports
// ============================================================================

mod report_tests {
    use super::*;

    #[test]
    fn test_all_formats_render() {
        let (base, revision) = petstore();
        let result = DiffEngine::new().diff(&base, &revision).expect("diff");
        let config = ReportConfig::with_title("Pet Store");

        let yaml = create_reporter_with_options(ReportFormat::Yaml, false)
            .generate_diff_report(&result, &config)
            .expect("yaml");
        let reparsed: Value = serde_yaml::from_str(&yaml).expect("yaml parses");
        assert_eq!(reparsed, to_json(&result.diff));

        let json_report = create_reporter_with_options(ReportFormat::Json, false)
            .generate_diff_report(&result, &config)
            .expect("json");
        let value: Value = serde_json::from_str(&json_report).expect("json parses");
        assert_eq!(value["summary"], to_json(&result.summary));

        let html = create_reporter_with_options(ReportFormat::Html, false)
            .generate_diff_report(&result, &config)
            .expect("html");
        assert!(html.contains("/pets/{petId}"));
        assert!(html.contains("<title>Pet Store</title>"));

        let summary = create_reporter_with_options(ReportFormat::Summary, false)
            .generate_diff_report(&result, &config)
            .expect("summary");
        assert!(summary.contains("- DELETE /pets/{petId}"));
        assert!(summary.contains("+ /owners"));
    }
}
