//! Property-based tests for the diff engine.
//!
//! Generates small documents and checks the algebraic properties every
//! comparison must satisfy: identity, add/delete symmetry when the inputs
//! are swapped, breaking output being a subset of the full output, and the
//! summary agreeing with the delta tree.

use openapi_delta::diff::{Category, Delta, DiffEngine, DiffOptions, DiffResult};
use openapi_delta::parsers::parse_spec_str;
use openapi_delta::Document;
use proptest::prelude::*;
use std::collections::BTreeSet;
use std::fmt::Write;

const PATHS: &[&str] = &["/pets", "/pets/{id}", "/owners", "/store/orders", "/health"];
const METHODS: &[&str] = &["get", "post", "delete"];
const STATUSES: &[&str] = &["available", "pending", "sold", "adopted"];

#[derive(Debug, Clone)]
struct DocSpec {
    operations: BTreeSet<(usize, usize)>,
    statuses: BTreeSet<usize>,
    max_name: Option<u64>,
    name_required: bool,
}

fn doc_spec() -> impl Strategy<Value = DocSpec> {
    (
        prop::collection::btree_set((0..PATHS.len(), 0..METHODS.len()), 0..8),
        prop::collection::btree_set(0..STATUSES.len(), 1..4),
        prop::option::of(1u64..100),
        any::<bool>(),
    )
        .prop_map(|(operations, statuses, max_name, name_required)| DocSpec {
            operations,
            statuses,
            max_name,
            name_required,
        })
}

fn render(spec: &DocSpec) -> String {
    let mut yaml = String::from("openapi: 3.0.3\ninfo:\n  title: generated\n  version: '1'\npaths:\n");
    let mut current: Option<usize> = None;
    for &(path, method) in &spec.operations {
        if current != Some(path) {
            let _ = writeln!(yaml, "  {}:", PATHS[path]);
            current = Some(path);
        }
        let _ = writeln!(yaml, "    {}:", METHODS[method]);
        if METHODS[method] == "post" {
            let _ = writeln!(yaml, "      requestBody:");
            let _ = writeln!(yaml, "        content:");
            let _ = writeln!(yaml, "          application/json:");
            let _ = writeln!(yaml, "            schema: {{$ref: '#/components/schemas/Pet'}}");
        }
        let _ = writeln!(yaml, "      responses:");
        let _ = writeln!(yaml, "        '200':");
        let _ = writeln!(yaml, "          description: ok");
        let _ = writeln!(yaml, "          content:");
        let _ = writeln!(yaml, "            application/json:");
        let _ = writeln!(yaml, "              schema: {{$ref: '#/components/schemas/Pet'}}");
    }
    if spec.operations.is_empty() {
        yaml.push_str("  {}\n");
    }

    yaml.push_str("components:\n  schemas:\n    Pet:\n      type: object\n");
    if spec.name_required {
        yaml.push_str("      required: [name]\n");
    }
    yaml.push_str("      properties:\n        name:\n          type: string\n");
    if let Some(max) = spec.max_name {
        let _ = writeln!(yaml, "          maxLength: {max}");
    }
    yaml.push_str("        status:\n          type: string\n          enum:\n");
    for &status in &spec.statuses {
        let _ = writeln!(yaml, "            - {}", STATUSES[status]);
    }
    yaml.push_str("        parent: {$ref: '#/components/schemas/Pet'}\n");
    yaml
}

fn load(spec: &DocSpec) -> Document {
    parse_spec_str(&render(spec)).expect("generated document parses")
}

fn diff(base: &Document, revision: &Document, breaking_only: bool) -> DiffResult {
    DiffEngine::new()
        .with_options(DiffOptions::new().breaking_only(breaking_only))
        .diff(base, revision)
        .expect("diff")
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn identity_has_no_changes(spec in doc_spec()) {
        let doc = load(&spec);
        let result = diff(&doc, &doc, false);
        prop_assert!(result.diff.is_empty());
        prop_assert!(!result.summary.diff);
    }

    #[test]
    fn swapping_inputs_swaps_path_keys(a in doc_spec(), b in doc_spec()) {
        let (a, b) = (load(&a), load(&b));
        let forward = diff(&a, &b, false);
        let backward = diff(&b, &a, false);

        let forward_paths = forward.diff.paths.clone().unwrap_or_default();
        let backward_paths = backward.diff.paths.clone().unwrap_or_default();
        prop_assert_eq!(&forward_paths.added, &backward_paths.deleted);
        prop_assert_eq!(&forward_paths.deleted, &backward_paths.added);
        prop_assert_eq!(
            forward_paths.modified.keys().collect::<Vec<_>>(),
            backward_paths.modified.keys().collect::<Vec<_>>()
        );
        prop_assert_eq!(forward.has_changes(), backward.has_changes());
    }

    #[test]
    fn breaking_is_subset_of_full(a in doc_spec(), b in doc_spec()) {
        let (a, b) = (load(&a), load(&b));
        let full = diff(&a, &b, false);
        let breaking = diff(&a, &b, true);

        for (category, details) in &breaking.summary.components {
            let full_details = full.summary.details(*category);
            prop_assert!(full_details.is_some(), "{} only in breaking output", category);
            let full_details = full_details.copied().unwrap_or_default();
            prop_assert!(details.added <= full_details.added);
            prop_assert!(details.deleted <= full_details.deleted);
            prop_assert!(details.modified <= full_details.modified);
        }
        prop_assert_eq!(breaking.has_changes(), full.has_breaking_changes());
    }

    #[test]
    fn summary_matches_tree(a in doc_spec(), b in doc_spec()) {
        let (a, b) = (load(&a), load(&b));
        let result = diff(&a, &b, false);

        prop_assert_eq!(result.summary.diff, !result.diff.is_empty());
        let paths = result.summary.details(Category::Paths).copied().unwrap_or_default();
        let tree = result.diff.paths.clone().unwrap_or_default();
        prop_assert_eq!(paths.added, tree.added.len());
        prop_assert_eq!(paths.deleted, tree.deleted.len());
        prop_assert_eq!(paths.modified, tree.modified.len());
    }
}
