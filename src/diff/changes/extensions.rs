use crate::diff::{diff_maps_with, non_empty, DiffState, MapDiff, ValueDiff};
use crate::error::Result;
use crate::model::Extensions;
use indexmap::IndexMap;
use serde_json::Value;

/// Changes to `x-*` vendor extensions. Never breaking.
pub type ExtensionsDiff = MapDiff<ValueDiff<Value>>;

/// Changes to a named `examples` map.
pub type ExamplesDiff = MapDiff<ValueDiff<Value>>;

/// Key-wise comparison of two maps of raw JSON values.
pub fn diff_value_map(
    base: &IndexMap<String, Value>,
    revision: &IndexMap<String, Value>,
) -> Result<Option<MapDiff<ValueDiff<Value>>>> {
    let diff = diff_maps_with(base, revision, |from, to| {
        Ok(ValueDiff {
            from: from.clone(),
            to: to.clone(),
        })
    })?;
    Ok(non_empty(diff))
}

pub fn diff_extensions(base: &Extensions, revision: &Extensions) -> Result<Option<ExtensionsDiff>> {
    diff_value_map(base, revision)
}

/// `example` pair, unless examples are excluded.
pub fn diff_example(
    state: &DiffState<'_>,
    base: &Option<Value>,
    revision: &Option<Value>,
) -> Option<ValueDiff<Option<Value>>> {
    crate::diff::diff_value_unless(state.exclude_examples(), base, revision)
}

/// `examples` map, unless examples are excluded.
pub fn diff_examples(
    state: &DiffState<'_>,
    base: &IndexMap<String, Value>,
    revision: &IndexMap<String, Value>,
) -> Result<Option<ExamplesDiff>> {
    if state.exclude_examples() {
        return Ok(None);
    }
    diff_value_map(base, revision)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::DiffOptions;
    use crate::model::Document;
    use serde_json::json;

    #[test]
    fn test_extensions() {
        let mut base = Extensions::new();
        base.insert("x-a".to_string(), json!(1));
        base.insert("x-b".to_string(), json!("same"));
        let mut revision = base.clone();
        revision.insert("x-a".to_string(), json!(2));
        revision.insert("x-c".to_string(), json!(true));

        let diff = diff_extensions(&base, &revision).expect("diff").expect("changed");
        assert_eq!(diff.added, vec!["x-c".to_string()]);
        assert_eq!(diff.modified["x-a"], ValueDiff { from: json!(1), to: json!(2) });
        assert!(!diff.modified.contains_key("x-b"));
        assert!(diff_extensions(&base, &base).expect("diff").is_none());
    }

    #[test]
    fn test_examples_follow_options() {
        let document = Document::default();
        let mut examples = IndexMap::new();
        examples.insert("one".to_string(), json!({"id": 1}));

        let skipped = DiffOptions::default();
        let state = DiffState::new(&skipped, &document, &document);
        assert!(diff_examples(&state, &IndexMap::new(), &examples).expect("diff").is_none());
        assert!(diff_example(&state, &None, &Some(json!(1))).is_none());

        let included = DiffOptions::default().include_examples(true);
        let state = DiffState::new(&included, &document, &document);
        let diff = diff_examples(&state, &IndexMap::new(), &examples).expect("diff").expect("changed");
        assert_eq!(diff.added, vec!["one".to_string()]);
        assert!(diff_example(&state, &None, &Some(json!(1))).is_some());
    }
}
