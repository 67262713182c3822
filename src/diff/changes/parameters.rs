//! Parameter comparison.
//!
//! Parameters are identified by location and name, so a parameter list is
//! indexed by `(in, name)` before diffing. Parameters only travel from
//! client to server and are always pruned as request data.

use super::{
    diff_example, diff_examples, diff_extensions, diff_schema_opt, diff_single_content,
    ExamplesDiff, ExtensionsDiff, SchemaDiff, SingleContentDiff,
};
use crate::diff::{
    diff_value, diff_value_unless, non_empty, retain_breaking_opt, Breaking, Delta, DiffState,
    Diffable, Direction, MapDiff, ValueDiff,
};
use crate::error::{ErrorContext, Result};
use crate::model::{Parameter, ParameterLocation, Referenced};
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};

// ============================================================================
// Single parameter
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterDiff {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extensions: Option<ExtensionsDiff>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<ValueDiff<Option<String>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<ValueDiff<Option<String>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explode: Option<ValueDiff<Option<bool>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_empty_value: Option<ValueDiff<bool>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_reserved: Option<ValueDiff<bool>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deprecated: Option<ValueDiff<bool>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<ValueDiff<bool>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<SchemaDiff>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<SingleContentDiff>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<ValueDiff<Option<Value>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub examples: Option<ExamplesDiff>,
}

impl Delta for ParameterDiff {
    fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl Diffable for Parameter {
    type Delta = ParameterDiff;

    fn diff(&self, revision: &Self, state: &mut DiffState<'_>) -> Result<ParameterDiff> {
        Ok(ParameterDiff {
            extensions: diff_extensions(&self.extensions, &revision.extensions)?,
            description: diff_value_unless(
                state.exclude_description(),
                &self.description,
                &revision.description,
            ),
            style: diff_value(&self.style, &revision.style),
            explode: diff_value(&self.explode, &revision.explode),
            allow_empty_value: diff_value(&self.allow_empty_value, &revision.allow_empty_value),
            allow_reserved: diff_value(&self.allow_reserved, &revision.allow_reserved),
            deprecated: diff_value(&self.deprecated, &revision.deprecated),
            required: diff_value(&self.required, &revision.required),
            schema: diff_schema_opt(state, self.schema, revision.schema)?,
            content: diff_single_content(state, &self.content, &revision.content)?,
            example: diff_example(state, &self.example, &revision.example),
            examples: diff_examples(state, &self.examples, &revision.examples)?,
        })
    }
}

impl Breaking for ParameterDiff {
    /// The given direction is ignored: parameters are request data.
    fn retain_breaking(&mut self, _direction: Direction) {
        let direction = Direction::Request;
        self.extensions = None;
        self.description = None;
        self.deprecated = None;
        self.example = None;
        self.examples = None;
        if self.required.as_ref().is_some_and(|d| !d.to) {
            self.required = None;
        }
        if self
            .allow_empty_value
            .as_ref()
            .is_some_and(|d| !d.is_transition(true, false))
        {
            self.allow_empty_value = None;
        }
        if self
            .allow_reserved
            .as_ref()
            .is_some_and(|d| !d.is_transition(true, false))
        {
            self.allow_reserved = None;
        }
        retain_breaking_opt(&mut self.schema, direction);
        retain_breaking_opt(&mut self.content, direction);
    }
}

/// Component parameters: only changes to a parameter that operations
/// already reference can break them.
impl Breaking for MapDiff<ParameterDiff> {
    fn retain_breaking(&mut self, direction: Direction) {
        self.retain_keys(false, false);
        self.retain_breaking_modified(direction);
    }
}

// ============================================================================
// Parameter lists
// ============================================================================

/// Parameter list delta, grouped by location (`query`, `header`, `path`,
/// `cookie`) and then by parameter name.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ParametersDiff {
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub added: BTreeMap<String, Vec<String>>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub deleted: BTreeMap<String, Vec<String>>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub modified: BTreeMap<String, BTreeMap<String, ParameterDiff>>,
    /// `(location, name)` of added parameters that are required
    #[serde(skip)]
    added_required: BTreeSet<(String, String)>,
}

impl Delta for ParametersDiff {
    fn is_empty(&self) -> bool {
        self.added.is_empty() && self.deleted.is_empty() && self.modified.is_empty()
    }
}

impl ParametersDiff {
    /// `(added, deleted, modified)` parameter counts across locations.
    #[must_use]
    pub fn counts(&self) -> (usize, usize, usize) {
        let count = |map: &BTreeMap<String, Vec<String>>| map.values().map(Vec::len).sum();
        (
            count(&self.added),
            count(&self.deleted),
            self.modified.values().map(BTreeMap::len).sum(),
        )
    }
}

type ParameterIndex<'d> = IndexMap<(ParameterLocation, &'d str), &'d Parameter>;

fn index_parameters(parameters: &[Referenced<Parameter>]) -> Result<ParameterIndex<'_>> {
    let mut index = IndexMap::with_capacity(parameters.len());
    for parameter in parameters {
        let resolved = parameter.resolve()?;
        index.insert((resolved.location, resolved.name.as_str()), resolved);
    }
    Ok(index)
}

fn push_name(map: &mut BTreeMap<String, Vec<String>>, location: ParameterLocation, name: &str) {
    let names = map.entry(location.as_str().to_string()).or_default();
    names.push(name.to_string());
    names.sort();
}

pub fn diff_parameters(
    state: &mut DiffState<'_>,
    base: &[Referenced<Parameter>],
    revision: &[Referenced<Parameter>],
) -> Result<Option<ParametersDiff>> {
    let base = index_parameters(base)?;
    let revision = index_parameters(revision)?;
    let mut result = ParametersDiff::default();

    for (&(location, name), base_parameter) in &base {
        match revision.get(&(location, name)) {
            Some(revision_parameter) => {
                let delta = base_parameter
                    .diff(revision_parameter, state)
                    .with_context(|| format!("{location} parameter {name}"))?;
                if !delta.is_empty() {
                    result
                        .modified
                        .entry(location.as_str().to_string())
                        .or_default()
                        .insert(name.to_string(), delta);
                }
            }
            None => push_name(&mut result.deleted, location, name),
        }
    }

    for (&(location, name), revision_parameter) in &revision {
        if !base.contains_key(&(location, name)) {
            push_name(&mut result.added, location, name);
            if revision_parameter.required {
                result
                    .added_required
                    .insert((location.as_str().to_string(), name.to_string()));
            }
        }
    }

    Ok(non_empty(result))
}

impl Breaking for ParametersDiff {
    fn retain_breaking(&mut self, direction: Direction) {
        self.deleted.clear();

        let required = &self.added_required;
        self.added.retain(|location, names| {
            names.retain(|name| required.contains(&(location.clone(), name.clone())));
            !names.is_empty()
        });

        self.modified.retain(|_, by_name| {
            by_name.retain(|_, delta| {
                delta.retain_breaking(direction);
                !delta.is_empty()
            });
            !by_name.is_empty()
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::DiffOptions;
    use crate::error::{DiffErrorKind, SpecDiffError};
    use crate::model::Document;

    fn param(location: ParameterLocation, name: &str, required: bool) -> Referenced<Parameter> {
        Referenced::inline(Parameter {
            name: name.to_string(),
            location,
            required,
            ..Parameter::default()
        })
    }

    #[test]
    fn test_keyed_by_location_and_name() {
        let options = DiffOptions::default();
        let document = Document::default();
        let mut state = DiffState::new(&options, &document, &document);

        let base = vec![
            param(ParameterLocation::Query, "limit", false),
            param(ParameterLocation::Header, "X-Trace", false),
        ];
        let revision = vec![
            param(ParameterLocation::Query, "limit", true),
            param(ParameterLocation::Query, "X-Trace", true),
        ];

        let diff = diff_parameters(&mut state, &base, &revision)
            .expect("diff")
            .expect("changed");
        assert_eq!(diff.added["query"], vec!["X-Trace".to_string()]);
        assert_eq!(diff.deleted["header"], vec!["X-Trace".to_string()]);
        assert!(diff.modified["query"]["limit"].required.is_some());
        assert_eq!(diff.counts(), (1, 1, 1));
    }

    #[test]
    fn test_breaking_keeps_required_additions_only() {
        let options = DiffOptions::default();
        let document = Document::default();
        let mut state = DiffState::new(&options, &document, &document);

        let base = vec![param(ParameterLocation::Query, "gone", false)];
        let revision = vec![
            param(ParameterLocation::Query, "optional", false),
            param(ParameterLocation::Query, "mandatory", true),
        ];
        let mut diff = diff_parameters(&mut state, &base, &revision)
            .expect("diff")
            .expect("changed");
        diff.retain_breaking(Direction::Unspecified);

        assert!(diff.deleted.is_empty());
        assert_eq!(diff.added["query"], vec!["mandatory".to_string()]);
    }

    #[test]
    fn test_required_relaxation_is_safe() {
        let mut diff = ParameterDiff {
            required: Some(ValueDiff {
                from: true,
                to: false,
            }),
            ..ParameterDiff::default()
        };
        diff.retain_breaking(Direction::Response);
        assert!(diff.is_empty());
    }

    #[test]
    fn test_dangling_parameter_fails() {
        let options = DiffOptions::default();
        let document = Document::default();
        let mut state = DiffState::new(&options, &document, &document);

        let base = vec![Referenced::dangling("#/components/parameters/Missing")];
        let err = diff_parameters(&mut state, &base, &[]).unwrap_err();
        assert!(matches!(
            err,
            SpecDiffError::Diff {
                source: DiffErrorKind::MalformedReference { .. },
                ..
            }
        ));
    }
}
