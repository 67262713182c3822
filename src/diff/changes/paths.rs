//! Paths, path items, operations and callbacks.

use super::{
    diff_extensions, diff_parameters, diff_request_body, diff_security_requirements,
    diff_servers, ExtensionsDiff, ParametersDiff, RequestBodyDiff, ResponsesDiff,
    SecurityRequirementsDiff, ServersDiff,
};
use crate::diff::{
    diff_maps, diff_strings, diff_value, diff_value_unless, non_empty, retain_breaking_opt,
    Breaking, Delta, DiffState, Diffable, Direction, MapDiff, StringsDiff, ValueDiff,
};
use crate::error::Result;
use crate::model::{Callback, Method, Operation, PathItem};
use indexmap::IndexMap;
use serde::Serialize;

/// Path items keyed by path template.
pub type PathsDiff = MapDiff<PathItemDiff>;

/// Callbacks keyed by callback name; each callback is a map of runtime
/// expressions to path items.
pub type CallbacksDiff = MapDiff<PathsDiff>;

/// Operations keyed by upper-case HTTP method.
pub type OperationsDiff = MapDiff<OperationDiff>;

// ============================================================================
// Operation
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationDiff {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extensions: Option<ExtensionsDiff>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<StringsDiff>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<ValueDiff<Option<String>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<ValueDiff<Option<String>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operation_id: Option<ValueDiff<Option<String>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<ParametersDiff>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_body: Option<RequestBodyDiff>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub responses: Option<ResponsesDiff>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub callbacks: Option<CallbacksDiff>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deprecated: Option<ValueDiff<bool>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub security: Option<SecurityRequirementsDiff>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub servers: Option<ServersDiff>,
}

impl Delta for OperationDiff {
    fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl Diffable for Operation {
    type Delta = OperationDiff;

    fn diff(&self, revision: &Self, state: &mut DiffState<'_>) -> Result<OperationDiff> {
        let exclude_description = state.exclude_description();
        Ok(OperationDiff {
            extensions: diff_extensions(&self.extensions, &revision.extensions)?,
            tags: diff_strings(&self.tags, &revision.tags),
            summary: diff_value_unless(exclude_description, &self.summary, &revision.summary),
            description: diff_value_unless(
                exclude_description,
                &self.description,
                &revision.description,
            ),
            operation_id: diff_value(&self.operation_id, &revision.operation_id),
            parameters: diff_parameters(state, &self.parameters, &revision.parameters)?,
            request_body: diff_request_body(
                state,
                self.request_body.as_ref(),
                revision.request_body.as_ref(),
            )?,
            responses: non_empty(diff_maps(&self.responses, &revision.responses, state)?),
            callbacks: non_empty(diff_maps(&self.callbacks, &revision.callbacks, state)?),
            deprecated: diff_value(&self.deprecated, &revision.deprecated),
            security: {
                let (base_security, revision_security) = state
                    .operation_security(self.security.as_deref(), revision.security.as_deref());
                diff_security_requirements(base_security, revision_security)?
            },
            servers: diff_servers(state, &self.servers, &revision.servers)?,
        })
    }
}

impl Breaking for OperationDiff {
    fn retain_breaking(&mut self, direction: Direction) {
        self.extensions = None;
        self.tags = None;
        self.summary = None;
        self.description = None;
        self.operation_id = None;
        self.deprecated = None;
        retain_breaking_opt(&mut self.parameters, Direction::Request);
        retain_breaking_opt(&mut self.request_body, Direction::Request);
        retain_breaking_opt(&mut self.responses, Direction::Response);
        retain_breaking_opt(&mut self.callbacks, direction);
        retain_breaking_opt(&mut self.security, direction);
        retain_breaking_opt(&mut self.servers, direction);
    }
}

impl Breaking for OperationsDiff {
    fn retain_breaking(&mut self, direction: Direction) {
        self.retain_keys(false, true);
        self.retain_breaking_modified(direction);
    }
}

fn index_operations(operations: &IndexMap<Method, Operation>) -> IndexMap<String, &Operation> {
    operations
        .iter()
        .map(|(method, operation)| (method.as_str().to_string(), operation))
        .collect()
}

// ============================================================================
// Path item
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PathItemDiff {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extensions: Option<ExtensionsDiff>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<ValueDiff<Option<String>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<ValueDiff<Option<String>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operations: Option<OperationsDiff>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<ParametersDiff>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub servers: Option<ServersDiff>,
}

impl Delta for PathItemDiff {
    fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl Diffable for PathItem {
    type Delta = PathItemDiff;

    fn diff(&self, revision: &Self, state: &mut DiffState<'_>) -> Result<PathItemDiff> {
        let exclude_description = state.exclude_description();
        let operations = diff_maps(
            &index_operations(&self.operations),
            &index_operations(&revision.operations),
            state,
        )?;
        Ok(PathItemDiff {
            extensions: diff_extensions(&self.extensions, &revision.extensions)?,
            summary: diff_value_unless(exclude_description, &self.summary, &revision.summary),
            description: diff_value_unless(
                exclude_description,
                &self.description,
                &revision.description,
            ),
            operations: non_empty(operations),
            parameters: diff_parameters(state, &self.parameters, &revision.parameters)?,
            servers: diff_servers(state, &self.servers, &revision.servers)?,
        })
    }
}

impl Breaking for PathItemDiff {
    fn retain_breaking(&mut self, direction: Direction) {
        self.extensions = None;
        self.summary = None;
        self.description = None;
        retain_breaking_opt(&mut self.operations, direction);
        retain_breaking_opt(&mut self.parameters, Direction::Request);
        retain_breaking_opt(&mut self.servers, direction);
    }
}

/// New endpoints are additive; a removed endpoint breaks its callers.
impl Breaking for PathsDiff {
    fn retain_breaking(&mut self, direction: Direction) {
        self.retain_keys(false, true);
        self.retain_breaking_modified(direction);
    }
}

// ============================================================================
// Callbacks
// ============================================================================

impl Diffable for Callback {
    type Delta = PathsDiff;

    fn diff(&self, revision: &Self, state: &mut DiffState<'_>) -> Result<PathsDiff> {
        diff_maps(&self.expressions, &revision.expressions, state)
    }
}

/// Callback requests flow from server to client; they are pruned with
/// the same rules as top-level paths.
impl Breaking for CallbacksDiff {
    fn retain_breaking(&mut self, direction: Direction) {
        self.retain_keys(false, true);
        self.retain_breaking_modified(direction);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::DiffOptions;
    use crate::model::Document;

    fn path_item(methods: &[Method]) -> PathItem {
        let mut item = PathItem::default();
        for method in methods {
            item.operations.insert(*method, Operation::default());
        }
        item
    }

    #[test]
    fn test_operations_keyed_by_method() {
        let options = DiffOptions::default();
        let document = Document::default();
        let mut state = DiffState::new(&options, &document, &document);

        let base = path_item(&[Method::Get, Method::Delete]);
        let revision = path_item(&[Method::Get, Method::Post]);
        let mut diff = base.diff(&revision, &mut state).expect("diff");

        let operations = diff.operations.as_ref().expect("operations changed");
        assert_eq!(operations.added, vec!["POST".to_string()]);
        assert_eq!(operations.deleted, vec!["DELETE".to_string()]);

        diff.retain_breaking(Direction::Unspecified);
        let operations = diff.operations.expect("deletion kept");
        assert!(operations.added.is_empty());
        assert_eq!(operations.deleted, vec!["DELETE".to_string()]);
    }

    #[test]
    fn test_documentation_changes_are_not_breaking() {
        let options = DiffOptions::default();
        let document = Document::default();
        let mut state = DiffState::new(&options, &document, &document);

        let base = Operation {
            summary: Some("List pets".to_string()),
            operation_id: Some("listPets".to_string()),
            tags: vec!["pets".to_string()],
            ..Operation::default()
        };
        let revision = Operation {
            summary: Some("List all pets".to_string()),
            operation_id: Some("getPets".to_string()),
            tags: vec!["animals".to_string()],
            deprecated: true,
            ..Operation::default()
        };
        let mut diff = base.diff(&revision, &mut state).expect("diff");
        assert!(diff.summary.is_some());
        assert!(diff.tags.is_some());
        diff.retain_breaking(Direction::Unspecified);
        assert!(diff.is_empty());
    }

    #[test]
    fn test_operation_without_security_inherits_global() {
        let options = DiffOptions::default();
        let mut oauth = crate::model::SecurityRequirement::new();
        oauth.insert("oauth".to_string(), vec!["read".to_string()]);
        let base_doc = Document {
            security: vec![oauth.clone()],
            ..Document::default()
        };
        let revision_doc = base_doc.clone();
        let mut state = DiffState::new(&options, &base_doc, &revision_doc);

        let public = Operation {
            security: Some(Vec::new()),
            ..Operation::default()
        };
        let inheriting = Operation::default();
        let mut diff = public.diff(&inheriting, &mut state).expect("diff");
        diff.retain_breaking(Direction::Unspecified);
        let security = diff.security.expect("operation became protected");
        assert_eq!(security.added, vec!["oauth".to_string()]);

        let diff = inheriting.diff(&inheriting, &mut state).expect("diff");
        assert!(diff.is_empty());
    }
}
