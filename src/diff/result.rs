//! Top-level diff result types.

use super::changes::{
    CallbacksDiff, ExtensionsDiff, HeadersDiff, InfoDiff, ParameterDiff, PathsDiff,
    RequestBodyDiff, ResponsesDiff, SchemaDiff, SecurityRequirementsDiff, SecuritySchemeDiff,
    ServersDiff, TagsDiff,
};
use super::{retain_breaking_opt, Breaking, Delta, Direction, MapDiff, Summary, ValueDiff};
use serde::Serialize;

/// Delta between two whole documents.
///
/// Component collections are flattened to the top level, the way they are
/// reported.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecDiff {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub openapi: Option<ValueDiff<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub info: Option<InfoDiff>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paths: Option<PathsDiff>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<TagsDiff>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub servers: Option<ServersDiff>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub security: Option<SecurityRequirementsDiff>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extensions: Option<ExtensionsDiff>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schemas: Option<MapDiff<SchemaDiff>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<MapDiff<ParameterDiff>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headers: Option<HeadersDiff>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_bodies: Option<MapDiff<RequestBodyDiff>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub responses: Option<ResponsesDiff>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub security_schemes: Option<MapDiff<SecuritySchemeDiff>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub callbacks: Option<CallbacksDiff>,
}

impl Delta for SpecDiff {
    fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl Breaking for SpecDiff {
    /// Components have no direction of their own; parameters and request
    /// bodies are request data, headers and responses response data.
    fn retain_breaking(&mut self, direction: Direction) {
        self.openapi = None;
        self.info = None;
        self.tags = None;
        self.extensions = None;
        retain_breaking_opt(&mut self.paths, direction);
        retain_breaking_opt(&mut self.servers, direction);
        retain_breaking_opt(&mut self.security, direction);
        retain_breaking_opt(&mut self.schemas, direction);
        retain_breaking_opt(&mut self.parameters, Direction::Request);
        retain_breaking_opt(&mut self.headers, Direction::Response);
        retain_breaking_opt(&mut self.request_bodies, Direction::Request);
        retain_breaking_opt(&mut self.responses, Direction::Response);
        retain_breaking_opt(&mut self.security_schemes, direction);
        retain_breaking_opt(&mut self.callbacks, direction);
    }
}

/// Result of comparing two documents.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DiffResult {
    /// The delta tree
    pub diff: SpecDiff,
    /// Per-category counts derived from [`Self::diff`]
    pub summary: Summary,
    /// Whether the delta was pruned to breaking changes
    #[serde(skip)]
    pub breaking_only: bool,
}

impl DiffResult {
    /// Wrap a finished delta, deriving its summary.
    #[must_use]
    pub fn new(diff: SpecDiff, breaking_only: bool) -> Self {
        let summary = Summary::from_diff(&diff);
        Self {
            diff,
            summary,
            breaking_only,
        }
    }

    /// Check if there are any changes
    #[must_use]
    pub fn has_changes(&self) -> bool {
        self.summary.diff
    }

    /// Check if any change would break existing clients.
    #[must_use]
    pub fn has_breaking_changes(&self) -> bool {
        if self.breaking_only {
            return self.has_changes();
        }
        let mut breaking = self.diff.clone();
        breaking.retain_breaking(Direction::Unspecified);
        !breaking.is_empty()
    }

    /// Every path or operation that was added, deleted or modified, in
    /// report order. A modified path without operation changes is listed
    /// once with no method.
    #[must_use]
    pub fn changed_operations(&self) -> Vec<OperationChange> {
        let mut changes = Vec::new();
        let Some(paths) = &self.diff.paths else {
            return changes;
        };
        for path in &paths.added {
            changes.push(OperationChange::new(path, None, ChangeKind::Added));
        }
        for path in &paths.deleted {
            changes.push(OperationChange::new(path, None, ChangeKind::Deleted));
        }
        for (path, item) in &paths.modified {
            let Some(methods) = &item.operations else {
                changes.push(OperationChange::new(path, None, ChangeKind::Modified));
                continue;
            };
            for method in &methods.added {
                changes.push(OperationChange::new(path, Some(method), ChangeKind::Added));
            }
            for method in &methods.deleted {
                changes.push(OperationChange::new(path, Some(method), ChangeKind::Deleted));
            }
            for method in methods.modified.keys() {
                changes.push(OperationChange::new(path, Some(method), ChangeKind::Modified));
            }
        }
        changes
    }
}

/// Kind of change to a keyed entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    Added,
    Deleted,
    Modified,
}

impl ChangeKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Added => "added",
            Self::Deleted => "deleted",
            Self::Modified => "modified",
        }
    }
}

/// One line of the endpoint overview used by the text reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OperationChange {
    pub path: String,
    pub method: Option<String>,
    pub kind: ChangeKind,
}

impl OperationChange {
    fn new(path: &str, method: Option<&String>, kind: ChangeKind) -> Self {
        Self {
            path: path.to_string(),
            method: method.cloned(),
            kind,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::changes::{OperationDiff, PathItemDiff};

    fn paths_diff(added: &[&str], deleted: &[&str]) -> SpecDiff {
        let mut paths = MapDiff::<PathItemDiff>::default();
        paths.added = added.iter().map(ToString::to_string).collect();
        paths.deleted = deleted.iter().map(ToString::to_string).collect();
        SpecDiff {
            paths: Some(paths),
            ..SpecDiff::default()
        }
    }

    #[test]
    fn test_breaking_detection() {
        let additive = DiffResult::new(paths_diff(&["/owners"], &[]), false);
        assert!(additive.has_changes());
        assert!(!additive.has_breaking_changes());

        let removal = DiffResult::new(paths_diff(&[], &["/pets"]), false);
        assert!(removal.has_breaking_changes());
    }

    #[test]
    fn test_changed_operations_order() {
        let mut operations = MapDiff::<OperationDiff>::default();
        operations.added.push("POST".to_string());
        operations
            .modified
            .insert("GET".to_string(), OperationDiff::default());
        let mut diff = paths_diff(&["/owners"], &[]);
        if let Some(paths) = diff.paths.as_mut() {
            paths.modified.insert(
                "/pets".to_string(),
                PathItemDiff {
                    operations: Some(operations),
                    ..PathItemDiff::default()
                },
            );
        }

        let changes = DiffResult::new(diff, false).changed_operations();
        let rendered: Vec<_> = changes
            .iter()
            .map(|c| {
                format!(
                    "{} {} {}",
                    c.kind.as_str(),
                    c.method.as_deref().unwrap_or("*"),
                    c.path
                )
            })
            .collect();
        assert_eq!(
            rendered,
            vec!["added * /owners", "added POST /pets", "modified GET /pets"]
        );
    }
}
