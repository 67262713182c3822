//! Per-category change counts derived from a [`SpecDiff`].

use super::{is_zero, Delta, MapDiff, SpecDiff};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// A top-level category of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Category {
    Info,
    Paths,
    Security,
    Servers,
    Tags,
    Schemas,
    Parameters,
    Headers,
    RequestBodies,
    Responses,
    SecuritySchemes,
    Callbacks,
    Extensions,
}

impl Category {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Paths => "paths",
            Self::Security => "security",
            Self::Servers => "servers",
            Self::Tags => "tags",
            Self::Schemas => "schemas",
            Self::Parameters => "parameters",
            Self::Headers => "headers",
            Self::RequestBodies => "requestBodies",
            Self::Responses => "responses",
            Self::SecuritySchemes => "securitySchemes",
            Self::Callbacks => "callbacks",
            Self::Extensions => "extensions",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Key counts for one category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SummaryDetails {
    #[serde(skip_serializing_if = "is_zero")]
    pub added: usize,
    #[serde(skip_serializing_if = "is_zero")]
    pub deleted: usize,
    #[serde(skip_serializing_if = "is_zero")]
    pub modified: usize,
}

impl SummaryDetails {
    #[must_use]
    pub const fn total(&self) -> usize {
        self.added + self.deleted + self.modified
    }
}

impl From<(usize, usize, usize)> for SummaryDetails {
    fn from((added, deleted, modified): (usize, usize, usize)) -> Self {
        Self {
            added,
            deleted,
            modified,
        }
    }
}

/// Summary of a diff. Categories without changes are absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    /// True iff the delta tree carries any change, including the
    /// uncounted `openapi` version
    pub diff: bool,
    #[serde(rename = "details", skip_serializing_if = "BTreeMap::is_empty")]
    pub components: BTreeMap<Category, SummaryDetails>,
}

impl Summary {
    /// Derive the summary from a delta tree.
    #[must_use]
    pub fn from_diff(diff: &SpecDiff) -> Self {
        let mut summary = Self::default();

        if diff.info.as_ref().is_some_and(|info| !info.is_empty()) {
            summary.record(Category::Info, (0, 0, 1));
        }
        summary.record_map(Category::Paths, diff.paths.as_ref());
        if let Some(security) = &diff.security {
            summary.record(Category::Security, security.counts());
        }
        summary.record_map(Category::Servers, diff.servers.as_ref());
        summary.record_map(Category::Tags, diff.tags.as_ref());
        summary.record_map(Category::Schemas, diff.schemas.as_ref());
        summary.record_map(Category::Parameters, diff.parameters.as_ref());
        summary.record_map(Category::Headers, diff.headers.as_ref());
        summary.record_map(Category::RequestBodies, diff.request_bodies.as_ref());
        summary.record_map(Category::Responses, diff.responses.as_ref());
        summary.record_map(Category::SecuritySchemes, diff.security_schemes.as_ref());
        summary.record_map(Category::Callbacks, diff.callbacks.as_ref());
        summary.record_map(Category::Extensions, diff.extensions.as_ref());

        summary.diff = !diff.is_empty();
        summary
    }

    /// Counts for a category, if it changed.
    #[must_use]
    pub fn details(&self, category: Category) -> Option<&SummaryDetails> {
        self.components.get(&category)
    }

    fn record_map<D>(&mut self, category: Category, diff: Option<&MapDiff<D>>) {
        if let Some(diff) = diff {
            self.record(category, diff.counts());
        }
    }

    fn record(&mut self, category: Category, counts: (usize, usize, usize)) {
        let details = SummaryDetails::from(counts);
        if details.total() > 0 {
            self.components.insert(category, details);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::changes::{InfoDiff, PathItemDiff};
    use crate::diff::ValueDiff;

    #[test]
    fn test_empty_diff() {
        let summary = Summary::from_diff(&SpecDiff::default());
        assert!(!summary.diff);
        assert!(summary.components.is_empty());
    }

    #[test]
    fn test_counts_match_key_sets() {
        let mut paths = MapDiff::<PathItemDiff>::default();
        paths.added.push("/owners".to_string());
        paths.deleted.push("/pets/{id}".to_string());
        paths.deleted.push("/store".to_string());

        let diff = SpecDiff {
            paths: Some(paths),
            info: Some(InfoDiff {
                version: Some(ValueDiff {
                    from: "1".to_string(),
                    to: "2".to_string(),
                }),
                ..InfoDiff::default()
            }),
            ..SpecDiff::default()
        };
        let summary = Summary::from_diff(&diff);
        assert!(summary.diff);
        assert_eq!(
            summary.details(Category::Paths),
            Some(&SummaryDetails {
                added: 1,
                deleted: 2,
                modified: 0
            })
        );
        assert_eq!(summary.details(Category::Info).map(|d| d.modified), Some(1));
        assert!(summary.details(Category::Schemas).is_none());
    }

    #[test]
    fn test_version_only_change_counts_as_diff() {
        let diff = SpecDiff {
            openapi: Some(ValueDiff {
                from: "3.0.3".to_string(),
                to: "3.0.0".to_string(),
            }),
            ..SpecDiff::default()
        };
        let summary = Summary::from_diff(&diff);
        assert!(summary.diff);
        assert!(summary.components.is_empty());
    }

    #[test]
    fn test_serialized_shape() {
        let mut paths = MapDiff::<PathItemDiff>::default();
        paths.added.push("/owners".to_string());
        let summary = Summary::from_diff(&SpecDiff {
            paths: Some(paths),
            ..SpecDiff::default()
        });
        let json = serde_json::to_value(&summary).expect("serialize");
        assert_eq!(
            json,
            serde_json::json!({"diff": true, "details": {"paths": {"added": 1}}})
        );
    }
}
