//! Security requirements and security schemes.

use super::{diff_extensions, ExtensionsDiff};
use crate::diff::{
    diff_maps, diff_maps_with, diff_strings, diff_value, diff_value_unless, non_empty, Breaking,
    Delta, DiffState, Diffable, Direction, MapDiff, StringsDiff, ValueDiff,
};
use crate::error::Result;
use crate::model::{OAuthFlow, SecurityRequirement, SecurityScheme};
use indexmap::IndexMap;
use serde::Serialize;
use std::collections::BTreeMap;

/// Key used for the empty requirement `{}` (anonymous access).
pub const ANONYMOUS_REQUIREMENT: &str = "{}";

// ============================================================================
// Security requirements
// ============================================================================

/// Scope changes per scheme within one requirement.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SecurityScopesDiff(pub BTreeMap<String, StringsDiff>);

impl Delta for SecurityScopesDiff {
    fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Alternatives of a security requirement list.
///
/// Each alternative is keyed by its scheme names, sorted and joined with
/// `" AND "`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SecurityRequirementsDiff {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub added: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub deleted: Vec<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub modified: BTreeMap<String, SecurityScopesDiff>,
    #[serde(skip)]
    base_empty: bool,
}

impl Delta for SecurityRequirementsDiff {
    fn is_empty(&self) -> bool {
        self.added.is_empty() && self.deleted.is_empty() && self.modified.is_empty()
    }
}

impl SecurityRequirementsDiff {
    #[must_use]
    pub fn counts(&self) -> (usize, usize, usize) {
        (self.added.len(), self.deleted.len(), self.modified.len())
    }
}

/// Identity of one alternative.
#[must_use]
pub fn requirement_key(requirement: &SecurityRequirement) -> String {
    if requirement.is_empty() {
        return ANONYMOUS_REQUIREMENT.to_string();
    }
    let mut names: Vec<&str> = requirement.keys().map(String::as_str).collect();
    names.sort_unstable();
    names.join(" AND ")
}

fn index_requirements(requirements: &[SecurityRequirement]) -> IndexMap<String, &SecurityRequirement> {
    requirements
        .iter()
        .map(|requirement| (requirement_key(requirement), requirement))
        .collect()
}

fn diff_scopes(base: &SecurityRequirement, revision: &SecurityRequirement) -> SecurityScopesDiff {
    let mut scopes = BTreeMap::new();
    for (scheme, base_scopes) in base {
        if let Some(revision_scopes) = revision.get(scheme) {
            if let Some(diff) = diff_strings(base_scopes, revision_scopes) {
                scopes.insert(scheme.clone(), diff);
            }
        }
    }
    SecurityScopesDiff(scopes)
}

pub fn diff_security_requirements(
    base: &[SecurityRequirement],
    revision: &[SecurityRequirement],
) -> Result<Option<SecurityRequirementsDiff>> {
    let base_index = index_requirements(base);
    let revision_index = index_requirements(revision);
    let keyed = diff_maps_with(&base_index, &revision_index, |b, r| Ok(diff_scopes(b, r)))?;
    Ok(non_empty(SecurityRequirementsDiff {
        added: keyed.added,
        deleted: keyed.deleted,
        modified: keyed.modified,
        base_empty: base.is_empty(),
    }))
}

impl Breaking for SecurityRequirementsDiff {
    fn retain_breaking(&mut self, _direction: Direction) {
        // New alternatives give clients more options, unless the operation
        // previously had none and was open.
        if !self.base_empty {
            self.added.clear();
        }
        self.modified.retain(|_, scopes| {
            scopes.0.retain(|_, diff| {
                diff.deleted.clear();
                !diff.is_empty()
            });
            !scopes.is_empty()
        });
    }
}

// ============================================================================
// Security schemes
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OAuthFlowDiff {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authorization_url: Option<ValueDiff<Option<String>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_url: Option<ValueDiff<Option<String>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_url: Option<ValueDiff<Option<String>>>,
    /// Scope name to scope description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scopes: Option<MapDiff<ValueDiff<String>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extensions: Option<ExtensionsDiff>,
}

impl Delta for OAuthFlowDiff {
    fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl Diffable for OAuthFlow {
    type Delta = OAuthFlowDiff;

    fn diff(&self, revision: &Self, _state: &mut DiffState<'_>) -> Result<OAuthFlowDiff> {
        let scopes = diff_maps_with(&self.scopes, &revision.scopes, |from, to| {
            Ok(ValueDiff {
                from: from.clone(),
                to: to.clone(),
            })
        })?;
        Ok(OAuthFlowDiff {
            authorization_url: diff_value(&self.authorization_url, &revision.authorization_url),
            token_url: diff_value(&self.token_url, &revision.token_url),
            refresh_url: diff_value(&self.refresh_url, &revision.refresh_url),
            scopes: non_empty(scopes),
            extensions: diff_extensions(&self.extensions, &revision.extensions)?,
        })
    }
}

impl Breaking for OAuthFlowDiff {
    fn retain_breaking(&mut self, _direction: Direction) {
        self.extensions = None;
        if let Some(scopes) = &mut self.scopes {
            scopes.added.clear();
            scopes.modified.clear();
            if scopes.is_empty() {
                self.scopes = None;
            }
        }
    }
}

/// Removed flows break clients that use them.
impl Breaking for MapDiff<OAuthFlowDiff> {
    fn retain_breaking(&mut self, direction: Direction) {
        self.retain_keys(false, true);
        self.retain_breaking_modified(direction);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SecuritySchemeDiff {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub scheme_type: Option<ValueDiff<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<ValueDiff<Option<String>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<ValueDiff<Option<String>>>,
    #[serde(rename = "in", skip_serializing_if = "Option::is_none")]
    pub location: Option<ValueDiff<Option<String>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheme: Option<ValueDiff<Option<String>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bearer_format: Option<ValueDiff<Option<String>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub open_id_connect_url: Option<ValueDiff<Option<String>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flows: Option<MapDiff<OAuthFlowDiff>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extensions: Option<ExtensionsDiff>,
}

impl Delta for SecuritySchemeDiff {
    fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl Diffable for SecurityScheme {
    type Delta = SecuritySchemeDiff;

    fn diff(&self, revision: &Self, state: &mut DiffState<'_>) -> Result<SecuritySchemeDiff> {
        Ok(SecuritySchemeDiff {
            scheme_type: diff_value(&self.scheme_type, &revision.scheme_type),
            description: diff_value_unless(
                state.exclude_description(),
                &self.description,
                &revision.description,
            ),
            name: diff_value(&self.name, &revision.name),
            location: diff_value(&self.location, &revision.location),
            scheme: diff_value(&self.scheme, &revision.scheme),
            bearer_format: diff_value(&self.bearer_format, &revision.bearer_format),
            open_id_connect_url: diff_value(&self.open_id_connect_url, &revision.open_id_connect_url),
            flows: non_empty(diff_maps(&self.flows, &revision.flows, state)?),
            extensions: diff_extensions(&self.extensions, &revision.extensions)?,
        })
    }
}

impl Breaking for SecuritySchemeDiff {
    fn retain_breaking(&mut self, direction: Direction) {
        self.description = None;
        self.bearer_format = None;
        self.extensions = None;
        crate::diff::retain_breaking_opt(&mut self.flows, direction);
    }
}

impl Breaking for MapDiff<SecuritySchemeDiff> {
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

    fn requirement(entries: &[(&str, &[&str])]) -> SecurityRequirement {
        entries
            .iter()
            .map(|(name, scopes)| {
                (
                    (*name).to_string(),
                    scopes.iter().map(ToString::to_string).collect(),
                )
            })
            .collect()
    }

    #[test]
    fn test_requirement_key_is_order_independent() {
        let a = requirement(&[("oauth", &[]), ("apiKey", &[])]);
        let b = requirement(&[("apiKey", &[]), ("oauth", &[])]);
        assert_eq!(requirement_key(&a), "apiKey AND oauth");
        assert_eq!(requirement_key(&a), requirement_key(&b));
        assert_eq!(requirement_key(&SecurityRequirement::new()), ANONYMOUS_REQUIREMENT);
    }

    #[test]
    fn test_requirements_diff() {
        let base = vec![
            requirement(&[("oauth", &["read", "write"])]),
            requirement(&[("basic", &[])]),
        ];
        let revision = vec![
            requirement(&[("oauth", &["read", "admin"])]),
            requirement(&[("apiKey", &[])]),
        ];
        let mut diff = diff_security_requirements(&base, &revision)
            .expect("diff")
            .expect("changed");
        assert_eq!(diff.added, vec!["apiKey".to_string()]);
        assert_eq!(diff.deleted, vec!["basic".to_string()]);
        let scopes = &diff.modified["oauth"].0["oauth"];
        assert_eq!(scopes.added, vec!["admin".to_string()]);
        assert_eq!(scopes.deleted, vec!["write".to_string()]);

        diff.retain_breaking(Direction::Unspecified);
        assert!(diff.added.is_empty());
        assert_eq!(diff.deleted, vec!["basic".to_string()]);
        let scopes = &diff.modified["oauth"].0["oauth"];
        assert_eq!(scopes.added, vec!["admin".to_string()]);
        assert!(scopes.deleted.is_empty());
    }

    #[test]
    fn test_securing_an_open_operation_breaks() {
        let revision = vec![requirement(&[("apiKey", &[])])];
        let mut diff = diff_security_requirements(&[], &revision)
            .expect("diff")
            .expect("changed");
        diff.retain_breaking(Direction::Unspecified);
        assert_eq!(diff.added, vec!["apiKey".to_string()]);
    }

    #[test]
    fn test_scheme_structure() {
        let options = DiffOptions::default();
        let document = Document::default();
        let mut state = DiffState::new(&options, &document, &document);

        let base = SecurityScheme {
            scheme_type: "apiKey".to_string(),
            name: Some("X-Key".to_string()),
            location: Some("header".to_string()),
            description: Some("old".to_string()),
            ..SecurityScheme::default()
        };
        let revision = SecurityScheme {
            name: Some("X-Api-Key".to_string()),
            description: Some("new".to_string()),
            ..base.clone()
        };
        let mut diff = base.diff(&revision, &mut state).expect("diff");
        assert!(diff.description.is_some());
        diff.retain_breaking(Direction::Unspecified);
        assert!(diff.description.is_none());
        assert!(diff.name.is_some());
    }
}
