//! Keyed collection comparison.

use super::{Breaking, Delta, DiffState, Diffable, Direction};
use crate::error::{ErrorContext, Result};
use indexmap::IndexMap;
use serde::Serialize;
use std::collections::BTreeMap;

/// Added keys, deleted keys and per-key deltas for a named collection.
///
/// Key lists are sorted and `modified` is ordered, so serialized output is
/// reproducible regardless of document order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapDiff<D> {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub added: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub deleted: Vec<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub modified: BTreeMap<String, D>,
}

impl<D> Default for MapDiff<D> {
    fn default() -> Self {
        Self {
            added: Vec::new(),
            deleted: Vec::new(),
            modified: BTreeMap::new(),
        }
    }
}

impl<D> Delta for MapDiff<D> {
    fn is_empty(&self) -> bool {
        self.added.is_empty() && self.deleted.is_empty() && self.modified.is_empty()
    }
}

impl<D> MapDiff<D> {
    /// `(added, deleted, modified)` key counts.
    #[must_use]
    pub fn counts(&self) -> (usize, usize, usize) {
        (self.added.len(), self.deleted.len(), self.modified.len())
    }

    /// Apply the common add/delete polarity of a collection: `keep_added`
    /// and `keep_deleted` say whether those key lists are breaking.
    pub fn retain_keys(&mut self, keep_added: bool, keep_deleted: bool) {
        if !keep_added {
            self.added.clear();
        }
        if !keep_deleted {
            self.deleted.clear();
        }
    }
}

impl<D: Breaking + Delta> MapDiff<D> {
    /// Prune every modified entry, dropping those left empty.
    pub fn retain_breaking_modified(&mut self, direction: Direction) {
        self.modified.retain(|_, delta| {
            delta.retain_breaking(direction);
            !delta.is_empty()
        });
    }
}

/// Diff two keyed collections with each value's own [`Diffable`] impl.
///
/// Errors from an element are prefixed with the element's key.
pub fn diff_maps<V: Diffable>(
    base: &IndexMap<String, V>,
    revision: &IndexMap<String, V>,
    state: &mut DiffState<'_>,
) -> Result<MapDiff<V::Delta>> {
    diff_maps_with(base, revision, |b, r| b.diff(r, state))
}

/// Diff two keyed collections with a custom element differ.
pub fn diff_maps_with<V, D, F>(
    base: &IndexMap<String, V>,
    revision: &IndexMap<String, V>,
    mut element: F,
) -> Result<MapDiff<D>>
where
    D: Delta,
    F: FnMut(&V, &V) -> Result<D>,
{
    let mut result = MapDiff::default();

    for (key, base_value) in base {
        match revision.get(key) {
            Some(revision_value) => {
                let delta = element(base_value, revision_value).with_context(|| key.clone())?;
                if !delta.is_empty() {
                    result.modified.insert(key.clone(), delta);
                }
            }
            None => result.deleted.push(key.clone()),
        }
    }

    for key in revision.keys() {
        if !base.contains_key(key) {
            result.added.push(key.clone());
        }
    }

    result.added.sort();
    result.deleted.sort();
    Ok(result)
}
