//! Trait definitions shared by every element differ.
//!
//! Each element type of a document gets its own delta record. Deltas report
//! emptiness through [`Delta`], know how to prune themselves down to
//! client-breaking changes through [`Breaking`], and are produced from a
//! pair of model objects through [`Diffable`].

use super::{DiffState, Direction};
use crate::error::Result;
use crate::model::{ReferenceKind, Referenced};

/// A delta node that may carry no change at all.
pub trait Delta {
    /// True iff every field is in the "no change" state.
    fn is_empty(&self) -> bool;
}

/// Pruning of a delta down to changes that break existing clients.
///
/// Implementations may only clear fields. `direction` tells whether the
/// node sits on the request or response side of an operation.
pub trait Breaking {
    fn retain_breaking(&mut self, direction: Direction);
}

/// A model object that can be compared with its revision.
pub trait Diffable {
    /// The delta record produced by the comparison.
    type Delta: Delta;

    fn diff(&self, revision: &Self, state: &mut DiffState<'_>) -> Result<Self::Delta>;
}

impl<T: Diffable + ?Sized> Diffable for &T {
    type Delta = T::Delta;

    fn diff(&self, revision: &Self, state: &mut DiffState<'_>) -> Result<Self::Delta> {
        (**self).diff(revision, state)
    }
}

/// Both sides must resolve; a dangling reference aborts the whole diff.
impl<T: Diffable + ReferenceKind> Diffable for Referenced<T> {
    type Delta = T::Delta;

    fn diff(&self, revision: &Self, state: &mut DiffState<'_>) -> Result<Self::Delta> {
        let base = self.resolve()?;
        let revision = revision.resolve()?;
        base.diff(revision, state)
    }
}

/// `Some(delta)` unless the delta is empty.
pub fn non_empty<D: Delta>(delta: D) -> Option<D> {
    if delta.is_empty() {
        None
    } else {
        Some(delta)
    }
}

/// Prune an optional child and drop it if pruning emptied it.
pub fn retain_breaking_opt<D: Breaking + Delta>(slot: &mut Option<D>, direction: Direction) {
    if let Some(delta) = slot {
        delta.retain_breaking(direction);
        if delta.is_empty() {
            *slot = None;
        }
    }
}

/// Boxed variant of [`retain_breaking_opt`] for recursive deltas.
pub fn retain_breaking_boxed<D: Breaking + Delta>(slot: &mut Option<Box<D>>, direction: Direction) {
    if let Some(delta) = slot {
        delta.retain_breaking(direction);
        if delta.is_empty() {
            *slot = None;
        }
    }
}

impl<D: Delta> Delta for Option<D> {
    fn is_empty(&self) -> bool {
        self.as_ref().map_or(true, Delta::is_empty)
    }
}

impl<D: Delta> Delta for Box<D> {
    fn is_empty(&self) -> bool {
        (**self).is_empty()
    }
}
