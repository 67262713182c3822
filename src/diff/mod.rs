//! Structural diff engine for OpenAPI documents.
//!
//! Two loaded [`Document`](crate::model::Document)s are compared element by
//! element into a tree of typed delta records rooted at [`SpecDiff`].
//!
//! # Architecture
//!
//! The diff system is built on three small traits in [`traits`]:
//!
//! - [`Diffable`]: a model element that can be compared with its revision
//! - [`Delta`]: a delta record that knows whether it carries any change
//! - [`Breaking`]: pruning of a delta down to client-breaking changes
//!
//! Element differs live in [`changes`], one file per element family, each
//! next to its breaking rules. Keyed collections go through
//! [`diff_maps`]; schemas go through the per-call [`SchemaDiffCache`] so
//! recursive schema graphs terminate.
//!
//! # Example
//!
//! ```ignore
//! use openapi_delta::diff::{DiffEngine, DiffOptions};
//!
//! let engine = DiffEngine::new().with_options(DiffOptions::new().breaking_only(true));
//! let result = engine.diff(&base, &revision)?;
//! if result.has_changes() {
//!     println!("{} categories changed", result.summary.components.len());
//! }
//! ```

mod cache;
pub mod changes;
mod collection;
mod direction;
mod engine;
mod engine_config;
mod result;
mod state;
mod summary;
pub mod traits;
mod value;

pub use cache::{CacheLookup, CacheStats, SchemaDiffCache, SchemaPair};
pub use changes::SchemaDiff;
pub use collection::{diff_maps, diff_maps_with, MapDiff};
pub use direction::Direction;
pub use engine::DiffEngine;
pub use engine_config::DiffOptions;
pub use result::{ChangeKind, DiffResult, OperationChange, SpecDiff};
pub use state::DiffState;
pub use summary::{Category, Summary, SummaryDetails};
pub use traits::{
    non_empty, retain_breaking_boxed, retain_breaking_opt, Breaking, Delta, Diffable,
};
pub use value::{
    diff_strings, diff_value, diff_value_unless, diff_values, StringsDiff, ValueDiff, ValuesDiff,
};

#[allow(clippy::trivially_copy_pass_by_ref)]
pub(crate) fn is_false(value: &bool) -> bool {
    !*value
}

#[allow(clippy::trivially_copy_pass_by_ref)]
pub(crate) fn is_zero(value: &usize) -> bool {
    *value == 0
}
