//! Document diff engine.

use super::changes::{diff_schema, diff_security_requirements, diff_servers, diff_tags, diff_extensions};
use super::{
    diff_maps, diff_maps_with, diff_value, non_empty, Breaking, DiffOptions, DiffResult,
    DiffState, Diffable, Direction, SpecDiff,
};
use crate::error::{ErrorContext, Result};
use crate::model::{Document, PathItem};
use indexmap::IndexMap;

/// Compares two loaded documents.
///
/// The engine itself holds only options and may be shared; every call to
/// [`DiffEngine::diff`] builds its own state.
#[derive(Debug, Clone, Default)]
pub struct DiffEngine {
    options: DiffOptions,
}

impl DiffEngine {
    /// Create a new diff engine with default settings
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the options
    #[must_use]
    pub fn with_options(mut self, options: DiffOptions) -> Self {
        self.options = options;
        self
    }

    #[must_use]
    pub const fn options(&self) -> &DiffOptions {
        &self.options
    }

    /// Compare `base` with `revision`.
    ///
    /// Fails with a malformed-reference error when a dangling reference
    /// has to be compared; no partial result is returned.
    pub fn diff(&self, base: &Document, revision: &Document) -> Result<DiffResult> {
        tracing::debug!(
            base_paths = base.paths.len(),
            revision_paths = revision.paths.len(),
            "comparing documents"
        );

        let mut state = DiffState::new(&self.options, base, revision);
        let mut diff = self.diff_documents(&mut state, base, revision)?;

        let stats = state.cache_stats();
        tracing::debug!(
            computed = stats.computed,
            hits = stats.hits,
            cycles = stats.cycles,
            "schema comparisons"
        );

        if self.options.breaking_only {
            diff.retain_breaking(Direction::Unspecified);
            tracing::info!("Pruned diff to breaking changes");
        }

        let result = DiffResult::new(diff, self.options.breaking_only);
        tracing::info!(
            categories = result.summary.components.len(),
            "Diff complete"
        );
        Ok(result)
    }

    fn diff_documents(
        &self,
        state: &mut DiffState<'_>,
        base: &Document,
        revision: &Document,
    ) -> Result<SpecDiff> {
        let base_paths = self.select_paths(&base.paths, true);
        let revision_paths = self.select_paths(&revision.paths, false);
        let paths = diff_maps(&base_paths, &revision_paths, state).context("paths")?;

        let schemas = diff_maps_with(&base.components.schemas, &revision.components.schemas, |b, r| {
            diff_schema(state, Some(*b), Some(*r))
        })
        .context("components schemas")?;

        let (bc, rc) = (&base.components, &revision.components);
        Ok(SpecDiff {
            openapi: diff_value(&base.openapi, &revision.openapi),
            info: non_empty(base.info.diff(&revision.info, state)?),
            paths: non_empty(paths),
            tags: diff_tags(state, &base.tags, &revision.tags)?,
            servers: diff_servers(state, &base.servers, &revision.servers).context("servers")?,
            security: diff_security_requirements(&base.security, &revision.security)?,
            extensions: diff_extensions(&base.extensions, &revision.extensions)?,
            schemas: non_empty(schemas),
            parameters: non_empty(
                diff_maps(&bc.parameters, &rc.parameters, state).context("components parameters")?,
            ),
            headers: non_empty(diff_maps(&bc.headers, &rc.headers, state).context("components headers")?),
            request_bodies: non_empty(
                diff_maps(&bc.request_bodies, &rc.request_bodies, state)
                    .context("components requestBodies")?,
            ),
            responses: non_empty(
                diff_maps(&bc.responses, &rc.responses, state).context("components responses")?,
            ),
            security_schemes: non_empty(
                diff_maps(&bc.security_schemes, &rc.security_schemes, state)
                    .context("components securitySchemes")?,
            ),
            callbacks: non_empty(
                diff_maps(&bc.callbacks, &rc.callbacks, state).context("components callbacks")?,
            ),
        })
    }

    /// Paths keyed for comparison: the prefix is stripped from base keys
    /// and the filter applies to the normalized key.
    ///
    /// When stripping makes two base paths collide, the first one in
    /// document order is compared and the other is skipped with a warning.
    fn select_paths<'d>(
        &self,
        paths: &'d IndexMap<String, PathItem>,
        strip_prefix: bool,
    ) -> IndexMap<String, &'d PathItem> {
        let mut selected: IndexMap<String, &PathItem> = IndexMap::with_capacity(paths.len());
        for (path, item) in paths {
            let key = if strip_prefix {
                self.options.normalize_base_path(path)
            } else {
                path.as_str()
            };
            if !self.options.includes_path(key) {
                continue;
            }
            if selected.contains_key(key) {
                tracing::warn!(
                    path = %path,
                    key = %key,
                    "path collides with another path after prefix stripping; skipped"
                );
                continue;
            }
            selected.insert(key.to_string(), item);
        }

        if selected.len() < paths.len() {
            tracing::debug!(
                kept = selected.len(),
                total = paths.len(),
                "path filter applied"
            );
        }
        selected
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::Delta;
    use crate::model::{Method, Operation, Referenced, RequestBody};

    fn document(paths: &[&str]) -> Document {
        let mut doc = Document {
            openapi: "3.0.3".to_string(),
            ..Document::default()
        };
        for path in paths {
            let mut item = PathItem::default();
            item.operations.insert(Method::Get, Operation::default());
            doc.paths.insert((*path).to_string(), item);
        }
        doc
    }

    #[test]
    fn test_identical_documents() {
        let doc = document(&["/pets", "/pets/{id}"]);
        let result = DiffEngine::new().diff(&doc, &doc).expect("diff");
        assert!(!result.has_changes());
        assert!(result.diff.is_empty());
    }

    #[test]
    fn test_prefix_and_filter() {
        let base = document(&["/api/v1/pets", "/api/v1/owners"]);
        let revision = document(&["/pets", "/owners", "/store"]);

        let options = DiffOptions::new()
            .path_prefix("/api/v1")
            .path_filter("^/(pets|store)")
            .expect("valid filter");
        let result = DiffEngine::new()
            .with_options(options)
            .diff(&base, &revision)
            .expect("diff");

        let paths = result.diff.paths.expect("paths changed");
        assert_eq!(paths.added, vec!["/store".to_string()]);
        assert!(paths.deleted.is_empty());
    }

    #[test]
    fn test_prefix_collision_keeps_first_path() {
        let mut base = document(&["/api/v1/pets", "/pets"]);
        if let Some(unprefixed) = base.paths.get_mut("/pets") {
            unprefixed.operations.insert(Method::Post, Operation::default());
        }
        let revision = document(&["/pets"]);

        let result = DiffEngine::new()
            .with_options(DiffOptions::new().path_prefix("/api/v1"))
            .diff(&base, &revision)
            .expect("diff");
        assert!(result.diff.paths.is_none());
    }

    #[test]
    fn test_dangling_reference_aborts() {
        let mut base = document(&[]);
        base.components.request_bodies.insert(
            "Pet".to_string(),
            Referenced::dangling("#/components/requestBodies/Missing"),
        );
        let mut revision = document(&[]);
        revision
            .components
            .request_bodies
            .insert("Pet".to_string(), Referenced::inline(RequestBody::default()));

        let err = DiffEngine::new().diff(&base, &revision).unwrap_err();
        assert!(err.to_string().contains("components requestBodies"));
    }

    #[test]
    fn test_breaking_only_drops_additions() {
        let base = document(&["/pets"]);
        let revision = document(&["/pets", "/owners"]);
        let options = DiffOptions::new().breaking_only(true);
        let result = DiffEngine::new()
            .with_options(options)
            .diff(&base, &revision)
            .expect("diff");
        assert!(!result.has_changes());
        assert!(result.breaking_only);
    }
}
