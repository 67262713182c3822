use super::{CacheStats, DiffOptions, SchemaDiffCache};
use crate::model::{Document, Schema, SchemaArena, SchemaId, SecurityRequirement};

/// Everything one diff invocation carries down the recursion.
///
/// Owns the schema cache, so a state must not outlive or be shared
/// between [`DiffEngine::diff`](super::DiffEngine::diff) calls.
pub struct DiffState<'a> {
    options: &'a DiffOptions,
    base_schemas: &'a SchemaArena,
    revision_schemas: &'a SchemaArena,
    base_security: &'a [SecurityRequirement],
    revision_security: &'a [SecurityRequirement],
    pub(crate) cache: SchemaDiffCache,
}

impl<'a> DiffState<'a> {
    pub fn new(options: &'a DiffOptions, base: &'a Document, revision: &'a Document) -> Self {
        Self {
            options,
            base_schemas: &base.schemas,
            revision_schemas: &revision.schemas,
            base_security: &base.security,
            revision_security: &revision.security,
            cache: SchemaDiffCache::new(),
        }
    }

    #[must_use]
    pub const fn options(&self) -> &'a DiffOptions {
        self.options
    }

    /// Descriptions are compared unless excluded by the options.
    #[must_use]
    pub const fn exclude_description(&self) -> bool {
        self.options.exclude_description
    }

    /// Examples are ignored unless included by the options.
    #[must_use]
    pub const fn exclude_examples(&self) -> bool {
        !self.options.include_examples
    }

    /// Requirements an operation is bound by on each side.
    ///
    /// An operation without `security` inherits the document-level list.
    /// When neither side declares its own, both inherit and any change is
    /// already reported at the top level, so nothing is compared here.
    pub(crate) fn operation_security<'s>(
        &'s self,
        base: Option<&'s [SecurityRequirement]>,
        revision: Option<&'s [SecurityRequirement]>,
    ) -> (&'s [SecurityRequirement], &'s [SecurityRequirement]) {
        match (base, revision) {
            (None, None) => (&[], &[]),
            (base, revision) => (
                base.unwrap_or(self.base_security),
                revision.unwrap_or(self.revision_security),
            ),
        }
    }

    pub(crate) fn base_schema(&self, id: SchemaId) -> &'a Schema {
        &self.base_schemas[id]
    }

    pub(crate) fn revision_schema(&self, id: SchemaId) -> &'a Schema {
        &self.revision_schemas[id]
    }

    #[must_use]
    pub const fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }
}
