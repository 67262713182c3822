//! Schema comparison cache.
//!
//! Schema graphs may be cyclic, so every comparison of a pair of schema
//! nodes goes through this cache keyed by the pair of arena handles:
//!
//! 1. **Miss**: an in-progress marker is installed before recursing.
//! 2. **In-progress hit**: the pair is already being compared further up
//!    the stack; an empty delta is returned, which ends the cycle.
//! 3. **Done hit**: the memoized delta is returned.
//!
//! A cache lives for one [`DiffEngine::diff`](super::DiffEngine::diff) call.

use super::SchemaDiff;
use crate::model::SchemaId;
use std::collections::HashMap;

// ============================================================================
// Cache Key Types
// ============================================================================

/// Identity of one schema comparison: base handle and revision handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SchemaPair {
    pub base: SchemaId,
    pub revision: SchemaId,
}

impl SchemaPair {
    #[must_use]
    pub const fn new(base: SchemaId, revision: SchemaId) -> Self {
        Self { base, revision }
    }
}

// ============================================================================
// Cached Entry
// ============================================================================

#[derive(Debug, Clone)]
enum CacheEntry {
    InProgress,
    Done(SchemaDiff),
}

/// Outcome of a cache lookup.
#[derive(Debug, Clone, PartialEq)]
pub enum CacheLookup {
    /// Not seen yet; the caller must compute and [`SchemaDiffCache::finish`].
    Miss,
    /// Seen on the current recursion path.
    InProgress,
    /// Already computed.
    Done(SchemaDiff),
}

/// Counters for diagnostics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Pairs actually compared
    pub computed: usize,
    /// Lookups answered from a finished entry
    pub hits: usize,
    /// Lookups that short-circuited a cycle
    pub cycles: usize,
}

// ============================================================================
// Cache
// ============================================================================

/// Per-diff memo table for schema comparisons.
#[derive(Debug, Default)]
pub struct SchemaDiffCache {
    entries: HashMap<SchemaPair, CacheEntry>,
    stats: CacheStats,
}

impl SchemaDiffCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a pair, marking it in progress on a miss.
    pub fn begin(&mut self, pair: SchemaPair) -> CacheLookup {
        match self.entries.get(&pair) {
            Some(CacheEntry::InProgress) => {
                self.stats.cycles += 1;
                CacheLookup::InProgress
            }
            Some(CacheEntry::Done(delta)) => {
                self.stats.hits += 1;
                CacheLookup::Done(delta.clone())
            }
            None => {
                self.entries.insert(pair, CacheEntry::InProgress);
                CacheLookup::Miss
            }
        }
    }

    /// Replace the in-progress marker with the final delta.
    pub fn finish(&mut self, pair: SchemaPair, delta: &SchemaDiff) {
        self.stats.computed += 1;
        self.entries.insert(pair, CacheEntry::Done(delta.clone()));
    }

    /// Drop the in-progress marker after a failed comparison, so a later
    /// lookup does not mistake the pair for a cycle.
    pub fn abandon(&mut self, pair: SchemaPair) {
        self.entries.remove(&pair);
    }

    #[must_use]
    pub const fn stats(&self) -> CacheStats {
        self.stats
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
