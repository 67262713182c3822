//! Schema objects and the per-document arena that owns them.

use super::Extensions;
use indexmap::IndexMap;
use serde_json::Value;
use std::ops::Index;

/// Stable handle of a schema node inside one document's [`SchemaArena`].
///
/// Every `$ref` to the same component schema yields the same handle, so a
/// handle pair identifies a comparison independently of schema content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SchemaId(pub(crate) usize);

impl SchemaId {
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// Owns every schema node of a document.
#[derive(Debug, Clone, Default)]
pub struct SchemaArena {
    nodes: Vec<Schema>,
}

impl SchemaArena {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a schema and return its handle.
    pub fn alloc(&mut self, schema: Schema) -> SchemaId {
        self.nodes.push(schema);
        SchemaId(self.nodes.len() - 1)
    }

    /// Reserve a handle to be filled later with [`SchemaArena::set`].
    pub fn reserve(&mut self) -> SchemaId {
        self.alloc(Schema::default())
    }

    /// Replace the node behind a reserved handle.
    pub fn set(&mut self, id: SchemaId, schema: Schema) {
        if let Some(slot) = self.nodes.get_mut(id.0) {
            *slot = schema;
        }
    }

    #[must_use]
    pub fn get(&self, id: SchemaId) -> Option<&Schema> {
        self.nodes.get(id.0)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl Index<SchemaId> for SchemaArena {
    type Output = Schema;

    fn index(&self, id: SchemaId) -> &Schema {
        &self.nodes[id.0]
    }
}

/// `additionalProperties` is either a boolean or a schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AdditionalProperties {
    #[default]
    Unspecified,
    Allowed(bool),
    Schema(SchemaId),
}

impl AdditionalProperties {
    /// Explicit boolean form, if any.
    #[must_use]
    pub const fn allowed(self) -> Option<bool> {
        match self {
            Self::Allowed(allowed) => Some(allowed),
            _ => None,
        }
    }

    #[must_use]
    pub const fn schema(self) -> Option<SchemaId> {
        match self {
            Self::Schema(id) => Some(id),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Discriminator {
    pub property_name: String,
    pub mapping: IndexMap<String, String>,
}

/// A single schema node. Child schemas are arena handles.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schema {
    pub title: Option<String>,
    pub description: Option<String>,
    /// `type`; multiple types (3.1) are joined with `,`
    pub schema_type: Option<String>,
    pub format: Option<String>,
    pub nullable: bool,
    pub read_only: bool,
    pub write_only: bool,
    pub deprecated: bool,
    pub enum_values: Vec<Value>,
    pub default: Option<Value>,
    pub example: Option<Value>,

    pub multiple_of: Option<f64>,
    pub minimum: Option<f64>,
    pub maximum: Option<f64>,
    pub exclusive_minimum: bool,
    pub exclusive_maximum: bool,

    pub min_length: Option<u64>,
    pub max_length: Option<u64>,
    pub pattern: Option<String>,

    pub min_items: Option<u64>,
    pub max_items: Option<u64>,
    pub unique_items: bool,

    pub min_properties: Option<u64>,
    pub max_properties: Option<u64>,
    pub required: Vec<String>,
    pub properties: IndexMap<String, SchemaId>,
    pub additional_properties: AdditionalProperties,
    pub items: Option<SchemaId>,

    pub all_of: Vec<SchemaId>,
    pub one_of: Vec<SchemaId>,
    pub any_of: Vec<SchemaId>,
    pub not: Option<SchemaId>,
    pub discriminator: Option<Discriminator>,

    pub extensions: Extensions,
}
