//! Root document, components and shared wrappers.

use super::{Callback, Header, Parameter, PathItem, RequestBody, Response, SchemaArena, SchemaId};
use super::{SecurityRequirement, SecurityScheme};
use crate::error::{Result, SpecDiffError};
use indexmap::IndexMap;
use serde_json::Value;

/// Vendor extensions (`x-*` keys) attached to most objects.
pub type Extensions = IndexMap<String, Value>;

/// A loaded OpenAPI document.
#[derive(Debug, Clone, Default)]
pub struct Document {
    /// Declared `openapi` version string
    pub openapi: String,
    pub info: Info,
    /// Path items keyed by URL template, in document order
    pub paths: IndexMap<String, PathItem>,
    pub components: Components,
    pub tags: Vec<Tag>,
    pub servers: Vec<Server>,
    /// Top-level security requirements (alternatives)
    pub security: Vec<SecurityRequirement>,
    pub extensions: Extensions,
    /// Storage for every schema node in the document
    pub schemas: SchemaArena,
}

impl Document {
    /// Number of operations across all paths.
    #[must_use]
    pub fn operation_count(&self) -> usize {
        self.paths.values().map(|item| item.operations.len()).sum()
    }
}

/// The `info` object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Info {
    pub title: String,
    pub description: Option<String>,
    pub terms_of_service: Option<String>,
    pub version: String,
    pub contact: Option<Value>,
    pub license: Option<Value>,
    pub extensions: Extensions,
}

/// Reusable objects declared under `components`.
#[derive(Debug, Clone, Default)]
pub struct Components {
    pub schemas: IndexMap<String, SchemaId>,
    pub parameters: IndexMap<String, Referenced<Parameter>>,
    pub headers: IndexMap<String, Referenced<Header>>,
    pub request_bodies: IndexMap<String, Referenced<RequestBody>>,
    pub responses: IndexMap<String, Referenced<Response>>,
    pub security_schemes: IndexMap<String, Referenced<SecurityScheme>>,
    pub callbacks: IndexMap<String, Referenced<Callback>>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tag {
    pub name: String,
    pub description: Option<String>,
    pub external_docs: Option<Value>,
    pub extensions: Extensions,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Server {
    pub url: String,
    pub description: Option<String>,
    pub variables: IndexMap<String, ServerVariable>,
    pub extensions: Extensions,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ServerVariable {
    pub default: String,
    pub enum_values: Vec<String>,
    pub description: Option<String>,
    pub extensions: Extensions,
}

/// Object types that may be the target of a `$ref`.
pub trait ReferenceKind {
    /// Human-readable kind used in error messages.
    const KIND: &'static str;
}

/// A possibly-referenced object.
///
/// `reference` records the `$ref` the value came from, if any. `value` is
/// `None` only when the loader could not resolve the reference.
#[derive(Debug, Clone, PartialEq)]
pub struct Referenced<T> {
    pub reference: Option<String>,
    pub value: Option<T>,
}

impl<T> Referenced<T> {
    /// Wrap an inline object.
    pub fn inline(value: T) -> Self {
        Self {
            reference: None,
            value: Some(value),
        }
    }

    /// A reference the loader resolved to `value`.
    pub fn resolved(reference: impl Into<String>, value: T) -> Self {
        Self {
            reference: Some(reference.into()),
            value: Some(value),
        }
    }

    /// A reference with no backing value.
    pub fn dangling(reference: impl Into<String>) -> Self {
        Self {
            reference: Some(reference.into()),
            value: None,
        }
    }

    #[must_use]
    pub fn is_dangling(&self) -> bool {
        self.value.is_none()
    }
}

impl<T: ReferenceKind> Referenced<T> {
    /// Borrow the resolved value, failing with `MalformedReference` if absent.
    pub fn resolve(&self) -> Result<&T> {
        self.value.as_ref().ok_or_else(|| {
            SpecDiffError::malformed_reference(
                T::KIND,
                self.reference.clone().unwrap_or_default(),
            )
        })
    }
}

impl<T: Default> Default for Referenced<T> {
    fn default() -> Self {
        Self::inline(T::default())
    }
}
