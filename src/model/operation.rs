//! Path items, operations and the objects hanging off them.

use super::{Extensions, Referenced, ReferenceKind, SchemaId, SecurityRequirement, Server};
use indexmap::IndexMap;
use serde_json::Value;
use std::fmt;

/// HTTP methods an OpenAPI path item may declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Method {
    Get,
    Put,
    Post,
    Delete,
    Options,
    Head,
    Patch,
    Trace,
}

impl Method {
    pub const ALL: [Self; 8] = [
        Self::Get,
        Self::Put,
        Self::Post,
        Self::Delete,
        Self::Options,
        Self::Head,
        Self::Patch,
        Self::Trace,
    ];

    /// Upper-case method name, as used for delta keys.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Put => "PUT",
            Self::Post => "POST",
            Self::Delete => "DELETE",
            Self::Options => "OPTIONS",
            Self::Head => "HEAD",
            Self::Patch => "PATCH",
            Self::Trace => "TRACE",
        }
    }

    /// Lower-case key used in documents.
    #[must_use]
    pub const fn document_key(self) -> &'static str {
        match self {
            Self::Get => "get",
            Self::Put => "put",
            Self::Post => "post",
            Self::Delete => "delete",
            Self::Options => "options",
            Self::Head => "head",
            Self::Patch => "patch",
            Self::Trace => "trace",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PathItem {
    pub summary: Option<String>,
    pub description: Option<String>,
    pub operations: IndexMap<Method, Operation>,
    pub parameters: Vec<Referenced<Parameter>>,
    pub servers: Vec<Server>,
    pub extensions: Extensions,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Operation {
    pub tags: Vec<String>,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub operation_id: Option<String>,
    pub parameters: Vec<Referenced<Parameter>>,
    pub request_body: Option<Referenced<RequestBody>>,
    /// Keyed by status code or `default`
    pub responses: IndexMap<String, Referenced<Response>>,
    pub callbacks: IndexMap<String, Referenced<Callback>>,
    /// `None` inherits the document-level requirements
    pub security: Option<Vec<SecurityRequirement>>,
    pub servers: Vec<Server>,
    pub deprecated: bool,
    pub extensions: Extensions,
}

/// Where a parameter is carried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum ParameterLocation {
    #[default]
    Query,
    Header,
    Path,
    Cookie,
}

impl ParameterLocation {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Query => "query",
            Self::Header => "header",
            Self::Path => "path",
            Self::Cookie => "cookie",
        }
    }

    /// Parse the `in` field of a parameter.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "query" => Some(Self::Query),
            "header" => Some(Self::Header),
            "path" => Some(Self::Path),
            "cookie" => Some(Self::Cookie),
            _ => None,
        }
    }
}

impl fmt::Display for ParameterLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Parameter {
    pub name: String,
    pub location: ParameterLocation,
    pub description: Option<String>,
    pub style: Option<String>,
    pub explode: Option<bool>,
    pub required: bool,
    pub deprecated: bool,
    pub allow_empty_value: bool,
    pub allow_reserved: bool,
    pub schema: Option<SchemaId>,
    /// Expected to hold a single media type
    pub content: Content,
    pub example: Option<Value>,
    pub examples: IndexMap<String, Value>,
    pub extensions: Extensions,
}

impl ReferenceKind for Parameter {
    const KIND: &'static str = "parameter";
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestBody {
    pub description: Option<String>,
    pub required: bool,
    pub content: Content,
    pub extensions: Extensions,
}

impl ReferenceKind for RequestBody {
    const KIND: &'static str = "request body";
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Response {
    pub description: Option<String>,
    pub headers: IndexMap<String, Referenced<Header>>,
    pub content: Content,
    pub extensions: Extensions,
}

impl ReferenceKind for Response {
    const KIND: &'static str = "response";
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Header {
    pub description: Option<String>,
    pub required: bool,
    pub deprecated: bool,
    pub style: Option<String>,
    pub explode: Option<bool>,
    pub schema: Option<SchemaId>,
    pub content: Content,
    pub example: Option<Value>,
    pub examples: IndexMap<String, Value>,
    pub extensions: Extensions,
}

impl ReferenceKind for Header {
    const KIND: &'static str = "header";
}

/// Media types keyed by name (`application/json`, ...).
pub type Content = IndexMap<String, MediaType>;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MediaType {
    pub schema: Option<SchemaId>,
    pub example: Option<Value>,
    pub examples: IndexMap<String, Value>,
    pub encoding: IndexMap<String, Encoding>,
    pub extensions: Extensions,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Encoding {
    pub content_type: Option<String>,
    pub headers: IndexMap<String, Referenced<Header>>,
    pub style: Option<String>,
    pub explode: Option<bool>,
    pub allow_reserved: bool,
    pub extensions: Extensions,
}

/// Out-of-band requests keyed by runtime expression.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Callback {
    pub expressions: IndexMap<String, PathItem>,
}

impl ReferenceKind for Callback {
    const KIND: &'static str = "callback";
}
