//! In-memory representation of an OpenAPI 3 document.
//!
//! The loader in [`crate::parsers`] normalizes raw YAML/JSON into these
//! structures. Non-schema `$ref`s are resolved eagerly into [`Referenced`]
//! values; schemas live in a per-document [`SchemaArena`] so that recursive
//! schema graphs can be represented and compared by identity:
//!
//! ```ignore
//! let doc = parse_spec_str(yaml)?;
//! let pet = doc.components.schemas["Pet"];
//! let owner = doc.schemas[pet].properties["owner"];
//! ```

mod document;
mod operation;
mod schema;
mod security;

pub use document::*;
pub use operation::*;
pub use schema::*;
pub use security::*;
