//! Per-element delta records.
//!
//! Every document element has its own delta type, its [`Diffable`](crate::diff::Diffable)
//! impl producing it, and its [`Breaking`](crate::diff::Breaking) rules,
//! kept side by side in one file per element family.

mod content;
mod extensions;
mod header;
mod info;
mod parameters;
mod paths;
mod request_body;
mod response;
mod schema;
mod security;
mod servers;

pub use content::{
    diff_content, diff_single_content, single_media_type, ContentDiff, EncodingDiff,
    MediaTypeDiff, SingleContentDiff,
};
pub use extensions::{
    diff_example, diff_examples, diff_extensions, diff_value_map, ExamplesDiff, ExtensionsDiff,
};
pub use header::{HeaderDiff, HeadersDiff};
pub use info::{diff_tags, InfoDiff, TagDiff, TagsDiff};
pub use parameters::{diff_parameters, ParameterDiff, ParametersDiff};
pub use paths::{CallbacksDiff, OperationDiff, OperationsDiff, PathItemDiff, PathsDiff};
pub use request_body::{diff_request_body, RequestBodyDiff};
pub use response::{ResponseDiff, ResponsesDiff};
pub use schema::{diff_schema, diff_schema_opt, DiscriminatorDiff, SchemaDiff, SchemaListDiff};
pub use security::{
    diff_security_requirements, requirement_key, OAuthFlowDiff, SecurityRequirementsDiff,
    SecuritySchemeDiff, SecurityScopesDiff, ANONYMOUS_REQUIREMENT,
};
pub use servers::{diff_servers, ServerDiff, ServerVariableDiff, ServersDiff};
