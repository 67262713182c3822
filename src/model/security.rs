use super::{Extensions, ReferenceKind};
use indexmap::IndexMap;

/// One alternative of a security requirement list: scheme name to scopes.
pub type SecurityRequirement = IndexMap<String, Vec<String>>;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SecurityScheme {
    pub scheme_type: String,
    pub description: Option<String>,
    pub name: Option<String>,
    pub location: Option<String>,
    pub scheme: Option<String>,
    pub bearer_format: Option<String>,
    pub open_id_connect_url: Option<String>,
    /// OAuth2 flows keyed by flow kind (`implicit`, `authorizationCode`, ...)
    pub flows: IndexMap<String, OAuthFlow>,
    pub extensions: Extensions,
}

impl ReferenceKind for SecurityScheme {
    const KIND: &'static str = "security scheme";
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct OAuthFlow {
    pub authorization_url: Option<String>,
    pub token_url: Option<String>,
    pub refresh_url: Option<String>,
    /// Scope name to description
    pub scopes: IndexMap<String, String>,
    pub extensions: Extensions,
}
