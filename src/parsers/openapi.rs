//! OpenAPI 3.x document parser.
//!
//! Deserializes into private raw structures mirroring the document layout,
//! then normalizes them into [`Document`]: local `#/components/...`
//! references are resolved and every schema is placed in the document's
//! [`SchemaArena`].

use crate::error::{LoadErrorKind, Result, SpecDiffError};
use crate::model::{
    AdditionalProperties, Callback, Components, Discriminator, Document, Encoding, Extensions,
    Header, Info, MediaType, Method, OAuthFlow, Operation, Parameter, ParameterLocation, PathItem,
    Referenced, RequestBody, Response, Schema, SchemaArena, SchemaId, SecurityScheme, Server,
    ServerVariable, Tag,
};
use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;
use std::collections::{HashMap, HashSet};

/// Reference chains between non-schema components longer than this are
/// treated as unresolvable.
const MAX_REFERENCE_DEPTH: usize = 32;

/// Parser for OpenAPI 3.x documents in JSON or YAML.
#[derive(Debug, Default)]
pub struct OpenApiParser;

impl OpenApiParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse a document from JSON or YAML text.
    pub fn parse_str(&self, content: &str) -> Result<Document> {
        let value = Self::parse_value(content)?;
        let mut raw: RawDocument = serde_json::from_value(value).map_err(|e| {
            SpecDiffError::load(
                "document structure",
                LoadErrorKind::InvalidStructure(e.to_string()),
            )
        })?;
        let components = std::mem::take(&mut raw.components);
        Normalizer::new(&components).normalize(raw)
    }

    /// Read the text into a generic tree first so that YAML scalars used as
    /// map keys (e.g. status codes) become strings.
    fn parse_value(content: &str) -> Result<Value> {
        let trimmed = content.trim_start();
        if trimmed.starts_with('{') {
            serde_json::from_str(trimmed).map_err(|e| {
                SpecDiffError::load("JSON document", LoadErrorKind::InvalidStructure(e.to_string()))
            })
        } else {
            Ok(serde_yaml::from_str(content)?)
        }
    }
}

// ============================================================================
// Normalization
// ============================================================================

struct Normalizer<'a> {
    raw_components: &'a RawComponents,
    arena: SchemaArena,
    component_schemas: HashMap<String, SchemaId>,
}

impl<'a> Normalizer<'a> {
    fn new(raw_components: &'a RawComponents) -> Self {
        Self {
            raw_components,
            arena: SchemaArena::new(),
            component_schemas: HashMap::new(),
        }
    }

    fn normalize(mut self, raw: RawDocument) -> Result<Document> {
        let openapi = match (&raw.openapi, &raw.swagger) {
            (Some(version), _) if version.starts_with("3.") => version.clone(),
            (Some(version), _) => {
                return Err(SpecDiffError::load(
                    "openapi field",
                    LoadErrorKind::UnsupportedVersion(version.clone()),
                ))
            }
            (None, Some(version)) => {
                return Err(SpecDiffError::load(
                    "swagger field",
                    LoadErrorKind::UnsupportedVersion(version.clone()),
                ))
            }
            (None, None) => {
                return Err(SpecDiffError::load(
                    "document root",
                    LoadErrorKind::InvalidStructure("missing `openapi` version field".to_string()),
                ))
            }
        };

        self.reserve_component_schemas()?;
        let raw_components = self.raw_components;
        for (name, raw_schema) in &raw_components.schemas {
            if raw_schema.reference.is_some() {
                continue;
            }
            if let Some(&id) = self.component_schemas.get(name) {
                let schema = self.build_schema(raw_schema)?;
                self.arena.set(id, schema);
            }
        }

        let mut components = Components::default();
        for name in raw_components.schemas.keys() {
            if let Some(&id) = self.component_schemas.get(name) {
                components.schemas.insert(name.clone(), id);
            }
        }
        for (name, raw_param) in &raw_components.parameters {
            components
                .parameters
                .insert(name.clone(), self.parameter(raw_param, 0)?);
        }
        for (name, raw_header) in &raw_components.headers {
            components
                .headers
                .insert(name.clone(), self.header(raw_header, 0)?);
        }
        for (name, raw_body) in &raw_components.request_bodies {
            components
                .request_bodies
                .insert(name.clone(), self.request_body(raw_body, 0)?);
        }
        for (name, raw_response) in &raw_components.responses {
            components
                .responses
                .insert(name.clone(), self.response(raw_response, 0)?);
        }
        for (name, raw_scheme) in &raw_components.security_schemes {
            components
                .security_schemes
                .insert(name.clone(), self.security_scheme(raw_scheme, 0));
        }
        for (name, raw_callback) in &raw_components.callbacks {
            components
                .callbacks
                .insert(name.clone(), self.callback(raw_callback, 0)?);
        }

        let mut paths = IndexMap::new();
        for (path, value) in raw.paths {
            if path.starts_with("x-") {
                continue;
            }
            let raw_item: RawPathItem = serde_json::from_value(value).map_err(|e| {
                SpecDiffError::load(
                    format!("path {path}"),
                    LoadErrorKind::InvalidStructure(e.to_string()),
                )
            })?;
            let item = self.path_item(&raw_item)?;
            paths.insert(path, item);
        }

        Ok(Document {
            openapi,
            info: info(raw.info),
            paths,
            components,
            tags: raw.tags.into_iter().map(tag).collect(),
            servers: raw.servers.into_iter().map(server).collect(),
            security: raw.security,
            extensions: extensions(raw.extra),
            schemas: self.arena,
        })
    }

    /// Give every component schema a handle up front so references can be
    /// wired before (or while) the target is built. Components that are
    /// themselves a bare `$ref` share the handle of their target.
    fn reserve_component_schemas(&mut self) -> Result<()> {
        let raw_components = self.raw_components;
        for (name, raw_schema) in &raw_components.schemas {
            if raw_schema.reference.is_none() {
                let id = self.arena.reserve();
                self.component_schemas.insert(name.clone(), id);
            }
        }
        for name in raw_components.schemas.keys() {
            if self.component_schemas.contains_key(name) {
                continue;
            }
            let target = self.alias_target(name)?;
            if let Some(&id) = self.component_schemas.get(&target) {
                self.component_schemas.insert(name.clone(), id);
            }
        }
        Ok(())
    }

    fn alias_target(&self, name: &str) -> Result<String> {
        let mut visited = HashSet::new();
        let mut current = name.to_string();
        loop {
            if !visited.insert(current.clone()) {
                return Err(SpecDiffError::load(
                    format!("schema {name}"),
                    LoadErrorKind::UnresolvedSchemaRef("reference cycle between aliases".to_string()),
                ));
            }
            let reference = match self.raw_components.schemas.get(&current) {
                Some(raw) => match &raw.reference {
                    Some(reference) => reference,
                    None => return Ok(current),
                },
                None => {
                    return Err(SpecDiffError::load(
                        format!("schema {name}"),
                        LoadErrorKind::UnresolvedSchemaRef(current),
                    ))
                }
            };
            current = component_name(reference, "schemas").ok_or_else(|| {
                SpecDiffError::load(
                    format!("schema {name}"),
                    LoadErrorKind::UnresolvedSchemaRef(reference.clone()),
                )
            })?;
        }
    }

    fn schema_id(&mut self, raw: &RawSchema) -> Result<SchemaId> {
        if let Some(reference) = &raw.reference {
            return component_name(reference, "schemas")
                .and_then(|name| self.component_schemas.get(&name).copied())
                .ok_or_else(|| {
                    SpecDiffError::load(
                        "schema reference",
                        LoadErrorKind::UnresolvedSchemaRef(reference.clone()),
                    )
                });
        }
        let schema = self.build_schema(raw)?;
        Ok(self.arena.alloc(schema))
    }

    fn optional_schema(&mut self, raw: Option<&RawSchema>) -> Result<Option<SchemaId>> {
        raw.map(|raw| self.schema_id(raw)).transpose()
    }

    fn schema_list(&mut self, raw: &[RawSchema]) -> Result<Vec<SchemaId>> {
        raw.iter().map(|raw| self.schema_id(raw)).collect()
    }

    fn build_schema(&mut self, raw: &RawSchema) -> Result<Schema> {
        let (schema_type, null_in_type) = schema_type(raw.schema_type.as_ref());
        let (minimum, exclusive_minimum) = bound(raw.minimum, raw.exclusive_minimum.as_ref());
        let (maximum, exclusive_maximum) = bound(raw.maximum, raw.exclusive_maximum.as_ref());

        let mut properties = IndexMap::new();
        for (name, raw_property) in &raw.properties {
            properties.insert(name.clone(), self.schema_id(raw_property)?);
        }

        let additional_properties = match &raw.additional_properties {
            None => AdditionalProperties::Unspecified,
            Some(Value::Bool(allowed)) => AdditionalProperties::Allowed(*allowed),
            Some(value) => {
                let nested: RawSchema = serde_json::from_value(value.clone()).map_err(|e| {
                    SpecDiffError::load(
                        "additionalProperties",
                        LoadErrorKind::InvalidStructure(e.to_string()),
                    )
                })?;
                AdditionalProperties::Schema(self.schema_id(&nested)?)
            }
        };

        Ok(Schema {
            title: raw.title.clone(),
            description: raw.description.clone(),
            schema_type,
            format: raw.format.clone(),
            nullable: raw.nullable || null_in_type,
            read_only: raw.read_only,
            write_only: raw.write_only,
            deprecated: raw.deprecated,
            enum_values: raw.enum_values.clone(),
            default: raw.default.clone(),
            example: raw.example.clone(),
            multiple_of: raw.multiple_of,
            minimum,
            maximum,
            exclusive_minimum,
            exclusive_maximum,
            min_length: raw.min_length,
            max_length: raw.max_length,
            pattern: raw.pattern.clone(),
            min_items: raw.min_items,
            max_items: raw.max_items,
            unique_items: raw.unique_items,
            min_properties: raw.min_properties,
            max_properties: raw.max_properties,
            required: raw.required.clone(),
            properties,
            additional_properties,
            items: self.optional_schema(raw.items.as_deref())?,
            all_of: self.schema_list(&raw.all_of)?,
            one_of: self.schema_list(&raw.one_of)?,
            any_of: self.schema_list(&raw.any_of)?,
            not: self.optional_schema(raw.not.as_deref())?,
            discriminator: raw.discriminator.as_ref().map(|d| Discriminator {
                property_name: d.property_name.clone(),
                mapping: d.mapping.clone(),
            }),
            extensions: extensions(raw.extra.clone()),
        })
    }

    fn parameter(&mut self, raw: &RawParameter, depth: usize) -> Result<Referenced<Parameter>> {
        if let Some(reference) = &raw.reference {
            let raw_components = self.raw_components;
            return match lookup(&raw_components.parameters, reference, "parameters", depth) {
                Some(target) => Ok(with_reference(self.parameter(target, depth + 1)?, reference)),
                None => Ok(Referenced::dangling(reference.clone())),
            };
        }
        let location = ParameterLocation::parse(&raw.location).ok_or_else(|| {
            SpecDiffError::load(
                format!("parameter {}", raw.name),
                LoadErrorKind::InvalidStructure(format!("unknown location {:?}", raw.location)),
            )
        })?;
        Ok(Referenced::inline(Parameter {
            name: raw.name.clone(),
            location,
            description: raw.description.clone(),
            style: raw.style.clone(),
            explode: raw.explode,
            required: raw.required || location == ParameterLocation::Path,
            deprecated: raw.deprecated,
            allow_empty_value: raw.allow_empty_value,
            allow_reserved: raw.allow_reserved,
            schema: self.optional_schema(raw.schema.as_ref())?,
            content: self.content(&raw.content)?,
            example: raw.example.clone(),
            examples: raw.examples.clone(),
            extensions: extensions(raw.extra.clone()),
        }))
    }

    fn header(&mut self, raw: &RawHeader, depth: usize) -> Result<Referenced<Header>> {
        if let Some(reference) = &raw.reference {
            let raw_components = self.raw_components;
            return match lookup(&raw_components.headers, reference, "headers", depth) {
                Some(target) => Ok(with_reference(self.header(target, depth + 1)?, reference)),
                None => Ok(Referenced::dangling(reference.clone())),
            };
        }
        Ok(Referenced::inline(Header {
            description: raw.description.clone(),
            required: raw.required,
            deprecated: raw.deprecated,
            style: raw.style.clone(),
            explode: raw.explode,
            schema: self.optional_schema(raw.schema.as_ref())?,
            content: self.content(&raw.content)?,
            example: raw.example.clone(),
            examples: raw.examples.clone(),
            extensions: extensions(raw.extra.clone()),
        }))
    }

    fn headers(
        &mut self,
        raw: &IndexMap<String, RawHeader>,
    ) -> Result<IndexMap<String, Referenced<Header>>> {
        let mut headers = IndexMap::new();
        for (name, raw_header) in raw {
            headers.insert(name.clone(), self.header(raw_header, 0)?);
        }
        Ok(headers)
    }

    fn request_body(&mut self, raw: &RawRequestBody, depth: usize) -> Result<Referenced<RequestBody>> {
        if let Some(reference) = &raw.reference {
            let raw_components = self.raw_components;
            return match lookup(&raw_components.request_bodies, reference, "requestBodies", depth) {
                Some(target) => Ok(with_reference(self.request_body(target, depth + 1)?, reference)),
                None => Ok(Referenced::dangling(reference.clone())),
            };
        }
        Ok(Referenced::inline(RequestBody {
            description: raw.description.clone(),
            required: raw.required,
            content: self.content(&raw.content)?,
            extensions: extensions(raw.extra.clone()),
        }))
    }

    fn response(&mut self, raw: &RawResponse, depth: usize) -> Result<Referenced<Response>> {
        if let Some(reference) = &raw.reference {
            let raw_components = self.raw_components;
            return match lookup(&raw_components.responses, reference, "responses", depth) {
                Some(target) => Ok(with_reference(self.response(target, depth + 1)?, reference)),
                None => Ok(Referenced::dangling(reference.clone())),
            };
        }
        Ok(Referenced::inline(Response {
            description: raw.description.clone(),
            headers: self.headers(&raw.headers)?,
            content: self.content(&raw.content)?,
            extensions: extensions(raw.extra.clone()),
        }))
    }

    fn callback(&mut self, raw: &RawCallback, depth: usize) -> Result<Referenced<Callback>> {
        if let Some(Value::String(reference)) = raw.get("$ref") {
            let raw_components = self.raw_components;
            return match lookup(&raw_components.callbacks, reference, "callbacks", depth) {
                Some(target) => Ok(with_reference(self.callback(target, depth + 1)?, reference)),
                None => Ok(Referenced::dangling(reference.clone())),
            };
        }
        let mut expressions = IndexMap::new();
        for (expression, value) in raw {
            if expression.starts_with("x-") {
                continue;
            }
            let raw_item: RawPathItem = serde_json::from_value(value.clone()).map_err(|e| {
                SpecDiffError::load(
                    format!("callback {expression}"),
                    LoadErrorKind::InvalidStructure(e.to_string()),
                )
            })?;
            expressions.insert(expression.clone(), self.path_item(&raw_item)?);
        }
        Ok(Referenced::inline(Callback { expressions }))
    }

    fn security_scheme(&self, raw: &RawSecurityScheme, depth: usize) -> Referenced<SecurityScheme> {
        if let Some(reference) = &raw.reference {
            return match lookup(&self.raw_components.security_schemes, reference, "securitySchemes", depth) {
                Some(target) => with_reference(self.security_scheme(target, depth + 1), reference),
                None => Referenced::dangling(reference.clone()),
            };
        }
        Referenced::inline(SecurityScheme {
            scheme_type: raw.scheme_type.clone(),
            description: raw.description.clone(),
            name: raw.name.clone(),
            location: raw.location.clone(),
            scheme: raw.scheme.clone(),
            bearer_format: raw.bearer_format.clone(),
            open_id_connect_url: raw.open_id_connect_url.clone(),
            flows: raw
                .flows
                .iter()
                .filter(|(kind, _)| !kind.starts_with("x-"))
                .map(|(kind, flow)| {
                    (
                        kind.clone(),
                        OAuthFlow {
                            authorization_url: flow.authorization_url.clone(),
                            token_url: flow.token_url.clone(),
                            refresh_url: flow.refresh_url.clone(),
                            scopes: flow.scopes.clone(),
                            extensions: extensions(flow.extra.clone()),
                        },
                    )
                })
                .collect(),
            extensions: extensions(raw.extra.clone()),
        })
    }

    fn content(&mut self, raw: &IndexMap<String, RawMediaType>) -> Result<IndexMap<String, MediaType>> {
        let mut content = IndexMap::new();
        for (name, raw_media) in raw {
            let mut encoding = IndexMap::new();
            for (property, raw_encoding) in &raw_media.encoding {
                encoding.insert(
                    property.clone(),
                    Encoding {
                        content_type: raw_encoding.content_type.clone(),
                        headers: self.headers(&raw_encoding.headers)?,
                        style: raw_encoding.style.clone(),
                        explode: raw_encoding.explode,
                        allow_reserved: raw_encoding.allow_reserved,
                        extensions: extensions(raw_encoding.extra.clone()),
                    },
                );
            }
            content.insert(
                name.clone(),
                MediaType {
                    schema: self.optional_schema(raw_media.schema.as_ref())?,
                    example: raw_media.example.clone(),
                    examples: raw_media.examples.clone(),
                    encoding,
                    extensions: extensions(raw_media.extra.clone()),
                },
            );
        }
        Ok(content)
    }

    fn parameters(&mut self, raw: &[RawParameter]) -> Result<Vec<Referenced<Parameter>>> {
        raw.iter().map(|p| self.parameter(p, 0)).collect()
    }

    fn path_item(&mut self, raw: &RawPathItem) -> Result<PathItem> {
        let mut operations = IndexMap::new();
        for method in Method::ALL {
            if let Some(raw_op) = raw.operation(method) {
                operations.insert(method, self.operation(raw_op)?);
            }
        }
        Ok(PathItem {
            summary: raw.summary.clone(),
            description: raw.description.clone(),
            operations,
            parameters: self.parameters(&raw.parameters)?,
            servers: raw.servers.iter().cloned().map(server).collect(),
            extensions: extensions(raw.extra.clone()),
        })
    }

    fn operation(&mut self, raw: &RawOperation) -> Result<Operation> {
        let mut responses = IndexMap::new();
        for (status, raw_response) in &raw.responses {
            responses.insert(status.clone(), self.response(raw_response, 0)?);
        }
        let mut callbacks = IndexMap::new();
        for (name, raw_callback) in &raw.callbacks {
            callbacks.insert(name.clone(), self.callback(raw_callback, 0)?);
        }
        Ok(Operation {
            tags: raw.tags.clone(),
            summary: raw.summary.clone(),
            description: raw.description.clone(),
            operation_id: raw.operation_id.clone(),
            parameters: self.parameters(&raw.parameters)?,
            request_body: raw
                .request_body
                .as_ref()
                .map(|body| self.request_body(body, 0))
                .transpose()?,
            responses,
            callbacks,
            security: raw.security.clone(),
            servers: raw.servers.iter().cloned().map(server).collect(),
            deprecated: raw.deprecated,
            extensions: extensions(raw.extra.clone()),
        })
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// Component name from a local reference such as `#/components/schemas/Pet`.
fn component_name(reference: &str, section: &str) -> Option<String> {
    let prefix = format!("#/components/{section}/");
    let encoded = reference.strip_prefix(&prefix)?;
    if encoded.contains('/') {
        return None;
    }
    Some(encoded.replace("~1", "/").replace("~0", "~"))
}

fn lookup<'m, T>(
    components: &'m IndexMap<String, T>,
    reference: &str,
    section: &str,
    depth: usize,
) -> Option<&'m T> {
    if depth >= MAX_REFERENCE_DEPTH {
        return None;
    }
    component_name(reference, section).and_then(|name| components.get(&name))
}

fn with_reference<T>(resolved: Referenced<T>, reference: &str) -> Referenced<T> {
    Referenced {
        reference: Some(reference.to_string()),
        value: resolved.value,
    }
}

fn extensions(extra: IndexMap<String, Value>) -> Extensions {
    extra
        .into_iter()
        .filter(|(key, _)| key.starts_with("x-"))
        .collect()
}

/// Returns the type name and whether `null` was listed among the types.
fn schema_type(raw: Option<&Value>) -> (Option<String>, bool) {
    match raw {
        Some(Value::String(name)) => (Some(name.clone()), false),
        Some(Value::Array(names)) => {
            let mut has_null = false;
            let mut types = Vec::new();
            for name in names.iter().filter_map(Value::as_str) {
                if name == "null" {
                    has_null = true;
                } else {
                    types.push(name);
                }
            }
            let joined = (!types.is_empty()).then(|| types.join(","));
            (joined, has_null)
        }
        _ => (None, false),
    }
}

/// `exclusiveMinimum`/`exclusiveMaximum` are booleans in 3.0 and numbers in 3.1.
fn bound(declared: Option<f64>, exclusive: Option<&Value>) -> (Option<f64>, bool) {
    match exclusive {
        Some(Value::Bool(flag)) => (declared, *flag),
        Some(Value::Number(number)) => (number.as_f64().or(declared), true),
        _ => (declared, false),
    }
}

fn info(raw: RawInfo) -> Info {
    Info {
        title: raw.title,
        description: raw.description,
        terms_of_service: raw.terms_of_service,
        version: raw.version,
        contact: raw.contact,
        license: raw.license,
        extensions: extensions(raw.extra),
    }
}

fn tag(raw: RawTag) -> Tag {
    Tag {
        name: raw.name,
        description: raw.description,
        external_docs: raw.external_docs,
        extensions: extensions(raw.extra),
    }
}

fn server(raw: RawServer) -> Server {
    Server {
        url: raw.url,
        description: raw.description,
        variables: raw
            .variables
            .into_iter()
            .map(|(name, var)| {
                (
                    name,
                    ServerVariable {
                        default: var.default,
                        enum_values: var.enum_values,
                        description: var.description,
                        extensions: extensions(var.extra),
                    },
                )
            })
            .collect(),
        extensions: extensions(raw.extra),
    }
}

/// Accept unquoted YAML scalars (`version: 1.0`, `default: 8443`) as strings.
fn scalar_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(scalar_to_string(Value::deserialize(deserializer)?))
}

fn scalar_strings<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let values = Vec::<Value>::deserialize(deserializer)?;
    Ok(values.into_iter().map(scalar_to_string).collect())
}

fn scalar_to_string(value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

// ============================================================================
// Raw document structures
// ============================================================================

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct RawDocument {
    openapi: Option<String>,
    swagger: Option<String>,
    info: RawInfo,
    paths: IndexMap<String, Value>,
    components: RawComponents,
    tags: Vec<RawTag>,
    servers: Vec<RawServer>,
    security: Vec<IndexMap<String, Vec<String>>>,
    #[serde(flatten)]
    extra: IndexMap<String, Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct RawInfo {
    title: String,
    description: Option<String>,
    terms_of_service: Option<String>,
    #[serde(deserialize_with = "scalar_string")]
    version: String,
    contact: Option<Value>,
    license: Option<Value>,
    #[serde(flatten)]
    extra: IndexMap<String, Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct RawComponents {
    schemas: IndexMap<String, RawSchema>,
    parameters: IndexMap<String, RawParameter>,
    headers: IndexMap<String, RawHeader>,
    request_bodies: IndexMap<String, RawRequestBody>,
    responses: IndexMap<String, RawResponse>,
    security_schemes: IndexMap<String, RawSecurityScheme>,
    callbacks: IndexMap<String, RawCallback>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct RawTag {
    name: String,
    description: Option<String>,
    external_docs: Option<Value>,
    #[serde(flatten)]
    extra: IndexMap<String, Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct RawServer {
    url: String,
    description: Option<String>,
    variables: IndexMap<String, RawServerVariable>,
    #[serde(flatten)]
    extra: IndexMap<String, Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct RawServerVariable {
    #[serde(deserialize_with = "scalar_string")]
    default: String,
    #[serde(rename = "enum", deserialize_with = "scalar_strings")]
    enum_values: Vec<String>,
    description: Option<String>,
    #[serde(flatten)]
    extra: IndexMap<String, Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct RawPathItem {
    summary: Option<String>,
    description: Option<String>,
    get: Option<RawOperation>,
    put: Option<RawOperation>,
    post: Option<RawOperation>,
    delete: Option<RawOperation>,
    options: Option<RawOperation>,
    head: Option<RawOperation>,
    patch: Option<RawOperation>,
    trace: Option<RawOperation>,
    parameters: Vec<RawParameter>,
    servers: Vec<RawServer>,
    #[serde(flatten)]
    extra: IndexMap<String, Value>,
}

impl RawPathItem {
    fn operation(&self, method: Method) -> Option<&RawOperation> {
        match method {
            Method::Get => self.get.as_ref(),
            Method::Put => self.put.as_ref(),
            Method::Post => self.post.as_ref(),
            Method::Delete => self.delete.as_ref(),
            Method::Options => self.options.as_ref(),
            Method::Head => self.head.as_ref(),
            Method::Patch => self.patch.as_ref(),
            Method::Trace => self.trace.as_ref(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct RawOperation {
    tags: Vec<String>,
    summary: Option<String>,
    description: Option<String>,
    operation_id: Option<String>,
    parameters: Vec<RawParameter>,
    request_body: Option<RawRequestBody>,
    responses: IndexMap<String, RawResponse>,
    callbacks: IndexMap<String, RawCallback>,
    security: Option<Vec<IndexMap<String, Vec<String>>>>,
    servers: Vec<RawServer>,
    deprecated: bool,
    #[serde(flatten)]
    extra: IndexMap<String, Value>,
}

/// Callbacks are maps keyed by runtime expression, or a `$ref`.
type RawCallback = IndexMap<String, Value>;

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct RawParameter {
    #[serde(rename = "$ref")]
    reference: Option<String>,
    name: String,
    #[serde(rename = "in")]
    location: String,
    description: Option<String>,
    style: Option<String>,
    explode: Option<bool>,
    required: bool,
    deprecated: bool,
    allow_empty_value: bool,
    allow_reserved: bool,
    schema: Option<RawSchema>,
    content: IndexMap<String, RawMediaType>,
    example: Option<Value>,
    examples: IndexMap<String, Value>,
    #[serde(flatten)]
    extra: IndexMap<String, Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct RawHeader {
    #[serde(rename = "$ref")]
    reference: Option<String>,
    description: Option<String>,
    required: bool,
    deprecated: bool,
    style: Option<String>,
    explode: Option<bool>,
    schema: Option<RawSchema>,
    content: IndexMap<String, RawMediaType>,
    example: Option<Value>,
    examples: IndexMap<String, Value>,
    #[serde(flatten)]
    extra: IndexMap<String, Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct RawRequestBody {
    #[serde(rename = "$ref")]
    reference: Option<String>,
    description: Option<String>,
    required: bool,
    content: IndexMap<String, RawMediaType>,
    #[serde(flatten)]
    extra: IndexMap<String, Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct RawResponse {
    #[serde(rename = "$ref")]
    reference: Option<String>,
    description: Option<String>,
    headers: IndexMap<String, RawHeader>,
    content: IndexMap<String, RawMediaType>,
    #[serde(flatten)]
    extra: IndexMap<String, Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct RawMediaType {
    schema: Option<RawSchema>,
    example: Option<Value>,
    examples: IndexMap<String, Value>,
    encoding: IndexMap<String, RawEncoding>,
    #[serde(flatten)]
    extra: IndexMap<String, Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct RawEncoding {
    content_type: Option<String>,
    headers: IndexMap<String, RawHeader>,
    style: Option<String>,
    explode: Option<bool>,
    allow_reserved: bool,
    #[serde(flatten)]
    extra: IndexMap<String, Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct RawSecurityScheme {
    #[serde(rename = "$ref")]
    reference: Option<String>,
    #[serde(rename = "type")]
    scheme_type: String,
    description: Option<String>,
    name: Option<String>,
    #[serde(rename = "in")]
    location: Option<String>,
    scheme: Option<String>,
    bearer_format: Option<String>,
    open_id_connect_url: Option<String>,
    flows: IndexMap<String, RawOAuthFlow>,
    #[serde(flatten)]
    extra: IndexMap<String, Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct RawOAuthFlow {
    authorization_url: Option<String>,
    token_url: Option<String>,
    refresh_url: Option<String>,
    scopes: IndexMap<String, String>,
    #[serde(flatten)]
    extra: IndexMap<String, Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct RawSchema {
    #[serde(rename = "$ref")]
    reference: Option<String>,
    title: Option<String>,
    description: Option<String>,
    #[serde(rename = "type")]
    schema_type: Option<Value>,
    format: Option<String>,
    nullable: bool,
    read_only: bool,
    write_only: bool,
    deprecated: bool,
    #[serde(rename = "enum")]
    enum_values: Vec<Value>,
    default: Option<Value>,
    example: Option<Value>,
    multiple_of: Option<f64>,
    minimum: Option<f64>,
    maximum: Option<f64>,
    exclusive_minimum: Option<Value>,
    exclusive_maximum: Option<Value>,
    min_length: Option<u64>,
    max_length: Option<u64>,
    pattern: Option<String>,
    min_items: Option<u64>,
    max_items: Option<u64>,
    unique_items: bool,
    min_properties: Option<u64>,
    max_properties: Option<u64>,
    required: Vec<String>,
    properties: IndexMap<String, RawSchema>,
    additional_properties: Option<Value>,
    items: Option<Box<RawSchema>>,
    all_of: Vec<RawSchema>,
    one_of: Vec<RawSchema>,
    any_of: Vec<RawSchema>,
    not: Option<Box<RawSchema>>,
    discriminator: Option<RawDiscriminator>,
    #[serde(flatten)]
    extra: IndexMap<String, Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct RawDiscriminator {
    property_name: String,
    mapping: IndexMap<String, String>,
}
