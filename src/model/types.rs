use serde::Deserialize;
use std::collections::BTreeMap;

/// String attributes keyed by dotted descriptor name (e.g. `db.entity`).
///
/// A `BTreeMap` keeps iteration deterministic; generated output must be
/// byte-identical for identical input.
pub type AttrMap = BTreeMap<String, String>;

/// A fully resolved generator input: the ordered list of schema modules.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Model {
    #[serde(default)]
    pub modules: Vec<Module>,
}

/// A named schema module holding records and web-service definitions.
#[derive(Debug, Clone, Deserialize)]
pub struct Module {
    pub name: String,
    #[serde(default)]
    pub records: Vec<Record>,
    #[serde(default)]
    pub services: Vec<WebServiceForm>,
    #[serde(default)]
    pub attrs: AttrMap,
}

/// A named structured type with ordered fields.
#[derive(Debug, Clone, Deserialize)]
pub struct Record {
    pub name: String,
    #[serde(default)]
    pub fields: Vec<Field>,
    #[serde(default)]
    pub annotation: Option<String>,
    #[serde(default)]
    pub attrs: AttrMap,
}

/// One record field: name, declared Elixir type, optional default literal.
#[derive(Debug, Clone, Deserialize)]
pub struct Field {
    pub name: String,
    #[serde(default)]
    pub ty: Option<String>,
    /// Default value as an Elixir literal, applied after path resolution.
    #[serde(default)]
    pub default: Option<String>,
    #[serde(default)]
    pub annotation: Option<String>,
    #[serde(default)]
    pub attrs: AttrMap,
}

/// A web-service definition: an ordered set of HTTP-reachable resources.
#[derive(Debug, Clone, Deserialize)]
pub struct WebServiceForm {
    pub name: String,
    #[serde(default)]
    pub server_enabled: bool,
    #[serde(default)]
    pub resources: Vec<Resource>,
    #[serde(default)]
    pub annotation: Option<String>,
    #[serde(default)]
    pub attrs: AttrMap,
}

/// One HTTP-reachable operation of a web service.
///
/// `responses` is ordered; the first entry is the success response.
#[derive(Debug, Clone, Deserialize)]
pub struct Resource {
    pub name: String,
    #[serde(default)]
    pub method: HttpMethod,
    #[serde(default)]
    pub path: Vec<PathSegment>,
    #[serde(default)]
    pub request_vars: Vec<RequestVariable>,
    #[serde(default)]
    pub request_content: Option<ContentDescriptor>,
    #[serde(default)]
    pub responses: Vec<Response>,
    #[serde(default)]
    pub session: SessionKind,
    /// Request connection passthrough (`conn` parameter + mirrored result).
    #[serde(default)]
    pub conn: bool,
    /// Handler module leaf name; defaults to `<CamelName>Handler`.
    #[serde(default)]
    pub handler: Option<String>,
    #[serde(default)]
    pub annotation: Option<String>,
    #[serde(default)]
    pub attrs: AttrMap,
}

/// A single URI path segment, literal or named variable.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub enum PathSegment {
    #[serde(rename = "lit")]
    Literal(String),
    #[serde(rename = "var")]
    Variable(String),
}

/// A path/query request variable with its declared type and optional
/// guard-generating type.
#[derive(Debug, Clone, Deserialize)]
pub struct RequestVariable {
    pub name: String,
    pub ty: String,
    /// Type used to derive the guard expression when it differs from `ty`
    /// (e.g. a custom `Mod.is_uuid` guard for an opaque string).
    #[serde(default)]
    pub guard_ty: Option<String>,
    #[serde(default)]
    pub annotation: Option<String>,
}

/// Request or response body content.
#[derive(Debug, Clone, Deserialize)]
pub struct ContentDescriptor {
    /// Variable name; the response side falls back to `response_content`.
    #[serde(default)]
    pub var_name: Option<String>,
    /// Elixir type of the content (e.g. `DataProtocol.Collection.t(User.t())`).
    pub ty: String,
    #[serde(default)]
    pub annotation: Option<String>,
}

/// One declared response: header-derived variables plus optional content.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Response {
    #[serde(default)]
    pub header_vars: Vec<RequestVariable>,
    #[serde(default)]
    pub content: Option<ContentDescriptor>,
}

/// Session requirement of a resource: none, a generic session map, or a
/// session keyed by a specific attribute.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionKind {
    #[default]
    None,
    Generic,
    Keyed(String),
}

impl SessionKind {
    pub fn is_some(&self) -> bool {
        !matches!(self, SessionKind::None)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    #[default]
    Get,
    Post,
    Put,
    Delete,
    Patch,
}

impl Resource {
    /// First declared response, treated as the success response.
    pub fn success_response(&self) -> Option<&Response> {
        self.responses.first()
    }
}
