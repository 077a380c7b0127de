use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// HTTP method recognized by the analyzer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Patch,
}

impl HttpMethod {
    /// All methods the analyzer knows about, in a stable order
    pub const ALL: [HttpMethod; 5] = [
        HttpMethod::Get,
        HttpMethod::Post,
        HttpMethod::Put,
        HttpMethod::Delete,
        HttpMethod::Patch,
    ];

    /// Uppercase wire name, also the method half of an endpoint key
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Patch => "PATCH",
        }
    }

    /// Parses an OpenAPI path-item key. Spec documents use lowercase verbs but
    /// mixed case shows up in the wild, so this is case-insensitive.
    pub fn from_spec_key(key: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(key))
    }

    /// Parses a client method name from a call site. openapi-fetch exposes
    /// uppercase methods only, so this match is case-sensitive.
    pub fn from_call_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.as_str() == name)
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An endpoint declared in the OpenAPI document.
///
/// The path is kept verbatim, including `{param}` placeholder segments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeclaredEndpoint {
    pub method: HttpMethod,
    pub path: String,
}

impl DeclaredEndpoint {
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
        }
    }

    /// Canonical `"METHOD path"` key
    pub fn key(&self) -> String {
        format!("{} {}", self.method, self.path)
    }
}

/// The declared-endpoint set, keyed by `"METHOD path"`.
///
/// Iteration order is insertion order (the order paths and verbs appeared in
/// the OpenAPI document). The endpoint matcher relies on this for its
/// first-declared-wins tie-break, hence the IndexMap.
#[derive(Debug, Clone, Default)]
pub struct EndpointSet {
    endpoints: IndexMap<String, DeclaredEndpoint>,
}

impl EndpointSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an endpoint. A duplicate `(method, path)` pair collapses into
    /// the existing entry and keeps its original position.
    pub fn insert(&mut self, endpoint: DeclaredEndpoint) {
        self.endpoints.entry(endpoint.key()).or_insert(endpoint);
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.endpoints.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&DeclaredEndpoint> {
        self.endpoints.get(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.endpoints.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &DeclaredEndpoint)> {
        self.endpoints.iter().map(|(k, e)| (k.as_str(), e))
    }

    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }
}
