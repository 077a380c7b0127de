use indexmap::IndexMap;
use serde::Deserialize;

/// OpenAPI document, reduced to the parts usage analysis needs.
///
/// Path and operation order is preserved so the declared-endpoint set can
/// iterate in declaration order.
#[derive(Debug, Clone, Deserialize)]
pub struct OpenApiDocument {
    #[serde(default)]
    pub paths: IndexMap<String, PathItem>,
}

/// A single path entry: a mapping from HTTP-verb-like key to operation
/// metadata.
///
/// Values are kept opaque: non-verb keys such as a shared `parameters` block
/// or `x-` extensions carry arbitrary shapes and must not fail
/// deserialization.
#[derive(Debug, Clone, Deserialize)]
pub struct PathItem {
    #[serde(flatten)]
    pub operations: IndexMap<String, serde_json::Value>,
}
