use crate::models::{AnalysisError, DeclaredEndpoint, EndpointSet, HttpMethod};
use crate::openapi::schema::OpenApiDocument;
use std::path::Path;
use tracing::debug;

/// Reader for OpenAPI spec files (JSON or YAML)
pub struct SpecReader;

impl SpecReader {
    /// Loads and parses a spec file.
    ///
    /// An unreadable file and a malformed document are distinct failures so
    /// the caller can word its message accordingly; both are fatal.
    pub fn load(path: &Path) -> Result<OpenApiDocument, AnalysisError> {
        let content = std::fs::read_to_string(path)
            .map_err(|_| AnalysisError::SpecNotFound(path.to_path_buf()))?;

        let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");

        match extension {
            "yaml" | "yml" => Self::parse_yaml_str(&content),
            "json" => Self::parse_json_str(&content),
            _ => Self::parse_str(&content),
        }
    }

    /// Parses a spec string, detecting the format from its content
    pub fn parse_str(content: &str) -> Result<OpenApiDocument, AnalysisError> {
        let trimmed = content.trim_start();

        if trimmed.starts_with('{') {
            Self::parse_json_str(content)
        } else if trimmed.starts_with("---")
            || trimmed.starts_with("openapi:")
            || trimmed.starts_with("swagger:")
        {
            Self::parse_yaml_str(content)
        } else {
            Self::parse_json_str(content).or_else(|_| Self::parse_yaml_str(content))
        }
    }

    fn parse_json_str(content: &str) -> Result<OpenApiDocument, AnalysisError> {
        serde_json::from_str(content).map_err(|e| AnalysisError::SpecParse(e.to_string()))
    }

    fn parse_yaml_str(content: &str) -> Result<OpenApiDocument, AnalysisError> {
        serde_yaml::from_str(content).map_err(|e| AnalysisError::SpecParse(e.to_string()))
    }
}

/// Extracts the declared-endpoint set from a parsed document.
///
/// Every path-item key that case-insensitively names a recognized verb yields
/// one endpoint (method uppercased, path verbatim); anything else — a shared
/// `parameters` block, `summary`, extensions — is skipped.
pub fn extract_endpoints(document: &OpenApiDocument) -> EndpointSet {
    let mut endpoints = EndpointSet::new();

    for (path, item) in &document.paths {
        for key in item.operations.keys() {
            match HttpMethod::from_spec_key(key) {
                Some(method) => {
                    endpoints.insert(DeclaredEndpoint::new(method, path.clone()));
                }
                None => {
                    debug!(path = %path, key = %key, "Skipping non-verb path item key");
                }
            }
        }
    }

    endpoints
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn extracts_endpoints_from_json_spec() {
        let document = SpecReader::parse_str(
            r#"{
                "paths": {
                    "/users": { "get": { "summary": "List" }, "post": {} },
                    "/users/{id}": { "get": {}, "delete": {} }
                }
            }"#,
        )
        .unwrap();

        let endpoints = extract_endpoints(&document);
        assert_eq!(endpoints.len(), 4);
        assert!(endpoints.contains_key("GET /users"));
        assert!(endpoints.contains_key("POST /users"));
        assert!(endpoints.contains_key("GET /users/{id}"));
        assert!(endpoints.contains_key("DELETE /users/{id}"));
    }

    #[test]
    fn extracts_endpoints_from_yaml_spec() {
        let document = SpecReader::parse_str(
            "openapi: 3.0.0\npaths:\n  /posts:\n    get: {}\n    patch: {}\n",
        )
        .unwrap();

        let endpoints = extract_endpoints(&document);
        assert!(endpoints.contains_key("GET /posts"));
        assert!(endpoints.contains_key("PATCH /posts"));
    }

    #[test]
    fn ignores_non_verb_keys() {
        let document = SpecReader::parse_str(
            r#"{
                "paths": {
                    "/users": {
                        "get": {},
                        "parameters": [{ "name": "id", "in": "query" }],
                        "summary": "Users collection"
                    }
                }
            }"#,
        )
        .unwrap();

        let endpoints = extract_endpoints(&document);
        assert_eq!(endpoints.len(), 1);
        assert!(endpoints.contains_key("GET /users"));
    }

    #[test]
    fn uppercases_mixed_case_verbs() {
        let document = SpecReader::parse_str(
            r#"{ "paths": { "/users": { "Get": {}, "POST": {} } } }"#,
        )
        .unwrap();

        let endpoints = extract_endpoints(&document);
        assert!(endpoints.contains_key("GET /users"));
        assert!(endpoints.contains_key("POST /users"));
    }

    #[test]
    fn empty_paths_yield_empty_set() {
        let document = SpecReader::parse_str(r#"{ "paths": {} }"#).unwrap();
        assert!(extract_endpoints(&document).is_empty());
    }

    #[test]
    fn missing_file_is_spec_not_found() {
        let err = SpecReader::load(Path::new("/nonexistent/openapi.json")).unwrap_err();
        assert!(matches!(err, AnalysisError::SpecNotFound(_)));
    }

    #[test]
    fn malformed_document_is_spec_parse_error() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        file.write_all(b"{ not json").unwrap();

        let err = SpecReader::load(file.path()).unwrap_err();
        assert!(matches!(err, AnalysisError::SpecParse(_)));
    }

    #[test]
    fn preserves_declaration_order() {
        let document = SpecReader::parse_str(
            r#"{
                "paths": {
                    "/users": { "get": {} },
                    "/users/{id}": { "get": {} },
                    "/users/{id}/posts": { "get": {} }
                }
            }"#,
        )
        .unwrap();

        let endpoints = extract_endpoints(&document);
        let keys: Vec<_> = endpoints.keys().collect();
        assert_eq!(
            keys,
            vec!["GET /users", "GET /users/{id}", "GET /users/{id}/posts"]
        );
    }
}
