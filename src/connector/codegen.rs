//! Mapping code generation seam

use crate::core::Result;
use async_trait::async_trait;
use serde_json::{Map, Value};

/// Inputs for authoring one step-to-step mapping
#[derive(Debug, Clone)]
pub struct MappingRequest {
    /// App producing the response
    pub from_app: String,

    /// App consuming the request
    pub to_app: String,

    /// Response schema of the upstream app
    pub response_schema: Map<String, Value>,

    /// Request schema of the downstream app
    pub request_schema: Map<String, Value>,
}

/// Strategy for authoring mapping code between two schemas
///
/// Implementations must return a syntactically complete, loadable module
/// even when the mapping is semantically partial. The shipped
/// implementation is deterministic; callers may slot in a smarter author
/// (e.g. one backed by a hosted code-generation service) without any core
/// changes.
#[async_trait]
pub trait MappingCodegen: Send + Sync {
    async fn generate(&self, request: &MappingRequest) -> Result<String>;
}

/// Deterministic field-by-field mapper
///
/// Keyed by the request schema: every field the response schema also
/// declares becomes a direct pass-through; every field it lacks becomes an
/// explicit placeholder flagged for manual completion, never a silent
/// omission.
#[derive(Debug, Clone, Copy, Default)]
pub struct FieldMapCodegen;

#[async_trait]
impl MappingCodegen for FieldMapCodegen {
    async fn generate(&self, request: &MappingRequest) -> Result<String> {
        let mut code = String::from("function mapResponseToRequest(response) {\n");
        code.push_str("  return {\n");

        for key in request.request_schema.keys() {
            if request.response_schema.contains_key(key) {
                code.push_str(&format!("    \"{}\": response[\"{}\"],\n", key, key));
            } else {
                code.push_str(&format!("    \"{}\": undefined, // TODO: Provide value\n", key));
            }
        }

        code.push_str("  };\n");
        code.push_str("}\n");
        code.push_str("module.exports = mapResponseToRequest;\n");
        Ok(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn schema(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("schema fixtures must be objects"),
        }
    }

    fn request() -> MappingRequest {
        MappingRequest {
            from_app: "csv-reader".to_string(),
            to_app: "json-writer".to_string(),
            response_schema: schema(json!({"rows": "array", "count": "number"})),
            request_schema: schema(json!({"rows": "array", "destination": "string"})),
        }
    }

    #[tokio::test]
    async fn test_shared_fields_pass_through() {
        let code = FieldMapCodegen.generate(&request()).await.unwrap();
        assert!(code.contains("\"rows\": response[\"rows\"],"));
    }

    #[tokio::test]
    async fn test_unmatched_fields_get_placeholders() {
        let code = FieldMapCodegen.generate(&request()).await.unwrap();
        assert!(code.contains("\"destination\": undefined, // TODO: Provide value"));
        // response-only fields are not mapped anywhere
        assert!(!code.contains("\"count\""));
    }

    #[tokio::test]
    async fn test_output_is_a_complete_module() {
        let code = FieldMapCodegen.generate(&request()).await.unwrap();
        assert!(code.starts_with("function mapResponseToRequest(response) {"));
        assert!(code.ends_with("module.exports = mapResponseToRequest;\n"));
    }

    #[tokio::test]
    async fn test_empty_request_schema_still_loadable() {
        let mut req = request();
        req.request_schema = Map::new();
        let code = FieldMapCodegen.generate(&req).await.unwrap();
        assert!(code.contains("return {\n  };"));
    }
}
