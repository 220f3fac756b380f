//! Swagger schema normalization
//!
//! Post-processes the Swagger 2.0 document produced by the API docs
//! generator so that client generators emit non-optional fields and stable
//! operation names:
//!
//! - Every schema under `definitions` (and every required property or
//!   `items` entry reachable from it) gets `x-nullable: false` unless it says
//!   otherwise, and non-nullable schemas get `x-omitempty: false`.
//! - Everywhere else, a node carrying `x-id` gets `operationId` set to the
//!   same value.
//!
//! ## Usage
//! ```rust,ignore
//! use provider_codegen_normalizer::SwaggerDocument;
//!
//! let mut doc = SwaggerDocument::from_file("internal/api/v1/docs/swagger.json")?;
//! let report = doc.normalize()?;
//! doc.write_to("internal/api/v1/docs/swagger.json")?;
//! ```

mod normalize;

pub use normalize::{
    normalize, set_non_nullable, set_operation_id, NormalizeReport, DEFINITIONS, OPERATION_ID,
    X_ID, X_NULLABLE, X_OMITEMPTY,
};

use provider_codegen_common::{write_atomic, GeneratorError, Result};
use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::info;

/// Location of the generated Swagger document, relative to the project root
pub const DEFAULT_SWAGGER_PATH: &str = "internal/api/v1/docs/swagger.json";

/// A loaded Swagger document
pub struct SwaggerDocument {
    document: Value,
}

impl SwaggerDocument {
    /// Load a document from file path
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            GeneratorError::Parse(format!(
                "Failed to read Swagger file {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;

        Self::from_json(&content)
    }

    /// Parse a document from JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        let document: Value = serde_json::from_str(json)
            .map_err(|e| GeneratorError::Parse(format!("Failed to parse Swagger JSON: {}", e)))?;

        Ok(Self { document })
    }

    /// Run both normalization passes over the document
    pub fn normalize(&mut self) -> Result<NormalizeReport> {
        normalize(&mut self.document)
    }

    /// Serialize with 2-space indentation, fields in document order
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.document)?)
    }

    /// Serialize and atomically replace the file at `path`
    pub fn write_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let rendered = self.to_json_string()?;
        write_atomic(path.as_ref(), rendered.as_bytes())
    }

    /// Get reference to the underlying document
    pub fn document(&self) -> &Value {
        &self.document
    }

    /// Consume and return the underlying document
    pub fn into_document(self) -> Value {
        self.document
    }
}

/// Normalize the Swagger file at `path` in place
///
/// The file is only rewritten once the whole document has been normalized,
/// so a malformed document leaves it untouched.
pub fn fix_swagger_file<P: AsRef<Path>>(path: P) -> Result<NormalizeReport> {
    let path = path.as_ref();
    let mut doc = SwaggerDocument::from_file(path)?;
    let report = doc.normalize()?;
    doc.write_to(path)?;

    info!(
        path = %path.display(),
        nullable = report.nullable_defaulted,
        omitempty = report.omitempty_defaulted,
        operation_ids = report.operation_ids,
        "normalized swagger document"
    );

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_swagger() {
        let doc = SwaggerDocument::from_json(r#"{"swagger": "2.0", "paths": {}}"#);
        assert!(doc.is_ok());
        assert_eq!(doc.unwrap().document()["swagger"], "2.0");
    }

    #[test]
    fn test_malformed_json() {
        let result = SwaggerDocument::from_json("{\"swagger\": ");
        assert!(matches!(result, Err(GeneratorError::Parse(_))));
    }

    #[test]
    fn test_output_uses_two_space_indent() {
        let mut doc = SwaggerDocument::from_json(r#"{"definitions": {"A": {}}}"#).unwrap();
        doc.normalize().unwrap();
        let out = doc.to_json_string().unwrap();
        assert_eq!(
            out,
            "{\n  \"definitions\": {\n    \"A\": {\n      \"x-nullable\": false,\n      \"x-omitempty\": false\n    }\n  }\n}"
        );
    }
}
