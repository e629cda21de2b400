//! `jsonschema`-backed compiler.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use super::{Schema, SchemaCompiler, SchemaError, SchemaViolation, Validator};

/// Compiles JSON Schema documents; the draft is detected from `$schema`.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonSchemaCompiler;

impl SchemaCompiler for JsonSchemaCompiler {
    fn compile(&self, schema: &Schema) -> Result<Arc<dyn Validator>, SchemaError> {
        let inner = jsonschema::validator_for(schema.as_value()).map_err(|e| SchemaError {
            message: e.to_string(),
        })?;
        Ok(Arc::new(JsonSchemaValidator { inner }))
    }
}

struct JsonSchemaValidator {
    inner: jsonschema::Validator,
}

impl fmt::Debug for JsonSchemaValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JsonSchemaValidator").finish_non_exhaustive()
    }
}

impl Validator for JsonSchemaValidator {
    fn check(&self, value: &Value) -> bool {
        self.inner.is_valid(value)
    }

    fn errors(&self, value: &Value) -> Vec<SchemaViolation> {
        self.inner
            .iter_errors(value)
            .map(|error| SchemaViolation {
                path: format!("${}", error.instance_path()),
                message: error.to_string(),
            })
            .collect()
    }
}
