//! Schema boundary.
//!
//! # Data Flow
//! ```text
//! Schema (opaque JSON Schema value)
//!     → SchemaCompiler::compile (once, when a route is built)
//!     → Arc<dyn Validator> (stored on the route)
//!     → check / errors at request time
//! ```
//!
//! # Design Decisions
//! - The validation library sits behind two traits so it can be swapped
//! - Routes never look inside a schema; they only carry it and its validator

pub mod compiler;

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use thiserror::Error;

pub use compiler::JsonSchemaCompiler;

/// An opaque schema description (JSON Schema).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Schema(Value);

impl Schema {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// Schema of a route that accepts no properties.
    pub fn empty() -> Self {
        Self(json!({
            "type": "object",
            "properties": {},
            "additionalProperties": false,
        }))
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }
}

impl Default for Schema {
    fn default() -> Self {
        Self::empty()
    }
}

/// One reason a value does not conform to a schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchemaViolation {
    /// Location inside the value, `$` for the root.
    pub path: String,
    pub message: String,
}

impl fmt::Display for SchemaViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// The schema description could not be compiled.
#[derive(Debug, Clone, Error)]
#[error("invalid schema: {message}")]
pub struct SchemaError {
    pub message: String,
}

/// A compiled schema.
pub trait Validator: Send + Sync + fmt::Debug {
    /// Returns true if `value` conforms.
    fn check(&self, value: &Value) -> bool;

    /// Every violation found in `value`, in the order reported.
    /// Empty when `check` returns true.
    fn errors(&self, value: &Value) -> Vec<SchemaViolation>;
}

/// Turns schema descriptions into validators.
pub trait SchemaCompiler: Send + Sync {
    fn compile(&self, schema: &Schema) -> Result<Arc<dyn Validator>, SchemaError>;
}
