//! Route definitions.
//!
//! # Responsibilities
//! - Hold everything needed to serve one document path
//! - Compile the schema exactly once, when the definition is built
//! - Validate request props and documentation examples on demand
//!
//! # Design Decisions
//! - Immutable after construction: fields are private, there are no setters
//! - Replacing a route means building a new definition

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::components::Component;
use crate::output::OutputConfig;
use crate::routing::error::RouteError;
use crate::schema::{JsonSchemaCompiler, Schema, SchemaCompiler, SchemaViolation, Validator};

/// A named sample input, used for documentation and `docroute check`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RouteExample {
    #[serde(default)]
    pub name: Option<String>,
    pub props: Value,
}

/// An example whose props do not satisfy the route schema.
#[derive(Debug, Clone, PartialEq)]
pub struct ExampleFailure {
    pub index: usize,
    pub name: Option<String>,
    pub violations: Vec<SchemaViolation>,
}

/// A registered document route.
#[derive(Debug, Clone)]
pub struct RouteDefinition {
    path: String,
    schema: Schema,
    validator: Arc<dyn Validator>,
    output: OutputConfig,
    document: Component,
    header: Option<Component>,
    footer: Option<Component>,
    examples: Vec<RouteExample>,
}

impl RouteDefinition {
    /// Start building a route served at `path` and rendered by `document`.
    pub fn builder(path: impl Into<String>, document: Component) -> RouteBuilder {
        RouteBuilder {
            path: path.into(),
            schema: None,
            output: OutputConfig::default(),
            document,
            header: None,
            footer: None,
            examples: Vec::new(),
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn validator(&self) -> &Arc<dyn Validator> {
        &self.validator
    }

    pub fn output(&self) -> &OutputConfig {
        &self.output
    }

    pub fn document(&self) -> &Component {
        &self.document
    }

    pub fn header(&self) -> Option<&Component> {
        self.header.as_ref()
    }

    pub fn footer(&self) -> Option<&Component> {
        self.footer.as_ref()
    }

    pub fn examples(&self) -> &[RouteExample] {
        &self.examples
    }

    /// Check `props` against the compiled schema.
    pub fn validate_props(&self, props: &Value) -> Result<(), Vec<SchemaViolation>> {
        if self.validator.check(props) {
            Ok(())
        } else {
            Err(self.validator.errors(props))
        }
    }

    /// Validate every example, returning the ones that do not conform.
    pub fn check_examples(&self) -> Vec<ExampleFailure> {
        self.examples
            .iter()
            .enumerate()
            .filter_map(|(index, example)| {
                self.validate_props(&example.props)
                    .err()
                    .map(|violations| ExampleFailure {
                        index,
                        name: example.name.clone(),
                        violations,
                    })
            })
            .collect()
    }
}

/// Builder for [`RouteDefinition`].
#[derive(Debug)]
pub struct RouteBuilder {
    path: String,
    schema: Option<Schema>,
    output: OutputConfig,
    document: Component,
    header: Option<Component>,
    footer: Option<Component>,
    examples: Vec<RouteExample>,
}

impl RouteBuilder {
    /// Props schema; a route without one accepts no properties.
    pub fn schema(mut self, schema: Schema) -> Self {
        self.schema = Some(schema);
        self
    }

    pub fn output(mut self, output: OutputConfig) -> Self {
        self.output = output;
        self
    }

    pub fn header(mut self, header: Component) -> Self {
        self.header = Some(header);
        self
    }

    pub fn footer(mut self, footer: Component) -> Self {
        self.footer = Some(footer);
        self
    }

    pub fn examples(mut self, examples: Vec<RouteExample>) -> Self {
        self.examples = examples;
        self
    }

    /// Compile the schema with the default JSON Schema compiler and build.
    pub fn build(self) -> Result<RouteDefinition, RouteError> {
        self.build_with(&JsonSchemaCompiler)
    }

    /// Build, compiling the schema with `compiler`.
    ///
    /// Schema errors are reported against the route path.
    pub fn build_with(self, compiler: &dyn SchemaCompiler) -> Result<RouteDefinition, RouteError> {
        if self.path.is_empty() {
            return Err(RouteError::EmptyPath);
        }
        let schema = self.schema.unwrap_or_default();
        let validator = compiler
            .compile(&schema)
            .map_err(|source| RouteError::InvalidSchema {
                file: self.path.clone().into(),
                source,
            })?;

        Ok(RouteDefinition {
            path: self.path,
            schema,
            validator,
            output: self.output,
            document: self.document,
            header: self.header,
            footer: self.footer,
            examples: self.examples,
        })
    }
}
