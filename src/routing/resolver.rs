//! Defining-module resolution.
//!
//! # Responsibilities
//! - Define what a resolved defining module looks like (its exports)
//! - Abstract how a module file turns into exports
//! - Provide an in-memory resolver for routes registered at compile time
//!
//! # Design Decisions
//! - Exports are dynamically typed; shape checks belong to the loader so
//!   every resolver reports the same errors

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::components::Component;
use crate::routing::error::ResolveError;

/// Named export holding the props schema.
pub const SCHEMA_EXPORT: &str = "schema";
/// Named export holding the partial output configuration.
pub const OPTIONS_EXPORT: &str = "options";
/// Named export holding documentation examples.
pub const EXAMPLES_EXPORT: &str = "examples";
/// Named export holding the header component.
pub const HEADER_EXPORT: &str = "Header";
/// Named export holding the footer component.
pub const FOOTER_EXPORT: &str = "Footer";

/// A value exported by a defining module.
#[derive(Debug, Clone)]
pub enum Export {
    Component(Component),
    Value(Value),
}

impl Export {
    /// Short description of the export's kind, for error messages.
    pub fn describe(&self) -> String {
        match self {
            Export::Component(component) => format!("component `{}`", component.name()),
            Export::Value(Value::Null) => "null".to_string(),
            Export::Value(Value::Bool(_)) => "boolean".to_string(),
            Export::Value(Value::Number(_)) => "number".to_string(),
            Export::Value(Value::String(s)) => format!("string \"{s}\""),
            Export::Value(Value::Array(_)) => "array".to_string(),
            Export::Value(Value::Object(_)) => "table".to_string(),
        }
    }
}

/// Everything a defining module exports.
#[derive(Debug, Clone, Default)]
pub struct ModuleExports {
    /// The primary (default) export; the route's Document.
    pub primary: Option<Export>,
    pub named: HashMap<String, Export>,
}

impl ModuleExports {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_primary(mut self, export: Export) -> Self {
        self.primary = Some(export);
        self
    }

    pub fn with_named(mut self, name: impl Into<String>, export: Export) -> Self {
        self.named.insert(name.into(), export);
        self
    }

    /// Remove and return a named export.
    pub fn take(&mut self, name: &str) -> Option<Export> {
        self.named.remove(name)
    }
}

/// Location of a defining module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleFile {
    pub absolute: PathBuf,
    /// Path relative to the route root, e.g. `invoice/document.toml`.
    pub relative: PathBuf,
}

/// Turns a defining module into its exports.
pub trait ModuleResolver: Send + Sync {
    fn resolve(&self, module: &ModuleFile) -> Result<ModuleExports, ResolveError>;
}

/// Resolver backed by an in-memory table keyed by relative module path.
///
/// The module files must still exist under the route root for discovery to
/// find them; their contents are ignored.
#[derive(Debug, Clone, Default)]
pub struct StaticResolver {
    modules: HashMap<PathBuf, ModuleExports>,
}

impl StaticResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, relative: impl AsRef<Path>, exports: ModuleExports) {
        self.modules.insert(relative.as_ref().to_path_buf(), exports);
    }

    pub fn with(mut self, relative: impl AsRef<Path>, exports: ModuleExports) -> Self {
        self.register(relative, exports);
        self
    }
}

impl ModuleResolver for StaticResolver {
    fn resolve(&self, module: &ModuleFile) -> Result<ModuleExports, ResolveError> {
        self.modules
            .get(&module.relative)
            .cloned()
            .ok_or_else(|| ResolveError::NotRegistered(module.relative.clone()))
    }
}
