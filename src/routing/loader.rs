//! Filesystem route discovery.
//!
//! # Responsibilities
//! - Walk a route root and find one defining module per route directory
//! - Derive the route path from the module's directory
//! - Check the module's exports and build a RouteDefinition
//! - Populate a RouteRegistry, failing on the first error
//!
//! # Design Decisions
//! - Discovery is lazy: the walk advances only as routes are pulled
//! - All-or-nothing: any error ends the pass; run it once against a fresh registry
//! - Enumeration order does not affect the resulting routes

use std::path::{Component as PathComponent, Path, PathBuf};
use std::sync::Arc;

use glob::{MatchOptions, Pattern};
use walkdir::{DirEntry, WalkDir};

use crate::components::Component;
use crate::output::RouteOptions;
use crate::routing::error::{ComponentSlot, RouteError};
use crate::routing::registry::RouteRegistry;
use crate::routing::resolver::{
    Export, ModuleFile, ModuleResolver, EXAMPLES_EXPORT, FOOTER_EXPORT, HEADER_EXPORT,
    OPTIONS_EXPORT, SCHEMA_EXPORT,
};
use crate::routing::route::{RouteDefinition, RouteExample};
use crate::schema::{JsonSchemaCompiler, Schema, SchemaCompiler};

/// File name of the defining module inside each route directory.
pub const DEFAULT_MODULE_NAME: &str = "document.toml";

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    // `*` may span separators so nested route directories are found.
    require_literal_separator: false,
    require_literal_leading_dot: true,
};

/// Builds routes from a directory tree of defining modules.
pub struct RouteLoader<R> {
    resolver: R,
    compiler: Arc<dyn SchemaCompiler>,
    module_name: String,
}

impl<R: ModuleResolver> RouteLoader<R> {
    pub fn new(resolver: R) -> Self {
        Self {
            resolver,
            compiler: Arc::new(JsonSchemaCompiler),
            module_name: DEFAULT_MODULE_NAME.to_string(),
        }
    }

    /// Use `compiler` instead of the default JSON Schema compiler.
    pub fn with_compiler(mut self, compiler: Arc<dyn SchemaCompiler>) -> Self {
        self.compiler = compiler;
        self
    }

    /// Look for defining modules named `name` instead of `document.toml`.
    pub fn with_module_name(mut self, name: impl Into<String>) -> Self {
        self.module_name = name.into();
        self
    }

    pub fn module_name(&self) -> &str {
        &self.module_name
    }

    /// Lazily discover the routes under `root`.
    pub fn discover(&self, root: impl AsRef<Path>) -> Discovery<'_, R> {
        let root = root.as_ref().to_path_buf();
        let pattern = Pattern::new(&format!("*/{}", Pattern::escape(&self.module_name)))
            .expect("escaped module name is a valid pattern");

        Discovery {
            loader: self,
            walker: WalkDir::new(&root)
                .min_depth(2)
                .sort_by_file_name()
                .into_iter()
                .filter_entry(is_searched as fn(&DirEntry) -> bool),
            root,
            pattern,
            done: false,
        }
    }

    /// Discover every route under `root` and add it to `registry`.
    ///
    /// Returns the number of routes added. Stops at the first error,
    /// including a path that is already registered.
    pub fn load_into(
        &self,
        root: impl AsRef<Path>,
        registry: &mut RouteRegistry,
    ) -> Result<usize, RouteError> {
        let root = root.as_ref();
        let mut loaded = 0;
        for route in self.discover(root) {
            registry.add(route?)?;
            loaded += 1;
        }

        tracing::info!(root = %root.display(), routes = loaded, "Route discovery complete");
        crate::observability::metrics::record_routes_loaded(registry.len());
        Ok(loaded)
    }

    fn build(&self, module: &ModuleFile) -> Result<RouteDefinition, RouteError> {
        let file = module.relative.clone();
        let path = route_path(&module.relative);

        let mut exports = self
            .resolver
            .resolve(module)
            .map_err(|source| RouteError::Resolve {
                file: file.clone(),
                source,
            })?;

        let document = match exports.primary.take() {
            None => return Err(RouteError::MissingDocument { file }),
            Some(export) => component(ComponentSlot::Document, export, &file)?,
        };
        let header = exports
            .take(HEADER_EXPORT)
            .map(|export| component(ComponentSlot::Header, export, &file))
            .transpose()?;
        let footer = exports
            .take(FOOTER_EXPORT)
            .map(|export| component(ComponentSlot::Footer, export, &file))
            .transpose()?;

        let schema = match exports.take(SCHEMA_EXPORT) {
            None => Schema::empty(),
            Some(export) => Schema::new(data(SCHEMA_EXPORT, export, &file)?),
        };

        let options: RouteOptions = match exports.take(OPTIONS_EXPORT) {
            None => RouteOptions::default(),
            Some(export) => serde_json::from_value(data(OPTIONS_EXPORT, export, &file)?)
                .map_err(|e| RouteError::InvalidOptions {
                    file: file.clone(),
                    reason: e.to_string(),
                })?,
        };
        let output = options.resolve().map_err(|e| RouteError::InvalidOptions {
            file: file.clone(),
            reason: e.to_string(),
        })?;

        let examples: Vec<RouteExample> = match exports.take(EXAMPLES_EXPORT) {
            None => Vec::new(),
            Some(export) => serde_json::from_value(data(EXAMPLES_EXPORT, export, &file)?)
                .map_err(|e| RouteError::InvalidExport {
                    export: EXAMPLES_EXPORT.to_string(),
                    file: file.clone(),
                    reason: e.to_string(),
                })?,
        };

        let mut builder = RouteDefinition::builder(path, document)
            .schema(schema)
            .output(output)
            .examples(examples);
        if let Some(header) = header {
            builder = builder.header(header);
        }
        if let Some(footer) = footer {
            builder = builder.footer(footer);
        }

        let route = builder
            .build_with(self.compiler.as_ref())
            .map_err(|e| match e {
                RouteError::InvalidSchema { source, .. } => RouteError::InvalidSchema {
                    file: file.clone(),
                    source,
                },
                other => other,
            })?;

        tracing::debug!(
            path = %route.path(),
            file = %file.display(),
            methods = ?route.output().methods,
            "Route discovered"
        );
        Ok(route)
    }
}

/// Lazy sequence of routes produced by [`RouteLoader::discover`].
///
/// Fused after the first error.
pub struct Discovery<'a, R> {
    loader: &'a RouteLoader<R>,
    walker: walkdir::FilterEntry<walkdir::IntoIter, fn(&DirEntry) -> bool>,
    root: PathBuf,
    pattern: Pattern,
    done: bool,
}

impl<R: ModuleResolver> Iterator for Discovery<'_, R> {
    type Item = Result<RouteDefinition, RouteError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        loop {
            let entry = match self.walker.next()? {
                Ok(entry) => entry,
                Err(source) => {
                    self.done = true;
                    return Some(Err(RouteError::Walk {
                        root: self.root.clone(),
                        source,
                    }));
                }
            };

            // Symlinked modules count; the walk itself does not follow links.
            let is_file = entry.file_type().is_file()
                || (entry.path_is_symlink() && entry.path().is_file());
            if !is_file {
                continue;
            }
            let Ok(relative) = entry.path().strip_prefix(&self.root) else {
                continue;
            };
            let relative = relative.to_path_buf();
            if !self.pattern.matches_with(&slash_joined(&relative), MATCH_OPTIONS) {
                continue;
            }

            let module = ModuleFile {
                absolute: entry.path().to_path_buf(),
                relative,
            };
            let result = self.loader.build(&module);
            if result.is_err() {
                self.done = true;
            }
            return Some(result);
        }
    }
}

/// Hidden directories below the root are never entered.
fn is_searched(entry: &DirEntry) -> bool {
    entry.depth() == 0
        || !entry.file_type().is_dir()
        || !entry.file_name().to_string_lossy().starts_with('.')
}

/// `/` followed by the module's directory, e.g. `a/b/document.toml` → `/a/b`.
fn route_path(relative: &Path) -> String {
    let directory = relative.parent().unwrap_or_else(|| Path::new(""));
    format!("/{}", slash_joined(directory))
}

fn slash_joined(path: &Path) -> String {
    path.components()
        .filter_map(|component| match component {
            PathComponent::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

fn component(slot: ComponentSlot, export: Export, file: &Path) -> Result<Component, RouteError> {
    match export {
        Export::Component(component) => Ok(component),
        other => Err(RouteError::InvalidComponent {
            slot,
            file: file.to_path_buf(),
            found: other.describe(),
        }),
    }
}

fn data(name: &str, export: Export, file: &Path) -> Result<serde_json::Value, RouteError> {
    match export {
        Export::Value(value) => Ok(value),
        other => Err(RouteError::InvalidExport {
            export: name.to_string(),
            file: file.to_path_buf(),
            reason: format!("expected data, found {}", other.describe()),
        }),
    }
}
