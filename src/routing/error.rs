//! Routing errors.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::schema::SchemaError;

/// Render-callback slots of a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentSlot {
    Document,
    Header,
    Footer,
}

impl fmt::Display for ComponentSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ComponentSlot::Document => "Document",
            ComponentSlot::Header => "Header",
            ComponentSlot::Footer => "Footer",
        })
    }
}

/// `add` was called with a path that is already registered.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("route with path \"{path}\" already exists")]
pub struct DuplicateRouteError {
    pub path: String,
}

/// A defining module could not be read or parsed.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("failed to read module: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse module: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("no module registered for {0}")]
    NotRegistered(PathBuf),

    #[error("{key} is not a finite number ({value})")]
    NonFiniteFloat { key: String, value: f64 },
}

/// Errors raised while building, discovering or registering routes.
///
/// `file` fields hold the defining module's path relative to the route root.
#[derive(Debug, Error)]
pub enum RouteError {
    #[error("Document component not found in {}", file.display())]
    MissingDocument { file: PathBuf },

    #[error("{slot} must be a render component in {} (found {found})", file.display())]
    InvalidComponent {
        slot: ComponentSlot,
        file: PathBuf,
        found: String,
    },

    #[error(transparent)]
    DuplicateRoute(#[from] DuplicateRouteError),

    #[error("export `{export}` in {} is invalid: {reason}", file.display())]
    InvalidExport {
        export: String,
        file: PathBuf,
        reason: String,
    },

    #[error("invalid options in {}: {reason}", file.display())]
    InvalidOptions { file: PathBuf, reason: String },

    #[error("schema in {} does not compile: {source}", file.display())]
    InvalidSchema {
        file: PathBuf,
        #[source]
        source: SchemaError,
    },

    #[error("cannot load {}: {source}", file.display())]
    Resolve {
        file: PathBuf,
        #[source]
        source: ResolveError,
    },

    #[error("failed to walk route directory {}: {source}", root.display())]
    Walk {
        root: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("route path must not be empty")]
    EmptyPath,
}
