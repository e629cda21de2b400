//! Document routing library.
//!
//! Maps URL paths and HTTP methods to document routes discovered from a
//! directory tree, each carrying a props schema, render components and
//! output configuration.

pub mod components;
pub mod config;
pub mod http;
pub mod observability;
pub mod output;
pub mod paper;
pub mod render;
pub mod routing;
pub mod schema;

pub use config::AppConfig;
pub use http::HttpServer;
pub use output::OutputConfig;
pub use routing::{RouteDefinition, RouteError, RouteLoader, RouteRegistry};
