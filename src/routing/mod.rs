//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Route Discovery (at startup):
//!     route root directory
//!     → loader.rs (walk, find <dir>/document.toml)
//!     → resolver.rs / manifest.rs (module exports)
//!     → loader.rs (check exports, merge options, compile schema)
//!     → registry.rs (add, unique paths)
//!
//! Incoming Request (method, path)
//!     → registry.rs (exact path lookup, method check)
//!     → Return: matched RouteDefinition or no match
//! ```
//!
//! # Design Decisions
//! - Routes built at startup, immutable at runtime
//! - Exact path equality only (no prefixes, no parameters)
//! - Discovery is fail-fast: one bad module fails the whole pass

pub mod error;
pub mod loader;
pub mod manifest;
pub mod method;
pub mod registry;
pub mod resolver;
pub mod route;

pub use error::{ComponentSlot, DuplicateRouteError, ResolveError, RouteError};
pub use loader::{Discovery, RouteLoader, DEFAULT_MODULE_NAME};
pub use manifest::ManifestResolver;
pub use method::{HttpMethod, UnsupportedMethod};
pub use registry::RouteRegistry;
pub use resolver::{Export, ModuleExports, ModuleFile, ModuleResolver, StaticResolver};
pub use route::{ExampleFailure, RouteBuilder, RouteDefinition, RouteExample};
