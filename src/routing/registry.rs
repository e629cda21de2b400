//! Route lookup.
//!
//! # Responsibilities
//! - Store routes keyed by path
//! - Reject a second route for an existing path
//! - Return the route for an exact path when the method is allowed
//!
//! # Design Decisions
//! - Exact string equality only: no prefix, wildcard or normalization
//! - A disallowed method is reported exactly like an unknown path
//! - `add` takes `&mut self`: populate first, then share behind `Arc` for
//!   concurrent readers. There is no internal locking.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Arc;

use crate::routing::error::DuplicateRouteError;
use crate::routing::method::HttpMethod;
use crate::routing::route::RouteDefinition;

/// Exact-match route table.
#[derive(Debug, Default)]
pub struct RouteRegistry {
    routes: HashMap<String, Arc<RouteDefinition>>,
}

impl RouteRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `route`. Fails without modifying the registry if its path is taken.
    pub fn add(&mut self, route: RouteDefinition) -> Result<(), DuplicateRouteError> {
        match self.routes.entry(route.path().to_string()) {
            Entry::Occupied(entry) => Err(DuplicateRouteError {
                path: entry.key().clone(),
            }),
            Entry::Vacant(entry) => {
                tracing::debug!(path = %route.path(), methods = ?route.output().methods, "Route registered");
                entry.insert(Arc::new(route));
                Ok(())
            }
        }
    }

    /// Look up the route at `path` that accepts `method`.
    pub fn match_route(&self, method: HttpMethod, path: &str) -> Option<&Arc<RouteDefinition>> {
        self.routes
            .get(path)
            .filter(|route| route.output().allows(method))
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// All routes, ordered by path.
    pub fn routes(&self) -> Vec<&Arc<RouteDefinition>> {
        let mut routes: Vec<_> = self.routes.values().collect();
        routes.sort_by(|a, b| a.path().cmp(b.path()));
        routes
    }
}
