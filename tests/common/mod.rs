//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::fs;
use std::path::Path;

use docroute::components::{Component, ComponentTable};
use docroute::routing::{ManifestResolver, RouteLoader};
use tempfile::TempDir;

/// Components the fixture modules refer to.
pub fn components() -> ComponentTable {
    ComponentTable::new()
        .with(Component::new("document", |props| {
            format!("<p>{}</p>", props["title"].as_str().unwrap_or("untitled"))
        }))
        .with(Component::new("header", |_| "<h1>Header</h1>".to_string()))
        .with(Component::new("footer", |_| "<small>Footer</small>".to_string()))
}

pub fn loader() -> RouteLoader<ManifestResolver> {
    RouteLoader::new(ManifestResolver::new(components()))
}

/// A temporary route root.
pub struct RouteTree {
    dir: TempDir,
}

impl RouteTree {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Write `contents` to `<root>/<route>/document.toml`.
    pub fn route(self, route: &str, contents: &str) -> Self {
        self.file(&format!("{route}/document.toml"), contents)
    }

    /// Write an arbitrary file relative to the root.
    pub fn file(self, relative: &str, contents: &str) -> Self {
        let path = self.dir.path().join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
        self
    }
}
