//! Render components.
//!
//! # Responsibilities
//! - Represent Document/Header/Footer render callbacks as values
//! - Keep a name → component table that defining modules refer into
//! - Provide a few builtin components usable without writing Rust
//!
//! # Design Decisions
//! - Components are opaque to routing; only renderers invoke them
//! - A component receives the validated props and returns markup

mod builtin;

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;

pub use builtin::builtin;

type RenderFn = dyn Fn(&Value) -> String + Send + Sync;

/// A named render callback.
#[derive(Clone)]
pub struct Component {
    name: Arc<str>,
    render: Arc<RenderFn>,
}

impl Component {
    pub fn new<F>(name: impl Into<Arc<str>>, render: F) -> Self
    where
        F: Fn(&Value) -> String + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            render: Arc::new(render),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Render markup for `props`.
    pub fn render(&self, props: &Value) -> String {
        (self.render)(props)
    }
}

impl fmt::Debug for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Component").field(&self.name).finish()
    }
}

/// Components addressable by name from defining modules.
#[derive(Debug, Clone, Default)]
pub struct ComponentTable {
    entries: HashMap<String, Component>,
}

impl ComponentTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `component` under its name, returning any component it replaces.
    pub fn register(&mut self, component: Component) -> Option<Component> {
        self.entries.insert(component.name().to_string(), component)
    }

    /// Builder-style [`register`](Self::register).
    pub fn with(mut self, component: Component) -> Self {
        self.register(component);
        self
    }

    pub fn get(&self, name: &str) -> Option<&Component> {
        self.entries.get(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Escape text for inclusion in HTML element content or attribute values.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
