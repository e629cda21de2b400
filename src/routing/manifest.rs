//! TOML defining modules.
//!
//! A defining module is a TOML document:
//!
//! ```toml
//! default = "invoice"        # primary export: the Document component
//! Header = "letterhead"
//!
//! [options]
//! methods = ["GET", "POST"]
//! format = "A4"
//!
//! [schema]
//! type = "object"
//! ```
//!
//! # Design Decisions
//! - A top-level string naming a registered component is a component export
//! - Everything else is data, converted to JSON
//! - Unknown component names stay strings so the loader reports which slot
//!   is wrong

use std::fs;

use crate::components::ComponentTable;
use crate::routing::error::ResolveError;
use crate::routing::resolver::{Export, ModuleExports, ModuleFile, ModuleResolver};

/// Key holding the primary export.
pub const PRIMARY_KEY: &str = "default";

/// Resolves TOML defining modules against a component table.
#[derive(Debug, Clone, Default)]
pub struct ManifestResolver {
    components: ComponentTable,
}

impl ManifestResolver {
    pub fn new(components: ComponentTable) -> Self {
        Self { components }
    }

    pub fn components(&self) -> &ComponentTable {
        &self.components
    }

    /// Resolve a module from its TOML source.
    pub fn parse(&self, source: &str) -> Result<ModuleExports, ResolveError> {
        let table: toml::Table = toml::from_str(source)?;
        let mut exports = ModuleExports::new();

        for (key, value) in table {
            let export = self.to_export(&key, value)?;
            if key == PRIMARY_KEY {
                exports.primary = Some(export);
            } else {
                exports.named.insert(key, export);
            }
        }

        Ok(exports)
    }

    fn to_export(&self, key: &str, value: toml::Value) -> Result<Export, ResolveError> {
        if let toml::Value::String(name) = &value {
            if let Some(component) = self.components.get(name) {
                return Ok(Export::Component(component.clone()));
            }
        }
        Ok(Export::Value(toml_to_json(key, value)?))
    }
}

impl ModuleResolver for ManifestResolver {
    fn resolve(&self, module: &ModuleFile) -> Result<ModuleExports, ResolveError> {
        let source = fs::read_to_string(&module.absolute)?;
        self.parse(&source)
    }
}

/// Convert a TOML value found at `key` (dotted) to JSON.
///
/// JSON has no `nan` or `inf`; those are rejected rather than nulled.
fn toml_to_json(key: &str, value: toml::Value) -> Result<serde_json::Value, ResolveError> {
    use serde_json::Value as Json;

    let json = match value {
        toml::Value::String(s) => Json::String(s),
        toml::Value::Integer(i) => Json::from(i),
        toml::Value::Float(f) => match serde_json::Number::from_f64(f) {
            Some(number) => Json::Number(number),
            None => {
                return Err(ResolveError::NonFiniteFloat {
                    key: key.to_string(),
                    value: f,
                })
            }
        },
        toml::Value::Boolean(b) => Json::Bool(b),
        toml::Value::Datetime(dt) => Json::String(dt.to_string()),
        toml::Value::Array(items) => Json::Array(
            items
                .into_iter()
                .enumerate()
                .map(|(i, item)| toml_to_json(&format!("{key}[{i}]"), item))
                .collect::<Result<_, _>>()?,
        ),
        toml::Value::Table(table) => Json::Object(
            table
                .into_iter()
                .map(|(name, value)| {
                    let json = toml_to_json(&format!("{key}.{name}"), value)?;
                    Ok((name, json))
                })
                .collect::<Result<_, ResolveError>>()?,
        ),
    };
    Ok(json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::Component;
    use serde_json::json;

    fn resolver() -> ManifestResolver {
        ManifestResolver::new(
            ComponentTable::new()
                .with(Component::new("invoice", |_| String::new()))
                .with(Component::new("letterhead", |_| String::new())),
        )
    }

    #[test]
    fn test_components_and_data() {
        let mut exports = resolver()
            .parse(
                r#"
                default = "invoice"
                Header = "letterhead"
                Footer = "unregistered"

                [options]
                timeout = 1000

                [schema]
                type = "object"
                properties.total = { type = "number" }
                "#,
            )
            .unwrap();

        match exports.primary {
            Some(Export::Component(ref c)) => assert_eq!(c.name(), "invoice"),
            ref other => panic!("unexpected primary export: {other:?}"),
        }
        assert!(matches!(exports.take("Header"), Some(Export::Component(_))));
        assert!(matches!(
            exports.take("Footer"),
            Some(Export::Value(serde_json::Value::String(_)))
        ));
        match exports.take("schema") {
            Some(Export::Value(schema)) => assert_eq!(
                schema,
                json!({ "type": "object", "properties": { "total": { "type": "number" } } })
            ),
            other => panic!("unexpected schema export: {other:?}"),
        }
        match exports.take("options") {
            Some(Export::Value(options)) => assert_eq!(options, json!({ "timeout": 1000 })),
            other => panic!("unexpected options export: {other:?}"),
        }
    }

    #[test]
    fn test_module_without_primary_export() {
        let exports = resolver().parse("Header = \"letterhead\"").unwrap();
        assert!(exports.primary.is_none());
    }

    #[test]
    fn test_parse_error() {
        assert!(matches!(
            resolver().parse("default = "),
            Err(ResolveError::Parse(_))
        ));
    }

    #[test]
    fn test_toml_to_json_scalars() {
        assert_eq!(toml_to_json("x", toml::Value::Float(2.5)).unwrap(), json!(2.5));
        assert_eq!(toml_to_json("x", toml::Value::Boolean(true)).unwrap(), json!(true));
        assert_eq!(
            toml_to_json("x", toml::Value::Array(vec![toml::Value::Integer(1)])).unwrap(),
            json!([1])
        );
    }

    #[test]
    fn test_non_finite_floats_are_rejected() {
        let err = resolver()
            .parse(
                r#"
                default = "invoice"

                [options]
                margin = { top = nan, left = -inf }
                "#,
            )
            .unwrap_err();

        match err {
            ResolveError::NonFiniteFloat { key, value } => {
                assert!(key.starts_with("options.margin."));
                assert!(!value.is_finite());
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
