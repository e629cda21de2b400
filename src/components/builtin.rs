//! Builtin components.

use serde_json::Value;

use super::{escape_html, Component, ComponentTable};

/// Table with the builtin components:
///
/// - `blank`: renders nothing
/// - `title`: the `title` prop as a heading
/// - `props`: every prop as a definition list
/// - `page-number`: page counter placeholder for footers
pub fn builtin() -> ComponentTable {
    ComponentTable::new()
        .with(Component::new("blank", |_| String::new()))
        .with(Component::new("title", |props| {
            let title = props.get("title").map(plain_text).unwrap_or_default();
            format!("<h1>{}</h1>", escape_html(&title))
        }))
        .with(Component::new("props", render_props))
        .with(Component::new("page-number", |_| {
            r#"<span class="page-number"></span>"#.to_string()
        }))
}

fn render_props(props: &Value) -> String {
    let Some(object) = props.as_object() else {
        return String::new();
    };
    let mut out = String::from("<dl>");
    for (key, value) in object {
        out.push_str(&format!(
            "<dt>{}</dt><dd>{}</dd>",
            escape_html(key),
            escape_html(&plain_text(value))
        ));
    }
    out.push_str("</dl>");
    out
}

fn plain_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
