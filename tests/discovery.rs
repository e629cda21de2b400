//! Filesystem route discovery.

use std::collections::BTreeSet;
use std::path::Path;

use docroute::components::Component;
use docroute::output::{Format, Margin, Orientation, OutputConfig};
use docroute::paper::PaperFormat;
use docroute::routing::{
    ComponentSlot, Export, HttpMethod, ModuleExports, ResolveError, RouteDefinition, RouteError,
    RouteLoader, RouteRegistry, StaticResolver,
};
use docroute::schema::Schema;
use serde_json::json;

mod common;

use common::RouteTree;

fn load(tree: &RouteTree) -> Result<RouteRegistry, RouteError> {
    let mut registry = RouteRegistry::new();
    common::loader().load_into(tree.root(), &mut registry)?;
    Ok(registry)
}

#[test]
fn test_minimal_route_gets_defaults() {
    let tree = RouteTree::new().route("example", r#"default = "document""#);
    let registry = load(&tree).unwrap();

    let route = registry.match_route(HttpMethod::Get, "/example").unwrap();
    assert_eq!(route.document().name(), "document");
    assert_eq!(route.schema(), &Schema::empty());
    assert_eq!(route.output(), &OutputConfig::default());
    assert_eq!(route.output().methods, BTreeSet::from([HttpMethod::Get]));
    assert_eq!(route.output().format, Format::Paper(PaperFormat::A4));
    assert_eq!(route.output().orientation, Orientation::Portrait);
    assert_eq!(route.output().margin, Margin::uniform(0.0));
    assert_eq!(route.output().timeout_ms, 30_000);
    assert!(route.header().is_none());
    assert!(route.footer().is_none());
}

#[test]
fn test_multiple_routes() {
    let mut tree = RouteTree::new();
    for i in 1..=5 {
        tree = tree.route(&format!("example-{i}"), r#"default = "document""#);
    }
    let registry = load(&tree).unwrap();

    assert_eq!(registry.len(), 5);
    for i in 1..=5 {
        assert!(registry
            .match_route(HttpMethod::Get, &format!("/example-{i}"))
            .is_some());
    }
}

#[test]
fn test_header_and_footer() {
    let tree = RouteTree::new()
        .route(
            "with-header",
            r#"
            default = "document"
            Header = "header"
            "#,
        )
        .route(
            "with-footer",
            r#"
            default = "document"
            Footer = "footer"
            "#,
        );
    let registry = load(&tree).unwrap();

    let with_header = registry.match_route(HttpMethod::Get, "/with-header").unwrap();
    assert_eq!(with_header.header().unwrap().name(), "header");
    assert!(with_header.footer().is_none());

    let with_footer = registry.match_route(HttpMethod::Get, "/with-footer").unwrap();
    assert_eq!(with_footer.footer().unwrap().name(), "footer");
    assert!(with_footer.header().is_none());
}

#[test]
fn test_options_override_only_declared_fields() {
    let tree = RouteTree::new().route(
        "example",
        r#"
        default = "document"

        [options]
        methods = ["GET", "POST"]
        margin = { top = 20, right = 20, bottom = 20, left = 20 }
        timeout = 1000
        "#,
    );
    let registry = load(&tree).unwrap();

    let route = registry.match_route(HttpMethod::Post, "/example").unwrap();
    let output = route.output();
    assert_eq!(output.methods, BTreeSet::from([HttpMethod::Get, HttpMethod::Post]));
    assert_eq!(output.margin, Margin::uniform(20.0));
    assert_eq!(output.timeout_ms, 1000);
    assert_eq!(output.format, Format::Paper(PaperFormat::A4));
    assert_eq!(output.orientation, Orientation::Portrait);
}

#[test]
fn test_schema_is_compiled() {
    let tree = RouteTree::new().route(
        "example",
        r#"
        default = "document"

        [schema]
        type = "object"
        required = ["title"]
        properties.title = { type = "string" }
        "#,
    );
    let registry = load(&tree).unwrap();

    let route = registry.match_route(HttpMethod::Get, "/example").unwrap();
    assert_eq!(route.schema().as_value()["required"], json!(["title"]));
    assert!(route.validator().check(&json!({ "title": "Hello" })));
    assert!(!route.validator().check(&json!({})));
}

#[test]
fn test_complete_route() {
    let tree = RouteTree::new().route(
        "example",
        r#"
        default = "document"
        Header = "header"
        Footer = "footer"

        [options]
        format = "A4"
        orientation = "portrait"
        margin = { top = 20, right = 20, bottom = 20, left = 20 }
        timeout = 3000

        [schema]
        type = "object"
        properties.title = { type = "string" }

        [[examples]]
        name = "Greeting"
        props = { title = "Hello" }

        [[examples]]
        props = { title = 5 }
        "#,
    );
    let registry = load(&tree).unwrap();

    let route = registry.match_route(HttpMethod::Get, "/example").unwrap();
    assert!(route.header().is_some());
    assert!(route.footer().is_some());
    assert_eq!(route.output().timeout_ms, 3000);
    assert_eq!(route.examples().len(), 2);
    assert_eq!(route.examples()[0].name.as_deref(), Some("Greeting"));

    let failures = route.check_examples();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].index, 1);
}

#[test]
fn test_nested_routes() {
    let tree = RouteTree::new()
        .route("a", r#"default = "document""#)
        .route("a/b", r#"default = "document""#);
    let registry = load(&tree).unwrap();

    assert_eq!(registry.len(), 2);
    assert!(registry.match_route(HttpMethod::Get, "/a").is_some());
    assert!(registry.match_route(HttpMethod::Get, "/a/b").is_some());
}

#[test]
fn test_unrelated_files_are_ignored() {
    let tree = RouteTree::new()
        .route("example", r#"default = "document""#)
        .file("document.toml", r#"default = "document""#)
        .file("example/notes.md", "not a route")
        .file("other/template.toml", "not = \"a route\"")
        .file(".drafts/document.toml", "this is not even toml =");
    let registry = load(&tree).unwrap();

    assert_eq!(registry.len(), 1);
    assert!(registry.match_route(HttpMethod::Get, "/example").is_some());
}

#[cfg(unix)]
#[test]
fn test_symlinked_module_is_discovered() {
    let tree = RouteTree::new().file("shared/invoice.toml", r#"default = "document""#);
    std::fs::create_dir_all(tree.root().join("linked")).unwrap();
    std::os::unix::fs::symlink(
        tree.root().join("shared/invoice.toml"),
        tree.root().join("linked/document.toml"),
    )
    .unwrap();
    let registry = load(&tree).unwrap();

    assert_eq!(registry.len(), 1);
    assert!(registry.match_route(HttpMethod::Get, "/linked").is_some());
}

#[cfg(unix)]
#[test]
fn test_unreadable_hidden_directory_is_skipped() {
    use std::os::unix::fs::PermissionsExt;

    let tree = RouteTree::new()
        .route("example", r#"default = "document""#)
        .file(".cache/nested/blob", "cached");
    let hidden = tree.root().join(".cache");
    std::fs::set_permissions(&hidden, std::fs::Permissions::from_mode(0o000)).unwrap();

    let result = load(&tree);
    std::fs::set_permissions(&hidden, std::fs::Permissions::from_mode(0o755)).unwrap();

    let registry = result.unwrap();
    assert_eq!(registry.len(), 1);
}

#[test]
fn test_nested_hidden_directories_are_not_searched() {
    let tree = RouteTree::new()
        .route("reports", r#"default = "document""#)
        .file("reports/.old/document.toml", "this is not even toml =");
    let registry = load(&tree).unwrap();

    assert_eq!(registry.len(), 1);
    assert!(registry.match_route(HttpMethod::Get, "/reports").is_some());
}

#[test]
fn test_missing_document_names_file() {
    let tree = RouteTree::new().route("example", r#"Header = "header""#);
    let err = load(&tree).unwrap_err();

    match &err {
        RouteError::MissingDocument { file } => {
            assert_eq!(file, Path::new("example/document.toml"))
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(
        err.to_string(),
        format!(
            "Document component not found in {}",
            Path::new("example/document.toml").display()
        )
    );
}

#[test]
fn test_document_must_be_component() {
    let tree = RouteTree::new().route("example", r#"default = "no-such-component""#);
    let err = load(&tree).unwrap_err();

    match err {
        RouteError::InvalidComponent { slot, file, found } => {
            assert_eq!(slot, ComponentSlot::Document);
            assert_eq!(file, Path::new("example/document.toml"));
            assert!(found.contains("no-such-component"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_footer_must_be_component() {
    let tree = RouteTree::new().route(
        "example",
        r#"
        default = "document"
        Footer = 42
        "#,
    );
    let err = load(&tree).unwrap_err();

    assert!(matches!(
        err,
        RouteError::InvalidComponent { slot: ComponentSlot::Footer, .. }
    ));
    assert!(err.to_string().starts_with("Footer must be a render component in"));
}

#[test]
fn test_header_must_be_component() {
    let tree = RouteTree::new().route(
        "example",
        r#"
        default = "document"
        Header = "no-such-header"
        "#,
    );
    let err = load(&tree).unwrap_err();

    match &err {
        RouteError::InvalidComponent { slot, file, .. } => {
            assert_eq!(*slot, ComponentSlot::Header);
            assert_eq!(file, Path::new("example/document.toml"));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(err.to_string().starts_with("Header must be a render component in"));
}

#[test]
fn test_non_finite_margin_fails_discovery() {
    let tree = RouteTree::new().route(
        "example",
        r#"
        default = "document"

        [options]
        margin = { top = nan, left = -inf }
        "#,
    );
    let err = load(&tree).unwrap_err();

    match err {
        RouteError::Resolve { file, source } => {
            assert_eq!(file, Path::new("example/document.toml"));
            assert!(matches!(source, ResolveError::NonFiniteFloat { .. }));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_invalid_options_fail_discovery() {
    let tree = RouteTree::new().route(
        "example",
        r#"
        default = "document"

        [options]
        timeout = 0
        "#,
    );
    assert!(matches!(load(&tree), Err(RouteError::InvalidOptions { .. })));

    let tree = RouteTree::new().route(
        "example",
        r#"
        default = "document"

        [options]
        papersize = "A4"
        "#,
    );
    assert!(matches!(load(&tree), Err(RouteError::InvalidOptions { .. })));
}

#[test]
fn test_schema_must_be_data() {
    let tree = RouteTree::new().route(
        "example",
        r#"
        default = "document"
        schema = "header"
        "#,
    );
    assert!(matches!(load(&tree), Err(RouteError::InvalidExport { .. })));
}

#[test]
fn test_uncompilable_schema() {
    let tree = RouteTree::new().route(
        "example",
        r#"
        default = "document"

        [schema]
        type = 12
        "#,
    );
    assert!(matches!(load(&tree), Err(RouteError::InvalidSchema { .. })));
}

#[test]
fn test_unparsable_module() {
    let tree = RouteTree::new().route("example", "default = ");
    assert!(matches!(load(&tree), Err(RouteError::Resolve { .. })));
}

#[test]
fn test_missing_root() {
    let tree = RouteTree::new();
    let mut registry = RouteRegistry::new();
    let err = common::loader()
        .load_into(tree.root().join("does-not-exist"), &mut registry)
        .unwrap_err();
    assert!(matches!(err, RouteError::Walk { .. }));
}

#[test]
fn test_duplicate_path_aborts_discovery() {
    let tree = RouteTree::new()
        .route("example", r#"default = "document""#)
        .route("zzz", r#"default = "document""#);

    let mut registry = RouteRegistry::new();
    registry
        .add(
            RouteDefinition::builder("/example", Component::new("preexisting", |_| String::new()))
                .build()
                .unwrap(),
        )
        .unwrap();

    let err = common::loader().load_into(tree.root(), &mut registry).unwrap_err();
    match err {
        RouteError::DuplicateRoute(dup) => assert_eq!(dup.path, "/example"),
        other => panic!("unexpected error: {other}"),
    }

    let kept = registry.match_route(HttpMethod::Get, "/example").unwrap();
    assert_eq!(kept.document().name(), "preexisting");
}

#[test]
fn test_discovery_is_lazy_and_fused() {
    let tree = RouteTree::new()
        .route("a-broken", r#"Header = "header""#)
        .route("b-fine", r#"default = "document""#);
    let loader = common::loader();

    let mut discovery = loader.discover(tree.root());
    assert!(matches!(discovery.next(), Some(Err(RouteError::MissingDocument { .. }))));
    assert!(discovery.next().is_none());
}

#[test]
fn test_custom_module_name() {
    let tree = RouteTree::new()
        .file("report/route.toml", r#"default = "document""#)
        .route("ignored", r#"default = "document""#);
    let loader = common::loader().with_module_name("route.toml");

    let paths: Vec<String> = loader
        .discover(tree.root())
        .map(|route| route.unwrap().path().to_string())
        .collect();
    assert_eq!(paths, ["/report"]);
}

#[test]
fn test_static_resolver() {
    let tree = RouteTree::new().file("invoice/document.toml", "");
    let resolver = StaticResolver::new().with(
        "invoice/document.toml",
        ModuleExports::new()
            .with_primary(Export::Component(Component::new("invoice", |_| String::new())))
            .with_named("options", Export::Value(json!({ "orientation": "landscape" }))),
    );

    let mut registry = RouteRegistry::new();
    RouteLoader::new(resolver)
        .load_into(tree.root(), &mut registry)
        .unwrap();

    let route = registry.match_route(HttpMethod::Get, "/invoice").unwrap();
    assert_eq!(route.document().name(), "invoice");
    assert_eq!(route.output().orientation, Orientation::Landscape);
}

#[test]
fn test_demo_routes_load_with_builtin_components() {
    let root = Path::new(env!("CARGO_MANIFEST_DIR")).join("demos/routes");
    let loader = RouteLoader::new(docroute::routing::ManifestResolver::new(
        docroute::components::builtin(),
    ));

    let mut registry = RouteRegistry::new();
    assert_eq!(loader.load_into(&root, &mut registry).unwrap(), 2);

    let summary = registry
        .match_route(HttpMethod::Post, "/reports/summary")
        .unwrap();
    assert_eq!(summary.output().format, Format::Paper(PaperFormat::A5));
    assert_eq!(summary.output().page_size_mm(), (210.0, 148.0));
    assert_eq!(
        summary.output().margin,
        Margin { top: 15.0, right: 0.0, bottom: 15.0, left: 0.0 }
    );

    for route in registry.routes() {
        assert!(route.check_examples().is_empty(), "{}", route.path());
    }
}
