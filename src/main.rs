//! docroute: document route server.
//!
//! # Architecture Overview
//!
//! ```text
//!   routes/                     ┌──────────────┐      ┌──────────────┐
//!     invoice/document.toml ───▶│ RouteLoader  │─────▶│RouteRegistry │
//!     report/document.toml      └──────────────┘      └──────┬───────┘
//!                                                            │ match_route
//!   Client Request   ┌─────────┐    ┌──────────────┐         ▼
//!   ────────────────▶│  http   │───▶│ props check  │───▶ Renderer ───▶ Response
//!                    │ server  │    │ (validator)  │    (timeout)
//!                    └─────────┘    └──────────────┘
//! ```

use std::collections::BTreeMap;
use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tokio::net::TcpListener;

use docroute::components;
use docroute::config::{load_config, validation::validate_config, AppConfig, ConfigError};
use docroute::observability::logging;
use docroute::render::HtmlRenderer;
use docroute::routing::{ManifestResolver, RouteLoader, RouteRegistry};
use docroute::HttpServer;

#[derive(Parser)]
#[command(name = "docroute")]
#[command(about = "Serve documents from a directory of route definitions", long_about = None)]
struct Cli {
    /// Configuration file (TOML). Defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Route root directory, overriding the config file.
    #[arg(short, long)]
    routes_dir: Option<PathBuf>,

    /// Bind address, overriding the config file.
    #[arg(short, long)]
    bind: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Discover routes and serve them over HTTP
    Serve,
    /// List discovered routes
    Routes,
    /// Discover routes and validate their examples against their schemas
    Check,
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn Error>> {
    let cli = Cli::parse();
    let config = resolve_config(&cli)?;

    logging::init(&config.observability)?;
    tracing::info!("docroute v{} starting", env!("CARGO_PKG_VERSION"));

    let registry = discover(&config)?;

    match cli.command {
        Commands::Serve => {
            let listener = TcpListener::bind(&config.server.bind_address).await?;
            let server = HttpServer::new(
                config.server.clone(),
                Arc::new(registry),
                Arc::new(HtmlRenderer),
            );
            server.run(listener).await?;
            tracing::info!("Shutdown complete");
            Ok(ExitCode::SUCCESS)
        }
        Commands::Routes => {
            print_routes(&registry);
            Ok(ExitCode::SUCCESS)
        }
        Commands::Check => Ok(check_examples(&registry)),
    }
}

fn resolve_config(cli: &Cli) -> Result<AppConfig, ConfigError> {
    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => AppConfig::default(),
    };
    if let Some(dir) = &cli.routes_dir {
        config.routes.directory = dir.clone();
    }
    if let Some(bind) = &cli.bind {
        config.server.bind_address = bind.clone();
    }
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

fn discover(config: &AppConfig) -> Result<RouteRegistry, Box<dyn Error>> {
    let loader = RouteLoader::new(ManifestResolver::new(components::builtin()))
        .with_module_name(config.routes.module_name.clone());

    let mut registry = RouteRegistry::new();
    loader.load_into(&config.routes.directory, &mut registry)?;

    tracing::info!(
        directory = %config.routes.directory.display(),
        routes = registry.len(),
        "Routes loaded"
    );
    Ok(registry)
}

fn print_routes(registry: &RouteRegistry) {
    for route in registry.routes() {
        let output = route.output();
        let methods: Vec<&str> = output.methods.iter().map(|m| m.as_str()).collect();
        let (width, height) = output.page_size_mm();
        println!(
            "{:<32} {:<9} {:>6.0}x{:<6.0}mm timeout={}ms",
            route.path(),
            methods.join(","),
            width,
            height,
            output.timeout_ms
        );
    }
}

fn check_examples(registry: &RouteRegistry) -> ExitCode {
    let mut failures: BTreeMap<&str, usize> = BTreeMap::new();
    for route in registry.routes() {
        for failure in route.check_examples() {
            let label = failure
                .name
                .clone()
                .unwrap_or_else(|| format!("#{}", failure.index));
            for violation in &failure.violations {
                eprintln!("{} example {}: {}", route.path(), label, violation);
            }
            *failures.entry(route.path()).or_default() += 1;
        }
    }

    if failures.is_empty() {
        println!("{} routes checked, all examples valid", registry.len());
        ExitCode::SUCCESS
    } else {
        eprintln!("{} routes have invalid examples", failures.len());
        ExitCode::FAILURE
    }
}
