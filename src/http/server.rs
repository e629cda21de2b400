//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum Router serving every registered document route
//! - Wire up middleware (tracing, request ID, body limit)
//! - Match requests against the route registry
//! - Validate props and dispatch to the renderer under the route timeout
//!
//! # Design Decisions
//! - One fallback handler: the registry, not Axum, owns path matching
//! - Rendering runs on the blocking pool; on timeout the client gets 504
//!   while the render task is left to finish on its own

use std::sync::Arc;
use std::time::Instant;

use axum::{
    body::{Body, Bytes},
    extract::{FromRequest, State},
    http::{header, Request, StatusCode},
    response::{IntoResponse, Response},
    Router,
};
use tokio::net::TcpListener;
use tower_http::{
    limit::RequestBodyLimitLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::config::ServerConfig;
use crate::http::request::{extract_props, X_REQUEST_ID};
use crate::http::response;
use crate::observability::metrics;
use crate::render::{RenderJob, Renderer};
use crate::routing::{HttpMethod, RouteRegistry};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<RouteRegistry>,
    pub renderer: Arc<dyn Renderer>,
}

/// HTTP server exposing the document routes.
pub struct HttpServer {
    router: Router,
    config: ServerConfig,
}

impl HttpServer {
    /// Create a new HTTP server over a fully populated registry.
    pub fn new(config: ServerConfig, registry: Arc<RouteRegistry>, renderer: Arc<dyn Renderer>) -> Self {
        let state = AppState { registry, renderer };
        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &ServerConfig, state: AppState) -> Router {
        Router::new()
            .fallback(render_handler)
            .with_state(state)
            .layer(RequestBodyLimitLayer::new(config.max_body_bytes))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
    }

    /// The router, for embedding or driving in tests.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Match the route, validate props, render.
async fn render_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start_time = Instant::now();
    let request_id = request
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
        .to_string();

    let http_method = request.method().clone();
    let uri = request.uri().clone();
    let path = uri.path().to_string();

    tracing::debug!(
        request_id = %request_id,
        method = %http_method,
        path = %path,
        "Document request"
    );

    // 1. Match Route
    let matched = HttpMethod::try_from(&http_method).ok().and_then(|method| {
        state
            .registry
            .match_route(method, &path)
            .map(|route| (method, Arc::clone(route)))
    });
    let Some((method, route)) = matched else {
        tracing::warn!(request_id = %request_id, method = %http_method, path = %path, "No route matched");
        metrics::record_request("none", 404, start_time);
        return response::not_found();
    };

    // 2. Extract Props
    // Over-limit bodies are rejected with 413; other read failures with 400.
    let body = match Bytes::from_request(request, &()).await {
        Ok(bytes) => bytes,
        Err(rejection) => {
            let status = rejection.status();
            tracing::warn!(request_id = %request_id, status = %status, error = %rejection, "Failed to read request body");
            metrics::record_request(route.path(), status.as_u16(), start_time);
            return response::error(status, rejection.body_text());
        }
    };
    let props = match extract_props(method, &uri, &body) {
        Ok(props) => props,
        Err(e) => {
            metrics::record_request(route.path(), 400, start_time);
            return response::error(StatusCode::BAD_REQUEST, e.to_string());
        }
    };

    // 3. Validate
    if let Err(violations) = route.validate_props(&props) {
        tracing::debug!(request_id = %request_id, path = %path, violations = violations.len(), "Props rejected");
        metrics::record_request(route.path(), 400, start_time);
        return response::invalid_props(violations);
    }

    // 4. Render
    let timeout = route.output().timeout();
    let renderer = state.renderer.clone();
    let job = RenderJob {
        route: route.clone(),
        props,
    };
    let rendered = tokio::time::timeout(
        timeout,
        tokio::task::spawn_blocking(move || renderer.render(&job)),
    )
    .await;

    match rendered {
        Ok(Ok(Ok(document))) => {
            metrics::record_request(route.path(), 200, start_time);
            tracing::info!(
                request_id = %request_id,
                path = %path,
                bytes = document.body.len(),
                elapsed_ms = start_time.elapsed().as_millis() as u64,
                "Document rendered"
            );
            ([(header::CONTENT_TYPE, document.content_type)], document.body).into_response()
        }
        Ok(Ok(Err(e))) => {
            tracing::error!(request_id = %request_id, path = %path, error = %e, "Render failed");
            metrics::record_request(route.path(), 500, start_time);
            response::error(StatusCode::INTERNAL_SERVER_ERROR, "Render failed")
        }
        Ok(Err(e)) => {
            tracing::error!(request_id = %request_id, path = %path, error = %e, "Render task panicked");
            metrics::record_request(route.path(), 500, start_time);
            response::error(StatusCode::INTERNAL_SERVER_ERROR, "Render failed")
        }
        Err(_) => {
            tracing::warn!(
                request_id = %request_id,
                path = %path,
                timeout_ms = route.output().timeout_ms,
                "Render timed out"
            );
            metrics::record_request(route.path(), 504, start_time);
            response::error(StatusCode::GATEWAY_TIMEOUT, "Render timed out")
        }
    }
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
