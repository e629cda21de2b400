//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, request ID, tracing, body limit)
//!     → routing (registry lookup by method + exact path)
//!     → request.rs (props from query string or JSON body)
//!     → route validator (schema check)
//!     → render (Renderer on the blocking pool, route timeout)
//!     → response.rs (error bodies) or rendered document
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use request::{extract_props, PropsError, X_REQUEST_ID};
pub use server::{AppState, HttpServer};
