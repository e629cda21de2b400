//! Error responses.
//!
//! # Design Decisions
//! - Every failure is a JSON body `{"error": ..., "violations": [...]}`
//! - Unknown path and disallowed method are the same 404

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::schema::SchemaViolation;

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub violations: Vec<SchemaViolation>,
}

pub fn error(status: StatusCode, message: impl Into<String>) -> Response {
    let body = ErrorBody {
        error: message.into(),
        violations: Vec::new(),
    };
    (status, Json(body)).into_response()
}

pub fn not_found() -> Response {
    error(StatusCode::NOT_FOUND, "No matching route found")
}

pub fn invalid_props(violations: Vec<SchemaViolation>) -> Response {
    let body = ErrorBody {
        error: "Props do not match the route schema".to_string(),
        violations,
    };
    (StatusCode::BAD_REQUEST, Json(body)).into_response()
}
