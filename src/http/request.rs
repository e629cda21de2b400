//! Request props extraction.
//!
//! # Responsibilities
//! - Read the props a client sent for a document
//! - GET: query string, every value a string
//! - POST: JSON body, empty body meaning no props
//!
//! # Design Decisions
//! - Props are plain JSON; the route's validator decides what is acceptable

use std::collections::HashMap;

use axum::body::Bytes;
use axum::extract::Query;
use axum::http::Uri;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::routing::HttpMethod;

/// Header carrying the request correlation ID.
pub const X_REQUEST_ID: &str = "x-request-id";

/// Props could not be read from the request.
#[derive(Debug, Error)]
pub enum PropsError {
    #[error("invalid query string: {0}")]
    Query(String),

    #[error("request body is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Extract the props for `method` from the request URI and body.
pub fn extract_props(method: HttpMethod, uri: &Uri, body: &Bytes) -> Result<Value, PropsError> {
    match method {
        HttpMethod::Get => {
            let Query(params) = Query::<HashMap<String, String>>::try_from_uri(uri)
                .map_err(|e| PropsError::Query(e.body_text()))?;
            let object: Map<String, Value> = params
                .into_iter()
                .map(|(key, value)| (key, Value::String(value)))
                .collect();
            Ok(Value::Object(object))
        }
        HttpMethod::Post if body.iter().all(u8::is_ascii_whitespace) => Ok(Value::Object(Map::new())),
        HttpMethod::Post => Ok(serde_json::from_slice(body)?),
    }
}
