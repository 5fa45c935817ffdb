//! Failure normalization.
//!
//! Both functions are pure: the same input always produces the same
//! `ApiError`, and nothing outside the arguments is consulted.

use serde_json::Value;

use crate::error::ApiError;
use crate::http::{HttpResponse, TransportError};

/// Classify an exchange that produced no response.
pub fn from_transport(err: &TransportError) -> ApiError {
    match err {
        TransportError::Timeout => ApiError::Timeout,
        TransportError::Connect(_) => ApiError::Network,
    }
}

/// Classify a response whose status is not 2xx.
pub fn from_response(response: &HttpResponse) -> ApiError {
    match response.status {
        404 => ApiError::NotFound {
            detail: detail(&response.body),
        },
        500 => ApiError::Server,
        status => ApiError::Http {
            status,
            detail: detail(&response.body),
        },
    }
}

/// Extract a non-empty string `detail` field from a JSON object body.
fn detail(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    match value.get("detail")? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        _ => None,
    }
}
