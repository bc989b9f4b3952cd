//! HTTP request handlers for the mock server.
//!
//! Every response uses the Write.as envelope: `{"code", "data"}` on success
//! and `{"code", "error_msg"}` on failure.

pub mod collections;
pub mod organizations;
pub mod posts;
pub mod sessions;

pub use collections::*;
pub use organizations::*;
pub use posts::*;
pub use sessions::*;

use std::sync::Arc;

use axum::{
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tokio::sync::RwLock;

use crate::mock_server::state::{ApiFailure, ApiResult, MockState};

pub(crate) type SharedState = Arc<RwLock<MockState>>;

/// The bearer token from the `Authorization` header, if any.
pub(crate) fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::to_string)
}

/// Success envelope with a payload.
pub(crate) fn envelope<T: Serialize>(status: StatusCode, data: T) -> Response {
    (
        status,
        Json(serde_json::json!({
            "code": status.as_u16(),
            "data": data,
        })),
    )
        .into_response()
}

/// Error envelope.
pub(crate) fn failure(failure: ApiFailure) -> Response {
    let status = StatusCode::from_u16(failure.code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (
        status,
        Json(serde_json::json!({
            "code": failure.code,
            "error_msg": failure.message,
        })),
    )
        .into_response()
}

/// Map a state result onto a response with `status` on success.
pub(crate) fn respond<T: Serialize>(status: StatusCode, result: ApiResult<T>) -> Response {
    match result {
        Ok(data) => envelope(status, data),
        Err(f) => failure(f),
    }
}

/// Map a state result with no payload onto 204.
pub(crate) fn respond_empty(result: ApiResult<()>) -> Response {
    match result {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(f) => failure(f),
    }
}

/// 404 envelope for a missing resource.
pub(crate) fn not_found(message: &str) -> Response {
    failure(ApiFailure::new(404, message))
}
