//! Organization endpoint handlers.

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::Response,
    Json,
};

use super::{bearer_token, respond, SharedState};
use crate::AuthorParams;

/// POST /organizations/{alias}/contributors
pub async fn create_contributor(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Path(org): Path<String>,
    Json(params): Json<AuthorParams>,
) -> Response {
    let token = bearer_token(&headers);
    let mut state = state.write().await;
    respond(
        StatusCode::CREATED,
        state.add_contributor(token.as_deref(), &org, params),
    )
}
