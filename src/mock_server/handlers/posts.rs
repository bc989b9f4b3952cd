//! Post endpoint handlers.

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::Response,
    Json,
};
use serde::Deserialize;

use super::{bearer_token, envelope, not_found, respond, respond_empty, SharedState};
use crate::{OwnedPostParams, PostParams};

/// Query parameters for deleting a post.
#[derive(Debug, Default, Deserialize)]
pub struct DeletePostQuery {
    pub token: Option<String>,
}

/// POST /posts
pub async fn create_post(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Json(params): Json<PostParams>,
) -> Response {
    let token = bearer_token(&headers);
    let mut state = state.write().await;
    respond(
        StatusCode::CREATED,
        state.create_post(token.as_deref(), None, params),
    )
}

/// GET /posts/{id}
pub async fn get_post(State(state): State<SharedState>, Path(id): Path<String>) -> Response {
    let state = state.read().await;

    match state.get_post(&id) {
        Some(post) => envelope(StatusCode::OK, post),
        None => not_found("Post not found."),
    }
}

/// POST /posts/{id}
pub async fn update_post(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(params): Json<PostParams>,
) -> Response {
    let token = bearer_token(&headers);
    let mut state = state.write().await;
    respond(
        StatusCode::OK,
        state.update_post(token.as_deref(), &id, params),
    )
}

/// DELETE /posts/{id}?token=
pub async fn delete_post(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Query(query): Query<DeletePostQuery>,
) -> Response {
    let token = bearer_token(&headers);
    let mut state = state.write().await;
    respond_empty(state.delete_post(token.as_deref(), &id, query.token.as_deref()))
}

/// POST /posts/claim
pub async fn claim_posts(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Json(posts): Json<Vec<OwnedPostParams>>,
) -> Response {
    let token = bearer_token(&headers);
    let mut state = state.write().await;
    respond(StatusCode::OK, state.claim_posts(token.as_deref(), &posts))
}
