//! Collection endpoint handlers.

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::Response,
    Json,
};

use super::{bearer_token, envelope, not_found, respond, respond_empty, SharedState};
use crate::{CollectionParams, OwnedPostParams, PinnedPostParams, PostParams};

/// POST /collections
pub async fn create_collection(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Json(params): Json<CollectionParams>,
) -> Response {
    let token = bearer_token(&headers);
    let mut state = state.write().await;
    respond(
        StatusCode::CREATED,
        state.create_collection(token.as_deref(), params),
    )
}

/// GET /collections/{alias}
pub async fn get_collection(
    State(state): State<SharedState>,
    Path(alias): Path<String>,
) -> Response {
    let state = state.read().await;

    match state.get_collection(&alias) {
        Some(collection) => envelope(StatusCode::OK, collection),
        None => not_found("Collection not found."),
    }
}

/// DELETE /collections/{alias}
pub async fn delete_collection(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Path(alias): Path<String>,
) -> Response {
    let token = bearer_token(&headers);
    let mut state = state.write().await;
    respond_empty(state.delete_collection(token.as_deref(), &alias))
}

/// GET /collections/{alias}/posts
pub async fn get_collection_posts(
    State(state): State<SharedState>,
    Path(alias): Path<String>,
) -> Response {
    let state = state.read().await;

    match state.collection_with_posts(&alias) {
        Some(collection) => envelope(StatusCode::OK, collection),
        None => not_found("Collection not found."),
    }
}

/// POST /collections/{alias}/posts
pub async fn create_collection_post(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Path(alias): Path<String>,
    Json(params): Json<PostParams>,
) -> Response {
    let token = bearer_token(&headers);
    let mut state = state.write().await;
    respond(
        StatusCode::CREATED,
        state.create_post(token.as_deref(), Some(&alias), params),
    )
}

/// GET /collections/{alias}/posts/{slug}
pub async fn get_collection_post(
    State(state): State<SharedState>,
    Path((alias, slug)): Path<(String, String)>,
) -> Response {
    let state = state.read().await;

    match state.collection_post(&alias, &slug) {
        Some(post) => envelope(StatusCode::OK, post),
        None => not_found("Post not found."),
    }
}

/// POST /collections/{alias}/collect
pub async fn collect_posts(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Path(alias): Path<String>,
    Json(posts): Json<Vec<OwnedPostParams>>,
) -> Response {
    let token = bearer_token(&headers);
    let mut state = state.write().await;
    respond(
        StatusCode::OK,
        state.collect_posts(token.as_deref(), &alias, &posts),
    )
}

/// POST /collections/{alias}/pin
pub async fn pin_posts(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Path(alias): Path<String>,
    Json(posts): Json<Vec<PinnedPostParams>>,
) -> Response {
    let token = bearer_token(&headers);
    let mut state = state.write().await;
    respond(
        StatusCode::OK,
        state.set_pinned(token.as_deref(), &alias, &posts, true),
    )
}

/// POST /collections/{alias}/unpin
pub async fn unpin_posts(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Path(alias): Path<String>,
    Json(posts): Json<Vec<PinnedPostParams>>,
) -> Response {
    let token = bearer_token(&headers);
    let mut state = state.write().await;
    respond(
        StatusCode::OK,
        state.set_pinned(token.as_deref(), &alias, &posts, false),
    )
}
