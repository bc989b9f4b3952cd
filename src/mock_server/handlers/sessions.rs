//! Authentication and current-user endpoint handlers.

use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::Response,
    Json,
};
use serde::Deserialize;

use super::{bearer_token, respond, respond_empty, SharedState};

/// Login request body.
#[derive(Debug, Deserialize)]
pub struct LoginParams {
    #[serde(default)]
    pub alias: String,
    #[serde(default)]
    pub pass: String,
}

/// Query parameters for `GET /me`.
#[derive(Debug, Default, Deserialize)]
pub struct MeQuery {
    pub verbose: Option<bool>,
}

/// POST /auth/login
pub async fn login(State(state): State<SharedState>, Json(params): Json<LoginParams>) -> Response {
    let mut state = state.write().await;
    respond(StatusCode::OK, state.login(&params.alias, &params.pass))
}

/// DELETE /auth/me
pub async fn logout(State(state): State<SharedState>, headers: HeaderMap) -> Response {
    let token = bearer_token(&headers);
    let mut state = state.write().await;
    respond_empty(state.logout(token.as_deref()))
}

/// GET /me
pub async fn get_me(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Query(query): Query<MeQuery>,
) -> Response {
    let token = bearer_token(&headers);
    let state = state.read().await;
    respond(
        StatusCode::OK,
        state.get_me(token.as_deref(), query.verbose.unwrap_or(false)),
    )
}

/// GET /me/posts
pub async fn get_my_posts(State(state): State<SharedState>, headers: HeaderMap) -> Response {
    let token = bearer_token(&headers);
    let state = state.read().await;
    respond(StatusCode::OK, state.user_posts(token.as_deref()))
}

/// GET /me/collections
pub async fn get_my_collections(State(state): State<SharedState>, headers: HeaderMap) -> Response {
    let token = bearer_token(&headers);
    let state = state.read().await;
    respond(StatusCode::OK, state.user_collections(token.as_deref()))
}
