//! Mock Write.as API server.
//!
//! Provides an axum-based HTTP server that simulates the Write.as API.

use std::sync::Arc;

use axum::{
    routing::{delete, get, post},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

use super::fixtures::{DefaultScenario, Fixtures};
use super::handlers;
use super::state::MockState;

/// A mock Write.as API server for testing.
///
/// The server runs in the background and can be used to test the client
/// against a realistic API implementation.
pub struct MockServer {
    /// The URL where the server is listening.
    url: String,
    /// Handle to the server task.
    handle: JoinHandle<()>,
    /// Shared state that can be modified during tests.
    state: Arc<RwLock<MockState>>,
}

impl MockServer {
    /// Start a new mock server with default fixtures.
    ///
    /// The server listens on a random available port and returns immediately.
    /// Use `url()` to get the server's base URL.
    pub async fn start() -> Self {
        Self::with_state(Self::default_state()).await
    }

    /// Start a mock server with empty state.
    ///
    /// Useful when you want to control exactly what data is available.
    pub async fn start_empty() -> Self {
        Self::with_state(MockState::new()).await
    }

    /// Start a mock server with custom state.
    pub async fn with_state(state: MockState) -> Self {
        let shared_state = state.shared();
        let app = Self::create_router(shared_state.clone());

        // Bind to a random available port
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to address");
        let addr = listener.local_addr().expect("Failed to get local address");

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Server error");
        });

        Self {
            url: format!("http://{}", addr),
            handle,
            state: shared_state,
        }
    }

    /// Get the base URL of the mock server.
    ///
    /// Use this URL as the `ClientConfig` URL when testing.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Get access to the server's shared state.
    ///
    /// This allows inspecting or modifying the mock data during a test.
    pub fn state(&self) -> Arc<RwLock<MockState>> {
        self.state.clone()
    }

    /// Shutdown the server.
    ///
    /// This aborts the server task. It's safe to call multiple times.
    pub async fn shutdown(self) {
        self.handle.abort();
        let _ = self.handle.await;
    }

    /// Create the default state with common test fixtures.
    fn default_state() -> MockState {
        let scenario = Fixtures::default_scenario();
        Self::state_from_scenario(scenario)
    }

    /// Create state from a scenario.
    fn state_from_scenario(scenario: DefaultScenario) -> MockState {
        let mut state = MockState::new();

        for (username, password, pro) in scenario.users {
            state = state.with_user(username, password, pro);
        }

        for (owner, collection) in scenario.collections {
            state = state.with_collection(owner, collection);
        }

        for (post, owner, collection) in scenario.posts {
            state = state.with_post(post, owner, collection);
        }

        for org in scenario.organizations {
            state = state.with_organization(org);
        }

        state
    }

    /// Create the axum router with all routes.
    pub(crate) fn create_router(state: Arc<RwLock<MockState>>) -> Router {
        Router::new()
            // Session routes
            .route("/auth/login", post(handlers::login))
            .route("/auth/me", delete(handlers::logout))
            .route("/me", get(handlers::get_me))
            .route("/me/posts", get(handlers::get_my_posts))
            .route("/me/collections", get(handlers::get_my_collections))
            // Post routes
            .route("/posts", post(handlers::create_post))
            .route("/posts/claim", post(handlers::claim_posts))
            .route(
                "/posts/:id",
                get(handlers::get_post)
                    .post(handlers::update_post)
                    .delete(handlers::delete_post),
            )
            // Collection routes
            .route("/collections", post(handlers::create_collection))
            .route(
                "/collections/:alias",
                get(handlers::get_collection).delete(handlers::delete_collection),
            )
            .route(
                "/collections/:alias/posts",
                get(handlers::get_collection_posts).post(handlers::create_collection_post),
            )
            .route(
                "/collections/:alias/posts/:slug",
                get(handlers::get_collection_post),
            )
            .route("/collections/:alias/collect", post(handlers::collect_posts))
            .route("/collections/:alias/pin", post(handlers::pin_posts))
            .route("/collections/:alias/unpin", post(handlers::unpin_posts))
            // Organization routes
            .route(
                "/organizations/:alias/contributors",
                post(handlers::create_contributor),
            )
            // Health check
            .route("/health", get(health_check))
            .with_state(state)
    }
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "ok"
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ClientConfig, Collection, Get, WriteAsClient};
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    fn client_for(server: &MockServer) -> WriteAsClient {
        WriteAsClient::with_config(ClientConfig::default().with_url(server.url())).unwrap()
    }

    #[tokio::test]
    async fn test_server_starts_and_responds() {
        let server = MockServer::start().await;

        // Server should be accessible
        let client = reqwest::Client::new();
        let response = client
            .get(format!("{}/health", server.url()))
            .send()
            .await
            .expect("Failed to send request");

        assert!(response.status().is_success());
        assert_eq!(response.text().await.unwrap(), "ok");

        server.shutdown().await;
    }

    #[tokio::test]
    async fn test_router_answers_without_network() {
        let app = MockServer::create_router(MockServer::default_state().shared());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/collections/tester")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_get_collection_with_client() {
        let server = MockServer::start().await;
        let client = client_for(&server);

        let collection = Collection::get(&client, "tester".to_string())
            .await
            .expect("Failed to get collection");

        assert_eq!(collection.title, "Tester");
        assert_eq!(collection.total_posts, 2);

        server.shutdown().await;
    }

    #[tokio::test]
    async fn test_empty_server() {
        let server = MockServer::start_empty().await;
        let client = client_for(&server);

        let result = Collection::get(&client, "tester".to_string()).await;

        assert!(result.unwrap_err().is_not_found());

        server.shutdown().await;
    }

    #[tokio::test]
    async fn test_custom_state() {
        let state = MockState::new().with_collection(
            "someone",
            Fixtures::minimal_collection("my-blog", "My Custom Blog"),
        );

        let server = MockServer::with_state(state).await;
        let client = client_for(&server);

        let collection = Collection::get(&client, "my-blog".to_string())
            .await
            .expect("Failed to get collection");

        assert_eq!(collection.title, "My Custom Blog");

        server.shutdown().await;
    }
}
