//! Mock Write.as API server for E2E testing.
//!
//! This module provides an in-memory mock server that simulates the Write.as
//! API for integration and end-to-end testing. Unlike wiremock which mocks at
//! the HTTP level per-test, this server maintains state across requests
//! (sessions, ownership, quotas), enabling realistic workflow testing.
//!
//! # Example
//!
//! ```ignore
//! use writeas::mock_server::MockServer;
//! use writeas::{ClientConfig, Collection, Get, WriteAsClient};
//!
//! #[tokio::test]
//! async fn test_workflow() {
//!     let server = MockServer::start().await;
//!     let mut client =
//!         WriteAsClient::with_config(ClientConfig::default().with_url(server.url())).unwrap();
//!
//!     // Server comes with default fixtures
//!     client.log_in("demo", "demo").await.unwrap();
//!     let blog = Collection::get(&client, "tester".to_string()).await.unwrap();
//!     assert_eq!(blog.title, "Tester");
//!
//!     server.shutdown().await;
//! }
//! ```

mod fixtures;
mod handlers;
mod server;
mod state;

pub use fixtures::Fixtures;
pub use server::MockServer;
pub use state::{ApiFailure, ApiResult, MockState, MockUser, StoredCollection, StoredPost};
