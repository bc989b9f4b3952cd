//! Write.as API client library.
//!
//! A Rust library for the Write.as publishing API. A single low-level
//! client moves requests and decodes the response [`Envelope`]; resource
//! types implement operation traits (Get, Create, Update, Delete) and
//! interpret each endpoint's status codes.
//!
//! # Quick Start
//!
//! ```no_run
//! use writeas::{Collection, CollectionParams, Create, Delete, Get, WriteAsClient};
//!
//! #[tokio::main]
//! async fn main() -> writeas::Result<()> {
//!     let mut client = WriteAsClient::development()?;
//!     client.log_in("demo", "demo").await?;
//!
//!     // Create a blog and read it back
//!     let params = CollectionParams::new("test-collection-123", "Test Collection 123");
//!     let created = Collection::create(&client, params).await?;
//!     let fetched = Collection::get(&client, created.alias.clone()).await?;
//!     println!("Collection: {}", fetched.title);
//!
//!     Collection::delete(&client, created.alias).await?;
//!     client.log_out().await?;
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! The library is organized around four operation traits:
//!
//! - [`Get`] - Fetch a single resource by ID
//! - [`Create`] - Publish a new resource
//! - [`Update`] - Modify an existing resource
//! - [`Delete`] - Remove a resource
//!
//! Operations that don't fit a trait (claiming posts, pinning, Markdown
//! rendering, the user's own posts and collections) are free functions.
//! Session handling lives on [`WriteAsClient`] itself: [`log_in`] and
//! [`log_out`] take `&mut self` because they change the client's token.
//!
//! [`log_in`]: WriteAsClient::log_in
//! [`log_out`]: WriteAsClient::log_out
//!
//! # Configuration
//!
//! Pass a [`ClientConfig`] or read the environment with
//! [`WriteAsClient::from_env`]:
//!
//! - `WRITEAS_API_URL` (optional) - Base URL (defaults to `https://write.as/api`)
//! - `WRITEAS_TOKEN` (optional) - An existing access token

mod auth;
mod client;
mod envelope;
mod error;
mod models;
mod traits;

#[cfg(feature = "test-server")]
pub mod mock_server;

// Re-export core types
pub use client::{ClientConfig, WriteAsClient, API_URL, DEFAULT_TIMEOUT, DEV_API_URL};
pub use envelope::Envelope;
pub use error::{DomainErrorKind, Result, WriteAsError};

// Re-export traits
pub use traits::{Create, Delete, Get, Update};

// Re-export models
pub use models::{
    // Post types
    OwnedPostParams,
    PinnedPostParams,
    Post,
    PostParams,
    PostResult,
    // Collection types
    Collection,
    CollectionParams,
    // User types
    AuthUser,
    User,
    UserSubscription,
    // Author and organization types
    Author,
    AuthorParams,
    OrgMember,
    OrgMemberParams,
    Role,
    // Misc
    Category,
};

// Re-export convenience functions
pub use models::{claim_posts, get_collection_post, get_user_posts, pin_post, unpin_post};
pub use models::{collect_posts, get_collection_posts, get_user_collections};
pub use models::markdown;
