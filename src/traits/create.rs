//! Create trait for publishing new resources.

use async_trait::async_trait;

use crate::client::WriteAsClient;
use crate::error::Result;

/// Create a new resource.
///
/// # Example
///
/// ```ignore
/// use writeas::{WriteAsClient, Post, PostParams, Create};
///
/// let client = WriteAsClient::new()?;
/// let post = Post::create(&client, PostParams::new("Hello, world.")).await?;
/// println!("edit token: {:?}", post.token);
/// ```
#[async_trait]
pub trait Create: Sized {
    /// Parameters describing the new resource.
    type Params;

    /// Create the resource and return it as stored by the server.
    ///
    /// # Errors
    ///
    /// Returns an error if the server rejects the request or it fails.
    async fn create(client: &WriteAsClient, params: Self::Params) -> Result<Self>;
}
