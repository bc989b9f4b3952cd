//! Update trait for modifying resources.

use async_trait::async_trait;

use crate::client::WriteAsClient;
use crate::error::Result;

/// Update an existing resource.
///
/// # Example
///
/// ```ignore
/// use writeas::{WriteAsClient, Post, PostParams, Update};
///
/// let client = WriteAsClient::new()?;
/// let params = PostParams::new("Now it's been updated!").with_token(token);
/// let updated = Post::update(&client, post_id, params).await?;
/// ```
#[async_trait]
pub trait Update: Sized {
    /// The ID type for this resource.
    type Id;

    /// Parameters for the update.
    type Params;

    /// Update the resource and return the updated version.
    ///
    /// # Errors
    ///
    /// Returns an error if the resource is not found or the request fails.
    async fn update(client: &WriteAsClient, id: Self::Id, params: Self::Params) -> Result<Self>;
}
