//! Get trait for fetching single resources.

use async_trait::async_trait;

use crate::client::WriteAsClient;
use crate::error::Result;

/// Fetch a single resource by ID.
///
/// Implement this trait for resource types that can be fetched individually
/// by a unique identifier (a post ID or a collection alias).
///
/// # Example
///
/// ```ignore
/// use writeas::{WriteAsClient, Collection, Get};
///
/// let client = WriteAsClient::new()?;
/// let blog = Collection::get(&client, "blog".to_string()).await?;
/// ```
#[async_trait]
pub trait Get: Sized {
    /// The ID type for this resource.
    type Id;

    /// Fetch the resource by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the resource is not found or the request fails.
    async fn get(client: &WriteAsClient, id: Self::Id) -> Result<Self>;
}
