//! Delete trait for removing resources.

use async_trait::async_trait;

use crate::client::WriteAsClient;
use crate::error::Result;

/// Permanently delete a resource.
///
/// A successful call means the server answered with its success status;
/// every other status is reported as an error, never as a silent success.
#[async_trait]
pub trait Delete {
    /// What identifies the resource (and any credential needed to delete it).
    type Id;

    /// Delete the resource.
    ///
    /// # Errors
    ///
    /// Returns an error if the resource is not found, the caller is not
    /// allowed to delete it, or the request fails.
    async fn delete(client: &WriteAsClient, id: Self::Id) -> Result<()>;
}
