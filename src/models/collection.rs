//! Collection model and trait implementations.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::client::WriteAsClient;
use crate::error::{DomainErrorKind, Result};
use crate::models::path_segment;
use crate::models::post::{OwnedPostParams, Post, PostResult};
use crate::traits::{Create, Delete, Get};

/// A collection of posts. Blogs are a type of collection on Write.as.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    /// Collection alias, used in its URL.
    pub alias: String,

    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub description: String,

    /// Custom CSS.
    #[serde(default)]
    pub style_sheet: String,

    #[serde(default)]
    pub private: bool,

    #[serde(default)]
    pub views: i64,

    /// Custom domain, if configured.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,

    /// Anonymous inbox email address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Public URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(default)]
    pub total_posts: u64,

    /// Posts, only present on the collection-posts endpoint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub posts: Option<Vec<Post>>,
}

/// Parameters for creating a collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionParams {
    pub alias: String,
    pub title: String,
}

impl CollectionParams {
    pub fn new(alias: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            alias: alias.into(),
            title: title.into(),
        }
    }
}

#[async_trait]
impl Get for Collection {
    type Id = String; // Collection alias

    #[tracing::instrument(skip(client))]
    async fn get(client: &WriteAsClient, alias: String) -> Result<Self> {
        let path = format!("collections/{}", path_segment(&alias, "collection alias")?);

        let env = client.get::<Collection>(&path).await?;
        match env.code {
            200 => env.into_data(),
            404 => Err(env.error(DomainErrorKind::NotFound, "Collection not found.")),
            _ => Err(env.unexpected("getting collection")),
        }
    }
}

#[async_trait]
impl Create for Collection {
    type Params = CollectionParams;

    /// Requires a paid Write.as plan on the production service.
    #[tracing::instrument(skip(client))]
    async fn create(client: &WriteAsClient, params: CollectionParams) -> Result<Self> {
        let env = client.post::<_, Collection>("collections", &params).await?;
        match env.code {
            201 => env.into_data(),
            400 => Err(env.bad_request()),
            401 => Err(env.not_authenticated()),
            403 => Err(env.error(DomainErrorKind::Forbidden, "Casual or Pro user required.")),
            409 => Err(env.error(
                DomainErrorKind::Conflict,
                "Collection name is already taken.",
            )),
            412 => Err(env.error(
                DomainErrorKind::QuotaExceeded,
                "Reached max collection quota.",
            )),
            _ => Err(env.unexpected("creating collection")),
        }
    }
}

#[async_trait]
impl Delete for Collection {
    type Id = String; // Collection alias

    /// Posts in the collection become anonymous.
    #[tracing::instrument(skip(client))]
    async fn delete(client: &WriteAsClient, alias: String) -> Result<()> {
        let path = format!("collections/{}", path_segment(&alias, "collection alias")?);

        let env = client.delete(&path).await?;
        match env.code {
            204 => Ok(()),
            400 => Err(env.bad_request()),
            401 => Err(env.not_authenticated()),
            403 => Err(env.error(
                DomainErrorKind::Forbidden,
                "Not allowed to delete this collection.",
            )),
            404 => Err(env.error(DomainErrorKind::NotFound, "Collection not found.")),
            _ => Err(env.unexpected("deleting collection")),
        }
    }
}

/// Get the posts in a collection.
#[tracing::instrument(skip(client))]
pub async fn get_collection_posts(client: &WriteAsClient, alias: &str) -> Result<Vec<Post>> {
    let path = format!("collections/{}/posts", path_segment(alias, "collection alias")?);

    let env = client.get::<Collection>(&path).await?;
    match env.code {
        200 => Ok(env.into_data()?.posts.unwrap_or_default()),
        404 => Err(env.error(DomainErrorKind::NotFound, "Collection not found.")),
        _ => Err(env.unexpected("getting collection")),
    }
}

/// Get the logged-in user's collections.
#[tracing::instrument(skip(client))]
pub async fn get_user_collections(client: &WriteAsClient) -> Result<Vec<Collection>> {
    let env = client.get::<Vec<Collection>>("me/collections").await?;
    match env.code {
        200 => env.into_data(),
        401 => Err(env.not_authenticated()),
        _ => Err(env.unexpected("getting collections")),
    }
}

/// Move posts into a collection.
///
/// Posts not owned by the logged-in user need their edit token.
#[tracing::instrument(skip(client, posts), fields(count = posts.len()))]
pub async fn collect_posts(
    client: &WriteAsClient,
    alias: &str,
    posts: &[OwnedPostParams],
) -> Result<Vec<PostResult>> {
    let path = format!("collections/{}/collect", path_segment(alias, "collection alias")?);

    let env = client.post::<_, Vec<PostResult>>(&path, posts).await?;
    match env.code {
        200 => env.into_data(),
        400 => Err(env.bad_request()),
        401 => Err(env.not_authenticated()),
        404 => Err(env.error(DomainErrorKind::NotFound, "Collection not found.")),
        _ => Err(env.unexpected("collecting posts")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collection_deserializes_with_posts() {
        let json = serde_json::json!({
            "alias": "tester",
            "title": "Tester",
            "description": "",
            "style_sheet": "",
            "private": false,
            "views": 42,
            "total_posts": 1,
            "posts": [{"id": "p1", "slug": "hello", "body": "Hello"}]
        });
        let coll: Collection = serde_json::from_value(json).unwrap();

        assert_eq!(coll.alias, "tester");
        assert_eq!(coll.views, 42);
        let posts = coll.posts.expect("posts present");
        assert_eq!(posts[0].slug.as_deref(), Some("hello"));
    }

    #[test]
    fn test_collection_serialization_skips_absent_optionals() {
        let coll = Collection {
            alias: "blog".to_string(),
            title: "Blog".to_string(),
            description: String::new(),
            style_sheet: String::new(),
            private: false,
            views: 0,
            domain: None,
            email: None,
            url: None,
            total_posts: 0,
            posts: None,
        };
        let json = serde_json::to_value(&coll).unwrap();
        assert!(json.get("posts").is_none());
        assert!(json.get("domain").is_none());
        assert_eq!(json["alias"], "blog");
    }
}
