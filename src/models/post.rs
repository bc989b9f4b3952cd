//! Post model and trait implementations.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::client::WriteAsClient;
use crate::error::{DomainErrorKind, Result, WriteAsError};
use crate::models::collection::Collection;
use crate::models::path_segment;
use crate::traits::{Create, Delete, Get, Update};

/// A Write.as post.
///
/// Anonymous posts come back with an edit `token` exactly once, on
/// creation. Posts owned by a user are edited with the session token
/// instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    /// Post ID.
    pub id: String,

    /// URL slug, set for posts in a collection.
    #[serde(default)]
    pub slug: Option<String>,

    /// Edit token for anonymous posts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    /// Display font, e.g. "norm", "sans", "mono".
    #[serde(rename = "appearance", default)]
    pub font: Option<String>,

    /// ISO 639-1 language code.
    #[serde(default)]
    pub language: Option<String>,

    /// Whether the post is written right-to-left.
    #[serde(default)]
    pub rtl: Option<bool>,

    /// When the post was created.
    #[serde(default)]
    pub created: Option<DateTime<Utc>>,

    /// When the post was last updated.
    #[serde(default)]
    pub updated: Option<DateTime<Utc>>,

    /// Post title.
    #[serde(default)]
    pub title: String,

    /// Raw post body.
    #[serde(rename = "body", default)]
    pub content: String,

    /// View count.
    #[serde(default)]
    pub views: i64,

    /// Hashtags found in the body.
    #[serde(default)]
    pub tags: Vec<String>,

    /// Image URLs found in the body.
    #[serde(default)]
    pub images: Vec<String>,

    /// Username of the owner.
    #[serde(rename = "owner", default, skip_serializing_if = "Option::is_none")]
    pub owner_name: Option<String>,

    /// Collection this post belongs to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collection: Option<Box<Collection>>,
}

impl Post {
    /// Returns true if the post lives in a collection.
    pub fn is_collected(&self) -> bool {
        self.collection.is_some()
    }

    /// The identifier pair needed to delete or claim this post anonymously.
    pub fn owned_params(&self) -> OwnedPostParams {
        OwnedPostParams {
            id: self.id.clone(),
            token: self.token.clone(),
        }
    }
}

/// Parameters for creating or updating a post.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PostParams {
    /// Edit token, needed to update an anonymous post.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Raw post body (Markdown).
    #[serde(rename = "body")]
    pub content: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub font: Option<String>,

    #[serde(rename = "rtl", skip_serializing_if = "Option::is_none")]
    pub is_rtl: Option<bool>,

    #[serde(rename = "lang", skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    /// Backdate the post.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated: Option<DateTime<Utc>>,

    /// Crosspost targets, e.g. `{"twitter": "@user"}`.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub crosspost: Vec<HashMap<String, String>>,

    /// Alias of the collection to publish into. Not sent in the body.
    #[serde(skip)]
    pub collection: Option<String>,
}

impl PostParams {
    /// Parameters for a post with the given body.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn with_font(mut self, font: impl Into<String>) -> Self {
        self.font = Some(font.into());
        self
    }

    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Publish into the collection with this alias.
    #[must_use]
    pub fn in_collection(mut self, alias: impl Into<String>) -> Self {
        self.collection = Some(alias.into());
        self
    }
}

/// A post referenced by ID, with its edit token when the caller does not
/// own it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OwnedPostParams {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl OwnedPostParams {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            token: None,
        }
    }

    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }
}

/// Parameters for pinning or unpinning a post on a collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PinnedPostParams {
    pub id: String,
    /// 1-based position among pinned posts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<u32>,
}

/// Outcome for one post in a batch operation (claim, collect, pin).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub code: u16,
    #[serde(rename = "error_msg", default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post: Option<Post>,
}

impl PostResult {
    /// Returns true if this post was processed.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.code)
    }
}

#[async_trait]
impl Get for Post {
    type Id = String; // Post ID

    #[tracing::instrument(skip(client))]
    async fn get(client: &WriteAsClient, id: String) -> Result<Self> {
        let path = format!("posts/{}", path_segment(&id, "post ID")?);

        let env = client.get::<Post>(&path).await?;
        match env.code {
            200 => env.into_data(),
            404 => Err(env.error(DomainErrorKind::NotFound, "Post not found.")),
            410 => Err(env.error(DomainErrorKind::Gone, "Post unpublished.")),
            _ => Err(env.unexpected("getting post")),
        }
    }
}

#[async_trait]
impl Create for Post {
    type Params = PostParams;

    #[tracing::instrument(skip(client, params), fields(collection = ?params.collection))]
    async fn create(client: &WriteAsClient, params: PostParams) -> Result<Self> {
        let path = match &params.collection {
            Some(alias) => format!(
                "collections/{}/posts",
                path_segment(alias, "collection alias")?
            ),
            None => "posts".to_string(),
        };

        let env = client.post::<_, Post>(&path, &params).await?;
        match env.code {
            201 => env.into_data(),
            400 => Err(env.bad_request()),
            401 => Err(env.not_authenticated()),
            403 => Err(env.error(
                DomainErrorKind::Forbidden,
                "Not allowed to publish to this collection.",
            )),
            404 => Err(env.error(DomainErrorKind::NotFound, "Collection not found.")),
            _ => Err(env.unexpected("creating post")),
        }
    }
}

#[async_trait]
impl Update for Post {
    type Id = String; // Post ID
    type Params = PostParams;

    #[tracing::instrument(skip(client, params))]
    async fn update(client: &WriteAsClient, id: String, params: PostParams) -> Result<Self> {
        let path = format!("posts/{}", path_segment(&id, "post ID")?);

        let env = client.post::<_, Post>(&path, &params).await?;
        match env.code {
            200 => env.into_data(),
            400 => Err(env.bad_request()),
            401 => Err(env.not_authenticated()),
            403 => Err(env.error(DomainErrorKind::Forbidden, "Not allowed to update post.")),
            404 => Err(env.error(DomainErrorKind::NotFound, "Post not found.")),
            _ => Err(env.unexpected("updating post")),
        }
    }
}

#[async_trait]
impl Delete for Post {
    type Id = OwnedPostParams;

    #[tracing::instrument(skip(client, post), fields(id = %post.id))]
    async fn delete(client: &WriteAsClient, post: OwnedPostParams) -> Result<()> {
        let path = format!("posts/{}", path_segment(&post.id, "post ID")?);

        let env = match &post.token {
            Some(token) => {
                client
                    .delete_with_query(&path, &[("token", token.as_str())])
                    .await?
            }
            None => client.delete(&path).await?,
        };
        match env.code {
            204 => Ok(()),
            400 => Err(env.bad_request()),
            401 => Err(env.not_authenticated()),
            403 => Err(env.error(DomainErrorKind::Forbidden, "Not allowed to delete post.")),
            404 => Err(env.error(DomainErrorKind::NotFound, "Post not found.")),
            _ => Err(env.unexpected("deleting post")),
        }
    }
}

/// Claim anonymous posts for the logged-in user.
///
/// Each result reports whether that post was claimed; a failed claim for one
/// post does not fail the call.
#[tracing::instrument(skip(client, posts), fields(count = posts.len()))]
pub async fn claim_posts(
    client: &WriteAsClient,
    posts: &[OwnedPostParams],
) -> Result<Vec<PostResult>> {
    let env = client.post::<_, Vec<PostResult>>("posts/claim", posts).await?;
    match env.code {
        200 => env.into_data(),
        400 => Err(env.bad_request()),
        401 => Err(env.not_authenticated()),
        _ => Err(env.unexpected("claiming posts")),
    }
}

/// Get all posts owned by the logged-in user.
#[tracing::instrument(skip(client))]
pub async fn get_user_posts(client: &WriteAsClient) -> Result<Vec<Post>> {
    let env = client.get::<Vec<Post>>("me/posts").await?;
    match env.code {
        200 => env.into_data(),
        401 => Err(env.not_authenticated()),
        _ => Err(env.unexpected("getting user posts")),
    }
}

/// Get a post in a collection by its slug.
#[tracing::instrument(skip(client))]
pub async fn get_collection_post(
    client: &WriteAsClient,
    alias: &str,
    slug: &str,
) -> Result<Post> {
    let path = format!(
        "collections/{}/posts/{}",
        path_segment(alias, "collection alias")?,
        path_segment(slug, "post slug")?
    );

    let env = client.get::<Post>(&path).await?;
    match env.code {
        200 => env.into_data(),
        404 => Err(env.error(DomainErrorKind::NotFound, "Post not found.")),
        410 => Err(env.error(DomainErrorKind::Gone, "Post unpublished.")),
        _ => Err(env.unexpected("getting post")),
    }
}

/// Pin a post to the top of a collection.
pub async fn pin_post(
    client: &WriteAsClient,
    alias: &str,
    params: &PinnedPostParams,
) -> Result<()> {
    pin_request(client, alias, "pin", params, "pinning post").await
}

/// Unpin a post from a collection.
pub async fn unpin_post(
    client: &WriteAsClient,
    alias: &str,
    params: &PinnedPostParams,
) -> Result<()> {
    pin_request(client, alias, "unpin", params, "unpinning post").await
}

#[tracing::instrument(skip(client, params), fields(id = %params.id))]
async fn pin_request(
    client: &WriteAsClient,
    alias: &str,
    action: &str,
    params: &PinnedPostParams,
    describe: &str,
) -> Result<()> {
    let path = format!(
        "collections/{}/{action}",
        path_segment(alias, "collection alias")?
    );

    let env = client
        .post::<_, Vec<PostResult>>(&path, std::slice::from_ref(params))
        .await?;
    match env.code {
        200 => {}
        400 => return Err(env.bad_request()),
        401 => return Err(env.not_authenticated()),
        404 => return Err(env.error(DomainErrorKind::NotFound, "Collection not found.")),
        _ => return Err(env.unexpected(describe)),
    }

    // Exactly one result comes back for the one post sent
    let results = env.into_data()?;
    match results.as_slice() {
        [result] if result.code == 200 => Ok(()),
        [result] => Err(WriteAsError::Domain {
            kind: DomainErrorKind::from_status(result.code),
            message: format!(
                "Problem {describe}: {}. {}",
                result.code,
                result.error_message.as_deref().unwrap_or_default()
            )
            .trim_end()
            .to_string(),
            status_code: result.code,
            server_message: result.error_message.clone(),
        }),
        _ => Err(WriteAsError::MissingData { status: 200 }),
    }
}
