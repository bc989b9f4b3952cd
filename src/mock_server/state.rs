//! Mock server state management.
//!
//! Provides the in-memory data store for the mock Write.as API server. The
//! state methods hold the endpoint rules (ownership, quotas, conflicts) so
//! handlers only translate between HTTP and these calls.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;

use crate::{
    AuthUser, Author, AuthorParams, Collection, CollectionParams, OwnedPostParams,
    PinnedPostParams, Post, PostParams, PostResult, User, UserSubscription,
};

/// Default number of collections a user may own.
pub const DEFAULT_COLLECTION_QUOTA: usize = 5;

/// A request the mock API refuses, with the status it answers with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiFailure {
    pub code: u16,
    pub message: String,
}

impl ApiFailure {
    pub fn new(code: u16, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

/// Outcome of a state operation.
pub type ApiResult<T> = Result<T, ApiFailure>;

/// A registered account.
#[derive(Debug, Clone)]
pub struct MockUser {
    pub user: User,
    pub password: String,
    /// Paid accounts may create collections.
    pub pro: bool,
}

/// A post together with the server-side fields clients never see.
#[derive(Debug, Clone)]
pub struct StoredPost {
    pub post: Post,
    pub edit_token: String,
    pub owner: Option<String>,
    pub collection: Option<String>,
    pub pinned: Option<u32>,
}

/// A collection and its owner.
#[derive(Debug, Clone)]
pub struct StoredCollection {
    pub collection: Collection,
    pub owner: String,
}

/// Shared state for the mock server.
///
/// This struct holds all the mock data that the server will serve.
/// It's wrapped in `Arc<RwLock<_>>` for concurrent access.
#[derive(Debug)]
pub struct MockState {
    /// Accounts indexed by username.
    pub users: HashMap<String, MockUser>,

    /// Access token to username.
    pub sessions: HashMap<String, String>,

    /// Posts indexed by ID.
    pub posts: HashMap<String, StoredPost>,

    /// Collections indexed by alias.
    pub collections: HashMap<String, StoredCollection>,

    /// Contributors indexed by organization alias. An organization exists
    /// when its alias is a key here.
    pub organizations: HashMap<String, Vec<Author>>,

    /// Maximum collections per user before 412.
    pub collection_quota: usize,

    next_id: u64,
}

impl Default for MockState {
    fn default() -> Self {
        Self {
            users: HashMap::new(),
            sessions: HashMap::new(),
            posts: HashMap::new(),
            collections: HashMap::new(),
            organizations: HashMap::new(),
            collection_quota: DEFAULT_COLLECTION_QUOTA,
            next_id: 1,
        }
    }
}

impl MockState {
    /// Create a new empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create state wrapped in Arc<RwLock> for sharing.
    pub fn shared(self) -> Arc<RwLock<Self>> {
        Arc::new(RwLock::new(self))
    }

    /// Add an account.
    pub fn with_user(mut self, username: &str, password: &str, pro: bool) -> Self {
        let user = User {
            username: username.to_string(),
            email: Some(format!("{username}@example.com")),
            created: Some(Utc::now()),
            subscription: pro.then(|| UserSubscription {
                name: "Pro".to_string(),
                begin: Some(Utc::now()),
                end: None,
                auto_renew: true,
                active: true,
                delinquent: false,
            }),
        };
        self.users.insert(
            username.to_string(),
            MockUser {
                user,
                password: password.to_string(),
                pro,
            },
        );
        self
    }

    /// Add a collection owned by `owner`.
    pub fn with_collection(mut self, owner: &str, collection: Collection) -> Self {
        self.collections.insert(
            collection.alias.clone(),
            StoredCollection {
                collection,
                owner: owner.to_string(),
            },
        );
        self
    }

    /// Add a post. Its `token` becomes the edit token.
    pub fn with_post(mut self, post: Post, owner: Option<&str>, collection: Option<&str>) -> Self {
        let edit_token = post
            .token
            .clone()
            .unwrap_or_else(|| format!("tok-{}", post.id));
        self.posts.insert(
            post.id.clone(),
            StoredPost {
                post,
                edit_token,
                owner: owner.map(str::to_string),
                collection: collection.map(str::to_string),
                pinned: None,
            },
        );
        self
    }

    /// Add an organization without contributors.
    pub fn with_organization(mut self, alias: &str) -> Self {
        self.organizations.entry(alias.to_string()).or_default();
        self
    }

    /// Set the per-user collection quota.
    pub fn with_collection_quota(mut self, quota: usize) -> Self {
        self.collection_quota = quota;
        self
    }

    fn next_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    // =========================================================================
    // Sessions
    // =========================================================================

    /// Check credentials and open a session.
    pub fn login(&mut self, alias: &str, pass: &str) -> ApiResult<AuthUser> {
        if alias.is_empty() || pass.is_empty() {
            return Err(ApiFailure::new(400, "Missing alias or password."));
        }
        let account = self
            .users
            .get(alias)
            .ok_or_else(|| ApiFailure::new(404, "User not found."))?;
        if account.password != pass {
            return Err(ApiFailure::new(401, "Incorrect password."));
        }
        let user = account.user.clone();

        let token = format!("session-{:08}", self.next_id());
        self.sessions.insert(token.clone(), alias.to_string());

        Ok(AuthUser {
            access_token: Some(token),
            password: None,
            user,
        })
    }

    /// Revoke a session token.
    pub fn logout(&mut self, token: Option<&str>) -> ApiResult<()> {
        let token = token.ok_or_else(|| ApiFailure::new(401, "Not authenticated."))?;
        self.sessions
            .remove(token)
            .map(|_| ())
            .ok_or_else(|| ApiFailure::new(404, "Token is invalid."))
    }

    /// The username behind a session token.
    pub fn session_user(&self, token: Option<&str>) -> Option<String> {
        token.and_then(|t| self.sessions.get(t)).cloned()
    }

    /// The user behind a session token, with subscription details when
    /// `verbose`.
    pub fn get_me(&self, token: Option<&str>, verbose: bool) -> ApiResult<User> {
        let username = self.require_user(token)?;
        let account = self
            .users
            .get(&username)
            .ok_or_else(|| ApiFailure::new(401, "Invalid access token."))?;
        let mut user = account.user.clone();
        if !verbose {
            user.subscription = None;
        }
        Ok(user)
    }

    fn require_user(&self, token: Option<&str>) -> ApiResult<String> {
        self.session_user(token)
            .ok_or_else(|| ApiFailure::new(401, "Not authenticated."))
    }

    // =========================================================================
    // Posts
    // =========================================================================

    /// The post as clients see it: no edit token, owner and collection filled in.
    fn public_post(&self, stored: &StoredPost) -> Post {
        let mut post = stored.post.clone();
        post.token = None;
        post.owner_name = stored.owner.clone();
        post.collection = stored
            .collection
            .as_deref()
            .and_then(|alias| self.get_collection(alias))
            .map(Box::new);
        post
    }

    /// Get a post by ID.
    pub fn get_post(&self, id: &str) -> Option<Post> {
        self.posts.get(id).map(|p| self.public_post(p))
    }

    /// Whether the post is pinned, and where.
    pub fn pinned_position(&self, id: &str) -> Option<u32> {
        self.posts.get(id).and_then(|p| p.pinned)
    }

    /// Publish a post, anonymously when `token` is `None`.
    pub fn create_post(
        &mut self,
        token: Option<&str>,
        collection: Option<&str>,
        params: PostParams,
    ) -> ApiResult<Post> {
        let owner = self.session_user(token);
        if token.is_some() && owner.is_none() {
            return Err(ApiFailure::new(401, "Invalid access token."));
        }
        if params.content.trim().is_empty() {
            return Err(ApiFailure::new(400, "Post body is required."));
        }
        if let Some(alias) = collection {
            let username = owner
                .as_deref()
                .ok_or_else(|| ApiFailure::new(401, "Not authenticated."))?;
            let stored = self
                .collections
                .get(alias)
                .ok_or_else(|| ApiFailure::new(404, "Collection not found."))?;
            if stored.owner != username {
                return Err(ApiFailure::new(403, "Not your collection."));
            }
        }

        let n = self.next_id();
        let id = format!("post{n:012}");
        let edit_token = format!("tok-{n:08}");
        let now = Utc::now();
        let title = params.title.unwrap_or_default();
        let slug = collection.map(|_| slugify(&title, &params.content, &id));

        let post = Post {
            id: id.clone(),
            slug,
            token: None,
            font: Some(params.font.unwrap_or_else(|| "norm".to_string())),
            language: params.language,
            rtl: params.is_rtl,
            created: Some(params.created.unwrap_or(now)),
            updated: Some(params.updated.unwrap_or(now)),
            title,
            content: params.content,
            views: 0,
            tags: Vec::new(),
            images: Vec::new(),
            owner_name: None,
            collection: None,
        };

        let anonymous = owner.is_none();
        self.posts.insert(
            id.clone(),
            StoredPost {
                post,
                edit_token: edit_token.clone(),
                owner,
                collection: collection.map(str::to_string),
                pinned: None,
            },
        );

        let mut created = self
            .get_post(&id)
            .ok_or_else(|| ApiFailure::new(500, "Post vanished."))?;
        // The edit token is only handed out for anonymous posts
        if anonymous {
            created.token = Some(edit_token);
        }
        Ok(created)
    }

    /// Check that the caller may modify a post, by session or edit token.
    fn authorize_post(
        &self,
        id: &str,
        owner: Option<&str>,
        edit_token: Option<&str>,
    ) -> ApiResult<()> {
        let stored = self
            .posts
            .get(id)
            .ok_or_else(|| ApiFailure::new(404, "Post not found."))?;

        let by_owner = owner.is_some() && stored.owner.as_deref() == owner;
        let by_token = edit_token == Some(stored.edit_token.as_str());
        match (by_owner || by_token, owner.is_some() || edit_token.is_some()) {
            (true, _) => Ok(()),
            (false, false) => Err(ApiFailure::new(401, "Not authenticated.")),
            (false, true) => Err(ApiFailure::new(403, "Not allowed to modify this post.")),
        }
    }

    /// Update a post's content and metadata.
    pub fn update_post(
        &mut self,
        token: Option<&str>,
        id: &str,
        params: PostParams,
    ) -> ApiResult<Post> {
        let owner = self.session_user(token);
        self.authorize_post(id, owner.as_deref(), params.token.as_deref())?;
        if params.content.trim().is_empty() {
            return Err(ApiFailure::new(400, "Post body is required."));
        }

        if let Some(stored) = self.posts.get_mut(id) {
            let post = &mut stored.post;
            post.content = params.content;
            if let Some(title) = params.title {
                post.title = title;
            }
            if let Some(font) = params.font {
                post.font = Some(font);
            }
            if params.language.is_some() {
                post.language = params.language;
            }
            if params.is_rtl.is_some() {
                post.rtl = params.is_rtl;
            }
            post.updated = Some(params.updated.unwrap_or_else(Utc::now));
        }

        self.get_post(id)
            .ok_or_else(|| ApiFailure::new(404, "Post not found."))
    }

    /// Delete a post.
    pub fn delete_post(
        &mut self,
        token: Option<&str>,
        id: &str,
        edit_token: Option<&str>,
    ) -> ApiResult<()> {
        let owner = self.session_user(token);
        self.authorize_post(id, owner.as_deref(), edit_token)?;
        self.posts.remove(id);
        Ok(())
    }

    /// Give anonymous posts to the logged-in user.
    pub fn claim_posts(
        &mut self,
        token: Option<&str>,
        posts: &[OwnedPostParams],
    ) -> ApiResult<Vec<PostResult>> {
        let owner = self.require_user(token)?;

        let results = posts
            .iter()
            .map(|p| match self.authorize_post(&p.id, Some(&owner), p.token.as_deref()) {
                Ok(()) => {
                    if let Some(stored) = self.posts.get_mut(&p.id) {
                        stored.owner = Some(owner.clone());
                    }
                    PostResult {
                        id: Some(p.id.clone()),
                        code: 200,
                        error_message: None,
                        post: self.get_post(&p.id),
                    }
                }
                Err(failure) => failed_result(&p.id, failure),
            })
            .collect();

        Ok(results)
    }

    /// Posts owned by the logged-in user.
    pub fn user_posts(&self, token: Option<&str>) -> ApiResult<Vec<Post>> {
        let owner = self.require_user(token)?;
        let mut posts: Vec<Post> = self
            .posts
            .values()
            .filter(|p| p.owner.as_deref() == Some(owner.as_str()))
            .map(|p| self.public_post(p))
            .collect();
        posts.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(posts)
    }

    // =========================================================================
    // Collections
    // =========================================================================

    /// Get a collection by alias, with its post count.
    pub fn get_collection(&self, alias: &str) -> Option<Collection> {
        self.collections.get(alias).map(|stored| {
            let mut collection = stored.collection.clone();
            collection.total_posts = self
                .posts
                .values()
                .filter(|p| p.collection.as_deref() == Some(alias))
                .count() as u64;
            collection.posts = None;
            collection
        })
    }

    /// Get a collection with its posts embedded, pinned posts first.
    pub fn collection_with_posts(&self, alias: &str) -> Option<Collection> {
        let mut collection = self.get_collection(alias)?;
        let mut stored: Vec<&StoredPost> = self
            .posts
            .values()
            .filter(|p| p.collection.as_deref() == Some(alias))
            .collect();
        stored.sort_by(|a, b| {
            let pin = |p: &StoredPost| p.pinned.unwrap_or(u32::MAX);
            pin(a).cmp(&pin(b)).then_with(|| b.post.created.cmp(&a.post.created))
        });
        collection.posts = Some(stored.into_iter().map(|p| self.public_post(p)).collect());
        Some(collection)
    }

    /// Get a post in a collection by slug.
    pub fn collection_post(&self, alias: &str, slug: &str) -> Option<Post> {
        self.posts
            .values()
            .find(|p| {
                p.collection.as_deref() == Some(alias) && p.post.slug.as_deref() == Some(slug)
            })
            .map(|p| self.public_post(p))
    }

    /// Collections owned by the logged-in user.
    pub fn user_collections(&self, token: Option<&str>) -> ApiResult<Vec<Collection>> {
        let owner = self.require_user(token)?;
        let mut collections: Vec<Collection> = self
            .collections
            .values()
            .filter(|c| c.owner == owner)
            .filter_map(|c| self.get_collection(&c.collection.alias))
            .collect();
        collections.sort_by(|a, b| a.alias.cmp(&b.alias));
        Ok(collections)
    }

    /// Create a collection for the logged-in user.
    pub fn create_collection(
        &mut self,
        token: Option<&str>,
        params: CollectionParams,
    ) -> ApiResult<Collection> {
        let owner = self.require_user(token)?;
        if !is_valid_alias(&params.alias) {
            return Err(ApiFailure::new(
                400,
                "Alias must be lowercase letters, numbers and hyphens.",
            ));
        }
        let pro = self.users.get(&owner).map(|u| u.pro).unwrap_or(false);
        if !pro {
            return Err(ApiFailure::new(403, "Upgrade required."));
        }
        if self.collections.contains_key(&params.alias) {
            return Err(ApiFailure::new(409, "Collection name is already taken."));
        }
        let owned = self.collections.values().filter(|c| c.owner == owner).count();
        if owned >= self.collection_quota {
            return Err(ApiFailure::new(412, "Collection quota reached."));
        }

        let collection = Collection {
            alias: params.alias.clone(),
            title: params.title,
            description: String::new(),
            style_sheet: String::new(),
            private: false,
            views: 0,
            domain: None,
            email: None,
            url: Some(format!("https://write.as/{}/", params.alias)),
            total_posts: 0,
            posts: None,
        };
        self.collections.insert(
            params.alias,
            StoredCollection {
                collection: collection.clone(),
                owner,
            },
        );
        Ok(collection)
    }

    /// Check the caller owns an existing collection.
    fn require_collection_owner(&self, token: Option<&str>, alias: &str) -> ApiResult<String> {
        let owner = self.require_user(token)?;
        let stored = self
            .collections
            .get(alias)
            .ok_or_else(|| ApiFailure::new(404, "Collection not found."))?;
        if stored.owner != owner {
            return Err(ApiFailure::new(403, "Not your collection."));
        }
        Ok(owner)
    }

    /// Delete a collection. Its posts become anonymous.
    pub fn delete_collection(&mut self, token: Option<&str>, alias: &str) -> ApiResult<()> {
        self.require_collection_owner(token, alias)?;
        self.collections.remove(alias);
        for stored in self.posts.values_mut() {
            if stored.collection.as_deref() == Some(alias) {
                stored.collection = None;
                stored.owner = None;
                stored.pinned = None;
                stored.post.slug = None;
            }
        }
        Ok(())
    }

    /// Move posts into a collection.
    pub fn collect_posts(
        &mut self,
        token: Option<&str>,
        alias: &str,
        posts: &[OwnedPostParams],
    ) -> ApiResult<Vec<PostResult>> {
        let owner = self.require_collection_owner(token, alias)?;

        let results = posts
            .iter()
            .map(|p| match self.authorize_post(&p.id, Some(&owner), p.token.as_deref()) {
                Ok(()) => {
                    if let Some(stored) = self.posts.get_mut(&p.id) {
                        stored.owner = Some(owner.clone());
                        stored.collection = Some(alias.to_string());
                        if stored.post.slug.is_none() {
                            let slug =
                                slugify(&stored.post.title, &stored.post.content, &stored.post.id);
                            stored.post.slug = Some(slug);
                        }
                    }
                    PostResult {
                        id: Some(p.id.clone()),
                        code: 200,
                        error_message: None,
                        post: self.get_post(&p.id),
                    }
                }
                Err(failure) => failed_result(&p.id, failure),
            })
            .collect();

        Ok(results)
    }

    /// Pin (`Some(position)`) or unpin (`None`) posts in a collection.
    pub fn set_pinned(
        &mut self,
        token: Option<&str>,
        alias: &str,
        posts: &[PinnedPostParams],
        pin: bool,
    ) -> ApiResult<Vec<PostResult>> {
        self.require_collection_owner(token, alias)?;

        let results = posts
            .iter()
            .enumerate()
            .map(|(i, p)| match self.posts.get_mut(&p.id) {
                Some(stored) if stored.collection.as_deref() == Some(alias) => {
                    stored.pinned = pin.then(|| p.position.unwrap_or(i as u32 + 1));
                    PostResult {
                        id: Some(p.id.clone()),
                        code: 200,
                        error_message: None,
                        post: None,
                    }
                }
                _ => failed_result(&p.id, ApiFailure::new(404, "Post not found in collection.")),
            })
            .collect();

        Ok(results)
    }

    // =========================================================================
    // Organizations
    // =========================================================================

    /// Add a contributor to an organization.
    pub fn add_contributor(
        &mut self,
        token: Option<&str>,
        org: &str,
        params: AuthorParams,
    ) -> ApiResult<Author> {
        self.require_user(token)?;
        let contributors = self
            .organizations
            .get_mut(org)
            .ok_or_else(|| ApiFailure::new(404, "Organization not found."))?;
        if params.name.trim().is_empty() {
            return Err(ApiFailure::new(400, "Author name is required."));
        }

        let slug = if params.slug.is_empty() {
            slugify(&params.name, "", "author")
        } else {
            params.slug
        };
        if contributors.iter().any(|a| a.slug == slug) {
            return Err(ApiFailure::new(409, "Author slug is already taken."));
        }

        let author = Author {
            user: None,
            name: params.name,
            slug,
        };
        contributors.push(author.clone());
        Ok(author)
    }
}

fn failed_result(id: &str, failure: ApiFailure) -> PostResult {
    PostResult {
        id: Some(id.to_string()),
        code: failure.code,
        error_message: Some(failure.message),
        post: None,
    }
}

fn is_valid_alias(alias: &str) -> bool {
    !alias.is_empty()
        && alias
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

/// Derive a URL slug from the title, falling back to the body, then `fallback`.
fn slugify(title: &str, body: &str, fallback: &str) -> String {
    let source = if title.trim().is_empty() { body } else { title };
    let slug = source
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|w| !w.is_empty())
        .take(6)
        .map(str::to_ascii_lowercase)
        .collect::<Vec<_>>()
        .join("-");
    if slug.is_empty() {
        fallback.to_string()
    } else {
        slug
    }
}
