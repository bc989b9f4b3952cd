//! Author model and trait implementations.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::client::WriteAsClient;
use crate::error::{DomainErrorKind, Result};
use crate::models::path_segment;
use crate::models::user::User;
use crate::traits::Create;

/// A Write.as author, i.e. a named contributor to an organization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Author {
    #[serde(default, alias = "User", skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    pub name: String,
    #[serde(default)]
    pub slug: String,
}

/// Parameters for creating or updating an author.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuthorParams {
    /// Public display name.
    pub name: String,

    /// Optional URL slug.
    #[serde(default)]
    pub slug: String,

    /// Alias of the organization the author belongs to. Not sent in the body.
    #[serde(skip)]
    pub org_alias: String,
}

impl AuthorParams {
    pub fn new(org_alias: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            slug: String::new(),
            org_alias: org_alias.into(),
        }
    }

    #[must_use]
    pub fn with_slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = slug.into();
        self
    }
}

#[async_trait]
impl Create for Author {
    type Params = AuthorParams;

    /// Add a contributor to `params.org_alias`.
    #[tracing::instrument(skip(client))]
    async fn create(client: &WriteAsClient, params: AuthorParams) -> Result<Self> {
        let path = format!(
            "organizations/{}/contributors",
            path_segment(&params.org_alias, "organization alias")?
        );

        let env = client.post::<_, Author>(&path, &params).await?;
        match env.code {
            201 => env.into_data(),
            400 => Err(env.bad_request()),
            401 => Err(env.not_authenticated()),
            403 => Err(env.error(
                DomainErrorKind::Forbidden,
                "Not allowed to add contributors to this organization.",
            )),
            404 => Err(env.error(DomainErrorKind::NotFound, "Organization not found.")),
            _ => Err(env.unexpected("creating author")),
        }
    }
}
