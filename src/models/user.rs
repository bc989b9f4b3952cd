//! User and session models.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A registered Write.as user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub username: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(default)]
    pub created: Option<DateTime<Utc>>,

    /// Only returned for verbose requests.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subscription: Option<UserSubscription>,
}

/// A user's Write.as subscription.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserSubscription {
    pub name: String,
    #[serde(default)]
    pub begin: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end: Option<DateTime<Utc>>,
    #[serde(default)]
    pub auto_renew: bool,
    #[serde(rename = "is_active", default)]
    pub active: bool,
    #[serde(rename = "is_delinquent", default)]
    pub delinquent: bool,
}

/// A just-authenticated user.
///
/// Carries information the server returns only once per session.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthUser {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,

    /// Generated password, set when the account was just created.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,

    pub user: User,
}

impl fmt::Debug for AuthUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthUser")
            .field("user", &self.user)
            .field("has_access_token", &self.access_token.is_some())
            .finish_non_exhaustive()
    }
}
