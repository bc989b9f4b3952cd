//! Organization member models.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::author::{Author, AuthorParams};

/// A member's role in an organization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Editor,
    Author,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Admin => write!(f, "admin"),
            Role::Editor => write!(f, "editor"),
            Role::Author => write!(f, "author"),
        }
    }
}

/// A member of an organization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrgMember {
    #[serde(flatten)]
    pub author: Author,
    #[serde(default)]
    pub email: String,
    pub role: Role,
}

/// Parameters for creating or updating an organization member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrgMemberParams {
    #[serde(flatten)]
    pub author: AuthorParams,
    pub username: String,
    #[serde(default)]
    pub email: String,
    pub role: Role,
}
