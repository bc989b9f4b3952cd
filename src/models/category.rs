//! Category model.

use serde::{Deserialize, Serialize};

/// A post tag with a title and slug.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Category {
    pub hashtag: String,
    pub slug: String,
    pub title: String,
}
