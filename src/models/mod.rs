//! Write.as API model types.

use std::borrow::Cow;

use crate::error::{Result, WriteAsError};

mod author;
mod category;
mod collection;
mod formatting;
mod organization;
mod post;
mod user;

pub use author::*;
pub use category::*;
pub use collection::*;
pub use formatting::*;
pub use organization::*;
pub use post::*;
pub use user::*;

/// Percent-encode one path segment of an endpoint URL.
///
/// Empty and dot-only values are rejected: URL joining would resolve them
/// to a different endpoint.
pub(crate) fn path_segment<'a>(value: &'a str, what: &str) -> Result<Cow<'a, str>> {
    if value.is_empty() || value.chars().all(|c| c == '.') {
        return Err(WriteAsError::InvalidParams(format!(
            "{what} must not be empty or a dot segment, got {value:?}"
        )));
    }
    Ok(urlencoding::encode(value))
}
