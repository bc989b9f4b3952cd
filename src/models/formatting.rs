//! Markdown rendering.

use serde::{Deserialize, Serialize};

use crate::client::WriteAsClient;
use crate::error::Result;

#[derive(Debug, Serialize)]
struct MarkdownRequest<'a> {
    raw_body: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    collection_url: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct BodyResponse {
    body: String,
}

/// Render Markdown into HTML the way Write.as renders posts.
///
/// `collection_url` resolves hashtag links relative to a collection.
#[tracing::instrument(skip(client, body))]
pub async fn markdown(
    client: &WriteAsClient,
    body: &str,
    collection_url: Option<&str>,
) -> Result<String> {
    let request = MarkdownRequest {
        raw_body: body,
        collection_url,
    };

    let env = client.post::<_, BodyResponse>("markdown", &request).await?;
    match env.code {
        200 => Ok(env.into_data()?.body),
        400 => Err(env.bad_request()),
        _ => Err(env.unexpected("getting markdown")),
    }
}
