//! Write.as API client.
//!
//! Low-level HTTP client that handles authentication and the response
//! envelope. Resource operations are implemented via traits on model types
//! and interpret the envelope's status code per endpoint.

use std::env;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method};
use serde::de::{DeserializeOwned, IgnoredAny};
use serde::Serialize;
use url::Url;

use crate::envelope::Envelope;
use crate::error::{Result, WriteAsError};

/// Production API endpoint.
pub const API_URL: &str = "https://write.as/api";

/// Development/test API endpoint.
pub const DEV_API_URL: &str = "https://development.write.as/api";

/// Default HTTP timeout for every request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

const USER_AGENT: &str = concat!("writeas-rs/", env!("CARGO_PKG_VERSION"));

/// Construction parameters for [`WriteAsClient`].
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use writeas::{ClientConfig, DEV_API_URL};
///
/// let config = ClientConfig::development().with_timeout(Duration::from_secs(30));
/// assert_eq!(config.url, DEV_API_URL);
/// ```
#[derive(Clone)]
pub struct ClientConfig {
    /// API base URL, e.g. [`API_URL`].
    pub url: String,
    /// Session token to start with, if already known.
    pub token: Option<String>,
    /// Value of the `User-Agent` header.
    pub user_agent: String,
    /// Timeout applied to every request.
    pub timeout: Duration,
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("url", &self.url)
            .field("user_agent", &self.user_agent)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            url: API_URL.to_string(),
            token: None,
            user_agent: USER_AGENT.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ClientConfig {
    /// Configuration pointing at [`DEV_API_URL`].
    pub fn development() -> Self {
        Self::default().with_url(DEV_API_URL)
    }

    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Low-level Write.as API client.
///
/// Holds the base URL, user agent and optional session token. Clones share
/// the underlying connection pool but each carries its own token, which is
/// only changed through [`log_in`](Self::log_in), [`log_out`](Self::log_out)
/// or [`set_token`](Self::set_token), all of which take `&mut self`.
///
/// # Example
///
/// ```no_run
/// use writeas::WriteAsClient;
///
/// # async fn example() -> writeas::Result<()> {
/// let mut client = WriteAsClient::development()?;
/// client.log_in("demo", "demo").await?;
/// let me = client.get_me(false).await?;
/// println!("logged in as {}", me.username);
/// client.log_out().await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct WriteAsClient {
    http: Client,
    base_url: Arc<Url>,
    user_agent: Arc<str>,
    token: Option<String>,
    request_timeout: Option<Duration>,
}

impl fmt::Debug for WriteAsClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WriteAsClient")
            .field("base_url", &self.base_url.as_str())
            .field("authenticated", &self.token.is_some())
            .finish_non_exhaustive()
    }
}

impl WriteAsClient {
    /// Create an unauthenticated client for the production API.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create an unauthenticated client for the development API.
    pub fn development() -> Result<Self> {
        Self::with_config(ClientConfig::development())
    }

    /// Create a client from environment variables.
    ///
    /// Uses `WRITEAS_API_URL` for the base URL (defaults to [`API_URL`]) and
    /// `WRITEAS_TOKEN` as an initial session token, if set.
    pub fn from_env() -> Result<Self> {
        let mut config = ClientConfig::default();
        if let Ok(url) = env::var("WRITEAS_API_URL") {
            config.url = url;
        }
        if let Ok(token) = env::var("WRITEAS_TOKEN") {
            config.token = Some(token);
        }
        Self::with_config(config)
    }

    /// Create a client from an explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is empty or invalid, or if the HTTP
    /// client cannot be built.
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        if config.url.trim().is_empty() {
            return Err(WriteAsError::ConfigMissing(
                "API base URL is empty".to_string(),
            ));
        }

        // Ensure base URL ends with / so relative paths join under it
        let base_url_str = if config.url.ends_with('/') {
            config.url
        } else {
            format!("{}/", config.url)
        };
        let base_url = Url::parse(&base_url_str)?;

        let http = Client::builder()
            .user_agent(config.user_agent.as_str())
            .brotli(true)
            .gzip(true)
            .deflate(true)
            .timeout(config.timeout)
            .build()
            .map_err(WriteAsError::Transport)?;

        let mut client = Self {
            http,
            base_url: Arc::new(base_url),
            user_agent: Arc::from(config.user_agent),
            token: None,
            request_timeout: None,
        };
        if let Some(token) = config.token {
            client.set_token(token);
        }
        Ok(client)
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Get the `User-Agent` sent with every request.
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// The current session token, if logged in.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Returns true when a session token is held.
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Replace the session token. An empty token clears it.
    pub fn set_token(&mut self, token: impl Into<String>) {
        let token = token.into();
        self.token = if token.is_empty() { None } else { Some(token) };
    }

    /// Drop the local session token without contacting the server.
    pub fn clear_token(&mut self) {
        self.token = None;
    }

    /// A clone whose requests use `timeout` instead of the configured one.
    ///
    /// ```no_run
    /// # use std::time::Duration;
    /// # use writeas::{Get, Post, WriteAsClient};
    /// # async fn example(client: &WriteAsClient) -> writeas::Result<()> {
    /// let post = Post::get(&client.with_timeout(Duration::from_secs(2)), "abc123".into()).await?;
    /// # Ok(())
    /// # }
    /// ```
    #[must_use]
    pub fn with_timeout(&self, timeout: Duration) -> Self {
        let mut client = self.clone();
        client.request_timeout = Some(timeout);
        client
    }

    /// Make a GET request and decode the envelope's payload as `T`.
    #[tracing::instrument(skip(self))]
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<Envelope<T>> {
        self.send(Method::GET, path, &[], None).await
    }

    /// Make a POST request with a JSON body.
    #[tracing::instrument(skip(self, body))]
    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<Envelope<T>>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = Self::encode(body)?;
        self.send(Method::POST, path, &[], Some(body)).await
    }

    /// Make a PUT request with a JSON body.
    #[tracing::instrument(skip(self, body))]
    pub async fn put<B, T>(&self, path: &str, body: &B) -> Result<Envelope<T>>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = Self::encode(body)?;
        self.send(Method::PUT, path, &[], Some(body)).await
    }

    /// Make a DELETE request without a body. Any payload is discarded.
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, path: &str) -> Result<Envelope<IgnoredAny>> {
        self.send(Method::DELETE, path, &[], None).await
    }

    /// Make a DELETE request with query parameters. Any payload is discarded.
    ///
    /// Query values never reach spans, events or transport errors, so edit
    /// tokens belong here rather than in `path`.
    #[tracing::instrument(skip(self, query))]
    pub async fn delete_with_query(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<Envelope<IgnoredAny>> {
        self.send(Method::DELETE, path, query, None).await
    }

    /// Make a DELETE request with a JSON body. Any payload is discarded.
    #[tracing::instrument(skip(self, body))]
    pub async fn delete_with_body<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Envelope<IgnoredAny>> {
        let body = Self::encode(body)?;
        self.send(Method::DELETE, path, &[], Some(body)).await
    }

    fn encode<B: Serialize + ?Sized>(body: &B) -> Result<Vec<u8>> {
        serde_json::to_vec(body).map_err(WriteAsError::Encode)
    }

    /// Issue the request and decode the response envelope.
    async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
        body: Option<Vec<u8>>,
    ) -> Result<Envelope<T>> {
        // A leading slash would replace the base URL's own path
        let url = self.base_url.join(path.trim_start_matches('/'))?;
        let url_path = url.path().to_string();

        let mut request = self.http.request(method.clone(), url);
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        if let Some(timeout) = self.request_timeout {
            request = request.timeout(timeout);
        }
        if let Some(body) = body {
            request = request.header(CONTENT_TYPE, "application/json").body(body);
        }

        // reqwest errors print the full URL, query included
        let transport = |e: reqwest::Error| {
            if query.is_empty() {
                WriteAsError::Transport(e)
            } else {
                WriteAsError::Transport(e.without_url())
            }
        };

        let response = request.send().await.map_err(transport)?;
        let status = response.status().as_u16();
        let bytes = response.bytes().await.map_err(transport)?;

        tracing::debug!(%method, path = %url_path, status, "Write.as API response");

        Envelope::decode(status, &bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_debug() {
        let client =
            WriteAsClient::with_config(ClientConfig::default().with_token("secret-token")).unwrap();
        let debug = format!("{:?}", client);
        assert!(debug.contains("WriteAsClient"));
        assert!(debug.contains("base_url"));
        // Token should not be in debug output
        assert!(!debug.contains("secret-token"));

        let config_debug = format!("{:?}", ClientConfig::default().with_token("secret-token"));
        assert!(!config_debug.contains("secret-token"));
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let client1 =
            WriteAsClient::with_config(ClientConfig::default().with_url("https://write.as/api"))
                .unwrap();
        let client2 =
            WriteAsClient::with_config(ClientConfig::default().with_url("https://write.as/api/"))
                .unwrap();
        assert_eq!(client1.base_url().as_str(), client2.base_url().as_str());
        assert_eq!(client1.base_url().as_str(), "https://write.as/api/");
    }

    #[test]
    fn test_default_endpoints() {
        let prod = WriteAsClient::new().unwrap();
        assert_eq!(prod.base_url().as_str(), "https://write.as/api/");
        assert!(!prod.is_authenticated());

        let dev = WriteAsClient::development().unwrap();
        assert_eq!(dev.base_url().as_str(), "https://development.write.as/api/");
        assert!(dev.user_agent().starts_with("writeas-rs/"));
    }

    #[test]
    fn test_empty_url_is_config_error() {
        let err = WriteAsClient::with_config(ClientConfig::default().with_url("")).unwrap_err();
        assert!(matches!(err, WriteAsError::ConfigMissing(_)));
    }

    #[test]
    fn test_set_token_empty_clears() {
        let mut client = WriteAsClient::new().unwrap();
        client.set_token("abc");
        assert_eq!(client.token(), Some("abc"));
        client.set_token("");
        assert_eq!(client.token(), None);
    }

    #[test]
    fn test_with_timeout_keeps_token() {
        let client =
            WriteAsClient::with_config(ClientConfig::default().with_token("abc")).unwrap();
        let scoped = client.with_timeout(Duration::from_millis(250));
        assert_eq!(scoped.token(), Some("abc"));
        assert_eq!(scoped.request_timeout, Some(Duration::from_millis(250)));
        assert_eq!(client.request_timeout, None);
    }
}
