//! Error types for Write.as API operations.

use std::fmt;

use thiserror::Error;

/// Endpoint-level failure categories.
///
/// Resource methods translate the envelope's status code into one of these
/// using their own status table, so the same code can mean different things
/// on different endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DomainErrorKind {
    /// 400: the server rejected the request parameters.
    BadRequest,
    /// 401: the request needs a valid session token.
    NotAuthenticated,
    /// 403: the user may not perform this action (often a plan restriction).
    Forbidden,
    /// 404: the resource does not exist.
    NotFound,
    /// 410: the resource existed but was unpublished.
    Gone,
    /// 409: a name or alias is already taken.
    Conflict,
    /// 412: the account reached a quota.
    QuotaExceeded,
    /// 429: too many requests.
    RateLimited,
    /// Any status the endpoint's table does not name.
    Unexpected,
}

impl DomainErrorKind {
    /// The conventional meaning of a status code, used where the server
    /// reports per-item results inside a batch response.
    pub fn from_status(code: u16) -> Self {
        match code {
            400 => Self::BadRequest,
            401 => Self::NotAuthenticated,
            403 => Self::Forbidden,
            404 => Self::NotFound,
            409 => Self::Conflict,
            410 => Self::Gone,
            412 => Self::QuotaExceeded,
            429 => Self::RateLimited,
            _ => Self::Unexpected,
        }
    }
}

impl fmt::Display for DomainErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::BadRequest => "bad request",
            Self::NotAuthenticated => "not authenticated",
            Self::Forbidden => "forbidden",
            Self::NotFound => "not found",
            Self::Gone => "gone",
            Self::Conflict => "conflict",
            Self::QuotaExceeded => "quota exceeded",
            Self::RateLimited => "rate limited",
            Self::Unexpected => "unexpected status",
        };
        f.write_str(s)
    }
}

/// Errors that can occur during Write.as API operations.
#[derive(Debug, Error)]
pub enum WriteAsError {
    /// Configuration is missing or incomplete.
    #[error("Write.as configuration required: {0}")]
    ConfigMissing(String),

    /// Parameters failed local validation; no request was sent.
    #[error("Invalid parameters: {0}")]
    InvalidParams(String),

    /// The request could not be sent or no response was received.
    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// The request body could not be serialized.
    #[error("Failed to encode request body: {0}")]
    Encode(#[source] serde_json::Error),

    /// The response body is not valid JSON or does not match the expected shape.
    #[error("Failed to parse response (HTTP {status}): {source}")]
    Decode {
        status: u16,
        #[source]
        source: serde_json::Error,
    },

    /// A success status arrived without the payload the endpoint promises.
    #[error("Wrong data returned from API (HTTP {status}).")]
    MissingData { status: u16 },

    /// Bad credentials, or a missing, invalid or expired session token.
    #[error("{message}")]
    Auth {
        message: String,
        status_code: Option<u16>,
    },

    /// Endpoint-specific failure interpreted from the status code.
    #[error("{message}")]
    Domain {
        kind: DomainErrorKind,
        message: String,
        status_code: u16,
        /// Raw `error_msg` from the server, when it sent one.
        server_message: Option<String>,
    },
}

impl WriteAsError {
    /// Build an authentication error.
    pub fn auth(message: impl Into<String>, status_code: Option<u16>) -> Self {
        Self::Auth {
            message: message.into(),
            status_code,
        }
    }

    /// The domain category, if this is a [`WriteAsError::Domain`].
    pub fn kind(&self) -> Option<DomainErrorKind> {
        match self {
            Self::Domain { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    /// The HTTP status code that caused this error, when one exists.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Domain { status_code, .. } => Some(*status_code),
            Self::Auth { status_code, .. } => *status_code,
            Self::Decode { status, .. } | Self::MissingData { status } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// The server-supplied error message, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Domain { server_message, .. } => server_message.as_deref(),
            _ => None,
        }
    }

    /// True when the resource does not exist.
    pub fn is_not_found(&self) -> bool {
        self.kind() == Some(DomainErrorKind::NotFound)
    }

    /// True for authentication failures, whether detected by login/logout,
    /// locally, or from a resource endpoint's 401.
    pub fn is_not_authenticated(&self) -> bool {
        matches!(self, Self::Auth { .. }) || self.kind() == Some(DomainErrorKind::NotAuthenticated)
    }
}

/// Result type alias for Write.as operations.
pub type Result<T> = core::result::Result<T, WriteAsError>;
