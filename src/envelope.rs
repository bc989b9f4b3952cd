//! Response envelope shared by every Write.as endpoint.
//!
//! The API wraps every response body as
//! `{"code": 200, "error_msg": "...", "data": ...}`. The core client decodes
//! that wrapper once, generically over the payload type chosen by the
//! caller. What a given status code *means* is left to each resource method.

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::{DomainErrorKind, Result, WriteAsError};

/// A decoded API response.
///
/// `code` is the HTTP status of the response. `data` is present only when
/// the server sent a payload and it matched `T`.
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope<T> {
    /// HTTP status code.
    pub code: u16,
    /// Machine-readable error category, when the server sent one.
    pub error_type: Option<String>,
    /// Human-readable error message (`error_msg` on the wire).
    pub error_message: Option<String>,
    /// The decoded payload.
    pub data: Option<T>,
}

/// Wire shape of the envelope. The body's own `code` field is ignored in
/// favour of the transport status.
#[derive(Debug, Deserialize)]
struct WireEnvelope<T> {
    #[serde(default)]
    error_type: Option<String>,
    #[serde(default, rename = "error_msg")]
    error_message: Option<String>,
    // A missing `data` key reads as `None` without requiring `T: Default`
    data: Option<T>,
}

impl<T: DeserializeOwned> Envelope<T> {
    /// Decode a raw response body received with `status`.
    ///
    /// Empty bodies (204 and friends) produce an envelope without payload.
    /// On success statuses a body that does not decode is an error; on
    /// failure statuses the raw body becomes the error message so the
    /// endpoint's status table still runs.
    pub(crate) fn decode(status: u16, body: &[u8]) -> Result<Self> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::empty(status));
        }

        match serde_json::from_slice::<WireEnvelope<T>>(body) {
            Ok(wire) => Ok(Self {
                code: status,
                error_type: wire.error_type,
                error_message: wire.error_message,
                data: wire.data,
            }),
            Err(source) if is_success(status) => Err(WriteAsError::Decode { status, source }),
            Err(_) => Ok(Self {
                code: status,
                error_type: None,
                error_message: Some(extract_error_message(body)),
                data: None,
            }),
        }
    }
}

impl<T> Envelope<T> {
    /// An envelope with no payload and no message.
    pub fn empty(code: u16) -> Self {
        Self {
            code,
            error_type: None,
            error_message: None,
            data: None,
        }
    }

    /// Returns true for 2xx status codes.
    pub fn is_success(&self) -> bool {
        is_success(self.code)
    }

    /// Take the payload, failing if a success response carried none.
    pub fn into_data(self) -> Result<T> {
        let status = self.code;
        self.data.ok_or(WriteAsError::MissingData { status })
    }

    /// Server message, or an empty string.
    pub fn message(&self) -> &str {
        self.error_message.as_deref().unwrap_or_default()
    }

    /// Build a domain error carrying this envelope's status and server message.
    pub fn error(&self, kind: DomainErrorKind, message: impl Into<String>) -> WriteAsError {
        WriteAsError::Domain {
            kind,
            message: message.into(),
            status_code: self.code,
            server_message: self.error_message.clone(),
        }
    }

    /// `Bad request: <server message>`.
    pub fn bad_request(&self) -> WriteAsError {
        self.error(
            DomainErrorKind::BadRequest,
            format!("Bad request: {}", self.message()),
        )
    }

    /// `Not authenticated.`
    pub fn not_authenticated(&self) -> WriteAsError {
        self.error(DomainErrorKind::NotAuthenticated, "Not authenticated.")
    }

    /// Fallback for statuses an endpoint's table does not name.
    ///
    /// `action` reads like "getting collection", producing
    /// `Problem getting collection: 500. <server message>`.
    pub fn unexpected(&self, action: &str) -> WriteAsError {
        let message = format!("Problem {action}: {}. {}", self.code, self.message());
        self.error(DomainErrorKind::Unexpected, message.trim_end())
    }

    /// Build an authentication error carrying this envelope's status.
    pub fn auth_error(&self, message: impl Into<String>) -> WriteAsError {
        WriteAsError::auth(message, Some(self.code))
    }
}

fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

/// Pull a message out of an error body that is not a well-formed envelope.
fn extract_error_message(body: &[u8]) -> String {
    if let Ok(json) = serde_json::from_slice::<serde_json::Value>(body) {
        for key in ["error_msg", "message", "error"] {
            if let Some(msg) = json.get(key).and_then(|m| m.as_str()) {
                return msg.to_string();
            }
        }
    }

    String::from_utf8_lossy(body).trim().to_string()
}
