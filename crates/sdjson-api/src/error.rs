//! Error types returned by the client.

use chrono::{DateTime, Utc};

use crate::error_code::ErrorCode;

/// Maximum number of characters of a response body kept in an error.
pub(crate) const BODY_PREVIEW_CHARS: usize = 500;

/// Convenience alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by [`SdClient`](crate::SdClient) and the wire helpers.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The client was misconfigured or used before authenticating.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The request never produced an HTTP response.
    #[error("transport error: {0}")]
    Transport(#[source] reqwest::Error),

    /// A response body could not be decompressed or decoded.
    #[error("decode error: {message}")]
    Decode {
        /// What went wrong.
        message: String,
        /// Leading excerpt of the offending input.
        fragment: Option<String>,
    },

    /// The service replied with a non-zero error code.
    #[error(transparent)]
    Service(#[from] ServiceError),

    /// The service replied with an HTTP error status and no error envelope.
    #[error("HTTP {status}: {body}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Leading excerpt of the response body.
        body: String,
    },
}

impl Error {
    /// Builds a [`Error::Decode`] carrying a preview of `input`.
    pub(crate) fn decode(message: impl std::fmt::Display, input: &[u8]) -> Self {
        Self::Decode {
            message: message.to_string(),
            fragment: Some(preview(input)),
        }
    }

    /// Returns the service error code, if this is a [`Error::Service`].
    #[must_use]
    pub const fn service_code(&self) -> Option<ErrorCode> {
        match self {
            Self::Service(err) => Some(err.code),
            _ => None,
        }
    }
}

/// An error envelope returned by the service.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("service error: {code}")]
pub struct ServiceError {
    /// Error code reported by the service.
    pub code: ErrorCode,
    /// Free-form message from the service.
    pub message: String,
    /// Identifier of the server that handled the request.
    pub server_id: String,
    /// Server timestamp of the reply.
    pub datetime: Option<DateTime<Utc>>,
    /// The `response` field of the envelope.
    pub response: String,
}

/// Returns up to [`BODY_PREVIEW_CHARS`] characters of `body`.
pub(crate) fn preview(body: &[u8]) -> String {
    String::from_utf8_lossy(body)
        .chars()
        .take(BODY_PREVIEW_CHARS)
        .collect()
}
