//! Error types for the short-link API client.
//!
//! # Design
//! Every operation reports failures through `ApiError` so callers can keep a
//! single error-display path. `Application` covers every non-2xx response,
//! whether or not the backend sent a readable `{error}` payload; `Transport`
//! covers exchanges that never completed. `ConfigError` is kept apart because
//! it can only happen once, at startup.

use thiserror::Error;

/// Errors returned by `ShortLinkClient` operations.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The backend answered with a non-2xx status. `message` is the payload's
    /// `error` field, or the operation's fallback message.
    #[error("{message}")]
    Application { status: u16, message: String },

    /// The HTTP exchange could not be completed.
    #[error("Network error: {0}")]
    Transport(String),

    /// The request could not be addressed, e.g. an empty short code. Nothing
    /// was sent.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// A 2xx response body did not match the expected record.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The request payload could not be encoded as JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),
}

impl ApiError {
    /// HTTP status of an application error.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Application { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Errors raised while resolving `ClientConfig`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("API_BASE_URL is not set")]
    MissingBaseUrl,

    #[error("API_BASE_URL {value:?} is not an absolute URL: {reason}")]
    InvalidBaseUrl { value: String, reason: String },
}
