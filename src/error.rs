//! Fetch error taxonomy shared by the API client and the entity store.
//!
//! Failures are captured into store records rather than returned to
//! callers, so the error type is cheap to clone and comparable. The
//! status code and body message of a server failure are preserved
//! verbatim for display.

use thiserror::Error;

use crate::model::EntityId;

/// Errors that can occur while fetching or ingesting entities.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// Transport-level failure, including timeouts.
    #[error("network error: {message}")]
    Network { message: String },

    /// The entity does not exist on the backend.
    #[error("entity '{id}' not found")]
    NotFound { id: EntityId },

    /// The backend answered with a non-2xx status other than 404.
    #[error("server error {status}: {message}")]
    Server { status: u16, message: String },

    /// The response body could not be decoded into the expected entity.
    #[error("invalid payload: {message}")]
    Decode { message: String },

    /// The request was rejected client-side, before any network I/O.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl FetchError {
    /// Short classification string for logs and error views.
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::Network { .. } => "network_error",
            FetchError::NotFound { .. } => "not_found",
            FetchError::Server { .. } => "server_error",
            FetchError::Decode { .. } => "decode_error",
            FetchError::InvalidRequest(_) => "invalid_request",
        }
    }

    /// HTTP status associated with the failure, when one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::NotFound { .. } => Some(404),
            FetchError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }
}
