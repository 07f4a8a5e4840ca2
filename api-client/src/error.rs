//! Error types for the API client

use thiserror::Error;

/// Result type alias for API client operations
pub type Result<T> = std::result::Result<T, ApiError>;

/// Errors that can occur while talking to the boards API
#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing or rejected credentials
    #[error("Authentication failed: {message}")]
    Auth { message: String },

    /// Feature requires a paid tier the account does not have
    #[error("Not eligible: {message}")]
    NotEligible { message: String },

    /// Non-2xx response
    #[error("Request to {url} failed with status {status}")]
    Status { status: u16, url: String },

    /// Transport or decoding failure inside reqwest
    #[error("HTTP error: {0}")]
    Request(#[from] reqwest::Error),

    /// Export did not complete within the configured attempt bound
    #[error("Export did not complete after {attempts} status polls")]
    Timeout { attempts: u32 },

    /// Export polling was cancelled by the operator
    #[error("Export polling cancelled")]
    Cancelled,

    /// IO error while writing a downloaded archive
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error bubbled up from the core domain layer
    #[error(transparent)]
    Core(#[from] deckhand_core::Error),
}

impl ApiError {
    /// Create an Auth error
    pub fn auth(message: impl Into<String>) -> Self {
        Self::Auth {
            message: message.into(),
        }
    }

    /// Create a NotEligible error
    pub fn not_eligible(message: impl Into<String>) -> Self {
        Self::NotEligible {
            message: message.into(),
        }
    }
}

/// Collapse client failures into the core fetch error so the aggregator
/// seam stays core-typed.
impl From<ApiError> for deckhand_core::Error {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Core(inner) => inner,
            other => deckhand_core::Error::Fetch(other.to_string()),
        }
    }
}
