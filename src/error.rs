//! Error types for the Pwinty client
//!
//! Every facade operation returns a [`PwintyResult`]. Protocol failures and
//! business rejections from the service share one variant, [`PwintyError::Api`],
//! because the wire does not distinguish them.

use thiserror::Error;

use crate::transport::TransportError;

/// Pwinty client error types
#[derive(Debug, Error)]
pub enum PwintyError {
    /// The HTTP call itself did not complete (DNS, TLS, connection reset...)
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// Non-success status, or a response without a decodable body.
    ///
    /// `message` is the service's `errorMessage` when it sent one, otherwise
    /// the raw response text.
    #[error("{message}")]
    Api { status: u16, message: String },

    /// The body decoded as JSON but not into the expected type
    #[error("Unexpected response shape: {0}")]
    Decode(#[source] serde_json::Error),

    /// The request body could not be serialized
    #[error("Failed to encode request body: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("Missing credentials: {0} is not configured")]
    MissingCredentials(&'static str),

    /// A decoded value this client does not know cannot be sent back
    #[error("Cannot send unrecognized {0} value back to the service")]
    Unrepresentable(&'static str),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

impl PwintyError {
    /// HTTP status of an API failure, if this is one
    pub fn status(&self) -> Option<u16> {
        match self {
            PwintyError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// True when the service answered but refused or failed the request
    pub fn is_api_error(&self) -> bool {
        matches!(self, PwintyError::Api { .. })
    }
}

/// Result type for client operations
pub type PwintyResult<T> = Result<T, PwintyError>;
