//! Error types for the authorization decision point
//!
//! None of these ever reach the host as a fault: the engine resolves every
//! one of them to a conservative `Unauthorized` decision. They exist so the
//! failure can be logged precisely and tested.

use thiserror::Error;

/// Errors raised while building or running an authorization check
#[derive(Debug, Error)]
pub enum AuthzError {
    /// Restricted paths were requested without a session credential
    #[error("no '{name}' credential on the request")]
    MissingCredential { name: String },

    /// Could not reach the permission service (connect failure, timeout)
    #[error("permission service unreachable: {0}")]
    OracleUnreachable(String),

    /// The permission service answered with a non-success status
    #[error("permission service returned status {0}")]
    OracleStatus(u16),

    /// The response body could not be read
    #[error("failed to read permission service response: {0}")]
    OracleBody(String),

    /// Serializing the permission request failed
    #[error("failed to serialize permission request: {0}")]
    Serialization(#[from] serde_json::Error),

    /// HTTP client construction failed
    #[error("http client error: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid configuration
    #[error("invalid configuration: {0}")]
    Config(String),

    /// The inbound request was cancelled before a decision was reached
    #[error("authorization check cancelled")]
    Cancelled,
}

impl AuthzError {
    /// Whether this error came from talking to the permission service
    pub fn is_oracle_failure(&self) -> bool {
        matches!(
            self,
            Self::OracleUnreachable(_) | Self::OracleStatus(_) | Self::OracleBody(_)
        )
    }
}

/// Result alias used throughout the crate
pub type AuthzResult<T> = Result<T, AuthzError>;
