// Error handling module
// Defines error types for the session orchestrator

use thiserror::Error;

/// Errors that propagate to the caller as hard failures.
///
/// Dialog failure and cancellation are terminal outcomes, not errors, and
/// request-level failures are delivered as [`crate::types::RequestOutcome`].
#[derive(Error, Debug)]
pub enum ConnectError {
    /// `expires_in` value that is not an integer number of seconds
    #[error("invalid expires_in value: {value:?}")]
    InvalidExpiry { value: String },

    /// Transport-level failure outside the request path
    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// Errors from the HTTP transport adapter
#[derive(Error, Debug)]
pub enum TransportError {
    /// Underlying HTTP client could not be constructed
    #[error("failed to create HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    /// HTTP method string that the transport cannot represent
    #[error("invalid HTTP method: {0}")]
    InvalidMethod(String),

    /// Network or protocol failure from the underlying client
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
}

/// Result type alias for orchestrator operations
pub type Result<T> = std::result::Result<T, ConnectError>;
