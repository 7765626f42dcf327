//! OpenRouteService error types

use thiserror::Error;

/// Errors that can occur during routing operations
#[derive(Debug, Error)]
pub enum OrsError {
    /// Input rejected locally, before any request was sent
    #[error("{0}")]
    InvalidInput(String),

    /// Connection to the routing service failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// The service answered with a non-success status
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// API key missing or rejected
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// The response was missing or had malformed fields
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Request timeout
    #[error("Request timed out after {timeout_secs} seconds")]
    Timeout {
        /// The timeout duration in seconds
        timeout_secs: u64,
    },
}

impl OrsError {
    /// Returns true if this error is retryable
    ///
    /// Informational only; the client itself never retries.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::ConnectionFailed(_) | Self::RequestFailed(_) | Self::Timeout { .. }
        )
    }
}
