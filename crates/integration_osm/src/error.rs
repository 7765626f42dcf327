//! OpenStreetMap error types

use thiserror::Error;

/// Errors that can occur while talking to Nominatim or Overpass
#[derive(Debug, Error)]
pub enum OsmError {
    /// Connection to the service failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// The service answered with a non-success status
    #[error("Request failed: {0}")]
    RequestFailed(String),

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

impl OsmError {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_errors() {
        assert!(OsmError::ConnectionFailed("test".to_string()).is_retryable());
        assert!(OsmError::RequestFailed("HTTP 503".to_string()).is_retryable());
        assert!(OsmError::Timeout { timeout_secs: 30 }.is_retryable());
        assert!(!OsmError::ParseError("bad lat".to_string()).is_retryable());
    }

    #[test]
    fn test_error_display() {
        let err = OsmError::Timeout { timeout_secs: 30 };
        assert_eq!(err.to_string(), "Request timed out after 30 seconds");

        let err = OsmError::RequestFailed("HTTP 429 Too Many Requests".to_string());
        assert!(err.to_string().contains("429"));
    }
}
