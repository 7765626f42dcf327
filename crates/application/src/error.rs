//! Application-level errors

use thiserror::Error;

/// Errors that can occur in the application layer
///
/// Every variant's `Display` text is what ends up in a tool's error envelope.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApplicationError {
    /// Arguments failed schema or range checks; no request was sent
    #[error("{0}")]
    Validation(String),

    /// Transport, status or timeout failure at a provider
    #[error("{0}")]
    Provider(String),

    /// A provider answered with a body that could not be normalized
    #[error("Failed to parse provider response: {0}")]
    Parse(String),

    /// No tool with this name is registered
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl ApplicationError {
    /// Check if this error is retryable
    ///
    /// Nothing in this crate retries; callers may use this as a hint.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Provider(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_tool_message() {
        let err = ApplicationError::UnknownTool("unknown_tool_xyz".to_string());
        assert_eq!(err.to_string(), "Unknown tool: unknown_tool_xyz");
    }

    #[test]
    fn validation_message_is_verbatim() {
        let err = ApplicationError::Validation("at least 2 coordinates required".to_string());
        assert_eq!(err.to_string(), "at least 2 coordinates required");
        assert!(!err.is_retryable());
    }

    #[test]
    fn provider_errors_are_retryable() {
        assert!(ApplicationError::Provider("OpenRouteService: HTTP 502".to_string()).is_retryable());
        assert!(!ApplicationError::Parse("bad".to_string()).is_retryable());
    }
}
