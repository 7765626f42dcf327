//! Routing service configuration

use serde::{Deserialize, Serialize};

/// Configuration for the OpenRouteService API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrsConfig {
    /// Base URL for the ORS API (`/v2/...` paths are appended)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// API key, sent verbatim in the `Authorization` header when set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// User-Agent header identifying this client
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "https://api.openrouteservice.org".to_string()
}

fn default_user_agent() -> String {
    "MapAssist/1.0".to_string()
}

const fn default_timeout_secs() -> u64 {
    30
}

impl Default for OrsConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: None,
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl OrsConfig {
    /// Create a configuration suitable for testing
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            api_key: Some("test-key".to_string()),
            timeout_secs: 5,
            ..Default::default()
        }
    }

    /// Check if an API key is configured
    #[must_use]
    pub const fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Validate the configuration
    ///
    /// A missing API key is not an error; the provider decides.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.base_url.is_empty() {
            return Err("base_url must not be empty".to_string());
        }

        if self.timeout_secs == 0 {
            return Err("timeout_secs must be greater than 0".to_string());
        }

        if self.api_key.as_deref().is_some_and(|k| k.trim().is_empty()) {
            return Err("api_key must not be blank when set".to_string());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = OrsConfig::default();
        assert_eq!(config.base_url, "https://api.openrouteservice.org");
        assert!(!config.has_api_key());
        assert_eq!(config.timeout_secs, 30);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_testing_config() {
        let config = OrsConfig::for_testing();
        assert!(config.has_api_key());
        assert_eq!(config.timeout_secs, 5);
    }

    #[test]
    fn test_validation_blank_api_key() {
        let config = OrsConfig {
            api_key: Some("   ".to_string()),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_zero_timeout() {
        let config = OrsConfig {
            timeout_secs: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_api_key_not_serialized_when_absent() {
        let json = serde_json::to_value(OrsConfig::default()).unwrap();
        assert!(json.get("api_key").is_none());
    }
}
