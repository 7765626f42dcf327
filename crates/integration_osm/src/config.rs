//! OpenStreetMap service configuration

use serde::{Deserialize, Serialize};

/// Configuration for the Nominatim and Overpass endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OsmConfig {
    /// Base URL for the Nominatim API (`/search` and `/reverse` are appended)
    #[serde(default = "default_nominatim_url")]
    pub nominatim_url: String,

    /// Full URL of the Overpass interpreter endpoint
    #[serde(default = "default_overpass_url")]
    pub overpass_url: String,

    /// User-Agent header; Nominatim's usage policy requires an identifying value
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_nominatim_url() -> String {
    "https://nominatim.openstreetmap.org".to_string()
}

fn default_overpass_url() -> String {
    "https://overpass-api.de/api/interpreter".to_string()
}

fn default_user_agent() -> String {
    "MapAssist/1.0".to_string()
}

const fn default_timeout_secs() -> u64 {
    30
}

impl Default for OsmConfig {
    fn default() -> Self {
        Self {
            nominatim_url: default_nominatim_url(),
            overpass_url: default_overpass_url(),
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl OsmConfig {
    /// Create a configuration suitable for testing
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            timeout_secs: 5,
            user_agent: "MapAssist-tests/1.0".to_string(),
            ..Default::default()
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.nominatim_url.is_empty() {
            return Err("nominatim_url must not be empty".to_string());
        }

        if self.overpass_url.is_empty() {
            return Err("overpass_url must not be empty".to_string());
        }

        if self.user_agent.trim().is_empty() {
            return Err("user_agent must not be empty".to_string());
        }

        if self.timeout_secs == 0 {
            return Err("timeout_secs must be greater than 0".to_string());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = OsmConfig::default();
        assert_eq!(config.nominatim_url, "https://nominatim.openstreetmap.org");
        assert_eq!(config.overpass_url, "https://overpass-api.de/api/interpreter");
        assert_eq!(config.user_agent, "MapAssist/1.0");
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn test_testing_config() {
        let config = OsmConfig::for_testing();
        assert_eq!(config.timeout_secs, 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_empty_urls() {
        let config = OsmConfig {
            nominatim_url: String::new(),
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = OsmConfig {
            overpass_url: String::new(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_zero_timeout() {
        let config = OsmConfig {
            timeout_secs: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_deserialization_uses_defaults() {
        let config: OsmConfig =
            serde_json::from_str(r#"{"nominatim_url": "http://localhost:8080"}"#).unwrap();
        assert_eq!(config.nominatim_url, "http://localhost:8080");
        assert_eq!(config.overpass_url, "https://overpass-api.de/api/interpreter");
        assert_eq!(config.timeout_secs, 30);
    }
}
