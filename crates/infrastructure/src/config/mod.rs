//! Application configuration
//!
//! Layered loading, lowest precedence first:
//! - serde defaults of each section
//! - `config.toml` in the working directory (or an explicit `--config` path)
//! - `MAPASSIST_*` environment variables, nested with `__`
//!   (e.g. `MAPASSIST_ORS__BASE_URL`)
//! - the conventional `ORS_API_KEY` and `USER_AGENT` variables

use std::path::Path;

use integration_ors::OrsConfig;
use integration_osm::OsmConfig;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::telemetry::TelemetryConfig;

/// Prefix of environment variables read by [`AppConfig::load`]
pub const ENV_PREFIX: &str = "MAPASSIST";

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Nominatim and Overpass settings
    #[serde(default)]
    pub osm: OsmConfig,

    /// OpenRouteService settings
    #[serde(default)]
    pub ors: OrsConfig,

    /// Logging settings
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    /// Load configuration from `config.toml` (if present) and the environment
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from(None)
    }

    /// Load configuration, reading `path` instead of `config.toml` when given
    ///
    /// An explicit path must exist; the default file is optional.
    pub fn load_from(path: Option<&Path>) -> Result<Self, config::ConfigError> {
        let file = match path {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name("config").required(false),
        };

        let builder = config::Config::builder()
            .add_source(file)
            // Override with environment variables (e.g., MAPASSIST_OSM__TIMEOUT_SECS)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );

        let mut config: Self = builder.build()?.try_deserialize()?;
        config.apply_env_overrides(|key| std::env::var(key).ok());

        debug!(
            nominatim = %config.osm.nominatim_url,
            overpass = %config.osm.overpass_url,
            ors = %config.ors.base_url,
            ors_key = config.ors.has_api_key(),
            "Configuration loaded"
        );
        Ok(config)
    }

    /// Apply `ORS_API_KEY` and `USER_AGENT` from `lookup`
    ///
    /// Blank values are ignored. `USER_AGENT` applies to both providers.
    pub fn apply_env_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let non_blank = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(api_key) = non_blank("ORS_API_KEY") {
            self.ors.api_key = Some(api_key);
        }

        if let Some(user_agent) = non_blank("USER_AGENT") {
            self.osm.user_agent.clone_from(&user_agent);
            self.ors.user_agent = user_agent;
        }
    }

    /// Validate every section
    ///
    /// # Errors
    ///
    /// Returns the first problem found, prefixed with its section name.
    pub fn validate(&self) -> Result<(), String> {
        self.osm.validate().map_err(|e| format!("osm: {e}"))?;
        self.ors.validate().map_err(|e| format!("ors: {e}"))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::io::Write;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn default_config_is_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.osm.nominatim_url, "https://nominatim.openstreetmap.org");
        assert_eq!(config.ors.base_url, "https://api.openrouteservice.org");
        assert_eq!(config.osm.timeout_secs, 30);
        assert_eq!(config.ors.timeout_secs, 30);
    }

    #[test]
    fn env_overrides_apply_api_key_and_user_agent() {
        let mut config = AppConfig::default();
        config.apply_env_overrides(lookup_from(&[
            ("ORS_API_KEY", "5b3ce3597851110001cf6248"),
            ("USER_AGENT", "MapAssist-ci/2.0"),
        ]));

        assert_eq!(config.ors.api_key.as_deref(), Some("5b3ce3597851110001cf6248"));
        assert_eq!(config.osm.user_agent, "MapAssist-ci/2.0");
        assert_eq!(config.ors.user_agent, "MapAssist-ci/2.0");
    }

    #[test]
    fn blank_env_values_are_ignored() {
        let mut config = AppConfig::default();
        config.apply_env_overrides(lookup_from(&[("ORS_API_KEY", "  "), ("USER_AGENT", "")]));

        assert!(config.ors.api_key.is_none());
        assert_eq!(config.osm.user_agent, OsmConfig::default().user_agent);
    }

    #[test]
    fn validate_reports_section() {
        let mut config = AppConfig::default();
        config.ors.timeout_secs = 0;
        let err = config.validate().unwrap_err();
        assert!(err.starts_with("ors:"));
    }

    #[test]
    fn load_from_explicit_toml_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[osm]
nominatim_url = "http://localhost:8088"
timeout_secs = 10

[ors]
base_url = "http://localhost:8082/ors"

[telemetry]
log_filter = "debug"
json = true
"#
        )
        .unwrap();

        let config = AppConfig::load_from(Some(file.path())).unwrap();
        assert_eq!(config.osm.nominatim_url, "http://localhost:8088");
        assert_eq!(config.osm.timeout_secs, 10);
        assert_eq!(config.osm.overpass_url, OsmConfig::default().overpass_url);
        assert_eq!(config.ors.base_url, "http://localhost:8082/ors");
        assert!(config.telemetry.json);
    }

    #[test]
    fn load_from_missing_explicit_file_fails() {
        let result = AppConfig::load_from(Some(Path::new("/nonexistent/mapassist.toml")));
        assert!(result.is_err());
    }

    #[test]
    fn deserialize_partial_sections() {
        let config: AppConfig =
            serde_json::from_str(r#"{"ors": {"api_key": "abc"}}"#).unwrap();
        assert!(config.ors.has_api_key());
        assert_eq!(config.ors.base_url, "https://api.openrouteservice.org");
        assert_eq!(config.osm.user_agent, "MapAssist/1.0");
    }
}
