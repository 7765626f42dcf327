//! Tracing subscriber initialization

use serde::{Deserialize, Serialize};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Configuration for logging
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TelemetryConfig {
    /// Log level filter (e.g., "info", "integration_ors=debug,info")
    ///
    /// `RUST_LOG` takes precedence when set.
    #[serde(default = "default_log_filter")]
    pub log_filter: String,

    /// Emit one JSON object per event instead of plain text
    #[serde(default)]
    pub json: bool,
}

fn default_log_filter() -> String {
    "warn".to_string()
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_filter: default_log_filter(),
            json: false,
        }
    }
}

/// Error type for telemetry initialization
#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    /// A global subscriber is already installed, or the filter is invalid
    #[error("Failed to initialize tracing: {0}")]
    Init(String),
}

/// Plain-text stderr subscriber for events emitted before configuration is loaded
///
/// Meant for `tracing::subscriber::with_default`. `RUST_LOG` takes precedence
/// over `log_filter`; an invalid filter falls back to `warn`.
pub fn bootstrap_subscriber(log_filter: &str) -> impl tracing::Subscriber + Send + Sync + 'static {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_filter))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(std::io::stderr))
}

/// Install the global tracing subscriber
///
/// Logs go to stderr so stdout stays free for tool output.
pub fn init_telemetry(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.log_filter)
            .map_err(|e| TelemetryError::Init(format!("invalid log filter: {e}")))?,
    };

    let registry = tracing_subscriber::registry().with(env_filter);

    let result = if config.json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init()
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_writer(std::io::stderr),
            )
            .try_init()
    };
    result.map_err(|e| TelemetryError::Init(e.to_string()))?;

    info!(json = config.json, "Telemetry initialized");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = TelemetryConfig::default();
        assert_eq!(config.log_filter, "warn");
        assert!(!config.json);
    }

    #[test]
    fn test_config_missing_fields_use_defaults() {
        let parsed: TelemetryConfig = serde_json::from_str(r#"{"json": true}"#).unwrap();
        assert!(parsed.json);
        assert_eq!(parsed.log_filter, "warn");
    }

    #[test]
    fn test_bootstrap_subscriber_applies_filter() {
        // RUST_LOG overrides the requested filter
        if std::env::var_os("RUST_LOG").is_some() {
            return;
        }

        let debug_on = tracing::subscriber::with_default(bootstrap_subscriber("debug"), || {
            tracing::enabled!(tracing::Level::DEBUG)
        });
        let debug_off = tracing::subscriber::with_default(bootstrap_subscriber("warn"), || {
            tracing::enabled!(tracing::Level::DEBUG)
        });

        assert!(debug_on);
        assert!(!debug_off);
    }

    #[test]
    fn test_bootstrap_subscriber_tolerates_bad_filter() {
        let loaded = tracing::subscriber::with_default(bootstrap_subscriber("=[bad"), || {
            crate::config::AppConfig::load_from(None).is_ok()
        });
        assert!(loaded);
    }

    #[test]
    fn test_second_init_fails() {
        let config = TelemetryConfig {
            log_filter: "debug".to_string(),
            json: false,
        };
        // The first call may succeed or lose a race with another test;
        // either way a global subscriber exists afterwards.
        let _ = init_telemetry(&config);
        assert!(init_telemetry(&config).is_err());
    }
}
