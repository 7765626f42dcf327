//! Logging setup
//!
//! Installs a `tracing-subscriber` pipeline with an `EnvFilter` and either
//! human-readable or JSON output on stderr.

mod subscriber;

pub use subscriber::{TelemetryConfig, TelemetryError, bootstrap_subscriber, init_telemetry};
