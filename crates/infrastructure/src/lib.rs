//! Infrastructure layer - Adapters for external systems
//!
//! Implements the application ports on top of the OpenStreetMap and
//! OpenRouteService clients, and owns configuration loading and logging setup.

pub mod adapters;
pub mod config;
pub mod telemetry;
mod wiring;

pub use adapters::*;
pub use config::AppConfig;
pub use telemetry::{TelemetryConfig, TelemetryError, bootstrap_subscriber, init_telemetry};
pub use wiring::build_dispatcher;
