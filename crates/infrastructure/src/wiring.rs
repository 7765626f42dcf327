//! Dispatcher assembly from configuration

use std::sync::Arc;

use application::ToolDispatcher;
use application::error::ApplicationError;
use tracing::info;

use crate::adapters::{OrsRoutingAdapter, OsmGeocodingAdapter};
use crate::config::AppConfig;

/// Build a dispatcher wired to the OpenStreetMap and OpenRouteService adapters
///
/// # Errors
///
/// Returns [`ApplicationError::Configuration`] if either provider section is
/// invalid or its HTTP client cannot be built.
pub fn build_dispatcher(config: &AppConfig) -> Result<ToolDispatcher, ApplicationError> {
    let geocoding = OsmGeocodingAdapter::new(&config.osm)?;
    let routing = OrsRoutingAdapter::new(&config.ors)?;

    let dispatcher = ToolDispatcher::new(Arc::new(geocoding), Arc::new(routing));
    info!(tools = dispatcher.list_tool_definitions().len(), "Tool dispatcher ready");
    Ok(dispatcher)
}
