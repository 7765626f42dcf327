//! Tool dispatcher
//!
//! Turns a tool name plus a JSON argument bag into a port call and converts
//! every failure into an [`ErrorEnvelope`]. This is the only place where
//! errors become data.

use std::sync::Arc;

use domain::operations::OperationResult;
use futures::stream::{self, StreamExt};
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Value, json};
use thiserror::Error;
use tracing::{info, instrument, warn};

use super::definition::{ToolDefinition, ToolName};
use super::params::{
    ForwardGeocodeParams, IsochroneParams, MatrixParams, PoiSearchParams, ReverseGeocodeParams,
    RouteParams, ToolParams,
};
use super::registry::ToolRegistry;
use crate::error::ApplicationError;
use crate::ports::{GeocodingPort, MatrixQuery, RoutingPort};

/// Concurrency used by batch callers that do not pick their own
pub const DEFAULT_MAX_IN_FLIGHT: usize = 4;

/// The error shape returned to the model: `{"error": "<message>"}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[error("{error}")]
pub struct ErrorEnvelope {
    pub error: String,
}

impl ErrorEnvelope {
    #[must_use]
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }

    #[must_use]
    pub fn to_json(&self) -> Value {
        json!({ "error": self.error })
    }
}

impl From<ApplicationError> for ErrorEnvelope {
    fn from(error: ApplicationError) -> Self {
        Self::new(error.to_string())
    }
}

/// One requested tool invocation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    pub name: String,
    #[serde(default)]
    pub arguments: Value,
}

impl ToolCall {
    #[must_use]
    pub fn new(name: impl Into<String>, arguments: Value) -> Self {
        Self {
            name: name.into(),
            arguments,
        }
    }
}

/// Result of one call in a batch
///
/// Serializes as `{"name": .., "output": <result or error envelope>}`.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolOutcome {
    pub name: String,
    pub result: Result<OperationResult, ErrorEnvelope>,
}

impl ToolOutcome {
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

impl Serialize for ToolOutcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ToolOutcome", 2)?;
        state.serialize_field("name", &self.name)?;
        match &self.result {
            Ok(result) => state.serialize_field("output", result)?,
            Err(envelope) => state.serialize_field("output", envelope)?,
        }
        state.end()
    }
}

/// Routes tool calls to the geocoding and routing ports
pub struct ToolDispatcher {
    registry: ToolRegistry,
    geocoding: Arc<dyn GeocodingPort>,
    routing: Arc<dyn RoutingPort>,
}

impl std::fmt::Debug for ToolDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolDispatcher")
            .field("tools", &self.registry.len())
            .finish_non_exhaustive()
    }
}

impl ToolDispatcher {
    #[must_use]
    pub fn new(geocoding: Arc<dyn GeocodingPort>, routing: Arc<dyn RoutingPort>) -> Self {
        Self {
            registry: ToolRegistry::new(),
            geocoding,
            routing,
        }
    }

    #[must_use]
    pub const fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Definitions of every tool, in registry order
    #[must_use]
    pub fn list_tool_definitions(&self) -> &[ToolDefinition] {
        self.registry.definitions()
    }

    /// Execute one tool call
    ///
    /// # Errors
    ///
    /// Returns an [`ErrorEnvelope`] for unknown tools, invalid arguments and
    /// provider failures alike.
    #[instrument(skip(self, arguments))]
    pub async fn execute(
        &self,
        name: &str,
        arguments: Value,
    ) -> Result<OperationResult, ErrorEnvelope> {
        info!(tool = name, "Executing tool");

        self.dispatch(name, arguments).await.map_err(|e| {
            warn!(tool = name, error = %e, "Tool call failed");
            ErrorEnvelope::from(e)
        })
    }

    /// Execute one tool call and render the result or envelope as JSON
    pub async fn execute_json(&self, name: &str, arguments: Value) -> Value {
        match self.execute(name, arguments).await {
            Ok(result) => serde_json::to_value(&result)
                .unwrap_or_else(|e| ErrorEnvelope::new(e.to_string()).to_json()),
            Err(envelope) => envelope.to_json(),
        }
    }

    /// Execute one tool call and render it as a JSON string
    pub async fn execute_text(&self, name: &str, arguments: Value) -> String {
        self.execute_json(name, arguments).await.to_string()
    }

    /// Run independent calls concurrently, at most `max_in_flight` at once
    ///
    /// Outcomes come back in input order. Dropping the returned future
    /// cancels every call still in flight.
    pub async fn execute_batch(&self, calls: Vec<ToolCall>, max_in_flight: usize) -> Vec<ToolOutcome> {
        let limit = max_in_flight.max(1);
        info!(calls = calls.len(), limit, "Executing tool batch");

        stream::iter(calls)
            .map(|call| async move {
                let result = self.execute(&call.name, call.arguments).await;
                ToolOutcome {
                    name: call.name,
                    result,
                }
            })
            .buffered(limit)
            .collect::<Vec<_>>()
            .await
    }

    async fn dispatch(
        &self,
        name: &str,
        arguments: Value,
    ) -> Result<OperationResult, ApplicationError> {
        let tool = ToolName::parse(name)
            .filter(|tool| self.registry.contains(tool.as_str()))
            .ok_or_else(|| ApplicationError::UnknownTool(name.to_string()))?;

        let result: OperationResult = match tool {
            ToolName::ForwardGeocode => {
                let p = ForwardGeocodeParams::from_arguments(arguments)?;
                self.geocoding
                    .forward_geocode(&p.query, p.limit)
                    .await?
                    .into()
            },
            ToolName::ReverseGeocode => {
                let p = ReverseGeocodeParams::from_arguments(arguments)?;
                self.geocoding
                    .reverse_geocode(p.lat, p.lon, p.zoom)
                    .await?
                    .into()
            },
            ToolName::PoiSearch => {
                let p = PoiSearchParams::from_arguments(arguments)?;
                self.geocoding
                    .poi_search(&p.query, p.lat, p.lon, p.radius, p.limit)
                    .await?
                    .into()
            },
            ToolName::Route => {
                let p = RouteParams::from_arguments(arguments)?;
                self.routing
                    .route(&p.coordinates, p.profile, p.format, p.instructions)
                    .await?
                    .into()
            },
            ToolName::Isochrone => {
                let p = IsochroneParams::from_arguments(arguments)?;
                self.routing
                    .isochrone(p.location, p.profile, &p.range_values, p.range_type)
                    .await?
                    .into()
            },
            ToolName::Matrix => {
                let query = MatrixQuery::from(MatrixParams::from_arguments(arguments)?);
                self.routing.matrix(&query).await?.into()
            },
        };

        Ok(result)
    }
}
