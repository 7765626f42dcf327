//! Routing adapter - Implements RoutingPort using integration_ors

use application::error::ApplicationError;
use application::ports::{MatrixQuery, RoutingPort};
use async_trait::async_trait;
use domain::operations::{IsochroneResult, MatrixResult, RouteResult};
use domain::value_objects::{Coordinate, RangeType, RouteFormat, RoutingProfile};
use integration_ors::{MatrixRequest, OrsConfig, OrsError, OrsRouteClient, RouteClient};
use tracing::{instrument, warn};

const PROVIDER: &str = "OpenRouteService";

/// Adapter for directions, isochrones and matrices using OpenRouteService
#[derive(Debug)]
pub struct OrsRoutingAdapter {
    client: OrsRouteClient,
}

impl OrsRoutingAdapter {
    /// Create a new routing adapter
    ///
    /// A missing API key is logged but not rejected; the provider decides.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// fails to initialize.
    pub fn new(config: &OrsConfig) -> Result<Self, ApplicationError> {
        config
            .validate()
            .map_err(|e| ApplicationError::Configuration(format!("ors: {e}")))?;

        if !config.has_api_key() {
            warn!("No OpenRouteService API key configured; requests may be rejected");
        }

        let client = OrsRouteClient::new(config).map_err(|e| {
            ApplicationError::Configuration(format!("Failed to create ORS client: {e}"))
        })?;

        Ok(Self::with_client(client))
    }

    /// Wrap an existing client
    #[must_use]
    pub const fn with_client(client: OrsRouteClient) -> Self {
        Self { client }
    }
}

/// Map an OpenRouteService error to the application error taxonomy
fn map_error(err: OrsError) -> ApplicationError {
    match err {
        OrsError::InvalidInput(msg) => ApplicationError::Validation(msg),
        OrsError::ParseError(msg) => ApplicationError::Parse(format!("{PROVIDER}: {msg}")),
        other => ApplicationError::Provider(format!("{PROVIDER}: {other}")),
    }
}

fn to_request(query: &MatrixQuery) -> MatrixRequest {
    MatrixRequest {
        locations: query.locations.clone(),
        metrics: query.metrics.clone(),
        sources: query.sources.clone(),
        destinations: query.destinations.clone(),
    }
}

#[async_trait]
impl RoutingPort for OrsRoutingAdapter {
    #[instrument(skip(self, coordinates))]
    async fn route(
        &self,
        coordinates: &[Coordinate],
        profile: RoutingProfile,
        format: RouteFormat,
        instructions: bool,
    ) -> Result<RouteResult, ApplicationError> {
        self.client
            .route(coordinates, profile, format, instructions)
            .await
            .map_err(map_error)
    }

    #[instrument(skip(self))]
    async fn isochrone(
        &self,
        location: Coordinate,
        profile: RoutingProfile,
        range_values: &[u32],
        range_type: RangeType,
    ) -> Result<IsochroneResult, ApplicationError> {
        self.client
            .isochrone(location, profile, range_values, range_type)
            .await
            .map_err(map_error)
    }

    #[instrument(skip(self, query), fields(profile = %query.profile))]
    async fn matrix(&self, query: &MatrixQuery) -> Result<MatrixResult, ApplicationError> {
        self.client
            .matrix(query.profile, &to_request(query))
            .await
            .map_err(map_error)
    }
}
