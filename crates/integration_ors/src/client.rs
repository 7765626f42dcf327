//! OpenRouteService client
//!
//! Directions, isochrones and distance/duration matrices via the
//! [ORS v2 API](https://openrouteservice.org/dev/#/api-docs/v2).

use std::time::Duration;

use async_trait::async_trait;
use domain::operations::{
    IsochronePolygon, IsochroneResult, MatrixResult, MetricMatrix, RouteResult, RouteSummary,
};
use domain::value_objects::{Coordinate, MatrixMetric, RangeType, RouteFormat, RoutingProfile};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::config::OrsConfig;
use crate::error::OrsError;
use crate::models::{
    DirectionsBody, IsochronesBody, MatrixBody, MatrixRequest, RawDirections, RawErrorBody,
    RawIsochroneFeature, RawIsochrones, RawMatrix, RawSegment, RawSummary,
};

/// Trait for routing clients
#[async_trait]
pub trait RouteClient: Send + Sync {
    /// Compute a route through `coordinates` in order
    async fn route(
        &self,
        coordinates: &[Coordinate],
        profile: RoutingProfile,
        format: RouteFormat,
        instructions: bool,
    ) -> Result<RouteResult, OrsError>;

    /// Compute one reachability polygon per range value
    async fn isochrone(
        &self,
        location: Coordinate,
        profile: RoutingProfile,
        range_values: &[u32],
        range_type: RangeType,
    ) -> Result<IsochroneResult, OrsError>;

    /// Compute a source x destination matrix
    async fn matrix(
        &self,
        profile: RoutingProfile,
        request: &MatrixRequest,
    ) -> Result<MatrixResult, OrsError>;
}

/// OpenRouteService HTTP client
#[derive(Debug)]
pub struct OrsRouteClient {
    client: Client,
    config: OrsConfig,
}

impl OrsRouteClient {
    /// Create a new OpenRouteService client
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: &OrsConfig) -> Result<Self, OrsError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| OrsError::ConnectionFailed(e.to_string()))?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/v2/{path}", self.config.base_url.trim_end_matches('/'))
    }

    /// POST builder with the API key attached when configured
    fn post(&self, url: &str) -> RequestBuilder {
        let request = self.client.post(url);
        match &self.config.api_key {
            Some(key) => request.header("Authorization", key),
            None => request,
        }
    }

    fn transport_error(&self, e: &reqwest::Error) -> OrsError {
        if e.is_timeout() {
            OrsError::Timeout {
                timeout_secs: self.config.timeout_secs,
            }
        } else {
            OrsError::ConnectionFailed(e.to_string())
        }
    }

    /// Send the request and decode a successful JSON body
    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, OrsError> {
        let response = request.send().await.map_err(|e| self.transport_error(&e))?;
        let body = self.read_body(response).await?;
        serde_json::from_str(&body).map_err(|e| OrsError::ParseError(e.to_string()))
    }

    async fn read_body(&self, response: Response) -> Result<String, OrsError> {
        let status = response.status();
        let body = response.text().await.map_err(|e| {
            if e.is_timeout() {
                self.transport_error(&e)
            } else {
                OrsError::ParseError(e.to_string())
            }
        })?;

        if status.is_success() {
            return Ok(body);
        }

        let detail = match provider_message(&body) {
            Some(message) => format!("HTTP {status}: {message}"),
            None => format!("HTTP {status}"),
        };
        warn!(%status, "Routing request rejected");

        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                Err(OrsError::AuthenticationFailed(detail))
            },
            _ => Err(OrsError::RequestFailed(detail)),
        }
    }
}

#[async_trait]
impl RouteClient for OrsRouteClient {
    #[instrument(skip(self, coordinates), fields(points = coordinates.len()))]
    async fn route(
        &self,
        coordinates: &[Coordinate],
        profile: RoutingProfile,
        format: RouteFormat,
        instructions: bool,
    ) -> Result<RouteResult, OrsError> {
        if coordinates.len() < 2 {
            return Err(OrsError::InvalidInput(
                "at least 2 coordinates required".to_string(),
            ));
        }

        let url = self.endpoint(&format!("directions/{profile}/{}", format.as_str()));
        debug!(?url, "Requesting directions");

        let body = DirectionsBody {
            coordinates,
            instructions,
            elevation: false,
        };
        let raw: RawDirections = self.send_json(self.post(&url).json(&body)).await?;
        let routes = normalize_routes(raw, instructions);

        debug!(count = routes.len(), "Routes computed");
        Ok(RouteResult {
            profile,
            coordinates: coordinates.to_vec(),
            routes,
        })
    }

    #[instrument(skip(self, range_values))]
    async fn isochrone(
        &self,
        location: Coordinate,
        profile: RoutingProfile,
        range_values: &[u32],
        range_type: RangeType,
    ) -> Result<IsochroneResult, OrsError> {
        if range_values.is_empty() {
            return Err(OrsError::InvalidInput(
                "at least 1 range value required".to_string(),
            ));
        }
        if range_values.contains(&0) {
            return Err(OrsError::InvalidInput(
                "range values must be positive".to_string(),
            ));
        }

        let url = self.endpoint(&format!("isochrones/{profile}"));
        debug!(?url, ranges = range_values.len(), "Requesting isochrones");

        let body = IsochronesBody {
            locations: [location],
            range: range_values,
            range_type,
        };
        let raw: RawIsochrones = self.send_json(self.post(&url).json(&body)).await?;
        let isochrones = order_isochrones(raw.features, range_values, range_type, location)?;

        Ok(IsochroneResult {
            profile,
            location,
            range_type,
            isochrones,
        })
    }

    #[instrument(skip(self, request), fields(locations = request.locations.len()))]
    async fn matrix(
        &self,
        profile: RoutingProfile,
        request: &MatrixRequest,
    ) -> Result<MatrixResult, OrsError> {
        validate_matrix(request)?;

        let url = self.endpoint(&format!("matrix/{profile}"));
        debug!(?url, "Requesting matrix");

        let raw: RawMatrix = self
            .send_json(self.post(&url).json(&MatrixBody::from(request)))
            .await?;

        let sources = request.resolved_sources();
        let destinations = request.resolved_destinations();
        let durations = normalize_matrix(
            request.wants(MatrixMetric::Duration),
            raw.durations,
            &sources,
            &destinations,
        )?;
        let distances = normalize_matrix(
            request.wants(MatrixMetric::Distance),
            raw.distances,
            &sources,
            &destinations,
        )?;

        Ok(MatrixResult {
            profile,
            locations: request.locations.clone(),
            durations,
            distances,
        })
    }
}

/// Extract the message from an ORS error body, if it has one
fn provider_message(body: &str) -> Option<String> {
    serde_json::from_str::<RawErrorBody>(body)
        .ok()
        .map(|raw| raw.error.into_message())
}

fn normalize_routes(raw: RawDirections, instructions: bool) -> Vec<RouteSummary> {
    let summarize = |summary: RawSummary, geometry: Value, segments: Vec<RawSegment>| RouteSummary {
        distance: summary.distance,
        duration: summary.duration,
        geometry,
        instructions: if instructions {
            segments
                .into_iter()
                .next()
                .map(|segment| segment.steps)
                .unwrap_or_default()
        } else {
            Vec::new()
        },
    };

    match raw {
        RawDirections::Json { routes } => routes
            .into_iter()
            .map(|r| summarize(r.summary, r.geometry, r.segments))
            .collect(),
        RawDirections::GeoJson { features } => features
            .into_iter()
            .map(|f| summarize(f.properties.summary, f.geometry, f.properties.segments))
            .collect(),
    }
}

/// Pair each requested range value with the polygon computed for it
///
/// The provider does not guarantee feature order, so polygons are matched
/// by their `value` property and emitted in request order.
fn order_isochrones(
    mut features: Vec<RawIsochroneFeature>,
    range_values: &[u32],
    range_type: RangeType,
    location: Coordinate,
) -> Result<Vec<IsochronePolygon>, OrsError> {
    range_values
        .iter()
        .map(|&value| {
            let index = features
                .iter()
                .position(|f| f.matches(value))
                .ok_or_else(|| {
                    OrsError::ParseError(format!("No isochrone returned for range value {value}"))
                })?;
            let feature = features.swap_remove(index);

            let center = match feature.properties.center {
                Some(raw) => {
                    Coordinate::try_from(raw).map_err(|e| OrsError::ParseError(e.to_string()))?
                },
                None => location,
            };

            Ok(IsochronePolygon {
                value,
                range_type,
                center,
                geometry: feature.geometry,
            })
        })
        .collect()
}

fn validate_matrix(request: &MatrixRequest) -> Result<(), OrsError> {
    let count = request.locations.len();
    if count < 2 {
        return Err(OrsError::InvalidInput(
            "at least 2 locations required".to_string(),
        ));
    }
    if request.metrics.is_empty() {
        return Err(OrsError::InvalidInput(
            "at least 1 metric required".to_string(),
        ));
    }

    let indices = [
        ("sources", request.sources.as_deref()),
        ("destinations", request.destinations.as_deref()),
    ];
    for (field, values) in indices {
        if let Some(&bad) = values.unwrap_or_default().iter().find(|&&i| i >= count) {
            return Err(OrsError::InvalidInput(format!(
                "{field} index {bad} out of range for {count} locations"
            )));
        }
    }

    Ok(())
}

/// Drop unrequested metrics, check the shape and zero self-pairs
fn normalize_matrix(
    requested: bool,
    raw: Option<MetricMatrix>,
    sources: &[usize],
    destinations: &[usize],
) -> Result<Option<MetricMatrix>, OrsError> {
    if !requested {
        return Ok(None);
    }
    let Some(mut matrix) = raw else {
        return Err(OrsError::ParseError(
            "Requested metric missing from matrix response".to_string(),
        ));
    };

    let well_formed = matrix.len() == sources.len()
        && matrix.iter().all(|row| row.len() == destinations.len());
    if !well_formed {
        return Err(OrsError::ParseError(format!(
            "Matrix shape does not match {} sources x {} destinations",
            sources.len(),
            destinations.len()
        )));
    }

    for (row, source) in matrix.iter_mut().zip(sources) {
        for (cell, destination) in row.iter_mut().zip(destinations) {
            if source == destination {
                *cell = Some(0.0);
            }
        }
    }

    Ok(Some(matrix))
}
