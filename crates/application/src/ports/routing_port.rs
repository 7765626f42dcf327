//! Routing and travel analysis port
//!
//! Defines the interface for directions, isochrones and travel matrices.
//! Adapters in the infrastructure layer implement this port using OpenRouteService.

use async_trait::async_trait;
use domain::operations::{IsochroneResult, MatrixResult, RouteResult};
use domain::value_objects::{Coordinate, MatrixMetric, RangeType, RouteFormat, RoutingProfile};
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// A validated matrix computation request
#[derive(Debug, Clone, PartialEq)]
pub struct MatrixQuery {
    pub profile: RoutingProfile,
    pub locations: Vec<Coordinate>,
    pub metrics: Vec<MatrixMetric>,
    /// Row indices into `locations`; every location when `None`
    pub sources: Option<Vec<usize>>,
    /// Column indices into `locations`; every location when `None`
    pub destinations: Option<Vec<usize>>,
}

/// Port for routing operations
#[cfg_attr(test, automock)]
#[async_trait]
pub trait RoutingPort: Send + Sync {
    /// Compute a route visiting `coordinates` in order
    async fn route(
        &self,
        coordinates: &[Coordinate],
        profile: RoutingProfile,
        format: RouteFormat,
        instructions: bool,
    ) -> Result<RouteResult, ApplicationError>;

    /// Compute reachability polygons around a location
    async fn isochrone(
        &self,
        location: Coordinate,
        profile: RoutingProfile,
        range_values: &[u32],
        range_type: RangeType,
    ) -> Result<IsochroneResult, ApplicationError>;

    /// Compute travel durations and/or distances between locations
    async fn matrix(&self, query: &MatrixQuery) -> Result<MatrixResult, ApplicationError>;
}
