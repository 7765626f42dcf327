//! Normalized routing, isochrone and matrix results

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::value_objects::{Coordinate, RangeType, RoutingProfile};

/// Row-major matrix of optional cell values (`None` = unreachable)
pub type MetricMatrix = Vec<Vec<Option<f64>>>;

/// One turn-by-turn step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstructionStep {
    pub instruction: String,
    #[serde(default)]
    pub name: String,
    /// Meters
    #[serde(default)]
    pub distance: f64,
    /// Seconds
    #[serde(default)]
    pub duration: f64,
    /// Provider maneuver code
    #[serde(rename = "type", default)]
    pub maneuver: Option<u32>,
    /// Index range into the route geometry
    #[serde(default)]
    pub way_points: Vec<usize>,
    /// Provider fields without a typed counterpart (`exit_number`, `exit_bearings`, ...)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One alternative route
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteSummary {
    /// Meters
    pub distance: f64,
    /// Seconds
    pub duration: f64,
    /// Encoded polyline (json format) or GeoJSON geometry (geojson format)
    pub geometry: Value,
    /// Steps of the first segment only; empty when instructions were not requested
    pub instructions: Vec<InstructionStep>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteResult {
    pub profile: RoutingProfile,
    pub coordinates: Vec<Coordinate>,
    pub routes: Vec<RouteSummary>,
}

/// A reachability polygon for one range value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IsochronePolygon {
    /// Seconds or meters, depending on `range_type`
    pub value: u32,
    pub range_type: RangeType,
    pub center: Coordinate,
    pub geometry: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IsochroneResult {
    pub profile: RoutingProfile,
    pub location: Coordinate,
    pub range_type: RangeType,
    /// One entry per requested range value, in request order
    pub isochrones: Vec<IsochronePolygon>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatrixResult {
    pub profile: RoutingProfile,
    pub locations: Vec<Coordinate>,
    /// Seconds; `null` when not requested
    pub durations: Option<MetricMatrix>,
    /// Meters; `null` when not requested
    pub distances: Option<MetricMatrix>,
}
