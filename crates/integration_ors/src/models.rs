//! Request bodies and raw ORS response shapes

use domain::operations::{InstructionStep, MetricMatrix};
use domain::value_objects::{Coordinate, MatrixMetric, RangeType};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Parameters of a matrix computation
#[derive(Debug, Clone, PartialEq)]
pub struct MatrixRequest {
    pub locations: Vec<Coordinate>,
    pub metrics: Vec<MatrixMetric>,
    /// Row indices into `locations`; all locations when `None`
    pub sources: Option<Vec<usize>>,
    /// Column indices into `locations`; all locations when `None`
    pub destinations: Option<Vec<usize>>,
}

impl MatrixRequest {
    /// All locations as both sources and destinations, both metrics
    #[must_use]
    pub fn new(locations: Vec<Coordinate>) -> Self {
        Self {
            locations,
            metrics: MatrixMetric::all(),
            sources: None,
            destinations: None,
        }
    }

    #[must_use]
    pub fn with_metrics(mut self, metrics: Vec<MatrixMetric>) -> Self {
        self.metrics = metrics;
        self
    }

    #[must_use]
    pub fn with_sources(mut self, sources: Vec<usize>) -> Self {
        self.sources = Some(sources);
        self
    }

    #[must_use]
    pub fn with_destinations(mut self, destinations: Vec<usize>) -> Self {
        self.destinations = Some(destinations);
        self
    }

    /// Source indices with the default applied
    pub(crate) fn resolved_sources(&self) -> Vec<usize> {
        self.sources
            .clone()
            .unwrap_or_else(|| (0..self.locations.len()).collect())
    }

    /// Destination indices with the default applied
    pub(crate) fn resolved_destinations(&self) -> Vec<usize> {
        self.destinations
            .clone()
            .unwrap_or_else(|| (0..self.locations.len()).collect())
    }

    pub(crate) fn wants(&self, metric: MatrixMetric) -> bool {
        self.metrics.contains(&metric)
    }
}

// --- Request bodies ---

#[derive(Debug, Serialize)]
pub(crate) struct DirectionsBody<'a> {
    pub coordinates: &'a [Coordinate],
    pub instructions: bool,
    pub elevation: bool,
}

#[derive(Debug, Serialize)]
pub(crate) struct IsochronesBody<'a> {
    pub locations: [Coordinate; 1],
    pub range: &'a [u32],
    pub range_type: RangeType,
}

#[derive(Debug, Serialize)]
pub(crate) struct MatrixBody<'a> {
    pub locations: &'a [Coordinate],
    pub metrics: &'a [MatrixMetric],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sources: Option<&'a [usize]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destinations: Option<&'a [usize]>,
}

impl<'a> From<&'a MatrixRequest> for MatrixBody<'a> {
    fn from(request: &'a MatrixRequest) -> Self {
        Self {
            locations: &request.locations,
            metrics: &request.metrics,
            sources: request.sources.as_deref(),
            destinations: request.destinations.as_deref(),
        }
    }
}

// --- Raw API response types for deserialization ---

/// Directions response; the shape depends on the requested format
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum RawDirections {
    Json { routes: Vec<RawRoute> },
    GeoJson { features: Vec<RawRouteFeature> },
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawRoute {
    #[serde(default)]
    pub summary: RawSummary,
    #[serde(default)]
    pub geometry: Value,
    #[serde(default)]
    pub segments: Vec<RawSegment>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawRouteFeature {
    #[serde(default)]
    pub geometry: Value,
    #[serde(default)]
    pub properties: RawRouteProperties,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct RawRouteProperties {
    #[serde(default)]
    pub summary: RawSummary,
    #[serde(default)]
    pub segments: Vec<RawSegment>,
}

/// ORS omits zero-valued summary fields
#[derive(Debug, Default, Deserialize)]
pub(crate) struct RawSummary {
    #[serde(default)]
    pub distance: f64,
    #[serde(default)]
    pub duration: f64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawSegment {
    #[serde(default)]
    pub steps: Vec<InstructionStep>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawIsochrones {
    pub features: Vec<RawIsochroneFeature>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawIsochroneFeature {
    #[serde(default)]
    pub geometry: Value,
    pub properties: RawIsochroneProperties,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawIsochroneProperties {
    pub value: f64,
    pub center: Option<[f64; 2]>,
}

impl RawIsochroneFeature {
    /// Whether this polygon was computed for the requested range value
    pub(crate) fn matches(&self, value: u32) -> bool {
        (self.properties.value - f64::from(value)).abs() < 0.5
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawMatrix {
    pub durations: Option<MetricMatrix>,
    pub distances: Option<MetricMatrix>,
}

/// ORS error payloads: `{"error": {"code": .., "message": ".."}}` or `{"error": ".."}`
#[derive(Debug, Deserialize)]
pub(crate) struct RawErrorBody {
    pub error: RawErrorDetail,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum RawErrorDetail {
    Structured { message: String },
    Plain(String),
}

impl RawErrorDetail {
    pub(crate) fn into_message(self) -> String {
        match self {
            Self::Structured { message } | Self::Plain(message) => message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paris() -> Vec<Coordinate> {
        vec![
            Coordinate::new_unchecked(2.3522, 48.8566),
            Coordinate::new_unchecked(2.2945, 48.8584),
            Coordinate::new_unchecked(2.3488, 48.8534),
        ]
    }

    #[test]
    fn test_matrix_body_omits_unset_indices() {
        let request = MatrixRequest::new(paris());
        let json = serde_json::to_value(MatrixBody::from(&request)).unwrap();
        assert!(json.get("sources").is_none());
        assert!(json.get("destinations").is_none());
        assert_eq!(json["metrics"], serde_json::json!(["distance", "duration"]));
        assert_eq!(json["locations"][1], serde_json::json!([2.2945, 48.8584]));
    }

    #[test]
    fn test_matrix_body_includes_indices() {
        let request = MatrixRequest::new(paris())
            .with_sources(vec![0])
            .with_destinations(vec![1, 2]);
        let json = serde_json::to_value(MatrixBody::from(&request)).unwrap();
        assert_eq!(json["sources"], serde_json::json!([0]));
        assert_eq!(json["destinations"], serde_json::json!([1, 2]));
    }

    #[test]
    fn test_resolved_indices_default_to_all() {
        let request = MatrixRequest::new(paris());
        assert_eq!(request.resolved_sources(), vec![0, 1, 2]);
        assert_eq!(request.resolved_destinations(), vec![0, 1, 2]);
    }

    #[test]
    fn test_directions_json_shape() {
        let json = r#"{
            "routes": [{
                "summary": {"distance": 5120.3, "duration": 812.4},
                "geometry": "encoded_polyline",
                "segments": [{"steps": [{"distance": 100.0, "duration": 20.0, "type": 11, "instruction": "Head east", "name": "Rue de Rivoli", "way_points": [0, 3]}]}]
            }],
            "metadata": {"service": "routing"}
        }"#;
        let raw: RawDirections = serde_json::from_str(json).unwrap();
        let RawDirections::Json { routes } = raw else {
            unreachable!("expected json shape");
        };
        assert_eq!(routes[0].segments[0].steps[0].maneuver, Some(11));
        assert!((routes[0].summary.duration - 812.4).abs() < f64::EPSILON);
    }

    #[test]
    fn test_directions_geojson_shape() {
        let json = r#"{
            "type": "FeatureCollection",
            "features": [{
                "type": "Feature",
                "geometry": {"type": "LineString", "coordinates": [[2.35, 48.85], [2.29, 48.85]]},
                "properties": {"summary": {"distance": 10.0}, "segments": []}
            }]
        }"#;
        let raw: RawDirections = serde_json::from_str(json).unwrap();
        let RawDirections::GeoJson { features } = raw else {
            unreachable!("expected geojson shape");
        };
        assert!((features[0].properties.summary.duration).abs() < f64::EPSILON);
        assert_eq!(features[0].geometry["type"], "LineString");
    }

    #[test]
    fn test_error_body_variants() {
        let structured: RawErrorBody =
            serde_json::from_str(r#"{"error": {"code": 2010, "message": "Could not find point"}}"#)
                .unwrap();
        assert_eq!(structured.error.into_message(), "Could not find point");

        let plain: RawErrorBody =
            serde_json::from_str(r#"{"error": "Access to this API has been disallowed"}"#).unwrap();
        assert!(plain.error.into_message().contains("disallowed"));
    }

    #[test]
    fn test_isochrone_feature_matches_value() {
        let feature: RawIsochroneFeature = serde_json::from_str(
            r#"{"geometry": {}, "properties": {"value": 600.0, "center": [2.35, 48.85]}}"#,
        )
        .unwrap();
        assert!(feature.matches(600));
        assert!(!feature.matches(300));
    }
}
