//! Operation results - the provider-agnostic output of every tool
//!
//! [`OperationResult`] is internally tagged, so every serialized result
//! carries `"operation": "<logical name>"` next to its own fields.

mod geocoding;
mod routing;

use serde::{Deserialize, Serialize};

pub use geocoding::{
    ForwardGeocodeResult, GeocodeHit, PoiHit, PoiSearchResult, ReverseAddress,
    ReverseGeocodeResult, TagMap,
};
pub use routing::{
    InstructionStep, IsochronePolygon, IsochroneResult, MatrixResult, MetricMatrix, RouteResult,
    RouteSummary,
};

/// Successful result of any operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "operation", rename_all = "snake_case")]
pub enum OperationResult {
    ForwardGeocode(ForwardGeocodeResult),
    ReverseGeocode(ReverseGeocodeResult),
    PoiSearch(PoiSearchResult),
    Route(RouteResult),
    Isochrone(IsochroneResult),
    Matrix(MatrixResult),
}

impl OperationResult {
    /// Logical operation name, identical to the serialized `operation` field
    #[must_use]
    pub const fn operation(&self) -> &'static str {
        match self {
            Self::ForwardGeocode(_) => "forward_geocode",
            Self::ReverseGeocode(_) => "reverse_geocode",
            Self::PoiSearch(_) => "poi_search",
            Self::Route(_) => "route",
            Self::Isochrone(_) => "isochrone",
            Self::Matrix(_) => "matrix",
        }
    }
}

impl From<ForwardGeocodeResult> for OperationResult {
    fn from(value: ForwardGeocodeResult) -> Self {
        Self::ForwardGeocode(value)
    }
}

impl From<ReverseGeocodeResult> for OperationResult {
    fn from(value: ReverseGeocodeResult) -> Self {
        Self::ReverseGeocode(value)
    }
}

impl From<PoiSearchResult> for OperationResult {
    fn from(value: PoiSearchResult) -> Self {
        Self::PoiSearch(value)
    }
}

impl From<RouteResult> for OperationResult {
    fn from(value: RouteResult) -> Self {
        Self::Route(value)
    }
}

impl From<IsochroneResult> for OperationResult {
    fn from(value: IsochroneResult) -> Self {
        Self::Isochrone(value)
    }
}

impl From<MatrixResult> for OperationResult {
    fn from(value: MatrixResult) -> Self {
        Self::Matrix(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value_objects::{Coordinate, LatLon, RoutingProfile};

    #[test]
    fn test_operation_tag_matches_operation_name() {
        let results: Vec<OperationResult> = vec![
            ForwardGeocodeResult::new("x", vec![]).into(),
            ReverseGeocodeResult {
                coordinates: LatLon::new(0.0, 0.0),
                address: ReverseAddress::default(),
            }
            .into(),
            PoiSearchResult::new("cafe", LatLon::new(0.0, 0.0), 500, vec![]).into(),
            RouteResult {
                profile: RoutingProfile::DrivingCar,
                coordinates: vec![],
                routes: vec![],
            }
            .into(),
            MatrixResult {
                profile: RoutingProfile::FootWalking,
                locations: vec![],
                durations: None,
                distances: None,
            }
            .into(),
        ];

        for result in results {
            let json = serde_json::to_value(&result).unwrap();
            assert_eq!(json["operation"], result.operation());
        }
    }

    #[test]
    fn test_zero_result_poi_keeps_count_and_results() {
        let result: OperationResult =
            PoiSearchResult::new("zoo", LatLon::new(10.0, 10.0), 100, vec![]).into();
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["count"], 0);
        assert_eq!(json["results"], serde_json::json!([]));
        assert_eq!(json["center"]["lat"], 10.0);
    }

    #[test]
    fn test_matrix_unrequested_metric_is_null() {
        let result: OperationResult = MatrixResult {
            profile: RoutingProfile::DrivingCar,
            locations: vec![
                Coordinate::new_unchecked(2.35, 48.85),
                Coordinate::new_unchecked(2.29, 48.85),
            ],
            durations: Some(vec![vec![Some(0.0), Some(120.5)], vec![Some(118.0), Some(0.0)]]),
            distances: None,
        }
        .into();
        let json = serde_json::to_value(&result).unwrap();
        assert!(json["distances"].is_null());
        assert_eq!(json["durations"][0][1], 120.5);
        assert_eq!(json["locations"][0], serde_json::json!([2.35, 48.85]));
    }

    #[test]
    fn test_deserialize_tagged_result() {
        let json = r#"{"operation":"forward_geocode","query":"q","count":0,"results":[]}"#;
        let result: OperationResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.operation(), "forward_geocode");
    }
}
