//! Routing vocabulary: transport profiles, range types, matrix metrics

use serde::{Deserialize, Serialize};
use std::fmt;

/// Transportation mode accepted by the routing provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum RoutingProfile {
    #[default]
    DrivingCar,
    DrivingHgv,
    CyclingRegular,
    CyclingRoad,
    CyclingMountain,
    CyclingElectric,
    FootWalking,
    FootHiking,
    Wheelchair,
}

impl RoutingProfile {
    /// Every profile known to the provider
    pub const ALL: [Self; 9] = [
        Self::DrivingCar,
        Self::DrivingHgv,
        Self::CyclingRegular,
        Self::CyclingRoad,
        Self::CyclingMountain,
        Self::CyclingElectric,
        Self::FootWalking,
        Self::FootHiking,
        Self::Wheelchair,
    ];

    /// Profiles accepted by the isochrone endpoint
    pub const ISOCHRONE: [Self; 5] = [
        Self::DrivingCar,
        Self::DrivingHgv,
        Self::CyclingRegular,
        Self::FootWalking,
        Self::Wheelchair,
    ];

    /// Profiles accepted by the matrix endpoint
    pub const MATRIX: [Self; 4] = [
        Self::DrivingCar,
        Self::DrivingHgv,
        Self::CyclingRegular,
        Self::FootWalking,
    ];

    /// The provider's path segment for this profile
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::DrivingCar => "driving-car",
            Self::DrivingHgv => "driving-hgv",
            Self::CyclingRegular => "cycling-regular",
            Self::CyclingRoad => "cycling-road",
            Self::CyclingMountain => "cycling-mountain",
            Self::CyclingElectric => "cycling-electric",
            Self::FootWalking => "foot-walking",
            Self::FootHiking => "foot-hiking",
            Self::Wheelchair => "wheelchair",
        }
    }
}

impl fmt::Display for RoutingProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether isochrone ranges are seconds or meters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RangeType {
    #[default]
    Time,
    Distance,
}

impl RangeType {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Time => "time",
            Self::Distance => "distance",
        }
    }
}

impl fmt::Display for RangeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A metric the matrix endpoint can compute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatrixMetric {
    Distance,
    Duration,
}

impl MatrixMetric {
    /// Default metric set: both
    #[must_use]
    pub fn all() -> Vec<Self> {
        vec![Self::Distance, Self::Duration]
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Distance => "distance",
            Self::Duration => "duration",
        }
    }
}

/// Response encoding requested from the directions endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RouteFormat {
    #[default]
    Json,
    Geojson,
}

impl RouteFormat {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Geojson => "geojson",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_serde_matches_path_segment() {
        for profile in RoutingProfile::ALL {
            let json = serde_json::to_string(&profile).unwrap();
            assert_eq!(json, format!("\"{}\"", profile.as_str()));
            let back: RoutingProfile = serde_json::from_str(&json).unwrap();
            assert_eq!(back, profile);
        }
    }

    #[test]
    fn test_profile_default_is_driving_car() {
        assert_eq!(RoutingProfile::default(), RoutingProfile::DrivingCar);
    }

    #[test]
    fn test_unknown_profile_rejected() {
        assert!(serde_json::from_str::<RoutingProfile>("\"hovercraft\"").is_err());
    }

    #[test]
    fn test_endpoint_subsets_are_subsets() {
        for p in RoutingProfile::ISOCHRONE {
            assert!(RoutingProfile::ALL.contains(&p));
        }
        for p in RoutingProfile::MATRIX {
            assert!(RoutingProfile::ISOCHRONE.contains(&p));
        }
    }

    #[test]
    fn test_range_type_and_metric_serde() {
        assert_eq!(serde_json::to_string(&RangeType::Distance).unwrap(), "\"distance\"");
        assert_eq!(
            serde_json::from_str::<MatrixMetric>("\"duration\"").unwrap(),
            MatrixMetric::Duration
        );
        assert_eq!(MatrixMetric::all().len(), 2);
    }

    #[test]
    fn test_route_format_as_str() {
        assert_eq!(RouteFormat::default().as_str(), "json");
        assert_eq!(RouteFormat::Geojson.as_str(), "geojson");
    }
}
