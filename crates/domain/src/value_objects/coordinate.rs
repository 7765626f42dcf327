//! Geographic coordinate value objects
//!
//! Routing operations address points as an ordered `[longitude, latitude]`
//! pair ([`Coordinate`]), while geocoding operations use named fields
//! ([`LatLon`]). Both shapes are part of the public result contract.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A point as an ordered `(longitude, latitude)` pair
///
/// Serializes as a two-element JSON array `[lon, lat]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "[f64; 2]", into = "[f64; 2]")]
pub struct Coordinate {
    /// Longitude in degrees (-180 to 180)
    longitude: f64,
    /// Latitude in degrees (-90 to 90)
    latitude: f64,
}

/// Error type for invalid coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InvalidCoordinate {
    /// Rejected longitude
    pub longitude: f64,
    /// Rejected latitude
    pub latitude: f64,
}

impl fmt::Display for InvalidCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Invalid coordinate [{}, {}]: longitude must be -180 to 180, latitude must be -90 to 90",
            self.longitude, self.latitude
        )
    }
}

impl std::error::Error for InvalidCoordinate {}

impl Coordinate {
    /// Create a new coordinate with validation
    ///
    /// # Errors
    ///
    /// Returns `InvalidCoordinate` if either value is not finite, longitude is
    /// not in [-180, 180] or latitude is not in [-90, 90]
    pub fn new(longitude: f64, latitude: f64) -> Result<Self, InvalidCoordinate> {
        if !(-180.0..=180.0).contains(&longitude) || !(-90.0..=90.0).contains(&latitude) {
            return Err(InvalidCoordinate {
                longitude,
                latitude,
            });
        }
        Ok(Self {
            longitude,
            latitude,
        })
    }

    /// Create a coordinate without validation (for trusted sources)
    #[must_use]
    pub const fn new_unchecked(longitude: f64, latitude: f64) -> Self {
        Self {
            longitude,
            latitude,
        }
    }

    /// Get the longitude
    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Get the latitude
    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Convert to the named-field representation used by geocoding results
    #[must_use]
    pub const fn to_lat_lon(self) -> LatLon {
        LatLon {
            lat: self.latitude,
            lon: self.longitude,
        }
    }
}

impl TryFrom<[f64; 2]> for Coordinate {
    type Error = InvalidCoordinate;

    fn try_from([longitude, latitude]: [f64; 2]) -> Result<Self, Self::Error> {
        Self::new(longitude, latitude)
    }
}

impl From<Coordinate> for [f64; 2] {
    fn from(value: Coordinate) -> Self {
        [value.longitude, value.latitude]
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:.6}, {:.6}]", self.longitude, self.latitude)
    }
}

/// A point with named latitude/longitude fields
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLon {
    /// Latitude in degrees
    pub lat: f64,
    /// Longitude in degrees
    pub lon: f64,
}

impl LatLon {
    #[must_use]
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_coordinate() {
        let c = Coordinate::new(2.2945, 48.8584).expect("valid coordinate");
        assert!((c.longitude() - 2.2945).abs() < f64::EPSILON);
        assert!((c.latitude() - 48.8584).abs() < f64::EPSILON);
    }

    #[test]
    fn test_boundary_coordinates() {
        assert!(Coordinate::new(180.0, 90.0).is_ok());
        assert!(Coordinate::new(-180.0, -90.0).is_ok());
        assert!(Coordinate::new(0.0, 0.0).is_ok());
    }

    #[test]
    fn test_out_of_range_rejected() {
        assert!(Coordinate::new(181.0, 0.0).is_err());
        assert!(Coordinate::new(0.0, -91.0).is_err());
    }

    #[test]
    fn test_non_finite_rejected() {
        assert!(Coordinate::new(f64::NAN, 0.0).is_err());
        assert!(Coordinate::new(0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn test_serializes_as_lon_lat_array() {
        let c = Coordinate::new(2.3522, 48.8566).expect("valid");
        let json = serde_json::to_string(&c).expect("serialize");
        assert_eq!(json, "[2.3522,48.8566]");
    }

    #[test]
    fn test_deserialize_rejects_swapped_pair() {
        let result: Result<Coordinate, _> = serde_json::from_str("[10.0, 120.0]");
        assert!(result.is_err());
    }

    #[test]
    fn test_deserialize_rejects_wrong_arity() {
        assert!(serde_json::from_str::<Coordinate>("[1.0]").is_err());
        assert!(serde_json::from_str::<Coordinate>("[1.0, 2.0, 3.0]").is_err());
    }

    #[test]
    fn test_to_lat_lon_swaps_order() {
        let ll = Coordinate::new(2.2945, 48.8584).expect("valid").to_lat_lon();
        assert!((ll.lat - 48.8584).abs() < f64::EPSILON);
        assert!((ll.lon - 2.2945).abs() < f64::EPSILON);
    }

    #[test]
    fn test_lat_lon_serializes_named_fields() {
        let json = serde_json::to_value(LatLon::new(48.8584, 2.2945)).expect("serialize");
        assert_eq!(json["lat"], 48.8584);
        assert_eq!(json["lon"], 2.2945);
    }
}
