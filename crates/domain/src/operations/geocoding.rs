//! Normalized geocoding and POI results

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::value_objects::LatLon;

/// Free-form key/value map as reported by the provider (address parts, OSM tags)
pub type TagMap = BTreeMap<String, String>;

/// One candidate returned by a forward geocode
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocodeHit {
    pub display_name: Option<String>,
    pub lat: f64,
    pub lon: f64,
    /// Provider ranking score, when reported
    pub importance: Option<f64>,
    pub address: TagMap,
}

/// Result of converting a place name or address into coordinates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForwardGeocodeResult {
    pub query: String,
    /// Always equal to `results.len()`
    pub count: usize,
    pub results: Vec<GeocodeHit>,
}

impl ForwardGeocodeResult {
    #[must_use]
    pub fn new(query: impl Into<String>, results: Vec<GeocodeHit>) -> Self {
        Self {
            query: query.into(),
            count: results.len(),
            results,
        }
    }
}

/// Address block of a reverse geocode; absent fields serialize as `null`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReverseAddress {
    pub display_name: Option<String>,
    pub address: Option<TagMap>,
    /// `[south, north, west, east]` as the provider's decimal strings
    pub boundingbox: Option<Vec<String>>,
}

/// Result of converting coordinates into an address
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReverseGeocodeResult {
    pub coordinates: LatLon,
    pub address: ReverseAddress,
}

/// A point of interest resolved to a single position
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoiHit {
    pub name: String,
    /// Value of the `amenity` tag
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub lat: f64,
    pub lon: f64,
    pub tags: TagMap,
}

/// Result of a radius search for points of interest
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoiSearchResult {
    pub query: String,
    pub center: LatLon,
    /// Search radius in meters
    pub radius: u32,
    /// Always equal to `results.len()`
    pub count: usize,
    pub results: Vec<PoiHit>,
}

impl PoiSearchResult {
    #[must_use]
    pub fn new(query: impl Into<String>, center: LatLon, radius: u32, results: Vec<PoiHit>) -> Self {
        Self {
            query: query.into(),
            center,
            radius,
            count: results.len(),
            results,
        }
    }
}
