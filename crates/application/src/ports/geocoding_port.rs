//! Geocoding and POI search port
//!
//! Defines the interface for address lookup and amenity search.
//! Adapters in the infrastructure layer implement this port using OpenStreetMap services.

use async_trait::async_trait;
use domain::operations::{ForwardGeocodeResult, PoiSearchResult, ReverseGeocodeResult};
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for geocoding operations
#[cfg_attr(test, automock)]
#[async_trait]
pub trait GeocodingPort: Send + Sync {
    /// Resolve an address or place name to candidate coordinates
    async fn forward_geocode(
        &self,
        query: &str,
        limit: u32,
    ) -> Result<ForwardGeocodeResult, ApplicationError>;

    /// Resolve coordinates to an address at the given detail level
    async fn reverse_geocode(
        &self,
        lat: f64,
        lon: f64,
        zoom: i32,
    ) -> Result<ReverseGeocodeResult, ApplicationError>;

    /// Find amenities matching `query` within `radius` meters of a point
    async fn poi_search(
        &self,
        query: &str,
        lat: f64,
        lon: f64,
        radius: u32,
        limit: u32,
    ) -> Result<PoiSearchResult, ApplicationError>;
}
