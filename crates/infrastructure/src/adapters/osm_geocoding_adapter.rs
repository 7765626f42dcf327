//! Geocoding adapter - Implements GeocodingPort using integration_osm

use application::error::ApplicationError;
use application::ports::GeocodingPort;
use async_trait::async_trait;
use domain::operations::{ForwardGeocodeResult, PoiSearchResult, ReverseGeocodeResult};
use integration_osm::{GeoClient, OsmConfig, OsmError, OsmGeoClient};
use tracing::instrument;

const PROVIDER: &str = "OpenStreetMap";

/// Adapter for geocoding and POI search using Nominatim and Overpass
#[derive(Debug)]
pub struct OsmGeocodingAdapter {
    client: OsmGeoClient,
}

impl OsmGeocodingAdapter {
    /// Create a new geocoding adapter
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// fails to initialize.
    pub fn new(config: &OsmConfig) -> Result<Self, ApplicationError> {
        config
            .validate()
            .map_err(|e| ApplicationError::Configuration(format!("osm: {e}")))?;

        let client = OsmGeoClient::new(config).map_err(|e| {
            ApplicationError::Configuration(format!("Failed to create OSM client: {e}"))
        })?;

        Ok(Self::with_client(client))
    }

    /// Wrap an existing client
    #[must_use]
    pub const fn with_client(client: OsmGeoClient) -> Self {
        Self { client }
    }
}

/// Map an OpenStreetMap error to the application error taxonomy
fn map_error(err: OsmError) -> ApplicationError {
    match err {
        OsmError::ParseError(msg) => ApplicationError::Parse(format!("{PROVIDER}: {msg}")),
        other => ApplicationError::Provider(format!("{PROVIDER}: {other}")),
    }
}

#[async_trait]
impl GeocodingPort for OsmGeocodingAdapter {
    #[instrument(skip(self))]
    async fn forward_geocode(
        &self,
        query: &str,
        limit: u32,
    ) -> Result<ForwardGeocodeResult, ApplicationError> {
        self.client
            .forward_geocode(query, limit)
            .await
            .map_err(map_error)
    }

    #[instrument(skip(self))]
    async fn reverse_geocode(
        &self,
        lat: f64,
        lon: f64,
        zoom: i32,
    ) -> Result<ReverseGeocodeResult, ApplicationError> {
        self.client
            .reverse_geocode(lat, lon, zoom)
            .await
            .map_err(map_error)
    }

    #[instrument(skip(self))]
    async fn poi_search(
        &self,
        query: &str,
        lat: f64,
        lon: f64,
        radius: u32,
        limit: u32,
    ) -> Result<PoiSearchResult, ApplicationError> {
        self.client
            .poi_search(query, lat, lon, radius, limit)
            .await
            .map_err(map_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adapter_creation_with_defaults() {
        assert!(OsmGeocodingAdapter::new(&OsmConfig::default()).is_ok());
    }

    #[test]
    fn adapter_creation_rejects_invalid_config() {
        let config = OsmConfig {
            timeout_secs: 0,
            ..OsmConfig::default()
        };
        let err = OsmGeocodingAdapter::new(&config).unwrap_err();
        assert!(matches!(err, ApplicationError::Configuration(_)));
    }

    #[test]
    fn parse_errors_stay_parse_errors() {
        let err = map_error(OsmError::ParseError("Invalid latitude: n/a".to_string()));
        assert!(matches!(err, ApplicationError::Parse(_)));
        assert!(err.to_string().contains("Invalid latitude"));
    }

    #[test]
    fn transport_errors_become_provider_errors() {
        let err = map_error(OsmError::Timeout { timeout_secs: 30 });
        assert_eq!(
            err,
            ApplicationError::Provider(
                "OpenStreetMap: Request timed out after 30 seconds".to_string()
            )
        );

        let err = map_error(OsmError::RequestFailed("HTTP 503 Service Unavailable".to_string()));
        assert!(matches!(err, ApplicationError::Provider(_)));
        assert!(err.to_string().starts_with("OpenStreetMap:"));
    }
}
