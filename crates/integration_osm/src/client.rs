//! OpenStreetMap client
//!
//! Forward and reverse geocoding via [Nominatim](https://nominatim.openstreetmap.org)
//! and amenity search via the [Overpass API](https://overpass-api.de).

use std::time::Duration;

use async_trait::async_trait;
use domain::operations::{
    ForwardGeocodeResult, GeocodeHit, PoiSearchResult, ReverseAddress, ReverseGeocodeResult,
    TagMap,
};
use domain::value_objects::LatLon;
use reqwest::{Client, Response};
use serde::Deserialize;
use tracing::{debug, instrument, warn};

use crate::config::OsmConfig;
use crate::error::OsmError;
use crate::overpass::{OverpassResponse, build_poi_query};

/// Trait for geocoding and POI clients
#[async_trait]
pub trait GeoClient: Send + Sync {
    /// Convert an address or place name into candidate coordinates
    async fn forward_geocode(
        &self,
        query: &str,
        limit: u32,
    ) -> Result<ForwardGeocodeResult, OsmError>;

    /// Convert coordinates into an address
    ///
    /// `zoom` (0-18, higher = finer) is forwarded to the provider unchecked.
    async fn reverse_geocode(
        &self,
        lat: f64,
        lon: f64,
        zoom: i32,
    ) -> Result<ReverseGeocodeResult, OsmError>;

    /// Find amenities whose tag matches `query` within `radius` meters
    async fn poi_search(
        &self,
        query: &str,
        lat: f64,
        lon: f64,
        radius: u32,
        limit: u32,
    ) -> Result<PoiSearchResult, OsmError>;
}

/// Nominatim + Overpass client
#[derive(Debug)]
pub struct OsmGeoClient {
    client: Client,
    config: OsmConfig,
}

impl OsmGeoClient {
    /// Create a new OpenStreetMap client
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: &OsmConfig) -> Result<Self, OsmError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| OsmError::ConnectionFailed(e.to_string()))?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    fn transport_error(&self, e: &reqwest::Error) -> OsmError {
        if e.is_timeout() {
            OsmError::Timeout {
                timeout_secs: self.config.timeout_secs,
            }
        } else {
            OsmError::ConnectionFailed(e.to_string())
        }
    }

    /// Read a successful body, or turn the status into an error
    async fn read_body(&self, response: Response) -> Result<String, OsmError> {
        let status = response.status();
        if !status.is_success() {
            return Err(OsmError::RequestFailed(format!("HTTP {status}")));
        }

        response.text().await.map_err(|e| {
            if e.is_timeout() {
                self.transport_error(&e)
            } else {
                OsmError::ParseError(e.to_string())
            }
        })
    }

    /// Parse a Nominatim search response body
    fn parse_search_response(body: &str) -> Result<Vec<GeocodeHit>, OsmError> {
        let raw: Vec<RawPlace> =
            serde_json::from_str(body).map_err(|e| OsmError::ParseError(e.to_string()))?;

        raw.into_iter().map(RawPlace::into_hit).collect()
    }

    /// Parse a Nominatim reverse response body
    fn parse_reverse_response(body: &str) -> Result<ReverseAddress, OsmError> {
        let raw: RawReverse =
            serde_json::from_str(body).map_err(|e| OsmError::ParseError(e.to_string()))?;

        if let Some(error) = &raw.error {
            warn!(%error, "Nominatim could not resolve coordinates");
        }

        Ok(ReverseAddress {
            display_name: raw.display_name,
            address: raw.address,
            boundingbox: raw.boundingbox,
        })
    }
}

#[async_trait]
impl GeoClient for OsmGeoClient {
    #[instrument(skip(self))]
    async fn forward_geocode(
        &self,
        query: &str,
        limit: u32,
    ) -> Result<ForwardGeocodeResult, OsmError> {
        let url = format!("{}/search", self.config.nominatim_url);
        let params = [
            ("q", query.to_string()),
            ("format", "json".to_string()),
            ("limit", limit.to_string()),
            ("addressdetails", "1".to_string()),
        ];

        debug!(?url, "Forward geocoding");

        let response = self
            .client
            .get(&url)
            .query(&params)
            .send()
            .await
            .map_err(|e| self.transport_error(&e))?;

        let body = self.read_body(response).await?;
        let results = Self::parse_search_response(&body)?;

        debug!(count = results.len(), "Geocoding candidates found");
        Ok(ForwardGeocodeResult::new(query, results))
    }

    #[instrument(skip(self))]
    async fn reverse_geocode(
        &self,
        lat: f64,
        lon: f64,
        zoom: i32,
    ) -> Result<ReverseGeocodeResult, OsmError> {
        let url = format!("{}/reverse", self.config.nominatim_url);
        let params = [
            ("lat", lat.to_string()),
            ("lon", lon.to_string()),
            ("format", "json".to_string()),
            ("zoom", zoom.to_string()),
            ("addressdetails", "1".to_string()),
        ];

        debug!(?url, "Reverse geocoding");

        let response = self
            .client
            .get(&url)
            .query(&params)
            .send()
            .await
            .map_err(|e| self.transport_error(&e))?;

        let body = self.read_body(response).await?;
        let address = Self::parse_reverse_response(&body)?;

        Ok(ReverseGeocodeResult {
            coordinates: LatLon::new(lat, lon),
            address,
        })
    }

    #[instrument(skip(self))]
    async fn poi_search(
        &self,
        query: &str,
        lat: f64,
        lon: f64,
        radius: u32,
        limit: u32,
    ) -> Result<PoiSearchResult, OsmError> {
        let overpass_query = build_poi_query(query, lat, lon, radius, limit);

        debug!(url = %self.config.overpass_url, "Searching POIs");

        // Overpass expects the query form-encoded as `data=<query>`
        let response = self
            .client
            .post(&self.config.overpass_url)
            .form(&[("data", overpass_query.as_str())])
            .send()
            .await
            .map_err(|e| self.transport_error(&e))?;

        let body = self.read_body(response).await?;
        let raw: OverpassResponse =
            serde_json::from_str(&body).map_err(|e| OsmError::ParseError(e.to_string()))?;

        if let Some(remark) = &raw.remark {
            warn!(%remark, "Overpass returned a remark");
        }

        let mut results = Vec::with_capacity(raw.elements.len());
        for element in raw.elements {
            let (kind, id) = (element.kind.clone(), element.id);
            match element.into_hit() {
                Some(hit) => results.push(hit),
                None => debug!(%kind, id, "Skipping element without coordinates or centroid"),
            }
        }

        debug!(count = results.len(), "POIs found");
        Ok(PoiSearchResult::new(
            query,
            LatLon::new(lat, lon),
            radius,
            results,
        ))
    }
}

// --- Raw Nominatim response types ---

/// Nominatim sends coordinates as decimal strings; compatible servers may send numbers
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawDegrees {
    Number(f64),
    Text(String),
}

impl RawDegrees {
    fn parse(self, axis: &str) -> Result<f64, OsmError> {
        match self {
            Self::Number(value) => Ok(value),
            Self::Text(text) => text
                .trim()
                .parse()
                .map_err(|_| OsmError::ParseError(format!("Invalid {axis}: {text}"))),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawPlace {
    lat: RawDegrees,
    lon: RawDegrees,
    display_name: Option<String>,
    importance: Option<f64>,
    #[serde(default)]
    address: TagMap,
}

impl RawPlace {
    fn into_hit(self) -> Result<GeocodeHit, OsmError> {
        let lat = self.lat.parse("latitude")?;
        let lon = self.lon.parse("longitude")?;

        Ok(GeocodeHit {
            display_name: self.display_name,
            lat,
            lon,
            importance: self.importance,
            address: self.address,
        })
    }
}

#[derive(Debug, Deserialize)]
struct RawReverse {
    display_name: Option<String>,
    address: Option<TagMap>,
    boundingbox: Option<Vec<String>>,
    error: Option<String>,
}
