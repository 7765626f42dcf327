//! OpenStreetMap integration for the map assistant
//!
//! Provides address geocoding via [Nominatim](https://nominatim.openstreetmap.org)
//! and point-of-interest search via the [Overpass API](https://overpass-api.de).
//!
//! # Architecture
//!
//! [`GeoClient`] defines the interface for forward geocoding, reverse
//! geocoding and POI search; [`OsmGeoClient`] implements it. Provider
//! responses are normalized into the result types from `domain::operations`.
//!
//! # Example
//!
//! ```rust,ignore
//! use integration_osm::{GeoClient, OsmConfig, OsmGeoClient};
//!
//! let client = OsmGeoClient::new(&OsmConfig::default())?;
//! let result = client.forward_geocode("Eiffel Tower, Paris", 1).await?;
//! println!("{} candidates", result.count);
//! ```

mod client;
mod config;
mod error;
mod overpass;

pub use client::{GeoClient, OsmGeoClient};
pub use config::OsmConfig;
pub use error::OsmError;
