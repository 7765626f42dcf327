//! Infrastructure adapters
//!
//! Adapters connect application ports to the provider clients.

mod ors_routing_adapter;
mod osm_geocoding_adapter;

pub use ors_routing_adapter::OrsRoutingAdapter;
pub use osm_geocoding_adapter::OsmGeocodingAdapter;
