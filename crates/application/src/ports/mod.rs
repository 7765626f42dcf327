//! Port definitions for application layer
//!
//! Ports are interfaces that define how the tool dispatcher reaches the map
//! providers. Adapters in the infrastructure layer implement these ports.

mod geocoding_port;
mod routing_port;

#[cfg(test)]
pub use geocoding_port::MockGeocodingPort;
pub use geocoding_port::GeocodingPort;
#[cfg(test)]
pub use routing_port::MockRoutingPort;
pub use routing_port::{MatrixQuery, RoutingPort};
