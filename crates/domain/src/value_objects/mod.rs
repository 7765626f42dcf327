//! Value Objects - Immutable, identity-less domain primitives

mod coordinate;
mod routing;

pub use coordinate::{Coordinate, InvalidCoordinate, LatLon};
pub use routing::{MatrixMetric, RangeType, RouteFormat, RoutingProfile};
