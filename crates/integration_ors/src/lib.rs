//! OpenRouteService integration for the map assistant
//!
//! Provides directions, isochrones and distance/duration matrices via
//! [OpenRouteService](https://openrouteservice.org).
//!
//! # Architecture
//!
//! [`RouteClient`] defines the routing interface; [`OrsRouteClient`]
//! implements it against the ORS v2 REST API. Inputs that the provider would
//! reject (too few points, empty ranges, out-of-range matrix indices) are
//! refused locally with [`OrsError::InvalidInput`] before any request is sent.
//!
//! # Example
//!
//! ```rust,ignore
//! use domain::value_objects::{Coordinate, RouteFormat, RoutingProfile};
//! use integration_ors::{OrsConfig, OrsRouteClient, RouteClient};
//!
//! let client = OrsRouteClient::new(&OrsConfig::default())?;
//! let points = [Coordinate::new(2.3522, 48.8566)?, Coordinate::new(2.2945, 48.8584)?];
//! let result = client
//!     .route(&points, RoutingProfile::FootWalking, RouteFormat::Json, true)
//!     .await?;
//! ```

mod client;
mod config;
mod error;
mod models;

pub use client::{OrsRouteClient, RouteClient};
pub use config::OrsConfig;
pub use error::OrsError;
pub use models::MatrixRequest;
