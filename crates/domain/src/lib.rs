//! Domain layer for the map assistant
//!
//! Contains the geographic value objects and the normalized result types
//! shared by every tool. This layer performs no I/O.

pub mod operations;
pub mod value_objects;

pub use operations::*;
pub use value_objects::*;
