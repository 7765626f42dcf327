//! Application layer - Tool dispatch and orchestration
//!
//! Contains the tool registry, typed tool arguments, the dispatcher and the
//! port definitions it calls. Infrastructure adapters implement the ports.

pub mod error;
pub mod ports;
pub mod tools;

pub use error::ApplicationError;
pub use ports::*;
pub use tools::*;
