//! Tool layer: definitions, typed arguments and dispatch

mod definition;
mod dispatcher;
mod params;
mod registry;
mod schema;

pub use definition::{ToolDefinition, ToolFamily, ToolName};
pub use dispatcher::{DEFAULT_MAX_IN_FLIGHT, ErrorEnvelope, ToolCall, ToolDispatcher, ToolOutcome};
pub use params::{
    ForwardGeocodeParams, IsochroneParams, MatrixParams, PoiSearchParams, ReverseGeocodeParams,
    RouteParams, ToolParams,
};
pub use registry::ToolRegistry;
