//! Tool names and definitions

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// Which port serves a tool, selected by the tool name prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolFamily {
    /// `osm_*` tools, served by the geocoding port
    Geocoding,
    /// `ors_*` tools, served by the routing port
    Routing,
}

impl ToolFamily {
    #[must_use]
    pub const fn prefix(&self) -> &'static str {
        match self {
            Self::Geocoding => "osm_",
            Self::Routing => "ors_",
        }
    }

    fn from_prefix(prefix: &str) -> Option<Self> {
        match prefix {
            "osm" => Some(Self::Geocoding),
            "ors" => Some(Self::Routing),
            _ => None,
        }
    }
}

/// Every tool the dispatcher knows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolName {
    ForwardGeocode,
    ReverseGeocode,
    PoiSearch,
    Route,
    Isochrone,
    Matrix,
}

impl ToolName {
    /// Registry order: geocoding tools first, then routing tools
    pub const ALL: [Self; 6] = [
        Self::ForwardGeocode,
        Self::ReverseGeocode,
        Self::PoiSearch,
        Self::Route,
        Self::Isochrone,
        Self::Matrix,
    ];

    /// Full tool name as exposed to callers
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ForwardGeocode => "osm_forward_geocode",
            Self::ReverseGeocode => "osm_reverse_geocode",
            Self::PoiSearch => "osm_poi_search",
            Self::Route => "ors_route",
            Self::Isochrone => "ors_isochrone",
            Self::Matrix => "ors_matrix",
        }
    }

    /// Logical operation name (the tool name without its prefix)
    #[must_use]
    pub const fn operation(&self) -> &'static str {
        match self {
            Self::ForwardGeocode => "forward_geocode",
            Self::ReverseGeocode => "reverse_geocode",
            Self::PoiSearch => "poi_search",
            Self::Route => "route",
            Self::Isochrone => "isochrone",
            Self::Matrix => "matrix",
        }
    }

    #[must_use]
    pub const fn family(&self) -> ToolFamily {
        match self {
            Self::ForwardGeocode | Self::ReverseGeocode | Self::PoiSearch => ToolFamily::Geocoding,
            Self::Route | Self::Isochrone | Self::Matrix => ToolFamily::Routing,
        }
    }

    /// Resolve a tool name: the prefix picks the family, the suffix the operation
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        let (prefix, operation) = name.split_once('_')?;
        let family = ToolFamily::from_prefix(prefix)?;

        Self::ALL
            .into_iter()
            .find(|tool| tool.family() == family && tool.operation() == operation)
    }
}

impl fmt::Display for ToolName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A tool as advertised to the model: name, description and JSON schema
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDefinition {
    name: String,
    description: String,
    parameters: Value,
}

impl ToolDefinition {
    #[must_use]
    pub fn new(name: impl Into<String>, description: impl Into<String>, parameters: Value) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// JSON schema of the argument object
    #[must_use]
    pub const fn parameters(&self) -> &Value {
        &self.parameters
    }

    /// Render in the OpenAI function-calling format
    #[must_use]
    pub fn to_function_json(&self) -> Value {
        json!({
            "type": "function",
            "function": {
                "name": self.name,
                "description": self.description,
                "parameters": self.parameters,
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_round_trips_every_tool() {
        for tool in ToolName::ALL {
            assert_eq!(ToolName::parse(tool.as_str()), Some(tool));
            assert!(tool.as_str().starts_with(tool.family().prefix()));
            assert!(tool.as_str().ends_with(tool.operation()));
        }
    }

    #[test]
    fn parse_rejects_unknown_names() {
        assert_eq!(ToolName::parse("unknown_tool_xyz"), None);
        assert_eq!(ToolName::parse("osm_route"), None);
        assert_eq!(ToolName::parse("ors_forward_geocode"), None);
        assert_eq!(ToolName::parse("route"), None);
        assert_eq!(ToolName::parse(""), None);
    }

    #[test]
    fn function_json_wraps_definition() {
        let definition = ToolDefinition::new(
            "osm_forward_geocode",
            "Geocode",
            json!({"type": "object", "properties": {}, "required": []}),
        );
        let json = definition.to_function_json();
        assert_eq!(json["type"], "function");
        assert_eq!(json["function"]["name"], "osm_forward_geocode");
        assert_eq!(json["function"]["parameters"]["type"], "object");
    }
}
