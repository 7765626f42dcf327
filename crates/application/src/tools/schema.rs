//! JSON schemas of the tool argument objects

use domain::value_objects::{MatrixMetric, RangeType, RouteFormat, RoutingProfile};
use serde_json::{Value, json};

use super::definition::{ToolDefinition, ToolName};
use super::params::{
    DEFAULT_GEOCODE_LIMIT, DEFAULT_POI_LIMIT, DEFAULT_POI_RADIUS, DEFAULT_RANGE_VALUES,
    DEFAULT_REVERSE_ZOOM,
};

fn profile_enum(profiles: &[RoutingProfile]) -> Vec<&'static str> {
    profiles.iter().map(RoutingProfile::as_str).collect()
}

fn coordinate_pair(description: &str) -> Value {
    json!({
        "type": "array",
        "description": description,
        "items": {"type": "number"},
        "minItems": 2,
        "maxItems": 2
    })
}

fn coordinate_list(description: &str) -> Value {
    json!({
        "type": "array",
        "description": description,
        "items": {
            "type": "array",
            "items": {"type": "number"},
            "minItems": 2,
            "maxItems": 2
        },
        "minItems": 2
    })
}

fn profile_property(profiles: &[RoutingProfile]) -> Value {
    json!({
        "type": "string",
        "description": "Transportation mode",
        "enum": profile_enum(profiles),
        "default": RoutingProfile::default().as_str()
    })
}

fn index_list(description: &str) -> Value {
    json!({
        "type": "array",
        "description": description,
        "items": {"type": "integer", "minimum": 0}
    })
}

/// Build the definition advertised for `tool`
pub(crate) fn definition_for(tool: ToolName) -> ToolDefinition {
    let (description, parameters) = match tool {
        ToolName::ForwardGeocode => (
            "Convert an address or place name to geographic coordinates using OpenStreetMap",
            json!({
                "type": "object",
                "properties": {
                    "query": {
                        "type": "string",
                        "description": "Address or place name to geocode"
                    },
                    "limit": {
                        "type": "integer",
                        "description": format!("Maximum number of results (default: {DEFAULT_GEOCODE_LIMIT})"),
                        "default": DEFAULT_GEOCODE_LIMIT
                    }
                },
                "required": ["query"]
            }),
        ),
        ToolName::ReverseGeocode => (
            "Convert geographic coordinates to an address using OpenStreetMap",
            json!({
                "type": "object",
                "properties": {
                    "lat": {"type": "number", "description": "Latitude"},
                    "lon": {"type": "number", "description": "Longitude"},
                    "zoom": {
                        "type": "integer",
                        "description": format!("Level of detail (0-18, higher = more detailed, default: {DEFAULT_REVERSE_ZOOM})"),
                        "default": DEFAULT_REVERSE_ZOOM
                    }
                },
                "required": ["lat", "lon"]
            }),
        ),
        ToolName::PoiSearch => (
            "Search for points of interest (POIs) near a location using the OpenStreetMap Overpass API",
            json!({
                "type": "object",
                "properties": {
                    "query": {
                        "type": "string",
                        "description": "Type of POI (e.g., 'restaurant', 'hospital', 'cafe', 'school')"
                    },
                    "lat": {"type": "number", "description": "Center latitude"},
                    "lon": {"type": "number", "description": "Center longitude"},
                    "radius": {
                        "type": "integer",
                        "description": format!("Search radius in meters (default: {DEFAULT_POI_RADIUS})"),
                        "default": DEFAULT_POI_RADIUS
                    },
                    "limit": {
                        "type": "integer",
                        "description": format!("Maximum number of results (default: {DEFAULT_POI_LIMIT})"),
                        "default": DEFAULT_POI_LIMIT
                    }
                },
                "required": ["query", "lat", "lon"]
            }),
        ),
        ToolName::Route => (
            "Calculate the optimal route between two or more points using OpenRouteService",
            json!({
                "type": "object",
                "properties": {
                    "coordinates": coordinate_list("List of [longitude, latitude] pairs (at least 2 points)"),
                    "profile": profile_property(&RoutingProfile::ALL),
                    "format": {
                        "type": "string",
                        "description": "Geometry encoding: encoded polyline (json) or GeoJSON",
                        "enum": [RouteFormat::Json.as_str(), RouteFormat::Geojson.as_str()],
                        "default": RouteFormat::default().as_str()
                    },
                    "instructions": {
                        "type": "boolean",
                        "description": "Include turn-by-turn instructions",
                        "default": true
                    }
                },
                "required": ["coordinates"]
            }),
        ),
        ToolName::Isochrone => (
            "Calculate areas reachable within time or distance ranges using OpenRouteService",
            json!({
                "type": "object",
                "properties": {
                    "location": coordinate_pair("Starting point [longitude, latitude]"),
                    "profile": profile_property(&RoutingProfile::ISOCHRONE),
                    "range_values": {
                        "type": "array",
                        "description": "List of time (seconds) or distance (meters) values",
                        "items": {"type": "integer", "minimum": 1},
                        "minItems": 1,
                        "default": DEFAULT_RANGE_VALUES
                    },
                    "range_type": {
                        "type": "string",
                        "description": "Type of range calculation",
                        "enum": [RangeType::Time.as_str(), RangeType::Distance.as_str()],
                        "default": RangeType::default().as_str()
                    }
                },
                "required": ["location"]
            }),
        ),
        ToolName::Matrix => {
            let metrics: Vec<&str> = MatrixMetric::all().iter().map(MatrixMetric::as_str).collect();
            (
                "Calculate distance and duration matrices between multiple points using OpenRouteService",
                json!({
                    "type": "object",
                    "properties": {
                        "locations": coordinate_list("List of [longitude, latitude] pairs (at least 2 points)"),
                        "profile": profile_property(&RoutingProfile::MATRIX),
                        "metrics": {
                            "type": "array",
                            "description": "Metrics to calculate",
                            "items": {"type": "string", "enum": metrics.clone()},
                            "minItems": 1,
                            "default": metrics
                        },
                        "sources": index_list("Indices into locations used as origins (default: all)"),
                        "destinations": index_list("Indices into locations used as targets (default: all)")
                    },
                    "required": ["locations"]
                }),
            )
        },
    };

    ToolDefinition::new(tool.as_str(), description, parameters)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_schema_is_an_object_with_required_list() {
        for tool in ToolName::ALL {
            let definition = definition_for(tool);
            let params = definition.parameters();
            assert_eq!(params["type"], "object", "{tool}");
            assert!(params["properties"].is_object(), "{tool}");
            let required = params["required"].as_array().unwrap();
            assert!(!required.is_empty(), "{tool}");
            for key in required {
                assert!(
                    params["properties"].get(key.as_str().unwrap()).is_some(),
                    "{tool}: required key {key} missing from properties"
                );
            }
        }
    }

    #[test]
    fn profile_enums_follow_per_tool_subsets() {
        let route = definition_for(ToolName::Route);
        assert_eq!(
            route.parameters()["properties"]["profile"]["enum"].as_array().map(Vec::len),
            Some(9)
        );

        let isochrone = definition_for(ToolName::Isochrone);
        let profiles = &isochrone.parameters()["properties"]["profile"]["enum"];
        assert_eq!(profiles.as_array().map(Vec::len), Some(5));
        assert!(profiles.as_array().unwrap().contains(&json!("wheelchair")));

        let matrix = definition_for(ToolName::Matrix);
        let profiles = &matrix.parameters()["properties"]["profile"]["enum"];
        assert_eq!(profiles.as_array().map(Vec::len), Some(4));
        assert!(!profiles.as_array().unwrap().contains(&json!("wheelchair")));
    }

    #[test]
    fn defaults_are_advertised() {
        let isochrone = definition_for(ToolName::Isochrone);
        assert_eq!(
            isochrone.parameters()["properties"]["range_values"]["default"],
            json!([300, 600, 900])
        );

        let reverse = definition_for(ToolName::ReverseGeocode);
        assert_eq!(reverse.parameters()["properties"]["zoom"]["default"], 18);
    }
}
