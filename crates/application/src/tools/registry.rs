//! Registry of the advertised tools

use super::definition::{ToolDefinition, ToolName};
use super::schema::definition_for;

/// The fixed set of tool definitions, built once
#[derive(Debug, Clone)]
pub struct ToolRegistry {
    definitions: Vec<ToolDefinition>,
}

impl ToolRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self {
            definitions: ToolName::ALL.into_iter().map(definition_for).collect(),
        }
    }

    /// All definitions, geocoding tools first
    #[must_use]
    pub fn definitions(&self) -> &[ToolDefinition] {
        &self.definitions
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ToolDefinition> {
        self.definitions.iter().find(|d| d.name() == name)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_has_six_tools_in_order() {
        let registry = ToolRegistry::new();
        let names: Vec<&str> = registry.definitions().iter().map(ToolDefinition::name).collect();
        assert_eq!(
            names,
            [
                "osm_forward_geocode",
                "osm_reverse_geocode",
                "osm_poi_search",
                "ors_route",
                "ors_isochrone",
                "ors_matrix",
            ]
        );
        assert_eq!(registry.len(), 6);
    }

    #[test]
    fn every_definition_is_described() {
        for definition in ToolRegistry::new().definitions() {
            assert!(!definition.name().is_empty());
            assert!(!definition.description().is_empty());
            assert_eq!(definition.parameters()["type"], "object");
            assert!(definition.parameters()["required"].is_array());
        }
    }

    #[test]
    fn lookup_by_name() {
        let registry = ToolRegistry::default();
        assert!(registry.contains("ors_matrix"));
        assert!(!registry.contains("ors_directions"));
        assert_eq!(
            registry.get("osm_poi_search").map(ToolDefinition::name),
            Some("osm_poi_search")
        );
    }
}
