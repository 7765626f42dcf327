//! Overpass QL query construction and element geometry resolution

use domain::operations::{PoiHit, TagMap};
use serde::Deserialize;

/// Server-side timeout embedded in every query, in seconds
const QUERY_TIMEOUT_SECS: u32 = 25;

/// Build the amenity radius query over nodes, ways and relations
///
/// `pattern` is matched case-insensitively as a regex against the `amenity`
/// tag. `out center` makes Overpass attach a centroid to ways and relations.
pub(crate) fn build_poi_query(pattern: &str, lat: f64, lon: f64, radius: u32, limit: u32) -> String {
    let pattern = escape_ql_string(pattern);
    let area = format!("(around:{radius},{lat},{lon})");
    format!(
        "[out:json][timeout:{QUERY_TIMEOUT_SECS}];\n\
         (\n  \
           node[\"amenity\"~\"{pattern}\",i]{area};\n  \
           way[\"amenity\"~\"{pattern}\",i]{area};\n  \
           relation[\"amenity\"~\"{pattern}\",i]{area};\n\
         );\n\
         out center {limit};"
    )
}

/// Escape a value for use inside a double-quoted Overpass QL string
fn escape_ql_string(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' | '\r' => escaped.push(' '),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Raw Overpass API response
#[derive(Debug, Deserialize)]
pub(crate) struct OverpassResponse {
    #[serde(default)]
    pub elements: Vec<RawElement>,
    /// Set by Overpass when the query hit a runtime error (e.g. timeout)
    pub remark: Option<String>,
}

/// A single element from Overpass (node, way or relation)
#[derive(Debug, Deserialize)]
pub(crate) struct RawElement {
    #[serde(rename = "type")]
    pub kind: String,
    pub id: u64,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub center: Option<RawCenter>,
    #[serde(default)]
    pub tags: TagMap,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawCenter {
    pub lat: f64,
    pub lon: f64,
}

/// How an element reports its position
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum ElementGeometry {
    /// Direct coordinates (nodes)
    Point { lat: f64, lon: f64 },
    /// Way or relation with a precomputed centroid
    AreaWithCentroid { lat: f64, lon: f64 },
    /// Way or relation without a centroid; cannot be placed
    AreaWithoutCentroid,
}

impl ElementGeometry {
    /// Resolve to a single `(lat, lon)`, if the element can be placed
    pub const fn position(self) -> Option<(f64, f64)> {
        match self {
            Self::Point { lat, lon } | Self::AreaWithCentroid { lat, lon } => Some((lat, lon)),
            Self::AreaWithoutCentroid => None,
        }
    }
}

impl RawElement {
    pub fn geometry(&self) -> ElementGeometry {
        match (self.lat, self.lon, &self.center) {
            (Some(lat), Some(lon), _) => ElementGeometry::Point { lat, lon },
            (_, _, Some(center)) => ElementGeometry::AreaWithCentroid {
                lat: center.lat,
                lon: center.lon,
            },
            _ => ElementGeometry::AreaWithoutCentroid,
        }
    }

    /// Convert into a normalized hit, or `None` when the element has no position
    pub fn into_hit(self) -> Option<PoiHit> {
        let (lat, lon) = self.geometry().position()?;
        let name = self
            .tags
            .get("name")
            .cloned()
            .unwrap_or_else(|| "Unnamed".to_string());
        let kind = self.tags.get("amenity").cloned();
        Some(PoiHit {
            name,
            kind,
            lat,
            lon,
            tags: self.tags,
        })
    }
}
