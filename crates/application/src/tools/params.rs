//! Typed tool arguments
//!
//! Each tool's loosely-typed JSON argument bag is deserialized into one of
//! these structs (defaults applied, unknown keys rejected) and then checked
//! with its `#[derive(Validate)]` rules before any port is called.

use std::borrow::Cow;

use domain::value_objects::{Coordinate, MatrixMetric, RangeType, RouteFormat, RoutingProfile};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use validator::{Validate, ValidationError, ValidationErrors};

use super::definition::ToolName;
use crate::error::ApplicationError;
use crate::ports::MatrixQuery;

pub const DEFAULT_GEOCODE_LIMIT: u32 = 5;
pub const DEFAULT_REVERSE_ZOOM: i32 = 18;
pub const DEFAULT_POI_RADIUS: u32 = 1000;
pub const DEFAULT_POI_LIMIT: u32 = 20;
pub const DEFAULT_RANGE_VALUES: [u32; 3] = [300, 600, 900];

/// Error code of the minimum point count rule; its message is reported verbatim
const TOO_FEW_POINTS: &str = "too_few_points";

/// Arguments of one tool
pub trait ToolParams: DeserializeOwned + Validate {
    /// The tool these arguments belong to
    const TOOL: ToolName;

    /// Deserialize and validate an argument bag (`null` is treated as `{}`)
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::Validation`] if the bag has the wrong
    /// shape or violates a constraint.
    fn from_arguments(arguments: Value) -> Result<Self, ApplicationError> {
        let arguments = if arguments.is_null() {
            Value::Object(Map::new())
        } else {
            arguments
        };

        let params: Self =
            serde_json::from_value(arguments).map_err(|e| invalid(Self::TOOL, e))?;
        params
            .validate()
            .map_err(|e| validation_failure(Self::TOOL, &e))?;
        Ok(params)
    }
}

fn invalid(tool: ToolName, message: impl std::fmt::Display) -> ApplicationError {
    ApplicationError::Validation(format!("Invalid arguments for {tool}: {message}"))
}

/// Flatten `ValidationErrors` into one message, fields in name order
///
/// Struct-level (`__all__`) messages carry no field prefix.
fn validation_failure(tool: ToolName, errors: &ValidationErrors) -> ApplicationError {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|(a, _), (b, _)| a.cmp(b));

    if let Some(message) = fields
        .iter()
        .flat_map(|(_, errors)| errors.iter())
        .find(|error| error.code == TOO_FEW_POINTS)
        .and_then(|error| error.message.as_ref())
    {
        return ApplicationError::Validation(message.to_string());
    }

    let messages: Vec<String> = fields
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| {
                let message = error
                    .message
                    .as_ref()
                    .map_or_else(|| error.code.to_string(), ToString::to_string);
                if *field == "__all__" {
                    message
                } else {
                    format!("{field}: {message}")
                }
            })
        })
        .collect();

    invalid(tool, messages.join("; "))
}

const fn default_geocode_limit() -> u32 {
    DEFAULT_GEOCODE_LIMIT
}

const fn default_reverse_zoom() -> i32 {
    DEFAULT_REVERSE_ZOOM
}

const fn default_poi_radius() -> u32 {
    DEFAULT_POI_RADIUS
}

const fn default_poi_limit() -> u32 {
    DEFAULT_POI_LIMIT
}

const fn default_true() -> bool {
    true
}

fn default_range_values() -> Vec<u32> {
    DEFAULT_RANGE_VALUES.to_vec()
}

/// Whitespace-only text; the empty string is left to `length(min = 1)`
fn not_blank(value: &str) -> Result<(), ValidationError> {
    if !value.is_empty() && value.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message(Cow::Borrowed("must not be blank")));
    }
    Ok(())
}

fn profile_in(profile: RoutingProfile, supported: &[RoutingProfile]) -> Result<(), ValidationError> {
    if supported.contains(&profile) {
        return Ok(());
    }

    let expected: Vec<&str> = supported.iter().map(RoutingProfile::as_str).collect();
    Err(ValidationError::new("unsupported_profile").with_message(Cow::Owned(format!(
        "'{profile}' is not supported, expected one of: {}",
        expected.join(", ")
    ))))
}

fn isochrone_profile(profile: &RoutingProfile) -> Result<(), ValidationError> {
    profile_in(*profile, &RoutingProfile::ISOCHRONE)
}

fn matrix_profile(profile: &RoutingProfile) -> Result<(), ValidationError> {
    profile_in(*profile, &RoutingProfile::MATRIX)
}

fn positive_ranges(values: &[u32]) -> Result<(), ValidationError> {
    if values.contains(&0) {
        return Err(
            ValidationError::new("range").with_message(Cow::Borrowed("must be positive"))
        );
    }
    Ok(())
}

/// `sources` and `destinations` must index into `locations`
fn matrix_indices(params: &MatrixParams) -> Result<(), ValidationError> {
    let count = params.locations.len();
    for (field, indices) in [("sources", &params.sources), ("destinations", &params.destinations)] {
        let Some(indices) = indices else { continue };
        if let Some(bad) = indices.iter().find(|&&i| i >= count) {
            return Err(ValidationError::new("index_out_of_range").with_message(Cow::Owned(
                format!("{field} index {bad} out of range for {count} locations"),
            )));
        }
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct ForwardGeocodeParams {
    #[validate(length(min = 1, message = "must not be empty"), custom(function = "not_blank"))]
    pub query: String,
    #[validate(range(min = 1, message = "must be greater than 0"))]
    #[serde(default = "default_geocode_limit")]
    pub limit: u32,
}

impl ToolParams for ForwardGeocodeParams {
    const TOOL: ToolName = ToolName::ForwardGeocode;
}

#[derive(Debug, Clone, PartialEq, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct ReverseGeocodeParams {
    #[validate(range(min = -90.0, max = 90.0, message = "must be between -90 and 90"))]
    pub lat: f64,
    #[validate(range(min = -180.0, max = 180.0, message = "must be between -180 and 180"))]
    pub lon: f64,
    /// Passed through to the provider without a range check
    #[serde(default = "default_reverse_zoom")]
    pub zoom: i32,
}

impl ToolParams for ReverseGeocodeParams {
    const TOOL: ToolName = ToolName::ReverseGeocode;
}

#[derive(Debug, Clone, PartialEq, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct PoiSearchParams {
    #[validate(length(min = 1, message = "must not be empty"), custom(function = "not_blank"))]
    pub query: String,
    #[validate(range(min = -90.0, max = 90.0, message = "must be between -90 and 90"))]
    pub lat: f64,
    #[validate(range(min = -180.0, max = 180.0, message = "must be between -180 and 180"))]
    pub lon: f64,
    /// Meters
    #[validate(range(min = 1, message = "must be greater than 0"))]
    #[serde(default = "default_poi_radius")]
    pub radius: u32,
    #[validate(range(min = 1, message = "must be greater than 0"))]
    #[serde(default = "default_poi_limit")]
    pub limit: u32,
}

impl ToolParams for PoiSearchParams {
    const TOOL: ToolName = ToolName::PoiSearch;
}

/// Every profile is routable, so only the point count is checked
#[derive(Debug, Clone, PartialEq, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct RouteParams {
    #[validate(length(min = 2, code = "too_few_points", message = "at least 2 coordinates required"))]
    pub coordinates: Vec<Coordinate>,
    #[serde(default)]
    pub profile: RoutingProfile,
    #[serde(default)]
    pub format: RouteFormat,
    #[serde(default = "default_true")]
    pub instructions: bool,
}

impl ToolParams for RouteParams {
    const TOOL: ToolName = ToolName::Route;
}

#[derive(Debug, Clone, PartialEq, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct IsochroneParams {
    pub location: Coordinate,
    #[validate(custom(function = "isochrone_profile"))]
    #[serde(default)]
    pub profile: RoutingProfile,
    /// Seconds for `time`, meters for `distance`
    #[validate(length(min = 1, message = "must not be empty"), custom(function = "positive_ranges"))]
    #[serde(default = "default_range_values")]
    pub range_values: Vec<u32>,
    #[serde(default)]
    pub range_type: RangeType,
}

impl ToolParams for IsochroneParams {
    const TOOL: ToolName = ToolName::Isochrone;
}

#[derive(Debug, Clone, PartialEq, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
#[validate(schema(function = "matrix_indices"))]
pub struct MatrixParams {
    #[validate(length(min = 2, code = "too_few_points", message = "at least 2 locations required"))]
    pub locations: Vec<Coordinate>,
    #[validate(custom(function = "matrix_profile"))]
    #[serde(default)]
    pub profile: RoutingProfile,
    #[validate(length(min = 1, message = "must not be empty"))]
    #[serde(default = "MatrixMetric::all")]
    pub metrics: Vec<MatrixMetric>,
    #[serde(default)]
    pub sources: Option<Vec<usize>>,
    #[serde(default)]
    pub destinations: Option<Vec<usize>>,
}

impl ToolParams for MatrixParams {
    const TOOL: ToolName = ToolName::Matrix;
}

impl From<MatrixParams> for MatrixQuery {
    fn from(params: MatrixParams) -> Self {
        Self {
            profile: params.profile,
            locations: params.locations,
            metrics: params.metrics,
            sources: params.sources,
            destinations: params.destinations,
        }
    }
}
