//! Boundary records
//!
//! Turns a GeoJSON FeatureCollection into named country outlines.

use super::error::{BoundaryError, BoundaryResult};
use super::geometry::Geometry;
use crate::data::normalize_name;
use serde::Deserialize;
use serde_json::{Map, Value};

/// Property tried when the configured name property is absent
pub const FALLBACK_NAME_PROPERTY: &str = "ADMIN";

#[derive(Debug, Deserialize)]
struct GeoJsonFeatureCollection {
    #[serde(rename = "type")]
    ty: String,
    features: Vec<GeoJsonFeature>,
}

#[derive(Debug, Deserialize)]
struct GeoJsonFeature {
    #[serde(default)]
    properties: Option<Map<String, Value>>,
    #[serde(default)]
    geometry: Value,
}

/// One country outline from the reference dataset
#[derive(Debug, Clone, PartialEq)]
pub struct BoundaryRecord {
    /// Name as found in the dataset
    pub name: String,
    /// Normalized join key
    pub key: String,
    /// `None` when the feature has no usable polygon geometry
    pub geometry: Option<Geometry>,
}

impl BoundaryRecord {
    pub fn new(name: impl Into<String>, geometry: Option<Geometry>) -> Self {
        let name = name.into();
        let key = normalize_name(&name);
        Self {
            name,
            key,
            geometry,
        }
    }
}

/// Parse a FeatureCollection, reading each country name from
/// `name_property` (or [`FALLBACK_NAME_PROPERTY`]).
pub fn parse_feature_collection(
    text: &str,
    name_property: &str,
) -> BoundaryResult<Vec<BoundaryRecord>> {
    let collection: GeoJsonFeatureCollection = serde_json::from_str(text)?;

    if collection.ty != "FeatureCollection" {
        return Err(BoundaryError::Parse(format!(
            "expected a FeatureCollection, found '{}'",
            collection.ty
        )));
    }

    let mut records = Vec::with_capacity(collection.features.len());
    let mut without_geometry = 0;

    for feature in collection.features {
        let name = feature
            .properties
            .as_ref()
            .and_then(|props| {
                props
                    .get(name_property)
                    .or_else(|| props.get(FALLBACK_NAME_PROPERTY))
            })
            .and_then(Value::as_str)
            .unwrap_or_default();

        let geometry = Geometry::from_geojson(&feature.geometry);
        if geometry.is_none() {
            without_geometry += 1;
        }

        records.push(BoundaryRecord::new(name, geometry));
    }

    tracing::debug!(
        features = records.len(),
        without_geometry,
        "Parsed boundary collection"
    );

    Ok(records)
}
