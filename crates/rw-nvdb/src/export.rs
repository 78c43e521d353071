//! GeoJSON output for the rendering side.
//!
//! Features become `LineString` features with `[lon, lat]` positions and
//! their attribute map as `properties`.  Attribute maps are ordered, so the
//! same input always serialises to the same bytes.

use serde_json::{Value, json};

use rw_core::LineFeature;

use crate::NvdbResult;

/// One GeoJSON `Feature`.
pub fn feature_to_geojson(feature: &LineFeature) -> NvdbResult<Value> {
    let coordinates: Vec<[f64; 2]> = feature.coords.iter().map(|p| [p.lon, p.lat]).collect();
    Ok(json!({
        "type": "Feature",
        "properties": serde_json::to_value(&feature.attributes)?,
        "geometry": {
            "type": "LineString",
            "coordinates": coordinates,
        },
    }))
}

/// A GeoJSON `FeatureCollection` of `features`, in order.
pub fn to_feature_collection(features: &[LineFeature]) -> NvdbResult<Value> {
    let features = features
        .iter()
        .map(feature_to_geojson)
        .collect::<NvdbResult<Vec<_>>>()?;
    Ok(json!({ "type": "FeatureCollection", "features": features }))
}
