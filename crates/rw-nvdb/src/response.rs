//! NVDB v3 response models and their conversion into line features.
//!
//! # Shapes
//!
//! ```text
//! veglenkesekvenser:  { objekter: [ { veglenkesekvensid,
//!                                     veglenker: [ { typeVeg, geometri: { wkt } } ] } ] }
//! vegobjekter/<id>:   { objekter: [ { geometri: { wkt },
//!                                     egenskaper: [ { navn, verdi } ] } ] }
//! ```
//!
//! Only the fields used below are modelled; everything else in the payload
//! is ignored.  Missing arrays decode as empty.
//!
//! # Attributes written
//!
//! | Layer   | Attributes                               |
//! |---------|------------------------------------------|
//! | Roadnet | `typeVeg` (default `"Ukjent"`), `veglenkesekvensid` if present |
//! | Width   | `widthValue`                             |
//! | Height  | `height`, `obstacleType`                 |
//! | Weight  | `className`                              |

use std::io::Read;

use log::{debug, trace};
use serde::Deserialize;

use rw_core::{AttrValue, LineFeature};

use crate::geometry::parse_line_string;
use crate::{LayerKind, NvdbError, NvdbResult};

// ── Shared pieces ─────────────────────────────────────────────────────────────

#[derive(Clone, Debug, Default, Deserialize)]
pub struct Geometri {
    #[serde(default)]
    pub wkt: Option<String>,
}

impl Geometri {
    fn coords(geometri: Option<&Geometri>) -> Option<Vec<rw_core::LonLat>> {
        geometri?.wkt.as_deref().and_then(parse_line_string)
    }
}

/// One object property.  `verdi` is kept as raw JSON because its type
/// varies by property (number, text, enum label, nested struct).
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Egenskap {
    #[serde(default)]
    pub navn:  Option<String>,
    #[serde(default)]
    pub verdi: serde_json::Value,
}

impl Egenskap {
    fn value(&self) -> AttrValue {
        json_to_attr(&self.verdi)
    }
}

fn json_to_attr(v: &serde_json::Value) -> AttrValue {
    use serde_json::Value;
    match v {
        Value::Null => AttrValue::Null,
        Value::Bool(b) => AttrValue::Bool(*b),
        Value::Number(n) => n.as_f64().map_or(AttrValue::Null, AttrValue::Number),
        Value::String(s) => AttrValue::Text(s.clone()),
        other => AttrValue::Text(other.to_string()),
    }
}

// ── Road network ──────────────────────────────────────────────────────────────

#[derive(Clone, Debug, Default, Deserialize)]
pub struct RoadnetResponse {
    #[serde(default)]
    pub objekter: Vec<RoadnetObject>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct RoadnetObject {
    #[serde(default)]
    pub veglenkesekvensid: Option<i64>,
    #[serde(default)]
    pub veglenker:         Vec<Veglenke>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct Veglenke {
    #[serde(rename = "typeVeg", default)]
    pub type_veg: Option<String>,
    #[serde(default)]
    pub geometri: Option<Geometri>,
}

impl RoadnetResponse {
    pub fn from_slice(bytes: &[u8]) -> NvdbResult<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }

    pub fn from_reader<R: Read>(reader: R) -> NvdbResult<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// One feature per road link.  Links without usable geometry are
    /// dropped.
    pub fn into_features(self) -> Vec<LineFeature> {
        let mut out = Vec::new();
        let mut dropped = 0usize;

        for obj in self.objekter {
            for link in obj.veglenker {
                let Some(coords) = Geometri::coords(link.geometri.as_ref()) else {
                    trace!("road link in sequence {:?} has no usable geometry", obj.veglenkesekvensid);
                    dropped += 1;
                    continue;
                };
                let mut feature = LineFeature::new(coords)
                    .with_attr("typeVeg", link.type_veg.unwrap_or_else(|| "Ukjent".into()));
                if let Some(id) = obj.veglenkesekvensid {
                    feature.set_attr("veglenkesekvensid", id);
                }
                out.push(feature);
            }
        }

        debug!("roadnet: {} links decoded, {} dropped", out.len(), dropped);
        out
    }
}

// ── Road objects (height / width / weight) ────────────────────────────────────

#[derive(Clone, Debug, Default, Deserialize)]
pub struct ObjectResponse {
    #[serde(default)]
    pub objekter: Vec<RoadObject>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct RoadObject {
    #[serde(default)]
    pub id:         Option<i64>,
    #[serde(default)]
    pub geometri:   Option<Geometri>,
    #[serde(default)]
    pub egenskaper: Vec<Egenskap>,
}

impl RoadObject {
    /// First property whose lower-cased name contains `needle`.
    fn property_containing(&self, needle: &str) -> AttrValue {
        self.egenskaper
            .iter()
            .find(|e| e.navn.as_deref().is_some_and(|n| n.to_lowercase().contains(needle)))
            .map_or(AttrValue::Null, Egenskap::value)
    }

    /// First property whose name is exactly `name`.
    fn property_named(&self, name: &str) -> AttrValue {
        self.egenskaper
            .iter()
            .find(|e| e.navn.as_deref() == Some(name))
            .map_or(AttrValue::Null, Egenskap::value)
    }
}

impl ObjectResponse {
    pub fn from_slice(bytes: &[u8]) -> NvdbResult<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }

    pub fn from_reader<R: Read>(reader: R) -> NvdbResult<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Convert to features carrying the attributes of `kind`.
    ///
    /// # Errors
    ///
    /// [`NvdbError::NotAnObjectLayer`] for [`LayerKind::Roadnet`], which
    /// has its own response shape.
    pub fn into_features(self, kind: LayerKind) -> NvdbResult<Vec<LineFeature>> {
        let annotate: fn(&RoadObject, LineFeature) -> LineFeature = match kind {
            LayerKind::Width => |o: &RoadObject, f: LineFeature| {
                f.with_attr("widthValue", o.property_containing("bredde"))
            },
            LayerKind::Height => |o: &RoadObject, f: LineFeature| {
                f.with_attr("height", o.property_containing("høyde"))
                    .with_attr("obstacleType", o.property_named("Type hinder"))
            },
            LayerKind::Weight => |o: &RoadObject, f: LineFeature| {
                f.with_attr("className", o.property_containing("bruksklasse"))
            },
            LayerKind::Roadnet => return Err(NvdbError::NotAnObjectLayer(kind)),
        };

        let mut out = Vec::with_capacity(self.objekter.len());
        let mut dropped = 0usize;

        for obj in &self.objekter {
            let Some(coords) = Geometri::coords(obj.geometri.as_ref()) else {
                trace!("{kind:?} object {:?} has no usable geometry", obj.id);
                dropped += 1;
                continue;
            };
            out.push(annotate(obj, LineFeature::new(coords)));
        }

        debug!("{kind:?}: {} objects decoded, {} dropped", out.len(), dropped);
        Ok(out)
    }
}
