//! Line features and their open attribute mapping.

use std::collections::BTreeMap;
use std::fmt;

use crate::LonLat;
use crate::number::normalize_number;

// ── AttrValue ─────────────────────────────────────────────────────────────────

/// A single attribute value as it arrives from GeoJSON or NVDB properties.
///
/// With the `serde` feature the enum is untagged, so it reads and writes as
/// a bare JSON `null`, boolean, number, or string.
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum AttrValue {
    #[default]
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
}

impl AttrValue {
    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, AttrValue::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttrValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl From<f64> for AttrValue {
    fn from(v: f64) -> Self {
        AttrValue::Number(v)
    }
}

impl From<i64> for AttrValue {
    fn from(v: i64) -> Self {
        AttrValue::Number(v as f64)
    }
}

impl From<bool> for AttrValue {
    fn from(v: bool) -> Self {
        AttrValue::Bool(v)
    }
}

impl From<&str> for AttrValue {
    fn from(v: &str) -> Self {
        AttrValue::Text(v.to_owned())
    }
}

impl From<String> for AttrValue {
    fn from(v: String) -> Self {
        AttrValue::Text(v)
    }
}

impl<T: Into<AttrValue>> From<Option<T>> for AttrValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(AttrValue::Null, Into::into)
    }
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttrValue::Null => f.write_str("null"),
            AttrValue::Bool(b) => write!(f, "{b}"),
            AttrValue::Number(n) => write!(f, "{n}"),
            AttrValue::Text(s) => f.write_str(s),
        }
    }
}

/// Attribute mapping.  Ordered so that serialised output is stable across
/// runs.
pub type Attributes = BTreeMap<String, AttrValue>;

// ── LineFeature ───────────────────────────────────────────────────────────────

/// An ordered coordinate sequence plus attributes: one road link or one
/// measurement stretch.
///
/// An empty `coords` is allowed and marks a degenerate feature; consumers
/// treat it as having no representative point rather than as an error.
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LineFeature {
    pub coords:     Vec<LonLat>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub attributes: Attributes,
}

impl LineFeature {
    pub fn new(coords: Vec<LonLat>) -> Self {
        Self { coords, attributes: Attributes::new() }
    }

    /// Builder-style attribute insertion.
    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn attr(&self, key: &str) -> Option<&AttrValue> {
        self.attributes.get(key)
    }

    pub fn set_attr(&mut self, key: impl Into<String>, value: impl Into<AttrValue>) {
        self.attributes.insert(key.into(), value.into());
    }

    pub fn has_attr(&self, key: &str) -> bool {
        self.attributes.contains_key(key)
    }

    /// Attribute `key` normalised to a finite number, if possible.
    pub fn number_attr(&self, key: &str) -> Option<f64> {
        self.attr(key).and_then(normalize_number)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.coords.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }
}
