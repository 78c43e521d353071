//! Vehicle-width clearance against matched road widths.
//!
//! Reads the numeric width a [`SpatialMatcher`](crate::SpatialMatcher) pass
//! wrote onto road features and sorts roads into passable, too narrow, or
//! unknown for a given vehicle.  Roads of unknown width are never hidden.

use rw_core::{LineFeature, normalize_str};

/// Clearance verdict for one road.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Passability {
    Passable,
    TooNarrow,
    /// Road width or vehicle width is unknown.
    Unknown,
}

/// `Passable` iff both widths are known and `road >= vehicle`.
pub fn classify(road_width_m: Option<f64>, vehicle_width_m: Option<f64>) -> Passability {
    match (road_width_m, vehicle_width_m) {
        (Some(road), Some(vehicle)) if road >= vehicle => Passability::Passable,
        (Some(_), Some(_)) => Passability::TooNarrow,
        _ => Passability::Unknown,
    }
}

/// Vehicle-width filter state.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VehicleFilter {
    pub vehicle_width_m: Option<f64>,
    pub hide_too_narrow: bool,
    /// Road attribute holding the matched width.
    pub value_key:       String,
}

impl Default for VehicleFilter {
    fn default() -> Self {
        Self {
            vehicle_width_m: None,
            hide_too_narrow: false,
            value_key:       "widthM".into(),
        }
    }
}

impl VehicleFilter {
    pub fn new(vehicle_width_m: Option<f64>) -> Self {
        Self {
            vehicle_width_m: vehicle_width_m.filter(|w| w.is_finite()),
            ..Self::default()
        }
    }

    /// Set the vehicle width from raw user text (`"2,55"`, `" 2.6 "`).
    /// Unparseable text clears the width.
    pub fn set_vehicle_width_text(&mut self, text: &str) {
        self.vehicle_width_m = normalize_str(text);
    }

    pub fn passability(&self, road: &LineFeature) -> Passability {
        classify(road.number_attr(&self.value_key), self.vehicle_width_m)
    }

    /// Too-narrow roads are hidden only when `hide_too_narrow` is set.
    pub fn is_visible(&self, road: &LineFeature) -> bool {
        !(self.hide_too_narrow && self.passability(road) == Passability::TooNarrow)
    }

    /// Indices of roads narrower than the vehicle.
    pub fn too_narrow(&self, roads: &[LineFeature]) -> Vec<usize> {
        self.indices_where(roads, |r| self.passability(r) == Passability::TooNarrow)
    }

    /// Indices of roads left visible by [`is_visible`](Self::is_visible).
    pub fn visible(&self, roads: &[LineFeature]) -> Vec<usize> {
        self.indices_where(roads, |r| self.is_visible(r))
    }

    fn indices_where(&self, roads: &[LineFeature], pred: impl Fn(&LineFeature) -> bool) -> Vec<usize> {
        roads
            .iter()
            .enumerate()
            .filter(|(_, r)| pred(r))
            .map(|(i, _)| i)
            .collect()
    }
}
