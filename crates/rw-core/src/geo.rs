//! Geographic coordinate type, bounding box, and great-circle distance.
//!
//! `LonLat` stores WGS-84 degrees as `f64`, longitude first, which is the
//! GeoJSON axis order used everywhere in this workspace.  Upstream sources
//! that write `LAT LON` (NVDB WKT) swap axes at the decoding boundary.

use std::fmt;

use crate::{CoreError, CoreResult};

/// Mean Earth radius in metres used by [`haversine_m`].
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

// ── LonLat ────────────────────────────────────────────────────────────────────

/// A WGS-84 geographic coordinate in degrees.  No altitude.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LonLat {
    pub lon: f64,
    pub lat: f64,
}

impl LonLat {
    #[inline]
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.lon.is_finite() && self.lat.is_finite()
    }

    /// Haversine great-circle distance in metres.  See [`haversine_m`].
    #[inline]
    pub fn distance_m(self, other: LonLat) -> f64 {
        haversine_m(self, other)
    }
}

impl From<[f64; 2]> for LonLat {
    /// `[lon, lat]`, the GeoJSON position layout.
    fn from([lon, lat]: [f64; 2]) -> Self {
        Self { lon, lat }
    }
}

/// Haversine great-circle distance between two points, in metres, on a
/// sphere of radius [`EARTH_RADIUS_M`].
///
/// Returns `f64::INFINITY` if any coordinate is non-finite, so a bad point
/// always fails a distance cutoff instead of producing `NaN`.
pub fn haversine_m(a: LonLat, b: LonLat) -> f64 {
    if !a.is_finite() || !b.is_finite() {
        return f64::INFINITY;
    }

    let d_lat = (b.lat - a.lat).to_radians();
    let d_lon = (b.lon - a.lon).to_radians();

    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();

    let h = (d_lat * 0.5).sin().powi(2)
        + lat1.cos() * lat2.cos() * (d_lon * 0.5).sin().powi(2);

    2.0 * EARTH_RADIUS_M * h.sqrt().min(1.0).asin()
}

// ── BBox ──────────────────────────────────────────────────────────────────────

/// Axis-aligned viewport extent in degrees.
///
/// `Display` renders `west,south,east,north` with four decimals, the form
/// NVDB expects in its `kartutsnitt` query parameter.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BBox {
    pub west:  f64,
    pub south: f64,
    pub east:  f64,
    pub north: f64,
}

impl BBox {
    /// Validate and construct a bounding box.
    ///
    /// # Errors
    ///
    /// [`CoreError::InvalidBBox`] if any edge is non-finite or the box is
    /// inverted on either axis.
    pub fn new(west: f64, south: f64, east: f64, north: f64) -> CoreResult<Self> {
        let edges = [west, south, east, north];
        if edges.iter().any(|v| !v.is_finite()) {
            return Err(CoreError::InvalidBBox(format!(
                "non-finite edge in {west},{south},{east},{north}"
            )));
        }
        if west > east || south > north {
            return Err(CoreError::InvalidBBox(format!(
                "inverted extent {west},{south},{east},{north}"
            )));
        }
        Ok(Self { west, south, east, north })
    }

    /// Inclusive containment test.
    #[inline]
    pub fn contains(&self, p: LonLat) -> bool {
        p.lon >= self.west && p.lon <= self.east && p.lat >= self.south && p.lat <= self.north
    }
}

impl fmt::Display for BBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.4},{:.4},{:.4},{:.4}",
            self.west, self.south, self.east, self.north
        )
    }
}
