//! Representative-point strategies: reducing a line to one point for
//! indexing and querying.
//!
//! # Pluggability
//!
//! The matcher reduces every feature through the [`RepresentativePoint`]
//! trait, so callers can trade speed for accuracy on long or curved links
//! without touching the index.  The default [`MiddleVertex`] takes the
//! coordinate at the middle index of the sequence.  It is an approximation
//! of the centroid, not the centroid, and it is what existing match outcomes
//! are calibrated against.

use rw_core::LonLat;

/// Reduce a coordinate sequence to one point.
///
/// # Thread safety
///
/// Implementations must be `Send + Sync` so a matcher can be shared across
/// Rayon workers with the `parallel` feature.
pub trait RepresentativePoint: Send + Sync {
    /// `None` when the sequence has no usable point (empty, or a non-finite
    /// vertex where the strategy needs one).
    fn point(&self, coords: &[LonLat]) -> Option<LonLat>;
}

// ── MiddleVertex ──────────────────────────────────────────────────────────────

/// The vertex at index `floor(n / 2)`.
#[derive(Copy, Clone, Debug, Default)]
pub struct MiddleVertex;

impl RepresentativePoint for MiddleVertex {
    #[inline]
    fn point(&self, coords: &[LonLat]) -> Option<LonLat> {
        coords
            .get(coords.len() / 2)
            .copied()
            .filter(|p| p.is_finite())
    }
}

// ── AlongLineMidpoint ─────────────────────────────────────────────────────────

/// The point halfway along the line's haversine length.
///
/// Inside the segment containing the half-length mark the position is
/// interpolated linearly in degrees, which is accurate to well under a
/// metre for road-link segment lengths.  Any non-finite vertex disqualifies
/// the whole line.
#[derive(Copy, Clone, Debug, Default)]
pub struct AlongLineMidpoint;

impl RepresentativePoint for AlongLineMidpoint {
    fn point(&self, coords: &[LonLat]) -> Option<LonLat> {
        let first = *coords.first()?;
        if coords.iter().any(|p| !p.is_finite()) {
            return None;
        }

        let total: f64 = coords.windows(2).map(|w| w[0].distance_m(w[1])).sum();
        if total == 0.0 {
            return Some(first);
        }

        let half = total * 0.5;
        let mut walked = 0.0;
        for w in coords.windows(2) {
            let seg = w[0].distance_m(w[1]);
            if seg > 0.0 && walked + seg >= half {
                let t = (half - walked) / seg;
                return Some(LonLat::new(
                    w[0].lon + (w[1].lon - w[0].lon) * t,
                    w[0].lat + (w[1].lat - w[0].lat) * t,
                ));
            }
            walked += seg;
        }

        // Rounding left the mark past the last vertex.
        coords.last().copied()
    }
}
