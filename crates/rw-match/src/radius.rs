//! Radius search around a point.
//!
//! A linear scan with no index: intended for interactive "what is near
//! here" lookups over one viewport's worth of features.

use rw_core::{LineFeature, LonLat};

use crate::representative::RepresentativePoint;

/// A feature found by [`features_within_radius`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RadiusHit {
    /// Position of the feature in the input slice.
    pub index:      usize,
    pub distance_m: f64,
}

/// Every feature whose representative point is within `radius_m`
/// (inclusive) of `center`, in input order.
///
/// Features without a representative point are skipped.  A non-finite
/// center yields no hits.
pub fn features_within_radius<P: RepresentativePoint + ?Sized>(
    center:   LonLat,
    radius_m: f64,
    features: &[LineFeature],
    strategy: &P,
) -> Vec<RadiusHit> {
    features
        .iter()
        .enumerate()
        .filter_map(|(index, f)| {
            let p = strategy.point(&f.coords)?;
            let distance_m = center.distance_m(p);
            (distance_m <= radius_m).then_some(RadiusHit { index, distance_m })
        })
        .collect()
}
