//! Nearest-feature attribute join.
//!
//! [`SpatialMatcher::attach_nearest_attribute`] copies a numeric attribute
//! from a *reference* collection (e.g. NVDB road-width stretches) onto each
//! feature of a *target* collection (road links) whose representative point
//! lies within `max_match_meters` of a reference point.
//!
//! # Pass structure
//!
//! ```text
//! ① reference → (representative point, normalised value) → GridIndex
//! ② target    → representative point → 3×3 bounded nearest query
//! ③ apply     → value_key = v, text_key = "<v> m"   (matches only)
//! ```
//!
//! The grid lives for one call only.  Targets are mutated in place; order
//! and identity are preserved, and targets without a match are left exactly
//! as they were.  With the `parallel` feature, phase ② runs on Rayon and
//! phase ③ stays sequential, so output does not depend on thread count.

use log::{debug, trace};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use rw_core::{AttrValue, LineFeature, format_fixed};

use crate::grid::{GridIndex, IndexedPoint};
use crate::representative::{MiddleVertex, RepresentativePoint};
use crate::{MatchError, MatchResult};

// ── MatchOptions ──────────────────────────────────────────────────────────────

/// Tunables for one matcher.
///
/// | Field               | Default        |
/// |---------------------|----------------|
/// | `cell_size_degrees` | `0.01`         |
/// | `max_match_meters`  | `75.0`         |
/// | `source_key`        | `"widthValue"` |
/// | `value_key`         | `"widthM"`     |
/// | `text_key`          | `"widthText"`  |
/// | `text_decimals`     | `1`            |
///
/// The 3×3 neighbour scan only sees candidates up to one cell edge away, so
/// `max_match_meters` should not exceed the cell edge in metres at the
/// working latitude (0.01° of longitude is ~560 m at 60° N).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MatchOptions {
    /// Grid cell edge in degrees, both axes.
    pub cell_size_degrees: f64,
    /// Hard distance cutoff in metres.
    pub max_match_meters:  f64,
    /// Reference attribute holding the measurement.
    pub source_key:        String,
    /// Target attribute receiving the numeric value.
    pub value_key:         String,
    /// Target attribute receiving the display string.
    pub text_key:          String,
    /// Decimals in the display string.
    pub text_decimals:     usize,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            cell_size_degrees: 0.01,
            max_match_meters:  75.0,
            source_key:        "widthValue".into(),
            value_key:         "widthM".into(),
            text_key:          "widthText".into(),
            text_decimals:     1,
        }
    }
}

impl MatchOptions {
    /// Reject values the index cannot work with.
    pub fn validate(&self) -> MatchResult<()> {
        if !(self.cell_size_degrees.is_finite() && self.cell_size_degrees > 0.0) {
            return Err(MatchError::InvalidCellSize(self.cell_size_degrees));
        }
        if !(self.max_match_meters.is_finite() && self.max_match_meters > 0.0) {
            return Err(MatchError::InvalidMaxDistance(self.max_match_meters));
        }
        if self.source_key.is_empty() {
            return Err(MatchError::EmptyKey("source_key"));
        }
        if self.value_key.is_empty() {
            return Err(MatchError::EmptyKey("value_key"));
        }
        if self.text_key.is_empty() {
            return Err(MatchError::EmptyKey("text_key"));
        }
        Ok(())
    }

    /// Display string for a matched value, e.g. `"4.2 m"`.  Exact halves
    /// round up: `2.25` → `"2.3 m"`.
    pub fn format_value(&self, value: f64) -> String {
        format!("{} m", format_fixed(value, self.text_decimals))
    }
}

// ── MatchReport ───────────────────────────────────────────────────────────────

/// Counters from one matching pass.  Informational only.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct MatchReport {
    /// Reference features that made it into the grid.
    pub indexed:           usize,
    /// Reference features without a usable point or value.
    pub skipped_reference: usize,
    /// Targets that received a value.
    pub matched:           usize,
    /// Targets with a point but no candidate in range.
    pub unmatched:         usize,
    /// Targets without a usable point.
    pub skipped_target:    usize,
}

/// Per-target outcome of the query phase.
#[derive(Copy, Clone, Debug)]
enum Outcome {
    NoPoint,
    Unmatched,
    Matched(f64),
}

// ── SpatialMatcher ────────────────────────────────────────────────────────────

/// Joins two line-feature collections by representative-point proximity.
///
/// Construct with [`SpatialMatcher::builder`].
pub struct SpatialMatcher<P: RepresentativePoint = MiddleVertex> {
    options:  MatchOptions,
    strategy: P,
}

impl SpatialMatcher<MiddleVertex> {
    pub fn builder() -> SpatialMatcherBuilder<MiddleVertex> {
        SpatialMatcherBuilder::new()
    }
}

impl Default for SpatialMatcher<MiddleVertex> {
    /// Default options, [`MiddleVertex`] strategy.  Infallible because the
    /// defaults always validate.
    fn default() -> Self {
        Self { options: MatchOptions::default(), strategy: MiddleVertex }
    }
}

impl<P: RepresentativePoint> SpatialMatcher<P> {
    pub fn options(&self) -> &MatchOptions {
        &self.options
    }

    pub fn strategy(&self) -> &P {
        &self.strategy
    }

    /// Attach the nearest reference value to every target within range.
    ///
    /// Matched targets gain `value_key` (number) and `text_key` (display
    /// string).  Unmatched or degenerate targets are not touched, and an
    /// empty input on either side is a no-op.
    pub fn attach_nearest_attribute(
        &self,
        target:    &mut [LineFeature],
        reference: &[LineFeature],
    ) -> MatchReport {
        let mut report = MatchReport::default();

        if target.is_empty() || reference.is_empty() {
            debug!(
                "width join skipped: {} targets, {} references",
                target.len(),
                reference.len()
            );
            return report;
        }

        // ── ① Index ──────────────────────────────────────────────────────
        let index = self.build_index(reference, &mut report);
        if index.is_empty() {
            debug!(
                "width join skipped: none of {} references carried a usable point and value",
                reference.len()
            );
            return report;
        }

        // ── ② Query ──────────────────────────────────────────────────────
        let outcomes = self.query_all(&index, target);

        // ── ③ Apply ──────────────────────────────────────────────────────
        for (feature, outcome) in target.iter_mut().zip(outcomes) {
            match outcome {
                Outcome::NoPoint => report.skipped_target += 1,
                Outcome::Unmatched => report.unmatched += 1,
                Outcome::Matched(value) => {
                    feature.set_attr(self.options.value_key.as_str(), AttrValue::Number(value));
                    feature.set_attr(
                        self.options.text_key.as_str(),
                        AttrValue::Text(self.options.format_value(value)),
                    );
                    report.matched += 1;
                }
            }
        }

        debug!(
            "width join: {} of {} targets matched ({} unmatched, {} without geometry); \
             {} references in {} cells, {} skipped",
            report.matched,
            target.len(),
            report.unmatched,
            report.skipped_target,
            report.indexed,
            index.cell_count(),
            report.skipped_reference,
        );
        report
    }

    fn build_index(&self, reference: &[LineFeature], report: &mut MatchReport) -> GridIndex<f64> {
        let mut skipped = 0;
        let points: Vec<IndexedPoint<f64>> = reference
            .iter()
            .enumerate()
            .filter_map(|(i, f)| {
                let point = self.strategy.point(&f.coords);
                let value = f.number_attr(&self.options.source_key);
                match (point, value) {
                    (Some(point), Some(value)) => Some(IndexedPoint { point, value }),
                    _ => {
                        trace!(
                            "reference {i} not indexed (point: {}, value: {})",
                            point.is_some(),
                            value.is_some()
                        );
                        skipped += 1;
                        None
                    }
                }
            })
            .collect();

        let (index, rejected) = GridIndex::build(self.options.cell_size_degrees, points);
        report.indexed = index.len();
        report.skipped_reference = skipped + rejected;
        index
    }

    fn query_one(&self, index: &GridIndex<f64>, feature: &LineFeature) -> Outcome {
        let Some(mid) = self.strategy.point(&feature.coords) else {
            return Outcome::NoPoint;
        };
        match index.nearest_within(mid, self.options.max_match_meters) {
            Some(n) => Outcome::Matched(n.point.value),
            None => Outcome::Unmatched,
        }
    }

    #[cfg(not(feature = "parallel"))]
    fn query_all(&self, index: &GridIndex<f64>, target: &[LineFeature]) -> Vec<Outcome> {
        target.iter().map(|f| self.query_one(index, f)).collect()
    }

    #[cfg(feature = "parallel")]
    fn query_all(&self, index: &GridIndex<f64>, target: &[LineFeature]) -> Vec<Outcome> {
        target.par_iter().map(|f| self.query_one(index, f)).collect()
    }
}

/// One-shot join with the default [`MiddleVertex`] strategy.
///
/// # Errors
///
/// Only if `options` fail [`MatchOptions::validate`].
pub fn attach_nearest_attribute(
    target:    &mut [LineFeature],
    reference: &[LineFeature],
    options:   &MatchOptions,
) -> MatchResult<MatchReport> {
    let matcher = SpatialMatcher::builder().options(options.clone()).build()?;
    Ok(matcher.attach_nearest_attribute(target, reference))
}

// ── SpatialMatcherBuilder ─────────────────────────────────────────────────────

/// Fluent builder for [`SpatialMatcher`].
///
/// # Example
///
/// ```
/// use rw_core::{LineFeature, LonLat};
/// use rw_match::SpatialMatcher;
///
/// let matcher = SpatialMatcher::builder()
///     .max_match_meters(50.0)
///     .build()
///     .unwrap();
///
/// let mut roads = vec![LineFeature::new(vec![LonLat::new(10.70, 59.91)])];
/// let widths = vec![
///     LineFeature::new(vec![LonLat::new(10.7003, 59.9103)]).with_attr("widthValue", "4,2"),
/// ];
/// let report = matcher.attach_nearest_attribute(&mut roads, &widths);
/// assert_eq!(report.matched, 1);
/// assert_eq!(roads[0].number_attr("widthM"), Some(4.2));
/// ```
pub struct SpatialMatcherBuilder<P: RepresentativePoint> {
    options:  MatchOptions,
    strategy: P,
}

impl SpatialMatcherBuilder<MiddleVertex> {
    pub fn new() -> Self {
        Self { options: MatchOptions::default(), strategy: MiddleVertex }
    }
}

impl Default for SpatialMatcherBuilder<MiddleVertex> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: RepresentativePoint> SpatialMatcherBuilder<P> {
    /// Replace all options at once.
    pub fn options(mut self, options: MatchOptions) -> Self {
        self.options = options;
        self
    }

    pub fn cell_size_degrees(mut self, deg: f64) -> Self {
        self.options.cell_size_degrees = deg;
        self
    }

    pub fn max_match_meters(mut self, m: f64) -> Self {
        self.options.max_match_meters = m;
        self
    }

    pub fn source_key(mut self, key: impl Into<String>) -> Self {
        self.options.source_key = key.into();
        self
    }

    pub fn value_key(mut self, key: impl Into<String>) -> Self {
        self.options.value_key = key.into();
        self
    }

    pub fn text_key(mut self, key: impl Into<String>) -> Self {
        self.options.text_key = key.into();
        self
    }

    pub fn text_decimals(mut self, decimals: usize) -> Self {
        self.options.text_decimals = decimals;
        self
    }

    /// Swap the representative-point strategy.
    pub fn strategy<Q: RepresentativePoint>(self, strategy: Q) -> SpatialMatcherBuilder<Q> {
        SpatialMatcherBuilder { options: self.options, strategy }
    }

    /// Validate options and return a ready matcher.
    pub fn build(self) -> MatchResult<SpatialMatcher<P>> {
        self.options.validate()?;
        Ok(SpatialMatcher { options: self.options, strategy: self.strategy })
    }
}
