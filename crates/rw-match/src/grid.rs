//! Uniform lon/lat grid index with bounded nearest-neighbour queries.
//!
//! # Layout
//!
//! Points are bucketed by cell key
//!
//! ```text
//! key = ( floor(lon / cell_size), floor(lat / cell_size) )
//! ```
//!
//! in an `FxHashMap<CellKey, Vec<IndexedPoint<T>>>`.  A query only looks at
//! the query point's own cell and its 8 neighbours, so a match is guaranteed
//! to be found whenever the search radius is no larger than one cell edge in
//! metres at the working latitude.  That relation is an assumption the
//! caller chooses `cell_size` for; it is not checked.
//!
//! # Determinism
//!
//! The 3×3 neighbourhood is scanned in a fixed order (`dx` ascending, then
//! `dy` ascending), each bucket in insertion order.  Among candidates at
//! exactly equal distance the first one scanned wins.  Hash-map iteration
//! order never leaks into results.

use rustc_hash::FxHashMap;

use rw_core::LonLat;

/// Integer address of one grid cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellKey {
    pub x: i64,
    pub y: i64,
}

impl CellKey {
    /// Neighbouring key, or `None` past the edge of the `i64` key space.
    #[inline]
    pub fn offset(self, dx: i64, dy: i64) -> Option<CellKey> {
        Some(CellKey { x: self.x.checked_add(dx)?, y: self.y.checked_add(dy)? })
    }
}

/// A representative point paired with the value it carries.
#[derive(Clone, Debug, PartialEq)]
pub struct IndexedPoint<T> {
    pub point: LonLat,
    pub value: T,
}

/// Result of a bounded nearest query.
#[derive(Debug, PartialEq)]
pub struct Nearest<'a, T> {
    pub point:      &'a IndexedPoint<T>,
    pub distance_m: f64,
}

// Manual impls: `T` itself need not be `Copy`.
impl<T> Clone for Nearest<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Nearest<'_, T> {}

// ── GridIndex ─────────────────────────────────────────────────────────────────

/// Read-only bucket grid over a fixed point set.
///
/// Build it with [`GridIndex::build`]; there is no insertion after
/// construction.
pub struct GridIndex<T> {
    cell_size: f64,
    cells:     FxHashMap<CellKey, Vec<IndexedPoint<T>>>,
    len:       usize,
}

impl<T> GridIndex<T> {
    /// Bucket every point by its cell key.
    ///
    /// Points that cannot be keyed (a non-finite coordinate, or one so large
    /// its cell index does not fit in an `i64`) are dropped; the returned
    /// count tells the caller how many were.
    ///
    /// `cell_size` must be finite and positive; callers validate it
    /// (see `SpatialMatcherBuilder::build`).
    pub fn build<I>(cell_size: f64, points: I) -> (Self, usize)
    where
        I: IntoIterator<Item = IndexedPoint<T>>,
    {
        debug_assert!(cell_size.is_finite() && cell_size > 0.0);

        let mut cells: FxHashMap<CellKey, Vec<IndexedPoint<T>>> = FxHashMap::default();
        let mut len = 0;
        let mut rejected = 0;

        for p in points {
            let Some(key) = key_for(cell_size, p.point) else {
                rejected += 1;
                continue;
            };
            cells.entry(key).or_default().push(p);
            len += 1;
        }

        (Self { cell_size, cells, len }, rejected)
    }

    #[inline]
    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    /// Number of indexed points.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of non-empty cells.
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Cell key of `p` under this index's cell size, or `None` if `p`
    /// cannot be keyed.
    #[inline]
    pub fn cell_key(&self, p: LonLat) -> Option<CellKey> {
        key_for(self.cell_size, p)
    }

    /// Points stored under `key`, in insertion order.
    pub fn bucket(&self, key: CellKey) -> &[IndexedPoint<T>] {
        self.cells.get(&key).map_or(&[], Vec::as_slice)
    }

    /// The 3×3 block of keys around `key` in scan order.  Keys that would
    /// fall outside the key space are left out.
    pub fn neighbourhood(key: CellKey) -> impl Iterator<Item = CellKey> {
        (-1..=1).flat_map(move |dx| (-1..=1).filter_map(move |dy| key.offset(dx, dy)))
    }

    /// Candidates in the 3×3 neighbourhood of `query`, in scan order, each
    /// with its haversine distance.  Yields nothing for a query that cannot
    /// be keyed.
    fn candidates(&self, query: LonLat) -> impl Iterator<Item = Nearest<'_, T>> + '_ {
        self.cell_key(query)
            .into_iter()
            .flat_map(Self::neighbourhood)
            .flat_map(move |k| self.bucket(k).iter())
            .map(move |point| Nearest { point, distance_m: query.distance_m(point.point) })
    }

    /// Closest indexed point within `max_m` metres of `query`.
    ///
    /// Candidates farther than `max_m` are ignored.  A candidate replaces
    /// the current best only when strictly closer, so on exact ties the
    /// first one in scan order is kept.
    pub fn nearest_within(&self, query: LonLat, max_m: f64) -> Option<Nearest<'_, T>> {
        let mut best: Option<Nearest<'_, T>> = None;
        for c in self.candidates(query) {
            if c.distance_m > max_m {
                continue;
            }
            if best.is_none_or(|b| c.distance_m < b.distance_m) {
                best = Some(c);
            }
        }
        best
    }

    /// Every indexed point within `radius_m` of `query` in the 3×3
    /// neighbourhood, in scan order.
    pub fn within(&self, query: LonLat, radius_m: f64) -> Vec<Nearest<'_, T>> {
        self.candidates(query)
            .filter(|c| c.distance_m <= radius_m)
            .collect()
    }
}

#[inline]
fn key_for(cell_size: f64, p: LonLat) -> Option<CellKey> {
    Some(CellKey { x: cell_index(p.lon, cell_size)?, y: cell_index(p.lat, cell_size)? })
}

/// `floor(v / cell_size)` if it is exactly representable as `i64`.
/// A plain `as` cast would saturate instead.
#[inline]
fn cell_index(v: f64, cell_size: f64) -> Option<i64> {
    // 2^63: the first f64 above i64::MAX; -2^63 is i64::MIN exactly.
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;
    let i = (v / cell_size).floor();
    (i.is_finite() && (-LIMIT..LIMIT).contains(&i)).then_some(i as i64)
}
