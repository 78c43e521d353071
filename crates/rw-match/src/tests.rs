//! Unit tests for rw-match.
//!
//! All fixtures are hand-placed around Oslo (≈ 59.9° N), where 0.0001° of
//! latitude is ~11 m and 0.0001° of longitude is ~5.6 m.

#[cfg(test)]
mod helpers {
    use rw_core::{LineFeature, LonLat};

    /// Two-vertex line whose middle vertex (index 1) is `(lon, lat)`.
    pub fn line_at(lon: f64, lat: f64) -> LineFeature {
        LineFeature::new(vec![
            LonLat::new(lon - 0.0005, lat),
            LonLat::new(lon, lat),
        ])
    }

    pub fn width_at(lon: f64, lat: f64, width: &str) -> LineFeature {
        line_at(lon, lat).with_attr("widthValue", width)
    }

    /// xorshift64, enough for scattering fixtures without a `rand` dependency.
    pub struct Scatter(pub u64);

    impl Scatter {
        pub fn next_unit(&mut self) -> f64 {
            let mut x = self.0;
            x ^= x << 13;
            x ^= x >> 7;
            x ^= x << 17;
            self.0 = x;
            (x >> 11) as f64 / (1u64 << 53) as f64
        }

        /// Point in a ~1 km square around central Oslo.
        pub fn point(&mut self) -> (f64, f64) {
            (10.70 + self.next_unit() * 0.02, 59.91 + self.next_unit() * 0.01)
        }
    }
}

// ── Grid index ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod grid {
    use rw_core::LonLat;

    use crate::{CellKey, GridIndex, IndexedPoint};

    fn ip(lon: f64, lat: f64, value: u32) -> IndexedPoint<u32> {
        IndexedPoint { point: LonLat::new(lon, lat), value }
    }

    #[test]
    fn empty_build() {
        let (idx, rejected) = GridIndex::<u32>::build(0.01, Vec::new());
        assert!(idx.is_empty());
        assert_eq!(idx.len(), 0);
        assert_eq!(idx.cell_count(), 0);
        assert_eq!(rejected, 0);
        assert!(idx.nearest_within(LonLat::new(10.7, 59.9), 1e9).is_none());
    }

    #[test]
    fn cell_keys_floor_divide() {
        let (idx, _) = GridIndex::<u32>::build(0.01, Vec::new());
        assert_eq!(idx.cell_key(LonLat::new(10.705, 59.915)), Some(CellKey { x: 1070, y: 5991 }));
        // Floor, not truncation, below zero.
        assert_eq!(idx.cell_key(LonLat::new(-0.005, -0.015)), Some(CellKey { x: -1, y: -2 }));
    }

    #[test]
    fn every_point_stored_under_its_own_key() {
        let pts = vec![ip(10.705, 59.915, 0), ip(10.715, 59.915, 1), ip(10.7051, 59.9152, 2)];
        let (idx, _) = GridIndex::build(0.01, pts.clone());
        assert_eq!(idx.len(), 3);
        assert_eq!(idx.cell_count(), 2);
        for p in &pts {
            let key = idx.cell_key(p.point).unwrap();
            assert!(idx.bucket(key).contains(p));
            assert_eq!(key.x, (p.point.lon / 0.01).floor() as i64);
            assert_eq!(key.y, (p.point.lat / 0.01).floor() as i64);
        }
        // Insertion order is kept inside a bucket.
        let home = idx.bucket(CellKey { x: 1070, y: 5991 });
        assert_eq!(home.iter().map(|p| p.value).collect::<Vec<_>>(), vec![0, 2]);
    }

    #[test]
    fn non_finite_points_rejected() {
        let (idx, rejected) =
            GridIndex::build(0.01, vec![ip(f64::NAN, 59.9, 0), ip(10.7, 59.9, 1)]);
        assert_eq!(idx.len(), 1);
        assert_eq!(rejected, 1);
    }

    #[test]
    fn coordinates_beyond_key_space_rejected() {
        let (idx, rejected) = GridIndex::build(
            0.01,
            vec![ip(1e300, 59.9, 0), ip(10.7, -1e300, 1), ip(10.7, 59.9, 2)],
        );
        assert_eq!(idx.len(), 1);
        assert_eq!(rejected, 2);
        assert_eq!(idx.cell_key(LonLat::new(1e300, 59.9)), None);
        assert!(idx.nearest_within(LonLat::new(1e300, 59.9), f64::MAX).is_none());
        assert!(idx.within(LonLat::new(10.7, 1e300), f64::MAX).is_empty());
    }

    #[test]
    fn neighbourhood_stops_at_key_space_edge() {
        let keys: Vec<_> =
            GridIndex::<u32>::neighbourhood(CellKey { x: i64::MAX, y: i64::MIN }).collect();
        assert_eq!(
            keys,
            vec![
                CellKey { x: i64::MAX - 1, y: i64::MIN },
                CellKey { x: i64::MAX - 1, y: i64::MIN + 1 },
                CellKey { x: i64::MAX, y: i64::MIN },
                CellKey { x: i64::MAX, y: i64::MIN + 1 },
            ]
        );
    }

    #[test]
    fn neighbourhood_scan_order() {
        let keys: Vec<_> = GridIndex::<u32>::neighbourhood(CellKey { x: 0, y: 0 })
            .map(|k| (k.x, k.y))
            .collect();
        assert_eq!(
            keys,
            vec![(-1, -1), (-1, 0), (-1, 1), (0, -1), (0, 0), (0, 1), (1, -1), (1, 0), (1, 1)]
        );
    }

    #[test]
    fn diagonal_neighbour_cell_is_searched() {
        let (idx, _) = GridIndex::build(0.01, vec![ip(10.7099, 59.9199, 7)]);
        let query = LonLat::new(10.7101, 59.9201);
        let stored = idx.cell_key(LonLat::new(10.7099, 59.9199));
        assert_ne!(idx.cell_key(query), stored);

        let hit = idx.nearest_within(query, 75.0).expect("neighbour cell must be scanned");
        assert_eq!(hit.point.value, 7);
        assert!(hit.distance_m < 30.0);
    }

    #[test]
    fn two_cells_away_is_not_searched() {
        // Query 0.025° east: outside the 3×3 block even with a huge radius.
        let (idx, _) = GridIndex::build(0.01, vec![ip(10.705, 59.915, 1)]);
        assert!(idx.nearest_within(LonLat::new(10.730, 59.915), 1e6).is_none());
    }

    #[test]
    fn cutoff_is_inclusive() {
        let a = LonLat::new(10.70, 59.91);
        let (idx, _) = GridIndex::build(0.01, vec![ip(10.70, 59.9103, 1)]);
        let d = a.distance_m(LonLat::new(10.70, 59.9103));
        assert!(idx.nearest_within(a, d).is_some());
        assert!(idx.nearest_within(a, d - 1e-6).is_none());
    }

    #[test]
    fn nearest_wins_regardless_of_insertion_order() {
        let q = LonLat::new(10.705, 59.915);
        let (idx, _) = GridIndex::build(
            0.01,
            vec![ip(10.705, 59.9154, 1), ip(10.705, 59.9152, 2), ip(10.705, 59.9153, 3)],
        );
        assert_eq!(idx.nearest_within(q, 75.0).map(|n| n.point.value), Some(2));
    }

    #[test]
    fn exact_tie_keeps_first_scanned() {
        let q = LonLat::new(10.705, 59.915);
        let (idx, _) = GridIndex::build(0.01, vec![ip(10.705, 59.9152, 1), ip(10.705, 59.9152, 2)]);
        assert_eq!(idx.nearest_within(q, 75.0).map(|n| n.point.value), Some(1));
    }

    #[test]
    fn non_finite_query_finds_nothing() {
        let (idx, _) = GridIndex::build(0.01, vec![ip(10.705, 59.915, 1)]);
        assert!(idx.nearest_within(LonLat::new(f64::NAN, 59.915), 1e9).is_none());
        assert!(idx.within(LonLat::new(10.705, f64::INFINITY), 1e9).is_empty());
    }

    #[test]
    fn within_lists_in_scan_order() {
        let q = LonLat::new(10.7100, 59.915);
        // One point in the west neighbour cell, two in the home cell.
        let (idx, _) = GridIndex::build(
            0.01,
            vec![ip(10.7101, 59.915, 1), ip(10.7099, 59.915, 2), ip(10.7102, 59.915, 3), ip(10.73, 59.915, 4)],
        );
        let hits: Vec<u32> = idx.within(q, 50.0).iter().map(|n| n.point.value).collect();
        assert_eq!(hits, vec![2, 1, 3]);
    }
}

// ── Representative points ─────────────────────────────────────────────────────

#[cfg(test)]
mod representative {
    use approx::assert_abs_diff_eq;
    use rw_core::LonLat;

    use crate::{AlongLineMidpoint, MiddleVertex, RepresentativePoint};

    fn pts(raw: &[(f64, f64)]) -> Vec<LonLat> {
        raw.iter().map(|&(lon, lat)| LonLat::new(lon, lat)).collect()
    }

    #[test]
    fn middle_vertex_uses_floor_half_index() {
        let three = pts(&[(0.0, 0.0), (1.0, 1.0), (2.0, 2.0)]);
        assert_eq!(MiddleVertex.point(&three), Some(LonLat::new(1.0, 1.0)));
        let four = pts(&[(0.0, 0.0), (1.0, 1.0), (2.0, 2.0), (3.0, 3.0)]);
        assert_eq!(MiddleVertex.point(&four), Some(LonLat::new(2.0, 2.0)));
        let one = pts(&[(5.0, 6.0)]);
        assert_eq!(MiddleVertex.point(&one), Some(LonLat::new(5.0, 6.0)));
    }

    #[test]
    fn empty_has_no_point() {
        assert_eq!(MiddleVertex.point(&[]), None);
        assert_eq!(AlongLineMidpoint.point(&[]), None);
    }

    #[test]
    fn non_finite_middle_vertex_has_no_point() {
        let bad = pts(&[(0.0, 0.0), (f64::NAN, 1.0), (2.0, 2.0)]);
        assert_eq!(MiddleVertex.point(&bad), None);
        assert_eq!(AlongLineMidpoint.point(&bad), None);
    }

    #[test]
    fn along_line_midpoint_follows_length_not_vertex_count() {
        // Short first segment, long second one.
        let line = pts(&[(10.0, 60.0), (10.0, 60.0002), (10.0, 60.002)]);
        assert_eq!(MiddleVertex.point(&line), Some(LonLat::new(10.0, 60.0002)));

        let mid = AlongLineMidpoint.point(&line).unwrap();
        assert_abs_diff_eq!(mid.lon, 10.0, epsilon = 1e-12);
        assert_abs_diff_eq!(mid.lat, 60.001, epsilon = 1e-7);
    }

    #[test]
    fn along_line_midpoint_of_stacked_points() {
        let line = pts(&[(10.0, 60.0), (10.0, 60.0)]);
        assert_eq!(AlongLineMidpoint.point(&line), Some(LonLat::new(10.0, 60.0)));
    }
}

// ── Matcher ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod matcher {
    use rw_core::{AttrValue, LineFeature, LonLat, haversine_m};

    use super::helpers::{Scatter, line_at, width_at};
    use crate::{
        AlongLineMidpoint, MatchError, MatchOptions, MatchReport, MiddleVertex,
        RepresentativePoint, SpatialMatcher, attach_nearest_attribute,
    };

    #[test_log::test]
    fn oslo_scenario_attaches_width() {
        let mut roads = vec![line_at(10.70, 59.91)];
        let widths = vec![width_at(10.7003, 59.9103, "4,2")];

        let report = SpatialMatcher::default().attach_nearest_attribute(&mut roads, &widths);

        assert_eq!(report.matched, 1);
        assert_eq!(roads[0].attr("widthM"), Some(&AttrValue::Number(4.2)));
        assert_eq!(roads[0].attr("widthText"), Some(&AttrValue::Text("4.2 m".into())));
    }

    #[test]
    fn oslo_scenario_tight_cutoff_attaches_nothing() {
        let mut roads = vec![line_at(10.70, 59.91)];
        let before = roads.clone();
        let widths = vec![width_at(10.7003, 59.9103, "4,2")];

        let matcher = SpatialMatcher::builder().max_match_meters(10.0).build().unwrap();
        let report = matcher.attach_nearest_attribute(&mut roads, &widths);

        assert_eq!(report.matched, 0);
        assert_eq!(report.unmatched, 1);
        assert_eq!(roads, before);
    }

    #[test]
    fn empty_inputs_are_noops() {
        let matcher = SpatialMatcher::default();

        let mut roads = vec![line_at(10.70, 59.91)];
        let before = roads.clone();
        assert_eq!(matcher.attach_nearest_attribute(&mut roads, &[]), MatchReport::default());
        assert_eq!(roads, before);

        let mut none: Vec<LineFeature> = Vec::new();
        let widths = vec![width_at(10.70, 59.91, "5")];
        assert_eq!(matcher.attach_nearest_attribute(&mut none, &widths), MatchReport::default());
        assert!(none.is_empty());
    }

    #[test_log::test]
    fn unusable_references_leave_targets_untouched() {
        let mut roads = vec![line_at(10.70, 59.91)];
        let before = roads.clone();
        let widths = vec![
            LineFeature::new(Vec::new()).with_attr("widthValue", "4"),
            width_at(10.70, 59.91, "ukjent"),
            line_at(10.70, 59.91).with_attr("widthValue", AttrValue::Null),
            line_at(10.70, 59.91),
        ];

        let report = SpatialMatcher::default().attach_nearest_attribute(&mut roads, &widths);

        assert_eq!(report.indexed, 0);
        assert_eq!(report.skipped_reference, 4);
        assert_eq!(roads, before);
    }

    #[test]
    fn degenerate_targets_skipped_others_matched() {
        let mut roads = vec![
            LineFeature::new(Vec::new()),
            line_at(10.70, 59.91),
            LineFeature::new(vec![LonLat::new(f64::NAN, 59.91)]),
        ];
        let widths = vec![width_at(10.70, 59.9101, "6.5")];

        let report = SpatialMatcher::default().attach_nearest_attribute(&mut roads, &widths);

        assert_eq!(report, MatchReport {
            indexed: 1,
            skipped_reference: 0,
            matched: 1,
            unmatched: 0,
            skipped_target: 2,
        });
        assert!(!roads[0].has_attr("widthM"));
        assert_eq!(roads[1].number_attr("widthM"), Some(6.5));
        assert!(!roads[2].has_attr("widthM"));
    }

    #[test_log::test]
    fn out_of_range_coordinates_are_excluded_not_fatal() {
        let mut roads = vec![
            LineFeature::new(vec![LonLat::new(1e300, 59.91)]),
            line_at(10.70, 59.91),
        ];
        let widths = vec![
            LineFeature::new(vec![LonLat::new(1e300, 59.91)]).with_attr("widthValue", "9"),
            width_at(10.7003, 59.9103, "4,2"),
        ];

        let report = SpatialMatcher::default().attach_nearest_attribute(&mut roads, &widths);

        assert_eq!(report.indexed, 1);
        assert_eq!(report.skipped_reference, 1);
        assert_eq!(report.matched, 1);
        assert_eq!(report.unmatched, 1);
        assert!(!roads[0].has_attr("widthM"));
        assert_eq!(roads[1].number_attr("widthM"), Some(4.2));
    }

    #[test]
    fn nearest_reference_wins() {
        let mut roads = vec![line_at(10.70, 59.91)];
        let widths = vec![
            width_at(10.70, 59.9104, "3"),  // ~44 m
            width_at(10.70, 59.9102, "7"),  // ~22 m
            width_at(10.70, 59.9106, "9"),  // ~67 m
        ];
        SpatialMatcher::default().attach_nearest_attribute(&mut roads, &widths);
        assert_eq!(roads[0].number_attr("widthM"), Some(7.0));
        assert_eq!(roads[0].attr("widthText"), Some(&AttrValue::Text("7.0 m".into())));
    }

    #[test]
    fn equal_distance_keeps_first_reference() {
        let widths_a = vec![width_at(10.70, 59.9102, "4"), width_at(10.70, 59.9102, "5")];
        let widths_b = vec![width_at(10.70, 59.9102, "5"), width_at(10.70, 59.9102, "4")];

        let mut roads = vec![line_at(10.70, 59.91)];
        SpatialMatcher::default().attach_nearest_attribute(&mut roads, &widths_a);
        assert_eq!(roads[0].number_attr("widthM"), Some(4.0));

        let mut roads = vec![line_at(10.70, 59.91)];
        SpatialMatcher::default().attach_nearest_attribute(&mut roads, &widths_b);
        assert_eq!(roads[0].number_attr("widthM"), Some(5.0));
    }

    #[test]
    fn far_references_produce_no_spurious_matches() {
        let mut roads = vec![line_at(10.70, 59.91), line_at(10.72, 59.915)];
        let before = roads.clone();
        let widths = vec![width_at(10.70, 59.911, "4"), width_at(10.7215, 59.915, "5")];

        let report = SpatialMatcher::default().attach_nearest_attribute(&mut roads, &widths);

        assert_eq!(report.matched, 0);
        assert_eq!(roads, before);
    }

    #[test]
    fn rematching_overwrites_rather_than_accumulates() {
        let mut roads = vec![line_at(10.70, 59.91)];
        let matcher = SpatialMatcher::default();
        matcher.attach_nearest_attribute(&mut roads, &[width_at(10.70, 59.9101, "4")]);
        matcher.attach_nearest_attribute(&mut roads, &[width_at(10.70, 59.9101, "6")]);
        assert_eq!(roads[0].number_attr("widthM"), Some(6.0));
        assert_eq!(roads[0].attributes.len(), 2);
    }

    #[test]
    fn existing_attributes_survive() {
        let mut roads = vec![line_at(10.70, 59.91).with_attr("typeVeg", "Enkel bilveg")];
        SpatialMatcher::default()
            .attach_nearest_attribute(&mut roads, &[width_at(10.70, 59.9101, "4")]);
        assert_eq!(roads[0].attr("typeVeg").and_then(AttrValue::as_str), Some("Enkel bilveg"));
        assert!(roads[0].has_attr("widthM"));
    }

    #[test]
    fn numeric_source_values_accepted() {
        let mut roads = vec![line_at(10.70, 59.91)];
        let widths = vec![line_at(10.70, 59.9101).with_attr("widthValue", 5.27)];
        SpatialMatcher::default().attach_nearest_attribute(&mut roads, &widths);
        assert_eq!(roads[0].attr("widthText"), Some(&AttrValue::Text("5.3 m".into())));
    }

    #[test]
    fn width_text_rounds_exact_halves_up() {
        let mut roads = vec![line_at(10.70, 59.91), line_at(10.80, 59.95)];
        let widths = vec![width_at(10.70, 59.9101, "2,25"), width_at(10.80, 59.9501, "0,25")];

        SpatialMatcher::default().attach_nearest_attribute(&mut roads, &widths);

        assert_eq!(roads[0].number_attr("widthM"), Some(2.25));
        assert_eq!(roads[0].attr("widthText"), Some(&AttrValue::Text("2.3 m".into())));
        assert_eq!(roads[1].attr("widthText"), Some(&AttrValue::Text("0.3 m".into())));
        assert_eq!(MatchOptions::default().format_value(4.2), "4.2 m");
    }

    #[test]
    fn custom_keys_and_decimals() {
        let mut roads = vec![line_at(10.70, 59.91)];
        let heights = vec![line_at(10.70, 59.9101).with_attr("height", "3,85")];

        let matcher = SpatialMatcher::builder()
            .source_key("height")
            .value_key("heightM")
            .text_key("heightText")
            .text_decimals(2)
            .build()
            .unwrap();
        matcher.attach_nearest_attribute(&mut roads, &heights);

        assert_eq!(roads[0].number_attr("heightM"), Some(3.85));
        assert_eq!(roads[0].attr("heightText"), Some(&AttrValue::Text("3.85 m".into())));
        assert!(!roads[0].has_attr("widthM"));
    }

    #[test]
    fn strategy_is_pluggable() {
        // Road: short stub then a long run north.  Its middle vertex sits at
        // the stub, ~100 m from the width point; its length midpoint is on it.
        let road = LineFeature::new(vec![
            LonLat::new(10.70, 59.9100),
            LonLat::new(10.70, 59.9101),
            LonLat::new(10.70, 59.9120),
        ]);
        let widths = vec![width_at(10.70, 59.91105, "8")];

        let mut by_vertex = vec![road.clone()];
        SpatialMatcher::default().attach_nearest_attribute(&mut by_vertex, &widths);
        assert!(!by_vertex[0].has_attr("widthM"));

        let mut by_length = vec![road];
        let matcher = SpatialMatcher::builder().strategy(AlongLineMidpoint).build().unwrap();
        matcher.attach_nearest_attribute(&mut by_length, &widths);
        assert_eq!(by_length[0].number_attr("widthM"), Some(8.0));
    }

    #[test]
    fn invalid_options_rejected() {
        assert!(matches!(
            SpatialMatcher::builder().cell_size_degrees(0.0).build(),
            Err(MatchError::InvalidCellSize(_))
        ));
        assert!(matches!(
            SpatialMatcher::builder().cell_size_degrees(f64::NAN).build(),
            Err(MatchError::InvalidCellSize(_))
        ));
        assert!(matches!(
            SpatialMatcher::builder().max_match_meters(-1.0).build(),
            Err(MatchError::InvalidMaxDistance(_))
        ));
        assert!(matches!(
            SpatialMatcher::builder().value_key("").build(),
            Err(MatchError::EmptyKey("value_key"))
        ));
    }

    #[test]
    fn free_function_uses_options() {
        let mut roads = vec![line_at(10.70, 59.91)];
        let widths = vec![width_at(10.7003, 59.9103, "4,2")];
        let opts = MatchOptions { max_match_meters: 10.0, ..MatchOptions::default() };
        let report = attach_nearest_attribute(&mut roads, &widths, &opts).unwrap();
        assert_eq!(report.matched, 0);

        let report = attach_nearest_attribute(&mut roads, &widths, &MatchOptions::default()).unwrap();
        assert_eq!(report.matched, 1);

        let bad = MatchOptions { cell_size_degrees: -0.01, ..MatchOptions::default() };
        assert!(attach_nearest_attribute(&mut roads, &widths, &bad).is_err());
    }

    #[test]
    fn repeated_runs_are_identical() {
        let mut rng = Scatter(0x5eed_cafe);
        let roads: Vec<LineFeature> = (0..200).map(|_| { let (x, y) = rng.point(); line_at(x, y) }).collect();
        let widths: Vec<LineFeature> = (0..300)
            .map(|i| { let (x, y) = rng.point(); width_at(x, y, &format!("{},{}", 3 + i % 5, i % 10)) })
            .collect();

        let matcher = SpatialMatcher::default();
        let mut first = roads.clone();
        let mut second = roads;
        let r1 = matcher.attach_nearest_attribute(&mut first, &widths);
        let r2 = matcher.attach_nearest_attribute(&mut second, &widths);
        assert_eq!(r1, r2);
        assert_eq!(first, second);
    }

    /// Grid result equals a brute-force scan over all references.
    #[test]
    fn agrees_with_brute_force() {
        let mut rng = Scatter(42);
        let mut roads: Vec<LineFeature> =
            (0..300).map(|_| { let (x, y) = rng.point(); line_at(x, y) }).collect();
        let widths: Vec<LineFeature> = (0..400)
            .map(|i| { let (x, y) = rng.point(); width_at(x, y, &i.to_string()) })
            .collect();
        let max_m = 75.0;

        let report = SpatialMatcher::default().attach_nearest_attribute(&mut roads, &widths);
        assert!(report.matched > 0, "fixture should produce some matches");

        for road in &roads {
            let mid = MiddleVertex.point(&road.coords).unwrap();
            let best = widths
                .iter()
                .map(|w| haversine_m(mid, MiddleVertex.point(&w.coords).unwrap()))
                .filter(|d| *d <= max_m)
                .fold(f64::INFINITY, f64::min);

            match road.number_attr("widthM") {
                Some(v) => {
                    let chosen = MiddleVertex.point(&widths[v as usize].coords).unwrap();
                    let d = haversine_m(mid, chosen);
                    assert!(d <= max_m, "match beyond cutoff: {d}");
                    assert_eq!(d, best, "a closer reference exists");
                }
                None => assert!(best.is_infinite(), "missed a reference at {best} m"),
            }
        }
    }
}

// ── Radius search ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod radius {
    use rw_core::{LineFeature, LonLat};

    use super::helpers::line_at;
    use crate::{MiddleVertex, features_within_radius};

    #[test]
    fn hits_in_input_order_with_distances() {
        let features = vec![
            line_at(10.70, 59.9120),      // ~222 m
            line_at(10.70, 59.9101),      // ~11 m
            LineFeature::new(Vec::new()), // no point
            line_at(10.70, 59.9300),      // ~2.2 km
        ];
        let hits = features_within_radius(LonLat::new(10.70, 59.91), 500.0, &features, &MiddleVertex);
        assert_eq!(hits.iter().map(|h| h.index).collect::<Vec<_>>(), vec![0, 1]);
        assert!(hits[1].distance_m < hits[0].distance_m);
    }

    #[test]
    fn non_finite_center_finds_nothing() {
        let features = vec![line_at(10.70, 59.91)];
        let hits = features_within_radius(LonLat::new(f64::NAN, 59.91), 1e9, &features, &MiddleVertex);
        assert!(hits.is_empty());
    }
}

// ── Vehicle clearance ─────────────────────────────────────────────────────────

#[cfg(test)]
mod clearance {
    use super::helpers::line_at;
    use crate::{Passability, VehicleFilter, classify};

    #[test]
    fn classify_table() {
        assert_eq!(classify(Some(3.0), Some(2.55)), Passability::Passable);
        assert_eq!(classify(Some(2.55), Some(2.55)), Passability::Passable);
        assert_eq!(classify(Some(2.0), Some(2.55)), Passability::TooNarrow);
        assert_eq!(classify(None, Some(2.55)), Passability::Unknown);
        assert_eq!(classify(Some(3.0), None), Passability::Unknown);
    }

    #[test]
    fn filter_hides_only_known_too_narrow_roads() {
        let roads = vec![
            line_at(10.70, 59.91).with_attr("widthM", 5.0),
            line_at(10.70, 59.91).with_attr("widthM", 2.0),
            line_at(10.70, 59.91),
        ];

        let mut filter = VehicleFilter::default();
        filter.set_vehicle_width_text("2,6");
        assert_eq!(filter.vehicle_width_m, Some(2.6));
        assert_eq!(filter.too_narrow(&roads), vec![1]);
        assert_eq!(filter.visible(&roads), vec![0, 1, 2]);

        filter.hide_too_narrow = true;
        assert_eq!(filter.visible(&roads), vec![0, 2]);
        assert_eq!(filter.passability(&roads[2]), Passability::Unknown);
    }

    #[test]
    fn garbage_width_clears_filter() {
        let roads = vec![line_at(10.70, 59.91).with_attr("widthM", 2.0)];
        let mut filter = VehicleFilter::new(Some(2.6));
        filter.hide_too_narrow = true;
        assert!(filter.visible(&roads).is_empty());

        filter.set_vehicle_width_text("bred");
        assert_eq!(filter.vehicle_width_m, None);
        assert!(filter.too_narrow(&roads).is_empty());
        assert_eq!(filter.visible(&roads), vec![0]);
    }
}
