//! Unit tests for st-catalog.

#[cfg(test)]
use st_core::Coordinate;

#[cfg(test)]
use crate::Segment;

#[cfg(test)]
fn seg(road: &str, name: &str, start: (f64, f64), finish: (f64, f64)) -> Segment {
    Segment::new(
        road,
        name,
        Coordinate::new(start.0, start.1),
        Coordinate::new(finish.0, finish.1),
    )
}

#[cfg(test)]
mod segment_tests {
    use st_core::Coordinate;

    use super::seg;
    use crate::SegmentKey;

    #[test]
    fn keys() {
        let key = SegmentKey::new("E18", "Sandvika - Lysaker");
        assert_eq!(key.cache_key(), "E18|Sandvika - Lysaker");
        assert_eq!(key.storage_id(), "E18:Sandvika - Lysaker");
        assert_eq!(seg("E18", "Sandvika - Lysaker", (0.0, 0.0), (0.0, 0.01)).key(), key);
    }

    #[test]
    fn radius_defaults_to_thirty_metres() {
        let s = seg("R1", "A", (0.0, 0.0), (0.0, 0.01));
        assert_eq!(s.effective_radius_m(), 30.0);
        assert_eq!(s.clone().with_radius(50.0).effective_radius_m(), 50.0);
        assert_eq!(s.radius_or(12.0), 12.0);
    }

    #[test]
    fn display_path_needs_two_points() {
        let s = seg("R1", "A", (0.0, 0.0), (0.0, 0.01));
        assert_eq!(s.display_path(), vec![s.start, s.finish]);

        let one = s.clone().with_path(vec![Coordinate::new(0.0, 0.001)]);
        assert_eq!(one.display_path(), vec![s.start, s.finish]);

        let path = vec![
            Coordinate::new(0.0, 0.0001),
            Coordinate::new(0.0001, 0.005),
            Coordinate::new(0.0, 0.0099),
        ];
        let full = s.with_path(path.clone());
        assert_eq!(full.display_path(), path);
    }

    #[test]
    fn markers_follow_path_ends() {
        let s = seg("R1", "A", (0.0, 0.0), (0.0, 0.01));
        assert_eq!(s.marker_endpoints(), (s.start, s.finish));

        let a = Coordinate::new(0.0, 0.0001);
        let b = Coordinate::new(0.0, 0.0099);
        let with_path = s.clone().with_path(vec![a, Coordinate::new(0.0001, 0.005), b]);
        assert_eq!(with_path.marker_endpoints(), (a, b));

        let single = s.with_path(vec![a]);
        assert_eq!(single.marker_endpoints(), (a, a));
    }

    #[test]
    fn length_is_straight_line() {
        let s = seg("R1", "A", (0.0, 0.0), (0.0, 0.01));
        assert!((s.length_m() - 1_111.95).abs() < 1.0, "got {}", s.length_m());
    }
}

#[cfg(test)]
mod catalog_tests {
    use st_core::Coordinate;

    use super::seg;
    use crate::{CatalogError, ScanStrategy, SegmentCatalog, SegmentId};

    #[test]
    fn duplicate_keys_fail_fast() {
        let err = SegmentCatalog::new(vec![
            seg("R1", "A", (0.0, 0.0), (0.0, 0.01)),
            seg("R1", "A", (1.0, 0.0), (1.0, 0.01)),
        ])
        .err()
        .expect("duplicate must be rejected");
        assert!(matches!(err, CatalogError::DuplicateKey { ref road, ref name } if road == "R1" && name == "A"));
    }

    #[test]
    fn same_name_on_different_roads_is_fine() {
        let cat = SegmentCatalog::new(vec![
            seg("R1", "A", (0.0, 0.0), (0.0, 0.01)),
            seg("R2", "A", (1.0, 0.0), (1.0, 0.01)),
        ])
        .unwrap();
        assert_eq!(cat.len(), 2);
        assert_eq!(cat.find("R2", "A"), Some(SegmentId(1)));
        assert_eq!(cat.find("R3", "A"), None);
    }

    #[test]
    fn rejects_invalid_segments() {
        assert!(matches!(
            SegmentCatalog::new(vec![seg("", "A", (0.0, 0.0), (0.0, 0.01))]),
            Err(CatalogError::InvalidSegment { .. })
        ));
        match SegmentCatalog::new(vec![seg("R", "A", (95.0, 0.0), (0.0, 0.01))]) {
            Err(CatalogError::InvalidSegment { reason, .. }) => {
                assert!(reason.starts_with("start: invalid coordinate"), "{reason}");
            }
            Err(other) => panic!("expected an invalid segment, got {other:?}"),
            Ok(_) => panic!("segment with latitude 95 was accepted"),
        }
        assert!(matches!(
            SegmentCatalog::new(vec![seg("R", "A", (0.0, 0.0), (0.0, 0.01)).with_radius(0.0)]),
            Err(CatalogError::InvalidSegment { .. })
        ));
    }

    #[test]
    fn first_match_in_definition_order() {
        // Both start zones contain the origin.
        let cat = SegmentCatalog::new(vec![
            seg("R1", "first", (0.0, 0.0001), (0.0, 0.01)),
            seg("R2", "second", (0.0, 0.0), (0.0, -0.01)),
        ])
        .unwrap();
        let here = Coordinate::new(0.0, 0.0);
        for _ in 0..10 {
            assert_eq!(cat.first_start_match(here, 30.0, ScanStrategy::Linear), Some(SegmentId(0)));
        }
    }

    #[test]
    fn respects_per_segment_radius() {
        let cat = SegmentCatalog::new(vec![
            seg("R1", "tight", (0.0, 0.0), (0.0, 0.01)).with_radius(10.0),
            seg("R2", "wide", (0.0, 0.0003), (0.0, 0.02)).with_radius(100.0),
        ])
        .unwrap();
        // ~22 m from R1 start, ~11 m from R2 start.
        let here = Coordinate::new(0.0, 0.0002);
        assert_eq!(cat.first_start_match(here, 30.0, ScanStrategy::Linear), Some(SegmentId(1)));
    }

    #[test]
    fn no_match_far_away() {
        let cat = SegmentCatalog::new(vec![seg("R1", "A", (0.0, 0.0), (0.0, 0.01))]).unwrap();
        assert_eq!(
            cat.first_start_match(Coordinate::new(1.0, 1.0), 30.0, ScanStrategy::Linear),
            None
        );
        assert_eq!(
            SegmentCatalog::empty().first_start_match(Coordinate::new(0.0, 0.0), 30.0, ScanStrategy::Indexed),
            None
        );
    }

    #[test]
    fn indexed_scan_agrees_with_linear() {
        let mut segments = Vec::new();
        for i in 0..20 {
            for j in 0..20 {
                let lat = 59.0 + i as f64 * 0.0005;
                let lon = 10.0 + j as f64 * 0.0005;
                let mut s = seg(&format!("R{i}"), &format!("S{j}"), (lat, lon), (lat + 0.01, lon));
                if (i + j) % 3 == 0 {
                    s = s.with_radius(60.0);
                }
                segments.push(s);
            }
        }
        let cat = SegmentCatalog::new(segments).unwrap();

        for k in 0..200 {
            let p = Coordinate::new(59.0 + (k % 23) as f64 * 0.00047, 10.0 + (k % 17) as f64 * 0.00061);
            assert_eq!(
                cat.first_start_match(p, 30.0, ScanStrategy::Indexed),
                cat.first_start_match(p, 30.0, ScanStrategy::Linear),
                "mismatch at {p}"
            );
        }
    }

    #[test]
    fn indexed_scan_agrees_with_linear_at_high_latitude() {
        let mut segments = Vec::new();
        for i in 0..15 {
            for j in 0..15 {
                let lat = 78.0 + i as f64 * 0.0004;
                let lon = 15.0 + j as f64 * 0.002;
                let mut s = seg(&format!("N{i}"), &format!("S{j}"), (lat, lon), (lat + 0.01, lon));
                if (i * j) % 4 == 1 {
                    s = s.with_radius(120.0);
                }
                segments.push(s);
            }
        }
        let cat = SegmentCatalog::new(segments).unwrap();

        for k in 0..200 {
            let p = Coordinate::new(78.0 + (k % 19) as f64 * 0.00031, 15.0 + (k % 29) as f64 * 0.00097);
            assert_eq!(
                cat.first_start_match(p, 30.0, ScanStrategy::Indexed),
                cat.first_start_match(p, 30.0, ScanStrategy::Linear),
                "mismatch at {p}"
            );
        }
    }

    #[test]
    fn indexed_scan_falls_back_when_radius_reaches_over_the_pole() {
        // About 2,224 km apart across the pole, inside a 2,300 km geofence.
        let cat = SegmentCatalog::new(vec![
            seg("R1", "Polar", (80.0, 180.0), (80.0, 179.9)).with_radius(2_300_000.0),
        ])
        .unwrap();
        let p = Coordinate::new(80.0, 0.0);
        let linear = cat.first_start_match(p, 30.0, ScanStrategy::Linear);
        assert_eq!(linear, Some(SegmentId(0)));
        assert_eq!(cat.first_start_match(p, 30.0, ScanStrategy::Indexed), linear);
    }

    #[test]
    fn indexed_scan_falls_back_near_antimeridian() {
        let cat = SegmentCatalog::new(vec![seg("R1", "A", (0.0, 179.99995), (0.0, 179.9))]).unwrap();
        let p = Coordinate::new(0.0, 180.0);
        assert_eq!(cat.first_start_match(p, 30.0, ScanStrategy::Indexed), Some(SegmentId(0)));
    }
}

#[cfg(test)]
mod loader_tests {
    use crate::{read_catalog_csv, read_catalog_json, CatalogError};

    const CATALOG_JSON: &str = r#"[
        { "road": "E18", "name": "Sandvika - Lysaker",
          "start":  { "latitude": 59.8890, "longitude": 10.5226 },
          "finish": { "latitude": 59.9130, "longitude": 10.6375 },
          "radiusMeters": 40 },
        { "road": "Rv4", "name": "Grorud - Sinsen",
          "start":  { "latitude": 59.9610, "longitude": 10.8810 },
          "finish": { "latitude": 59.9370, "longitude": 10.7780 },
          "path": [ { "latitude": 59.9610, "longitude": 10.8810 },
                    { "latitude": 59.9370, "longitude": 10.7780 } ] }
    ]"#;

    #[test]
    fn json_preserves_order_and_optionals() {
        let cat = read_catalog_json(CATALOG_JSON.as_bytes()).unwrap();
        let s = cat.segments();
        assert_eq!(s.len(), 2);
        assert_eq!(s[0].road, "E18");
        assert_eq!(s[0].radius_meters, Some(40.0));
        assert!(s[0].path.is_none());
        assert_eq!(s[1].radius_meters, None);
        assert_eq!(s[1].path.as_ref().map(Vec::len), Some(2));
        assert!((s[1].start.lat - 59.9610).abs() < 1e-12);
    }

    #[test]
    fn json_duplicate_rejected() {
        let json = r#"[
            { "road": "E18", "name": "A", "start": {"latitude": 0, "longitude": 0},
              "finish": {"latitude": 0, "longitude": 0.01} },
            { "road": "E18", "name": "A", "start": {"latitude": 1, "longitude": 0},
              "finish": {"latitude": 1, "longitude": 0.01} }
        ]"#;
        assert!(matches!(read_catalog_json(json.as_bytes()), Err(CatalogError::DuplicateKey { .. })));
    }

    #[test]
    fn json_malformed_is_json_error() {
        assert!(matches!(read_catalog_json("[{".as_bytes()), Err(CatalogError::Json(_))));
    }

    #[test]
    fn csv_with_optional_radius() {
        let csv = "\
road,name,start_lat,start_lon,finish_lat,finish_lon,radius_m\n\
E18,Sandvika - Lysaker,59.8890,10.5226,59.9130,10.6375,40\n\
Rv4,Grorud - Sinsen,59.9610,10.8810,59.9370,10.7780,\n";
        let cat = read_catalog_csv(csv.as_bytes()).unwrap();
        assert_eq!(cat.len(), 2);
        assert_eq!(cat.segments()[0].radius_meters, Some(40.0));
        assert_eq!(cat.segments()[1].radius_meters, None);
        assert_eq!(cat.segments()[1].name, "Grorud - Sinsen");
    }

    #[test]
    fn csv_bad_number_is_csv_error() {
        let csv = "road,name,start_lat,start_lon,finish_lat,finish_lon,radius_m\nR,A,north,0,0,0,\n";
        assert!(matches!(read_catalog_csv(csv.as_bytes()), Err(CatalogError::Csv(_))));
    }
}

#[cfg(test)]
mod paths_tests {
    use tempfile::TempDir;

    use st_core::Coordinate;

    use super::seg;
    use crate::{PathCache, SegmentCatalog, SegmentKey};

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn catalog() -> SegmentCatalog {
        SegmentCatalog::new(vec![
            seg("R1", "A", (0.0, 0.0), (0.0, 0.01)),
            seg("R1", "B", (0.0, 0.02), (0.0, 0.03)),
            seg("R2", "C", (1.0, 0.0), (1.0, 0.01)),
        ])
        .unwrap()
    }

    fn line(n: usize) -> Vec<Coordinate> {
        (0..n).map(|i| Coordinate::new(0.0, i as f64 * 0.001)).collect()
    }

    #[test]
    fn missing_file_is_empty_cache() {
        let dir = tmp();
        let cache = PathCache::load(&dir.path().join("segments.paths.json")).unwrap();
        assert!(cache.is_empty());
    }

    #[test]
    fn short_paths_are_not_stored() {
        let mut cache = PathCache::new();
        assert!(!cache.insert(&SegmentKey::new("R1", "A"), line(1)));
        assert!(cache.insert(&SegmentKey::new("R1", "A"), line(2)));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn missing_lists_uncached_in_catalog_order() {
        let mut cache = PathCache::new();
        cache.insert(&SegmentKey::new("R1", "B"), line(3));
        let missing = cache.missing(&catalog());
        assert_eq!(missing, vec![SegmentKey::new("R1", "A"), SegmentKey::new("R2", "C")]);
    }

    #[test]
    fn merge_attaches_paths() {
        let mut cache = PathCache::new();
        cache.insert(&SegmentKey::new("R1", "A"), line(4));
        cache.insert(&SegmentKey::new("R9", "Z"), line(4));
        let mut cat = catalog();
        assert_eq!(cache.merge_into(&mut cat), 1);
        assert_eq!(cat.segments()[0].path.as_ref().map(Vec::len), Some(4));
        assert!(cat.segments()[1].path.is_none());
    }

    #[test]
    fn save_then_load() {
        let dir = tmp();
        let file = dir.path().join("segments.paths.json");
        let mut cache = PathCache::new();
        cache.insert(&SegmentKey::new("R1", "A"), line(3));
        cache.save(&file).unwrap();

        let text = std::fs::read_to_string(&file).unwrap();
        assert!(text.contains("\"R1|A\""));
        assert!(text.contains("\"latitude\""));

        let loaded = PathCache::load(&file).unwrap();
        let key = SegmentKey::new("R1", "A");
        let (got, want) = (loaded.get(&key).unwrap(), cache.get(&key).unwrap());
        assert_eq!(got.len(), want.len());
        for (g, w) in got.iter().zip(want) {
            assert!(g.distance_m(*w) < 1e-6);
        }
    }
}

#[cfg(test)]
mod limits_tests {
    use super::seg;
    use crate::{LimitsTable, SegmentLimits};

    #[test]
    fn reads_sidecar_keys() {
        let json = r#"{ "R1|A": { "maxAvgKmH": 80, "recommendedAvgKmH": 70 }, "R2|C": {} }"#;
        let table = LimitsTable::read(json.as_bytes()).unwrap();
        assert_eq!(table.len(), 2);
        let a = seg("R1", "A", (0.0, 0.0), (0.0, 0.01));
        assert_eq!(
            table.get(&a),
            Some(&SegmentLimits { max_avg_kmh: Some(80.0), recommended_avg_kmh: Some(70.0) })
        );
    }

    #[test]
    fn exceeds_only_strictly_above_max() {
        let a = seg("R1", "A", (0.0, 0.0), (0.0, 0.01));
        let c = seg("R2", "C", (1.0, 0.0), (1.0, 0.01));
        let mut table = LimitsTable::new();
        table.insert(&a, SegmentLimits { max_avg_kmh: Some(80.0), recommended_avg_kmh: None });
        table.insert(&c, SegmentLimits::default());

        assert!(table.exceeds_max(&a, 80.5));
        assert!(!table.exceeds_max(&a, 80.0));
        assert!(!table.exceeds_max(&c, 500.0));
        assert!(!table.exceeds_max(&seg("R3", "X", (0.0, 0.0), (0.0, 0.01)), 500.0));
    }

    #[test]
    fn missing_sidecar_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert!(LimitsTable::load(&dir.path().join("segment-limits.json")).unwrap().is_empty());
    }
}

#[cfg(test)]
mod checkpoint_tests {
    use crate::{CatalogError, CheckpointPair};

    #[test]
    fn first_two_entries_are_start_and_finish() {
        let json = r#"[
            { "name": "Start", "latitude": 59.0, "longitude": 10.0 },
            { "name": "Finish", "latitude": 59.01, "longitude": 10.0 },
            { "latitude": 60.0, "longitude": 11.0 }
        ]"#;
        let pair = CheckpointPair::read_json(json.as_bytes()).unwrap();
        assert_eq!(pair.start.name.as_deref(), Some("Start"));
        assert!((pair.finish.position.lat - 59.01).abs() < 1e-12);
        assert!((pair.length_m() - 1_111.95).abs() < 1.0);
    }

    #[test]
    fn fewer_than_two_is_an_error() {
        let json = r#"[ { "latitude": 59.0, "longitude": 10.0 } ]"#;
        assert!(matches!(CheckpointPair::read_json(json.as_bytes()), Err(CatalogError::Checkpoints(_))));
    }

    #[test]
    fn out_of_range_checkpoint_is_an_error() {
        let json = r#"[
            { "latitude": 59.0, "longitude": 10.0 },
            { "latitude": 59.0, "longitude": 181.0 }
        ]"#;
        match CheckpointPair::read_json(json.as_bytes()) {
            Err(CatalogError::Checkpoints(msg)) => assert!(msg.contains("invalid coordinate"), "{msg}"),
            other => panic!("expected a checkpoint error, got {other:?}"),
        }
    }
}
