use map_quadtree::Boundary;

use crate::feed::BorderFeed;
use crate::ingest::ingest;
use crate::records::{
    normalize_lane_border, normalize_reference_line, LaneBorderRecord, ReferenceLineRecord,
};

struct FixtureFeed {
    reference_lines: Vec<ReferenceLineRecord>,
    lane_borders: Vec<LaneBorderRecord>,
}

impl BorderFeed for FixtureFeed {
    fn reference_lines(&self) -> Vec<ReferenceLineRecord> {
        self.reference_lines.clone()
    }

    fn lane_borders(&self) -> Vec<LaneBorderRecord> {
        self.lane_borders.clone()
    }
}

fn straight_road_fixture() -> FixtureFeed {
    FixtureFeed {
        reference_lines: vec![ReferenceLineRecord {
            id: Some(0),
            polyline: vec![(0.0, 2.0), (100.0, 2.0)],
            streetname: Some("Main St".into()),
            category: Some("town".into()),
            oneway: Some("true".into()),
            ..Default::default()
        }],
        lane_borders: vec![
            LaneBorderRecord {
                id: Some(0),
                polyline: vec![(0.0, 0.0), (100.0, 0.0)],
                parent_id: Some(0),
                material: Some("asphalt".into()),
                linetype: Some("driving".into()),
                ..Default::default()
            },
            LaneBorderRecord {
                id: Some(1),
                polyline: vec![(0.0, 4.0), (100.0, 4.0)],
                parent_id: Some(0),
                material: Some("asphalt".into()),
                linetype: Some("driving".into()),
                ..Default::default()
            },
        ],
    }
}

#[test]
fn normalize_reference_line_defaults_missing_fields() {
    let raw = ReferenceLineRecord {
        id: Some(1),
        polyline: vec![(1.234_567_8, 2.0)],
        ..Default::default()
    };
    let line = normalize_reference_line(&raw).unwrap();

    assert_eq!(line.streetname, "NULL");
    assert_eq!(line.turn, "NULL");
    assert!(!line.oneway);
    assert!((line.polyline[0].0 - 1.234_568).abs() < 1e-9);
}

#[test]
fn normalize_reference_line_rejects_missing_id() {
    let raw = ReferenceLineRecord { polyline: vec![(0.0, 0.0)], ..Default::default() };
    assert!(normalize_reference_line(&raw).is_err());
}

#[test]
fn normalize_reference_line_rejects_empty_polyline() {
    let raw = ReferenceLineRecord { id: Some(1), polyline: vec![], ..Default::default() };
    assert!(normalize_reference_line(&raw).is_err());
}

#[test]
fn normalize_lane_border_rejects_missing_parent_id() {
    let raw = LaneBorderRecord { id: Some(1), polyline: vec![(0.0, 0.0)], ..Default::default() };
    assert!(normalize_lane_border(&raw).is_err());
}

#[test]
fn oneway_parsing_is_case_insensitive() {
    let raw = ReferenceLineRecord {
        id: Some(1),
        polyline: vec![(0.0, 0.0), (1.0, 0.0)],
        oneway: Some("TRUE".into()),
        ..Default::default()
    };
    assert!(normalize_reference_line(&raw).unwrap().oneway);
}

#[test]
fn ingest_builds_one_lane_from_two_consecutive_borders() {
    let feed = straight_road_fixture();
    let boundary = Boundary::new(-10.0, 110.0, -10.0, 10.0);
    let map = ingest(&feed, boundary).build().unwrap();

    assert_eq!(map.lane_count(), 1);
}

#[test]
fn ingest_skips_malformed_records_and_keeps_the_rest() {
    let mut feed = straight_road_fixture();
    feed.lane_borders.push(LaneBorderRecord {
        id: Some(2),
        polyline: vec![],
        parent_id: Some(0),
        ..Default::default()
    });

    let boundary = Boundary::new(-10.0, 110.0, -10.0, 10.0);
    let map = ingest(&feed, boundary).build().unwrap();

    // The malformed extra border is dropped before pairing, so the
    // original two borders still pair into exactly one lane.
    assert_eq!(map.lane_count(), 1);
}
