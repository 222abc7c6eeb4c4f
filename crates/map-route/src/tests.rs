use std::sync::Arc;

use map_borders::Border;
use map_core::{LaneId, MapPoint, RoadId};
use map_lanes::{Lane, Road, RoadCategory};
use map_model::MapBuilder;
use map_quadtree::Boundary;

use crate::Route;

fn straight_border(lane: LaneId, y: f64, x_max: f64) -> Border {
    let points = vec![MapPoint::new(0.0, y, 0.0, lane), MapPoint::new(x_max, y, 0.0, lane)];
    let mut b = Border::new(lane, points);
    b.compute_s_values();
    b.initialize_spline().unwrap();
    b
}

fn straight_lane_map(x_max: f64) -> Arc<map_model::Map> {
    let inner = straight_border(LaneId(0), 0.0, x_max);
    let outer = straight_border(LaneId(0), 4.0, x_max);
    let mut lane = Lane::new(LaneId(0), RoadId(0), inner, outer, false).unwrap();
    lane.set_type("driving", RoadCategory::Town);

    let road = Road::new(RoadId(0), "Main St".into(), RoadCategory::Town, false);
    let boundary = Boundary::new(-10.0, x_max + 10.0, -10.0, 10.0);
    let map = MapBuilder::new(boundary).add_road(road).add_lane(lane).build().unwrap();
    Arc::new(map)
}

#[test]
fn route_along_straight_lane_matches_spec_scenario() {
    let map = straight_lane_map(100.0);
    let route = Route::new(Arc::clone(&map), 0.0, 0.0, 100.0, 0.0);

    assert!(!route.is_empty());
    assert!((route.get_s(37.0, 0.1) - 37.0).abs() < 0.1);

    let pose = route.interpolate_at_s(50.0).expect("route has samples");
    assert!((pose.x - 50.0).abs() < 1e-6);
    assert!(pose.yaw.abs() < 1e-6);
}

#[test]
fn route_length_matches_lane_span() {
    let map = straight_lane_map(100.0);
    let route = Route::new(map, 0.0, 0.0, 100.0, 0.0);
    assert!((route.length() - 100.0).abs() < 1.0);
}

#[test]
fn route_to_unreachable_point_is_empty() {
    let map = straight_lane_map(100.0);
    // Far outside the quadtree's boundary: no nearest point is found.
    let route = Route::new(map, 0.0, 0.0, 10_000.0, 10_000.0);
    assert!(route.is_empty());
    assert_eq!(route.get_s(0.0, 0.0), f64::INFINITY);
}

#[test]
fn lane_to_sections_and_s_to_sections_stay_consistent() {
    let map = straight_lane_map(100.0);
    let route = Route::new(map, 0.0, 0.0, 100.0, 0.0);

    assert_eq!(route.lane_to_sections().len(), route.sections().len());
    for (lane_id, &idx) in route.lane_to_sections() {
        assert_eq!(route.sections()[idx].lane_id, *lane_id);
    }
}

#[test]
fn interpolate_at_s_clamps_outside_route_length() {
    let map = straight_lane_map(100.0);
    let route = Route::new(map, 0.0, 0.0, 100.0, 0.0);

    let before = route.interpolate_at_s(-10.0).unwrap();
    let after = route.interpolate_at_s(1_000.0).unwrap();
    assert!(before.x >= -1e-6);
    assert!(after.x <= 100.0 + 1e-6);
}

#[test]
fn get_shortened_route_covers_requested_window() {
    let map = straight_lane_map(100.0);
    let route = Route::new(map, 0.0, 0.0, 100.0, 0.0);

    let shortened = route.get_shortened_route(20.0, 30.0);
    assert!(!shortened.is_empty());
    assert!((shortened.length() - 30.0).abs() < 1.0);
}
