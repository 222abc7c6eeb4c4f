use map_borders::Border;
use map_core::{LaneId, MapPoint, RoadId};
use map_graph::Connection;
use map_lanes::{Lane, Road, RoadCategory};
use map_quadtree::Boundary;

use crate::{MapBuilder, MapError};

fn straight_border(lane: LaneId, y: f64, x_max: f64) -> Border {
    let points = vec![MapPoint::new(0.0, y, 0.0, lane), MapPoint::new(x_max, y, 0.0, lane)];
    let mut b = Border::new(lane, points);
    b.compute_s_values();
    b.initialize_spline().unwrap();
    b
}

fn straight_lane(id: LaneId, road: RoadId, width: f64, x_max: f64) -> Lane {
    straight_lane_at(id, road, 0.0, width, x_max)
}

fn straight_lane_at(id: LaneId, road: RoadId, y0: f64, width: f64, x_max: f64) -> Lane {
    let inner = straight_border(id, y0, x_max);
    let outer = straight_border(id, y0 + width, x_max);
    let mut lane = Lane::new(id, road, inner, outer, false).unwrap();
    lane.set_type("driving", RoadCategory::Town);
    lane
}

#[test]
fn build_rejects_lane_with_unknown_road() {
    let lane = straight_lane(LaneId(0), RoadId(0), 4.0, 100.0);
    let boundary = Boundary::new(-10.0, 110.0, -10.0, 10.0);
    let err = MapBuilder::new(boundary).add_lane(lane).build().unwrap_err();
    assert!(matches!(err, MapError::UnknownRoad(_)));
}

#[test]
fn get_lane_speed_limit_falls_back_to_default() {
    let lane = straight_lane(LaneId(0), RoadId(0), 4.0, 100.0);
    let road = Road::new(RoadId(0), "Main St".into(), RoadCategory::Town, false);
    let boundary = Boundary::new(-10.0, 110.0, -10.0, 10.0);
    let map = MapBuilder::new(boundary).add_road(road).add_lane(lane).build().unwrap();

    assert!((map.get_lane_speed_limit(LaneId(0)) - 13.89).abs() < 1e-6);
    assert!((map.get_lane_speed_limit(LaneId(99)) - 13.6).abs() < 1e-6);
}

#[test]
fn is_point_on_road_checks_half_width() {
    let lane = straight_lane(LaneId(0), RoadId(0), 4.0, 100.0);
    let road = Road::new(RoadId(0), "Main St".into(), RoadCategory::Town, false);
    let boundary = Boundary::new(-10.0, 110.0, -10.0, 10.0);
    let map = MapBuilder::new(boundary).add_road(road).add_lane(lane).build().unwrap();

    assert!(map.is_point_on_road(50.0, 1.0)); // within half-width (2.0) of the centerline
    assert!(!map.is_point_on_road(50.0, 5.0)); // outside
}

#[test]
fn submap_restricts_lanes_roads_and_graph() {
    let lane_a = straight_lane_at(LaneId(0), RoadId(0), 0.0, 4.0, 100.0);
    let lane_b = straight_lane_at(LaneId(1), RoadId(1), 50.0, 4.0, 100.0);
    let road_a = Road::new(RoadId(0), "A".into(), RoadCategory::Town, false);
    let road_b = Road::new(RoadId(1), "B".into(), RoadCategory::Town, false);
    let boundary = Boundary::new(-10.0, 110.0, -10.0, 60.0);

    let map = MapBuilder::new(boundary)
        .add_road(road_a)
        .add_road(road_b)
        .add_lane(lane_a)
        .add_lane(lane_b)
        .add_connection(Connection { from_id: LaneId(0), to_id: LaneId(1), weight: 1.0 })
        .build()
        .unwrap();

    // Window only around lane A's centerline (y in [0, 4]); lane B sits at y~[50, 54].
    let submap = map.get_submap(10.0, 2.0, 20.0, 8.0);
    assert!(submap.lane(LaneId(0)).is_some());
    assert_eq!(submap.lane_count(), 1);
    assert!(submap.road(RoadId(0)).is_some());
    assert!(submap.road(RoadId(1)).is_none());
}
