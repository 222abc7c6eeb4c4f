use map_borders::Border;
use map_core::{LaneId, MapPoint, RoadId};

use crate::types::RoadCategory;
use crate::{Lane, LaneType, Material, Road};

fn straight_border(lane: LaneId, y: f64, x_max: f64) -> Border {
    let points = vec![MapPoint::new(0.0, y, 0.0, lane), MapPoint::new(x_max, y, 0.0, lane)];
    let mut b = Border::new(lane, points);
    b.compute_s_values();
    b.initialize_spline().unwrap();
    b
}

#[test]
fn width_scenario_matches_spec() {
    let lane_id = LaneId(0);
    let inner = straight_border(lane_id, 0.0, 100.0);
    let outer = straight_border(lane_id, 4.0, 100.0);

    let mut lane = Lane::new(lane_id, RoadId(0), inner, outer, false).unwrap();
    lane.interpolate_borders(0.5).unwrap();

    assert!((lane.get_width(50.0) - 4.0).abs() < 1e-6);
}

#[test]
fn left_of_reference_swaps_inner_and_outer() {
    let lane_id = LaneId(1);
    let left = straight_border(lane_id, 4.0, 10.0);
    let right = straight_border(lane_id, 0.0, 10.0);

    let lane_false = Lane::new(lane_id, RoadId(0), left.clone(), right.clone(), false).unwrap();
    assert_eq!(lane_false.borders.inner.points[0].y, 4.0);

    let lane_true = Lane::new(lane_id, RoadId(0), left, right, true).unwrap();
    assert_eq!(lane_true.borders.inner.points[0].y, 0.0);
}

#[test]
fn get_width_clamps_outside_domain() {
    let lane_id = LaneId(2);
    let inner = straight_border(lane_id, 0.0, 20.0);
    let outer = straight_border(lane_id, 3.0, 20.0);
    let mut lane = Lane::new(lane_id, RoadId(0), inner, outer, false).unwrap();
    lane.interpolate_borders(1.0).unwrap();

    assert!((lane.get_width(-5.0) - 3.0).abs() < 1e-6);
    assert!((lane.get_width(1000.0) - 3.0).abs() < 1e-6);
}

#[test]
fn set_type_driving_uses_road_category() {
    let lane_id = LaneId(3);
    let inner = straight_border(lane_id, 0.0, 10.0);
    let outer = straight_border(lane_id, 3.0, 10.0);
    let mut lane = Lane::new(lane_id, RoadId(0), inner, outer, false).unwrap();

    lane.set_type("driving", RoadCategory::Motorway);
    assert_eq!(lane.lane_type, LaneType::Driving);
    assert!((lane.speed_limit - 36.11).abs() < 1e-6);
}

#[test]
fn set_type_aliases_normalize() {
    let lane_id = LaneId(4);
    let inner = straight_border(lane_id, 0.0, 10.0);
    let outer = straight_border(lane_id, 3.0, 10.0);
    let mut lane = Lane::new(lane_id, RoadId(0), inner, outer, false).unwrap();

    lane.set_type("walking", RoadCategory::Town);
    assert_eq!(lane.lane_type, LaneType::Sidewalk);
    assert!((lane.speed_limit - 1.39).abs() < 1e-6);

    lane.set_type("Bicycle", RoadCategory::Town);
    assert_eq!(lane.lane_type, LaneType::Biking);
    assert!((lane.speed_limit - 6.94).abs() < 1e-6);
}

#[test]
fn set_type_unknown_falls_back_to_none_default() {
    let lane_id = LaneId(5);
    let inner = straight_border(lane_id, 0.0, 10.0);
    let outer = straight_border(lane_id, 3.0, 10.0);
    let mut lane = Lane::new(lane_id, RoadId(0), inner, outer, false).unwrap();

    lane.set_type("roundabout-marking", RoadCategory::Town);
    assert!((lane.speed_limit - 2.00).abs() < 1e-6);
}

#[test]
fn set_material_unknown_falls_back_to_asphalt() {
    let lane_id = LaneId(6);
    let inner = straight_border(lane_id, 0.0, 10.0);
    let outer = straight_border(lane_id, 3.0, 10.0);
    let mut lane = Lane::new(lane_id, RoadId(0), inner, outer, false).unwrap();

    lane.set_material("moss");
    assert_eq!(lane.material, Material::Asphalt);

    lane.set_material("cobble");
    assert_eq!(lane.material, Material::Cobble);
}

#[test]
fn road_lane_membership_is_idempotent() {
    let mut road = Road::new(RoadId(0), "Main St".into(), RoadCategory::Town, false);
    road.add_lane(LaneId(0));
    road.add_lane(LaneId(0));
    road.add_lane(LaneId(1));
    assert_eq!(road.lane_count(), 2);
    assert!(road.contains_lane(LaneId(0)));
}
