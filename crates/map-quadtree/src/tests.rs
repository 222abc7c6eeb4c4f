use map_core::{LaneId, MapPoint};

use crate::{Boundary, Quadtree};

fn square(x: f64, y: f64) -> MapPoint {
    MapPoint::new(x, y, 0.0, LaneId(0))
}

#[test]
fn rejects_degenerate_boundary() {
    let boundary = Boundary::new(0.0, 0.0, 0.0, 1.0);
    assert!(Quadtree::<MapPoint>::new(boundary, 4).is_err());
}

#[test]
fn rejects_zero_capacity() {
    let boundary = Boundary::new(0.0, 1.0, 0.0, 1.0);
    assert!(Quadtree::<MapPoint>::new(boundary, 0).is_err());
}

#[test]
fn insert_outside_boundary_is_rejected() {
    let boundary = Boundary::new(0.0, 1.0, 0.0, 1.0);
    let mut qt = Quadtree::new(boundary, 4).unwrap();
    assert!(!qt.insert(square(5.0, 5.0)));
    assert_eq!(qt.len(), 0);
}

/// Four corners of a unit square, capacity 2, forces exactly one subdivision
/// and one point per resulting quadrant.
#[test]
fn four_point_square() {
    let boundary = Boundary::new(-2.0, 2.0, -2.0, 2.0);
    let mut qt = Quadtree::new(boundary, 2).unwrap();

    for p in [square(0.0, 0.0), square(1.0, 0.0), square(1.0, 1.0), square(0.0, 1.0)] {
        assert!(qt.insert(p));
    }
    assert_eq!(qt.len(), 4);
    assert!(qt.is_divided());

    let mut min_dist = f64::INFINITY;
    let nearest = qt.get_nearest_point(0.4, 0.4, &mut min_dist, None).unwrap();
    assert_eq!(nearest, square(0.0, 0.0));

    let range = Boundary::new(0.5, 1.5, 0.5, 1.5);
    let mut hits = Vec::new();
    qt.query(&range, &mut hits);
    assert_eq!(hits, vec![square(1.0, 1.0)]);
}

#[test]
fn query_range_uses_circle_not_bounding_box() {
    let boundary = Boundary::new(-10.0, 10.0, -10.0, 10.0);
    let mut qt = Quadtree::new(boundary, 1).unwrap();
    for p in [square(0.0, 0.0), square(3.0, 0.0), square(0.0, 3.0), square(3.0, 3.0)] {
        qt.insert(p);
    }

    let mut hits = Vec::new();
    qt.query_range(0.0, 0.0, 3.1, &mut hits);
    let mut names: Vec<(i64, i64)> = hits.iter().map(|p| (p.x as i64, p.y as i64)).collect();
    names.sort();
    assert_eq!(names, vec![(0, 0), (0, 3), (3, 0)]);
}

#[test]
fn nearest_point_respects_filter() {
    let boundary = Boundary::new(-10.0, 10.0, -10.0, 10.0);
    let mut qt = Quadtree::new(boundary, 1).unwrap();
    qt.insert(square(0.0, 0.0));
    qt.insert(square(1.0, 0.0));

    let mut min_dist = f64::INFINITY;
    let filter = |p: &MapPoint| p.x > 0.5;
    let nearest = qt.get_nearest_point(0.0, 0.0, &mut min_dist, Some(&filter)).unwrap();
    assert_eq!(nearest, square(1.0, 0.0));
}

#[test]
fn nearest_point_none_when_min_dist_already_tight() {
    let boundary = Boundary::new(-10.0, 10.0, -10.0, 10.0);
    let mut qt = Quadtree::new(boundary, 1).unwrap();
    qt.insert(square(5.0, 5.0));

    let mut min_dist = 1.0; // closest point is at distance sqrt(50) > 1.0
    assert!(qt.get_nearest_point(0.0, 0.0, &mut min_dist, None).is_none());
}

#[test]
fn subdivision_preserves_all_points_under_heavy_overflow() {
    let boundary = Boundary::new(0.0, 100.0, 0.0, 100.0);
    let mut qt = Quadtree::new(boundary, 2).unwrap();
    for i in 0..200 {
        let x = (i as f64 * 0.37) % 100.0;
        let y = (i as f64 * 0.53) % 100.0;
        qt.insert(square(x, y));
    }
    assert_eq!(qt.len(), 200);
}
