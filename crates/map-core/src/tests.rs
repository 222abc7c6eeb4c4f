//! Unit tests for map-core primitives.

#[cfg(test)]
mod ids {
    use crate::{LaneId, RoadId};

    #[test]
    fn index_roundtrip() {
        let id = LaneId(42);
        assert_eq!(id.index(), 42);
    }

    #[test]
    fn ordering() {
        assert!(LaneId(0) < LaneId(1));
        assert!(RoadId(100) > RoadId(99));
    }

    #[test]
    fn invalid_sentinels_are_max() {
        assert_eq!(LaneId::INVALID.0, u32::MAX);
        assert_eq!(RoadId::INVALID.0, u32::MAX);
    }

    #[test]
    fn display() {
        assert_eq!(LaneId(7).to_string(), "LaneId(7)");
    }
}

#[cfg(test)]
mod geo {
    use crate::{distance, point_distance, LaneId, MapPoint, Pose2d};

    #[test]
    fn zero_distance() {
        assert_eq!(distance(1.0, 1.0, 1.0, 1.0), 0.0);
    }

    #[test]
    fn pythagorean_distance() {
        assert!((distance(0.0, 0.0, 3.0, 4.0) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn map_point_equality_ignores_s_and_parent() {
        let a = MapPoint::new(1.0, 2.0, 0.0, LaneId(0));
        let b = MapPoint::new(1.0, 2.0, 99.0, LaneId(7));
        assert_eq!(a, b);
    }

    #[test]
    fn map_point_distance() {
        let a = MapPoint::new(0.0, 0.0, 0.0, LaneId(0));
        let b = MapPoint::new(3.0, 4.0, 0.0, LaneId(0));
        assert!((point_distance(&a, &b) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn max_speed_builder() {
        let p = MapPoint::new(0.0, 0.0, 0.0, LaneId(0)).with_max_speed(13.4);
        assert_eq!(p.max_speed, Some(13.4));
    }

    #[test]
    fn pose_default_is_origin() {
        let pose = Pose2d::default();
        assert_eq!(pose, Pose2d::new(0.0, 0.0, 0.0));
    }
}

#[cfg(test)]
mod spline {
    use crate::{BorderSpline, CoreError};

    #[test]
    fn rejects_single_point() {
        let err = BorderSpline::initialize(&[(0.0, 0.0, 0.0)]).unwrap_err();
        assert!(matches!(err, CoreError::InvalidInput(_)));
    }

    #[test]
    fn rejects_all_duplicates() {
        let pts = [(1.0, 1.0, 0.0), (1.0, 1.0, 0.0000001)];
        let err = BorderSpline::initialize(&pts).unwrap_err();
        assert!(matches!(err, CoreError::InvalidInput(_)));
    }

    #[test]
    fn round_trips_knots() {
        let pts = [(0.0, 0.0, 0.0), (1.0, 2.0, 1.0), (2.0, 0.0, 2.0), (3.0, 3.0, 3.0)];
        let spline = BorderSpline::initialize(&pts).unwrap();
        for &(x, y, s) in &pts {
            let (px, py) = spline.point_at(s);
            assert!((px - x).abs() < 1e-9, "x mismatch at s={s}: {px} vs {x}");
            assert!((py - y).abs() < 1e-9, "y mismatch at s={s}: {py} vs {y}");
        }
    }

    #[test]
    fn clamps_outside_domain() {
        let pts = [(0.0, 0.0, 0.0), (1.0, 1.0, 1.0), (2.0, 0.0, 2.0)];
        let spline = BorderSpline::initialize(&pts).unwrap();
        assert_eq!(spline.point_at(-5.0), spline.point_at(0.0));
        assert_eq!(spline.point_at(50.0), spline.point_at(2.0));
    }

    #[test]
    fn total_length_matches_span() {
        let pts = [(0.0, 0.0, 0.0), (1.0, 1.0, 2.5), (2.0, 0.0, 5.0)];
        let spline = BorderSpline::initialize(&pts).unwrap();
        assert!((spline.total_length() - 5.0).abs() < 1e-9);
    }

    #[test]
    fn straight_line_has_zero_curvature() {
        // Collinear points: natural cubic spline should be exactly linear,
        // so the second derivative is ~0 everywhere.
        let pts = [(0.0, 0.0, 0.0), (1.0, 1.0, 1.0), (2.0, 2.0, 2.0), (3.0, 3.0, 3.0)];
        let spline = BorderSpline::initialize(&pts).unwrap();
        for s in [0.3, 1.1, 2.7] {
            assert!(spline.x_double_prime(s).abs() < 1e-9);
            assert!(spline.y_double_prime(s).abs() < 1e-9);
        }
    }
}
