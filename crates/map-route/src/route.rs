//! `Route`: an ordered traversal over a `Map`'s lanes along the shortest
//! path between two points, with arc-length projection and interpolation.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use map_core::{distance, LaneId, MapPoint, Pose2d};
use map_model::Map;

use crate::section::RouteSection;

/// An ordered traversal over lanes from a start point to a destination,
/// following the shortest path in the map's lane graph.
///
/// Shares its underlying [`Map`] (multiple routes may coexist against one
/// immutable map) rather than owning a copy.
pub struct Route {
    map: Arc<Map>,
    pub start: MapPoint,
    pub destination: MapPoint,
    sections: VecDeque<RouteSection>,
    lane_to_sections: HashMap<LaneId, usize>,
    /// `(route_s at section start, section index)`, sorted ascending.
    s_to_sections: Vec<(f64, usize)>,
    /// `(route_s, point)` samples along the route's center polyline,
    /// strictly ascending in `route_s`.
    center_lane: Vec<(f64, MapPoint)>,
}

impl Route {
    /// Build a route from `(start_x, start_y)` to `(end_x, end_y)` over
    /// `map`. If either point has no nearby quadtree sample, or no path
    /// connects their lanes, the route is empty (not an error) — callers
    /// check [`Route::is_empty`].
    pub fn new(map: Arc<Map>, start_x: f64, start_y: f64, end_x: f64, end_y: f64) -> Route {
        let mut start_dist = f64::INFINITY;
        let nearest_start = map.quadtree().get_nearest_point(start_x, start_y, &mut start_dist, None);

        let mut end_dist = f64::INFINITY;
        let nearest_end = map.quadtree().get_nearest_point(end_x, end_y, &mut end_dist, None);

        let (Some(nearest_start), Some(nearest_end)) = (nearest_start, nearest_end) else {
            return Route::empty(map, start_x, start_y, end_x, end_y);
        };

        let path = map.lane_graph().get_best_path(nearest_start.parent_id, nearest_end.parent_id);
        if path.is_empty() {
            return Route::empty(map, start_x, start_y, end_x, end_y);
        }

        let sections = build_sections(&map, &path, &nearest_start, &nearest_end);
        let (lane_to_sections, s_to_sections, center_lane) = index_sections(&map, &sections);

        Route {
            map,
            start: nearest_start,
            destination: nearest_end,
            sections,
            lane_to_sections,
            s_to_sections,
            center_lane,
        }
    }

    fn empty(map: Arc<Map>, start_x: f64, start_y: f64, end_x: f64, end_y: f64) -> Route {
        Route {
            start: MapPoint::new(start_x, start_y, 0.0, LaneId::INVALID),
            destination: MapPoint::new(end_x, end_y, 0.0, LaneId::INVALID),
            map,
            sections: VecDeque::new(),
            lane_to_sections: HashMap::new(),
            s_to_sections: Vec::new(),
            center_lane: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn sections(&self) -> &VecDeque<RouteSection> {
        &self.sections
    }

    pub fn lane_to_sections(&self) -> &HashMap<LaneId, usize> {
        &self.lane_to_sections
    }

    /// Total arc-length of the route, meters.
    pub fn length(&self) -> f64 {
        self.sections.back().map(RouteSection::route_s_end).unwrap_or(0.0)
    }

    /// The nearest route arc-length to `(x, y)`, restricted to points on
    /// lanes this route actually traverses. `f64::INFINITY` if the route is
    /// empty or no such point exists.
    pub fn get_s(&self, x: f64, y: f64) -> f64 {
        if self.lane_to_sections.is_empty() {
            return f64::INFINITY;
        }
        let filter = |p: &MapPoint| self.lane_to_sections.contains_key(&p.parent_id);
        let mut min_dist = f64::INFINITY;
        let Some(nearest) =
            self.map.quadtree().get_nearest_point(x, y, &mut min_dist, Some(&filter))
        else {
            return f64::INFINITY;
        };
        let idx = self.lane_to_sections[&nearest.parent_id];
        self.sections[idx].local_to_route_s(nearest.s)
    }

    /// Position and heading at route arc-length `distance`, linearly
    /// interpolated between the two bracketing `center_lane` samples. Yaw
    /// is `atan2(dy, dx)` of the bracketing segment, or `0.0` if the route
    /// has fewer than two samples or the segment is degenerate.
    pub fn interpolate_at_s(&self, distance: f64) -> Option<Pose2d> {
        if self.center_lane.is_empty() {
            return None;
        }
        if self.center_lane.len() == 1 {
            let p = self.center_lane[0].1;
            return Some(Pose2d::new(p.x, p.y, 0.0));
        }

        let last = self.center_lane.len() - 1;
        let clamped = distance.clamp(self.center_lane[0].0, self.center_lane[last].0);

        let idx = match self
            .center_lane
            .binary_search_by(|(s, _)| s.partial_cmp(&clamped).unwrap())
        {
            Ok(i) => i.min(last - 1),
            Err(i) => (i.max(1) - 1).min(last - 1),
        };

        let (s0, a) = self.center_lane[idx];
        let (s1, b) = self.center_lane[idx + 1];
        let t = if (s1 - s0).abs() > 1e-12 { (clamped - s0) / (s1 - s0) } else { 0.0 };
        let x = a.x + t * (b.x - a.x);
        let y = a.y + t * (b.y - a.y);

        let dx = b.x - a.x;
        let dy = b.y - a.y;
        let yaw = if dx.abs() > 1e-12 || dy.abs() > 1e-12 { dy.atan2(dx) } else { 0.0 };

        Some(Pose2d::new(x, y, yaw))
    }

    /// The route's center-line point at arc-length `s` (no heading).
    pub fn get_map_point_at_s(&self, s: f64) -> Option<MapPoint> {
        let pose = self.interpolate_at_s(s)?;
        let lane_id = self.lane_at_route_s(s).unwrap_or(LaneId::INVALID);
        Some(MapPoint::new(pose.x, pose.y, s, lane_id))
    }

    /// The route's pose (position + heading) at arc-length `s`.
    pub fn get_pose_at_s(&self, s: f64) -> Option<Pose2d> {
        self.interpolate_at_s(s)
    }

    fn lane_at_route_s(&self, s: f64) -> Option<LaneId> {
        if self.s_to_sections.is_empty() {
            return None;
        }
        let last = self.s_to_sections.len() - 1;
        let idx = match self
            .s_to_sections
            .binary_search_by(|(route_s, _)| route_s.partial_cmp(&s).unwrap())
        {
            Ok(i) => i,
            Err(0) => 0,
            Err(i) => (i - 1).min(last),
        };
        let section_idx = self.s_to_sections[idx].1;
        Some(self.sections[section_idx].lane_id)
    }

    /// A new route covering `[start_s, start_s + desired_length]` of this
    /// one, re-based so the shortened route's own arc-length starts at
    /// zero. Sections outside the window are dropped; boundary sections
    /// are clipped.
    pub fn get_shortened_route(&self, start_s: f64, desired_length: f64) -> Route {
        let window_end = start_s + desired_length;
        let mut sections = VecDeque::new();

        for section in &self.sections {
            let sec_end = section.route_s_end();
            if sec_end <= start_s || section.route_s >= window_end {
                continue;
            }
            let clip_lo = start_s.max(section.route_s);
            let clip_hi = window_end.min(sec_end);
            if clip_hi <= clip_lo {
                continue;
            }

            let span = section.end_s - section.start_s;
            let sec_len = section.length().max(1e-12);
            let t_lo = (clip_lo - section.route_s) / sec_len;
            let t_hi = (clip_hi - section.route_s) / sec_len;

            sections.push_back(RouteSection {
                lane_id: section.lane_id,
                route_s: clip_lo - start_s,
                start_s: section.start_s + t_lo * span,
                end_s: section.start_s + t_hi * span,
            });
        }

        let map = Arc::clone(&self.map);
        let (lane_to_sections, s_to_sections, center_lane) = index_sections(&map, &sections);
        let start = self.get_map_point_at_s(start_s).unwrap_or(self.start);
        let destination = self.get_map_point_at_s(window_end).unwrap_or(self.destination);

        Route { map, start, destination, sections, lane_to_sections, s_to_sections, center_lane }
    }
}

/// Build `RouteSection`s for each lane along `path`, applying the first/
/// last/intermediate/same-lane rules.
fn build_sections(
    map: &Map,
    path: &[LaneId],
    nearest_start: &MapPoint,
    nearest_end: &MapPoint,
) -> VecDeque<RouteSection> {
    let mut sections = VecDeque::new();
    let mut route_s_cursor = 0.0;
    let last_idx = path.len() - 1;

    for (i, &lane_id) in path.iter().enumerate() {
        let Some(lane) = map.lane(lane_id) else { continue };
        let is_first = i == 0;
        let is_last = i == last_idx;
        let forward = !lane.left_of_reference;

        let (start_s, end_s) = if is_first && is_last {
            let lo = nearest_start.s.min(nearest_end.s);
            let hi = nearest_start.s.max(nearest_end.s);
            if nearest_start.s > nearest_end.s { (hi, lo) } else { (lo, hi) }
        } else if is_first {
            let far_end = if forward { lane.length } else { 0.0 };
            (nearest_start.s, far_end)
        } else if is_last {
            let near_end = if forward { 0.0 } else { lane.length };
            (near_end, nearest_end.s)
        } else if forward {
            (0.0, lane.length)
        } else {
            (lane.length, 0.0)
        };

        let section = RouteSection { lane_id, route_s: route_s_cursor, start_s, end_s };
        route_s_cursor += section.length();
        sections.push_back(section);
    }

    sections
}

/// Rebuild `lane_to_sections`, `s_to_sections`, and `center_lane` from a
/// finished section list.
fn index_sections(
    map: &Map,
    sections: &VecDeque<RouteSection>,
) -> (HashMap<LaneId, usize>, Vec<(f64, usize)>, Vec<(f64, MapPoint)>) {
    let mut lane_to_sections = HashMap::new();
    let mut s_to_sections = Vec::with_capacity(sections.len());
    let mut center_lane: Vec<(f64, MapPoint)> = Vec::new();

    for (idx, section) in sections.iter().enumerate() {
        lane_to_sections.insert(section.lane_id, idx);
        s_to_sections.push((section.route_s, idx));

        let Some(lane) = map.lane(section.lane_id) else { continue };
        let lo = section.start_s.min(section.end_s);
        let hi = section.start_s.max(section.end_s);

        let mut samples: Vec<&MapPoint> = lane
            .borders
            .center
            .interpolated_points
            .iter()
            .filter(|p| p.s >= lo - 1e-9 && p.s <= hi + 1e-9)
            .collect();
        samples.sort_by(|a, b| a.s.partial_cmp(&b.s).unwrap());
        if section.is_reversed() {
            samples.reverse();
        }

        for p in samples {
            let route_s = section.local_to_route_s(p.s);
            if let Some(&(last_s, _)) = center_lane.last() {
                if (route_s - last_s).abs() < 1e-9 {
                    continue;
                }
            }
            center_lane.push((route_s, MapPoint::new(p.x, p.y, route_s, section.lane_id)));
        }
    }

    (lane_to_sections, s_to_sections, center_lane)
}

/// Euclidean distance helper re-exported for downstream callers that want
/// to sanity-check projected points against the original query.
pub fn projection_error(route: &Route, s: f64, query_x: f64, query_y: f64) -> Option<f64> {
    let p = route.get_map_point_at_s(s)?;
    Some(distance(p.x, p.y, query_x, query_y))
}
