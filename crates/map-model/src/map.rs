//! `Map`: the assembled quadtree + lanes + roads + lane graph container.

use std::collections::HashMap;

use map_core::{LaneId, MapPoint, RoadId, DEFAULT_UNKNOWN_LANE_SPEED_MPS};
use map_graph::RoadGraph;
use map_lanes::{Lane, Road};
use map_quadtree::{Boundary, Quadtree};

/// The assembled, immutable map: lanes, roads, a spatial index over lane
/// center points, and a lane-to-lane connectivity graph.
///
/// Owns its lanes and roads by id (arena+index), not by reference-counted
/// pointer — `Route`s and submaps hold `LaneId`s, never `Lane` references,
/// avoiding ownership cycles.
pub struct Map {
    pub(crate) lanes: HashMap<LaneId, Lane>,
    pub(crate) roads: HashMap<RoadId, Road>,
    pub(crate) quadtree: Quadtree<MapPoint>,
    pub(crate) lane_graph: RoadGraph,
}

impl Map {
    pub fn lane(&self, id: LaneId) -> Option<&Lane> {
        self.lanes.get(&id)
    }

    pub fn road(&self, id: RoadId) -> Option<&Road> {
        self.roads.get(&id)
    }

    pub fn quadtree(&self) -> &Quadtree<MapPoint> {
        &self.quadtree
    }

    pub fn lane_graph(&self) -> &RoadGraph {
        &self.lane_graph
    }

    pub fn lane_count(&self) -> usize {
        self.lanes.len()
    }

    /// The lane's speed limit, or [`DEFAULT_UNKNOWN_LANE_SPEED_MPS`] if the
    /// lane id is unknown to this map.
    pub fn get_lane_speed_limit(&self, id: LaneId) -> f64 {
        self.lanes.get(&id).map(|l| l.speed_limit).unwrap_or(DEFAULT_UNKNOWN_LANE_SPEED_MPS)
    }

    /// `true` iff the nearest quadtree point exists and lies within half
    /// the width of its lane at that point's local arc-length.
    pub fn is_point_on_road(&self, x: f64, y: f64) -> bool {
        let mut min_dist = f64::INFINITY;
        let Some(nearest) = self.quadtree.get_nearest_point(x, y, &mut min_dist, None) else {
            return false;
        };
        let Some(lane) = self.lanes.get(&nearest.parent_id) else { return false };
        min_dist < lane.get_width(nearest.s) / 2.0
    }

    /// Extract a submap: lanes whose center samples fall within the window
    /// centered at `(center_x, center_y)` with the given `width`/`height`,
    /// deep-copied along with their roads (each road keeps only the copied
    /// lanes), a rebuilt quadtree seeded from just those lanes' center
    /// points, and the induced lane graph over those lanes.
    pub fn get_submap(&self, center_x: f64, center_y: f64, width: f64, height: f64) -> Map {
        let range = Boundary::new(
            center_x - width / 2.0,
            center_x + width / 2.0,
            center_y - height / 2.0,
            center_y + height / 2.0,
        );
        let mut hits = Vec::new();
        self.quadtree.query(&range, &mut hits);

        let mut lane_ids: Vec<LaneId> = hits.iter().map(|p| p.parent_id).collect();
        lane_ids.sort();
        lane_ids.dedup();

        let copied_lanes = collect_lanes(&self.lanes, &lane_ids);

        let mut roads: HashMap<RoadId, Road> = HashMap::new();
        for lane in &copied_lanes {
            let road = roads.entry(lane.road_id).or_insert_with(|| {
                let src = &self.roads[&lane.road_id];
                Road::new(src.id, src.name.clone(), src.category, src.one_way)
            });
            road.add_lane(lane.id);
        }

        let mut quadtree = Quadtree::new(*self.quadtree.boundary(), self.quadtree.capacity())
            .expect("the original quadtree's boundary was already valid");
        for lane in &copied_lanes {
            for &p in &lane.borders.center.interpolated_points {
                quadtree.insert(p);
            }
        }

        let lane_graph = self.lane_graph.create_subgraph(&lane_ids);
        let lanes: HashMap<LaneId, Lane> = copied_lanes.into_iter().map(|l| (l.id, l)).collect();

        Map { lanes, roads, quadtree, lane_graph }
    }
}

/// Threshold above which submap lane extraction parallelizes the deep-copy
/// step with Rayon (when the `parallel` feature is enabled).
const PARALLEL_LANE_COPY_THRESHOLD: usize = 64;

#[cfg(feature = "parallel")]
fn collect_lanes(lanes: &HashMap<LaneId, Lane>, ids: &[LaneId]) -> Vec<Lane> {
    use rayon::prelude::*;

    if ids.len() >= PARALLEL_LANE_COPY_THRESHOLD {
        ids.par_iter().filter_map(|id| lanes.get(id).cloned()).collect()
    } else {
        ids.iter().filter_map(|id| lanes.get(id).cloned()).collect()
    }
}

#[cfg(not(feature = "parallel"))]
fn collect_lanes(lanes: &HashMap<LaneId, Lane>, ids: &[LaneId]) -> Vec<Lane> {
    ids.iter().filter_map(|id| lanes.get(id).cloned()).collect()
}
