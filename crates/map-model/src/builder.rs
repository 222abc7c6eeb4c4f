//! Fluent builder for constructing a [`Map`].

use std::collections::HashMap;

use map_core::{LaneId, RoadId, DEFAULT_INTERPOLATION_SPACING_M, DEFAULT_QUADTREE_CAPACITY};
use map_graph::{Connection, RoadGraph};
use map_lanes::{Lane, Road};
use map_quadtree::{Boundary, Quadtree};

use crate::error::{MapError, MapResult};
use crate::map::Map;

/// Fluent builder for [`Map`].
///
/// # Required input
///
/// - the quadtree's spatial [`Boundary`] — there's no sane default for the
///   extent of a particular map, so it's a constructor argument.
///
/// # Optional inputs (have defaults)
///
/// | Method            | Default                               |
/// |-------------------|-----------------------------------------|
/// | `.with_capacity()`| [`DEFAULT_QUADTREE_CAPACITY`] (10)       |
/// | `.with_spacing()` | [`DEFAULT_INTERPOLATION_SPACING_M`] (0.5)|
///
/// Lanes, roads, and connections are accumulated with `.add_lane()`,
/// `.add_road()`, and `.add_connection()` before calling `.build()`.
pub struct MapBuilder {
    boundary: Boundary,
    capacity: usize,
    spacing: f64,
    lanes: Vec<Lane>,
    roads: HashMap<RoadId, Road>,
    connections: Vec<Connection>,
}

impl MapBuilder {
    pub fn new(boundary: Boundary) -> Self {
        Self {
            boundary,
            capacity: DEFAULT_QUADTREE_CAPACITY,
            spacing: DEFAULT_INTERPOLATION_SPACING_M,
            lanes: Vec::new(),
            roads: HashMap::new(),
            connections: Vec::new(),
        }
    }

    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn with_spacing(mut self, spacing: f64) -> Self {
        self.spacing = spacing;
        self
    }

    pub fn add_road(mut self, road: Road) -> Self {
        self.roads.insert(road.id, road);
        self
    }

    /// Add a lane. If its borders haven't been interpolated yet (empty
    /// `center.interpolated_points`), `build()` resamples them at the
    /// builder's spacing.
    pub fn add_lane(mut self, lane: Lane) -> Self {
        self.lanes.push(lane);
        self
    }

    pub fn add_connection(mut self, connection: Connection) -> Self {
        self.connections.push(connection);
        self
    }

    /// Resample any not-yet-interpolated lanes, populate the quadtree with
    /// lane center points, fold every lane into its road, build the lane
    /// graph from the accumulated connections, and return the assembled
    /// [`Map`].
    ///
    /// # Errors
    ///
    /// [`MapError::UnknownRoad`] if a lane names a `road_id` with no
    /// matching `.add_road()` call. [`MapError::Core`] if a lane's borders
    /// fail to interpolate (degenerate geometry).
    pub fn build(self) -> MapResult<Map> {
        let mut lanes = self.lanes;
        for lane in &mut lanes {
            if lane.borders.center.interpolated_points.is_empty() {
                lane.interpolate_borders(self.spacing)?;
            }
        }

        let mut roads = self.roads;
        for lane in &lanes {
            let road = roads.get_mut(&lane.road_id).ok_or(MapError::UnknownRoad(lane.road_id))?;
            road.add_lane(lane.id);
        }

        let mut quadtree = Quadtree::new(self.boundary, self.capacity)?;
        for lane in &lanes {
            for &p in &lane.borders.center.interpolated_points {
                quadtree.insert(p);
            }
        }

        let mut lane_graph = RoadGraph::new();
        for connection in self.connections {
            lane_graph.add_connection(connection);
        }

        let lanes: HashMap<LaneId, _> = lanes.into_iter().map(|l| (l.id, l)).collect();

        Ok(Map { lanes, roads, quadtree, lane_graph })
    }
}
