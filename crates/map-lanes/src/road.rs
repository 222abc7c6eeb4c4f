//! `Road`: a group of lanes sharing a reference line.

use std::collections::HashSet;

use map_core::{LaneId, RoadId};

use crate::types::RoadCategory;

/// A group of lanes sharing one reference line. Each lane belongs to
/// exactly one road, enforced by `Map` (the assembling container), not by
/// `Road` itself.
#[derive(Debug, Clone)]
pub struct Road {
    pub id: RoadId,
    pub name: String,
    pub category: RoadCategory,
    pub one_way: bool,
    lanes: HashSet<LaneId>,
}

impl Road {
    pub fn new(id: RoadId, name: String, category: RoadCategory, one_way: bool) -> Self {
        Self { id, name, category, one_way, lanes: HashSet::new() }
    }

    /// Idempotent: adding the same lane id twice is a no-op.
    pub fn add_lane(&mut self, lane_id: LaneId) {
        self.lanes.insert(lane_id);
    }

    pub fn remove_lane(&mut self, lane_id: LaneId) {
        self.lanes.remove(&lane_id);
    }

    pub fn lanes(&self) -> impl Iterator<Item = &LaneId> {
        self.lanes.iter()
    }

    pub fn lane_count(&self) -> usize {
        self.lanes.len()
    }

    pub fn contains_lane(&self, lane_id: LaneId) -> bool {
        self.lanes.contains(&lane_id)
    }
}
