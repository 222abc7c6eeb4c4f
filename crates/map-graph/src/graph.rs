//! `RoadGraph`: a directed multigraph of lane-to-lane connections, with
//! Dijkstra shortest-path search and induced-subgraph extraction.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use map_core::LaneId;

#[cfg(feature = "fx-hash")]
type Map<K, V> = rustc_hash::FxHashMap<K, V>;
#[cfg(not(feature = "fx-hash"))]
type Map<K, V> = std::collections::HashMap<K, V>;

#[cfg(feature = "fx-hash")]
type Set<K> = rustc_hash::FxHashSet<K>;
#[cfg(not(feature = "fx-hash"))]
type Set<K> = std::collections::HashSet<K>;

/// A directed edge between two lanes, carrying a traversal cost.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Connection {
    pub from_id: LaneId,
    pub to_id: LaneId,
    pub weight: f64,
}

/// `f64` wrapper implementing total ordering via `f64::total_cmp`, so costs
/// can live in a `BinaryHeap` key. Graph weights are never constructed from
/// a computation that can produce NaN (they come from border lengths), so
/// this is a deliberate "NaN never enters the heap" invariant rather than a
/// general-purpose float-ordering shim.
#[derive(Debug, Clone, Copy, PartialEq)]
struct MinF64(f64);

impl Eq for MinF64 {}
impl Ord for MinF64 {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0.total_cmp(&other.0)
    }
}
impl PartialOrd for MinF64 {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// A directed graph over lane ids. At most one `Connection` per ordered
/// pair; `to_successors`/`to_predecessors` always mirror `all_connections`.
#[derive(Debug, Clone, Default)]
pub struct RoadGraph {
    to_successors: Map<LaneId, Vec<LaneId>>,
    to_predecessors: Map<LaneId, Vec<LaneId>>,
    all_connections: Map<(LaneId, LaneId), Connection>,
}

impl RoadGraph {
    pub fn new() -> Self {
        Self {
            to_successors: Map::default(),
            to_predecessors: Map::default(),
            all_connections: Map::default(),
        }
    }

    /// Insert `connection`, mirroring it into successors/predecessors.
    /// Idempotent: re-adding the same `(from_id, to_id)` pair overwrites its
    /// weight rather than duplicating the successor/predecessor entries.
    pub fn add_connection(&mut self, connection: Connection) {
        let key = (connection.from_id, connection.to_id);
        let is_new = !self.all_connections.contains_key(&key);
        self.all_connections.insert(key, connection);

        if is_new {
            self.to_successors.entry(connection.from_id).or_default().push(connection.to_id);
            self.to_predecessors.entry(connection.to_id).or_default().push(connection.from_id);
        }
    }

    pub fn find_connection(&self, from: LaneId, to: LaneId) -> Option<&Connection> {
        self.all_connections.get(&(from, to))
    }

    pub fn successors(&self, lane: LaneId) -> &[LaneId] {
        self.to_successors.get(&lane).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn predecessors(&self, lane: LaneId) -> &[LaneId] {
        self.to_predecessors.get(&lane).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Dijkstra shortest path from `from` to `to`: the lanes visited in
    /// order (including both endpoints), or empty if unreachable. Ties
    /// between equal-cost paths are broken by each lane's successor
    /// insertion order: the heap carries a monotonic push sequence number
    /// as its secondary key, since `LaneId`'s own `Ord` (its inner integer)
    /// has nothing to do with insertion order and would otherwise decide
    /// ties instead.
    pub fn get_best_path(&self, from: LaneId, to: LaneId) -> Vec<LaneId> {
        if from == to {
            return vec![from];
        }

        let mut best: Map<LaneId, f64> = Map::default();
        let mut prev: Map<LaneId, LaneId> = Map::default();
        let mut heap: BinaryHeap<Reverse<(MinF64, u64, LaneId)>> = BinaryHeap::new();
        let mut seq: u64 = 0;

        best.insert(from, 0.0);
        heap.push(Reverse((MinF64(0.0), seq, from)));

        while let Some(Reverse((MinF64(cost), _, node))) = heap.pop() {
            if node == to {
                return reconstruct(&prev, from, to);
            }
            if cost > *best.get(&node).unwrap_or(&f64::INFINITY) {
                continue; // stale heap entry
            }

            for &next in self.successors(node) {
                let Some(conn) = self.find_connection(node, next) else { continue };
                let new_cost = cost + conn.weight;
                if new_cost < *best.get(&next).unwrap_or(&f64::INFINITY) {
                    best.insert(next, new_cost);
                    prev.insert(next, node);
                    seq += 1;
                    heap.push(Reverse((MinF64(new_cost), seq, next)));
                }
            }
        }

        Vec::new()
    }

    /// An induced subgraph: keeps only connections whose endpoints are both
    /// in `lane_ids`.
    pub fn create_subgraph(&self, lane_ids: &[LaneId]) -> RoadGraph {
        let allowed: Set<LaneId> = lane_ids.iter().copied().collect();
        let mut sub = RoadGraph::new();
        for connection in self.all_connections.values() {
            if allowed.contains(&connection.from_id) && allowed.contains(&connection.to_id) {
                sub.add_connection(*connection);
            }
        }
        sub
    }

    pub fn connection_count(&self) -> usize {
        self.all_connections.len()
    }
}

fn reconstruct(prev: &Map<LaneId, LaneId>, from: LaneId, to: LaneId) -> Vec<LaneId> {
    let mut path = vec![to];
    let mut cur = to;
    while cur != from {
        cur = prev[&cur];
        path.push(cur);
    }
    path.reverse();
    path
}
