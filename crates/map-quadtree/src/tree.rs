//! The `Quadtree` itself: a point-bearing adaptive spatial index.
//!
//! # Data layout
//!
//! A node either holds up to `capacity` points directly (a leaf) or has
//! exactly four children partitioning its boundary and holds no points
//! itself. Subdivision happens lazily, the first time an insert would
//! overflow a leaf's capacity: the leaf's own points are redistributed into
//! the four new children before the new point is inserted.
//!
//! # Nearest-neighbor search
//!
//! `get_nearest_point` performs a best-first descent: at each internal node,
//! children are visited in order of their boundary's distance to the query
//! point, and a child is skipped entirely once that distance is no smaller
//! than the best distance found so far. This prunes the search to
//! `O(log n)` expected cost for uniformly distributed points, degrading to
//! `O(n)` only under adversarial input (all points coincident, etc.).

use map_core::MapPoint;

use crate::boundary::Boundary;
use crate::error::{QuadtreeError, QuadtreeResult};

/// A point a `Quadtree` can index: just planar coordinates.
///
/// Implemented for `map_core::MapPoint`; application code can implement it
/// for its own point types too.
pub trait QuadtreePoint: Clone {
    fn x(&self) -> f64;
    fn y(&self) -> f64;
}

impl QuadtreePoint for MapPoint {
    #[inline]
    fn x(&self) -> f64 {
        self.x
    }
    #[inline]
    fn y(&self) -> f64 {
        self.y
    }
}

/// An adaptive, point-bearing quadtree over an axis-aligned boundary.
pub struct Quadtree<T: QuadtreePoint> {
    boundary: Boundary,
    capacity: usize,
    points: Vec<T>,
    children: Option<Box<[Quadtree<T>; 4]>>,
}

impl<T: QuadtreePoint> Quadtree<T> {
    /// Construct an empty quadtree over `boundary` with the given leaf
    /// `capacity`.
    ///
    /// # Errors
    ///
    /// [`QuadtreeError::InvalidInput`] if `boundary` is degenerate
    /// (`x_min >= x_max` or `y_min >= y_max`) or `capacity == 0`.
    pub fn new(boundary: Boundary, capacity: usize) -> QuadtreeResult<Self> {
        if boundary.is_degenerate() {
            return Err(QuadtreeError::InvalidInput("boundary must have positive area".into()));
        }
        if capacity == 0 {
            return Err(QuadtreeError::InvalidInput("capacity must be at least 1".into()));
        }
        Ok(Self { boundary, capacity, points: Vec::new(), children: None })
    }

    pub fn boundary(&self) -> &Boundary {
        &self.boundary
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// `true` once this node has subdivided into four children.
    pub fn is_divided(&self) -> bool {
        self.children.is_some()
    }

    /// Total number of points held anywhere in this subtree.
    pub fn len(&self) -> usize {
        match &self.children {
            Some(children) => children.iter().map(Quadtree::len).sum(),
            None => self.points.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Insert `p`. Returns `false` without mutating the tree if `p` falls
    /// outside this node's boundary.
    pub fn insert(&mut self, p: T) -> bool {
        if !self.boundary.contains(p.x(), p.y()) {
            return false;
        }

        if self.children.is_none() {
            if self.points.len() < self.capacity {
                self.points.push(p);
                return true;
            }
            self.subdivide();
        }

        let children = self.children.as_mut().expect("just subdivided");
        for child in children.iter_mut() {
            if child.insert(p.clone()) {
                return true;
            }
        }
        // Every point lies within `self.boundary`, and the four children's
        // boundaries partition it exactly, so this is unreachable.
        false
    }

    fn subdivide(&mut self) {
        let [nw, ne, sw, se] = self.boundary.subdivide();
        let mut children = Box::new([
            Quadtree::new(nw, self.capacity).expect("child boundary is non-degenerate"),
            Quadtree::new(ne, self.capacity).expect("child boundary is non-degenerate"),
            Quadtree::new(sw, self.capacity).expect("child boundary is non-degenerate"),
            Quadtree::new(se, self.capacity).expect("child boundary is non-degenerate"),
        ]);

        for p in self.points.drain(..) {
            for child in children.iter_mut() {
                if child.insert(p.clone()) {
                    break;
                }
            }
        }

        self.children = Some(children);
    }

    /// Append every point in this subtree that lies within `range` to
    /// `out`, in NW, NE, SW, SE depth-first traversal order.
    pub fn query(&self, range: &Boundary, out: &mut Vec<T>) {
        if !self.boundary.intersects_rect(range) {
            return;
        }
        match &self.children {
            Some(children) => {
                for child in children.iter() {
                    child.query(range, out);
                }
            }
            None => {
                for p in &self.points {
                    if range.contains(p.x(), p.y()) {
                        out.push(p.clone());
                    }
                }
            }
        }
    }

    /// Append every point within `radius` of `(cx, cy)` to `out`, in the
    /// same traversal order as [`query`](Self::query).
    pub fn query_range(&self, cx: f64, cy: f64, radius: f64, out: &mut Vec<T>) {
        if !self.boundary.intersects_circle(cx, cy, radius) {
            return;
        }
        match &self.children {
            Some(children) => {
                for child in children.iter() {
                    child.query_range(cx, cy, radius, out);
                }
            }
            None => {
                let r2 = radius * radius;
                for p in &self.points {
                    let dx = p.x() - cx;
                    let dy = p.y() - cy;
                    if dx * dx + dy * dy <= r2 {
                        out.push(p.clone());
                    }
                }
            }
        }
    }

    /// Find the nearest point to `(qx, qy)` satisfying `filter` (if given),
    /// strictly closer than `*min_dist`.
    ///
    /// `*min_dist` is both an input (the caller's initial bound — pass
    /// `f64::INFINITY` for an unconstrained search) and an output (updated
    /// to the distance of the returned point, if any). Ties are broken by
    /// insertion order: among equidistant candidates, the one inserted
    /// first is returned.
    pub fn get_nearest_point(
        &self,
        qx: f64,
        qy: f64,
        min_dist: &mut f64,
        filter: Option<&dyn Fn(&T) -> bool>,
    ) -> Option<T> {
        let mut best: Option<T> = None;
        self.nearest_recursive(qx, qy, min_dist, &mut best, filter);
        best
    }

    fn nearest_recursive(
        &self,
        qx: f64,
        qy: f64,
        min_dist: &mut f64,
        best: &mut Option<T>,
        filter: Option<&dyn Fn(&T) -> bool>,
    ) {
        if self.boundary.distance_to_point(qx, qy) >= *min_dist {
            return;
        }

        match &self.children {
            Some(children) => {
                let mut order: Vec<(f64, usize)> = children
                    .iter()
                    .enumerate()
                    .map(|(i, c)| (c.boundary.distance_to_point(qx, qy), i))
                    .collect();
                order.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap());

                for (d, idx) in order {
                    if d >= *min_dist {
                        break; // remaining children are only farther
                    }
                    children[idx].nearest_recursive(qx, qy, min_dist, best, filter);
                }
            }
            None => {
                for p in &self.points {
                    if let Some(f) = filter {
                        if !f(p) {
                            continue;
                        }
                    }
                    let dx = p.x() - qx;
                    let dy = p.y() - qy;
                    let d = (dx * dx + dy * dy).sqrt();
                    if d < *min_dist {
                        *min_dist = d;
                        *best = Some(p.clone());
                    }
                }
            }
        }
    }
}
