//! Adaptive point-bearing quadtree spatial index.
//!
//! Provides range queries (`query`, `query_range`) and predicate-filtered
//! nearest-neighbor search (`get_nearest_point`) over planar points, used to
//! locate the lane/road nearest an arbitrary query position.

mod boundary;
mod error;
mod tree;

#[cfg(test)]
mod tests;

pub use boundary::Boundary;
pub use error::{QuadtreeError, QuadtreeResult};
pub use tree::{Quadtree, QuadtreePoint};
