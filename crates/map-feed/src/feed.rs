//! The `BorderFeed` trait: the external collaborator this crate adapts.

use crate::records::{LaneBorderRecord, ReferenceLineRecord};

/// Supplies raw reference-line and lane-border records in a projected
/// metric frame.
///
/// The wire format (file, HTTP call, database query) is entirely the
/// implementor's concern — `map-feed` only normalizes and ingests whatever
/// records come back.
pub trait BorderFeed {
    fn reference_lines(&self) -> Vec<ReferenceLineRecord>;
    fn lane_borders(&self) -> Vec<LaneBorderRecord>;
}
