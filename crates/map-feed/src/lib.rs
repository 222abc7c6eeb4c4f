//! Adapts external `BorderFeed` records (reference lines, lane borders)
//! into `map-lanes`/`map-borders` domain types and a populated
//! [`map_model::MapBuilder`], skipping malformed records rather than
//! aborting ingestion.

mod error;
mod feed;
mod ingest;
mod records;

#[cfg(test)]
mod tests;

pub use error::{FeedError, FeedResult};
pub use feed::BorderFeed;
pub use ingest::ingest;
pub use records::{
    normalize_lane_border, normalize_reference_line, LaneBorder, LaneBorderRecord, ReferenceLine,
    ReferenceLineRecord,
};
