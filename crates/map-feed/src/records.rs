//! External record shapes, distinct from the domain types `map-lanes` and
//! `map-borders` build: a `BorderFeed`'s wire format is somebody else's
//! concern, so these mirror the loosely-typed shape an upstream extractor
//! hands over, with fields an `Option` wherever the source is known to omit
//! them on occasion.

use map_core::{LaneId, RoadId};
use map_lanes::RoadCategory;

use crate::error::{FeedError, FeedResult};

/// A reference-line record as handed over by a `BorderFeed`.
#[derive(Debug, Clone, Default)]
pub struct ReferenceLineRecord {
    pub id: Option<u32>,
    pub polyline: Vec<(f64, f64)>,
    pub streetname: Option<String>,
    pub turn: Option<String>,
    pub category: Option<String>,
    pub oneway: Option<String>,
    pub linetype: Option<String>,
    pub successor_id: Option<i64>,
    pub predecessor_id: Option<i64>,
    pub datasource_description_id: Option<i64>,
}

/// A lane-border record as handed over by a `BorderFeed`.
#[derive(Debug, Clone, Default)]
pub struct LaneBorderRecord {
    pub id: Option<u32>,
    pub polyline: Vec<(f64, f64)>,
    pub parent_id: Option<u32>,
    pub material: Option<String>,
    pub linetype: Option<String>,
    pub datasource_description_id: Option<i64>,
}

/// A reference-line record after normalization: required fields validated,
/// missing strings/integers defaulted, coordinates rounded.
#[derive(Debug, Clone)]
pub struct ReferenceLine {
    pub id: RoadId,
    pub polyline: Vec<(f64, f64)>,
    pub streetname: String,
    pub turn: String,
    pub category: RoadCategory,
    pub oneway: bool,
    pub linetype: String,
    pub successor_id: i64,
    pub predecessor_id: i64,
    pub datasource_description_id: i64,
}

/// A lane-border record after normalization.
#[derive(Debug, Clone)]
pub struct LaneBorder {
    pub id: LaneId,
    pub polyline: Vec<(f64, f64)>,
    pub parent_id: RoadId,
    pub material: String,
    pub linetype: String,
    pub datasource_description_id: i64,
}

const NULL: &str = "NULL";

fn round6(v: f64) -> f64 {
    (v * 1_000_000.0).round() / 1_000_000.0
}

fn parse_oneway(raw: Option<&str>) -> bool {
    matches!(raw.map(str::to_ascii_lowercase).as_deref(), Some("true") | Some("1") | Some("yes"))
}

/// Validate and normalize a raw reference-line record.
///
/// Fails if `id` is absent or the polyline is empty; every other field
/// defaults per the feed's normalization rules rather than erroring.
pub fn normalize_reference_line(raw: &ReferenceLineRecord) -> FeedResult<ReferenceLine> {
    let id = raw
        .id
        .ok_or_else(|| FeedError::FeedFormatError("reference line record missing id".into()))?;
    if raw.polyline.is_empty() {
        return Err(FeedError::FeedFormatError(format!(
            "reference line {id} has an empty polyline"
        )));
    }

    Ok(ReferenceLine {
        id: RoadId(id),
        polyline: raw.polyline.iter().map(|&(x, y)| (round6(x), round6(y))).collect(),
        streetname: raw.streetname.clone().unwrap_or_else(|| NULL.into()),
        turn: raw.turn.clone().unwrap_or_else(|| NULL.into()),
        category: RoadCategory::parse(raw.category.as_deref().unwrap_or(NULL)),
        oneway: parse_oneway(raw.oneway.as_deref()),
        linetype: raw.linetype.clone().unwrap_or_else(|| NULL.into()),
        successor_id: raw.successor_id.unwrap_or(0),
        predecessor_id: raw.predecessor_id.unwrap_or(0),
        datasource_description_id: raw.datasource_description_id.unwrap_or(0),
    })
}

/// Validate and normalize a raw lane-border record.
///
/// Fails if `id`, `parent_id` is absent, or the polyline is empty.
pub fn normalize_lane_border(raw: &LaneBorderRecord) -> FeedResult<LaneBorder> {
    let id = raw.id.ok_or_else(|| FeedError::FeedFormatError("lane border record missing id".into()))?;
    let parent_id = raw
        .parent_id
        .ok_or_else(|| FeedError::FeedFormatError(format!("lane border {id} missing parent_id")))?;
    if raw.polyline.is_empty() {
        return Err(FeedError::FeedFormatError(format!("lane border {id} has an empty polyline")));
    }

    Ok(LaneBorder {
        id: LaneId(id),
        polyline: raw.polyline.iter().map(|&(x, y)| (round6(x), round6(y))).collect(),
        parent_id: RoadId(parent_id),
        material: raw.material.clone().unwrap_or_else(|| NULL.into()),
        linetype: raw.linetype.clone().unwrap_or_else(|| NULL.into()),
        datasource_description_id: raw.datasource_description_id.unwrap_or(0),
    })
}
