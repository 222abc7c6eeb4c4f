//! Ingestion driver: turns a `BorderFeed`'s raw records into a populated
//! `MapBuilder`, skipping and logging malformed records rather than
//! aborting (per the propagation policy malformed rows are dropped, the
//! resulting map is still valid over the accepted subset).

use std::collections::HashMap;

use map_borders::Border;
use map_core::{LaneId, MapPoint, RoadId};
use map_lanes::{Lane, Road};
use map_model::MapBuilder;
use map_quadtree::Boundary;

use crate::feed::BorderFeed;
use crate::records::{normalize_lane_border, normalize_reference_line, LaneBorder, ReferenceLine};

/// Normalize and accept every reference line and lane border `feed`
/// exposes, pairing consecutive lane borders under the same reference line
/// into lanes, and accumulate them onto a fresh [`MapBuilder`] over
/// `boundary`.
///
/// Connections between lanes are not inferred from `successor_id`/
/// `predecessor_id` — the feed's reference-line topology doesn't by itself
/// resolve which of a multi-lane road's lanes a successor road continues,
/// so callers with that information add connections with `.add_connection()`
/// on the returned builder before calling `.build()`.
pub fn ingest(feed: &dyn BorderFeed, boundary: Boundary) -> MapBuilder {
    let reference_lines = accept_reference_lines(feed);
    let lane_borders = accept_lane_borders(feed);

    let mut by_road: HashMap<RoadId, Vec<LaneBorder>> = HashMap::new();
    for border in lane_borders {
        by_road.entry(border.parent_id).or_default().push(border);
    }

    let mut builder = MapBuilder::new(boundary);
    let mut next_lane_id: u32 = 0;

    for line in &reference_lines {
        builder = builder.add_road(Road::new(
            line.id,
            line.streetname.clone(),
            line.category,
            line.oneway,
        ));
    }

    for line in &reference_lines {
        let Some(mut borders) = by_road.remove(&line.id) else { continue };
        borders.sort_by_key(|b| b.id.0);

        for pair in borders.windows(2) {
            let (left_raw, right_raw) = (&pair[0], &pair[1]);
            let lane_id = LaneId(next_lane_id);
            next_lane_id += 1;

            let left = to_border(lane_id, left_raw);
            let right = to_border(lane_id, right_raw);

            match Lane::new(lane_id, line.id, left, right, false) {
                Ok(mut lane) => {
                    lane.set_type(&left_raw.linetype, line.category);
                    lane.set_material(&left_raw.material);
                    builder = builder.add_lane(lane);
                }
                Err(e) => {
                    tracing::warn!(lane_id = %lane_id, error = %e, "skipping lane with unusable border geometry");
                }
            }
        }
    }

    builder
}

fn to_border(lane_id: LaneId, raw: &LaneBorder) -> Border {
    let points: Vec<MapPoint> =
        raw.polyline.iter().map(|&(x, y)| MapPoint::new(x, y, 0.0, lane_id)).collect();
    let mut border = Border::new(lane_id, points);
    border.compute_s_values();
    if let Err(e) = border.initialize_spline() {
        tracing::warn!(lane_id = %lane_id, error = %e, "border failed to spline-fit, leaving unfit");
    }
    border
}

fn accept_reference_lines(feed: &dyn BorderFeed) -> Vec<ReferenceLine> {
    feed.reference_lines()
        .iter()
        .filter_map(|raw| match normalize_reference_line(raw) {
            Ok(line) => Some(line),
            Err(e) => {
                tracing::warn!(error = %e, "skipping malformed reference line record");
                None
            }
        })
        .collect()
}

fn accept_lane_borders(feed: &dyn BorderFeed) -> Vec<LaneBorder> {
    feed.lane_borders()
        .iter()
        .filter_map(|raw| match normalize_lane_border(raw) {
            Ok(border) => Some(border),
            Err(e) => {
                tracing::warn!(error = %e, "skipping malformed lane border record");
                None
            }
        })
        .collect()
}
