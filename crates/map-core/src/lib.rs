//! `map-core` — foundational types for the road-map core library.
//!
//! This crate is a dependency of every other `map-*` crate. It intentionally
//! has no `map-*` dependencies and minimal external ones (only `thiserror`,
//! plus optional `serde`).
//!
//! # What lives here
//!
//! | Module     | Contents                                         |
//! |------------|---------------------------------------------------|
//! | [`ids`]    | `LaneId`, `RoadId`                                |
//! | [`geo`]    | `MapPoint`, `Pose2d`, planar distance             |
//! | [`spline`] | `BorderSpline` — natural cubic spline over s       |
//! | [`error`]  | `CoreError`, `CoreResult`                          |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                |
//! |---------|--------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to public value types.  |

pub mod error;
pub mod geo;
pub mod ids;
pub mod spline;

#[cfg(test)]
mod tests;

pub use error::{CoreError, CoreResult};
pub use geo::{distance, point_distance, MapPoint, Pose2d};
pub use ids::{LaneId, RoadId};
pub use spline::BorderSpline;

/// Default arc-length spacing (meters) used to resample border splines into
/// interpolated points, per the road-map spec. Shared by `map-borders` and
/// `map-lanes` so the constant is defined once.
pub const DEFAULT_INTERPOLATION_SPACING_M: f64 = 0.5;

/// Default leaf capacity for a `Quadtree` node before it subdivides.
pub const DEFAULT_QUADTREE_CAPACITY: usize = 10;

/// Speed limit (m/s) returned for a lane whose lookup key is unknown to the
/// map, per the road-map spec's `Map::get_lane_speed_limit` fallback.
pub const DEFAULT_UNKNOWN_LANE_SPEED_MPS: f64 = 13.6;
