//! `Map`: the assembled road-map container — quadtree, lanes, roads, and
//! lane graph — built by [`MapBuilder`].
//!
//! # Feature flags
//!
//! | Flag       | Effect                                                         |
//! |------------|------------------------------------------------------------------|
//! | `parallel` | Parallelizes `get_submap`'s per-lane deep-copy with Rayon above a size threshold. |

mod builder;
mod error;
mod map;

#[cfg(test)]
mod tests;

pub use builder::MapBuilder;
pub use error::{MapError, MapResult};
pub use map::Map;
