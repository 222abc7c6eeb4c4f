//! `Lane` and `Road`: paired borders with material/type classification and
//! speed-limit derivation, built on top of `map-borders`.

mod lane;
mod road;
mod types;

#[cfg(test)]
mod tests;

pub use lane::Lane;
pub use road::Road;
pub use types::{LaneType, Material, RoadCategory};
