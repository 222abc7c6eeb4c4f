//! Error type for `map-model`.

use map_core::CoreError;
use map_core::RoadId;
use map_quadtree::QuadtreeError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MapError {
    #[error("core geometry error: {0}")]
    Core(#[from] CoreError),

    #[error("quadtree error: {0}")]
    Quadtree(#[from] QuadtreeError),

    #[error("lane references unknown road {0}")]
    UnknownRoad(RoadId),
}

pub type MapResult<T> = Result<T, MapError>;
