//! Error type for `map-route`.

use map_core::CoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RouteError {
    #[error("no path between the route's start and destination lanes")]
    NotFound,

    #[error("core geometry error: {0}")]
    Core(#[from] CoreError),
}

pub type RouteResult<T> = Result<T, RouteError>;
