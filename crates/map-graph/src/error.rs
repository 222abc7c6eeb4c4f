//! Error type for `map-graph`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GraphError {
    #[error("no path between the given lanes")]
    NotFound,
}

pub type GraphResult<T> = Result<T, GraphError>;
