//! Error type for `map-quadtree`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum QuadtreeError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

pub type QuadtreeResult<T> = Result<T, QuadtreeError>;
