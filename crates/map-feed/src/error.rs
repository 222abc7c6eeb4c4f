//! Error type for `map-feed`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("feed record format error: {0}")]
    FeedFormatError(String),
}

pub type FeedResult<T> = Result<T, FeedError>;
