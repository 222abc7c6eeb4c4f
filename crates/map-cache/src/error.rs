//! Error type for `map-cache`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("key not present in cache")]
    NotFound,

    #[error("cache I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("cache blob (de)serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type CacheResult<T> = Result<T, CacheError>;
