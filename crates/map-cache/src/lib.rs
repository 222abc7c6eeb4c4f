//! A two-level (RAM, disk) LRU cache over externally fetched feature
//! documents, with write-back eviction and shutdown persistence.
//!
//! Independent of the geometry crates — it caches whatever a
//! [`BlobStore`]-backed query returns, not `Map` internals.

mod blob_store;
mod cache;
mod error;
mod recency;


pub use blob_store::{BlobStore, FsBlobStore};
pub use cache::MapCache;
pub use error::{CacheError, CacheResult};
