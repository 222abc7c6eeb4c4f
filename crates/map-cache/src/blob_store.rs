//! The `BlobStore` trait implemented by all cache backends.

use crate::error::CacheResult;

/// Byte-blob persistence backing a [`crate::MapCache`]'s disk level.
///
/// Implementations need not be concurrency-safe themselves — `MapCache`
/// serializes every call under its own mutex.
pub trait BlobStore {
    fn save(&self, key: &str, bytes: &[u8]) -> CacheResult<()>;
    fn load(&self, key: &str) -> CacheResult<Vec<u8>>;
    fn remove(&self, key: &str) -> CacheResult<()>;
}

/// Plain `std::fs` backed [`BlobStore`], rooted at a directory.
///
/// The default, always-available backend — applications with a remote or
/// object-store backing supply their own `BlobStore` impl instead.
pub struct FsBlobStore {
    dir: std::path::PathBuf,
}

impl FsBlobStore {
    /// Create the store, ensuring `dir` exists.
    pub fn new(dir: impl Into<std::path::PathBuf>) -> CacheResult<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn path_for(&self, key: &str) -> std::path::PathBuf {
        self.dir.join(key)
    }
}

impl BlobStore for FsBlobStore {
    fn save(&self, key: &str, bytes: &[u8]) -> CacheResult<()> {
        std::fs::write(self.path_for(key), bytes)?;
        Ok(())
    }

    fn load(&self, key: &str) -> CacheResult<Vec<u8>> {
        Ok(std::fs::read(self.path_for(key))?)
    }

    fn remove(&self, key: &str) -> CacheResult<()> {
        match std::fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
