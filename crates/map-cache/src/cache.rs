//! `MapCache`: a two-level (RAM, disk) LRU cache with write-back eviction.

use std::collections::HashMap;
use std::fmt::Display;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Mutex;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::blob_store::{BlobStore, FsBlobStore};
use crate::error::{CacheError, CacheResult};
use crate::recency::Recency;

const MANIFEST_FILE: &str = "cached.map";

fn blob_name(entry_number: u64) -> String {
    format!("cache.entry_{entry_number}.json")
}

struct CacheInner<K, V, S: BlobStore> {
    file_cache_path: PathBuf,
    blob_store: S,

    ram: HashMap<K, V>,
    ram_recency: Recency<K>,
    ram_cap: usize,

    disk: HashMap<K, u64>,
    disk_recency: Recency<K>,
    disk_cap: usize,

    /// Monotone counter used to allocate entry numbers. Decremented only
    /// when a disk entry is erased outright (not on final-clear persist).
    entry_count: u64,

    is_active: bool,
    on_final_clear: bool,

    /// Most recent I/O or (de)serialization failure a degraded operation
    /// logged and otherwise swallowed, for callers that want it out-of-band
    /// instead of just the log line. Overwritten by the next failure, taken
    /// (not cloned) by `MapCache::last_error`.
    last_error: Option<CacheError>,
}

impl<K, V, S> CacheInner<K, V, S>
where
    K: Eq + std::hash::Hash + Clone + Display,
    V: Serialize + DeserializeOwned + Clone,
    S: BlobStore,
{
    fn put(&mut self, key: K, value: V) {
        if !self.is_active {
            return;
        }

        self.ram.insert(key.clone(), value.clone());
        self.ram_recency.touch(&key);

        if !self.disk.contains_key(&key) {
            let entry_number = self.entry_count;
            self.entry_count += 1;
            match to_bytes(&value) {
                Ok(bytes) => {
                    if let Err(e) = self.blob_store.save(&blob_name(entry_number), &bytes) {
                        self.record_error(&key, "failed to persist cache blob", e);
                    }
                }
                Err(e) => self.record_error(&key, "failed to serialize cache blob", e),
            }
            self.disk.insert(key.clone(), entry_number);
            self.disk_recency.touch(&key);
        }

        self.maybe_evict_ram();
        self.maybe_evict_disk();
    }

    fn try_get(&mut self, key: &K) -> Option<V> {
        if !self.is_active || key.to_string().is_empty() {
            return None;
        }

        if let Some(v) = self.ram.get(key).cloned() {
            self.ram_recency.touch(key);
            return Some(v);
        }

        let entry_number = *self.disk.get(key)?;
        match self.blob_store.load(&blob_name(entry_number)) {
            Ok(bytes) => match serde_json::from_slice::<V>(&bytes) {
                Ok(v) => {
                    self.disk_recency.touch(key);
                    self.ram.insert(key.clone(), v.clone());
                    self.ram_recency.touch(key);
                    self.maybe_evict_ram();
                    Some(v)
                }
                Err(e) => {
                    self.record_warn(key, "cache blob failed to deserialize, treating as miss", e.into());
                    None
                }
            },
            Err(e) => {
                self.record_warn(key, "cache blob unreadable, treating as miss", e);
                None
            }
        }
    }

    fn maybe_evict_ram(&mut self) {
        while self.ram.len() > self.ram_cap {
            let Some(victim) = self.ram_recency.lru().cloned() else { break };
            self.ram_recency.remove(&victim);
            let Some(value) = self.ram.remove(&victim) else { continue };

            if !self.disk.contains_key(&victim) && self.disk.len() < self.disk_cap {
                let entry_number = self.entry_count;
                self.entry_count += 1;
                match to_bytes(&value) {
                    Ok(bytes) => match self.blob_store.save(&blob_name(entry_number), &bytes) {
                        Ok(()) => {
                            self.disk.insert(victim.clone(), entry_number);
                            self.disk_recency.touch(&victim);
                        }
                        Err(e) => {
                            self.entry_count = self.entry_count.saturating_sub(1);
                            self.record_error(&victim, "failed to write back evicted RAM entry", e);
                        }
                    },
                    Err(e) => {
                        self.entry_count = self.entry_count.saturating_sub(1);
                        self.record_error(&victim, "failed to serialize evicted RAM entry", e);
                    }
                }
            }
        }
    }

    /// Log `context` at error level and retain `err` for `MapCache::last_error`.
    fn record_error(&mut self, key: &K, context: &'static str, err: CacheError) {
        tracing::error!(key = %key, error = %err, "{context}");
        self.last_error = Some(err);
    }

    /// Log `context` at warn level and retain `err` for `MapCache::last_error`.
    fn record_warn(&mut self, key: &K, context: &'static str, err: CacheError) {
        tracing::warn!(key = %key, error = %err, "{context}");
        self.last_error = Some(err);
    }

    fn maybe_evict_disk(&mut self) {
        while self.disk.len() > self.disk_cap {
            let Some(victim) = self.disk_recency.lru().cloned() else { break };
            self.disk_recency.remove(&victim);
            let Some(entry_number) = self.disk.remove(&victim) else { continue };
            self.evict_disk_entry(&victim, entry_number);
        }
    }

    /// Shared by capacity-driven eviction and shutdown persistence.
    fn evict_disk_entry(&mut self, key: &K, entry_number: u64) {
        if self.on_final_clear {
            if let Err(e) = append_manifest_line(&self.file_cache_path, key, entry_number) {
                self.record_error(key, "failed to persist shutdown manifest entry", e);
            }
        } else {
            if let Err(e) = self.blob_store.remove(&blob_name(entry_number)) {
                self.record_error(key, "failed to remove evicted cache blob", e);
            }
            self.entry_count = self.entry_count.saturating_sub(1);
        }
    }

    /// Drain every live disk entry into the shutdown manifest, leaving
    /// their blobs on disk for the next construction to replay.
    fn persist_manifest(&mut self) {
        self.on_final_clear = true;
        let entries: Vec<(K, u64)> = self.disk.drain().collect();
        for (key, entry_number) in entries {
            self.disk_recency.remove(&key);
            self.evict_disk_entry(&key, entry_number);
        }
    }
}

fn to_bytes<V: Serialize>(value: &V) -> CacheResult<Vec<u8>> {
    Ok(serde_json::to_vec(value)?)
}

fn append_manifest_line<K: Display>(dir: &Path, key: &K, entry_number: u64) -> CacheResult<()> {
    use std::io::Write;
    let mut f = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join(MANIFEST_FILE))?;
    writeln!(f, "{key} {entry_number}")?;
    Ok(())
}

/// A two-level (RAM, disk) LRU cache with write-back eviction and a
/// shutdown manifest.
///
/// RAM maps `Key -> Value`. Disk maps `Key -> entry_number`, with the
/// actual bytes held by a [`BlobStore`] under `cache.entry_{n}.json`.
/// All operations serialize under one internal mutex.
pub struct MapCache<K, V, S: BlobStore = FsBlobStore> {
    inner: Mutex<CacheInner<K, V, S>>,
}

impl<K, V> MapCache<K, V, FsBlobStore>
where
    K: Eq + std::hash::Hash + Clone + Display + FromStr,
    V: Serialize + DeserializeOwned + Clone,
{
    /// Build a cache rooted at `file_cache_path`, using the default
    /// filesystem-backed [`FsBlobStore`].
    pub fn new(file_cache_path: impl Into<PathBuf>, ram_cap: usize, disk_cap: usize) -> CacheResult<Self> {
        let path = file_cache_path.into();
        let store = FsBlobStore::new(path.clone())?;
        Self::with_store(path, ram_cap, disk_cap, store)
    }
}

impl<K, V, S> MapCache<K, V, S>
where
    K: Eq + std::hash::Hash + Clone + Display + FromStr,
    V: Serialize + DeserializeOwned + Clone,
    S: BlobStore,
{
    /// Build a cache rooted at `file_cache_path` over a caller-supplied
    /// [`BlobStore`]. If a shutdown manifest from a prior run is present,
    /// it is replayed (up to `disk_cap` entries) and removed.
    pub fn with_store(
        file_cache_path: impl Into<PathBuf>,
        ram_cap: usize,
        disk_cap: usize,
        blob_store: S,
    ) -> CacheResult<Self> {
        let file_cache_path = file_cache_path.into();
        std::fs::create_dir_all(&file_cache_path)?;

        let mut disk = HashMap::new();
        let mut disk_recency = Recency::new();
        let mut entry_count = 0u64;

        let manifest_path = file_cache_path.join(MANIFEST_FILE);
        if manifest_path.exists() {
            let contents = std::fs::read_to_string(&manifest_path)?;
            for line in contents.lines() {
                if disk.len() >= disk_cap {
                    break;
                }
                let Some((key_str, n_str)) = line.rsplit_once(' ') else { continue };
                let Ok(n) = n_str.parse::<u64>() else { continue };
                match key_str.parse::<K>() {
                    Ok(key) => {
                        disk.insert(key.clone(), n);
                        disk_recency.touch(&key);
                        entry_count = entry_count.max(n + 1);
                    }
                    Err(_) => {
                        tracing::warn!(line = %line, "skipping unparseable cache manifest entry");
                    }
                }
            }
            std::fs::remove_file(&manifest_path)?;
        }

        Ok(Self {
            inner: Mutex::new(CacheInner {
                file_cache_path,
                blob_store,
                ram: HashMap::new(),
                ram_recency: Recency::new(),
                ram_cap,
                disk,
                disk_recency,
                disk_cap,
                entry_count,
                is_active: true,
                on_final_clear: false,
                last_error: None,
            }),
        })
    }

    /// Insert `value` under `key`. No-op if the cache is inactive. I/O or
    /// serialization failures while writing through to disk degrade to a
    /// RAM-only entry; they're logged and also retained for `last_error`.
    pub fn put(&self, key: K, value: V) {
        self.inner.lock().unwrap().put(key, value);
    }

    /// Look up `key`. Misses degrade silently (inactive cache, empty key,
    /// absent key, or an unreadable/corrupt blob all return `None`) but an
    /// unreadable/corrupt-blob miss is also recorded for `last_error`.
    pub fn try_get(&self, key: &K) -> Option<V> {
        self.inner.lock().unwrap().try_get(key)
    }

    /// Take the most recent I/O or (de)serialization failure a degraded
    /// operation logged, if any. Returns `None` once drained; a repeat call
    /// without an intervening failure returns `None` too.
    pub fn last_error(&self) -> Option<CacheError> {
        self.inner.lock().unwrap().last_error.take()
    }

    pub fn turn_off(&self) {
        self.inner.lock().unwrap().is_active = false;
    }

    pub fn turn_on(&self) {
        self.inner.lock().unwrap().is_active = true;
    }

    pub fn is_active(&self) -> bool {
        self.inner.lock().unwrap().is_active
    }

    pub fn ram_len(&self) -> usize {
        self.inner.lock().unwrap().ram.len()
    }

    pub fn disk_len(&self) -> usize {
        self.inner.lock().unwrap().disk.len()
    }

    /// Write every surviving disk entry to the shutdown manifest so a
    /// future cache at the same path can replay them. Idempotent — safe to
    /// call more than once, and called defensively by `Drop`.
    pub fn close_and_persist(&self) {
        self.inner.lock().unwrap().persist_manifest();
    }
}

impl<K, V, S: BlobStore> Drop for MapCache<K, V, S>
where
    K: Eq + std::hash::Hash + Clone + Display,
    V: Serialize + DeserializeOwned + Clone,
{
    fn drop(&mut self) {
        self.inner.lock().unwrap().persist_manifest();
    }
}
