//! The bounded metadata cache.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use parking_lot::Mutex;
use rustc_hash::FxHashMap;

use crate::source::{ValueSource, WeakSource};
use crate::CacheError;

/// Identity of one version of a file on disk.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FileKey {
    pub path: PathBuf,
    pub timestamp: SystemTime,
}

impl FileKey {
    pub fn new(path: impl Into<PathBuf>, timestamp: SystemTime) -> Self {
        FileKey {
            path: path.into(),
            timestamp,
        }
    }

    /// The key of the file as it is on disk now.
    pub fn for_file(path: &Path) -> Result<Self, CacheError> {
        let metadata = std::fs::metadata(path).map_err(|e| CacheError::io(path, &e))?;
        let timestamp = metadata.modified().map_err(|e| CacheError::io(path, &e))?;
        Ok(FileKey::new(path, timestamp))
    }
}

/// Configuration for a [`MetadataCache`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MetadataCacheConfig {
    /// Entry count at which the cache first tries to evict.
    pub initial_capacity: usize,
}

impl MetadataCacheConfig {
    pub const DEFAULT_CAPACITY: usize = 64;

    pub fn new() -> Self {
        MetadataCacheConfig {
            initial_capacity: Self::DEFAULT_CAPACITY,
        }
    }

    #[must_use]
    pub fn with_initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity.max(1);
        self
    }
}

impl Default for MetadataCacheConfig {
    fn default() -> Self {
        Self::new()
    }
}

struct Entries<V> {
    map: FxHashMap<FileKey, Arc<dyn ValueSource<V>>>,
    capacity: usize,
}

impl<V> Entries<V> {
    /// Makes room for one more entry: drop the entries whose source holds
    /// no value, then double the capacity if the cache is still full.
    #[tracing::instrument(level = "debug", skip_all, fields(len = self.map.len(), capacity = self.capacity))]
    fn make_room(&mut self) {
        let before = self.map.len();
        self.map.retain(|_, source| source.is_alive());
        let evicted = before - self.map.len();
        if self.map.len() >= self.capacity {
            self.capacity = self.capacity.saturating_mul(2);
        }
        tracing::debug!(evicted, capacity = self.capacity, "metadata cache compacted");
    }
}

/// Metadata keyed by [`FileKey`], held through [`ValueSource`]s.
///
/// Every operation takes the same lock. Sources are asked for their value
/// outside the lock; eviction only checks whether they are alive.
pub struct MetadataCache<V> {
    entries: Mutex<Entries<V>>,
}

impl<V: Send + Sync + 'static> MetadataCache<V> {
    pub fn new(config: &MetadataCacheConfig) -> Self {
        MetadataCache {
            entries: Mutex::new(Entries {
                map: FxHashMap::default(),
                capacity: config.initial_capacity.max(1),
            }),
        }
    }

    /// The cached value for `key`, if its source can still produce one.
    pub fn get(&self, key: &FileKey) -> Option<Arc<V>> {
        let source = self.entries.lock().map.get(key).cloned()?;
        source.get()
    }

    /// Stores `source` under `key`, replacing any previous entry.
    pub fn insert(&self, key: FileKey, source: Arc<dyn ValueSource<V>>) {
        let mut entries = self.entries.lock();
        if !entries.map.contains_key(&key) && entries.map.len() >= entries.capacity {
            entries.make_room();
        }
        entries.map.insert(key, source);
    }

    /// The cached value for `key`, loading and caching it on a miss.
    ///
    /// The cache holds loaded values weakly: the entry stays useful for as
    /// long as a caller keeps the returned `Arc`.
    pub fn get_or_load(
        &self,
        key: &FileKey,
        load: impl FnOnce(&Path) -> Result<V, CacheError>,
    ) -> Result<Arc<V>, CacheError> {
        if let Some(value) = self.get(key) {
            tracing::trace!(path = %key.path.display(), "metadata cache hit");
            return Ok(value);
        }
        tracing::debug!(path = %key.path.display(), "metadata cache miss");
        let value = Arc::new(load(&key.path)?);
        self.insert(key.clone(), Arc::new(WeakSource::new(&value)));
        Ok(value)
    }

    pub fn remove(&self, key: &FileKey) -> bool {
        self.entries.lock().map.remove(key).is_some()
    }

    pub fn clear(&self) {
        self.entries.lock().map.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.lock().map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().map.is_empty()
    }

    /// Entry count at which the next insertion evicts.
    pub fn capacity(&self) -> usize {
        self.entries.lock().capacity
    }
}

impl<V: Send + Sync + 'static> Default for MetadataCache<V> {
    fn default() -> Self {
        Self::new(&MetadataCacheConfig::default())
    }
}

impl<V> fmt::Debug for MetadataCache<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let entries = self.entries.lock();
        f.debug_struct("MetadataCache")
            .field("len", &entries.map.len())
            .field("capacity", &entries.capacity)
            .finish()
    }
}
