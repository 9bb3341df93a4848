//! Producers of cached values.

use std::fmt;
use std::sync::{Arc, Weak};

use parking_lot::Mutex;

/// Something that can hand out a cached value, or report that it no longer
/// can.
pub trait ValueSource<V>: Send + Sync {
    fn get(&self) -> Option<Arc<V>>;

    /// Whether the source holds a value right now. Never produces one, so
    /// eviction can ask it under the cache lock.
    fn is_alive(&self) -> bool;
}

/// Keeps its value alive for as long as the source exists.
#[derive(Debug)]
pub struct StrongSource<V>(Arc<V>);

impl<V> StrongSource<V> {
    pub fn new(value: Arc<V>) -> Self {
        StrongSource(value)
    }
}

impl<V: Send + Sync> ValueSource<V> for StrongSource<V> {
    fn get(&self) -> Option<Arc<V>> {
        Some(Arc::clone(&self.0))
    }

    fn is_alive(&self) -> bool {
        true
    }
}

/// Hands out the value while someone else keeps it alive.
#[derive(Debug)]
pub struct WeakSource<V>(Weak<V>);

impl<V> WeakSource<V> {
    pub fn new(value: &Arc<V>) -> Self {
        WeakSource(Arc::downgrade(value))
    }
}

impl<V: Send + Sync> ValueSource<V> for WeakSource<V> {
    fn get(&self) -> Option<Arc<V>> {
        self.0.upgrade()
    }

    fn is_alive(&self) -> bool {
        self.0.strong_count() > 0
    }
}

type Loader<V> = Box<dyn Fn() -> Option<V> + Send + Sync>;

/// Holds its value weakly and recomputes it once it has been dropped.
///
/// `get` comes back empty only when the loader fails. The source counts as
/// alive only while the value it last produced is.
pub struct RecoverableSource<V> {
    cached: Mutex<Weak<V>>,
    load: Loader<V>,
}

impl<V> RecoverableSource<V> {
    pub fn new(load: impl Fn() -> Option<V> + Send + Sync + 'static) -> Self {
        RecoverableSource {
            cached: Mutex::new(Weak::new()),
            load: Box::new(load),
        }
    }

    /// A source whose current value is `value`.
    pub fn with_value(
        value: &Arc<V>,
        load: impl Fn() -> Option<V> + Send + Sync + 'static,
    ) -> Self {
        RecoverableSource {
            cached: Mutex::new(Arc::downgrade(value)),
            load: Box::new(load),
        }
    }
}

impl<V: Send + Sync> ValueSource<V> for RecoverableSource<V> {
    fn get(&self) -> Option<Arc<V>> {
        let mut cached = self.cached.lock();
        if let Some(value) = cached.upgrade() {
            return Some(value);
        }
        let value = Arc::new((self.load)()?);
        *cached = Arc::downgrade(&value);
        tracing::trace!("recovered cached value");
        Some(value)
    }

    fn is_alive(&self) -> bool {
        self.cached.lock().strong_count() > 0
    }
}

impl<V> fmt::Debug for RecoverableSource<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecoverableSource")
            .field("alive", &(self.cached.lock().strong_count() > 0))
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests;
