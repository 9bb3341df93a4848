//! Corvid metadata cache.
//!
//! [`MetadataCache`] maps a file identity (path plus modification time) to a
//! [`ValueSource`] that can produce the file's metadata on demand. Sources
//! may hold their value weakly or recompute it, so an entry can go empty
//! while it sits in the cache. The cache is bounded: when it reaches its
//! capacity it drops empty entries, and doubles the capacity if that did not
//! make room.
//!
//! One `parking_lot` mutex guards every lookup, insertion and eviction.

mod cache;
mod error;
mod source;

pub use cache::{FileKey, MetadataCache, MetadataCacheConfig};
pub use error::CacheError;
pub use source::{RecoverableSource, StrongSource, ValueSource, WeakSource};
