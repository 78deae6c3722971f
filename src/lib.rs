//! lrukit: fixed-capacity LRU caching with lazy per-entry staleness.
//!
//! The cache keeps its entries in a bounded slot arena and links them into a
//! recency chain by slot index, so insert, lookup, update, removal, bulk
//! eviction and capacity changes are all O(1) amortized with no per-entry
//! allocation after warm-up. An optional lifetime can be attached per entry
//! (or as a cache-wide default); staleness is checked lazily on access, with
//! no background timers.
//!
//! ## Example
//!
//! ```
//! use lrukit::LruCache;
//!
//! let mut cache = LruCache::new(2);
//! cache.insert("a", 1);
//! cache.insert("b", 2);
//! cache.insert("c", 3); // evicts "a", the least recently used
//!
//! assert_eq!(cache.get(&"a"), None);
//! assert_eq!(cache.get(&"b"), Some(&2));
//! ```
//!
//! Eviction listeners, default lifetimes and fixed- vs sliding-expiration
//! are configured through [`LruBuilder`]. A single cache instance is not
//! synchronized; callers sharing one across threads wrap it in their own
//! lock.

pub mod builder;
pub mod cache;
pub mod ds;
pub mod error;
mod expiry;

#[cfg(feature = "metrics")]
pub mod metrics;

pub mod prelude;

pub use builder::LruBuilder;
pub use cache::{EvictionListener, LruCache};
pub use error::{ConfigError, InvariantError};
