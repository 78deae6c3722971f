//! Builder for [`LruCache`] configuration.
//!
//! Collects the construction options (capacity, eviction listener, default
//! lifetime, expiration mode) and validates them in `try_build()`, so a bad
//! configuration never produces a cache instance.
//!
//! ## Example
//!
//! ```
//! use std::time::Duration;
//! use lrukit::LruBuilder;
//!
//! let mut cache = LruBuilder::<u64, String>::new(64)
//!     .default_lifetime(Duration::from_secs(30))
//!     .try_build()
//!     .unwrap();
//! cache.insert(1, "payload".to_string());
//! assert_eq!(cache.len(), 1);
//! ```

use std::hash::Hash;
use std::time::Duration;

use crate::cache::{EvictionListener, LruCache};
use crate::error::ConfigError;
use crate::expiry::validate_lifetime;

/// Fluent configuration for [`LruCache`].
pub struct LruBuilder<K, V> {
    max: usize,
    on_eviction: Option<EvictionListener<K, V>>,
    default_lifetime: Option<Duration>,
    preserve_original_expiry: bool,
}

impl<K, V> LruBuilder<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Starts a builder for a cache holding at most `max` entries.
    pub fn new(max: usize) -> Self {
        Self {
            max,
            on_eviction: None,
            default_lifetime: None,
            preserve_original_expiry: false,
        }
    }

    /// Registers a listener invoked once per entry leaving the cache.
    ///
    /// ```
    /// use lrukit::LruBuilder;
    ///
    /// let mut cache = LruBuilder::new(1)
    ///     .on_eviction(|key: &u64, value: &'static str| {
    ///         println!("dropped {key} => {value}");
    ///     })
    ///     .try_build()
    ///     .unwrap();
    /// cache.insert(1, "a");
    /// cache.insert(2, "b"); // evicts key 1 through the listener
    /// ```
    pub fn on_eviction(mut self, listener: impl FnMut(&K, V) + 'static) -> Self {
        self.on_eviction = Some(Box::new(listener));
        self
    }

    /// Sets the lifetime applied to entries inserted without an explicit
    /// one. Validated in [`try_build`](Self::try_build); zero is rejected.
    pub fn default_lifetime(mut self, lifetime: Duration) -> Self {
        self.default_lifetime = Some(lifetime);
        self
    }

    /// Selects fixed-expiration semantics: a `get` hit no longer slides the
    /// entry's deadline, so the lifetime counts from insertion time.
    pub fn preserve_original_expiry(mut self, preserve: bool) -> Self {
        self.preserve_original_expiry = preserve;
        self
    }

    /// Validates the configuration and builds the cache.
    pub fn try_build(self) -> Result<LruCache<K, V>, ConfigError> {
        if self.max == 0 {
            return Err(ConfigError::new("`max` must be a positive integer"));
        }
        if let Some(lifetime) = self.default_lifetime {
            validate_lifetime(lifetime)?;
        }
        Ok(LruCache::from_parts(
            self.max,
            self.on_eviction,
            self.default_lifetime,
            self.preserve_original_expiry,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_max_is_rejected() {
        let err = LruBuilder::<u64, u64>::new(0).try_build().unwrap_err();
        assert!(err.to_string().contains("max"));
    }

    #[test]
    fn zero_default_lifetime_is_rejected() {
        let err = LruBuilder::<u64, u64>::new(4)
            .default_lifetime(Duration::ZERO)
            .try_build()
            .unwrap_err();
        assert!(err.to_string().contains("lifetime"));
    }

    #[test]
    fn builder_threads_options_through() {
        let mut cache = LruBuilder::<u64, &str>::new(2)
            .default_lifetime(Duration::from_secs(60))
            .preserve_original_expiry(true)
            .try_build()
            .unwrap();
        cache.insert(1, "a");
        assert_eq!(cache.capacity(), 2);
        assert_eq!(cache.get(&1), Some(&"a"));
    }
}
