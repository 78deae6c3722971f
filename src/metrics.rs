//! Operation counters behind the `metrics` feature.
//!
//! Plain `u64` counters bumped inline by `LruCache`; zero cost when the
//! feature is off. Read them through
//! [`LruCache::metrics_snapshot`](crate::LruCache::metrics_snapshot).

/// Mutable counter block owned by the cache.
#[derive(Debug, Default)]
pub struct LruMetrics {
    pub get_calls: u64,
    pub get_hits: u64,
    pub get_misses: u64,
    pub insert_calls: u64,
    pub insert_updates: u64,
    pub insert_new: u64,
    pub evicted_entries: u64,
    pub expired_entries: u64,
    pub remove_calls: u64,
    pub remove_found: u64,
}

impl LruMetrics {
    #[inline]
    pub fn record_get_hit(&mut self) {
        self.get_calls += 1;
        self.get_hits += 1;
    }

    #[inline]
    pub fn record_get_miss(&mut self) {
        self.get_calls += 1;
        self.get_misses += 1;
    }

    #[inline]
    pub fn record_insert_new(&mut self) {
        self.insert_calls += 1;
        self.insert_new += 1;
    }

    #[inline]
    pub fn record_insert_update(&mut self) {
        self.insert_calls += 1;
        self.insert_updates += 1;
    }

    #[inline]
    pub fn record_evicted_entry(&mut self) {
        self.evicted_entries += 1;
    }

    #[inline]
    pub fn record_expired_entry(&mut self) {
        self.expired_entries += 1;
    }

    #[inline]
    pub fn record_remove_call(&mut self) {
        self.remove_calls += 1;
    }

    #[inline]
    pub fn record_remove_found(&mut self) {
        self.remove_found += 1;
    }
}

/// Point-in-time copy of the counters plus gauges captured at snapshot time.
#[derive(Debug, Default, Clone, Copy)]
pub struct LruMetricsSnapshot {
    pub get_calls: u64,
    pub get_hits: u64,
    pub get_misses: u64,

    pub insert_calls: u64,
    pub insert_updates: u64,
    pub insert_new: u64,

    pub evicted_entries: u64,
    pub expired_entries: u64,

    pub remove_calls: u64,
    pub remove_found: u64,

    // gauges captured at snapshot time
    pub cache_len: usize,
    pub capacity: usize,
}
