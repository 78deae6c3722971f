//! Fixed-capacity LRU cache over a slot arena.
//!
//! ## Architecture
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────────┐
//!   │                      LruCache<K, V>                      │
//!   │                                                          │
//!   │   ┌────────────────────────────────────────────────────┐ │
//!   │   │  FxHashMap<K, SlotId>  (key -> slot index)         │ │
//!   │   └───────────────┬────────────────────────────────────┘ │
//!   │                   ▼                                      │
//!   │   ┌────────────────────────────────────────────────────┐ │
//!   │   │  RecencyList<Entry<K, V>>                          │ │
//!   │   │                                                    │ │
//!   │   │  front ─► [MRU] ◄──► [..] ◄──► [LRU] ◄── back      │ │
//!   │   │                                                    │ │
//!   │   │  Entry { key, value, expiry }                      │ │
//!   │   └────────────────────────────────────────────────────┘ │
//!   └──────────────────────────────────────────────────────────┘
//! ```
//!
//! The map resolves keys to slot indices; the list owns the entries and
//! tracks recency; the arena underneath recycles slot indices in O(1).
//! Expiry deadlines are checked lazily on access (`get`/`peek`/`contains`) —
//! there is no background timer, and a stale entry occupies its slot until
//! an operation touches it or capacity pressure evicts it.
//!
//! Every public operation is O(1) amortized except `clear`, `evict(n)` and
//! a shrinking `resize`, which are linear in the number of removed entries.

use std::fmt;
use std::hash::Hash;
use std::time::{Duration, Instant};

use rustc_hash::FxHashMap;

use crate::builder::LruBuilder;
use crate::ds::recency_list::{RecencyIter, RecencyList};
use crate::ds::slot_arena::SlotId;
use crate::error::ConfigError;
#[cfg(any(test, debug_assertions))]
use crate::error::InvariantError;
use crate::expiry::{validate_lifetime, Expiry};
#[cfg(feature = "metrics")]
use crate::metrics::{LruMetrics, LruMetricsSnapshot};

/// Listener invoked synchronously once per entry leaving the cache, with a
/// borrow of the key and ownership of the departing value.
///
/// Fires on capacity eviction, lazy expiry, explicit `remove`/`evict`/
/// `clear`, shrinking `resize`, and value replacement by `insert`. All
/// structural bookkeeping for the entry completes before the listener runs,
/// so a panicking listener cannot corrupt cache state. Dropping the cache
/// does not fire it.
pub type EvictionListener<K, V> = Box<dyn FnMut(&K, V)>;

#[derive(Debug)]
struct Entry<K, V> {
    key: K,
    value: V,
    expiry: Option<Expiry>,
}

/// A fixed-capacity least-recently-used cache.
///
/// Entries live in slots of a bounded arena and are linked into a recency
/// chain by slot index, so no per-entry allocation happens after the arena
/// reaches its high-water mark. All hot-path operations are O(1).
///
/// # Example
///
/// ```
/// use lrukit::LruCache;
///
/// let mut cache = LruCache::new(2);
/// cache.insert("a", 1);
/// cache.insert("b", 2);
/// assert_eq!(cache.get(&"a"), Some(&1));
///
/// // "b" is now the least recently used entry and gets evicted first.
/// cache.insert("c", 3);
/// assert!(!cache.contains(&"b"));
/// assert_eq!(cache.len(), 2);
/// ```
pub struct LruCache<K, V> {
    map: FxHashMap<K, SlotId>,
    list: RecencyList<Entry<K, V>>,
    on_evict: Option<EvictionListener<K, V>>,
    default_lifetime: Option<Duration>,
    preserve_original_expiry: bool,
    #[cfg(feature = "metrics")]
    metrics: LruMetrics,
}

impl<K, V> LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates a cache holding at most `max` entries.
    ///
    /// # Panics
    ///
    /// Panics if `max` is zero. Use [`try_new`](Self::try_new) or
    /// [`LruBuilder`] for fallible construction.
    pub fn new(max: usize) -> Self {
        match Self::try_new(max) {
            Ok(cache) => cache,
            Err(err) => panic!("{err}"),
        }
    }

    /// Creates a cache holding at most `max` entries, rejecting `max == 0`.
    pub fn try_new(max: usize) -> Result<Self, ConfigError> {
        LruBuilder::new(max).try_build()
    }

    pub(crate) fn from_parts(
        max: usize,
        on_evict: Option<EvictionListener<K, V>>,
        default_lifetime: Option<Duration>,
        preserve_original_expiry: bool,
    ) -> Self {
        Self {
            map: FxHashMap::with_capacity_and_hasher(max, Default::default()),
            list: RecencyList::with_capacity(max),
            on_evict,
            default_lifetime,
            preserve_original_expiry,
            #[cfg(feature = "metrics")]
            metrics: LruMetrics::default(),
        }
    }

    /// Inserts or updates `key`, applying the cache's default lifetime if
    /// one was configured.
    ///
    /// Updating an existing key replaces its value in place, promotes it to
    /// most recent, and hands the replaced value to the eviction listener.
    /// A new key at capacity first evicts the least recently used entry.
    ///
    /// # Example
    ///
    /// ```
    /// use lrukit::LruCache;
    ///
    /// let mut cache = LruCache::new(8);
    /// cache.insert(1, "one");
    /// assert_eq!(cache.get(&1), Some(&"one"));
    /// ```
    pub fn insert(&mut self, key: K, value: V) {
        let lifetime = self.default_lifetime;
        self.insert_inner(key, value, lifetime);
    }

    /// Inserts or updates `key` with an explicit per-entry lifetime,
    /// overriding any configured default.
    ///
    /// Rejects a zero lifetime without touching the cache.
    pub fn insert_with_lifetime(
        &mut self,
        key: K,
        value: V,
        lifetime: Duration,
    ) -> Result<(), ConfigError> {
        let lifetime = validate_lifetime(lifetime)?;
        self.insert_inner(key, value, Some(lifetime));
        Ok(())
    }

    fn insert_inner(&mut self, key: K, value: V, lifetime: Option<Duration>) {
        let now = Instant::now();

        if let Some(&id) = self.map.get(&key) {
            #[cfg(feature = "metrics")]
            self.metrics.record_insert_update();

            let old = self.list.get_mut(id).map(|entry| {
                entry.expiry = lifetime.map(|lt| Expiry::new(now, lt));
                std::mem::replace(&mut entry.value, value)
            });
            self.list.move_to_front(id);

            // Overwrite is treated as evict-old-then-reinsert: the listener
            // gets the replaced value once relinking is complete.
            if let Some(old) = old {
                if let Some(on_evict) = self.on_evict.as_mut() {
                    if let Some(entry) = self.list.get(id) {
                        on_evict(&entry.key, old);
                    }
                }
            }
            return;
        }

        #[cfg(feature = "metrics")]
        self.metrics.record_insert_new();

        if self.list.is_full() {
            self.evict_lru();
        }

        let entry = Entry {
            key: key.clone(),
            value,
            expiry: lifetime.map(|lt| Expiry::new(now, lt)),
        };
        if let Some(id) = self.list.try_push_front(entry) {
            self.map.insert(key, id);
        }
    }

    /// Returns the value for `key` and promotes it to most recent, or
    /// `None` if the key is absent or stale (stale entries are evicted as a
    /// side effect, firing the listener).
    ///
    /// A hit slides the entry's expiry deadline forward unless the cache
    /// was built with `preserve_original_expiry`.
    pub fn get(&mut self, key: &K) -> Option<&V> {
        let id = match self.map.get(key) {
            Some(&id) => id,
            None => {
                #[cfg(feature = "metrics")]
                self.metrics.record_get_miss();
                return None;
            },
        };

        let now = Instant::now();
        if self.expire_if_stale(id, now) {
            #[cfg(feature = "metrics")]
            self.metrics.record_get_miss();
            return None;
        }

        #[cfg(feature = "metrics")]
        self.metrics.record_get_hit();

        self.list.move_to_front(id);
        if !self.preserve_original_expiry {
            if let Some(entry) = self.list.get_mut(id) {
                if let Some(expiry) = entry.expiry.as_mut() {
                    expiry.refresh(now);
                }
            }
        }
        self.list.get(id).map(|entry| &entry.value)
    }

    /// Returns the value for `key` without promoting it and without
    /// refreshing its expiry deadline.
    ///
    /// Staleness is still honored: a stale entry is evicted (listener
    /// fires) and reported as a miss. That eviction is the only side effect
    /// `peek` can have.
    pub fn peek(&mut self, key: &K) -> Option<&V> {
        let id = *self.map.get(key)?;
        if self.expire_if_stale(id, Instant::now()) {
            return None;
        }
        self.list.get(id).map(|entry| &entry.value)
    }

    /// Returns `true` if `key` holds a non-stale entry.
    ///
    /// Honors expiry like [`get`](Self::get) but neither promotes the entry
    /// nor refreshes its deadline.
    pub fn contains(&mut self, key: &K) -> bool {
        let id = match self.map.get(key) {
            Some(&id) => id,
            None => return false,
        };
        !self.expire_if_stale(id, Instant::now())
    }

    /// Removes `key` if present, firing the eviction listener. Returns
    /// whether a removal occurred.
    pub fn remove(&mut self, key: &K) -> bool {
        #[cfg(feature = "metrics")]
        self.metrics.record_remove_call();

        let id = match self.map.remove(key) {
            Some(id) => id,
            None => return false,
        };
        if let Some(entry) = self.list.remove(id) {
            #[cfg(feature = "metrics")]
            self.metrics.record_remove_found();

            if let Some(on_evict) = self.on_evict.as_mut() {
                on_evict(&entry.key, entry.value);
            }
        }
        true
    }

    /// Removes up to `n` least recently used entries, strictly oldest
    /// first, firing the listener once per removed entry.
    ///
    /// # Example
    ///
    /// ```
    /// use lrukit::LruCache;
    ///
    /// let mut cache = LruCache::new(3);
    /// cache.insert(1, "a");
    /// cache.insert(2, "b");
    /// cache.insert(3, "c");
    ///
    /// cache.evict(2);
    /// assert_eq!(cache.len(), 1);
    /// assert!(cache.contains(&3));
    /// ```
    pub fn evict(&mut self, n: usize) {
        let count = n.min(self.list.len());
        for _ in 0..count {
            if !self.evict_lru() {
                break;
            }
        }
    }

    /// Removes every entry, oldest first, firing the listener once per
    /// entry, and resets all slot bookkeeping to the empty state.
    pub fn clear(&mut self) {
        while self.evict_lru() {}
        self.list.clear();
    }

    /// Changes the capacity.
    ///
    /// Growing preserves all entries. Shrinking evicts the oldest
    /// `len - new_max` entries (listener fires oldest-first), then rebuilds
    /// the slot storage over the smaller bound, preserving the survivors'
    /// relative recency. Rejects `new_max == 0` without touching the cache.
    ///
    /// # Example
    ///
    /// ```
    /// use lrukit::LruCache;
    ///
    /// let mut cache = LruCache::new(4);
    /// for k in 0..4 {
    ///     cache.insert(k, k);
    /// }
    /// cache.resize(2).unwrap();
    /// assert_eq!(cache.capacity(), 2);
    /// assert!(cache.contains(&3) && cache.contains(&2));
    /// ```
    pub fn resize(&mut self, new_max: usize) -> Result<(), ConfigError> {
        if new_max == 0 {
            return Err(ConfigError::new("`max` must be a positive integer"));
        }
        if new_max >= self.list.capacity() {
            self.list.grow_to(new_max);
            return Ok(());
        }

        while self.list.len() > new_max {
            if !self.evict_lru() {
                break;
            }
        }

        // Rebuild over the smaller storage. Draining from the back hands
        // entries out oldest first, so re-pushing each at the front lands
        // the survivors in their original relative order.
        let mut rebuilt = RecencyList::with_capacity(new_max);
        self.map.clear();
        while let Some(entry) = self.list.pop_back() {
            let key = entry.key.clone();
            if let Some(id) = rebuilt.try_push_front(entry) {
                self.map.insert(key, id);
            }
        }
        self.list = rebuilt;
        Ok(())
    }

    /// Removes the least recently used entry and notifies the listener.
    fn evict_lru(&mut self) -> bool {
        let entry = match self.list.pop_back() {
            Some(entry) => entry,
            None => return false,
        };
        self.map.remove(&entry.key);

        #[cfg(feature = "metrics")]
        self.metrics.record_evicted_entry();

        if let Some(on_evict) = self.on_evict.as_mut() {
            on_evict(&entry.key, entry.value);
        }
        true
    }

    /// Lazily collects the entry at `id` when its deadline has passed.
    /// Returns `true` if the entry was stale and has been evicted.
    fn expire_if_stale(&mut self, id: SlotId, now: Instant) -> bool {
        let stale = self
            .list
            .get(id)
            .and_then(|entry| entry.expiry)
            .map_or(false, |expiry| expiry.is_stale(now));
        if !stale {
            return false;
        }

        if let Some(entry) = self.list.remove(id) {
            self.map.remove(&entry.key);

            #[cfg(feature = "metrics")]
            self.metrics.record_expired_entry();

            if let Some(on_evict) = self.on_evict.as_mut() {
                on_evict(&entry.key, entry.value);
            }
        }
        true
    }
}

impl<K, V> LruCache<K, V> {
    /// Returns the number of stored entries, including stale ones that no
    /// operation has touched yet.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Returns the current capacity bound.
    pub fn capacity(&self) -> usize {
        self.list.capacity()
    }

    /// Returns how many entries fit before the next insert must evict.
    pub fn available(&self) -> usize {
        self.list.capacity() - self.map.len()
    }

    /// Iterates over `(key, value)` pairs from most to least recently used.
    ///
    /// Iteration never checks expiry; stale entries that have not been
    /// touched are still yielded.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            inner: self.list.iter(),
        }
    }

    /// Alias for [`iter`](Self::iter), kept for parity with
    /// [`keys`](Self::keys) and [`values`](Self::values).
    pub fn entries(&self) -> Iter<'_, K, V> {
        self.iter()
    }

    /// Iterates over keys from most to least recently used.
    ///
    /// # Example
    ///
    /// ```
    /// use lrukit::LruCache;
    ///
    /// let mut cache = LruCache::new(3);
    /// cache.insert(1, "a");
    /// cache.insert(2, "b");
    ///
    /// let keys: Vec<_> = cache.keys().copied().collect();
    /// assert_eq!(keys, [2, 1]);
    /// ```
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { inner: self.iter() }
    }

    /// Iterates over values from most to least recently used.
    pub fn values(&self) -> Values<'_, K, V> {
        Values { inner: self.iter() }
    }

    /// Invokes `f(&key, &value)` per entry, most recently used first.
    pub fn for_each(&self, mut f: impl FnMut(&K, &V)) {
        for (key, value) in self.iter() {
            f(key, value);
        }
    }
}

#[cfg(any(test, debug_assertions))]
impl<K, V> LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Cross-checks the key map, the recency chain and the slot arena.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        self.list.check_invariants()?;
        if self.map.len() != self.list.len() {
            return Err(InvariantError::new(format!(
                "key map holds {} entries but the chain holds {}",
                self.map.len(),
                self.list.len()
            )));
        }
        if self.list.len() > self.list.capacity() {
            return Err(InvariantError::new("live entries exceed capacity"));
        }
        for (key, &id) in &self.map {
            match self.list.get(id) {
                Some(entry) if entry.key == *key => {},
                Some(_) => {
                    return Err(InvariantError::new(
                        "key map points at a slot holding a different key",
                    ));
                },
                None => {
                    return Err(InvariantError::new("key map points at a vacant slot"));
                },
            }
        }
        Ok(())
    }

    /// Read-only key order snapshot, most recently used first.
    pub fn debug_snapshot_keys(&self) -> Vec<K> {
        self.keys().cloned().collect()
    }
}

#[cfg(feature = "metrics")]
impl<K, V> LruCache<K, V> {
    /// Copies the operation counters out together with current gauges.
    pub fn metrics_snapshot(&self) -> LruMetricsSnapshot {
        LruMetricsSnapshot {
            get_calls: self.metrics.get_calls,
            get_hits: self.metrics.get_hits,
            get_misses: self.metrics.get_misses,
            insert_calls: self.metrics.insert_calls,
            insert_updates: self.metrics.insert_updates,
            insert_new: self.metrics.insert_new,
            evicted_entries: self.metrics.evicted_entries,
            expired_entries: self.metrics.expired_entries,
            remove_calls: self.metrics.remove_calls,
            remove_found: self.metrics.remove_found,
            cache_len: self.map.len(),
            capacity: self.list.capacity(),
        }
    }
}

impl<K, V> fmt::Debug for LruCache<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruCache")
            .field("len", &self.map.len())
            .field("capacity", &self.list.capacity())
            .field("default_lifetime", &self.default_lifetime)
            .field("preserve_original_expiry", &self.preserve_original_expiry)
            .finish_non_exhaustive()
    }
}

impl<K, V> Extend<(K, V)> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

/// Iterator over `(key, value)` pairs, most recently used first.
pub struct Iter<'a, K, V> {
    inner: RecencyIter<'a, Entry<K, V>>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|entry| (&entry.key, &entry.value))
    }
}

/// Iterator over keys, most recently used first.
pub struct Keys<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<&'a K> {
        self.inner.next().map(|(key, _)| key)
    }
}

/// Iterator over values, most recently used first.
pub struct Values<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<&'a V> {
        self.inner.next().map(|(_, value)| value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::LruBuilder;
    use std::cell::RefCell;
    use std::rc::Rc;

    type EvictLog = Rc<RefCell<Vec<(u64, &'static str)>>>;

    fn cache_with_log(max: usize) -> (LruCache<u64, &'static str>, EvictLog) {
        let log: EvictLog = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        let cache = LruBuilder::new(max)
            .on_eviction(move |key, value| sink.borrow_mut().push((*key, value)))
            .try_build()
            .unwrap();
        (cache, log)
    }

    #[test]
    fn insert_and_get_roundtrip() {
        let mut cache = LruCache::new(3);
        cache.insert(1, "one");
        cache.insert(2, "two");

        assert_eq!(cache.get(&1), Some(&"one"));
        assert_eq!(cache.get(&2), Some(&"two"));
        assert_eq!(cache.get(&3), None);
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.available(), 1);
        cache.check_invariants().unwrap();
    }

    #[test]
    fn capacity_eviction_is_oldest_first() {
        let (mut cache, log) = cache_with_log(2);
        cache.insert(1, "a");
        cache.insert(2, "b");
        cache.insert(3, "c");

        assert_eq!(log.borrow().as_slice(), [(1, "a")]);
        assert_eq!(cache.debug_snapshot_keys(), [3, 2]);
        cache.check_invariants().unwrap();
    }

    #[test]
    fn get_promotes_to_most_recent() {
        let mut cache = LruCache::new(3);
        cache.insert(1, "a");
        cache.insert(2, "b");
        cache.insert(3, "c");

        cache.get(&2);
        assert_eq!(cache.debug_snapshot_keys(), [2, 3, 1]);
        cache.check_invariants().unwrap();
    }

    #[test]
    fn touching_most_recent_changes_nothing() {
        let (mut cache, log) = cache_with_log(3);
        cache.insert(1, "a");
        cache.insert(2, "b");
        let before = cache.debug_snapshot_keys();

        cache.get(&2);
        assert_eq!(cache.debug_snapshot_keys(), before);
        assert!(log.borrow().is_empty());
        cache.check_invariants().unwrap();
    }

    #[test]
    fn update_replaces_in_place_and_fires_listener() {
        let (mut cache, log) = cache_with_log(2);
        cache.insert(1, "a");
        cache.insert(2, "b");
        cache.insert(1, "A");

        // No capacity eviction happened, only the replacement notification.
        assert_eq!(log.borrow().as_slice(), [(1, "a")]);
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get(&1), Some(&"A"));
        assert_eq!(cache.debug_snapshot_keys(), [1, 2]);
        cache.check_invariants().unwrap();
    }

    #[test]
    fn peek_does_not_promote() {
        let mut cache = LruCache::new(3);
        cache.insert(1, "a");
        cache.insert(2, "b");

        assert_eq!(cache.peek(&1), Some(&"a"));
        assert_eq!(cache.debug_snapshot_keys(), [2, 1]);
        cache.check_invariants().unwrap();
    }

    #[test]
    fn remove_reports_presence_and_fires_listener() {
        let (mut cache, log) = cache_with_log(3);
        cache.insert(1, "a");

        assert!(cache.remove(&1));
        assert!(!cache.remove(&1));
        assert_eq!(log.borrow().as_slice(), [(1, "a")]);
        assert!(cache.is_empty());
        cache.check_invariants().unwrap();
    }

    #[test]
    fn freed_slot_is_reused_after_remove() {
        let mut cache = LruCache::new(2);
        cache.insert(1, "a");
        cache.insert(2, "b");
        cache.remove(&1);
        cache.insert(3, "c");

        assert_eq!(cache.len(), 2);
        assert_eq!(cache.debug_snapshot_keys(), [3, 2]);
        cache.check_invariants().unwrap();
    }

    #[test]
    fn evict_removes_oldest_first_and_caps_at_len() {
        let (mut cache, log) = cache_with_log(4);
        for key in 1..=4 {
            cache.insert(key, "x");
        }

        cache.evict(2);
        assert_eq!(log.borrow().as_slice(), [(1, "x"), (2, "x")]);
        assert_eq!(cache.debug_snapshot_keys(), [4, 3]);

        cache.evict(10);
        assert_eq!(log.borrow().len(), 4);
        assert!(cache.is_empty());
        cache.check_invariants().unwrap();
    }

    #[test]
    fn cache_behaves_fresh_after_bulk_eviction() {
        let (mut cache, log) = cache_with_log(2);
        cache.insert(1, "a");
        cache.insert(2, "b");
        cache.evict(5);
        log.borrow_mut().clear();

        cache.insert(3, "c");
        cache.insert(4, "d");
        cache.insert(5, "e");
        assert_eq!(log.borrow().as_slice(), [(3, "c")]);
        assert_eq!(cache.debug_snapshot_keys(), [5, 4]);
        cache.check_invariants().unwrap();
    }

    #[test]
    fn clear_fires_listener_per_entry() {
        let (mut cache, log) = cache_with_log(3);
        cache.insert(1, "a");
        cache.insert(2, "b");
        cache.clear();

        assert_eq!(log.borrow().len(), 2);
        assert!(cache.is_empty());
        assert_eq!(cache.available(), 3);
        cache.check_invariants().unwrap();

        cache.insert(9, "z");
        assert_eq!(cache.len(), 1);
        cache.check_invariants().unwrap();
    }

    #[test]
    fn resize_grow_preserves_entries() {
        let mut cache = LruCache::new(2);
        cache.insert(1, "a");
        cache.insert(2, "b");
        cache.resize(4).unwrap();

        assert_eq!(cache.capacity(), 4);
        assert_eq!(cache.available(), 2);
        assert_eq!(cache.debug_snapshot_keys(), [2, 1]);

        cache.insert(3, "c");
        cache.insert(4, "d");
        assert_eq!(cache.len(), 4);
        cache.check_invariants().unwrap();
    }

    #[test]
    fn resize_shrink_evicts_oldest_and_keeps_order() {
        let (mut cache, log) = cache_with_log(10);
        for key in 1..=10 {
            cache.insert(key, "x");
        }

        cache.resize(5).unwrap();
        let evicted: Vec<u64> = log.borrow().iter().map(|(key, _)| *key).collect();
        assert_eq!(evicted, [1, 2, 3, 4, 5]);
        assert_eq!(cache.capacity(), 5);
        assert_eq!(cache.debug_snapshot_keys(), [10, 9, 8, 7, 6]);
        cache.check_invariants().unwrap();

        // The rebuilt storage must still evict in recency order.
        cache.insert(11, "y");
        assert_eq!(log.borrow().last(), Some(&(6, "x")));
        cache.check_invariants().unwrap();
    }

    #[test]
    fn resize_rejects_zero_without_mutation() {
        let mut cache = LruCache::new(2);
        cache.insert(1, "a");

        assert!(cache.resize(0).is_err());
        assert_eq!(cache.capacity(), 2);
        assert_eq!(cache.get(&1), Some(&"a"));
        cache.check_invariants().unwrap();
    }

    #[test]
    fn try_new_rejects_zero_capacity() {
        assert!(LruCache::<u64, u64>::try_new(0).is_err());
    }

    #[test]
    #[should_panic(expected = "positive integer")]
    fn new_panics_on_zero_capacity() {
        let _ = LruCache::<u64, u64>::new(0);
    }

    #[test]
    fn zero_lifetime_insert_is_rejected_without_mutation() {
        let mut cache = LruCache::new(2);
        cache.insert(1, "a");

        assert!(cache
            .insert_with_lifetime(1, "A", Duration::ZERO)
            .is_err());
        assert!(cache.insert_with_lifetime(2, "b", Duration::ZERO).is_err());

        assert_eq!(cache.get(&1), Some(&"a"));
        assert!(!cache.contains(&2));
        cache.check_invariants().unwrap();
    }

    #[test]
    fn iteration_is_most_recent_first_across_views() {
        let mut cache = LruCache::new(3);
        cache.insert(1, "a");
        cache.insert(2, "b");
        cache.insert(3, "c");
        cache.get(&1);

        let keys: Vec<u64> = cache.keys().copied().collect();
        let values: Vec<&str> = cache.values().copied().collect();
        let entries: Vec<(u64, &str)> = cache.entries().map(|(k, v)| (*k, *v)).collect();
        let mut walked = Vec::new();
        cache.for_each(|key, value| walked.push((*key, *value)));

        assert_eq!(keys, [1, 3, 2]);
        assert_eq!(values, ["a", "c", "b"]);
        assert_eq!(entries, [(1, "a"), (3, "c"), (2, "b")]);
        assert_eq!(walked, entries);
    }

    #[test]
    fn panicking_listener_leaves_state_consistent() {
        let mut cache = LruBuilder::<u64, &str>::new(2)
            .on_eviction(|_key, _value| panic!("listener failure"))
            .try_build()
            .unwrap();
        cache.insert(1, "a");
        cache.insert(2, "b");

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            cache.insert(3, "c");
        }));
        assert!(result.is_err());

        // Key 1 was fully unlinked before the listener panicked; the panic
        // unwound the insert before key 3 was stored.
        assert!(!cache.contains(&1));
        assert!(!cache.contains(&3));
        assert!(cache.contains(&2));
        assert_eq!(cache.len(), 1);
        cache.check_invariants().unwrap();

        // The cache keeps working after the unwind.
        cache.insert(4, "d");
        assert!(cache.contains(&4));
        assert_eq!(cache.len(), 2);
        cache.check_invariants().unwrap();
    }

    #[test]
    fn extend_inserts_in_order() {
        let mut cache = LruCache::new(2);
        cache.extend([(1, "a"), (2, "b"), (3, "c")]);

        assert_eq!(cache.debug_snapshot_keys(), [3, 2]);
        cache.check_invariants().unwrap();
    }

    #[cfg(feature = "metrics")]
    #[test]
    fn metrics_snapshot_tracks_operations() {
        let mut cache = LruCache::new(2);
        cache.insert(1, "a");
        cache.insert(1, "A");
        cache.insert(2, "b");
        cache.insert(3, "c");
        cache.get(&3);
        cache.get(&99);
        cache.remove(&3);

        let snapshot = cache.metrics_snapshot();
        assert_eq!(snapshot.insert_calls, 4);
        assert_eq!(snapshot.insert_updates, 1);
        assert_eq!(snapshot.insert_new, 3);
        assert_eq!(snapshot.evicted_entries, 1);
        assert_eq!(snapshot.get_hits, 1);
        assert_eq!(snapshot.get_misses, 1);
        assert_eq!(snapshot.remove_calls, 1);
        assert_eq!(snapshot.remove_found, 1);
        assert_eq!(snapshot.cache_len, 1);
        assert_eq!(snapshot.capacity, 2);
    }
}
