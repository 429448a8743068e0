//! # LFU (Least Frequently Used) Cache Implementation
//!
//! A fixed-capacity key/value cache that, when it must make room for a new
//! key, evicts the entry with the smallest access count.
//!
//! ## Architecture
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────────────────────────┐
//!   │                          LfuCache<K, V>                                  │
//!   │                                                                          │
//!   │   index: FxHashMap<K, SlotId>          (key → handle, O(1) lookup)       │
//!   │                                                                          │
//!   │   entries: FrequencyList<Entry<K, V>>  (owns every entry)                │
//!   │                                                                          │
//!   │     head                                                      tail       │
//!   │      │                                                          │        │
//!   │      ▼                                                          ▼        │
//!   │   [k3:1] ◄──► [k5:1] ◄──► [k1:2] ◄──► [k4:2] ◄──► [k2:7]                 │
//!   │      ▲                                                                   │
//!   │      └── eviction candidate                                              │
//!   │                                                                          │
//!   │   capacity: usize  (fixed at construction, > 0)                          │
//!   └──────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Eviction Flow
//!
//! ```text
//!   put(key, value)
//!        │
//!        ▼
//!   ┌────────────────────────────────────────────────────────────────────────┐
//!   │ Key already present?                                                   │
//!   │                                                                        │
//!   │   YES → Replace value, frequency += 1, re-splice, return old value     │
//!   │   NO  → Continue to capacity check                                     │
//!   └────────────────────────────────────────────────────────────────────────┘
//!        │
//!        ▼
//!   ┌────────────────────────────────────────────────────────────────────────┐
//!   │ len == capacity?                                                       │
//!   │                                                                        │
//!   │   YES → Pop list head, drop its key from the index                     │
//!   │   NO  → nothing to evict                                               │
//!   └────────────────────────────────────────────────────────────────────────┘
//!        │
//!        ▼
//!   Insert new entry with frequency 1 after all existing frequency-1 entries
//! ```
//!
//! ## Tie-Breaking
//!
//! An entry whose frequency changes is placed *after* every entry that
//! already has the new frequency. Within a tier the head is therefore the
//! entry that reached that frequency earliest, and that is the one evicted.
//!
//! ```text
//!   capacity 3: put(a) put(b) put(c)      [a:1] [b:1] [c:1]
//!   get(a)                                [b:1] [c:1] [a:2]
//!   put(d)  → evicts b                    [c:1] [d:1] [a:2]
//! ```
//!
//! ## Frequency Lifecycle
//!
//! ```text
//!   put(new key)          → frequency = 1
//!   get(key)              → frequency += 1
//!   put(existing key)     → frequency += 1, value replaced
//!   eviction              → entry dropped
//! ```
//!
//! Read-only calls (`peek`, `contains`, `frequency`, `peek_lfu`, `iter`) do
//! not count as accesses.
//!
//! ## Core Operations
//!
//! | Method              | Complexity       | Description                              |
//! |---------------------|------------------|------------------------------------------|
//! | `new(capacity)`     | O(1)             | Create cache, panics on zero capacity    |
//! | `try_new(capacity)` | O(1)             | Create cache, `ConfigError` if invalid   |
//! | `put(k, v)`         | O(tier)          | Insert or update, may evict the head     |
//! | `get(&k)`           | O(tier)          | Clone of value, increments frequency     |
//! | `get_ref(&k)`       | O(tier)          | Reference to value, increments frequency |
//! | `peek(&k)`          | O(1)             | Reference to value, no frequency change  |
//! | `frequency(&k)`     | O(1)             | Current access count                     |
//! | `peek_lfu()`        | O(1)             | Next eviction candidate                  |
//! | `len()` / `size()`  | O(1)             | Current number of entries                |
//!
//! "O(tier)" is the number of entries sharing the old or new frequency.
//!
//! ## Thread Safety
//!
//! - `LfuCache` is **NOT thread-safe**; `get` mutates the ordering.
//! - Wrap in `Mutex<LfuCache>` for shared access. A `RwLock` buys nothing
//!   because every lookup needs the write side.
//!
//! ## Example Usage
//!
//! ```
//! use lfukit::policy::lfu::LfuCache;
//!
//! let mut cache = LfuCache::new(2);
//! cache.put(1, "a");
//! cache.put(2, "b");
//! assert_eq!(cache.get(&1), Some("a")); // freq(1) = 2
//!
//! cache.put(3, "c"); // evicts 2 (freq 1)
//! assert_eq!(cache.get(&2), None);
//! assert_eq!(cache.get(&3), Some("c"));
//! ```

use std::fmt;
use std::hash::Hash;

use rustc_hash::FxHashMap;
use tracing::{debug, trace, warn};

use crate::ds::{FrequencyList, SlotId};
use crate::error::{ConfigError, InvariantError};
#[cfg(feature = "metrics")]
use crate::metrics::metrics_impl::LfuMetrics;
#[cfg(feature = "metrics")]
use crate::metrics::snapshot::LfuMetricsSnapshot;
#[cfg(feature = "metrics")]
use crate::metrics::traits::{CoreMetricsRecorder, LfuMetricsReadRecorder, MetricsSnapshotProvider};
use crate::traits::{CoreCache, LfuCacheTrait};

/// Capacity used by [`LfuCache::new_default`] and `Default`.
pub const DEFAULT_CAPACITY: usize = 100;

/// Upper bound on up-front reservation; larger caches grow on demand.
const MAX_PREALLOC: usize = 1 << 16;

#[derive(Debug)]
struct Entry<K, V> {
    key: K,
    value: V,
}

/// LFU (Least Frequently Used) Cache.
///
/// Evicts the entry with the lowest access frequency when a new key arrives
/// at capacity. See module-level documentation for details.
#[derive(Debug)]
pub struct LfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    index: FxHashMap<K, SlotId>,
    entries: FrequencyList<Entry<K, V>>,
    capacity: usize,
    #[cfg(feature = "metrics")]
    metrics: LfuMetrics,
}

/// Converts a caller-supplied capacity into a validated `usize`.
pub(crate) fn validate_capacity<C>(capacity: C) -> Result<usize, ConfigError>
where
    C: TryInto<usize> + Copy + fmt::Display,
{
    match capacity.try_into() {
        Ok(0) => Err(ConfigError::new("cache capacity must be greater than zero")),
        Ok(capacity) => Ok(capacity),
        Err(_) => Err(ConfigError::new(format!(
            "cache capacity must be a positive integer, got {}",
            capacity
        ))),
    }
}

impl<K, V> Default for LfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates a cache with [`DEFAULT_CAPACITY`].
    fn default() -> Self {
        Self::new_default()
    }
}

impl<K, V> LfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates a new LFU cache holding at most `capacity` entries.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero. See [`try_new`](Self::try_new).
    pub fn new(capacity: usize) -> Self {
        match Self::try_new(capacity) {
            Ok(cache) => cache,
            Err(e) => panic!("{}", e),
        }
    }

    /// Creates a new LFU cache, returning an error on invalid capacity.
    ///
    /// Accepts any integer type so that negative inputs are rejected rather
    /// than wrapped.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `capacity` is zero, negative, or does not
    /// fit in `usize`.
    ///
    /// # Example
    ///
    /// ```
    /// use lfukit::policy::lfu::LfuCache;
    ///
    /// assert!(LfuCache::<u32, u32>::try_new(8).is_ok());
    /// assert!(LfuCache::<u32, u32>::try_new(0).is_err());
    /// assert!(LfuCache::<u32, u32>::try_new(-1i64).is_err());
    /// ```
    pub fn try_new<C>(capacity: C) -> Result<Self, ConfigError>
    where
        C: TryInto<usize> + Copy + fmt::Display,
    {
        let capacity = validate_capacity(capacity)
            .inspect_err(|err| warn!(error = %err, "rejected lfu cache capacity"))?;
        Ok(Self::with_validated_capacity(capacity, true))
    }

    /// Creates a cache with [`DEFAULT_CAPACITY`] (100).
    pub fn new_default() -> Self {
        Self::with_validated_capacity(DEFAULT_CAPACITY, true)
    }

    pub(crate) fn with_validated_capacity(capacity: usize, preallocate: bool) -> Self {
        debug_assert!(capacity > 0);
        let reserve = if preallocate {
            capacity.min(MAX_PREALLOC)
        } else {
            0
        };
        debug!(capacity, preallocate, "created lfu cache");
        LfuCache {
            index: FxHashMap::with_capacity_and_hasher(reserve, Default::default()),
            entries: FrequencyList::with_capacity(reserve),
            capacity,
            #[cfg(feature = "metrics")]
            metrics: LfuMetrics::default(),
        }
    }

    /// Returns a clone of the value for `key` and records an access.
    ///
    /// A miss returns `None` and changes nothing.
    pub fn get(&mut self, key: &K) -> Option<V>
    where
        V: Clone,
    {
        self.get_ref(key).cloned()
    }

    /// Returns a reference to the value for `key` and records an access.
    pub fn get_ref(&mut self, key: &K) -> Option<&V> {
        let Some(&id) = self.index.get(key) else {
            #[cfg(feature = "metrics")]
            self.metrics.record_get_miss();
            return None;
        };

        self.entries.increment(id)?;

        #[cfg(feature = "metrics")]
        self.metrics.record_get_hit();

        self.entries.get(id).map(|entry| &entry.value)
    }

    /// Inserts `value` under `key`.
    ///
    /// If `key` is present its value is replaced, its frequency goes up by
    /// one, and the previous value is returned. Otherwise the entry starts at
    /// frequency 1, evicting the least frequently used entry first if the
    /// cache is full.
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        #[cfg(feature = "metrics")]
        self.metrics.record_insert_call();

        if let Some(&id) = self.index.get(&key) {
            #[cfg(feature = "metrics")]
            self.metrics.record_insert_update();

            let previous = self
                .entries
                .get_mut(id)
                .map(|entry| std::mem::replace(&mut entry.value, value));
            let bumped = self.entries.increment(id);
            debug_assert!(bumped.is_some(), "index points at vacant slot {:?}", id);
            return previous;
        }

        #[cfg(feature = "metrics")]
        self.metrics.record_insert_new();

        if self.index.len() >= self.capacity {
            self.evict_lfu();
        }

        let id = self.entries.insert_by_frequency(
            Entry {
                key: key.clone(),
                value,
            },
            1,
        );
        self.index.insert(key, id);
        None
    }

    /// Returns the value for `key` without recording an access.
    pub fn peek(&self, key: &K) -> Option<&V> {
        let id = *self.index.get(key)?;
        self.entries.get(id).map(|entry| &entry.value)
    }

    /// Returns `true` if `key` is present. Does not record an access.
    pub fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    /// Returns the access frequency of `key`, or `None` if absent.
    pub fn frequency(&self, key: &K) -> Option<u64> {
        #[cfg(feature = "metrics")]
        self.metrics.record_frequency_call();

        let result = self
            .index
            .get(key)
            .and_then(|id| self.entries.frequency(*id));

        if result.is_some() {
            #[cfg(feature = "metrics")]
            self.metrics.record_frequency_found();
        }

        result
    }

    /// Returns the entry the next eviction would remove.
    pub fn peek_lfu(&self) -> Option<(&K, &V)> {
        #[cfg(feature = "metrics")]
        self.metrics.record_peek_lfu_call();

        let entry = self.entries.front()?;

        #[cfg(feature = "metrics")]
        self.metrics.record_peek_lfu_found();

        Some((&entry.key, &entry.value))
    }

    /// Iterates `(key, value, frequency)` in eviction order, least
    /// frequently used first.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V, u64)> + '_ {
        self.entries
            .iter()
            .map(|(entry, frequency)| (&entry.key, &entry.value, frequency))
    }

    /// Returns the number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Alias for [`len`](Self::len).
    #[inline]
    pub fn size(&self) -> usize {
        self.len()
    }

    /// Returns `true` if the cache holds no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Returns the fixed capacity.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Verifies that the index and the frequency list agree.
    ///
    /// Checks that the list is well formed and sorted, that `len <= capacity`,
    /// and that keys map one-to-one onto live entries. An error here means a
    /// bug in this crate.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        self.entries.check_invariants()?;

        if self.index.len() != self.entries.len() {
            return Err(InvariantError::new(format!(
                "index holds {} keys but list holds {} entries",
                self.index.len(),
                self.entries.len()
            )));
        }
        if self.entries.len() > self.capacity {
            return Err(InvariantError::new(format!(
                "len {} exceeds capacity {}",
                self.entries.len(),
                self.capacity
            )));
        }
        for (key, &id) in &self.index {
            let entry = self.entries.get(id).ok_or_else(|| {
                InvariantError::new(format!("index maps a key to vacant slot {:?}", id))
            })?;
            if entry.key != *key {
                return Err(InvariantError::new(format!(
                    "slot {:?} holds a different key than the index expects",
                    id
                )));
            }
        }
        Ok(())
    }

    fn evict_lfu(&mut self) {
        #[cfg(feature = "metrics")]
        self.metrics.record_evict_call();

        let Some((entry, frequency)) = self.entries.pop_front() else {
            return;
        };
        self.index.remove(&entry.key);

        #[cfg(feature = "metrics")]
        self.metrics.record_evicted_entry();

        trace!(
            frequency,
            len = self.entries.len(),
            "evicted least frequently used entry"
        );
    }

    #[cfg(test)]
    fn debug_validate_invariants(&self) {
        if let Err(err) = self.check_invariants() {
            panic!("lfu invariant violated: {}", err);
        }
    }
}

impl<K, V> CoreCache<K, V> for LfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn put(&mut self, key: K, value: V) -> Option<V> {
        LfuCache::put(self, key, value)
    }

    fn get(&mut self, key: &K) -> Option<&V> {
        LfuCache::get_ref(self, key)
    }

    fn contains(&self, key: &K) -> bool {
        LfuCache::contains(self, key)
    }

    fn len(&self) -> usize {
        LfuCache::len(self)
    }

    fn capacity(&self) -> usize {
        LfuCache::capacity(self)
    }
}

impl<K, V> LfuCacheTrait<K, V> for LfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn peek_lfu(&self) -> Option<(&K, &V)> {
        LfuCache::peek_lfu(self)
    }

    fn frequency(&self, key: &K) -> Option<u64> {
        LfuCache::frequency(self, key)
    }
}

#[cfg(feature = "metrics")]
impl<K, V> LfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    pub fn metrics_snapshot(&self) -> LfuMetricsSnapshot {
        LfuMetricsSnapshot {
            get_calls: self.metrics.get_calls,
            get_hits: self.metrics.get_hits,
            get_misses: self.metrics.get_misses,
            insert_calls: self.metrics.insert_calls,
            insert_updates: self.metrics.insert_updates,
            insert_new: self.metrics.insert_new,
            evict_calls: self.metrics.evict_calls,
            evicted_entries: self.metrics.evicted_entries,
            peek_lfu_calls: self.metrics.peek_lfu_calls.get(),
            peek_lfu_found: self.metrics.peek_lfu_found.get(),
            frequency_calls: self.metrics.frequency_calls.get(),
            frequency_found: self.metrics.frequency_found.get(),
            cache_len: self.len(),
            capacity: self.capacity,
        }
    }
}

#[cfg(feature = "metrics")]
impl<K, V> MetricsSnapshotProvider<LfuMetricsSnapshot> for LfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn snapshot(&self) -> LfuMetricsSnapshot {
        self.metrics_snapshot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order<K: Copy + Eq + Hash, V>(cache: &LfuCache<K, V>) -> Vec<(K, u64)> {
        cache.iter().map(|(k, _, f)| (*k, f)).collect()
    }

    // Basic LFU Behavior Tests
    mod basic_behavior {
        use super::*;

        #[test]
        fn test_put_and_get() {
            let mut cache = LfuCache::new(3);
            assert_eq!(cache.put("key1", 100), None);
            assert_eq!(cache.put("key2", 200), None);
            assert_eq!(cache.put("key3", 300), None);

            assert_eq!(cache.get(&"key1"), Some(100));
            assert_eq!(cache.get(&"key2"), Some(200));
            assert_eq!(cache.get(&"key3"), Some(300));
            assert_eq!(cache.get(&"nonexistent"), None);

            assert_eq!(cache.frequency(&"key1"), Some(2));
            assert_eq!(cache.frequency(&"key2"), Some(2));
            assert_eq!(cache.frequency(&"key3"), Some(2));
            cache.debug_validate_invariants();
        }

        #[test]
        fn test_get_ref_matches_get() {
            let mut cache = LfuCache::new(2);
            cache.put(1, String::from("one"));
            assert_eq!(cache.get_ref(&1).map(String::as_str), Some("one"));
            assert_eq!(cache.get(&1).as_deref(), Some("one"));
            assert_eq!(cache.frequency(&1), Some(3));
            assert_eq!(cache.get_ref(&2), None);
        }

        #[test]
        fn test_put_existing_replaces_value_and_counts_access() {
            let mut cache = LfuCache::new(2);
            cache.put("k", 1);
            assert_eq!(cache.put("k", 2), Some(1));
            assert_eq!(cache.put("k", 3), Some(2));

            assert_eq!(cache.len(), 1);
            assert_eq!(cache.frequency(&"k"), Some(3));
            assert_eq!(cache.peek(&"k"), Some(&3));
            cache.debug_validate_invariants();
        }

        #[test]
        fn test_capacity_enforcement() {
            let mut cache = LfuCache::new(2);
            assert_eq!(cache.len(), 0);
            assert_eq!(cache.capacity(), 2);

            for i in 0..10 {
                cache.put(i, i * 10);
                assert!(cache.len() <= cache.capacity());
            }
            assert_eq!(cache.len(), 2);
            assert_eq!(cache.size(), 2);
            cache.debug_validate_invariants();
        }

        #[test]
        fn test_lfu_eviction_order() {
            let mut cache = LfuCache::new(3);
            cache.put("key1", 100);
            cache.put("key2", 200);
            cache.put("key3", 300);

            cache.get(&"key2");
            cache.get(&"key2");
            cache.get(&"key3");

            assert_eq!(cache.frequency(&"key1"), Some(1));
            assert_eq!(cache.frequency(&"key2"), Some(3));
            assert_eq!(cache.frequency(&"key3"), Some(2));

            cache.put("key4", 400);

            assert!(!cache.contains(&"key1"));
            assert!(cache.contains(&"key2"));
            assert!(cache.contains(&"key3"));
            assert!(cache.contains(&"key4"));
            assert_eq!(cache.len(), 3);
            cache.debug_validate_invariants();
        }
    }

    // Tie-breaking within a frequency tier
    mod tie_breaking {
        use super::*;

        #[test]
        fn test_oldest_in_lowest_tier_is_evicted() {
            let mut cache = LfuCache::new(3);
            cache.put('a', 1);
            cache.put('b', 2);
            cache.put('c', 3);

            cache.put('d', 4);
            assert!(!cache.contains(&'a'));
            assert_eq!(order(&cache), vec![('b', 1), ('c', 1), ('d', 1)]);
        }

        #[test]
        fn test_promoted_entry_goes_behind_its_new_tier() {
            let mut cache = LfuCache::new(4);
            cache.put('a', ());
            cache.put('b', ());
            cache.put('c', ());
            cache.get(&'b');
            cache.get(&'c');
            cache.get(&'a');

            assert_eq!(order(&cache), vec![('b', 2), ('c', 2), ('a', 2)]);

            cache.put('d', ());
            cache.put('e', ());
            assert!(cache.contains(&'a'));
            assert!(!cache.contains(&'d'));
            assert_eq!(order(&cache), vec![('e', 1), ('b', 2), ('c', 2), ('a', 2)]);
            cache.debug_validate_invariants();
        }

        #[test]
        fn test_touching_low_entry_does_not_overtake_tier() {
            let mut cache = LfuCache::new(3);
            cache.put(1, ());
            cache.put(2, ());
            cache.get(&2);
            cache.get(&2);
            cache.put(3, ());
            cache.get(&3);
            cache.get(&3);
            // 2 and 3 both at 3; 2 got there first.
            assert_eq!(order(&cache), vec![(1, 1), (2, 3), (3, 3)]);

            cache.get(&1);
            cache.get(&1);
            assert_eq!(order(&cache), vec![(2, 3), (3, 3), (1, 3)]);

            cache.put(4, ());
            assert_eq!(order(&cache), vec![(4, 1), (3, 3), (1, 3)]);
        }
    }

    // Construction and capacity validation
    mod construction {
        use super::*;

        #[test]
        fn test_try_new_rejects_zero_and_negative() {
            assert!(LfuCache::<u8, u8>::try_new(0usize).is_err());
            assert!(LfuCache::<u8, u8>::try_new(0i32).is_err());
            let err = LfuCache::<u8, u8>::try_new(-1i32).unwrap_err();
            assert!(err.message().contains("-1"));
        }

        #[test]
        fn test_try_new_accepts_positive() {
            let cache = LfuCache::<u8, u8>::try_new(5u16).unwrap();
            assert_eq!(cache.capacity(), 5);
            assert!(cache.is_empty());
        }

        #[test]
        #[should_panic(expected = "capacity must be greater than zero")]
        fn test_new_panics_on_zero() {
            let _ = LfuCache::<u8, u8>::new(0);
        }

        #[test]
        fn test_default_capacity() {
            let cache: LfuCache<u64, u64> = LfuCache::default();
            assert_eq!(cache.capacity(), DEFAULT_CAPACITY);
            assert_eq!(LfuCache::<u64, u64>::new_default().capacity(), 100);
        }

        #[test]
        fn test_huge_capacity_does_not_preallocate_everything() {
            let mut cache = LfuCache::new(usize::MAX);
            cache.put(1u8, 1u8);
            assert_eq!(cache.get(&1), Some(1));
        }
    }

    // Edge cases
    mod edge_cases {
        use super::*;

        #[test]
        fn test_single_item_cache() {
            let mut cache = LfuCache::new(1);
            cache.put("only", 1);
            cache.get(&"only");
            cache.get(&"only");
            cache.put("next", 2);

            assert!(!cache.contains(&"only"));
            assert_eq!(cache.get(&"next"), Some(2));
            assert_eq!(cache.len(), 1);
            cache.debug_validate_invariants();
        }

        #[test]
        fn test_miss_changes_nothing() {
            let mut cache = LfuCache::new(2);
            cache.put(1, 'a');
            cache.get(&1);
            let before = order(&cache);

            assert_eq!(cache.get(&99), None);
            assert_eq!(cache.get_ref(&98), None);
            assert_eq!(order(&cache), before);
            assert_eq!(cache.len(), 1);
        }

        #[test]
        fn test_read_only_calls_do_not_count() {
            let mut cache = LfuCache::new(2);
            cache.put(1, 'a');
            cache.put(2, 'b');

            assert_eq!(cache.peek(&1), Some(&'a'));
            assert!(cache.contains(&1));
            assert_eq!(cache.frequency(&1), Some(1));
            assert_eq!(cache.peek_lfu(), Some((&1, &'a')));
            assert_eq!(cache.iter().count(), 2);

            assert_eq!(order(&cache), vec![(1, 1), (2, 1)]);
        }

        #[test]
        fn test_empty_cache_operations() {
            let mut cache: LfuCache<u32, u32> = LfuCache::new(4);
            assert!(cache.is_empty());
            assert_eq!(cache.peek_lfu(), None);
            assert_eq!(cache.frequency(&1), None);
            assert_eq!(cache.peek(&1), None);
            assert_eq!(cache.get(&1), None);
            assert_eq!(cache.iter().next(), None);
            cache.debug_validate_invariants();
        }

        #[test]
        fn test_fill_drain_refill_cycles() {
            let mut cache = LfuCache::new(3);
            for round in 0..5u32 {
                for k in 0..6u32 {
                    cache.put(round * 10 + k, k);
                    cache.debug_validate_invariants();
                }
                assert_eq!(cache.len(), 3);
            }
        }
    }

    // Update and eviction paths share the index
    mod update_and_evict {
        use super::*;

        #[test]
        fn test_updates_between_evictions_keep_index_in_sync() {
            let mut cache = LfuCache::new(2);
            for round in 0..20u32 {
                assert_eq!(cache.put(round, round), None);
                assert_eq!(cache.put(round, round + 1), Some(round));
                assert_eq!(cache.frequency(&round), Some(2));
                cache.debug_validate_invariants();
            }
            assert_eq!(cache.len(), 2);
            assert!(cache.contains(&18));
            assert!(cache.contains(&19));
        }

        #[test]
        fn test_eviction_drops_key_and_value() {
            use std::rc::Rc;

            let value = Rc::new(());
            let mut cache = LfuCache::new(1);
            cache.put("a", Rc::clone(&value));
            assert_eq!(Rc::strong_count(&value), 2);

            cache.put("b", Rc::new(()));
            assert_eq!(Rc::strong_count(&value), 1);
            assert!(!cache.contains(&"a"));
            cache.debug_validate_invariants();
        }
    }

    // Trait object-safety and delegation
    mod trait_impls {
        use super::*;

        fn via_core<C: CoreCache<u32, &'static str>>(cache: &mut C) -> Option<&'static str> {
            cache.put(1, "x");
            cache.put(2, "y");
            cache.get(&1).copied()
        }

        #[test]
        fn test_core_cache_delegates() {
            let mut cache = LfuCache::new(2);
            assert_eq!(via_core(&mut cache), Some("x"));
            assert_eq!(CoreCache::len(&cache), 2);
            assert!(!CoreCache::is_empty(&cache));
            assert_eq!(CoreCache::capacity(&cache), 2);
            assert!(CoreCache::contains(&cache, &2));
            assert_eq!(LfuCacheTrait::frequency(&cache, &1), Some(2));
            assert_eq!(LfuCacheTrait::peek_lfu(&cache).map(|(k, _)| *k), Some(2));
        }
    }

    #[cfg(feature = "metrics")]
    mod metrics {
        use super::*;

        #[test]
        fn test_metrics_snapshot_counts_operations() {
            let mut cache = LfuCache::new(2);
            cache.put(1, 1);
            cache.put(2, 2);
            cache.put(1, 10);
            cache.get(&1);
            cache.get(&7);
            cache.put(3, 3);
            cache.frequency(&1);
            cache.peek_lfu();

            let snapshot = cache.snapshot();
            assert_eq!(snapshot.insert_calls, 4);
            assert_eq!(snapshot.insert_new, 3);
            assert_eq!(snapshot.insert_updates, 1);
            assert_eq!(snapshot.get_hits, 1);
            assert_eq!(snapshot.get_misses, 1);
            assert_eq!(snapshot.evict_calls, 1);
            assert_eq!(snapshot.evicted_entries, 1);
            assert_eq!(snapshot.frequency_found, 1);
            assert_eq!(snapshot.peek_lfu_found, 1);
            assert_eq!(snapshot.cache_len, 2);
            assert_eq!(snapshot.capacity, 2);
        }
    }
}
