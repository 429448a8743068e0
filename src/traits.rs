//! # Cache Traits
//!
//! Small trait layer over the cache so callers can be written against the
//! operation set rather than the concrete type.
//!
//! ```text
//!   ┌─────────────────────────────────────────┐
//!   │            CoreCache<K, V>              │
//!   │                                         │
//!   │  put(&mut, K, V) → Option<V>            │
//!   │  get(&mut, &K) → Option<&V>             │
//!   │  contains(&, &K) → bool                 │
//!   │  len(&) → usize                         │
//!   │  is_empty(&) → bool                     │
//!   │  capacity(&) → usize                    │
//!   └──────────────────┬──────────────────────┘
//!                      │
//!                      ▼
//!   ┌─────────────────────────────────────────┐
//!   │          LfuCacheTrait<K, V>            │
//!   │                                         │
//!   │  peek_lfu(&) → Option<(&K, &V)>         │
//!   │  frequency(&, &K) → Option<u64>         │
//!   └─────────────────────────────────────────┘
//! ```
//!
//! There is deliberately no `remove` or `clear`: entries leave the cache
//! only through capacity eviction.
//!
//! ## Thread Safety
//!
//! Implementations are single-threaded. `get` mutates ordering state, so
//! sharing a cache across threads needs one exclusive lock around every
//! operation (`Mutex<C>`); a read/write lock gives no benefit.

/// Core cache operations.
///
/// # Example
///
/// ```
/// use lfukit::traits::CoreCache;
/// use lfukit::policy::lfu::LfuCache;
///
/// fn warm_cache<C: CoreCache<u64, String>>(cache: &mut C, data: &[(u64, String)]) {
///     for (key, value) in data {
///         cache.put(*key, value.clone());
///     }
/// }
///
/// let mut cache = LfuCache::new(100);
/// warm_cache(&mut cache, &[(1, "one".to_string()), (2, "two".to_string())]);
/// assert_eq!(CoreCache::len(&cache), 2);
/// ```
pub trait CoreCache<K, V> {
    /// Inserts or overwrites `key`, returning the previous value if it existed.
    ///
    /// Overwriting counts as an access. Inserting a new key into a full cache
    /// evicts one entry first.
    fn put(&mut self, key: K, value: V) -> Option<V>;

    /// Returns a reference to the value for `key`, recording an access.
    fn get(&mut self, key: &K) -> Option<&V>;

    /// Returns `true` if `key` is present. Does not record an access.
    fn contains(&self, key: &K) -> bool;

    /// Returns the number of entries.
    fn len(&self) -> usize;

    /// Returns `true` if the cache holds no entries.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the fixed maximum number of entries.
    fn capacity(&self) -> usize;
}

/// LFU-specific read-only operations.
///
/// # Example
///
/// ```
/// use lfukit::traits::{CoreCache, LfuCacheTrait};
/// use lfukit::policy::lfu::LfuCache;
///
/// fn next_victim<C: LfuCacheTrait<u64, &'static str>>(cache: &C) -> Option<u64> {
///     cache.peek_lfu().map(|(key, _)| *key)
/// }
///
/// let mut cache: LfuCache<u64, &str> = LfuCache::new(10);
/// cache.put(1, "first");
/// cache.put(2, "second");
/// cache.get(&1);
///
/// assert_eq!(next_victim(&cache), Some(2));
/// assert_eq!(LfuCacheTrait::frequency(&cache, &1), Some(2));
/// ```
pub trait LfuCacheTrait<K, V>: CoreCache<K, V> {
    /// Returns the entry that the next eviction would remove.
    ///
    /// That is the entry with the lowest frequency; among equals, the one
    /// that has held that frequency longest. Does not record an access.
    fn peek_lfu(&self) -> Option<(&K, &V)>;

    /// Returns the access frequency of `key`, or `None` if absent.
    fn frequency(&self, key: &K) -> Option<u64>;
}
