//! Builder for configuring an [`LfuCache`].
//!
//! ## Example
//!
//! ```rust
//! use lfukit::builder::LfuCacheBuilder;
//!
//! let mut cache = LfuCacheBuilder::new(100).build::<u64, String>();
//! cache.put(1, "hello".to_string());
//! assert_eq!(cache.get(&1), Some("hello".to_string()));
//! ```

use std::hash::Hash;

use tracing::warn;

use crate::error::ConfigError;
use crate::policy::lfu::{DEFAULT_CAPACITY, LfuCache, validate_capacity};

/// Builder for creating LFU cache instances.
#[derive(Debug, Clone)]
pub struct LfuCacheBuilder {
    capacity: usize,
    preallocate: bool,
}

impl LfuCacheBuilder {
    /// Create a new cache builder with the specified capacity.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            preallocate: true,
        }
    }

    /// Reserve index and entry storage up front (default `true`).
    ///
    /// Very large capacities only reserve a bounded amount either way.
    pub fn preallocate(mut self, preallocate: bool) -> Self {
        self.preallocate = preallocate;
        self
    }

    /// Build the cache.
    ///
    /// # Panics
    ///
    /// Panics if the capacity is zero. Use [`try_build`](Self::try_build)
    /// to handle that case.
    ///
    /// # Example
    ///
    /// ```rust
    /// use lfukit::builder::LfuCacheBuilder;
    ///
    /// let cache = LfuCacheBuilder::new(16)
    ///     .preallocate(false)
    ///     .build::<u32, Vec<u8>>();
    /// assert_eq!(cache.capacity(), 16);
    /// ```
    pub fn build<K, V>(self) -> LfuCache<K, V>
    where
        K: Eq + Hash + Clone,
    {
        match self.try_build() {
            Ok(cache) => cache,
            Err(e) => panic!("{}", e),
        }
    }

    /// Build the cache, returning [`ConfigError`] on invalid settings.
    pub fn try_build<K, V>(self) -> Result<LfuCache<K, V>, ConfigError>
    where
        K: Eq + Hash + Clone,
    {
        let capacity = validate_capacity(self.capacity)
            .inspect_err(|err| warn!(error = %err, "rejected lfu cache builder"))?;
        Ok(LfuCache::with_validated_capacity(capacity, self.preallocate))
    }
}

impl Default for LfuCacheBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
