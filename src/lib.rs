//! lfukit: a fixed-capacity LFU (least frequently used) cache.
//!
//! Entries live in a slot arena threaded by a doubly linked list kept sorted
//! by access count; a hash index maps keys to slots. When a new key arrives at
//! capacity the list head, the oldest entry of the lowest frequency, is
//! evicted.
//!
//! ```
//! use lfukit::prelude::*;
//!
//! let mut cache = LfuCache::new(2);
//! cache.put("a", 1);
//! cache.put("b", 2);
//! cache.get(&"a");
//! cache.put("c", 3); // evicts "b"
//!
//! assert!(!cache.contains(&"b"));
//! assert_eq!(cache.frequency(&"a"), Some(2));
//! ```

pub mod builder;
pub mod ds;
pub mod error;
pub mod policy;

#[cfg(feature = "metrics")]
pub mod metrics;

pub mod prelude;
pub mod traits;

pub use crate::ds::{FrequencyList, SlotId};
pub use crate::policy::lfu::LfuCache;
