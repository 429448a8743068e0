use std::sync::atomic::{AtomicU64, Ordering};

/// Counter that can be bumped through a shared reference.
///
/// Used for calls that only take `&self` on the cache (`peek_lfu`,
/// `frequency`). Counts are observational, so relaxed ordering is enough.
#[derive(Debug, Default)]
pub struct MetricsCell(AtomicU64);

impl MetricsCell {
    #[inline]
    pub fn new() -> Self {
        Self(AtomicU64::new(0))
    }

    #[inline]
    pub fn get(&self) -> u64 {
        self.0.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn incr(&self) {
        self.0.fetch_add(1, Ordering::Relaxed);
    }
}
