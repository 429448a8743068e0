pub use crate::builder::LfuCacheBuilder;
pub use crate::error::{ConfigError, InvariantError};
pub use crate::policy::lfu::{DEFAULT_CAPACITY, LfuCache};
pub use crate::traits::{CoreCache, LfuCacheTrait};

#[cfg(feature = "metrics")]
pub use crate::metrics::snapshot::LfuMetricsSnapshot;
#[cfg(feature = "metrics")]
pub use crate::metrics::traits::{MetricsExporter, MetricsSnapshotProvider};
