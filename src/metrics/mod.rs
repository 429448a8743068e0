//! Optional cache metrics, enabled with the `metrics` feature.
//!
//! Recording, snapshotting and export are separate concerns:
//! the cache writes counters through the recorder traits, callers read them
//! through [`MetricsSnapshotProvider`](traits::MetricsSnapshotProvider), and
//! an exporter publishes snapshots to a monitoring system.

pub mod cell;
pub mod exporter;
pub mod metrics_impl;
pub mod snapshot;
pub mod traits;
