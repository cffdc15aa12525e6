// ABOUTME: Point-in-time connection pool counters and the capability that serves them.
// ABOUTME: The pool owns its counters; metric code only reads snapshots.
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::sync::Arc;

/// Snapshot of a keyed-connection pool's counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PoolStats {
    /// Number of times a free connection was found in the pool
    pub hits: u64,
    /// Number of times a free connection was NOT found in the pool
    pub misses: u64,
    /// Number of times a wait timeout occurred
    pub timeouts: u64,
    /// Total connections currently in the pool
    pub total_conns: u64,
    /// Idle connections currently in the pool
    pub idle_conns: u64,
    /// Stale connections removed from the pool
    pub stale_conns: u64,
}

/// Source of fresh pool statistics
///
/// Implementations must always return a snapshot. A pool that can fail to
/// report should hand back a zeroed [`PoolStats`] instead.
pub trait StatsProvider: Debug + Send + Sync {
    /// Fetch the current pool statistics
    fn pool_stats(&self) -> PoolStats;
}

impl<T: StatsProvider + ?Sized> StatsProvider for Arc<T> {
    fn pool_stats(&self) -> PoolStats {
        (**self).pool_stats()
    }
}
