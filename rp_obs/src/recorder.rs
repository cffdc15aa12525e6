//! ABOUTME: Atomic pool counters that serve as a stats provider
//! ABOUTME: Lets a pool integration record events without owning metric types

use std::sync::atomic::{AtomicU64, Ordering};

use rp_core::{PoolStats, StatsProvider};

/// Lock-free pool statistics that a pool wrapper updates as it works
#[derive(Debug, Default)]
pub struct SharedPoolStats {
    hits: AtomicU64,
    misses: AtomicU64,
    timeouts: AtomicU64,
    total_conns: AtomicU64,
    idle_conns: AtomicU64,
    stale_conns: AtomicU64,
}

impl SharedPoolStats {
    /// Create zeroed pool stats
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a free connection found in the pool
    pub fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a request that had to dial a new connection
    pub fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a wait for a connection that timed out
    pub fn record_timeout(&self) {
        self.timeouts.fetch_add(1, Ordering::Relaxed);
    }

    /// Record `count` stale connections removed from the pool
    pub fn record_stale(&self, count: u64) {
        self.stale_conns.fetch_add(count, Ordering::Relaxed);
    }

    /// Update the total connection count
    pub fn set_total(&self, count: u64) {
        self.total_conns.store(count, Ordering::Relaxed);
    }

    /// Update the idle connection count
    pub fn set_idle(&self, count: u64) {
        self.idle_conns.store(count, Ordering::Relaxed);
    }
}

impl StatsProvider for SharedPoolStats {
    fn pool_stats(&self) -> PoolStats {
        PoolStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            timeouts: self.timeouts.load(Ordering::Relaxed),
            total_conns: self.total_conns.load(Ordering::Relaxed),
            idle_conns: self.idle_conns.load(Ordering::Relaxed),
            stale_conns: self.stale_conns.load(Ordering::Relaxed),
        }
    }
}
