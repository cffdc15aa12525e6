//! ABOUTME: Shared testing utilities and helper functions
//! ABOUTME: Stub stats providers and fixtures for all crates

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use rp_core::{PoolStats, StatsProvider};

/// Provider that always returns the same snapshot and counts calls
#[derive(Debug, Default)]
pub struct StubStatsProvider {
    stats: PoolStats,
    calls: AtomicUsize,
}

impl StubStatsProvider {
    pub fn new(stats: PoolStats) -> Self {
        Self {
            stats,
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of times `pool_stats` has been called
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl StatsProvider for StubStatsProvider {
    fn pool_stats(&self) -> PoolStats {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.stats
    }
}

/// Provider that hands out scripted snapshots in order, repeating the last one
#[derive(Debug)]
pub struct SequenceStatsProvider {
    snapshots: Vec<PoolStats>,
    calls: Mutex<usize>,
}

impl SequenceStatsProvider {
    pub fn new(snapshots: Vec<PoolStats>) -> Self {
        Self {
            snapshots,
            calls: Mutex::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

impl StatsProvider for SequenceStatsProvider {
    fn pool_stats(&self) -> PoolStats {
        let mut calls = self.calls.lock().unwrap();
        let index = (*calls).min(self.snapshots.len().saturating_sub(1));
        *calls += 1;
        self.snapshots.get(index).copied().unwrap_or_default()
    }
}

/// Snapshot used by the end-to-end scenarios
pub fn sample_pool_stats() -> PoolStats {
    PoolStats {
        hits: 10,
        misses: 2,
        timeouts: 0,
        total_conns: 5,
        idle_conns: 3,
        stale_conns: 1,
    }
}

/// Value of the sample line named exactly `name` in exposition text
///
/// Matches the whole metric name, so `redis_hits_total` never matches
/// `redis_hits_total_x` and `1.0` is never confused with `13.0`.
pub fn scrape_value(text: &str, name: &str) -> Option<f64> {
    text.lines()
        .filter(|line| !line.starts_with('#'))
        .find_map(|line| {
            let mut parts = line.split_whitespace();
            if parts.next()? != name {
                return None;
            }
            parts.next()?.parse().ok()
        })
}
