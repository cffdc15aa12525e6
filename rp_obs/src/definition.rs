//! ABOUTME: Fixed table of pool metrics and their field selectors
//! ABOUTME: Each row binds a metric name, help text and value kind to one stats field

use prometheus_client::metrics::MetricType;
use rp_core::{fq_name, PoolStats};

/// Subsystem segment shared by every pool metric name
pub const SUBSYSTEM: &str = "redis";

/// How a metric value behaves between scrapes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// Monotonically non-decreasing (modulo resets)
    Counter,
    /// Freely fluctuating instantaneous value
    Gauge,
}

impl ValueKind {
    pub fn metric_type(self) -> MetricType {
        match self {
            ValueKind::Counter => MetricType::Counter,
            ValueKind::Gauge => MetricType::Gauge,
        }
    }
}

/// Selects one counter out of a [`PoolStats`] snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatField {
    Hits,
    Misses,
    Timeouts,
    TotalConns,
    IdleConns,
    StaleConns,
}

impl StatField {
    pub fn read(self, stats: &PoolStats) -> u64 {
        match self {
            StatField::Hits => stats.hits,
            StatField::Misses => stats.misses,
            StatField::Timeouts => stats.timeouts,
            StatField::TotalConns => stats.total_conns,
            StatField::IdleConns => stats.idle_conns,
            StatField::StaleConns => stats.stale_conns,
        }
    }
}

/// Name, help text and value kind of one exposed metric. Pool metrics carry no labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricDescriptor {
    pub name: String,
    pub help: &'static str,
    pub kind: ValueKind,
}

/// A descriptor paired with the stats field it reads
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricDefinition {
    pub descriptor: MetricDescriptor,
    pub field: StatField,
}

impl MetricDefinition {
    /// Read this metric's value from a snapshot
    pub fn extract(&self, stats: &PoolStats) -> f64 {
        self.field.read(stats) as f64
    }
}

// stale_conns is a counter: providers must report a cumulative eviction total.
const POOL_METRICS: [(&str, &str, ValueKind, StatField); 6] = [
    (
        "hits",
        "Number of times free connection was found in the pool.",
        ValueKind::Counter,
        StatField::Hits,
    ),
    (
        "misses",
        "Number of times free connection was NOT found in the pool.",
        ValueKind::Counter,
        StatField::Misses,
    ),
    (
        "timeouts",
        "Number of times a wait timeout occurred.",
        ValueKind::Counter,
        StatField::Timeouts,
    ),
    (
        "total_conns",
        "Number of total connections in the pool.",
        ValueKind::Gauge,
        StatField::TotalConns,
    ),
    (
        "idle_conns",
        "Number of idle connections in the pool.",
        ValueKind::Gauge,
        StatField::IdleConns,
    ),
    (
        "stale_conns",
        "Number of stale connections removed from the pool.",
        ValueKind::Counter,
        StatField::StaleConns,
    ),
];

/// Build the pool metric table for `namespace`, in exposition order
pub fn pool_metric_table(namespace: &str) -> Vec<MetricDefinition> {
    POOL_METRICS
        .iter()
        .map(|&(suffix, help, kind, field)| MetricDefinition {
            descriptor: MetricDescriptor {
                name: fq_name(namespace, SUBSYSTEM, suffix),
                help,
                kind,
            },
            field,
        })
        .collect()
}
