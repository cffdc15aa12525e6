//! ABOUTME: Pool metric adapter exposing connection pool counters to Prometheus
//! ABOUTME: Maps pool stats snapshots to named counters and gauges on each scrape

pub mod adapter;
pub mod definition;
pub mod recorder;
pub mod registry;

pub use adapter::{MetricSample, MetricSource, PoolMetricAdapter};
pub use definition::{MetricDefinition, MetricDescriptor, StatField, ValueKind};
pub use recorder::SharedPoolStats;
pub use registry::PoolMetrics;
