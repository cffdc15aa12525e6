//! ABOUTME: Scrape-time adapter from pool stats snapshots to metric samples
//! ABOUTME: Implements describe/collect and the prometheus-client Collector hook

use std::sync::Arc;

use prometheus_client::{
    collector::Collector,
    encoding::{DescriptorEncoder, EncodeMetric},
    metrics::{counter::ConstCounter, gauge::ConstGauge},
};
use rp_config::MetricsConfig;
use rp_core::{is_valid_metric_name, Error, PoolStats, Result, StatsProvider};
use tracing::{debug, trace, warn};

use crate::definition::{pool_metric_table, MetricDefinition, MetricDescriptor, ValueKind};

/// One value read during a scrape, tied to the descriptor it belongs to
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricSample<'a> {
    pub descriptor: &'a MetricDescriptor,
    pub value: f64,
}

impl MetricSample<'_> {
    pub fn name(&self) -> &str {
        &self.descriptor.name
    }

    pub fn kind(&self) -> ValueKind {
        self.descriptor.kind
    }
}

/// Two-phase exposition contract used by the registry
pub trait MetricSource {
    /// Descriptors of every metric this source emits, in a stable order
    fn describe(&self) -> Vec<&MetricDescriptor>;

    /// Samples for the current scrape, one per descriptor
    fn collect(&self) -> Vec<MetricSample<'_>>;
}

/// Republishes a connection pool's counters as `[<namespace>_]redis_*` metrics
#[derive(Debug, Clone)]
pub struct PoolMetricAdapter {
    definitions: Vec<MetricDefinition>,
    provider: Arc<dyn StatsProvider>,
}

impl PoolMetricAdapter {
    /// Build the adapter for `namespace` (may be empty)
    ///
    /// Fails with [`Error::InvalidMetricName`] when the namespace would produce
    /// names outside the Prometheus metric grammar.
    pub fn build(namespace: &str, provider: Arc<dyn StatsProvider>) -> Result<Self> {
        let definitions = pool_metric_table(namespace);

        if let Some(bad) = definitions
            .iter()
            .find(|def| !is_valid_metric_name(&def.descriptor.name))
        {
            warn!(namespace = %namespace, name = %bad.descriptor.name, "Rejected pool metric name");
            return Err(Error::InvalidMetricName(format!(
                "'{}' built from namespace '{}'",
                bad.descriptor.name, namespace
            )));
        }

        debug!(
            namespace = %namespace,
            metrics = definitions.len(),
            "Pool metric adapter built"
        );

        Ok(Self {
            definitions,
            provider,
        })
    }

    /// Build the adapter using the configured namespace
    pub fn from_config(config: &MetricsConfig, provider: Arc<dyn StatsProvider>) -> Result<Self> {
        Self::build(&config.namespace, provider)
    }

    pub fn definitions(&self) -> &[MetricDefinition] {
        &self.definitions
    }

    fn samples_from<'a>(&'a self, stats: &PoolStats) -> Vec<MetricSample<'a>> {
        self.definitions
            .iter()
            .map(|def| MetricSample {
                descriptor: &def.descriptor,
                value: def.extract(stats),
            })
            .collect()
    }
}

impl MetricSource for PoolMetricAdapter {
    fn describe(&self) -> Vec<&MetricDescriptor> {
        self.definitions.iter().map(|def| &def.descriptor).collect()
    }

    fn collect(&self) -> Vec<MetricSample<'_>> {
        // Single provider call per scrape: all samples share one snapshot
        let stats = self.provider.pool_stats();
        trace!(?stats, "Collected pool stats");
        self.samples_from(&stats)
    }
}

impl Collector for PoolMetricAdapter {
    fn encode(&self, mut encoder: DescriptorEncoder) -> std::result::Result<(), std::fmt::Error> {
        for sample in self.collect() {
            let descriptor = sample.descriptor;
            let metric_encoder = encoder.encode_descriptor(
                &descriptor.name,
                descriptor.help,
                None,
                descriptor.kind.metric_type(),
            )?;

            match descriptor.kind {
                ValueKind::Counter => ConstCounter::new(sample.value).encode(metric_encoder)?,
                ValueKind::Gauge => ConstGauge::new(sample.value).encode(metric_encoder)?,
            }
        }

        Ok(())
    }
}
