//! ABOUTME: Prometheus registry wrapper for pool metric sources
//! ABOUTME: Rejects metric name collisions at registration and encodes scrape text

use std::sync::{Arc, Mutex};

use prometheus_client::{collector::Collector, encoding::text::encode, registry::Registry};
use rp_core::{Error, Result};
use tracing::{error, info};

use crate::adapter::MetricSource;

#[derive(Debug, Default)]
struct Inner {
    registry: Registry,
    names: Vec<String>,
}

/// Metrics registry for Prometheus
#[derive(Debug, Clone, Default)]
pub struct PoolMetrics {
    inner: Arc<Mutex<Inner>>,
}

impl PoolMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a metric source after checking its names against everything
    /// already registered. Nothing is registered when a collision is found.
    pub fn register<S>(&self, source: S) -> Result<()>
    where
        S: MetricSource + Collector,
    {
        let mut inner = self.lock("register")?;

        let described: Vec<String> = source
            .describe()
            .iter()
            .map(|descriptor| descriptor.name.clone())
            .collect();

        for (i, name) in described.iter().enumerate() {
            if inner.names.contains(name) || described[..i].contains(name) {
                error!(name = %name, "Metric name already registered");
                return Err(Error::DuplicateMetric(name.clone()));
            }
        }

        inner.registry.register_collector(Box::new(source));
        info!(metrics = described.len(), "Registered pool metric source");
        inner.names.extend(described);

        Ok(())
    }

    /// Names of all registered metrics, in registration order
    pub fn registered_names(&self) -> Result<Vec<String>> {
        Ok(self.lock("registered_names")?.names.clone())
    }

    /// Encode all registered metrics in the OpenMetrics text format
    ///
    /// Counter sample lines carry the OpenMetrics `_total` suffix
    /// (`redis_hits_total 10.0`); `# HELP`/`# TYPE` lines and
    /// [`registered_names`](Self::registered_names) use the bare name.
    pub fn encode(&self) -> Result<String> {
        let inner = self.lock("encode")?;

        let mut buffer = String::new();
        encode(&mut buffer, &inner.registry)
            .map_err(|e| Error::Encode(format!("Failed to encode metrics: {}", e)))?;

        Ok(buffer)
    }

    fn lock(&self, operation: &str) -> Result<std::sync::MutexGuard<'_, Inner>> {
        self.inner.lock().map_err(|e| {
            Error::Registry(format!(
                "Failed to lock metrics registry for {}: {}",
                operation, e
            ))
        })
    }
}
