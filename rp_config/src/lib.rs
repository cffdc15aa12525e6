//! ABOUTME: Configuration management with validation and environment loading
//! ABOUTME: Handles metric namespace and telemetry settings from environment and files

use config::{Config as ConfigBuilder, Environment, File};
use rp_core::{fq_name, is_valid_metric_name, Error, Result};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Main configuration struct
#[derive(Debug, Clone, Deserialize, Serialize, Validate, Default)]
#[serde(default)]
pub struct Config {
    #[validate(nested)]
    pub metrics: MetricsConfig,
    #[validate(nested)]
    pub telemetry: TelemetryConfig,
}

/// Pool metric exposition settings
#[derive(Debug, Clone, Deserialize, Serialize, Validate, Default)]
#[serde(default)]
pub struct MetricsConfig {
    /// Optional prefix prepended to every pool metric name
    #[validate(custom(function = "validate_namespace"))]
    pub namespace: String,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
#[serde(default)]
pub struct TelemetryConfig {
    /// "production" switches to JSON log lines
    #[validate(length(min = 1))]
    pub env: String,
    #[validate(length(min = 1))]
    pub service: String,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            env: "development".to_string(),
            service: "redpool".to_string(),
        }
    }
}

/// Empty is allowed; otherwise the namespace must produce legal metric names
fn validate_namespace(namespace: &str) -> std::result::Result<(), ValidationError> {
    if namespace.is_empty() || is_valid_metric_name(&fq_name(namespace, "redis", "hits")) {
        return Ok(());
    }

    let mut err = ValidationError::new("metric_namespace");
    err.message = Some(format!("'{}' is not a valid metric namespace", namespace).into());
    Err(err)
}

impl Config {
    /// Load configuration from environment variables and optional .env file
    pub fn load() -> Result<Self> {
        let mut builder = ConfigBuilder::builder();

        builder = builder
            .set_default("metrics.namespace", "")?
            .set_default("telemetry.env", "development")?
            .set_default("telemetry.service", "redpool")?;

        // Try to load from .env file if it exists (optional)
        if std::path::Path::new(".env").exists() {
            builder = builder.add_source(File::with_name(".env").required(false));
        }

        // REDPOOL_METRICS__NAMESPACE, REDPOOL_TELEMETRY__ENV, ... (highest priority)
        builder = builder.add_source(
            Environment::with_prefix("REDPOOL")
                .prefix_separator("_")
                .separator("__"),
        );

        let config = builder
            .build()
            .map_err(|e| Error::Config(format!("Failed to build config: {}", e)))?;

        let parsed: Config = config
            .try_deserialize()
            .map_err(|e| Error::Config(format!("Failed to deserialize config: {}", e)))?;

        parsed
            .validate()
            .map_err(|e| Error::Config(format!("Config validation failed: {}", e)))?;

        Ok(parsed)
    }
}
