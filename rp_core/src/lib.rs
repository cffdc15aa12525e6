//! ABOUTME: Core types, errors, metric naming, and tracing utilities
//! ABOUTME: Foundation crate used by all other redpool components

pub mod error;
pub mod naming;
pub mod stats;
pub mod telemetry;

pub use error::{Error, Result};
pub use naming::{fq_name, is_valid_metric_name};
pub use stats::{PoolStats, StatsProvider};
