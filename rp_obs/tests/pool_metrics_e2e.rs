//! ABOUTME: End-to-end test for pool metric exposition
//! ABOUTME: Wires configuration, adapter, registry and text encoding together

use std::env;
use std::sync::{Arc, Mutex};

use rp_config::Config;
use rp_core::{telemetry, Error};
use rp_obs::{MetricSource, PoolMetricAdapter, PoolMetrics, SharedPoolStats, ValueKind};
use test_support::{sample_pool_stats, scrape_value, StubStatsProvider};

static ENV_MUTEX: Mutex<()> = Mutex::new(());

fn load_config(namespace: Option<&str>) -> Result<Config, Error> {
    match namespace {
        Some(ns) => env::set_var("REDPOOL_METRICS__NAMESPACE", ns),
        None => env::remove_var("REDPOOL_METRICS__NAMESPACE"),
    }
    let result = Config::load();
    env::remove_var("REDPOOL_METRICS__NAMESPACE");
    result
}

#[test]
fn test_configured_namespace_scrape() {
    let _lock = ENV_MUTEX.lock().unwrap();
    let config = load_config(Some("myapp")).expect("Should load config");
    telemetry::init_tracing(&config.telemetry.env, &config.telemetry.service);

    let provider = Arc::new(StubStatsProvider::new(sample_pool_stats()));
    let adapter = PoolMetricAdapter::from_config(&config.metrics, provider.clone())
        .expect("Should build adapter");

    let samples: Vec<_> = adapter
        .collect()
        .iter()
        .map(|s| (s.name().to_string(), s.value, s.kind()))
        .collect();
    assert_eq!(provider.calls(), 1);
    assert_eq!(
        samples,
        vec![
            ("myapp_redis_hits".to_string(), 10.0, ValueKind::Counter),
            ("myapp_redis_misses".to_string(), 2.0, ValueKind::Counter),
            ("myapp_redis_timeouts".to_string(), 0.0, ValueKind::Counter),
            ("myapp_redis_total_conns".to_string(), 5.0, ValueKind::Gauge),
            ("myapp_redis_idle_conns".to_string(), 3.0, ValueKind::Gauge),
            ("myapp_redis_stale_conns".to_string(), 1.0, ValueKind::Counter),
        ]
    );

    let metrics = PoolMetrics::new();
    metrics.register(adapter).expect("Should register adapter");

    let text = metrics.encode().expect("Should encode");
    assert_eq!(provider.calls(), 2);
    assert!(text.contains("# TYPE myapp_redis_stale_conns counter"));
    assert_eq!(scrape_value(&text, "myapp_redis_stale_conns_total"), Some(1.0));
    assert!(text.contains("# TYPE myapp_redis_idle_conns gauge"));
    assert_eq!(scrape_value(&text, "myapp_redis_idle_conns"), Some(3.0));
    assert_eq!(scrape_value(&text, "myapp_redis_hits_total"), Some(10.0));
    assert_eq!(scrape_value(&text, "myapp_redis_total_conns"), Some(5.0));
}

#[test]
fn test_default_namespace_drops_prefix() {
    let _lock = ENV_MUTEX.lock().unwrap();
    let config = load_config(None).expect("Should load config");

    let adapter = PoolMetricAdapter::from_config(&config.metrics, Arc::new(SharedPoolStats::new()))
        .expect("Should build adapter");

    let names: Vec<_> = adapter.describe().iter().map(|d| d.name.clone()).collect();
    assert_eq!(
        names,
        vec![
            "redis_hits",
            "redis_misses",
            "redis_timeouts",
            "redis_total_conns",
            "redis_idle_conns",
            "redis_stale_conns",
        ]
    );
}

#[test]
fn test_live_recorder_reflected_in_scrape() {
    let stats = Arc::new(SharedPoolStats::new());
    let metrics = PoolMetrics::new();
    metrics
        .register(PoolMetricAdapter::build("live", stats.clone()).unwrap())
        .unwrap();

    stats.record_hit();
    stats.record_miss();
    stats.set_total(4);
    stats.set_idle(2);

    let text = metrics.encode().unwrap();
    assert_eq!(scrape_value(&text, "live_redis_hits_total"), Some(1.0));
    assert_eq!(scrape_value(&text, "live_redis_misses_total"), Some(1.0));
    assert_eq!(scrape_value(&text, "live_redis_total_conns"), Some(4.0));
    assert_eq!(scrape_value(&text, "live_redis_idle_conns"), Some(2.0));

    stats.record_hit();
    let text = metrics.encode().unwrap();
    assert_eq!(scrape_value(&text, "live_redis_hits_total"), Some(2.0));
}

#[test]
fn test_scrape_values_are_exact() {
    let stats = Arc::new(SharedPoolStats::new());
    let metrics = PoolMetrics::new();
    metrics
        .register(PoolMetricAdapter::build("exact", stats.clone()).unwrap())
        .unwrap();

    for _ in 0..13 {
        stats.record_hit();
    }
    stats.set_total(42);

    let text = metrics.encode().unwrap();
    assert_eq!(scrape_value(&text, "exact_redis_hits_total"), Some(13.0));
    assert_ne!(scrape_value(&text, "exact_redis_hits_total"), Some(1.0));
    assert_eq!(scrape_value(&text, "exact_redis_total_conns"), Some(42.0));
    assert_ne!(scrape_value(&text, "exact_redis_total_conns"), Some(4.0));
}

#[test]
fn test_invalid_namespace_is_startup_error() {
    let _lock = ENV_MUTEX.lock().unwrap();
    let result = load_config(Some("bad-namespace"));
    assert!(matches!(result, Err(Error::Config(_))));

    let result = PoolMetricAdapter::build("bad-namespace", Arc::new(SharedPoolStats::new()));
    assert!(matches!(result, Err(Error::InvalidMetricName(_))));
}
