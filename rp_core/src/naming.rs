// ABOUTME: Metric name construction and validation.
// ABOUTME: Joins namespace segments and checks the Prometheus name grammar.
use regex::Regex;
use std::sync::OnceLock;

fn metric_name_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[a-zA-Z_:][a-zA-Z0-9_:]*$").expect("metric name pattern is a valid regex")
    })
}

/// Build a fully-qualified metric name from its parts
///
/// Empty parts are skipped, so an empty namespace never leaves a leading
/// underscore behind. An empty `name` yields an empty string.
///
/// # Examples
///
/// ```
/// use rp_core::fq_name;
/// assert_eq!(fq_name("myapp", "redis", "hits"), "myapp_redis_hits");
/// assert_eq!(fq_name("", "redis", "hits"), "redis_hits");
/// ```
pub fn fq_name(namespace: &str, subsystem: &str, name: &str) -> String {
    if name.is_empty() {
        return String::new();
    }

    [namespace, subsystem, name]
        .iter()
        .filter(|part| !part.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join("_")
}

/// Check a fully-qualified name against `[a-zA-Z_:][a-zA-Z0-9_:]*`
pub fn is_valid_metric_name(name: &str) -> bool {
    metric_name_regex().is_match(name)
}
