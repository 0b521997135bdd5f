//! Prometheus Metrics Module
//!
//! # Metrics Collected
//! - HTTP request counts by method, matched route, and status
//! - HTTP request latency histograms
//! - Database connection pool gauges
//!
//! A [`Metrics`] instance owns its own registry, so several apps (tests)
//! can live in one process without clashing registrations.

use prometheus::{
    Encoder, GaugeVec, HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry, TextEncoder,
};

const NAMESPACE: &str = "travel_planner";

const LATENCY_BUCKETS: &[f64] = &[
    0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
];

#[derive(Clone)]
pub struct Metrics {
    registry: Registry,
    http_requests_total: IntCounterVec,
    http_request_duration_seconds: HistogramVec,
    db_pool_connections: GaugeVec,
}

impl Metrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let http_requests_total = IntCounterVec::new(
            Opts::new("http_requests_total", "Total number of HTTP requests").namespace(NAMESPACE),
            &["method", "path", "status"],
        )?;

        let http_request_duration_seconds = HistogramVec::new(
            HistogramOpts::new(
                "http_request_duration_seconds",
                "HTTP request latency in seconds",
            )
            .namespace(NAMESPACE)
            .buckets(LATENCY_BUCKETS.to_vec()),
            &["method", "path"],
        )?;

        let db_pool_connections = GaugeVec::new(
            Opts::new("db_pool_connections", "Database connection pool statistics")
                .namespace(NAMESPACE),
            &["state"], // "idle", "active", "max"
        )?;

        registry.register(Box::new(http_requests_total.clone()))?;
        registry.register(Box::new(http_request_duration_seconds.clone()))?;
        registry.register(Box::new(db_pool_connections.clone()))?;

        Ok(Self {
            registry,
            http_requests_total,
            http_request_duration_seconds,
            db_pool_connections,
        })
    }

    /// Encode every registered metric in the Prometheus text format.
    pub fn gather(&self) -> Result<String, prometheus::Error> {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        encoder.encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }

    /// `path` should be the matched route template, not the raw URI, to keep
    /// label cardinality bounded.
    pub fn record_http_request(&self, method: &str, path: &str, status: u16, duration_secs: f64) {
        self.http_requests_total
            .with_label_values(&[method, path, &status.to_string()])
            .inc();
        self.http_request_duration_seconds
            .with_label_values(&[method, path])
            .observe(duration_secs);
    }

    pub fn update_db_pool_stats(&self, idle: u32, active: u32, max: u32) {
        self.db_pool_connections
            .with_label_values(&["idle"])
            .set(f64::from(idle));
        self.db_pool_connections
            .with_label_values(&["active"])
            .set(f64::from(active));
        self.db_pool_connections
            .with_label_values(&["max"])
            .set(f64::from(max));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_http_request() {
        let metrics = Metrics::new().unwrap();
        metrics.record_http_request("GET", "/api/plans/{id}", 200, 0.002);

        let text = metrics.gather().unwrap();
        assert!(text.contains("travel_planner_http_requests_total"));
        assert!(text.contains(r#"path="/api/plans/{id}""#));
    }

    #[test]
    fn test_pool_stats() {
        let metrics = Metrics::new().unwrap();
        metrics.update_db_pool_stats(3, 2, 10);

        let text = metrics.gather().unwrap();
        assert!(text.contains(r#"travel_planner_db_pool_connections{state="max"} 10"#));
    }

    #[test]
    fn test_instances_do_not_share_registry() {
        let a = Metrics::new().unwrap();
        let b = Metrics::new().unwrap();
        a.record_http_request("GET", "/health", 200, 0.001);

        assert!(!b.gather().unwrap().contains("/health"));
    }
}
