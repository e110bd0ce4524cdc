// Private module declaration
mod server;

use prometheus::{Histogram, HistogramOpts, IntCounter, IntCounterVec, Opts, Registry};

// Re-export for public API
pub use server::configure;

// ============================================================================
// Metrics Module - Prometheus metrics for observability
// ============================================================================
//
// Provides metrics for:
// - Order creation (successes, failures by reason, latency)
// - Domain event publication and delivery
//
// All metrics are registered with a per-instance Registry and served on
// /metrics by the HTTP server.
// ============================================================================

pub struct Metrics {
    registry: Registry,

    // Order Creation Metrics
    pub orders_created: IntCounter,
    pub order_creation_failures: IntCounterVec,
    pub order_creation_duration: Histogram,

    // Event Metrics
    pub events_published: IntCounterVec,
    pub events_delivered: IntCounterVec,
}

impl Metrics {
    pub fn new() -> anyhow::Result<Self> {
        let registry = Registry::new();

        let orders_created = IntCounter::new("orders_created_total", "Total orders created")?;
        registry.register(Box::new(orders_created.clone()))?;

        let order_creation_failures = IntCounterVec::new(
            Opts::new("order_creation_failures_total", "Order creation requests that failed"),
            &["reason"],
        )?;
        registry.register(Box::new(order_creation_failures.clone()))?;

        let order_creation_duration = Histogram::with_opts(
            HistogramOpts::new("order_creation_duration_seconds", "Order creation duration")
                .buckets(vec![0.001, 0.005, 0.01, 0.05, 0.1, 0.5, 1.0, 5.0]),
        )?;
        registry.register(Box::new(order_creation_duration.clone()))?;

        let events_published = IntCounterVec::new(
            Opts::new("events_published_total", "Domain events handed to the publisher"),
            &["event_type"],
        )?;
        registry.register(Box::new(events_published.clone()))?;

        let events_delivered = IntCounterVec::new(
            Opts::new("events_delivered_total", "Domain events received by subscribers"),
            &["event_type"],
        )?;
        registry.register(Box::new(events_delivered.clone()))?;

        Ok(Self {
            registry,
            orders_created,
            order_creation_failures,
            order_creation_duration,
            events_published,
            events_delivered,
        })
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }
}
