use lazy_static::lazy_static;
use prometheus::{Encoder, IntCounter, IntCounterVec, Opts, Registry, TextEncoder};

lazy_static! {
    pub static ref REGISTRY: Registry = Registry::new();
    pub static ref ADJUSTMENTS_POSTED: IntCounter = IntCounter::new(
        "adjustments_posted_total",
        "Total number of inventory adjustments posted"
    )
    .expect("metric can be created");
    pub static ref ADJUSTMENTS_REVERSED: IntCounter = IntCounter::new(
        "adjustments_reversed_total",
        "Total number of inventory adjustments reversed"
    )
    .expect("metric can be created");
    pub static ref ADJUSTMENT_FAILURES: IntCounterVec = IntCounterVec::new(
        Opts::new(
            "adjustment_failures_total",
            "Total number of failed adjustment operations"
        ),
        &["error_type"]
    )
    .expect("metric can be created");
}

/// Registers all collectors. Safe to call more than once; duplicate
/// registrations are ignored.
pub fn register_metrics() {
    let _ = REGISTRY.register(Box::new(ADJUSTMENTS_POSTED.clone()));
    let _ = REGISTRY.register(Box::new(ADJUSTMENTS_REVERSED.clone()));
    let _ = REGISTRY.register(Box::new(ADJUSTMENT_FAILURES.clone()));
}

/// Renders the registry in the Prometheus text exposition format.
pub fn metrics_handler() -> Result<String, prometheus::Error> {
    let encoder = TextEncoder::new();
    let mut buffer = Vec::new();
    encoder.encode(&REGISTRY.gather(), &mut buffer)?;
    String::from_utf8(buffer)
        .map_err(|e| prometheus::Error::Msg(format!("metrics encoding produced invalid utf-8: {e}")))
}
