//! Observability
//!
//! Structured JSON logging and counter-only metrics. Logs are synchronous,
//! one line per event, with deterministic field ordering. Metrics are
//! passive counters; they never influence behavior.

mod logger;
mod metrics;

pub use logger::{Logger, Severity};
pub use metrics::MetricsRegistry;
