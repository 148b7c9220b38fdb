//! Observability module for monitoring and metrics.
//!
//! Counters for validation and KYC traffic, plus a timer that logs tool
//! call durations.

pub mod metrics;

pub use metrics::{MetricsSnapshot, MetricsTracker, Timer};
