//! Counters for validation traffic and KYC decisions.
//!
//! Counts are process-local and reset on restart; each event is also logged
//! through `tracing` so a log pipeline can aggregate across restarts.

use crate::domain::PhoneError;
use crate::services::KycDecision;
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// Shared metrics tracker; clones count into the same totals.
#[derive(Debug, Clone, Default)]
pub struct MetricsTracker {
    phone_validations_total: Arc<AtomicU64>,
    phone_rejections_total: Arc<AtomicU64>,
    name_comparisons_total: Arc<AtomicU64>,
    name_matches_total: Arc<AtomicU64>,
    kyc_approved_total: Arc<AtomicU64>,
    kyc_pending_total: Arc<AtomicU64>,
    kyc_rejected_total: Arc<AtomicU64>,
    kyc_not_submitted_total: Arc<AtomicU64>,
}

/// Point-in-time copy of all counters.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub phone_validations_total: u64,
    pub phone_rejections_total: u64,
    pub name_comparisons_total: u64,
    pub name_matches_total: u64,
    pub kyc_approved_total: u64,
    pub kyc_pending_total: u64,
    pub kyc_rejected_total: u64,
    pub kyc_not_submitted_total: u64,
}

fn load(counter: &AtomicU64) -> u64 {
    counter.load(Ordering::Relaxed)
}

fn bump(counter: &AtomicU64) {
    counter.fetch_add(1, Ordering::Relaxed);
}

impl MetricsTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Track one phone validation; `error` is `None` for a valid number.
    pub fn track_phone_validation(&self, error: Option<PhoneError>) {
        bump(&self.phone_validations_total);

        match error {
            None => tracing::debug!("Phone validated"),
            Some(err) => {
                bump(&self.phone_rejections_total);
                tracing::debug!(error = err.code(), "Phone rejected");
            }
        }
    }

    /// Track one name comparison.
    pub fn track_name_comparison(&self, matched: bool) {
        bump(&self.name_comparisons_total);
        if matched {
            bump(&self.name_matches_total);
        }
        tracing::trace!(matched = matched, "Names compared");
    }

    /// Track the outcome of a KYC action.
    pub fn track_kyc_decision(&self, decision: KycDecision) {
        let counter = match decision {
            KycDecision::Approved => &self.kyc_approved_total,
            KycDecision::PendingReview => &self.kyc_pending_total,
            KycDecision::Rejected => &self.kyc_rejected_total,
            KycDecision::NotSubmitted => &self.kyc_not_submitted_total,
        };
        bump(counter);

        tracing::info!(decision = ?decision, "KYC decision");
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            phone_validations_total: load(&self.phone_validations_total),
            phone_rejections_total: load(&self.phone_rejections_total),
            name_comparisons_total: load(&self.name_comparisons_total),
            name_matches_total: load(&self.name_matches_total),
            kyc_approved_total: load(&self.kyc_approved_total),
            kyc_pending_total: load(&self.kyc_pending_total),
            kyc_rejected_total: load(&self.kyc_rejected_total),
            kyc_not_submitted_total: load(&self.kyc_not_submitted_total),
        }
    }

    /// Share of phone validations that failed (0.0 to 1.0).
    pub fn phone_rejection_rate(&self) -> f64 {
        let total = load(&self.phone_validations_total);
        if total == 0 {
            0.0
        } else {
            load(&self.phone_rejections_total) as f64 / total as f64
        }
    }

    /// Human-readable summary, logged at shutdown.
    pub fn summary(&self) -> String {
        let s = self.snapshot();
        format!(
            "Metrics Summary:\n\
             Phone Validations: {} ({:.2}% rejected)\n\
             Name Comparisons: {} ({} matched)\n\
             KYC Approved: {}\n\
             KYC Pending Review: {}\n\
             KYC Rejected: {}\n\
             KYC Not Submitted: {}",
            s.phone_validations_total,
            self.phone_rejection_rate() * 100.0,
            s.name_comparisons_total,
            s.name_matches_total,
            s.kyc_approved_total,
            s.kyc_pending_total,
            s.kyc_rejected_total,
            s.kyc_not_submitted_total,
        )
    }
}

/// A timer for tracking tool call duration.
pub struct Timer {
    start: Instant,
    operation: &'static str,
}

impl Timer {
    /// Start a new timer for the given operation.
    pub fn new(operation: &'static str) -> Self {
        Self {
            start: Instant::now(),
            operation,
        }
    }

    /// Finish the timer with a specific status and return elapsed milliseconds.
    pub fn finish_with_status(self, success: bool) -> u128 {
        let duration_ms = self.start.elapsed().as_millis();

        if success {
            tracing::debug!(
                operation = self.operation,
                duration_ms = duration_ms,
                "Operation succeeded"
            );
        } else {
            tracing::warn!(
                operation = self.operation,
                duration_ms = duration_ms,
                "Operation failed"
            );
        }

        duration_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_tracker_creation() {
        let tracker = MetricsTracker::new();
        assert_eq!(tracker.snapshot().phone_validations_total, 0);
        assert_eq!(tracker.phone_rejection_rate(), 0.0);
    }

    #[test]
    fn test_track_phone_validation() {
        let tracker = MetricsTracker::new();
        tracker.track_phone_validation(None);
        tracker.track_phone_validation(Some(PhoneError::WrongLength));
        tracker.track_phone_validation(Some(PhoneError::InvalidPrefix));

        let s = tracker.snapshot();
        assert_eq!(s.phone_validations_total, 3);
        assert_eq!(s.phone_rejections_total, 2);
        assert!((tracker.phone_rejection_rate() - 0.6667).abs() < 0.001);
    }

    #[test]
    fn test_clones_share_counters() {
        let tracker = MetricsTracker::new();
        let clone = tracker.clone();
        clone.track_name_comparison(true);
        clone.track_name_comparison(false);

        let s = tracker.snapshot();
        assert_eq!(s.name_comparisons_total, 2);
        assert_eq!(s.name_matches_total, 1);
    }

    #[test]
    fn test_track_kyc_decision() {
        let tracker = MetricsTracker::new();
        tracker.track_kyc_decision(KycDecision::Approved);
        tracker.track_kyc_decision(KycDecision::PendingReview);
        tracker.track_kyc_decision(KycDecision::PendingReview);
        tracker.track_kyc_decision(KycDecision::NotSubmitted);

        let s = tracker.snapshot();
        assert_eq!(s.kyc_approved_total, 1);
        assert_eq!(s.kyc_pending_total, 2);
        assert_eq!(s.kyc_rejected_total, 0);
        assert_eq!(s.kyc_not_submitted_total, 1);
    }

    #[test]
    fn test_timer() {
        let timer = Timer::new("test_operation");
        std::thread::sleep(std::time::Duration::from_millis(10));
        assert!(timer.finish_with_status(true) >= 10);
    }

    #[test]
    fn test_summary() {
        let tracker = MetricsTracker::new();
        tracker.track_phone_validation(None);
        tracker.track_kyc_decision(KycDecision::Approved);

        let summary = tracker.summary();
        assert!(summary.contains("Phone Validations: 1"));
        assert!(summary.contains("KYC Approved: 1"));
    }
}
