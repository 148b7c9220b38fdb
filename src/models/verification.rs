//! KYC verification history.

use crate::domain::DocumentType;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// State of one document submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationStatus {
    Approved,
    PendingReview,
    Rejected,
}

/// One identity document submission and its outcome.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VerificationRecord {
    pub id: String,
    pub user_id: String,
    pub document_type: DocumentType,
    pub document_number: String,
    /// Name as printed on the document
    pub document_full_name: String,
    pub status: VerificationStatus,
    /// Whether the document name matched the account name when submitted
    pub names_match: bool,
    pub submitted_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reviewed_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<String>,
}

/// Counts of a user's submissions by status.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct VerificationSummary {
    pub total: usize,
    pub approved: usize,
    pub pending: usize,
    pub rejected: usize,
}

impl VerificationSummary {
    pub fn from_records(records: &[VerificationRecord]) -> Self {
        let count = |status: VerificationStatus| {
            records.iter().filter(|r| r.status == status).count()
        };

        Self {
            total: records.len(),
            approved: count(VerificationStatus::Approved),
            pending: count(VerificationStatus::PendingReview),
            rejected: count(VerificationStatus::Rejected),
        }
    }
}
