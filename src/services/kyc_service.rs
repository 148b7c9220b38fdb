//! KYC service layer.
//!
//! Compares the name printed on an identity document with the account name
//! and decides whether the submission is approved on the spot or queued for
//! manual review. Every submitted document is kept in the verification history.

use crate::domain::{names_match, parse_vn_phone, DocumentType, NormalizedName, UserId};
use crate::error::{ProfileError, ProfileResult, StoreError};
use crate::models::{
    KycStatus, UserProfile, VerificationRecord, VerificationStatus, VerificationSummary,
};
use crate::repositories::ProfileRepository;
use async_trait::async_trait;
use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;

/// An identity document as typed into the KYC form.
#[derive(Debug, Clone, Default)]
pub struct KycSubmission {
    pub document_type: DocumentType,
    pub document_number: String,
    pub document_full_name: String,
    pub note: Option<String>,
}

/// Parameters for the profile screen's "compare with document" action.
#[derive(Debug, Clone, Default)]
pub struct CompareAndUpdateParams {
    /// Full name currently in the customer info form
    pub full_name: String,
    /// Phone currently in the customer info form, validated or not
    pub phone: String,
    pub submission: KycSubmission,
    /// The customer confirmed submitting although the names differ
    pub submit_on_mismatch: bool,
}

/// What happened to a KYC submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum KycDecision {
    Approved,
    PendingReview,
    /// Names differ and the customer did not confirm; nothing was saved
    NotSubmitted,
    Rejected,
}

impl KycDecision {
    /// Customer-facing message, in Vietnamese.
    pub fn message(&self) -> &'static str {
        match self {
            Self::Approved => "Xác minh thành công. Thông tin KYC đã được duyệt.",
            Self::PendingReview => {
                "Đã gửi xác minh. Tên không trùng khớp, hồ sơ đang chờ xem xét thủ công."
            }
            Self::NotSubmitted => {
                "Họ tên trên giấy tờ KHÔNG trùng khớp. Xác nhận để gửi xác minh và cập nhật theo giấy tờ."
            }
            Self::Rejected => "Hồ sơ xác minh đã bị từ chối.",
        }
    }
}

/// Result of a KYC action.
#[derive(Debug, Clone, Serialize)]
pub struct KycOutcome {
    pub decision: KycDecision,
    pub message: &'static str,
    pub names_match: bool,
    pub profile: UserProfile,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verification: Option<VerificationRecord>,
}

impl KycOutcome {
    fn new(
        decision: KycDecision,
        names_match: bool,
        profile: UserProfile,
        verification: Option<VerificationRecord>,
    ) -> Self {
        Self {
            decision,
            message: decision.message(),
            names_match,
            profile,
            verification,
        }
    }
}

/// A user's verification history.
#[derive(Debug, Clone, Serialize)]
pub struct VerificationStatusReport {
    /// Newest first
    pub verifications: Vec<VerificationRecord>,
    pub summary: VerificationSummary,
}

/// KYC service trait for business operations.
#[async_trait]
pub trait KycService: Send + Sync {
    /// Live match indicator while the customer types the document name.
    ///
    /// `None` when either the account name or the document name is blank.
    async fn preview_match(
        &self,
        user_id: &str,
        document_full_name: &str,
    ) -> ProfileResult<Option<bool>>;

    /// Submit a document from the KYC sheet.
    ///
    /// A matching name is approved and becomes the profile's full name; a
    /// mismatch keeps the account name and waits for manual review.
    async fn verify_document(
        &self,
        user_id: &str,
        submission: KycSubmission,
    ) -> ProfileResult<KycOutcome>;

    /// Compare the customer info form with a document and update the profile
    /// from the document.
    ///
    /// On a mismatch nothing is written unless `submit_on_mismatch` is set.
    async fn compare_and_update(
        &self,
        user_id: &str,
        params: CompareAndUpdateParams,
    ) -> ProfileResult<KycOutcome>;

    /// Resolve a submission that is waiting for manual review.
    ///
    /// The profile follows the decision only when the record is the user's
    /// latest submission; reviewing an older one just closes that record.
    async fn review_verification(
        &self,
        user_id: &str,
        verification_id: &str,
        approve: bool,
        note: Option<String>,
    ) -> ProfileResult<KycOutcome>;

    /// All submissions for a user with per-status counts.
    async fn verification_status(&self, user_id: &str) -> ProfileResult<VerificationStatusReport>;
}

/// Default implementation of KycService.
pub struct KycServiceImpl {
    repository: Arc<dyn ProfileRepository>,
    max_note_length: usize,
}

/// Validation helper functions.
impl KycServiceImpl {
    /// Trim the submission and check required fields and note length.
    fn validate_submission(&self, submission: KycSubmission) -> ProfileResult<KycSubmission> {
        let document_number = submission.document_number.trim().to_string();
        let document_full_name = submission.document_full_name.trim().to_string();
        if document_number.is_empty() || document_full_name.is_empty() {
            return Err(ProfileError::MissingDocumentFields);
        }

        let note = submission
            .note
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());
        if let Some(note) = &note {
            self.validate_note(note)?;
        }

        Ok(KycSubmission {
            document_type: submission.document_type,
            document_number,
            document_full_name,
            note,
        })
    }

    fn validate_note(&self, note: &str) -> ProfileResult<()> {
        if note.chars().count() > self.max_note_length {
            return Err(ProfileError::NoteTooLong {
                max: self.max_note_length,
            });
        }
        Ok(())
    }

    /// A document name that normalizes to nothing ("123", "--") never matches,
    /// even against an empty account name.
    fn document_matches(account_name: &str, document_full_name: &str) -> bool {
        !NormalizedName::new(document_full_name).is_empty()
            && names_match(account_name, document_full_name)
    }
}

impl KycServiceImpl {
    pub fn new(repository: Arc<dyn ProfileRepository>, max_note_length: usize) -> Self {
        Self {
            repository,
            max_note_length,
        }
    }

    async fn load(&self, user_id: &str) -> ProfileResult<(UserId, UserProfile)> {
        let user_id = UserId::new(user_id)?;
        let profile = self.repository.get(user_id.as_str()).await?;
        Ok((user_id, profile))
    }

    /// Persist the profile and its history record for the submission in one write.
    async fn record_submission(
        &self,
        profile: &UserProfile,
        submission: &KycSubmission,
        matched: bool,
    ) -> ProfileResult<(UserProfile, VerificationRecord)> {
        let now = Utc::now();
        let record = VerificationRecord {
            id: String::new(),
            user_id: profile.id.clone(),
            document_type: submission.document_type,
            document_number: submission.document_number.clone(),
            document_full_name: submission.document_full_name.clone(),
            status: if matched {
                VerificationStatus::Approved
            } else {
                VerificationStatus::PendingReview
            },
            names_match: matched,
            submitted_at: now,
            reviewed_at: matched.then_some(now),
            notes: submission.note.iter().cloned().collect(),
        };

        let (saved, record) = self
            .repository
            .save_with_verification(profile, &record)
            .await?;

        tracing::info!(
            user_id = %saved.id,
            verification_id = %record.id,
            document_type = %record.document_type,
            names_match = matched,
            "KYC submission recorded"
        );
        Ok((saved, record))
    }
}

fn decision_for(matched: bool) -> (KycDecision, KycStatus) {
    if matched {
        (KycDecision::Approved, KycStatus::Approved)
    } else {
        (KycDecision::PendingReview, KycStatus::Pending)
    }
}

#[async_trait]
impl KycService for KycServiceImpl {
    async fn preview_match(
        &self,
        user_id: &str,
        document_full_name: &str,
    ) -> ProfileResult<Option<bool>> {
        let (_, profile) = self.load(user_id).await?;
        let account_name = profile.display_name();

        if account_name.trim().is_empty() || document_full_name.trim().is_empty() {
            return Ok(None);
        }
        Ok(Some(Self::document_matches(
            &account_name,
            document_full_name,
        )))
    }

    async fn verify_document(
        &self,
        user_id: &str,
        submission: KycSubmission,
    ) -> ProfileResult<KycOutcome> {
        let submission = self.validate_submission(submission)?;
        let (_, mut profile) = self.load(user_id).await?;

        let account_name = profile.display_name();
        let matched = Self::document_matches(&account_name, &submission.document_full_name);
        let (decision, status) = decision_for(matched);

        if matched {
            profile.set_full_name(&submission.document_full_name);
        } else if profile.full_name.as_deref().map_or(true, |n| n.trim().is_empty())
            && !account_name.is_empty()
        {
            profile.full_name = Some(account_name);
        }
        profile.id_type = Some(submission.document_type);
        profile.id_number = Some(submission.document_number.clone());
        profile.kyc_status = status;
        profile.touch();

        let (profile, record) = self.record_submission(&profile, &submission, matched).await?;
        Ok(KycOutcome::new(decision, matched, profile, Some(record)))
    }

    async fn compare_and_update(
        &self,
        user_id: &str,
        params: CompareAndUpdateParams,
    ) -> ProfileResult<KycOutcome> {
        let submission = self.validate_submission(params.submission)?;
        let (user_id, mut profile) = self.load(user_id).await?;

        let matched = Self::document_matches(&params.full_name, &submission.document_full_name);
        if !matched && !params.submit_on_mismatch {
            tracing::info!(user_id = %user_id, "KYC names differ, submission not confirmed");
            return Ok(KycOutcome::new(
                KycDecision::NotSubmitted,
                false,
                profile,
                None,
            ));
        }

        let (decision, status) = decision_for(matched);

        profile.set_full_name(&submission.document_full_name);
        let phone = params.phone.trim();
        if phone.is_empty() {
            profile.phone = None;
            profile.phone_e164 = None;
        } else {
            match parse_vn_phone(phone) {
                Ok(valid) => profile.set_phone(&valid),
                Err(e) => {
                    tracing::warn!(user_id = %user_id, error = e.code(), "Storing unvalidated phone");
                    profile.set_raw_phone(phone);
                }
            }
        }
        profile.id_type = Some(submission.document_type);
        profile.id_number = Some(submission.document_number.clone());
        profile.kyc_note = submission.note.clone();
        profile.kyc_status = status;
        profile.touch();

        let (profile, record) = self.record_submission(&profile, &submission, matched).await?;
        Ok(KycOutcome::new(decision, matched, profile, Some(record)))
    }

    async fn review_verification(
        &self,
        user_id: &str,
        verification_id: &str,
        approve: bool,
        note: Option<String>,
    ) -> ProfileResult<KycOutcome> {
        let note = note.map(|n| n.trim().to_string()).filter(|n| !n.is_empty());
        if let Some(note) = &note {
            self.validate_note(note)?;
        }

        let (user_id, mut profile) = self.load(user_id).await?;

        let history = self.repository.list_verifications(user_id.as_str()).await?;
        let latest_id = history.first().map(|r| r.id.clone());
        let mut record = history
            .into_iter()
            .find(|r| r.id == verification_id)
            .ok_or_else(|| StoreError::NotFound(format!("verification {}", verification_id)))?;

        if record.status != VerificationStatus::PendingReview {
            return Err(ProfileError::NotPendingReview(record.id));
        }

        let (decision, status, record_status) = if approve {
            (
                KycDecision::Approved,
                KycStatus::Approved,
                VerificationStatus::Approved,
            )
        } else {
            (
                KycDecision::Rejected,
                KycStatus::Rejected,
                VerificationStatus::Rejected,
            )
        };

        record.status = record_status;
        record.reviewed_at = Some(Utc::now());
        record.notes.extend(note);

        // Only the latest submission decides the profile; an older one is
        // closed without touching it.
        let is_latest = latest_id.as_deref() == Some(record.id.as_str());
        if is_latest {
            // An approved document is the source of truth for the legal name
            if approve {
                profile.set_full_name(&record.document_full_name);
                profile.id_type = Some(record.document_type);
                profile.id_number = Some(record.document_number.clone());
            }
            profile.kyc_status = status;
            profile.touch();
        }

        let (record, saved) = self
            .repository
            .resolve_verification(&record, is_latest.then_some(&profile))
            .await?;
        let profile = saved.unwrap_or(profile);

        tracing::info!(
            user_id = %user_id,
            verification_id = %record.id,
            approved = approve,
            profile_updated = is_latest,
            "KYC submission reviewed"
        );
        Ok(KycOutcome::new(
            decision,
            record.names_match,
            profile,
            Some(record),
        ))
    }

    async fn verification_status(&self, user_id: &str) -> ProfileResult<VerificationStatusReport> {
        let (user_id, _) = self.load(user_id).await?;
        let verifications = self.repository.list_verifications(user_id.as_str()).await?;
        let summary = VerificationSummary::from_records(&verifications);
        Ok(VerificationStatusReport {
            verifications,
            summary,
        })
    }
}
