//! Data models persisted by the profile store.
//!
//! Profiles replace the `user` object the web client kept in local storage;
//! verification records keep the history of KYC document submissions.

pub mod profile;
pub mod verification;

pub use profile::{KycStatus, UserProfile};
pub use verification::{VerificationRecord, VerificationStatus, VerificationSummary};
