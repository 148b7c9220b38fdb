use crate::error::StoreResult;
use crate::models::{UserProfile, VerificationRecord};
use async_trait::async_trait;

/// Persistence port for customer profiles and their KYC history.
///
/// Services receive an `Arc<dyn ProfileRepository>` so the storage backend
/// (in-memory, JSON file, a test double) can be swapped without touching
/// validation or KYC logic.
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Retrieve a profile by user id.
    async fn get(&self, id: &str) -> StoreResult<UserProfile>;

    /// Store a new profile; fails with `AlreadyExists` if the id is taken.
    async fn insert(&self, profile: &UserProfile) -> StoreResult<UserProfile>;

    /// Create or replace a profile.
    ///
    /// Fails with `Conflict` when the stored profile has a different
    /// revision, i.e. someone else wrote it since it was read. The returned
    /// profile carries the new revision.
    async fn save(&self, profile: &UserProfile) -> StoreResult<UserProfile>;

    /// Save a profile and append a verification record in one write.
    /// The store assigns the record's id.
    async fn save_with_verification(
        &self,
        profile: &UserProfile,
        record: &VerificationRecord,
    ) -> StoreResult<(UserProfile, VerificationRecord)>;

    /// Replace an existing verification record, matched by id, and save
    /// `profile` in the same write when one is given.
    async fn resolve_verification(
        &self,
        record: &VerificationRecord,
        profile: Option<&UserProfile>,
    ) -> StoreResult<(VerificationRecord, Option<UserProfile>)>;

    /// All records for a user, newest first.
    async fn list_verifications(&self, user_id: &str) -> StoreResult<Vec<VerificationRecord>>;
}
