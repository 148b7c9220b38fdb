use super::snapshot::StoreSnapshot;
use crate::error::StoreResult;
use crate::models::{UserProfile, VerificationRecord};
use crate::repositories::traits::ProfileRepository;
use async_trait::async_trait;
use tokio::sync::RwLock;

/// Profile store that lives only as long as the process.
///
/// Used when no `PROFILE_STORE_PATH` is configured.
#[derive(Default)]
pub struct InMemoryProfileRepository {
    state: RwLock<StoreSnapshot>,
}

impl InMemoryProfileRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProfileRepository for InMemoryProfileRepository {
    async fn get(&self, id: &str) -> StoreResult<UserProfile> {
        self.state.read().await.get(id)
    }

    async fn insert(&self, profile: &UserProfile) -> StoreResult<UserProfile> {
        self.state.write().await.insert(profile)
    }

    async fn save(&self, profile: &UserProfile) -> StoreResult<UserProfile> {
        self.state.write().await.save(profile)
    }

    async fn save_with_verification(
        &self,
        profile: &UserProfile,
        record: &VerificationRecord,
    ) -> StoreResult<(UserProfile, VerificationRecord)> {
        self.state.write().await.save_with_verification(profile, record)
    }

    async fn resolve_verification(
        &self,
        record: &VerificationRecord,
        profile: Option<&UserProfile>,
    ) -> StoreResult<(VerificationRecord, Option<UserProfile>)> {
        self.state.write().await.resolve_verification(record, profile)
    }

    async fn list_verifications(&self, user_id: &str) -> StoreResult<Vec<VerificationRecord>> {
        Ok(self.state.read().await.list_verifications(user_id))
    }
}
