use super::snapshot::StoreSnapshot;
use crate::error::StoreResult;
use crate::models::{UserProfile, VerificationRecord};
use crate::repositories::traits::ProfileRepository;
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

/// Profile store persisted as a single JSON document.
///
/// The whole file is rewritten after every change: the new snapshot goes to a
/// sibling temp file which is then renamed over the original, so a crash never
/// leaves a half-written store. In-memory state only changes once the write
/// has succeeded.
pub struct JsonFileProfileRepository {
    path: PathBuf,
    state: Mutex<StoreSnapshot>,
}

impl JsonFileProfileRepository {
    /// Open the store at `path`. A missing file is an empty store.
    pub async fn open(path: impl Into<PathBuf>) -> StoreResult<Self> {
        let path = path.into();

        let state = match tokio::fs::read(&path).await {
            Ok(bytes) => serde_json::from_slice(&bytes)?,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::info!("Profile store {} not found, starting empty", path.display());
                StoreSnapshot::default()
            }
            Err(e) => return Err(e.into()),
        };

        Ok(Self {
            path,
            state: Mutex::new(state),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Apply `change` to a copy of the state, persist it, then commit.
    async fn mutate<T, F>(&self, change: F) -> StoreResult<T>
    where
        F: FnOnce(&mut StoreSnapshot) -> StoreResult<T>,
    {
        let mut state = self.state.lock().await;
        let mut next = state.clone();
        let value = change(&mut next)?;
        self.persist(&next).await?;
        *state = next;
        Ok(value)
    }

    async fn persist(&self, snapshot: &StoreSnapshot) -> StoreResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let bytes = serde_json::to_vec_pretty(snapshot)?;
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, bytes).await?;
        tokio::fs::rename(&tmp, &self.path).await.map_err(|e| {
            tracing::error!("Failed to replace profile store {}: {}", self.path.display(), e);
            e
        })?;

        tracing::debug!(
            profiles = snapshot.profiles.len(),
            verifications = snapshot.verifications.len(),
            "Profile store written"
        );
        Ok(())
    }
}

#[async_trait]
impl ProfileRepository for JsonFileProfileRepository {
    async fn get(&self, id: &str) -> StoreResult<UserProfile> {
        self.state.lock().await.get(id)
    }

    async fn insert(&self, profile: &UserProfile) -> StoreResult<UserProfile> {
        self.mutate(|s| s.insert(profile)).await
    }

    async fn save(&self, profile: &UserProfile) -> StoreResult<UserProfile> {
        self.mutate(|s| s.save(profile)).await
    }

    async fn save_with_verification(
        &self,
        profile: &UserProfile,
        record: &VerificationRecord,
    ) -> StoreResult<(UserProfile, VerificationRecord)> {
        self.mutate(|s| s.save_with_verification(profile, record)).await
    }

    async fn resolve_verification(
        &self,
        record: &VerificationRecord,
        profile: Option<&UserProfile>,
    ) -> StoreResult<(VerificationRecord, Option<UserProfile>)> {
        self.mutate(|s| s.resolve_verification(record, profile)).await
    }

    async fn list_verifications(&self, user_id: &str) -> StoreResult<Vec<VerificationRecord>> {
        Ok(self.state.lock().await.list_verifications(user_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DocumentType;
    use crate::error::StoreError;
    use crate::models::{KycStatus, VerificationStatus};
    use chrono::Utc;

    fn profile(id: &str) -> UserProfile {
        UserProfile {
            id: id.to_string(),
            email: format!("{}@example.com", id),
            full_name: Some("Lê Thị Hoa".to_string()),
            kyc_status: KycStatus::Pending,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_missing_file_is_empty_store() {
        let dir = tempfile::tempdir().unwrap();
        let repo = JsonFileProfileRepository::open(dir.path().join("profiles.json"))
            .await
            .unwrap();
        assert!(matches!(repo.get("u1").await, Err(StoreError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_profiles_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("profiles.json");

        {
            let repo = JsonFileProfileRepository::open(&path).await.unwrap();
            repo.insert(&profile("u1")).await.unwrap();
        }

        let reopened = JsonFileProfileRepository::open(&path).await.unwrap();
        let loaded = reopened.get("u1").await.unwrap();
        assert_eq!(loaded.full_name.as_deref(), Some("Lê Thị Hoa"));
        assert_eq!(loaded.kyc_status, KycStatus::Pending);
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[tokio::test]
    async fn test_failed_insert_leaves_file_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("profiles.json");
        let repo = JsonFileProfileRepository::open(&path).await.unwrap();
        repo.insert(&profile("u1")).await.unwrap();
        let before = std::fs::read_to_string(&path).unwrap();

        assert!(repo.insert(&profile("u1")).await.is_err());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), before);
    }

    #[tokio::test]
    async fn test_submission_written_with_profile() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("profiles.json");
        let repo = JsonFileProfileRepository::open(&path).await.unwrap();
        let created = repo.insert(&profile("u1")).await.unwrap();

        let record = VerificationRecord {
            id: String::new(),
            user_id: "u1".to_string(),
            document_type: DocumentType::Passport,
            document_number: "C1234567".to_string(),
            document_full_name: "LE THI HOA".to_string(),
            status: VerificationStatus::Approved,
            names_match: true,
            submitted_at: Utc::now(),
            reviewed_at: Some(Utc::now()),
            notes: Vec::new(),
        };
        let mut approved = created.clone();
        approved.kyc_status = KycStatus::Approved;
        repo.save_with_verification(&approved, &record).await.unwrap();

        // A stale copy of the profile must not add a second record
        let stale = repo.save_with_verification(&created, &record).await;
        assert!(matches!(stale, Err(StoreError::Conflict(_))));

        let reopened = JsonFileProfileRepository::open(&path).await.unwrap();
        assert_eq!(reopened.get("u1").await.unwrap().kyc_status, KycStatus::Approved);
        let records = reopened.list_verifications("u1").await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, "1");
        assert!(std::fs::read_to_string(&path).unwrap().contains("\"PASSPORT\""));
    }

    #[tokio::test]
    async fn test_corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("profiles.json");
        std::fs::write(&path, "{ not json").unwrap();

        let result = JsonFileProfileRepository::open(&path).await;
        assert!(matches!(result, Err(StoreError::Json(_))));
    }
}
