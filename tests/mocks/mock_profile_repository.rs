use async_trait::async_trait;
use std::collections::HashMap;
use std::io;
use std::sync::{Arc, Mutex};
use vn_kyc_mcp_server::error::{StoreError, StoreResult};
use vn_kyc_mcp_server::models::{UserProfile, VerificationRecord};
use vn_kyc_mcp_server::repositories::ProfileRepository;

/// Mock profile repository for testing.
///
/// Keeps profiles and verification records in memory, counts method calls,
/// and can be told to fail every write.
#[allow(dead_code)]
#[derive(Clone, Default)]
pub struct MockProfileRepository {
    profiles: Arc<Mutex<HashMap<String, UserProfile>>>,
    verifications: Arc<Mutex<Vec<VerificationRecord>>>,
    call_counts: Arc<Mutex<HashMap<String, usize>>>,
    fail_writes: Arc<Mutex<bool>>,
}

#[allow(dead_code)]
impl MockProfileRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a profile without counting a call.
    pub fn add_profile(&self, profile: UserProfile) {
        let mut profiles = self.profiles.lock().unwrap();
        profiles.insert(profile.id.clone(), profile);
    }

    /// Read a profile back without counting a call.
    pub fn profile(&self, id: &str) -> Option<UserProfile> {
        self.profiles.lock().unwrap().get(id).cloned()
    }

    /// Every stored verification record, oldest first.
    pub fn all_verifications(&self) -> Vec<VerificationRecord> {
        self.verifications.lock().unwrap().clone()
    }

    /// Make every write fail with an I/O error.
    pub fn set_fail_writes(&self, fail: bool) {
        *self.fail_writes.lock().unwrap() = fail;
    }

    /// Get the number of times a method was called.
    pub fn get_call_count(&self, method: &str) -> usize {
        let counts = self.call_counts.lock().unwrap();
        *counts.get(method).unwrap_or(&0)
    }

    /// Total number of write calls.
    pub fn write_count(&self) -> usize {
        [
            "insert",
            "save",
            "save_with_verification",
            "resolve_verification",
        ]
            .iter()
            .map(|m| self.get_call_count(m))
            .sum()
    }

    pub fn reset_call_counts(&self) {
        self.call_counts.lock().unwrap().clear();
    }

    fn track_call(&self, method: &str) {
        let mut counts = self.call_counts.lock().unwrap();
        *counts.entry(method.to_string()).or_insert(0) += 1;
    }

    fn check_writable(&self) -> StoreResult<()> {
        if *self.fail_writes.lock().unwrap() {
            return Err(StoreError::Io(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "mock store is read-only",
            )));
        }
        Ok(())
    }

    /// Store a profile one revision ahead, refusing a stale copy.
    fn store_profile(&self, profile: &UserProfile) -> StoreResult<UserProfile> {
        let mut profiles = self.profiles.lock().unwrap();
        if let Some(current) = profiles.get(&profile.id) {
            if current.revision != profile.revision {
                return Err(StoreError::Conflict(profile.id.clone()));
            }
        }
        let mut stored = profile.clone();
        stored.revision += 1;
        profiles.insert(stored.id.clone(), stored.clone());
        Ok(stored)
    }
}

#[async_trait]
impl ProfileRepository for MockProfileRepository {
    async fn get(&self, id: &str) -> StoreResult<UserProfile> {
        self.track_call("get");

        self.profile(id)
            .ok_or_else(|| StoreError::NotFound(format!("profile {}", id)))
    }

    async fn insert(&self, profile: &UserProfile) -> StoreResult<UserProfile> {
        self.track_call("insert");
        self.check_writable()?;

        if self.profile(&profile.id).is_some() {
            return Err(StoreError::AlreadyExists(format!("profile {}", profile.id)));
        }
        self.store_profile(profile)
    }

    async fn save(&self, profile: &UserProfile) -> StoreResult<UserProfile> {
        self.track_call("save");
        self.check_writable()?;

        self.store_profile(profile)
    }

    async fn save_with_verification(
        &self,
        profile: &UserProfile,
        record: &VerificationRecord,
    ) -> StoreResult<(UserProfile, VerificationRecord)> {
        self.track_call("save_with_verification");
        self.check_writable()?;

        let saved = self.store_profile(profile)?;
        let mut verifications = self.verifications.lock().unwrap();
        let mut stored = record.clone();
        stored.id = format!("mock-{}", verifications.len() + 1);
        verifications.push(stored.clone());
        Ok((saved, stored))
    }

    async fn resolve_verification(
        &self,
        record: &VerificationRecord,
        profile: Option<&UserProfile>,
    ) -> StoreResult<(VerificationRecord, Option<UserProfile>)> {
        self.track_call("resolve_verification");
        self.check_writable()?;

        let slot = self
            .verifications
            .lock()
            .unwrap()
            .iter()
            .position(|r| r.id == record.id)
            .ok_or_else(|| StoreError::NotFound(format!("verification {}", record.id)))?;
        let saved = profile.map(|p| self.store_profile(p)).transpose()?;
        self.verifications.lock().unwrap()[slot] = record.clone();
        Ok((record.clone(), saved))
    }

    async fn list_verifications(&self, user_id: &str) -> StoreResult<Vec<VerificationRecord>> {
        self.track_call("list_verifications");

        let verifications = self.verifications.lock().unwrap();
        Ok(verifications
            .iter()
            .rev()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect())
    }
}
