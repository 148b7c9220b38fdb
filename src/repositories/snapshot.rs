//! The complete contents of a profile store.

use crate::error::{StoreError, StoreResult};
use crate::models::{UserProfile, VerificationRecord};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Everything a store holds, in the shape written to disk.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub(crate) struct StoreSnapshot {
    pub profiles: BTreeMap<String, UserProfile>,
    /// Insertion order, oldest first
    pub verifications: Vec<VerificationRecord>,
    pub next_verification_id: u64,
}

impl StoreSnapshot {
    pub fn get(&self, id: &str) -> StoreResult<UserProfile> {
        self.profiles
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("profile {}", id)))
    }

    pub fn insert(&mut self, profile: &UserProfile) -> StoreResult<UserProfile> {
        if self.profiles.contains_key(&profile.id) {
            return Err(StoreError::AlreadyExists(format!("profile {}", profile.id)));
        }
        self.save(profile)
    }

    /// Upsert, refusing a profile whose revision is behind the stored one.
    pub fn save(&mut self, profile: &UserProfile) -> StoreResult<UserProfile> {
        self.check_revision(profile)?;

        let mut stored = profile.clone();
        stored.revision += 1;
        self.profiles.insert(stored.id.clone(), stored.clone());
        Ok(stored)
    }

    pub fn save_with_verification(
        &mut self,
        profile: &UserProfile,
        record: &VerificationRecord,
    ) -> StoreResult<(UserProfile, VerificationRecord)> {
        let saved = self.save(profile)?;

        self.next_verification_id += 1;
        let mut stored = record.clone();
        stored.id = self.next_verification_id.to_string();
        self.verifications.push(stored.clone());

        Ok((saved, stored))
    }

    /// Replace a record by id and, when given, save the profile with it.
    ///
    /// Both are checked before either is written.
    pub fn resolve_verification(
        &mut self,
        record: &VerificationRecord,
        profile: Option<&UserProfile>,
    ) -> StoreResult<(VerificationRecord, Option<UserProfile>)> {
        let slot = self
            .verifications
            .iter()
            .position(|r| r.id == record.id)
            .ok_or_else(|| StoreError::NotFound(format!("verification {}", record.id)))?;

        let saved = profile.map(|p| self.save(p)).transpose()?;
        self.verifications[slot] = record.clone();
        Ok((record.clone(), saved))
    }

    pub fn list_verifications(&self, user_id: &str) -> Vec<VerificationRecord> {
        self.verifications
            .iter()
            .rev()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect()
    }

    fn check_revision(&self, profile: &UserProfile) -> StoreResult<()> {
        match self.profiles.get(&profile.id) {
            Some(current) if current.revision != profile.revision => {
                Err(StoreError::Conflict(profile.id.clone()))
            }
            _ => Ok(()),
        }
    }
}
