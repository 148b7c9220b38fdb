//! Profile service layer.
//!
//! Business logic for creating profiles and saving customer info.

use crate::domain::{parse_vn_phone, EmailAddress, UserId};
use crate::error::{ProfileError, ProfileResult};
use crate::models::UserProfile;
use crate::repositories::ProfileRepository;
use async_trait::async_trait;
use std::sync::Arc;

/// Parameters for registering a new profile.
#[derive(Debug, Clone, Default)]
pub struct NewProfileParams {
    pub user_id: String,
    pub email: String,
    pub full_name: Option<String>,
    pub phone: Option<String>,
}

/// Profile service trait for business operations.
#[async_trait]
pub trait ProfileService: Send + Sync {
    /// Register a new profile.
    async fn create_profile(&self, params: NewProfileParams) -> ProfileResult<UserProfile>;

    /// Get a profile by user id.
    async fn get_profile(&self, user_id: &str) -> ProfileResult<UserProfile>;

    /// Save the customer info form: full name and a required, valid phone.
    ///
    /// The phone is stored normalized (`0XXXXXXXXX`) together with its
    /// E.164 form. An invalid phone writes nothing.
    async fn save_customer_info(
        &self,
        user_id: &str,
        full_name: &str,
        phone: &str,
    ) -> ProfileResult<UserProfile>;
}

/// Default implementation of ProfileService.
pub struct ProfileServiceImpl {
    repository: Arc<dyn ProfileRepository>,
}

impl ProfileServiceImpl {
    pub fn new(repository: Arc<dyn ProfileRepository>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl ProfileService for ProfileServiceImpl {
    async fn create_profile(&self, params: NewProfileParams) -> ProfileResult<UserProfile> {
        let user_id = UserId::new(&params.user_id)?;
        let email = EmailAddress::new(&params.email)?;

        let mut profile = UserProfile::new(&user_id, &email);

        if let Some(full_name) = params.full_name.as_deref().filter(|n| !n.trim().is_empty()) {
            profile.set_full_name(full_name);
        }

        if let Some(phone) = params.phone.as_deref().filter(|p| !p.trim().is_empty()) {
            let phone = parse_vn_phone(phone).map_err(ProfileError::InvalidPhone)?;
            profile.set_phone(&phone);
        }

        let created = self.repository.insert(&profile).await?;
        tracing::info!(user_id = %user_id, "Profile created");
        Ok(created)
    }

    async fn get_profile(&self, user_id: &str) -> ProfileResult<UserProfile> {
        let user_id = UserId::new(user_id)?;
        Ok(self.repository.get(user_id.as_str()).await?)
    }

    async fn save_customer_info(
        &self,
        user_id: &str,
        full_name: &str,
        phone: &str,
    ) -> ProfileResult<UserProfile> {
        let user_id = UserId::new(user_id)?;

        let phone = parse_vn_phone(phone).map_err(|e| {
            tracing::warn!(user_id = %user_id, error = e.code(), "Rejected customer info phone");
            ProfileError::InvalidPhone(e)
        })?;

        let mut profile = self.repository.get(user_id.as_str()).await?;
        profile.set_full_name(full_name);
        profile.set_phone(&phone);
        profile.touch();

        let saved = self.repository.save(&profile).await?;
        tracing::info!(
            user_id = %user_id,
            carrier_prefix = phone.carrier_prefix(),
            "Customer info saved"
        );
        Ok(saved)
    }
}
