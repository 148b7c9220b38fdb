//! Customer profile, the record the account and KYC screens edit.

use crate::domain::{split_full_name, DocumentType, EmailAddress, UserId, VnPhoneNumber};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Where a customer is in identity verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum KycStatus {
    /// Never submitted a document
    #[default]
    None,
    /// Submitted, waiting for manual review
    Pending,
    Approved,
    Rejected,
}

/// A customer profile as persisted in the profile store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct UserProfile {
    pub id: String,

    pub email: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,

    /// Full name as the customer (or their document) writes it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,

    /// Local form `0XXXXXXXXX` when valid, otherwise whatever was entered
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    /// `+84XXXXXXXXX`, only set alongside a valid phone
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_e164: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub id_type: Option<DocumentType>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub id_number: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub kyc_note: Option<String>,

    pub kyc_status: KycStatus,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,

    /// Bumped by the store on every write; a save carrying a stale
    /// revision is refused.
    pub revision: u64,
}

impl UserProfile {
    /// A fresh profile with no name, phone or KYC data.
    pub fn new(id: &UserId, email: &EmailAddress) -> Self {
        Self {
            id: id.as_str().to_string(),
            email: email.as_str().to_string(),
            updated_at: Some(Utc::now()),
            ..Default::default()
        }
    }

    /// Name shown on the account screen and compared against documents.
    ///
    /// Prefers the full name; falls back to "first last".
    pub fn display_name(&self) -> String {
        match self.full_name.as_deref().map(str::trim) {
            Some(full) if !full.is_empty() => full.to_string(),
            _ => format!(
                "{} {}",
                self.first_name.as_deref().unwrap_or(""),
                self.last_name.as_deref().unwrap_or("")
            )
            .trim()
            .to_string(),
        }
    }

    /// Replace the full name and derive first/last name from it.
    ///
    /// A blank name keeps the existing first name, and a single-word name
    /// keeps the existing last name.
    pub fn set_full_name(&mut self, full_name: &str) {
        let trimmed = full_name.trim();
        let (first, rest) = split_full_name(trimmed);

        if first.is_some() {
            self.first_name = first;
        }
        if rest.is_some() {
            self.last_name = rest;
        }
        self.full_name = Some(trimmed.to_string());
    }

    /// Store a validated phone in both local and E.164 form.
    pub fn set_phone(&mut self, phone: &VnPhoneNumber) {
        self.phone = Some(phone.local().to_string());
        self.phone_e164 = Some(phone.e164());
    }

    /// Store unvalidated phone text and drop any stale E.164 form.
    pub fn set_raw_phone(&mut self, raw: &str) {
        self.phone = Some(raw.to_string());
        self.phone_e164 = None;
    }

    pub fn touch(&mut self) {
        self.updated_at = Some(Utc::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> UserProfile {
        UserProfile::new(
            &UserId::new("u1").unwrap(),
            &EmailAddress::new("a@example.com").unwrap(),
        )
    }

    #[test]
    fn test_new_profile_defaults() {
        let p = profile();
        assert_eq!(p.id, "u1");
        assert_eq!(p.kyc_status, KycStatus::None);
        assert!(p.updated_at.is_some());
        assert_eq!(p.display_name(), "");
    }

    #[test]
    fn test_display_name_fallback() {
        let mut p = profile();
        p.first_name = Some("Văn".to_string());
        p.last_name = Some("An".to_string());
        assert_eq!(p.display_name(), "Văn An");

        p.full_name = Some("  ".to_string());
        assert_eq!(p.display_name(), "Văn An");

        p.full_name = Some("Nguyễn Văn An".to_string());
        assert_eq!(p.display_name(), "Nguyễn Văn An");
    }

    #[test]
    fn test_set_full_name_splits() {
        let mut p = profile();
        p.set_full_name("  Trần Thị Bích ");
        assert_eq!(p.full_name.as_deref(), Some("Trần Thị Bích"));
        assert_eq!(p.first_name.as_deref(), Some("Trần"));
        assert_eq!(p.last_name.as_deref(), Some("Thị Bích"));

        p.set_full_name("Bích");
        assert_eq!(p.first_name.as_deref(), Some("Bích"));
        assert_eq!(p.last_name.as_deref(), Some("Thị Bích"));
    }

    #[test]
    fn test_set_phone_forms() {
        let mut p = profile();
        p.set_phone(&VnPhoneNumber::new("84912345678").unwrap());
        assert_eq!(p.phone.as_deref(), Some("0912345678"));
        assert_eq!(p.phone_e164.as_deref(), Some("+84912345678"));

        p.set_raw_phone("12345");
        assert_eq!(p.phone.as_deref(), Some("12345"));
        assert!(p.phone_e164.is_none());
    }

    #[test]
    fn test_serialization_uses_camel_case() {
        let mut p = profile();
        p.set_phone(&VnPhoneNumber::new("0912345678").unwrap());
        p.id_type = Some(DocumentType::Cccd);
        let json = serde_json::to_value(&p).unwrap();
        assert_eq!(json["phoneE164"], "+84912345678");
        assert_eq!(json["kycStatus"], "none");
        assert_eq!(json["idType"], "CCCD");
        assert!(json.get("kycNote").is_none());
    }

    #[test]
    fn test_deserialization_tolerates_missing_fields() {
        let p: UserProfile = serde_json::from_str(r#"{"id":"u9","email":"x@y.vn"}"#).unwrap();
        assert_eq!(p.kyc_status, KycStatus::None);
        assert!(p.full_name.is_none());
        assert_eq!(p.revision, 0);
    }

    #[test]
    fn test_reads_upper_case_id_type() {
        let p: UserProfile =
            serde_json::from_str(r#"{"id":"u9","email":"x@y.vn","idType":"PASSPORT"}"#).unwrap();
        assert_eq!(p.id_type, Some(DocumentType::Passport));
    }
}
