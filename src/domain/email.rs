//! EmailAddress value object.

use super::errors::ValidationError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A customer's login email.
///
/// Stored trimmed and lower-cased so the same mailbox always compares equal.
/// Validation is structural only: one `@`, a non-empty local part and a
/// dotted domain with no empty labels.
///
/// # Example
///
/// ```
/// use vn_kyc_mcp_server::domain::EmailAddress;
///
/// let email = EmailAddress::new(" An.Nguyen@Example.VN ").unwrap();
/// assert_eq!(email.as_str(), "an.nguyen@example.vn");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidEmail` if the address is malformed.
    pub fn new(email: impl AsRef<str>) -> Result<Self, ValidationError> {
        let email = email.as_ref().trim().to_lowercase();

        match email.split_once('@') {
            Some((local, domain)) if !local.is_empty() && is_valid_domain(domain) => {
                Ok(Self(email))
            }
            _ => Err(ValidationError::InvalidEmail(email)),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

fn is_valid_domain(domain: &str) -> bool {
    !domain.contains('@')
        && domain.contains('.')
        && domain.split('.').all(|label| !label.is_empty())
}

impl Serialize for EmailAddress {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for EmailAddress {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        EmailAddress::new(s).map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_validates_format() {
        assert!(EmailAddress::new("invalid").is_err());
        assert!(EmailAddress::new("@example.com").is_err());
        assert!(EmailAddress::new("user@").is_err());
        assert!(EmailAddress::new("user@domain").is_err());
        assert!(EmailAddress::new("user@@example.com").is_err());
        assert!(EmailAddress::new("user@example..com").is_err());
        assert!(EmailAddress::new("khach.hang+kyc@example.com.vn").is_ok());
    }

    #[test]
    fn test_email_is_normalized() {
        let email = EmailAddress::new("  Minh@Sàn.VN ").unwrap();
        assert_eq!(email.as_str(), "minh@sàn.vn");
    }

    #[test]
    fn test_email_serde() {
        let email: EmailAddress = serde_json::from_str("\"User@Example.com\"").unwrap();
        assert_eq!(serde_json::to_string(&email).unwrap(), "\"user@example.com\"");

        let result: Result<EmailAddress, _> = serde_json::from_str("\"nope\"");
        assert!(result.is_err());
    }
}
