//! UserId value object.

use super::errors::ValidationError;
use std::fmt;

/// Identifier of a customer account.
///
/// User IDs key profiles in the profile store. Surrounding whitespace is
/// dropped and the result cannot be empty.
///
/// # Example
///
/// ```
/// use vn_kyc_mcp_server::domain::UserId;
///
/// let id = UserId::new(" user_123 ").unwrap();
/// assert_eq!(id.as_str(), "user_123");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserId(String);

impl UserId {
    /// # Errors
    ///
    /// Returns `ValidationError::EmptyId` if nothing but whitespace is given.
    pub fn new(id: impl AsRef<str>) -> Result<Self, ValidationError> {
        let id = id.as_ref().trim();
        if id.is_empty() {
            return Err(ValidationError::EmptyId);
        }
        Ok(Self(id.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
