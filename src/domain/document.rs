//! Identity document types accepted for KYC.

use super::errors::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of identity document a customer submits.
///
/// Stored upper-case (`"CCCD"`); lower-case values are read back too.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum DocumentType {
    /// Căn cước công dân (chip citizen ID)
    #[default]
    #[serde(alias = "cccd")]
    Cccd,
    /// Chứng minh nhân dân (old-style ID)
    #[serde(alias = "cmnd")]
    Cmnd,
    #[serde(alias = "passport")]
    Passport,
}

impl DocumentType {
    /// Upper-case label stored on the profile, e.g. `CCCD`.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Cccd => "CCCD",
            Self::Cmnd => "CMND",
            Self::Passport => "PASSPORT",
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for DocumentType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cccd" => Ok(Self::Cccd),
            "cmnd" => Ok(Self::Cmnd),
            "passport" => Ok(Self::Passport),
            other => Err(ValidationError::UnknownDocumentType(other.to_string())),
        }
    }
}
