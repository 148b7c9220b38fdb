//! Domain validation errors.

use serde::{Serialize, Serializer};
use std::fmt;

/// Which international form a number was written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CountryCodeForm {
    /// `+84...`
    Plus,
    /// `84...` without the plus sign
    Bare,
}

impl CountryCodeForm {
    /// The prefix as the user typed it.
    pub fn prefix(&self) -> &'static str {
        match self {
            Self::Plus => "+84",
            Self::Bare => "84",
        }
    }
}

impl fmt::Display for CountryCodeForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix())
    }
}

/// Reasons a Vietnamese mobile number is rejected.
///
/// Checks run in a fixed order and only the first failing one is reported,
/// so a short `+84` number is `BadInternationalFormat`, never `WrongLength`.
/// The `Display` text is the Vietnamese message shown to the customer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhoneError {
    /// Nothing but whitespace was entered.
    EmptyInput,

    /// The number starts with neither `0` nor `+84`/`84`.
    MissingCountryOrTrunkPrefix,

    /// A country code is present but not followed by exactly 9 digits.
    BadInternationalFormat(CountryCodeForm),

    /// The local form is not exactly 10 digits.
    WrongLength,

    /// The carrier prefix is not one of 03, 05, 07, 08, 09.
    InvalidPrefix,
}

impl PhoneError {
    /// Stable machine-readable code for API consumers.
    pub fn code(&self) -> &'static str {
        match self {
            Self::EmptyInput => "empty_input",
            Self::MissingCountryOrTrunkPrefix => "missing_country_or_trunk_prefix",
            Self::BadInternationalFormat(_) => "bad_international_format",
            Self::WrongLength => "wrong_length",
            Self::InvalidPrefix => "invalid_prefix",
        }
    }
}

impl fmt::Display for PhoneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyInput => write!(f, "Vui lòng nhập số điện thoại."),
            Self::MissingCountryOrTrunkPrefix => {
                write!(f, "Số điện thoại phải bắt đầu bằng 0 hoặc +84.")
            }
            Self::BadInternationalFormat(form) => write!(
                f,
                "Định dạng {} cần 9 chữ số phía sau (VD: {}912345678).",
                form, form
            ),
            Self::WrongLength => write!(f, "Số điện thoại phải có 10 chữ số (VD: 0912345678)."),
            Self::InvalidPrefix => write!(f, "Đầu số không hợp lệ. Hỗ trợ 03, 05, 07, 08, 09."),
        }
    }
}

impl std::error::Error for PhoneError {}

// Serialized as its code so JSON consumers can branch on it
impl Serialize for PhoneError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.code())
    }
}

/// Errors that can occur during domain value object validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The provided ID is empty.
    EmptyId,

    /// The provided email address is invalid.
    InvalidEmail(String),

    /// The provided phone number is invalid.
    InvalidPhone(PhoneError),

    /// The identity document type is not cccd, cmnd or passport.
    UnknownDocumentType(String),

    /// The currency code is not supported by the formatter.
    UnknownCurrency(String),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId => write!(f, "ID cannot be empty"),
            Self::InvalidEmail(email) => write!(f, "Invalid email address: {}", email),
            Self::InvalidPhone(err) => write!(f, "Invalid phone number: {}", err),
            Self::UnknownDocumentType(kind) => write!(f, "Unknown document type: {}", kind),
            Self::UnknownCurrency(code) => write!(f, "Unsupported currency: {}", code),
        }
    }
}

impl std::error::Error for ValidationError {}

impl From<PhoneError> for ValidationError {
    fn from(err: PhoneError) -> Self {
        Self::InvalidPhone(err)
    }
}
