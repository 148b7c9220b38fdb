//! Vietnamese mobile phone numbers.

use super::errors::{CountryCodeForm, PhoneError, ValidationError};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Carrier prefixes (first two digits of the local form) accepted for mobiles.
pub const VALID_PREFIXES: [&str; 5] = ["03", "05", "07", "08", "09"];

/// Message returned alongside a valid number.
pub const VALID_MESSAGE: &str = "Số hợp lệ.";

const COUNTRY_CODE: &str = "84";

static BARE_COUNTRY_CODE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^84[0-9]+$").expect("Failed to compile country code regex"));

static LOCAL_NUMBER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{10}$").expect("Failed to compile local number regex"));

/// A validated Vietnamese mobile number.
///
/// Always stored in the canonical local form: ten ASCII digits starting
/// with `0` and a supported carrier prefix.
///
/// # Example
///
/// ```
/// use vn_kyc_mcp_server::domain::VnPhoneNumber;
///
/// let phone = VnPhoneNumber::new("+84 912 345 678").unwrap();
/// assert_eq!(phone.local(), "0912345678");
/// assert_eq!(phone.e164(), "+84912345678");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VnPhoneNumber(String);

impl VnPhoneNumber {
    /// Parse free-form input into a phone number.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidPhone` carrying the first failed check.
    pub fn new(input: impl AsRef<str>) -> Result<Self, ValidationError> {
        parse_vn_phone(input.as_ref()).map_err(ValidationError::from)
    }

    /// The 10-digit local form, e.g. `0912345678`.
    pub fn local(&self) -> &str {
        &self.0
    }

    /// The E.164 form, e.g. `+84912345678`.
    pub fn e164(&self) -> String {
        format!("+{}{}", COUNTRY_CODE, &self.0[1..])
    }

    /// The two-digit carrier prefix, e.g. `09`.
    pub fn carrier_prefix(&self) -> &str {
        &self.0[..2]
    }

    /// Convert into the underlying local-form String.
    pub fn into_inner(self) -> String {
        self.0
    }
}

/// Outcome of validating a phone number typed into a form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PhoneValidationResult {
    pub is_valid: bool,

    /// Customer-facing message, in Vietnamese
    pub message: String,

    /// `0XXXXXXXXX`, present iff valid
    #[serde(skip_serializing_if = "Option::is_none")]
    pub normalized_local: Option<String>,

    /// `+84XXXXXXXXX`, present iff valid
    #[serde(skip_serializing_if = "Option::is_none")]
    pub e164: Option<String>,

    /// Failure kind, present iff invalid
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<PhoneError>,
}

impl From<Result<VnPhoneNumber, PhoneError>> for PhoneValidationResult {
    fn from(result: Result<VnPhoneNumber, PhoneError>) -> Self {
        match result {
            Ok(phone) => Self {
                is_valid: true,
                message: VALID_MESSAGE.to_string(),
                e164: Some(phone.e164()),
                normalized_local: Some(phone.into_inner()),
                error: None,
            },
            Err(err) => Self {
                is_valid: false,
                message: err.to_string(),
                normalized_local: None,
                e164: None,
                error: Some(err),
            },
        }
    }
}

/// Validate a phone number and report the result the way forms display it.
///
/// Never fails: invalid input produces `is_valid == false` and a message
/// describing the first defect found.
pub fn validate_vn_phone(input: &str) -> PhoneValidationResult {
    parse_vn_phone(input).into()
}

/// Parse free-form input into a canonical Vietnamese mobile number.
///
/// Spaces, dots, dashes and any other non-digit characters are ignored,
/// except a `+` appearing before the first digit.
pub fn parse_vn_phone(input: &str) -> Result<VnPhoneNumber, PhoneError> {
    if input.trim().is_empty() {
        return Err(PhoneError::EmptyInput);
    }

    let sanitized = sanitize(input);

    let local = if let Some(rest) = sanitized.strip_prefix("+84") {
        if rest.len() != 9 {
            return Err(PhoneError::BadInternationalFormat(CountryCodeForm::Plus));
        }
        format!("0{}", rest)
    } else if BARE_COUNTRY_CODE_RE.is_match(&sanitized) {
        let rest = &sanitized[COUNTRY_CODE.len()..];
        if rest.len() != 9 {
            return Err(PhoneError::BadInternationalFormat(CountryCodeForm::Bare));
        }
        format!("0{}", rest)
    } else if sanitized.starts_with('0') {
        sanitized
    } else {
        return Err(PhoneError::MissingCountryOrTrunkPrefix);
    };

    if !LOCAL_NUMBER_RE.is_match(&local) {
        return Err(PhoneError::WrongLength);
    }

    if !VALID_PREFIXES.contains(&&local[..2]) {
        return Err(PhoneError::InvalidPrefix);
    }

    Ok(VnPhoneNumber(local))
}

/// Keep ASCII digits, plus a `+` only when nothing has been kept yet.
fn sanitize(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        if c.is_ascii_digit() || (c == '+' && out.is_empty()) {
            out.push(c);
        }
    }
    out
}

// Serde support - serialize as the local form
impl Serialize for VnPhoneNumber {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

// Serde support - deserialize through the validator
impl<'de> Deserialize<'de> for VnPhoneNumber {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        VnPhoneNumber::new(s).map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for VnPhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
