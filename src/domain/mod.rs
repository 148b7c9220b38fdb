//! Domain value objects and validation rules.
//!
//! The phone validator and name normalizer are pure functions with no state;
//! the value objects here wrap their results so invalid data cannot reach
//! the profile store.

pub mod document;
pub mod email;
pub mod errors;
pub mod name;
pub mod phone;
pub mod user_id;

pub use document::DocumentType;
pub use email::EmailAddress;
pub use errors::{CountryCodeForm, PhoneError, ValidationError};
pub use name::{names_match, normalize_vn_name, split_full_name, strip_diacritics, NormalizedName};
pub use phone::{parse_vn_phone, validate_vn_phone, PhoneValidationResult, VnPhoneNumber};
pub use user_id::UserId;
