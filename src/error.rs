//! Error types for the VN KYC MCP Server.
//!
//! This module defines custom error types using `thiserror` for precise error handling.
//! Phone validation failures are not errors here: `validate_vn_phone` reports them
//! in its result. They only become a `ProfileError` when a write requires a valid phone.

use crate::domain::{PhoneError, ValidationError};
use thiserror::Error;

/// Errors raised by a profile store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// No profile or record with this id
    #[error("Not found: {0}")]
    NotFound(String),

    /// A profile with this id already exists
    #[error("Already exists: {0}")]
    AlreadyExists(String),

    /// The profile changed since it was read
    #[error("Profile {0} was modified concurrently, reload and retry")]
    Conflict(String),

    /// Reading or writing the store file failed
    #[error("Store I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The store file is not valid JSON
    #[error("Store JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors from profile and KYC operations.
#[derive(Error, Debug)]
pub enum ProfileError {
    /// Malformed id, email, document type or currency
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// The phone number is required and did not validate
    #[error("Số điện thoại không hợp lệ: {0}")]
    InvalidPhone(PhoneError),

    /// Document name or number left blank
    #[error("Thiếu thông tin: vui lòng nhập họ tên và số giấy tờ.")]
    MissingDocumentFields,

    /// KYC note exceeds the configured limit
    #[error("KYC note too long (max {max} characters)")]
    NoteTooLong { max: usize },

    /// Only submissions waiting for review can be reviewed
    #[error("Verification {0} is not pending review")]
    NotPendingReview(String),

    /// Underlying store failure
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Environment variable has invalid value
    #[error("Invalid value for {var}: {reason}")]
    InvalidValue { var: String, reason: String },
}

/// Convenience type alias for Results with StoreError
pub type StoreResult<T> = Result<T, StoreError>;

/// Convenience type alias for Results with ProfileError
pub type ProfileResult<T> = Result<T, ProfileError>;

/// Convenience type alias for Results with ConfigError
pub type ConfigResult<T> = Result<T, ConfigError>;
