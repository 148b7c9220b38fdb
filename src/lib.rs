//! VN KYC MCP Server - validation and KYC checks for Vietnamese customer onboarding.
//!
//! This library validates Vietnamese mobile numbers, compares names across
//! diacritics, formats currency amounts, and runs KYC document verification
//! against stored customer profiles. An MCP server exposes all of it to AI
//! assistants over stdio.
//!
//! # Architecture
//!
//! - **domain**: Phone validator, name normalizer and value objects
//! - **format**: Currency formatting
//! - **models**: Profiles and verification records
//! - **error**: Custom error types for precise error handling
//! - **config**: Configuration management from environment variables
//! - **repositories**: Profile store port with in-memory and JSON file backends
//! - **services**: Profile and KYC business logic
//! - **observability**: Counters and timers
//! - **server**: MCP protocol server

pub mod config;
pub mod domain;
pub mod error;
pub mod format;
pub mod models;
pub mod observability;
pub mod repositories;
pub mod server;
pub mod services;

// Re-export commonly used types
pub use config::Config;
pub use domain::{names_match, normalize_vn_name, validate_vn_phone, PhoneValidationResult};
pub use error::{ConfigError, ProfileError, StoreError};
pub use models::{KycStatus, UserProfile, VerificationRecord, VerificationStatus};
pub use observability::MetricsTracker;
pub use server::KycMcpServer;
