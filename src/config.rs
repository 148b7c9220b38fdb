//! Configuration management for the VN KYC MCP Server.
//!
//! This module handles loading and validating configuration from environment variables.
//! Nothing here is required: without any variables the server runs with an in-memory
//! profile store and USD formatting.

use crate::error::{ConfigError, ConfigResult};
use crate::format::Currency;
use std::env;
use std::path::PathBuf;

/// Configuration for the VN KYC MCP Server.
#[derive(Debug, Clone)]
pub struct Config {
    /// JSON profile store location; `None` keeps profiles in memory
    pub profile_store_path: Option<PathBuf>,

    /// Currency used by `format_amount` when the caller names none (default: USD)
    pub default_currency: Currency,

    /// Maximum characters in a KYC note (default: 1000)
    pub max_kyc_note_length: usize,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Optional environment variables:
    /// - `PROFILE_STORE_PATH`: JSON file for profiles (default: in-memory)
    /// - `DEFAULT_CURRENCY`: USD, EUR or VND (default: USD)
    /// - `MAX_KYC_NOTE_LENGTH`: note length limit (default: 1000)
    pub fn from_env() -> ConfigResult<Self> {
        // Try to load .env file if it exists (but don't fail if it doesn't)
        // We use dotenvy::dotenv() which doesn't print to stdout
        let _ = dotenvy::dotenv();

        let profile_store_path = match env::var("PROFILE_STORE_PATH") {
            Ok(val) if val.trim().is_empty() => {
                return Err(ConfigError::InvalidValue {
                    var: "PROFILE_STORE_PATH".to_string(),
                    reason: "Cannot be empty; unset it to use the in-memory store".to_string(),
                });
            }
            Ok(val) => Some(PathBuf::from(val.trim())),
            Err(_) => None,
        };

        let default_currency = match env::var("DEFAULT_CURRENCY") {
            Ok(val) => val
                .parse::<Currency>()
                .map_err(|e| ConfigError::InvalidValue {
                    var: "DEFAULT_CURRENCY".to_string(),
                    reason: e.to_string(),
                })?,
            Err(_) => Currency::default(),
        };

        let max_kyc_note_length = Self::parse_env_usize("MAX_KYC_NOTE_LENGTH", 1000)?;
        if max_kyc_note_length == 0 {
            return Err(ConfigError::InvalidValue {
                var: "MAX_KYC_NOTE_LENGTH".to_string(),
                reason: "Must be greater than 0".to_string(),
            });
        }

        Ok(Config {
            profile_store_path,
            default_currency,
            max_kyc_note_length,
        })
    }

    /// Parse an environment variable as usize with a default value.
    fn parse_env_usize(var_name: &str, default: usize) -> ConfigResult<usize> {
        match env::var(var_name) {
            Ok(val) => val.parse::<usize>().map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a positive number, got: {}", val),
            }),
            Err(_) => Ok(default),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            profile_store_path: None,
            default_currency: Currency::Usd,
            max_kyc_note_length: 1000,
        }
    }
}
