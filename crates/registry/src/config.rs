//! Registry configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `USER_REGISTRY_MISSING_ID_POLICY` - `ignore` or `reject` (default: ignore)
//! - `USER_REGISTRY_FIRST_ID` - First user ID handed out (default: 1)

use core::fmt;
use std::str::FromStr;

use thiserror::Error;

const MISSING_ID_POLICY_VAR: &str = "USER_REGISTRY_MISSING_ID_POLICY";
const FIRST_ID_VAR: &str = "USER_REGISTRY_FIRST_ID";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// What update and delete do when no user has the requested ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MissingIdPolicy {
    /// Silently do nothing. Delete still emits an unchanged snapshot.
    #[default]
    Ignore,
    /// Return [`StoreError::UserNotFound`](crate::StoreError::UserNotFound)
    /// and emit nothing.
    Reject,
}

impl FromStr for MissingIdPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ignore" => Ok(Self::Ignore),
            "reject" => Ok(Self::Reject),
            other => Err(format!("expected `ignore` or `reject`, got `{other}`")),
        }
    }
}

impl fmt::Display for MissingIdPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ignore => f.write_str("ignore"),
            Self::Reject => f.write_str("reject"),
        }
    }
}

/// User registry configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegistryConfig {
    /// Behavior for update/delete of unknown IDs
    pub missing_id: MissingIdPolicy,
    /// First ID assigned by the store
    pub first_id: u64,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            missing_id: MissingIdPolicy::Ignore,
            first_id: 1,
        }
    }
}

impl RegistryConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let missing_id = match lookup(MISSING_ID_POLICY_VAR) {
            Some(value) => value
                .parse::<MissingIdPolicy>()
                .map_err(|e| ConfigError::InvalidEnvVar(MISSING_ID_POLICY_VAR.to_string(), e))?,
            None => defaults.missing_id,
        };

        let first_id = match lookup(FIRST_ID_VAR) {
            Some(value) => parse_first_id(&value)?,
            None => defaults.first_id,
        };

        Ok(Self {
            missing_id,
            first_id,
        })
    }

    /// Returns this configuration with a different missing-ID policy.
    #[must_use]
    pub const fn with_missing_id(mut self, policy: MissingIdPolicy) -> Self {
        self.missing_id = policy;
        self
    }
}

fn parse_first_id(value: &str) -> Result<u64, ConfigError> {
    let id = value
        .trim()
        .parse::<u64>()
        .map_err(|e| ConfigError::InvalidEnvVar(FIRST_ID_VAR.to_string(), e.to_string()))?;
    if id == 0 {
        return Err(ConfigError::InvalidEnvVar(
            FIRST_ID_VAR.to_string(),
            "must be at least 1".to_string(),
        ));
    }
    Ok(id)
}
