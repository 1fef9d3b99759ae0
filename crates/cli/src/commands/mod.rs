//! CLI command implementations.

use std::path::Path;

use thiserror::Error;
use user_registry::{ConfigError, MissingIdPolicy, RegistryConfig};

pub mod script;
pub mod seed;
pub mod validate;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Reading input or writing output failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The input file is not valid YAML for this command.
    #[error("Invalid YAML in {path}: {source}")]
    Yaml {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },

    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Validation failed for one or more fields.
    #[error("{0} invalid field(s)")]
    InvalidFields(usize),

    /// One or more script steps failed.
    #[error("{0} step(s) failed")]
    StepsFailed(usize),
}

/// Load registry configuration, with `--strict` overriding the environment.
pub fn load_config(strict: bool) -> Result<RegistryConfig, CommandError> {
    let config = RegistryConfig::from_env()?;
    Ok(if strict {
        config.with_missing_id(MissingIdPolicy::Reject)
    } else {
        config
    })
}

/// Parse YAML input, reading enum variants written as single-key maps
/// (`- edit: 1`) or plain strings (`- submit`).
pub fn from_yaml_str<T: serde::de::DeserializeOwned>(
    content: &str,
) -> Result<T, serde_yaml::Error> {
    let deserializer = serde_yaml::Deserializer::from_str(content);
    serde_yaml::with::singleton_map_recursive::deserialize(deserializer)
}

/// Read and parse a YAML file.
pub fn read_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, CommandError> {
    let content = std::fs::read_to_string(path)?;
    from_yaml_str(&content).map_err(|source| CommandError::Yaml {
        path: path.display().to_string(),
        source,
    })
}
