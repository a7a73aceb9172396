//! Error types for configuration loading.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading or reading a configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// One or more required variables resolved to an empty value.
    ///
    /// Names are listed in options order.
    #[error("Missing configuration variables: {}", .0.join(", "))]
    MissingVariables(Vec<String>),

    #[error("Failed to read options file at {path}")]
    OptionsRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse options file at {path}: {source}")]
    OptionsParse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Options file at {path} has no section for environment '{environment}'")]
    EnvironmentNotFound { path: PathBuf, environment: String },

    /// The env file exists but could not be read. Missing files are not errors.
    #[error("Failed to read env file at {path}")]
    EnvFileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration accessed before a successful load")]
    NotLoaded,
}

impl ConfigError {
    /// Names of the missing required variables, if this is a validation failure.
    pub fn missing_variables(&self) -> Option<&[String]> {
        match self {
            ConfigError::MissingVariables(names) => Some(names),
            _ => None,
        }
    }
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
