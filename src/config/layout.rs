//! Conventional file locations for an application.
//!
//! For an application root and environment name:
//! - Options: `<root>/config/envspec.yml`, scoped by environment
//! - Env files: `<root>/.env`, then `<root>/.env.<environment>`
//!
//! ## Environment Variables
//! - `ENVSPEC_ROOT` - Application root (default: current directory)
//! - `ENVSPEC_ENV` - Environment name (default: `development`)

use super::loader::Loader;
use super::options::OptionsSource;
use std::path::{Path, PathBuf};

pub const ROOT_ENV_VAR: &str = "ENVSPEC_ROOT";
pub const ENVIRONMENT_ENV_VAR: &str = "ENVSPEC_ENV";
pub const DEFAULT_ENVIRONMENT: &str = "development";
/// Options file location relative to the root.
pub const OPTIONS_FILE: &str = "config/envspec.yml";

/// Application root plus environment name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLayout {
    pub root: PathBuf,
    pub environment: String,
}

impl Default for ProjectLayout {
    fn default() -> Self {
        Self::discover()
    }
}

impl ProjectLayout {
    /// Discover root and environment from the process environment.
    pub fn discover() -> Self {
        let root = non_blank_var(ROOT_ENV_VAR)
            .map(PathBuf::from)
            .or_else(|| std::env::current_dir().ok())
            .unwrap_or_else(|| PathBuf::from("."));
        let environment =
            non_blank_var(ENVIRONMENT_ENV_VAR).unwrap_or_else(|| DEFAULT_ENVIRONMENT.to_string());
        Self { root, environment }
    }

    pub fn new(root: impl Into<PathBuf>, environment: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            environment: environment.into(),
        }
    }

    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = root.into();
        self
    }

    pub fn with_environment(mut self, environment: impl Into<String>) -> Self {
        self.environment = environment.into();
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn options_file(&self) -> PathBuf {
        self.root.join(OPTIONS_FILE)
    }

    /// `.env` then `.env.<environment>`, so the environment file wins.
    pub fn env_files(&self) -> Vec<PathBuf> {
        vec![
            self.root.join(".env"),
            self.root.join(format!(".env.{}", self.environment)),
        ]
    }

    pub fn options_source(&self) -> OptionsSource {
        OptionsSource::Scoped {
            path: self.options_file(),
            environment: self.environment.clone(),
        }
    }

    /// Loader for this layout's options and env files.
    pub fn loader(&self) -> Loader {
        Loader::new(self.options_source()).env_files(self.env_files())
    }
}

fn non_blank_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|s| !s.trim().is_empty())
}
