//! Configuration loader and the process-wide active table.
//!
//! [`Loader`] builds a validated [`ConfigTable`] from an options source, env
//! files and an environment snapshot. [`load`] and [`Loader::load`] also
//! publish the table as the active configuration, which [`get`] and
//! [`current`] read.
//!
//! Publishing is an atomic pointer swap, so readers always see either the
//! previous table or the new one in full. A failed load publishes nothing.

use super::coerce::Coercions;
use super::env_file::read_env_files;
use super::options::OptionsSource;
use super::table::ConfigTable;
use super::types::Value;
use crate::error::{ConfigError, Result};
use arc_swap::ArcSwapOption;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info, warn};

static ACTIVE: ArcSwapOption<ConfigTable> = ArcSwapOption::const_empty();

/// Read-only view of environment variables at one point in time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvSnapshot {
    vars: HashMap<String, String>,
}

impl EnvSnapshot {
    /// Capture the process environment. Variables that are not valid UTF-8 are skipped.
    pub fn capture() -> Self {
        let vars = std::env::vars_os()
            .filter_map(|(key, value)| Some((key.into_string().ok()?, value.into_string().ok()?)))
            .collect();
        Self { vars }
    }

    /// Build a snapshot from explicit pairs.
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

/// Builder for one load cycle.
#[derive(Debug, Clone)]
pub struct Loader {
    source: OptionsSource,
    env_files: Vec<PathBuf>,
    /// Explicit environment; the process environment is captured when unset.
    env: Option<EnvSnapshot>,
    coercions: Coercions,
}

impl Loader {
    pub fn new(source: impl Into<OptionsSource>) -> Self {
        Self {
            source: source.into(),
            env_files: Vec::new(),
            env: None,
            coercions: Coercions::standard(),
        }
    }

    /// Env files to merge, in increasing precedence.
    pub fn env_files<I, P>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.env_files = paths.into_iter().map(Into::into).collect();
        self
    }

    /// Resolve against `snapshot` instead of the process environment.
    pub fn env(mut self, snapshot: EnvSnapshot) -> Self {
        self.env = Some(snapshot);
        self
    }

    pub fn coercions(mut self, coercions: Coercions) -> Self {
        self.coercions = coercions;
        self
    }

    /// Build and validate a table without publishing it.
    pub fn build(&self) -> Result<ConfigTable> {
        let options = self.source.load()?;
        let file_map = read_env_files(&self.env_files)?;
        let captured;
        let env = match &self.env {
            Some(env) => env,
            None => {
                captured = EnvSnapshot::capture();
                &captured
            }
        };

        debug!(
            variables = options.len(),
            env_files = self.env_files.len(),
            file_entries = file_map.len(),
            "Resolving configuration"
        );
        let table = ConfigTable::build(options.specs(), env, &file_map, &self.coercions);

        if let Err(err) = table.validate() {
            warn!(error = %err, "Configuration validation failed");
            return Err(err);
        }
        Ok(table)
    }

    /// Build, validate and publish as the active configuration.
    pub fn load(&self) -> Result<Arc<ConfigTable>> {
        let table = Arc::new(self.build()?);
        ACTIVE.store(Some(Arc::clone(&table)));
        info!(variables = table.len(), "Configuration loaded");
        Ok(table)
    }
}

/// Load with the standard coercions and publish the result.
pub fn load<I, P>(source: impl Into<OptionsSource>, env_files: I) -> Result<Arc<ConfigTable>>
where
    I: IntoIterator<Item = P>,
    P: Into<PathBuf>,
{
    Loader::new(source).env_files(env_files).load()
}

/// Build with a configured [`Loader`] and publish the result.
pub fn load_with(loader: &Loader) -> Result<Arc<ConfigTable>> {
    loader.load()
}

/// The active configuration table.
pub fn current() -> Result<Arc<ConfigTable>> {
    ACTIVE.load_full().ok_or(ConfigError::NotLoaded)
}

/// Whether a configuration has been published.
pub fn is_loaded() -> bool {
    ACTIVE.load().is_some()
}

/// Value of `name` in the active configuration.
pub fn get(name: impl AsRef<str>) -> Result<Option<Value>> {
    Ok(current()?.get(name).cloned())
}
