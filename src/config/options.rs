//! Variable declarations and where they come from.
//!
//! The options shape is a mapping of variable name to spec fields:
//!
//! ```yaml
//! DATABASE_URL:
//!   type: url
//!   required: true
//! TIMEOUT:
//!   type: minutes
//!   default: 2
//! ```
//!
//! A scoped options file nests that mapping under environment names:
//!
//! ```yaml
//! development:
//!   TIMEOUT: { type: minutes, default: 2 }
//! production:
//!   TIMEOUT: { type: minutes, default: 10 }
//! ```

use super::types::{RawValue, ValueType, VariableSpec};
use crate::error::{ConfigError, Result};
use indexmap::IndexMap;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Raw spec fields as written in an options mapping.
#[derive(Debug, Clone, Default, Deserialize)]
struct SpecFields {
    #[serde(rename = "type", default)]
    value_type: Option<RawValue>,
    #[serde(default)]
    default: Option<RawValue>,
    #[serde(default)]
    required: Option<RawValue>,
}

impl SpecFields {
    fn into_spec(self, name: String) -> VariableSpec {
        let value_type = self
            .value_type
            .map(|t| ValueType::from_name(&t.to_string()))
            .unwrap_or_default();
        VariableSpec {
            name,
            value_type,
            default: self.default,
            // Only a literal boolean `true` marks a variable as required.
            required: matches!(self.required, Some(RawValue::Bool(true))),
        }
    }
}

/// Ordered set of variable specs, keyed by name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Options {
    specs: IndexMap<String, VariableSpec>,
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse an options mapping from YAML text. Empty text means no options.
    pub fn from_yaml_str(yaml: &str) -> std::result::Result<Self, serde_yaml::Error> {
        let raw: Option<IndexMap<String, Option<SpecFields>>> = serde_yaml::from_str(yaml)?;
        Ok(Self::from_raw(raw.unwrap_or_default()))
    }

    /// Read a flat options file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = read_options_file(path)?;
        Self::from_yaml_str(&content).map_err(|source| ConfigError::OptionsParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Read the `environment` section of a scoped options file.
    pub fn from_scoped_file(path: &Path, environment: &str) -> Result<Self> {
        let content = read_options_file(path)?;
        let parse_err = |source| ConfigError::OptionsParse {
            path: path.to_path_buf(),
            source,
        };

        let sections: Option<IndexMap<String, serde_yaml::Value>> =
            serde_yaml::from_str(&content).map_err(parse_err)?;
        let section = sections
            .unwrap_or_default()
            .shift_remove(environment)
            .ok_or_else(|| ConfigError::EnvironmentNotFound {
                path: path.to_path_buf(),
                environment: environment.to_string(),
            })?;

        let raw: Option<IndexMap<String, Option<SpecFields>>> =
            serde_yaml::from_value(section).map_err(parse_err)?;
        Ok(Self::from_raw(raw.unwrap_or_default()))
    }

    fn from_raw(raw: IndexMap<String, Option<SpecFields>>) -> Self {
        let specs = raw
            .into_iter()
            .map(|(name, fields)| {
                let spec = fields.unwrap_or_default().into_spec(name.clone());
                (name, spec)
            })
            .collect();
        Self { specs }
    }

    /// Add a spec, replacing any earlier spec with the same name in place.
    pub fn insert(&mut self, spec: VariableSpec) {
        self.specs.insert(spec.name.clone(), spec);
    }

    pub fn with(mut self, spec: VariableSpec) -> Self {
        self.insert(spec);
        self
    }

    pub fn get(&self, name: &str) -> Option<&VariableSpec> {
        self.specs.get(name)
    }

    pub fn specs(&self) -> impl Iterator<Item = &VariableSpec> {
        self.specs.values()
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}

impl FromIterator<VariableSpec> for Options {
    fn from_iter<I: IntoIterator<Item = VariableSpec>>(iter: I) -> Self {
        let mut options = Options::new();
        for spec in iter {
            options.insert(spec);
        }
        options
    }
}

fn read_options_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| ConfigError::OptionsRead {
        path: path.to_path_buf(),
        source,
    })
}

/// Where a loader gets its variable declarations from.
#[derive(Debug, Clone)]
pub enum OptionsSource {
    /// Declarations already in memory.
    Inline(Options),
    /// A YAML file holding a flat options mapping.
    File(PathBuf),
    /// A YAML file with one options mapping per environment name.
    Scoped { path: PathBuf, environment: String },
}

impl OptionsSource {
    /// Produce the options, reading and parsing files as needed.
    pub fn load(&self) -> Result<Options> {
        match self {
            OptionsSource::Inline(options) => Ok(options.clone()),
            OptionsSource::File(path) => Options::from_file(path),
            OptionsSource::Scoped { path, environment } => {
                Options::from_scoped_file(path, environment)
            }
        }
    }
}

impl From<Options> for OptionsSource {
    fn from(options: Options) -> Self {
        OptionsSource::Inline(options)
    }
}

impl From<PathBuf> for OptionsSource {
    fn from(path: PathBuf) -> Self {
        OptionsSource::File(path)
    }
}

impl From<&Path> for OptionsSource {
    fn from(path: &Path) -> Self {
        OptionsSource::File(path.to_path_buf())
    }
}
