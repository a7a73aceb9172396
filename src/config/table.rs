//! The resolved configuration table.

use super::coerce::Coercions;
use super::env_file::EnvFileMap;
use super::loader::EnvSnapshot;
use super::resolve::ResolvedValue;
use super::types::{Value, VariableSpec};
use crate::error::{ConfigError, Result};
use indexmap::IndexMap;
use std::fmt;

/// Name-indexed resolved values, in options order.
///
/// Built once per load and read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigTable {
    entries: IndexMap<String, ResolvedValue>,
}

impl ConfigTable {
    /// Resolve every spec against the environment snapshot and env-file map.
    pub fn build<'a>(
        specs: impl IntoIterator<Item = &'a VariableSpec>,
        env: &EnvSnapshot,
        file_map: &EnvFileMap,
        coercions: &Coercions,
    ) -> Self {
        let entries = specs
            .into_iter()
            .map(|spec| {
                let resolved = ResolvedValue::resolve(
                    spec,
                    env.get(&spec.name),
                    file_map.get(&spec.name).map(String::as_str),
                    coercions,
                );
                (spec.name.clone(), resolved)
            })
            .collect();
        Self { entries }
    }

    /// Typed value for `name`. Absent for unknown names and unresolved values.
    pub fn get(&self, name: impl AsRef<str>) -> Option<&Value> {
        self.entries
            .get(name.as_ref())
            .and_then(|resolved| resolved.value.as_ref())
    }

    /// Full resolution record for `name`.
    pub fn resolved(&self, name: impl AsRef<str>) -> Option<&ResolvedValue> {
        self.entries.get(name.as_ref())
    }

    pub fn contains(&self, name: impl AsRef<str>) -> bool {
        self.entries.contains_key(name.as_ref())
    }

    pub fn iter(&self) -> impl Iterator<Item = &ResolvedValue> {
        self.entries.values()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Names of required variables that resolved to an empty value.
    pub fn missing(&self) -> Vec<String> {
        self.entries
            .values()
            .filter(|resolved| resolved.is_invalid())
            .map(|resolved| resolved.name.clone())
            .collect()
    }

    /// Fail with every missing required variable, in options order.
    pub fn validate(&self) -> Result<()> {
        let missing = self.missing();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::MissingVariables(missing))
        }
    }

    /// Resolved values as environment strings. Unresolved entries export as `""`.
    pub fn env_exports(&self) -> Vec<(String, String)> {
        self.entries
            .iter()
            .map(|(name, resolved)| {
                let value = resolved
                    .value
                    .as_ref()
                    .map(Value::to_string)
                    .unwrap_or_default();
                (name.clone(), value)
            })
            .collect()
    }
}

impl fmt::Display for ConfigTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for resolved in self.entries.values() {
            write!(f, "{} ({})", resolved.name, resolved.value_type)?;
            match (&resolved.value, resolved.source) {
                (Some(value), Some(source)) => write!(f, " = {:?} [{}]", value, source)?,
                (Some(value), None) => write!(f, " = {:?}", value)?,
                (None, _) => write!(f, " = <unset>")?,
            }
            if resolved.required {
                write!(f, " required")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
