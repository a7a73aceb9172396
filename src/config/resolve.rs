//! Resolution of a single variable.
//!
//! Candidates are consulted in order, highest precedence first:
//! 1. **Environment** - non-empty process environment value
//! 2. **File** - non-empty value from the merged env files
//! 3. **Default** - the declared default, only for variables that are not required
//!
//! The selected raw value is then coerced to the variable's type.

use super::coerce::Coercions;
use super::types::{RawValue, Value, ValueType, VariableSpec};
use serde::Serialize;
use std::fmt;

/// Default value that resolves to the empty string instead of nothing.
pub const EMPTY_DEFAULT: &str = "empty";

/// Where a resolved value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Source {
    Environment,
    File,
    Default,
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Environment => write!(f, "environment"),
            Source::File => write!(f, "file"),
            Source::Default => write!(f, "default"),
        }
    }
}

/// The final typed value for one variable.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedValue {
    pub name: String,
    #[serde(rename = "type")]
    pub value_type: ValueType,
    pub value: Option<Value>,
    pub required: bool,
    pub source: Option<Source>,
}

impl ResolvedValue {
    /// Resolve `spec` from its environment and env-file candidates.
    pub fn resolve(
        spec: &VariableSpec,
        env_value: Option<&str>,
        file_value: Option<&str>,
        coercions: &Coercions,
    ) -> Self {
        let selected = select_raw(spec, env_value, file_value);
        let (value, source) = match selected {
            Some((raw, source)) => (
                Some(coercions.coerce(&spec.value_type, &raw)),
                Some(source),
            ),
            None => (None, None),
        };

        Self {
            name: spec.name.clone(),
            value_type: spec.value_type.clone(),
            value,
            required: spec.required,
            source,
        }
    }

    /// True when the variable is required but resolved to an empty value.
    pub fn is_invalid(&self) -> bool {
        self.required && self.value.as_ref().is_none_or(Value::is_blank)
    }
}

fn non_empty(candidate: Option<&str>) -> Option<&str> {
    candidate.filter(|s| !s.trim().is_empty())
}

fn select_raw(
    spec: &VariableSpec,
    env_value: Option<&str>,
    file_value: Option<&str>,
) -> Option<(RawValue, Source)> {
    if let Some(env) = non_empty(env_value) {
        return Some((RawValue::from(env), Source::Environment));
    }
    if let Some(file) = non_empty(file_value) {
        return Some((RawValue::from(file), Source::File));
    }
    if spec.required {
        return None;
    }
    spec.default.as_ref().map(|default| {
        let raw = match default {
            RawValue::Text(s) if s == EMPTY_DEFAULT => RawValue::Text(String::new()),
            other => other.clone(),
        };
        (raw, Source::Default)
    })
}
