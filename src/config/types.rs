//! Value and variable types.
//!
//! Raw inputs arrive as [`RawValue`]s, a [`VariableSpec`] declares how
//! one variable is resolved, and coercion produces a typed [`Value`].

use super::symbol::Symbol;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::time::Duration;

/// Declared type of a variable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum ValueType {
    String,
    Boolean,
    Integer,
    /// Whole minutes, stored as seconds.
    Minutes,
    Path,
    Url,
    Symbol,
    /// No `type` given.
    #[default]
    Unspecified,
    /// Any other type name. Stringified unless a coercion is registered for it.
    Custom(String),
}

impl ValueType {
    /// Map a type name from an options source onto a `ValueType`.
    pub fn from_name(name: &str) -> Self {
        match name {
            "string" => ValueType::String,
            "boolean" => ValueType::Boolean,
            "integer" => ValueType::Integer,
            "minutes" => ValueType::Minutes,
            "path" => ValueType::Path,
            "url" => ValueType::Url,
            "symbol" => ValueType::Symbol,
            "" => ValueType::Unspecified,
            other => ValueType::Custom(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ValueType::String => "string",
            ValueType::Boolean => "boolean",
            ValueType::Integer => "integer",
            ValueType::Minutes => "minutes",
            ValueType::Path => "path",
            ValueType::Url => "url",
            ValueType::Symbol => "symbol",
            ValueType::Unspecified => "unspecified",
            ValueType::Custom(name) => name,
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ValueType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// An uncoerced value as it arrived from a source.
///
/// Environment and env-file values are always `Text`. Defaults keep the type
/// they were written with in the options source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
    /// Sequences, mappings and tagged values. Stringified when coerced.
    Other(serde_yaml::Value),
}

impl RawValue {
    /// True when the value stringifies to nothing but whitespace.
    pub fn is_blank(&self) -> bool {
        match self {
            RawValue::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawValue::Bool(b) => write!(f, "{}", b),
            RawValue::Integer(i) => write!(f, "{}", i),
            // Debug keeps the fraction on whole floats: 2.0 stays "2.0".
            RawValue::Float(x) => write!(f, "{:?}", x),
            RawValue::Text(s) => f.write_str(s),
            RawValue::Other(value) => match serde_json::to_string(value) {
                Ok(json) => f.write_str(&json),
                // Mappings with non-string keys have no JSON form.
                Err(_) => match serde_yaml::to_string(value) {
                    Ok(yaml) => f.write_str(yaml.trim_end()),
                    Err(_) => write!(f, "{:?}", value),
                },
            },
        }
    }
}

impl From<&str> for RawValue {
    fn from(s: &str) -> Self {
        RawValue::Text(s.to_string())
    }
}

impl From<String> for RawValue {
    fn from(s: String) -> Self {
        RawValue::Text(s)
    }
}

impl From<bool> for RawValue {
    fn from(b: bool) -> Self {
        RawValue::Bool(b)
    }
}

impl From<i64> for RawValue {
    fn from(i: i64) -> Self {
        RawValue::Integer(i)
    }
}

impl From<i32> for RawValue {
    fn from(i: i32) -> Self {
        RawValue::Integer(i64::from(i))
    }
}

/// A resolved, typed configuration value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Bool(bool),
    Integer(i64),
    Str(String),
    Symbol(Symbol),
    /// Produced by host coercions such as [`Coercions::with_durations`](super::Coercions::with_durations).
    Duration(Duration),
}

impl Value {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// String view for `Str` and `Symbol` values.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            Value::Symbol(sym) => Some(sym.as_str()),
            _ => None,
        }
    }

    pub fn as_symbol(&self) -> Option<Symbol> {
        match self {
            Value::Symbol(sym) => Some(*sym),
            _ => None,
        }
    }

    pub fn as_duration(&self) -> Option<Duration> {
        match self {
            Value::Duration(d) => Some(*d),
            _ => None,
        }
    }

    /// True when the value stringifies to nothing but whitespace.
    pub fn is_blank(&self) -> bool {
        match self {
            Value::Str(s) => s.trim().is_empty(),
            Value::Symbol(sym) => sym.as_str().trim().is_empty(),
            Value::Bool(_) | Value::Integer(_) | Value::Duration(_) => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(b) => write!(f, "{}", b),
            Value::Integer(i) => write!(f, "{}", i),
            Value::Str(s) => f.write_str(s),
            Value::Symbol(sym) => f.write_str(sym.as_str()),
            // Durations print as whole seconds.
            Value::Duration(d) => write!(f, "{}", d.as_secs()),
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Integer(i) => serializer.serialize_i64(*i),
            Value::Str(s) => serializer.serialize_str(s),
            Value::Symbol(sym) => sym.serialize(serializer),
            Value::Duration(d) => serializer.serialize_u64(d.as_secs()),
        }
    }
}

/// Declarative description of one configurable variable.
#[derive(Debug, Clone, PartialEq)]
pub struct VariableSpec {
    pub name: String,
    pub value_type: ValueType,
    pub default: Option<RawValue>,
    pub required: bool,
}

impl VariableSpec {
    /// An optional, untyped variable with no default.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value_type: ValueType::Unspecified,
            default: None,
            required: false,
        }
    }

    pub fn with_type(mut self, value_type: ValueType) -> Self {
        self.value_type = value_type;
        self
    }

    pub fn with_default(mut self, default: impl Into<RawValue>) -> Self {
        self.default = Some(default.into());
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }
}
