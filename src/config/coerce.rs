//! Type coercion table.
//!
//! [`Coercions`] maps each [`ValueType`] to a conversion from [`RawValue`] to
//! [`Value`]. Callers start from [`Coercions::standard`] and register their own
//! entries to override or extend it; the standard table itself never changes.

use super::symbol::Symbol;
use super::types::{RawValue, Value, ValueType};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// A single coercion function.
pub type CoercionFn = Arc<dyn Fn(&RawValue) -> Value + Send + Sync>;

/// Enum-keyed table of coercion functions.
#[derive(Clone)]
pub struct Coercions {
    table: HashMap<ValueType, CoercionFn>,
}

impl Coercions {
    /// The base coercion table.
    pub fn standard() -> Self {
        let mut table: HashMap<ValueType, CoercionFn> = HashMap::new();
        table.insert(ValueType::Boolean, Arc::new(to_boolean));
        table.insert(ValueType::Integer, Arc::new(to_integer));
        table.insert(ValueType::Minutes, Arc::new(to_minutes));
        table.insert(ValueType::Path, Arc::new(to_path));
        table.insert(ValueType::Url, Arc::new(to_url));
        table.insert(ValueType::Symbol, Arc::new(to_symbol));
        Self { table }
    }

    /// Standard table with `minutes` producing a [`Value::Duration`].
    pub fn with_durations() -> Self {
        Self::standard().register(ValueType::Minutes, |raw| {
            let minutes = parse_leading_integer(raw).max(0) as u64;
            Value::Duration(Duration::from_secs(minutes.saturating_mul(60)))
        })
    }

    /// Add or replace the coercion for `value_type`.
    pub fn register<F>(mut self, value_type: ValueType, coerce: F) -> Self
    where
        F: Fn(&RawValue) -> Value + Send + Sync + 'static,
    {
        self.table.insert(value_type, Arc::new(coerce));
        self
    }

    pub fn contains(&self, value_type: &ValueType) -> bool {
        self.table.contains_key(value_type)
    }

    /// Coerce `raw` to `value_type`. Types without an entry are stringified.
    pub fn coerce(&self, value_type: &ValueType, raw: &RawValue) -> Value {
        match self.table.get(value_type) {
            Some(coerce) => coerce(raw),
            None => {
                if let ValueType::Custom(name) = value_type {
                    tracing::debug!(value_type = %name, "No coercion registered, using string");
                }
                to_string(raw)
            }
        }
    }
}

impl Default for Coercions {
    fn default() -> Self {
        Self::standard()
    }
}

impl fmt::Debug for Coercions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut types: Vec<&str> = self.table.keys().map(|t| t.as_str()).collect();
        types.sort_unstable();
        f.debug_struct("Coercions").field("types", &types).finish()
    }
}

fn to_string(raw: &RawValue) -> Value {
    Value::Str(raw.to_string())
}

fn to_boolean(raw: &RawValue) -> Value {
    Value::Bool(match raw {
        RawValue::Bool(b) => *b,
        other => other.to_string().eq_ignore_ascii_case("true"),
    })
}

fn to_integer(raw: &RawValue) -> Value {
    Value::Integer(parse_leading_integer(raw))
}

fn to_minutes(raw: &RawValue) -> Value {
    Value::Integer(parse_leading_integer(raw).saturating_mul(60))
}

fn to_path(raw: &RawValue) -> Value {
    let text = raw.to_string();
    let segments: Vec<&str> = text.split('/').filter(|s| !s.is_empty()).collect();
    Value::Str(segments.join("/"))
}

fn to_url(raw: &RawValue) -> Value {
    let text = raw.to_string();
    match text.strip_suffix('/') {
        Some(trimmed) => Value::Str(trimmed.to_string()),
        None => Value::Str(text),
    }
}

fn to_symbol(raw: &RawValue) -> Value {
    Value::Symbol(Symbol::intern(&raw.to_string()))
}

/// Integer from the leading numeric part of a raw value.
///
/// Text is read like `"  -12abc"` -> -12: leading whitespace, an optional
/// sign, then digits with single underscores allowed between them. Text with
/// no leading digits is 0. Results saturate at the `i64` bounds.
pub fn parse_leading_integer(raw: &RawValue) -> i64 {
    match raw {
        RawValue::Integer(i) => *i,
        // `as` saturates and maps NaN to 0.
        RawValue::Float(x) => x.trunc() as i64,
        RawValue::Bool(_) => 0,
        RawValue::Text(s) => parse_leading_integer_str(s),
        other @ RawValue::Other(_) => parse_leading_integer_str(&other.to_string()),
    }
}

fn parse_leading_integer_str(s: &str) -> i64 {
    let mut chars = s.trim_start().chars().peekable();
    let negative = match chars.peek() {
        Some('-') => {
            chars.next();
            true
        }
        Some('+') => {
            chars.next();
            false
        }
        _ => false,
    };

    let mut value: i64 = 0;
    let mut seen_digit = false;
    let mut prev_underscore = false;
    while let Some(&c) = chars.peek() {
        if let Some(digit) = c.to_digit(10) {
            let digit = i64::from(digit);
            value = if negative {
                value.saturating_mul(10).saturating_sub(digit)
            } else {
                value.saturating_mul(10).saturating_add(digit)
            };
            seen_digit = true;
            prev_underscore = false;
        } else if c == '_' && seen_digit && !prev_underscore {
            prev_underscore = true;
        } else {
            break;
        }
        chars.next();
    }
    value
}
