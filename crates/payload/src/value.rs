//! Element values as read from the debuggee, and their canonical text form.

use chrono::{DateTime, FixedOffset, Utc};
use serde_json::Value;

use crate::error::SerializationError;

/// Declared kind of a column or cell on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Null = 0,
    Boolean = 1,
    Integer = 2,
    Float = 3,
    Text = 4,
    DateTime = 5,
    Json = 6,
    /// An element that failed to serialize and was degraded.
    Placeholder = 7,
}

impl ValueKind {
    pub fn tag(self) -> u8 {
        self as u8
    }

    pub fn from_tag(tag: u8) -> Option<Self> {
        Some(match tag {
            0 => ValueKind::Null,
            1 => ValueKind::Boolean,
            2 => ValueKind::Integer,
            3 => ValueKind::Float,
            4 => ValueKind::Text,
            5 => ValueKind::DateTime,
            6 => ValueKind::Json,
            7 => ValueKind::Placeholder,
            _ => return None,
        })
    }
}

/// A single element or cell of an inspected value.
#[derive(Debug, Clone, PartialEq)]
pub enum SourceValue {
    Null,
    Bool(bool),
    Integer(i64),
    UInteger(u64),
    Float(f64),
    Text(String),
    DateTime(DateTime<FixedOffset>),
    /// Arbitrary structured data, kept as JSON.
    Json(Value),
    /// An OS or runtime resource (file, socket, lock...). Never transmissible.
    Handle(String),
}

impl SourceValue {
    pub fn kind(&self) -> ValueKind {
        match self {
            SourceValue::Null => ValueKind::Null,
            SourceValue::Bool(_) => ValueKind::Boolean,
            SourceValue::Integer(_) | SourceValue::UInteger(_) => ValueKind::Integer,
            SourceValue::Float(_) => ValueKind::Float,
            SourceValue::Text(_) => ValueKind::Text,
            SourceValue::DateTime(_) => ValueKind::DateTime,
            SourceValue::Json(_) => ValueKind::Json,
            SourceValue::Handle(_) => ValueKind::Placeholder,
        }
    }

    /// Renders the value as canonical text.
    ///
    /// Integers are plain decimal, floats use the shortest text that parses
    /// back to the same `f64`, date/times are RFC 3339, and JSON is compact.
    pub fn to_canonical(&self, max_depth: usize) -> Result<String, SerializationError> {
        match self {
            SourceValue::Null => Ok("null".to_owned()),
            SourceValue::Bool(b) => Ok(b.to_string()),
            SourceValue::Integer(i) => Ok(i.to_string()),
            SourceValue::UInteger(u) => Ok(u.to_string()),
            SourceValue::Float(f) if !f.is_finite() => {
                Err(SerializationError::NonFinite(f.to_string()))
            }
            SourceValue::Float(f) => Ok(f.to_string()),
            SourceValue::Text(s) => Ok(s.clone()),
            SourceValue::DateTime(dt) => Ok(dt.to_rfc3339()),
            SourceValue::Json(value) => {
                if json_depth(value) > max_depth {
                    return Err(SerializationError::TooDeep { max_depth });
                }
                serde_json::to_string(value).map_err(|e| SerializationError::Json(e.to_string()))
            }
            SourceValue::Handle(description) => {
                Err(SerializationError::ResourceHandle(description.clone()))
            }
        }
    }
}

/// Nesting depth of a JSON value; scalars have depth 0.
fn json_depth(value: &Value) -> usize {
    // Iterative so hostile inputs cannot blow the stack.
    let mut max = 0;
    let mut stack = vec![(value, 0usize)];
    while let Some((value, depth)) = stack.pop() {
        match value {
            Value::Array(items) => {
                max = max.max(depth + 1);
                stack.extend(items.iter().map(|v| (v, depth + 1)));
            }
            Value::Object(map) => {
                max = max.max(depth + 1);
                stack.extend(map.values().map(|v| (v, depth + 1)));
            }
            _ => {}
        }
    }
    max
}

impl From<bool> for SourceValue {
    fn from(b: bool) -> Self {
        SourceValue::Bool(b)
    }
}

macro_rules! from_signed {
    ($($t:ty),*) => {$(
        impl From<$t> for SourceValue {
            fn from(i: $t) -> Self {
                SourceValue::Integer(i as i64)
            }
        }
    )*};
}

macro_rules! from_unsigned {
    ($($t:ty),*) => {$(
        impl From<$t> for SourceValue {
            fn from(u: $t) -> Self {
                SourceValue::UInteger(u as u64)
            }
        }
    )*};
}

from_signed!(i8, i16, i32, i64, isize);
from_unsigned!(u8, u16, u32, u64, usize);

impl From<f32> for SourceValue {
    fn from(f: f32) -> Self {
        SourceValue::Float(f as f64)
    }
}

impl From<f64> for SourceValue {
    fn from(f: f64) -> Self {
        SourceValue::Float(f)
    }
}

impl From<&str> for SourceValue {
    fn from(s: &str) -> Self {
        SourceValue::Text(s.to_owned())
    }
}

impl From<String> for SourceValue {
    fn from(s: String) -> Self {
        SourceValue::Text(s)
    }
}

impl From<DateTime<FixedOffset>> for SourceValue {
    fn from(dt: DateTime<FixedOffset>) -> Self {
        SourceValue::DateTime(dt)
    }
}

impl From<DateTime<Utc>> for SourceValue {
    fn from(dt: DateTime<Utc>) -> Self {
        SourceValue::DateTime(dt.fixed_offset())
    }
}

impl<T: Into<SourceValue>> From<Option<T>> for SourceValue {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(SourceValue::Null, Into::into)
    }
}

/// JSON scalars map onto their typed variants; arrays and objects stay JSON.
impl From<&Value> for SourceValue {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => SourceValue::Null,
            Value::Bool(b) => SourceValue::Bool(*b),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    SourceValue::Integer(i)
                } else if let Some(u) = n.as_u64() {
                    SourceValue::UInteger(u)
                } else {
                    SourceValue::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            Value::String(s) => SourceValue::Text(s.clone()),
            Value::Array(_) | Value::Object(_) => SourceValue::Json(value.clone()),
        }
    }
}

impl From<Value> for SourceValue {
    fn from(value: Value) -> Self {
        match value {
            Value::String(s) => SourceValue::Text(s),
            Value::Array(_) | Value::Object(_) => SourceValue::Json(value),
            other => SourceValue::from(&other),
        }
    }
}
