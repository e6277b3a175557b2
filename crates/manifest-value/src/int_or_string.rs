//! Integer-or-string values (ports, named ports, status codes and ranges)

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::document::Document;
use crate::error::{Error, Result};
use crate::flexible::FlexKind;

/// Exactly one of: never set, an integer, or a string.
///
/// `Absent`, `String("")` and `Int(0)` are three different values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum IntOrString {
    #[default]
    Absent,
    Int(i64),
    String(String),
}

impl IntOrString {
    pub fn int(value: i64) -> Self {
        Self::Int(value)
    }

    pub fn string(value: impl Into<String>) -> Self {
        Self::String(value.into())
    }

    /// Resolve a raw configuration value.
    ///
    /// Accepts null (absent), integers that fit in `i64`, and strings.
    /// Floats, booleans and structured values are rejected.
    pub fn resolve(raw: &Value) -> Result<Self> {
        match raw {
            Value::Null => Ok(Self::Absent),
            Value::Number(n) => n.as_i64().map(Self::Int).ok_or_else(|| {
                tracing::debug!(raw = %n, "int-or-string rejected non-i64 number");
                Error::unexpected(FlexKind::IntOrString, raw)
            }),
            Value::String(s) => Ok(Self::String(s.clone())),
            other => {
                tracing::debug!(raw = %other, "int-or-string rejected raw value");
                Err(Error::unexpected(FlexKind::IntOrString, other))
            }
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn to_canonical(&self) -> Option<Document> {
        match self {
            Self::Absent => None,
            Self::Int(n) => Some(Document::from(*n)),
            Self::String(s) => Some(Document::String(s.clone())),
        }
    }
}

impl fmt::Display for IntOrString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Absent => Ok(()),
            Self::Int(n) => write!(f, "{n}"),
            Self::String(s) => write!(f, "{s}"),
        }
    }
}

impl From<i64> for IntOrString {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for IntOrString {
    fn from(value: i32) -> Self {
        Self::Int(value.into())
    }
}

impl From<u16> for IntOrString {
    fn from(value: u16) -> Self {
        Self::Int(value.into())
    }
}

impl From<&str> for IntOrString {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for IntOrString {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl<T: Into<IntOrString>> From<Option<T>> for IntOrString {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Absent, Into::into)
    }
}

impl Serialize for IntOrString {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Self::Absent => serializer.serialize_none(),
            Self::Int(n) => serializer.serialize_i64(*n),
            Self::String(s) => serializer.serialize_str(s),
        }
    }
}

impl<'de> Deserialize<'de> for IntOrString {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = Value::deserialize(deserializer)?;
        Self::resolve(&raw).map_err(serde::de::Error::custom)
    }
}
