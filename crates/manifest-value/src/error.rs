//! Error types for manifest-value

use serde_json::Value;

use crate::flexible::FlexKind;

/// Result type for manifest-value operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while resolving flexible values
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Raw input matched none of the shapes the field accepts.
    ///
    /// This points at schema wiring or a configuration author breaking the
    /// field's contract. It is never defaulted away.
    #[error("Invalid {kind} value: expected {expected}, found {found}")]
    InvalidVariant {
        kind: FlexKind,
        expected: &'static str,
        found: String,
    },
}

impl Error {
    pub fn invalid_variant(kind: FlexKind, found: impl Into<String>) -> Self {
        Self::InvalidVariant {
            kind,
            expected: kind.expected(),
            found: found.into(),
        }
    }

    /// Build an `InvalidVariant` describing a raw configuration value
    pub fn unexpected(kind: FlexKind, raw: &Value) -> Self {
        Self::invalid_variant(kind, describe(raw))
    }
}

/// Short human-readable description of a raw value, e.g. "boolean `true`"
pub(crate) fn describe(raw: &Value) -> String {
    match raw {
        Value::Null => "null".to_string(),
        Value::Bool(b) => format!("boolean `{b}`"),
        Value::Number(n) if n.is_f64() => format!("float `{n}`"),
        Value::Number(n) => format!("integer `{n}`"),
        Value::String(s) => format!("string {s:?}"),
        Value::Array(items) => format!("sequence of {} item(s)", items.len()),
        Value::Object(map) => format!("mapping with {} key(s)", map.len()),
    }
}
