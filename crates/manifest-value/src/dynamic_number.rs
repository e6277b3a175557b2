//! Numbers that may be written bare or with a unit suffix

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Number, Value};

use crate::document::Document;
use crate::error::{Error, Result};
use crate::flexible::FlexKind;

/// A single number with optional exponent and unit (`30s`, `500Mi`, `1e3`,
/// `0.5`, `5E`), or two or more `<number><unit>` groups (`1h30m`).
///
/// A unit never starts with a lowercase `e`, so `1e` and `1e3e3` are
/// rejected as dangling exponents; an uppercase `E` alone is the exa suffix.
static UNIT_LITERAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"^[+-]?(?:",
        r"(?:\d+(?:\.\d+)?|\.\d+)(?:[eE][+-]?\d+)?(?:[A-Za-df-zµμ%][A-Za-zµμ%]*)?",
        r"|(?:(?:\d+(?:\.\d+)?|\.\d+)[A-Za-df-zµμ%][A-Za-zµμ%]*){2,}",
        r")$",
    ))
    .unwrap()
});

/// A bare numeric literal or a unit-suffixed literal such as a duration
/// (`"300s"`) or a quantity (`"512Mi"`).
///
/// Unit-suffixed literals are kept byte-for-byte; they are never parsed into
/// a number, so `"30s"` can never come back out as `30`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DynamicNumber {
    #[default]
    Absent,
    Number(Number),
    Literal(String),
}

impl DynamicNumber {
    /// A unit-suffixed literal, validated against the literal grammar
    pub fn unit(literal: impl Into<String>) -> Result<Self> {
        let literal = literal.into();
        if is_unit_literal(&literal) {
            Ok(Self::Literal(literal))
        } else {
            tracing::debug!(%literal, "dynamic-number rejected literal");
            Err(Error::invalid_variant(
                FlexKind::DynamicNumber,
                format!("string {literal:?}"),
            ))
        }
    }

    /// A float literal. NaN and infinities have no document form.
    pub fn float(value: f64) -> Result<Self> {
        Number::from_f64(value).map(Self::Number).ok_or_else(|| {
            Error::invalid_variant(FlexKind::DynamicNumber, format!("float `{value}`"))
        })
    }

    /// Resolve a raw configuration value.
    ///
    /// Accepts null (absent), any number, and strings matching the
    /// numeric-with-optional-unit grammar.
    pub fn resolve(raw: &Value) -> Result<Self> {
        match raw {
            Value::Null => Ok(Self::Absent),
            Value::Number(n) => Ok(Self::Number(n.clone())),
            Value::String(s) => Self::unit(s.as_str()),
            other => {
                tracing::debug!(raw = %other, "dynamic-number rejected raw value");
                Err(Error::unexpected(FlexKind::DynamicNumber, other))
            }
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    pub fn as_number(&self) -> Option<&Number> {
        match self {
            Self::Number(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_literal(&self) -> Option<&str> {
        match self {
            Self::Literal(s) => Some(s),
            _ => None,
        }
    }

    pub fn to_canonical(&self) -> Option<Document> {
        match self {
            Self::Absent => None,
            Self::Number(n) => Some(Document::Number(n.clone())),
            Self::Literal(s) => Some(Document::String(s.clone())),
        }
    }
}

/// Whether `s` is a valid unit-suffixed (or unit-less) numeric literal
pub fn is_unit_literal(s: &str) -> bool {
    UNIT_LITERAL.is_match(s)
}

impl fmt::Display for DynamicNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Absent => Ok(()),
            Self::Number(n) => write!(f, "{n}"),
            Self::Literal(s) => write!(f, "{s}"),
        }
    }
}

impl From<i64> for DynamicNumber {
    fn from(value: i64) -> Self {
        Self::Number(value.into())
    }
}

impl From<u64> for DynamicNumber {
    fn from(value: u64) -> Self {
        Self::Number(value.into())
    }
}

impl From<Number> for DynamicNumber {
    fn from(value: Number) -> Self {
        Self::Number(value)
    }
}

impl Serialize for DynamicNumber {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Self::Absent => serializer.serialize_none(),
            Self::Number(n) => n.serialize(serializer),
            Self::Literal(s) => serializer.serialize_str(s),
        }
    }
}

impl<'de> Deserialize<'de> for DynamicNumber {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = Value::deserialize(deserializer)?;
        Self::resolve(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unit_literal_grammar() {
        for ok in ["30s", "300ms", "1h30m", "512Mi", "1.5Gi", "100m", "0.5", ".5", "1e3", "-5", "+2", "5Ei", "1µs", "50%"] {
            assert!(is_unit_literal(ok), "{ok} should be accepted");
        }
        for bad in ["", "s", "fast", "30 s", "1..5", ".", "5s-", "--1"] {
            assert!(!is_unit_literal(bad), "{bad} should be rejected");
        }
    }

    #[test]
    fn test_exponent_does_not_double_as_unit() {
        for ok in ["5E", "1E3", "2.5e-3", "1e3Mi", "1h30m5s"] {
            assert!(is_unit_literal(ok), "{ok} should be accepted");
        }
        for bad in ["1e", "1e3e3", "1E3E3", "1e3e", "1h30", "1.e3"] {
            assert!(!is_unit_literal(bad), "{bad} should be rejected");
        }
    }

    #[test]
    fn test_literal_is_not_renormalized() {
        let value = DynamicNumber::resolve(&json!("300s")).unwrap();
        assert_eq!(value.as_literal(), Some("300s"));
        assert_eq!(value.to_canonical(), Some(Document::from("300s")));
    }

    #[test]
    fn test_numbers_keep_int_or_float() {
        let int = DynamicNumber::resolve(&json!(30)).unwrap();
        let float = DynamicNumber::resolve(&json!(30.0)).unwrap();
        assert_ne!(int, float);
        assert_eq!(int.to_canonical().and_then(|d| d.as_i64()), Some(30));
    }

    #[test]
    fn test_string_number_stays_string() {
        let value = DynamicNumber::resolve(&json!("30")).unwrap();
        assert_eq!(value, DynamicNumber::Literal("30".to_string()));
        assert_ne!(value, DynamicNumber::from(30i64));
    }

    #[test]
    fn test_float_rejects_nan() {
        assert!(DynamicNumber::float(f64::NAN).is_err());
        assert!(DynamicNumber::float(0.25).is_ok());
    }

    #[test]
    fn test_rejects_bool_and_garbage() {
        assert!(DynamicNumber::resolve(&json!(false)).is_err());
        assert!(DynamicNumber::resolve(&json!("soon")).is_err());
        assert!(DynamicNumber::resolve(&json!({"seconds": 5})).is_err());
    }
}
