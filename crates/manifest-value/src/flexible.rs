//! The flexible-value umbrella type and resolution entry point

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::document::Document;
use crate::dynamic_document::DynamicDocument;
use crate::dynamic_number::DynamicNumber;
use crate::error::Result;
use crate::int_or_string::IntOrString;

/// Which flexible shape a field declares
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FlexKind {
    /// Integer or string, e.g. a port number or a named port
    IntOrString,
    /// Bare number or unit-suffixed literal, e.g. `30` or `"30s"`
    DynamicNumber,
    /// Schema-less nested document
    DynamicDocument,
}

impl FlexKind {
    /// Human-readable list of the raw shapes this kind accepts
    pub fn expected(&self) -> &'static str {
        match self {
            FlexKind::IntOrString => "integer, string or null",
            FlexKind::DynamicNumber => "number, unit-suffixed string or null",
            FlexKind::DynamicDocument => "any document",
        }
    }
}

impl fmt::Display for FlexKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlexKind::IntOrString => write!(f, "int-or-string"),
            FlexKind::DynamicNumber => write!(f, "dynamic-number"),
            FlexKind::DynamicDocument => write!(f, "dynamic-document"),
        }
    }
}

/// A field value whose legal representation is a closed union of shapes.
///
/// Equality compares the variant tag first: an `IntOrString` holding 8080
/// never equals a `DynamicNumber` holding 8080, and neither equals the
/// string `"8080"`.
#[derive(Debug, Clone, PartialEq)]
pub enum FlexibleValue {
    IntOrString(IntOrString),
    DynamicNumber(DynamicNumber),
    DynamicDocument(DynamicDocument),
}

impl FlexibleValue {
    pub fn kind(&self) -> FlexKind {
        match self {
            Self::IntOrString(_) => FlexKind::IntOrString,
            Self::DynamicNumber(_) => FlexKind::DynamicNumber,
            Self::DynamicDocument(_) => FlexKind::DynamicDocument,
        }
    }

    /// True only when the field was never set
    pub fn is_absent(&self) -> bool {
        match self {
            Self::IntOrString(v) => v.is_absent(),
            Self::DynamicNumber(v) => v.is_absent(),
            Self::DynamicDocument(v) => v.is_absent(),
        }
    }

    /// The node that should appear in the output, or `None` to omit the field
    pub fn to_canonical(&self) -> Option<Document> {
        match self {
            Self::IntOrString(v) => v.to_canonical(),
            Self::DynamicNumber(v) => v.to_canonical(),
            Self::DynamicDocument(v) => v.to_canonical(),
        }
    }
}

/// Construct a flexible value of the declared kind from raw configuration.
///
/// The raw value's own type is authoritative: `"8080"` stays a string.
///
/// # Examples
///
/// ```
/// use manifest_value::{resolve, FlexKind, IntOrString, FlexibleValue};
/// use serde_json::json;
///
/// let port = resolve(FlexKind::IntOrString, &json!("8080")).unwrap();
/// assert_eq!(port, FlexibleValue::IntOrString(IntOrString::string("8080")));
/// assert!(resolve(FlexKind::IntOrString, &json!(true)).is_err());
/// ```
pub fn resolve(kind: FlexKind, raw: &Value) -> Result<FlexibleValue> {
    Ok(match kind {
        FlexKind::IntOrString => FlexibleValue::IntOrString(IntOrString::resolve(raw)?),
        FlexKind::DynamicNumber => FlexibleValue::DynamicNumber(DynamicNumber::resolve(raw)?),
        FlexKind::DynamicDocument => FlexibleValue::DynamicDocument(DynamicDocument::resolve(raw)),
    })
}

impl From<IntOrString> for FlexibleValue {
    fn from(value: IntOrString) -> Self {
        Self::IntOrString(value)
    }
}

impl From<DynamicNumber> for FlexibleValue {
    fn from(value: DynamicNumber) -> Self {
        Self::DynamicNumber(value)
    }
}

impl From<DynamicDocument> for FlexibleValue {
    fn from(value: DynamicDocument) -> Self {
        Self::DynamicDocument(value)
    }
}
