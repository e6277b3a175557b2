//! Schema-less nested documents (free-form extension configuration)

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::document::Document;

/// A free-form document, or nothing.
///
/// Contents are the author's and are carried verbatim: inner nulls, empty
/// mappings and key order all survive into the output. A top-level null is
/// the absent state however it is built.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum DynamicDocument {
    #[default]
    Absent,
    Document(Document),
}

impl DynamicDocument {
    pub fn new(doc: impl Into<Document>) -> Self {
        match doc.into() {
            Document::Null => Self::Absent,
            doc => Self::Document(doc),
        }
    }

    /// Resolve a raw configuration value. Every shape is accepted; a
    /// top-level null is the absent state.
    pub fn resolve(raw: &Value) -> Self {
        match raw {
            Value::Null => Self::Absent,
            other => Self::Document(Document::from(other)),
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    pub fn as_document(&self) -> Option<&Document> {
        match self {
            Self::Document(doc) => Some(doc),
            Self::Absent => None,
        }
    }

    pub fn to_canonical(&self) -> Option<Document> {
        self.as_document().cloned()
    }
}

impl From<Document> for DynamicDocument {
    fn from(doc: Document) -> Self {
        Self::new(doc)
    }
}

impl From<Value> for DynamicDocument {
    fn from(raw: Value) -> Self {
        Self::resolve(&raw)
    }
}

impl Serialize for DynamicDocument {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Self::Absent => serializer.serialize_none(),
            Self::Document(doc) => doc.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for DynamicDocument {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        Value::deserialize(deserializer).map(|raw| Self::resolve(&raw))
    }
}
