//! Typed configuration tree
//!
//! A [`ConfigNode`] is what the schema layer builds for one request: a tree
//! of primitives, flexible values, declared objects, sequences and mappings.
//! Every node is in one of three presence states, see [`Presence`].

use indexmap::IndexMap;
use manifest_value::{
    Document, DynamicDocument, DynamicNumber, FlexKind, FlexibleValue, IntOrString,
};
use serde_json::Value;

use crate::error::Result;

/// Whether a field was set, and to what
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Presence {
    /// Never set; the key is elided from the output
    Absent,
    /// Explicitly set to null
    Null,
    /// Set to a value
    Present,
}

/// The five shapes a present node can take
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeShape {
    Primitive,
    Flexible,
    Object,
    Sequence,
    Mapping,
}

impl NodeShape {
    pub fn name(&self) -> &'static str {
        match self {
            NodeShape::Primitive => "primitive",
            NodeShape::Flexible => "flexible value",
            NodeShape::Object => "object",
            NodeShape::Sequence => "sequence",
            NodeShape::Mapping => "mapping",
        }
    }
}

/// A single-typed scalar
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    String(String),
}

/// A node of the configuration tree
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ConfigNode {
    #[default]
    Absent,
    Null,
    Primitive(Primitive),
    Flexible(FlexibleValue),
    Object(Object),
    Sequence(Sequence),
    Mapping(Mapping),
}

impl ConfigNode {
    /// Resolve raw configuration into a flexible-value node
    pub fn flexible(kind: FlexKind, raw: &Value) -> Result<Self> {
        Ok(Self::Flexible(manifest_value::resolve(kind, raw)?))
    }

    /// `Absent` for `None`, the converted value otherwise
    pub fn optional<T: Into<ConfigNode>>(value: Option<T>) -> Self {
        value.map_or(Self::Absent, Into::into)
    }

    pub fn presence(&self) -> Presence {
        match self {
            Self::Absent => Presence::Absent,
            Self::Null => Presence::Null,
            _ => Presence::Present,
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// Shape of a present node; `None` for absent and null nodes
    pub fn shape(&self) -> Option<NodeShape> {
        match self {
            Self::Absent | Self::Null => None,
            Self::Primitive(_) => Some(NodeShape::Primitive),
            Self::Flexible(_) => Some(NodeShape::Flexible),
            Self::Object(_) => Some(NodeShape::Object),
            Self::Sequence(_) => Some(NodeShape::Sequence),
            Self::Mapping(_) => Some(NodeShape::Mapping),
        }
    }
}

/// A declared group of named fields, emitted in declaration order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Object {
    fields: Vec<(String, ConfigNode)>,
    keep_empty: bool,
}

impl Object {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a field. Re-declaring a name replaces the earlier value and
    /// keeps its position.
    pub fn field(mut self, name: impl Into<String>, node: impl Into<ConfigNode>) -> Self {
        self.set(name, node);
        self
    }

    /// Declare an optional field
    pub fn optional<T: Into<ConfigNode>>(self, name: impl Into<String>, value: Option<T>) -> Self {
        self.field(name, ConfigNode::optional(value))
    }

    pub fn set(&mut self, name: impl Into<String>, node: impl Into<ConfigNode>) {
        let name = name.into();
        let node = node.into();
        match self.fields.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => *slot = node,
            None => self.fields.push((name, node)),
        }
    }

    /// Emit `{}` instead of eliding the object when no field survives
    pub fn keep_empty(mut self) -> Self {
        self.keep_empty = true;
        self
    }

    pub fn keeps_empty(&self) -> bool {
        self.keep_empty
    }

    pub fn get(&self, name: &str) -> Option<&ConfigNode> {
        self.fields
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, node)| node)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &ConfigNode)> {
        self.fields.iter().map(|(name, node)| (name.as_str(), node))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// An ordered list of nodes of one shape
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sequence {
    items: Vec<ConfigNode>,
    keep_empty: bool,
}

impl Sequence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn item(mut self, node: impl Into<ConfigNode>) -> Self {
        self.push(node);
        self
    }

    pub fn push(&mut self, node: impl Into<ConfigNode>) {
        self.items.push(node.into());
    }

    /// Emit `[]` instead of eliding the sequence when no item survives
    pub fn keep_empty(mut self) -> Self {
        self.keep_empty = true;
        self
    }

    pub fn keeps_empty(&self) -> bool {
        self.keep_empty
    }

    pub fn items(&self) -> &[ConfigNode] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<N: Into<ConfigNode>> FromIterator<N> for Sequence {
    fn from_iter<I: IntoIterator<Item = N>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().map(Into::into).collect(),
            keep_empty: false,
        }
    }
}

/// Free-keyed entries (labels, annotations) in insertion order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mapping {
    entries: IndexMap<String, ConfigNode>,
    keep_empty: bool,
}

impl Mapping {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entry(mut self, key: impl Into<String>, node: impl Into<ConfigNode>) -> Self {
        self.insert(key, node);
        self
    }

    /// Insert an entry. An existing key keeps its position.
    pub fn insert(&mut self, key: impl Into<String>, node: impl Into<ConfigNode>) {
        self.entries.insert(key.into(), node.into());
    }

    /// Emit `{}` instead of eliding the mapping when no entry survives
    pub fn keep_empty(mut self) -> Self {
        self.keep_empty = true;
        self
    }

    pub fn keeps_empty(&self) -> bool {
        self.keep_empty
    }

    pub fn get(&self, key: &str) -> Option<&ConfigNode> {
        self.entries.get(key)
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &ConfigNode)> {
        self.entries.iter().map(|(key, node)| (key.as_str(), node))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, N: Into<ConfigNode>> FromIterator<(K, N)> for Mapping {
    fn from_iter<I: IntoIterator<Item = (K, N)>>(iter: I) -> Self {
        let mut mapping = Mapping::new();
        for (key, node) in iter {
            mapping.insert(key, node);
        }
        mapping
    }
}

/// Rebuild a tree from emitted output.
///
/// Collections are marked `keep_empty`, since anything empty in canonical
/// output was emitted on purpose. Items are rebuilt first; when the rebuilt
/// items do not share a shape, the sequence can only have come from
/// free-form content and is carried back whole as a [`DynamicDocument`].
impl From<Document> for ConfigNode {
    fn from(doc: Document) -> Self {
        match doc {
            Document::Null => Self::Null,
            Document::Bool(b) => Self::Primitive(Primitive::Bool(b)),
            Document::Number(n) => Self::Primitive(if let Some(i) = n.as_i64() {
                Primitive::Int(i)
            } else if let Some(u) = n.as_u64() {
                Primitive::UInt(u)
            } else {
                Primitive::Float(n.as_f64().unwrap_or_default())
            }),
            Document::String(s) => Self::Primitive(Primitive::String(s)),
            Document::Sequence(items) => {
                let rebuilt: Sequence = items.iter().cloned().map(ConfigNode::from).collect();
                if is_uniform(rebuilt.items()) {
                    Self::Sequence(rebuilt.keep_empty())
                } else {
                    Self::Flexible(DynamicDocument::new(Document::Sequence(items)).into())
                }
            }
            Document::Mapping(entries) => {
                Self::Mapping(entries.into_iter().collect::<Mapping>().keep_empty())
            }
        }
    }
}

fn is_uniform(items: &[ConfigNode]) -> bool {
    let mut shapes = items.iter().filter_map(ConfigNode::shape);
    match shapes.next() {
        Some(first) => shapes.all(|shape| shape == first),
        None => true,
    }
}

impl From<Primitive> for ConfigNode {
    fn from(value: Primitive) -> Self {
        Self::Primitive(value)
    }
}

impl From<bool> for ConfigNode {
    fn from(value: bool) -> Self {
        Self::Primitive(Primitive::Bool(value))
    }
}

impl From<i64> for ConfigNode {
    fn from(value: i64) -> Self {
        Self::Primitive(Primitive::Int(value))
    }
}

impl From<i32> for ConfigNode {
    fn from(value: i32) -> Self {
        Self::Primitive(Primitive::Int(value.into()))
    }
}

impl From<u64> for ConfigNode {
    fn from(value: u64) -> Self {
        Self::Primitive(Primitive::UInt(value))
    }
}

impl From<f64> for ConfigNode {
    fn from(value: f64) -> Self {
        Self::Primitive(Primitive::Float(value))
    }
}

impl From<&str> for ConfigNode {
    fn from(value: &str) -> Self {
        Self::Primitive(Primitive::String(value.to_string()))
    }
}

impl From<String> for ConfigNode {
    fn from(value: String) -> Self {
        Self::Primitive(Primitive::String(value))
    }
}

impl From<FlexibleValue> for ConfigNode {
    fn from(value: FlexibleValue) -> Self {
        Self::Flexible(value)
    }
}

impl From<IntOrString> for ConfigNode {
    fn from(value: IntOrString) -> Self {
        Self::Flexible(value.into())
    }
}

impl From<DynamicNumber> for ConfigNode {
    fn from(value: DynamicNumber) -> Self {
        Self::Flexible(value.into())
    }
}

impl From<DynamicDocument> for ConfigNode {
    fn from(value: DynamicDocument) -> Self {
        Self::Flexible(value.into())
    }
}

impl From<Object> for ConfigNode {
    fn from(value: Object) -> Self {
        Self::Object(value)
    }
}

impl From<Sequence> for ConfigNode {
    fn from(value: Sequence) -> Self {
        Self::Sequence(value)
    }
}

impl From<Mapping> for ConfigNode {
    fn from(value: Mapping) -> Self {
        Self::Mapping(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_presence_states() {
        assert_eq!(ConfigNode::Absent.presence(), Presence::Absent);
        assert_eq!(ConfigNode::Null.presence(), Presence::Null);
        assert_eq!(ConfigNode::from("").presence(), Presence::Present);
        assert_eq!(ConfigNode::optional(None::<i64>), ConfigNode::Absent);
    }

    #[test]
    fn test_object_redeclare_keeps_position() {
        let obj = Object::new().field("a", 1i64).field("b", 2i64).field("a", 3i64);
        let names: Vec<_> = obj.fields().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["a", "b"]);
        assert_eq!(obj.get("a"), Some(&ConfigNode::from(3i64)));
    }

    #[test]
    fn test_flexible_constructor_propagates_invalid_variant() {
        let err = ConfigNode::flexible(FlexKind::IntOrString, &json!(true)).unwrap_err();
        assert!(matches!(err, crate::Error::Value(_)));
    }

    #[test]
    fn test_rebuild_numbers() {
        assert_eq!(
            ConfigNode::from(Document::from(json!(u64::MAX))),
            ConfigNode::from(u64::MAX)
        );
        assert_eq!(ConfigNode::from(Document::from(json!(-4))), ConfigNode::from(-4i64));
        assert_eq!(ConfigNode::from(Document::from(json!(0.5))), ConfigNode::from(0.5));
    }

    #[test]
    fn test_rebuild_mixed_sequence_as_dynamic_document() {
        let doc = Document::from(json!([1, {"a": 1}]));
        let node = ConfigNode::from(doc.clone());
        assert_eq!(node, ConfigNode::from(DynamicDocument::new(doc)));
    }

    #[test]
    fn test_rebuild_wraps_outer_sequence_when_inner_shapes_differ() {
        // The second inner sequence is mixed and rebuilds as a flexible
        // value, so the first no longer shares its shape
        let doc = Document::from(json!([[1, "a"], [1, {"x": 1}]]));
        let node = ConfigNode::from(doc.clone());
        assert_eq!(node, ConfigNode::from(DynamicDocument::new(doc)));
    }

    #[test]
    fn test_rebuild_keeps_uniform_nested_sequences() {
        let node = ConfigNode::from(Document::from(json!([[1, 2], [], [null]])));
        let ConfigNode::Sequence(outer) = &node else {
            panic!("expected a sequence, got {node:?}");
        };
        assert!(outer.keeps_empty());
        assert!(outer.items().iter().all(|item| matches!(item, ConfigNode::Sequence(_))));
    }
}
