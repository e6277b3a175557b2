//! Canonical document emission
//!
//! Post-order walk over a [`ConfigNode`] tree. Each node resolves to either
//! a [`Document`] or nothing; nothing is never written as null, it simply
//! drops out of its parent. Collections that end up empty drop out too,
//! unless the node asks to keep its empty form.

use indexmap::IndexMap;
use manifest_value::path::{PathSegment, format_path};
use manifest_value::{Document, Number};

use crate::error::{Error, Result};
use crate::node::{ConfigNode, Mapping, Object, Primitive, Sequence};
use crate::options::{EmitOptions, NullPolicy};

/// Emit a tree with default options.
///
/// Returns `Ok(None)` when the whole tree resolves to nothing.
pub fn emit(tree: &ConfigNode) -> Result<Option<Document>> {
    Emitter::default().emit(tree)
}

/// Tree-to-document transform, parameterised by [`EmitOptions`]
#[derive(Debug, Clone, Default)]
pub struct Emitter {
    options: EmitOptions,
}

impl Emitter {
    pub fn new(options: EmitOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &EmitOptions {
        &self.options
    }

    /// Emit a tree.
    ///
    /// Fails only with [`Error::UnsupportedNodeShape`] for trees outside the
    /// node grammar.
    pub fn emit(&self, tree: &ConfigNode) -> Result<Option<Document>> {
        let mut path = Vec::new();
        let doc = self.emit_node(tree, &mut path)?;
        tracing::debug!(
            emitted = doc.is_some(),
            kind = doc.as_ref().map_or("nothing", Document::kind_name),
            "Emitted configuration tree"
        );
        Ok(doc)
    }

    fn emit_node(&self, node: &ConfigNode, path: &mut Vec<PathSegment>) -> Result<Option<Document>> {
        match node {
            ConfigNode::Absent => Ok(None),
            ConfigNode::Null => Ok(match self.options.null_policy {
                NullPolicy::Emit => Some(Document::Null),
                NullPolicy::Elide => None,
            }),
            ConfigNode::Primitive(primitive) => emit_primitive(primitive, path).map(Some),
            ConfigNode::Flexible(value) => Ok(value.to_canonical()),
            ConfigNode::Object(object) => self.emit_object(object, path),
            ConfigNode::Sequence(sequence) => self.emit_sequence(sequence, path),
            ConfigNode::Mapping(mapping) => self.emit_mapping(mapping, path),
        }
    }

    fn emit_object(&self, object: &Object, path: &mut Vec<PathSegment>) -> Result<Option<Document>> {
        let entries = self.emit_entries(object.fields(), path)?;
        Ok(self.finish_mapping(entries, object.keeps_empty(), path))
    }

    fn emit_mapping(&self, mapping: &Mapping, path: &mut Vec<PathSegment>) -> Result<Option<Document>> {
        let entries = self.emit_entries(mapping.entries(), path)?;
        Ok(self.finish_mapping(entries, mapping.keeps_empty(), path))
    }

    fn emit_entries<'a>(
        &self,
        entries: impl Iterator<Item = (&'a str, &'a ConfigNode)>,
        path: &mut Vec<PathSegment>,
    ) -> Result<IndexMap<String, Document>> {
        let mut out = IndexMap::new();
        for (key, child) in entries {
            path.push(PathSegment::Key(key.to_string()));
            match self.emit_node(child, path)? {
                Some(doc) => {
                    out.insert(key.to_string(), doc);
                }
                None => tracing::trace!(path = %format_path(path), "Elided field"),
            }
            path.pop();
        }
        Ok(out)
    }

    fn finish_mapping(
        &self,
        entries: IndexMap<String, Document>,
        keep_empty: bool,
        path: &[PathSegment],
    ) -> Option<Document> {
        if entries.is_empty() && self.elides(keep_empty) {
            tracing::trace!(path = %format_path(path), "Elided empty mapping");
            return None;
        }
        Some(Document::Mapping(entries))
    }

    fn emit_sequence(
        &self,
        sequence: &Sequence,
        path: &mut Vec<PathSegment>,
    ) -> Result<Option<Document>> {
        check_uniform(sequence, path)?;

        let mut items = Vec::with_capacity(sequence.len());
        for (idx, item) in sequence.items().iter().enumerate() {
            path.push(PathSegment::Index(idx));
            let emitted = self.emit_node(item, path)?;
            path.pop();
            if let Some(doc) = emitted {
                items.push(doc);
            }
        }

        if items.is_empty() && self.elides(sequence.keeps_empty()) {
            tracing::trace!(path = %format_path(path), "Elided empty sequence");
            return Ok(None);
        }
        Ok(Some(Document::Sequence(items)))
    }

    fn elides(&self, keep_empty: bool) -> bool {
        self.options.elide_empty && !keep_empty
    }
}

fn emit_primitive(primitive: &Primitive, path: &[PathSegment]) -> Result<Document> {
    Ok(match primitive {
        Primitive::Bool(b) => Document::Bool(*b),
        Primitive::Int(n) => Document::from(*n),
        Primitive::UInt(n) => Document::from(*n),
        Primitive::Float(f) => Number::from_f64(*f).map(Document::Number).ok_or_else(|| {
            Error::unsupported(
                format_path(path),
                format!("float `{f}` has no document representation"),
            )
        })?,
        Primitive::String(s) => Document::String(s.clone()),
    })
}

/// Present items of a sequence must all share one shape
fn check_uniform(sequence: &Sequence, path: &[PathSegment]) -> Result<()> {
    let mut shapes = sequence
        .items()
        .iter()
        .enumerate()
        .filter_map(|(idx, item)| item.shape().map(|shape| (idx, shape)));

    let Some((_, expected)) = shapes.next() else {
        return Ok(());
    };

    if let Some((idx, found)) = shapes.find(|(_, shape)| *shape != expected) {
        return Err(Error::unsupported(
            format_path(path),
            format!(
                "item {idx} has shape {}, expected {}",
                found.name(),
                expected.name()
            ),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use manifest_value::{DynamicNumber, IntOrString};
    use serde_json::{Value, json};

    fn emit_json(node: impl Into<ConfigNode>) -> Option<Value> {
        emit(&node.into()).unwrap().map(Value::from)
    }

    #[test]
    fn test_absent_root_is_nothing() {
        assert_eq!(emit_json(ConfigNode::Absent), None);
    }

    #[test]
    fn test_null_policy() {
        let tree = ConfigNode::from(Object::new().field("a", ConfigNode::Null));
        assert_eq!(
            emit(&tree).unwrap().map(Value::from),
            Some(json!({"a": null}))
        );

        let options = EmitOptions::default().with_null_policy(NullPolicy::Elide);
        assert_eq!(Emitter::new(options).emit(&tree).unwrap(), None);
    }

    #[test]
    fn test_nested_all_absent_object_collapses() {
        let tree = Object::new()
            .field("name", "web")
            .field(
                "spec",
                Object::new().field(
                    "template",
                    Object::new().field("port", IntOrString::Absent),
                ),
            );
        assert_eq!(emit_json(tree), Some(json!({"name": "web"})));
    }

    #[test]
    fn test_keep_empty_overrides() {
        let tree = Object::new()
            .field("selector", Object::new().keep_empty())
            .field("args", Sequence::new().keep_empty())
            .field("labels", Mapping::new().keep_empty())
            .field("annotations", Mapping::new());
        assert_eq!(
            emit_json(tree),
            Some(json!({"selector": {}, "args": [], "labels": {}}))
        );
    }

    #[test]
    fn test_elide_empty_disabled() {
        let tree = ConfigNode::from(Object::new().field("labels", Mapping::new()));
        let options = EmitOptions::default().with_elide_empty(false);
        assert_eq!(
            Emitter::new(options).emit(&tree).unwrap().map(Value::from),
            Some(json!({"labels": {}}))
        );
    }

    #[test]
    fn test_sequence_skips_absent_items_in_order() {
        let seq = Sequence::new()
            .item(DynamicNumber::unit("1s").unwrap())
            .item(DynamicNumber::Absent)
            .item(DynamicNumber::from(2i64));
        assert_eq!(emit_json(seq), Some(json!(["1s", 2])));
    }

    #[test]
    fn test_mixed_sequence_is_unsupported() {
        let seq = ConfigNode::from(Object::new().field(
            "ports",
            Sequence::new().item(80i64).item(Object::new().field("port", 81i64)),
        ));
        let err = emit(&seq).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Unsupported node shape at ports: item 1 has shape object, expected primitive"
        );
    }

    #[test]
    fn test_non_finite_float_is_unsupported() {
        let tree = ConfigNode::from(Mapping::new().entry("weight", f64::INFINITY));
        match emit(&tree).unwrap_err() {
            Error::UnsupportedNodeShape { path, .. } => assert_eq!(path, "weight"),
            other => panic!("unexpected error: {other}"),
        }
    }
}
