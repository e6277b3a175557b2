//! Proptest strategies for arbitrary configuration trees

use manifest_emit::{ConfigNode, Mapping, Object, Primitive, Sequence};
use manifest_value::{Document, DynamicDocument, DynamicNumber, IntOrString};
use proptest::prelude::*;
use serde_json::Value;

/// Field and key names; a small alphabet so collisions get exercised
pub fn key() -> impl Strategy<Value = String> {
    "[a-e][a-z0-9]{0,3}"
}

pub fn primitive() -> impl Strategy<Value = Primitive> {
    prop_oneof![
        any::<bool>().prop_map(Primitive::Bool),
        any::<i64>().prop_map(Primitive::Int),
        (i64::MAX as u64 + 1..=u64::MAX).prop_map(Primitive::UInt),
        (-1.0e9f64..1.0e9).prop_map(Primitive::Float),
        "\\PC{0,8}".prop_map(Primitive::String),
    ]
}

pub fn int_or_string() -> impl Strategy<Value = IntOrString> {
    prop_oneof![
        Just(IntOrString::Absent),
        any::<i64>().prop_map(IntOrString::Int),
        "[a-z0-9]{0,6}".prop_map(IntOrString::String),
    ]
}

pub fn dynamic_number() -> impl Strategy<Value = DynamicNumber> {
    prop_oneof![
        Just(DynamicNumber::Absent),
        any::<i64>().prop_map(DynamicNumber::from),
        (0u32..10_000, "(ms|s|m|h|Mi|Gi)")
            .prop_map(|(n, unit)| DynamicNumber::Literal(format!("{n}{unit}"))),
    ]
}

/// Free-form JSON documents, including nulls and empty containers
pub fn raw_document() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i32>().prop_map(Value::from),
        "[a-z]{0,4}".prop_map(Value::String),
    ];
    leaf.prop_recursive(3, 16, 4, |inner| {
        prop_oneof![
            2 => prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            2 => prop::collection::vec((key(), inner.clone()), 0..4)
                .prop_map(|entries| Value::Object(entries.into_iter().collect())),
            1 => prop::collection::vec(prop::collection::vec(inner, 0..4), 1..4)
                .prop_map(|rows| Value::Array(rows.into_iter().map(Value::Array).collect())),
        ]
    })
}

pub fn dynamic_document() -> impl Strategy<Value = DynamicDocument> {
    prop_oneof![
        Just(DynamicDocument::Absent),
        raw_document().prop_map(|raw| DynamicDocument::new(Document::from(raw))),
    ]
}

/// Leaves: absent, null, primitives and flexible values
pub fn leaf() -> impl Strategy<Value = ConfigNode> {
    prop_oneof![
        2 => Just(ConfigNode::Absent),
        1 => Just(ConfigNode::Null),
        3 => primitive().prop_map(ConfigNode::Primitive),
        2 => int_or_string().prop_map(ConfigNode::from),
        2 => dynamic_number().prop_map(ConfigNode::from),
        1 => dynamic_document().prop_map(ConfigNode::from),
    ]
}

/// Well-formed trees: every sequence holds items of a single shape
pub fn config_node() -> impl Strategy<Value = ConfigNode> {
    leaf().prop_recursive(4, 48, 5, |inner| {
        prop_oneof![
            (prop::collection::vec((key(), inner.clone()), 0..5), any::<bool>()).prop_map(
                |(fields, keep)| {
                    let object = fields
                        .into_iter()
                        .fold(Object::new(), |obj, (name, node)| obj.field(name, node));
                    ConfigNode::from(if keep { object.keep_empty() } else { object })
                }
            ),
            (prop::collection::vec((key(), inner.clone()), 0..5), any::<bool>()).prop_map(
                |(entries, keep)| {
                    let mapping: Mapping = entries.into_iter().collect();
                    ConfigNode::from(if keep { mapping.keep_empty() } else { mapping })
                }
            ),
            (prop::collection::vec(inner, 0..5), any::<bool>()).prop_map(|(items, keep)| {
                ConfigNode::from(uniform_sequence(items, keep))
            }),
        ]
    })
}

/// Keep the items sharing the first present item's shape
fn uniform_sequence(items: Vec<ConfigNode>, keep_empty: bool) -> Sequence {
    let expected = items.iter().find_map(ConfigNode::shape);
    let sequence: Sequence = items
        .into_iter()
        .filter(|item| item.shape().is_none() || item.shape() == expected)
        .collect();
    if keep_empty { sequence.keep_empty() } else { sequence }
}
