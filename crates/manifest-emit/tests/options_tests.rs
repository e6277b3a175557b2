//! Tests for loading emit options

use manifest_emit::{ConfigNode, EmitOptions, Emitter, Error, Mapping, NullPolicy, Object};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{Value, json};

#[rstest]
#[case::toml(EmitOptions::from_toml_str("elide-empty = false\nnull-policy = \"elide\"\n"))]
#[case::yaml(EmitOptions::from_yaml_str("elide-empty: false\nnull-policy: elide\n"))]
#[case::json(EmitOptions::from_json_str(r#"{"elide-empty": false, "null-policy": "elide"}"#))]
fn test_load_options(#[case] loaded: manifest_emit::Result<EmitOptions>) {
    let options = loaded.unwrap();
    assert_eq!(
        options,
        EmitOptions::default()
            .with_elide_empty(false)
            .with_null_policy(NullPolicy::Elide)
    );
}

#[rstest]
#[case::partial_toml(EmitOptions::from_toml_str("null-policy = \"elide\"\n"))]
#[case::partial_yaml(EmitOptions::from_yaml_str("null-policy: elide\n"))]
fn test_missing_keys_take_defaults(#[case] loaded: manifest_emit::Result<EmitOptions>) {
    let options = loaded.unwrap();
    assert!(options.elide_empty);
    assert_eq!(options.null_policy, NullPolicy::Elide);
}

#[rstest]
#[case::unknown_key(EmitOptions::from_toml_str("sort-keys = true\n"))]
#[case::bad_policy(EmitOptions::from_yaml_str("null-policy: drop\n"))]
#[case::bad_type(EmitOptions::from_json_str(r#"{"elide-empty": "yes"}"#))]
fn test_invalid_options(#[case] loaded: manifest_emit::Result<EmitOptions>) {
    assert!(matches!(loaded, Err(Error::InvalidOptions { .. })));
}

#[test]
fn test_loaded_options_drive_emission() {
    let options = EmitOptions::from_toml_str("elide-empty = false\nnull-policy = \"elide\"\n").unwrap();
    let tree = ConfigNode::from(
        Object::new()
            .field("labels", Mapping::new())
            .field("cleared", ConfigNode::Null),
    );
    let doc = Emitter::new(options).emit(&tree).unwrap().map(Value::from);
    assert_eq!(doc, Some(json!({"labels": {}})));
}
