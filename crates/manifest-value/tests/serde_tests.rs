//! Tests for deriving schema structs over flexible values

use manifest_value::{Document, DynamicDocument, DynamicNumber, IntOrString};
use pretty_assertions::assert_eq;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ServicePort {
    name: String,
    #[serde(default, skip_serializing_if = "IntOrString::is_absent")]
    target_port: IntOrString,
    #[serde(default, skip_serializing_if = "DynamicNumber::is_absent")]
    idle_timeout: DynamicNumber,
    #[serde(default, skip_serializing_if = "DynamicDocument::is_absent")]
    typed_config: DynamicDocument,
}

#[test]
fn test_deserialize_named_port_from_yaml() {
    let port: ServicePort = serde_yaml::from_str("name: web\ntargetPort: http\n").unwrap();
    assert_eq!(port.target_port, IntOrString::string("http"));
    assert!(port.idle_timeout.is_absent());
    assert!(port.typed_config.is_absent());
}

#[test]
fn test_deserialize_quoted_number_stays_string() {
    let port: ServicePort = serde_yaml::from_str("name: web\ntargetPort: \"8080\"\n").unwrap();
    assert_eq!(port.target_port, IntOrString::string("8080"));

    let port: ServicePort = serde_yaml::from_str("name: web\ntargetPort: 8080\n").unwrap();
    assert_eq!(port.target_port, IntOrString::int(8080));
}

#[test]
fn test_deserialize_rejects_bool_port() {
    let err = serde_yaml::from_str::<ServicePort>("name: web\ntargetPort: true\n").unwrap_err();
    assert!(err.to_string().contains("Invalid int-or-string value"));
}

#[test]
fn test_deserialize_rejects_word_timeout() {
    let err = serde_json::from_str::<ServicePort>(r#"{"name": "web", "idleTimeout": "later"}"#)
        .unwrap_err();
    assert!(err.to_string().contains("Invalid dynamic-number value"));
}

#[test]
fn test_serialize_skips_absent_and_keeps_forms() {
    let port = ServicePort {
        name: "web".to_string(),
        target_port: IntOrString::string("8080"),
        idle_timeout: DynamicNumber::unit("30s").unwrap(),
        typed_config: DynamicDocument::Absent,
    };
    assert_eq!(
        serde_json::to_string(&port).unwrap(),
        r#"{"name":"web","targetPort":"8080","idleTimeout":"30s"}"#
    );
}

#[test]
fn test_typed_config_keeps_author_order() {
    let source = r#"{"name": "ext", "typedConfig": {"zeta": 1, "alpha": {}, "beta": null}}"#;
    let port: ServicePort = serde_json::from_str(source).unwrap();
    let doc = port.typed_config.as_document().unwrap();
    assert_eq!(doc.keys(), vec!["zeta", "alpha", "beta"]);
    assert_eq!(doc.get("alpha"), Some(&Document::mapping()));
    assert_eq!(doc.get("beta"), Some(&Document::Null));
}
