//! Realistic configuration trees, shaped like the resources the emitter
//! serves: Kubernetes services and deployments, Envoy-style listeners.

use manifest_emit::{ConfigNode, Mapping, Object, Sequence};
use manifest_value::{DynamicDocument, DynamicNumber, IntOrString};
use serde_json::json;

/// `{ timeout: "5s", retries: 3, labels: {} }`
pub fn timeout_retries_tree() -> ConfigNode {
    Object::new()
        .field("timeout", DynamicNumber::Literal("5s".to_string()))
        .field("retries", 3i64)
        .field("labels", Mapping::new())
        .into()
}

/// A Service with a numeric port, a named target port and a quoted numeric
/// target port, plus an unset `sessionAffinityConfig` group.
pub fn service_tree() -> ConfigNode {
    let ports: Sequence = [
        Object::new()
            .field("name", "http")
            .field("port", 80i64)
            .field("targetPort", IntOrString::string("web")),
        Object::new()
            .field("name", "metrics")
            .field("port", 9090i64)
            .field("targetPort", IntOrString::string("9090"))
            .field("nodePort", IntOrString::Absent),
    ]
    .into_iter()
    .collect();

    Object::new()
        .field("apiVersion", "v1")
        .field("kind", "Service")
        .field(
            "metadata",
            Object::new()
                .field("name", "frontend")
                .field("namespace", ConfigNode::Absent)
                .field("labels", Mapping::new().entry("app", "frontend").entry("tier", "web"))
                .field("annotations", Mapping::new()),
        )
        .field(
            "spec",
            Object::new()
                .field("type", "ClusterIP")
                .field("ports", ports)
                .field("selector", Mapping::new().entry("app", "frontend"))
                .field(
                    "sessionAffinityConfig",
                    Object::new().field(
                        "clientIP",
                        Object::new().field("timeoutSeconds", ConfigNode::Absent),
                    ),
                ),
        )
        .into()
}

/// An Envoy-style listener with a free-form `typedConfig` extension block
/// and a unit-suffixed idle timeout.
pub fn listener_tree() -> ConfigNode {
    let typed_config = DynamicDocument::from(json!({
        "@type": "type.googleapis.com/envoy.extensions.filters.network.http_connection_manager.v3.HttpConnectionManager",
        "statPrefix": "ingress_http",
        "codecType": "AUTO",
        "routeConfig": {"virtualHosts": [{"name": "backend", "domains": ["*"]}]},
        "httpFilters": [],
        "commonHttpProtocolOptions": {}
    }));

    Object::new()
        .field("name", "listener_0")
        .field(
            "address",
            Object::new().field(
                "socketAddress",
                Object::new()
                    .field("address", "0.0.0.0")
                    .field("portValue", 10000i64),
            ),
        )
        .field(
            "filterChains",
            Sequence::new().item(
                Object::new().field(
                    "filters",
                    Sequence::new().item(
                        Object::new()
                            .field("name", "envoy.filters.network.http_connection_manager")
                            .field("typedConfig", typed_config),
                    ),
                ),
            ),
        )
        .field("idleTimeout", DynamicNumber::Literal("300s".to_string()))
        .field("perConnectionBufferLimitBytes", DynamicNumber::Absent)
        .into()
}

/// A Deployment with resource quantities and an explicitly empty
/// `emptyDir: {}` volume source that must survive elision.
pub fn deployment_tree() -> ConfigNode {
    let container = Object::new()
        .field("name", "app")
        .field("image", "registry.local/app:1.4.2")
        .field("args", Sequence::new())
        .field(
            "resources",
            Object::new()
                .field(
                    "limits",
                    Mapping::new()
                        .entry("cpu", DynamicNumber::Literal("500m".to_string()))
                        .entry("memory", DynamicNumber::Literal("512Mi".to_string())),
                )
                .field(
                    "requests",
                    Mapping::new()
                        .entry("cpu", DynamicNumber::from(1i64))
                        .entry("memory", DynamicNumber::Absent),
                ),
        )
        .field(
            "livenessProbe",
            Object::new().field(
                "httpGet",
                Object::new()
                    .field("path", "/healthz")
                    .field("port", IntOrString::int(8080)),
            ),
        );

    Object::new()
        .field("apiVersion", "apps/v1")
        .field("kind", "Deployment")
        .field("metadata", Object::new().field("name", "app"))
        .field(
            "spec",
            Object::new()
                .field("replicas", 2i64)
                .field("paused", ConfigNode::Absent)
                .field(
                    "template",
                    Object::new().field(
                        "spec",
                        Object::new()
                            .field("containers", Sequence::new().item(container))
                            .field(
                                "volumes",
                                Sequence::new().item(
                                    Object::new()
                                        .field("name", "scratch")
                                        .field("emptyDir", Object::new().keep_empty()),
                                ),
                            ),
                    ),
                ),
        )
        .into()
}
