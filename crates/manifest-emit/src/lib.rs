//! Canonical document emission for typed configuration trees
//!
//! Host code declares a resource as a [`ConfigNode`] tree, hands it to the
//! [`Emitter`], and gets back a [`Document`] with every absent field elided,
//! every flexible value resolved to the form its author wrote, and every
//! key in declaration order. [`render`] turns that document into YAML or
//! JSON text.
//!
//! ```
//! use manifest_emit::{emit, ConfigNode, Mapping, Object};
//! use manifest_value::DynamicNumber;
//! use serde_json::json;
//!
//! let tree = ConfigNode::from(
//!     Object::new()
//!         .field("timeout", DynamicNumber::unit("5s").unwrap())
//!         .field("retries", 3i64)
//!         .field("labels", Mapping::new()),
//! );
//! let doc = emit(&tree).unwrap().unwrap();
//! assert_eq!(serde_json::Value::from(doc), json!({"timeout": "5s", "retries": 3}));
//! ```

pub mod emitter;
pub mod error;
pub mod node;
pub mod options;
pub mod render;

pub use emitter::{Emitter, emit};
pub use error::{Error, Result};
pub use manifest_value::{Document, FlexKind, FlexibleValue};
pub use node::{ConfigNode, Mapping, NodeShape, Object, Presence, Primitive, Sequence};
pub use options::{EmitOptions, NullPolicy};
pub use render::{OutputFormat, render};
