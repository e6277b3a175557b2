//! Flexible configuration values for manifest generation
//!
//! Upstream resource schemas have fields that are polymorphic at the value
//! level: a port that is either a number or a named port, a timeout that is
//! either a bare number or a unit-suffixed string, an extension block with
//! no schema at all. This crate models each of those as an explicit tagged
//! variant that keeps the author's representation, and resolves them into
//! the canonical [`Document`] tree that manifests are rendered from.

pub mod document;
pub mod dynamic_document;
pub mod dynamic_number;
pub mod error;
pub mod flexible;
pub mod int_or_string;
pub mod path;

pub use document::Document;
pub use dynamic_document::DynamicDocument;
pub use dynamic_number::DynamicNumber;
pub use error::{Error, Result};
pub use flexible::{FlexKind, FlexibleValue, resolve};
pub use int_or_string::IntOrString;
pub use path::PathSegment;
pub use serde_json::Number;
