//! Document paths
//!
//! Paths address nodes inside a [`Document`] and name the location of
//! emitter diagnostics.
//!
//! # Path Syntax
//!
//! - Dot-separated keys: `spec.template.metadata`
//! - Sequence indexing: `ports[0].name`
//! - Combined: `spec.containers[0].ports[1]`
//!
//! # Examples
//!
//! ```
//! use manifest_value::path::{format_path, parse_path, PathSegment};
//!
//! let path = parse_path("spec.ports[0].port");
//! assert_eq!(path, vec![
//!     PathSegment::Key("spec".to_string()),
//!     PathSegment::Key("ports".to_string()),
//!     PathSegment::Index(0),
//!     PathSegment::Key("port".to_string()),
//! ]);
//! assert_eq!(format_path(&path), "spec.ports[0].port");
//! ```

use std::fmt;

use crate::document::Document;

/// A segment of a path - either a mapping key or a sequence index
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// A key in a mapping (e.g., "spec" in "spec.ports")
    Key(String),
    /// An index in a sequence (e.g., 0 in `ports[0]`)
    Index(usize),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Key(key) => write!(f, "{key}"),
            PathSegment::Index(idx) => write!(f, "[{idx}]"),
        }
    }
}

/// Parse a path string into segments.
///
/// Malformed indices (`items[x]`) are skipped rather than rejected.
pub fn parse_path(path: &str) -> Vec<PathSegment> {
    let mut segments = Vec::new();
    let mut current_key = String::new();
    let mut chars = path.chars();

    while let Some(ch) = chars.next() {
        match ch {
            '.' => {
                if !current_key.is_empty() {
                    segments.push(PathSegment::Key(std::mem::take(&mut current_key)));
                }
            }
            '[' => {
                if !current_key.is_empty() {
                    segments.push(PathSegment::Key(std::mem::take(&mut current_key)));
                }
                let mut index_str = String::new();
                for ch in chars.by_ref() {
                    if ch == ']' {
                        break;
                    }
                    index_str.push(ch);
                }
                if let Ok(index) = index_str.parse::<usize>() {
                    segments.push(PathSegment::Index(index));
                }
            }
            _ => current_key.push(ch),
        }
    }

    if !current_key.is_empty() {
        segments.push(PathSegment::Key(current_key));
    }

    segments
}

/// Render segments back into path syntax. The empty path renders as `$`.
pub fn format_path(segments: &[PathSegment]) -> String {
    if segments.is_empty() {
        return "$".to_string();
    }

    let mut out = String::new();
    for segment in segments {
        match segment {
            PathSegment::Key(key) => {
                if !out.is_empty() {
                    out.push('.');
                }
                out.push_str(key);
            }
            PathSegment::Index(_) => out.push_str(&segment.to_string()),
        }
    }
    out
}

/// Get the node at the given path.
///
/// Returns `None` if any segment is missing or addresses the wrong shape.
pub fn get_at_path<'a>(doc: &'a Document, segments: &[PathSegment]) -> Option<&'a Document> {
    let Some((first, rest)) = segments.split_first() else {
        return Some(doc);
    };

    let next = match (first, doc) {
        (PathSegment::Key(key), Document::Mapping(map)) => map.get(key)?,
        (PathSegment::Index(idx), Document::Sequence(items)) => items.get(*idx)?,
        _ => return None,
    };

    get_at_path(next, rest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_path_simple() {
        assert_eq!(parse_path("name"), vec![PathSegment::Key("name".to_string())]);
    }

    #[test]
    fn test_parse_path_mixed() {
        assert_eq!(
            parse_path("items[0].name"),
            vec![
                PathSegment::Key("items".to_string()),
                PathSegment::Index(0),
                PathSegment::Key("name".to_string()),
            ]
        );
    }

    #[test]
    fn test_parse_path_nested_index() {
        assert_eq!(
            parse_path("matrix[1][2]"),
            vec![
                PathSegment::Key("matrix".to_string()),
                PathSegment::Index(1),
                PathSegment::Index(2),
            ]
        );
    }

    #[test]
    fn test_parse_path_skips_malformed_index() {
        assert_eq!(
            parse_path("items[x].name"),
            vec![
                PathSegment::Key("items".to_string()),
                PathSegment::Key("name".to_string()),
            ]
        );
    }

    #[test]
    fn test_format_path() {
        assert_eq!(format_path(&[]), "$");
        assert_eq!(format_path(&parse_path("spec.ports[3]")), "spec.ports[3]");
        assert_eq!(format_path(&[PathSegment::Index(0)]), "[0]");
    }

    #[test]
    fn test_get_at_path_missing_or_wrong_shape() {
        let doc = Document::from(json!({"items": [{"name": "first"}]}));
        assert!(get_at_path(&doc, &parse_path("items[1]")).is_none());
        assert!(get_at_path(&doc, &parse_path("items.name")).is_none());
        assert_eq!(
            get_at_path(&doc, &parse_path("items[0].name")).and_then(Document::as_str),
            Some("first")
        );
    }
}
