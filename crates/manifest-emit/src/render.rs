//! Text rendering of canonical documents

use std::fmt;
use std::str::FromStr;

use manifest_value::Document;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Text formats a manifest can be rendered to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Yaml,
    Json,
}

impl OutputFormat {
    /// Detect format from file extension
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "yaml" | "yml" => Some(Self::Yaml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }

    /// Get default file extensions for this format
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            Self::Yaml => &["yaml", "yml"],
            Self::Json => &["json"],
        }
    }
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::from_extension(s).ok_or_else(|| Error::InvalidOptions {
            message: format!("unknown output format: {s}"),
        })
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Yaml => write!(f, "YAML"),
            Self::Json => write!(f, "JSON"),
        }
    }
}

/// Render a document as text.
///
/// JSON is pretty-printed with a trailing newline; YAML comes straight from
/// `serde_yaml`. Key order is the document's order in both.
pub fn render(doc: &Document, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Yaml => {
            serde_yaml::to_string(doc).map_err(|e| Error::render(format, e.to_string()))
        }
        OutputFormat::Json => serde_json::to_string_pretty(doc)
            .map(|mut text| {
                text.push('\n');
                text
            })
            .map_err(|e| Error::render(format, e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_extension() {
        assert_eq!(OutputFormat::from_extension("YML"), Some(OutputFormat::Yaml));
        assert_eq!(OutputFormat::from_extension("json"), Some(OutputFormat::Json));
        assert_eq!(OutputFormat::from_extension("toml"), None);
    }

    #[test]
    fn test_from_str_rejects_unknown() {
        assert!("xml".parse::<OutputFormat>().is_err());
        assert_eq!("yaml".parse::<OutputFormat>().unwrap(), OutputFormat::Yaml);
    }
}
