//! Emission options
//!
//! Options are plain serde structs so host tooling can keep them next to
//! the rest of its configuration:
//!
//! ```toml
//! elide-empty = true
//! null-policy = "emit"
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// What to do with fields explicitly set to null
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NullPolicy {
    /// Write `key: null`
    #[default]
    Emit,
    /// Treat explicit null like an absent field
    Elide,
}

/// Switches for the emitter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct EmitOptions {
    /// Drop objects, sequences and mappings left empty after elision.
    /// Per-node `keep_empty` overrides this.
    pub elide_empty: bool,
    /// Handling of present-null fields
    pub null_policy: NullPolicy,
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self {
            elide_empty: true,
            null_policy: NullPolicy::default(),
        }
    }
}

impl EmitOptions {
    pub fn with_elide_empty(mut self, elide_empty: bool) -> Self {
        self.elide_empty = elide_empty;
        self
    }

    pub fn with_null_policy(mut self, null_policy: NullPolicy) -> Self {
        self.null_policy = null_policy;
        self
    }

    pub fn from_toml_str(source: &str) -> Result<Self> {
        toml::from_str(source).map_err(|e| Error::InvalidOptions {
            message: e.to_string(),
        })
    }

    pub fn from_yaml_str(source: &str) -> Result<Self> {
        // An empty YAML document deserializes as unit, not as an empty map
        if source.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(source).map_err(|e| Error::InvalidOptions {
            message: e.to_string(),
        })
    }

    pub fn from_json_str(source: &str) -> Result<Self> {
        serde_json::from_str(source).map_err(|e| Error::InvalidOptions {
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = EmitOptions::default();
        assert!(options.elide_empty);
        assert_eq!(options.null_policy, NullPolicy::Emit);
    }

    #[test]
    fn test_empty_sources_are_defaults() {
        assert_eq!(EmitOptions::from_toml_str("").unwrap(), EmitOptions::default());
        assert_eq!(EmitOptions::from_yaml_str("").unwrap(), EmitOptions::default());
        assert_eq!(EmitOptions::from_json_str("{}").unwrap(), EmitOptions::default());
    }
}
