//! Error types for manifest-emit

use crate::render::OutputFormat;

/// Result type for manifest-emit operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building, emitting or rendering a tree
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The tree escaped the node grammar (mixed-shape sequence, non-finite
    /// float). An internal invariant violation, never a user error.
    #[error("Unsupported node shape at {path}: {reason}")]
    UnsupportedNodeShape { path: String, reason: String },

    /// A flexible value could not be resolved while building the tree
    #[error(transparent)]
    Value(#[from] manifest_value::Error),

    #[error("Failed to render {format} document: {message}")]
    Render {
        format: OutputFormat,
        message: String,
    },

    #[error("Invalid emit options: {message}")]
    InvalidOptions { message: String },
}

impl Error {
    pub fn unsupported(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::UnsupportedNodeShape {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub fn render(format: OutputFormat, message: impl Into<String>) -> Self {
        Self::Render {
            format,
            message: message.into(),
        }
    }
}
