//! Error types for attribute coercion
//!
//! Every variant is an authoring bug in schema or path construction code.
//! Malformed end-user values never produce an error: validators fall back
//! to defaults instead.

use attrkit_path::{AccessError, PathError};

/// Errors raised by [`Coercer`](crate::Coercer)
#[derive(Debug, thiserror::Error)]
pub enum CoerceError {
    /// Path string malformed, or a write hit the wrong kind of container
    #[error("access error: {0}")]
    Access(#[from] AccessError),

    /// Schema leaf names a type tag with no registered validator
    #[error("no validator registered for type '{0}'")]
    UnknownType(String),

    /// No schema leaf at the requested path
    #[error("no schema leaf for attribute '{0}'")]
    UnknownAttribute(String),

    /// Schema could not be loaded
    #[error("schema error: {0}")]
    Schema(#[from] SchemaError),
}

impl From<PathError> for CoerceError {
    fn from(err: PathError) -> Self {
        Self::Access(AccessError::InvalidPath(err))
    }
}

/// Errors while loading a schema tree
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// Source text is not valid JSON
    #[error("invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// Source text is not valid YAML
    #[error("invalid YAML: {0}")]
    InvalidYaml(#[from] serde_yaml::Error),

    /// Tree does not have the shape of a schema
    #[error("invalid schema at '{path}': {reason}")]
    InvalidShape { path: String, reason: String },
}

impl SchemaError {
    /// Create shape error for path
    pub fn invalid_shape(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidShape {
            path: path.into(),
            reason: reason.into(),
        }
    }
}
