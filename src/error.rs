//! jpath error types

use thiserror::Error;

/// Result type for [`JpathError`]
pub type Result<T, E = JpathError> = std::result::Result<T, E>;

/// Error Type
#[derive(Debug, Error)]
pub enum JpathError {
    /// A path component is neither a usable field name nor an array index,
    /// or a directive suffix is not the last component.
    #[error("Malformed path: {path}, {reason}")]
    MalformedPath { path: String, reason: String },

    /// A location was addressed as a different node kind than the one
    /// already established there.
    #[error(
        "Structural conflict in path: {path}, expected {expected} at {location} but found {found}"
    )]
    StructuralConflict {
        path: String,
        location: String,
        expected: String,
        found: String,
    },

    /// The raw value could not be interpreted as the directive demands.
    #[error("Cannot apply {directive} to value of path: {path}, {reason}")]
    CoercionError {
        path: String,
        directive: String,
        reason: String,
    },

    /// An array index larger than the configured maximum.
    #[error("Array index {index} in path: {path} exceeds the maximum of {max}")]
    IndexOutOfBounds {
        path: String,
        index: usize,
        max: usize,
    },

    /// A flat key with more segments than the configured maximum depth.
    #[error("Path: {path} has {depth} segments, more than the maximum depth of {max}")]
    PathTooDeep {
        path: String,
        depth: usize,
        max: usize,
    },

    /// Growing an array for this key would exceed the number of array slots
    /// one build may allocate.
    #[error(
        "Array growth of {requested} slots for path: {path} exceeds the remaining budget, \
        at most {max} slots per document"
    )]
    ArraySlotsExhausted {
        path: String,
        requested: usize,
        max: usize,
    },

    /// The raw value of a flat entry is not a string, number, boolean or
    /// nested object.
    #[error("Unsupported {found} value for path: {path}")]
    UnsupportedValue { path: String, found: String },

    /// The JSON input holding the flat entries was not an object.
    #[error("Input must be a JSON object of flat entries, found {found}")]
    InputNotAnObject { found: String },

    /// The JSON encoder failed to render the assembled document.
    #[error("Failed to encode document: {0}")]
    Encode(#[from] serde_json::Error),
}

impl JpathError {
    /// Check if this error was raised while parsing a flat key
    pub fn is_path_error(&self) -> bool {
        matches!(
            self,
            JpathError::MalformedPath { .. }
                | JpathError::IndexOutOfBounds { .. }
                | JpathError::PathTooDeep { .. }
        )
    }

    /// Check if this error was raised by one of the configured size limits
    pub fn is_limit_error(&self) -> bool {
        matches!(
            self,
            JpathError::IndexOutOfBounds { .. }
                | JpathError::PathTooDeep { .. }
                | JpathError::ArraySlotsExhausted { .. }
        )
    }

    /// Check if this error is a node kind collision between flat keys
    pub fn is_conflict(&self) -> bool {
        matches!(self, JpathError::StructuralConflict { .. })
    }

    /// Check if this error came from applying a value directive
    pub fn is_coercion_error(&self) -> bool {
        matches!(self, JpathError::CoercionError { .. })
    }

    /// The flat key that caused the error, if the error belongs to one entry.
    pub fn path(&self) -> Option<&str> {
        match self {
            JpathError::MalformedPath { path, .. }
            | JpathError::StructuralConflict { path, .. }
            | JpathError::CoercionError { path, .. }
            | JpathError::IndexOutOfBounds { path, .. }
            | JpathError::PathTooDeep { path, .. }
            | JpathError::ArraySlotsExhausted { path, .. }
            | JpathError::UnsupportedValue { path, .. } => Some(path.as_str()),
            JpathError::InputNotAnObject { .. } | JpathError::Encode(_) => None,
        }
    }
}
