//! Affect error types.

use thiserror::Error;

/// Errors raised at the edges of the affect classifier.
///
/// Classification itself never fails. These errors only surface when decoding
/// raw upstream text, validating configuration, or (de)serializing.
#[derive(Debug, Error)]
pub enum AffectError {
    /// An appraisal dimension received text outside its value domain.
    #[error("unknown {dimension} value: {value}")]
    UnknownAppraisalValue { dimension: String, value: String },

    /// A group name did not match any known emotion group.
    #[error("unknown emotion group: {0}")]
    UnknownGroup(String),

    /// A configuration field failed validation.
    #[error("invalid config field '{field}': {reason}")]
    InvalidConfig { field: String, reason: String },

    /// JSON encoding or decoding failed.
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Result type for affect operations.
pub type AffectResult<T> = Result<T, AffectError>;

impl From<serde_json::Error> for AffectError {
    fn from(err: serde_json::Error) -> Self {
        AffectError::Serialization(err.to_string())
    }
}

impl AffectError {
    /// Create an [`AffectError::InvalidConfig`] error.
    pub fn invalid_config(field: impl Into<String>, reason: impl Into<String>) -> Self {
        AffectError::InvalidConfig {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Create an [`AffectError::UnknownAppraisalValue`] error.
    pub fn unknown_value(dimension: impl Into<String>, value: impl Into<String>) -> Self {
        AffectError::UnknownAppraisalValue {
            dimension: dimension.into(),
            value: value.into(),
        }
    }
}
