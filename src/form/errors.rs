//! # Form Errors

use thiserror::Error;

use crate::schema::ValidationErrors;

pub type FormResult<T> = Result<T, FormError>;

/// Edits and conversions a form refuses
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormError {
    /// Removing the item would leave the list below its minimum
    #[error("{field} must keep at least {min} item(s)")]
    MinimumItems { field: &'static str, min: usize },

    #[error("{field} has no item at index {index} (length {len})")]
    IndexOutOfRange {
        field: &'static str,
        index: usize,
        len: usize,
    },

    /// Value is not one of the field's fixed options
    #[error("'{value}' is not an option for {field}")]
    UnknownOption { field: &'static str, value: String },

    /// Draft failed validation
    #[error("{0}")]
    Invalid(ValidationErrors),

    /// Record could not be turned into a payload
    #[error("Failed to build payload: {0}")]
    Payload(String),
}

impl FormError {
    pub fn code(&self) -> &'static str {
        match self {
            FormError::MinimumItems { .. } => "MINIMUM_ITEMS",
            FormError::IndexOutOfRange { .. } => "INDEX_OUT_OF_RANGE",
            FormError::UnknownOption { .. } => "UNKNOWN_OPTION",
            FormError::Invalid(_) => "VALIDATION_FAILED",
            FormError::Payload(_) => "PAYLOAD_FAILED",
        }
    }
}

impl From<ValidationErrors> for FormError {
    fn from(errors: ValidationErrors) -> Self {
        FormError::Invalid(errors)
    }
}

impl From<serde_json::Error> for FormError {
    fn from(err: serde_json::Error) -> Self {
        FormError::Payload(err.to_string())
    }
}
