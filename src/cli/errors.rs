//! CLI-specific error types
//!
//! Every CLI error ends the process with a non-zero status after its JSON
//! form has been written to stdout.

use serde_json::Value;
use std::fmt;
use std::io;

use crate::client::ServiceError;
use crate::config::ConfigError;
use crate::form::FormError;
use crate::schema::ValidationErrors;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliErrorCode {
    /// Configuration file missing or invalid
    ConfigError,
    /// stdin/stdout failure or unreadable JSON
    IoError,
    /// Input JSON does not have the draft's shape
    InvalidInput,
    /// Draft failed validation
    ValidationFailed,
    /// Data service call failed
    ServiceError,
    /// No model or custom type with that name
    UnknownModel,
}

impl CliErrorCode {
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigError => "CLI_CONFIG_ERROR",
            Self::IoError => "CLI_IO_ERROR",
            Self::InvalidInput => "CLI_INVALID_INPUT",
            Self::ValidationFailed => "VALIDATION_FAILED",
            Self::ServiceError => "SERVICE_ERROR",
            Self::UnknownModel => "UNKNOWN_MODEL",
        }
    }
}

#[derive(Debug)]
pub struct CliError {
    code: CliErrorCode,
    message: String,
    details: Option<Value>,
}

impl CliError {
    pub fn new(code: CliErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::ConfigError, msg)
    }

    pub fn io_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::IoError, msg)
    }

    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::InvalidInput, msg)
    }

    /// Validation failure carrying the `path -> message` map
    pub fn validation_failed(errors: &ValidationErrors) -> Self {
        Self {
            code: CliErrorCode::ValidationFailed,
            message: errors.to_string(),
            details: serde_json::to_value(errors).ok(),
        }
    }

    /// Service failure shown with the form's notice text
    pub fn service_failed(notice: impl Into<String>, err: &ServiceError) -> Self {
        Self {
            code: CliErrorCode::ServiceError,
            message: notice.into(),
            details: Some(serde_json::json!({ "code": err.code(), "cause": err.to_string() })),
        }
    }

    pub fn unknown_model(name: &str) -> Self {
        Self::new(CliErrorCode::UnknownModel, format!("No model named '{}'", name))
    }

    pub fn code(&self) -> &CliErrorCode {
        &self.code
    }

    pub fn code_str(&self) -> &'static str {
        self.code.code()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Structured extra information, such as field errors
    pub fn details(&self) -> Option<&Value> {
        self.details.as_ref()
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for CliError {}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        Self::io_error(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::io_error(format!("JSON error: {}", e))
    }
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        Self::config_error(e.to_string())
    }
}

impl From<ServiceError> for CliError {
    fn from(e: ServiceError) -> Self {
        Self {
            code: CliErrorCode::ServiceError,
            message: e.to_string(),
            details: Some(serde_json::json!({ "code": e.code() })),
        }
    }
}

impl From<FormError> for CliError {
    fn from(e: FormError) -> Self {
        match e {
            FormError::Invalid(errors) => Self::validation_failed(&errors),
            other => Self::invalid_input(other.to_string()),
        }
    }
}

pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{FieldPath, RuleKind};

    #[test]
    fn test_validation_failure_carries_fields() {
        let mut errors = ValidationErrors::new();
        errors.add(FieldPath::root().field("name"), RuleKind::Required, "Garage name is required");
        let err = CliError::validation_failed(&errors);

        assert_eq!(err.code_str(), "VALIDATION_FAILED");
        assert_eq!(err.details().unwrap()["name"], "Garage name is required");
    }

    #[test]
    fn test_display_includes_code() {
        let err = CliError::config_error("endpoint missing");
        assert_eq!(err.to_string(), "CLI_CONFIG_ERROR: endpoint missing");
    }
}
