//! # Client Errors
//!
//! Failures talking to the managed data service.

use thiserror::Error;

use super::auth::AuthMode;

/// Result type for data service calls
pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ServiceError {
    // ==================
    // Transport
    // ==================
    /// Request never reached the service or the connection dropped
    #[error("Request failed: {0}")]
    Transport(String),

    /// No response within the configured timeout
    #[error("Request timed out")]
    Timeout,

    // ==================
    // Service
    // ==================
    /// Non-success HTTP status
    #[error("Service rejected the request ({status}): {message}")]
    Rejected { status: u16, message: String },

    /// Request accepted but the operation reported errors
    #[error("Create failed: {0}")]
    OperationFailed(String),

    /// Response body did not have the expected shape
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    // ==================
    // Client
    // ==================
    /// The selected mode has no credential to send
    #[error("No credential available for {0} mode")]
    MissingCredential(AuthMode),

    /// Payload could not be serialized
    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    /// Local state could not be accessed
    #[error("Storage error: {0}")]
    Storage(String),
}

impl ServiceError {
    /// Stable code for logs and CLI output
    pub fn code(&self) -> &'static str {
        match self {
            ServiceError::Transport(_) => "TRANSPORT",
            ServiceError::Timeout => "TIMEOUT",
            ServiceError::Rejected { .. } => "REJECTED",
            ServiceError::OperationFailed(_) => "OPERATION_FAILED",
            ServiceError::MalformedResponse(_) => "MALFORMED_RESPONSE",
            ServiceError::MissingCredential(_) => "MISSING_CREDENTIAL",
            ServiceError::InvalidPayload(_) => "INVALID_PAYLOAD",
            ServiceError::Storage(_) => "STORAGE",
        }
    }

    /// Returns true if nothing about the request itself was wrong
    pub fn is_transient(&self) -> bool {
        match self {
            ServiceError::Transport(_) | ServiceError::Timeout => true,
            ServiceError::Rejected { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

impl From<serde_json::Error> for ServiceError {
    fn from(err: serde_json::Error) -> Self {
        ServiceError::InvalidPayload(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_errors() {
        assert!(ServiceError::Timeout.is_transient());
        assert!(ServiceError::Rejected { status: 503, message: String::new() }.is_transient());
        assert!(!ServiceError::Rejected { status: 400, message: String::new() }.is_transient());
        assert!(!ServiceError::MissingCredential(AuthMode::ApiKey).is_transient());
    }

    #[test]
    fn test_missing_credential_message() {
        let err = ServiceError::MissingCredential(AuthMode::ApiKey);
        assert_eq!(err.to_string(), "No credential available for apiKey mode");
    }
}
