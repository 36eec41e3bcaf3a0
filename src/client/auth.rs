//! # Credential Mode Selection
//!
//! Requests go out either as the signed-in user (user pool) or with the
//! shared API key. The choice is made per call from whatever the identity
//! provider reports at that moment; nothing is cached between calls.

use async_trait::async_trait;
use serde::Serialize;
use std::fmt;
use std::sync::{Arc, RwLock};
use thiserror::Error;
use tracing::{debug, warn};

use crate::observability::Event;

/// Credential mode attached to outgoing requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum AuthMode {
    /// Signed-in user's token
    UserPool,
    /// Shared public key
    ApiKey,
}

impl AuthMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthMode::UserPool => "userPool",
            AuthMode::ApiKey => "apiKey",
        }
    }
}

impl fmt::Display for AuthMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A signed-in user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_id: String,
    pub username: String,
    /// Bearer token sent in user-pool mode
    pub token: String,
}

impl Identity {
    pub fn new(user_id: impl Into<String>, username: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            username: username.into(),
            token: token.into(),
        }
    }
}

/// What actually goes on the wire
#[derive(Clone, PartialEq, Eq)]
pub enum Credential {
    UserPool { token: String },
    ApiKey(String),
}

impl Credential {
    pub fn mode(&self) -> AuthMode {
        match self {
            Credential::UserPool { .. } => AuthMode::UserPool,
            Credential::ApiKey(_) => AuthMode::ApiKey,
        }
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Credential({}, <redacted>)", self.mode())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentityError {
    #[error("No signed-in user")]
    NoSession,

    #[error("Identity lookup failed: {0}")]
    Lookup(String),
}

/// Source of the current session
#[async_trait]
pub trait IdentityProvider: Send + Sync + fmt::Debug {
    /// Returns the signed-in user, or an error when there is none
    async fn current_identity(&self) -> Result<Identity, IdentityError>;
}

/// Provider for contexts where nobody can sign in
#[derive(Debug, Default, Clone, Copy)]
pub struct NoSession;

#[async_trait]
impl IdentityProvider for NoSession {
    async fn current_identity(&self) -> Result<Identity, IdentityError> {
        Err(IdentityError::NoSession)
    }
}

/// In-process session that can be signed in and out
#[derive(Debug, Default)]
pub struct SessionStore {
    current: RwLock<Option<Identity>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn signed_in(identity: Identity) -> Self {
        Self {
            current: RwLock::new(Some(identity)),
        }
    }

    pub fn sign_in(&self, identity: Identity) {
        let mut current = self.current.write().unwrap_or_else(|e| e.into_inner());
        *current = Some(identity);
    }

    pub fn sign_out(&self) {
        let mut current = self.current.write().unwrap_or_else(|e| e.into_inner());
        *current = None;
    }
}

#[async_trait]
impl IdentityProvider for SessionStore {
    async fn current_identity(&self) -> Result<Identity, IdentityError> {
        let current = self
            .current
            .read()
            .map_err(|_| IdentityError::Lookup("Lock poisoned".to_string()))?;
        current.clone().ok_or(IdentityError::NoSession)
    }
}

/// Picks the credential mode from the current session
#[derive(Debug, Clone)]
pub struct AuthModeSelector {
    identity: Arc<dyn IdentityProvider>,
}

impl AuthModeSelector {
    pub fn new(identity: Arc<dyn IdentityProvider>) -> Self {
        Self { identity }
    }

    /// Signed-in user if there is one.
    ///
    /// Lookup failures mean "anonymous" and are never surfaced.
    pub async fn identity(&self) -> Option<Identity> {
        match self.identity.current_identity().await {
            Ok(identity) => Some(identity),
            Err(IdentityError::NoSession) => None,
            Err(err) => {
                warn!(event = %Event::IdentityLookupFailed, error = %err, "falling back to api key");
                None
            }
        }
    }

    /// Mode the next request would use
    pub async fn mode(&self) -> AuthMode {
        let mode = match self.identity().await {
            Some(_) => AuthMode::UserPool,
            None => AuthMode::ApiKey,
        };
        debug!(event = %Event::AuthModeResolved, mode = %mode);
        mode
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Broken;

    #[async_trait]
    impl IdentityProvider for Broken {
        async fn current_identity(&self) -> Result<Identity, IdentityError> {
            Err(IdentityError::Lookup("network down".to_string()))
        }
    }

    #[tokio::test]
    async fn test_no_session_selects_api_key() {
        let selector = AuthModeSelector::new(Arc::new(NoSession));
        assert_eq!(selector.mode().await, AuthMode::ApiKey);
    }

    #[tokio::test]
    async fn test_lookup_failure_selects_api_key() {
        let selector = AuthModeSelector::new(Arc::new(Broken));
        assert_eq!(selector.mode().await, AuthMode::ApiKey);
    }

    #[tokio::test]
    async fn test_mode_follows_session_changes() {
        let session = Arc::new(SessionStore::new());
        let selector = AuthModeSelector::new(session.clone());
        assert_eq!(selector.mode().await, AuthMode::ApiKey);

        session.sign_in(Identity::new("u-1", "rider", "jwt"));
        assert_eq!(selector.mode().await, AuthMode::UserPool);

        session.sign_out();
        assert_eq!(selector.mode().await, AuthMode::ApiKey);
    }

    #[test]
    fn test_credential_debug_is_redacted() {
        let credential = Credential::ApiKey("da2-secret".to_string());
        assert!(!format!("{:?}", credential).contains("da2-secret"));
    }
}
