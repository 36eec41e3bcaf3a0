//! # Data Service Boundary
//!
//! The managed data service is a black box offering one operation per
//! entity: create. [`DataClient`] pairs a service with the session so each
//! call carries the credential that is right at the moment it is made.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::auth::{AuthMode, AuthModeSelector, Credential, IdentityProvider};
use super::errors::{ServiceError, ServiceResult};
use crate::observability::Event;
use crate::schema::EntityName;

/// Record as acknowledged by the service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedRecord {
    pub entity: EntityName,
    /// Server-assigned id
    pub id: String,
    /// Payload plus server-managed fields
    pub data: Value,
}

#[async_trait]
pub trait DataService: Send + Sync + fmt::Debug {
    /// Persists one new record
    async fn create(
        &self,
        entity: EntityName,
        payload: Value,
        credential: &Credential,
    ) -> ServiceResult<CreatedRecord>;
}

/// Session-aware handle on a data service
#[derive(Debug, Clone)]
pub struct DataClient {
    service: Arc<dyn DataService>,
    selector: AuthModeSelector,
    api_key: Option<String>,
}

impl DataClient {
    pub fn new(service: Arc<dyn DataService>, identity: Arc<dyn IdentityProvider>) -> Self {
        Self {
            service,
            selector: AuthModeSelector::new(identity),
            api_key: None,
        }
    }

    /// Key used whenever nobody is signed in
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn selector(&self) -> &AuthModeSelector {
        &self.selector
    }

    /// Resolves the credential for a request made now
    pub async fn credential(&self) -> ServiceResult<Credential> {
        match self.selector.identity().await {
            Some(identity) => Ok(Credential::UserPool { token: identity.token }),
            None => self
                .api_key
                .clone()
                .map(Credential::ApiKey)
                .ok_or(ServiceError::MissingCredential(AuthMode::ApiKey)),
        }
    }

    /// Issues exactly one create request
    pub async fn create(&self, entity: EntityName, payload: Value) -> ServiceResult<CreatedRecord> {
        let credential = self.credential().await?;
        debug!(event = %Event::AuthModeResolved, entity = %entity, mode = %credential.mode());
        debug!(event = %Event::CreateBegin, entity = %entity);

        match self.service.create(entity, payload, &credential).await {
            Ok(record) => {
                info!(event = %Event::CreateComplete, entity = %entity, id = %record.id);
                Ok(record)
            }
            Err(err) => {
                warn!(event = %Event::CreateFailed, entity = %entity, code = err.code(), error = %err);
                Err(err)
            }
        }
    }
}
