//! # In-Memory Data Service
//!
//! Stands in for the managed service in tests and offline use. Assigns ids
//! and timestamps the way the real service does and records every call.

use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::RwLock;
use uuid::Uuid;

use super::auth::{AuthMode, Credential};
use super::errors::{ServiceError, ServiceResult};
use super::service::{CreatedRecord, DataService};
use crate::schema::EntityName;

/// Fields only the service may set
pub const SERVER_MANAGED: &[&str] = &["id", "createdAt", "updatedAt"];

/// One observed create call
#[derive(Debug, Clone, PartialEq)]
pub struct CreateCall {
    pub entity: EntityName,
    pub mode: AuthMode,
    pub payload: Value,
}

#[derive(Debug, Default)]
struct MemoryState {
    records: HashMap<EntityName, Vec<Value>>,
    calls: Vec<CreateCall>,
    failures_pending: usize,
}

#[derive(Debug, Default)]
pub struct MemoryDataService {
    state: RwLock<MemoryState>,
}

impl MemoryDataService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes the next `count` create calls fail with a 503
    pub fn fail_next(&self, count: usize) {
        let mut state = self.state.write().unwrap_or_else(|e| e.into_inner());
        state.failures_pending = count;
    }

    /// Stored records of one entity, oldest first
    pub fn records(&self, entity: EntityName) -> Vec<Value> {
        let state = self.state.read().unwrap_or_else(|e| e.into_inner());
        state.records.get(&entity).cloned().unwrap_or_default()
    }

    /// Every create call seen, including failed ones
    pub fn calls(&self) -> Vec<CreateCall> {
        let state = self.state.read().unwrap_or_else(|e| e.into_inner());
        state.calls.clone()
    }
}

#[async_trait]
impl DataService for MemoryDataService {
    async fn create(
        &self,
        entity: EntityName,
        payload: Value,
        credential: &Credential,
    ) -> ServiceResult<CreatedRecord> {
        let mut state = self
            .state
            .write()
            .map_err(|_| ServiceError::Storage("Lock poisoned".to_string()))?;

        state.calls.push(CreateCall {
            entity,
            mode: credential.mode(),
            payload: payload.clone(),
        });

        if state.failures_pending > 0 {
            state.failures_pending -= 1;
            return Err(ServiceError::Rejected {
                status: 503,
                message: "Service unavailable".to_string(),
            });
        }

        let Value::Object(mut fields) = payload else {
            return Err(ServiceError::Rejected {
                status: 400,
                message: format!("{} input must be an object", entity),
            });
        };
        if let Some(field) = SERVER_MANAGED.iter().find(|f| fields.contains_key(**f)) {
            return Err(ServiceError::Rejected {
                status: 400,
                message: format!("{} is server-managed", field),
            });
        }

        let id = Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();
        fields.insert("id".to_string(), Value::String(id.clone()));
        fields.insert("createdAt".to_string(), Value::String(now.clone()));
        fields.insert("updatedAt".to_string(), Value::String(now));

        let data = Value::Object(fields);
        state.records.entry(entity).or_default().push(data.clone());

        Ok(CreatedRecord { entity, id, data })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn key() -> Credential {
        Credential::ApiKey("da2-test".to_string())
    }

    #[tokio::test]
    async fn test_assigns_server_fields() {
        let service = MemoryDataService::new();
        let record = service
            .create(EntityName::Club, json!({"name": "Iron Riders"}), &key())
            .await
            .unwrap();

        assert!(Uuid::parse_str(&record.id).is_ok());
        assert_eq!(record.data["name"], "Iron Riders");
        assert!(record.data.get("createdAt").is_some());
        assert_eq!(service.records(EntityName::Club).len(), 1);
    }

    #[tokio::test]
    async fn test_fail_next() {
        let service = MemoryDataService::new();
        service.fail_next(1);

        let first = service.create(EntityName::Club, json!({}), &key()).await;
        assert!(matches!(first, Err(ServiceError::Rejected { status: 503, .. })));
        assert!(service.create(EntityName::Club, json!({}), &key()).await.is_ok());
        assert_eq!(service.calls().len(), 2);
        assert_eq!(service.records(EntityName::Club).len(), 1);
    }

    #[tokio::test]
    async fn test_rejects_server_managed_fields() {
        let service = MemoryDataService::new();
        let result = service
            .create(EntityName::Part, json!({"id": "mine"}), &key())
            .await;
        assert!(matches!(result, Err(ServiceError::Rejected { status: 400, .. })));
        assert!(service.records(EntityName::Part).is_empty());
    }
}
