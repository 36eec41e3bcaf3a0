//! # HTTP Data Service
//!
//! Talks to the managed service's GraphQL endpoint. Every entity has a
//! `create<Entity>(input: Create<Entity>Input!)` mutation.

use async_trait::async_trait;
use serde::Serialize;
use serde_json::{json, Value};

use super::auth::Credential;
use super::errors::{ServiceError, ServiceResult};
use super::service::{CreatedRecord, DataService};
use crate::config::ClientConfig;
use crate::schema::EntityName;

/// Body of a GraphQL POST
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphQlRequest {
    pub query: String,
    pub variables: Value,
}

/// Builds the create mutation for `entity`
pub fn create_request(entity: EntityName, payload: Value) -> GraphQlRequest {
    let name = entity.as_str();
    GraphQlRequest {
        query: format!(
            "mutation Create{name}($input: Create{name}Input!) {{ create{name}(input: $input) {{ id createdAt updatedAt }} }}"
        ),
        variables: json!({ "input": payload }),
    }
}

/// Header carrying the credential
pub fn auth_header(credential: &Credential) -> (&'static str, String) {
    match credential {
        Credential::ApiKey(key) => ("x-api-key", key.clone()),
        Credential::UserPool { token } => ("authorization", token.clone()),
    }
}

/// Extracts the created record from a GraphQL response body
pub fn parse_response(entity: EntityName, payload: Value, body: &Value) -> ServiceResult<CreatedRecord> {
    if let Some(errors) = body.get("errors").and_then(Value::as_array) {
        if !errors.is_empty() {
            let messages: Vec<&str> = errors
                .iter()
                .map(|e| e.get("message").and_then(Value::as_str).unwrap_or("unknown error"))
                .collect();
            return Err(ServiceError::OperationFailed(messages.join("; ")));
        }
    }

    let field = format!("create{}", entity.as_str());
    let created = body
        .get("data")
        .and_then(|data| data.get(&field))
        .and_then(Value::as_object)
        .ok_or_else(|| ServiceError::MalformedResponse(format!("missing data.{}", field)))?;

    let id = created
        .get("id")
        .and_then(Value::as_str)
        .ok_or_else(|| ServiceError::MalformedResponse(format!("data.{}.id is not a string", field)))?
        .to_string();

    let mut data = payload;
    if let Value::Object(fields) = &mut data {
        for (key, value) in created {
            fields.insert(key.clone(), value.clone());
        }
    }

    Ok(CreatedRecord { entity, id, data })
}

#[derive(Debug, Clone)]
pub struct HttpDataService {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpDataService {
    pub fn new(config: &ClientConfig) -> ServiceResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| ServiceError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

fn transport_error(err: reqwest::Error) -> ServiceError {
    if err.is_timeout() {
        ServiceError::Timeout
    } else {
        ServiceError::Transport(err.to_string())
    }
}

#[async_trait]
impl DataService for HttpDataService {
    async fn create(
        &self,
        entity: EntityName,
        payload: Value,
        credential: &Credential,
    ) -> ServiceResult<CreatedRecord> {
        let request = create_request(entity, payload.clone());
        let (header, value) = auth_header(credential);

        let response = self
            .client
            .post(&self.endpoint)
            .header(header, value)
            .json(&request)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ServiceError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| ServiceError::MalformedResponse(e.to_string()))?;

        parse_response(entity, payload, &body)
    }
}
