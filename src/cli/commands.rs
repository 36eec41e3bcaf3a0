//! CLI command implementations
//!
//! Every command produces one JSON value. `run_command` wraps it in the
//! `{"status": "ok", "data": ...}` envelope, or writes the error envelope
//! and returns the error.

use serde_json::{json, Value};
use std::path::Path;
use std::sync::Arc;
use tokio::runtime::Runtime;
use tracing::info;

use super::args::Command;
use super::errors::{CliError, CliResult};
use super::io::{read_request, write_error, write_response};
use crate::client::{DataClient, HttpDataService, Identity, IdentityProvider, NoSession, SessionStore};
use crate::config::ClientConfig;
use crate::form::{build_payload, dispatch, FormController, FormModel, FormVisitor, SubmitOutcome};
use crate::observability::Event;
use crate::schema::{catalog, check_catalog, find, EntityName, Validate};

/// Parse arguments and run the selected command
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    let result = match cmd {
        Command::Draft { entity } => draft(entity),
        Command::Validate { entity } => read_request().and_then(|input| validate(entity, input)),
        Command::Payload { entity } => read_request().and_then(|input| payload(entity, input)),
        Command::Submit { entity, config, token } => {
            read_request().and_then(|input| submit(entity, &config, token, input))
        }
        Command::Schema { model } => schema(model.as_deref()),
    };

    match result {
        Ok(data) => write_response(data),
        Err(err) => {
            write_error(&err)?;
            Err(err)
        }
    }
}

fn parse_draft<M: FormModel>(input: Value) -> CliResult<M::Draft> {
    serde_json::from_value(input).map_err(|e| CliError::invalid_input(format!("Not a {} draft: {}", M::ENTITY, e)))
}

struct BlankDraft;

impl FormVisitor for BlankDraft {
    type Output = CliResult<Value>;

    fn visit<M: FormModel>(self) -> CliResult<Value> {
        Ok(serde_json::to_value(M::initial_draft())?)
    }
}

struct ValidateDraft(Value);

impl FormVisitor for ValidateDraft {
    type Output = CliResult<Value>;

    fn visit<M: FormModel>(self) -> CliResult<Value> {
        let draft = parse_draft::<M>(self.0)?;
        let record = draft.validate().map_err(|errors| CliError::validation_failed(&errors))?;
        Ok(serde_json::to_value(record)?)
    }
}

struct PayloadOf(Value);

impl FormVisitor for PayloadOf {
    type Output = CliResult<Value>;

    fn visit<M: FormModel>(self) -> CliResult<Value> {
        let draft = parse_draft::<M>(self.0)?;
        Ok(build_payload::<M>(&draft)?)
    }
}

struct SubmitDraft<'a> {
    input: Value,
    client: &'a DataClient,
    runtime: &'a Runtime,
}

impl FormVisitor for SubmitDraft<'_> {
    type Output = CliResult<Value>;

    fn visit<M: FormModel>(self) -> CliResult<Value> {
        let mut form = FormController::<M>::new();
        form.set_draft(parse_draft::<M>(self.input)?);

        let outcome = self.runtime.block_on(form.submit(self.client));
        let notice = form.notice().map(|n| n.message.clone()).unwrap_or_default();
        match outcome {
            SubmitOutcome::Created(record) => Ok(json!({ "notice": notice, "record": record })),
            SubmitOutcome::Invalid(errors) => Err(CliError::validation_failed(&errors)),
            SubmitOutcome::Failed(err) => Err(CliError::service_failed(notice, &err)),
        }
    }
}

/// Blank form for an entity
pub fn draft(entity: EntityName) -> CliResult<Value> {
    dispatch(entity, BlankDraft)
}

/// Validated record for a draft
pub fn validate(entity: EntityName, input: Value) -> CliResult<Value> {
    dispatch(entity, ValidateDraft(input))
}

/// Create-payload for a draft
pub fn payload(entity: EntityName, input: Value) -> CliResult<Value> {
    dispatch(entity, PayloadOf(input))
}

/// Client for a config file and optional user token
pub fn connect(config: &ClientConfig, token: Option<String>) -> CliResult<DataClient> {
    let service = HttpDataService::new(config)?;
    let identity: Arc<dyn IdentityProvider> = match token {
        Some(token) => Arc::new(SessionStore::signed_in(Identity::new("cli", "cli", token))),
        None => Arc::new(NoSession),
    };

    let client = DataClient::new(Arc::new(service), identity);
    Ok(match &config.api_key {
        Some(key) => client.with_api_key(key.clone()),
        None => client,
    })
}

/// Validates a draft and creates it on the configured service
pub fn submit(entity: EntityName, config_path: &Path, token: Option<String>, input: Value) -> CliResult<Value> {
    let config = ClientConfig::load(config_path)?;
    info!(event = %Event::ConfigLoaded, endpoint = %config.endpoint);

    let client = connect(&config, token)?;
    let runtime = Runtime::new()?;
    dispatch(
        entity,
        SubmitDraft {
            input,
            client: &client,
            runtime: &runtime,
        },
    )
}

/// Model catalogue, or one entry of it
pub fn schema(model: Option<&str>) -> CliResult<Value> {
    match model {
        Some(name) => {
            let model = find(name).ok_or_else(|| CliError::unknown_model(name))?;
            Ok(serde_json::to_value(model)?)
        }
        None => {
            let models = catalog();
            let problems = check_catalog(&models).err().unwrap_or_default();
            Ok(json!({ "models": models, "problems": problems }))
        }
    }
}
