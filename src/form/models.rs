//! Binds each entity's draft, record and create-payload together

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use super::errors::FormResult;
use crate::schema::{
    Club, ClubDraft, EntityName, Event, EventDraft, EventRegistration, EventRegistrationDraft,
    Garage, GarageDraft, Part, PartDraft, Project, ProjectDraft, ProjectPart, ProjectPartDraft,
    Ride, RideDraft, Validate,
};

/// One entity as seen by a form
pub trait FormModel {
    type Draft: Validate<Record = Self::Record>
        + Clone
        + Default
        + Serialize
        + DeserializeOwned
        + Send
        + Sync
        + std::fmt::Debug;
    type Record: Serialize;

    const ENTITY: EntityName;

    /// Blank form
    fn initial_draft() -> Self::Draft {
        Self::Draft::default()
    }

    /// Create-payload for a validated record
    fn payload(record: &Self::Record) -> serde_json::Result<Value> {
        serde_json::to_value(record)
    }
}

/// Forms that never upload images yet send an empty list regardless of draft
fn without_images(mut payload: Value) -> Value {
    if let Value::Object(fields) = &mut payload {
        fields.insert("images".to_string(), Value::Array(Vec::new()));
    }
    payload
}

#[derive(Debug, Clone, Copy)]
pub struct GarageForm;

impl FormModel for GarageForm {
    type Draft = GarageDraft;
    type Record = Garage;
    const ENTITY: EntityName = EntityName::Garage;
}

#[derive(Debug, Clone, Copy)]
pub struct ClubForm;

impl FormModel for ClubForm {
    type Draft = ClubDraft;
    type Record = Club;
    const ENTITY: EntityName = EntityName::Club;
}

#[derive(Debug, Clone, Copy)]
pub struct ProjectForm;

impl FormModel for ProjectForm {
    type Draft = ProjectDraft;
    type Record = Project;
    const ENTITY: EntityName = EntityName::Project;

    fn payload(record: &Project) -> serde_json::Result<Value> {
        serde_json::to_value(record).map(without_images)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct PartForm;

impl FormModel for PartForm {
    type Draft = PartDraft;
    type Record = Part;
    const ENTITY: EntityName = EntityName::Part;

    fn payload(record: &Part) -> serde_json::Result<Value> {
        serde_json::to_value(record).map(without_images)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ProjectPartForm;

impl FormModel for ProjectPartForm {
    type Draft = ProjectPartDraft;
    type Record = ProjectPart;
    const ENTITY: EntityName = EntityName::ProjectPart;
}

#[derive(Debug, Clone, Copy)]
pub struct EventForm;

impl FormModel for EventForm {
    type Draft = EventDraft;
    type Record = Event;
    const ENTITY: EntityName = EntityName::Event;
}

#[derive(Debug, Clone, Copy)]
pub struct RideForm;

impl FormModel for RideForm {
    type Draft = RideDraft;
    type Record = Ride;
    const ENTITY: EntityName = EntityName::Ride;
}

#[derive(Debug, Clone, Copy)]
pub struct EventRegistrationForm;

impl FormModel for EventRegistrationForm {
    type Draft = EventRegistrationDraft;
    type Record = EventRegistration;
    const ENTITY: EntityName = EntityName::EventRegistration;
}

/// Validates a draft and maps it to its create-payload
pub fn build_payload<M: FormModel>(draft: &M::Draft) -> FormResult<Value> {
    let record = draft.validate()?;
    Ok(M::payload(&record)?)
}

/// Work that needs the concrete form type behind an [`EntityName`]
pub trait FormVisitor {
    type Output;

    fn visit<M: FormModel>(self) -> Self::Output;
}

/// Runs `visitor` with the form type for `entity`
pub fn dispatch<V: FormVisitor>(entity: EntityName, visitor: V) -> V::Output {
    match entity {
        EntityName::Garage => visitor.visit::<GarageForm>(),
        EntityName::Club => visitor.visit::<ClubForm>(),
        EntityName::Project => visitor.visit::<ProjectForm>(),
        EntityName::Part => visitor.visit::<PartForm>(),
        EntityName::ProjectPart => visitor.visit::<ProjectPartForm>(),
        EntityName::Event => visitor.visit::<EventForm>(),
        EntityName::Ride => visitor.visit::<RideForm>(),
        EntityName::EventRegistration => visitor.visit::<EventRegistrationForm>(),
    }
}
