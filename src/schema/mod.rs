//! Directory schema and validation
//!
//! Two shapes exist for every entity:
//!
//! - a draft: lenient form state, free text and raw numeric input
//! - a record: the validated, typed value that is sent to the data service
//!
//! Validation is the only way from one to the other.
//!
//! # Rules
//!
//! - All fields are checked; errors accumulate
//! - One error per field, the first rule it breaks
//! - Blank optional text is absent, never an empty string
//! - Closed enumerations reject unknown text
//! - Validation is pure and deterministic

mod draft;
mod entities;
mod enums;
mod errors;
mod model;
mod number;
mod path;
mod rules;
mod validator;

pub use draft::{
    AddressDraft, ClubDraft, ContactDraft, EventDraft, EventRegistrationDraft, GarageDraft,
    LocationDraft, PartDraft, ProjectDraft, ProjectPartDraft, RideDraft,
};
pub use entities::{
    Address, Club, Contact, EntityName, Event, EventRegistration, Garage, Location, Part, Project,
    ProjectPart, Ride,
};
pub use enums::{
    ContactPreference, DifficultyLevel, EventType, LocationType, PartCategory, PartCondition,
    Priority, ProjectStatus, RegistrationStatus, UnknownVariant,
};
pub use errors::{FieldError, RuleKind, ValidationErrors};
pub use model::{
    catalog, check_catalog, find, AuthProvider, AuthRule, FieldDef, FieldType, ModelDef,
    ModelKind, Operation, Relation, RelationKind,
};
pub use number::{NotANumber, NumberInput};
pub use path::{FieldPath, PathSegment};
pub use rules::{is_email, is_web_url, NumberRule};
pub use validator::{
    failed_with, Validate, CURRENT_PARTICIPANTS, DISTANCE, ESTIMATED_DURATION, LATITUDE,
    LONGITUDE, MAX_PARTICIPANTS, PROGRESS,
};
