//! Entity forms
//!
//! One [`FormController`] per entity instance being created. Controllers
//! never share state; closing one discards its draft.
//!
//! # Usage
//!
//! ```ignore
//! use garagenet::form::{fields::garage, FormController, GarageForm};
//!
//! let mut form = FormController::<GarageForm>::new();
//! form.draft_mut().name = "Combat Customs".into();
//! form.toggle(&garage::SPECIALTIES, "Choppers")?;
//! let outcome = form.submit(&client).await;
//! ```

mod controller;
mod errors;
pub mod fields;
mod models;

pub use controller::{FormController, Notice, NoticeKind, SubmitOutcome};
pub use errors::{FormError, FormResult};
pub use fields::{ListField, SetField, AMENITY_OPTIONS, SPECIALTY_OPTIONS};
pub use models::{
    build_payload, dispatch, ClubForm, EventForm, EventRegistrationForm, FormModel, FormVisitor,
    GarageForm, PartForm, ProjectForm, ProjectPartForm, RideForm,
};
