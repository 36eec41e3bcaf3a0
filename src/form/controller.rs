//! Entity form controller
//!
//! Owns the draft of exactly one entity instance. Submission validates,
//! maps to a payload, and sends one create request:
//!
//! - invalid draft: errors shown, nothing sent
//! - service failure: draft kept, generic failure notice
//! - success: draft reset to its initial defaults, success notice
//!
//! `submit` takes `&mut self`, so one controller can never have two
//! submissions in flight.

use serde::Serialize;
use tracing::{debug, info, warn};

use super::errors::{FormError, FormResult};
use super::fields::{ListField, SetField};
use super::models::FormModel;
use crate::client::{CreatedRecord, DataClient, ServiceError};
use crate::observability::Event;
use crate::schema::{EntityName, FieldPath, Validate, ValidationErrors};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeKind {
    Success,
    Failure,
}

/// Message shown after a submission reached the service
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn created(entity: EntityName) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: format!("{} created successfully!", capitalized(entity.display_name())),
        }
    }

    pub fn failed(entity: EntityName) -> Self {
        Self {
            kind: NoticeKind::Failure,
            message: format!("Error creating {}. Please try again.", entity.display_name()),
        }
    }
}

fn capitalized(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Draft failed validation; no request was made
    Invalid(ValidationErrors),
    /// Service created the record
    Created(CreatedRecord),
    /// Request was made and failed
    Failed(ServiceError),
}

impl SubmitOutcome {
    pub fn is_created(&self) -> bool {
        matches!(self, SubmitOutcome::Created(_))
    }
}

#[derive(Debug)]
pub struct FormController<M: FormModel> {
    draft: M::Draft,
    initial: M::Draft,
    errors: ValidationErrors,
    notice: Option<Notice>,
}

impl<M: FormModel> Default for FormController<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: FormModel> FormController<M> {
    /// Controller starting from the blank form
    pub fn new() -> Self {
        Self::with_defaults(M::initial_draft())
    }

    /// Controller starting from, and resetting to, `defaults`
    pub fn with_defaults(defaults: M::Draft) -> Self {
        Self {
            draft: defaults.clone(),
            initial: defaults,
            errors: ValidationErrors::new(),
            notice: None,
        }
    }

    pub fn entity(&self) -> EntityName {
        M::ENTITY
    }

    pub fn draft(&self) -> &M::Draft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut M::Draft {
        &mut self.draft
    }

    /// Replaces the whole draft, keeping the initial defaults
    pub fn set_draft(&mut self, draft: M::Draft) {
        self.draft = draft;
    }

    /// Errors from the last validation
    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    /// Message for one field, e.g. `contacts.0.phone`
    pub fn field_error(&self, dotted: &str) -> Option<&str> {
        self.errors.message(dotted)
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// Appends `item` and returns the new length
    pub fn add_item<T>(&mut self, field: &ListField<M::Draft, T>, item: T) -> usize {
        let items = field.items(&mut self.draft);
        items.push(item);
        items.len()
    }

    /// Removes the item at `index` unless that would break the list's minimum
    pub fn remove_item<T>(&mut self, field: &ListField<M::Draft, T>, index: usize) -> FormResult<T> {
        let items = field.items(&mut self.draft);
        let len = items.len();
        if index >= len {
            return Err(FormError::IndexOutOfRange {
                field: field.name,
                index,
                len,
            });
        }
        if len <= field.min_items {
            return Err(FormError::MinimumItems {
                field: field.name,
                min: field.min_items,
            });
        }
        let removed = items.remove(index);

        // Indexed errors no longer line up with the items
        self.errors.remove_under(&FieldPath::root().field(field.name));
        Ok(removed)
    }

    /// Adds `value` if absent, removes it if present.
    ///
    /// Returns whether the value is now selected.
    pub fn toggle(&mut self, field: &SetField<M::Draft>, value: &str) -> FormResult<bool> {
        if !field.allows(value) {
            return Err(FormError::UnknownOption {
                field: field.name,
                value: value.to_string(),
            });
        }
        let values = field.values(&mut self.draft);
        match values.iter().position(|v| v == value) {
            Some(at) => {
                values.remove(at);
                Ok(false)
            }
            None => {
                values.push(value.to_string());
                Ok(true)
            }
        }
    }

    /// Validates the draft and keeps the errors for display
    pub fn validate(&mut self) -> Result<M::Record, ValidationErrors> {
        let result = self.draft.validate();
        self.errors = match &result {
            Ok(_) => ValidationErrors::new(),
            Err(errors) => errors.clone(),
        };
        result
    }

    /// Validates, then issues exactly one create request
    pub async fn submit(&mut self, client: &DataClient) -> SubmitOutcome {
        let entity = M::ENTITY;
        self.notice = None;

        let record = match self.validate() {
            Ok(record) => record,
            Err(errors) => {
                debug!(event = %Event::SubmitRejected, entity = %entity, errors = errors.len());
                return SubmitOutcome::Invalid(errors);
            }
        };

        let payload = match M::payload(&record) {
            Ok(payload) => payload,
            Err(err) => return self.fail(ServiceError::from(err)),
        };

        debug!(event = %Event::SubmitBegin, entity = %entity);
        match client.create(entity, payload).await {
            Ok(created) => {
                info!(event = %Event::SubmitComplete, entity = %entity, id = %created.id);
                self.draft = self.initial.clone();
                self.notice = Some(Notice::created(entity));
                SubmitOutcome::Created(created)
            }
            Err(err) => self.fail(err),
        }
    }

    fn fail(&mut self, err: ServiceError) -> SubmitOutcome {
        let entity = M::ENTITY;
        warn!(event = %Event::SubmitFailed, entity = %entity, error = %err);
        self.notice = Some(Notice::failed(entity));
        SubmitOutcome::Failed(err)
    }

    /// Back to the initial defaults; errors and notice cleared
    pub fn reset(&mut self) {
        self.draft = self.initial.clone();
        self.errors.clear();
        self.notice = None;
    }

    /// Closes the form without saving anything
    pub fn discard(self) {
        let entity = M::ENTITY;
        debug!(event = %Event::DraftDiscarded, entity = %entity);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::fields::garage;
    use crate::form::models::{GarageForm, PartForm};
    use crate::schema::{ContactDraft, PartDraft};

    #[test]
    fn test_notices() {
        assert_eq!(Notice::created(EntityName::Garage).message, "Garage created successfully!");
        assert_eq!(
            Notice::failed(EntityName::ProjectPart).message,
            "Error creating project part. Please try again."
        );
    }

    #[test]
    fn test_last_contact_cannot_be_removed() {
        let mut form = FormController::<GarageForm>::new();
        let err = form.remove_item(&garage::CONTACTS, 0).unwrap_err();
        assert_eq!(err, FormError::MinimumItems { field: "contacts", min: 1 });
        assert_eq!(form.draft().contacts.len(), 1);
    }

    #[test]
    fn test_add_then_remove_contact() {
        let mut form = FormController::<GarageForm>::new();
        assert_eq!(form.add_item(&garage::CONTACTS, ContactDraft::default()), 2);
        assert!(form.remove_item(&garage::CONTACTS, 1).is_ok());
        assert!(matches!(
            form.remove_item(&garage::CONTACTS, 5),
            Err(FormError::IndexOutOfRange { index: 5, len: 1, .. })
        ));
    }

    #[test]
    fn test_toggle_twice_restores_set() {
        let mut form = FormController::<GarageForm>::new();
        assert_eq!(form.toggle(&garage::AMENITIES, "Welding"), Ok(true));
        assert_eq!(form.draft().amenities, vec!["Welding"]);
        assert_eq!(form.toggle(&garage::AMENITIES, "Welding"), Ok(false));
        assert!(form.draft().amenities.is_empty());
    }

    #[test]
    fn test_toggle_rejects_unknown_option() {
        let mut form = FormController::<GarageForm>::new();
        assert!(matches!(
            form.toggle(&garage::SPECIALTIES, "Hovercraft"),
            Err(FormError::UnknownOption { .. })
        ));
    }

    #[test]
    fn test_validate_records_errors() {
        let mut form = FormController::<PartForm>::new();
        assert!(form.validate().is_err());
        assert_eq!(form.field_error("name"), Some("Part name is required"));

        form.reset();
        assert!(form.errors().is_empty());
    }

    #[test]
    fn test_reset_restores_initial_defaults() {
        let mut defaults = PartDraft::default();
        defaults.garage_id = "garage123".into();
        let mut form = FormController::<PartForm>::with_defaults(defaults.clone());

        form.draft_mut().name = "Headlight".into();
        form.draft_mut().garage_id = "elsewhere".into();
        form.reset();
        assert_eq!(form.draft(), &defaults);
        assert!(form.notice().is_none());
    }
}
