//! Entity validation
//!
//! Validation semantics:
//! - Every field is checked; errors accumulate across fields
//! - Each field reports only the first rule it breaks
//! - Optional email and URL fields treat blank text as "not provided"
//! - Enumerations are parsed into closed enums; unknown text is an error
//! - Numeric input distinguishes "not a number" from "out of range"
//!
//! Validation is pure: it never mutates the draft and a draft validates
//! the same way every time.

use super::draft::{
    AddressDraft, ClubDraft, ContactDraft, EventDraft, EventRegistrationDraft, GarageDraft,
    LocationDraft, PartDraft, ProjectDraft, ProjectPartDraft, RideDraft,
};
use super::entities::{
    Address, Club, Contact, Event, EventRegistration, Garage, Location, Part, Project, ProjectPart,
    Ride,
};
use super::enums::{
    ContactPreference, DifficultyLevel, EventType, LocationType, PartCategory, PartCondition,
    Priority, ProjectStatus, RegistrationStatus,
};
use super::errors::{RuleKind, ValidationErrors};
use super::path::FieldPath;
use super::rules::{self, NumberRule};

const INVALID_WEBSITE: &str = "Invalid website URL";

pub const LATITUDE: NumberRule = NumberRule::between("Latitude", -90.0, 90.0);
pub const LONGITUDE: NumberRule = NumberRule::between("Longitude", -180.0, 180.0);
pub const PROGRESS: NumberRule = NumberRule::between("Progress", 0.0, 100.0);
pub const MAX_PARTICIPANTS: NumberRule = NumberRule::positive("Maximum participants");
pub const CURRENT_PARTICIPANTS: NumberRule = NumberRule::non_negative("Current participants");
pub const DISTANCE: NumberRule = NumberRule::positive("Distance");
pub const ESTIMATED_DURATION: NumberRule = NumberRule::positive("Estimated duration");

/// Turns a draft into its validated record.
pub trait Validate {
    type Record;

    /// Checks the draft at `at`, recording errors under that prefix.
    ///
    /// Returns a record only if no error was recorded for this draft.
    fn check(&self, errors: &mut ValidationErrors, at: &FieldPath) -> Option<Self::Record>;

    /// Validates the whole draft
    fn validate(&self) -> Result<Self::Record, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        match self.check(&mut errors, &FieldPath::root()) {
            Some(record) if errors.is_empty() => Ok(record),
            _ => Err(errors),
        }
    }
}

/// Returns `record` only if `errors` grew by nothing since `before`
fn clean<T>(errors: &ValidationErrors, before: usize, record: T) -> Option<T> {
    (errors.len() == before).then_some(record)
}

/// Optional embedded address: a blank address is absent
fn optional_address(
    errors: &mut ValidationErrors,
    at: FieldPath,
    draft: Option<&AddressDraft>,
) -> Option<Address> {
    match draft {
        Some(address) if !address.is_blank() => address.check(errors, &at),
        _ => None,
    }
}

fn contact_list(errors: &mut ValidationErrors, at: FieldPath, contacts: &[ContactDraft]) -> Vec<Contact> {
    rules::min_items(errors, at.clone(), contacts, 1, "At least one contact is required");
    contacts
        .iter()
        .enumerate()
        .filter_map(|(i, contact)| contact.check(errors, &at.index(i)))
        .collect()
}

impl Validate for LocationDraft {
    type Record = Location;

    fn check(&self, errors: &mut ValidationErrors, at: &FieldPath) -> Option<Location> {
        let before = errors.len();
        let name = rules::required_text(errors, at.field("name"), &self.name, "Location name is required");
        let location_type: Option<LocationType> =
            rules::required_enum(errors, at.field("type"), &self.location_type, "Location type is required");
        let lat = rules::required_number(errors, at.field("lat"), &self.lat, LATITUDE);
        let long = rules::required_number(errors, at.field("long"), &self.long, LONGITUDE);

        let (Some(location_type), Some(lat), Some(long)) = (location_type, lat, long) else {
            return None;
        };
        clean(
            errors,
            before,
            Location {
                name,
                title: rules::optional_text(&self.title),
                description: rules::optional_text(&self.description),
                location_type,
                stop: self.stop,
                lat,
                long,
            },
        )
    }
}

impl Validate for AddressDraft {
    type Record = Address;

    fn check(&self, errors: &mut ValidationErrors, at: &FieldPath) -> Option<Address> {
        let before = errors.len();
        let street = rules::required_text(errors, at.field("street"), &self.street, "Street address is required");
        let city = rules::required_text(errors, at.field("city"), &self.city, "City is required");
        let state = rules::exact_chars(
            errors,
            at.field("state"),
            &self.state,
            2,
            "State is required",
            "State must be 2 characters",
        );
        let zip = rules::min_chars(
            errors,
            at.field("zip"),
            &self.zip,
            5,
            "ZIP code is required",
            "ZIP code must be at least 5 characters",
        );
        let location = self
            .location
            .as_ref()
            .and_then(|location| location.check(errors, &at.field("location")));

        clean(
            errors,
            before,
            Address {
                street,
                city,
                state,
                zip,
                country: rules::optional_text(&self.country).unwrap_or_else(|| "USA".to_string()),
                location,
            },
        )
    }
}

impl Validate for ContactDraft {
    type Record = Contact;

    fn check(&self, errors: &mut ValidationErrors, at: &FieldPath) -> Option<Contact> {
        let before = errors.len();
        let name = rules::required_text(errors, at.field("name"), &self.name, "Contact name is required");
        let email = rules::optional_email(errors, at.field("email"), &self.email, "Invalid email address");
        // Phone stays mandatory even when an email is given.
        let phone = rules::min_chars(
            errors,
            at.field("phone"),
            &self.phone,
            10,
            "Phone number is required",
            "Phone number must be at least 10 digits",
        );
        let website = rules::optional_url(errors, at.field("website"), &self.website, INVALID_WEBSITE);
        let preference: ContactPreference = rules::enum_or_default(errors, at.field("preference"), &self.preference);

        clean(
            errors,
            before,
            Contact {
                name,
                title: rules::optional_text(&self.title),
                email,
                phone,
                website,
                preference,
            },
        )
    }
}

impl Validate for GarageDraft {
    type Record = Garage;

    fn check(&self, errors: &mut ValidationErrors, at: &FieldPath) -> Option<Garage> {
        let before = errors.len();
        let name = rules::required_text(errors, at.field("name"), &self.name, "Garage name is required");
        let website = rules::optional_url(errors, at.field("website"), &self.website, INVALID_WEBSITE);
        let address = self.address.check(errors, &at.field("address"));
        let contacts = contact_list(errors, at.field("contacts"), &self.contacts);

        let address = address?;
        clean(
            errors,
            before,
            Garage {
                name,
                description: rules::optional_text(&self.description),
                hours_of_operation: rules::optional_text(&self.hours_of_operation),
                specialties: rules::string_list(&self.specialties),
                amenities: rules::string_list(&self.amenities),
                is_active: self.is_active,
                website,
                images: rules::string_list(&self.images),
                address,
                contacts,
            },
        )
    }
}

impl Validate for ClubDraft {
    type Record = Club;

    fn check(&self, errors: &mut ValidationErrors, at: &FieldPath) -> Option<Club> {
        let before = errors.len();
        let name = rules::required_text(errors, at.field("name"), &self.name, "Club name is required");
        let website = rules::optional_url(errors, at.field("website"), &self.website, INVALID_WEBSITE);
        let description =
            rules::required_text(errors, at.field("description"), &self.description, "Description is required");
        let address = optional_address(errors, at.field("address"), self.address.as_ref());
        let contacts = contact_list(errors, at.field("contacts"), &self.contacts);

        clean(
            errors,
            before,
            Club {
                name,
                website,
                description,
                is_active: self.is_active,
                images: rules::string_list(&self.images),
                address,
                contacts,
            },
        )
    }
}

impl Validate for ProjectDraft {
    type Record = Project;

    fn check(&self, errors: &mut ValidationErrors, at: &FieldPath) -> Option<Project> {
        let before = errors.len();
        let title = rules::required_text(errors, at.field("title"), &self.title, "Project title is required");
        let veteran_id = rules::required_text(errors, at.field("veteranId"), &self.veteran_id, "Veteran ID is required");
        let veteran_name =
            rules::required_text(errors, at.field("veteranName"), &self.veteran_name, "Veteran name is required");
        let status: ProjectStatus = rules::enum_or_default(errors, at.field("status"), &self.status);
        let progress = rules::optional_number(errors, at.field("progressPercentage"), &self.progress_percentage, PROGRESS)
            .unwrap_or(0.0);

        clean(
            errors,
            before,
            Project {
                title,
                description: rules::optional_text(&self.description),
                veteran_id,
                veteran_name,
                status,
                progress_percentage: progress,
                start_date: rules::optional_text(&self.start_date),
                target_completion_date: rules::optional_text(&self.target_completion_date),
                actual_completion_date: rules::optional_text(&self.actual_completion_date),
                garage_id: rules::optional_text(&self.garage_id),
                images: rules::string_list(&self.images),
            },
        )
    }
}

impl Validate for PartDraft {
    type Record = Part;

    fn check(&self, errors: &mut ValidationErrors, at: &FieldPath) -> Option<Part> {
        let before = errors.len();
        let name = rules::required_text(errors, at.field("name"), &self.name, "Part name is required");
        let category: Option<PartCategory> =
            rules::required_enum(errors, at.field("category"), &self.category, "Category is required");
        let condition: Option<PartCondition> =
            rules::required_enum(errors, at.field("condition"), &self.condition, "Condition is required");
        let cost = rules::required_text(errors, at.field("cost"), &self.cost, "Cost information is required");
        // Inventory always belongs to a garage.
        let garage_id =
            rules::required_text(errors, at.field("garageId"), &self.garage_id, "Garage selection is required");

        let (Some(category), Some(condition)) = (category, condition) else {
            return None;
        };
        clean(
            errors,
            before,
            Part {
                name,
                part_number: rules::optional_text(&self.part_number),
                category,
                condition,
                fits_models: rules::string_list(&self.fits_models),
                description: rules::optional_text(&self.description),
                images: rules::string_list(&self.images),
                cost,
                is_available: self.is_available,
                garage_id,
            },
        )
    }
}

impl Validate for ProjectPartDraft {
    type Record = ProjectPart;

    fn check(&self, errors: &mut ValidationErrors, at: &FieldPath) -> Option<ProjectPart> {
        let before = errors.len();
        let project_id =
            rules::required_text(errors, at.field("projectId"), &self.project_id, "Project selection is required");
        let part_name = rules::required_text(errors, at.field("partName"), &self.part_name, "Part name is required");
        let priority: Priority = rules::enum_or_default(errors, at.field("priority"), &self.priority);

        clean(
            errors,
            before,
            ProjectPart {
                project_id,
                part_id: rules::optional_text(&self.part_id),
                part_name,
                is_obtained: self.is_obtained,
                notes: rules::optional_text(&self.notes),
                priority,
            },
        )
    }
}

impl Validate for EventDraft {
    type Record = Event;

    fn check(&self, errors: &mut ValidationErrors, at: &FieldPath) -> Option<Event> {
        let before = errors.len();
        let title = rules::required_text(errors, at.field("title"), &self.title, "Event title is required");
        let website = rules::optional_url(errors, at.field("website"), &self.website, INVALID_WEBSITE);
        let event_type: Option<EventType> =
            rules::required_enum(errors, at.field("eventType"), &self.event_type, "Event type is required");
        let start_date_time = rules::required_text(
            errors,
            at.field("startDateTime"),
            &self.start_date_time,
            "Start date and time is required",
        );
        let max_participants =
            rules::optional_count(errors, at.field("maxParticipants"), &self.max_participants, MAX_PARTICIPANTS);
        let current_participants = rules::optional_count(
            errors,
            at.field("currentParticipants"),
            &self.current_participants,
            CURRENT_PARTICIPANTS,
        )
        .unwrap_or(0);
        let address = optional_address(errors, at.field("address"), self.address.as_ref());

        let event_type = event_type?;
        clean(
            errors,
            before,
            Event {
                title,
                description: rules::optional_text(&self.description),
                website,
                event_type,
                start_date_time,
                end_date_time: rules::optional_text(&self.end_date_time),
                registration_time: rules::optional_text(&self.registration_time),
                ksu_time: rules::optional_text(&self.ksu_time),
                max_participants,
                current_participants,
                registration_required: self.registration_required,
                host_club_id: rules::optional_text(&self.host_club_id),
                address,
            },
        )
    }
}

impl Validate for RideDraft {
    type Record = Ride;

    fn check(&self, errors: &mut ValidationErrors, at: &FieldPath) -> Option<Ride> {
        let before = errors.len();
        let start = optional_address(errors, at.field("start"), self.start.as_ref());
        let end = optional_address(errors, at.field("end"), self.end.as_ref());
        let points_at = at.field("points");
        let points: Vec<Location> = self
            .points
            .iter()
            .enumerate()
            .filter_map(|(i, point)| point.check(errors, &points_at.index(i)))
            .collect();
        let distance = rules::optional_number(errors, at.field("distance"), &self.distance, DISTANCE);
        let estimated_duration = rules::optional_number(
            errors,
            at.field("estimatedDuration"),
            &self.estimated_duration,
            ESTIMATED_DURATION,
        );
        let difficulty_level: DifficultyLevel =
            rules::enum_or_default(errors, at.field("difficultyLevel"), &self.difficulty_level);
        let created_by = rules::required_text(errors, at.field("createdBy"), &self.created_by, "Creator ID is required");

        clean(
            errors,
            before,
            Ride {
                name: rules::optional_text(&self.name),
                description: rules::optional_text(&self.description),
                start,
                end,
                points,
                distance,
                estimated_duration,
                difficulty_level,
                route_data: self.route_data.clone().filter(|data| !data.is_null()),
                created_by,
                is_public: self.is_public,
                event_id: rules::optional_text(&self.event_id),
            },
        )
    }
}

impl Validate for EventRegistrationDraft {
    type Record = EventRegistration;

    fn check(&self, errors: &mut ValidationErrors, at: &FieldPath) -> Option<EventRegistration> {
        let before = errors.len();
        let event_id = rules::required_text(errors, at.field("eventId"), &self.event_id, "Event selection is required");
        let user_id = rules::required_text(errors, at.field("userId"), &self.user_id, "User ID is required");
        let user_name = rules::required_text(errors, at.field("userName"), &self.user_name, "User name is required");
        let status: RegistrationStatus = rules::enum_or_default(errors, at.field("status"), &self.status);

        clean(
            errors,
            before,
            EventRegistration {
                event_id,
                user_id,
                user_name,
                registration_date: rules::optional_text(&self.registration_date),
                status,
                notes: rules::optional_text(&self.notes),
            },
        )
    }
}

/// Returns true if the error at `dotted` came from the given rule
pub fn failed_with(errors: &ValidationErrors, dotted: &str, kind: RuleKind) -> bool {
    errors.get_dotted(dotted).map_or(false, |e| e.kind == kind)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::number::NumberInput;

    fn valid_address() -> AddressDraft {
        AddressDraft {
            street: "1 Main St".into(),
            city: "Kingston".into(),
            state: "NY".into(),
            zip: "12401".into(),
            country: "USA".into(),
            location: None,
        }
    }

    fn valid_contact() -> ContactDraft {
        ContactDraft {
            name: "J Smith".into(),
            phone: "5551234567".into(),
            preference: "ANY".into(),
            ..ContactDraft::default()
        }
    }

    #[test]
    fn test_address_rules() {
        let mut address = valid_address();
        assert!(address.validate().is_ok());

        address.state = "New York".into();
        address.zip = "124".into();
        let errors = address.validate().unwrap_err();
        assert_eq!(errors.message("state"), Some("State must be 2 characters"));
        assert_eq!(errors.message("zip"), Some("ZIP code must be at least 5 characters"));
    }

    #[test]
    fn test_blank_country_defaults_to_usa() {
        let mut address = valid_address();
        address.country = String::new();
        assert_eq!(address.validate().unwrap().country, "USA");
    }

    #[test]
    fn test_nested_location_paths() {
        let mut address = valid_address();
        address.location = Some(LocationDraft {
            name: "Shop".into(),
            lat: NumberInput::from(95.0),
            long: NumberInput::from(-74.0),
            ..LocationDraft::default()
        });
        let errors = address.validate().unwrap_err();
        assert!(failed_with(&errors, "location.lat", RuleKind::OutOfRange));
    }

    #[test]
    fn test_contact_email_is_optional_but_checked() {
        let mut contact = valid_contact();
        assert_eq!(contact.validate().unwrap().email, None);

        contact.email = "nope".into();
        let errors = contact.validate().unwrap_err();
        assert_eq!(errors.message("email"), Some("Invalid email address"));
    }

    #[test]
    fn test_contact_phone_length() {
        let mut contact = valid_contact();
        contact.phone = "555-1234".into();
        let errors = contact.validate().unwrap_err();
        assert!(failed_with(&errors, "phone", RuleKind::TooShort));
    }

    #[test]
    fn test_blank_preference_is_any() {
        let mut contact = valid_contact();
        contact.preference = String::new();
        assert_eq!(contact.validate().unwrap().preference, ContactPreference::Any);
        contact.preference = "EAMIL".into();
        assert!(contact.validate().is_err());
    }

    #[test]
    fn test_garage_collects_nested_errors() {
        let garage = GarageDraft {
            name: "Combat Customs".into(),
            address: AddressDraft {
                state: "N".into(),
                ..valid_address()
            },
            contacts: vec![valid_contact(), ContactDraft::default()],
            ..GarageDraft::default()
        };
        let errors = garage.validate().unwrap_err();
        assert!(errors.contains("address.state"));
        assert!(errors.contains("contacts.1.name"));
        assert!(errors.contains("contacts.1.phone"));
        assert!(!errors.contains("contacts.0.name"));
    }

    #[test]
    fn test_club_blank_address_is_absent() {
        let club = ClubDraft {
            name: "Iron Vets MC".into(),
            description: "Riding club".into(),
            contacts: vec![valid_contact()],
            ..ClubDraft::default()
        };
        let record = club.validate().unwrap();
        assert_eq!(record.address, None);
    }

    #[test]
    fn test_club_partial_address_is_checked() {
        let club = ClubDraft {
            name: "Iron Vets MC".into(),
            description: "Riding club".into(),
            contacts: vec![valid_contact()],
            address: Some(AddressDraft {
                city: "Kingston".into(),
                ..AddressDraft::default()
            }),
            ..ClubDraft::default()
        };
        let errors = club.validate().unwrap_err();
        assert!(errors.contains("address.street"));
        assert!(!errors.contains("address.city"));
    }

    #[test]
    fn test_project_progress_bounds() {
        let mut project = ProjectDraft {
            title: "Panhead rebuild".into(),
            veteran_id: "vet-1".into(),
            veteran_name: "Sam".into(),
            ..ProjectDraft::default()
        };
        assert_eq!(project.validate().unwrap().progress_percentage, 0.0);

        project.progress_percentage = NumberInput::from(100.0);
        assert!(project.validate().is_ok());

        project.progress_percentage = NumberInput::from(101.0);
        let errors = project.validate().unwrap_err();
        assert!(failed_with(&errors, "progressPercentage", RuleKind::OutOfRange));

        project.progress_percentage = NumberInput::from("half");
        let errors = project.validate().unwrap_err();
        assert!(failed_with(&errors, "progressPercentage", RuleKind::NotANumber));
    }

    #[test]
    fn test_event_participant_counts() {
        let mut event = EventDraft {
            title: "Spring Run".into(),
            event_type: "RIDE".into(),
            start_date_time: "2025-05-01T09:00".into(),
            ..EventDraft::default()
        };
        let record = event.validate().unwrap();
        assert_eq!(record.max_participants, None);
        assert_eq!(record.current_participants, 0);
        assert_eq!(record.address, None);

        event.max_participants = NumberInput::from(0.0);
        let errors = event.validate().unwrap_err();
        assert_eq!(errors.message("maxParticipants"), Some("Maximum participants must be positive"));

        event.max_participants = NumberInput::from(25.0);
        assert_eq!(event.validate().unwrap().max_participants, Some(25));
    }

    #[test]
    fn test_event_host_club_blank_is_absent() {
        let event = EventDraft {
            title: "Meetup".into(),
            event_type: "MEETING".into(),
            start_date_time: "2025-05-01T09:00".into(),
            host_club_id: String::new(),
            ..EventDraft::default()
        };
        assert_eq!(event.validate().unwrap().host_club_id, None);
    }

    #[test]
    fn test_ride_rules() {
        let mut ride = RideDraft {
            created_by: "user-1".into(),
            ..RideDraft::default()
        };
        let record = ride.validate().unwrap();
        assert_eq!(record.difficulty_level, DifficultyLevel::Beginner);
        assert!(record.is_public);

        ride.distance = NumberInput::from(-3.0);
        ride.points = vec![LocationDraft::default()];
        let errors = ride.validate().unwrap_err();
        assert!(failed_with(&errors, "distance", RuleKind::OutOfRange));
        assert!(failed_with(&errors, "points.0.lat", RuleKind::Required));
        assert!(errors.contains("points.0.name"));
    }

    #[test]
    fn test_project_part_without_inventory_part() {
        let draft = ProjectPartDraft {
            project_id: "project-1".into(),
            part_name: "Clutch cable".into(),
            ..ProjectPartDraft::default()
        };
        let record = draft.validate().unwrap();
        assert_eq!(record.part_id, None);
        assert_eq!(record.priority, Priority::Medium);
        assert!(!record.is_obtained);
    }

    #[test]
    fn test_event_registration_defaults() {
        let draft = EventRegistrationDraft {
            event_id: "event-1".into(),
            user_id: "user-1".into(),
            user_name: "Alex".into(),
            ..EventRegistrationDraft::default()
        };
        assert_eq!(draft.validate().unwrap().status, RegistrationStatus::Registered);

        let errors = EventRegistrationDraft::default().validate().unwrap_err();
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn test_validation_is_deterministic() {
        let draft = PartDraft::default();
        let first = draft.validate().unwrap_err();
        for _ in 0..10 {
            assert_eq!(draft.validate().unwrap_err(), first);
        }
    }
}
