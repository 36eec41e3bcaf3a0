//! Validated records
//!
//! A record only exists once its draft has passed validation, so every
//! enumeration is a closed Rust enum and every absent optional is `None`.
//! Serializing a record produces the create-payload field shape: camelCase
//! keys, absent optionals omitted, lists always present.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::enums::{
    ContactPreference, DifficultyLevel, EventType, LocationType, PartCategory, PartCondition,
    Priority, ProjectStatus, RegistrationStatus,
};

/// Persisted entity kinds known to the managed data service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EntityName {
    Garage,
    Club,
    Project,
    Part,
    ProjectPart,
    Event,
    Ride,
    EventRegistration,
}

impl EntityName {
    pub const ALL: &'static [EntityName] = &[
        EntityName::Garage,
        EntityName::Club,
        EntityName::Project,
        EntityName::Part,
        EntityName::ProjectPart,
        EntityName::Event,
        EntityName::Ride,
        EntityName::EventRegistration,
    ];

    /// Model name as the data service knows it
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityName::Garage => "Garage",
            EntityName::Club => "Club",
            EntityName::Project => "Project",
            EntityName::Part => "Part",
            EntityName::ProjectPart => "ProjectPart",
            EntityName::Event => "Event",
            EntityName::Ride => "Ride",
            EntityName::EventRegistration => "EventRegistration",
        }
    }

    /// Lower-case name for user-facing notices ("project part")
    pub fn display_name(&self) -> &'static str {
        match self {
            EntityName::Garage => "garage",
            EntityName::Club => "club",
            EntityName::Project => "project",
            EntityName::Part => "part",
            EntityName::ProjectPart => "project part",
            EntityName::Event => "event",
            EntityName::Ride => "ride",
            EntityName::EventRegistration => "event registration",
        }
    }
}

impl fmt::Display for EntityName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Accepts `ProjectPart`, `project-part`, `project_part` and `projectpart`
impl FromStr for EntityName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted: String = s
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .flat_map(char::to_lowercase)
            .collect();
        EntityName::ALL
            .iter()
            .copied()
            .find(|e| e.as_str().to_lowercase() == wanted)
            .ok_or_else(|| format!("unknown entity '{}'", s))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub location_type: LocationType,
    pub stop: bool,
    pub lat: f64,
    pub long: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub country: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    pub preference: ContactPreference,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Garage {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hours_of_operation: Option<String>,
    pub specialties: Vec<String>,
    pub amenities: Vec<String>,
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    pub images: Vec<String>,
    pub address: Address,
    pub contacts: Vec<Contact>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Club {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    pub description: String,
    pub is_active: bool,
    pub images: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
    pub contacts: Vec<Contact>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub veteran_id: String,
    pub veteran_name: String,
    pub status: ProjectStatus,
    pub progress_percentage: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_completion_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_completion_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub garage_id: Option<String>,
    pub images: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub part_number: Option<String>,
    pub category: PartCategory,
    pub condition: PartCondition,
    pub fits_models: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub images: Vec<String>,
    pub cost: String,
    pub is_available: bool,
    pub garage_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectPart {
    pub project_id: String,
    /// Absent until the part is in some garage's inventory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub part_id: Option<String>,
    pub part_name: String,
    pub is_obtained: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub priority: Priority,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    pub event_type: EventType,
    pub start_date_time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registration_time: Option<String>,
    /// Kickstands-up time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ksu_time: Option<String>,
    /// `None` means unlimited
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_participants: Option<u32>,
    pub current_participants: u32,
    pub registration_required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host_club_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ride {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<Address>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<Address>,
    pub points: Vec<Location>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
    /// Minutes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_duration: Option<f64>,
    pub difficulty_level: DifficultyLevel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route_data: Option<serde_json::Value>,
    pub created_by: String,
    pub is_public: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRegistration {
    pub event_id: String,
    pub user_id: String,
    pub user_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registration_date: Option<String>,
    pub status: RegistrationStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_name_parsing() {
        assert_eq!("Garage".parse::<EntityName>(), Ok(EntityName::Garage));
        assert_eq!("project-part".parse::<EntityName>(), Ok(EntityName::ProjectPart));
        assert_eq!("event_registration".parse::<EntityName>(), Ok(EntityName::EventRegistration));
        assert!("todo".parse::<EntityName>().is_err());
    }

    #[test]
    fn test_absent_optionals_are_omitted() {
        let part = Part {
            name: "Carburetor".into(),
            part_number: None,
            category: PartCategory::Engine,
            condition: PartCondition::New,
            fits_models: vec![],
            description: None,
            images: vec![],
            cost: "$150".into(),
            is_available: true,
            garage_id: "garage123".into(),
        };
        let json = serde_json::to_value(&part).unwrap();
        assert!(json.get("partNumber").is_none());
        assert_eq!(json["fitsModels"], serde_json::json!([]));
        assert_eq!(json["category"], "ENGINE");
        assert_eq!(json["garageId"], "garage123");
    }
}
