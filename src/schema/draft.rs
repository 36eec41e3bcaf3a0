//! Draft (form state) shapes
//!
//! Drafts hold exactly what a form holds: free text for every string and
//! enumeration, raw numeric input, nested drafts for embedded types. They
//! never fail to construct or deserialize; turning a draft into a record is
//! the validator's job.
//!
//! `Default` for each draft is the blank form the UI starts from. Missing
//! JSON keys fall back to the same defaults, except repeatable lists, which
//! fall back to empty.

use serde::{Deserialize, Serialize};

use super::number::NumberInput;

fn usa() -> String {
    "USA".to_string()
}

/// Street address, optionally pinned to a map location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AddressDraft {
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub country: String,
    pub location: Option<LocationDraft>,
}

impl Default for AddressDraft {
    fn default() -> Self {
        Self {
            street: String::new(),
            city: String::new(),
            state: String::new(),
            zip: String::new(),
            country: usa(),
            location: None,
        }
    }
}

impl AddressDraft {
    /// True when nothing address-specific has been entered.
    ///
    /// Country is ignored since it is pre-filled.
    pub fn is_blank(&self) -> bool {
        [&self.street, &self.city, &self.state, &self.zip]
            .iter()
            .all(|s| s.trim().is_empty())
            && self.location.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LocationDraft {
    pub name: String,
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub location_type: String,
    pub stop: bool,
    pub lat: NumberInput,
    pub long: NumberInput,
}

impl Default for LocationDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            title: String::new(),
            description: String::new(),
            location_type: "WAYPOINT".to_string(),
            stop: false,
            lat: NumberInput::Empty,
            long: NumberInput::Empty,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ContactDraft {
    pub name: String,
    pub title: String,
    pub email: String,
    pub phone: String,
    pub website: String,
    pub preference: String,
}

impl Default for ContactDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            title: String::new(),
            email: String::new(),
            phone: String::new(),
            website: String::new(),
            preference: "ANY".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GarageDraft {
    pub name: String,
    pub description: String,
    pub hours_of_operation: String,
    #[serde(default)]
    pub specialties: Vec<String>,
    #[serde(default)]
    pub amenities: Vec<String>,
    pub is_active: bool,
    pub website: String,
    #[serde(default)]
    pub images: Vec<String>,
    pub address: AddressDraft,
    #[serde(default)]
    pub contacts: Vec<ContactDraft>,
}

impl Default for GarageDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            hours_of_operation: String::new(),
            specialties: Vec::new(),
            amenities: Vec::new(),
            is_active: true,
            website: String::new(),
            images: Vec::new(),
            address: AddressDraft::default(),
            contacts: vec![ContactDraft::default()],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ClubDraft {
    pub name: String,
    pub website: String,
    pub description: String,
    pub is_active: bool,
    #[serde(default)]
    pub images: Vec<String>,
    pub address: Option<AddressDraft>,
    #[serde(default)]
    pub contacts: Vec<ContactDraft>,
}

impl Default for ClubDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            website: String::new(),
            description: String::new(),
            is_active: true,
            images: Vec::new(),
            address: Some(AddressDraft::default()),
            contacts: vec![ContactDraft::default()],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProjectDraft {
    pub title: String,
    pub description: String,
    pub veteran_id: String,
    pub veteran_name: String,
    pub status: String,
    pub progress_percentage: NumberInput,
    pub start_date: String,
    pub target_completion_date: String,
    pub actual_completion_date: String,
    pub garage_id: String,
    #[serde(default)]
    pub images: Vec<String>,
}

impl Default for ProjectDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            veteran_id: String::new(),
            veteran_name: String::new(),
            status: "PLANNING".to_string(),
            progress_percentage: NumberInput::Number(0.0),
            start_date: String::new(),
            target_completion_date: String::new(),
            actual_completion_date: String::new(),
            garage_id: String::new(),
            images: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PartDraft {
    pub name: String,
    pub part_number: String,
    pub category: String,
    pub condition: String,
    #[serde(default)]
    pub fits_models: Vec<String>,
    pub description: String,
    #[serde(default)]
    pub images: Vec<String>,
    pub cost: String,
    pub is_available: bool,
    pub garage_id: String,
}

impl Default for PartDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            part_number: String::new(),
            category: "OTHER".to_string(),
            condition: "USED_GOOD".to_string(),
            fits_models: Vec::new(),
            description: String::new(),
            images: Vec::new(),
            cost: String::new(),
            is_available: true,
            garage_id: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProjectPartDraft {
    pub project_id: String,
    pub part_id: String,
    pub part_name: String,
    pub is_obtained: bool,
    pub notes: String,
    pub priority: String,
}

impl Default for ProjectPartDraft {
    fn default() -> Self {
        Self {
            project_id: String::new(),
            part_id: String::new(),
            part_name: String::new(),
            is_obtained: false,
            notes: String::new(),
            priority: "MEDIUM".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EventDraft {
    pub title: String,
    pub description: String,
    pub website: String,
    pub event_type: String,
    pub start_date_time: String,
    pub end_date_time: String,
    pub registration_time: String,
    pub ksu_time: String,
    pub max_participants: NumberInput,
    pub current_participants: NumberInput,
    pub registration_required: bool,
    pub host_club_id: String,
    pub address: Option<AddressDraft>,
}

impl Default for EventDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            website: String::new(),
            event_type: "SOCIAL".to_string(),
            start_date_time: String::new(),
            end_date_time: String::new(),
            registration_time: String::new(),
            ksu_time: String::new(),
            max_participants: NumberInput::Empty,
            current_participants: NumberInput::Number(0.0),
            registration_required: false,
            host_club_id: String::new(),
            address: Some(AddressDraft::default()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RideDraft {
    pub name: String,
    pub description: String,
    pub start: Option<AddressDraft>,
    pub end: Option<AddressDraft>,
    #[serde(default)]
    pub points: Vec<LocationDraft>,
    pub distance: NumberInput,
    pub estimated_duration: NumberInput,
    pub difficulty_level: String,
    pub route_data: Option<serde_json::Value>,
    pub created_by: String,
    pub is_public: bool,
    pub event_id: String,
}

impl Default for RideDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            start: None,
            end: None,
            points: Vec::new(),
            distance: NumberInput::Empty,
            estimated_duration: NumberInput::Empty,
            difficulty_level: "BEGINNER".to_string(),
            route_data: None,
            created_by: String::new(),
            is_public: true,
            event_id: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EventRegistrationDraft {
    pub event_id: String,
    pub user_id: String,
    pub user_name: String,
    pub registration_date: String,
    pub status: String,
    pub notes: String,
}

impl Default for EventRegistrationDraft {
    fn default() -> Self {
        Self {
            event_id: String::new(),
            user_id: String::new(),
            user_name: String::new(),
            registration_date: String::new(),
            status: "REGISTERED".to_string(),
            notes: String::new(),
        }
    }
}
