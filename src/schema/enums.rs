//! Closed enumerations of the directory schema
//!
//! Every enumeration travels over the wire as its SCREAMING_SNAKE_CASE
//! name. Parsing is strict: anything outside the declared set is an
//! `UnknownVariant`, which the validator turns into a field error before
//! a payload is ever built.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A string that does not name any variant of the target enumeration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownVariant {
    /// Human label of the enumeration (e.g. "part category")
    pub kind: &'static str,
    /// The rejected input
    pub value: String,
}

impl fmt::Display for UnknownVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' is not a valid {}", self.value, self.kind)
    }
}

impl std::error::Error for UnknownVariant {}

macro_rules! closed_enum {
    (
        $(#[$meta:meta])*
        $name:ident ($label:literal) {
            $( $(#[$vmeta:meta])* $variant:ident => $text:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "SCREAMING_SNAKE_CASE")]
        pub enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $name {
            /// Every variant, in declaration order
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Human label used in error messages
            pub const LABEL: &'static str = $label;

            /// Wire name of this variant
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }

            /// Wire names of every variant
            pub fn names() -> Vec<&'static str> {
                Self::ALL.iter().map(|v| v.as_str()).collect()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = UnknownVariant;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::ALL
                    .iter()
                    .copied()
                    .find(|v| v.as_str() == s)
                    .ok_or_else(|| UnknownVariant {
                        kind: $label,
                        value: s.to_string(),
                    })
            }
        }
    };
}

closed_enum! {
    /// What kind of place a map location marks
    LocationType ("location type") {
        Garage => "GARAGE",
        Meetup => "MEETUP",
        Waypoint => "WAYPOINT",
        Landmark => "LANDMARK",
        Other => "OTHER",
    }
}

closed_enum! {
    /// How a contact prefers to be reached
    ContactPreference ("contact preference") {
        Call => "CALL",
        Text => "TEXT",
        Email => "EMAIL",
        Any => "ANY",
    }
}

closed_enum! {
    /// Lifecycle of a veteran's build project
    ProjectStatus ("project status") {
        Planning => "PLANNING",
        InProgress => "IN_PROGRESS",
        Stalled => "STALLED",
        Completed => "COMPLETED",
    }
}

closed_enum! {
    PartCategory ("part category") {
        Engine => "ENGINE",
        Frame => "FRAME",
        Electrical => "ELECTRICAL",
        Wheels => "WHEELS",
        Suspension => "SUSPENSION",
        Brakes => "BRAKES",
        Exhaust => "EXHAUST",
        Other => "OTHER",
    }
}

closed_enum! {
    PartCondition ("part condition") {
        New => "NEW",
        UsedExcellent => "USED_EXCELLENT",
        UsedGood => "USED_GOOD",
        UsedFair => "USED_FAIR",
        RebuildRequired => "REBUILD_REQUIRED",
    }
}

closed_enum! {
    /// Priority of a part on a project's checklist
    Priority ("priority") {
        High => "HIGH",
        Medium => "MEDIUM",
        Low => "LOW",
    }
}

closed_enum! {
    EventType ("event type") {
        Ride => "RIDE",
        Workshop => "WORKSHOP",
        Social => "SOCIAL",
        Fundraiser => "FUNDRAISER",
        Meeting => "MEETING",
    }
}

closed_enum! {
    DifficultyLevel ("difficulty level") {
        Beginner => "BEGINNER",
        Intermediate => "INTERMEDIATE",
        Advanced => "ADVANCED",
    }
}

closed_enum! {
    /// Attendance state of an event registration
    RegistrationStatus ("registration status") {
        Registered => "REGISTERED",
        Attended => "ATTENDED",
        NoShow => "NO_SHOW",
        Cancelled => "CANCELLED",
    }
}

impl Default for ContactPreference {
    fn default() -> Self {
        ContactPreference::Any
    }
}

impl Default for ProjectStatus {
    fn default() -> Self {
        ProjectStatus::Planning
    }
}

impl Default for Priority {
    fn default() -> Self {
        Priority::Medium
    }
}

impl Default for DifficultyLevel {
    fn default() -> Self {
        DifficultyLevel::Beginner
    }
}

impl Default for RegistrationStatus {
    fn default() -> Self {
        RegistrationStatus::Registered
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accepts_wire_names_only() {
        assert_eq!("USED_GOOD".parse::<PartCondition>().unwrap(), PartCondition::UsedGood);
        assert!("used_good".parse::<PartCondition>().is_err());
        assert!("EAMIL".parse::<ContactPreference>().is_err());
    }

    #[test]
    fn test_unknown_variant_names_the_enumeration() {
        let err = "SPRINT".parse::<EventType>().unwrap_err();
        assert_eq!(err.kind, "event type");
        assert!(err.to_string().contains("SPRINT"));
    }

    #[test]
    fn test_serde_matches_as_str() {
        for status in RegistrationStatus::ALL {
            let json = serde_json::to_value(status).unwrap();
            assert_eq!(json, status.as_str());
        }
        let parsed: ProjectStatus = serde_json::from_str("\"IN_PROGRESS\"").unwrap();
        assert_eq!(parsed, ProjectStatus::InProgress);
    }

    #[test]
    fn test_declared_defaults() {
        assert_eq!(ProjectStatus::default(), ProjectStatus::Planning);
        assert_eq!(Priority::default(), Priority::Medium);
        assert_eq!(DifficultyLevel::default(), DifficultyLevel::Beginner);
        assert_eq!(RegistrationStatus::default(), RegistrationStatus::Registered);
    }

    #[test]
    fn test_all_lists_every_variant() {
        assert_eq!(PartCategory::ALL.len(), 8);
        assert_eq!(LocationType::names(), vec!["GARAGE", "MEETUP", "WAYPOINT", "LANDMARK", "OTHER"]);
    }
}
