//! Validation error types
//!
//! Validation never stops at the first problem. Every field is checked and
//! each failing field contributes exactly one `FieldError`: the first rule
//! it breaks. Errors are kept in the order the fields were checked.

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use std::fmt;

use super::path::FieldPath;

/// Which kind of rule a field broke
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleKind {
    /// Required value missing or blank
    Required,
    /// Text shorter than allowed
    TooShort,
    /// Text longer than allowed
    TooLong,
    /// Email or URL that does not parse
    InvalidFormat,
    /// Numeric input that is not a number at all
    NotANumber,
    /// Number outside its allowed range
    OutOfRange,
    /// Fractional value where a count is expected
    NotWholeNumber,
    /// Text outside a closed enumeration
    UnknownVariant,
    /// List with fewer items than its minimum
    TooFewItems,
}

impl RuleKind {
    /// Returns the stable code for this rule
    pub fn code(&self) -> &'static str {
        match self {
            RuleKind::Required => "REQUIRED",
            RuleKind::TooShort => "TOO_SHORT",
            RuleKind::TooLong => "TOO_LONG",
            RuleKind::InvalidFormat => "INVALID_FORMAT",
            RuleKind::NotANumber => "NOT_A_NUMBER",
            RuleKind::OutOfRange => "OUT_OF_RANGE",
            RuleKind::NotWholeNumber => "NOT_WHOLE_NUMBER",
            RuleKind::UnknownVariant => "UNKNOWN_VARIANT",
            RuleKind::TooFewItems => "TOO_FEW_ITEMS",
        }
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A single field-scoped validation failure
#[derive(Debug, Clone, PartialEq)]
pub struct FieldError {
    /// Where the failure is
    pub path: FieldPath,
    /// Rule that failed
    pub kind: RuleKind,
    /// Message shown next to the field
    pub message: String,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// All field errors found in one validation pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an error unless the field already has one.
    ///
    /// Returns whether the error was recorded.
    pub fn add(&mut self, path: FieldPath, kind: RuleKind, message: impl Into<String>) -> bool {
        if self.errors.iter().any(|e| e.path == path) {
            return false;
        }
        self.errors.push(FieldError {
            path,
            kind,
            message: message.into(),
        });
        true
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter()
    }

    /// Returns the error recorded for a path
    pub fn get(&self, path: &FieldPath) -> Option<&FieldError> {
        self.errors.iter().find(|e| &e.path == path)
    }

    /// Returns the error recorded for a dotted path such as `contacts.0.phone`
    pub fn get_dotted(&self, dotted: &str) -> Option<&FieldError> {
        self.errors.iter().find(|e| e.path.matches(dotted))
    }

    /// Returns the message recorded for a dotted path
    pub fn message(&self, dotted: &str) -> Option<&str> {
        self.get_dotted(dotted).map(|e| e.message.as_str())
    }

    pub fn contains(&self, dotted: &str) -> bool {
        self.get_dotted(dotted).is_some()
    }

    /// Errors at or below the given path
    pub fn under<'a>(&'a self, prefix: &'a FieldPath) -> impl Iterator<Item = &'a FieldError> + 'a {
        self.errors.iter().filter(move |e| e.path.starts_with(prefix))
    }

    /// Drops errors at or below the given path
    pub fn remove_under(&mut self, prefix: &FieldPath) {
        self.errors.retain(|e| !e.path.starts_with(prefix));
    }

    pub fn clear(&mut self) {
        self.errors.clear();
    }

    /// Returns `value` if nothing was recorded, otherwise the errors
    pub fn into_result<T>(self, value: T) -> Result<T, ValidationErrors> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} field error(s)", self.errors.len())?;
        for (i, error) in self.errors.iter().enumerate() {
            f.write_str(if i == 0 { ": " } else { "; " })?;
            write!(f, "{}", error)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Serialized as a `path -> message` object, in check order
impl Serialize for ValidationErrors {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.errors.len()))?;
        for error in &self.errors {
            map.serialize_entry(&error.path, &error.message)?;
        }
        map.end()
    }
}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a FieldError;
    type IntoIter = std::slice::Iter<'a, FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_error_per_field_wins() {
        let mut errors = ValidationErrors::new();
        assert!(errors.add("zip".into(), RuleKind::Required, "ZIP code is required"));
        assert!(!errors.add("zip".into(), RuleKind::TooShort, "too short"));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.message("zip"), Some("ZIP code is required"));
    }

    #[test]
    fn test_accumulates_across_fields() {
        let mut errors = ValidationErrors::new();
        errors.add("name".into(), RuleKind::Required, "Garage name is required");
        errors.add(
            FieldPath::from("contacts").index(0).field("phone"),
            RuleKind::Required,
            "Phone number is required",
        );
        assert_eq!(errors.len(), 2);
        assert!(errors.contains("contacts.0.phone"));
        assert_eq!(errors.under(&FieldPath::from("contacts")).count(), 1);
    }

    #[test]
    fn test_serializes_as_map() {
        let mut errors = ValidationErrors::new();
        errors.add(FieldPath::from("address").field("state"), RuleKind::TooLong, "State must be 2 characters");
        let json = serde_json::to_value(&errors).unwrap();
        assert_eq!(json["address.state"], "State must be 2 characters");
    }

    #[test]
    fn test_display_lists_errors() {
        let mut errors = ValidationErrors::new();
        errors.add("title".into(), RuleKind::Required, "Event title is required");
        let display = errors.to_string();
        assert!(display.contains("1 field error"));
        assert!(display.contains("title: Event title is required"));
    }

    #[test]
    fn test_into_result() {
        assert_eq!(ValidationErrors::new().into_result(7), Ok(7));
        let mut errors = ValidationErrors::new();
        errors.add("x".into(), RuleKind::Required, "x");
        assert!(errors.into_result(7).is_err());
    }
}
