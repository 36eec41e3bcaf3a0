//! Primitive field rules shared by every entity validator
//!
//! Each rule records at most one error for its path and returns a value the
//! caller can build a record from. When a rule fails the returned value is
//! a placeholder; the caller discards the record because errors exist.

use regex::Regex;
use std::str::FromStr;
use std::sync::OnceLock;
use url::Url;

use super::enums::UnknownVariant;
use super::errors::{RuleKind, ValidationErrors};
use super::number::NumberInput;
use super::path::FieldPath;

/// Text with surrounding whitespace removed, `None` when blank.
///
/// Optional free-text fields and optional foreign keys both go through
/// this, so `hostClubId: ""` is submitted as absent.
pub fn optional_text(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Required text; blank counts as missing
pub fn required_text(errors: &mut ValidationErrors, path: FieldPath, value: &str, message: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        errors.add(path, RuleKind::Required, message);
    }
    trimmed.to_string()
}

/// Required text with an exact character count
pub fn exact_chars(
    errors: &mut ValidationErrors,
    path: FieldPath,
    value: &str,
    len: usize,
    required: &str,
    wrong_length: &str,
) -> String {
    let trimmed = value.trim();
    let count = trimmed.chars().count();
    if count == 0 {
        errors.add(path, RuleKind::Required, required);
    } else if count < len {
        errors.add(path, RuleKind::TooShort, wrong_length);
    } else if count > len {
        errors.add(path, RuleKind::TooLong, wrong_length);
    }
    trimmed.to_string()
}

/// Required text with a minimum character count
pub fn min_chars(
    errors: &mut ValidationErrors,
    path: FieldPath,
    value: &str,
    min: usize,
    required: &str,
    too_short: &str,
) -> String {
    let trimmed = value.trim();
    let count = trimmed.chars().count();
    if count == 0 {
        errors.add(path, RuleKind::Required, required);
    } else if count < min {
        errors.add(path, RuleKind::TooShort, too_short);
    }
    trimmed.to_string()
}

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?)+$")
            .expect("email pattern is a valid regex")
    })
}

/// Returns true if the text looks like a deliverable email address
pub fn is_email(value: &str) -> bool {
    email_pattern().is_match(value)
}

/// Returns true if the text is an absolute http(s) URL
pub fn is_web_url(value: &str) -> bool {
    match Url::parse(value) {
        Ok(url) => matches!(url.scheme(), "http" | "https") && url.has_host(),
        Err(_) => false,
    }
}

/// Optional email; empty means not provided
pub fn optional_email(errors: &mut ValidationErrors, path: FieldPath, value: &str, message: &str) -> Option<String> {
    let value = optional_text(value)?;
    if !is_email(&value) {
        errors.add(path, RuleKind::InvalidFormat, message);
    }
    Some(value)
}

/// Optional URL; empty means not provided
pub fn optional_url(errors: &mut ValidationErrors, path: FieldPath, value: &str, message: &str) -> Option<String> {
    let value = optional_text(value)?;
    if !is_web_url(&value) {
        errors.add(path, RuleKind::InvalidFormat, message);
    }
    Some(value)
}

/// Required member of a closed enumeration
pub fn required_enum<E>(errors: &mut ValidationErrors, path: FieldPath, value: &str, required: &str) -> Option<E>
where
    E: FromStr<Err = UnknownVariant>,
{
    let trimmed = value.trim();
    if trimmed.is_empty() {
        errors.add(path, RuleKind::Required, required);
        return None;
    }
    parse_variant(errors, path, trimmed)
}

/// Member of a closed enumeration that falls back to its default when blank
pub fn enum_or_default<E>(errors: &mut ValidationErrors, path: FieldPath, value: &str) -> E
where
    E: FromStr<Err = UnknownVariant> + Default,
{
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return E::default();
    }
    parse_variant(errors, path, trimmed).unwrap_or_default()
}

fn parse_variant<E>(errors: &mut ValidationErrors, path: FieldPath, value: &str) -> Option<E>
where
    E: FromStr<Err = UnknownVariant>,
{
    match value.parse::<E>() {
        Ok(variant) => Some(variant),
        Err(unknown) => {
            errors.add(path, RuleKind::UnknownVariant, format!("Invalid {}", unknown.kind));
            None
        }
    }
}

/// Numeric bounds for a single input
#[derive(Debug, Clone, Copy)]
pub struct NumberRule {
    /// Label used in messages ("Latitude")
    pub label: &'static str,
    /// Inclusive lower bound
    pub min: Option<f64>,
    /// Inclusive upper bound
    pub max: Option<f64>,
    /// Value must be strictly greater than zero
    pub positive: bool,
}

impl NumberRule {
    /// Any finite number
    pub const fn any(label: &'static str) -> Self {
        Self {
            label,
            min: None,
            max: None,
            positive: false,
        }
    }

    /// Inclusive range
    pub const fn between(label: &'static str, min: f64, max: f64) -> Self {
        Self {
            label,
            min: Some(min),
            max: Some(max),
            positive: false,
        }
    }

    /// Strictly greater than zero
    pub const fn positive(label: &'static str) -> Self {
        Self {
            label,
            min: None,
            max: None,
            positive: true,
        }
    }

    /// Zero or more
    pub const fn non_negative(label: &'static str) -> Self {
        Self {
            label,
            min: Some(0.0),
            max: None,
            positive: false,
        }
    }

    fn range_message(&self) -> String {
        match (self.min, self.max) {
            _ if self.positive => format!("{} must be positive", self.label),
            (Some(min), Some(max)) => format!("{} must be between {} and {}", self.label, min, max),
            (Some(min), None) if min == 0.0 => format!("{} cannot be negative", self.label),
            (Some(min), None) => format!("{} must be at least {}", self.label, min),
            (None, Some(max)) => format!("{} must be at most {}", self.label, max),
            (None, None) => format!("{} is out of range", self.label),
        }
    }

    fn in_range(&self, n: f64) -> bool {
        if self.positive && n <= 0.0 {
            return false;
        }
        self.min.map_or(true, |min| n >= min) && self.max.map_or(true, |max| n <= max)
    }
}

/// Coerces and range-checks a number. `None` means the input was empty.
pub fn optional_number(
    errors: &mut ValidationErrors,
    path: FieldPath,
    input: &NumberInput,
    rule: NumberRule,
) -> Option<f64> {
    let value = match input.value() {
        Ok(value) => value?,
        Err(_) => {
            errors.add(path, RuleKind::NotANumber, format!("{} must be a number", rule.label));
            return None;
        }
    };
    if !rule.in_range(value) {
        errors.add(path, RuleKind::OutOfRange, rule.range_message());
    }
    Some(value)
}

/// Required number; empty input is reported as missing
pub fn required_number(
    errors: &mut ValidationErrors,
    path: FieldPath,
    input: &NumberInput,
    rule: NumberRule,
) -> Option<f64> {
    if input.is_empty() {
        errors.add(path, RuleKind::Required, format!("{} is required", rule.label));
        return None;
    }
    optional_number(errors, path, input, rule)
}

/// Optional whole-number count
pub fn optional_count(
    errors: &mut ValidationErrors,
    path: FieldPath,
    input: &NumberInput,
    rule: NumberRule,
) -> Option<u32> {
    let value = optional_number(errors, path.clone(), input, rule)?;
    if value.fract() != 0.0 || value < 0.0 || value > f64::from(u32::MAX) {
        errors.add(path, RuleKind::NotWholeNumber, format!("{} must be a whole number", rule.label));
        return None;
    }
    Some(value as u32)
}

/// List with a minimum number of entries
pub fn min_items<T>(errors: &mut ValidationErrors, path: FieldPath, items: &[T], min: usize, message: &str) {
    if items.len() < min {
        errors.add(path, RuleKind::TooFewItems, message);
    }
}

/// Trims list entries and drops blank ones
pub fn string_list(values: &[String]) -> Vec<String> {
    values.iter().filter_map(|v| optional_text(v)).collect()
}
