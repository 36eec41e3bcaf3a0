//! Numeric form input
//!
//! Number widgets hand back either nothing, a number, or whatever text the
//! user typed. `NumberInput` keeps all three apart so that "not a number"
//! can be reported separately from "out of range".

use serde::{Deserialize, Serialize};
use std::fmt;

/// Raw value of a numeric input
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumberInput {
    /// Nothing entered
    #[default]
    Empty,
    /// A number already coerced by the input element
    Number(f64),
    /// Text that still needs coercion
    Text(String),
}

/// The input holds text that does not read as a finite number
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotANumber(pub String);

impl fmt::Display for NotANumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' is not a number", self.0)
    }
}

impl std::error::Error for NotANumber {}

impl NumberInput {
    /// Coerces the input. Blank text counts as empty.
    pub fn value(&self) -> Result<Option<f64>, NotANumber> {
        match self {
            NumberInput::Empty => Ok(None),
            NumberInput::Number(n) if n.is_finite() => Ok(Some(*n)),
            NumberInput::Number(n) => Err(NotANumber(n.to_string())),
            NumberInput::Text(text) => {
                let trimmed = text.trim();
                if trimmed.is_empty() {
                    return Ok(None);
                }
                match trimmed.parse::<f64>() {
                    Ok(n) if n.is_finite() => Ok(Some(n)),
                    _ => Err(NotANumber(text.clone())),
                }
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self.value(), Ok(None))
    }
}

impl From<f64> for NumberInput {
    fn from(n: f64) -> Self {
        NumberInput::Number(n)
    }
}

impl From<u32> for NumberInput {
    fn from(n: u32) -> Self {
        NumberInput::Number(f64::from(n))
    }
}

impl From<&str> for NumberInput {
    fn from(text: &str) -> Self {
        NumberInput::Text(text.to_string())
    }
}

impl From<Option<f64>> for NumberInput {
    fn from(n: Option<f64>) -> Self {
        n.map_or(NumberInput::Empty, NumberInput::Number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_coercion() {
        assert_eq!(NumberInput::from(" 41.9276 ").value(), Ok(Some(41.9276)));
        assert_eq!(NumberInput::from("").value(), Ok(None));
        assert!(NumberInput::from("north").value().is_err());
    }

    #[test]
    fn test_non_finite_rejected() {
        assert!(NumberInput::from("NaN").value().is_err());
        assert!(NumberInput::from("inf").value().is_err());
        assert!(NumberInput::Number(f64::NAN).value().is_err());
    }

    #[test]
    fn test_deserialize_untagged() {
        let n: NumberInput = serde_json::from_str("12.5").unwrap();
        assert_eq!(n, NumberInput::Number(12.5));
        let t: NumberInput = serde_json::from_str("\"12\"").unwrap();
        assert_eq!(t, NumberInput::Text("12".into()));
        let e: NumberInput = serde_json::from_str("null").unwrap();
        assert_eq!(e, NumberInput::Empty);
    }
}
