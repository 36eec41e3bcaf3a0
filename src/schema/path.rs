//! Structured field paths
//!
//! A path such as `contacts.0.phone` is a sequence of field names and list
//! indices. Validation errors are keyed by these values rather than by
//! interpolated strings; the dotted form exists only for display and for
//! lookups coming from outside the crate.

use serde::{Serialize, Serializer};
use std::fmt;

/// One step of a field path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PathSegment {
    /// Named field of a record
    Field(&'static str),
    /// Position within a list field
    Index(usize),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Field(name) => f.write_str(name),
            PathSegment::Index(i) => write!(f, "{}", i),
        }
    }
}

/// Location of a value inside a draft
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FieldPath {
    segments: Vec<PathSegment>,
}

impl FieldPath {
    /// The empty path (the record itself)
    pub fn root() -> Self {
        Self::default()
    }

    /// Returns a new path extended by a field name
    pub fn field(&self, name: &'static str) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::Field(name));
        Self { segments }
    }

    /// Returns a new path extended by a list index
    pub fn index(&self, index: usize) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::Index(index));
        Self { segments }
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns true if this path starts with `prefix`
    pub fn starts_with(&self, prefix: &FieldPath) -> bool {
        self.segments.starts_with(&prefix.segments)
    }

    /// Compares against a dotted path (`contacts.0.phone`) without allocating
    pub fn matches(&self, dotted: &str) -> bool {
        if self.segments.is_empty() {
            return dotted.is_empty();
        }
        let mut parts = dotted.split('.');
        for segment in &self.segments {
            let Some(part) = parts.next() else {
                return false;
            };
            let same = match segment {
                PathSegment::Field(name) => *name == part,
                PathSegment::Index(i) => part.parse::<usize>().map_or(false, |p| p == *i),
            };
            if !same {
                return false;
            }
        }
        parts.next().is_none()
    }
}

impl From<&'static str> for FieldPath {
    fn from(name: &'static str) -> Self {
        FieldPath::root().field(name)
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{}", segment)?;
        }
        Ok(())
    }
}

impl Serialize for FieldPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_joins_segments() {
        let path = FieldPath::root().field("contacts").index(0).field("phone");
        assert_eq!(path.to_string(), "contacts.0.phone");
    }

    #[test]
    fn test_matches_dotted_form() {
        let path = FieldPath::root().field("contacts").index(12).field("email");
        assert!(path.matches("contacts.12.email"));
        assert!(!path.matches("contacts.1.email"));
        assert!(!path.matches("contacts.12"));
        assert!(!path.matches("contacts.12.email.extra"));
    }

    #[test]
    fn test_prefix() {
        let contacts = FieldPath::from("contacts");
        let phone = contacts.index(0).field("phone");
        assert!(phone.starts_with(&contacts));
        assert!(!contacts.starts_with(&phone));
    }

    #[test]
    fn test_root() {
        assert!(FieldPath::root().is_root());
        assert!(FieldPath::root().matches(""));
    }
}
