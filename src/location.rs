//! Location capture dialog
//!
//! Modal capture of a single [`Location`]. It never talks to the data
//! service; a confirmed value is handed back to whichever flow opened the
//! dialog (typically a ride's points or an address pin).

use tracing::debug;

use crate::observability::Event;
use crate::schema::{Location, LocationDraft, Validate, ValidationErrors};

#[derive(Debug, Default)]
pub struct LocationDialog {
    open: bool,
    draft: LocationDraft,
    errors: ValidationErrors,
}

impl LocationDialog {
    /// Closed dialog with a blank draft
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens with `initial` prefilled, or a blank waypoint
    pub fn open(&mut self, initial: Option<LocationDraft>) {
        self.draft = initial.unwrap_or_default();
        self.errors.clear();
        self.open = true;
    }

    /// Closes and throws away whatever was entered
    pub fn close(&mut self) {
        self.open = false;
        self.draft = LocationDraft::default();
        self.errors.clear();
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn draft(&self) -> &LocationDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut LocationDraft {
        &mut self.draft
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    /// Accepts the draft if it validates.
    ///
    /// On success the dialog resets and closes. On failure it stays open
    /// with the draft untouched and the errors recorded.
    pub fn confirm(&mut self) -> Result<Location, ValidationErrors> {
        match self.draft.validate() {
            Ok(location) => {
                debug!(
                    event = %Event::LocationCaptured,
                    location_type = %location.location_type,
                    lat = location.lat,
                    long = location.long
                );
                self.close();
                Ok(location)
            }
            Err(errors) => {
                self.errors = errors.clone();
                Err(errors)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{LocationType, NumberInput, RuleKind};

    fn filled(lat: f64, long: f64) -> LocationDraft {
        LocationDraft {
            name: "Lunch stop".into(),
            lat: NumberInput::from(lat),
            long: NumberInput::from(long),
            ..LocationDraft::default()
        }
    }

    #[test]
    fn test_confirm_yields_and_resets() {
        let mut dialog = LocationDialog::new();
        dialog.open(Some(filled(35.2, -80.8)));
        assert!(dialog.is_open());

        let location = dialog.confirm().unwrap();
        assert_eq!(location.location_type, LocationType::Waypoint);
        assert_eq!(location.lat, 35.2);
        assert!(!dialog.is_open());
        assert_eq!(dialog.draft(), &LocationDraft::default());
    }

    #[test]
    fn test_out_of_range_keeps_dialog_open() {
        let mut dialog = LocationDialog::new();
        dialog.open(Some(filled(91.0, 181.0)));

        let errors = dialog.confirm().unwrap_err();
        assert_eq!(errors.get_dotted("lat").unwrap().kind, RuleKind::OutOfRange);
        assert_eq!(errors.get_dotted("long").unwrap().kind, RuleKind::OutOfRange);
        assert!(dialog.is_open());
        assert_eq!(dialog.draft().name, "Lunch stop");
    }

    #[test]
    fn test_boundaries_accepted() {
        let mut dialog = LocationDialog::new();
        dialog.open(Some(filled(-90.0, -180.0)));
        assert!(dialog.confirm().is_ok());
    }

    #[test]
    fn test_blank_coordinates_are_required() {
        let mut dialog = LocationDialog::new();
        dialog.open(None);
        dialog.draft_mut().name = "Gas".into();

        let errors = dialog.confirm().unwrap_err();
        assert_eq!(errors.get_dotted("lat").unwrap().kind, RuleKind::Required);
        assert_eq!(errors.message("long"), Some("Longitude is required"));
    }

    #[test]
    fn test_close_discards() {
        let mut dialog = LocationDialog::new();
        dialog.open(Some(filled(1.0, 1.0)));
        dialog.close();
        assert!(!dialog.is_open());
        assert!(dialog.draft().name.is_empty());
    }
}
