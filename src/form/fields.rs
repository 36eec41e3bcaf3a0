//! Repeatable and multi-select field descriptors
//!
//! A descriptor names a list inside a draft and knows how to reach it, so
//! controllers can edit lists generically while the compiler still checks
//! the item type.

use crate::schema::{ClubDraft, ContactDraft, GarageDraft, LocationDraft, PartDraft, RideDraft};

/// Motorcycle styles a garage can specialise in
pub const SPECIALTY_OPTIONS: &[&str] = &[
    "American V-Twins",
    "Metric Cruisers",
    "Sport Bikes",
    "Touring Bikes",
    "Choppers",
    "Bobbers",
    "Cafe Racers",
    "Adventure Bikes",
    "Dirt Bikes",
    "Vintage Restoration",
];

/// Facilities a garage can offer
pub const AMENITY_OPTIONS: &[&str] = &[
    "Welding",
    "Machine Shop",
    "Paint Booth",
    "Tire Mounting",
    "Dyno Tuning",
    "Parts Washing",
    "Compressed Air",
    "Lift/Hoist",
    "Tool Library",
    "Meeting Space",
];

/// Variable-length list of sub-drafts
pub struct ListField<D, T> {
    /// Field name, also the error path prefix
    pub name: &'static str,
    /// Removal never takes the list below this
    pub min_items: usize,
    access: fn(&mut D) -> &mut Vec<T>,
}

impl<D, T> ListField<D, T> {
    pub const fn new(name: &'static str, min_items: usize, access: fn(&mut D) -> &mut Vec<T>) -> Self {
        Self {
            name,
            min_items,
            access,
        }
    }

    pub fn items<'a>(&self, draft: &'a mut D) -> &'a mut Vec<T> {
        (self.access)(draft)
    }
}

/// Set of strings kept as a list; toggling adds or removes one value
pub struct SetField<D> {
    pub name: &'static str,
    /// Fixed choices, or `None` for free text
    pub options: Option<&'static [&'static str]>,
    access: fn(&mut D) -> &mut Vec<String>,
}

impl<D> SetField<D> {
    pub const fn new(
        name: &'static str,
        options: Option<&'static [&'static str]>,
        access: fn(&mut D) -> &mut Vec<String>,
    ) -> Self {
        Self {
            name,
            options,
            access,
        }
    }

    pub fn values<'a>(&self, draft: &'a mut D) -> &'a mut Vec<String> {
        (self.access)(draft)
    }

    pub fn allows(&self, value: &str) -> bool {
        self.options.map_or(true, |options| options.contains(&value))
    }
}

pub mod garage {
    use super::*;

    fn contacts(draft: &mut GarageDraft) -> &mut Vec<ContactDraft> {
        &mut draft.contacts
    }

    fn specialties(draft: &mut GarageDraft) -> &mut Vec<String> {
        &mut draft.specialties
    }

    fn amenities(draft: &mut GarageDraft) -> &mut Vec<String> {
        &mut draft.amenities
    }

    pub const CONTACTS: ListField<GarageDraft, ContactDraft> = ListField::new("contacts", 1, contacts);
    pub const SPECIALTIES: SetField<GarageDraft> =
        SetField::new("specialties", Some(SPECIALTY_OPTIONS), specialties);
    pub const AMENITIES: SetField<GarageDraft> = SetField::new("amenities", Some(AMENITY_OPTIONS), amenities);
}

pub mod club {
    use super::*;

    fn contacts(draft: &mut ClubDraft) -> &mut Vec<ContactDraft> {
        &mut draft.contacts
    }

    pub const CONTACTS: ListField<ClubDraft, ContactDraft> = ListField::new("contacts", 1, contacts);
}

pub mod part {
    use super::*;

    fn fits_models(draft: &mut PartDraft) -> &mut Vec<String> {
        &mut draft.fits_models
    }

    pub const FITS_MODELS: SetField<PartDraft> = SetField::new("fitsModels", None, fits_models);
}

pub mod ride {
    use super::*;

    fn points(draft: &mut RideDraft) -> &mut Vec<LocationDraft> {
        &mut draft.points
    }

    pub const POINTS: ListField<RideDraft, LocationDraft> = ListField::new("points", 0, points);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors_reach_the_right_list() {
        let mut draft = GarageDraft::default();
        garage::SPECIALTIES.values(&mut draft).push("Choppers".to_string());
        assert_eq!(draft.specialties, vec!["Choppers"]);
        assert_eq!(garage::CONTACTS.items(&mut draft).len(), 1);
    }

    #[test]
    fn test_options() {
        assert!(garage::AMENITIES.allows("Lift/Hoist"));
        assert!(!garage::AMENITIES.allows("Hot Tub"));
        assert!(part::FITS_MODELS.allows("Sportster 883"));
        assert_eq!(SPECIALTY_OPTIONS.len(), 10);
        assert_eq!(AMENITY_OPTIONS.len(), 10);
    }
}
