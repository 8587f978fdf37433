//! Field normalizers
//!
//! Preferences and listings describe the same attribute in different words
//! ("2 Bedrooms" vs "2", "Not allowed" vs "No pets please", `3` vs
//! "Mid-level Floor"). Each normalizer reduces one free-text family to a
//! small closed type so both sides can be compared with `==`.
//!
//! All normalizers are total: any input yields a value.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::core::ranges::parse_leading_int;

/// Pet policy assumed when the text says neither yes nor no
pub const DEFAULT_PET_POLICY: PetPolicy = PetPolicy::Yes;

/// Roommate policy assumed when the text does not ask for roommates
pub const DEFAULT_ROOMMATE_POLICY: RoommatePolicy = RoommatePolicy::No;

static DIGIT_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").expect("valid digit pattern"));

/// Floor bucket
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FloorLevel {
    Ground,
    MidLevel,
    Top,
    /// Unrecognized text, kept verbatim
    Other(String),
}

impl FloorLevel {
    pub const GROUND_LABEL: &'static str = "Ground Floor";
    pub const MID_LEVEL_LABEL: &'static str = "Mid-level Floor";
    pub const TOP_LABEL: &'static str = "Top Floor";

    /// Bucket a numeric floor: `<= 1` ground, `2..=5` mid-level, above that top
    pub fn from_number(floor: i64) -> Self {
        match floor {
            n if n <= 1 => FloorLevel::Ground,
            2..=5 => FloorLevel::MidLevel,
            _ => FloorLevel::Top,
        }
    }

    fn from_label(value: &str) -> Self {
        match value {
            Self::GROUND_LABEL => FloorLevel::Ground,
            Self::MID_LEVEL_LABEL => FloorLevel::MidLevel,
            Self::TOP_LABEL => FloorLevel::Top,
            other => FloorLevel::Other(other.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            FloorLevel::Ground => Self::GROUND_LABEL,
            FloorLevel::MidLevel => Self::MID_LEVEL_LABEL,
            FloorLevel::Top => Self::TOP_LABEL,
            FloorLevel::Other(value) => value,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PetPolicy {
    Yes,
    No,
}

impl PetPolicy {
    pub fn label(&self) -> &'static str {
        match self {
            PetPolicy::Yes => "Yes",
            PetPolicy::No => "No",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoommatePolicy {
    Yes,
    No,
}

impl RoommatePolicy {
    pub fn label(&self) -> &'static str {
        match self {
            RoommatePolicy::Yes => "Yes",
            RoommatePolicy::No => "No",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ParkingNeed {
    Yes,
    No,
    /// Neither yes nor no, kept verbatim
    Other(String),
}

impl ParkingNeed {
    pub fn label(&self) -> &str {
        match self {
            ParkingNeed::Yes => "Yes",
            ParkingNeed::No => "No",
            ParkingNeed::Other(value) => value,
        }
    }
}

/// Amenity with a canonical label for the common synonyms
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Amenity {
    Gym,
    ParkingSpace,
    Balcony,
    InUnitLaundry,
    /// Unrecognized amenity, original casing preserved
    Other(String),
}

impl Amenity {
    pub fn label(&self) -> &str {
        match self {
            Amenity::Gym => "Gym",
            Amenity::ParkingSpace => "Parking Space",
            Amenity::Balcony => "Balcony",
            Amenity::InUnitLaundry => "In-Unit Laundry",
            Amenity::Other(value) => value,
        }
    }

    /// Case-insensitive label comparison
    pub fn matches(&self, other: &Amenity) -> bool {
        self.label().to_lowercase() == other.label().to_lowercase()
    }
}

macro_rules! impl_display_label {
    ($($ty:ty),*) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.label())
                }
            }
        )*
    };
}

impl_display_label!(FloorLevel, PetPolicy, RoommatePolicy, ParkingNeed, Amenity);

/// Normalize a floor description to a [`FloorLevel`]
///
/// Numeric text ("3", "12th") is bucketed by number, anything mentioning
/// "ground" is the ground floor, and everything else passes through.
pub fn normalize_floor(value: &str) -> FloorLevel {
    if let Some(floor) = parse_leading_int(value) {
        return FloorLevel::from_number(floor);
    }
    if value.to_lowercase().contains("ground") {
        return FloorLevel::Ground;
    }
    FloorLevel::from_label(value)
}

/// Normalize a pet policy
///
/// "no"/"not" is checked first, so "not sure, yes maybe" reads as `No`.
/// Text matching neither side falls back to [`DEFAULT_PET_POLICY`].
pub fn normalize_pets(value: &str) -> PetPolicy {
    let lower = value.to_lowercase();
    if lower.contains("no") || lower.contains("not") {
        PetPolicy::No
    } else if lower.contains("yes") || lower.contains("allow") {
        PetPolicy::Yes
    } else {
        DEFAULT_PET_POLICY
    }
}

/// Normalize a roommate preference; anything not asking for roommates is
/// [`DEFAULT_ROOMMATE_POLICY`]
pub fn normalize_roommates(value: &str) -> RoommatePolicy {
    let lower = value.to_lowercase();
    if lower.contains("yes") || lower.contains("with roommates") || lower.contains("friends") {
        RoommatePolicy::Yes
    } else {
        DEFAULT_ROOMMATE_POLICY
    }
}

/// Reduce a bedroom description to its first run of digits
///
/// "2 Bedrooms" becomes "2"; text without digits ("Studio") is returned as is.
pub fn normalize_bedrooms(value: &str) -> String {
    DIGIT_RUN
        .find(value)
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| value.to_string())
}

/// Normalize a parking need; unlike pets there is no default
pub fn normalize_parking(value: &str) -> ParkingNeed {
    let lower = value.to_lowercase();
    if lower.contains("yes") || lower.contains("need") {
        ParkingNeed::Yes
    } else if lower.contains("no") {
        ParkingNeed::No
    } else {
        ParkingNeed::Other(value.to_string())
    }
}

/// Normalize a single amenity
pub fn normalize_amenity(value: &str) -> Amenity {
    let lower = value.trim().to_lowercase();
    if lower.contains("gym") || lower.contains("fitness") {
        Amenity::Gym
    } else if lower.contains("park") && lower.contains("space") {
        Amenity::ParkingSpace
    } else if lower.contains("balcon") {
        Amenity::Balcony
    } else if lower.contains("laundry") || lower.contains("washer") {
        Amenity::InUnitLaundry
    } else {
        Amenity::Other(value.to_string())
    }
}

/// Normalize an amenity list; a missing list is empty
pub fn normalize_amenities(values: Option<&[String]>) -> Vec<Amenity> {
    values
        .unwrap_or_default()
        .iter()
        .map(|value| normalize_amenity(value))
        .collect()
}
