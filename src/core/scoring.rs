use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::normalize::{
    normalize_amenities, normalize_bedrooms, normalize_floor, normalize_parking, normalize_pets,
    normalize_roommates,
};
use crate::core::ranges::{parse_leading_int, parse_price_range, parse_sqft_range};
use crate::models::{CriterionWeights, Listing, Preference};

/// Credit awarded for a near miss on transport or square footage
pub const PARTIAL_CREDIT: f64 = 0.5;

/// Square footage tolerance band around the preferred range
pub const SQFT_TOLERANCE_LOW: f64 = 0.9;
pub const SQFT_TOLERANCE_HIGH: f64 = 1.1;

/// Fraction of the possible score above which [`OPTIMISM_FLOOR`] applies
pub const OPTIMISM_THRESHOLD: f64 = 0.5;
/// Lowest percentage reported for a listing past [`OPTIMISM_THRESHOLD`]
pub const OPTIMISM_FLOOR: u8 = 30;

pub const PERFECT_SCORE: u8 = 100;

/// One weighted dimension of comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Criterion {
    Price,
    Bedrooms,
    Neighborhood,
    Floor,
    Pets,
    Amenities,
    Style,
    MoveInDate,
    Parking,
    Transport,
    Sqft,
    Safety,
    View,
    LeaseCapacity,
    Roommates,
}

/// Contribution of one evaluated criterion
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CriterionScore {
    pub criterion: Criterion,
    pub weight: f64,
    pub awarded: f64,
}

/// Running totals for a preference/listing pair
///
/// Only criteria with data on both sides are recorded; a skipped criterion
/// adds nothing to either total.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub criteria: Vec<CriterionScore>,
    pub score: f64,
    pub max_score: f64,
}

impl ScoreBreakdown {
    fn add(&mut self, criterion: Criterion, weight: f64, fraction: f64) {
        let awarded = weight * fraction;
        self.max_score += weight;
        self.score += awarded;
        self.criteria.push(CriterionScore {
            criterion,
            weight,
            awarded,
        });
    }

    fn add_match(&mut self, criterion: Criterion, weight: f64, matched: bool) {
        self.add(criterion, weight, if matched { 1.0 } else { 0.0 });
    }

    /// Contribution recorded for a criterion, if it was evaluated
    pub fn get(&self, criterion: Criterion) -> Option<&CriterionScore> {
        self.criteria.iter().find(|c| c.criterion == criterion)
    }

    /// Final percentage
    ///
    /// Checked in order: a perfect score on whatever was comparable is 100;
    /// nothing comparable is 0; otherwise the rounded percentage, lifted to
    /// [`OPTIMISM_FLOOR`] when at least [`OPTIMISM_THRESHOLD`] of the
    /// possible score was achieved.
    pub fn percent(&self) -> u8 {
        if self.max_score > 0.0 && self.score == self.max_score {
            return PERFECT_SCORE;
        }
        if self.max_score <= 0.0 {
            return 0;
        }

        let percent = (self.score / self.max_score * 100.0).round();
        if self.score >= self.max_score * OPTIMISM_THRESHOLD && percent < f64::from(OPTIMISM_FLOOR) {
            return OPTIMISM_FLOOR;
        }

        percent.clamp(0.0, f64::from(PERFECT_SCORE)) as u8
    }
}

/// Calculate a match score (0-100) with the default weights
pub fn calculate_match_score(preference: &Preference, listing: &Listing) -> u8 {
    calculate_match_score_with(preference, listing, &CriterionWeights::default())
}

/// Calculate a match score (0-100) with custom weights
pub fn calculate_match_score_with(
    preference: &Preference,
    listing: &Listing,
    weights: &CriterionWeights,
) -> u8 {
    score_breakdown(preference, listing, weights).percent()
}

/// Evaluate every criterion for a preference/listing pair
///
/// Criteria are evaluated in a fixed order: price, bedrooms, neighborhood,
/// floor, pets, amenities, style, move-in date, parking, transport, sqft,
/// safety, view, lease capacity, roommates.
pub fn score_breakdown(
    preference: &Preference,
    listing: &Listing,
    weights: &CriterionWeights,
) -> ScoreBreakdown {
    let mut totals = ScoreBreakdown::default();

    if let (Some(range), Some(price)) =
        (present(&preference.price_range), present_amount(listing.price))
    {
        let range = parse_price_range(Some(range));
        totals.add_match(Criterion::Price, weights.price, range.contains(price));
    }

    if let Some((pref, list)) = both(&preference.bedrooms, &listing.bedrooms) {
        totals.add_match(
            Criterion::Bedrooms,
            weights.bedrooms,
            normalize_bedrooms(pref) == normalize_bedrooms(list),
        );
    }

    if let Some((pref, list)) = both(&preference.neighborhood, &listing.neighborhood) {
        totals.add_match(Criterion::Neighborhood, weights.neighborhood, pref == list);
    }

    if let Some((pref, list)) = both(&preference.floor, &listing.floor) {
        totals.add_match(
            Criterion::Floor,
            weights.floor,
            normalize_floor(pref) == normalize_floor(list),
        );
    }

    if let Some((pref, list)) = both(&preference.pets, &listing.pets) {
        totals.add_match(
            Criterion::Pets,
            weights.pets,
            normalize_pets(pref) == normalize_pets(list),
        );
    }

    if let (Some(pref), Some(list)) = (&preference.amenities, &listing.amenities) {
        // An empty preference list carries no weight at all
        if !pref.is_empty() {
            let wanted = normalize_amenities(Some(pref.as_slice()));
            let offered = normalize_amenities(Some(list.as_slice()));
            let shared = offered
                .iter()
                .filter(|amenity| wanted.iter().any(|w| w.matches(amenity)))
                .count();

            totals.add(
                Criterion::Amenities,
                weights.amenity * wanted.len() as f64,
                shared as f64 / wanted.len() as f64,
            );
        }
    }

    if let Some((pref, list)) = both(&preference.style, &listing.style) {
        totals.add_match(Criterion::Style, weights.style, pref == list);
    }

    if let Some((pref, list)) = both(&preference.move_in_date, &listing.move_in_date) {
        let available_in_time = match (parse_move_in_date(pref), parse_move_in_date(list)) {
            (Some(wanted), Some(available)) => available <= wanted,
            _ => false,
        };
        totals.add_match(Criterion::MoveInDate, weights.move_in_date, available_in_time);
    }

    if let Some((pref, list)) = both(&preference.parking, &listing.parking) {
        totals.add_match(
            Criterion::Parking,
            weights.parking,
            normalize_parking(pref) == normalize_parking(list),
        );
    }

    if let Some((pref, list)) = both(&preference.transport, &listing.transport) {
        totals.add(Criterion::Transport, weights.transport, transport_fraction(pref, list));
    }

    if let (Some((min, max)), Some(sqft)) = (
        parse_sqft_range(present(&preference.sqft)).bounds(),
        present(&listing.sqft).and_then(parse_leading_int),
    ) {
        totals.add(Criterion::Sqft, weights.sqft, sqft_fraction(min, max, sqft as f64));
    }

    if let Some((pref, list)) = both(&preference.safety, &listing.safety) {
        totals.add_match(Criterion::Safety, weights.safety, safety_matches(pref, list));
    }

    if let Some((pref, list)) = both(&preference.view, &listing.view) {
        totals.add_match(Criterion::View, weights.view, pref == list);
    }

    if let Some((pref, list)) = both(&preference.lease_capacity, &listing.lease_capacity) {
        totals.add_match(Criterion::LeaseCapacity, weights.lease_capacity, pref == list);
    }

    if let Some((pref, list)) = both(&preference.roommates, &listing.roommates) {
        totals.add_match(
            Criterion::Roommates,
            weights.roommates,
            normalize_roommates(pref) == normalize_roommates(list),
        );
    }

    totals
}

/// Empty strings count as absent
#[inline]
fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

/// A zero amount counts as absent
#[inline]
fn present_amount(value: Option<f64>) -> Option<f64> {
    value.filter(|n| *n != 0.0 && !n.is_nan())
}

#[inline]
fn both<'a>(pref: &'a Option<String>, list: &'a Option<String>) -> Option<(&'a str, &'a str)> {
    Some((present(pref)?, present(list)?))
}

/// Exact match is full credit; "important" with "good" or "somewhat" with
/// "average" is partial credit
fn transport_fraction(pref: &str, list: &str) -> f64 {
    let pref = pref.to_lowercase();
    let list = list.to_lowercase();

    if pref == list {
        1.0
    } else if (pref.contains("important") && list.contains("good"))
        || (pref.contains("somewhat") && list.contains("average"))
    {
        PARTIAL_CREDIT
    } else {
        0.0
    }
}

/// Full credit inside the range, partial credit inside the tolerance band
fn sqft_fraction(min: f64, max: f64, sqft: f64) -> f64 {
    if sqft >= min && sqft <= max {
        1.0
    } else if sqft >= min * SQFT_TOLERANCE_LOW && sqft <= max * SQFT_TOLERANCE_HIGH {
        PARTIAL_CREDIT
    } else {
        0.0
    }
}

/// Unlike transport, every safety pairing that matches earns full credit
fn safety_matches(pref: &str, list: &str) -> bool {
    let pref = pref.to_lowercase();
    let list = list.to_lowercase();

    pref == list
        || ((pref.contains("very") || pref.contains("important"))
            && (list.contains("high") || list.contains("good")))
        || (pref.contains("somewhat") && list.contains("average"))
}

/// Parse a move-in date as an instant; date-only values are midnight UTC
pub fn parse_move_in_date(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|dt| dt.and_utc())
}
