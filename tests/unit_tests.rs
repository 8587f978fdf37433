// Unit tests for HomeFit Match

use homefit_match::core::{
    normalize::{normalize_amenities, normalize_bedrooms, normalize_floor, normalize_pets, FloorLevel, PetPolicy},
    ranges::{parse_price_range, parse_sqft_range},
    scoring::{calculate_match_score, score_breakdown, Criterion},
};
use homefit_match::models::{CriterionWeights, Listing, Preference};

fn text(value: &str) -> Option<String> {
    Some(value.to_string())
}

#[test]
fn test_price_range_dropdown_values() {
    let under = parse_price_range(Some("$1,000 - $2,000"));
    assert!(under.contains(1500.0));
    assert!(!under.contains(999.0));

    let over = parse_price_range(Some("$3,000+"));
    assert!(over.contains(3000.0));
    assert!(over.contains(10_000.0));
    assert!(!over.contains(2999.0));
}

#[test]
fn test_sqft_range_free_text() {
    let range = parse_sqft_range(Some("500 - 1,000 sq. ft."));
    assert_eq!(range.bounds(), Some((500.0, 1000.0)));
}

#[test]
fn test_normalizers_agree_across_phrasings() {
    assert_eq!(normalize_bedrooms("2 Bedrooms"), normalize_bedrooms("2"));
    assert_eq!(normalize_floor("1"), FloorLevel::Ground);
    assert_eq!(normalize_floor("Ground Floor"), normalize_floor("1"));
    assert_eq!(normalize_pets("No pets please"), PetPolicy::No);
    assert_eq!(normalize_pets("Not allowed"), PetPolicy::No);

    let wanted = normalize_amenities(Some(&["Gym".to_string()][..]));
    let offered = normalize_amenities(Some(&["fitness center".to_string()][..]));
    assert!(wanted[0].matches(&offered[0]));
}

#[test]
fn test_price_and_bedrooms_full_credit() {
    let preference = Preference {
        price_range: text("$1,000 - $2,000"),
        bedrooms: text("2 Bedrooms"),
        ..Default::default()
    };
    let listing = Listing {
        price: Some(1500.0),
        bedrooms: text("2"),
        ..Default::default()
    };

    let totals = score_breakdown(&preference, &listing, &CriterionWeights::default());
    assert_eq!(totals.get(Criterion::Price).map(|c| c.awarded), Some(15.0));
    assert_eq!(totals.get(Criterion::Bedrooms).map(|c| c.awarded), Some(15.0));
}

#[test]
fn test_pets_no_and_not_match() {
    let preference = Preference {
        pets: text("No pets please"),
        ..Default::default()
    };
    let listing = Listing {
        pets: text("Not allowed"),
        ..Default::default()
    };

    let totals = score_breakdown(&preference, &listing, &CriterionWeights::default());
    assert_eq!(totals.get(Criterion::Pets).map(|c| c.awarded), Some(8.0));
}

#[test]
fn test_transport_half_credit() {
    let preference = Preference {
        transport: text("Very Important"),
        ..Default::default()
    };
    let listing = Listing {
        transport: text("Good access"),
        ..Default::default()
    };

    let totals = score_breakdown(&preference, &listing, &CriterionWeights::default());
    assert_eq!(totals.get(Criterion::Transport).map(|c| c.awarded), Some(2.5));
}

#[test]
fn test_amenities_one_of_two() {
    let preference = Preference {
        amenities: Some(vec!["Gym".to_string(), "Balcony".to_string()]),
        ..Default::default()
    };
    let listing = Listing {
        amenities: Some(vec!["fitness center".to_string(), "parking space".to_string()]),
        ..Default::default()
    };

    let totals = score_breakdown(&preference, &listing, &CriterionWeights::default());
    let amenities = totals.get(Criterion::Amenities).unwrap();
    assert_eq!(amenities.awarded, 3.0);
    assert_eq!(amenities.weight, 6.0);
}

#[test]
fn test_nothing_comparable_scores_zero() {
    assert_eq!(calculate_match_score(&Preference::default(), &Listing::default()), 0);
}

#[test]
fn test_two_criteria_perfect_subset() {
    let preference = Preference {
        style: text("Modern"),
        floor: text("Top Floor"),
        pets: text("Yes"),
        ..Default::default()
    };
    let listing = Listing {
        style: text("Modern"),
        floor: text("9"),
        ..Default::default()
    };

    let totals = score_breakdown(&preference, &listing, &CriterionWeights::default());
    assert_eq!(totals.criteria.len(), 2);
    assert_eq!(totals.score, totals.max_score);
    assert_eq!(calculate_match_score(&preference, &listing), 100);
}

#[test]
fn test_partial_match_rounds() {
    // view 4 + lease 8 matched, roommates 6 missed: 12/18 = 66.7%
    let preference = Preference {
        view: text("City"),
        lease_capacity: text("2 People"),
        roommates: text("Yes, with roommates"),
        ..Default::default()
    };
    let listing = Listing {
        view: text("City"),
        lease_capacity: text("2 People"),
        roommates: text("Single occupancy"),
        ..Default::default()
    };

    assert_eq!(calculate_match_score(&preference, &listing), 67);
}
