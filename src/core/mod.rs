// Core algorithm exports
pub mod matcher;
pub mod normalize;
pub mod ranges;
pub mod scoring;

pub use matcher::{Matcher, RankedPage};
pub use normalize::{
    normalize_amenities, normalize_bedrooms, normalize_floor, normalize_parking, normalize_pets,
    normalize_roommates, Amenity, FloorLevel, ParkingNeed, PetPolicy, RoommatePolicy,
};
pub use ranges::{parse_price_range, parse_sqft_range, PriceRange, SqftRange};
pub use scoring::{calculate_match_score, calculate_match_score_with, score_breakdown, Criterion, ScoreBreakdown};
