//! HomeFit Match - preference-to-listing scoring for the HomeFit rental app
//!
//! The core is a pure, stateless scoring pipeline: field normalizers and
//! range parsers feed a weighted score aggregator that turns a user's
//! housing preference and a broker's listing into a 0-100 compatibility
//! score. Around it sit a ranking/pagination layer, a two-tier result cache
//! and an actix-web service.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use self::core::{Matcher, RankedPage, calculate_match_score, calculate_match_score_with, score_breakdown, ScoreBreakdown};
pub use self::models::{Preference, Listing, ScoredListing, CriterionWeights, RankRequest, RankResponse};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        let preference = Preference {
            bedrooms: Some("2 Bedrooms".to_string()),
            ..Default::default()
        };
        let listing = Listing {
            bedrooms: Some("2".to_string()),
            ..Default::default()
        };
        assert_eq!(calculate_match_score(&preference, &listing), 100);
    }
}
