use crate::models::{CriterionWeights, Listing, Preference, ScoredListing};
use crate::core::scoring::{calculate_match_score_with, score_breakdown, ScoreBreakdown};

/// One page of ranked listings
#[derive(Debug, Clone, PartialEq)]
pub struct RankedPage {
    pub matches: Vec<ScoredListing>,
    pub page: u32,
    pub page_size: u32,
    pub total_results: usize,
    pub total_pages: u32,
}

/// Scores listings against a preference and orders them
///
/// # Pipeline Stages
/// 1. Score every listing independently
/// 2. Rank by descending score, keeping input order among equal scores
/// 3. Cut the requested page
#[derive(Debug, Clone)]
pub struct Matcher {
    weights: CriterionWeights,
}

impl Matcher {
    pub fn new(weights: CriterionWeights) -> Self {
        Self { weights }
    }

    pub fn with_default_weights() -> Self {
        Self {
            weights: CriterionWeights::default(),
        }
    }

    /// Score a single listing (0-100)
    pub fn score(&self, preference: &Preference, listing: &Listing) -> u8 {
        calculate_match_score_with(preference, listing, &self.weights)
    }

    /// Per-criterion detail for a single listing
    pub fn breakdown(&self, preference: &Preference, listing: &Listing) -> ScoreBreakdown {
        score_breakdown(preference, listing, &self.weights)
    }

    /// Score and rank every listing, best first
    pub fn rank(&self, preference: &Preference, listings: Vec<Listing>) -> Vec<ScoredListing> {
        let mut scored: Vec<ScoredListing> = listings
            .into_iter()
            .map(|listing| {
                let match_score = self.score(preference, &listing);
                ScoredListing {
                    listing,
                    match_score,
                }
            })
            .collect();

        // Stable sort keeps the caller's order among ties
        scored.sort_by(|a, b| b.match_score.cmp(&a.match_score));
        scored
    }

    /// Rank listings and return one 1-based page
    ///
    /// # Arguments
    /// * `preference` - The user's housing preference
    /// * `listings` - Candidate listings
    /// * `page` - 1-based page number; 0 is treated as 1
    /// * `page_size` - Listings per page; 0 is treated as 1
    ///
    /// A page past the end is empty but still reports the totals.
    pub fn rank_page(
        &self,
        preference: &Preference,
        listings: Vec<Listing>,
        page: u32,
        page_size: u32,
    ) -> RankedPage {
        let page = page.max(1);
        let page_size = page_size.max(1);

        let ranked = self.rank(preference, listings);
        let total_results = ranked.len();
        let total_pages = total_results.div_ceil(page_size as usize) as u32;

        let start = (page as usize - 1).saturating_mul(page_size as usize);
        let matches = ranked
            .into_iter()
            .skip(start)
            .take(page_size as usize)
            .collect();

        RankedPage {
            matches,
            page,
            page_size,
            total_results,
            total_pages,
        }
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::with_default_weights()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_listing(id: &str, price: f64, neighborhood: &str) -> Listing {
        Listing {
            id: Some(id.to_string()),
            price: Some(price),
            neighborhood: Some(neighborhood.to_string()),
            ..Default::default()
        }
    }

    fn create_preference() -> Preference {
        Preference {
            price_range: Some("$1,000 - $2,000".to_string()),
            neighborhood: Some("Brooklyn".to_string()),
            ..Default::default()
        }
    }

    fn ids(matches: &[ScoredListing]) -> Vec<&str> {
        matches
            .iter()
            .map(|m| m.listing.id.as_deref().unwrap_or_default())
            .collect()
    }

    #[test]
    fn test_rank_sorted_by_score() {
        let matcher = Matcher::with_default_weights();
        let preference = create_preference();

        let listings = vec![
            create_listing("1", 5000.0, "Queens"),   // nothing matches
            create_listing("2", 1500.0, "Queens"),   // price only
            create_listing("3", 1500.0, "Brooklyn"), // perfect
        ];

        let ranked = matcher.rank(&preference, listings);

        assert_eq!(ids(&ranked), vec!["3", "2", "1"]);
        assert_eq!(ranked[0].match_score, 100);
        assert_eq!(ranked[1].match_score, 60);
        assert_eq!(ranked[2].match_score, 0);
    }

    #[test]
    fn test_rank_ties_keep_input_order() {
        let matcher = Matcher::with_default_weights();
        let preference = create_preference();

        let listings = vec![
            create_listing("a", 1500.0, "Queens"),
            create_listing("b", 1600.0, "Queens"),
            create_listing("c", 1700.0, "Queens"),
        ];

        let ranked = matcher.rank(&preference, listings);
        assert_eq!(ids(&ranked), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_rank_page_slices() {
        let matcher = Matcher::with_default_weights();
        let preference = create_preference();

        let listings: Vec<Listing> = (0..7)
            .map(|i| create_listing(&i.to_string(), 1500.0, "Brooklyn"))
            .collect();

        let page = matcher.rank_page(&preference, listings.clone(), 2, 3);
        assert_eq!(ids(&page.matches), vec!["3", "4", "5"]);
        assert_eq!(page.total_results, 7);
        assert_eq!(page.total_pages, 3);

        let last = matcher.rank_page(&preference, listings.clone(), 3, 3);
        assert_eq!(ids(&last.matches), vec!["6"]);

        let past_end = matcher.rank_page(&preference, listings, 10, 3);
        assert!(past_end.matches.is_empty());
        assert_eq!(past_end.total_pages, 3);
    }

    #[test]
    fn test_rank_page_zero_is_first_page() {
        let matcher = Matcher::default();
        let preference = create_preference();
        let listings = vec![create_listing("1", 1500.0, "Brooklyn")];

        let page = matcher.rank_page(&preference, listings, 0, 0);
        assert_eq!(page.page, 1);
        assert_eq!(page.page_size, 1);
        assert_eq!(page.matches.len(), 1);
    }

    #[test]
    fn test_empty_candidates() {
        let matcher = Matcher::default();
        let page = matcher.rank_page(&create_preference(), vec![], 1, 20);
        assert!(page.matches.is_empty());
        assert_eq!(page.total_pages, 0);
    }
}
