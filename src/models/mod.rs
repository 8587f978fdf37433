// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{Preference, Listing, ScoredListing, CriterionWeights};
pub use requests::{ScoreRequest, RankRequest};
pub use responses::{ScoreResponse, RankResponse, HealthResponse, ErrorResponse};
