use serde::{Deserialize, Serialize};
use crate::core::scoring::ScoreBreakdown;
use crate::models::domain::ScoredListing;

/// Response for the single-pair score endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreResponse {
    pub score: u8,
    pub breakdown: ScoreBreakdown,
}

/// Response for the rank endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankResponse {
    pub matches: Vec<ScoredListing>,
    pub page: u32,
    pub page_size: u32,
    pub total_results: usize,
    pub total_pages: u32,
    #[serde(default)]
    pub cached: bool,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub cache: String,
    pub cache_entries: u64,
    pub cache_ttl_secs: u64,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
