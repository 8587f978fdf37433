use serde::{Deserialize, Serialize};
use validator::Validate;
use crate::models::domain::{Listing, Preference};

/// Request to score a single preference/listing pair
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreRequest {
    pub preference: Preference,
    pub listing: Listing,
}

/// Request to rank a set of listings against one preference
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RankRequest {
    #[validate(length(min = 1))]
    #[serde(default, alias = "user_id", rename = "userId")]
    pub user_id: Option<String>,
    pub preference: Preference,
    #[serde(default)]
    pub listings: Vec<Listing>,
    #[validate(range(min = 1))]
    #[serde(default = "default_page")]
    pub page: u32,
    #[validate(range(min = 1, max = 100))]
    #[serde(default = "default_page_size", alias = "page_size", rename = "pageSize")]
    pub page_size: u32,
}

fn default_page() -> u32 {
    1
}

fn default_page_size() -> u32 {
    20
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_request_defaults() {
        let req: RankRequest = serde_json::from_value(serde_json::json!({
            "preference": {},
            "listings": []
        }))
        .unwrap();

        assert_eq!(req.page, 1);
        assert_eq!(req.page_size, 20);
        assert!(req.user_id.is_none());
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_rank_request_rejects_oversized_page() {
        let req: RankRequest = serde_json::from_value(serde_json::json!({
            "userId": "user123",
            "preference": {},
            "pageSize": 500
        }))
        .unwrap();

        assert!(req.validate().is_err());
    }

    #[test]
    fn test_rank_request_rejects_empty_user_id() {
        let req: RankRequest = serde_json::from_value(serde_json::json!({
            "userId": "",
            "preference": {}
        }))
        .unwrap();

        assert!(req.validate().is_err());
    }
}
