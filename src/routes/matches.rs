use actix_web::{web, HttpResponse, Responder};
use validator::Validate;
use crate::models::{RankRequest, ScoreRequest, ScoreResponse, RankResponse, HealthResponse, ErrorResponse};
use crate::services::{CacheManager, CacheKey};
use crate::core::Matcher;
use std::sync::Arc;

/// User id used for cache keys when the caller does not send one
const ANONYMOUS_USER: &str = "anonymous";

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub cache: Arc<CacheManager>,
    pub matcher: Matcher,
}

/// Configure all match-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/matches/score", web::post().to(score_listing))
        .route("/matches/rank", web::post().to(rank_listings))
        .route("/matches/cache/{user_id}", web::delete().to(invalidate_user_cache));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let stats = state.cache.stats();
    let cache = if stats.redis_enabled { "redis" } else { "memory" };

    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        cache: cache.to_string(),
        cache_entries: stats.l1_size,
        cache_ttl_secs: stats.ttl_secs,
        timestamp: chrono::Utc::now(),
    })
}

/// Score a single preference/listing pair
///
/// POST /api/v1/matches/score
///
/// Request body:
/// ```json
/// {
///   "preference": { "priceRange": "$1,000 - $2,000", "bedrooms": "2 Bedrooms" },
///   "listing": { "price": 1500, "bedrooms": "2" }
/// }
/// ```
async fn score_listing(
    state: web::Data<AppState>,
    req: web::Json<ScoreRequest>,
) -> impl Responder {
    let breakdown = state.matcher.breakdown(&req.preference, &req.listing);
    let score = breakdown.percent();

    tracing::debug!(
        "Scored listing {:?}: {} ({}/{} over {} criteria)",
        req.listing.id,
        score,
        breakdown.score,
        breakdown.max_score,
        breakdown.criteria.len()
    );

    HttpResponse::Ok().json(ScoreResponse { score, breakdown })
}

/// Rank listings against a preference
///
/// POST /api/v1/matches/rank
///
/// Request body:
/// ```json
/// {
///   "userId": "string",
///   "preference": { ... },
///   "listings": [{ ... }],
///   "page": 1,
///   "pageSize": 20
/// }
/// ```
async fn rank_listings(
    state: web::Data<AppState>,
    req: web::Json<RankRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for rank request: field_errors={:?}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let RankRequest {
        user_id,
        preference,
        listings,
        page,
        page_size,
    } = req.into_inner();
    let user_id = user_id.unwrap_or_else(|| ANONYMOUS_USER.to_string());

    let fingerprint = CacheKey::fingerprint(&preference, &listings);
    let cache_key = CacheKey::ranked(&user_id, fingerprint, page, page_size);

    match state.cache.get::<RankResponse>(&cache_key).await {
        Ok(mut cached) => {
            tracing::debug!("Serving cached ranking for user {} (page {})", user_id, page);
            cached.cached = true;
            return HttpResponse::Ok().json(cached);
        }
        Err(crate::services::CacheError::CacheMiss(_)) => {}
        Err(e) => tracing::warn!("Cache read failed for {}, ranking from scratch: {}", cache_key, e),
    }

    tracing::info!(
        "Ranking {} listings for user: {}, page: {}, page_size: {}",
        listings.len(),
        user_id,
        page,
        page_size
    );

    let ranked = state.matcher.rank_page(&preference, listings, page, page_size);

    let response = RankResponse {
        matches: ranked.matches,
        page: ranked.page,
        page_size: ranked.page_size,
        total_results: ranked.total_results,
        total_pages: ranked.total_pages,
        cached: false,
    };

    if let Err(e) = state.cache.set(&cache_key, &response).await {
        tracing::warn!("Failed to cache ranking for {}: {}", user_id, e);
    }

    tracing::info!(
        "Returning {} matches for user {} (from {} listings)",
        response.matches.len(),
        user_id,
        response.total_results
    );

    HttpResponse::Ok().json(response)
}

/// Drop every cached ranking for a user
///
/// DELETE /api/v1/matches/cache/{userId}
///
/// Called when a user's preference or the listing inventory changes.
async fn invalidate_user_cache(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> impl Responder {
    let user_id = path.into_inner();

    match state.cache.invalidate_user(&user_id).await {
        Ok(()) => HttpResponse::Ok().json(serde_json::json!({
            "userId": user_id,
            "invalidated": true,
        })),
        Err(e) => {
            tracing::error!("Failed to invalidate cache for {}: {}", user_id, e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to invalidate cache".to_string(),
                message: e.to_string(),
                status_code: 500,
            })
        }
    }
}
