use redis::aio::ConnectionManager;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

use crate::models::{Listing, Preference};

/// Errors that can occur with cache operations
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Redis error: {0}")]
    RedisError(#[from] redis::RedisError),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Cache miss: {0}")]
    CacheMiss(String),

    #[error("Invalidation error: {0}")]
    InvalidationError(String),
}

/// Multi-tier cache for ranked match pages
///
/// L1 is an in-process moka cache. L2 is Redis, shared across instances,
/// and optional: without it the manager serves from L1 alone.
pub struct CacheManager {
    redis: Option<Arc<tokio::sync::Mutex<ConnectionManager>>>,
    l1_cache: moka::future::Cache<String, Vec<u8>>,
    ttl_secs: u64,
}

impl CacheManager {
    /// Create a cache manager backed by Redis
    pub async fn new(redis_url: &str, l1_size: u64, ttl_secs: u64) -> Result<Self, CacheError> {
        let client = redis::Client::open(redis_url)?;
        let redis = redis::aio::ConnectionManager::new(client).await?;

        Ok(Self {
            redis: Some(Arc::new(tokio::sync::Mutex::new(redis))),
            l1_cache: Self::build_l1(l1_size, ttl_secs),
            ttl_secs,
        })
    }

    /// Create an L1-only cache manager
    pub fn in_memory(l1_size: u64, ttl_secs: u64) -> Self {
        Self {
            redis: None,
            l1_cache: Self::build_l1(l1_size, ttl_secs),
            ttl_secs,
        }
    }

    /// Connect to Redis, falling back to L1 only when it is unreachable
    pub async fn connect_or_in_memory(redis_url: &str, l1_size: u64, ttl_secs: u64) -> Self {
        match Self::new(redis_url, l1_size, ttl_secs).await {
            Ok(cache) => cache,
            Err(e) => {
                tracing::warn!("Failed to connect to Redis ({}), caching in memory only", e);
                Self::in_memory(l1_size, ttl_secs)
            }
        }
    }

    fn build_l1(l1_size: u64, ttl_secs: u64) -> moka::future::Cache<String, Vec<u8>> {
        moka::future::CacheBuilder::new(l1_size)
            .time_to_live(Duration::from_secs(ttl_secs))
            .support_invalidation_closures()
            .build()
    }

    /// Whether a Redis tier is attached
    pub fn has_redis(&self) -> bool {
        self.redis.is_some()
    }

    /// Get a value from cache (L1 first, then L2)
    pub async fn get<T>(&self, key: &str) -> Result<T, CacheError>
    where
        T: for<'de> Deserialize<'de>,
    {
        if let Some(bytes) = self.l1_cache.get(key).await {
            tracing::trace!("L1 cache hit: {}", key);
            return Ok(serde_json::from_slice(&bytes)?);
        }

        if let Some(redis) = &self.redis {
            let mut conn = redis.lock().await;
            let value: Option<String> = redis::cmd("GET")
                .arg(key)
                .query_async(&mut *conn)
                .await?;
            drop(conn);

            if let Some(json) = value {
                tracing::trace!("L2 cache hit: {}", key);

                // Populate L1 cache
                let bytes = json.as_bytes().to_vec();
                self.l1_cache.insert(key.to_string(), bytes).await;

                return Ok(serde_json::from_str(&json)?);
            }
        }

        tracing::trace!("Cache miss: {}", key);
        Err(CacheError::CacheMiss(key.to_string()))
    }

    /// Set a value in every tier
    pub async fn set<T>(&self, key: &str, value: &T) -> Result<(), CacheError>
    where
        T: Serialize,
    {
        let json = serde_json::to_string(value)?;

        self.l1_cache
            .insert(key.to_string(), json.as_bytes().to_vec())
            .await;

        if let Some(redis) = &self.redis {
            let mut conn = redis.lock().await;
            redis::cmd("SETEX")
                .arg(key)
                .arg(self.ttl_secs)
                .arg(json)
                .query_async::<()>(&mut *conn)
                .await?;
        }

        tracing::trace!("Cache set: {}", key);
        Ok(())
    }

    /// Delete a value from every tier
    pub async fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.l1_cache.invalidate(key).await;
        if let Some(redis) = &self.redis {
            let mut conn = redis.lock().await;
            redis::cmd("DEL")
                .arg(key)
                .query_async::<()>(&mut *conn)
                .await?;
        }
        Ok(())
    }

    /// Invalidate every ranked page cached for a user
    ///
    /// The user id is matched literally in both tiers: glob characters in it
    /// are escaped for Redis, and keys of other users that merely share a
    /// prefix are left alone.
    pub async fn invalidate_user(&self, user_id: &str) -> Result<(), CacheError> {
        let owner = user_id.to_string();
        self.l1_cache
            .invalidate_entries_if(move |key, _| CacheKey::is_user_key(key, &owner))
            .map_err(|e| CacheError::InvalidationError(e.to_string()))?;

        if let Some(redis) = &self.redis {
            let mut conn = redis.lock().await;
            let keys: Vec<String> = redis::cmd("KEYS")
                .arg(CacheKey::user_pattern(user_id))
                .query_async(&mut *conn)
                .await?;
            let keys: Vec<String> = keys
                .into_iter()
                .filter(|key| CacheKey::is_user_key(key, user_id))
                .collect();

            if !keys.is_empty() {
                redis::cmd("DEL")
                    .arg(keys)
                    .query_async::<()>(&mut *conn)
                    .await?;
            }
        }

        tracing::debug!("Invalidated cached rankings for user: {}", user_id);
        Ok(())
    }

    /// Get cache statistics
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            l1_size: self.l1_cache.entry_count(),
            redis_enabled: self.has_redis(),
            ttl_secs: self.ttl_secs,
        }
    }
}

/// Cache statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheStats {
    pub l1_size: u64,
    pub redis_enabled: bool,
    pub ttl_secs: u64,
}

/// Cache key builder
pub struct CacheKey;

impl CacheKey {
    const RANKED_PREFIX: &'static str = "matches";

    /// Build a cache key for one ranked page
    pub fn ranked(user_id: &str, fingerprint: u64, page: u32, page_size: u32) -> String {
        format!(
            "{}:{}:{:016x}:{}:{}",
            Self::RANKED_PREFIX,
            user_id,
            fingerprint,
            page,
            page_size
        )
    }

    /// Literal prefix shared by every ranked page of a user
    pub fn user_prefix(user_id: &str) -> String {
        format!("{}:{}:", Self::RANKED_PREFIX, user_id)
    }

    /// Redis `KEYS` pattern covering every ranked page of a user
    pub fn user_pattern(user_id: &str) -> String {
        format!("{}*", escape_glob(&Self::user_prefix(user_id)))
    }

    /// Whether `key` is a ranked page of exactly this user
    ///
    /// The remainder after the user prefix must be `fingerprint:page:size`,
    /// so user "a" does not own the pages of user "a:b".
    pub fn is_user_key(key: &str, user_id: &str) -> bool {
        key.strip_prefix(&Self::user_prefix(user_id))
            .map_or(false, |rest| rest.split(':').count() == 3)
    }

    /// Fingerprint of the inputs a ranked page was computed from
    ///
    /// Any change to the preference or to the listing set produces a new
    /// key, so stale pages are never served for different inputs. SHA-256
    /// keeps the value identical across builds sharing one Redis.
    pub fn fingerprint(preference: &Preference, listings: &[Listing]) -> u64 {
        let mut hasher = Sha256::new();
        // Serializing plain structs to a string cannot fail
        hasher.update(serde_json::to_vec(preference).unwrap_or_default());
        hasher.update([0u8]);
        hasher.update(serde_json::to_vec(listings).unwrap_or_default());
        let digest = hasher.finalize();
        u64::from_be_bytes([
            digest[0], digest[1], digest[2], digest[3], digest[4], digest[5], digest[6], digest[7],
        ])
    }
}

/// Escape Redis glob metacharacters so the text matches literally
fn escape_glob(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '*' | '?' | '[' | ']' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
