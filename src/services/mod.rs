// Service exports
pub mod cache;

pub use cache::{CacheManager, CacheKey, CacheError, CacheStats};
