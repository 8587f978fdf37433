use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

use crate::models::CriterionWeights;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub cache: CacheSettings,
    #[serde(default)]
    pub scoring: ScoringSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 8080 }

#[derive(Debug, Clone, Deserialize)]
pub struct CacheSettings {
    #[serde(default = "default_redis_url")]
    pub redis_url: String,
    pub ttl_secs: Option<u64>,
    pub l1_cache_size: Option<u64>,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            redis_url: default_redis_url(),
            ttl_secs: None,
            l1_cache_size: None,
        }
    }
}

fn default_redis_url() -> String { "redis://127.0.0.1:6379".to_string() }

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoringSettings {
    #[serde(default)]
    pub weights: WeightsConfig,
}

/// Criterion weights; defaults reproduce the standard scoring table
#[derive(Debug, Clone, Deserialize)]
pub struct WeightsConfig {
    #[serde(default = "default_price_weight")]
    pub price: f64,
    #[serde(default = "default_bedrooms_weight")]
    pub bedrooms: f64,
    #[serde(default = "default_neighborhood_weight")]
    pub neighborhood: f64,
    #[serde(default = "default_floor_weight")]
    pub floor: f64,
    #[serde(default = "default_pets_weight")]
    pub pets: f64,
    #[serde(default = "default_amenity_weight")]
    pub amenity: f64,
    #[serde(default = "default_style_weight")]
    pub style: f64,
    #[serde(default = "default_move_in_date_weight")]
    pub move_in_date: f64,
    #[serde(default = "default_parking_weight")]
    pub parking: f64,
    #[serde(default = "default_transport_weight")]
    pub transport: f64,
    #[serde(default = "default_sqft_weight")]
    pub sqft: f64,
    #[serde(default = "default_safety_weight")]
    pub safety: f64,
    #[serde(default = "default_view_weight")]
    pub view: f64,
    #[serde(default = "default_lease_capacity_weight")]
    pub lease_capacity: f64,
    #[serde(default = "default_roommates_weight")]
    pub roommates: f64,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            price: default_price_weight(),
            bedrooms: default_bedrooms_weight(),
            neighborhood: default_neighborhood_weight(),
            floor: default_floor_weight(),
            pets: default_pets_weight(),
            amenity: default_amenity_weight(),
            style: default_style_weight(),
            move_in_date: default_move_in_date_weight(),
            parking: default_parking_weight(),
            transport: default_transport_weight(),
            sqft: default_sqft_weight(),
            safety: default_safety_weight(),
            view: default_view_weight(),
            lease_capacity: default_lease_capacity_weight(),
            roommates: default_roommates_weight(),
        }
    }
}

impl From<&WeightsConfig> for CriterionWeights {
    fn from(config: &WeightsConfig) -> Self {
        Self {
            price: config.price,
            bedrooms: config.bedrooms,
            neighborhood: config.neighborhood,
            floor: config.floor,
            pets: config.pets,
            amenity: config.amenity,
            style: config.style,
            move_in_date: config.move_in_date,
            parking: config.parking,
            transport: config.transport,
            sqft: config.sqft,
            safety: config.safety,
            view: config.view,
            lease_capacity: config.lease_capacity,
            roommates: config.roommates,
        }
    }
}

fn default_price_weight() -> f64 { 15.0 }
fn default_bedrooms_weight() -> f64 { 15.0 }
fn default_neighborhood_weight() -> f64 { 10.0 }
fn default_floor_weight() -> f64 { 5.0 }
fn default_pets_weight() -> f64 { 8.0 }
fn default_amenity_weight() -> f64 { 3.0 }
fn default_style_weight() -> f64 { 5.0 }
fn default_move_in_date_weight() -> f64 { 8.0 }
fn default_parking_weight() -> f64 { 8.0 }
fn default_transport_weight() -> f64 { 5.0 }
fn default_sqft_weight() -> f64 { 6.0 }
fn default_safety_weight() -> f64 { 7.0 }
fn default_view_weight() -> f64 { 4.0 }
fn default_lease_capacity_weight() -> f64 { 8.0 }
fn default_roommates_weight() -> f64 { 6.0 }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with HOMEFIT__)
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., HOMEFIT__SERVER__PORT -> server.port
            .add_source(environment())
            .build()?
            .try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(environment())
            .build()?
            .try_deserialize()
    }

    /// Scoring weights as used by the matcher
    pub fn criterion_weights(&self) -> CriterionWeights {
        CriterionWeights::from(&self.scoring.weights)
    }
}

fn environment() -> Environment {
    Environment::with_prefix("HOMEFIT")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}
