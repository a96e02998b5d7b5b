use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

use crate::models::ScoringAdjustments;

/// Application configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub engine: EngineSettings,
    #[serde(default)]
    pub scoring: ScoringSettings,
    #[serde(default)]
    pub latency: LatencySettings,
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

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Which engine implementation to run and how to seed it.
#[derive(Debug, Clone, Deserialize)]
pub struct EngineSettings {
    /// "local" (default) or "remote".
    #[serde(default = "default_driver")]
    pub driver: String,
    #[serde(default)]
    pub remote_endpoint: Option<String>,
    #[serde(default)]
    pub remote_api_key: Option<String>,
    /// Fixes the comparable/reel-hook RNG for reproducible runs.
    #[serde(default)]
    pub rng_seed: Option<u64>,
    #[serde(default = "default_true")]
    pub seed_demo_data: bool,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            driver: default_driver(),
            remote_endpoint: None,
            remote_api_key: None,
            rng_seed: None,
            seed_demo_data: true,
        }
    }
}

fn default_driver() -> String {
    "local".to_string()
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct ScoringSettings {
    #[serde(default)]
    pub adjustments: AdjustmentsConfig,
}

/// Configurable score deltas for the matching scorer.
#[derive(Debug, Clone, Deserialize)]
pub struct AdjustmentsConfig {
    #[serde(default = "default_base")]
    pub base: i32,
    #[serde(default = "default_budget_within")]
    pub budget_within: i32,
    #[serde(default = "default_budget_over")]
    pub budget_over: i32,
    #[serde(default = "default_budget_over_threshold")]
    pub budget_over_threshold: f64,
    #[serde(default = "default_city")]
    pub city: i32,
    #[serde(default = "default_property_type")]
    pub property_type: i32,
    #[serde(default = "default_rooms")]
    pub rooms: i32,
    #[serde(default = "default_area")]
    pub area: i32,
    #[serde(default = "default_amenity")]
    pub amenity: i32,
}

impl Default for AdjustmentsConfig {
    fn default() -> Self {
        Self {
            base: default_base(),
            budget_within: default_budget_within(),
            budget_over: default_budget_over(),
            budget_over_threshold: default_budget_over_threshold(),
            city: default_city(),
            property_type: default_property_type(),
            rooms: default_rooms(),
            area: default_area(),
            amenity: default_amenity(),
        }
    }
}

impl From<AdjustmentsConfig> for ScoringAdjustments {
    fn from(config: AdjustmentsConfig) -> Self {
        Self {
            base: config.base,
            budget_within: config.budget_within,
            budget_over: config.budget_over,
            budget_over_threshold: config.budget_over_threshold,
            city: config.city,
            property_type: config.property_type,
            rooms: config.rooms,
            area: config.area,
            amenity: config.amenity,
        }
    }
}

fn default_base() -> i32 { 50 }
fn default_budget_within() -> i32 { 20 }
fn default_budget_over() -> i32 { -15 }
fn default_budget_over_threshold() -> f64 { 1.2 }
fn default_city() -> i32 { 15 }
fn default_property_type() -> i32 { 10 }
fn default_rooms() -> i32 { 10 }
fn default_area() -> i32 { 10 }
fn default_amenity() -> i32 { 5 }

/// Simulated network latency window for the mocked REST surface.
#[derive(Debug, Clone, Deserialize)]
pub struct LatencySettings {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_latency_min")]
    pub min_ms: u64,
    #[serde(default = "default_latency_max")]
    pub max_ms: u64,
}

impl Default for LatencySettings {
    fn default() -> Self {
        Self {
            enabled: true,
            min_ms: default_latency_min(),
            max_ms: default_latency_max(),
        }
    }
}

fn default_latency_min() -> u64 { 400 }
fn default_latency_max() -> u64 { 1200 }

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
    /// 4. Environment variables (prefixed with INMO__)
    ///    e.g., INMO__SERVER__PORT -> server.port
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            .add_source(
                Environment::with_prefix("INMO")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("INMO")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}
