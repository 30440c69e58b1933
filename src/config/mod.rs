pub mod cli;

use std::time::Duration;

use crate::domain::ports::ConfigProvider;
use crate::utils::error::{BirdscapeError, Result};
use crate::utils::validation::{validate_range, validate_url, Validate};

/// Required secret. Missing key is fatal at startup, never a per-request
/// error.
pub const API_KEY_ENV: &str = "EBIRD_API_KEY";
pub const API_BASE_ENV: &str = "EBIRD_API_URL";
pub const AUDIO_ENDPOINT_ENV: &str = "SOUNDSCAPE_API_URL";
pub const LOOKUP_TIMEOUT_ENV: &str = "BIRDSCAPE_LOOKUP_TIMEOUT_SECS";
pub const GENERATION_TIMEOUT_ENV: &str = "BIRDSCAPE_GENERATION_TIMEOUT_SECS";
pub const MAX_RETRIES_ENV: &str = "BIRDSCAPE_MAX_RETRIES";

pub const DEFAULT_API_BASE: &str = "https://api.ebird.org/v2";
pub const DEFAULT_AUDIO_ENDPOINT: &str = "https://audio.example.com/v1/soundscapes";
pub const DEFAULT_LOOKUP_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_GENERATION_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_MAX_RETRIES: u32 = 2;

/// Startup configuration, constructed once in main and passed into the
/// components that need it.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_base: String,
    pub api_key: String,
    pub audio_endpoint: String,
    pub lookup_timeout_secs: u64,
    pub generation_timeout_secs: u64,
    pub max_retries: u32,
}

impl AppConfig {
    /// Reads the environment. Only the API key is required; endpoints and
    /// timing knobs fall back to defaults.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var(API_KEY_ENV).unwrap_or_default();
        if api_key.trim().is_empty() {
            return Err(BirdscapeError::MissingApiKey {
                var: API_KEY_ENV.to_string(),
            });
        }

        let config = Self {
            api_base: std::env::var(API_BASE_ENV)
                .unwrap_or_else(|_| DEFAULT_API_BASE.to_string()),
            api_key,
            audio_endpoint: std::env::var(AUDIO_ENDPOINT_ENV)
                .unwrap_or_else(|_| DEFAULT_AUDIO_ENDPOINT.to_string()),
            lookup_timeout_secs: parse_override(
                LOOKUP_TIMEOUT_ENV,
                std::env::var(LOOKUP_TIMEOUT_ENV).ok(),
                DEFAULT_LOOKUP_TIMEOUT_SECS,
            )?,
            generation_timeout_secs: parse_override(
                GENERATION_TIMEOUT_ENV,
                std::env::var(GENERATION_TIMEOUT_ENV).ok(),
                DEFAULT_GENERATION_TIMEOUT_SECS,
            )?,
            max_retries: parse_override(
                MAX_RETRIES_ENV,
                std::env::var(MAX_RETRIES_ENV).ok(),
                DEFAULT_MAX_RETRIES,
            )?,
        };
        config.validate()?;
        Ok(config)
    }
}

/// Numeric environment override: absent falls back to the default, present
/// but unparseable is a configuration error, not a silent fallback.
fn parse_override<T: std::str::FromStr>(var: &str, raw: Option<String>, default: T) -> Result<T> {
    match raw {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| BirdscapeError::InvalidConfigValue {
                field: var.to_string(),
                value: raw,
                reason: "not a valid number".to_string(),
            }),
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        validate_url("api_base", &self.api_base)?;
        validate_url("audio_endpoint", &self.audio_endpoint)?;
        validate_range("lookup_timeout_secs", self.lookup_timeout_secs, 1, 120)?;
        validate_range(
            "generation_timeout_secs",
            self.generation_timeout_secs,
            1,
            600,
        )?;
        validate_range("max_retries", self.max_retries, 0, 10)?;
        Ok(())
    }
}

impl ConfigProvider for AppConfig {
    fn api_base(&self) -> &str {
        &self.api_base
    }

    fn api_key(&self) -> &str {
        &self.api_key
    }

    fn audio_endpoint(&self) -> &str {
        &self.audio_endpoint
    }

    fn lookup_timeout(&self) -> Duration {
        Duration::from_secs(self.lookup_timeout_secs)
    }

    fn generation_timeout(&self) -> Duration {
        Duration::from_secs(self.generation_timeout_secs)
    }

    fn max_retries(&self) -> u32 {
        self.max_retries
    }
}
