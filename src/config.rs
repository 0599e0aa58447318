//! Configuration management for `TravelBuddi`
//!
//! Handles loading configuration from files, environment variables,
//! and provides validation for all configuration settings.

use crate::TravelBuddiError;
use crate::enrichment::ProviderKind;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TravelBuddiConfig {
    /// Place-search enrichment settings
    pub enrichment: EnrichmentConfig,
    /// Response cache settings
    pub cache: CacheConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
    /// HTTP API settings
    pub server: ServerConfig,
}

/// Place-search enrichment settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EnrichmentConfig {
    /// Which place-search back end to use
    pub provider: ProviderKind,
    /// API key for the selected provider
    pub api_key: Option<String>,
    /// Search radius around the destination in kilometers
    pub radius_km: u32,
    /// Maximum suggestions kept per section
    pub max_results: usize,
    /// Ask Google Places for fewer response fields
    pub cost_saver: bool,
    /// Request timeout in seconds
    pub timeout_seconds: u32,
    pub opentripmap_base_url: String,
    pub google_places_base_url: String,
}

/// Response cache settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub enabled: bool,
    /// How long an identical provider call is served from memory
    pub ttl_seconds: u64,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    pub level: String,
    /// Log format (pretty or json)
    pub format: String,
}

/// HTTP API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub port: u16,
}

// Default value functions
fn default_radius_km() -> u32 {
    5
}

fn default_max_results() -> usize {
    8
}

fn default_timeout() -> u32 {
    20
}

fn default_opentripmap_base_url() -> String {
    "https://api.opentripmap.com/0.1/en/places".to_string()
}

fn default_google_places_base_url() -> String {
    "https://places.googleapis.com/v1".to_string()
}

fn default_cache_ttl() -> u64 {
    60 * 60
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for EnrichmentConfig {
    fn default() -> Self {
        Self {
            provider: ProviderKind::Offline,
            api_key: None,
            radius_km: default_radius_km(),
            max_results: default_max_results(),
            cost_saver: true,
            timeout_seconds: default_timeout(),
            opentripmap_base_url: default_opentripmap_base_url(),
            google_places_base_url: default_google_places_base_url(),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            ttl_seconds: default_cache_ttl(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
        }
    }
}

impl EnrichmentConfig {
    /// The configured API key, falling back to the provider's own env var
    /// (`OPENTRIPMAP_API_KEY` / `GOOGLE_PLACES_API_KEY`).
    #[must_use]
    pub fn resolved_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .or_else(|| {
                self.provider
                    .api_key_env_var()
                    .and_then(|var| std::env::var(var).ok())
                    .filter(|key| !key.trim().is_empty())
            })
    }
}

impl TravelBuddiConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path().unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // TRAVELBUDDI_ENRICHMENT__API_KEY -> enrichment.api_key
        builder = builder.add_source(
            Environment::with_prefix("TRAVELBUDDI")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: TravelBuddiConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("travelbuddi").join("config.toml"))
    }

    /// Apply default values to zeroed or empty configuration fields
    pub fn apply_defaults(&mut self) {
        if self.enrichment.radius_km == 0 {
            self.enrichment.radius_km = default_radius_km();
        }
        if self.enrichment.max_results == 0 {
            self.enrichment.max_results = default_max_results();
        }
        if self.enrichment.timeout_seconds == 0 {
            self.enrichment.timeout_seconds = default_timeout();
        }
        if self.enrichment.opentripmap_base_url.is_empty() {
            self.enrichment.opentripmap_base_url = default_opentripmap_base_url();
        }
        if self.enrichment.google_places_base_url.is_empty() {
            self.enrichment.google_places_base_url = default_google_places_base_url();
        }
        if self.cache.ttl_seconds == 0 {
            self.cache.ttl_seconds = default_cache_ttl();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
        if self.server.port == 0 {
            self.server.port = default_port();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_api_key()?;
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    /// An explicitly configured key must look like a key
    pub fn validate_api_key(&self) -> Result<()> {
        if let Some(api_key) = &self.enrichment.api_key {
            if api_key.trim().is_empty() {
                return Err(TravelBuddiError::config(
                    "Place-search API key cannot be empty if provided. Either remove it or provide a valid key.",
                )
                .into());
            }

            if api_key.len() > 200 {
                return Err(TravelBuddiError::config(
                    "Place-search API key appears to be invalid (too long). Please check your API key.",
                )
                .into());
            }
        }

        Ok(())
    }

    fn validate_numeric_ranges(&self) -> Result<()> {
        if !(1..=25).contains(&self.enrichment.radius_km) {
            return Err(
                TravelBuddiError::config("Search radius must be between 1 and 25 km").into(),
            );
        }

        if !(3..=20).contains(&self.enrichment.max_results) {
            return Err(TravelBuddiError::config(
                "Max results per section must be between 3 and 20",
            )
            .into());
        }

        if self.enrichment.timeout_seconds > 300 {
            return Err(TravelBuddiError::config(
                "Place-search timeout cannot exceed 300 seconds",
            )
            .into());
        }

        if self.cache.ttl_seconds > 7 * 24 * 60 * 60 {
            return Err(
                TravelBuddiError::config("Cache TTL cannot exceed 604800 seconds (1 week)").into(),
            );
        }

        Ok(())
    }

    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(TravelBuddiError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(TravelBuddiError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        for url in [
            &self.enrichment.opentripmap_base_url,
            &self.enrichment.google_places_base_url,
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(TravelBuddiError::config(format!(
                    "Place-search base URL '{url}' must be a valid HTTP or HTTPS URL"
                ))
                .into());
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = TravelBuddiConfig::default();
        assert_eq!(config.enrichment.provider, ProviderKind::Offline);
        assert_eq!(config.enrichment.radius_km, 5);
        assert_eq!(config.enrichment.max_results, 8);
        assert!(config.enrichment.cost_saver);
        assert_eq!(config.cache.ttl_seconds, 3600);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.server.port, 8080);
        assert!(config.enrichment.api_key.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation_empty_api_key() {
        let mut config = TravelBuddiConfig::default();
        config.enrichment.api_key = Some("  ".to_string());
        let result = config.validate_api_key();
        assert!(result.is_err());
    }

    #[test]
    fn test_config_validation_invalid_log_level() {
        let mut config = TravelBuddiConfig::default();
        config.logging.level = "invalid".to_string();
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Invalid log level"));
    }

    #[test]
    fn test_config_validation_numeric_ranges() {
        let mut config = TravelBuddiConfig::default();
        config.enrichment.radius_km = 40;
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Search radius"));

        let mut config = TravelBuddiConfig::default();
        config.enrichment.max_results = 50;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_apply_defaults_fills_zeroes() {
        let mut config = TravelBuddiConfig::default();
        config.enrichment.radius_km = 0;
        config.logging.format = String::new();
        config.apply_defaults();
        assert_eq!(config.enrichment.radius_km, 5);
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_configured_api_key_wins() {
        let mut config = TravelBuddiConfig::default();
        config.enrichment.provider = ProviderKind::OpenTripMap;
        config.enrichment.api_key = Some("otm-key-123".to_string());
        assert_eq!(
            config.enrichment.resolved_api_key().as_deref(),
            Some("otm-key-123")
        );
    }

    #[test]
    fn test_load_from_toml_file() {
        let mut file = tempfile::NamedTempFile::with_suffix(".toml").unwrap();
        writeln!(
            file,
            "[enrichment]\nprovider = \"google-places\"\nradius_km = 10\ncost_saver = false\n\n[logging]\nformat = \"json\""
        )
        .unwrap();

        let config = TravelBuddiConfig::load_from_path(Some(file.path().to_path_buf())).unwrap();
        assert_eq!(config.enrichment.provider, ProviderKind::GooglePlaces);
        assert_eq!(config.enrichment.radius_km, 10);
        assert!(!config.enrichment.cost_saver);
        assert_eq!(config.enrichment.max_results, 8);
        assert_eq!(config.logging.format, "json");
    }

    #[test]
    fn test_config_path_generation() {
        if let Some(path) = TravelBuddiConfig::get_config_path() {
            assert!(path.to_string_lossy().contains("travelbuddi"));
            assert!(path.to_string_lossy().ends_with("config.toml"));
        }
    }
}
