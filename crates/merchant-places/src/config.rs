//! # Places Configuration
//!
//! Provider endpoint, autocomplete timing and form options.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     MERCHANT_PLACES_ENDPOINT=https://...                               │
//! │     MERCHANT_PLACES_API_KEY=...                                        │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/merchant-portal/places.toml (Linux)                      │
//! │     ~/Library/Application Support/com.merchant.portal/places.toml      │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     800ms debounce, 5 chars minimum, 5 points of sale                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [provider]
//! endpoint = "https://places.geo.eu-central-1.amazonaws.com/v2/geocode"
//! api_key = "v1.public.xxx"
//! max_results = 5
//! countries = ["ITA"]
//! language = "it"
//! timeout_secs = 10
//!
//! [autocomplete]
//! debounce_ms = 800
//! min_query_chars = 5
//!
//! [form]
//! max_entries = 5
//! clear_all_errors_on_type_change = false
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

use merchant_core::form::FormOptions;
use merchant_core::MAX_POINTS_OF_SALE;

use crate::error::{PlacesError, PlacesResult};

// =============================================================================
// Provider Settings
// =============================================================================

/// Where and how to call the address-search service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderSettings {
    /// Geocode/autocomplete endpoint (POST, JSON body).
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Sent as the `key` query parameter when set.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Upper bound on returned candidates.
    #[serde(default = "default_max_results")]
    pub max_results: u32,

    /// ISO 3166 alpha-3 country filter.
    #[serde(default = "default_countries")]
    pub countries: Vec<String>,

    #[serde(default = "default_language")]
    pub language: Option<String>,

    /// Whole-request timeout (seconds).
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_endpoint() -> String {
    "https://places.geo.eu-central-1.amazonaws.com/v2/geocode".to_string()
}

fn default_max_results() -> u32 {
    5
}

fn default_countries() -> Vec<String> {
    vec!["ITA".to_string()]
}

fn default_language() -> Option<String> {
    Some("it".to_string())
}

fn default_timeout() -> u64 {
    10
}

impl Default for ProviderSettings {
    fn default() -> Self {
        ProviderSettings {
            endpoint: default_endpoint(),
            api_key: None,
            max_results: default_max_results(),
            countries: default_countries(),
            language: default_language(),
            timeout_secs: default_timeout(),
        }
    }
}

impl ProviderSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

// =============================================================================
// Autocomplete Settings
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutocompleteSettings {
    /// Quiet window after the last keystroke before searching.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// Shorter (trimmed) queries never reach the provider.
    #[serde(default = "default_min_query_chars")]
    pub min_query_chars: usize,
}

fn default_debounce_ms() -> u64 {
    800
}

fn default_min_query_chars() -> usize {
    5
}

impl Default for AutocompleteSettings {
    fn default() -> Self {
        AutocompleteSettings {
            debounce_ms: default_debounce_ms(),
            min_query_chars: default_min_query_chars(),
        }
    }
}

impl AutocompleteSettings {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

// =============================================================================
// Main Configuration
// =============================================================================

/// Complete configuration for the places crate and the form it feeds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacesConfig {
    #[serde(default)]
    pub provider: ProviderSettings,

    #[serde(default)]
    pub autocomplete: AutocompleteSettings,

    #[serde(default)]
    pub form: FormOptions,
}

impl PlacesConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (places.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> PlacesResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading places config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load places config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> PlacesResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| PlacesError::ConfigSaveFailed("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| PlacesError::ConfigSaveFailed(e.to_string()))?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents).map_err(|e| PlacesError::ConfigSaveFailed(e.to_string()))?;

        info!(?path, "Places config saved");
        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> PlacesResult<()> {
        let endpoint = Url::parse(&self.provider.endpoint)?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(PlacesError::InvalidUrl(format!(
                "Provider endpoint must start with http:// or https://, got: {}",
                self.provider.endpoint
            )));
        }

        if !(1..=100).contains(&self.provider.max_results) {
            return Err(PlacesError::InvalidConfig(
                "max_results must be between 1 and 100".into(),
            ));
        }

        if self.provider.timeout_secs == 0 {
            return Err(PlacesError::InvalidConfig(
                "timeout_secs must be greater than 0".into(),
            ));
        }

        if self.autocomplete.min_query_chars == 0 {
            return Err(PlacesError::InvalidConfig(
                "min_query_chars must be greater than 0".into(),
            ));
        }

        if !(1..=MAX_POINTS_OF_SALE).contains(&self.form.max_entries) {
            return Err(PlacesError::InvalidConfig(format!(
                "max_entries must be between 1 and {MAX_POINTS_OF_SALE}"
            )));
        }

        Ok(())
    }

    /// Applies `MERCHANT_*` overrides read through `lookup`.
    fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(endpoint) = lookup("MERCHANT_PLACES_ENDPOINT") {
            debug!(endpoint = %endpoint, "Overriding places endpoint from environment");
            self.provider.endpoint = endpoint;
        }

        if let Some(key) = lookup("MERCHANT_PLACES_API_KEY") {
            self.provider.api_key = Some(key).filter(|k| !k.is_empty());
        }

        if let Some(max) = lookup("MERCHANT_PLACES_MAX_RESULTS") {
            match max.parse::<u32>() {
                Ok(n) => self.provider.max_results = n,
                Err(_) => warn!(value = %max, "Ignoring non-numeric MERCHANT_PLACES_MAX_RESULTS"),
            }
        }

        if let Some(secs) = lookup("MERCHANT_PLACES_TIMEOUT_SECS") {
            if let Ok(s) = secs.parse::<u64>() {
                self.provider.timeout_secs = s;
            }
        }

        if let Some(ms) = lookup("MERCHANT_DEBOUNCE_MS") {
            if let Ok(ms) = ms.parse::<u64>() {
                debug!(debounce_ms = ms, "Overriding debounce window from environment");
                self.autocomplete.debounce_ms = ms;
            }
        }

        if let Some(chars) = lookup("MERCHANT_MIN_QUERY_CHARS") {
            if let Ok(n) = chars.parse::<usize>() {
                self.autocomplete.min_query_chars = n;
            }
        }

        if let Some(max) = lookup("MERCHANT_MAX_POINTS_OF_SALE") {
            if let Ok(n) = max.parse::<usize>() {
                self.form.max_entries = n;
            }
        }

        if let Some(flag) = lookup("MERCHANT_CLEAR_ALL_ERRORS_ON_TYPE_CHANGE") {
            match flag.to_lowercase().as_str() {
                "1" | "true" | "yes" => self.form.clear_all_errors_on_type_change = true,
                "0" | "false" | "no" => self.form.clear_all_errors_on_type_change = false,
                _ => warn!(value = %flag, "Unknown boolean in MERCHANT_CLEAR_ALL_ERRORS_ON_TYPE_CHANGE"),
            }
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "merchant", "portal")
            .map(|dirs| dirs.config_dir().join("places.toml"))
    }
}
