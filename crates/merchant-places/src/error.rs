//! # Places Error Types
//!
//! ## Error Categories
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Places Error Categories                            │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │  Configuration  │  │    Provider     │  │       Form              │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  InvalidConfig  │  │  Http           │  │  Core (stale entry id,  │ │
//! │  │  InvalidUrl     │  │  Status         │  │  bad index)             │ │
//! │  │  ConfigLoad/Save│  │  Deserialize    │  │                         │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! │                                                                         │
//! │  None of these reach the merchant as-is: the autocomplete adapter      │
//! │  turns provider failures into a fixed status string.                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Result type alias for places operations.
pub type PlacesResult<T> = Result<T, PlacesError>;

#[derive(Debug, Error)]
pub enum PlacesError {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    #[error("Invalid places configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid endpoint URL: {0}")]
    InvalidUrl(String),

    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),

    #[error("Failed to save config: {0}")]
    ConfigSaveFailed(String),

    // =========================================================================
    // Provider Errors
    // =========================================================================
    /// Network or TLS failure from the HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider answered with a non-success status.
    #[error("Provider returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The provider body did not match the expected shape.
    #[error("Failed to parse provider response: {0}")]
    Deserialize(#[from] serde_json::Error),

    // =========================================================================
    // Form Errors
    // =========================================================================
    /// The dropdown has no option at this position.
    #[error("No address option at index {0}")]
    OptionNotFound(usize),

    #[error(transparent)]
    Core(#[from] merchant_core::CoreError),
}

impl From<std::io::Error> for PlacesError {
    fn from(err: std::io::Error) -> Self {
        PlacesError::ConfigLoadFailed(err.to_string())
    }
}

impl From<url::ParseError> for PlacesError {
    fn from(err: url::ParseError) -> Self {
        PlacesError::InvalidUrl(err.to_string())
    }
}

impl From<toml::de::Error> for PlacesError {
    fn from(err: toml::de::Error) -> Self {
        PlacesError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::ser::Error> for PlacesError {
    fn from(err: toml::ser::Error) -> Self {
        PlacesError::ConfigSaveFailed(err.to_string())
    }
}
