//! # Error Types
//!
//! Domain-specific error types for merchant-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  merchant-core errors (this file)                                      │
//! │  ├── CoreError        - Form container misuse (bad index, stale id)    │
//! │  └── ValidationError  - Structured checks (IBAN, entry type names)     │
//! │                                                                         │
//! │  merchant-places errors (separate crate)                               │
//! │  └── PlacesError      - Provider / config failures                     │
//! │                                                                         │
//! │  NOT errors: per-field form messages. Those are data in the ErrorMap   │
//! │  and are shown inline as helper text.                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Errors raised by the point-of-sale form container.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The entry index does not exist in the current list.
    #[error("Entry index {index} out of range (form has {len} entries)")]
    IndexOutOfRange { index: usize, len: usize },

    /// No entry carries this id.
    ///
    /// ## When This Occurs
    /// An autocomplete selection arrives for an entry that was removed
    /// (or the form was reset) while the search was pending.
    #[error("Entry not found: {0}")]
    EntryNotFound(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Structured validation failures.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Value length is outside the accepted range.
    #[error("{field} must be between {min} and {max} characters")]
    Length { field: String, min: usize, max: usize },

    /// Invalid format (e.g., unknown characters, unknown enum value).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Checksum digits do not match the payload.
    #[error("{field} checksum mismatch")]
    Checksum { field: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;
