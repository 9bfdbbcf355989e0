//! # merchant-places: Address Autocomplete for the Merchant Portal
//!
//! Debounced, race-free address search feeding the point-of-sale form in
//! `merchant-core`.
//!
//! ## Architecture Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Address Lookup Flow                                │
//! │                                                                         │
//! │  keystroke (entry id, text)                                            │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌────────────────┐   quiet 800ms   ┌──────────────────────────────┐   │
//! │  │   Debouncer    │ ──────────────► │    AddressAutocomplete       │   │
//! │  │ one timer per  │                 │ min 5 chars, request ids,    │   │
//! │  │ entry id       │                 │ options / loading / error    │   │
//! │  └────────────────┘                 └──────────────┬───────────────┘   │
//! │                                                    │                    │
//! │                                                    ▼                    │
//! │                                     ┌──────────────────────────────┐   │
//! │                                     │   AddressSearchProvider      │   │
//! │                                     │   HttpPlacesProvider (POST)  │   │
//! │                                     └──────────────────────────────┘   │
//! │                                                                         │
//! │  selection ──► AddressLookup::select ──► PointOfSaleForm               │
//! │                                          ::apply_address_selection      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//! - [`config`] - provider endpoint, debounce window, form options
//! - [`provider`] - `AddressSearchProvider` trait and HTTP client
//! - [`autocomplete`] - dropdown state of one address input
//! - [`debounce`] - keyed trailing debouncer
//! - [`lookup`] - per-entry adapters and selection into the form
//! - [`error`] - places error types

// =============================================================================
// Module Declarations
// =============================================================================

pub mod autocomplete;
pub mod config;
pub mod debounce;
pub mod error;
pub mod lookup;
pub mod provider;

#[cfg(test)]
mod test_support;

// =============================================================================
// Re-exports
// =============================================================================

pub use autocomplete::{AddressAutocomplete, AutocompleteState, SearchOutcome, SEARCH_ERROR_MESSAGE};
pub use config::{AutocompleteSettings, PlacesConfig, ProviderSettings};
pub use debounce::Debouncer;
pub use error::{PlacesError, PlacesResult};
pub use lookup::AddressLookup;
pub use provider::{AddressSearchProvider, HttpPlacesProvider};
