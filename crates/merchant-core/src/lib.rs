//! # merchant-core: Point-of-Sale Registration Logic
//!
//! Pure logic behind the merchant portal's point-of-sale registration form
//! and its display helpers. Zero I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Merchant Portal Architecture                        │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Frontend (render layer)                       │   │
//! │  │    POS entry cards ──► helper texts ──► submit button           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ field events / entries + errors        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ merchant-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   form    │  │ validation│  │  format   │  │   │
//! │  │   │  Entry    │  │  engine   │  │  email    │  │  IBAN     │  │   │
//! │  │   │  PosField │  │  state    │  │  url      │  │  currency │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO TIMERS • NO NETWORK                               │   │
//! │  └─────────────────────────────▲───────────────────────────────────┘   │
//! │                                │ AddressOption                          │
//! │  ┌─────────────────────────────┴───────────────────────────────────┐   │
//! │  │          merchant-places (autocomplete, debounce, HTTP)         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - `PointOfSaleEntry`, `SalesPointType`, `PosField`
//! - [`form`] - validation engine and multi-entry container
//! - [`address`] - provider address shapes and normalization
//! - [`validation`] - field predicates and messages
//! - [`money`] / [`format`] - display helpers
//! - [`error`] - domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use merchant_core::form::{FormOptions, NoopListener, PointOfSaleForm};
//! use merchant_core::PosField;
//!
//! let mut form = PointOfSaleForm::new(FormOptions::default(), NoopListener);
//! form.change_field(0, PosField::FranchiseName, "").unwrap();
//! assert_eq!(form.errors()[&0][&PosField::FranchiseName], "Campo obbligatorio");
//!
//! for _ in 0..10 {
//!     form.add_entry();
//! }
//! assert_eq!(form.len(), 5);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod address;
pub mod error;
pub mod form;
pub mod format;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use address::{AddressOption, SearchResponse, StructuredAddress};
pub use error::{CoreError, CoreResult, ValidationError};
pub use form::{ErrorMap, FieldErrors, FormListener, FormOptions, PointOfSaleForm};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum points of sale registered in one submission.
pub const MAX_POINTS_OF_SALE: usize = 5;
