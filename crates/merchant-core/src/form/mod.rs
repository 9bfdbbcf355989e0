//! # Point-of-Sale Form
//!
//! The multi-entry registration form: 1 to 5 drafts, each validated field
//! by field, with entries and errors pushed to the parent after every
//! change.
//!
//! - [`engine`] - field rules (pure)
//! - [`errors`] - error map shape and helpers
//! - [`state`] - the entry container and its listener

pub mod engine;
pub mod errors;
pub mod state;

pub use engine::{
    missing_required_fields, required_fields, validate_field, FieldOutcome, FieldTrigger,
    ValidationShadow,
};
pub use errors::{clear_field_error, error_count, merge_errors, set_field_error, ErrorMap, FieldErrors};
pub use state::{FormListener, FormOptions, NoopListener, PointOfSaleForm};
