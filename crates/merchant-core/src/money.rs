//! # Money Module
//!
//! Euro amounts as integer cents, with Italian display formatting.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  The portal APIs return amounts as JSON numbers (20.3, 1234.5).         │
//! │  Summing refunds or reward batches as floats drifts:                   │
//! │    0.1 + 0.2 = 0.30000000000000004                                      │
//! │                                                                         │
//! │  OUR SOLUTION: convert once at the edge, then integer cents            │
//! │    Money::from_euros_f64(20.3) → 2030 cents → "20,30 €"                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use merchant_core::money::Money;
//!
//! let refund = Money::from_cents(2030);
//! assert_eq!(refund.format_it(), "20,30 €");
//!
//! assert_eq!(Money::from_euros_f64(20.3), Some(refund));
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// A euro amount in cents.
///
/// ## Design Decisions
/// - **i64 (signed)**: refunds and reversals are negative
/// - **Single field tuple struct**: zero-cost abstraction over i64
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Converts an API float amount, rounding half away from zero to the
    /// nearest cent.
    ///
    /// Returns `None` for NaN, infinities and values outside the i64 range.
    ///
    /// ## Example
    /// ```rust
    /// use merchant_core::money::Money;
    ///
    /// assert_eq!(Money::from_euros_f64(20.3), Some(Money::from_cents(2030)));
    /// assert_eq!(Money::from_euros_f64(0.125), Some(Money::from_cents(13)));
    /// assert!(Money::from_euros_f64(f64::NAN).is_none());
    /// ```
    pub fn from_euros_f64(euros: f64) -> Option<Self> {
        if !euros.is_finite() {
            return None;
        }
        let cents = (euros * 100.0).round();
        if cents < i64::MIN as f64 || cents > i64::MAX as f64 {
            return None;
        }
        Some(Money(cents as i64))
    }

    /// Cent part, always 0-99.
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Italian display: `.` groups thousands, `,` before cents, `€` suffix.
    ///
    /// ## Example
    /// ```rust
    /// use merchant_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(123_456_789).format_it(), "1.234.567,89 €");
    /// assert_eq!(Money::from_cents(-550).format_it(), "-5,50 €");
    /// ```
    pub fn format_it(&self) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        let euros = (self.0 / 100).unsigned_abs().to_string();

        let mut grouped = String::with_capacity(euros.len() + euros.len() / 3);
        for (i, digit) in euros.chars().enumerate() {
            if i > 0 && (euros.len() - i) % 3 == 0 {
                grouped.push('.');
            }
            grouped.push(digit);
        }

        format!("{sign}{grouped},{:02} €", self.cents_part())
    }
}
