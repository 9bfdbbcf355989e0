//! # Validation Module
//!
//! Field-level predicates and the user-facing messages attached to them.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: THIS MODULE                                                  │
//! │  ├── Pure predicates (email, url, phone, blank)                        │
//! │  └── Structured checks returning ValidationError (IBAN)                │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: form::engine                                                 │
//! │  ├── Picks the rule for a field + entry type                           │
//! │  └── Produces set/clear instructions with the messages below           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Registration API (server side)                               │
//! │  └── Authoritative checks at submit time                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use merchant_core::validation::{is_valid_email, is_valid_url, normalize_url};
//!
//! assert!(is_valid_email("info@bar-centrale.it"));
//! assert!(is_valid_url(&normalize_url("www.bar-centrale.it", "https")));
//! ```

use std::sync::OnceLock;

use regex::Regex;
use url::{Host, Url};

use crate::error::ValidationError;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Messages
// =============================================================================

pub const MSG_REQUIRED: &str = "Campo obbligatorio";
pub const MSG_INVALID_WEBSITE: &str = "Deve essere un sito valido";
pub const MSG_INVALID_EMAIL: &str = "Email non valida";
pub const MSG_EMAIL_MISMATCH: &str = "Le email non coincidono";
pub const MSG_INVALID_PHONE: &str = "Il numero deve avere tra 7 e 15 cifre";
pub const MSG_INCOMPLETE_ADDRESS: &str = "Indirizzo non completo, selezionane un altro";

/// Message for an empty city/zipCode/region/province.
///
/// A single space: the inputs turn red without any helper text, because the
/// address helper text already explains what to do.
pub const MSG_ADDRESS_PART_MISSING: &str = " ";

// =============================================================================
// Limits
// =============================================================================

/// URL schemes accepted for websites and geolinks.
pub const ALLOWED_URL_SCHEMES: [&str; 2] = ["http", "https"];

pub const MIN_PHONE_LEN: usize = 7;
pub const MAX_PHONE_LEN: usize = 15;

const MIN_IBAN_LEN: usize = 15;
const MAX_IBAN_LEN: usize = 34;

// =============================================================================
// String Predicates
// =============================================================================

/// True when the value is empty after trimming.
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| {
        Regex::new(
            r"^[A-Za-z0-9._%+\-]+@[A-Za-z0-9](?:[A-Za-z0-9\-]*[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9\-]*[A-Za-z0-9])?)*\.[A-Za-z]{2,}$",
        )
        .expect("valid email regex")
    })
}

/// Checks `local@domain.tld` shape.
///
/// ## Example
/// ```rust
/// use merchant_core::validation::is_valid_email;
///
/// assert!(is_valid_email("mario.rossi@example.com"));
/// assert!(!is_valid_email("mario.rossi@"));
/// assert!(!is_valid_email("mario rossi@example.com"));
/// ```
pub fn is_valid_email(value: &str) -> bool {
    email_regex().is_match(value.trim())
}

/// Prefixes `scheme://` when the value carries no scheme.
///
/// ## Example
/// ```rust
/// use merchant_core::validation::normalize_url;
///
/// assert_eq!(normalize_url("shop.it", "https"), "https://shop.it");
/// assert_eq!(normalize_url("http://shop.it", "https"), "http://shop.it");
/// ```
pub fn normalize_url(value: &str, default_scheme: &str) -> String {
    let value = value.trim();
    if value.contains("://") {
        value.to_string()
    } else {
        format!("{default_scheme}://{value}")
    }
}

fn is_valid_label(label: &str) -> bool {
    !label.is_empty()
        && label.len() <= 63
        && !label.starts_with('-')
        && !label.ends_with('-')
        && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
}

/// Validates an absolute URL against the scheme allow-list and a
/// domain-name host with a real top-level domain.
///
/// ## Rules
/// - Scheme is `http` or `https`
/// - Host is a domain name (IP literals are rejected)
/// - At least two labels, each alphanumeric with inner hyphens
/// - TLD is alphabetic, 2+ chars (or an `xn--` IDN label)
pub fn is_valid_url(value: &str) -> bool {
    let Ok(url) = Url::parse(value.trim()) else {
        return false;
    };

    if !ALLOWED_URL_SCHEMES.contains(&url.scheme()) {
        return false;
    }

    let Some(Host::Domain(domain)) = url.host() else {
        return false;
    };

    let domain = domain.trim_end_matches('.');
    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 || !labels.iter().all(|l| is_valid_label(l)) {
        return false;
    }

    let tld = labels[labels.len() - 1];
    tld.starts_with("xn--") || (tld.len() >= 2 && tld.chars().all(|c| c.is_ascii_alphabetic()))
}

/// Phone numbers are optional; when present the trimmed value must have
/// between 7 and 15 characters.
pub fn is_valid_phone(value: &str) -> bool {
    let len = value.trim().chars().count();
    len == 0 || (MIN_PHONE_LEN..=MAX_PHONE_LEN).contains(&len)
}

// =============================================================================
// IBAN
// =============================================================================

/// Strips spaces and uppercases an IBAN.
pub fn compact_iban(iban: &str) -> String {
    iban.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_uppercase)
        .collect()
}

/// Validates an IBAN with the ISO 13616 mod-97 check.
///
/// ## Example
/// ```rust
/// use merchant_core::validation::validate_iban;
///
/// assert!(validate_iban("IT60 X054 2811 1010 0000 0123 456").is_ok());
/// assert!(validate_iban("IT61X0542811101000000123456").is_err());
/// ```
pub fn validate_iban(iban: &str) -> ValidationResult<()> {
    let iban = compact_iban(iban);

    if iban.is_empty() {
        return Err(ValidationError::Required {
            field: "iban".to_string(),
        });
    }

    if !(MIN_IBAN_LEN..=MAX_IBAN_LEN).contains(&iban.len()) {
        return Err(ValidationError::Length {
            field: "iban".to_string(),
            min: MIN_IBAN_LEN,
            max: MAX_IBAN_LEN,
        });
    }

    let bytes = iban.as_bytes();
    if !bytes[..2].iter().all(u8::is_ascii_uppercase) || !bytes[2..4].iter().all(u8::is_ascii_digit)
    {
        return Err(ValidationError::InvalidFormat {
            field: "iban".to_string(),
            reason: "must start with a country code and two check digits".to_string(),
        });
    }

    if !bytes.iter().all(u8::is_ascii_alphanumeric) {
        return Err(ValidationError::InvalidFormat {
            field: "iban".to_string(),
            reason: "must contain only letters and digits".to_string(),
        });
    }

    // Move the first four chars to the end, letters become 10..=35.
    let rearranged = iban[4..].chars().chain(iban[..4].chars());
    let mut remainder: u32 = 0;
    for c in rearranged {
        let value = c.to_digit(36).unwrap_or(0);
        remainder = if value >= 10 {
            (remainder * 100 + value) % 97
        } else {
            (remainder * 10 + value) % 97
        };
    }

    if remainder != 1 {
        return Err(ValidationError::Checksum {
            field: "iban".to_string(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_blank() {
        assert!(is_blank(""));
        assert!(is_blank("   "));
        assert!(!is_blank(" a "));
    }

    #[test]
    fn test_is_valid_email() {
        assert!(is_valid_email("mario.rossi@example.com"));
        assert!(is_valid_email("info+pos@bar-centrale.co.it"));
        assert!(is_valid_email("  spaced@example.it  "));

        assert!(!is_valid_email(""));
        assert!(!is_valid_email("mario"));
        assert!(!is_valid_email("mario@example"));
        assert!(!is_valid_email("mario@@example.com"));
        assert!(!is_valid_email("mario rossi@example.com"));
        assert!(!is_valid_email("mario@-example.com"));
    }

    #[test]
    fn test_normalize_url() {
        assert_eq!(normalize_url("shop.it", "http"), "http://shop.it");
        assert_eq!(normalize_url(" shop.it ", "https"), "https://shop.it");
        assert_eq!(normalize_url("https://shop.it", "http"), "https://shop.it");
    }

    #[test]
    fn test_is_valid_url() {
        assert!(is_valid_url("https://www.bar-centrale.it"));
        assert!(is_valid_url("http://maps.app.goo.gl/abc123"));
        assert!(is_valid_url("https://shop.example.com/path?q=1"));

        assert!(!is_valid_url("shop.it")); // no scheme
        assert!(!is_valid_url("ftp://shop.it"));
        assert!(!is_valid_url("https://localhost"));
        assert!(!is_valid_url("https://192.168.1.1"));
        assert!(!is_valid_url("https://shop.i"));
        assert!(!is_valid_url("https://shop.123"));
        assert!(!is_valid_url("https://-shop.it"));
        assert!(!is_valid_url("https://ciao"));
    }

    #[test]
    fn test_is_valid_phone() {
        assert!(is_valid_phone(""));
        assert!(is_valid_phone("0612345"));
        assert!(is_valid_phone(" +39061234567 "));
        assert!(is_valid_phone("123456789012345"));

        assert!(!is_valid_phone("123456"));
        assert!(!is_valid_phone("1234567890123456"));
    }

    #[test]
    fn test_validate_iban() {
        assert!(validate_iban("IT60X0542811101000000123456").is_ok());
        assert!(validate_iban("it60 x054 2811 1010 0000 0123 456").is_ok());
        assert!(validate_iban("GB82WEST12345698765432").is_ok());

        assert!(matches!(
            validate_iban(""),
            Err(ValidationError::Required { .. })
        ));
        assert!(matches!(
            validate_iban("IT60X05"),
            Err(ValidationError::Length { .. })
        ));
        assert!(matches!(
            validate_iban("1T60X0542811101000000123456"),
            Err(ValidationError::InvalidFormat { .. })
        ));
        assert!(matches!(
            validate_iban("IT61X0542811101000000123456"),
            Err(ValidationError::Checksum { .. })
        ));
    }
}
