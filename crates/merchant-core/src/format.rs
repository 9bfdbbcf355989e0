//! Display helpers shared by the portal tables (refunds, transactions,
//! reward batches, bank details).

use chrono::{DateTime, TimeZone};
use std::fmt::Display;

use crate::money::Money;
use crate::validation::compact_iban;

/// Placeholder shown for missing values.
pub const EMPTY_VALUE: &str = "-";

/// Italian IBAN layout: country, check digits, CIN, ABI, CAB, account.
const IBAN_GROUPS: [usize; 5] = [2, 2, 1, 5, 5];

/// Groups an IBAN as `IT 03 M 03002 03280 794663157929`.
///
/// Whitespace is dropped and letters uppercased first. Short inputs keep
/// whatever groups they fill; empty input gives an empty string.
///
/// ## Example
/// ```rust
/// use merchant_core::format::format_iban;
///
/// assert_eq!(
///     format_iban("IT03M0300203280794663157929"),
///     "IT 03 M 03002 03280 794663157929"
/// );
/// ```
pub fn format_iban(iban: &str) -> String {
    let compact: Vec<char> = compact_iban(iban).chars().collect();
    let mut groups: Vec<String> = Vec::with_capacity(IBAN_GROUPS.len() + 1);

    let mut start = 0;
    for width in IBAN_GROUPS {
        if start >= compact.len() {
            break;
        }
        let end = (start + width).min(compact.len());
        groups.push(compact[start..end].iter().collect());
        start = end;
    }
    if start < compact.len() {
        groups.push(compact[start..].iter().collect());
    }

    groups.join(" ")
}

/// Formats an API amount in euros, `-` when absent.
///
/// ## Example
/// ```rust
/// use merchant_core::format::formatted_currency;
///
/// assert!(formatted_currency(Some(20.3)).contains("20,30"));
/// assert_eq!(formatted_currency(None), "-");
/// ```
pub fn formatted_currency(amount: Option<f64>) -> String {
    amount
        .and_then(Money::from_euros_f64)
        .map(|money| money.format_it())
        .unwrap_or_else(|| EMPTY_VALUE.to_string())
}

/// Same as [`formatted_currency`] for amounts already in cents.
pub fn formatted_currency_cents(cents: Option<i64>) -> String {
    cents
        .map(|c| Money::from_cents(c).format_it())
        .unwrap_or_else(|| EMPTY_VALUE.to_string())
}

/// `dd/mm/yyyy`
pub fn format_date<Tz: TimeZone>(date: &DateTime<Tz>) -> String
where
    Tz::Offset: Display,
{
    date.format("%d/%m/%Y").to_string()
}

/// `dd/mm/yyyy HH:MM`
pub fn format_date_time<Tz: TimeZone>(date: &DateTime<Tz>) -> String
where
    Tz::Offset: Display,
{
    date.format("%d/%m/%Y %H:%M").to_string()
}

pub fn format_optional_date<Tz: TimeZone>(date: Option<&DateTime<Tz>>) -> String
where
    Tz::Offset: Display,
{
    date.map(|d| format_date(d))
        .unwrap_or_else(|| EMPTY_VALUE.to_string())
}

/// Formats an RFC 3339 timestamp as returned by the APIs, keeping its
/// offset. Unparseable input gives `-`.
pub fn format_api_date(raw: &str) -> String {
    DateTime::parse_from_rfc3339(raw.trim())
        .map(|date| format_date(&date))
        .unwrap_or_else(|_| EMPTY_VALUE.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_format_iban() {
        assert_eq!(
            format_iban("IT03M0300203280794663157929"),
            "IT 03 M 03002 03280 794663157929"
        );
        assert_eq!(
            format_iban(" it03 m030 0203 2807 9466 3157 929"),
            "IT 03 M 03002 03280 794663157929"
        );
        assert_eq!(format_iban("IT03M03"), "IT 03 M 03");
        assert_eq!(format_iban(""), "");
    }

    #[test]
    fn test_formatted_currency() {
        assert_eq!(formatted_currency(Some(20.3)), "20,30 €");
        assert_eq!(formatted_currency(Some(0.0)), "0,00 €");
        assert_eq!(formatted_currency(Some(1234.5)), "1.234,50 €");
        assert_eq!(formatted_currency(Some(-7.25)), "-7,25 €");
        assert_eq!(formatted_currency(None), "-");
        assert_eq!(formatted_currency(Some(f64::NAN)), "-");
    }

    #[test]
    fn test_formatted_currency_cents() {
        assert_eq!(formatted_currency_cents(Some(2030)), "20,30 €");
        assert_eq!(formatted_currency_cents(None), "-");
    }

    #[test]
    fn test_date_formatting() {
        let date = Utc.with_ymd_and_hms(2024, 3, 7, 9, 5, 0).unwrap();
        assert_eq!(format_date(&date), "07/03/2024");
        assert_eq!(format_date_time(&date), "07/03/2024 09:05");
        assert_eq!(format_optional_date(Some(&date)), "07/03/2024");
        assert_eq!(format_optional_date::<Utc>(None), "-");
    }

    #[test]
    fn test_format_api_date() {
        assert_eq!(format_api_date("2024-12-31T23:30:00+01:00"), "31/12/2024");
        assert_eq!(format_api_date("yesterday"), "-");
    }
}
