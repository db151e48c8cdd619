//! Input normalization functions
//!
//! This module provides the functions that clean and normalize checkout
//! fields before they are validated and stored.

use lazy_static::lazy_static;
use regex::Regex;
use rust_decimal::{Decimal, RoundingStrategy};

lazy_static! {
    /// Pattern to match runs of whitespace characters
    static ref MULTI_WHITESPACE: Regex = Regex::new(r"\s+").unwrap();

    /// Pattern to match anything that is not an ASCII digit
    static ref NON_DIGITS: Regex = Regex::new(r"[^0-9]").unwrap();
}

/// Normalize whitespace: collapse runs of spaces/newlines into a single space and trim
pub fn normalize_whitespace(value: &str) -> String {
    MULTI_WHITESPACE.replace_all(value, " ").trim().to_string()
}

/// Normalize an optional text field; a missing value becomes an empty string
pub fn normalize_whitespace_optional(value: Option<&str>) -> String {
    value.map(normalize_whitespace).unwrap_or_default()
}

/// Strip every character that is not an ASCII digit
pub fn digits_only(value: &str) -> String {
    NON_DIGITS.replace_all(value, "").to_string()
}

/// Upper-case a code field (state abbreviations)
pub fn uppercase(value: &str) -> String {
    value.to_uppercase()
}

/// Format an amount with exactly two decimal places and a `.` separator.
///
/// Rounds half away from zero and never emits a negative zero. Returns
/// `None` when the amount has too many integer digits to carry two places.
pub fn format_amount(amount: Decimal) -> Option<String> {
    let mut rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    if rounded.is_zero() {
        rounded.set_sign_positive(true);
    }
    rounded.rescale(2);
    if rounded.scale() != 2 {
        return None;
    }
    Some(rounded.to_string())
}

/// Split a digit-only phone into (area code, local number).
///
/// The area code is the first two digits; the local number is the rest.
pub fn split_phone(digits: &str) -> (String, String) {
    let split = digits
        .char_indices()
        .nth(2)
        .map(|(index, _)| index)
        .unwrap_or(digits.len());
    let (area_code, number) = digits.split_at(split);
    (area_code.to_string(), number.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn format_text(value: &str) -> Option<String> {
        format_amount(Decimal::from_str(value).unwrap())
    }

    #[test]
    fn test_normalize_whitespace() {
        assert_eq!(normalize_whitespace("João   da\tSilva"), "João da Silva");
        assert_eq!(normalize_whitespace("  multiple   spaces  "), "multiple spaces");
        assert_eq!(normalize_whitespace("line\n\nbreaks"), "line breaks");
        assert_eq!(normalize_whitespace("   "), "");
    }

    #[test]
    fn test_normalize_whitespace_optional() {
        assert_eq!(normalize_whitespace_optional(Some(" Apto  12 ")), "Apto 12");
        assert_eq!(normalize_whitespace_optional(None), "");
    }

    #[test]
    fn test_digits_only() {
        assert_eq!(digits_only("(11) 98888-7777"), "11988887777");
        assert_eq!(digits_only("123.456.789-00"), "12345678900");
        assert_eq!(digits_only("01452-000"), "01452000");
        assert_eq!(digits_only("no digits"), "");
    }

    #[test]
    fn test_uppercase() {
        assert_eq!(uppercase("sp"), "SP");
        assert_eq!(uppercase("Rj"), "RJ");
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(Decimal::from(10)).as_deref(), Some("10.00"));
        assert_eq!(format_text("1.5").as_deref(), Some("1.50"));
        assert_eq!(format_text("2.345").as_deref(), Some("2.35"));
        assert_eq!(format_text("2.344").as_deref(), Some("2.34"));
        assert_eq!(format_text("-0.001").as_deref(), Some("0.00"));
        assert_eq!(format_text("9999999").as_deref(), Some("9999999.00"));
    }

    #[test]
    fn test_format_amount_rejects_values_without_room_for_cents() {
        assert_eq!(format_amount(Decimal::MAX), None);
        assert_eq!(format_text("79228162514264337593543950335"), None);
        assert_eq!(format_text("-1000000000000000000000000000"), None);
    }

    #[test]
    fn test_split_phone() {
        assert_eq!(
            split_phone("11988887777"),
            ("11".to_string(), "988887777".to_string())
        );
        assert_eq!(split_phone("1"), ("1".to_string(), String::new()));
        assert_eq!(split_phone(""), (String::new(), String::new()));
    }
}
