//! Field validators
//!
//! Reusable rule predicates for checkout fields. Each validator receives the
//! already-normalized value and the human readable field label used in the
//! failure message.

use std::str::FromStr;

use lazy_static::lazy_static;
use regex::Regex;
use rust_decimal::Decimal;

lazy_static! {
    /// Address syntax: local part, `@`, dot-separated domain labels
    static ref EMAIL_REGEX: Regex = Regex::new(
        r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)+$"
    ).unwrap();

    /// Plain decimal notation: optional sign, fraction and exponent, no separators
    static ref NUMBER_REGEX: Regex =
        Regex::new(r"^[+-]?(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+)(?:[eE][+-]?[0-9]+)?$").unwrap();
}

/// Parse a decimal number, accepting an optional sign, a fraction and an exponent
pub fn parse_number(value: &str) -> Option<Decimal> {
    let trimmed = value.trim();
    if !is_number(trimmed) {
        return None;
    }
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .ok()
}

/// Check that text is written in plain decimal notation
pub fn is_number(value: &str) -> bool {
    NUMBER_REGEX.is_match(value.trim())
}

/// Check e-mail syntax without producing a message
pub fn is_valid_email(value: &str) -> bool {
    EMAIL_REGEX.is_match(value)
}

/// Validate that a value is present and not blank
pub fn validate_required(value: Option<&str>, label: &str) -> Result<(), String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(()),
        _ => Err(format!("The {} field is required.", label)),
    }
}

/// Validate a maximum character count
pub fn validate_max_length(value: &str, max: usize, label: &str) -> Result<(), String> {
    if value.chars().count() > max {
        return Err(format!(
            "The {} may not be greater than {} characters.",
            label, max
        ));
    }
    Ok(())
}

/// Validate a minimum character count
pub fn validate_min_length(value: &str, min: usize, label: &str) -> Result<(), String> {
    if value.chars().count() < min {
        return Err(format!("The {} must be at least {} characters.", label, min));
    }
    Ok(())
}

/// Validate a character count within bounds
pub fn validate_length_between(
    value: &str,
    min: Decimal,
    max: Decimal,
    label: &str,
) -> Result<(), String> {
    let len = Decimal::from(value.chars().count());
    if len < min || len > max {
        return Err(format!(
            "The {} must be between {} and {} characters.",
            label, min, max
        ));
    }
    Ok(())
}

/// Validate a digit-only value of an exact length
pub fn validate_digits(value: &str, length: usize, label: &str) -> Result<(), String> {
    if !is_all_digits(value) || value.len() != length {
        return Err(format!("The {} must be {} digits.", label, length));
    }
    Ok(())
}

/// Validate a digit-only value whose length is within bounds
pub fn validate_digits_between(
    value: &str,
    min: usize,
    max: usize,
    label: &str,
) -> Result<(), String> {
    if !is_all_digits(value) || value.len() < min || value.len() > max {
        return Err(format!(
            "The {} must be between {} and {} digits.",
            label, min, max
        ));
    }
    Ok(())
}

/// Validate that a value is a number
pub fn validate_numeric(value: &str, label: &str) -> Result<(), String> {
    if parse_number(value).is_none() {
        return Err(format!("The {} must be a number.", label));
    }
    Ok(())
}

/// Validate that a value is a whole number ("2" and "2.00" both pass)
pub fn validate_integer(value: &str, label: &str) -> Result<(), String> {
    match parse_number(value) {
        Some(number) if number.fract().is_zero() => Ok(()),
        _ => Err(format!("The {} must be an integer.", label)),
    }
}

/// Validate a numeric value within inclusive bounds
pub fn validate_numeric_between(
    value: Decimal,
    min: Decimal,
    max: Decimal,
    label: &str,
) -> Result<(), String> {
    if value < min || value > max {
        return Err(format!("The {} must be between {} and {}.", label, min, max));
    }
    Ok(())
}

/// Validate a numeric upper bound
pub fn validate_numeric_max(value: Decimal, max: usize, label: &str) -> Result<(), String> {
    if value > Decimal::from(max) {
        return Err(format!("The {} may not be greater than {}.", label, max));
    }
    Ok(())
}

/// Validate a numeric lower bound
pub fn validate_numeric_min(value: Decimal, min: usize, label: &str) -> Result<(), String> {
    if value < Decimal::from(min) {
        return Err(format!("The {} must be at least {}.", label, min));
    }
    Ok(())
}

/// Validate e-mail address format
pub fn validate_email(value: &str, label: &str) -> Result<(), String> {
    if !is_valid_email(value) {
        return Err(format!("The {} must be a valid email address.", label));
    }
    Ok(())
}

fn is_all_digits(value: &str) -> bool {
    !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit())
}
