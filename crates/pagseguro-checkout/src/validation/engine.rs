//! The pluggable validation engine.
//!
//! A [`Validator`] takes the normalized [`FieldSet`] of one checkout group and
//! the [`RuleTable`] for that group and reports the first violation. Fields
//! are checked in table order and, within a field, in rule order.

use rust_decimal::Decimal;

use super::rules::{FieldSet, Rule, RuleSet, RuleTable};
use super::validators::{
    parse_number, validate_digits, validate_digits_between, validate_email, validate_integer,
    validate_length_between, validate_max_length, validate_min_length, validate_numeric,
    validate_numeric_between, validate_numeric_max, validate_numeric_min, validate_required,
};
use crate::error::ValidationFailure;

/// Trait for engines that check a field set against a rule table
pub trait Validator {
    /// Return the first failing rule, if any
    fn validate(&self, fields: &FieldSet, rules: &RuleTable) -> Result<(), ValidationFailure>;
}

/// Default engine built on the predicate functions in `validators`
#[derive(Debug, Default, Clone, Copy)]
pub struct RuleValidator;

impl Validator for RuleValidator {
    fn validate(&self, fields: &FieldSet, rules: &RuleTable) -> Result<(), ValidationFailure> {
        for (field, rule_set) in rules.iter() {
            check_field(field, fields.get(field), rule_set)
                .map_err(|message| ValidationFailure::new(field, message))?;
        }
        Ok(())
    }
}

/// Check one value against its rules.
///
/// A missing or blank value can only fail `required`; every other rule is
/// skipped for it.
pub fn check_field(field: &str, value: Option<&str>, rules: &RuleSet) -> Result<(), String> {
    let label = attribute_label(field);

    let text = match value {
        Some(v) if !v.trim().is_empty() => v,
        _ => {
            if rules.contains(&Rule::Required) {
                return validate_required(value, &label);
            }
            return Ok(());
        }
    };

    let numeric = rules.is_numeric();
    for rule in rules.iter() {
        match rule {
            Rule::Required => {}
            Rule::Max(max) => match numeric_size(text, numeric) {
                Some(size) => validate_numeric_max(size, *max, &label)?,
                None => validate_max_length(text, *max, &label)?,
            },
            Rule::Min(min) => match numeric_size(text, numeric) {
                Some(size) => validate_numeric_min(size, *min, &label)?,
                None => validate_min_length(text, *min, &label)?,
            },
            Rule::Between(min, max) => match numeric_size(text, numeric) {
                Some(size) => validate_numeric_between(size, *min, *max, &label)?,
                None => validate_length_between(text, *min, *max, &label)?,
            },
            Rule::Digits(length) => validate_digits(text, *length, &label)?,
            Rule::DigitsBetween(min, max) => validate_digits_between(text, *min, *max, &label)?,
            Rule::Numeric => validate_numeric(text, &label)?,
            Rule::Integer => validate_integer(text, &label)?,
            Rule::Email => validate_email(text, &label)?,
        }
    }
    Ok(())
}

fn numeric_size(text: &str, numeric: bool) -> Option<Decimal> {
    if numeric {
        parse_number(text)
    } else {
        None
    }
}

/// Turn a wire field name into the words used in messages.
///
/// `senderAreaCode` → `sender area code`, `senderCPF` → `sender cpf`,
/// `itemId12` → `item id 12`.
pub fn attribute_label(field: &str) -> String {
    let chars: Vec<char> = field.chars().collect();
    let mut label = String::with_capacity(field.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if i > 0 {
            let prev = chars[i - 1];
            let next = chars.get(i + 1).copied();
            let boundary = if c.is_uppercase() {
                prev.is_lowercase()
                    || prev.is_ascii_digit()
                    || (prev.is_uppercase() && next.is_some_and(char::is_lowercase))
            } else if c.is_ascii_digit() {
                prev.is_alphabetic()
            } else {
                c.is_alphabetic() && prev.is_ascii_digit()
            };
            if boundary {
                label.push(' ');
            }
        }
        label.extend(c.to_lowercase());
    }

    label.replace('_', " ")
}
