//! Gateway field constraints, one table per checkout group.

use std::str::FromStr;

use rust_decimal::Decimal;

use super::input::SenderType;
use super::request::ITEM_FIELDS;
use crate::validation::{Rule, RuleSet, RuleTable};

fn amount_range() -> Rule {
    Rule::Between(Decimal::new(0, 2), Decimal::new(999_999_900, 2))
}

fn whole_range(min: i64, max: i64) -> Rule {
    Rule::Between(Decimal::from(min), Decimal::from(max))
}

/// Rules for `senderEmail`, also applied to the configured sandbox address
pub fn sender_email_rules() -> RuleSet {
    RuleSet::new([Rule::Required, Rule::Email, Rule::Max(60)])
}

pub fn sender_info_rules(sender_type: SenderType) -> RuleTable {
    let table = RuleTable::new()
        .field("senderName", RuleSet::new([Rule::Required, Rule::Max(50)]))
        .field("senderAreaCode", RuleSet::new([Rule::Required, Rule::Digits(2)]))
        .field(
            "senderPhone",
            RuleSet::new([Rule::Required, Rule::DigitsBetween(8, 9)]),
        )
        .field("senderEmail", sender_email_rules());

    match sender_type {
        SenderType::Individual => {
            table.field("senderCPF", RuleSet::new([Rule::Required, Rule::Digits(11)]))
        }
        SenderType::Company => {
            table.field("senderCNPJ", RuleSet::new([Rule::Required, Rule::Digits(14)]))
        }
    }
}

pub fn sender_address_rules() -> RuleTable {
    RuleTable::new()
        .field(
            "shippingAddressStreet",
            RuleSet::new([Rule::Required, Rule::Max(80)]),
        )
        .field(
            "shippingAddressNumber",
            RuleSet::new([Rule::Required, Rule::Max(20)]),
        )
        .field("shippingAddressComplement", RuleSet::new([Rule::Max(40)]))
        .field(
            "shippingAddressDistrict",
            RuleSet::new([Rule::Required, Rule::Max(60)]),
        )
        .field(
            "shippingAddressPostalCode",
            RuleSet::new([Rule::Required, Rule::Digits(8)]),
        )
        .field(
            "shippingAddressCity",
            RuleSet::new([Rule::Required, Rule::Min(2), Rule::Max(60)]),
        )
        .field(
            "shippingAddressState",
            RuleSet::new([Rule::Required, Rule::Min(2), Rule::Max(2)]),
        )
}

fn item_field_rules(field: &str) -> RuleSet {
    match field {
        "itemId" | "itemDescription" => RuleSet::new([Rule::Required, Rule::Max(100)]),
        "itemAmount" => RuleSet::new([Rule::Required, Rule::Numeric, amount_range()]),
        _ => RuleSet::new([Rule::Required, Rule::Integer, whole_range(1, 999)]),
    }
}

/// Rules for `count` items, expanded field-major:
/// every `itemId`, then every `itemDescription`, and so on.
pub fn item_rules(count: usize) -> RuleTable {
    let mut table = RuleTable::new();
    for field in ITEM_FIELDS {
        let rules = item_field_rules(field);
        for index in 1..=count {
            table.push(format!("{}{}", field, index), rules.clone());
        }
    }
    table
}

/// The type/cost pairing mirrors the gateway integration as shipped: the
/// type code carries the currency range and the cost carries the 1..=3 code
/// range.
pub fn shipping_info_rules() -> RuleTable {
    RuleTable::new()
        .field(
            "shippingType",
            RuleSet::new([Rule::Required, Rule::Numeric, amount_range()]),
        )
        .field(
            "shippingCost",
            RuleSet::new([Rule::Required, Rule::Integer, whole_range(1, 3)]),
        )
}

/// Rule table from `(field, "rule|rule")` pairs
pub fn parse_rule_table<'a>(
    entries: impl IntoIterator<Item = (&'a str, &'a str)>,
) -> Result<RuleTable, crate::error::RuleParseError> {
    let mut table = RuleTable::new();
    for (field, expression) in entries {
        table.push(field, RuleSet::from_str(expression)?);
    }
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tables_match_gateway_rule_strings() {
        let expected = parse_rule_table([
            ("senderName", "required|max:50"),
            ("senderAreaCode", "required|digits:2"),
            ("senderPhone", "required|digits_between:8,9"),
            ("senderEmail", "required|email|max:60"),
            ("senderCNPJ", "required|digits:14"),
        ])
        .unwrap();
        assert_eq!(sender_info_rules(SenderType::Company), expected);

        let shipping = parse_rule_table([
            ("shippingType", "required|numeric|between:0.00,9999999.00"),
            ("shippingCost", "required|integer|between:1,3"),
        ])
        .unwrap();
        assert_eq!(shipping_info_rules(), shipping);
    }

    #[test]
    fn test_individual_requires_cpf() {
        let table = sender_info_rules(SenderType::Individual);
        let names: Vec<&str> = table.iter().map(|(name, _)| name).collect();
        assert_eq!(names.last(), Some(&"senderCPF"));
        assert!(!names.contains(&"senderCNPJ"));
    }

    #[test]
    fn test_item_rules_are_field_major() {
        let table = item_rules(2);
        let names: Vec<&str> = table.iter().map(|(name, _)| name).collect();
        assert_eq!(
            names,
            vec![
                "itemId1",
                "itemId2",
                "itemDescription1",
                "itemDescription2",
                "itemAmount1",
                "itemAmount2",
                "itemQuantity1",
                "itemQuantity2",
            ]
        );
    }

    #[test]
    fn test_amount_range_bounds_display() {
        assert_eq!(amount_range().to_string(), "between:0.00,9999999.00");
    }
}
