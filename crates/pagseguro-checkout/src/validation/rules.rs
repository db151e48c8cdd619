//! Rule primitives, rule sets and the field/rule tables the validator walks.
//!
//! Rules are built in code, but a [`RuleSet`] can also be parsed from the
//! gateway documentation's pipe syntax (`"required|digits_between:8,9"`).

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::ser::{Serialize, Serializer};

use crate::error::RuleParseError;

/// A single validation constraint
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rule {
    Required,
    Max(usize),
    Min(usize),
    Digits(usize),
    DigitsBetween(usize, usize),
    Numeric,
    Integer,
    Between(Decimal, Decimal),
    Email,
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rule::Required => write!(f, "required"),
            Rule::Max(n) => write!(f, "max:{}", n),
            Rule::Min(n) => write!(f, "min:{}", n),
            Rule::Digits(n) => write!(f, "digits:{}", n),
            Rule::DigitsBetween(a, b) => write!(f, "digits_between:{},{}", a, b),
            Rule::Numeric => write!(f, "numeric"),
            Rule::Integer => write!(f, "integer"),
            Rule::Between(a, b) => write!(f, "between:{},{}", a, b),
            Rule::Email => write!(f, "email"),
        }
    }
}

impl FromStr for Rule {
    type Err = RuleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (name, params) = match s.split_once(':') {
            Some((name, params)) => (name, Some(params)),
            None => (s, None),
        };

        match (name, params) {
            ("", _) => Err(RuleParseError::Empty),
            ("required", None) => Ok(Rule::Required),
            ("numeric", None) => Ok(Rule::Numeric),
            ("integer", None) => Ok(Rule::Integer),
            ("email", None) => Ok(Rule::Email),
            ("max", Some(p)) => Ok(Rule::Max(parse_count(name, p)?)),
            ("min", Some(p)) => Ok(Rule::Min(parse_count(name, p)?)),
            ("digits", Some(p)) => Ok(Rule::Digits(parse_count(name, p)?)),
            ("digits_between", Some(p)) => {
                let (a, b) = split_pair(name, p)?;
                Ok(Rule::DigitsBetween(parse_count(name, a)?, parse_count(name, b)?))
            }
            ("between", Some(p)) => {
                let (a, b) = split_pair(name, p)?;
                Ok(Rule::Between(parse_bound(name, a)?, parse_bound(name, b)?))
            }
            _ => Err(RuleParseError::UnknownRule(s.to_string())),
        }
    }
}

fn invalid(rule: &str, value: &str) -> RuleParseError {
    RuleParseError::InvalidParameter {
        rule: rule.to_string(),
        value: value.to_string(),
    }
}

fn parse_count(rule: &str, value: &str) -> Result<usize, RuleParseError> {
    value.trim().parse().map_err(|_| invalid(rule, value))
}

fn parse_bound(rule: &str, value: &str) -> Result<Decimal, RuleParseError> {
    Decimal::from_str(value.trim()).map_err(|_| invalid(rule, value))
}

fn split_pair<'a>(rule: &str, params: &'a str) -> Result<(&'a str, &'a str), RuleParseError> {
    params.split_once(',').ok_or_else(|| invalid(rule, params))
}

/// Ordered rules for one field
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    pub fn new(rules: impl IntoIterator<Item = Rule>) -> Self {
        Self {
            rules: rules.into_iter().collect(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter()
    }

    pub fn contains(&self, rule: &Rule) -> bool {
        self.rules.contains(rule)
    }

    /// Size rules compare values instead of lengths when the field is numeric
    pub fn is_numeric(&self) -> bool {
        self.rules
            .iter()
            .any(|rule| matches!(rule, Rule::Numeric | Rule::Integer))
    }
}

impl fmt::Display for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.rules.iter().map(Rule::to_string).collect();
        write!(f, "{}", parts.join("|"))
    }
}

impl FromStr for RuleSet {
    type Err = RuleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().is_empty() {
            return Err(RuleParseError::Empty);
        }
        s.split('|')
            .map(Rule::from_str)
            .collect::<Result<Vec<_>, _>>()
            .map(RuleSet::new)
    }
}

/// Field name → rule set, walked in insertion order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleTable {
    entries: Vec<(String, RuleSet)>,
}

impl RuleTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a field's rules, builder style
    pub fn field(mut self, name: impl Into<String>, rules: RuleSet) -> Self {
        self.push(name, rules);
        self
    }

    pub fn push(&mut self, name: impl Into<String>, rules: RuleSet) {
        self.entries.push((name.into(), rules));
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RuleSet)> {
        self.entries.iter().map(|(name, rules)| (name.as_str(), rules))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Normalized field values keyed by wire name, in insertion order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldSet {
    entries: Vec<(String, String)>,
}

impl FieldSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a value, keeping the original position on replace
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(key, _)| *key == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_pairs(self) -> Vec<(String, String)> {
        self.entries
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FieldSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut fields = FieldSet::new();
        for (key, value) in iter {
            fields.insert(key, value);
        }
        fields
    }
}

impl Serialize for FieldSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rule_set() {
        let rules: RuleSet = "required|digits_between:8,9".parse().unwrap();
        assert_eq!(
            rules,
            RuleSet::new([Rule::Required, Rule::DigitsBetween(8, 9)])
        );
    }

    #[test]
    fn test_rule_set_display_round_trips() {
        let text = "required|numeric|between:0.00,9999999.00";
        let rules: RuleSet = text.parse().unwrap();
        assert_eq!(rules.to_string(), text);
    }

    #[test]
    fn test_parse_rejects_unknown_and_malformed_rules() {
        assert_eq!(
            "required|uuid".parse::<RuleSet>(),
            Err(RuleParseError::UnknownRule("uuid".to_string()))
        );
        assert!(matches!(
            "max:fifty".parse::<RuleSet>(),
            Err(RuleParseError::InvalidParameter { .. })
        ));
        assert!(matches!(
            "between:1".parse::<RuleSet>(),
            Err(RuleParseError::InvalidParameter { .. })
        ));
        assert_eq!("".parse::<RuleSet>(), Err(RuleParseError::Empty));
        assert_eq!("required|".parse::<RuleSet>(), Err(RuleParseError::Empty));
    }

    #[test]
    fn test_parameterless_rule_with_parameter_is_unknown() {
        assert!(matches!(
            "required:1".parse::<Rule>(),
            Err(RuleParseError::UnknownRule(_))
        ));
    }

    #[test]
    fn test_is_numeric() {
        assert!(RuleSet::new([Rule::Required, Rule::Integer]).is_numeric());
        assert!(!RuleSet::new([Rule::Required, Rule::Max(50)]).is_numeric());
    }

    #[test]
    fn test_field_set_insert_replaces_in_place() {
        let mut fields = FieldSet::new();
        fields.insert("itemId1", "A");
        fields.insert("itemDescription1", "Caneta");
        fields.insert("itemId1", "B");

        assert_eq!(fields.len(), 2);
        assert_eq!(fields.get("itemId1"), Some("B"));
        assert_eq!(
            fields.keys().collect::<Vec<_>>(),
            vec!["itemId1", "itemDescription1"]
        );
    }

    #[test]
    fn test_rule_table_keeps_order() {
        let table = RuleTable::new()
            .field("b", RuleSet::new([Rule::Required]))
            .field("a", RuleSet::new([Rule::Email]));
        let names: Vec<&str> = table.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["b", "a"]);
        assert_eq!(table.len(), 2);
    }
}
