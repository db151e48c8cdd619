//! Loosely-typed checkout inputs.
//!
//! Every record deserializes from the gateway's own key names
//! (`senderName`, `shippingAddressStreet`, `itemAmount`, ...). All fields are
//! optional here: a missing value is reported by the `required` rule, not by
//! the deserializer.

use std::fmt;
use std::str::FromStr;

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::ValidationFailure;
use crate::validation::{format_amount, is_number, parse_number};

/// A scalar that may arrive as a number or as text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LooseValue {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl LooseValue {
    pub fn to_text(&self) -> String {
        match self {
            LooseValue::Integer(n) => n.to_string(),
            LooseValue::Float(n) => n.to_string(),
            LooseValue::Text(s) => s.clone(),
        }
    }

    pub fn to_decimal(&self) -> Option<Decimal> {
        match self {
            LooseValue::Integer(n) => Some(Decimal::from(*n)),
            LooseValue::Float(n) => Decimal::from_f64(*n),
            LooseValue::Text(s) => parse_number(s),
        }
    }

    /// Whether the value is a finite number, whether or not it fits a `Decimal`
    pub fn is_number(&self) -> bool {
        match self {
            LooseValue::Integer(_) => true,
            LooseValue::Float(n) => n.is_finite(),
            LooseValue::Text(s) => is_number(s),
        }
    }

    /// Two-place amount text, or the trimmed raw text when it cannot be formatted
    pub fn to_amount(&self) -> String {
        self.to_decimal()
            .and_then(format_amount)
            .unwrap_or_else(|| self.to_text().trim().to_string())
    }
}

impl fmt::Display for LooseValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_text())
    }
}

impl From<i64> for LooseValue {
    fn from(value: i64) -> Self {
        LooseValue::Integer(value)
    }
}

impl From<i32> for LooseValue {
    fn from(value: i32) -> Self {
        LooseValue::Integer(value.into())
    }
}

impl From<u32> for LooseValue {
    fn from(value: u32) -> Self {
        LooseValue::Integer(value.into())
    }
}

impl From<f64> for LooseValue {
    fn from(value: f64) -> Self {
        LooseValue::Float(value)
    }
}

impl From<Decimal> for LooseValue {
    fn from(value: Decimal) -> Self {
        LooseValue::Text(value.to_string())
    }
}

impl From<&str> for LooseValue {
    fn from(value: &str) -> Self {
        LooseValue::Text(value.to_string())
    }
}

impl From<String> for LooseValue {
    fn from(value: String) -> Self {
        LooseValue::Text(value)
    }
}

/// Buyer category; selects which tax id the sender info must carry
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SenderType {
    /// Pessoa física, identified by CPF
    #[default]
    #[serde(rename = "F", alias = "individual")]
    Individual,
    /// Pessoa jurídica, identified by CNPJ
    #[serde(rename = "J", alias = "company")]
    Company,
}

impl SenderType {
    pub fn code(&self) -> &'static str {
        match self {
            SenderType::Individual => "F",
            SenderType::Company => "J",
        }
    }
}

impl fmt::Display for SenderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SenderType::Individual => write!(f, "individual"),
            SenderType::Company => write!(f, "company"),
        }
    }
}

impl FromStr for SenderType {
    type Err = ValidationFailure;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "f" | "individual" => Ok(SenderType::Individual),
            "j" | "company" => Ok(SenderType::Company),
            _ => Err(ValidationFailure::new(
                "senderType",
                "The selected sender type is invalid.",
            )),
        }
    }
}

/// Buyer identity as supplied by the caller
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SenderInfoInput {
    #[serde(rename = "senderName", default)]
    pub name: Option<String>,
    #[serde(rename = "senderPhone", default)]
    pub phone: Option<String>,
    #[serde(rename = "senderEmail", default)]
    pub email: Option<String>,
    #[serde(rename = "senderCPF", default)]
    pub cpf: Option<String>,
    #[serde(rename = "senderCNPJ", default)]
    pub cnpj: Option<String>,
}

/// Buyer address as supplied by the caller
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SenderAddressInput {
    #[serde(rename = "shippingAddressStreet", default)]
    pub street: Option<String>,
    #[serde(rename = "shippingAddressNumber", default)]
    pub number: Option<String>,
    #[serde(rename = "shippingAddressComplement", default)]
    pub complement: Option<String>,
    #[serde(rename = "shippingAddressDistrict", default)]
    pub district: Option<String>,
    #[serde(rename = "shippingAddressPostalCode", default)]
    pub postal_code: Option<String>,
    #[serde(rename = "shippingAddressCity", default)]
    pub city: Option<String>,
    #[serde(rename = "shippingAddressState", default)]
    pub state: Option<String>,
    /// Accepted for symmetry with the wire format; always replaced by `BRA`
    #[serde(rename = "shippingAddressCountry", default)]
    pub country: Option<String>,
}

/// One line item as supplied by the caller
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemInput {
    #[serde(rename = "itemId", default)]
    pub id: Option<String>,
    #[serde(rename = "itemDescription", default)]
    pub description: Option<String>,
    #[serde(rename = "itemAmount", default)]
    pub amount: Option<LooseValue>,
    #[serde(rename = "itemQuantity", default)]
    pub quantity: Option<LooseValue>,
}

impl ItemInput {
    pub fn new(
        id: impl Into<String>,
        description: impl Into<String>,
        amount: impl Into<LooseValue>,
        quantity: impl Into<LooseValue>,
    ) -> Self {
        Self {
            id: Some(id.into()),
            description: Some(description.into()),
            amount: Some(amount.into()),
            quantity: Some(quantity.into()),
        }
    }
}

/// Shipping selection as supplied by the caller
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShippingInfoInput {
    #[serde(rename = "shippingType", default)]
    pub shipping_type: Option<LooseValue>,
    #[serde(rename = "shippingCost", default)]
    pub cost: Option<LooseValue>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loose_value_deserializes_numbers_and_text() {
        let values: Vec<LooseValue> = serde_json::from_str(r#"[10, 10.5, "10,00"]"#).unwrap();
        assert_eq!(values[0], LooseValue::Integer(10));
        assert_eq!(values[1], LooseValue::Float(10.5));
        assert_eq!(values[2], LooseValue::Text("10,00".to_string()));
    }

    #[test]
    fn test_loose_value_to_amount() {
        assert_eq!(LooseValue::from(10).to_amount(), "10.00");
        assert_eq!(LooseValue::from(19.9).to_amount(), "19.90");
        assert_eq!(LooseValue::from(" 7.5 ").to_amount(), "7.50");
        assert_eq!(LooseValue::from(" abc ").to_amount(), "abc");
        assert_eq!(LooseValue::from("1_000").to_amount(), "1_000");
    }

    #[test]
    fn test_loose_value_is_number() {
        assert!(LooseValue::from(-3).is_number());
        assert!(LooseValue::from(1e30).is_number());
        assert!(LooseValue::from(" 2.5e3 ").is_number());
        assert!(!LooseValue::from(f64::NAN).is_number());
        assert!(!LooseValue::from(f64::INFINITY).is_number());
        assert!(!LooseValue::from("1_000").is_number());
        assert!(!LooseValue::from("dez").is_number());
    }

    #[test]
    fn test_sender_type_parsing() {
        assert_eq!("J".parse::<SenderType>().unwrap(), SenderType::Company);
        assert_eq!("f".parse::<SenderType>().unwrap(), SenderType::Individual);
        assert_eq!("company".parse::<SenderType>().unwrap(), SenderType::Company);
        assert!("X".parse::<SenderType>().is_err());
        assert_eq!(SenderType::default(), SenderType::Individual);
    }

    #[test]
    fn test_sender_type_serde_uses_gateway_codes() {
        let company: SenderType = serde_json::from_str(r#""J""#).unwrap();
        assert_eq!(company, SenderType::Company);
        assert_eq!(
            serde_json::to_string(&SenderType::Individual).unwrap(),
            r#""F""#
        );

        for sender_type in [SenderType::Individual, SenderType::Company] {
            let code = serde_json::to_value(sender_type).unwrap();
            assert_eq!(code.as_str(), Some(sender_type.code()));
            assert_eq!(sender_type.code().parse::<SenderType>().unwrap(), sender_type);
        }
    }

    #[test]
    fn test_inputs_deserialize_from_gateway_keys() {
        let info: SenderInfoInput = serde_json::from_value(serde_json::json!({
            "senderName": "Comprador Teste",
            "senderPhone": "(11) 98888-7777",
            "senderEmail": "comprador@example.com",
            "senderCPF": "123.456.789-00"
        }))
        .unwrap();
        assert_eq!(info.name.as_deref(), Some("Comprador Teste"));
        assert_eq!(info.cpf.as_deref(), Some("123.456.789-00"));
        assert_eq!(info.cnpj, None);

        let item: ItemInput = serde_json::from_value(serde_json::json!({
            "itemId": "SKU-1",
            "itemDescription": "Caneta",
            "itemAmount": 10,
            "itemQuantity": "2"
        }))
        .unwrap();
        assert_eq!(item.amount, Some(LooseValue::Integer(10)));
        assert_eq!(item.quantity, Some(LooseValue::Text("2".to_string())));
    }
}
