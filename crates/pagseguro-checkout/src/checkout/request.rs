//! Normalized checkout state and its flat wire form.

use serde::Serialize;

use super::input::SenderType;
use crate::validation::FieldSet;

/// Country code sent for every address; the gateway only ships within Brazil
pub const COUNTRY_CODE: &str = "BRA";

/// Per-item wire fields, in the order each item block is emitted
pub const ITEM_FIELDS: [&str; 4] = ["itemId", "itemDescription", "itemAmount", "itemQuantity"];

/// Brazilian taxpayer id, digits only
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "number", rename_all = "lowercase")]
pub enum TaxId {
    Cpf(String),
    Cnpj(String),
}

impl TaxId {
    pub fn field_name(&self) -> &'static str {
        match self {
            TaxId::Cpf(_) => "senderCPF",
            TaxId::Cnpj(_) => "senderCNPJ",
        }
    }

    pub fn number(&self) -> &str {
        match self {
            TaxId::Cpf(n) | TaxId::Cnpj(n) => n,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SenderInfo {
    pub name: String,
    pub area_code: String,
    pub phone: String,
    pub email: String,
    pub tax_id: TaxId,
}

impl SenderInfo {
    pub fn fields(&self) -> FieldSet {
        [
            ("senderName", self.name.as_str()),
            ("senderAreaCode", self.area_code.as_str()),
            ("senderPhone", self.phone.as_str()),
            ("senderEmail", self.email.as_str()),
            (self.tax_id.field_name(), self.tax_id.number()),
        ]
        .into_iter()
        .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SenderAddress {
    pub street: String,
    pub number: String,
    pub complement: String,
    pub district: String,
    pub postal_code: String,
    pub city: String,
    pub state: String,
    pub country: String,
}

impl SenderAddress {
    pub fn fields(&self) -> FieldSet {
        [
            ("shippingAddressStreet", self.street.as_str()),
            ("shippingAddressNumber", self.number.as_str()),
            ("shippingAddressComplement", self.complement.as_str()),
            ("shippingAddressDistrict", self.district.as_str()),
            ("shippingAddressPostalCode", self.postal_code.as_str()),
            ("shippingAddressCity", self.city.as_str()),
            ("shippingAddressState", self.state.as_str()),
            ("shippingAddressCountry", self.country.as_str()),
        ]
        .into_iter()
        .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Item {
    pub id: String,
    pub description: String,
    pub amount: String,
    pub quantity: String,
}

impl Item {
    fn values(&self) -> [&str; 4] {
        [
            self.id.as_str(),
            self.description.as_str(),
            self.amount.as_str(),
            self.quantity.as_str(),
        ]
    }
}

/// Flatten items into `itemId1, itemDescription1, ..., itemId2, ...`.
///
/// Indexes start at 1 and follow input order.
pub fn flatten_items(items: &[Item]) -> FieldSet {
    let mut fields = FieldSet::new();
    for (i, item) in items.iter().enumerate() {
        let index = i + 1;
        for (name, value) in ITEM_FIELDS.iter().zip(item.values()) {
            fields.insert(format!("{}{}", name, index), value);
        }
    }
    fields
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShippingInfo {
    pub shipping_type: String,
    pub cost: String,
}

impl ShippingInfo {
    pub fn fields(&self) -> FieldSet {
        [
            ("shippingType", self.shipping_type.as_str()),
            ("shippingCost", self.cost.as_str()),
        ]
        .into_iter()
        .collect()
    }
}

/// Everything accepted so far for one checkout
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CheckoutRequest {
    pub sender_type: SenderType,
    pub sender_info: Option<SenderInfo>,
    pub sender_address: Option<SenderAddress>,
    /// Items already flattened into their wire keys
    pub items: Option<FieldSet>,
    pub extra_amount: Option<String>,
    pub reference: Option<String>,
    pub shipping_info: Option<ShippingInfo>,
}

impl CheckoutRequest {
    /// Flat wire parameters in emission order; groups never set are omitted
    pub fn params(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();

        if let Some(info) = &self.sender_info {
            params.extend(info.fields().into_pairs());
        }
        if let Some(address) = &self.sender_address {
            params.extend(address.fields().into_pairs());
        }
        if let Some(items) = &self.items {
            params.extend(items.clone().into_pairs());
        }
        if let Some(extra) = &self.extra_amount {
            params.push(("extraAmount".to_string(), extra.clone()));
        }
        if let Some(reference) = &self.reference {
            params.push(("reference".to_string(), reference.clone()));
        }
        if let Some(shipping) = &self.shipping_info {
            params.extend(shipping.fields().into_pairs());
        }

        params
    }

    pub fn item_count(&self) -> usize {
        self.items
            .as_ref()
            .map(|items| items.len() / ITEM_FIELDS.len())
            .unwrap_or(0)
    }
}
