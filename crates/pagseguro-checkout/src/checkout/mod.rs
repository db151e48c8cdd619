//! Checkout request building
//!
//! [`RequestBuilder`] takes the loosely-typed inputs from [`input`], runs
//! them through the sanitizers, checks them against the tables in [`rules`]
//! and keeps the accepted values in a [`CheckoutRequest`].
//!
//! A setter either stores its whole group or returns a [`ValidationFailure`]
//! and leaves everything accepted earlier untouched.
//!
//! ```
//! use pagseguro_checkout::{CheckoutConfig, ItemInput, RequestBuilder, SenderType};
//!
//! let mut builder = RequestBuilder::new(CheckoutConfig::production());
//! builder
//!     .set_sender_type(SenderType::Individual)
//!     .set_items(vec![ItemInput::new("SKU-1", "Caneta azul", 10, 2)])?
//!     .set_reference("PEDIDO-42");
//!
//! let params = builder.request().params();
//! assert_eq!(params[2], ("itemAmount1".to_string(), "10.00".to_string()));
//! # Ok::<(), pagseguro_checkout::ValidationFailure>(())
//! ```

pub mod input;
pub mod request;
pub mod rules;

use tracing::{debug, warn};

use self::input::{
    ItemInput, LooseValue, SenderAddressInput, SenderInfoInput, SenderType, ShippingInfoInput,
};
use self::request::{
    flatten_items, CheckoutRequest, Item, SenderAddress, SenderInfo, ShippingInfo, TaxId,
    COUNTRY_CODE,
};
use crate::config::CheckoutConfig;
use crate::error::ValidationFailure;
use crate::validation::{
    digits_only, format_amount, normalize_whitespace, normalize_whitespace_optional, split_phone,
    uppercase, FieldSet, RuleTable, RuleValidator, Validator,
};

/// Accumulates a validated checkout request
#[derive(Debug, Clone)]
pub struct RequestBuilder<V = RuleValidator> {
    config: CheckoutConfig,
    validator: V,
    request: CheckoutRequest,
}

impl RequestBuilder<RuleValidator> {
    /// Create a builder using the default rule engine
    pub fn new(config: CheckoutConfig) -> Self {
        Self::with_validator(config, RuleValidator)
    }

    /// Create a builder for the sandbox environment
    pub fn sandbox() -> Self {
        Self::new(CheckoutConfig::sandbox())
    }

    /// Create a builder for the production environment
    pub fn production() -> Self {
        Self::new(CheckoutConfig::production())
    }
}

impl Default for RequestBuilder<RuleValidator> {
    fn default() -> Self {
        Self::new(CheckoutConfig::default())
    }
}

impl<V: Validator> RequestBuilder<V> {
    /// Create a builder with a custom validation engine
    pub fn with_validator(config: CheckoutConfig, validator: V) -> Self {
        Self {
            config,
            validator,
            request: CheckoutRequest::default(),
        }
    }

    pub fn config(&self) -> &CheckoutConfig {
        &self.config
    }

    /// Set the buyer category used by later `set_sender_info` calls
    pub fn set_sender_type(&mut self, sender_type: SenderType) -> &mut Self {
        self.request.sender_type = sender_type;
        self
    }

    /// Normalize, validate and store the buyer identity
    pub fn set_sender_info(
        &mut self,
        info: SenderInfoInput,
    ) -> Result<&mut Self, ValidationFailure> {
        let phone = digits_only(info.phone.as_deref().unwrap_or_default());
        let (area_code, phone) = split_phone(&phone);

        let email = if self.config.environment.is_sandbox() {
            self.config.sandbox_email.clone()
        } else {
            info.email.unwrap_or_default()
        };

        let tax_id = match self.request.sender_type {
            SenderType::Individual => {
                TaxId::Cpf(digits_only(info.cpf.as_deref().unwrap_or_default()))
            }
            SenderType::Company => {
                TaxId::Cnpj(digits_only(info.cnpj.as_deref().unwrap_or_default()))
            }
        };

        let sender_info = SenderInfo {
            name: normalize_whitespace_optional(info.name.as_deref()),
            area_code,
            phone,
            email,
            tax_id,
        };

        let table = rules::sender_info_rules(self.request.sender_type);
        self.check("sender info", &sender_info.fields(), &table)?;

        debug!(
            "Sender info accepted: sender_type={}, tax_id_field={}",
            self.request.sender_type,
            sender_info.tax_id.field_name()
        );
        self.request.sender_info = Some(sender_info);
        Ok(self)
    }

    /// Normalize, validate and store the buyer address; country is always `BRA`
    pub fn set_sender_address(
        &mut self,
        address: SenderAddressInput,
    ) -> Result<&mut Self, ValidationFailure> {
        let sender_address = SenderAddress {
            street: normalize_whitespace_optional(address.street.as_deref()),
            number: normalize_whitespace_optional(address.number.as_deref()),
            complement: normalize_whitespace_optional(address.complement.as_deref()),
            district: normalize_whitespace_optional(address.district.as_deref()),
            postal_code: digits_only(address.postal_code.as_deref().unwrap_or_default()),
            city: normalize_whitespace_optional(address.city.as_deref()),
            state: uppercase(address.state.as_deref().unwrap_or_default()),
            country: COUNTRY_CODE.to_string(),
        };

        self.check(
            "sender address",
            &sender_address.fields(),
            &rules::sender_address_rules(),
        )?;

        debug!("Sender address accepted: state={}", sender_address.state);
        self.request.sender_address = Some(sender_address);
        Ok(self)
    }

    /// Normalize, validate and store the line items as flat `field+index` keys
    pub fn set_items(
        &mut self,
        items: impl IntoIterator<Item = ItemInput>,
    ) -> Result<&mut Self, ValidationFailure> {
        let items: Vec<Item> = items
            .into_iter()
            .map(|item| Item {
                id: normalize_whitespace_optional(item.id.as_deref()),
                description: normalize_whitespace_optional(item.description.as_deref()),
                amount: item.amount.as_ref().map(LooseValue::to_amount).unwrap_or_default(),
                quantity: item
                    .quantity
                    .as_ref()
                    .map(|q| digits_only(&q.to_text()))
                    .unwrap_or_default(),
            })
            .collect();

        if items.is_empty() {
            let failure = ValidationFailure::new("items", "The items field is required.");
            warn!("Rejected items: {}", failure);
            return Err(failure);
        }

        let fields = flatten_items(&items);
        self.check("items", &fields, &rules::item_rules(items.len()))?;

        debug!("Items accepted: count={}", items.len());
        self.request.items = Some(fields);
        Ok(self)
    }

    /// Normalize, validate and store the shipping type and cost
    pub fn set_shipping_info(
        &mut self,
        info: ShippingInfoInput,
    ) -> Result<&mut Self, ValidationFailure> {
        let shipping_info = ShippingInfo {
            shipping_type: info
                .shipping_type
                .as_ref()
                .map(|t| digits_only(&t.to_text()))
                .unwrap_or_default(),
            cost: info.cost.as_ref().map(LooseValue::to_amount).unwrap_or_default(),
        };

        self.check(
            "shipping info",
            &shipping_info.fields(),
            &rules::shipping_info_rules(),
        )?;

        debug!(
            "Shipping info accepted: shipping_type={}",
            shipping_info.shipping_type
        );
        self.request.shipping_info = Some(shipping_info);
        Ok(self)
    }

    /// Store an extra amount (negative for discounts) with two decimal places
    pub fn set_extra_amount(
        &mut self,
        amount: impl Into<LooseValue>,
    ) -> Result<&mut Self, ValidationFailure> {
        let amount = amount.into();
        if !amount.is_number() {
            let failure =
                ValidationFailure::new("extraAmount", "The extra amount must be a number.");
            warn!("Rejected extra amount: {}", failure);
            return Err(failure);
        }

        let Some(formatted) = amount.to_decimal().and_then(format_amount) else {
            let failure =
                ValidationFailure::new("extraAmount", "The extra amount is out of range.");
            warn!("Rejected extra amount: {}", failure);
            return Err(failure);
        };

        self.request.extra_amount = Some(formatted);
        Ok(self)
    }

    /// Store the merchant's reference code, whitespace-normalized
    pub fn set_reference(&mut self, reference: &str) -> &mut Self {
        self.request.reference = Some(normalize_whitespace(reference));
        self
    }

    pub fn sender_type(&self) -> SenderType {
        self.request.sender_type
    }

    pub fn sender_info(&self) -> Option<&SenderInfo> {
        self.request.sender_info.as_ref()
    }

    pub fn sender_address(&self) -> Option<&SenderAddress> {
        self.request.sender_address.as_ref()
    }

    pub fn items(&self) -> Option<&FieldSet> {
        self.request.items.as_ref()
    }

    pub fn shipping_info(&self) -> Option<&ShippingInfo> {
        self.request.shipping_info.as_ref()
    }

    pub fn extra_amount(&self) -> Option<&str> {
        self.request.extra_amount.as_deref()
    }

    pub fn reference(&self) -> Option<&str> {
        self.request.reference.as_deref()
    }

    pub fn request(&self) -> &CheckoutRequest {
        &self.request
    }

    pub fn into_request(self) -> CheckoutRequest {
        self.request
    }

    fn check(
        &self,
        group: &str,
        fields: &FieldSet,
        rules: &RuleTable,
    ) -> Result<(), ValidationFailure> {
        self.validator.validate(fields, rules).map_err(|failure| {
            warn!("Rejected {}: field={}, {}", group, failure.field, failure);
            failure
        })
    }
}
