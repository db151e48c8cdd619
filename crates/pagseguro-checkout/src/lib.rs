//! pagseguro-checkout — Checkout request builder for the PagSeguro gateway
//!
//! This library normalizes and validates buyer, address, item and shipping
//! data and accumulates it into the flat parameter list the gateway expects.
//! Transport and authentication are left to the caller.

pub mod checkout;
pub mod config;
pub mod error;
pub mod validation;

pub use checkout::input::{
    ItemInput, LooseValue, SenderAddressInput, SenderInfoInput, SenderType, ShippingInfoInput,
};
pub use checkout::request::{
    CheckoutRequest, Item, SenderAddress, SenderInfo, ShippingInfo, TaxId, COUNTRY_CODE,
};
pub use checkout::RequestBuilder;
pub use config::{CheckoutConfig, Environment, SANDBOX_EMAIL};
pub use error::{ConfigError, RuleParseError, ValidationFailure};
pub use validation::{RuleValidator, Validator};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builders_start_empty() {
        let sandbox = RequestBuilder::sandbox();
        assert!(sandbox.config().environment.is_sandbox());
        assert_eq!(sandbox.request(), &CheckoutRequest::default());

        let production = RequestBuilder::default();
        assert_eq!(production.config().environment, Environment::Production);
    }
}
