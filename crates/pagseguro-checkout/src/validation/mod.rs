//! Input normalization and validation
//!
//! The validation system consists of four parts:
//!
//! 1. **Sanitizers** - normalize raw input (whitespace, digits, amounts)
//! 2. **Validators** - predicate functions behind each rule primitive
//! 3. **Rules** - `Rule`, `RuleSet`, `RuleTable` and the `FieldSet` they check
//! 4. **Engine** - the `Validator` trait and its default `RuleValidator`
//!
//! # Usage
//!
//! ```
//! use pagseguro_checkout::validation::{FieldSet, RuleTable, RuleValidator, Validator};
//!
//! let rules = RuleTable::new()
//!     .field("senderName", "required|max:50".parse().unwrap())
//!     .field("senderAreaCode", "required|digits:2".parse().unwrap());
//!
//! let fields: FieldSet = [("senderName", "Comprador"), ("senderAreaCode", "1")]
//!     .into_iter()
//!     .collect();
//!
//! let failure = RuleValidator.validate(&fields, &rules).unwrap_err();
//! assert_eq!(failure.message, "The sender area code must be 2 digits.");
//! ```

pub mod engine;
pub mod rules;
pub mod sanitizers;
pub mod validators;

// Re-export commonly used items
pub use engine::{attribute_label, check_field, RuleValidator, Validator};
pub use rules::{FieldSet, Rule, RuleSet, RuleTable};
pub use sanitizers::{
    digits_only, format_amount, normalize_whitespace, normalize_whitespace_optional,
    split_phone, uppercase,
};
pub use validators::{is_number, is_valid_email, parse_number};
