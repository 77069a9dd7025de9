//! Prelude module for convenient imports.
//!
//! Brings in the validator, its configuration, the rule contract and every
//! built-in rule with its factory function.

pub use crate::{Rule, RuleBook, ValidationError, ValidationReport, Validator, ValidatorConfig};
pub use crate::rules::*;
