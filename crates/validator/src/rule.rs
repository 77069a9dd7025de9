//! The rule contract.

use std::fmt;

use strata_value::Value;

use crate::error::ValidationError;

/// A check applied to one extracted value or object member.
///
/// Rules see values of any kind. A rule handed a kind it does not apply to
/// reports a type mismatch rather than passing silently. Null passes every
/// rule except [`NotNull`](crate::rules::NotNull).
///
/// ```rust
/// use strata_validator::{Rule, ValidationError};
/// use strata_value::Value;
///
/// #[derive(Debug)]
/// struct Even;
///
/// impl Rule for Even {
///     fn code(&self) -> &'static str {
///         "even"
///     }
///
///     fn check(&self, value: &Value) -> Result<(), ValidationError> {
///         match value.as_i64() {
///             Some(n) if n % 2 != 0 => Err(ValidationError::new("even", "must be even")),
///             _ => Ok(()),
///         }
///     }
/// }
///
/// assert!(Even.check(&Value::from(3)).is_err());
/// assert!(Even.check(&Value::Null).is_ok());
/// ```
pub trait Rule: Send + Sync + fmt::Debug {
    /// Code carried by violations of this rule.
    fn code(&self) -> &'static str;

    /// Checks `value`.
    fn check(&self, value: &Value) -> Result<(), ValidationError>;
}
