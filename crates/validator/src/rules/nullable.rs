//! Presence.

use strata_value::Value;

use crate::error::ValidationError;
use crate::rule::Rule;

/// Value must not be null. The only built-in rule that rejects null.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct NotNull;

impl Rule for NotNull {
    fn code(&self) -> &'static str {
        "not_null"
    }

    fn check(&self, value: &Value) -> Result<(), ValidationError> {
        if value.is_null() {
            Err(ValidationError::not_null())
        } else {
            Ok(())
        }
    }
}

/// Creates a [`NotNull`] rule.
#[must_use]
pub fn not_null() -> NotNull {
    NotNull
}
