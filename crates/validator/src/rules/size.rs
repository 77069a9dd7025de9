//! Element count of arrays, collections and maps.

use strata_value::Value;

use crate::error::ValidationError;
use crate::rule::Rule;

/// Number of elements (or map entries) must lie within `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Size {
    min: usize,
    max: usize,
}

impl Size {
    /// Creates the rule with inclusive bounds.
    #[must_use]
    pub fn new(min: usize, max: usize) -> Self {
        Self { min, max }
    }
}

impl Rule for Size {
    fn code(&self) -> &'static str {
        "size"
    }

    fn check(&self, value: &Value) -> Result<(), ValidationError> {
        let size = match value {
            Value::Null => return Ok(()),
            Value::Array(_) | Value::Collection(_) | Value::Map(_) => value.len().unwrap_or_default(),
            other => {
                return Err(ValidationError::type_mismatch(
                    "size",
                    "an array, collection or map",
                    other.kind(),
                ));
            }
        };
        if (self.min..=self.max).contains(&size) {
            Ok(())
        } else {
            Err(ValidationError::out_of_range("size", "size", self.min, self.max, size))
        }
    }
}

/// Creates a [`Size`] rule.
#[must_use]
pub fn size(min: usize, max: usize) -> Size {
    Size::new(min, max)
}

/// Creates a [`Size`] rule with only a lower bound.
#[must_use]
pub fn min_size(min: usize) -> Size {
    Size::new(min, usize::MAX)
}

/// Creates a [`Size`] rule with only an upper bound.
#[must_use]
pub fn max_size(max: usize) -> Size {
    Size::new(0, max)
}
