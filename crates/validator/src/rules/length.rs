//! Text rules.
//!
//! Length is counted in characters, not bytes.

use strata_value::Value;

use crate::error::ValidationError;
use crate::rule::Rule;

fn text<'v>(code: &'static str, value: &'v Value) -> Result<Option<&'v str>, ValidationError> {
    if value.is_null() {
        return Ok(None);
    }
    value
        .as_text()
        .map(Some)
        .ok_or_else(|| ValidationError::type_mismatch(code, "text", value.kind()))
}

// ============================================================================
// LENGTH
// ============================================================================

/// Text length must lie within `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Length {
    min: usize,
    max: usize,
}

impl Length {
    /// Creates the rule with inclusive bounds.
    #[must_use]
    pub fn new(min: usize, max: usize) -> Self {
        Self { min, max }
    }
}

impl Rule for Length {
    fn code(&self) -> &'static str {
        "length"
    }

    fn check(&self, value: &Value) -> Result<(), ValidationError> {
        let Some(text) = text(self.code(), value)? else {
            return Ok(());
        };
        let length = text.chars().count();
        if (self.min..=self.max).contains(&length) {
            Ok(())
        } else {
            Err(ValidationError::out_of_range("length", "length", self.min, self.max, length))
        }
    }
}

/// Creates a [`Length`] rule.
#[must_use]
pub fn length(min: usize, max: usize) -> Length {
    Length::new(min, max)
}

/// Creates a [`Length`] rule with only a lower bound.
#[must_use]
pub fn min_length(min: usize) -> Length {
    Length::new(min, usize::MAX)
}

/// Creates a [`Length`] rule with only an upper bound.
#[must_use]
pub fn max_length(max: usize) -> Length {
    Length::new(0, max)
}

// ============================================================================
// NOT BLANK
// ============================================================================

/// Text must contain at least one non-whitespace character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct NotBlank;

impl Rule for NotBlank {
    fn code(&self) -> &'static str {
        "not_blank"
    }

    fn check(&self, value: &Value) -> Result<(), ValidationError> {
        match text(self.code(), value)? {
            Some(text) if text.trim().is_empty() => {
                Err(ValidationError::new("not_blank", "must not be blank"))
            }
            _ => Ok(()),
        }
    }
}

/// Creates a [`NotBlank`] rule.
#[must_use]
pub fn not_blank() -> NotBlank {
    NotBlank
}
