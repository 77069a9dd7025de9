//! Decimal bounds on numbers.
//!
//! Integers, floats and decimals are widened to [`Decimal`] before
//! comparison, so `min(25)` rejects `24.99` and accepts `Decimal 25.00`.
//! Floats outside the decimal range (infinities, `1e30`) are compared as
//! `f64` instead. NaN violates every bound.

use std::fmt;

use rust_decimal::prelude::ToPrimitive;
use strata_value::{Decimal, Value};

use crate::error::ValidationError;
use crate::rule::Rule;

/// A number in the form it is compared to a bound.
#[derive(Debug, Clone, Copy)]
enum Number {
    Exact(Decimal),
    Wide(f64),
}

impl Number {
    fn is_below(self, bound: Decimal) -> bool {
        match self {
            Self::Exact(exact) => exact < bound,
            Self::Wide(wide) => bound.to_f64().is_some_and(|bound| wide < bound),
        }
    }

    fn is_above(self, bound: Decimal) -> bool {
        match self {
            Self::Exact(exact) => exact > bound,
            Self::Wide(wide) => bound.to_f64().is_some_and(|bound| wide > bound),
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact(exact) => exact.fmt(f),
            Self::Wide(wide) => wide.fmt(f),
        }
    }
}

fn numeric(code: &'static str, value: &Value) -> Result<Option<Number>, ValidationError> {
    if value.is_null() {
        return Ok(None);
    }
    if let Some(exact) = value.to_decimal() {
        return Ok(Some(Number::Exact(exact)));
    }
    match value {
        Value::Float(wide) if wide.is_nan() => Err(ValidationError::new(
            code,
            "NaN cannot be compared to a bound",
        )
        .with_param("actual", "NaN")),
        Value::Float(wide) => Ok(Some(Number::Wide(*wide))),
        _ => Err(ValidationError::type_mismatch(code, "a number", value.kind())),
    }
}

// ============================================================================
// MIN
// ============================================================================

/// Value must be greater than or equal to a bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Min {
    min: Decimal,
}

impl Min {
    /// Creates the rule.
    #[must_use]
    pub fn new(min: impl Into<Decimal>) -> Self {
        Self { min: min.into() }
    }
}

impl Rule for Min {
    fn code(&self) -> &'static str {
        "min"
    }

    fn check(&self, value: &Value) -> Result<(), ValidationError> {
        match numeric(self.code(), value)? {
            Some(actual) if actual.is_below(self.min) => Err(ValidationError::new(
                "min",
                format!("must be greater than or equal to {}", self.min),
            )
            .with_param("min", self.min.to_string())
            .with_param("actual", actual.to_string())),
            _ => Ok(()),
        }
    }
}

/// Creates a [`Min`] rule.
#[must_use]
pub fn min(min: impl Into<Decimal>) -> Min {
    Min::new(min)
}

// ============================================================================
// MAX
// ============================================================================

/// Value must be less than or equal to a bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Max {
    max: Decimal,
}

impl Max {
    /// Creates the rule.
    #[must_use]
    pub fn new(max: impl Into<Decimal>) -> Self {
        Self { max: max.into() }
    }
}

impl Rule for Max {
    fn code(&self) -> &'static str {
        "max"
    }

    fn check(&self, value: &Value) -> Result<(), ValidationError> {
        match numeric(self.code(), value)? {
            Some(actual) if actual.is_above(self.max) => Err(ValidationError::new(
                "max",
                format!("must be less than or equal to {}", self.max),
            )
            .with_param("max", self.max.to_string())
            .with_param("actual", actual.to_string())),
            _ => Ok(()),
        }
    }
}

/// Creates a [`Max`] rule.
#[must_use]
pub fn max(max: impl Into<Decimal>) -> Max {
    Max::new(max)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[rstest]
    #[case(Value::from(25), true)]
    #[case(Value::from(24), false)]
    #[case(Value::from(24.99), false)]
    #[case(Value::from(30.0), true)]
    #[case(Value::from(dec("25.00")), true)]
    #[case(Value::Null, true)]
    fn min_bound(#[case] value: Value, #[case] ok: bool) {
        assert_eq!(min(dec("25.00")).check(&value).is_ok(), ok);
    }

    #[rstest]
    #[case(Value::from(10), true)]
    #[case(Value::from(11), false)]
    #[case(Value::from(dec("10.0001")), false)]
    fn max_bound(#[case] value: Value, #[case] ok: bool) {
        assert_eq!(max(10).check(&value).is_ok(), ok);
    }

    #[rstest]
    #[case(Value::from(1e30), true, false)]
    #[case(Value::from(-1e30), false, true)]
    #[case(Value::from(f64::INFINITY), true, false)]
    #[case(Value::from(f64::NEG_INFINITY), false, true)]
    fn floats_beyond_decimal_range(
        #[case] value: Value,
        #[case] passes_min: bool,
        #[case] passes_max: bool,
    ) {
        let below = min(25).check(&value);
        let above = max(10).check(&value);
        assert_eq!(below.is_ok(), passes_min);
        assert_eq!(above.is_ok(), passes_max);
        for error in [below, above].into_iter().filter_map(Result::err) {
            assert_ne!(error.param("expected"), Some("a number"));
        }
    }

    #[test]
    fn huge_float_reports_bound_violation() {
        let error = max(10).check(&Value::from(1e30)).unwrap_err();
        assert_eq!(error.code, "max");
        assert_eq!(error.param("max"), Some("10"));
        assert_eq!(error.param("actual").map(|a| a.parse::<f64>().unwrap()), Some(1e30));
    }

    #[rstest]
    #[case(min(25))]
    #[case(min(-25))]
    fn nan_violates_min(#[case] rule: Min) {
        let error = rule.check(&Value::from(f64::NAN)).unwrap_err();
        assert_eq!(error.code, "min");
        assert_eq!(error.param("actual"), Some("NaN"));
    }

    #[test]
    fn nan_violates_max() {
        let error = max(10).check(&Value::from(f64::NAN)).unwrap_err();
        assert_eq!(error.code, "max");
    }

    #[test]
    fn violation_carries_bound_and_actual() {
        let error = min(25).check(&Value::from(10.0)).unwrap_err();
        assert_eq!(error.code, "min");
        assert_eq!(error.param("min"), Some("25"));
        assert_eq!(error.param("actual").map(dec), Some(Decimal::from(10)));
    }

    #[test]
    fn text_is_a_type_mismatch() {
        let error = max(1).check(&Value::from("1")).unwrap_err();
        assert_eq!(error.param("actual"), Some("text"));
    }
}
