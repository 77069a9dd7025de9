//! Property-based tests for the built-in rules.

use proptest::prelude::*;
use strata_validator::prelude::*;
use strata_value::{Decimal, Value};

// ============================================================================
// BOUNDS: min/max agree with decimal ordering
// ============================================================================

proptest! {
    #[test]
    fn min_passes_iff_not_below(n in any::<i64>(), bound in any::<i32>()) {
        let passes = min(bound).check(&Value::from(n)).is_ok();
        prop_assert_eq!(passes, Decimal::from(n) >= Decimal::from(bound));
    }

    #[test]
    fn max_passes_iff_not_above(n in any::<i64>(), bound in any::<i32>()) {
        let passes = max(bound).check(&Value::from(n)).is_ok();
        prop_assert_eq!(passes, Decimal::from(n) <= Decimal::from(bound));
    }

    #[test]
    fn length_counts_characters(s in "\\PC{0,24}", lo in 0usize..12, span in 0usize..12) {
        let hi = lo + span;
        let count = s.chars().count();
        let passes = length(lo, hi).check(&Value::from(s.as_str())).is_ok();
        prop_assert_eq!(passes, (lo..=hi).contains(&count));
    }
}

// ============================================================================
// NULL: passes everything except not_null
// ============================================================================

proptest! {
    #[test]
    fn null_passes_bounds(bound in any::<i32>(), lo in 0usize..8) {
        prop_assert!(min(bound).check(&Value::Null).is_ok());
        prop_assert!(max(bound).check(&Value::Null).is_ok());
        prop_assert!(min_length(lo).check(&Value::Null).is_ok());
        prop_assert!(min_size(lo).check(&Value::Null).is_ok());
        prop_assert!(not_blank().check(&Value::Null).is_ok());
        prop_assert!(not_null().check(&Value::Null).is_err());
    }
}
