//! Validation outcome.

use std::fmt;

use serde_json::json;
use strata_traverse::ExtractionError;

use crate::error::ValidationError;

/// Everything one [`Validator::validate`](crate::Validator::validate) call
/// found.
#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    /// Rule violations, in discovery order.
    pub violations: Vec<ValidationError>,
    /// Extraction branches that could not be walked. Their values were not
    /// checked.
    pub suppressed: Vec<ExtractionError>,
    /// Number of extracted leaves.
    pub leaves: usize,
    /// Number of distinct objects entered by cascade walks.
    pub objects_cascaded: usize,
}

impl ValidationReport {
    /// Returns `true` when no rule was violated.
    ///
    /// Suppressed extraction errors do not make a report invalid; check
    /// [`is_complete`](Self::is_complete) for that.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    /// Returns `true` when every branch was walked.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.suppressed.is_empty()
    }

    /// Violations with the given code.
    pub fn violations_with_code<'a>(&'a self, code: &'a str) -> impl Iterator<Item = &'a ValidationError> + 'a {
        self.violations.iter().filter(move |v| v.code == code)
    }

    /// JSON form of the report.
    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        json!({
            "valid": self.is_valid(),
            "leaves": self.leaves,
            "objects_cascaded": self.objects_cascaded,
            "violations": self.violations.iter().map(ValidationError::to_json_value).collect::<Vec<_>>(),
            "suppressed": self.suppressed.iter().map(ToString::to_string).collect::<Vec<_>>(),
        })
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            write!(f, "valid ({} leaves checked)", self.leaves)?;
        } else {
            write!(f, "{} violation(s):", self.violations.len())?;
            for (i, violation) in self.violations.iter().enumerate() {
                write!(f, "\n  {}. {violation}", i + 1)?;
            }
        }
        for error in &self.suppressed {
            write!(f, "\n  suppressed: {error}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_report_is_valid() {
        let report = ValidationReport::default();
        assert!(report.is_valid());
        assert!(report.is_complete());
        assert_eq!(report.to_json_value()["valid"], true);
    }

    #[test]
    fn display_lists_violations() {
        let report = ValidationReport {
            violations: vec![ValidationError::not_null().with_path("Person.name")],
            leaves: 1,
            ..ValidationReport::default()
        };
        assert_eq!(
            report.to_string(),
            "1 violation(s):\n  1. [Person.name] not_null: must not be null"
        );
        assert_eq!(report.violations_with_code("not_null").count(), 1);
    }
}
