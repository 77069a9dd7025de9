//! Rule violations
//!
//! A [`ValidationError`] is one failed rule: a stable code for programmatic
//! handling, an English message, the location of the offending value and the
//! parameters the message was built from.
//!
//! String fields are `Cow<'static, str>`, so static codes and messages do
//! not allocate.

use std::borrow::Cow;
use std::fmt;

use smallvec::SmallVec;

type Params = SmallVec<[(Cow<'static, str>, Cow<'static, str>); 2]>;

// ============================================================================
// VALIDATION ERROR
// ============================================================================

/// A single rule violation.
///
/// ```rust
/// use strata_validator::ValidationError;
///
/// let error = ValidationError::new("min", "must be at least 25")
///     .with_path("<list element>[0]")
///     .with_param("min", "25");
/// assert_eq!(error.to_string(), "[<list element>[0]] min: must be at least 25 (min=25)");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Error code, e.g. `min`, `not_null`, `length`.
    pub code: Cow<'static, str>,
    /// Human readable message.
    pub message: Cow<'static, str>,
    /// Location of the offending value; `None` for the validation root.
    pub path: Option<Cow<'static, str>>,
    /// Message parameters, in insertion order.
    pub params: Params,
}

impl ValidationError {
    /// Creates an error with a code and message.
    pub fn new(code: impl Into<Cow<'static, str>>, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            path: None,
            params: SmallVec::new(),
        }
    }

    /// Sets the location of the offending value.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_path(mut self, path: impl Into<Cow<'static, str>>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Adds a message parameter.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_param(
        mut self,
        key: impl Into<Cow<'static, str>>,
        value: impl Into<Cow<'static, str>>,
    ) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    /// Looks up a parameter by key.
    #[must_use]
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k.as_ref() == key)
            .map(|(_, v)| v.as_ref())
    }

    /// JSON form, for reports.
    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        use serde_json::json;

        let params: serde_json::Map<String, serde_json::Value> = self
            .params
            .iter()
            .map(|(k, v)| (k.to_string(), serde_json::Value::String(v.to_string())))
            .collect();

        json!({
            "code": self.code,
            "message": self.message,
            "path": self.path,
            "params": params,
        })
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(path) = &self.path {
            write!(f, "[{path}] {}: {}", self.code, self.message)?;
        } else {
            write!(f, "{}: {}", self.code, self.message)?;
        }

        if !self.params.is_empty() {
            f.write_str(" (")?;
            for (i, (k, v)) in self.params.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{k}={v}")?;
            }
            f.write_str(")")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

// ============================================================================
// CONVENIENCE CONSTRUCTORS
// ============================================================================

impl ValidationError {
    /// A required value is null.
    pub fn not_null() -> Self {
        Self::new("not_null", "must not be null")
    }

    /// The rule cannot be applied to a value of this kind.
    pub fn type_mismatch(
        code: impl Into<Cow<'static, str>>,
        expected: impl Into<Cow<'static, str>>,
        actual: impl fmt::Display,
    ) -> Self {
        let expected = expected.into();
        Self::new(code, format!("cannot be applied to {actual}, expected {expected}"))
            .with_param("expected", expected)
            .with_param("actual", actual.to_string())
    }

    /// A measured count lies outside `[min, max]`.
    pub fn out_of_range(
        code: impl Into<Cow<'static, str>>,
        what: &str,
        min: usize,
        max: usize,
        actual: usize,
    ) -> Self {
        let message = if max == usize::MAX {
            format!("{what} must be at least {min}")
        } else {
            format!("{what} must be between {min} and {max}")
        };
        let error = Self::new(code, message).with_param("min", min.to_string());
        let error = if max == usize::MAX {
            error
        } else {
            error.with_param("max", max.to_string())
        };
        error.with_param("actual", actual.to_string())
    }
}
