//! Validator configuration.

use serde::{Deserialize, Serialize};
use strata_traverse::{ConfigResult, ExtractionConfig};

/// Settings for a [`Validator`](crate::Validator).
///
/// ```rust
/// use strata_validator::ValidatorConfig;
///
/// let config: ValidatorConfig =
///     serde_json::from_str(r#"{ "cascade": false, "extraction": { "max_depth": 4 } }"#).unwrap();
/// assert!(!config.cascade);
/// assert_eq!(config.extraction.max_depth, 4);
/// assert!(config.extraction.register_defaults);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorConfig {
    /// Type-directed extraction settings.
    pub extraction: ExtractionConfig,
    /// Whether extracted objects that need introspection are walked and
    /// their member rules checked.
    pub cascade: bool,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            extraction: ExtractionConfig::default(),
            cascade: true,
        }
    }
}

impl ValidatorConfig {
    /// Sets the extraction settings.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_extraction(mut self, extraction: ExtractionConfig) -> Self {
        self.extraction = extraction;
        self
    }

    /// Enables or disables cascading.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_cascade(mut self, cascade: bool) -> Self {
        self.cascade = cascade;
        self
    }

    /// Checks the configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        self.extraction.validate()
    }
}
