//! Extraction configuration.

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};

/// Default maximum nesting depth for type-directed extraction.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Settings for registry construction and type-directed extraction.
///
/// Every field has a default, so partial documents deserialize:
///
/// ```rust
/// use strata_traverse::ExtractionConfig;
///
/// let config: ExtractionConfig = serde_json::from_str(r#"{ "max_depth": 8 }"#).unwrap();
/// assert_eq!(config.max_depth, 8);
/// assert!(config.register_defaults);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Maximum number of container levels descended below the root.
    pub max_depth: usize,
    /// Whether registries built from this config start with the built-in
    /// extractors.
    pub register_defaults: bool,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            register_defaults: true,
        }
    }
}

impl ExtractionConfig {
    /// Sets the maximum depth.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Sets whether built-in extractors are registered.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_register_defaults(mut self, register_defaults: bool) -> Self {
        self.register_defaults = register_defaults;
        self
    }

    /// Checks the configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.max_depth == 0 {
            return Err(ConfigError::invalid("max_depth", "must be positive"));
        }
        Ok(())
    }
}
