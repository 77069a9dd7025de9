//! Error types for extraction and configuration.
//!
//! Nothing here aborts a whole extraction. Failures are collected per
//! branch and handed back to the caller next to the leaves that were found.

use strata_value::Kind;

use crate::Path;

// ============================================================================
// EXTRACTOR ERROR
// ============================================================================

/// Failure raised by a [`ContainerExtractor`](crate::ContainerExtractor)
/// while pulling values out of one container.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum ExtractorError {
    /// The extractor was handed a value of the wrong shape.
    #[error("expected a {expected} container, found {found}")]
    UnexpectedContainer {
        /// Kind the extractor handles.
        expected: Kind,
        /// Kind it received.
        found: Kind,
    },

    /// Extractor specific failure.
    #[error("extractor failed: {message}")]
    Failed {
        /// Description of the failure.
        message: String,
    },
}

impl ExtractorError {
    /// Creates an unexpected container error.
    pub fn unexpected(expected: Kind, found: Kind) -> Self {
        Self::UnexpectedContainer { expected, found }
    }

    /// Creates a custom failure.
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed {
            message: message.into(),
        }
    }
}

// ============================================================================
// EXTRACTION ERROR
// ============================================================================

/// A branch of an extraction that could not be completed.
///
/// Returned alongside the leaves of a partial extraction; the rest of the
/// value was still walked.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum ExtractionError {
    /// An extractor failed on a container.
    #[error("extracting slot {slot} of {container} at '{path}' failed: {source}")]
    Extractor {
        /// Runtime kind of the container.
        container: Kind,
        /// Generic slot being extracted.
        slot: usize,
        /// Location of the container.
        path: Path,
        /// Underlying failure.
        #[source]
        source: ExtractorError,
    },

    /// Nesting went deeper than the configured limit.
    #[error("extraction depth limit {limit} exceeded at '{path}'")]
    DepthExceeded {
        /// Configured maximum depth.
        limit: usize,
        /// Location where descent stopped.
        path: Path,
    },
}

impl ExtractionError {
    /// Location the error refers to.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::Extractor { path, .. } | Self::DepthExceeded { path, .. } => path,
        }
    }
}

// ============================================================================
// CONFIG ERROR
// ============================================================================

/// Invalid configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// A field holds an unusable value.
    #[error("invalid configuration for '{field}': {reason}")]
    Invalid {
        /// Field name.
        field: &'static str,
        /// Why it was rejected.
        reason: String,
    },
}

impl ConfigError {
    /// Creates an invalid field error.
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field,
            reason: reason.into(),
        }
    }
}

/// Result alias for configuration checks.
pub type ConfigResult<T> = Result<T, ConfigError>;
