//! Errors raised while building runtime values.

use crate::Kind;

/// Error raised when a node is constructed against its own structural rules.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum ValueError {
    /// A kind was used where a different family of kinds is required.
    #[error("kind mismatch: expected {expected}, found {found}")]
    KindMismatch {
        /// Kind the node requires.
        expected: Kind,
        /// Kind that was supplied.
        found: Kind,
    },
}

impl ValueError {
    /// Creates a kind mismatch error.
    pub fn kind_mismatch(expected: Kind, found: Kind) -> Self {
        Self::KindMismatch { expected, found }
    }
}

/// Result alias for value construction.
pub type ValueResult<T> = Result<T, ValueError>;
