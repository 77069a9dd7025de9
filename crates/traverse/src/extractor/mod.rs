//! Container extractors
//!
//! An extractor is bound to one `(container kind, generic slot)` pair and
//! knows how to push the slot's inner values out of a concrete container.
//! Slot 0 of a sequence is its element type; slots 0 and 1 of a map are its
//! key and value types.
//!
//! Applicability is by assignability, not exact match: an extractor keyed on
//! [`Kind::Sequence`] also applies to a user declared
//! `Kind::named("LinkedList", [Kind::Sequence])`.
//!
//! # Writing an extractor
//!
//! ```rust
//! use strata_traverse::{ContainerExtractor, ExtractorError, ExtractorKey, ValueReceiver};
//! use strata_value::{Kind, Value};
//!
//! /// Extracts the payload of a user declared `Boxed` object.
//! #[derive(Debug)]
//! struct BoxedPayload(ExtractorKey);
//!
//! impl ContainerExtractor for BoxedPayload {
//!     fn key(&self) -> &ExtractorKey {
//!         &self.0
//!     }
//!
//!     fn extract(&self, container: &Value, receiver: &mut dyn ValueReceiver) -> Result<(), ExtractorError> {
//!         let object = container
//!             .as_object()
//!             .ok_or_else(|| ExtractorError::unexpected(self.0.kind.clone(), container.kind()))?;
//!         receiver.value("<boxed value>", object.get("payload").unwrap_or_default());
//!         Ok(())
//!     }
//! }
//! ```

mod builtin;

use std::fmt;

use strata_value::{Kind, Value};

pub use builtin::{
    ArrayElement, DictionaryKey, DictionaryValue, IterableElement, MapKey, MapValue,
    OptionalPayload, ReferencePayload, SequenceElement, ThreadScopedPayload, defaults,
};

use crate::error::ExtractorError;

/// Identifies "the N-th generic slot of container kind K".
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ExtractorKey {
    /// Container kind.
    pub kind: Kind,
    /// Generic slot index.
    pub slot: usize,
}

impl ExtractorKey {
    /// Creates a key.
    pub fn new(kind: Kind, slot: usize) -> Self {
        Self { kind, slot }
    }
}

impl fmt::Display for ExtractorKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.kind, self.slot)
    }
}

/// Callback through which extractors report inner values.
pub trait ValueReceiver {
    /// Reports a singular payload (optional, reference, thread-scoped) or an
    /// unordered entry (map key or value).
    fn value(&mut self, name: &'static str, value: Value);

    /// Reports an element of an ordered container. Calls must follow the
    /// container's natural iteration order.
    fn indexed_value(&mut self, name: &'static str, index: usize, value: Value);
}

/// Strategy pulling the values of one generic slot out of a container.
pub trait ContainerExtractor: Send + Sync + fmt::Debug {
    /// The `(kind, slot)` this extractor was built for.
    fn key(&self) -> &ExtractorKey;

    /// Returns `true` when `kind` is assignable to this extractor's kind and
    /// `slot` equals its slot.
    fn applies_to(&self, kind: &Kind, slot: usize) -> bool {
        let key = self.key();
        key.slot == slot && kind.is_assignable_to(&key.kind)
    }

    /// Pushes the slot's values out of `container`.
    ///
    /// Values reported before an error is returned are still used.
    fn extract(
        &self,
        container: &Value,
        receiver: &mut dyn ValueReceiver,
    ) -> Result<(), ExtractorError>;
}
