//! Runtime kinds and the assignability relation between them.
//!
//! A [`Kind`] is the runtime type of a [`Value`](crate::Value). Built-in
//! kinds form a small fixed hierarchy; user types are expressed as
//! [`Kind::Named`] with an explicit list of supertypes, which lets a
//! `LinkedList` kind be treated as a `Sequence` wherever a sequence is
//! expected.
//!
//! ```rust
//! use strata_value::Kind;
//!
//! let linked = Kind::named("LinkedList", [Kind::Sequence]);
//! assert!(linked.is_assignable_to(&Kind::Sequence));
//! assert!(linked.is_assignable_to(&Kind::Iterable));
//! assert!(!linked.is_assignable_to(&Kind::Set));
//! ```

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// The runtime type of a value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Kind {
    /// The absent value.
    Null,
    /// `true` / `false`.
    Boolean,
    /// 64-bit signed integer.
    Integer,
    /// 64-bit float.
    Float,
    /// Arbitrary precision decimal.
    Decimal,
    /// UTF-8 text.
    Text,

    /// Anything that yields elements in order.
    Iterable,
    /// A sized iterable.
    Collection,
    /// Ordered, index-addressable collection.
    Sequence,
    /// Collection without duplicates.
    Set,
    /// Key/value container.
    Map,
    /// Legacy keyed container. Named kinds may be both a `Map` and a `Dictionary`.
    Dictionary,
    /// Box holding zero or one value.
    Optional,
    /// Strong reference box.
    Reference,
    /// Reference that does not keep its referent alive.
    WeakReference,
    /// Box holding one binding per thread.
    ThreadScoped,
    /// Fixed element-kind array.
    Array,
    /// Plain structured object with named members.
    Object,

    /// User declared type.
    Named(Arc<TypeName>),
}

/// Name and supertypes of a user declared kind.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeName {
    /// Type name as shown in paths and diagnostics.
    pub name: Arc<str>,
    /// Direct supertypes.
    pub supertypes: Vec<Kind>,
}

impl Kind {
    /// Creates a user declared kind with the given direct supertypes.
    pub fn named(name: impl Into<Arc<str>>, supertypes: impl IntoIterator<Item = Kind>) -> Self {
        Self::Named(Arc::new(TypeName {
            name: name.into(),
            supertypes: supertypes.into_iter().collect(),
        }))
    }

    /// Creates a user declared structured object kind.
    pub fn object_type(name: impl Into<Arc<str>>) -> Self {
        Self::named(name, [Kind::Object])
    }

    /// Human readable name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Null => "null",
            Self::Boolean => "boolean",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Decimal => "decimal",
            Self::Text => "text",
            Self::Iterable => "iterable",
            Self::Collection => "collection",
            Self::Sequence => "sequence",
            Self::Set => "set",
            Self::Map => "map",
            Self::Dictionary => "dictionary",
            Self::Optional => "optional",
            Self::Reference => "reference",
            Self::WeakReference => "weak_reference",
            Self::ThreadScoped => "thread_scoped",
            Self::Array => "array",
            Self::Object => "object",
            Self::Named(t) => &t.name,
        }
    }

    /// Returns `true` if a value of this kind may be used where `target` is
    /// expected.
    ///
    /// The relation is reflexive and transitive: `Sequence` and `Set` are
    /// collections, collections are iterables, weak references are
    /// references, and a named kind is assignable to anything one of its
    /// supertypes is assignable to.
    #[must_use]
    pub fn is_assignable_to(&self, target: &Kind) -> bool {
        if self == target {
            return true;
        }
        match self {
            Self::Sequence | Self::Set => Self::Collection.is_assignable_to(target),
            Self::Collection => *target == Self::Iterable,
            Self::WeakReference => *target == Self::Reference,
            Self::Named(t) => t.supertypes.iter().any(|s| s.is_assignable_to(target)),
            _ => false,
        }
    }

    /// Returns `true` for platform values the graph walker never descends
    /// into: scalars and the single-payload boxes.
    #[must_use]
    pub fn is_core(&self) -> bool {
        match self {
            Self::Null
            | Self::Boolean
            | Self::Integer
            | Self::Float
            | Self::Decimal
            | Self::Text
            | Self::Optional
            | Self::Reference
            | Self::WeakReference
            | Self::ThreadScoped => true,
            Self::Named(t) => !t.supertypes.is_empty() && t.supertypes.iter().all(Kind::is_core),
            _ => false,
        }
    }

    /// Returns `true` for element kinds stored unboxed in arrays.
    #[must_use]
    pub const fn is_primitive(&self) -> bool {
        matches!(self, Self::Boolean | Self::Integer | Self::Float)
    }

    /// Returns `true` for kinds that hold other values.
    #[must_use]
    pub fn is_container(&self) -> bool {
        [
            Self::Iterable,
            Self::Map,
            Self::Dictionary,
            Self::Optional,
            Self::Reference,
            Self::ThreadScoped,
            Self::Array,
        ]
        .iter()
        .any(|k| self.is_assignable_to(k))
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
