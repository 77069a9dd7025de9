//! The unified runtime [`Value`].

use std::fmt;
use std::sync::Arc;

use rust_decimal::Decimal;

use crate::{Array, Collection, Identity, Kind, Map, Object, Reference, ThreadScoped};

/// Any runtime value the traversal engine can walk.
///
/// Scalars are stored inline. Containers and objects are reference-typed:
/// cloning a `Value` shares the node, and [`Value::identity`] exposes the
/// node's address for identity-keyed bookkeeping.
#[derive(Clone, Default)]
pub enum Value {
    /// Absent value.
    #[default]
    Null,
    /// Boolean.
    Boolean(bool),
    /// 64-bit signed integer.
    Integer(i64),
    /// 64-bit float.
    Float(f64),
    /// Arbitrary precision decimal.
    Decimal(Decimal),
    /// UTF-8 text.
    Text(Arc<str>),
    /// Fixed element-kind array.
    Array(Array),
    /// Sequence, set or user declared iterable.
    Collection(Collection),
    /// Key/value container.
    Map(Map),
    /// Zero-or-one box.
    Optional(Option<Box<Value>>),
    /// Strong or weak reference box.
    Reference(Reference),
    /// Per-thread box.
    ThreadScoped(ThreadScoped),
    /// Structured object.
    Object(Object),
}

impl Value {
    // ==================== Constructors ====================

    /// Creates a text value.
    pub fn text(v: impl Into<Arc<str>>) -> Self {
        Self::Text(v.into())
    }

    /// Creates a sequence collection.
    pub fn sequence(items: impl IntoIterator<Item = Value>) -> Self {
        Self::Collection(Collection::sequence(items))
    }

    /// Creates a set collection.
    pub fn set(items: impl IntoIterator<Item = Value>) -> Self {
        Self::Collection(Collection::set(items))
    }

    /// Creates a map from entries.
    pub fn map(entries: impl IntoIterator<Item = (Value, Value)>) -> Self {
        Self::Map(Map::from_entries(entries))
    }

    /// Creates an optional box.
    pub fn optional(payload: Option<Value>) -> Self {
        Self::Optional(payload.map(Box::new))
    }

    // ==================== Type queries ====================

    /// Runtime kind of this value.
    #[must_use]
    pub fn kind(&self) -> Kind {
        match self {
            Self::Null => Kind::Null,
            Self::Boolean(_) => Kind::Boolean,
            Self::Integer(_) => Kind::Integer,
            Self::Float(_) => Kind::Float,
            Self::Decimal(_) => Kind::Decimal,
            Self::Text(_) => Kind::Text,
            Self::Array(_) => Kind::Array,
            Self::Collection(c) => c.kind().clone(),
            Self::Map(m) => m.kind().clone(),
            Self::Optional(_) => Kind::Optional,
            Self::Reference(r) => r.kind(),
            Self::ThreadScoped(_) => Kind::ThreadScoped,
            Self::Object(o) => o.kind().clone(),
        }
    }

    /// Reference identity for reference-typed values, `None` otherwise.
    #[must_use]
    pub fn identity(&self) -> Option<Identity> {
        match self {
            Self::Array(a) => Some(a.identity()),
            Self::Collection(c) => Some(c.identity()),
            Self::Map(m) => Some(m.identity()),
            Self::ThreadScoped(t) => Some(t.identity()),
            Self::Object(o) => Some(o.identity()),
            _ => None,
        }
    }

    /// Returns `true` for [`Value::Null`].
    #[inline]
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    // ==================== Accessors ====================

    /// Text content, if this is text.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Integer content, if this is an integer.
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Boolean content, if this is a boolean.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Numeric content widened to a decimal.
    ///
    /// Integers convert exactly; floats convert when finite.
    #[must_use]
    pub fn to_decimal(&self) -> Option<Decimal> {
        match self {
            Self::Integer(i) => Some(Decimal::from(*i)),
            Self::Float(f) => Decimal::try_from(*f).ok(),
            Self::Decimal(d) => Some(*d),
            _ => None,
        }
    }

    /// Object handle, if this is an object.
    #[must_use]
    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Self::Object(o) => Some(o),
            _ => None,
        }
    }

    /// Number of contained items: characters for text, elements for arrays
    /// and collections, entries for maps.
    #[must_use]
    pub fn len(&self) -> Option<usize> {
        match self {
            Self::Text(s) => Some(s.chars().count()),
            Self::Array(a) => Some(a.len()),
            Self::Collection(c) => Some(c.len()),
            Self::Map(m) => Some(m.len()),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Boolean(a), Self::Boolean(b)) => a == b,
            (Self::Integer(a), Self::Integer(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a == b,
            (Self::Decimal(a), Self::Decimal(b)) => a == b,
            (Self::Text(a), Self::Text(b)) => a == b,
            (Self::Array(a), Self::Array(b)) => a == b,
            (Self::Collection(a), Self::Collection(b)) => a == b,
            (Self::Map(a), Self::Map(b)) => a == b,
            (Self::Optional(a), Self::Optional(b)) => a == b,
            (Self::Reference(a), Self::Reference(b)) => a == b,
            (Self::ThreadScoped(a), Self::ThreadScoped(b)) => a == b,
            (Self::Object(a), Self::Object(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("Null"),
            Self::Boolean(b) => write!(f, "Boolean({b})"),
            Self::Integer(i) => write!(f, "Integer({i})"),
            Self::Float(x) => write!(f, "Float({x})"),
            Self::Decimal(d) => write!(f, "Decimal({d})"),
            Self::Text(s) => write!(f, "Text({s:?})"),
            Self::Array(a) => a.fmt(f),
            Self::Collection(c) => c.fmt(f),
            Self::Map(m) => m.fmt(f),
            Self::Optional(o) => f.debug_tuple("Optional").field(o).finish(),
            Self::Reference(r) => r.fmt(f),
            Self::ThreadScoped(t) => t.fmt(f),
            Self::Object(o) => o.fmt(f),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Boolean(b) => write!(f, "{b}"),
            Self::Integer(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Decimal(d) => write!(f, "{d}"),
            Self::Text(s) => f.write_str(s),
            other => write!(f, "<{}{}>", other.kind(), other.identity().map(|i| i.to_string()).unwrap_or_default()),
        }
    }
}

// ==================== Conversions ====================

macro_rules! impl_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Self::$variant(v.into())
                }
            }
        )*
    };
}

impl_from! {
    bool => Boolean,
    i32 => Integer,
    i64 => Integer,
    u32 => Integer,
    f64 => Float,
    Decimal => Decimal,
    &str => Text,
    String => Text,
    Arc<str> => Text,
    Array => Array,
    Collection => Collection,
    Map => Map,
    Reference => Reference,
    ThreadScoped => ThreadScoped,
    Object => Object,
}

impl From<Option<Value>> for Value {
    fn from(v: Option<Value>) -> Self {
        Self::optional(v)
    }
}
