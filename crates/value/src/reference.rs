//! Strong and weak reference boxes.

use std::fmt;
use std::sync::{Arc, Weak};

use crate::node::{ArrayNode, CollectionNode, MapNode, ObjectNode, ThreadScopedNode};
use crate::{Array, Collection, Kind, Map, Object, ThreadScoped, Value};

/// A reference box around a single referent.
///
/// A strong reference always yields its referent. A weak reference yields it
/// only while some other handle keeps the node alive.
#[derive(Clone)]
pub enum Reference {
    /// Keeps the referent alive.
    Strong(Box<Value>),
    /// Does not keep the referent alive.
    Weak(WeakValue),
}

/// Weak handle to a reference-typed node.
#[derive(Clone)]
pub struct WeakValue(WeakNode);

#[derive(Clone)]
enum WeakNode {
    Array(Weak<ArrayNode>),
    Collection(Weak<CollectionNode>),
    Map(Weak<MapNode>),
    Object(Weak<ObjectNode>),
    ThreadScoped(Weak<ThreadScopedNode>),
    Cleared,
}

impl Reference {
    /// Creates a strong reference.
    pub fn strong(referent: impl Into<Value>) -> Self {
        Self::Strong(Box::new(referent.into()))
    }

    /// Creates a weak reference to a reference-typed value.
    ///
    /// Returns `None` for values without identity (scalars, optionals,
    /// references); there is nothing to point at weakly.
    #[must_use]
    pub fn weak(referent: &Value) -> Option<Self> {
        let node = match referent {
            Value::Array(a) => WeakNode::Array(Arc::downgrade(&a.0)),
            Value::Collection(c) => WeakNode::Collection(Arc::downgrade(&c.0)),
            Value::Map(m) => WeakNode::Map(Arc::downgrade(&m.0)),
            Value::Object(o) => WeakNode::Object(Arc::downgrade(&o.0)),
            Value::ThreadScoped(t) => WeakNode::ThreadScoped(Arc::downgrade(&t.0)),
            _ => return None,
        };
        Some(Self::Weak(WeakValue(node)))
    }

    /// Creates a weak reference whose referent is already gone.
    #[must_use]
    pub fn cleared() -> Self {
        Self::Weak(WeakValue(WeakNode::Cleared))
    }

    /// Runtime kind: [`Kind::Reference`] or [`Kind::WeakReference`].
    #[must_use]
    pub fn kind(&self) -> Kind {
        match self {
            Self::Strong(_) => Kind::Reference,
            Self::Weak(_) => Kind::WeakReference,
        }
    }

    /// Current referent, if still reachable.
    #[must_use]
    pub fn get(&self) -> Option<Value> {
        match self {
            Self::Strong(v) => Some((**v).clone()),
            Self::Weak(w) => w.upgrade(),
        }
    }
}

impl WeakValue {
    /// Upgrades to a strong handle if the node is still alive.
    #[must_use]
    pub fn upgrade(&self) -> Option<Value> {
        match &self.0 {
            WeakNode::Array(w) => w.upgrade().map(|n| Value::Array(Array(n))),
            WeakNode::Collection(w) => w.upgrade().map(|n| Value::Collection(Collection(n))),
            WeakNode::Map(w) => w.upgrade().map(|n| Value::Map(Map(n))),
            WeakNode::Object(w) => w.upgrade().map(|n| Value::Object(Object(n))),
            WeakNode::ThreadScoped(w) => w.upgrade().map(|n| Value::ThreadScoped(ThreadScoped(n))),
            WeakNode::Cleared => None,
        }
    }

    fn ptr_eq(&self, other: &Self) -> bool {
        match (&self.0, &other.0) {
            (WeakNode::Array(a), WeakNode::Array(b)) => a.ptr_eq(b),
            (WeakNode::Collection(a), WeakNode::Collection(b)) => a.ptr_eq(b),
            (WeakNode::Map(a), WeakNode::Map(b)) => a.ptr_eq(b),
            (WeakNode::Object(a), WeakNode::Object(b)) => a.ptr_eq(b),
            (WeakNode::ThreadScoped(a), WeakNode::ThreadScoped(b)) => a.ptr_eq(b),
            (WeakNode::Cleared, WeakNode::Cleared) => true,
            _ => false,
        }
    }
}

impl PartialEq for Reference {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Strong(a), Self::Strong(b)) => a == b,
            (Self::Weak(a), Self::Weak(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}

impl fmt::Debug for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Strong(v) => f.debug_tuple("Strong").field(v).finish(),
            Self::Weak(w) => f
                .debug_tuple("Weak")
                .field(&if w.upgrade().is_some() { "live" } else { "cleared" })
                .finish(),
        }
    }
}
