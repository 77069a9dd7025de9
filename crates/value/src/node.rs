//! Reference-typed nodes.
//!
//! Every container or structured object is an `Arc`-backed node: cloning a
//! handle shares the node, and [`Identity`] is the node's address. Nodes that
//! can take part in cycles (`Collection`, `Map`, `Object`) use interior
//! mutability so a graph such as `A.next = B, B.next = A` can be built after
//! both nodes exist.
//!
//! `Debug` on a node prints its kind, size and identity, never its contents,
//! so cyclic graphs stay printable.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::thread::{self, ThreadId};

use indexmap::IndexMap;
use parking_lot::{Mutex, RwLock};

use crate::error::{ValueError, ValueResult};
use crate::{Kind, Value};

// ============================================================================
// IDENTITY
// ============================================================================

/// Reference identity of a node.
///
/// Two handles have the same identity iff they share one allocation.
/// Structural equality plays no part.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Identity(usize);

impl Identity {
    pub(crate) fn of<T>(node: &Arc<T>) -> Self {
        Self(Arc::as_ptr(node).cast::<()>().addr())
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{:x}", self.0)
    }
}

macro_rules! node_identity {
    ($($ty:ident),* $(,)?) => {
        $(
            impl $ty {
                /// Returns the reference identity of this node.
                #[must_use]
                pub fn identity(&self) -> Identity {
                    Identity::of(&self.0)
                }

                /// Returns `true` if both handles point at the same node.
                #[must_use]
                pub fn ptr_eq(&self, other: &Self) -> bool {
                    Arc::ptr_eq(&self.0, &other.0)
                }
            }

            impl PartialEq for $ty {
                fn eq(&self, other: &Self) -> bool {
                    self.ptr_eq(other)
                }
            }

            impl Eq for $ty {}
        )*
    };
}

node_identity!(Array, Collection, Map, Object, ThreadScoped);

// ============================================================================
// ARRAY
// ============================================================================

/// Fixed-length array with a declared element kind.
#[derive(Clone)]
pub struct Array(pub(crate) Arc<ArrayNode>);

pub(crate) struct ArrayNode {
    element: Kind,
    items: Vec<Value>,
}

impl Array {
    /// Creates an array, checking every item against the element kind.
    ///
    /// Null items are accepted unless the element kind is primitive.
    pub fn new(element: Kind, items: impl IntoIterator<Item = Value>) -> ValueResult<Self> {
        let items: Vec<Value> = items.into_iter().collect();
        for item in &items {
            let accepted = if item.is_null() {
                !element.is_primitive()
            } else {
                item.kind().is_assignable_to(&element)
            };
            if !accepted {
                return Err(ValueError::kind_mismatch(element, item.kind()));
            }
        }
        Ok(Self(Arc::new(ArrayNode { element, items })))
    }

    /// Declared element kind.
    #[must_use]
    pub fn element_kind(&self) -> &Kind {
        &self.0.element
    }

    /// Returns `true` when elements are primitives. Such arrays hold no
    /// structure worth walking.
    #[must_use]
    pub fn is_primitive(&self) -> bool {
        self.0.element.is_primitive()
    }

    /// Number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.items.len()
    }

    /// Returns `true` for a zero-length array.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.items.is_empty()
    }

    /// Element at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.0.items.get(index)
    }

    /// Elements in index order.
    pub fn iter(&self) -> impl Iterator<Item = &Value> {
        self.0.items.iter()
    }
}

impl fmt::Debug for Array {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Array")
            .field("element", &self.0.element)
            .field("len", &self.len())
            .field("id", &self.identity())
            .finish()
    }
}

// ============================================================================
// COLLECTION
// ============================================================================

/// Growable iterable container: a sequence, a set or a user declared
/// iterable kind.
#[derive(Clone)]
pub struct Collection(pub(crate) Arc<CollectionNode>);

pub(crate) struct CollectionNode {
    kind: Kind,
    items: RwLock<Vec<Value>>,
}

impl Collection {
    /// Creates an empty collection of the given kind.
    ///
    /// The kind must be assignable to [`Kind::Iterable`].
    pub fn with_kind(kind: Kind) -> ValueResult<Self> {
        if !kind.is_assignable_to(&Kind::Iterable) {
            return Err(ValueError::kind_mismatch(Kind::Iterable, kind));
        }
        Ok(Self(Arc::new(CollectionNode {
            kind,
            items: RwLock::new(Vec::new()),
        })))
    }

    /// Creates a collection of the given kind and fills it.
    pub fn from_items(kind: Kind, items: impl IntoIterator<Item = Value>) -> ValueResult<Self> {
        let collection = Self::with_kind(kind)?;
        for item in items {
            collection.push(item);
        }
        Ok(collection)
    }

    /// Creates a sequence.
    pub fn sequence(items: impl IntoIterator<Item = Value>) -> Self {
        Self(Arc::new(CollectionNode {
            kind: Kind::Sequence,
            items: RwLock::new(items.into_iter().collect()),
        }))
    }

    /// Creates a set; duplicates are dropped, first occurrence wins.
    pub fn set(items: impl IntoIterator<Item = Value>) -> Self {
        let set = Self(Arc::new(CollectionNode {
            kind: Kind::Set,
            items: RwLock::new(Vec::new()),
        }));
        for item in items {
            set.push(item);
        }
        set
    }

    /// Runtime kind.
    #[must_use]
    pub fn kind(&self) -> &Kind {
        &self.0.kind
    }

    /// Returns `true` when the kind is set-like.
    #[must_use]
    pub fn is_set(&self) -> bool {
        self.0.kind.is_assignable_to(&Kind::Set)
    }

    /// Appends an item. Set-like collections reject duplicates and return
    /// `false`.
    pub fn push(&self, item: Value) -> bool {
        let mut items = self.0.items.write();
        if self.is_set() && items.contains(&item) {
            return false;
        }
        items.push(item);
        true
    }

    /// Number of items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.items.read().len()
    }

    /// Returns `true` when empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.items.read().is_empty()
    }

    /// Item at `index` in iteration order.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<Value> {
        self.0.items.read().get(index).cloned()
    }

    /// Snapshot of the items in iteration order.
    #[must_use]
    pub fn items(&self) -> Vec<Value> {
        self.0.items.read().clone()
    }
}

impl fmt::Debug for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Collection")
            .field("kind", &self.0.kind)
            .field("len", &self.len())
            .field("id", &self.identity())
            .finish()
    }
}

// ============================================================================
// MAP
// ============================================================================

/// Insertion-ordered key/value container.
#[derive(Clone)]
pub struct Map(pub(crate) Arc<MapNode>);

pub(crate) struct MapNode {
    kind: Kind,
    entries: RwLock<Vec<(Value, Value)>>,
}

impl Map {
    /// Creates an empty [`Kind::Map`].
    #[must_use]
    pub fn new() -> Self {
        Self(Arc::new(MapNode {
            kind: Kind::Map,
            entries: RwLock::new(Vec::new()),
        }))
    }

    /// Creates an empty map of the given kind.
    ///
    /// The kind must be assignable to [`Kind::Map`] or [`Kind::Dictionary`].
    pub fn with_kind(kind: Kind) -> ValueResult<Self> {
        if !kind.is_assignable_to(&Kind::Map) && !kind.is_assignable_to(&Kind::Dictionary) {
            return Err(ValueError::kind_mismatch(Kind::Map, kind));
        }
        Ok(Self(Arc::new(MapNode {
            kind,
            entries: RwLock::new(Vec::new()),
        })))
    }

    /// Creates a [`Kind::Map`] from entries; later duplicates replace earlier
    /// values.
    pub fn from_entries(entries: impl IntoIterator<Item = (Value, Value)>) -> Self {
        let map = Self::new();
        for (key, value) in entries {
            map.insert(key, value);
        }
        map
    }

    /// Runtime kind.
    #[must_use]
    pub fn kind(&self) -> &Kind {
        &self.0.kind
    }

    /// Inserts an entry, returning the replaced value if the key existed.
    pub fn insert(&self, key: Value, value: Value) -> Option<Value> {
        let mut entries = self.0.entries.write();
        if let Some(slot) = entries.iter_mut().find(|(k, _)| *k == key) {
            return Some(std::mem::replace(&mut slot.1, value));
        }
        entries.push((key, value));
        None
    }

    /// Looks up the value stored under `key`.
    #[must_use]
    pub fn get(&self, key: &Value) -> Option<Value> {
        self.0
            .entries
            .read()
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.entries.read().len()
    }

    /// Returns `true` when empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.entries.read().is_empty()
    }

    /// Snapshot of the keys in insertion order.
    #[must_use]
    pub fn keys(&self) -> Vec<Value> {
        self.0.entries.read().iter().map(|(k, _)| k.clone()).collect()
    }

    /// Snapshot of the values in insertion order.
    #[must_use]
    pub fn values(&self) -> Vec<Value> {
        self.0.entries.read().iter().map(|(_, v)| v.clone()).collect()
    }

    /// Snapshot of the entries in insertion order.
    #[must_use]
    pub fn entries(&self) -> Vec<(Value, Value)> {
        self.0.entries.read().clone()
    }
}

impl Default for Map {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Map {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Map")
            .field("kind", &self.0.kind)
            .field("len", &self.len())
            .field("id", &self.identity())
            .finish()
    }
}

// ============================================================================
// OBJECT
// ============================================================================

/// Plain structured object: named members in declaration order.
#[derive(Clone)]
pub struct Object(pub(crate) Arc<ObjectNode>);

pub(crate) struct ObjectNode {
    kind: Kind,
    members: RwLock<IndexMap<Arc<str>, Value>>,
}

impl Object {
    /// Creates an object of the given kind with no members.
    ///
    /// The kind must be assignable to [`Kind::Object`].
    pub fn new(kind: Kind) -> ValueResult<Self> {
        if !kind.is_assignable_to(&Kind::Object) {
            return Err(ValueError::kind_mismatch(Kind::Object, kind));
        }
        Ok(Self(Arc::new(ObjectNode {
            kind,
            members: RwLock::new(IndexMap::new()),
        })))
    }

    /// Creates an object of an anonymous [`Kind::Object`] kind.
    #[must_use]
    pub fn anonymous() -> Self {
        Self(Arc::new(ObjectNode {
            kind: Kind::Object,
            members: RwLock::new(IndexMap::new()),
        }))
    }

    /// Runtime kind.
    #[must_use]
    pub fn kind(&self) -> &Kind {
        &self.0.kind
    }

    /// Sets a member, returning its previous value.
    pub fn set(&self, name: impl Into<Arc<str>>, value: impl Into<Value>) -> Option<Value> {
        self.0.members.write().insert(name.into(), value.into())
    }

    /// Builder form of [`Object::set`].
    #[must_use = "builder methods must be chained or built"]
    pub fn with(self, name: impl Into<Arc<str>>, value: impl Into<Value>) -> Self {
        self.set(name, value);
        self
    }

    /// Current value of a member.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Value> {
        self.0.members.read().get(name).cloned()
    }

    /// Number of members.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.members.read().len()
    }

    /// Returns `true` for an object without members.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.members.read().is_empty()
    }

    /// Snapshot of the members in declaration order.
    #[must_use]
    pub fn members(&self) -> Vec<(Arc<str>, Value)> {
        self.0
            .members
            .read()
            .iter()
            .map(|(k, v)| (Arc::clone(k), v.clone()))
            .collect()
    }
}

impl fmt::Debug for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Object")
            .field("kind", &self.0.kind)
            .field("members", &self.len())
            .field("id", &self.identity())
            .finish()
    }
}

// ============================================================================
// THREAD SCOPED
// ============================================================================

/// Box holding one binding per thread.
///
/// Bindings are keyed by [`ThreadId`] and are not released when their thread
/// exits. A thread that binds a value into a long-lived box should
/// [`take`](Self::take) it before finishing; otherwise the binding stays
/// until the box itself is dropped.
#[derive(Clone, Default)]
pub struct ThreadScoped(pub(crate) Arc<ThreadScopedNode>);

#[derive(Default)]
pub(crate) struct ThreadScopedNode {
    slots: Mutex<HashMap<ThreadId, Value>>,
}

impl ThreadScoped {
    /// Creates a box with no bindings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `value` for the calling thread, returning the previous binding.
    pub fn set(&self, value: impl Into<Value>) -> Option<Value> {
        self.0.slots.lock().insert(thread::current().id(), value.into())
    }

    /// Binding of the calling thread.
    #[must_use]
    pub fn get(&self) -> Option<Value> {
        self.0.slots.lock().get(&thread::current().id()).cloned()
    }

    /// Removes and returns the binding of the calling thread.
    pub fn take(&self) -> Option<Value> {
        self.0.slots.lock().remove(&thread::current().id())
    }

    /// Number of threads holding a binding, exited threads included.
    #[must_use]
    pub fn bound_threads(&self) -> usize {
        self.0.slots.lock().len()
    }
}

impl fmt::Debug for ThreadScoped {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThreadScoped")
            .field("bindings", &self.0.slots.lock().len())
            .field("id", &self.identity())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn array_checks_element_kind() {
        let ok = Array::new(Kind::Integer, [Value::from(1), Value::from(2)]);
        assert!(ok.is_ok_and(|a| a.is_primitive() && a.len() == 2));

        let err = Array::new(Kind::Integer, [Value::from("x")]).unwrap_err();
        assert_eq!(err, ValueError::kind_mismatch(Kind::Integer, Kind::Text));

        assert!(Array::new(Kind::Integer, [Value::Null]).is_err());
        assert!(Array::new(Kind::Text, [Value::Null]).is_ok());
    }

    #[test]
    fn set_rejects_duplicates() {
        let set = Collection::set([Value::from("a"), Value::from("b"), Value::from("a")]);
        assert_eq!(set.len(), 2);
        assert!(!set.push(Value::from("b")));
        assert!(set.push(Value::from("c")));
    }

    #[test]
    fn collection_kind_must_be_iterable() {
        assert!(Collection::with_kind(Kind::named("Deque", [Kind::Sequence])).is_ok());
        assert!(Collection::with_kind(Kind::Map).is_err());
    }

    #[test]
    fn map_insert_replaces() {
        let map = Map::new();
        assert_eq!(map.insert("k".into(), 1.into()), None);
        assert_eq!(map.insert("k".into(), 2.into()), Some(Value::from(1)));
        assert_eq!(map.len(), 1);
        assert_eq!(map.get(&"k".into()), Some(Value::from(2)));
        assert!(Map::with_kind(Kind::Sequence).is_err());
        assert!(Map::with_kind(Kind::Dictionary).is_ok());
    }

    #[test]
    fn identity_is_by_reference() {
        let a = Object::anonymous();
        let b = Object::anonymous();
        assert_ne!(a.identity(), b.identity());
        assert_eq!(a.identity(), a.clone().identity());
        assert!(a != b);
    }

    #[test]
    fn cyclic_graph_is_printable() {
        let a = Object::new(Kind::object_type("Node")).unwrap();
        let b = Object::new(Kind::object_type("Node")).unwrap();
        a.set("next", b.clone());
        b.set("next", a.clone());
        let printed = format!("{a:?}");
        assert!(printed.contains("Node"));
        // break the cycle so both nodes are freed
        a.set("next", Value::Null);
    }

    #[test]
    fn thread_scoped_bindings_are_per_thread() {
        let scoped = ThreadScoped::new();
        scoped.set(7);
        let other = scoped.clone();
        let seen = std::thread::spawn(move || other.get()).join().unwrap();
        assert_eq!(seen, None);
        assert_eq!(scoped.get(), Some(Value::from(7)));
        assert_eq!(scoped.take(), Some(Value::from(7)));
        assert_eq!(scoped.get(), None);
    }

    #[test]
    fn exited_thread_bindings_remain_until_taken() {
        let scoped = ThreadScoped::new();
        std::thread::scope(|s| {
            s.spawn(|| {
                scoped.set(1);
            });
            s.spawn(|| {
                scoped.set(2);
                scoped.take();
            });
        });
        assert_eq!(scoped.bound_threads(), 1);
        assert_eq!(scoped.get(), None);
    }
}
