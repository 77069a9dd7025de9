use std::fmt;

use strata_value::{Array, Collection, Kind, Map, Object, Value};

/// A structural member of an object, as seen by a [`Visitor`].
#[derive(Clone, Copy)]
pub struct Member<'a> {
    owner: &'a Object,
    name: &'a str,
    value: &'a Value,
}

impl<'a> Member<'a> {
    pub(crate) fn new(owner: &'a Object, name: &'a str, value: &'a Value) -> Self {
        Self { owner, name, value }
    }

    /// Object declaring the member.
    #[must_use]
    pub fn owner(&self) -> &'a Object {
        self.owner
    }

    /// Kind of the declaring object.
    #[must_use]
    pub fn owner_kind(&self) -> &'a Kind {
        self.owner.kind()
    }

    /// Member name.
    #[must_use]
    pub fn name(&self) -> &'a str {
        self.name
    }

    /// Current value of the member.
    #[must_use]
    pub fn value(&self) -> &'a Value {
        self.value
    }
}

impl fmt::Debug for Member<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.owner.kind(), self.name)
    }
}

impl fmt::Display for Member<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.owner.kind(), self.name)
    }
}

/// Callbacks driving a [`GraphWalker`](super::GraphWalker).
///
/// Every method has a default that accepts everything, so an implementation
/// overrides only the decisions it cares about. The `visit_*` methods return
/// whether the member's value is enqueued for further traversal.
pub trait Visitor {
    /// Whether a dequeued value of `kind` is examined at all.
    fn is_candidate_kind(&mut self, kind: &Kind) -> bool {
        let _ = kind;
        true
    }

    /// An object is about to have its members inspected. Returning `false`
    /// skips all of them.
    fn enter_object(&mut self, object: &Object) -> bool {
        let _ = object;
        true
    }

    /// Whether `member` is inspected.
    fn is_candidate_member(&mut self, member: &Member<'_>) -> bool {
        let _ = member;
        true
    }

    /// The member holds null. Nothing is enqueued either way.
    fn visit_null(&mut self, member: &Member<'_>) -> bool {
        let _ = member;
        true
    }

    /// The member holds a value that is not an array, collection or map.
    fn visit_field(&mut self, member: &Member<'_>) -> bool {
        let _ = member;
        true
    }

    /// The member holds an array.
    fn visit_array(&mut self, member: &Member<'_>, array: &Array) -> bool {
        let _ = (member, array);
        true
    }

    /// The member holds a collection.
    fn visit_collection(&mut self, member: &Member<'_>, collection: &Collection) -> bool {
        let _ = (member, collection);
        true
    }

    /// The member holds a map. Returning `false` skips both its keys and
    /// its values.
    fn visit_map(&mut self, member: &Member<'_>, map: &Map) -> bool {
        let _ = (member, map);
        true
    }

    /// Whether the keys of an accepted map are enqueued.
    fn visit_map_keys(&mut self, member: &Member<'_>, map: &Map) -> bool {
        let _ = (member, map);
        true
    }

    /// Whether the values of an accepted map are enqueued.
    fn visit_map_values(&mut self, member: &Member<'_>, map: &Map) -> bool {
        let _ = (member, map);
        true
    }

    /// Called once when the work queue is empty.
    fn traversal_complete(&mut self) {}
}

/// Visitor that accepts every value and descends everywhere.
#[derive(Debug, Clone, Copy, Default)]
pub struct DescendAll;

impl Visitor for DescendAll {}
