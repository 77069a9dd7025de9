//! Object graph walker
//!
//! Untyped, breadth-first traversal of everything reachable from a root
//! value. Termination on cyclic graphs comes from a visited set keyed by
//! node [`Identity`]: a node already seen is never enqueued again, whatever
//! its contents compare equal to.
//!
//! For each dequeued value the walker:
//!
//! 1. skips null;
//! 2. skips core values (scalars, optional, reference, thread-scoped)
//!    without descending;
//! 3. skips kinds the visitor rejects;
//! 4. enqueues the elements of arrays and collections and the keys and
//!    values of maps (arrays of primitives are not descended);
//! 5. otherwise treats the value as an object and, unless
//!    [`Visitor::enter_object`] declines it, dispatches each accepted
//!    member to the matching `visit_*` callback, enqueueing the member's
//!    value when the callback returns `true`. A map member is never
//!    enqueued as a unit, only its keys and/or its values.
//!
//! [`Visitor::traversal_complete`] is called once the queue is empty.
//!
//! ```rust
//! use strata_traverse::{DescendAll, GraphWalker};
//! use strata_value::{Kind, Object, Value};
//!
//! let a = Object::new(Kind::object_type("Node")).unwrap();
//! let b = Object::new(Kind::object_type("Node")).unwrap();
//! a.set("next", b.clone());
//! b.set("next", a.clone());
//!
//! let stats = GraphWalker::new().traverse(&Value::from(a.clone()), &mut DescendAll);
//! assert_eq!(stats.objects_visited, 2);
//! # a.set("next", Value::Null);
//! ```

mod visitor;

use std::collections::{HashSet, VecDeque};

use strata_value::{Identity, Value};
use tracing::{debug, trace};

pub use visitor::{DescendAll, Member, Visitor};

/// Counters reported by [`GraphWalker::traverse`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TraversalStats {
    /// Objects whose members were inspected.
    pub objects_visited: usize,
    /// Values pushed onto the work queue, the root included.
    pub values_enqueued: usize,
}

/// Breadth-first walker over a value graph.
#[derive(Debug, Clone, Copy, Default)]
pub struct GraphWalker {
    _priv: (),
}

struct WorkQueue {
    queue: VecDeque<Value>,
    visited: HashSet<Identity>,
    enqueued: usize,
}

impl WorkQueue {
    fn seeded(root: &Value) -> Self {
        let mut work = Self {
            queue: VecDeque::new(),
            visited: HashSet::new(),
            enqueued: 0,
        };
        work.push(root.clone());
        work
    }

    fn push(&mut self, value: Value) {
        if value.is_null() {
            return;
        }
        if let Some(identity) = value.identity() {
            if !self.visited.insert(identity) {
                return;
            }
        }
        self.enqueued += 1;
        self.queue.push_back(value);
    }

    fn extend(&mut self, values: impl IntoIterator<Item = Value>) {
        for value in values {
            self.push(value);
        }
    }
}

impl GraphWalker {
    /// Creates a walker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Walks everything reachable from `root`, reporting to `visitor`.
    pub fn traverse<V>(&self, root: &Value, visitor: &mut V) -> TraversalStats
    where
        V: Visitor + ?Sized,
    {
        let mut work = WorkQueue::seeded(root);
        let mut objects_visited = 0;

        while let Some(value) = work.queue.pop_front() {
            let kind = value.kind();
            trace!(%kind, pending = work.queue.len(), "dequeued value");

            if kind.is_core() || !visitor.is_candidate_kind(&kind) {
                continue;
            }

            match &value {
                Value::Array(array) => {
                    if !array.is_primitive() {
                        work.extend(array.iter().cloned());
                    }
                }
                Value::Collection(collection) => work.extend(collection.items()),
                Value::Map(map) => {
                    for (k, v) in map.entries() {
                        work.push(k);
                        work.push(v);
                    }
                }
                Value::Object(object) => {
                    if !visitor.enter_object(object) {
                        continue;
                    }
                    objects_visited += 1;
                    for (name, member_value) in object.members() {
                        let member = Member::new(object, &name, &member_value);
                        if !visitor.is_candidate_member(&member) {
                            continue;
                        }
                        match &member_value {
                            Value::Null => {
                                visitor.visit_null(&member);
                            }
                            Value::Array(array) => {
                                if visitor.visit_array(&member, array) {
                                    work.push(member_value.clone());
                                }
                            }
                            Value::Collection(collection) => {
                                if visitor.visit_collection(&member, collection) {
                                    work.push(member_value.clone());
                                }
                            }
                            Value::Map(map) => {
                                if visitor.visit_map(&member, map) {
                                    let keys = visitor.visit_map_keys(&member, map);
                                    let values = visitor.visit_map_values(&member, map);
                                    for (k, v) in map.entries() {
                                        if keys {
                                            work.push(k);
                                        }
                                        if values {
                                            work.push(v);
                                        }
                                    }
                                }
                            }
                            _ => {
                                if visitor.visit_field(&member) {
                                    work.push(member_value.clone());
                                }
                            }
                        }
                    }
                }
                // scalars and payload boxes are core, handled above
                _ => {}
            }
        }

        visitor.traversal_complete();

        let stats = TraversalStats {
            objects_visited,
            values_enqueued: work.enqueued,
        };
        debug!(
            objects = stats.objects_visited,
            enqueued = stats.values_enqueued,
            "graph traversal finished"
        );
        stats
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use strata_value::{Array, Kind, Object};

    use super::*;

    #[derive(Default)]
    struct Recording {
        members: Vec<String>,
        kinds: Vec<String>,
        completed: usize,
    }

    impl Visitor for Recording {
        fn is_candidate_kind(&mut self, kind: &strata_value::Kind) -> bool {
            self.kinds.push(kind.to_string());
            true
        }

        fn is_candidate_member(&mut self, member: &Member<'_>) -> bool {
            self.members.push(member.to_string());
            true
        }

        fn traversal_complete(&mut self) {
            self.completed += 1;
        }
    }

    fn node(name: &str) -> Object {
        Object::new(Kind::object_type(name)).unwrap()
    }

    #[test]
    fn two_node_cycle_terminates() {
        let a = node("A");
        let b = node("B");
        a.set("next", b.clone());
        b.set("next", a.clone());

        let mut visitor = Recording::default();
        let stats = GraphWalker::new().traverse(&a.clone().into(), &mut visitor);

        assert_eq!(visitor.kinds, ["A", "B"]);
        assert_eq!(visitor.members, ["A.next", "B.next"]);
        assert_eq!(visitor.completed, 1);
        assert_eq!(
            stats,
            TraversalStats {
                objects_visited: 2,
                values_enqueued: 2
            }
        );
        a.set("next", Value::Null);
    }

    #[test]
    fn self_reference_visits_once() {
        let a = node("A");
        a.set("me", a.clone());
        let stats = GraphWalker::new().traverse(&a.clone().into(), &mut DescendAll);
        assert_eq!(stats.objects_visited, 1);
        a.set("me", Value::Null);
    }

    #[test]
    fn null_and_core_roots_visit_nothing() {
        let mut visitor = Recording::default();
        GraphWalker::new().traverse(&Value::Null, &mut visitor);
        GraphWalker::new().traverse(&Value::from("text"), &mut visitor);
        assert!(visitor.kinds.is_empty());
        assert_eq!(visitor.completed, 2);
    }

    #[test]
    fn breadth_first_order() {
        let root = node("Root");
        let left = node("Left");
        let right = node("Right");
        left.set("child", node("LeftChild"));
        root.set("left", left);
        root.set("right", right);

        let mut visitor = Recording::default();
        GraphWalker::new().traverse(&root.into(), &mut visitor);
        assert_eq!(visitor.kinds, ["Root", "Left", "Right", "LeftChild"]);
    }

    #[test]
    fn collection_members_are_descended() {
        let root = node("Root");
        let shared = node("Shared");
        root.set(
            "items",
            Value::sequence([shared.clone().into(), shared.into(), Value::Null]),
        );

        let stats = GraphWalker::new().traverse(&root.into(), &mut DescendAll);
        assert_eq!(stats.objects_visited, 2);
    }

    #[test]
    fn primitive_arrays_are_not_descended() {
        let root = node("Root");
        root.set("bytes", Array::new(Kind::Integer, [1.into(), 2.into()]).unwrap());

        let mut visitor = Recording::default();
        GraphWalker::new().traverse(&root.into(), &mut visitor);
        assert_eq!(visitor.kinds, ["Root", "array"]);
    }

    struct RejectKind(&'static str);

    impl Visitor for RejectKind {
        fn is_candidate_kind(&mut self, kind: &Kind) -> bool {
            kind.name() != self.0
        }
    }

    struct SkipObject(&'static str);

    impl Visitor for SkipObject {
        fn enter_object(&mut self, object: &Object) -> bool {
            object.kind().name() != self.0
        }
    }

    #[test]
    fn declined_object_members_are_skipped() {
        let root = node("Root");
        let closed = node("Closed");
        closed.set("child", node("Child"));
        root.set("closed", closed);
        root.set("empty", node("Empty"));

        let stats = GraphWalker::new().traverse(&root.into(), &mut SkipObject("Closed"));
        assert_eq!(stats.objects_visited, 2);
        assert_eq!(stats.values_enqueued, 3);
    }

    #[test]
    fn rejected_kind_is_not_descended() {
        let root = node("Root");
        let hidden = node("Hidden");
        hidden.set("child", node("Child"));
        root.set("hidden", hidden);

        let stats = GraphWalker::new().traverse(&root.into(), &mut RejectKind("Hidden"));
        assert_eq!(stats.objects_visited, 1);
    }

    #[derive(Default)]
    struct KeysOnly {
        seen: Vec<String>,
    }

    impl Visitor for KeysOnly {
        fn is_candidate_kind(&mut self, kind: &Kind) -> bool {
            self.seen.push(kind.to_string());
            true
        }

        fn visit_map_values(&mut self, _member: &Member<'_>, _map: &strata_value::Map) -> bool {
            false
        }
    }

    #[test]
    fn map_members_enqueue_keys_and_values_separately() {
        let root = node("Root");
        root.set("index", Value::map([(node("Key").into(), node("Val").into())]));

        let mut visitor = KeysOnly::default();
        GraphWalker::new().traverse(&root.into(), &mut visitor);
        assert_eq!(visitor.seen, ["Root", "Key"]);
    }
}
