//! Rule declarations
//!
//! A [`RuleBook`] records which rules apply where:
//!
//! - on a descriptor node, via [`RuleBook::constrain`], which also marks the
//!   node as rule-bearing so extraction reports values reached through it;
//! - on a member of an object kind, via [`RuleBook::constrain_member`],
//!   checked while cascading into objects. Member rules declared on a kind
//!   also apply to its subtypes.

use std::collections::HashMap;
use std::sync::Arc;

use indexmap::IndexMap;
use strata_traverse::{DescriptorId, TypeDescriptor};
use strata_value::Kind;

use crate::rule::Rule;

/// Rules keyed by descriptor node and by object member.
#[derive(Debug, Default)]
pub struct RuleBook {
    declared: HashMap<DescriptorId, Vec<Arc<dyn Rule>>>,
    members: IndexMap<Kind, IndexMap<Arc<str>, Vec<Arc<dyn Rule>>>>,
}

impl RuleBook {
    /// Creates an empty book.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares `rule` on `descriptor` and returns the descriptor marked as
    /// rule-bearing.
    ///
    /// ```rust
    /// use strata_traverse::TypeDescriptor;
    /// use strata_validator::{RuleBook, rules};
    /// use strata_value::Kind;
    ///
    /// let mut book = RuleBook::new();
    /// let element = book.constrain(TypeDescriptor::simple(Kind::Decimal), rules::min(25));
    /// assert!(element.has_declared_rules());
    /// assert_eq!(book.rules_for(&element).len(), 1);
    /// ```
    pub fn constrain(&mut self, descriptor: TypeDescriptor, rule: impl Rule + 'static) -> TypeDescriptor {
        let descriptor = descriptor.with_declared_rules();
        self.declared
            .entry(descriptor.id())
            .or_default()
            .push(Arc::new(rule));
        descriptor
    }

    /// Declares `rule` on member `member` of objects of kind `kind`.
    pub fn constrain_member(
        &mut self,
        kind: Kind,
        member: impl Into<Arc<str>>,
        rule: impl Rule + 'static,
    ) -> &mut Self {
        self.members
            .entry(kind)
            .or_default()
            .entry(member.into())
            .or_default()
            .push(Arc::new(rule));
        self
    }

    /// Rules declared on `descriptor`.
    #[must_use]
    pub fn rules_for(&self, descriptor: &TypeDescriptor) -> &[Arc<dyn Rule>] {
        self.declared
            .get(&descriptor.id())
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Rules for member `member` of an object of kind `kind`, including
    /// those declared on its supertypes.
    pub fn member_rules<'a>(
        &'a self,
        kind: &'a Kind,
        member: &'a str,
    ) -> impl Iterator<Item = &'a Arc<dyn Rule>> + 'a {
        self.members
            .iter()
            .filter(move |(declared, _)| kind.is_assignable_to(declared))
            .filter_map(move |(_, members)| members.get(member))
            .flatten()
    }

    /// Returns `true` when any member rule is declared.
    #[must_use]
    pub fn has_member_rules(&self) -> bool {
        !self.members.is_empty()
    }

    /// Total number of declared rules.
    #[must_use]
    pub fn len(&self) -> usize {
        let declared: usize = self.declared.values().map(Vec::len).sum();
        let members: usize = self
            .members
            .values()
            .flat_map(IndexMap::values)
            .map(Vec::len)
            .sum();
        declared + members
    }

    /// Returns `true` when nothing is declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
