//! Validation orchestration
//!
//! [`Validator::validate`] runs in two passes over one value:
//!
//! 1. **Type-directed**: the descriptor's rule-bearing leaves are extracted
//!    and every rule declared on a leaf's descriptor node is checked against
//!    the leaf's value. Violations carry the leaf's path, e.g.
//!    `<map value>.<list element>[1]`.
//! 2. **Cascade**: leaves whose descriptor needs introspection are walked
//!    with the [`GraphWalker`], and member rules from the [`RuleBook`] are
//!    checked on every reachable object. Violations carry the member as
//!    `Type.member`, prefixed by the leaf's path when the leaf is not the
//!    root. Each object is entered at most once per call, however many
//!    leaves reach it.

use std::collections::HashSet;
use std::sync::Arc;

use strata_traverse::{
    ConfigResult, ExtractedLeaf, Extraction, ExtractorRegistry, GraphWalker, Member, Path,
    TypeDescriptor, ValueExtractor, Visitor,
};
use strata_value::{Identity, Kind, Object, Value};
use tracing::{debug, trace, warn};

use crate::book::RuleBook;
use crate::config::ValidatorConfig;
use crate::error::ValidationError;
use crate::report::ValidationReport;

/// Checks values against the rules of a [`RuleBook`].
///
/// ```rust
/// use std::sync::Arc;
///
/// use strata_traverse::{ExtractorRegistry, TypeDescriptor};
/// use strata_validator::{RuleBook, Validator, rules};
/// use strata_value::{Kind, Value};
///
/// let mut book = RuleBook::new();
/// let element = book.constrain(TypeDescriptor::simple(Kind::Decimal), rules::min(25));
/// let descriptor = TypeDescriptor::parameterized(Kind::Sequence, [element]);
///
/// let validator = Validator::new(Arc::new(ExtractorRegistry::with_defaults()), book);
/// let report = validator.validate(&descriptor, &Value::sequence([10.0.into(), 30.0.into()]));
///
/// assert_eq!(report.leaves, 2);
/// assert_eq!(report.violations.len(), 1);
/// assert_eq!(report.violations[0].path.as_deref(), Some("<list element>[0]"));
/// ```
#[derive(Debug)]
pub struct Validator {
    registry: Arc<ExtractorRegistry>,
    book: RuleBook,
    config: ValidatorConfig,
}

impl Validator {
    /// Creates a validator with the default configuration.
    #[must_use]
    pub fn new(registry: Arc<ExtractorRegistry>, book: RuleBook) -> Self {
        Self {
            registry,
            book,
            config: ValidatorConfig::default(),
        }
    }

    /// Creates a validator with an explicit configuration.
    pub fn with_config(
        registry: Arc<ExtractorRegistry>,
        book: RuleBook,
        config: ValidatorConfig,
    ) -> ConfigResult<Self> {
        config.validate()?;
        Ok(Self {
            registry,
            book,
            config,
        })
    }

    /// Registry used for extraction.
    #[must_use]
    pub fn registry(&self) -> &ExtractorRegistry {
        &self.registry
    }

    /// Declared rules.
    #[must_use]
    pub fn book(&self) -> &RuleBook {
        &self.book
    }

    /// Active configuration.
    #[must_use]
    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Validates `value` as an instance of the type `descriptor` describes.
    #[must_use]
    pub fn validate(&self, descriptor: &TypeDescriptor, value: &Value) -> ValidationReport {
        let extraction =
            match ValueExtractor::with_config(&self.registry, self.config.extraction.clone()) {
                Ok(extractor) => extractor.extract(descriptor, value),
                Err(error) => {
                    warn!(%error, "extraction config rejected, nothing extracted");
                    Extraction::default()
                }
            };

        let mut violations = Vec::new();
        let mut checked = HashSet::new();

        for leaf in &extraction.leaves {
            self.check_leaf(leaf, &mut violations);

            let walk = leaf
                .value
                .identity()
                .is_some_and(|identity| !checked.contains(&identity));
            if self.config.cascade && leaf.descriptor.needs_introspection() && walk {
                self.cascade(leaf, &mut checked, &mut violations);
            }
        }
        let objects_cascaded = checked.len();

        let report = ValidationReport {
            violations,
            suppressed: extraction.errors,
            leaves: extraction.leaves.len(),
            objects_cascaded,
        };
        debug!(
            descriptor = %descriptor,
            leaves = report.leaves,
            violations = report.violations.len(),
            suppressed = report.suppressed.len(),
            cascaded = report.objects_cascaded,
            "validation finished"
        );
        report
    }

    fn check_leaf(&self, leaf: &ExtractedLeaf<'_>, violations: &mut Vec<ValidationError>) {
        for rule in self.book.rules_for(leaf.descriptor) {
            if let Err(error) = rule.check(&leaf.value) {
                trace!(code = rule.code(), path = %leaf.path, "rule violated");
                violations.push(located(error, &leaf.path, None));
            }
        }
    }

    fn cascade(
        &self,
        leaf: &ExtractedLeaf<'_>,
        checked: &mut HashSet<Identity>,
        violations: &mut Vec<ValidationError>,
    ) {
        let mut visitor = Cascade {
            book: &self.book,
            base: &leaf.path,
            violations,
            checked,
        };
        GraphWalker::new().traverse(&leaf.value, &mut visitor);
    }
}

fn located(error: ValidationError, base: &Path, member: Option<&Member<'_>>) -> ValidationError {
    let path = match (base.is_root(), member) {
        (true, None) => return error,
        (true, Some(member)) => member.to_string(),
        (false, None) => base.to_string(),
        (false, Some(member)) => format!("{base}.{member}"),
    };
    error.with_path(path)
}

/// Applies member rules to every object the walker reaches.
///
/// `checked` spans the whole validation call. An object entered by an
/// earlier walk is declined, together with everything reachable only
/// through it.
struct Cascade<'a> {
    book: &'a RuleBook,
    base: &'a Path,
    violations: &'a mut Vec<ValidationError>,
    checked: &'a mut HashSet<Identity>,
}

impl Visitor for Cascade<'_> {
    fn is_candidate_kind(&mut self, kind: &Kind) -> bool {
        kind.is_container() || kind.is_assignable_to(&Kind::Object)
    }

    fn enter_object(&mut self, object: &Object) -> bool {
        self.checked.insert(object.identity())
    }

    fn is_candidate_member(&mut self, member: &Member<'_>) -> bool {
        for rule in self.book.member_rules(member.owner_kind(), member.name()) {
            if let Err(error) = rule.check(member.value()) {
                trace!(code = rule.code(), %member, "member rule violated");
                self.violations
                    .push(located(error, self.base, Some(member)));
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use strata_traverse::ExtractionConfig;

    use super::*;
    use crate::rules::{length, not_blank, not_null};

    fn registry() -> Arc<ExtractorRegistry> {
        Arc::new(ExtractorRegistry::with_defaults())
    }

    fn person_book() -> RuleBook {
        let mut book = RuleBook::new();
        book.constrain_member(Kind::object_type("Person"), "name", not_null())
            .constrain_member(Kind::object_type("Person"), "name", not_blank());
        book
    }

    fn person(name: impl Into<Value>) -> Object {
        Object::new(Kind::object_type("Person"))
            .unwrap()
            .with("name", name)
    }

    #[test]
    fn root_violation_has_no_path() {
        let mut book = RuleBook::new();
        let descriptor = book.constrain(TypeDescriptor::simple(Kind::Text), length(2, 4));
        let report = Validator::new(registry(), book).validate(&descriptor, &"x".into());

        assert_eq!(report.violations.len(), 1);
        assert_eq!(report.violations[0].path, None);
    }

    #[test]
    fn cascaded_root_reports_member_path() {
        let descriptor = TypeDescriptor::simple(Kind::object_type("Person")).cascaded();
        let validator = Validator::new(registry(), person_book());

        let report = validator.validate(&descriptor, &person(Value::Null).into());
        let paths: Vec<_> = report.violations.iter().map(|v| v.path.as_deref()).collect();
        assert_eq!(paths, [Some("Person.name")]);
        assert_eq!(report.objects_cascaded, 1);

        let report = validator.validate(&descriptor, &person("  ").into());
        assert_eq!(report.violations[0].code, "not_blank");
    }

    #[test]
    fn cascaded_elements_are_prefixed_by_leaf_path() {
        let descriptor = TypeDescriptor::parameterized(
            Kind::Sequence,
            [TypeDescriptor::simple(Kind::object_type("Person")).cascaded()],
        );
        let value = Value::sequence([person("ada").into(), person("").into()]);

        let report = Validator::new(registry(), person_book()).validate(&descriptor, &value);
        assert_eq!(
            report.violations[0].path.as_deref(),
            Some("<list element>[1].Person.name")
        );
        assert_eq!(report.leaves, 2);
    }

    #[test]
    fn cascade_reaches_nested_objects() {
        let address = Kind::object_type("Address");
        let mut book = person_book();
        book.constrain_member(address.clone(), "zip", not_null());

        let home = Object::new(address).unwrap().with("zip", Value::Null);
        let root = person("ada").with("home", home);

        let descriptor = TypeDescriptor::simple(Kind::object_type("Person")).cascaded();
        let report = Validator::new(registry(), book).validate(&descriptor, &root.into());

        assert_eq!(report.violations.len(), 1);
        assert_eq!(report.violations[0].path.as_deref(), Some("Address.zip"));
        assert_eq!(report.objects_cascaded, 2);
    }

    #[test]
    fn shared_object_is_checked_once() {
        let shared = person(Value::Null);
        let descriptor = TypeDescriptor::parameterized(
            Kind::Sequence,
            [TypeDescriptor::simple(Kind::object_type("Person")).cascaded()],
        );
        let value = Value::sequence([shared.clone().into(), shared.into()]);

        let report = Validator::new(registry(), person_book()).validate(&descriptor, &value);
        assert_eq!(report.violations.len(), 1);
    }

    #[test]
    fn memberless_objects_are_counted_once() {
        let empty = Object::new(Kind::object_type("Empty")).unwrap();
        let descriptor = TypeDescriptor::parameterized(
            Kind::Sequence,
            [TypeDescriptor::simple(Kind::object_type("Empty")).cascaded()],
        );
        let value = Value::sequence([empty.clone().into(), empty.into()]);

        let report = Validator::new(registry(), RuleBook::new()).validate(&descriptor, &value);
        assert!(report.is_valid());
        assert_eq!(report.leaves, 2);
        assert_eq!(report.objects_cascaded, 1);
    }

    #[test]
    fn object_reached_by_two_leaves_is_entered_once() {
        let shared = person(Value::Null);
        let first = Object::new(Kind::object_type("Holder")).unwrap().with("p", shared.clone());
        let second = Object::new(Kind::object_type("Holder")).unwrap().with("p", shared);
        let descriptor = TypeDescriptor::parameterized(
            Kind::Sequence,
            [TypeDescriptor::simple(Kind::object_type("Holder")).cascaded()],
        );
        let value = Value::sequence([first.into(), second.into()]);

        let report = Validator::new(registry(), person_book()).validate(&descriptor, &value);
        assert_eq!(report.objects_cascaded, 3);
        assert_eq!(report.violations.len(), 1);
        assert_eq!(
            report.violations[0].path.as_deref(),
            Some("<list element>[0].Person.name")
        );
    }

    #[test]
    fn cascade_can_be_disabled() {
        let descriptor = TypeDescriptor::simple(Kind::object_type("Person")).cascaded();
        let config = ValidatorConfig::default().with_cascade(false);
        let validator = Validator::with_config(registry(), person_book(), config).unwrap();

        let report = validator.validate(&descriptor, &person(Value::Null).into());
        assert!(report.is_valid());
        assert_eq!(report.leaves, 1);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = ValidatorConfig::default()
            .with_extraction(ExtractionConfig::default().with_max_depth(0));
        assert!(Validator::with_config(registry(), RuleBook::new(), config).is_err());
    }
}
