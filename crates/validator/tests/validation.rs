//! End-to-end validation over extracted leaves and cascaded objects.

use std::sync::Arc;

use pretty_assertions::assert_eq;
use strata_traverse::{ExtractionConfig, ExtractorRegistry, TypeDescriptor};
use strata_validator::prelude::*;
use strata_value::{Decimal, Kind, Object, Value};

fn validator(book: RuleBook) -> Validator {
    Validator::new(Arc::new(ExtractorRegistry::with_defaults()), book)
}

fn paths(report: &ValidationReport) -> Vec<Option<&str>> {
    report.violations.iter().map(|v| v.path.as_deref()).collect()
}

#[test]
fn decimal_list_with_minimum() {
    // List<@Min("25.00") BigDecimal>
    let mut book = RuleBook::new();
    let element = book.constrain(TypeDescriptor::simple(Kind::Decimal), min(Decimal::new(2500, 2)));
    let descriptor = TypeDescriptor::parameterized(Kind::Sequence, [element]);

    let report = validator(book).validate(&descriptor, &Value::sequence([10.0.into(), 30.0.into()]));

    assert_eq!(report.leaves, 2);
    assert_eq!(paths(&report), [Some("<list element>[0]")]);
    assert_eq!(report.violations[0].code, "min");
    assert_eq!(report.violations[0].param("min"), Some("25.00"));
}

#[test]
fn map_of_string_to_list_of_string() {
    // Map<@Length(max = 1) String, List<@NotBlank String>>
    let mut book = RuleBook::new();
    let key = book.constrain(TypeDescriptor::simple(Kind::Text), max_length(1));
    let element = book.constrain(TypeDescriptor::simple(Kind::Text), not_blank());
    let descriptor = TypeDescriptor::parameterized(
        Kind::Map,
        [key, TypeDescriptor::parameterized(Kind::Sequence, [element])],
    );
    let value = Value::map([
        ("k".into(), Value::sequence(["a".into(), " ".into()])),
        ("long".into(), Value::sequence([])),
    ]);

    let report = validator(book).validate(&descriptor, &value);

    assert_eq!(report.leaves, 4);
    let mut found: Vec<(String, Option<String>)> = report
        .violations
        .iter()
        .map(|v| (v.code.to_string(), v.path.as_ref().map(ToString::to_string)))
        .collect();
    found.sort();
    assert_eq!(
        found,
        [
            ("length".to_owned(), Some("<map key>".to_owned())),
            (
                "not_blank".to_owned(),
                Some("<map value>.<list element>[1]".to_owned())
            ),
        ]
    );
}

#[test]
fn optional_payload_is_checked_only_when_present() {
    let mut book = RuleBook::new();
    let payload = book.constrain(TypeDescriptor::simple(Kind::Integer), max(10));
    let descriptor = TypeDescriptor::parameterized(Kind::Optional, [payload]);
    let validator = validator(book);

    assert!(validator.validate(&descriptor, &Value::optional(None)).is_valid());
    assert!(validator.validate(&descriptor, &Value::optional(Some(3.into()))).is_valid());
    assert_eq!(
        paths(&validator.validate(&descriptor, &Value::optional(Some(11.into())))),
        [Some("<optional value>")]
    );
}

#[test]
fn null_elements_only_fail_not_null() {
    let mut book = RuleBook::new();
    let element = book.constrain(TypeDescriptor::simple(Kind::Text), length(1, 3));
    let element = book.constrain(element, not_null());
    let descriptor = TypeDescriptor::parameterized(Kind::Sequence, [element]);

    let report = validator(book).validate(&descriptor, &Value::sequence([Value::Null, "abcd".into()]));
    let codes: Vec<_> = report.violations.iter().map(|v| v.code.to_string()).collect();
    assert_eq!(codes, ["not_null", "length"]);
}

#[test]
fn cyclic_graph_cascade_terminates() {
    let node = Kind::object_type("Node");
    let mut book = RuleBook::new();
    book.constrain_member(node.clone(), "label", not_blank());

    let a = Object::new(node.clone()).unwrap().with("label", "a");
    let b = Object::new(node.clone()).unwrap().with("label", "");
    a.set("next", b.clone());
    b.set("next", a.clone());

    let descriptor = TypeDescriptor::simple(node).cascaded();
    let report = validator(book).validate(&descriptor, &a.clone().into());

    assert_eq!(report.objects_cascaded, 2);
    assert_eq!(paths(&report), [Some("Node.label")]);
    a.set("next", Value::Null);
}

#[test]
fn suppressed_errors_are_reported() {
    let mut book = RuleBook::new();
    let mut descriptor = book.constrain(TypeDescriptor::simple(Kind::Integer), max(0));
    let mut value = Value::from(1);
    for _ in 0..3 {
        descriptor = TypeDescriptor::parameterized(Kind::Sequence, [descriptor]);
        value = Value::sequence([value]);
    }

    let config = ValidatorConfig::default()
        .with_extraction(ExtractionConfig::default().with_max_depth(2));
    let validator =
        Validator::with_config(Arc::new(ExtractorRegistry::with_defaults()), book, config).unwrap();
    let report = validator.validate(&descriptor, &value);

    assert!(report.is_valid());
    assert!(!report.is_complete());
    assert_eq!(report.suppressed.len(), 1);
}

#[test]
fn report_json() {
    let mut book = RuleBook::new();
    let descriptor = book.constrain(TypeDescriptor::simple(Kind::Text), not_null());
    let report = validator(book).validate(&descriptor, &Value::Null);

    let json = report.to_json_value();
    assert_eq!(json["valid"], false);
    assert_eq!(json["leaves"], 1);
    assert_eq!(json["violations"][0]["code"], "not_null");
    assert_eq!(json["violations"][0]["path"], serde_json::Value::Null);
}
