//! # strata-validator
//!
//! Rule checking on top of `strata-traverse`.
//!
//! Rules are declared in a [`RuleBook`], either on [`TypeDescriptor`] nodes
//! (checked against every value extraction reaches through that node) or on
//! members of object kinds (checked while cascading into objects). A
//! [`Validator`] runs both passes and returns a [`ValidationReport`].
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use strata_traverse::{ExtractorRegistry, TypeDescriptor};
//! use strata_validator::prelude::*;
//! use strata_value::{Kind, Object, Value};
//!
//! let person = Kind::object_type("Person");
//!
//! let mut book = RuleBook::new();
//! book.constrain_member(person.clone(), "name", not_blank());
//! // List<@Size(max = 2) @Cascade Person>
//! let element = TypeDescriptor::simple(person.clone()).cascaded();
//! let people = book.constrain(
//!     TypeDescriptor::parameterized(Kind::Sequence, [element]),
//!     max_size(2),
//! );
//!
//! let validator = Validator::new(Arc::new(ExtractorRegistry::with_defaults()), book);
//! let value = Value::sequence([
//!     Object::new(person.clone()).unwrap().with("name", "Ada").into(),
//!     Object::new(person).unwrap().with("name", " ").into(),
//! ]);
//!
//! let report = validator.validate(&people, &value);
//! assert!(!report.is_valid());
//! assert_eq!(
//!     report.violations[0].path.as_deref(),
//!     Some("<list element>[1].Person.name")
//! );
//! ```
//!
//! [`TypeDescriptor`]: strata_traverse::TypeDescriptor

mod book;
mod config;
mod engine;
mod error;
pub mod prelude;
mod report;
mod rule;
pub mod rules;

pub use book::RuleBook;
pub use config::ValidatorConfig;
pub use engine::Validator;
pub use error::ValidationError;
pub use report::ValidationReport;
pub use rule::Rule;
