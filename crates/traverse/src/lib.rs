//! # strata-traverse
//!
//! Structural traversal and value extraction for rule checking.
//!
//! Two complementary walks over [`strata_value::Value`] graphs:
//!
//! - **Type-directed extraction** ([`ValueExtractor`]): given a
//!   [`TypeDescriptor`] for a declared generic type, such as
//!   `Map<Text, Sequence<Text>>` with rules on the inner text, pull out every
//!   value that carries rules or must be cascaded into, each tagged with the
//!   descriptor node and the [`Path`] it was reached by. Containers are
//!   opened by [`ContainerExtractor`]s looked up in an [`ExtractorRegistry`]
//!   by `(runtime kind, generic slot)`.
//! - **Graph walking** ([`GraphWalker`]): given only a value, visit every
//!   reachable object once, cycles included, reporting members to a
//!   [`Visitor`].
//!
//! ## Quick Start
//!
//! ```rust
//! use strata_traverse::prelude::*;
//! use strata_value::{Kind, Value};
//!
//! let registry = ExtractorRegistry::with_defaults();
//!
//! // Map<Text, Sequence<@Rule Text>>
//! let descriptor = TypeDescriptor::parameterized(
//!     Kind::Map,
//!     [
//!         TypeDescriptor::simple(Kind::Text).with_declared_rules(),
//!         TypeDescriptor::parameterized(
//!             Kind::Sequence,
//!             [TypeDescriptor::simple(Kind::Text).with_declared_rules()],
//!         ),
//!     ],
//! );
//! let value = Value::map([("k".into(), Value::sequence(["a".into(), "b".into()]))]);
//!
//! let extraction = ValueExtractor::new(&registry).extract(&descriptor, &value);
//! let found: Vec<String> = extraction.values().map(ToString::to_string).collect();
//! assert_eq!(found, ["k", "a", "b"]);
//! ```

pub mod config;
pub mod descriptor;
pub mod error;
pub mod extract;
pub mod extractor;
mod path;
pub mod prelude;
pub mod registry;
pub mod walk;

pub use config::{DEFAULT_MAX_DEPTH, ExtractionConfig};
pub use descriptor::{DescriptorId, Shape, TypeDescriptor};
pub use error::{ConfigError, ConfigResult, ExtractionError, ExtractorError};
pub use extract::{ExtractedLeaf, Extraction, ValueExtractor};
pub use extractor::{ContainerExtractor, ExtractorKey, ValueReceiver};
pub use path::{Path, PathSegment};
pub use registry::ExtractorRegistry;
pub use walk::{DescendAll, GraphWalker, Member, TraversalStats, Visitor};
