//! # strata-value
//!
//! Runtime object model walked by `strata-traverse`.
//!
//! Rust has no runtime reflection, so values that rules are checked against
//! are represented explicitly:
//!
//! - [`Kind`]: the runtime type, with an assignability relation so a
//!   user declared `LinkedList` kind matches wherever a `Sequence` is
//!   expected.
//! - [`Value`]: scalars inline, containers and objects as shared nodes.
//! - [`Identity`]: pointer identity of a node, for identity-keyed visited
//!   sets.
//!
//! ```rust
//! use strata_value::{Kind, Object, Value};
//!
//! let a = Object::new(Kind::object_type("Node")).unwrap();
//! let b = Object::new(Kind::object_type("Node")).unwrap();
//! a.set("next", b.clone());
//! b.set("next", a.clone());
//!
//! let next = a.get("next").unwrap();
//! assert_eq!(next.identity(), Some(b.identity()));
//! # a.set("next", Value::Null);
//! ```

mod error;
mod json;
mod kind;
mod node;
mod reference;
mod value;

pub use error::{ValueError, ValueResult};
pub use kind::{Kind, TypeName};
pub use node::{Array, Collection, Identity, Map, Object, ThreadScoped};
pub use reference::{Reference, WeakValue};
pub use value::Value;

/// Re-exported so callers can build decimal values without a direct
/// dependency.
pub use rust_decimal::Decimal;
