//! Type descriptors
//!
//! A [`TypeDescriptor`] is the parsed, closed-form shape of a declared
//! generic type. It is built once per declared type by whoever knows the
//! type (a schema loader, a derive, a test) and is immutable afterwards.
//!
//! Each node carries two flags:
//!
//! - `needs_introspection`: values at this node are cascaded into;
//! - `has_declared_rules`: rules are declared directly on this node.
//!
//! A node whose flags are both clear and whose subtree has no flagged node
//! is skippable: extraction never visits it.
//!
//! ```rust
//! use strata_traverse::TypeDescriptor;
//! use strata_value::Kind;
//!
//! // Map<String, List<@Rule String>>
//! let descriptor = TypeDescriptor::parameterized(
//!     Kind::Map,
//!     [
//!         TypeDescriptor::simple(Kind::Text),
//!         TypeDescriptor::parameterized(
//!             Kind::Sequence,
//!             [TypeDescriptor::simple(Kind::Text).with_declared_rules()],
//!         ),
//!     ],
//! );
//! assert!(descriptor.requires_descent());
//! assert!(descriptor.slots().next().unwrap().is_skippable());
//! assert_eq!(descriptor.to_string(), "map<text, sequence<text>>");
//! ```

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use strata_value::Kind;

use crate::extractor::ContainerExtractor;

/// Stable identity of a descriptor node, assigned at construction.
///
/// Clones share the id: a clone is the same declared node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DescriptorId(u64);

impl DescriptorId {
    fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }

    /// Raw numeric value.
    #[must_use]
    pub fn get(self) -> u64 {
        self.0
    }
}

/// Structural shape of a descriptor node.
#[derive(Debug, Clone)]
pub enum Shape {
    /// A non-generic type.
    Simple(Kind),
    /// A generic type with its type arguments, one per slot.
    Parameterized {
        /// Raw container kind.
        raw: Kind,
        /// Type arguments.
        arguments: Vec<TypeDescriptor>,
    },
    /// A wildcard; slots are the lower bounds followed by the upper bounds.
    Wildcard {
        /// `? super` bounds.
        lower: Vec<TypeDescriptor>,
        /// `? extends` bounds.
        upper: Vec<TypeDescriptor>,
    },
    /// A type variable; slots are its bounds.
    TypeVariable {
        /// Variable name.
        name: Arc<str>,
        /// Declared bounds.
        bounds: Vec<TypeDescriptor>,
    },
    /// An array; its single slot is the component type.
    Array(Box<TypeDescriptor>),
}

/// One node of a parsed generic type.
#[derive(Debug, Clone)]
pub struct TypeDescriptor {
    id: DescriptorId,
    shape: Shape,
    needs_introspection: bool,
    has_declared_rules: bool,
    extractor: Option<Arc<dyn ContainerExtractor>>,
    descends: bool,
}

impl TypeDescriptor {
    fn from_shape(shape: Shape) -> Self {
        let mut descriptor = Self {
            id: DescriptorId::next(),
            shape,
            needs_introspection: false,
            has_declared_rules: false,
            extractor: None,
            descends: false,
        };
        let descends = descriptor
            .slots()
            .any(|child| child.is_relevant() || child.descends);
        descriptor.descends = descends;
        descriptor
    }

    // ==================== Constructors ====================

    /// A non-generic type.
    #[must_use]
    pub fn simple(kind: Kind) -> Self {
        Self::from_shape(Shape::Simple(kind))
    }

    /// A generic type with one argument per slot.
    #[must_use]
    pub fn parameterized(raw: Kind, arguments: impl IntoIterator<Item = TypeDescriptor>) -> Self {
        Self::from_shape(Shape::Parameterized {
            raw,
            arguments: arguments.into_iter().collect(),
        })
    }

    /// A wildcard with lower (`super`) and upper (`extends`) bounds.
    #[must_use]
    pub fn wildcard(
        lower: impl IntoIterator<Item = TypeDescriptor>,
        upper: impl IntoIterator<Item = TypeDescriptor>,
    ) -> Self {
        Self::from_shape(Shape::Wildcard {
            lower: lower.into_iter().collect(),
            upper: upper.into_iter().collect(),
        })
    }

    /// A type variable with its bounds.
    #[must_use]
    pub fn type_variable(
        name: impl Into<Arc<str>>,
        bounds: impl IntoIterator<Item = TypeDescriptor>,
    ) -> Self {
        Self::from_shape(Shape::TypeVariable {
            name: name.into(),
            bounds: bounds.into_iter().collect(),
        })
    }

    /// An array of `component`.
    #[must_use]
    pub fn array(component: TypeDescriptor) -> Self {
        Self::from_shape(Shape::Array(Box::new(component)))
    }

    // ==================== Builders ====================

    /// Marks values at this node for cascaded introspection.
    #[must_use = "builder methods must be chained or built"]
    pub fn cascaded(mut self) -> Self {
        self.needs_introspection = true;
        self
    }

    /// Marks this node as carrying directly declared rules.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_declared_rules(mut self) -> Self {
        self.has_declared_rules = true;
        self
    }

    /// Pins the extractor used to reach values at this node, bypassing the
    /// registry.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_extractor(mut self, extractor: Arc<dyn ContainerExtractor>) -> Self {
        self.extractor = Some(extractor);
        self
    }

    // ==================== Queries ====================

    /// Stable node identity.
    #[must_use]
    pub fn id(&self) -> DescriptorId {
        self.id
    }

    /// Structural shape.
    #[must_use]
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Declared kind for simple and parameterized nodes.
    #[must_use]
    pub fn declared_kind(&self) -> Option<&Kind> {
        match &self.shape {
            Shape::Simple(kind) | Shape::Parameterized { raw: kind, .. } => Some(kind),
            _ => None,
        }
    }

    /// Values at this node are cascaded into.
    #[must_use]
    pub fn needs_introspection(&self) -> bool {
        self.needs_introspection
    }

    /// Rules are declared directly on this node.
    #[must_use]
    pub fn has_declared_rules(&self) -> bool {
        self.has_declared_rules
    }

    /// Pinned extractor override, if any.
    #[must_use]
    pub fn extractor(&self) -> Option<&Arc<dyn ContainerExtractor>> {
        self.extractor.as_ref()
    }

    /// Values at this node are reported as leaves.
    #[must_use]
    pub fn is_relevant(&self) -> bool {
        self.needs_introspection || self.has_declared_rules
    }

    /// Some descendant is relevant, so extraction must look inside values at
    /// this node.
    #[must_use]
    pub fn requires_descent(&self) -> bool {
        self.descends
    }

    /// Neither this node nor any descendant is relevant.
    #[must_use]
    pub fn is_skippable(&self) -> bool {
        !self.is_relevant() && !self.descends
    }

    /// Child descriptors in slot order.
    pub fn slots(&self) -> Box<dyn Iterator<Item = &TypeDescriptor> + '_> {
        match &self.shape {
            Shape::Simple(_) => Box::new(std::iter::empty()),
            Shape::Parameterized { arguments, .. } => Box::new(arguments.iter()),
            Shape::Wildcard { lower, upper } => Box::new(lower.iter().chain(upper.iter())),
            Shape::TypeVariable { bounds, .. } => Box::new(bounds.iter()),
            Shape::Array(component) => Box::new(std::iter::once(component.as_ref())),
        }
    }
}

fn write_list(f: &mut fmt::Formatter<'_>, items: &[TypeDescriptor], sep: &str) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(sep)?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.shape {
            Shape::Simple(kind) => write!(f, "{kind}"),
            Shape::Parameterized { raw, arguments } => {
                write!(f, "{raw}<")?;
                write_list(f, arguments, ", ")?;
                f.write_str(">")
            }
            Shape::Wildcard { lower, upper } => {
                f.write_str("?")?;
                if !lower.is_empty() {
                    f.write_str(" super ")?;
                    write_list(f, lower, " & ")?;
                }
                if !upper.is_empty() {
                    f.write_str(" extends ")?;
                    write_list(f, upper, " & ")?;
                }
                Ok(())
            }
            Shape::TypeVariable { name, bounds } => {
                f.write_str(name)?;
                if !bounds.is_empty() {
                    f.write_str(" extends ")?;
                    write_list(f, bounds, " & ")?;
                }
                Ok(())
            }
            Shape::Array(component) => write!(f, "{component}[]"),
        }
    }
}
