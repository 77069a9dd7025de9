//! Type-directed extraction
//!
//! Walks a [`TypeDescriptor`] together with a live [`Value`] and collects a
//! flat list of [`ExtractedLeaf`]s: every reachable value whose descriptor
//! node needs introspection or declares rules.
//!
//! For each slot of a descriptor node the extractor to use is the child's
//! pinned override or, failing that, the registry's answer for
//! `(runtime kind of the value, slot index)`. Resolution happens against the
//! runtime kind, so a value declared as `Iterable` but holding a sequence is
//! reached through the sequence extractor.
//!
//! A bad branch never aborts the call:
//!
//! - no extractor for a slot: the branch is skipped and the key is recorded
//!   in [`Extraction::unresolved`];
//! - an extractor fails: values it already reported are still walked and
//!   the failure lands in [`Extraction::errors`];
//! - nesting deeper than [`ExtractionConfig::max_depth`]: the branch stops
//!   with [`ExtractionError::DepthExceeded`].
//!
//! ```rust
//! use strata_traverse::{ExtractorRegistry, TypeDescriptor, ValueExtractor};
//! use strata_value::{Kind, Value};
//!
//! let registry = ExtractorRegistry::with_defaults();
//! let descriptor = TypeDescriptor::parameterized(
//!     Kind::Sequence,
//!     [TypeDescriptor::simple(Kind::Decimal).with_declared_rules()],
//! );
//! let value = Value::sequence([10.0.into(), 30.0.into()]);
//!
//! let extraction = ValueExtractor::new(&registry).extract(&descriptor, &value);
//! assert_eq!(extraction.leaves.len(), 2);
//! assert_eq!(extraction.leaves[1].path.to_string(), "<list element>[1]");
//! ```

use strata_value::Value;
use tracing::{debug, warn};

use crate::config::ExtractionConfig;
use crate::descriptor::TypeDescriptor;
use crate::error::{ConfigResult, ExtractionError};
use crate::extractor::{ExtractorKey, ValueReceiver};
use crate::path::Path;
use crate::registry::ExtractorRegistry;

// ============================================================================
// RESULT TYPES
// ============================================================================

/// A value selected for rule evaluation or cascading.
#[derive(Debug, Clone)]
pub struct ExtractedLeaf<'d> {
    /// Descriptor node the value was reached through.
    pub descriptor: &'d TypeDescriptor,
    /// The value itself.
    pub value: Value,
    /// Container the value was extracted from; `None` for the root.
    pub container: Option<Value>,
    /// Slot of the container; `None` for the root.
    pub slot: Option<usize>,
    /// Location relative to the root.
    pub path: Path,
}

impl ExtractedLeaf<'_> {
    /// Returns `true` for the extraction root.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.container.is_none()
    }

    /// Position inside an ordered container, if any.
    #[must_use]
    pub fn index(&self) -> Option<usize> {
        self.path.last().and_then(|segment| segment.index)
    }
}

/// Outcome of one extraction call.
#[derive(Debug, Default)]
pub struct Extraction<'d> {
    /// Leaves in depth-first discovery order.
    pub leaves: Vec<ExtractedLeaf<'d>>,
    /// Branches that failed.
    pub errors: Vec<ExtractionError>,
    /// Slots for which no extractor was found.
    pub unresolved: Vec<ExtractorKey>,
}

impl<'d> Extraction<'d> {
    /// Returns `true` when no branch failed.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.errors.is_empty()
    }

    /// The extracted values, in leaf order.
    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.leaves.iter().map(|leaf| &leaf.value)
    }

    /// Splits into leaves and suppressed errors.
    #[must_use]
    pub fn into_parts(self) -> (Vec<ExtractedLeaf<'d>>, Vec<ExtractionError>) {
        (self.leaves, self.errors)
    }
}

// ============================================================================
// EXTRACTOR
// ============================================================================

/// Type-directed extractor bound to a registry.
#[derive(Debug, Clone)]
pub struct ValueExtractor<'r> {
    registry: &'r ExtractorRegistry,
    config: ExtractionConfig,
}

/// Where a value sits relative to its container.
struct Origin {
    container: Option<Value>,
    slot: Option<usize>,
    path: Path,
}

#[derive(Default)]
struct Collected(Vec<(&'static str, Option<usize>, Value)>);

impl ValueReceiver for Collected {
    fn value(&mut self, name: &'static str, value: Value) {
        self.0.push((name, None, value));
    }

    fn indexed_value(&mut self, name: &'static str, index: usize, value: Value) {
        self.0.push((name, Some(index), value));
    }
}

impl<'r> ValueExtractor<'r> {
    /// Creates an extractor with the default configuration.
    #[must_use]
    pub fn new(registry: &'r ExtractorRegistry) -> Self {
        Self {
            registry,
            config: ExtractionConfig::default(),
        }
    }

    /// Creates an extractor with an explicit configuration.
    ///
    /// Fails when `config` does not validate.
    pub fn with_config(
        registry: &'r ExtractorRegistry,
        config: ExtractionConfig,
    ) -> ConfigResult<Self> {
        config.validate()?;
        Ok(Self { registry, config })
    }

    /// Active configuration.
    #[must_use]
    pub fn config(&self) -> &ExtractionConfig {
        &self.config
    }

    /// Extracts every relevant value reachable from `root` through
    /// `descriptor`.
    #[must_use]
    pub fn extract<'d>(&self, descriptor: &'d TypeDescriptor, root: &Value) -> Extraction<'d> {
        let mut out = Extraction::default();
        let origin = Origin {
            container: None,
            slot: None,
            path: Path::root(),
        };
        self.visit(descriptor, root.clone(), origin, 0, &mut out);

        debug!(
            descriptor = %descriptor,
            leaves = out.leaves.len(),
            errors = out.errors.len(),
            unresolved = out.unresolved.len(),
            "extraction finished"
        );
        out
    }

    fn visit<'d>(
        &self,
        descriptor: &'d TypeDescriptor,
        value: Value,
        origin: Origin,
        depth: usize,
        out: &mut Extraction<'d>,
    ) {
        if descriptor.is_relevant() {
            out.leaves.push(ExtractedLeaf {
                descriptor,
                value: value.clone(),
                container: origin.container.clone(),
                slot: origin.slot,
                path: origin.path.clone(),
            });
        }

        if value.is_null() || !descriptor.requires_descent() {
            return;
        }

        if depth >= self.config.max_depth {
            warn!(limit = self.config.max_depth, path = %origin.path, "extraction depth limit exceeded");
            out.errors.push(ExtractionError::DepthExceeded {
                limit: self.config.max_depth,
                path: origin.path,
            });
            return;
        }

        let kind = value.kind();
        for (slot, child) in descriptor.slots().enumerate() {
            if child.is_skippable() {
                continue;
            }

            let resolved = child
                .extractor()
                .cloned()
                .or_else(|| self.registry.find(&kind, slot));
            let Some(extractor) = resolved else {
                debug!(%kind, slot, path = %origin.path, "no extractor for slot, branch skipped");
                out.unresolved.push(ExtractorKey::new(kind.clone(), slot));
                continue;
            };

            let mut collected = Collected::default();
            if let Err(source) = extractor.extract(&value, &mut collected) {
                warn!(%kind, slot, path = %origin.path, error = %source, "container extractor failed");
                out.errors.push(ExtractionError::Extractor {
                    container: kind.clone(),
                    slot,
                    path: origin.path.clone(),
                    source,
                });
            }

            for (name, index, inner) in collected.0 {
                let inner_origin = Origin {
                    container: Some(value.clone()),
                    slot: Some(slot),
                    path: origin.path.child(name, index),
                };
                self.visit(child, inner, inner_origin, depth + 1, out);
            }
        }
    }
}
