//! Extractor registry
//!
//! An ordered, appendable table of [`ContainerExtractor`]s dispatched by
//! `(container kind, slot)`. Lookups scan from the most recently registered
//! extractor to the first, so a later registration overrides an earlier one
//! for every key both apply to, without replacing or removing anything.
//!
//! Successful lookups are cached per exact key. Every [`register`] clears the
//! cache, so a lookup never returns a result computed before a relevant
//! registration. Misses are never cached.
//!
//! [`register`]: ExtractorRegistry::register
//!
//! # Example
//!
//! ```rust
//! use strata_traverse::ExtractorRegistry;
//! use strata_value::Kind;
//!
//! let registry = ExtractorRegistry::with_defaults();
//! let extractor = registry.find(&Kind::Sequence, 0).unwrap();
//! assert_eq!(extractor.key().kind, Kind::Sequence);
//!
//! assert!(registry.find(&Kind::Text, 0).is_none());
//! ```

use std::fmt;
use std::sync::Arc;

use dashmap::DashMap;
use parking_lot::RwLock;
use strata_value::Kind;
use tracing::{debug, trace};

use crate::config::ExtractionConfig;
use crate::error::ConfigResult;
use crate::extractor::{self, ContainerExtractor, ExtractorKey};

/// Ordered table of container extractors with a lookup cache.
pub struct ExtractorRegistry {
    extractors: RwLock<Vec<Arc<dyn ContainerExtractor>>>,
    cache: DashMap<ExtractorKey, Arc<dyn ContainerExtractor>>,
}

impl ExtractorRegistry {
    /// Creates a registry, optionally pre-populated with the built-in
    /// extractors.
    #[must_use]
    pub fn new(register_defaults: bool) -> Self {
        let registry = Self {
            extractors: RwLock::new(Vec::new()),
            cache: DashMap::new(),
        };
        if register_defaults {
            registry.extractors.write().extend(extractor::defaults());
        }
        registry
    }

    /// Creates a registry holding the built-in extractors.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(true)
    }

    /// Creates a registry with no extractors.
    #[must_use]
    pub fn empty() -> Self {
        Self::new(false)
    }

    /// Creates a registry as described by `config`.
    ///
    /// Fails when `config` does not validate.
    pub fn from_config(config: &ExtractionConfig) -> ConfigResult<Self> {
        config.validate()?;
        Ok(Self::new(config.register_defaults))
    }

    /// Appends an extractor. Later registrations take precedence.
    pub fn register(&self, extractor: Arc<dyn ContainerExtractor>) {
        debug!(key = %extractor.key(), "registering container extractor");
        let mut extractors = self.extractors.write();
        extractors.push(extractor);
        self.cache.clear();
    }

    /// Finds the extractor for slot `slot` of a container of kind `kind`.
    ///
    /// Returns `None` when nothing applies; callers stop descending there.
    #[must_use]
    pub fn find(&self, kind: &Kind, slot: usize) -> Option<Arc<dyn ContainerExtractor>> {
        let key = ExtractorKey::new(kind.clone(), slot);
        if let Some(hit) = self.cache.get(&key) {
            trace!(%key, "extractor cache hit");
            return Some(Arc::clone(hit.value()));
        }

        let extractors = self.extractors.read();
        let found = extractors
            .iter()
            .rev()
            .find(|e| e.applies_to(kind, slot))
            .cloned()?;

        debug!(%key, resolved = %found.key(), "extractor resolved");
        // filled under the read lock: a concurrent `register` cannot slip
        // between the scan and the insert
        self.cache.insert(key, Arc::clone(&found));
        Some(found)
    }

    /// Number of registered extractors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.extractors.read().len()
    }

    /// Returns `true` when nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.extractors.read().is_empty()
    }

    /// Number of cached lookups.
    #[must_use]
    pub fn cached_len(&self) -> usize {
        self.cache.len()
    }
}

impl Default for ExtractorRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl fmt::Debug for ExtractorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtractorRegistry")
            .field("extractors", &self.len())
            .field("cached", &self.cached_len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use strata_value::Value;

    use super::*;
    use crate::error::ExtractorError;
    use crate::extractor::{IterableElement, MapKey, SequenceElement, ValueReceiver};

    #[derive(Debug)]
    struct Tagged {
        key: ExtractorKey,
        tag: &'static str,
    }

    impl Tagged {
        fn new(kind: Kind, slot: usize, tag: &'static str) -> Arc<dyn ContainerExtractor> {
            Arc::new(Self {
                key: ExtractorKey::new(kind, slot),
                tag,
            })
        }
    }

    impl ContainerExtractor for Tagged {
        fn key(&self) -> &ExtractorKey {
            &self.key
        }

        fn extract(
            &self,
            _container: &Value,
            receiver: &mut dyn ValueReceiver,
        ) -> Result<(), ExtractorError> {
            receiver.value(self.tag, Value::Null);
            Ok(())
        }
    }

    fn tag_of(extractor: &Arc<dyn ContainerExtractor>) -> String {
        format!("{extractor:?}")
    }

    #[test]
    fn later_registration_overrides() {
        let registry = ExtractorRegistry::empty();
        registry.register(Tagged::new(Kind::Sequence, 0, "first"));
        registry.register(Tagged::new(Kind::Sequence, 0, "second"));

        let found = registry.find(&Kind::Sequence, 0).unwrap();
        assert!(tag_of(&found).contains("second"));
    }

    #[test]
    fn find_before_register_is_none() {
        let registry = ExtractorRegistry::empty();
        assert!(registry.find(&Kind::Sequence, 0).is_none());
        assert_eq!(registry.cached_len(), 0);

        registry.register(Arc::new(SequenceElement::new()));
        assert!(registry.find(&Kind::Sequence, 0).is_some());
    }

    #[test]
    fn register_invalidates_cache() {
        let registry = ExtractorRegistry::empty();
        registry.register(Tagged::new(Kind::Sequence, 0, "first"));
        assert!(tag_of(&registry.find(&Kind::Sequence, 0).unwrap()).contains("first"));
        assert_eq!(registry.cached_len(), 1);

        registry.register(Tagged::new(Kind::Sequence, 0, "late"));
        assert_eq!(registry.cached_len(), 0);
        assert!(tag_of(&registry.find(&Kind::Sequence, 0).unwrap()).contains("late"));
    }

    #[test]
    fn assignable_subtypes_resolve() {
        let registry = ExtractorRegistry::with_defaults();
        let linked = Kind::named("LinkedList", [Kind::Sequence]);
        let found = registry.find(&linked, 0).unwrap();
        assert_eq!(found.key().kind, Kind::Sequence);

        // sets only match the generic iterable extractor
        let found = registry.find(&Kind::Set, 0).unwrap();
        assert_eq!(found.key().kind, Kind::Iterable);
    }

    #[test]
    fn specific_extractor_wins_over_generic() {
        let registry = ExtractorRegistry::empty();
        registry.register(Arc::new(IterableElement::new()));
        registry.register(Arc::new(SequenceElement::new()));
        assert_eq!(registry.find(&Kind::Sequence, 0).unwrap().key().kind, Kind::Sequence);

        // registering the generic one again puts it back on top
        registry.register(Arc::new(IterableElement::new()));
        assert_eq!(registry.find(&Kind::Sequence, 0).unwrap().key().kind, Kind::Iterable);
    }

    #[test]
    fn dictionary_extractors_win_for_hybrid_kinds() {
        let registry = ExtractorRegistry::with_defaults();
        let table = Kind::named("Hashtable", [Kind::Map, Kind::Dictionary]);
        assert_eq!(registry.find(&table, 1).unwrap().key().kind, Kind::Dictionary);
        assert_eq!(registry.find(&Kind::Map, 0).unwrap().key(), MapKey::new().key());
    }

    #[test]
    fn slot_must_match() {
        let registry = ExtractorRegistry::with_defaults();
        assert!(registry.find(&Kind::Sequence, 1).is_none());
        assert!(registry.find(&Kind::Map, 2).is_none());
    }

    #[test]
    fn concurrent_register_and_find() {
        const TAGS: [&str; 4] = ["writer-0", "writer-1", "writer-2", "writer-3"];
        let registry = ExtractorRegistry::with_defaults();
        let before = registry.len();

        std::thread::scope(|s| {
            for tag in TAGS {
                let registry = &registry;
                s.spawn(move || {
                    for _ in 0..25 {
                        registry.register(Tagged::new(Kind::Sequence, 0, tag));
                    }
                });
            }
            for _ in 0..4 {
                s.spawn(|| {
                    for _ in 0..100 {
                        assert!(registry.find(&Kind::Sequence, 0).is_some());
                        assert!(registry.find(&Kind::Map, 1).is_some());
                    }
                });
            }
        });

        assert_eq!(registry.len(), before + TAGS.len() * 25);
        assert!(tag_of(&registry.find(&Kind::Sequence, 0).unwrap()).contains("writer-"));
    }

    #[test]
    fn config_controls_defaults() {
        let config = ExtractionConfig::default().with_register_defaults(false);
        assert!(ExtractorRegistry::from_config(&config).unwrap().is_empty());
        assert_eq!(ExtractorRegistry::with_defaults().len(), extractor::defaults().len());
    }
}
