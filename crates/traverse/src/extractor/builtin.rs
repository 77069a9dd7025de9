//! Built-in container extractors.

use std::sync::Arc;

use strata_value::{Kind, Value};

use super::{ContainerExtractor, ExtractorKey, ValueReceiver};
use crate::error::ExtractorError;

macro_rules! extractor {
    ($(#[$meta:meta])* $name:ident => $kind:expr, $slot:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        pub struct $name {
            key: ExtractorKey,
        }

        impl $name {
            /// Creates the extractor.
            #[must_use]
            pub fn new() -> Self {
                Self {
                    key: ExtractorKey::new($kind, $slot),
                }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }
    };
}

extractor!(
    /// Elements of a sequence, indexed in order.
    SequenceElement => Kind::Sequence, 0
);
extractor!(
    /// Elements of any iterable, indexed in iteration order.
    IterableElement => Kind::Iterable, 0
);
extractor!(
    /// Elements of an array, indexed in order.
    ArrayElement => Kind::Array, 0
);
extractor!(
    /// Keys of a map.
    MapKey => Kind::Map, 0
);
extractor!(
    /// Values of a map.
    MapValue => Kind::Map, 1
);
extractor!(
    /// Keys of a dictionary.
    DictionaryKey => Kind::Dictionary, 0
);
extractor!(
    /// Values of a dictionary.
    DictionaryValue => Kind::Dictionary, 1
);
extractor!(
    /// Payload of an optional box; nothing when empty.
    OptionalPayload => Kind::Optional, 0
);
extractor!(
    /// Referent of a reference; nothing once a weak referent is gone.
    ReferencePayload => Kind::Reference, 0
);
extractor!(
    /// Binding of the calling thread; null when unbound.
    ThreadScopedPayload => Kind::ThreadScoped, 0
);

/// Built-in extractors in registration order.
///
/// Generic extractors come first so that more specific ones registered later
/// win lookups for kinds both apply to.
#[must_use]
pub fn defaults() -> Vec<Arc<dyn ContainerExtractor>> {
    vec![
        Arc::new(IterableElement::new()),
        Arc::new(SequenceElement::new()),
        Arc::new(ArrayElement::new()),
        Arc::new(MapKey::new()),
        Arc::new(MapValue::new()),
        Arc::new(DictionaryKey::new()),
        Arc::new(DictionaryValue::new()),
        Arc::new(OptionalPayload::new()),
        Arc::new(ReferencePayload::new()),
        Arc::new(ThreadScopedPayload::new()),
    ]
}

fn unexpected(key: &ExtractorKey, container: &Value) -> ExtractorError {
    ExtractorError::unexpected(key.kind.clone(), container.kind())
}

impl ContainerExtractor for SequenceElement {
    fn key(&self) -> &ExtractorKey {
        &self.key
    }

    fn extract(
        &self,
        container: &Value,
        receiver: &mut dyn ValueReceiver,
    ) -> Result<(), ExtractorError> {
        let Value::Collection(collection) = container else {
            return Err(unexpected(&self.key, container));
        };
        for (index, item) in collection.items().into_iter().enumerate() {
            receiver.indexed_value("<list element>", index, item);
        }
        Ok(())
    }
}

impl ContainerExtractor for IterableElement {
    fn key(&self) -> &ExtractorKey {
        &self.key
    }

    fn extract(
        &self,
        container: &Value,
        receiver: &mut dyn ValueReceiver,
    ) -> Result<(), ExtractorError> {
        let items = match container {
            Value::Collection(collection) => collection.items(),
            Value::Array(array) => array.iter().cloned().collect(),
            _ => return Err(unexpected(&self.key, container)),
        };
        for (index, item) in items.into_iter().enumerate() {
            receiver.indexed_value("<iterable element>", index, item);
        }
        Ok(())
    }
}

impl ContainerExtractor for ArrayElement {
    fn key(&self) -> &ExtractorKey {
        &self.key
    }

    fn extract(
        &self,
        container: &Value,
        receiver: &mut dyn ValueReceiver,
    ) -> Result<(), ExtractorError> {
        let Value::Array(array) = container else {
            return Err(unexpected(&self.key, container));
        };
        for (index, item) in array.iter().enumerate() {
            receiver.indexed_value("<array element>", index, item.clone());
        }
        Ok(())
    }
}

fn map_entries(
    key: &ExtractorKey,
    container: &Value,
    receiver: &mut dyn ValueReceiver,
) -> Result<(), ExtractorError> {
    let Value::Map(map) = container else {
        return Err(unexpected(key, container));
    };
    for (k, v) in map.entries() {
        if key.slot == 0 {
            receiver.value("<map key>", k);
        } else {
            receiver.value("<map value>", v);
        }
    }
    Ok(())
}

impl ContainerExtractor for MapKey {
    fn key(&self) -> &ExtractorKey {
        &self.key
    }

    fn extract(
        &self,
        container: &Value,
        receiver: &mut dyn ValueReceiver,
    ) -> Result<(), ExtractorError> {
        map_entries(&self.key, container, receiver)
    }
}

impl ContainerExtractor for MapValue {
    fn key(&self) -> &ExtractorKey {
        &self.key
    }

    fn extract(
        &self,
        container: &Value,
        receiver: &mut dyn ValueReceiver,
    ) -> Result<(), ExtractorError> {
        map_entries(&self.key, container, receiver)
    }
}

impl ContainerExtractor for DictionaryKey {
    fn key(&self) -> &ExtractorKey {
        &self.key
    }

    fn extract(
        &self,
        container: &Value,
        receiver: &mut dyn ValueReceiver,
    ) -> Result<(), ExtractorError> {
        map_entries(&self.key, container, receiver)
    }
}

impl ContainerExtractor for DictionaryValue {
    fn key(&self) -> &ExtractorKey {
        &self.key
    }

    fn extract(
        &self,
        container: &Value,
        receiver: &mut dyn ValueReceiver,
    ) -> Result<(), ExtractorError> {
        map_entries(&self.key, container, receiver)
    }
}

impl ContainerExtractor for OptionalPayload {
    fn key(&self) -> &ExtractorKey {
        &self.key
    }

    fn extract(
        &self,
        container: &Value,
        receiver: &mut dyn ValueReceiver,
    ) -> Result<(), ExtractorError> {
        match container {
            Value::Optional(Some(payload)) => {
                receiver.value("<optional value>", (**payload).clone());
                Ok(())
            }
            Value::Optional(None) => Ok(()),
            _ => Err(unexpected(&self.key, container)),
        }
    }
}

impl ContainerExtractor for ReferencePayload {
    fn key(&self) -> &ExtractorKey {
        &self.key
    }

    fn extract(
        &self,
        container: &Value,
        receiver: &mut dyn ValueReceiver,
    ) -> Result<(), ExtractorError> {
        let Value::Reference(reference) = container else {
            return Err(unexpected(&self.key, container));
        };
        if let Some(referent) = reference.get() {
            receiver.value("<reference value>", referent);
        }
        Ok(())
    }
}

impl ContainerExtractor for ThreadScopedPayload {
    fn key(&self) -> &ExtractorKey {
        &self.key
    }

    fn extract(
        &self,
        container: &Value,
        receiver: &mut dyn ValueReceiver,
    ) -> Result<(), ExtractorError> {
        let Value::ThreadScoped(scoped) = container else {
            return Err(unexpected(&self.key, container));
        };
        receiver.value("<thread-scoped value>", scoped.get().unwrap_or_default());
        Ok(())
    }
}
