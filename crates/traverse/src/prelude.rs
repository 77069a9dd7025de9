//! Prelude module for convenient imports.
//!
//! ```rust
//! use strata_traverse::prelude::*;
//!
//! let registry = ExtractorRegistry::with_defaults();
//! let _extractor = ValueExtractor::new(&registry);
//! ```

pub use crate::{
    ContainerExtractor, DescendAll, ExtractedLeaf, Extraction, ExtractionConfig, ExtractionError,
    ExtractorError, ExtractorKey, ExtractorRegistry, GraphWalker, Member, Path, TypeDescriptor,
    ValueExtractor, ValueReceiver, Visitor,
};
