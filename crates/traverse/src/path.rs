//! Location of an extracted value relative to the extraction root.

use std::borrow::Cow;
use std::fmt;

use smallvec::SmallVec;

/// One step from a container to one of its inner values.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PathSegment {
    /// Node name reported by the extractor, e.g. `<list element>`.
    pub name: Cow<'static, str>,
    /// Position for ordered containers.
    pub index: Option<usize>,
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.index {
            Some(index) => write!(f, "{}[{index}]", self.name),
            None => f.write_str(&self.name),
        }
    }
}

/// Ordered segments from the root to a value. The root itself has an empty
/// path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Path(SmallVec<[PathSegment; 4]>);

impl Path {
    /// Path of the extraction root.
    #[must_use]
    pub fn root() -> Self {
        Self::default()
    }

    /// Returns this path extended by one segment.
    #[must_use]
    pub fn child(&self, name: impl Into<Cow<'static, str>>, index: Option<usize>) -> Self {
        let mut segments = self.0.clone();
        segments.push(PathSegment {
            name: name.into(),
            index,
        });
        Self(segments)
    }

    /// Returns `true` for the root path.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of segments, i.e. the nesting depth.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.0.len()
    }

    /// The segments in order.
    #[must_use]
    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }

    /// Last segment, if any.
    #[must_use]
    pub fn last(&self) -> Option<&PathSegment> {
        self.0.last()
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}
