//! Annotation sets attached to typeable nodes.
//!
//! Annotations are opaque to the node tree. The schema engine reads exactly
//! one of them, [`ANNOTATION_SCHEMA_NULLABLE`].

use std::collections::BTreeSet;

/// Marks a map entry whose value may be null (and defaults to null), or a
/// map whose shape is left unconstrained.
pub const ANNOTATION_SCHEMA_NULLABLE: &str = "schema/nullable";

/// Ordered set of annotation names on a node.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Annotations {
    names: BTreeSet<String>,
}

impl Annotations {
    /// An empty annotation set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an annotation. Returns `false` if it was already present.
    pub fn insert(&mut self, name: impl Into<String>) -> bool {
        self.names.insert(name.into())
    }

    /// Whether the named annotation is present.
    pub fn has(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Shorthand for `has(ANNOTATION_SCHEMA_NULLABLE)`.
    pub fn is_nullable(&self) -> bool {
        self.has(ANNOTATION_SCHEMA_NULLABLE)
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for Annotations {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().map(Into::into).collect(),
        }
    }
}
