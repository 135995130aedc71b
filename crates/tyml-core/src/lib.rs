//! # tyml-core: Data Model for the tyml Schema Engine
//!
//! This crate defines the trees the schema engine reads and writes. It
//! depends on no other `tyml-*` crate.
//!
//! ## Contents
//!
//! - [`node`]: the YAML node tree ([`Document`], [`Map`], [`MapItem`],
//!   [`Array`], [`ArrayItem`]) with the uniform [`Node`] surface.
//! - [`types`]: the compiled type tree a schema document turns into.
//! - [`check`]: [`Violation`] and the ordered [`TypeCheck`] report.
//! - [`convert`]: interop with `serde_yaml::Value`.
//! - [`position`] and [`annotation`]: per-node metadata.
//!
//! ## Crate Policy
//!
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - Type trees are immutable once built and shared through `Arc`.

pub mod annotation;
pub mod check;
pub mod convert;
pub mod error;
pub mod node;
pub mod position;
pub mod types;

// Re-export primary types for ergonomic imports.
pub use annotation::{Annotations, ANNOTATION_SCHEMA_NULLABLE};
pub use check::{TypeCheck, Violation};
pub use error::{ConvertError, NodeError, TypeCheckError};
pub use node::{
    Array, ArrayItem, Child, ChildRef, Document, DocumentSet, Map, MapItem, Node, NodeKind,
    NodeMut, NodeRef, Value,
};
pub use position::Position;
pub use types::{
    ArrayItemType, ArrayType, DocumentType, MapItemType, MapType, ScalarKind, ScalarType, Type,
};
