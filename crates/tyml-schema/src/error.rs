//! # Schema Errors
//!
//! Schema compilation is all-or-nothing: the first malformed shape aborts
//! the build with one of the variants below, carrying the position of the
//! offending node. Data-values violations are not errors; they are
//! collected in a [`TypeCheck`](tyml_core::TypeCheck) and only become a
//! [`SchemaError::Violations`] when a caller chooses to treat them as fatal.

use thiserror::Error;
use tyml_core::{Position, TypeCheckError};

/// Error compiling a schema document or applying the schema policy.
#[derive(Error, Debug)]
pub enum SchemaError {
    /// A schema array with no exemplar element.
    #[error("expected one item in array (describing the type of its elements) at {position}")]
    ArrayWithoutItem { position: Position },

    /// A schema array with more than one exemplar element.
    #[error(
        "expected one item (found {count}) in array (describing the type of its elements) at {position}"
    )]
    ArrayWithManyItems { count: usize, position: Position },

    /// The `schema/nullable` annotation on an array element.
    #[error("array items cannot be annotated with schema/nullable (at {position})")]
    NullableArrayItem { position: Position },

    /// A null literal where a typed value was required.
    #[error("expected a non-null value, of the desired type (at {position})")]
    NullValue { position: Position },

    /// A map declaring the same key twice.
    #[error("map key '{key}' is declared more than once (at {position})")]
    DuplicateKey { key: String, position: Position },

    /// A literal outside the supported scalar kinds (e.g. a float).
    #[error("value of kind {kind} at {position} did not match any known types")]
    UnknownKind {
        kind: &'static str,
        position: Position,
    },

    /// More than one schema document was supplied.
    #[error("expected at most one schema document, found {count}")]
    MultipleSchemaDocuments { count: usize },

    /// Data-values files were supplied while the schema feature is enabled
    /// but no schema document exists.
    #[error("schema feature is enabled but no schema document was provided")]
    ValuesWithoutSchema,

    /// A type check that the caller treats as fatal.
    #[error(transparent)]
    Violations(#[from] TypeCheckError),
}
