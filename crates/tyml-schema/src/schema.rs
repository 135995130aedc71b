//! # Schema Variants
//!
//! The composition pipeline works against the [`Schema`] trait and never
//! needs to know which policy is active:
//!
//! | Variant            | Assigns types | Default values | Values files        |
//! |--------------------|---------------|----------------|---------------------|
//! | [`AnySchema`]      | no            | none           | any number          |
//! | [`NullSchema`]     | no            | none           | none allowed        |
//! | [`DocumentSchema`] | yes           | from schema    | any number          |
//!
//! [`select_schema`] picks the variant from the configuration and the
//! schema documents found.

use std::fmt;
use std::sync::Arc;

use tyml_core::{Document, DocumentType, TypeCheck};

use crate::assign::assign;
use crate::builder::new_document_type;
use crate::config::SchemaConfig;
use crate::defaults::default_data_values;
use crate::error::SchemaError;

/// A compiled schema policy.
pub trait Schema: fmt::Debug + Send + Sync {
    /// Attach types to `doc`, completing it with defaults where the policy
    /// declares any.
    fn assign_type(&self, doc: &mut Document) -> TypeCheck;

    /// Baseline data values, if the policy defines any.
    fn as_data_values(&self) -> Option<&Document>;

    /// Whether `values_file_count` external data-values files may be used
    /// with this policy.
    fn validate_with_values(&self, values_file_count: usize) -> Result<(), SchemaError>;
}

/// Schema feature disabled: everything is accepted.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnySchema;

impl Schema for AnySchema {
    fn assign_type(&self, _doc: &mut Document) -> TypeCheck {
        TypeCheck::new()
    }

    fn as_data_values(&self) -> Option<&Document> {
        None
    }

    fn validate_with_values(&self, _values_file_count: usize) -> Result<(), SchemaError> {
        Ok(())
    }
}

/// Schema feature enabled but no schema document supplied.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSchema;

impl Schema for NullSchema {
    fn assign_type(&self, _doc: &mut Document) -> TypeCheck {
        TypeCheck::new()
    }

    fn as_data_values(&self) -> Option<&Document> {
        None
    }

    fn validate_with_values(&self, values_file_count: usize) -> Result<(), SchemaError> {
        if values_file_count > 0 {
            return Err(SchemaError::ValuesWithoutSchema);
        }
        Ok(())
    }
}

/// A schema compiled from one schema document.
#[derive(Debug, Clone)]
pub struct DocumentSchema {
    name: String,
    source: Document,
    default_values: Document,
    allowed: Arc<DocumentType>,
}

impl DocumentSchema {
    /// Name under which the default values are exposed.
    pub const NAME: &'static str = "dataValues";

    /// Compile `source` into a type and its default values.
    pub fn new(source: Document) -> Result<Self, SchemaError> {
        let allowed = Arc::new(new_document_type(&source)?);
        let default_values = default_data_values(&source);
        Ok(Self {
            name: Self::NAME.to_string(),
            source,
            default_values,
            allowed,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The schema document as given.
    pub fn source(&self) -> &Document {
        &self.source
    }

    /// The compiled document type.
    pub fn allowed(&self) -> &Arc<DocumentType> {
        &self.allowed
    }
}

impl Schema for DocumentSchema {
    fn assign_type(&self, doc: &mut Document) -> TypeCheck {
        assign(&self.allowed, doc)
    }

    fn as_data_values(&self) -> Option<&Document> {
        Some(&self.default_values)
    }

    fn validate_with_values(&self, _values_file_count: usize) -> Result<(), SchemaError> {
        Ok(())
    }
}

/// Pick the schema policy for a run.
///
/// # Errors
///
/// Returns [`SchemaError::MultipleSchemaDocuments`] when the feature is
/// enabled and more than one schema document was found, or the build error
/// of the single schema document.
pub fn select_schema(
    config: &SchemaConfig,
    mut documents: Vec<Document>,
) -> Result<Box<dyn Schema>, SchemaError> {
    if !config.enabled {
        if !documents.is_empty() {
            tracing::warn!(
                documents = documents.len(),
                "schema feature is disabled; ignoring schema documents"
            );
        }
        return Ok(Box::new(AnySchema));
    }

    match documents.len() {
        0 => {
            tracing::debug!("schema feature enabled without a schema document");
            Ok(Box::new(NullSchema))
        }
        1 => {
            let source = documents.remove(0);
            let schema = DocumentSchema::new(source)?;
            tracing::debug!(name = schema.name(), "compiled schema document");
            Ok(Box::new(schema))
        }
        count => Err(SchemaError::MultipleSchemaDocuments { count }),
    }
}
