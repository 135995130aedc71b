//! # tyml-schema: Schema Engine
//!
//! Compiles schema documents and checks data-values documents against them.
//!
//! ## Flow
//!
//! ```text
//! schema Document ──▶ builder  ──▶ DocumentType
//! schema Document ──▶ defaults ──▶ default values Document
//! DocumentType + target Document ──▶ assign ──▶ completed target + TypeCheck
//! ```
//!
//! - [`builder`]: schema document to type tree. Fails fast on malformed
//!   schemas with a [`SchemaError`].
//! - [`defaults`]: schema document to default data values.
//! - [`assign`]: attaches types, appends missing defaults, collects
//!   violations. Never fails fast.
//! - [`check`]: single-level checks for callers validating one node at a
//!   time.
//! - [`schema`]: the [`Schema`] policies and [`select_schema`].
//! - [`config`]: whether the schema feature is enabled.
//!
//! ## Example
//!
//! ```
//! use tyml_core::Document;
//! use tyml_schema::{DocumentSchema, Schema};
//!
//! let schema = Document::from_yaml_str("replicas: 1\nname: app\n", None).unwrap();
//! let schema = DocumentSchema::new(schema).unwrap();
//!
//! let mut values = Document::from_yaml_str("replicas: 3\n", None).unwrap();
//! let check = schema.assign_type(&mut values);
//! assert!(check.is_ok());
//! assert_eq!(values.value.as_map().unwrap().len(), 2);
//! ```

pub mod assign;
pub mod builder;
pub mod check;
pub mod config;
pub mod defaults;
pub mod error;
pub mod schema;

pub use assign::{assign, AssignType};
pub use builder::{
    new_array_item_type, new_array_type, new_document_type, new_map_item_type, new_map_type,
};
pub use check::CheckType;
pub use config::{ConfigError, SchemaConfig, SCHEMA_ENABLED_VAR};
pub use defaults::default_data_values;
pub use error::SchemaError;
pub use schema::{select_schema, AnySchema, DocumentSchema, NullSchema, Schema};
