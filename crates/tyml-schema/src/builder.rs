//! # Schema Builder
//!
//! Compiles a schema [`Document`] into a [`DocumentType`]. The schema's
//! literal shape is the declaration: a map declares exactly its keys, an
//! array declares its element type through a single exemplar element, and
//! a scalar declares its own kind.
//!
//! ## Rules
//!
//! - Arrays must hold exactly one element. Zero or several is an error.
//! - A map may declare each key once.
//! - A null literal is an error unless the enclosing map entry is nullable.
//! - Floats (and any other non-schema scalar) are an error.
//! - An array-valued map entry defaults to an empty array. Any other entry
//!   defaults to its literal, nested arrays included.
//! - `schema/nullable` on a map entry forces its default to null.
//! - `schema/nullable` on an array element is an error.
//! - `schema/nullable` on a map discards the map's declared entries; the
//!   resulting empty map type accepts no keys but its entries are still
//!   compiled, so malformed entries are reported.
//!
//! Building stops at the first error.

use std::sync::Arc;

use tyml_core::{
    Array, ArrayItem, ArrayItemType, ArrayType, Document, DocumentType, Map, MapItem,
    MapItemType, MapType, Node, Position, ScalarType, Type, Value,
};

use crate::error::SchemaError;

/// Compile a schema document. A document without a value (an empty schema)
/// yields a type that declares no value.
pub fn new_document_type(doc: &Document) -> Result<DocumentType, SchemaError> {
    let value_type = match &doc.value {
        Value::Null => None,
        value => Some(value_type(value, &doc.position)?),
    };
    tracing::debug!(
        position = %doc.position,
        value_type = value_type.as_ref().map(Type::name).unwrap_or("none"),
        "compiled schema document"
    );
    Ok(DocumentType {
        value_type,
        position: doc.position.clone(),
    })
}

pub fn new_map_type(map: &Map) -> Result<MapType, SchemaError> {
    let mut items: Vec<Arc<MapItemType>> = Vec::with_capacity(map.items.len());
    for item in &map.items {
        if items.iter().any(|declared| declared.key == item.key) {
            return Err(SchemaError::DuplicateKey {
                key: item.key.to_string(),
                position: item.position.clone(),
            });
        }
        items.push(Arc::new(new_map_item_type(item)?));
    }

    if map.annotations.is_nullable() {
        tracing::warn!(
            position = %map.position,
            discarded = items.len(),
            "nullable map schema discards its declared items"
        );
        return Ok(MapType::default());
    }
    Ok(MapType { items })
}

/// Compile one map entry: its value type, its default value and its
/// nullability.
pub fn new_map_item_type(item: &MapItem) -> Result<MapItemType, SchemaError> {
    let nullable = item.annotations.is_nullable();
    let value_type = match &item.value {
        Value::Null if nullable => None,
        value => Some(value_type(value, &item.position)?),
    };

    let default_value = if nullable {
        None
    } else {
        Some(default_of(&item.value))
    };

    Ok(MapItemType {
        key: item.key.clone(),
        value_type,
        default_value,
        position: item.position.clone(),
        nullable,
    })
}

pub fn new_array_type(array: &Array) -> Result<ArrayType, SchemaError> {
    let item = match array.items.as_slice() {
        [item] => item,
        [] => {
            return Err(SchemaError::ArrayWithoutItem {
                position: array.position.clone(),
            })
        }
        items => {
            return Err(SchemaError::ArrayWithManyItems {
                count: items.len(),
                position: array.position.clone(),
            })
        }
    };
    Ok(ArrayType {
        items_type: Arc::new(new_array_item_type(item)?),
    })
}

pub fn new_array_item_type(item: &ArrayItem) -> Result<ArrayItemType, SchemaError> {
    let value_type = value_type(&item.value, &item.position)?;
    if item.annotations.is_nullable() {
        return Err(SchemaError::NullableArrayItem {
            position: item.position.clone(),
        });
    }
    Ok(ArrayItemType { value_type })
}

/// Type declared by a value held in a document, map entry or array element.
fn value_type(value: &Value, position: &Position) -> Result<Type, SchemaError> {
    if let Some(kind) = value.scalar_kind() {
        return Ok(ScalarType::new(kind).into());
    }
    match value {
        Value::Map(map) => Ok(new_map_type(map)?.into()),
        Value::Array(array) => Ok(new_array_type(array)?.into()),
        Value::Null => Err(SchemaError::NullValue {
            position: position.clone(),
        }),
        other => Err(SchemaError::UnknownKind {
            kind: other.kind_name(),
            position: position.clone(),
        }),
    }
}

/// Default for a non-nullable entry.
fn default_of(value: &Value) -> Value {
    let mut default = value.clone();
    if let Value::Array(array) = &mut default {
        array.reset_value();
    }
    default
}

#[cfg(test)]
mod tests {
    use super::*;
    use tyml_core::{ScalarKind, ANNOTATION_SCHEMA_NULLABLE};

    fn only_item(doc_type: &DocumentType) -> Arc<MapItemType> {
        let map = doc_type.value_type.as_ref().and_then(Type::as_map).unwrap();
        assert_eq!(map.items.len(), 1);
        map.items[0].clone()
    }

    #[test]
    fn map_entries_compile_in_declared_order() {
        let doc = Document::new(Map::from_entries([
            ("name", Value::from("app")),
            ("replicas", Value::Int(1)),
            ("debug", Value::Bool(false)),
        ]));
        let doc_type = new_document_type(&doc).unwrap();
        let map = doc_type.value_type.as_ref().and_then(Type::as_map).unwrap();

        let keys: Vec<_> = map.items.iter().map(|i| i.key.clone()).collect();
        assert_eq!(
            keys,
            vec![Value::from("name"), Value::from("replicas"), Value::from("debug")]
        );
        let kinds: Vec<_> = map
            .items
            .iter()
            .map(|i| i.value_type().and_then(Type::as_scalar).unwrap().kind)
            .collect();
        assert_eq!(kinds, vec![ScalarKind::String, ScalarKind::Int, ScalarKind::Bool]);
        assert_eq!(map.items[1].default_value, Some(Value::Int(1)));
    }

    #[test]
    fn array_entry_defaults_to_empty_array() {
        let doc = Document::new(Map::from_entries([(
            "k",
            Value::Array(Array::from_values([42i64])),
        )]));
        let item = only_item(&new_document_type(&doc).unwrap());

        let default = item.default_value.as_ref().and_then(Value::as_array).unwrap();
        assert!(default.is_empty());
        let array_type = item.value_type().and_then(Type::as_array).unwrap();
        assert_eq!(
            array_type.items_type.value_type().as_scalar(),
            Some(ScalarType::new(ScalarKind::Int))
        );
    }

    #[test]
    fn nested_map_default_keeps_its_literal() {
        let inner = Map::from_entries([
            ("hosts", Value::Array(Array::from_values(["a"]))),
            ("port", Value::Int(80)),
        ]);
        let doc = Document::new(Map::from_entries([("db", Value::Map(inner))]));
        let item = only_item(&new_document_type(&doc).unwrap());

        let default = item.default_value.as_ref().and_then(Value::as_map).unwrap();
        let hosts = default.get(&Value::from("hosts")).unwrap();
        assert_eq!(hosts.value.as_array().map(Array::len), Some(1));
        assert_eq!(default.get(&Value::from("port")).unwrap().value, Value::Int(80));
    }

    #[test]
    fn repeated_key_is_rejected() {
        let map = Map::with_items(vec![
            MapItem::new("a", 1),
            MapItem::new("a", 2).at(Position::new("schema.yml", 3)),
        ]);
        let err = new_map_type(&map).unwrap_err();
        assert!(matches!(err, SchemaError::DuplicateKey { ref key, .. } if key == "a"));
        assert_eq!(
            err.to_string(),
            "map key 'a' is declared more than once (at schema.yml:3)"
        );
    }

    #[test]
    fn nullable_entry_has_no_default() {
        let doc = Document::new(Map::with_items(vec![MapItem::new(
            "k",
            Array::from_values([1i64]),
        )
        .annotated(ANNOTATION_SCHEMA_NULLABLE)]));
        let item = only_item(&new_document_type(&doc).unwrap());
        assert!(item.is_nullable());
        assert_eq!(item.default_value, None);
        assert!(item.value_type().and_then(Type::as_array).is_some());
    }

    #[test]
    fn nullable_null_entry_is_unconstrained() {
        let doc = Document::new(Map::with_items(vec![
            MapItem::new("k", Value::Null).annotated(ANNOTATION_SCHEMA_NULLABLE)
        ]));
        let item = only_item(&new_document_type(&doc).unwrap());
        assert!(item.value_type().is_none());
    }

    #[test]
    fn null_entry_is_rejected() {
        let doc = Document::new(Map::with_items(vec![
            MapItem::new("k", Value::Null).at(Position::new("schema.yml", 2))
        ]));
        let err = new_document_type(&doc).unwrap_err();
        assert!(matches!(err, SchemaError::NullValue { .. }));
        assert_eq!(
            err.to_string(),
            "expected a non-null value, of the desired type (at schema.yml:2)"
        );
    }

    #[test]
    fn float_literal_is_rejected() {
        let doc = Document::new(Map::from_entries([("ratio", Value::Float(0.5))]));
        let err = new_document_type(&doc).unwrap_err();
        assert!(matches!(err, SchemaError::UnknownKind { kind: "float", .. }));
    }

    #[test]
    fn array_exemplar_count_is_enforced() {
        let empty = Array::new().at(Position::new("schema.yml", 7));
        let err = new_array_type(&empty).unwrap_err();
        assert!(matches!(err, SchemaError::ArrayWithoutItem { .. }));
        assert!(err.to_string().contains("schema.yml:7"));

        let two = Array::from_values([1i64, 2]);
        let err = new_array_type(&two).unwrap_err();
        assert!(matches!(err, SchemaError::ArrayWithManyItems { count: 2, .. }));
    }

    #[test]
    fn nullable_array_item_is_rejected() {
        let array = Array::with_items(vec![
            ArrayItem::new("x").annotated(ANNOTATION_SCHEMA_NULLABLE)
        ]);
        let err = new_array_type(&array).unwrap_err();
        assert!(matches!(err, SchemaError::NullableArrayItem { .. }));
    }

    #[test]
    fn nullable_map_discards_items() {
        let map = Map::from_entries([("a", 1), ("b", 2)]).annotated(ANNOTATION_SCHEMA_NULLABLE);
        let map_type = new_map_type(&map).unwrap();
        assert!(map_type.items.is_empty());
        assert!(!map_type.allows_key(&Value::from("a")));
    }

    #[test]
    fn nullable_map_still_reports_bad_items() {
        let map = Map::from_entries([("a", Value::Null)]).annotated(ANNOTATION_SCHEMA_NULLABLE);
        assert!(matches!(
            new_map_type(&map),
            Err(SchemaError::NullValue { .. })
        ));
    }

    #[test]
    fn document_roots() {
        assert!(new_document_type(&Document::empty())
            .unwrap()
            .value_type
            .is_none());

        let scalar = new_document_type(&Document::new("s")).unwrap();
        assert_eq!(
            scalar.value_type.and_then(|t| t.as_scalar()),
            Some(ScalarType::new(ScalarKind::String))
        );

        let array = new_document_type(&Document::new(Array::from_values([true]))).unwrap();
        assert!(array.value_type.as_ref().and_then(Type::as_array).is_some());
    }
}
