//! # Default Values
//!
//! The default data-values document is the schema document with every
//! array emptied: all declared keys are present, scalars keep their schema
//! literals, and array exemplars (type metadata, never data) are gone.

use tyml_core::{Document, Node, Value};

/// Independent copy of `schema` with every array cleared.
pub fn default_data_values(schema: &Document) -> Document {
    let mut values = schema.deep_copy();
    clear_arrays(&mut values.value);
    values
}

/// Empty every array reachable from `value` through maps.
fn clear_arrays(value: &mut Value) {
    match value {
        Value::Map(map) => {
            for item in &mut map.items {
                clear_arrays(&mut item.value);
            }
        }
        Value::Array(array) => array.reset_value(),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tyml_core::{Array, Map};

    #[test]
    fn arrays_are_emptied_at_every_depth() {
        let schema = Document::new(Map::from_entries([
            ("name", Value::from("app")),
            ("ports", Value::Array(Array::from_values([80i64]))),
            (
                "db",
                Value::Map(Map::from_entries([(
                    "hosts",
                    Value::Array(Array::from_values(["localhost"])),
                )])),
            ),
        ]));

        let values = default_data_values(&schema);
        let map = values.value.as_map().unwrap();
        assert_eq!(map.len(), 3);
        assert_eq!(map.items[0].value, Value::from("app"));
        assert!(map.items[1].value.as_array().unwrap().is_empty());
        let db = map.items[2].value.as_map().unwrap();
        assert!(db.items[0].value.as_array().unwrap().is_empty());
    }

    #[test]
    fn schema_is_left_untouched() {
        let schema = Document::new(Array::from_values([1i64]));
        let values = default_data_values(&schema);
        assert!(values.value.as_array().unwrap().is_empty());
        assert_eq!(schema.value.as_array().map(Array::len), Some(1));
    }

    #[test]
    fn empty_schema_yields_empty_document() {
        let values = default_data_values(&Document::empty());
        assert!(values.value.is_null());
    }
}
