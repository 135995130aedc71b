//! # YAML Adapter
//!
//! Converts between `serde_yaml` values and node trees, so callers that
//! parse YAML with `serde_yaml` can hand the result to the schema engine
//! and turn completed trees back into plain YAML.
//!
//! ## Annotations
//!
//! `serde_yaml` drops comments, so annotations are carried as YAML tags. A
//! tagged value `!schema/nullable 5` is stored as the plain value `5` and
//! the annotation `schema/nullable` lands on the node that holds it (the
//! enclosing map item, array item or document).
//!
//! ## Positions
//!
//! `serde_yaml::Value` has no spans. Converted nodes record the source file
//! name only; lines stay unknown.

use serde::Deserialize;

use crate::annotation::Annotations;
use crate::error::ConvertError;
use crate::node::{Array, ArrayItem, Document, DocumentSet, Map, MapItem, Value};
use crate::position::Position;

impl Document {
    /// Convert one parsed YAML value into a document.
    pub fn from_yaml(value: serde_yaml::Value, file: Option<&str>) -> Result<Self, ConvertError> {
        let position = file.map(Position::in_file).unwrap_or_default();
        let (value, annotations) = convert_tagged(value, &position)?;
        Ok(Document {
            value,
            position,
            annotations,
            ty: None,
        })
    }

    /// Parse a single-document YAML string.
    pub fn from_yaml_str(src: &str, file: Option<&str>) -> Result<Self, ConvertError> {
        let value: serde_yaml::Value =
            serde_yaml::from_str(src).map_err(|e| parse_error(file, e))?;
        Self::from_yaml(value, file)
    }

    /// Plain YAML rendering of the document's value. Annotations, types and
    /// positions are not represented.
    pub fn to_yaml(&self) -> serde_yaml::Value {
        self.value.to_yaml()
    }
}

impl DocumentSet {
    /// Parse a YAML stream that may contain several `---`-separated documents.
    pub fn from_yaml_str(src: &str, file: Option<&str>) -> Result<Self, ConvertError> {
        let mut items = Vec::new();
        for de in serde_yaml::Deserializer::from_str(src) {
            let value = serde_yaml::Value::deserialize(de).map_err(|e| parse_error(file, e))?;
            items.push(Document::from_yaml(value, file)?);
        }
        Ok(DocumentSet {
            items,
            position: file.map(Position::in_file).unwrap_or_default(),
        })
    }
}

impl Value {
    /// Plain YAML rendering of this value.
    pub fn to_yaml(&self) -> serde_yaml::Value {
        match self {
            Value::Null => serde_yaml::Value::Null,
            Value::Bool(b) => serde_yaml::Value::Bool(*b),
            Value::Int(i) => serde_yaml::Value::Number((*i).into()),
            Value::Float(x) => serde_yaml::Value::Number((*x).into()),
            Value::String(s) => serde_yaml::Value::String(s.clone()),
            Value::Map(map) => {
                let mut mapping = serde_yaml::Mapping::new();
                for item in &map.items {
                    mapping.insert(item.key.to_yaml(), item.value.to_yaml());
                }
                serde_yaml::Value::Mapping(mapping)
            }
            Value::Array(array) => serde_yaml::Value::Sequence(
                array.items.iter().map(|item| item.value.to_yaml()).collect(),
            ),
        }
    }
}

fn parse_error(file: Option<&str>, source: serde_yaml::Error) -> ConvertError {
    ConvertError::Parse {
        source_name: file.unwrap_or("<input>").to_string(),
        source,
    }
}

/// Strip a tag (if any) into an annotation set and convert the inner value.
fn convert_tagged(
    value: serde_yaml::Value,
    position: &Position,
) -> Result<(Value, Annotations), ConvertError> {
    match value {
        serde_yaml::Value::Tagged(tagged) => {
            let mut annotations = Annotations::new();
            annotations.insert(tagged.tag.to_string().trim_start_matches('!'));
            let value = convert(tagged.value, position)?;
            Ok((value, annotations))
        }
        other => Ok((convert(other, position)?, Annotations::new())),
    }
}

fn convert(value: serde_yaml::Value, position: &Position) -> Result<Value, ConvertError> {
    Ok(match value {
        serde_yaml::Value::Null => Value::Null,
        serde_yaml::Value::Bool(b) => Value::Bool(b),
        serde_yaml::Value::Number(n) => match n.as_i64() {
            Some(i) => Value::Int(i),
            // u64 beyond i64 and all floats; neither is a schema scalar kind.
            None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
        },
        serde_yaml::Value::String(s) => Value::String(s),
        serde_yaml::Value::Sequence(seq) => {
            let mut array = Array::new().at(position.clone());
            for element in seq {
                let (value, annotations) = convert_tagged(element, position)?;
                array.items.push(ArrayItem {
                    value,
                    position: position.clone(),
                    annotations,
                    ty: None,
                });
            }
            Value::Array(array)
        }
        serde_yaml::Value::Mapping(mapping) => {
            let mut map = Map::new().at(position.clone());
            for (key, value) in mapping {
                let key = convert_key(key, position)?;
                let (value, annotations) = convert_tagged(value, position)?;
                map.items.push(MapItem {
                    key,
                    value,
                    position: position.clone(),
                    annotations,
                    ty: None,
                });
            }
            Value::Map(map)
        }
        // A tag below the top of an item is not reachable from YAML syntax
        // (one tag per node); keep the inner value.
        serde_yaml::Value::Tagged(tagged) => convert(tagged.value, position)?,
    })
}

fn convert_key(key: serde_yaml::Value, position: &Position) -> Result<Value, ConvertError> {
    match key {
        serde_yaml::Value::Sequence(_) => Err(ConvertError::UnsupportedKey {
            kind: "array",
            position: position.clone(),
        }),
        serde_yaml::Value::Mapping(_) => Err(ConvertError::UnsupportedKey {
            kind: "map",
            position: position.clone(),
        }),
        serde_yaml::Value::Tagged(tagged) => convert_key(tagged.value, position),
        scalar => convert(scalar, position),
    }
}
