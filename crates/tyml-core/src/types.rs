//! # Type Tree
//!
//! Compiled structural types. A type tree mirrors the node tree shape:
//! documents wrap one value type, maps declare a closed, ordered list of
//! entries, arrays declare exactly one element type, and scalars are one of
//! [`ScalarKind`].
//!
//! Type trees are built once from a schema document and are immutable
//! afterwards. Nodes are shared through `Arc`, so attaching a type to a
//! target node copies a pointer, not a subtree.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use crate::node::Value;
use crate::position::Position;

/// The scalar vocabulary a schema may declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScalarKind {
    String,
    Int,
    Bool,
}

impl ScalarKind {
    /// Every supported scalar kind.
    pub fn all() -> &'static [ScalarKind] {
        &[ScalarKind::String, ScalarKind::Int, ScalarKind::Bool]
    }

    pub fn name(self) -> &'static str {
        match self {
            ScalarKind::String => "string",
            ScalarKind::Int => "integer",
            ScalarKind::Bool => "boolean",
        }
    }
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Any node of a type tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Type {
    Document(Arc<DocumentType>),
    Map(Arc<MapType>),
    MapItem(Arc<MapItemType>),
    Array(Arc<ArrayType>),
    ArrayItem(Arc<ArrayItemType>),
    Scalar(ScalarType),
}

impl Type {
    /// Name of the shape this type expects, used in violation messages.
    pub fn name(&self) -> &'static str {
        match self {
            Type::Document(_) => "document",
            Type::Map(_) => "map",
            Type::MapItem(_) => "map item",
            Type::Array(_) => "array",
            Type::ArrayItem(_) => "array item",
            Type::Scalar(scalar) => scalar.kind.name(),
        }
    }

    pub fn as_map(&self) -> Option<&MapType> {
        match self {
            Type::Map(map) => Some(map.as_ref()),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&ArrayType> {
        match self {
            Type::Array(array) => Some(array.as_ref()),
            _ => None,
        }
    }

    pub fn as_scalar(&self) -> Option<ScalarType> {
        match self {
            Type::Scalar(scalar) => Some(*scalar),
            _ => None,
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<MapType> for Type {
    fn from(t: MapType) -> Self {
        Type::Map(Arc::new(t))
    }
}

impl From<ArrayType> for Type {
    fn from(t: ArrayType) -> Self {
        Type::Array(Arc::new(t))
    }
}

impl From<ScalarType> for Type {
    fn from(t: ScalarType) -> Self {
        Type::Scalar(t)
    }
}

/// Type of a whole document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentType {
    /// `None` for an empty schema document.
    pub value_type: Option<Type>,
    pub position: Position,
}

/// Closed set of allowed map entries, in declaration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MapType {
    pub items: Vec<Arc<MapItemType>>,
}

impl MapType {
    /// Whether `key` is one of the declared entries.
    pub fn allows_key(&self, key: &Value) -> bool {
        self.item_type(key).is_some()
    }

    /// First declared entry whose key equals `key`.
    pub fn item_type(&self, key: &Value) -> Option<&Arc<MapItemType>> {
        self.items.iter().find(|item| &item.key == key)
    }
}

/// One declared map entry.
#[derive(Debug, Clone, PartialEq)]
pub struct MapItemType {
    pub key: Value,
    /// `None` only for a nullable entry whose schema literal was null; such
    /// an entry accepts any value.
    pub value_type: Option<Type>,
    /// Value injected when the entry is missing from a target map. Always
    /// `None` for nullable entries.
    pub default_value: Option<Value>,
    pub position: Position,
    pub nullable: bool,
}

impl MapItemType {
    pub fn value_type(&self) -> Option<&Type> {
        self.value_type.as_ref()
    }

    pub fn is_nullable(&self) -> bool {
        self.nullable
    }
}

/// Homogeneous array: every element has the same type.
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayType {
    pub items_type: Arc<ArrayItemType>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArrayItemType {
    pub value_type: Type,
}

impl ArrayItemType {
    pub fn value_type(&self) -> &Type {
        &self.value_type
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScalarType {
    pub kind: ScalarKind,
}

impl ScalarType {
    pub fn new(kind: ScalarKind) -> Self {
        Self { kind }
    }

    /// Whether `value` is a scalar of this kind.
    pub fn accepts(&self, value: &Value) -> bool {
        value.scalar_kind() == Some(self.kind)
    }
}
