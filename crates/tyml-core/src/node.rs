//! # Node Tree
//!
//! In-memory representation of a YAML value tree. A tree is a
//! [`DocumentSet`] of [`Document`]s whose values are nulls, raw scalars,
//! [`Map`]s or [`Array`]s. Map entries and array elements are nodes of their
//! own ([`MapItem`], [`ArrayItem`]) so that a scalar leaf's position and
//! assigned type live on the item that holds it. Scalars are never boxed
//! in a node and terminate structural recursion.
//!
//! ## Uniform Surface
//!
//! Every typeable node implements [`Node`]: position, annotation set, type
//! slot, child enumeration and child mutation. Code that needs to dispatch
//! on the concrete kind does so through the closed [`NodeRef`] / [`NodeMut`]
//! enums, so adding a node kind is a compile error at every dispatch site.
//!
//! Cloning a node is a deep copy. Assigned types are shared immutable
//! `Arc`s, so copies never alias mutable state.

use std::fmt;

use crate::annotation::Annotations;
use crate::error::NodeError;
use crate::position::Position;
use crate::types::{ScalarKind, Type};

// ─── Values ─────────────────────────────────────────────────────────

/// A value held by a document, map entry or array element.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    /// Floats can be represented but are outside the schema's scalar kinds.
    Float(f64),
    String(String),
    Map(Map),
    Array(Array),
}

impl Value {
    /// Kind name used in violation messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => ScalarKind::Bool.name(),
            Value::Int(_) => ScalarKind::Int.name(),
            Value::Float(_) => "float",
            Value::String(_) => ScalarKind::String.name(),
            Value::Map(_) => "map",
            Value::Array(_) => "array",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Whether this value is a node that can carry a type (map or array).
    pub fn is_typeable(&self) -> bool {
        matches!(self, Value::Map(_) | Value::Array(_))
    }

    /// The schema scalar kind of this value, if it is one of the supported
    /// scalars.
    pub fn scalar_kind(&self) -> Option<ScalarKind> {
        match self {
            Value::String(_) => Some(ScalarKind::String),
            Value::Int(_) => Some(ScalarKind::Int),
            Value::Bool(_) => Some(ScalarKind::Bool),
            Value::Null | Value::Float(_) | Value::Map(_) | Value::Array(_) => None,
        }
    }

    /// Borrow this value as a typeable node, if it is one.
    pub fn as_node(&self) -> Option<NodeRef<'_>> {
        match self {
            Value::Map(map) => Some(NodeRef::Map(map)),
            Value::Array(array) => Some(NodeRef::Array(array)),
            _ => None,
        }
    }

    /// Mutably borrow this value as a typeable node, if it is one.
    pub fn as_node_mut(&mut self) -> Option<NodeMut<'_>> {
        match self {
            Value::Map(map) => Some(NodeMut::Map(map)),
            Value::Array(array) => Some(NodeMut::Array(array)),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&Map> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&Array> {
        match self {
            Value::Array(array) => Some(array),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::String(s) => f.write_str(s),
            Value::Map(map) => write!(f, "<map with {} items>", map.items.len()),
            Value::Array(array) => write!(f, "<array with {} items>", array.items.len()),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<Map> for Value {
    fn from(map: Map) -> Self {
        Value::Map(map)
    }
}

impl From<Array> for Value {
    fn from(array: Array) -> Self {
        Value::Array(array)
    }
}

// ─── Nodes ──────────────────────────────────────────────────────────

/// Ordered sequence of documents, as parsed from one YAML stream.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentSet {
    pub items: Vec<Document>,
    pub position: Position,
}

impl DocumentSet {
    pub fn new(items: Vec<Document>) -> Self {
        Self {
            items,
            position: Position::unknown(),
        }
    }
}

/// A single YAML document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    pub value: Value,
    pub position: Position,
    pub annotations: Annotations,
    pub ty: Option<Type>,
}

impl Document {
    pub fn new(value: impl Into<Value>) -> Self {
        Self {
            value: value.into(),
            ..Self::default()
        }
    }

    /// A document with no value.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn at(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    pub fn annotated(mut self, name: &str) -> Self {
        self.annotations.insert(name);
        self
    }
}

/// A YAML mapping. Item order is significant.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Map {
    pub items: Vec<MapItem>,
    pub position: Position,
    pub annotations: Annotations,
    pub ty: Option<Type>,
}

impl Map {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_items(items: Vec<MapItem>) -> Self {
        Self {
            items,
            ..Self::default()
        }
    }

    /// Build a map from `(key, value)` pairs, in order.
    pub fn from_entries<K, V, I>(entries: I) -> Self
    where
        K: Into<Value>,
        V: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        Self::with_items(
            entries
                .into_iter()
                .map(|(k, v)| MapItem::new(k, v))
                .collect(),
        )
    }

    pub fn at(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    pub fn annotated(mut self, name: &str) -> Self {
        self.annotations.insert(name);
        self
    }

    /// First entry whose key equals `key`.
    pub fn get(&self, key: &Value) -> Option<&MapItem> {
        self.items.iter().find(|item| &item.key == key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &Value> {
        self.items.iter().map(|item| &item.key)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// A single `key: value` entry of a [`Map`].
#[derive(Debug, Clone, PartialEq)]
pub struct MapItem {
    /// Scalar key, compared by equality (kind-sensitive).
    pub key: Value,
    pub value: Value,
    pub position: Position,
    pub annotations: Annotations,
    pub ty: Option<Type>,
}

impl MapItem {
    pub fn new(key: impl Into<Value>, value: impl Into<Value>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            position: Position::unknown(),
            annotations: Annotations::new(),
            ty: None,
        }
    }

    pub fn at(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    pub fn annotated(mut self, name: &str) -> Self {
        self.annotations.insert(name);
        self
    }
}

/// A YAML sequence.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Array {
    pub items: Vec<ArrayItem>,
    pub position: Position,
    pub annotations: Annotations,
    pub ty: Option<Type>,
}

impl Array {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_items(items: Vec<ArrayItem>) -> Self {
        Self {
            items,
            ..Self::default()
        }
    }

    /// Build an array from element values, in order.
    pub fn from_values<V, I>(values: I) -> Self
    where
        V: Into<Value>,
        I: IntoIterator<Item = V>,
    {
        Self::with_items(values.into_iter().map(ArrayItem::new).collect())
    }

    pub fn at(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// A single element of an [`Array`].
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayItem {
    pub value: Value,
    pub position: Position,
    pub annotations: Annotations,
    pub ty: Option<Type>,
}

impl ArrayItem {
    pub fn new(value: impl Into<Value>) -> Self {
        Self {
            value: value.into(),
            position: Position::unknown(),
            annotations: Annotations::new(),
            ty: None,
        }
    }

    pub fn at(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    pub fn annotated(mut self, name: &str) -> Self {
        self.annotations.insert(name);
        self
    }
}

// ─── Uniform node surface ───────────────────────────────────────────

/// The five typeable node kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Document,
    Map,
    MapItem,
    Array,
    ArrayItem,
}

impl NodeKind {
    pub fn name(self) -> &'static str {
        match self {
            NodeKind::Document => "document",
            NodeKind::Map => "map",
            NodeKind::MapItem => "map item",
            NodeKind::Array => "array",
            NodeKind::ArrayItem => "array item",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An owned child handed to [`Node::set_value`] / [`Node::add_value`].
#[derive(Debug, Clone, PartialEq)]
pub enum Child {
    Value(Value),
    MapItem(MapItem),
    ArrayItem(ArrayItem),
}

impl Child {
    fn name(&self) -> &'static str {
        match self {
            Child::Value(_) => "value",
            Child::MapItem(_) => NodeKind::MapItem.name(),
            Child::ArrayItem(_) => NodeKind::ArrayItem.name(),
        }
    }
}

/// A borrowed child as returned by [`Node::values`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ChildRef<'a> {
    Value(&'a Value),
    MapItem(&'a MapItem),
    ArrayItem(&'a ArrayItem),
}

/// Operations shared by every typeable node.
pub trait Node {
    fn kind(&self) -> NodeKind;
    fn position(&self) -> &Position;
    fn annotations(&self) -> &Annotations;
    fn annotations_mut(&mut self) -> &mut Annotations;
    fn node_type(&self) -> Option<&Type>;
    fn set_type(&mut self, ty: Type);

    /// Direct children: the held value for documents and items, the items
    /// for maps and arrays.
    fn values(&self) -> Vec<ChildRef<'_>>;

    /// Replace the children with `child`.
    fn set_value(&mut self, child: Child) -> Result<(), NodeError>;

    /// Append `child`. Only collections support appending.
    fn add_value(&mut self, child: Child) -> Result<(), NodeError>;

    /// Clear the children (collections become empty, held values null).
    fn reset_value(&mut self);

    /// Independent copy of this node and everything below it.
    fn deep_copy(&self) -> Self
    where
        Self: Sized + Clone,
    {
        self.clone()
    }
}

fn unsupported(node: NodeKind, child: &Child, operation: &'static str) -> NodeError {
    NodeError::UnsupportedChild {
        node,
        child: child.name(),
        operation,
    }
}

macro_rules! node_slots {
    ($kind:expr) => {
        fn kind(&self) -> NodeKind {
            $kind
        }
        fn position(&self) -> &Position {
            &self.position
        }
        fn annotations(&self) -> &Annotations {
            &self.annotations
        }
        fn annotations_mut(&mut self) -> &mut Annotations {
            &mut self.annotations
        }
        fn node_type(&self) -> Option<&Type> {
            self.ty.as_ref()
        }
        fn set_type(&mut self, ty: Type) {
            self.ty = Some(ty);
        }
    };
}

/// Documents, map items and array items each hold exactly one value.
macro_rules! value_holder {
    ($ty:ty, $kind:expr) => {
        impl Node for $ty {
            node_slots!($kind);

            fn values(&self) -> Vec<ChildRef<'_>> {
                vec![ChildRef::Value(&self.value)]
            }

            fn set_value(&mut self, child: Child) -> Result<(), NodeError> {
                match child {
                    Child::Value(value) => {
                        self.value = value;
                        Ok(())
                    }
                    other => Err(unsupported($kind, &other, "setting")),
                }
            }

            fn add_value(&mut self, child: Child) -> Result<(), NodeError> {
                Err(unsupported($kind, &child, "appending"))
            }

            fn reset_value(&mut self) {
                self.value = Value::Null;
            }
        }
    };
}

value_holder!(Document, NodeKind::Document);
value_holder!(MapItem, NodeKind::MapItem);
value_holder!(ArrayItem, NodeKind::ArrayItem);

impl Node for Map {
    node_slots!(NodeKind::Map);

    fn values(&self) -> Vec<ChildRef<'_>> {
        self.items.iter().map(ChildRef::MapItem).collect()
    }

    fn set_value(&mut self, child: Child) -> Result<(), NodeError> {
        match child {
            Child::MapItem(item) => {
                self.items = vec![item];
                Ok(())
            }
            other => Err(unsupported(NodeKind::Map, &other, "setting")),
        }
    }

    fn add_value(&mut self, child: Child) -> Result<(), NodeError> {
        match child {
            Child::MapItem(item) => {
                self.items.push(item);
                Ok(())
            }
            other => Err(unsupported(NodeKind::Map, &other, "appending")),
        }
    }

    fn reset_value(&mut self) {
        self.items.clear();
    }
}

impl Node for Array {
    node_slots!(NodeKind::Array);

    fn values(&self) -> Vec<ChildRef<'_>> {
        self.items.iter().map(ChildRef::ArrayItem).collect()
    }

    fn set_value(&mut self, child: Child) -> Result<(), NodeError> {
        match child {
            Child::ArrayItem(item) => {
                self.items = vec![item];
                Ok(())
            }
            other => Err(unsupported(NodeKind::Array, &other, "setting")),
        }
    }

    fn add_value(&mut self, child: Child) -> Result<(), NodeError> {
        match child {
            Child::ArrayItem(item) => {
                self.items.push(item);
                Ok(())
            }
            other => Err(unsupported(NodeKind::Array, &other, "appending")),
        }
    }

    fn reset_value(&mut self) {
        self.items.clear();
    }
}

/// Shared borrow of any typeable node.
#[derive(Debug, Clone, Copy)]
pub enum NodeRef<'a> {
    Document(&'a Document),
    Map(&'a Map),
    MapItem(&'a MapItem),
    Array(&'a Array),
    ArrayItem(&'a ArrayItem),
}

impl<'a> NodeRef<'a> {
    pub fn as_node(self) -> &'a dyn Node {
        match self {
            NodeRef::Document(n) => n,
            NodeRef::Map(n) => n,
            NodeRef::MapItem(n) => n,
            NodeRef::Array(n) => n,
            NodeRef::ArrayItem(n) => n,
        }
    }

    pub fn kind(self) -> NodeKind {
        self.as_node().kind()
    }

    pub fn position(self) -> &'a Position {
        self.as_node().position()
    }

    /// The value held by a document or item; `None` for collections.
    pub fn held_value(self) -> Option<&'a Value> {
        match self {
            NodeRef::Document(n) => Some(&n.value),
            NodeRef::MapItem(n) => Some(&n.value),
            NodeRef::ArrayItem(n) => Some(&n.value),
            NodeRef::Map(_) | NodeRef::Array(_) => None,
        }
    }
}

/// Exclusive borrow of any typeable node.
#[derive(Debug)]
pub enum NodeMut<'a> {
    Document(&'a mut Document),
    Map(&'a mut Map),
    MapItem(&'a mut MapItem),
    Array(&'a mut Array),
    ArrayItem(&'a mut ArrayItem),
}

impl<'a> NodeMut<'a> {
    pub fn as_node(&self) -> &dyn Node {
        match self {
            NodeMut::Document(n) => &**n,
            NodeMut::Map(n) => &**n,
            NodeMut::MapItem(n) => &**n,
            NodeMut::Array(n) => &**n,
            NodeMut::ArrayItem(n) => &**n,
        }
    }

    pub fn as_node_mut(&mut self) -> &mut dyn Node {
        match self {
            NodeMut::Document(n) => &mut **n,
            NodeMut::Map(n) => &mut **n,
            NodeMut::MapItem(n) => &mut **n,
            NodeMut::Array(n) => &mut **n,
            NodeMut::ArrayItem(n) => &mut **n,
        }
    }

    pub fn kind(&self) -> NodeKind {
        self.as_node().kind()
    }

    pub fn position(&self) -> &Position {
        self.as_node().position()
    }

    pub fn as_ref(&self) -> NodeRef<'_> {
        match self {
            NodeMut::Document(n) => NodeRef::Document(&**n),
            NodeMut::Map(n) => NodeRef::Map(&**n),
            NodeMut::MapItem(n) => NodeRef::MapItem(&**n),
            NodeMut::Array(n) => NodeRef::Array(&**n),
            NodeMut::ArrayItem(n) => NodeRef::ArrayItem(&**n),
        }
    }
}
