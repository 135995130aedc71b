//! # Type Assignment
//!
//! Walks a target tree alongside a compiled type tree. Every visited node
//! gets its type attached, map entries the schema declares but the target
//! lacks are appended with their defaults, and every mismatch becomes a
//! [`Violation`]. The walk never stops early: a mismatched subtree is not
//! descended into, but its siblings are still checked.
//!
//! ## Maps
//!
//! Schema maps are closed. A present entry whose key is not declared is an
//! `UndefinedKey` violation. Declared keys missing from the target are
//! appended after the existing entries, in declaration order, and then
//! checked like any other entry.
//!
//! ## Scalars
//!
//! Array elements and document roots are kind-checked against their
//! declared scalar type. Map entry scalars are not: their kinds are left to
//! the shallow check in [`crate::check`]. A scalar where a map or array is
//! declared is always a mismatch.

use std::sync::Arc;

use tyml_core::{
    Annotations, Array, ArrayItem, ArrayItemType, ArrayType, Child, Document, DocumentType, Map,
    MapItem, MapItemType, MapType, Node, NodeMut, Position, Type, TypeCheck, Value, Violation,
};

/// Attach types from a type tree to a target node.
pub trait AssignType {
    /// Attach types to `node` and its descendants, completing maps with
    /// declared defaults. Returns every violation found.
    fn assign_type_to(&self, node: NodeMut<'_>) -> TypeCheck;
}

impl AssignType for Type {
    fn assign_type_to(&self, node: NodeMut<'_>) -> TypeCheck {
        assign_node(self, node, "value")
    }
}

impl AssignType for Arc<DocumentType> {
    fn assign_type_to(&self, node: NodeMut<'_>) -> TypeCheck {
        Type::Document(Arc::clone(self)).assign_type_to(node)
    }
}

/// Assign a compiled document type to a target document.
pub fn assign(doc_type: &Arc<DocumentType>, doc: &mut Document) -> TypeCheck {
    let check = assign_document(doc_type, doc);
    tracing::debug!(
        position = %doc.position,
        violations = check.len(),
        "assigned schema type to document"
    );
    check
}

// ─── Per-kind assignment ────────────────────────────────────────────

/// Dispatch on the (type, node) pair. `described` names the node when the
/// kinds disagree.
fn assign_node(ty: &Type, node: NodeMut<'_>, described: &str) -> TypeCheck {
    match (ty, node) {
        (Type::Document(t), NodeMut::Document(doc)) => assign_document(t, doc),
        (Type::Map(t), NodeMut::Map(map)) => assign_map(t, map),
        (Type::MapItem(t), NodeMut::MapItem(item)) => assign_map_item(t, item),
        (Type::Array(t), NodeMut::Array(array)) => assign_array(t, array),
        (Type::ArrayItem(t), NodeMut::ArrayItem(item)) => assign_array_item(t, item),
        (expected, node) => TypeCheck::single(Violation::mismatch(
            described,
            node.kind().name(),
            expected.name(),
            node.position(),
        )),
    }
}

fn assign_document(t: &Arc<DocumentType>, doc: &mut Document) -> TypeCheck {
    doc.set_type(Type::Document(Arc::clone(t)));

    let Some(value_type) = &t.value_type else {
        if doc.value.is_null() {
            return TypeCheck::new();
        }
        return TypeCheck::single(Violation::mismatch(
            "document",
            doc.value.kind_name(),
            "null",
            &doc.position,
        ));
    };

    if doc.value.is_null() {
        // A document always holds at least an empty root map.
        if !matches!(value_type, Type::Map(_)) {
            return TypeCheck::single(Violation::mismatch(
                "document",
                "null",
                value_type.name(),
                &doc.position,
            ));
        }
        doc.value = Value::Map(Map::new().at(doc.position.clone()));
    }
    assign_value(value_type, &mut doc.value, "document", &doc.position)
}

fn assign_map(t: &Arc<MapType>, map: &mut Map) -> TypeCheck {
    map.set_type(Type::Map(Arc::clone(t)));
    let mut check = TypeCheck::new();

    for item in &mut map.items {
        match t.item_type(&item.key) {
            Some(item_type) => check.extend(assign_map_item(item_type, item)),
            None => check.push(Violation::undefined_key(&item.key, &item.position)),
        }
    }

    for (item_type, mut item) in missing_items(t, map) {
        tracing::trace!(key = %item.key, position = %item.position, "appending schema default");
        check.extend(assign_map_item(item_type, &mut item));
        if let Err(err) = map.add_value(Child::MapItem(item)) {
            check.push(Violation::internal(
                format!("adding default map item: {err}"),
                &map.position,
            ));
        }
    }
    check
}

/// Declared entries with no matching key in `map`, paired with the entry
/// to append for each.
fn missing_items<'t>(t: &'t MapType, map: &Map) -> Vec<(&'t Arc<MapItemType>, MapItem)> {
    t.items
        .iter()
        .filter(|item_type| map.get(&item_type.key).is_none())
        .map(|item_type| {
            let item = MapItem {
                key: item_type.key.clone(),
                value: item_type.default_value.clone().unwrap_or_default(),
                position: item_type.position.clone(),
                annotations: Annotations::new(),
                ty: None,
            };
            (item_type, item)
        })
        .collect()
}

fn assign_map_item(t: &Arc<MapItemType>, item: &mut MapItem) -> TypeCheck {
    item.set_type(Type::MapItem(Arc::clone(t)));

    // Nullable entries declared with a null literal accept anything.
    let Some(value_type) = t.value_type() else {
        return TypeCheck::new();
    };

    let described = format!("map item '{}'", item.key);
    if item.value.is_null() {
        if t.is_nullable() {
            return TypeCheck::new();
        }
        return TypeCheck::single(Violation::mismatch(
            described,
            "null",
            value_type.name(),
            &item.position,
        ));
    }

    if let Some(node) = item.value.as_node_mut() {
        return assign_node(value_type, node, &described);
    }
    match value_type {
        Type::Scalar(_) => TypeCheck::new(),
        expected => TypeCheck::single(Violation::mismatch(
            described,
            item.value.kind_name(),
            expected.name(),
            &item.position,
        )),
    }
}

fn assign_array(t: &Arc<ArrayType>, array: &mut Array) -> TypeCheck {
    array.set_type(Type::Array(Arc::clone(t)));
    let mut check = TypeCheck::new();
    for item in &mut array.items {
        check.extend(assign_array_item(&t.items_type, item));
    }
    check
}

fn assign_array_item(t: &Arc<ArrayItemType>, item: &mut ArrayItem) -> TypeCheck {
    item.set_type(Type::ArrayItem(Arc::clone(t)));
    assign_value(t.value_type(), &mut item.value, "array item", &item.position)
}

/// Recurse into a held collection, or kind-check a held scalar.
fn assign_value(ty: &Type, value: &mut Value, described: &str, position: &Position) -> TypeCheck {
    if let Some(node) = value.as_node_mut() {
        return assign_node(ty, node, described);
    }
    match ty {
        Type::Scalar(scalar) if scalar.accepts(value) => TypeCheck::new(),
        expected => TypeCheck::single(Violation::mismatch(
            described,
            value.kind_name(),
            expected.name(),
            position,
        )),
    }
}
