//! # Shallow Type Check
//!
//! A single-level check for callers that validate one node at a time, such
//! as a values overlay confirming each replacement before it is merged.
//! Nothing is mutated and nothing is descended into:
//!
//! - a map type checks that every present key is declared;
//! - a map item type checks that a null value is allowed;
//! - a scalar type compares the held value's kind with the declared kind;
//! - array, array item and document types only confirm the node kind.
//!
//! Deep validation is left to [`crate::assign`].

use tyml_core::{NodeKind, NodeRef, Type, TypeCheck, Violation};

/// Single-level check of a node against a type.
pub trait CheckType {
    /// Check `node` without recursing. `described` names the node in
    /// violation messages (e.g. `map item 'port'`).
    fn check_type(&self, node: NodeRef<'_>, described: &str) -> TypeCheck;
}

impl CheckType for Type {
    fn check_type(&self, node: NodeRef<'_>, described: &str) -> TypeCheck {
        match self {
            Type::Document(_) => expect_kind(node, described, NodeKind::Document),
            Type::Map(map_type) => {
                let NodeRef::Map(map) = node else {
                    return wrong_kind(node, described, NodeKind::Map.name());
                };
                map.items
                    .iter()
                    .filter(|item| !map_type.allows_key(&item.key))
                    .map(|item| Violation::undefined_key(&item.key, &item.position))
                    .collect()
            }
            Type::MapItem(item_type) => {
                let NodeRef::MapItem(item) = node else {
                    return wrong_kind(node, described, NodeKind::MapItem.name());
                };
                match item_type.value_type() {
                    Some(value_type) if item.value.is_null() && !item_type.is_nullable() => {
                        TypeCheck::single(Violation::mismatch(
                            described,
                            "null",
                            value_type.name(),
                            &item.position,
                        ))
                    }
                    _ => TypeCheck::new(),
                }
            }
            Type::Array(_) => expect_kind(node, described, NodeKind::Array),
            Type::ArrayItem(_) => expect_kind(node, described, NodeKind::ArrayItem),
            Type::Scalar(scalar) => {
                let actual = match node.held_value() {
                    Some(value) if scalar.accepts(value) => return TypeCheck::new(),
                    Some(value) => value.kind_name(),
                    None => node.kind().name(),
                };
                TypeCheck::single(Violation::mismatch(
                    described,
                    actual,
                    scalar.kind.name(),
                    node.position(),
                ))
            }
        }
    }
}

fn expect_kind(node: NodeRef<'_>, described: &str, expected: NodeKind) -> TypeCheck {
    if node.kind() == expected {
        TypeCheck::new()
    } else {
        wrong_kind(node, described, expected.name())
    }
}

/// Mismatch naming the held scalar's kind when there is one, otherwise the
/// node kind.
fn wrong_kind(node: NodeRef<'_>, described: &str, expected: &str) -> TypeCheck {
    let actual = match node.held_value() {
        Some(value) if !value.is_typeable() => value.kind_name(),
        _ => node.kind().name(),
    };
    TypeCheck::single(Violation::mismatch(
        described,
        actual,
        expected,
        node.position(),
    ))
}
