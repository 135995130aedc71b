//! # Type-Check Reports
//!
//! Checking a target tree never fails fast. Every finding becomes a
//! [`Violation`], and a [`TypeCheck`] collects them in depth-first traversal
//! order. Callers decide whether a non-empty check is fatal; see
//! [`TypeCheck::into_result`].

use std::fmt;

use serde::Serialize;

use crate::error::TypeCheckError;
use crate::position::Position;

/// A single non-fatal finding from checking a tree against a type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Violation {
    /// A node or value had a different shape or scalar kind than declared.
    TypeMismatch {
        /// What was checked, e.g. `map item 'port'` or `array item`.
        described: String,
        actual: String,
        expected: String,
        position: Position,
    },

    /// A map entry whose key the schema does not declare.
    UndefinedKey { key: String, position: Position },

    /// The engine reached a state that valid inputs cannot produce.
    Internal { message: String, position: Position },
}

impl Violation {
    pub fn mismatch(
        described: impl Into<String>,
        actual: impl Into<String>,
        expected: impl Into<String>,
        position: &Position,
    ) -> Self {
        Violation::TypeMismatch {
            described: described.into(),
            actual: actual.into(),
            expected: expected.into(),
            position: position.clone(),
        }
    }

    pub fn undefined_key(key: impl fmt::Display, position: &Position) -> Self {
        Violation::UndefinedKey {
            key: key.to_string(),
            position: position.clone(),
        }
    }

    pub fn internal(message: impl Into<String>, position: &Position) -> Self {
        Violation::Internal {
            message: message.into(),
            position: position.clone(),
        }
    }

    pub fn position(&self) -> &Position {
        match self {
            Violation::TypeMismatch { position, .. }
            | Violation::UndefinedKey { position, .. }
            | Violation::Internal { position, .. } => position,
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::TypeMismatch {
                described,
                actual,
                expected,
                position,
            } => write!(
                f,
                "{described} was type {actual} when {expected} was expected (at {position})"
            ),
            Violation::UndefinedKey { key, position } => {
                write!(f, "map item '{key}' at {position} is not defined in schema")
            }
            Violation::Internal { message, position } => {
                write!(f, "internal inconsistency at {position}: {message}")
            }
        }
    }
}

/// Ordered collection of violations. Never deduplicated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TypeCheck {
    violations: Vec<Violation>,
}

impl TypeCheck {
    pub fn new() -> Self {
        Self::default()
    }

    /// A check holding exactly one violation.
    pub fn single(violation: Violation) -> Self {
        Self {
            violations: vec![violation],
        }
    }

    pub fn push(&mut self, violation: Violation) {
        self.violations.push(violation);
    }

    /// Append all violations of `other`, preserving order.
    pub fn extend(&mut self, other: TypeCheck) {
        self.violations.extend(other.violations);
    }

    /// True if no violations were found.
    pub fn is_ok(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn len(&self) -> usize {
        self.violations.len()
    }

    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    pub fn into_inner(self) -> Vec<Violation> {
        self.violations
    }

    /// Rendered messages, in order.
    pub fn messages(&self) -> Vec<String> {
        self.violations.iter().map(ToString::to_string).collect()
    }

    /// `Ok(())` when clean, otherwise an error carrying every violation.
    pub fn into_result(self) -> Result<(), TypeCheckError> {
        if self.is_ok() {
            Ok(())
        } else {
            Err(TypeCheckError { check: self })
        }
    }
}

impl fmt::Display for TypeCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, v) in self.violations.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "- {v}")?;
        }
        Ok(())
    }
}

impl FromIterator<Violation> for TypeCheck {
    fn from_iter<I: IntoIterator<Item = Violation>>(iter: I) -> Self {
        Self {
            violations: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mismatch_message_shape() {
        let v = Violation::mismatch(
            "map item 'port'",
            "string",
            "integer",
            &Position::new("values.yml", 3),
        );
        assert_eq!(
            v.to_string(),
            "map item 'port' was type string when integer was expected (at values.yml:3)"
        );
    }

    #[test]
    fn undefined_key_message_shape() {
        let v = Violation::undefined_key("c", &Position::new("values.yml", 1));
        assert_eq!(
            v.to_string(),
            "map item 'c' at values.yml:1 is not defined in schema"
        );
        assert_eq!(v.position().line, Some(1));
    }

    #[test]
    fn extend_preserves_order() {
        let mut check = TypeCheck::single(Violation::undefined_key("a", &Position::unknown()));
        check.extend(TypeCheck::single(Violation::undefined_key("b", &Position::unknown())));
        check.push(Violation::undefined_key("a", &Position::unknown()));
        assert_eq!(check.len(), 3);
        assert_eq!(
            check.messages(),
            vec![
                "map item 'a' at ? is not defined in schema",
                "map item 'b' at ? is not defined in schema",
                "map item 'a' at ? is not defined in schema",
            ]
        );
    }

    #[test]
    fn into_result() {
        assert!(TypeCheck::new().into_result().is_ok());
        let err = TypeCheck::single(Violation::undefined_key("x", &Position::unknown()))
            .into_result()
            .unwrap_err();
        assert_eq!(err.check.len(), 1);
        assert!(err.to_string().contains("map item 'x'"));
    }
}
