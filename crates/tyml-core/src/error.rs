//! # Error Types
//!
//! Errors raised by the data model itself. Type-check findings are not
//! errors (see [`crate::check`]); [`TypeCheckError`] only exists for callers
//! that choose to treat a non-empty check as fatal.

use thiserror::Error;

use crate::check::TypeCheck;
use crate::node::NodeKind;
use crate::position::Position;

/// A child mutation that the node kind does not support.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NodeError {
    #[error("{operation} {child} children is not supported by {node} nodes")]
    UnsupportedChild {
        node: NodeKind,
        child: &'static str,
        operation: &'static str,
    },
}

/// Failure converting a `serde_yaml` value into a node tree.
#[derive(Error, Debug)]
pub enum ConvertError {
    /// Map keys must be scalars.
    #[error("unsupported map key of kind {kind} at {position}")]
    UnsupportedKey {
        kind: &'static str,
        position: Position,
    },

    /// The YAML stream could not be parsed.
    #[error("invalid YAML in {source_name}: {source}")]
    Parse {
        source_name: String,
        #[source]
        source: serde_yaml::Error,
    },
}

/// A type check that found at least one violation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("type check found {} violation(s):\n{check}", .check.len())]
pub struct TypeCheckError {
    pub check: TypeCheck,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_child_message() {
        let err = NodeError::UnsupportedChild {
            node: NodeKind::Array,
            child: "map item",
            operation: "appending",
        };
        assert_eq!(err.to_string(), "appending map item children is not supported by array nodes");
    }

    #[test]
    fn unsupported_key_message() {
        let err = ConvertError::UnsupportedKey {
            kind: "map",
            position: Position::in_file("values.yml"),
        };
        assert_eq!(
            err.to_string(),
            "unsupported map key of kind map at values.yml:?"
        );
    }
}
