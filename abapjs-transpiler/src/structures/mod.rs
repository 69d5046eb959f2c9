//! Generators for structures that need more than their children in order

pub mod case;
pub mod class_implementation;
pub mod interface;
pub mod try_catch;

use crate::error::{Result, TranspileError};
use abapjs_syntax::{StatementNode, StructureNode};

/// Opening statement of a structure; a structure without one is malformed.
pub(crate) fn opening_statement<'n>(node: &'n StructureNode, expected: &str) -> Result<&'n StatementNode> {
    node.first_statement()
        .ok_or_else(|| TranspileError::unsupported(expected, "structure without statements", node.span))
}
