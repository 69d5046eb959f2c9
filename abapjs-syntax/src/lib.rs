//! Resolved ABAP syntax tree
//!
//! This crate defines the tree the JavaScript lowering engine walks: structure
//! and statement nodes with typed expression operands, source positions and
//! the resolved data types attached by semantic analysis. Parsing and analysis
//! happen elsewhere; trees arrive here fully resolved, usually as JSON.

pub mod ast;
pub mod builder;
pub mod expressions;
pub mod span;
pub mod statements;
pub mod types;

// Re-export core types
pub use ast::{Node, StatementNode, StructureKind, StructureNode};
pub use builder::TreeBuilder;
pub use expressions::*;
pub use span::{HasSpan, Position, Span, Token};
pub use statements::*;
pub use types::{AbapType, Component, TableKind, TableOptions};
