//! Scope and symbol information for ABAP lowering
//!
//! Semantic analysis produces, per unit, a tree of lexical scopes with the
//! variables, local class/interface definitions and resolved references each
//! one holds, plus a registry of global objects shared by all units. This
//! crate models both and answers the positional and by-name lookups the
//! lowering engine needs.

pub mod definitions;
pub mod error;
pub mod graph;
pub mod registry;

// Re-export main types
pub use definitions::{
    Alias, Attribute, AttributeValue, Attributes, ClassDefinition, InterfaceDefinition, MethodDefinition,
    MethodParameter, ParameterDirection, StructuredValue,
};
pub use error::{Result, ScopeError};
pub use graph::{
    IdentifierMeta, OwnerKind, Reference, ReferenceKind, Resolved, ScopeGraph, ScopeId, ScopeKind, ScopeNode, Variable,
};
pub use registry::{ObjectRef, ObjectType, Registry};
