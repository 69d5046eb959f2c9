//! Scope graph error types

use crate::graph::ScopeId;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ScopeError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScopeError {
    #[error("Scope graph is empty")]
    EmptyGraph,

    #[error("Scope {id} referenced from {context} does not exist")]
    InvalidScopeId { id: ScopeId, context: String },

    #[error("Scope {child} lists {parent} as parent, but {parent} does not list it as child")]
    InconsistentParent { child: ScopeId, parent: ScopeId },
}

impl ScopeError {
    pub fn invalid_scope_id(id: ScopeId, context: impl Into<String>) -> Self {
        Self::InvalidScopeId {
            id,
            context: context.into(),
        }
    }
}
