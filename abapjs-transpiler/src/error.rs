//! Transpiler error types

use crate::config::ConfigError;
use abapjs_scope::ScopeError;
use abapjs_syntax::{Position, Span};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, TranspileError>;

/// Sentinel for a class definition that could not be found.
pub const CDEF_NOT_FOUND: &str = "ERROR_CDEF_NOT_FOUND";
/// Sentinel for a scope that could not be found.
pub const SCOPE_NOT_FOUND: &str = "ERROR_SCOPE_NOT_FOUND";
/// Sentinel for an interface definition that could not be found.
pub const IDEF_NOT_FOUND: &str = "ERROR_IDEF_NOT_FOUND";

#[derive(Error, Debug)]
pub enum TranspileError {
    #[error("{kind} not supported, {text} ({span})")]
    UnsupportedConstruct { kind: String, text: String, span: Span },

    #[error("{}: {context}, unable to lookup position {position} in {file}", SCOPE_NOT_FOUND)]
    ScopeNotFound {
        context: String,
        file: String,
        position: Position,
    },

    #[error("{marker}: {name}")]
    UnresolvedDefinition { marker: &'static str, name: String },

    #[error("dynamic call fallback exception {class} is not registered")]
    MissingFallbackException { class: String },

    #[error("unknown type {name}: {reason}")]
    UnknownType { name: String, reason: String },

    #[error("invalid scope graph: {0}")]
    Scope(#[from] ScopeError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl TranspileError {
    pub fn unsupported(kind: impl Into<String>, text: impl Into<String>, span: Span) -> Self {
        Self::UnsupportedConstruct {
            kind: kind.into(),
            text: text.into(),
            span,
        }
    }

    pub fn scope_not_found(context: impl Into<String>, file: impl Into<String>, position: Position) -> Self {
        Self::ScopeNotFound {
            context: context.into(),
            file: file.into(),
            position,
        }
    }

    pub fn unresolved(marker: &'static str, name: impl Into<String>) -> Self {
        Self::UnresolvedDefinition {
            marker,
            name: name.into(),
        }
    }

    pub fn unknown_type(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::UnknownType {
            name: name.into(),
            reason: reason.into(),
        }
    }
}
