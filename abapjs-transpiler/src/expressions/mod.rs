//! Expression generators
//!
//! Expressions render to plain strings; only statements and structures
//! carry source positions.

pub mod condition;
pub mod constant;
pub mod field_chain;
pub mod method_call;
pub mod source;

pub use condition::{render_condition, row_closure};
pub use field_chain::{render_chain, render_target, Access};
pub use method_call::{render_call, render_call_statement, ExistenceGuard, GuardKind};
pub use source::{render_constant, render_dynamic_name, render_source};
