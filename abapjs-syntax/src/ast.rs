//! Syntax tree nodes: structures and statements
//!
//! A unit is a tree of [`StructureNode`]s whose leaves are [`StatementNode`]s.
//! Expressions hang off the statements as typed values, see [`crate::expressions`].

use crate::span::{HasSpan, Span};
use crate::statements::Statement;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "node", rename_all = "snake_case")]
pub enum Node {
    Structure(StructureNode),
    Statement(StatementNode),
}

/// Grouping node such as a class implementation, an IF block or a method
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructureNode {
    pub kind: StructureKind,
    #[serde(default)]
    pub children: Vec<Node>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StructureKind {
    Program,
    Body,
    ClassDefinition,
    ClassImplementation,
    Interface,
    Method,
    Form,
    FunctionModule,
    If,
    ElseIf,
    Else,
    Do,
    While,
    Loop,
    Case,
    When,
    Try,
    Catch,
    Other,
}

/// A single statement with its resolved content and source text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatementNode {
    pub statement: Statement,
    pub span: Span,
    /// Concatenated tokens, used in diagnostics.
    #[serde(default)]
    pub text: String,
}

impl Node {
    pub fn span(&self) -> Span {
        match self {
            Node::Structure(s) => s.span,
            Node::Statement(s) => s.span,
        }
    }

    pub fn as_statement(&self) -> Option<&StatementNode> {
        match self {
            Node::Statement(s) => Some(s),
            Node::Structure(_) => None,
        }
    }

    pub fn as_structure(&self) -> Option<&StructureNode> {
        match self {
            Node::Structure(s) => Some(s),
            Node::Statement(_) => None,
        }
    }
}

impl HasSpan for Node {
    fn span(&self) -> Span {
        Node::span(self)
    }
}

impl StructureNode {
    pub fn new(kind: StructureKind, children: Vec<Node>) -> Self {
        let span = children
            .iter()
            .map(|c| c.span())
            .reduce(|a, b| a.merge(&b))
            .unwrap_or_default();
        StructureNode { kind, children, span }
    }

    /// Direct child statements in order.
    pub fn statements(&self) -> impl Iterator<Item = &StatementNode> {
        self.children.iter().filter_map(Node::as_statement)
    }

    /// Every statement below this node, depth first.
    pub fn all_statements(&self) -> Vec<&StatementNode> {
        let mut out = Vec::new();
        collect_statements(self, &mut out);
        out
    }

    pub fn first_statement(&self) -> Option<&StatementNode> {
        self.statements().next()
    }
}

fn collect_statements<'a>(node: &'a StructureNode, out: &mut Vec<&'a StatementNode>) {
    for child in &node.children {
        match child {
            Node::Statement(s) => out.push(s),
            Node::Structure(s) => collect_statements(s, out),
        }
    }
}

impl HasSpan for StructureNode {
    fn span(&self) -> Span {
        self.span
    }
}

impl StatementNode {
    pub fn new(statement: Statement, span: Span, text: impl Into<String>) -> Self {
        StatementNode {
            statement,
            span,
            text: text.into(),
        }
    }
}

impl HasSpan for StatementNode {
    fn span(&self) -> Span {
        self.span
    }
}
