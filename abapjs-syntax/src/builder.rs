//! Programmatic construction of syntax trees
//!
//! The builder hands out token positions row by row so that trees built in
//! code line up with scope coverage spans the same way analyzer output does:
//! every statement occupies one row and tokens are laid out left to right.

use crate::ast::{Node, StatementNode, StructureKind, StructureNode};
use crate::expressions::{ChainHead, ChainSegment, Condition, CompareOp, FieldChain, Predicate, Source};
use crate::span::{Position, Span, Token};
use crate::statements::Statement;

pub struct TreeBuilder {
    row: u32,
    col: u32,
}

impl TreeBuilder {
    pub fn new() -> Self {
        TreeBuilder { row: 1, col: 1 }
    }

    /// Start laying out tokens at the given row.
    pub fn at_row(row: u32) -> Self {
        TreeBuilder { row, col: 1 }
    }

    pub fn row(&self) -> u32 {
        self.row
    }

    /// Allocate a token on the current row.
    pub fn token(&mut self, text: &str) -> Token {
        let token = Token::new(text, self.row, self.col);
        self.col += text.chars().count() as u32 + 1;
        token
    }

    pub fn field(&mut self, name: &str) -> FieldChain {
        FieldChain::field(self.token(name))
    }

    pub fn field_symbol(&mut self, name: &str) -> FieldChain {
        FieldChain::field_symbol(self.token(name))
    }

    /// `a-b-c` style chain, `-` separating structure components.
    pub fn component_chain(&mut self, path: &[&str]) -> FieldChain {
        let mut chain = self.field(path[0]);
        for name in &path[1..] {
            chain.segments.push(ChainSegment::Component { name: self.token(name) });
        }
        chain
    }

    /// `ref->attr`
    pub fn attribute_chain(&mut self, head: &str, attribute: &str) -> FieldChain {
        let mut chain = self.field(head);
        chain.segments.push(ChainSegment::Attribute { name: self.token(attribute) });
        chain
    }

    /// `zcl_class=>attr`
    pub fn static_chain(&mut self, class: &str, attribute: &str) -> FieldChain {
        let head = ChainHead::Class { name: self.token(class) };
        let segment = ChainSegment::Static { name: self.token(attribute) };
        FieldChain {
            head,
            segments: vec![segment],
            offset: None,
            length: None,
        }
    }

    pub fn source(&mut self, name: &str) -> Source {
        Source::chain(self.field(name))
    }

    pub fn fs_source(&mut self, name: &str) -> Source {
        Source::chain(self.field_symbol(name))
    }

    pub fn eq(&mut self, left: &str, right: Source) -> Condition {
        Condition::Compare {
            left: self.source(left),
            op: CompareOp::Eq,
            right,
        }
    }

    pub fn is_initial(&mut self, name: &str, negated: bool) -> Condition {
        Condition::Predicate {
            operand: self.source(name),
            predicate: Predicate::Initial,
            negated,
        }
    }

    /// Finish the current row as a statement node.
    pub fn statement(&mut self, statement: Statement) -> Node {
        let text = statement.name().to_string();
        self.statement_with_text(statement, &text)
    }

    pub fn statement_with_text(&mut self, statement: Statement, text: &str) -> Node {
        let end = self.col.saturating_sub(1).max(1);
        let span = Span::new(Position::new(self.row, 1), Position::new(self.row, end));
        self.row += 1;
        self.col = 1;
        Node::Statement(StatementNode::new(statement, span, text))
    }

    pub fn structure(&self, kind: StructureKind, children: Vec<Node>) -> Node {
        Node::Structure(StructureNode::new(kind, children))
    }

    pub fn root(&self, children: Vec<Node>) -> StructureNode {
        StructureNode::new(StructureKind::Program, children)
    }
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}
