//! Source positions, spans and tokens

use serde::{Deserialize, Serialize};
use std::fmt;

/// Row/column position inside a source file, both 1-based
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: u32,
    pub col: u32,
}

impl Position {
    pub fn new(row: u32, col: u32) -> Self {
        Position { row, col }
    }

    /// Inclusive on both ends.
    pub fn is_between(&self, start: Position, end: Position) -> bool {
        *self >= start && *self <= end
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.row, self.col)
    }
}

/// Start/end range of a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    pub fn new(start: Position, end: Position) -> Self {
        Span { start, end }
    }

    pub fn at(row: u32, col: u32) -> Self {
        let p = Position::new(row, col);
        Span { start: p, end: p }
    }

    /// Span covering whole rows `from..=to`.
    pub fn rows(from: u32, to: u32) -> Self {
        Span {
            start: Position::new(from, 1),
            end: Position::new(to, u32::MAX),
        }
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.is_between(self.start, self.end)
    }

    pub fn merge(&self, other: &Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

impl Default for Span {
    fn default() -> Self {
        Span::at(1, 1)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// Trait for nodes that carry source location information
pub trait HasSpan {
    fn span(&self) -> Span;
}

/// A source token: its original text and start position
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Token {
    pub text: String,
    pub start: Position,
}

impl Token {
    pub fn new(text: impl Into<String>, row: u32, col: u32) -> Self {
        Token {
            text: text.into(),
            start: Position::new(row, col),
        }
    }

    pub fn str(&self) -> &str {
        &self.text
    }

    pub fn lower(&self) -> String {
        self.text.to_lowercase()
    }

    pub fn upper(&self) -> String {
        self.text.to_uppercase()
    }

    /// Position of the last character (inclusive).
    pub fn end(&self) -> Position {
        let len = self.text.chars().count() as u32;
        Position::new(self.start.row, self.start.col + len.saturating_sub(1))
    }
}

impl HasSpan for Token {
    fn span(&self) -> Span {
        Span::new(self.start, self.end())
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
