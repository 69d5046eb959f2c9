//! Emission buffer
//!
//! A [`Chunk`] is an append-only list of text fragments, each optionally
//! tagged with the source position it was generated from. The emitted code
//! is the concatenation of the fragments in append order.

use abapjs_syntax::Position;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    pub text: String,
    pub origin: Option<Position>,
}

/// Generated position of a fragment that has an origin, both 1-based
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mapping {
    pub line: u32,
    pub column: u32,
    pub origin: Position,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Chunk {
    fragments: Vec<Fragment>,
}

impl Chunk {
    pub fn new() -> Self {
        Self::default()
    }

    /// Chunk holding a single untagged fragment.
    pub fn text(text: impl Into<String>) -> Self {
        let mut chunk = Chunk::new();
        chunk.push(text);
        chunk
    }

    /// Chunk holding a single fragment generated from `origin`.
    pub fn at(text: impl Into<String>, origin: Position) -> Self {
        let mut chunk = Chunk::new();
        chunk.push_at(text, origin);
        chunk
    }

    pub fn push(&mut self, text: impl Into<String>) -> &mut Self {
        let text = text.into();
        if !text.is_empty() {
            self.fragments.push(Fragment { text, origin: None });
        }
        self
    }

    pub fn push_at(&mut self, text: impl Into<String>, origin: Position) -> &mut Self {
        let text = text.into();
        if !text.is_empty() {
            self.fragments.push(Fragment {
                text,
                origin: Some(origin),
            });
        }
        self
    }

    pub fn push_chunk(&mut self, other: Chunk) -> &mut Self {
        self.fragments.extend(other.fragments);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    pub fn fragments(&self) -> &[Fragment] {
        &self.fragments
    }

    pub fn code(&self) -> String {
        let mut out = String::new();
        for fragment in &self.fragments {
            out.push_str(&fragment.text);
        }
        out
    }

    /// Start position in the generated code of every tagged fragment.
    pub fn mappings(&self) -> Vec<Mapping> {
        let mut out = Vec::new();
        let mut line = 1;
        let mut column = 1;
        for fragment in &self.fragments {
            if let Some(origin) = fragment.origin {
                out.push(Mapping { line, column, origin });
            }
            for c in fragment.text.chars() {
                if c == '\n' {
                    line += 1;
                    column = 1;
                } else {
                    column += 1;
                }
            }
        }
        out
    }
}

impl fmt::Display for Chunk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for fragment in &self.fragments {
            f.write_str(&fragment.text)?;
        }
        Ok(())
    }
}

impl From<String> for Chunk {
    fn from(text: String) -> Self {
        Chunk::text(text)
    }
}

impl From<&str> for Chunk {
    fn from(text: &str) -> Self {
        Chunk::text(text)
    }
}
