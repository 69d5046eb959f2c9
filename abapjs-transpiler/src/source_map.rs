//! Position mapping from generated JavaScript back to ABAP source
//!
//! The map is plain JSON: one entry per generated fragment that carries an
//! origin, 1-based on both sides.

use crate::chunk::Mapping;
use crate::error::Result;
use crate::indentation::leading_width;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceMap {
    pub version: u32,
    pub file: String,
    pub source: String,
    pub mappings: Vec<MappingEntry>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingEntry {
    pub generated_line: u32,
    pub generated_column: u32,
    pub source_row: u32,
    pub source_column: u32,
}

impl SourceMap {
    /// Map the fragments of a body that was re-indented into `indented` and
    /// placed after `line_offset` prelude lines.
    pub fn build(
        file: &str,
        source: &str,
        mappings: &[Mapping],
        raw: &str,
        indented: &str,
        line_offset: u32,
    ) -> Self {
        let raw_lines: Vec<&str> = raw.lines().collect();
        let indented_lines: Vec<&str> = indented.lines().collect();

        let entries = mappings
            .iter()
            .map(|mapping| {
                let index = mapping.line.saturating_sub(1) as usize;
                let before = raw_lines.get(index).map_or(0, |l| leading_width(l)) as i64;
                let after = indented_lines.get(index).map_or(0, |l| leading_width(l)) as i64;
                let column = (i64::from(mapping.column) - before + after).max(1);
                MappingEntry {
                    generated_line: mapping.line + line_offset,
                    generated_column: u32::try_from(column).unwrap_or(1),
                    source_row: mapping.origin.row,
                    source_column: mapping.origin.col,
                }
            })
            .collect();

        SourceMap {
            version: 1,
            file: file.to_string(),
            source: source.to_string(),
            mappings: entries,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
