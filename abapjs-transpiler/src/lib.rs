//! ABAP to JavaScript lowering
//!
//! Takes the syntax tree of one ABAP unit together with the scope graph and
//! global registry produced by semantic analysis, and emits JavaScript that
//! runs against the `abap.*` runtime. A [`Transpiler`] processes the units
//! of a project in order; each unit either yields its complete output or
//! aborts with a [`TranspileError`].

pub mod accessor;
pub mod chunk;
pub mod config;
pub mod error;
pub mod expressions;
pub mod indentation;
pub mod naming;
pub mod pipeline;
pub mod source_map;
pub mod statements;
pub mod structures;
pub mod traversal;
pub mod types;
pub mod unique;

#[cfg(test)]
mod statement_tests;
#[cfg(test)]
mod test_support;

// Re-export main types
pub use chunk::Chunk;
pub use config::{ConfigError, TranspilerConfig, UnknownTypes};
pub use error::{Result, TranspileError};
pub use pipeline::{PipelineResult, PipelineStage, UnitPipeline};
pub use source_map::SourceMap;
pub use unique::UniqueNames;

use abapjs_scope::{ObjectRef, Registry, ScopeGraph};
use abapjs_syntax::{Position, StructureNode};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Info,
}

/// Non-fatal finding reported alongside a unit's output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranspileDiagnostic {
    pub severity: Severity,
    pub message: String,
    pub position: Option<Position>,
}

/// One ABAP file as handed over by semantic analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitInput {
    pub filename: String,
    pub object: ObjectRef,
    pub root: StructureNode,
    pub scopes: ScopeGraph,
}

/// Every unit of a project plus the registry they share
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectInput {
    #[serde(default)]
    pub registry: Registry,
    pub units: Vec<UnitInput>,
}

#[derive(Debug, Clone)]
pub struct UnitOutput {
    /// `zfoo.prog.js` for `zfoo.prog.abap`.
    pub filename: String,
    pub source_file: String,
    pub js: String,
    pub source_map: Option<String>,
    pub diagnostics: Vec<TranspileDiagnostic>,
    pub metadata: UnitMetadata,
}

#[derive(Debug, Clone)]
pub struct UnitMetadata {
    pub traverse_time: Duration,
    pub total_time: Duration,
    pub statements: usize,
    pub constants: usize,
}

impl UnitOutput {
    pub fn output_path(&self, dir: &std::path::Path) -> PathBuf {
        dir.join(&self.filename)
    }

    pub fn source_map_path(&self, dir: &std::path::Path) -> PathBuf {
        dir.join(format!("{}.map", self.filename))
    }
}

/// Transpiler builder for fluent configuration
pub struct TranspilerBuilder {
    config: TranspilerConfig,
}

impl TranspilerBuilder {
    pub fn new() -> Self {
        Self {
            config: TranspilerConfig::default(),
        }
    }

    pub fn unknown_types(mut self, handling: UnknownTypes) -> Self {
        self.config.unknown_types = handling;
        self
    }

    pub fn indent(mut self, enabled: bool) -> Self {
        self.config.indent = enabled;
        self
    }

    pub fn source_maps(mut self, enabled: bool) -> Self {
        self.config.source_maps = enabled;
        self
    }

    pub fn constants_prelude(mut self, enabled: bool) -> Self {
        self.config.constants_prelude = enabled;
        self
    }

    /// Fail when a dynamic-call fallback exception class is not registered.
    pub fn check_fallback_exceptions(mut self, enabled: bool) -> Self {
        self.config.check_fallback_exceptions = enabled;
        self
    }

    pub fn skip_registration(mut self, enabled: bool) -> Self {
        self.config.skip_registration = enabled;
        self
    }

    pub fn build(self) -> Transpiler {
        Transpiler::new(self.config)
    }
}

impl Default for TranspilerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Main transpiler interface
pub struct Transpiler {
    config: TranspilerConfig,
    unique: UniqueNames,
}

impl Transpiler {
    pub fn new(config: TranspilerConfig) -> Self {
        Self {
            config,
            unique: UniqueNames::new(),
        }
    }

    pub fn config(&self) -> &TranspilerConfig {
        &self.config
    }

    /// Lower a single unit. Temporaries keep counting across calls until
    /// the next [`Transpiler::run`].
    pub fn transpile_unit(&mut self, unit: &UnitInput, registry: &Registry) -> Result<UnitOutput> {
        debug!("transpiling {}", unit.filename);
        UnitPipeline::new(&self.config, registry).run(unit, &mut self.unique)
    }

    /// Lower every unit in order, stopping at the first one that fails.
    pub fn run(&mut self, project: &ProjectInput) -> Result<Vec<UnitOutput>> {
        self.unique.reset();
        let mut outputs = Vec::with_capacity(project.units.len());
        for unit in &project.units {
            outputs.push(self.transpile_unit(unit, &project.registry)?);
        }
        Ok(outputs)
    }
}
