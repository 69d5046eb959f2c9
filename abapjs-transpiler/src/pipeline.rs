//! Per-unit lowering pipeline

use crate::{
    config::TranspilerConfig,
    indentation::indent,
    naming,
    source_map::SourceMap,
    traversal::{Traversal, TraversalOutput},
    unique::UniqueNames,
    Result, Severity, TranspileDiagnostic, UnitInput, UnitMetadata, UnitOutput,
};
use crate::chunk::Chunk;
use abapjs_scope::Registry;
use std::collections::BTreeSet;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Pipeline stages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    Validate,
    Traverse,
    Prelude,
    Register,
    Indent,
    SourceMap,
}

/// Pipeline stage result
#[derive(Debug)]
pub struct PipelineResult<T> {
    pub stage: PipelineStage,
    pub result: T,
    pub duration: Duration,
    pub diagnostics: Vec<TranspileDiagnostic>,
}

impl<T> PipelineResult<T> {
    fn timed(stage: PipelineStage, start: Instant, result: T) -> Self {
        Self {
            stage,
            result,
            duration: start.elapsed(),
            diagnostics: Vec::new(),
        }
    }
}

/// Walks one unit and assembles its JavaScript
pub struct UnitPipeline<'a> {
    config: &'a TranspilerConfig,
    registry: &'a Registry,
    enabled_stages: Vec<PipelineStage>,
}

impl<'a> UnitPipeline<'a> {
    pub fn new(config: &'a TranspilerConfig, registry: &'a Registry) -> Self {
        let mut enabled_stages = vec![PipelineStage::Validate, PipelineStage::Traverse];
        if config.constants_prelude {
            enabled_stages.push(PipelineStage::Prelude);
        }
        if !config.skip_registration {
            enabled_stages.push(PipelineStage::Register);
        }
        if config.indent {
            enabled_stages.push(PipelineStage::Indent);
        }
        if config.source_maps {
            enabled_stages.push(PipelineStage::SourceMap);
        }

        Self {
            config,
            registry,
            enabled_stages,
        }
    }

    pub fn is_enabled(&self, stage: PipelineStage) -> bool {
        self.enabled_stages.contains(&stage)
    }

    pub fn run(&self, unit: &UnitInput, unique: &mut UniqueNames) -> Result<UnitOutput> {
        let total_start = Instant::now();
        let mut all_diagnostics = Vec::new();

        // Stage 1: Validate
        let validate_result = self.run_validate_stage(unit)?;
        all_diagnostics.extend(validate_result.diagnostics);

        // Stage 2: Traverse
        let traverse_result = self.run_traverse_stage(unit, unique)?;
        all_diagnostics.extend(traverse_result.diagnostics);
        let traverse_time = traverse_result.duration;
        let (body, output) = traverse_result.result;
        let statements = output.statements;

        // Stage 3: Prelude
        let prelude = if self.is_enabled(PipelineStage::Prelude) {
            self.run_prelude_stage(&output.constants).result
        } else {
            String::new()
        };
        let constants = output.constants.len();

        // Stage 4: Register
        let raw = body.code();
        let mut code = raw.clone();
        if self.is_enabled(PipelineStage::Register) {
            code.push_str(&self.run_register_stage(&output.registrations).result);
        }

        // Stage 5: Indent
        let code = if self.is_enabled(PipelineStage::Indent) {
            self.run_indent_stage(&code).result
        } else {
            code
        };

        // Stage 6: Source map
        let js_file = naming::output_filename(&unit.filename);
        let source_map = if self.is_enabled(PipelineStage::SourceMap) {
            let line_offset = u32::try_from(prelude.lines().count()).unwrap_or(u32::MAX);
            let map_result = self.run_source_map_stage(unit, &js_file, &body, &raw, &code, line_offset)?;
            Some(map_result.result)
        } else {
            None
        };

        let mut js = prelude;
        js.push_str(&code);

        let total_time = total_start.elapsed();
        info!("{} -> {} ({} statements, {:?})", unit.filename, js_file, statements, total_time);

        Ok(UnitOutput {
            filename: js_file,
            source_file: unit.filename.clone(),
            js,
            source_map,
            diagnostics: all_diagnostics,
            metadata: UnitMetadata {
                traverse_time,
                total_time,
                statements,
                constants,
            },
        })
    }

    /// Consistency checks on the handed-over scope graph.
    fn run_validate_stage(&self, unit: &UnitInput) -> Result<PipelineResult<()>> {
        let start = Instant::now();
        unit.scopes.validate()?;

        let mut result = PipelineResult::timed(PipelineStage::Validate, start, ());
        match self.registry.object_for_file(&unit.filename) {
            Some(object) if *object != unit.object => {
                result.diagnostics.push(TranspileDiagnostic {
                    severity: Severity::Warning,
                    message: format!(
                        "{} is registered to {} {}, unit names {} {}",
                        unit.filename,
                        object.object_type.as_str(),
                        object.name,
                        unit.object.object_type.as_str(),
                        unit.object.name
                    ),
                    position: None,
                });
            }
            Some(_) => {}
            None => debug!("{} not in registry, local keys use the unit object", unit.filename),
        }
        Ok(result)
    }

    fn run_traverse_stage(
        &self,
        unit: &UnitInput,
        unique: &mut UniqueNames,
    ) -> Result<PipelineResult<(Chunk, TraversalOutput)>> {
        let start = Instant::now();
        let mut traversal = Traversal::new(unit, self.registry, self.config, unique);
        let body = traversal.run(&unit.root)?;
        let mut output = traversal.finish();

        let diagnostics = std::mem::take(&mut output.diagnostics);
        let mut result = PipelineResult::timed(PipelineStage::Traverse, start, (body, output));
        result.diagnostics = diagnostics;
        Ok(result)
    }

    /// `const constant_N = ...;` for every integer operand, ascending.
    fn run_prelude_stage(&self, constants: &BTreeSet<i64>) -> PipelineResult<String> {
        let start = Instant::now();
        let mut out = String::new();
        for value in constants {
            out.push_str(&format!(
                "const {} = new abap.types.Integer().set({});\n",
                naming::integer_constant(*value),
                value
            ));
        }
        PipelineResult::timed(PipelineStage::Prelude, start, out)
    }

    fn run_register_stage(&self, registrations: &[String]) -> PipelineResult<String> {
        let start = Instant::now();
        let mut out = String::new();
        for line in registrations {
            out.push_str(line);
            out.push('\n');
        }
        PipelineResult::timed(PipelineStage::Register, start, out)
    }

    fn run_indent_stage(&self, code: &str) -> PipelineResult<String> {
        let start = Instant::now();
        PipelineResult::timed(PipelineStage::Indent, start, indent(code))
    }

    fn run_source_map_stage(
        &self,
        unit: &UnitInput,
        js_file: &str,
        body: &Chunk,
        raw: &str,
        indented: &str,
        line_offset: u32,
    ) -> Result<PipelineResult<String>> {
        let start = Instant::now();
        let map = SourceMap::build(js_file, &unit.filename, &body.mappings(), raw, indented, line_offset);
        Ok(PipelineResult::timed(PipelineStage::SourceMap, start, map.to_json()?))
    }
}
