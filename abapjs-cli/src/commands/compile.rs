//! Compilation commands

use crate::config::output_dir;
use crate::utils::{load_project, print_diagnostics, print_success};
use abapjs_transpiler::{Transpiler, TranspilerConfig, UnitOutput};
use anyhow::{Context, Result};
use colored::*;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

pub fn compile_command(
    inputs: &[PathBuf],
    output: Option<&Path>,
    source_maps: bool,
    mut config: TranspilerConfig,
) -> Result<()> {
    if source_maps {
        config.source_maps = true;
    }
    let dir = output_dir(output, &config);
    let written = compile(inputs, &dir, config)?;
    print_success(&format!(
        "Wrote {} files to {}",
        written.len().to_string().cyan(),
        dir.display()
    ));
    Ok(())
}

/// Transpile every unit, then write all outputs. Nothing is written when
/// any unit fails.
pub fn compile(inputs: &[PathBuf], dir: &Path, config: TranspilerConfig) -> Result<Vec<PathBuf>> {
    let project = load_project(inputs)?;
    info!("Transpiling {} units", project.units.len());

    let mut transpiler = Transpiler::new(config);
    let outputs = transpiler.run(&project).context("Transpilation failed")?;
    for output in &outputs {
        print_diagnostics(output);
    }
    write_outputs(&outputs, dir)
}

fn write_outputs(outputs: &[UnitOutput], dir: &Path) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir).with_context(|| format!("Failed to create output directory: {}", dir.display()))?;

    let mut written = Vec::new();
    for output in outputs {
        let path = output.output_path(dir);
        fs::write(&path, &output.js).with_context(|| format!("Failed to write {}", path.display()))?;
        written.push(path);

        if let Some(map) = &output.source_map {
            let path = output.source_map_path(dir);
            fs::write(&path, map).with_context(|| format!("Failed to write {}", path.display()))?;
            written.push(path);
        }
    }
    Ok(written)
}
