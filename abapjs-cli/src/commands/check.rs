//! Checking without output

use crate::utils::{load_project, print_diagnostics, print_success};
use abapjs_transpiler::{Transpiler, TranspilerConfig, UnitOutput};
use anyhow::{bail, Context, Result};
use colored::*;
use serde::Serialize;
use std::path::PathBuf;

/// Per-unit summary of a check run
#[derive(Debug, Serialize)]
pub struct UnitReport {
    pub file: String,
    pub statements: usize,
    pub constants: usize,
    pub warnings: usize,
}

impl From<&UnitOutput> for UnitReport {
    fn from(output: &UnitOutput) -> Self {
        UnitReport {
            file: output.source_file.clone(),
            statements: output.metadata.statements,
            constants: output.metadata.constants,
            warnings: output.diagnostics.len(),
        }
    }
}

pub fn check_command(inputs: &[PathBuf], format: &str, config: TranspilerConfig) -> Result<()> {
    let reports = check(inputs, config)?;
    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&reports)?),
        "text" => {
            for report in &reports {
                println!(
                    "  {} {} statements, {} warnings",
                    report.file.bold(),
                    report.statements.to_string().cyan(),
                    report.warnings
                );
            }
            print_success(&format!("{} units transpile", reports.len()));
        }
        other => bail!("Unknown report format: {}", other),
    }
    Ok(())
}

pub fn check(inputs: &[PathBuf], config: TranspilerConfig) -> Result<Vec<UnitReport>> {
    let project = load_project(inputs)?;
    let mut transpiler = Transpiler::new(config);
    let outputs = transpiler.run(&project).context("Check failed")?;
    for output in &outputs {
        print_diagnostics(output);
    }
    Ok(outputs.iter().map(UnitReport::from).collect())
}
