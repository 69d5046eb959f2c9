//! Shared helpers for the commands

use abapjs_transpiler::{ProjectInput, Severity, UnitOutput};
use anyhow::{Context, Result};
use colored::*;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Read every project file and combine them into one project. Units keep
/// file order; later registries win on conflicting entries.
pub fn load_project(inputs: &[impl AsRef<Path>]) -> Result<ProjectInput> {
    let mut project = ProjectInput {
        registry: Default::default(),
        units: Vec::new(),
    };
    for input in inputs {
        let input = input.as_ref();
        let content =
            fs::read_to_string(input).with_context(|| format!("Failed to read project file: {}", input.display()))?;
        let part: ProjectInput = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse project file: {}", input.display()))?;
        debug!("{}: {} units", input.display(), part.units.len());
        project.registry.merge(part.registry);
        project.units.extend(part.units);
    }
    Ok(project)
}

pub fn print_diagnostics(output: &UnitOutput) {
    for diagnostic in &output.diagnostics {
        let location = match diagnostic.position {
            Some(position) => format!("{}:{}", output.source_file, position),
            None => output.source_file.clone(),
        };
        match diagnostic.severity {
            Severity::Warning => print_warning(&format!("{}: {}", location, diagnostic.message)),
            Severity::Info => print_info(&format!("{}: {}", location, diagnostic.message)),
        }
    }
}

/// Print a warning message with consistent styling
pub fn print_warning(message: &str) {
    println!("{} {}", "Warning:".yellow().bold(), message);
}

/// Print a success message with consistent styling
pub fn print_success(message: &str) {
    println!("{} {}", "Success:".green().bold(), message);
}

pub fn print_info(message: &str) {
    println!("{} {}", "Info:".blue().bold(), message);
}
