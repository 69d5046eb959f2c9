//! Default configuration output

use crate::utils::print_success;
use abapjs_transpiler::TranspilerConfig;
use anyhow::{Context, Result};
use std::path::Path;

pub fn config_command(output: Option<&Path>) -> Result<()> {
    let config = TranspilerConfig::default();
    match output {
        Some(path) => {
            config
                .to_file(path)
                .with_context(|| format!("Failed to write config file: {}", path.display()))?;
            print_success(&format!("Wrote default configuration to {}", path.display()));
        }
        None => {
            let content = toml::to_string_pretty(&config).context("Failed to serialize config")?;
            print!("{}", content);
        }
    }
    Ok(())
}
