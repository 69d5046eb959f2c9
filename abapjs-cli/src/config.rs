//! Configuration lookup

use abapjs_transpiler::TranspilerConfig;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::debug;

pub const DEFAULT_CONFIG_FILE: &str = "abapjs.toml";

/// Explicit path first, then `abapjs.toml` in the working directory, then defaults.
pub fn load(explicit: Option<&Path>) -> Result<TranspilerConfig> {
    let cwd = std::env::current_dir().context("Cannot determine working directory")?;
    load_from(explicit, &cwd)
}

pub fn load_from(explicit: Option<&Path>, dir: &Path) -> Result<TranspilerConfig> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => {
            let candidate = dir.join(DEFAULT_CONFIG_FILE);
            if !candidate.exists() {
                debug!("no {} in {}, using defaults", DEFAULT_CONFIG_FILE, dir.display());
                return Ok(TranspilerConfig::default());
            }
            candidate
        }
    };

    let config = TranspilerConfig::from_file(&path)
        .with_context(|| format!("Failed to load config file: {}", path.display()))?;
    config
        .validate()
        .with_context(|| format!("Invalid config file: {}", path.display()))?;
    debug!("loaded configuration from {}", path.display());
    Ok(config)
}

/// Output directory: command line, then configuration, then `./dist`.
pub fn output_dir(cli: Option<&Path>, config: &TranspilerConfig) -> PathBuf {
    cli.map(Path::to_path_buf)
        .or_else(|| config.output_dir.clone())
        .unwrap_or_else(|| PathBuf::from("dist"))
}
