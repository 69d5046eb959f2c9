//! Transpiler configuration and settings

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// How types the analyzer could not resolve are handled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UnknownTypes {
    /// Abort the unit.
    CompileError,
    /// Emit `undefined` so only code touching the value fails at run time.
    RuntimeError,
}

impl Default for UnknownTypes {
    fn default() -> Self {
        UnknownTypes::CompileError
    }
}

/// Main transpiler configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TranspilerConfig {
    pub unknown_types: UnknownTypes,
    /// Re-indent the output, two spaces per brace level.
    pub indent: bool,
    /// Produce a position map next to each unit.
    pub source_maps: bool,
    /// Hoist `constant_N` declarations to the top of each unit.
    pub constants_prelude: bool,
    /// Require the dynamic-call fallback exception classes to be registered.
    pub check_fallback_exceptions: bool,
    /// Omit the `abap.Classes[...] = ...;` registration lines.
    pub skip_registration: bool,
    pub output_dir: Option<PathBuf>,
}

impl Default for TranspilerConfig {
    fn default() -> Self {
        Self {
            unknown_types: UnknownTypes::CompileError,
            indent: true,
            source_maps: false,
            constants_prelude: true,
            check_fallback_exceptions: false,
            skip_registration: false,
            output_dir: None,
        }
    }
}

impl TranspilerConfig {
    /// Load configuration from TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e,
        })
    }

    /// Save configuration to TOML file
    pub fn to_file(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize { error: e })?;

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| ConfigError::Io {
                    path: parent.to_path_buf(),
                    error: e,
                })?;
            }
        }

        std::fs::write(path, content).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e,
        })
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(dir) = &self.output_dir {
            if dir.as_os_str().is_empty() {
                return Err(ConfigError::Invalid {
                    field: "output_dir".to_string(),
                    message: "output directory must not be empty".to_string(),
                });
            }
        }

        Ok(())
    }

    /// Merge with another configuration (other takes precedence)
    pub fn merge(&mut self, other: TranspilerConfig) {
        let defaults = TranspilerConfig::default();
        if other.unknown_types != defaults.unknown_types {
            self.unknown_types = other.unknown_types;
        }
        if other.indent != defaults.indent {
            self.indent = other.indent;
        }
        if other.source_maps != defaults.source_maps {
            self.source_maps = other.source_maps;
        }
        if other.constants_prelude != defaults.constants_prelude {
            self.constants_prelude = other.constants_prelude;
        }
        if other.check_fallback_exceptions != defaults.check_fallback_exceptions {
            self.check_fallback_exceptions = other.check_fallback_exceptions;
        }
        if other.skip_registration != defaults.skip_registration {
            self.skip_registration = other.skip_registration;
        }
        if other.output_dir.is_some() {
            self.output_dir = other.output_dir;
        }
    }

    pub fn runtime_type_errors(&self) -> bool {
        self.unknown_types == UnknownTypes::RuntimeError
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("I/O error for {path:?}: {error}")]
    Io { path: PathBuf, error: std::io::Error },

    #[error("Parse error for {path:?}: {error}")]
    Parse { path: PathBuf, error: toml::de::Error },

    #[error("Serialization error: {error}")]
    Serialize { error: toml::ser::Error },

    #[error("Invalid configuration for {field}: {message}")]
    Invalid { field: String, message: String },
}
