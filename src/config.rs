//! Simulator configuration.
//!
//! Most runs need nothing beyond the CLI arguments, but an optional TOML
//! file (`--config path/to/file.toml`) can override the register/memory
//! dump widths and pick the output format, the way the teacher's `config`
//! module layers a file on top of CLI defaults.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::common::LoaderError;

fn default_register_dump_width() -> usize {
    16
}

fn default_memory_dump_width() -> usize {
    100
}

fn default_output_format() -> OutputFormat {
    OutputFormat::Text
}

/// How the final simulation dump is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Plain, human-readable text (the default).
    Text,
    /// A single JSON object, for tooling to consume.
    Json,
}

/// Simulator configuration, loadable from an optional TOML file and
/// overridable by CLI flags.
#[derive(Debug, Clone, Deserialize)]
pub struct SimConfig {
    /// How many of the 32 architectural registers to print in the final
    /// dump.
    #[serde(default = "default_register_dump_width")]
    pub register_dump_width: usize,
    /// How many data memory words to print in the final dump.
    #[serde(default = "default_memory_dump_width")]
    pub memory_dump_width: usize,
    /// Output rendering for the final dump.
    #[serde(default = "default_output_format")]
    pub output_format: OutputFormat,
}

impl SimConfig {
    /// The default configuration: 16 registers, 100 memory words, text
    /// output.
    pub fn new() -> Self {
        SimConfig {
            register_dump_width: default_register_dump_width(),
            memory_dump_width: default_memory_dump_width(),
            output_format: default_output_format(),
        }
    }

    /// Load configuration from a TOML file, falling back to defaults for
    /// any field it does not set.
    pub fn load(path: &Path) -> Result<Self, LoaderError> {
        let text = fs::read_to_string(path).map_err(|source| LoaderError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&text).map_err(|err| LoaderError::Syntax {
            line: 0,
            text: err.to_string(),
        })
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self::new()
    }
}
