//! Program loading and initialisation errors.
//!
//! Per the simulator's error-handling design, only initialisation ever
//! fails: a missing input file, a malformed program line, or a malformed
//! config file. Decoding failures at runtime (an unrecognised opcode
//! token) do not produce an error here; they load as `Opcode::Unknown`,
//! which every pipeline stage treats as a bubble. The same type covers
//! both the program loader and the config loader, since both are "read a
//! text file, fail with a line number" operations.

use std::fmt;
use std::path::PathBuf;

/// Failure to load an APEX program or configuration file from disk.
#[derive(Debug)]
pub enum LoaderError {
    /// The input file could not be read.
    Io {
        /// Path that was requested.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// A program line, or the config file, did not match the expected
    /// syntax.
    Syntax {
        /// 1-based line number in the source file, or 0 when the
        /// underlying parser (e.g. TOML) does not report one.
        line: usize,
        /// The offending text, or a description of the parse failure.
        text: String,
    },
}

impl fmt::Display for LoaderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoaderError::Io { path, source } => {
                write!(f, "could not read '{}': {}", path.display(), source)
            }
            LoaderError::Syntax { line, text } if *line > 0 => {
                write!(f, "line {}: cannot parse: '{}'", line, text)
            }
            LoaderError::Syntax { text, .. } => write!(f, "cannot parse: {}", text),
        }
    }
}

impl std::error::Error for LoaderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoaderError::Io { source, .. } => Some(source),
            LoaderError::Syntax { .. } => None,
        }
    }
}
