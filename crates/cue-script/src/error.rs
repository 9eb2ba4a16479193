//! Error types for loading and running scripts.

use std::path::PathBuf;

use cue_json::ParseError;
use cue_schema::{MapError, SchemaError};
use thiserror::Error;

/// Result type for script operations.
pub type ScriptResult<T> = Result<T, ScriptError>;

/// Errors that can occur while loading a script.
#[derive(Debug, Error)]
pub enum ScriptError {
    /// Reading a script failed.
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        /// File or directory being read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Malformed JSON.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// The JSON did not fit the script schema.
    #[error("{0}")]
    Map(#[from] MapError),

    /// The schema itself is invalid.
    #[error("invalid schema: {0}")]
    Schema(#[from] SchemaError),

    /// The document has no `Commands` array.
    #[error("failed to parse commands: missing 'Commands' array")]
    MissingCommands,

    /// No command is registered under this name.
    #[error("unknown command: {0}")]
    UnknownCommand(String),

    /// A command entry has no parameters.
    #[error("command {0} has no parameters")]
    MissingParameters(String),

    /// The parameters resolved to a variant the command does not take.
    #[error("command {command} expects {expected}, found {found}")]
    ParameterMismatch {
        /// Command name.
        command: String,
        /// Parameter type the command takes.
        expected: String,
        /// Parameter type the script resolved to.
        found: String,
    },

    /// A directory held no script files.
    #[error("no scripts found in {}", .0.display())]
    NoScripts(PathBuf),

    /// A script file failed to load.
    #[error("{}: {source}", .path.display())]
    File {
        /// The script file.
        path: PathBuf,
        /// What went wrong.
        source: Box<ScriptError>,
    },
}

impl ScriptError {
    /// The innermost error, past any file wrappers.
    pub fn root_cause(&self) -> &ScriptError {
        match self {
            Self::File { source, .. } => source.root_cause(),
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_wrapper_messages() {
        let err = ScriptError::File {
            path: PathBuf::from("intro.json"),
            source: Box::new(ScriptError::UnknownCommand("Fade".into())),
        };
        assert_eq!(err.to_string(), "intro.json: unknown command: Fade");
        assert!(matches!(err.root_cause(), ScriptError::UnknownCommand(_)));
    }
}
