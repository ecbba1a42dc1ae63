//! Error types for the run pipeline.
//!
//! Parameter validation does not use these: it reports problems as
//! [`Diagnostic`](crate::validation::Diagnostic)s so that every problem is
//! shown to the user at once.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors reading or writing the positional parameter file.
#[derive(Debug, Error)]
pub enum ParamFileError {
    #[error("IO error on parameter file: {0}")]
    Io(#[from] io::Error),

    #[error("Parameter file has {found} values, expected {expected}")]
    WrongLength { expected: usize, found: usize },

    #[error("Line {line} ({name}): cannot parse '{value}' as {kind}")]
    Parse {
        line: usize,
        name: &'static str,
        value: String,
        kind: &'static str,
    },

    #[error(transparent)]
    Field(#[from] FieldError),
}

/// A value that cannot be stored in an engine field.
#[derive(Debug, Error, PartialEq)]
#[error("{name}: {value} is not a valid {kind}")]
pub struct FieldError {
    pub name: &'static str,
    pub value: f64,
    pub kind: &'static str,
}

/// Errors creating a run output directory.
#[derive(Debug, Error)]
pub enum OutputDirError {
    #[error("The output directory path does not exist: {}", .0.display())]
    ParentMissing(PathBuf),

    #[error(
        "The selected simulation directory has already been used to run a simulation: {}. Please select a different one.",
        .0.display()
    )]
    AlreadyUsed(PathBuf),

    #[error("Failed to create output directory {}: {source}", .path.display())]
    Create {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Errors starting or talking to the external engine.
///
/// A non-empty stderr is not an `EngineError`: it is a
/// [`RunOutcome::Failed`](crate::engine::RunOutcome::Failed) outcome.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Engine executable not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to start engine {}: {source}", .path.display())]
    Spawn {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to send input script to engine: {0}")]
    Stdin(#[source] io::Error),

    #[error("Failed waiting for engine: {0}")]
    Wait(#[source] io::Error),
}

/// Errors from launching or supervising a run.
#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("Run supervisor task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}
