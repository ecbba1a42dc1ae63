//! Error types for reading engine output and rendering plots.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors reading an engine data file.
#[derive(Debug, Error)]
pub enum DataFileError {
    #[error("IO error reading {}: {source}", .path.display())]
    Io { path: PathBuf, source: io::Error },

    #[error("{}: line {line}: cannot parse '{token}' as a number", .path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        token: String,
    },

    #[error("{}: line {line} has {found} columns, expected {expected}", .path.display())]
    Columns {
        path: PathBuf,
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("{}: {rows} rows do not split into frames of {patches} patches", .path.display())]
    Ragged {
        path: PathBuf,
        rows: usize,
        patches: usize,
    },

    #[error("Frame {frame} is out of range (0 to {})", .frames.saturating_sub(1))]
    NoSuchFrame { frame: usize, frames: usize },

    #[error("No {kind} file for Run {run} in {}", .dir.display())]
    MissingRun {
        kind: &'static str,
        run: u32,
        dir: PathBuf,
    },

    #[error("Output directory not found: {}", .0.display())]
    NoOutputDir(PathBuf),
}

impl DataFileError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Errors drawing a plot to a file.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error(transparent)]
    Data(#[from] DataFileError),

    #[error("Unsupported image format '{0}' (use .png or .svg)")]
    Format(String),

    #[error("Drawing failed: {0}")]
    Draw(String),

    #[error("Animation interval must be between 1 and 10000 ms, got {0}")]
    Interval(u64),

    #[error("Nothing to plot: {0}")]
    Empty(&'static str),

    #[error("Animation export worker failed: {0}")]
    Worker(#[from] tokio::task::JoinError),
}
