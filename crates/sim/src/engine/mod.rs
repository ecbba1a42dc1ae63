//! Invocation of the external simulation engine.

mod locate;
pub mod protocol;
mod runner;

pub use locate::{engine_file_name, locate_engine, BUNDLE_DIR, ENGINE_ENV};
pub use protocol::{build_script, PROTOCOL_VERSION};
pub use runner::EngineRunner;

/// How one engine execution ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// Exited with nothing on stderr.
    Completed,
    /// Wrote to stderr; carries the captured text.
    Failed(String),
    /// Killed on request.
    Aborted,
}

impl RunOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed)
    }
}
