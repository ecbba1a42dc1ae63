//! Run orchestration.
//!
//! A run is three tokio tasks: the engine task owns the subprocess, the
//! progress task polls the totals files, and a supervisor joins them and
//! relays [`RunEvent`]s to a single consumer through a [`RunHandle`].
//!
//! - `ProgressReader`: polling-based progress for one or more replicates.
//! - `RunHandle`: abort, running state and event delivery for one run.
//! - `RunObserver`: callbacks for components that react to run lifecycle.

mod progress;
mod session;

pub use progress::{
    count_lines, count_lines_blocking, ProgressReader, ProgressState, HEADER_LINES, POLL_INTERVAL,
};
pub use session::{launch, AbortHandle, RunEvent, RunHandle, RunObserver, ABORT_WAIT};
