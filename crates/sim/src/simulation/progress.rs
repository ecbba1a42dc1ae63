//! Run progress estimated from the engine's totals files.
//!
//! The engine has no progress channel. It appends one row per simulated day
//! to `Totals<label>run<N>.txt`, after two header lines, so the row count of
//! the current replicate's file is a usable proxy. This is a heuristic: a
//! poll can land mid-write, and a file that does not exist yet simply means
//! no progress.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Header lines at the top of every engine data file.
pub const HEADER_LINES: usize = 2;

/// Delay between polls.
pub const POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Progress of a run, one unit per simulated day per replicate (including
/// the initialisation day).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressState {
    pub value: u64,
    pub max_t: u32,
    pub num_runs: u32,
}

impl ProgressState {
    pub fn new(max_t: u32, num_runs: u32) -> Self {
        Self {
            value: 0,
            max_t,
            num_runs,
        }
    }

    fn steps_per_run(&self) -> u64 {
        u64::from(self.max_t) + 1
    }

    pub fn total(&self) -> u64 {
        u64::from(self.num_runs) * self.steps_per_run()
    }

    pub fn with_value(self, value: u64) -> Self {
        Self {
            value: value.min(self.total()),
            ..self
        }
    }

    /// 1-based replicate the value falls in.
    pub fn current_run(&self) -> u64 {
        self.value / self.steps_per_run() + 1
    }

    /// Simulated day within the current replicate; 0 while initialising.
    pub fn day(&self) -> u64 {
        self.value % self.steps_per_run()
    }

    pub fn fraction(&self) -> f64 {
        match self.total() {
            0 => 0.0,
            total => self.value as f64 / total as f64,
        }
    }

    /// Status text for run `name`, or `None` once every replicate is done.
    pub fn status_line(&self, name: &str) -> Option<String> {
        let run = self.current_run();
        if run > u64::from(self.num_runs) {
            return None;
        }
        let line = if self.day() == 0 {
            format!(
                "Initialising simulation {name} run {run}/{}. Please wait.",
                self.num_runs
            )
        } else {
            format!(
                "Running simulation {name} run {run}/{} day {}/{}",
                self.num_runs,
                self.day(),
                self.max_t
            )
        };
        Some(line)
    }
}

/// Count lines in `path`, counting a trailing partial line. `None` when the
/// file is missing or cannot be read right now.
pub fn count_lines(path: &Path) -> Option<usize> {
    let file = File::open(path).ok()?;
    let mut reader = BufReader::new(file);
    let mut buf = [0u8; 8192];
    let mut lines = 0;
    let mut last = b'\n';
    loop {
        let n = reader.read(&mut buf).ok()?;
        if n == 0 {
            break;
        }
        lines += buf[..n].iter().filter(|&&b| b == b'\n').count();
        last = buf[n - 1];
    }
    if last != b'\n' {
        lines += 1;
    }
    Some(lines)
}

/// [`count_lines`] on the blocking pool, off the async workers.
pub async fn count_lines_blocking(path: PathBuf) -> Option<usize> {
    match tokio::task::spawn_blocking(move || count_lines(&path)).await {
        Ok(lines) => lines,
        Err(e) => {
            tracing::debug!("Line count task failed: {e}");
            None
        }
    }
}

/// Polls the per-replicate totals files in order and reports progress.
#[derive(Debug, Clone)]
pub struct ProgressReader {
    files: Vec<PathBuf>,
    state: ProgressState,
    interval: Duration,
}

impl ProgressReader {
    /// `files` are the expected totals files, in replicate order.
    pub fn new(files: Vec<PathBuf>, max_t: u32) -> Self {
        let num_runs = u32::try_from(files.len()).unwrap_or(u32::MAX);
        Self {
            files,
            state: ProgressState::new(max_t, num_runs),
            interval: POLL_INTERVAL,
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn state(&self) -> ProgressState {
        self.state
    }

    /// Progress for replicate `index` (0-based) whose file has `lines` lines.
    pub fn progress_for(&self, index: usize, lines: usize) -> u64 {
        let per_run = u64::from(self.state.max_t) + 1;
        let rows = (lines.saturating_sub(HEADER_LINES) as u64).min(per_run);
        index as u64 * per_run + rows
    }

    /// Whether a file with `lines` lines holds the complete replicate.
    fn is_complete(&self, lines: usize) -> bool {
        lines >= HEADER_LINES + 1 + self.state.max_t as usize
    }

    /// Poll until every file is complete, `cancel` fires, or `engine_done`
    /// fires. After `engine_done` each remaining file is read once more, so
    /// the final value reflects everything the engine wrote.
    ///
    /// `on_progress` is called only when the value increases, so the
    /// reported sequence is strictly increasing and bounded by the total.
    /// Returns the last state.
    pub async fn run(
        mut self,
        cancel: CancellationToken,
        engine_done: CancellationToken,
        mut on_progress: impl FnMut(ProgressState) + Send,
    ) -> ProgressState {
        for index in 0..self.files.len() {
            loop {
                if cancel.is_cancelled() {
                    tracing::debug!("Progress polling stopped");
                    return self.state;
                }
                let final_pass = engine_done.is_cancelled();

                if let Some(lines) = count_lines_blocking(self.files[index].clone()).await {
                    let value = self.progress_for(index, lines);
                    if value > self.state.value {
                        self.state = self.state.with_value(value);
                        on_progress(self.state);
                    }
                    if self.is_complete(lines) {
                        tracing::debug!(run = index + 1, "Replicate complete");
                        break;
                    }
                }
                if final_pass {
                    break;
                }

                tokio::select! {
                    _ = cancel.cancelled() => {}
                    _ = engine_done.cancelled() => {}
                    _ = tokio::time::sleep(self.interval) => {}
                }
            }
        }
        self.state
    }
}
