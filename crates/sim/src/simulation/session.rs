use super::progress::{ProgressReader, ProgressState};
use crate::engine::{build_script, EngineRunner, RunOutcome, PROTOCOL_VERSION};
use crate::errors::RunError;
use crate::params::InputParams;
use crate::storage::RunDir;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Upper bound on how long an abort waits for the workers to stop.
pub const ABORT_WAIT: Duration = Duration::from_secs(5);

/// Lifecycle events of one run, in delivery order.
#[derive(Debug, Clone, PartialEq)]
pub enum RunEvent {
    Started { run_dir: PathBuf, total: u64 },
    Progress(ProgressState),
    /// The engine exited cleanly; its output files are complete.
    Finished { run_dir: PathBuf },
    /// The engine wrote to stderr, or could not be run at all.
    Failed(String),
    Aborted,
}

impl RunEvent {
    /// Deliver this event to the matching observer callback.
    pub fn dispatch(&self, observer: &mut dyn RunObserver) {
        match self {
            Self::Started { run_dir, total } => observer.run_started(run_dir, *total),
            Self::Progress(state) => observer.progress(state),
            Self::Finished { run_dir } => observer.run_finished(run_dir),
            Self::Failed(message) => observer.run_failed(message),
            Self::Aborted => observer.run_aborted(),
        }
    }
}

/// Receives run lifecycle callbacks. Every method defaults to doing nothing.
pub trait RunObserver {
    fn run_started(&mut self, _run_dir: &Path, _total: u64) {}
    fn progress(&mut self, _state: &ProgressState) {}
    fn run_finished(&mut self, _run_dir: &Path) {}
    fn run_failed(&mut self, _message: &str) {}
    fn run_aborted(&mut self) {}
}

/// Cloneable handle that can abort a run from another task.
#[derive(Debug, Clone)]
pub struct AbortHandle {
    poller: CancellationToken,
    engine: CancellationToken,
    running: Arc<AtomicBool>,
}

impl AbortHandle {
    /// Stop the progress poller, then kill the engine.
    pub fn abort(&self) {
        if self.is_running() {
            tracing::info!("Aborting run");
        }
        self.poller.cancel();
        self.engine.cancel();
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }
}

/// A launched run.
#[derive(Debug)]
pub struct RunHandle {
    name: String,
    run_dir: PathBuf,
    events: mpsc::UnboundedReceiver<RunEvent>,
    abort: AbortHandle,
    supervisor: JoinHandle<Result<RunOutcome, RunError>>,
}

/// Start the engine for `params` in `run_dir`.
///
/// `param_file` and any auxiliary copies must already be written. Must be
/// called from within a tokio runtime.
pub fn launch(
    runner: EngineRunner,
    run_dir: &RunDir,
    params: &InputParams,
    param_file: &Path,
) -> RunHandle {
    let (tx, events) = mpsc::unbounded_channel();
    let abort = AbortHandle {
        poller: CancellationToken::new(),
        engine: CancellationToken::new(),
        running: Arc::new(AtomicBool::new(true)),
    };

    let expected = run_dir.expected_totals_files(params);
    let supervisor = Supervisor {
        runner,
        dir: run_dir.path().to_path_buf(),
        script: build_script(param_file, &params.model),
        reader: ProgressReader::new(expected.clone(), params.max_t),
        expected,
        abort: abort.clone(),
        tx,
    };

    RunHandle {
        name: run_dir.name().to_string(),
        run_dir: run_dir.path().to_path_buf(),
        events,
        abort,
        supervisor: tokio::spawn(supervisor.run()),
    }
}

impl RunHandle {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn run_dir(&self) -> &Path {
        &self.run_dir
    }

    pub fn abort(&self) {
        self.abort.abort();
    }

    pub fn abort_handle(&self) -> AbortHandle {
        self.abort.clone()
    }

    pub fn is_running(&self) -> bool {
        self.abort.is_running()
    }

    /// Next lifecycle event, or `None` once the run is over and every event
    /// has been delivered.
    pub async fn next_event(&mut self) -> Option<RunEvent> {
        self.events.recv().await
    }

    /// Deliver every remaining event to `observers`, in order, and return
    /// the outcome once the run is over.
    pub async fn wait(
        mut self,
        observers: &mut [&mut dyn RunObserver],
    ) -> Result<RunOutcome, RunError> {
        while let Some(event) = self.events.recv().await {
            for observer in observers.iter_mut() {
                event.dispatch(&mut **observer);
            }
        }
        self.supervisor.await?
    }
}

struct Supervisor {
    runner: EngineRunner,
    dir: PathBuf,
    script: String,
    reader: ProgressReader,
    expected: Vec<PathBuf>,
    abort: AbortHandle,
    tx: mpsc::UnboundedSender<RunEvent>,
}

impl Supervisor {
    async fn run(self) -> Result<RunOutcome, RunError> {
        let Supervisor {
            runner,
            dir,
            script,
            reader,
            expected,
            abort,
            tx,
        } = self;

        let total = reader.state().total();
        // Send errors only mean the handle was dropped; the run continues.
        let _ = tx.send(RunEvent::Started {
            run_dir: dir.clone(),
            total,
        });

        let engine_done = CancellationToken::new();
        let mut engine_task = {
            let dir = dir.clone();
            let cancel = abort.engine.clone();
            tokio::spawn(async move { runner.run(&dir, &script, cancel).await })
        };
        let mut poll_task = {
            let tx = tx.clone();
            tokio::spawn(reader.run(
                abort.poller.clone(),
                engine_done.clone(),
                move |state| {
                    let _ = tx.send(RunEvent::Progress(state));
                },
            ))
        };

        let joined = tokio::select! {
            joined = &mut engine_task => joined,
            _ = abort.engine.cancelled() => {
                match tokio::time::timeout(ABORT_WAIT, &mut engine_task).await {
                    Ok(joined) => joined,
                    Err(_) => {
                        tracing::warn!("Engine did not stop within {ABORT_WAIT:?}");
                        engine_task.abort();
                        Ok(Ok(RunOutcome::Aborted))
                    }
                }
            }
        };
        engine_done.cancel();

        let result = match joined {
            Ok(result) => result.map_err(RunError::from),
            Err(e) => Err(RunError::from(e)),
        };

        // On success the poller makes its final pass; otherwise it stops now.
        if !matches!(result, Ok(RunOutcome::Completed)) {
            abort.poller.cancel();
        }
        if tokio::time::timeout(ABORT_WAIT, &mut poll_task).await.is_err() {
            tracing::warn!("Progress poller did not stop within {ABORT_WAIT:?}");
            poll_task.abort();
        }

        abort.running.store(false, Ordering::SeqCst);

        let event = match &result {
            Ok(RunOutcome::Completed) => {
                check_outputs(&expected);
                tracing::info!(dir = %dir.display(), "Run finished");
                RunEvent::Finished {
                    run_dir: dir.clone(),
                }
            }
            Ok(RunOutcome::Failed(message)) => RunEvent::Failed(message.clone()),
            Ok(RunOutcome::Aborted) => RunEvent::Aborted,
            Err(e) => {
                tracing::error!("Run failed: {e}");
                RunEvent::Failed(e.to_string())
            }
        };
        let _ = tx.send(event);
        result
    }
}

/// Warn when a completed run left no totals files behind, which usually
/// means the engine speaks a different menu protocol.
fn check_outputs(expected: &[PathBuf]) {
    let missing: Vec<_> = expected.iter().filter(|p| !p.exists()).collect();
    if missing.is_empty() {
        return;
    }
    if missing.len() == expected.len() {
        tracing::warn!(
            protocol = PROTOCOL_VERSION,
            "Engine exited cleanly but wrote none of the expected totals files; \
             check that it speaks menu protocol {PROTOCOL_VERSION}"
        );
    } else {
        for path in missing {
            tracing::warn!(file = %path.display(), "Expected output file is missing");
        }
    }
}
