use super::RunOutcome;
use crate::errors::EngineError;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWriteExt};
use tokio::process::Command;
use tokio_util::sync::CancellationToken;

#[cfg(windows)]
const CREATE_NO_WINDOW: u32 = 0x0800_0000;

/// Runs the external engine, one process per call.
#[derive(Debug, Clone)]
pub struct EngineRunner {
    program: PathBuf,
}

impl EngineRunner {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Start the engine in `run_dir`, send `script` and wait for it to exit.
    ///
    /// Any output at all on stderr makes the run [`RunOutcome::Failed`],
    /// whatever the exit status. So does a non-zero exit status with an
    /// empty stderr. Cancelling `cancel` kills the process
    /// without waiting for a graceful shutdown and yields
    /// [`RunOutcome::Aborted`].
    pub async fn run(
        &self,
        run_dir: &Path,
        script: &str,
        cancel: CancellationToken,
    ) -> Result<RunOutcome, EngineError> {
        let mut command = Command::new(&self.program);
        command
            .current_dir(run_dir)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        #[cfg(windows)]
        command.creation_flags(CREATE_NO_WINDOW);

        let mut child = command.spawn().map_err(|source| EngineError::Spawn {
            path: self.program.clone(),
            source,
        })?;
        tracing::info!(
            engine = %self.program.display(),
            pid = child.id(),
            dir = %run_dir.display(),
            "Engine started"
        );

        // Stdout is not interpreted, but it must be drained so the engine
        // never blocks on a full pipe.
        let stdout = tokio::spawn(read_all(child.stdout.take()));
        let stderr = tokio::spawn(read_all(child.stderr.take()));

        if let Some(mut stdin) = child.stdin.take() {
            match stdin.write_all(script.as_bytes()).await {
                Ok(()) => {}
                // The engine quit before reading everything; its stderr says why.
                Err(e) if e.kind() == io::ErrorKind::BrokenPipe => {
                    tracing::debug!("Engine closed stdin early");
                }
                Err(e) => return Err(EngineError::Stdin(e)),
            }
            // Dropping stdin sends EOF.
        }

        let status = tokio::select! {
            status = child.wait() => status.map_err(EngineError::Wait)?,
            _ = cancel.cancelled() => {
                if let Err(e) = child.start_kill() {
                    tracing::warn!("Failed to kill engine: {e}");
                }
                let _ = child.wait().await;
                stdout.abort();
                stderr.abort();
                tracing::info!("Engine aborted");
                return Ok(RunOutcome::Aborted);
            }
        };

        let out = stdout.await.unwrap_or_default();
        let err = stderr.await.unwrap_or_default();
        tracing::debug!(stdout_bytes = out.len(), "Engine exited with {status}");

        if !err.is_empty() {
            tracing::error!("Engine reported errors: {}", err.trim_end());
            return Ok(RunOutcome::Failed(err));
        }
        if !status.success() {
            tracing::error!("Engine exited with {status} but wrote nothing to stderr");
            return Ok(RunOutcome::Failed(format!("Engine exited with {status}")));
        }
        Ok(RunOutcome::Completed)
    }
}

async fn read_all<R: AsyncRead + Unpin>(pipe: Option<R>) -> String {
    let mut buf = Vec::new();
    if let Some(mut pipe) = pipe {
        if let Err(e) = pipe.read_to_end(&mut buf).await {
            tracing::debug!("Engine pipe read failed: {e}");
        }
    }
    String::from_utf8_lossy(&buf).into_owned()
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;
    use std::time::Duration;
    use tempfile::tempdir;

    fn script_engine(dir: &Path, body: &str) -> PathBuf {
        let path = dir.join("engine.sh");
        fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    #[tokio::test]
    async fn test_completed_run_receives_script_in_run_dir() {
        let dir = tempdir().unwrap();
        let engine = script_engine(dir.path(), "cat > received.txt\necho done");
        let run_dir = dir.path().join("run");
        fs::create_dir(&run_dir).unwrap();

        let outcome = EngineRunner::new(&engine)
            .run(&run_dir, "100\n/p\n0\n", CancellationToken::new())
            .await
            .unwrap();
        assert_eq!(outcome, RunOutcome::Completed);
        assert_eq!(
            fs::read_to_string(run_dir.join("received.txt")).unwrap(),
            "100\n/p\n0\n"
        );
    }

    #[tokio::test]
    async fn test_stderr_means_failure_even_on_success_status() {
        let dir = tempdir().unwrap();
        let engine = script_engine(dir.path(), "cat > /dev/null\necho 'bad params' >&2\nexit 0");

        let outcome = EngineRunner::new(&engine)
            .run(dir.path(), "0\n", CancellationToken::new())
            .await
            .unwrap();
        assert_eq!(outcome, RunOutcome::Failed("bad params\n".to_string()));
    }

    #[tokio::test]
    async fn test_blank_stderr_is_still_failure() {
        let dir = tempdir().unwrap();
        let engine = script_engine(dir.path(), "cat > /dev/null\nprintf '\\n \\n' >&2");

        let outcome = EngineRunner::new(&engine)
            .run(dir.path(), "0\n", CancellationToken::new())
            .await
            .unwrap();
        assert_eq!(outcome, RunOutcome::Failed("\n \n".to_string()));
    }

    #[tokio::test]
    async fn test_nonzero_exit_without_stderr_fails() {
        let dir = tempdir().unwrap();
        let engine = script_engine(dir.path(), "cat > /dev/null\nexit 3");

        let outcome = EngineRunner::new(&engine)
            .run(dir.path(), "0\n", CancellationToken::new())
            .await
            .unwrap();
        match outcome {
            RunOutcome::Failed(message) => assert!(message.contains('3'), "{message}"),
            other => panic!("expected failure, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_cancel_kills_engine() {
        let dir = tempdir().unwrap();
        let engine = script_engine(dir.path(), "cat > /dev/null\nexec sleep 30");
        let cancel = CancellationToken::new();

        let trigger = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(200)).await;
            trigger.cancel();
        });

        let outcome = tokio::time::timeout(
            Duration::from_secs(10),
            EngineRunner::new(&engine).run(dir.path(), "0\n", cancel),
        )
        .await
        .expect("abort should not hang")
        .unwrap();
        assert_eq!(outcome, RunOutcome::Aborted);
    }

    #[tokio::test]
    async fn test_missing_program() {
        let dir = tempdir().unwrap();
        let err = EngineRunner::new(dir.path().join("nope"))
            .run(dir.path(), "0\n", CancellationToken::new())
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::Spawn { .. }));
    }
}
