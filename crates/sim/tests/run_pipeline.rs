//! Integration tests for a full run against stub engines.
//!
//! The stubs are shell scripts, so these tests only run on unix.
#![cfg(unix)]

use gdsims_sim::engine::{EngineRunner, RunOutcome};
use gdsims_sim::params::{AuxFile, ParamSet};
use gdsims_sim::simulation::{launch, ProgressState, RunEvent, RunObserver};
use gdsims_sim::storage::RunDir;
use gdsims_sim::validation::{validate_set, ValidationOptions};
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tempfile::tempdir;

/// Reads the menu script, then writes a complete totals file per replicate.
const WRITING_ENGINE: &str = r#"#!/bin/sh
input=$(cat)
printf '%s\n' "$input" > received.txt
params=$(printf '%s\n' "$input" | sed -n 2p)
num_runs=$(sed -n 1p "$params")
max_t=$(sed -n 2p "$params")
label=$(sed -n 34p "$params")
mkdir -p output_files
run=1
while [ "$run" -le "$num_runs" ]; do
  f="output_files/Totals${label}run${run}.txt"
  printf 'Totals\nday WW WD DD WR RR DR\n' > "$f"
  day=0
  while [ "$day" -le "$max_t" ]; do
    printf '%s 10 0 0 0 0 0\n' "$day" >> "$f"
    day=$((day + 1))
  done
  run=$((run + 1))
done
"#;

const SLEEPING_ENGINE: &str = "#!/bin/sh\ncat > /dev/null\nexec sleep 30\n";

const FAILING_ENGINE: &str = "#!/bin/sh\ncat > /dev/null\necho 'Error: bad parameter file' >&2\n";

/// Succeeds only if the rainfall path it is given names an existing file.
const RAINFALL_ENGINE: &str = r#"#!/bin/sh
rain=$(sed -n '/^3$/{n;p;}')
if [ -f "$rain" ]; then
  printf '%s\n' "$rain" > rain_path.txt
else
  echo "cannot open rainfall file $rain" >&2
fi
"#;

fn install_engine(dir: &Path, body: &str) -> PathBuf {
    let path = dir.join("gdsimsapp");
    fs::write(&path, body).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}

fn small_set(num_runs: u32, max_t: u32) -> ParamSet {
    let mut set = ParamSet::default();
    set.main.num_runs = num_runs;
    set.main.max_t = max_t;
    set.main.driver_start = 5;
    set.advanced.rec_start = 0;
    set.advanced.rec_end = max_t;
    set.advanced.rec_interval_local = 5;
    set
}

#[derive(Default)]
struct Collector {
    progress: Vec<ProgressState>,
    finished: Vec<PathBuf>,
    failed: Vec<String>,
    aborted: usize,
}

impl RunObserver for Collector {
    fn progress(&mut self, state: &ProgressState) {
        self.progress.push(*state);
    }
    fn run_finished(&mut self, run_dir: &Path) {
        self.finished.push(run_dir.to_path_buf());
    }
    fn run_failed(&mut self, message: &str) {
        self.failed.push(message.to_string());
    }
    fn run_aborted(&mut self) {
        self.aborted += 1;
    }
}

#[tokio::test]
async fn test_successful_run_reports_full_progress() {
    let temp = tempdir().unwrap();
    let engine = install_engine(temp.path(), WRITING_ENGINE);

    let set = small_set(1, 30);
    assert!(validate_set(&set, &ValidationOptions::default()).is_ok());
    let params = set.to_input();

    let run_dir = RunDir::create(temp.path(), Some("trial")).unwrap();
    let param_file = run_dir.write(&params).unwrap();

    let handle = launch(EngineRunner::new(&engine), &run_dir, &params, &param_file);
    assert!(handle.is_running());
    let abort = handle.abort_handle();

    let mut collector = Collector::default();
    let outcome = tokio::time::timeout(Duration::from_secs(30), handle.wait(&mut [&mut collector]))
        .await
        .unwrap()
        .unwrap();

    assert_eq!(outcome, RunOutcome::Completed);
    assert!(!abort.is_running());
    assert_eq!(collector.progress.last().map(|s| s.value), Some(31));
    assert_eq!(collector.finished, vec![run_dir.path().to_path_buf()]);
    assert!(collector.failed.is_empty());
    assert!(run_dir.output_files().join("Totals1run1.txt").exists());
}

#[tokio::test]
async fn test_progress_is_monotonic_across_replicates() {
    let temp = tempdir().unwrap();
    let engine = install_engine(temp.path(), WRITING_ENGINE);
    let params = small_set(3, 40).to_input();

    let run_dir = RunDir::create(temp.path(), Some("multi")).unwrap();
    let param_file = run_dir.write(&params).unwrap();

    let mut collector = Collector::default();
    let outcome = launch(EngineRunner::new(&engine), &run_dir, &params, &param_file)
        .wait(&mut [&mut collector])
        .await
        .unwrap();

    assert_eq!(outcome, RunOutcome::Completed);
    let values: Vec<u64> = collector.progress.iter().map(|s| s.value).collect();
    assert!(values.windows(2).all(|w| w[0] < w[1]));
    assert!(values.iter().all(|&v| v <= 3 * 41));
    assert_eq!(values.last(), Some(&(3 * 41)));
}

#[tokio::test]
async fn test_engine_receives_menu_script() {
    let temp = tempdir().unwrap();
    let engine = install_engine(temp.path(), WRITING_ENGINE);
    let rel = temp.path().join("release.txt");
    fs::write(&rel, "5\n10\n").unwrap();

    let mut set = small_set(1, 20);
    set.advanced.release_times = AuxFile::Selected(rel.clone());
    let params = set.to_input();

    let run_dir = RunDir::create(temp.path(), Some("menu")).unwrap();
    let param_file = run_dir.write(&params).unwrap();
    launch(EngineRunner::new(&engine), &run_dir, &params, &param_file)
        .wait(&mut [])
        .await
        .unwrap();

    let received = fs::read_to_string(run_dir.path().join("received.txt")).unwrap();
    assert_eq!(
        received,
        format!(
            "100\n{}\ny\ny\n1\nt\n2\nr\n5\n{}\n0\n",
            param_file.display(),
            rel.display()
        )
    );
    assert_eq!(
        fs::read_to_string(run_dir.path().join("rel_times.txt")).unwrap(),
        "5\n10\n"
    );
}

#[tokio::test]
async fn test_abort_stops_run_without_finishing() {
    let temp = tempdir().unwrap();
    let engine = install_engine(temp.path(), SLEEPING_ENGINE);
    let params = small_set(1, 100).to_input();

    let run_dir = RunDir::create(temp.path(), Some("aborted")).unwrap();
    let param_file = run_dir.write(&params).unwrap();

    let mut handle = launch(EngineRunner::new(&engine), &run_dir, &params, &param_file);
    let first = handle.next_event().await;
    assert!(matches!(first, Some(RunEvent::Started { total: 101, .. })));

    tokio::time::sleep(Duration::from_millis(200)).await;
    handle.abort();

    let abort = handle.abort_handle();
    let mut collector = Collector::default();
    let outcome = tokio::time::timeout(Duration::from_secs(10), handle.wait(&mut [&mut collector]))
        .await
        .expect("abort should finish within the bounded wait")
        .unwrap();

    assert_eq!(outcome, RunOutcome::Aborted);
    assert!(!abort.is_running());
    assert_eq!(collector.aborted, 1);
    assert!(collector.finished.is_empty());
}

#[tokio::test]
async fn test_stderr_fails_run() {
    let temp = tempdir().unwrap();
    let engine = install_engine(temp.path(), FAILING_ENGINE);
    let params = small_set(1, 10).to_input();

    let run_dir = RunDir::create(temp.path(), Some("failed")).unwrap();
    let param_file = run_dir.write(&params).unwrap();

    let mut collector = Collector::default();
    let outcome = launch(EngineRunner::new(&engine), &run_dir, &params, &param_file)
        .wait(&mut [&mut collector])
        .await
        .unwrap();

    assert_eq!(
        outcome,
        RunOutcome::Failed("Error: bad parameter file\n".to_string())
    );
    assert_eq!(collector.failed, vec!["Error: bad parameter file\n"]);
    assert!(collector.finished.is_empty());
}

async fn run_with_engine(body: &str, name: &str) -> (RunOutcome, Collector) {
    let temp = tempdir().unwrap();
    let engine = install_engine(temp.path(), body);
    let params = small_set(1, 10).to_input();

    let run_dir = RunDir::create(temp.path(), Some(name)).unwrap();
    let param_file = run_dir.write(&params).unwrap();

    let mut collector = Collector::default();
    let outcome = launch(EngineRunner::new(&engine), &run_dir, &params, &param_file)
        .wait(&mut [&mut collector])
        .await
        .unwrap();
    (outcome, collector)
}

#[tokio::test]
async fn test_whitespace_only_stderr_fails_run() {
    let (outcome, collector) =
        run_with_engine("#!/bin/sh\ncat > /dev/null\nprintf '\\n' >&2\n", "blank").await;

    assert_eq!(outcome, RunOutcome::Failed("\n".to_string()));
    assert_eq!(collector.failed, vec!["\n"]);
    assert!(collector.finished.is_empty());
}

#[tokio::test]
async fn test_nonzero_exit_with_empty_stderr_fails_run() {
    let (outcome, collector) =
        run_with_engine("#!/bin/sh\ncat > /dev/null\nexit 3\n", "exit3").await;

    assert!(matches!(outcome, RunOutcome::Failed(_)), "{outcome:?}");
    assert_eq!(collector.failed.len(), 1);
    assert!(collector.finished.is_empty());
}

#[tokio::test]
async fn test_relative_rainfall_path_reaches_engine() {
    let temp = tempdir().unwrap();
    let engine = install_engine(temp.path(), RAINFALL_ENGINE);

    // Created under the test's working directory so the path stays relative.
    let inputs = tempfile::tempdir_in(".").unwrap();
    let rain = inputs.path().join("rain.txt");
    assert!(rain.is_relative());
    fs::write(&rain, "0.5\n0.7\n").unwrap();

    let mut set = small_set(1, 10);
    set.advanced.rainfall = AuxFile::Selected(rain.clone());
    let params = set.to_input();

    let run_dir = RunDir::create(temp.path(), Some("relative")).unwrap();
    let param_file = run_dir.write(&params).unwrap();

    let mut collector = Collector::default();
    let outcome = launch(EngineRunner::new(&engine), &run_dir, &params, &param_file)
        .wait(&mut [&mut collector])
        .await
        .unwrap();

    assert_eq!(outcome, RunOutcome::Completed, "{:?}", collector.failed);
    let received = fs::read_to_string(run_dir.path().join("rain_path.txt")).unwrap();
    assert_eq!(
        received.trim_end(),
        std::path::absolute(&rain).unwrap().display().to_string()
    );
}
