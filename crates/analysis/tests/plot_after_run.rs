//! A stub engine run followed by reading its outputs for plotting.
#![cfg(unix)]

use gdsims_analysis::data::{TotalsLine, ALL_WILD};
use gdsims_analysis::plot::LocalAnimation;
use gdsims_analysis::{DataKind, PlotWorkspace};
use gdsims_sim::engine::{EngineRunner, RunOutcome};
use gdsims_sim::params::ParamSet;
use gdsims_sim::simulation::launch;
use gdsims_sim::storage::RunDir;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

/// Writes totals, coordinates and local data for every replicate.
const ENGINE: &str = r#"#!/bin/sh
params=$(sed -n 2p)
cat > /dev/null
p() { sed -n "$1p" "$params"; }
num_runs=$(p 1); max_t=$(p 2); num_pat=$(p 3)
rec_start=$(p 29); rec_end=$(p 30); interval=$(p 32); label=$(p 34)
mkdir -p output_files
run=1
while [ "$run" -le "$num_runs" ]; do
  t="output_files/Totals${label}run${run}.txt"
  printf 'Totals\nday WW WD DD WR RR DR\n' > "$t"
  day=0
  while [ "$day" -le "$max_t" ]; do
    printf '%s 40 30 10 10 5 5\n' "$day" >> "$t"
    day=$((day + 1))
  done
  c="output_files/CoordinateList${label}run${run}.txt"
  printf 'Coordinates\nindex x y\n' > "$c"
  i=0
  while [ "$i" -lt "$num_pat" ]; do
    printf '%s %s %s\n' "$i" "$i" "$((i * 2))" >> "$c"
    i=$((i + 1))
  done
  l="output_files/LocalData${label}run${run}.txt"
  printf 'LocalData\nday patch WW WD DD WR RR DR\n' > "$l"
  day=$rec_start
  while [ "$day" -le "$rec_end" ]; do
    printf '%s 0 5 5 0 0 0 0\n' "$day" >> "$l"
    i=1
    while [ "$i" -lt "$num_pat" ]; do
      printf '%s %s 10 0 0 0 0 0\n' "$day" "$i" >> "$l"
      i=$((i + 1))
    done
    day=$((day + interval))
  done
  run=$((run + 1))
done
"#;

fn install_engine(dir: &Path) -> PathBuf {
    let path = dir.join("gdsimsapp");
    fs::write(&path, ENGINE).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}

fn params() -> ParamSet {
    let mut set = ParamSet::default();
    set.main.num_runs = 2;
    set.main.max_t = 20;
    set.main.num_pat = 3;
    set.main.driver_start = 5;
    set.advanced.rec_start = 0;
    set.advanced.rec_end = 20;
    set.advanced.rec_interval_local = 5;
    set
}

#[tokio::test]
async fn test_finished_run_enables_plotting() {
    let temp = tempfile::tempdir().unwrap();
    let engine = install_engine(temp.path());
    let params = params().to_input();
    let run_dir = RunDir::create(temp.path(), Some("plots")).unwrap();
    let param_file = run_dir.write(&params).unwrap();

    let mut workspace = PlotWorkspace::new();
    let outcome = launch(EngineRunner::new(&engine), &run_dir, &params, &param_file)
        .wait(&mut [&mut workspace])
        .await
        .unwrap();
    assert_eq!(outcome, RunOutcome::Completed);

    assert!(workspace.is_enabled());
    assert_eq!(workspace.run_labels(DataKind::Totals), vec!["Run 1", "Run 2"]);
    assert_eq!(workspace.run_labels(DataKind::Local), vec!["Run 1", "Run 2"]);

    let totals = workspace.totals(1).unwrap();
    assert_eq!(totals.len(), 21);
    assert_eq!(totals.line(TotalsLine::All)[0], (0.0, 100.0));
    let alleles = totals.allele_frequencies();
    assert!((alleles.frequencies[3].wild - 0.80).abs() < 1e-12);

    let coords = workspace.coordinates(2).unwrap();
    assert_eq!(coords.points, vec![(0.0, 0.0), (1.0, 2.0), (2.0, 4.0)]);

    let (coords, local) = workspace.local(1).unwrap();
    assert_eq!(workspace.frame_count(&local), 5);
    let frame = local.frame(4).unwrap();
    assert_eq!(frame.day, 20);
    assert_eq!(frame.frequencies, vec![0.25, ALL_WILD, ALL_WILD]);

    let frames = workspace.frame_count(&local);
    let animation = LocalAnimation::new(coords, local, frames, "Run 1").unwrap();
    assert_eq!(animation.frame_count(), 5);
}
