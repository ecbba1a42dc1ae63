use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;
use tempfile::tempdir;

fn gdsims() -> Command {
    let mut cmd = Command::cargo_bin("gdsims").unwrap();
    cmd.env_remove("GDSIMS_ENGINE").env_remove("RUST_LOG");
    cmd
}

/// Write a small, valid configuration to `path`.
fn init_small(path: &Path) {
    gdsims()
        .args(["init", "--num-runs", "1", "--max-t", "30", "--num-pat", "3"])
        .args(["--driver-start", "5", "--rec-start", "0", "--rec-end", "30"])
        .args(["--rec-interval-local", "5", "--output"])
        .arg(path)
        .assert()
        .success();
}

#[test]
fn test_presets_are_listed() {
    gdsims()
        .arg("presets")
        .assert()
        .success()
        .stdout(predicate::str::contains("low-fitness-cost"))
        .stdout(predicate::str::contains("High dispersal (disp_rate = 0.05)"));
}

#[test]
fn test_init_writes_config() {
    let temp = tempdir().unwrap();
    let config = temp.path().join("params.json");

    gdsims()
        .arg("init")
        .arg("--output")
        .arg(&config)
        .args(["--num-runs", "3", "--max-t", "400"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Replicates: 3"))
        .stdout(predicate::str::contains("Days: 400"))
        .stdout(predicate::str::contains("Parameters are valid"));

    let saved = gdsims_sim::ParamSet::from_json(&std::fs::read_to_string(&config).unwrap()).unwrap();
    assert_eq!(saved.main.num_runs, 3);
    assert_eq!(saved.main.max_t, 400);
}

#[test]
fn test_init_from_preset() {
    let temp = tempdir().unwrap();
    let config = temp.path().join("params.json");

    gdsims()
        .args(["init", "--preset", "high-fitness-cost", "--output"])
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("Somatic Cas9 fitness cost: 0.7"));
}

#[test]
fn test_init_refuses_to_overwrite() {
    let temp = tempdir().unwrap();
    let config = temp.path().join("params.json");
    init_small(&config);

    gdsims()
        .arg("init")
        .arg("--output")
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));

    gdsims()
        .args(["init", "--force", "--output"])
        .arg(&config)
        .assert()
        .success();
}

#[test]
fn test_validate_accepts_valid_config() {
    let temp = tempdir().unwrap();
    let config = temp.path().join("params.json");
    init_small(&config);

    gdsims()
        .arg("validate")
        .arg("--config")
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("Parameters are valid"));
}

#[test]
fn test_validate_reports_every_error() {
    let temp = tempdir().unwrap();
    let config = temp.path().join("params.json");

    gdsims()
        .args(["init", "--mu-a", "0", "--rec-start", "300", "--rec-end", "299"])
        .arg("--output")
        .arg(&config)
        .assert()
        .success();

    gdsims()
        .arg("validate")
        .arg("--config")
        .arg(&config)
        .assert()
        .failure()
        .stdout(predicate::str::contains("mu_a = "))
        .stdout(predicate::str::contains(
            "rec_end must be equal to or larger than rec_start.",
        ))
        .stdout(predicate::str::contains("2 error(s) found"));
}

#[test]
fn test_validate_missing_config() {
    let temp = tempdir().unwrap();
    gdsims()
        .arg("validate")
        .arg("--config")
        .arg(temp.path().join("missing.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Did you run 'gdsims init' first?"));
}

#[test]
fn test_validate_unknown_preset() {
    gdsims()
        .args(["validate", "--preset", "no-such-preset"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown preset 'no-such-preset'"));
}

#[test]
fn test_setup_with_defaults() {
    let temp = tempdir().unwrap();
    let config = temp.path().join("wizard.json");

    gdsims()
        .args(["setup", "--defaults", "--output"])
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("Setup Wizard"))
        .stdout(predicate::str::contains("Configuration saved"));

    assert!(config.exists());
}

#[test]
fn test_run_without_engine_fails() {
    let temp = tempdir().unwrap();

    gdsims()
        .args(["run", "--preset", "1", "--engine"])
        .arg(temp.path().join("no-engine"))
        .arg("--output-dir")
        .arg(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Cannot find the simulation engine"));
}

#[test]
fn test_plot_without_outputs_fails() {
    let temp = tempdir().unwrap();

    gdsims()
        .args(["plot", "totals"])
        .arg(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Cannot plot"));
}

#[test]
fn test_plot_rejects_bad_run_label() {
    let temp = tempdir().unwrap();

    gdsims()
        .args(["plot", "coords", "--run", "first"])
        .arg(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("is not a run number"));
}

#[cfg(unix)]
mod engine {
    use super::*;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;
    use std::path::PathBuf;

    /// Writes totals, coordinates and local data for every replicate.
    const ENGINE: &str = r#"#!/bin/sh
params=$(sed -n 2p)
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
    i=0
    while [ "$i" -lt "$num_pat" ]; do
      printf '%s %s 10 0 0 0 0 0\n' "$day" "$i" >> "$l"
      i=$((i + 1))
    done
    day=$((day + interval))
  done
  run=$((run + 1))
done
"#;

    const FAILING_ENGINE: &str = "#!/bin/sh\ncat > /dev/null\necho 'Error: bad parameter file' >&2\n";

    fn install(dir: &Path, body: &str) -> PathBuf {
        let path = dir.join("gdsimsapp");
        fs::write(&path, body).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    #[test]
    fn test_run_then_inspect() {
        let temp = tempdir().unwrap();
        let engine = install(temp.path(), ENGINE);
        let config = temp.path().join("params.json");
        init_small(&config);

        gdsims()
            .arg("run")
            .arg("--config")
            .arg(&config)
            .arg("--output-dir")
            .arg(temp.path())
            .args(["--name", "trial", "--no-progress"])
            .env("GDSIMS_ENGINE", &engine)
            .assert()
            .success()
            .stdout(predicate::str::contains("Simulation complete!"))
            .stdout(predicate::str::contains("Plottable runs: Run 1"));

        let run_dir = temp.path().join("trial");
        assert!(run_dir.join("params.txt").exists());
        assert!(run_dir.join("paramsInfo.csv").exists());

        gdsims()
            .arg("info")
            .arg(&run_dir)
            .assert()
            .success()
            .stdout(predicate::str::contains("Run: trial"))
            .stdout(predicate::str::contains(
                "Run 1: totals, coordinate list, local data",
            ));

        gdsims()
            .args(["plot", "local", "--interval", "0"])
            .arg(&run_dir)
            .assert()
            .failure()
            .stderr(predicate::str::contains(
                "Animation interval must be between 1 and 10000 ms",
            ));

        gdsims()
            .args(["plot", "totals", "--run", "Run 2"])
            .arg(&run_dir)
            .assert()
            .failure();

        // Reusing a run directory is refused.
        gdsims()
            .arg("run")
            .arg("--config")
            .arg(&config)
            .arg("--output-dir")
            .arg(temp.path())
            .args(["--name", "trial", "--no-progress", "--engine"])
            .arg(&engine)
            .assert()
            .failure()
            .stderr(predicate::str::contains("already been used"));
    }

    #[test]
    #[ignore = "requires system fonts"]
    fn test_plot_totals_svg() {
        let temp = tempdir().unwrap();
        let engine = install(temp.path(), ENGINE);
        let config = temp.path().join("params.json");
        init_small(&config);

        gdsims()
            .arg("run")
            .arg("--config")
            .arg(&config)
            .arg("--output-dir")
            .arg(temp.path())
            .args(["--name", "plots", "--no-progress", "--engine"])
            .arg(&engine)
            .assert()
            .success();

        let svg = temp.path().join("totals.svg");
        gdsims()
            .args(["plot", "totals", "--lines", "WW,all"])
            .arg(temp.path().join("plots"))
            .arg("--output")
            .arg(&svg)
            .assert()
            .success()
            .stdout(predicate::str::contains("Plot saved"));
        assert!(fs::read_to_string(&svg).unwrap().contains("<svg"));
    }

    #[test]
    fn test_engine_error_fails_run() {
        let temp = tempdir().unwrap();
        let engine = install(temp.path(), FAILING_ENGINE);

        gdsims()
            .args(["run", "--preset", "1", "--no-progress", "--engine"])
            .arg(&engine)
            .arg("--output-dir")
            .arg(temp.path())
            .assert()
            .failure()
            .stderr(predicate::str::contains("Error: bad parameter file"));
    }
}
