use anyhow::{Context, Result};
use gdsims_analysis::{DataKind, PlotWorkspace};
use gdsims_sim::engine::{locate_engine, EngineRunner, RunOutcome, ENGINE_ENV};
use gdsims_sim::simulation::{launch, ProgressState, RunObserver};
use gdsims_sim::storage::RunDir;
use gdsims_sim::validation::{validate_set, ValidationOptions};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;

use crate::args::RunArgs;
use crate::printing::{print_parameters, print_report};
use crate::utils::load_param_set;

/// Drives an indicatif bar from run events.
struct ProgressObserver {
    name: String,
    enabled: bool,
    initial: ProgressState,
    bar: Option<ProgressBar>,
}

impl ProgressObserver {
    fn new(name: &str, enabled: bool, initial: ProgressState) -> Self {
        Self {
            name: name.to_string(),
            enabled,
            initial,
            bar: None,
        }
    }

    fn clear(&mut self) {
        if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
        }
    }
}

impl RunObserver for ProgressObserver {
    fn run_started(&mut self, _run_dir: &Path, total: u64) {
        if !self.enabled {
            return;
        }
        let bar = ProgressBar::new(total);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );
        if let Some(line) = self.initial.status_line(&self.name) {
            bar.set_message(line);
        }
        self.bar = Some(bar);
    }

    fn progress(&mut self, state: &ProgressState) {
        if let Some(bar) = &self.bar {
            bar.set_position(state.value);
            if let Some(line) = state.status_line(&self.name) {
                bar.set_message(line);
            }
        }
    }

    fn run_finished(&mut self, _run_dir: &Path) {
        if let Some(bar) = self.bar.take() {
            bar.finish_with_message("Done");
        }
    }

    fn run_failed(&mut self, _message: &str) {
        self.clear();
    }

    fn run_aborted(&mut self) {
        self.clear();
    }
}

pub fn run_simulation(args: &RunArgs) -> Result<()> {
    println!("🧬 GDSiMS - Running Simulation");
    println!("============================================\n");

    let set = load_param_set(&args.source)?;
    println!("Configuration:");
    print_parameters(&set);

    let options = ValidationOptions {
        strict_release_times: args.source.strict_release_times,
    };
    if !print_report(&validate_set(&set, &options)) {
        anyhow::bail!("Parameters are invalid; nothing was run");
    }

    let engine = locate_engine(args.engine.as_deref()).with_context(|| {
        format!("Cannot find the simulation engine. Pass --engine or set {ENGINE_ENV}.")
    })?;
    tracing::debug!(engine = %engine.display(), "Using engine");

    let params = set.to_input();
    let parent = args.output_dir.clone().unwrap_or_default();
    let run_dir = RunDir::create(&parent, args.name.as_deref())?;
    let param_file = run_dir
        .write(&params)
        .with_context(|| format!("Failed to write run inputs to {}", run_dir.path().display()))?;
    println!("\n📂 Run directory: {}", run_dir.path().display());
    println!(
        "Running {} replicate(s) of {} days...",
        params.num_runs, params.max_t
    );

    let rt = tokio::runtime::Runtime::new().context("Failed to create Tokio runtime")?;
    let mut workspace = PlotWorkspace::new();

    let outcome = rt.block_on(async {
        let handle = launch(EngineRunner::new(&engine), &run_dir, &params, &param_file);
        let abort = handle.abort_handle();
        let ctrl_c = tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                abort.abort();
            }
        });

        let mut progress = ProgressObserver::new(
            handle.name(),
            !args.no_progress,
            ProgressState::new(params.max_t, params.num_runs),
        );
        let mut observers: [&mut dyn RunObserver; 2] = [&mut progress, &mut workspace];
        let outcome = handle.wait(&mut observers).await;
        ctrl_c.abort();
        outcome
    })?;

    match outcome {
        RunOutcome::Completed => {
            println!("\n✓ Simulation complete!");
            println!("  Outputs: {}", run_dir.output_files().display());
            let runs = workspace.run_labels(DataKind::Totals);
            if runs.is_empty() {
                println!("⚠️  No plottable output files were found");
            } else {
                println!("  Plottable runs: {}", runs.join(", "));
                println!(
                    "\n💡 Use 'gdsims plot totals {} --run 1' to plot the results.",
                    run_dir.path().display()
                );
            }
            Ok(())
        }
        RunOutcome::Failed(message) => {
            anyhow::bail!("The simulation engine reported an error:\n{}", message.trim())
        }
        RunOutcome::Aborted => {
            println!("\n⏹️  Simulation aborted");
            println!("  Partial outputs are left in {}", run_dir.path().display());
            Ok(())
        }
    }
}
