mod args;
mod commands;
pub mod defaults;
mod printing;
mod utils;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use args::{InitArgs, ParamSource, PlotCommand, RunArgs};
use commands::{info, init, plot, presets, run, setup, validate};

/// GDSiMS: gene drive simulator front-end
///
/// Prepares parameter sets for the GDSiMS engine, runs it, and plots the
/// population data it records.
#[derive(Parser, Debug)]
#[command(name = "gdsims")]
#[command(author, version, about = "Runs and plots gene drive spread simulations", long_about = None)]
struct Cli {
    /// Increase log output (-v info, -vv debug); RUST_LOG takes precedence
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Write a parameter configuration file.
    ///
    /// Starts from the defaults (or a preset) and applies any parameter flags.
    /// Nothing is run.
    Init(Box<InitArgs>),

    /// Setup Wizard: Interactive guide to create a parameter set.
    ///
    /// Prompts for the main parameters, then optionally the advanced ones.
    Setup {
        /// Skip interactive prompts and use defaults
        #[arg(long)]
        defaults: bool,

        /// Output configuration file
        #[arg(short, long, default_value = defaults::CONFIG_FILE)]
        output: PathBuf,

        /// Start a run with the new parameters once saved
        #[arg(long)]
        run: bool,
    },

    /// Check a parameter set without running it.
    Validate(ParamSource),

    /// Run the engine on a parameter set and track its progress.
    ///
    /// Creates a run directory, writes params.txt there and feeds the engine
    /// its menu answers. Press Ctrl-C to abort.
    Run(Box<RunArgs>),

    /// List the built-in parameter sets.
    Presets,

    /// Info: Show the parameters and outputs of a run directory.
    Info {
        /// Run directory
        run_dir: PathBuf,
    },

    /// Plot data recorded by a finished run.
    Plot {
        #[command(subcommand)]
        command: PlotCommand,
    },
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Init(args) => {
            init::init_config(&args)?;
        }
        Commands::Setup {
            defaults,
            output,
            run,
        } => {
            setup::setup_wizard(defaults, &output, run)?;
        }
        Commands::Validate(source) => {
            validate::validate_config(&source)?;
        }
        Commands::Run(args) => {
            run::run_simulation(&args)?;
        }
        Commands::Presets => {
            presets::list_presets();
        }
        Commands::Info { run_dir } => {
            info::show_info(&run_dir)?;
        }
        Commands::Plot { command } => {
            plot::plot(&command)?;
        }
    }

    Ok(())
}
