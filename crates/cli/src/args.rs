use crate::defaults;
use clap::Args;
use gdsims_analysis::catalog::parse_run_label;
use gdsims_analysis::data::TotalsLine;
use gdsims_sim::engine::ENGINE_ENV;
use gdsims_sim::params::{AuxFile, BoundaryType, DispersalType, ParamSet};
use std::path::PathBuf;

/// Where the parameters of a command come from.
#[derive(Args, Debug, Clone)]
pub struct ParamSource {
    /// Parameter configuration file (JSON, written by `init` or `setup`)
    #[arg(short, long, default_value = defaults::CONFIG_FILE)]
    pub config: PathBuf,

    /// Use a built-in parameter set instead of the configuration file
    /// (index or name, see `gdsims presets`)
    #[arg(short, long)]
    pub preset: Option<String>,

    /// Treat non-integer lines in the release times file as errors
    #[arg(long)]
    pub strict_release_times: bool,
}

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Output configuration file
    #[arg(short, long, default_value = defaults::CONFIG_FILE)]
    pub output: PathBuf,

    /// Start from a built-in parameter set (index or name)
    #[arg(short, long)]
    pub preset: Option<String>,

    /// Overwrite an existing configuration file
    #[arg(long)]
    pub force: bool,

    // Main parameters
    /// Number of simulation replicates to run
    #[arg(long)]
    pub num_runs: Option<u32>,
    /// Maximum simulated time (days)
    #[arg(long)]
    pub max_t: Option<u32>,
    /// Number of population sites
    #[arg(long)]
    pub num_pat: Option<u32>,
    /// Somatic Cas9 expression fitness cost
    #[arg(long)]
    pub xi: Option<f64>,
    /// Homing rate in females
    #[arg(long)]
    pub e: Option<f64>,
    /// Day on which drive releases start
    #[arg(long)]
    pub driver_start: Option<u32>,
    /// Number of drive heterozygous (WD) male mosquitoes per release
    #[arg(long)]
    pub num_driver_m: Option<u32>,
    /// Number of release sites per year
    #[arg(long)]
    pub num_driver_sites: Option<u32>,
    /// Label used in output file names
    #[arg(long)]
    pub set_label: Option<u32>,

    // Recording
    /// First day of output recording
    #[arg(long)]
    pub rec_start: Option<u32>,
    /// Last day of output recording
    #[arg(long)]
    pub rec_end: Option<u32>,
    /// Interval for global data recording (days)
    #[arg(long)]
    pub rec_interval_global: Option<u32>,
    /// Interval for local data recording (days)
    #[arg(long)]
    pub rec_interval_local: Option<u32>,
    /// Record one site in every N
    #[arg(long)]
    pub rec_sites_freq: Option<u32>,

    // Life processes
    /// Juvenile density-independent mortality rate per day
    #[arg(long)]
    pub mu_j: Option<f64>,
    /// Adult mortality rate per day
    #[arg(long)]
    pub mu_a: Option<f64>,
    /// Mating rate parameter
    #[arg(long)]
    pub beta: Option<f64>,
    /// Egg laying rate of wild-type females (eggs per day)
    #[arg(long)]
    pub theta: Option<f64>,
    /// Juvenile survival exponent
    #[arg(long)]
    pub comp_power: Option<f64>,
    /// Minimum juvenile development time (days)
    #[arg(long)]
    pub min_dev: Option<u32>,
    /// Rate of r2 allele formation from W/D meiosis
    #[arg(long)]
    pub gamma: Option<f64>,

    // Dispersal
    /// Adult dispersal rate
    #[arg(long)]
    pub disp_rate: Option<f64>,
    /// Maximum distance at which two sites are connected
    #[arg(long)]
    pub max_disp: Option<f64>,
    /// Dispersal type: radial or distance-kernel
    #[arg(long)]
    pub dispersal_type: Option<DispersalType>,

    // Aestivation
    /// Enable aestivation (psi, mu_aes and the hide/wake window)
    #[arg(long)]
    pub aestivation: bool,
    /// Aestivation rate
    #[arg(long, requires = "aestivation")]
    pub psi: Option<f64>,
    /// Aestivation mortality rate
    #[arg(long, requires = "aestivation")]
    pub mu_aes: Option<f64>,
    /// Day of the year aestivation starts
    #[arg(long, requires = "aestivation")]
    pub t_hide1: Option<u32>,
    /// Day of the year aestivation starts ending
    #[arg(long, requires = "aestivation")]
    pub t_hide2: Option<u32>,
    /// Day of the year waking starts
    #[arg(long, requires = "aestivation")]
    pub t_wake1: Option<u32>,
    /// Day of the year waking ends
    #[arg(long, requires = "aestivation")]
    pub t_wake2: Option<u32>,

    // Seasonality
    /// Baseline contribution to carrying capacity
    #[arg(long)]
    pub alpha0_mean: Option<f64>,
    /// Variance of the baseline contribution across sites
    #[arg(long)]
    pub alpha0_variance: Option<f64>,
    /// Rainfall contribution to carrying capacity
    #[arg(long)]
    pub alpha1: Option<f64>,
    /// Amplitude of rainfall fluctuations
    #[arg(long)]
    pub amp: Option<f64>,
    /// Carrying capacity responsiveness to rainfall
    #[arg(long)]
    pub resp: Option<f64>,
    /// Daily rainfall file (365 or max_t values)
    #[arg(long)]
    pub rainfall: Option<PathBuf>,

    // Boundary and releases
    /// Boundary type: toroid or edge
    #[arg(long)]
    pub boundary_type: Option<BoundaryType>,
    /// Patch coordinates file (x y y|n per line); edge boundaries only
    #[arg(long)]
    pub coords: Option<PathBuf>,
    /// Release times file (one day per line)
    #[arg(long)]
    pub release_times: Option<PathBuf>,
}

impl InitArgs {
    /// Overlay the given flags onto `set`.
    pub fn apply(&self, set: &mut ParamSet) {
        macro_rules! overlay {
            ($source:expr => $target:expr; $($field:ident),+ $(,)?) => {
                $(if let Some(v) = $source.$field {
                    $target.$field = v;
                })+
            };
        }

        let m = &mut set.main;
        overlay!(self => m; num_runs, max_t, num_pat, xi, e, driver_start, num_driver_m, num_driver_sites, set_label);

        let a = &mut set.advanced;
        overlay!(self => a;
            rec_start, rec_end, rec_interval_global, rec_interval_local, rec_sites_freq,
            mu_j, mu_a, beta, theta, comp_power, min_dev, gamma,
            disp_rate, max_disp, dispersal_type,
            alpha0_mean, alpha0_variance, alpha1, amp, resp,
        );
        if self.aestivation {
            a.set_aestivation(true);
            overlay!(self => a; psi, mu_aes, t_hide1, t_hide2, t_wake1, t_wake2);
        }
        if let Some(boundary) = self.boundary_type {
            a.set_boundary_type(boundary);
        }
        if let Some(path) = &self.rainfall {
            a.rainfall = AuxFile::from_path(Some(path));
        }
        if let Some(path) = &self.coords {
            a.coords = AuxFile::from_path(Some(path));
        }
        if let Some(path) = &self.release_times {
            a.release_times = AuxFile::from_path(Some(path));
        }
    }
}

#[derive(Args, Debug)]
pub struct RunArgs {
    #[command(flatten)]
    pub source: ParamSource,

    /// Directory in which the run directory is created (default: current directory)
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Run directory name (default: a timestamp such as 2024_3_07_142501)
    #[arg(short = 'N', long)]
    pub name: Option<String>,

    /// Path to the simulation engine executable
    #[arg(long, env = ENGINE_ENV)]
    pub engine: Option<PathBuf>,

    /// Hide the progress bar
    #[arg(long)]
    pub no_progress: bool,
}

/// A replicate in a finished run directory.
#[derive(Args, Debug, Clone)]
pub struct PlotTarget {
    /// Run directory (the one holding params.txt and output_files/)
    pub run_dir: PathBuf,

    /// Replicate to plot ("1" or "Run 1")
    #[arg(short, long, default_value = "1", value_parser = parse_run)]
    pub run: u32,

    /// Image width in pixels
    #[arg(long, default_value_t = defaults::PLOT_WIDTH)]
    pub width: u32,

    /// Image height in pixels
    #[arg(long, default_value_t = defaults::PLOT_HEIGHT)]
    pub height: u32,
}

impl PlotTarget {
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

fn parse_run(s: &str) -> Result<u32, String> {
    parse_run_label(s).ok_or_else(|| format!("'{s}' is not a run number"))
}

#[derive(clap::Subcommand, Debug)]
pub enum PlotCommand {
    /// Total number of individuals per genotype over time
    Totals {
        #[command(flatten)]
        target: PlotTarget,

        /// Lines to draw: WW, WD, DD, WR, RR, DR, all, transmitting
        #[arg(short, long, value_delimiter = ',', default_value = "WW,WD,DD,WR,RR,DR")]
        lines: Vec<TotalsLine>,

        /// Leave out the first N recorded days (burn-in)
        #[arg(long, default_value_t = 0)]
        skip_days: usize,

        /// Output image (.png or .svg)
        #[arg(short, long, default_value = defaults::TOTALS_PLOT)]
        output: PathBuf,
    },

    /// Wild, drive and resistance allele frequencies over time
    Alleles {
        #[command(flatten)]
        target: PlotTarget,

        /// Leave out the first N recorded days (burn-in)
        #[arg(long, default_value_t = 0)]
        skip_days: usize,

        /// Output image (.png or .svg)
        #[arg(short, long, default_value = defaults::ALLELES_PLOT)]
        output: PathBuf,
    },

    /// Patch positions
    Coords {
        #[command(flatten)]
        target: PlotTarget,

        /// Output image (.png or .svg)
        #[arg(short, long, default_value = defaults::COORDS_PLOT)]
        output: PathBuf,
    },

    /// Drive allele frequency per patch on recorded days
    Local {
        #[command(flatten)]
        target: PlotTarget,

        /// Frame to draw (0 is the first recorded day)
        #[arg(short, long, default_value_t = 0, conflicts_with_all = ["play", "animate"])]
        frame: usize,

        /// Redraw the output image with each frame in turn
        #[arg(long, conflicts_with = "animate")]
        play: bool,

        /// Export every frame to an animated GIF
        #[arg(long, value_name = "GIF")]
        animate: Option<PathBuf>,

        /// Delay between frames in milliseconds (1 to 10000)
        #[arg(long, default_value_t = defaults::FRAME_INTERVAL_MS)]
        interval: u64,

        /// Output image (.png or .svg)
        #[arg(short, long, default_value = defaults::LOCAL_PLOT)]
        output: PathBuf,
    },
}

impl PlotCommand {
    pub fn target(&self) -> &PlotTarget {
        match self {
            Self::Totals { target, .. }
            | Self::Alleles { target, .. }
            | Self::Coords { target, .. }
            | Self::Local { target, .. } => target,
        }
    }
}
