//! Shared default values for the command-line front-end.
//! Parameter defaults live in `gdsims_sim::params`; these cover files and plots.

pub const CONFIG_FILE: &str = "gdsims.json";

pub const PLOT_WIDTH: u32 = 800;
pub const PLOT_HEIGHT: u32 = 600;

pub const TOTALS_PLOT: &str = "totals.png";
pub const ALLELES_PLOT: &str = "alleles.png";
pub const COORDS_PLOT: &str = "coords.png";
pub const LOCAL_PLOT: &str = "local.png";

/// Delay between animation frames.
pub const FRAME_INTERVAL_MS: u64 = gdsims_analysis::plot::DEFAULT_INTERVAL_MS;
