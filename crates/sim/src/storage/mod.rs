//! Run directory layout and the files written before the engine starts.
//!
//! A run directory holds `params.txt` (the engine's positional input),
//! `paramsInfo.csv` (a human-readable description of the same values),
//! copies of any auxiliary input files and the engine's `output_files/`.

mod output_dir;
mod param_file;
mod params_info;

pub use output_dir::{default_run_name, RunDir};
pub use param_file::read_param_file;
pub use params_info::format_params_info;

/// Name of the positional parameter file.
pub const PARAM_FILE: &str = "params.txt";
/// Name of the parameter description CSV.
pub const PARAMS_INFO_FILE: &str = "paramsInfo.csv";
/// Subdirectory the engine writes its data files into.
pub const OUTPUT_FILES_DIR: &str = "output_files";
pub const RAINFALL_COPY: &str = "rainfall.txt";
pub const COORDS_COPY: &str = "coords.txt";
pub const RELEASE_TIMES_COPY: &str = "rel_times.txt";
