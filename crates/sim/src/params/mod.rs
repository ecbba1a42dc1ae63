//! Simulation parameters.
//!
//! [`InputParams`] is the immutable record handed to the engine for one run.
//! It is assembled from the editable form state ([`MainParams`] and
//! [`AdvParams`]) right before the run directory is written, and is never
//! modified afterwards.

mod advanced;
mod fields;
pub mod presets;

pub use advanced::{AdvParams, AdvancedForm, AuxFile};
pub use fields::{field, FieldKind, FieldSpec, ParamValue, ENGINE_FIELDS};
pub use presets::{Preset, PRESETS};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Spatial wrap-around policy for dispersal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BoundaryType {
    /// Periodic boundaries.
    #[default]
    Toroid,
    /// Bounded area; patch coordinates may be supplied explicitly.
    Edge,
}

impl BoundaryType {
    /// Single-character code sent to the engine.
    pub fn code(self) -> char {
        match self {
            Self::Toroid => 't',
            Self::Edge => 'e',
        }
    }
}

impl fmt::Display for BoundaryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Toroid => write!(f, "Toroid"),
            Self::Edge => write!(f, "Edge"),
        }
    }
}

impl FromStr for BoundaryType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "toroid" | "t" => Ok(Self::Toroid),
            "edge" | "e" => Ok(Self::Edge),
            other => Err(format!("Unknown boundary type '{other}' (expected toroid or edge)")),
        }
    }
}

/// Adult dispersal model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DispersalType {
    #[default]
    Radial,
    DistanceKernel,
}

impl DispersalType {
    /// Single-character code sent to the engine.
    pub fn code(self) -> char {
        match self {
            Self::Radial => 'r',
            Self::DistanceKernel => 'd',
        }
    }
}

impl fmt::Display for DispersalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Radial => write!(f, "Radial"),
            Self::DistanceKernel => write!(f, "Distance kernel"),
        }
    }
}

impl FromStr for DispersalType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['-', '_'], " ").as_str() {
            "radial" | "r" => Ok(Self::Radial),
            "distance kernel" | "kernel" | "d" => Ok(Self::DistanceKernel),
            other => Err(format!(
                "Unknown dispersal type '{other}' (expected radial or distance-kernel)"
            )),
        }
    }
}

/// Engine options that are passed through the stdin menu session rather than
/// the parameter file.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ModelOptions {
    pub boundary_type: BoundaryType,
    pub dispersal_type: DispersalType,
    /// Daily rainfall series (365 or `max_t` values).
    pub rainfall_file: Option<PathBuf>,
    /// Patch coordinates (`x y y|n` per line, `num_pat` lines).
    pub coords_file: Option<PathBuf>,
    /// Release days, one integer per line.
    pub release_times_file: Option<PathBuf>,
}

/// Complete input for one engine run.
///
/// Field order matches the line order of `params.txt`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputParams {
    /// Number of simulation replicates to run.
    pub num_runs: u32,
    /// Maximum simulated time (days).
    pub max_t: u32,
    /// Number of population sites.
    pub num_pat: u32,
    /// Juvenile density-independent mortality rate per day.
    pub mu_j: f64,
    /// Adult mortality rate per day.
    pub mu_a: f64,
    /// Mating rate parameter.
    pub beta: f64,
    /// Average egg laying rate of wild-type females (eggs per day).
    pub theta: f64,
    /// Juvenile survival exponent.
    pub comp_power: f64,
    /// Minimum juvenile development time (days).
    pub min_dev: u32,
    /// Rate of r2 allele formation from W/D meiosis.
    pub gamma: f64,
    /// Somatic Cas9 expression fitness cost.
    pub xi: f64,
    /// Homing rate in females.
    pub e: f64,
    /// Day on which drive releases start.
    pub driver_start: u32,
    /// WD males per release.
    pub num_driver_m: u32,
    /// Release sites per year.
    pub num_driver_sites: u32,
    pub disp_rate: f64,
    /// Maximum distance at which two sites are connected.
    pub max_disp: f64,
    /// Aestivation rate.
    pub psi: f64,
    /// Aestivation mortality rate.
    pub mu_aes: f64,
    pub t_hide1: u32,
    pub t_hide2: u32,
    pub t_wake1: u32,
    pub t_wake2: u32,
    pub alpha0_mean: f64,
    pub alpha0_variance: f64,
    pub alpha1: f64,
    pub amp: f64,
    pub resp: f64,
    /// First day of the recording window (inclusive).
    pub rec_start: u32,
    /// Last day of the recording window (inclusive).
    pub rec_end: u32,
    pub rec_interval_global: u32,
    pub rec_interval_local: u32,
    /// 1 records every site, 10 records one site in ten.
    pub rec_sites_freq: u32,
    /// Label used in output file names (`Totals<label>run<N>.txt`).
    pub set_label: u32,
    #[serde(default)]
    pub model: ModelOptions,
}

impl InputParams {
    /// Total progress units for a run: one per simulated day per replicate,
    /// including the initialisation day.
    pub fn total_steps(&self) -> u64 {
        u64::from(self.num_runs) * (u64::from(self.max_t) + 1)
    }

    /// File names of the per-replicate totals files the engine writes, in
    /// replicate order.
    pub fn totals_file_names(&self) -> Vec<String> {
        (1..=self.num_runs)
            .map(|run| format!("Totals{}run{}.txt", self.set_label, run))
            .collect()
    }
}

impl Default for InputParams {
    fn default() -> Self {
        ParamSet::default().to_input()
    }
}

/// Fields edited on the main form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MainParams {
    pub num_runs: u32,
    pub max_t: u32,
    pub num_pat: u32,
    pub xi: f64,
    pub e: f64,
    pub driver_start: u32,
    pub num_driver_m: u32,
    pub num_driver_sites: u32,
    pub set_label: u32,
}

impl Default for MainParams {
    fn default() -> Self {
        Self {
            num_runs: 1,
            max_t: 1500,
            num_pat: 100,
            xi: 0.5,
            e: 0.95,
            driver_start: 200,
            num_driver_m: 1000,
            num_driver_sites: 1,
            set_label: 1,
        }
    }
}

/// Serialisable form state: everything needed to assemble an [`InputParams`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ParamSet {
    pub main: MainParams,
    pub advanced: AdvParams,
}

impl ParamSet {
    /// Assemble the immutable run record from the current form state.
    ///
    /// Fields gated by a disabled advanced option are zeroed, and auxiliary
    /// files are only passed on when selected.
    pub fn to_input(&self) -> InputParams {
        let m = &self.main;
        let a = &self.advanced;
        let (psi, mu_aes, t_hide1, t_hide2, t_wake1, t_wake2) = if a.aestivation {
            (a.psi, a.mu_aes, a.t_hide1, a.t_hide2, a.t_wake1, a.t_wake2)
        } else {
            (0.0, 0.0, 0, 0, 0, 0)
        };

        InputParams {
            num_runs: m.num_runs,
            max_t: m.max_t,
            num_pat: m.num_pat,
            mu_j: a.mu_j,
            mu_a: a.mu_a,
            beta: a.beta,
            theta: a.theta,
            comp_power: a.comp_power,
            min_dev: a.min_dev,
            gamma: a.gamma,
            xi: m.xi,
            e: m.e,
            driver_start: m.driver_start,
            num_driver_m: m.num_driver_m,
            num_driver_sites: m.num_driver_sites,
            disp_rate: a.disp_rate,
            max_disp: a.max_disp,
            psi,
            mu_aes,
            t_hide1,
            t_hide2,
            t_wake1,
            t_wake2,
            alpha0_mean: a.alpha0_mean,
            alpha0_variance: a.alpha0_variance,
            alpha1: a.alpha1,
            amp: a.amp,
            resp: a.resp,
            rec_start: a.rec_start,
            rec_end: a.rec_end,
            rec_interval_global: a.rec_interval_global,
            rec_interval_local: a.rec_interval_local,
            rec_sites_freq: a.rec_sites_freq,
            set_label: m.set_label,
            model: ModelOptions {
                boundary_type: a.boundary_type,
                dispersal_type: a.dispersal_type,
                rainfall_file: a.rainfall.path().cloned(),
                coords_file: a.coords.path().cloned(),
                release_times_file: a.release_times.path().cloned(),
            },
        }
    }

    /// Load a form state saved as JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
