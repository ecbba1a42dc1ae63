use super::{BoundaryType, DispersalType};
use crate::validation::{self, ValidationOptions, ValidationReport};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Selection state of an optional auxiliary input file.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AuxFile {
    /// The option is switched off.
    #[default]
    Disabled,
    /// The option is on but no file has been chosen yet.
    Unselected,
    Selected(PathBuf),
}

impl AuxFile {
    pub fn is_enabled(&self) -> bool {
        !matches!(self, Self::Disabled)
    }

    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            Self::Selected(path) => Some(path),
            _ => None,
        }
    }

    /// Build a selection from an optional path; an empty path counts as
    /// "enabled but unselected".
    pub fn from_path(path: Option<&Path>) -> Self {
        match path {
            None => Self::Disabled,
            Some(p) if p.as_os_str().is_empty() => Self::Unselected,
            Some(p) => Self::Selected(p.to_path_buf()),
        }
    }
}

/// Fields edited on the advanced form, with the option flags that gate them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdvParams {
    pub rec_start: u32,
    pub rec_end: u32,
    pub rec_interval_global: u32,
    pub rec_interval_local: u32,
    pub rec_sites_freq: u32,

    pub mu_j: f64,
    pub mu_a: f64,
    pub beta: f64,
    pub theta: f64,
    pub comp_power: f64,
    pub min_dev: u32,

    pub disp_rate: f64,
    pub max_disp: f64,
    pub dispersal_type: DispersalType,

    /// Gates psi, mu_aes and the hide/wake window as a unit.
    pub aestivation: bool,
    pub psi: f64,
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
    pub rainfall: AuxFile,

    pub boundary_type: BoundaryType,
    /// Only meaningful for [`BoundaryType::Edge`].
    pub coords: AuxFile,

    pub gamma: f64,
    pub release_times: AuxFile,
}

impl Default for AdvParams {
    fn default() -> Self {
        Self {
            rec_start: 200,
            rec_end: 1500,
            rec_interval_global: 1,
            rec_interval_local: 365,
            rec_sites_freq: 1,
            mu_j: 0.05,
            mu_a: 0.125,
            beta: 100.0,
            theta: 9.0,
            comp_power: 0.066666667,
            min_dev: 10,
            disp_rate: 0.01,
            max_disp: 0.2,
            dispersal_type: DispersalType::Radial,
            aestivation: false,
            psi: 0.0,
            mu_aes: 0.0,
            t_hide1: 0,
            t_hide2: 0,
            t_wake1: 0,
            t_wake2: 0,
            alpha0_mean: 100_000.0,
            alpha0_variance: 0.0,
            alpha1: 0.0,
            amp: 0.0,
            resp: 0.0,
            rainfall: AuxFile::Disabled,
            boundary_type: BoundaryType::Toroid,
            coords: AuxFile::Disabled,
            gamma: 0.025,
            release_times: AuxFile::Disabled,
        }
    }
}

impl AdvParams {
    /// Change the boundary type. Any coordinates selection is dropped, since
    /// it only applies to the boundary it was chosen for.
    pub fn set_boundary_type(&mut self, boundary_type: BoundaryType) {
        self.coords = AuxFile::Disabled;
        self.boundary_type = boundary_type;
    }

    /// Switch aestivation on or off. Switching it off zeroes its fields.
    pub fn set_aestivation(&mut self, enabled: bool) {
        self.aestivation = enabled;
        if !enabled {
            self.psi = 0.0;
            self.mu_aes = 0.0;
            self.t_hide1 = 0;
            self.t_hide2 = 0;
            self.t_wake1 = 0;
            self.t_wake2 = 0;
        }
    }
}

/// Edit session over [`AdvParams`].
///
/// Edits go to a draft. [`apply`](Self::apply) commits the draft only when it
/// validates, and [`close`](Self::close) drops uncommitted edits.
#[derive(Debug, Clone, Default)]
pub struct AdvancedForm {
    applied: AdvParams,
    draft: AdvParams,
}

impl AdvancedForm {
    pub fn new(applied: AdvParams) -> Self {
        Self {
            draft: applied.clone(),
            applied,
        }
    }

    /// Last applied values.
    pub fn applied(&self) -> &AdvParams {
        &self.applied
    }

    pub fn draft(&self) -> &AdvParams {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut AdvParams {
        &mut self.draft
    }

    /// Whether the draft holds edits that have not been applied.
    pub fn has_changes(&self) -> bool {
        self.draft != self.applied
    }

    /// Validate the draft against the main-form `max_t` and `num_pat`, and
    /// commit it if there are no errors. Warnings do not prevent the commit.
    pub fn apply(
        &mut self,
        max_t: u32,
        num_pat: u32,
        options: &ValidationOptions,
    ) -> ValidationReport {
        let report = validation::validate_advanced(&self.draft, max_t, num_pat, options);
        if report.is_ok() {
            self.applied = self.draft.clone();
            tracing::debug!(warnings = report.warnings().count(), "Advanced parameters applied");
        }
        report
    }

    /// Discard the draft and revert to the last applied values.
    pub fn close(&mut self) {
        self.draft = self.applied.clone();
    }

    pub fn into_applied(self) -> AdvParams {
        self.applied
    }
}
