//! Per-patch drive allele frequency from a `LocalData` file.
//!
//! The file holds one block of rows per recorded day, one row per recorded
//! patch, in the same patch order as the `CoordinateList` file.

use super::table::Table;
use super::totals::GenotypeCounts;
use crate::errors::DataFileError;
use gdsims_sim::InputParams;
use std::path::{Path, PathBuf};

/// Frequency value marking a patch with no individuals.
pub const NO_POPULATION: f64 = -2.0;

/// Frequency value marking a patch of only wild-type (WW) individuals.
pub const ALL_WILD: f64 = -0.5;

/// Drive allele frequency `(WD + 2*DD + DR) / (2*total)` for one patch, or
/// one of the sentinels [`NO_POPULATION`] and [`ALL_WILD`].
pub fn drive_allele_frequency(counts: &GenotypeCounts) -> f64 {
    let [ww, wd, dd, _wr, _rr, dr] = *counts;
    let total: f64 = counts.iter().sum();
    if total == 0.0 {
        NO_POPULATION
    } else if total == ww {
        ALL_WILD
    } else {
        (wd + 2.0 * dd + dr) / (2.0 * total)
    }
}

/// Number of local recording frames implied by the recording window.
pub fn frames_from_params(params: &InputParams) -> usize {
    if params.rec_interval_local == 0 || params.rec_end < params.rec_start {
        return 0;
    }
    ((params.rec_end - params.rec_start) / params.rec_interval_local) as usize + 1
}

/// One recorded day.
#[derive(Debug, Clone, PartialEq)]
pub struct LocalFrame {
    pub day: u32,
    /// Per patch, in patch order.
    pub frequencies: Vec<f64>,
}

#[derive(Debug, Clone)]
pub struct LocalData {
    path: PathBuf,
    patches: usize,
    days: Vec<f64>,
    counts: Vec<GenotypeCounts>,
}

impl LocalData {
    /// Read `path`, which records `patches` patches per day.
    pub fn read(path: &Path, patches: usize) -> Result<Self, DataFileError> {
        Self::from_table(&Table::read(path, 8)?, path, patches)
    }

    pub fn from_table(table: &Table, path: &Path, patches: usize) -> Result<Self, DataFileError> {
        if patches == 0 || table.len() % patches != 0 {
            return Err(DataFileError::Ragged {
                path: path.to_path_buf(),
                rows: table.len(),
                patches,
            });
        }
        let mut days = Vec::with_capacity(table.len());
        let mut counts = Vec::with_capacity(table.len());
        for row in table.rows() {
            days.push(row[0]);
            let mut c = [0.0; 6];
            c.copy_from_slice(&row[2..8]);
            counts.push(c);
        }
        Ok(Self {
            path: path.to_path_buf(),
            patches,
            days,
            counts,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn patches(&self) -> usize {
        self.patches
    }

    pub fn frame_count(&self) -> usize {
        self.days.len() / self.patches
    }

    /// Simulated day of frame `t`.
    pub fn day(&self, t: usize) -> Result<u32, DataFileError> {
        self.check(t)?;
        Ok(self.days[t * self.patches] as u32)
    }

    pub fn frame(&self, t: usize) -> Result<LocalFrame, DataFileError> {
        self.check(t)?;
        let block = &self.counts[t * self.patches..(t + 1) * self.patches];
        Ok(LocalFrame {
            day: self.days[t * self.patches] as u32,
            frequencies: block.iter().map(drive_allele_frequency).collect(),
        })
    }

    fn check(&self, t: usize) -> Result<(), DataFileError> {
        let frames = self.frame_count();
        if t < frames {
            Ok(())
        } else {
            Err(DataFileError::NoSuchFrame { frame: t, frames })
        }
    }
}
