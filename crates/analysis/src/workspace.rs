use crate::catalog::{DataKind, RunCatalog};
use crate::data::{frames_from_params, Coordinates, LocalData, TotalsSeries};
use crate::errors::DataFileError;
use gdsims_sim::simulation::RunObserver;
use gdsims_sim::storage::{read_param_file, PARAM_FILE};
use gdsims_sim::InputParams;
use std::path::{Path, PathBuf};

/// Plotting state that follows a run's lifecycle.
///
/// Plotting is disabled while a run is in progress, so no data file is read
/// while the engine may still be writing it. When a run finishes the output
/// directory is rescanned and plotting is enabled again. Aborted and failed
/// runs leave the previous state untouched.
#[derive(Debug, Default)]
pub struct PlotWorkspace {
    enabled: bool,
    run_dir: Option<PathBuf>,
    catalog: Option<RunCatalog>,
    params: Option<InputParams>,
}

impl PlotWorkspace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Workspace over a run directory whose run has already finished.
    pub fn open(run_dir: &Path) -> Result<Self, DataFileError> {
        let mut workspace = Self::new();
        workspace.load(run_dir)?;
        Ok(workspace)
    }

    fn load(&mut self, run_dir: &Path) -> Result<(), DataFileError> {
        let catalog = RunCatalog::scan(run_dir)?;
        self.params = match read_param_file(&run_dir.join(PARAM_FILE)) {
            Ok(params) => Some(params),
            Err(e) => {
                tracing::debug!("No usable parameter file in {}: {e}", run_dir.display());
                None
            }
        };
        self.run_dir = Some(run_dir.to_path_buf());
        self.catalog = Some(catalog);
        self.enabled = true;
        Ok(())
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn run_dir(&self) -> Option<&Path> {
        self.run_dir.as_deref()
    }

    pub fn params(&self) -> Option<&InputParams> {
        self.params.as_ref()
    }

    /// The catalogue, if plotting is enabled.
    pub fn catalog(&self) -> Option<&RunCatalog> {
        self.catalog.as_ref().filter(|_| self.enabled)
    }

    /// Labels of the runs with a file of `kind`; empty while disabled.
    pub fn run_labels(&self, kind: DataKind) -> Vec<String> {
        self.catalog().map(|c| c.labels(kind)).unwrap_or_default()
    }

    fn file(&self, run: u32, kind: DataKind) -> Result<&Path, DataFileError> {
        match self.catalog() {
            Some(catalog) => catalog.file(run, kind),
            None => Err(DataFileError::MissingRun {
                kind: kind.name(),
                run,
                dir: self.run_dir.clone().unwrap_or_default(),
            }),
        }
    }

    pub fn totals(&self, run: u32) -> Result<TotalsSeries, DataFileError> {
        TotalsSeries::read(self.file(run, DataKind::Totals)?)
    }

    pub fn coordinates(&self, run: u32) -> Result<Coordinates, DataFileError> {
        Coordinates::read(self.file(run, DataKind::Coordinates)?)
    }

    /// Coordinates and local data of `run`. The patch count comes from the
    /// coordinate list.
    pub fn local(&self, run: u32) -> Result<(Coordinates, LocalData), DataFileError> {
        let coords = self.coordinates(run)?;
        let local = LocalData::read(self.file(run, DataKind::Local)?, coords.len())?;
        Ok((coords, local))
    }

    /// Number of frames to offer for `local`: the recording window when the
    /// parameter file is readable, capped by what the data holds.
    pub fn frame_count(&self, local: &LocalData) -> usize {
        let in_data = local.frame_count();
        match &self.params {
            Some(params) => frames_from_params(params).min(in_data),
            None => in_data,
        }
    }
}

impl RunObserver for PlotWorkspace {
    fn run_started(&mut self, run_dir: &Path, _total: u64) {
        self.enabled = false;
        tracing::debug!(dir = %run_dir.display(), "Plotting disabled while running");
    }

    fn run_finished(&mut self, run_dir: &Path) {
        if let Err(e) = self.load(run_dir) {
            tracing::warn!("Cannot plot results of {}: {e}", run_dir.display());
        }
    }
}
