//! Which runs in an output directory have plottable files.

use crate::errors::DataFileError;
use gdsims_sim::storage::OUTPUT_FILES_DIR;
use regex::Regex;
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

static RUN_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"run(\d+)").expect("valid regex"));

/// The kinds of data file the engine writes per replicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataKind {
    Totals,
    Coordinates,
    Local,
}

impl DataKind {
    pub const ALL: [DataKind; 3] = [DataKind::Totals, DataKind::Coordinates, DataKind::Local];

    /// File name prefix.
    pub fn prefix(self) -> &'static str {
        match self {
            Self::Totals => "Totals",
            Self::Coordinates => "CoordinateList",
            Self::Local => "LocalData",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Totals => "totals",
            Self::Coordinates => "coordinate list",
            Self::Local => "local data",
        }
    }

    fn of(file_name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| file_name.starts_with(kind.prefix()))
    }
}

/// Data files found for one replicate.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunFiles {
    pub run: u32,
    pub totals: Option<PathBuf>,
    pub coords: Option<PathBuf>,
    pub local: Option<PathBuf>,
}

impl RunFiles {
    pub fn get(&self, kind: DataKind) -> Option<&Path> {
        match kind {
            DataKind::Totals => self.totals.as_deref(),
            DataKind::Coordinates => self.coords.as_deref(),
            DataKind::Local => self.local.as_deref(),
        }
    }

    fn slot(&mut self, kind: DataKind) -> &mut Option<PathBuf> {
        match kind {
            DataKind::Totals => &mut self.totals,
            DataKind::Coordinates => &mut self.coords,
            DataKind::Local => &mut self.local,
        }
    }

    pub fn label(&self) -> String {
        run_label(self.run)
    }
}

impl fmt::Display for RunFiles {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kinds: Vec<_> = DataKind::ALL
            .into_iter()
            .filter(|&k| self.get(k).is_some())
            .map(DataKind::name)
            .collect();
        write!(f, "{}: {}", self.label(), kinds.join(", "))
    }
}

/// "Run N", as offered in the run selectors.
pub fn run_label(run: u32) -> String {
    format!("Run {run}")
}

/// Accepts "Run 3", "run3" or "3".
pub fn parse_run_label(label: &str) -> Option<u32> {
    let trimmed = label.trim();
    let digits = trimmed
        .get(..3)
        .filter(|p| p.eq_ignore_ascii_case("run"))
        .map_or(trimmed, |_| &trimmed[3..]);
    digits.trim().parse().ok()
}

/// Data files of a run directory, grouped by replicate.
#[derive(Debug, Clone, Default)]
pub struct RunCatalog {
    dir: PathBuf,
    runs: BTreeMap<u32, RunFiles>,
}

impl RunCatalog {
    /// Scan `<run_dir>/output_files`.
    pub fn scan(run_dir: &Path) -> Result<Self, DataFileError> {
        let dir = run_dir.join(OUTPUT_FILES_DIR);
        if !dir.is_dir() {
            return Err(DataFileError::NoOutputDir(dir));
        }
        let entries = fs::read_dir(&dir).map_err(|e| DataFileError::io(&dir, e))?;

        let mut catalog = RunCatalog {
            dir,
            runs: BTreeMap::new(),
        };
        for entry in entries {
            let entry = entry.map_err(|e| DataFileError::io(&catalog.dir, e))?;
            let name = entry.file_name().to_string_lossy().into_owned();
            catalog.add(&name, entry.path());
        }
        tracing::debug!(
            dir = %catalog.dir.display(),
            runs = catalog.runs.len(),
            "Scanned output files"
        );
        Ok(catalog)
    }

    fn add(&mut self, name: &str, path: PathBuf) {
        let Some(kind) = DataKind::of(name) else {
            return;
        };
        let Some(run) = RUN_NUMBER
            .captures(name)
            .and_then(|c| c[1].parse::<u32>().ok())
        else {
            return;
        };
        let files = self.runs.entry(run).or_insert_with(|| RunFiles {
            run,
            ..RunFiles::default()
        });
        *files.slot(kind) = Some(path);
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    /// Replicates in ascending order.
    pub fn runs(&self) -> impl Iterator<Item = &RunFiles> {
        self.runs.values()
    }

    /// Labels of the replicates that have a file of `kind`.
    pub fn labels(&self, kind: DataKind) -> Vec<String> {
        self.runs()
            .filter(|r| r.get(kind).is_some())
            .map(RunFiles::label)
            .collect()
    }

    pub fn get(&self, run: u32) -> Option<&RunFiles> {
        self.runs.get(&run)
    }

    /// Path of the `kind` file of replicate `run`.
    pub fn file(&self, run: u32, kind: DataKind) -> Result<&Path, DataFileError> {
        self.get(run)
            .and_then(|r| r.get(kind))
            .ok_or_else(|| DataFileError::MissingRun {
                kind: kind.name(),
                run,
                dir: self.dir.clone(),
            })
    }
}
