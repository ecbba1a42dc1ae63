use super::{
    COORDS_COPY, OUTPUT_FILES_DIR, PARAMS_INFO_FILE, PARAM_FILE, RAINFALL_COPY,
    RELEASE_TIMES_COPY,
};
use crate::errors::OutputDirError;
use crate::params::InputParams;
use chrono::{DateTime, Local};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Directory name used when no run name is given: `YYYY_M_DD_HHMMSS`.
pub fn default_run_name(now: DateTime<Local>) -> String {
    now.format("%Y_%-m_%d_%H%M%S").to_string()
}

/// A directory holding the inputs and outputs of one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunDir {
    path: PathBuf,
    name: String,
}

impl RunDir {
    /// Create (or reuse) the run directory `parent/name`.
    ///
    /// An empty `parent` means the current working directory. With no name,
    /// a timestamp is used. A directory that already holds a `params.txt`
    /// has been used by an earlier run and is refused.
    pub fn create(parent: &Path, name: Option<&str>) -> Result<Self, OutputDirError> {
        let parent = if parent.as_os_str().is_empty() {
            std::env::current_dir().map_err(|source| OutputDirError::Create {
                path: parent.to_path_buf(),
                source,
            })?
        } else {
            parent.to_path_buf()
        };
        if !parent.is_dir() {
            return Err(OutputDirError::ParentMissing(parent));
        }

        let name = match name.map(str::trim) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => default_run_name(Local::now()),
        };
        let path = parent.join(&name);

        if path.join(PARAM_FILE).exists() {
            return Err(OutputDirError::AlreadyUsed(path));
        }
        if !path.exists() {
            fs::create_dir_all(&path).map_err(|source| OutputDirError::Create {
                path: path.clone(),
                source,
            })?;
            tracing::info!(dir = %path.display(), "Created run directory");
        }

        Ok(Self { path, name })
    }

    /// Open an existing run directory, for reading its outputs.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self { path, name }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Run name (the directory's own name).
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn param_file(&self) -> PathBuf {
        self.path.join(PARAM_FILE)
    }

    pub fn output_files(&self) -> PathBuf {
        self.path.join(OUTPUT_FILES_DIR)
    }

    /// Paths of the totals files the engine will write, one per replicate.
    pub fn expected_totals_files(&self, params: &InputParams) -> Vec<PathBuf> {
        let dir = self.output_files();
        params
            .totals_file_names()
            .into_iter()
            .map(|name| dir.join(name))
            .collect()
    }

    /// Write `params.txt` and `paramsInfo.csv` and copy the auxiliary input
    /// files. Returns the absolute path of `params.txt`.
    pub fn write(&self, params: &InputParams) -> io::Result<PathBuf> {
        let param_file = self.param_file();
        fs::write(&param_file, params.to_param_file())?;
        fs::write(
            self.path.join(PARAMS_INFO_FILE),
            super::format_params_info(params),
        )?;

        let copies = [
            (&params.model.rainfall_file, RAINFALL_COPY),
            (&params.model.coords_file, COORDS_COPY),
            (&params.model.release_times_file, RELEASE_TIMES_COPY),
        ];
        for (source, target) in copies {
            if let Some(source) = source {
                fs::copy(source, self.path.join(target))?;
            }
        }

        tracing::debug!(file = %param_file.display(), "Wrote parameter files");
        std::path::absolute(&param_file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::ModelOptions;
    use chrono::TimeZone;
    use tempfile::tempdir;

    #[test]
    fn test_default_run_name() {
        let time = Local.with_ymd_and_hms(2025, 3, 7, 9, 5, 2).unwrap();
        assert_eq!(default_run_name(time), "2025_3_07_090502");
    }

    #[test]
    fn test_create_named() {
        let dir = tempdir().unwrap();
        let run = RunDir::create(dir.path(), Some("trial")).unwrap();
        assert_eq!(run.path(), dir.path().join("trial"));
        assert_eq!(run.name(), "trial");
        assert!(run.path().is_dir());
    }

    #[test]
    fn test_create_timestamped() {
        let dir = tempdir().unwrap();
        let run = RunDir::create(dir.path(), None).unwrap();
        assert!(run.path().is_dir());
        assert_eq!(run.name().split('_').count(), 4);
    }

    #[test]
    fn test_missing_parent() {
        let dir = tempdir().unwrap();
        let err = RunDir::create(&dir.path().join("missing"), Some("x")).unwrap_err();
        assert!(matches!(err, OutputDirError::ParentMissing(_)));
    }

    #[test]
    fn test_used_directory_is_refused() {
        let dir = tempdir().unwrap();
        let run = RunDir::create(dir.path(), Some("trial")).unwrap();
        run.write(&InputParams::default()).unwrap();

        let err = RunDir::create(dir.path(), Some("trial")).unwrap_err();
        assert!(matches!(err, OutputDirError::AlreadyUsed(_)));
        assert!(err.to_string().contains("has already been used"));
    }

    #[test]
    fn test_existing_empty_directory_is_reused() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("trial")).unwrap();
        assert!(RunDir::create(dir.path(), Some("trial")).is_ok());
    }

    #[test]
    fn test_write_files_and_copies() {
        let dir = tempdir().unwrap();
        let rain = dir.path().join("my_rain.txt");
        fs::write(&rain, "1\n2\n").unwrap();

        let params = InputParams {
            model: ModelOptions {
                rainfall_file: Some(rain),
                ..ModelOptions::default()
            },
            ..InputParams::default()
        };
        let run = RunDir::create(dir.path(), Some("trial")).unwrap();
        let param_file = run.write(&params).unwrap();

        assert!(param_file.is_absolute());
        assert_eq!(fs::read_to_string(&param_file).unwrap(), params.to_param_file());
        assert!(run.path().join(PARAMS_INFO_FILE).exists());
        assert_eq!(
            fs::read_to_string(run.path().join(RAINFALL_COPY)).unwrap(),
            "1\n2\n"
        );
        assert!(!run.path().join(COORDS_COPY).exists());
    }

    #[test]
    fn test_expected_totals_files() {
        let run = RunDir::open("/runs/trial");
        let params = InputParams {
            num_runs: 2,
            set_label: 4,
            ..InputParams::default()
        };
        assert_eq!(
            run.expected_totals_files(&params),
            vec![
                PathBuf::from("/runs/trial/output_files/Totals4run1.txt"),
                PathBuf::from("/runs/trial/output_files/Totals4run2.txt"),
            ]
        );
    }
}
