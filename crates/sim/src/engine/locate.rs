use crate::errors::EngineError;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Environment variable naming the engine executable.
pub const ENGINE_ENV: &str = "GDSIMS_ENGINE";

/// Directory, next to the front-end binary, that bundles the engine.
pub const BUNDLE_DIR: &str = "model";

/// File name of the bundled engine on this platform.
pub fn engine_file_name() -> &'static str {
    if cfg!(windows) {
        "gdsimsapp_win.exe"
    } else {
        "gdsimsapp"
    }
}

/// Find the engine executable.
///
/// Order: `explicit`, then [`ENGINE_ENV`], then the bundled copy under
/// `model/` next to the running binary.
pub fn locate_engine(explicit: Option<&Path>) -> Result<PathBuf, EngineError> {
    let exe_dir = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf));
    resolve_engine(explicit, std::env::var_os(ENGINE_ENV), exe_dir.as_deref())
}

fn resolve_engine(
    explicit: Option<&Path>,
    from_env: Option<OsString>,
    exe_dir: Option<&Path>,
) -> Result<PathBuf, EngineError> {
    let candidate = if let Some(path) = explicit {
        path.to_path_buf()
    } else if let Some(path) = from_env.filter(|p| !p.is_empty()) {
        PathBuf::from(path)
    } else if let Some(dir) = exe_dir {
        dir.join(BUNDLE_DIR).join(engine_file_name())
    } else {
        PathBuf::from(BUNDLE_DIR).join(engine_file_name())
    };

    if candidate.is_file() {
        tracing::debug!(engine = %candidate.display(), "Located engine");
        Ok(candidate)
    } else {
        Err(EngineError::NotFound(candidate))
    }
}
