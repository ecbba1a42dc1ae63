//! The engine's stdin menu session.
//!
//! The engine takes no arguments. It reads a fixed sequence of menu choices
//! and values from stdin, runs, and exits. Menu codes and type letters are
//! pinned to one engine version; see [`PROTOCOL_VERSION`].

use crate::params::ModelOptions;
use std::path::Path;

/// Identifies the menu layout this module speaks.
pub const PROTOCOL_VERSION: &str = "gdsimsapp-menu-1";

/// Menu entry that loads a parameter file.
const MENU_PARAM_FILE: &str = "100";
const MENU_BOUNDARY: &str = "1";
const MENU_DISPERSAL: &str = "2";
const MENU_RAINFALL: &str = "3";
const MENU_COORDS: &str = "4";
const MENU_RELEASE_TIMES: &str = "5";
const MENU_RUN: &str = "0";

/// Build the complete stdin script for one run.
///
/// The engine resolves paths from the run directory, so relative paths are
/// made absolute against the current directory first.
pub fn build_script(param_file: &Path, model: &ModelOptions) -> String {
    let mut lines: Vec<String> = vec![
        MENU_PARAM_FILE.into(),
        engine_path(param_file),
        // Confirm the file, then confirm running with it.
        "y".into(),
        "y".into(),
        MENU_BOUNDARY.into(),
        model.boundary_type.code().to_string(),
        MENU_DISPERSAL.into(),
        model.dispersal_type.code().to_string(),
    ];

    let files = [
        (MENU_RAINFALL, &model.rainfall_file),
        (MENU_COORDS, &model.coords_file),
        (MENU_RELEASE_TIMES, &model.release_times_file),
    ];
    for (code, file) in files {
        if let Some(path) = file {
            lines.push(code.into());
            lines.push(engine_path(path));
        }
    }

    lines.push(MENU_RUN.into());

    let mut script = lines.join("\n");
    script.push('\n');
    script
}

fn engine_path(path: &Path) -> String {
    std::path::absolute(path)
        .unwrap_or_else(|_| path.to_path_buf())
        .display()
        .to_string()
}
