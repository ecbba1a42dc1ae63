use anyhow::{Context, Result};
use gdsims_sim::params::presets;
use gdsims_sim::ParamSet;
use std::fs;
use std::path::Path;

use crate::args::ParamSource;

/// Load the parameter set named by `source`: a preset if one is given,
/// otherwise the configuration file.
pub fn load_param_set(source: &ParamSource) -> Result<ParamSet> {
    if let Some(key) = &source.preset {
        return preset_params(key);
    }
    read_config(&source.config)
}

pub fn preset_params(key: &str) -> Result<ParamSet> {
    let preset = presets::find(key).with_context(|| {
        format!("Unknown preset '{key}'. Use 'gdsims presets' to list them.")
    })?;
    Ok(preset.params())
}

pub fn read_config(path: &Path) -> Result<ParamSet> {
    let json = fs::read_to_string(path).with_context(|| {
        format!(
            "Failed to read {}. Did you run 'gdsims init' first?",
            path.display()
        )
    })?;
    ParamSet::from_json(&json).with_context(|| format!("Invalid configuration in {}", path.display()))
}

pub fn write_config(path: &Path, set: &ParamSet) -> Result<()> {
    let json = set.to_json().context("Failed to serialize parameters")?;
    fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))
}
