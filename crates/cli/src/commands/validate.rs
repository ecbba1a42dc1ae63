use anyhow::Result;
use gdsims_sim::validation::{validate_set, ValidationOptions};

use crate::args::ParamSource;
use crate::printing::print_report;
use crate::utils::load_param_set;

pub fn validate_config(source: &ParamSource) -> Result<()> {
    match &source.preset {
        Some(key) => println!("🔍 Validating preset {key}"),
        None => println!("🔍 Validating {}", source.config.display()),
    }

    let set = load_param_set(source)?;
    let options = ValidationOptions {
        strict_release_times: source.strict_release_times,
    };
    let report = validate_set(&set, &options);
    if !print_report(&report) {
        anyhow::bail!("Validation failed with {} error(s)", report.error_count());
    }
    Ok(())
}
