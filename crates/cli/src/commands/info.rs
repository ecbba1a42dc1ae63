use anyhow::{Context, Result};
use gdsims_analysis::{DataKind, RunCatalog};
use gdsims_sim::storage::{read_param_file, RunDir};
use std::path::Path;

use crate::printing::print_input_params;

pub fn show_info(run_dir: &Path) -> Result<()> {
    let dir = RunDir::open(run_dir);
    println!("📂 Run: {}", dir.name());
    println!("  Location: {}", dir.path().display());

    let params = read_param_file(&dir.param_file()).with_context(|| {
        format!(
            "Failed to read {}. Is this a run directory?",
            dir.param_file().display()
        )
    })?;
    print_input_params(&params);

    println!("\n📊 Outputs");
    match RunCatalog::scan(dir.path()) {
        Ok(catalog) if !catalog.is_empty() => {
            for files in catalog.runs() {
                println!("  • {files}");
            }
            let missing = DataKind::ALL
                .iter()
                .filter(|kind| catalog.labels(**kind).is_empty())
                .map(|kind| kind.name())
                .collect::<Vec<_>>();
            if !missing.is_empty() {
                println!("  No {} files found", missing.join(" or "));
            }
        }
        Ok(_) => println!("  No output files yet"),
        Err(e) => println!("  {e}"),
    }
    Ok(())
}
