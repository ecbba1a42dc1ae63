use anyhow::Result;
use gdsims_sim::validation::{validate_set, ValidationOptions};
use gdsims_sim::ParamSet;

use crate::args::InitArgs;
use crate::printing::{print_parameters, print_report};
use crate::utils::{preset_params, write_config};

pub fn init_config(args: &InitArgs) -> Result<()> {
    println!("🧬 GDSiMS - Gene Drive Simulator");
    println!("============================================\n");

    if args.output.exists() && !args.force {
        anyhow::bail!(
            "{} already exists. Use --force to overwrite it.",
            args.output.display()
        );
    }

    let mut set = match &args.preset {
        Some(key) => {
            let set = preset_params(key)?;
            println!("Starting from preset {key}");
            set
        }
        None => ParamSet::default(),
    };
    args.apply(&mut set);

    println!("\nConfiguration:");
    print_parameters(&set);

    println!("🔍 Checking parameters...");
    let report = validate_set(&set, &ValidationOptions::default());
    let valid = print_report(&report);

    write_config(&args.output, &set)?;
    println!("\n✓ Configuration saved to {}", args.output.display());

    if valid {
        println!("\n💡 Use 'gdsims run --config {}' to run it.", args.output.display());
    } else {
        println!(
            "\n💡 Fix the errors above before running, e.g. with 'gdsims init --force' or 'gdsims setup'."
        );
    }
    Ok(())
}
