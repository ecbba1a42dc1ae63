use anyhow::{Context, Result};
use gdsims_sim::params::{AdvParams, AdvancedForm, AuxFile, BoundaryType, DispersalType};
use gdsims_sim::validation::{validate_set, ValidationOptions};
use gdsims_sim::ParamSet;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::args::{ParamSource, RunArgs};
use crate::commands::run::run_simulation;
use crate::printing::{print_parameters, print_report};
use crate::utils::write_config;

pub fn setup_wizard(defaults: bool, output: &Path, run: bool) -> Result<()> {
    println!("\n🧙 GDSiMS Setup Wizard");
    println!("========================\n");
    println!("This wizard will guide you through setting up and running a simulation.\n");

    let mut set = ParamSet::default();

    if !defaults {
        prompt_main(&mut set)?;

        if prompt_confirm("\nEdit advanced parameters?", false)? {
            set.advanced = edit_advanced(set.advanced, set.main.max_t, set.main.num_pat)?;
        }
    }

    println!("\nConfiguration:");
    print_parameters(&set);

    let report = validate_set(&set, &ValidationOptions::default());
    let valid = print_report(&report);

    let output = if defaults {
        output.to_path_buf()
    } else {
        PathBuf::from(prompt_string(
            "\nConfiguration file",
            Some(&output.display().to_string()),
        )?)
    };
    write_config(&output, &set)?;
    println!("✓ Configuration saved to {}", output.display());

    if !valid {
        println!("\n💡 Fix the errors above before running, e.g. with 'gdsims setup' again.");
        return Ok(());
    }

    let start = if defaults {
        run
    } else {
        run || prompt_confirm("\nRun simulation now?", true)?
    };
    if start {
        let args = RunArgs {
            source: ParamSource {
                config: output,
                preset: None,
                strict_release_times: false,
            },
            output_dir: None,
            name: None,
            engine: None,
            no_progress: false,
        };
        run_simulation(&args)?;
    } else {
        println!("\n💡 Use 'gdsims run --config {}' to run it.", output.display());
    }
    Ok(())
}

fn prompt_main(set: &mut ParamSet) -> Result<()> {
    let main = &mut set.main;

    println!("📐 Simulation");
    println!("------------");
    main.num_runs = prompt_u32("Number of replicates", Some(main.num_runs))?;
    main.max_t = prompt_u32("Days to simulate", Some(main.max_t))?;
    main.num_pat = prompt_u32("Number of population sites", Some(main.num_pat))?;
    main.set_label = prompt_u32("Output file label", Some(main.set_label))?;

    println!("\n🧬 Gene Drive");
    println!("------------");
    main.xi = prompt_f64("Somatic Cas9 fitness cost (xi)", Some(main.xi))?;
    main.e = prompt_f64("Homing rate in females (e)", Some(main.e))?;
    main.driver_start = prompt_u32("Day releases start", Some(main.driver_start))?;
    main.num_driver_m = prompt_u32("WD males per release", Some(main.num_driver_m))?;
    main.num_driver_sites = prompt_u32("Release sites per year", Some(main.num_driver_sites))?;
    Ok(())
}

/// Edit the advanced parameters until they validate or the user gives up.
/// Giving up keeps the values from before the edit.
fn edit_advanced(applied: AdvParams, max_t: u32, num_pat: u32) -> Result<AdvParams> {
    let mut form = AdvancedForm::new(applied);
    loop {
        prompt_advanced(form.draft_mut())?;
        if !form.has_changes() {
            break;
        }

        let report = form.apply(max_t, num_pat, &ValidationOptions::default());
        print_report(&report);
        if report.is_ok() {
            println!("✓ Advanced parameters applied");
            break;
        }
        if !prompt_confirm("Edit advanced parameters again?", true)? {
            form.close();
            println!("Advanced parameters left unchanged");
            break;
        }
    }
    Ok(form.into_applied())
}

fn prompt_advanced(adv: &mut AdvParams) -> Result<()> {
    println!("\n📼 Recording");
    println!("-----------");
    adv.rec_start = prompt_u32("First recorded day", Some(adv.rec_start))?;
    adv.rec_end = prompt_u32("Last recorded day", Some(adv.rec_end))?;
    adv.rec_interval_global = prompt_u32("Global recording interval", Some(adv.rec_interval_global))?;
    adv.rec_interval_local = prompt_u32("Local recording interval", Some(adv.rec_interval_local))?;
    adv.rec_sites_freq = prompt_u32("Record one site in every", Some(adv.rec_sites_freq))?;

    println!("\n🦟 Life Processes");
    println!("----------------");
    adv.mu_j = prompt_f64("Juvenile mortality rate (mu_j)", Some(adv.mu_j))?;
    adv.mu_a = prompt_f64("Adult mortality rate (mu_a)", Some(adv.mu_a))?;
    adv.beta = prompt_f64("Mating rate (beta)", Some(adv.beta))?;
    adv.theta = prompt_f64("Eggs per female per day (theta)", Some(adv.theta))?;
    adv.comp_power = prompt_f64("Juvenile survival exponent", Some(adv.comp_power))?;
    adv.min_dev = prompt_u32("Minimum development time (days)", Some(adv.min_dev))?;
    adv.gamma = prompt_f64("r2 allele formation rate (gamma)", Some(adv.gamma))?;

    println!("\n🗺️  Dispersal");
    println!("-----------");
    adv.disp_rate = prompt_f64("Dispersal rate", Some(adv.disp_rate))?;
    adv.max_disp = prompt_f64("Maximum dispersal distance", Some(adv.max_disp))?;
    adv.dispersal_type = prompt_parsed::<DispersalType>(
        "Dispersal type (radial/distance-kernel)",
        adv.dispersal_type,
    )?;
    let boundary = prompt_parsed::<BoundaryType>("Boundary type (toroid/edge)", adv.boundary_type)?;
    if boundary != adv.boundary_type {
        adv.set_boundary_type(boundary);
    }
    if adv.boundary_type == BoundaryType::Edge {
        adv.coords = prompt_aux("Coordinates file", &adv.coords)?;
    }

    println!("\n🌧️  Seasonality");
    println!("-------------");
    adv.alpha0_mean = prompt_f64("Baseline carrying capacity (alpha0 mean)", Some(adv.alpha0_mean))?;
    adv.alpha0_variance = prompt_f64("Baseline variance", Some(adv.alpha0_variance))?;
    adv.alpha1 = prompt_f64("Rainfall contribution (alpha1)", Some(adv.alpha1))?;
    adv.amp = prompt_f64("Rainfall amplitude", Some(adv.amp))?;
    adv.resp = prompt_f64("Rainfall responsiveness", Some(adv.resp))?;
    adv.rainfall = prompt_aux("Rainfall file", &adv.rainfall)?;

    println!("\n💤 Aestivation");
    println!("-------------");
    adv.set_aestivation(prompt_confirm("Enable aestivation?", adv.aestivation)?);
    if adv.aestivation {
        adv.psi = prompt_f64("Aestivation rate (psi)", Some(adv.psi))?;
        adv.mu_aes = prompt_f64("Aestivation mortality", Some(adv.mu_aes))?;
        adv.t_hide1 = prompt_u32("Day hiding starts", Some(adv.t_hide1))?;
        adv.t_hide2 = prompt_u32("Day hiding ends", Some(adv.t_hide2))?;
        adv.t_wake1 = prompt_u32("Day waking starts", Some(adv.t_wake1))?;
        adv.t_wake2 = prompt_u32("Day waking ends", Some(adv.t_wake2))?;
    }

    println!("\n🚀 Releases");
    println!("----------");
    adv.release_times = prompt_aux("Release times file", &adv.release_times)?;
    Ok(())
}

/// Ask whether an optional input file is used, and if so, which one.
fn prompt_aux(label: &str, current: &AuxFile) -> Result<AuxFile> {
    if !prompt_confirm(&format!("Use a {}?", label.to_lowercase()), current.is_enabled())? {
        return Ok(AuxFile::Disabled);
    }
    let default = current.path().map(|p| p.display().to_string());
    let path = prompt_string(label, Some(default.as_deref().unwrap_or("")))?;
    Ok(AuxFile::from_path(Some(Path::new(&path))))
}

fn prompt_string(prompt: &str, default: Option<&str>) -> Result<String> {
    print!("{prompt}");
    if let Some(def) = default.filter(|d| !d.is_empty()) {
        print!(" [{def}]");
    }
    print!(": ");
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    let input = input.trim();

    if input.is_empty() {
        if let Some(def) = default {
            Ok(def.to_string())
        } else {
            anyhow::bail!("Input required");
        }
    } else {
        Ok(input.to_string())
    }
}

fn prompt_u32(prompt: &str, default: Option<u32>) -> Result<u32> {
    print!("{prompt}");
    if let Some(def) = default {
        print!(" [{def}]");
    }
    print!(": ");
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    let input = input.trim();

    if input.is_empty() {
        default.ok_or_else(|| anyhow::anyhow!("Input required"))
    } else {
        input
            .parse::<u32>()
            .with_context(|| format!("Invalid whole number: {input}"))
    }
}

fn prompt_f64(prompt: &str, default: Option<f64>) -> Result<f64> {
    print!("{prompt}");
    if let Some(def) = default {
        print!(" [{def}]");
    }
    print!(": ");
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    let input = input.trim();

    if input.is_empty() {
        default.ok_or_else(|| anyhow::anyhow!("Input required"))
    } else {
        input
            .parse::<f64>()
            .with_context(|| format!("Invalid number: {input}"))
    }
}

fn prompt_parsed<T>(prompt: &str, default: T) -> Result<T>
where
    T: std::str::FromStr<Err = String> + std::fmt::Display,
{
    let input = prompt_string(prompt, Some(&default.to_string()))?;
    input.parse::<T>().map_err(|e| anyhow::anyhow!(e))
}

fn prompt_confirm(prompt: &str, default: bool) -> Result<bool> {
    let default_str = if default { "Y/n" } else { "y/N" };
    print!("{prompt} [{default_str}]: ");
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    let input = input.trim().to_lowercase();

    if input.is_empty() {
        Ok(default)
    } else if input == "y" || input == "yes" {
        Ok(true)
    } else if input == "n" || input == "no" {
        Ok(false)
    } else {
        anyhow::bail!("Please answer 'y' or 'n'")
    }
}
