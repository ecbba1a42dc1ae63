use gdsims_sim::params::{AuxFile, ENGINE_FIELDS};
use gdsims_sim::validation::ValidationReport;
use gdsims_sim::{InputParams, ParamSet};

fn aux_label(file: &AuxFile) -> String {
    match file {
        AuxFile::Disabled => "Not used".to_string(),
        AuxFile::Unselected => "Enabled, no file selected".to_string(),
        AuxFile::Selected(path) => path.display().to_string(),
    }
}

pub fn print_parameters(set: &ParamSet) {
    let main = &set.main;
    let adv = &set.advanced;

    println!("\n📋 Simulation Configuration");
    println!("  • Replicates: {} [--num-runs]", main.num_runs);
    println!("  • Days: {} [--max-t]", main.max_t);
    println!("  • Sites: {} [--num-pat]", main.num_pat);
    println!("  • Output label: {} [--set-label]", main.set_label);

    println!("\n🧬 Gene Drive");
    println!("  • Somatic Cas9 fitness cost: {} [--xi]", main.xi);
    println!("  • Homing rate in females: {} [--e]", main.e);
    println!("  • r2 formation rate: {} [--gamma]", adv.gamma);
    println!("  • Release start: day {} [--driver-start]", main.driver_start);
    println!(
        "  • Releases: {} WD males [--num-driver-m] at {} sites/year [--num-driver-sites]",
        main.num_driver_m, main.num_driver_sites
    );
    println!("  • Release times file: {} [--release-times]", aux_label(&adv.release_times));

    println!("\n🦟 Life Processes");
    println!("  • Juvenile mortality: {} /day [--mu-j]", adv.mu_j);
    println!("  • Adult mortality: {} /day [--mu-a]", adv.mu_a);
    println!("  • Mating rate: {} [--beta]", adv.beta);
    println!("  • Eggs per female: {} /day [--theta]", adv.theta);
    println!("  • Juvenile survival exponent: {} [--comp-power]", adv.comp_power);
    println!("  • Minimum development time: {} days [--min-dev]", adv.min_dev);

    println!("\n🗺️  Dispersal");
    println!("  • Rate: {} [--disp-rate]", adv.disp_rate);
    println!("  • Maximum distance: {} [--max-disp]", adv.max_disp);
    println!("  • Type: {} [--dispersal-type]", adv.dispersal_type);
    println!("  • Boundary: {} [--boundary-type]", adv.boundary_type);
    println!("  • Coordinates file: {} [--coords]", aux_label(&adv.coords));

    println!("\n🌧️  Seasonality");
    println!(
        "  • Baseline: mean {} [--alpha0-mean], variance {} [--alpha0-variance]",
        adv.alpha0_mean, adv.alpha0_variance
    );
    println!("  • Rainfall contribution: {} [--alpha1]", adv.alpha1);
    println!("  • Amplitude: {} [--amp]", adv.amp);
    println!("  • Responsiveness: {} [--resp]", adv.resp);
    println!("  • Rainfall file: {} [--rainfall]", aux_label(&adv.rainfall));

    println!("\n💤 Aestivation");
    if adv.aestivation {
        println!("  • Rate: {} [--psi]", adv.psi);
        println!("  • Mortality: {} [--mu-aes]", adv.mu_aes);
        println!(
            "  • Hiding: days {}-{}, waking: days {}-{}",
            adv.t_hide1, adv.t_hide2, adv.t_wake1, adv.t_wake2
        );
    } else {
        println!("  • Disabled [--aestivation]");
    }

    println!("\n📼 Recording");
    println!(
        "  • Window: day {} [--rec-start] to day {} [--rec-end]",
        adv.rec_start, adv.rec_end
    );
    println!(
        "  • Interval: {} days global [--rec-interval-global], {} days local [--rec-interval-local]",
        adv.rec_interval_global, adv.rec_interval_local
    );
    println!("  • Sites: 1 in {} [--rec-sites-freq]", adv.rec_sites_freq);
    println!();
}

/// Print every engine parameter of `params` in file order.
pub fn print_input_params(params: &InputParams) {
    println!("\n📋 Parameters");
    let width = ENGINE_FIELDS
        .iter()
        .map(|f| f.engine_name.len())
        .max()
        .unwrap_or(0);
    for field in &ENGINE_FIELDS {
        println!(
            "  {:<width$}  {}",
            field.engine_name,
            (field.get)(params)
        );
    }
    println!("  {:<width$}  {}", "boundary", params.model.boundary_type);
    println!("  {:<width$}  {}", "dispersal", params.model.dispersal_type);
}

/// Print errors then warnings. Returns `true` when the report has no errors.
pub fn print_report(report: &ValidationReport) -> bool {
    if report.is_empty() {
        println!("✓ Parameters are valid");
        return true;
    }
    for error in report.errors() {
        println!("❌ {error}");
    }
    for warning in report.warnings() {
        println!("⚠️  {warning}");
    }
    if report.is_ok() {
        println!("✓ Parameters are valid (with warnings)");
    } else {
        println!("\n{} error(s) found", report.error_count());
    }
    report.is_ok()
}
