use gdsims_sim::params::PRESETS;

pub fn list_presets() {
    println!("📚 Built-in parameter sets");
    println!("{}", "-".repeat(50));
    for preset in &PRESETS {
        println!("  {}. {:<20} {}", preset.index, preset.name, preset.summary);
    }
    println!("\n💡 Use 'gdsims run --preset <index or name>' to run one.");
}
