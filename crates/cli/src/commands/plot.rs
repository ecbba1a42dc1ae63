use anyhow::{Context, Result};
use gdsims_analysis::catalog::run_label;
use gdsims_analysis::plot::{
    check_interval, export_gif, play, render, AlleleChart, CoordsChart, LocalAnimation,
    TotalsChart,
};
use gdsims_analysis::PlotWorkspace;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;

use crate::args::{PlotCommand, PlotTarget};

pub fn plot(command: &PlotCommand) -> Result<()> {
    let target = command.target();
    let workspace = PlotWorkspace::open(&target.run_dir)
        .with_context(|| format!("Cannot plot {}", target.run_dir.display()))?;
    let title = run_label(target.run);
    tracing::debug!(dir = %target.run_dir.display(), run = target.run, "Plotting");

    match command {
        PlotCommand::Totals {
            lines,
            skip_days,
            output,
            ..
        } => {
            let series = workspace.totals(target.run)?.skip_days(*skip_days);
            render(&TotalsChart::new(&series, lines.clone(), title)?, output, target.size())?;
            saved(output);
        }
        PlotCommand::Alleles {
            skip_days, output, ..
        } => {
            let alleles = workspace
                .totals(target.run)?
                .skip_days(*skip_days)
                .allele_frequencies();
            render(&AlleleChart::new(&alleles, title)?, output, target.size())?;
            saved(output);
        }
        PlotCommand::Coords { output, .. } => {
            let coords = workspace.coordinates(target.run)?;
            render(&CoordsChart::new(&coords, title)?, output, target.size())?;
            saved(output);
        }
        PlotCommand::Local {
            frame,
            play: playing,
            animate,
            interval,
            output,
            ..
        } => {
            let interval = check_interval(*interval)?;
            let (coords, local) = workspace.local(target.run)?;
            let frames = workspace.frame_count(&local);
            let animation = LocalAnimation::new(coords, local, frames, title)?;

            if let Some(gif) = animate {
                export_animation(animation, gif, target, interval.as_millis())?;
            } else if *playing {
                play_animation(&animation, output, target, interval)?;
            } else {
                let day = animation.render_frame(*frame, output, target.size())?;
                println!(
                    "✓ Frame {}/{} (day {day}) saved to {}",
                    frame + 1,
                    animation.frame_count(),
                    output.display()
                );
            }
        }
    }
    Ok(())
}

fn saved(output: &Path) {
    println!("✓ Plot saved to {}", output.display());
}

fn export_animation(
    animation: LocalAnimation,
    gif: &Path,
    target: &PlotTarget,
    interval_ms: u128,
) -> Result<()> {
    let interval_ms = u32::try_from(interval_ms).context("Animation interval out of range")?;
    let rt = tokio::runtime::Runtime::new().context("Failed to create Tokio runtime")?;

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")
            .context("Invalid progress template")?,
    );
    spinner.set_message(format!(
        "Exporting {} frames to {}",
        animation.frame_count(),
        gif.display()
    ));
    spinner.enable_steady_tick(std::time::Duration::from_millis(100));

    let result = rt.block_on(export_gif(
        animation,
        gif.to_path_buf(),
        target.size(),
        interval_ms,
    ));
    spinner.finish_and_clear();

    let frames = result.context("Failed to export animation")?;
    println!("✓ Animation with {frames} frames saved to {}", gif.display());
    Ok(())
}

fn play_animation(
    animation: &LocalAnimation,
    output: &Path,
    target: &PlotTarget,
    interval: std::time::Duration,
) -> Result<()> {
    let rt = tokio::runtime::Runtime::new().context("Failed to create Tokio runtime")?;
    println!(
        "▶️  Playing {} frames into {} (Ctrl-C to stop)",
        animation.frame_count(),
        output.display()
    );

    let total = animation.frame_count();
    rt.block_on(async {
        let playback = play(animation, output, target.size(), interval, |t, day| {
            println!("  frame {}/{total}: t = {day}", t + 1);
        });
        tokio::select! {
            result = playback => result.context("Playback failed"),
            _ = tokio::signal::ctrl_c() => {
                println!("\n⏹️  Playback stopped");
                Ok(())
            }
        }
    })?;
    println!("✓ Last frame left in {}", output.display());
    Ok(())
}
