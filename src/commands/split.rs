use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::cli::InputArgs;
use crate::splitter::{self, SplitOptions, SplitOutcome, SplitReport};

use super::{load_inputs, RunStatus};

pub async fn run(
    input: &InputArgs,
    output_dir: &Path,
    options: SplitOptions,
    json: bool,
) -> Result<RunStatus> {
    // Create output directory if it doesn't exist
    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create directory: {}", output_dir.display()))?;

    let cancel = Arc::new(AtomicBool::new(false));
    let bar = progress_bar();

    let mut task = {
        let input = input.clone();
        let output_dir = output_dir.to_path_buf();
        let cancel = Arc::clone(&cancel);
        let bar = bar.clone();

        tokio::task::spawn_blocking(move || -> Result<SplitOutcome> {
            let (doc, names) = load_inputs(&input)?;
            let sink = |percent: f64| bar.set_position(percent.round() as u64);
            let outcome = splitter::split(
                &doc,
                &names,
                input.pages_per_file,
                &output_dir,
                options,
                &sink,
                &cancel,
            )?;
            Ok(outcome)
        })
    };

    let joined = tokio::select! {
        joined = &mut task => joined,
        Ok(()) = tokio::signal::ctrl_c() => {
            cancel.store(true, Ordering::SeqCst);
            bar.set_message("cancelling after the current file...");
            task.await
        }
    };

    let outcome = match joined.context("Split worker stopped unexpectedly")? {
        Ok(outcome) => outcome,
        Err(e) => {
            bar.abandon();
            return Err(e);
        }
    };

    match outcome {
        SplitOutcome::Completed(report) => {
            bar.finish_and_clear();
            print_report(&report, output_dir, json)?;
            Ok(RunStatus::Completed)
        }
        SplitOutcome::Cancelled { written, total } => {
            bar.abandon();
            eprintln!(
                "Cancelled: {} of {} file(s) were written to {} and kept",
                written,
                total,
                output_dir.display()
            );
            Ok(RunStatus::Cancelled)
        }
    }
}

fn progress_bar() -> ProgressBar {
    let bar = ProgressBar::new(100);
    let style = ProgressStyle::with_template("{spinner:.cyan} [{bar:40.green/238}] {pos:>3}%  {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("=> ");
    bar.set_style(style);
    bar
}

fn print_report(report: &SplitReport, output_dir: &Path, json: bool) -> Result<()> {
    for collision in &report.collisions {
        eprintln!(
            "Warning: {} chunks were written as {}; only the last one is kept",
            collision.chunks.len(),
            collision.file_name
        );
    }

    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        println!(
            "Split {} pages into {} file(s) in {}",
            report.total_pages,
            report.files.len(),
            output_dir.display()
        );
    }

    Ok(())
}
