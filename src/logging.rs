use anyhow::{Context, Result};
use std::fs::{File, OpenOptions};
use std::path::Path;
use std::sync::Mutex;
use tracing::Subscriber;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{fmt, EnvFilter, Layer, Registry};

/// Install the global subscriber.
///
/// With a `log_file`, every run appends timestamped INFO lines to it. Terminal
/// output is reserved for the progress bar and final status, so events only
/// reach stderr when `RUST_LOG` is set.
pub fn init(log_file: Option<&Path>) -> Result<()> {
    let to_file = log_file
        .map(open_log_file)
        .transpose()?
        .map(file_layer::<Registry>);

    let stderr_layer = EnvFilter::try_from_default_env()
        .ok()
        .map(|filter| fmt::layer().with_writer(std::io::stderr).with_filter(filter));

    tracing_subscriber::registry()
        .with(to_file)
        .with(stderr_layer)
        .try_init()
        .context("Failed to install log subscriber")?;

    Ok(())
}

fn open_log_file(path: &Path) -> Result<File> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file: {}", path.display()))
}

/// One plain line per event: timestamp, level, message, fields.
fn file_layer<S>(file: File) -> impl Layer<S>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fmt::layer()
        .with_ansi(false)
        .with_target(false)
        .with_writer(Mutex::new(file))
        .with_filter(LevelFilter::INFO)
}
