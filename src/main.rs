mod chunks;
mod cli;
mod commands;
mod error;
mod logging;
mod names;
mod pdf;
mod splitter;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use commands::RunStatus;
use std::process::ExitCode;
use tracing::error;

/// Exit code for a run stopped with Ctrl-C
const EXIT_CANCELLED: u8 = 130;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(RunStatus::Completed) => ExitCode::SUCCESS,
        Ok(RunStatus::Cancelled) => ExitCode::from(EXIT_CANCELLED),
        Err(e) => {
            error!("run failed: {:#}", e);
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<RunStatus> {
    let log_file = cli.command.writes_files().then_some(cli.log_file.as_path());
    logging::init(log_file)?;

    match cli.command {
        Commands::Split {
            input,
            output_dir,
            strict_names,
            json,
        } => {
            let options = splitter::SplitOptions { strict_names };
            commands::split::run(&input, &output_dir, options, json).await
        }
        Commands::Plan { input, json } => {
            commands::plan::run(&input, json)?;
            Ok(RunStatus::Completed)
        }
    }
}
