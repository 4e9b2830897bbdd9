//! TCV - Entry Point
//!
//! Runs the test classes linked into this binary. The bundled samples in
//! [`samples`] register themselves through the `TEST_CLASSES` slice.

mod samples;

use clap::Parser;
use std::process::ExitCode;
use tcv::{RunOptions, run};

/// Command line interface for TCV
#[derive(Parser, Debug)]
#[command(name = "tcv")]
#[command(about = "TCV - Test convention runner")]
#[command(version)]
pub struct Cli {
    /// Only run classes and methods carrying one of these tags
    pub tags: Vec<String>,

    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<std::path::PathBuf>,

    /// Print the test plan without executing it
    #[arg(long)]
    pub list: bool,
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let options = RunOptions {
        config: cli.config,
        tags: cli.tags,
        list: cli.list,
    };

    let success = run(&options, samples::configure_additional_services).await?;
    Ok(if success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
