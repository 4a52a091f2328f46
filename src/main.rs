//! modreq - Go module requirement checker CLI tool
//!
//! Exit codes: 0 compliant, 1 required violation, 2 banned violation,
//! 3 both, 255 when a source, inventory or rule error aborts the run.

use clap::Parser;
use modreq::cli::CliArgs;
use modreq::config::CheckConfig;
use modreq::domain::FATAL_EXIT_CODE;
use modreq::logging;
use modreq::orchestrator::Orchestrator;
use modreq::output::create_formatter;
use std::io::{self, Write};
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let args = CliArgs::parse();
    logging::init_cli(args.verbose);

    // Run the main logic and handle errors
    match run(args).await {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(FATAL_EXIT_CODE as u8)
        }
    }
}

/// Main application logic
async fn run(args: CliArgs) -> anyhow::Result<ExitCode> {
    let config = CheckConfig::from_cli(&args)?;

    if args.verbose {
        eprintln!("modreq v{}", env!("CARGO_PKG_VERSION"));
        for location in &config.locations {
            eprintln!("Source: {}", location);
        }
    }

    let formatter = create_formatter(&config.output);
    let orchestrator = Orchestrator::new(config);
    let result = orchestrator.run().await?;

    let mut stdout = io::stdout().lock();
    formatter.format(&result, &mut stdout)?;
    stdout.flush()?;

    Ok(ExitCode::from(result.exit_code() as u8))
}
