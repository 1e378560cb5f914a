use anyhow::Context;
use clap::Parser;
use portsweep::cli::Args;
use portsweep::config::Settings;
use portsweep::output::{self, Reporter};
use portsweep::{logging, scanner, signal};
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    logging::init_tracing(args.verbose);

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::print_error(&format!("{e:#}"));
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> anyhow::Result<()> {
    let settings = Settings::load(args.config.as_deref()).context("failed to load settings")?;
    let config = args.scan_config(&settings)?;
    let format = args.output_format(&settings);

    signal::install();

    if args.verbose {
        output::print_scan_header(
            &config.target.to_string(),
            &config.ports.to_string(),
            config.target.host_count(),
            config.threads,
        );
    }

    scanner::run_scan(config, Reporter::stdout(format)).await?;
    Ok(())
}
