//! AQP CLI - Command line tool for synthetic air-quality telemetry.

use aqp_core::catalog::TelemetryCatalog;
use clap::Parser;

#[derive(Parser)]
#[command(
    name = "aqp-cli",
    version,
    about = "Air quality telemetry toolkit"
)]
struct Cli {
    #[command(subcommand)]
    command: aqp_cmd::Command,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let catalog = TelemetryCatalog::from_fixtures();
    aqp_cmd::run(cli.command, &catalog)
}
