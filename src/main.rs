use clap::Parser;
use saber::cli::Cli;
use saber::logging;

fn main() -> anyhow::Result<()> {
    // Load .env file if it exists (ignore errors if missing)
    dotenvy::dotenv().ok();

    // Keep the guard alive so buffered file logs are flushed on exit
    let _guard = logging::init_from_env()?;

    let cli = Cli::parse();
    cli.run()
}
