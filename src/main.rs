use cardtray::cli::{run, Cli};
use cardtray::init_logging;
use clap::Parser;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose, cli.log_json)?;

    run(cli)?;
    Ok(())
}
