use anyhow::Result;
use clap::Parser;
use trade_log_analyzer::{logging, report, Config};

fn main() -> Result<()> {
    let config = Config::parse();
    logging::init_logging(&config.log_level);

    report::run(&config)?;
    Ok(())
}
