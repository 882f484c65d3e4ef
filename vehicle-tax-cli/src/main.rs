use clap::Parser;
use tracing::debug;

use vehicle_tax_cli::config::AppConfig;
use vehicle_tax_cli::{App, Cli, Command, logging};

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load(cli.config.as_deref())?;

    let filter = logging::build_filter(cli.log_level.as_deref(), config.log_level.as_deref())?;
    logging::init_logging(filter, config.log_file.as_deref())?;
    debug!(log_file = ?config.log_file, "logging initialized");

    let app = App::from_config(&config, cli.locale.as_deref())?;

    let output = match cli.command {
        Command::Calc {
            power,
            weight,
            json,
        } => app.calc(power, weight, json)?,
        Command::Batch { file } => app.batch(&file)?,
        Command::Schedule => app.schedule(),
    };
    print!("{output}");

    Ok(())
}
