use std::path::PathBuf;

use clap::{Parser, Subcommand};
use rust_decimal::Decimal;

use crate::utils::parse_quantity;

/// Monthly motor vehicle tax calculator.
///
/// Computes the power and weight components under the configured bracket
/// schedule and prints every step of the calculation.
#[derive(Debug, Parser)]
#[command(name = "vehicle-tax", version, about)]
pub struct Cli {
    /// Configuration file. Defaults to `vehicle-tax.toml` when it exists.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Display locale (de-AT, de-DE, en-US). Overrides the config file.
    #[arg(long, global = true)]
    pub locale: Option<String>,

    /// Log filter, e.g. `debug` or `warn,vehicle_tax_core=trace`.
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Calculate the tax for one vehicle.
    Calc {
        /// Engine power in kW.
        #[arg(long, value_parser = parse_quantity, allow_hyphen_values = true)]
        power: Decimal,

        /// Vehicle weight in kg.
        #[arg(long, value_parser = parse_quantity, allow_hyphen_values = true)]
        weight: Decimal,

        /// Print the full result as JSON instead of text.
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Calculate the tax for every vehicle in a CSV file.
    Batch {
        /// CSV file with `name`, `power_kw` and `weight_kg` columns.
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Print the active bracket schedule.
    Schedule,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn parses_calc_with_units() {
        let cli =
            Cli::try_parse_from(["vehicle-tax", "calc", "--power", "100kW", "--weight", "2,500"])
                .unwrap();

        match cli.command {
            Command::Calc {
                power,
                weight,
                json,
            } => {
                assert_eq!(power, dec!(100));
                assert_eq!(weight, dec!(2500));
                assert!(!json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn parses_negative_values() {
        let cli = Cli::try_parse_from(["vehicle-tax", "calc", "--power", "-5", "--weight", "-1"])
            .unwrap();

        assert!(matches!(cli.command, Command::Calc { power, .. } if power == dec!(-5)));
    }

    #[test]
    fn rejects_nan_input() {
        let result = Cli::try_parse_from(["vehicle-tax", "calc", "--power", "NaN", "--weight", "1"]);

        assert!(result.is_err());
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["vehicle-tax", "schedule", "--locale", "en-US"]).unwrap();

        assert_eq!(cli.locale.as_deref(), Some("en-US"));
        assert!(matches!(cli.command, Command::Schedule));
    }

    #[test]
    fn clap_definition_is_consistent() {
        use clap::CommandFactory;

        Cli::command().debug_assert();
    }
}
