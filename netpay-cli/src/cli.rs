use std::path::PathBuf;

use clap::{Parser, Subcommand};
use netpay_core::ContractType;

use crate::report::OutputFormat;

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Net pay calculator for employment and mandate contracts.
///
/// Computes social, health and income-tax-advance withholdings from a gross
/// income and prints an itemized report.
#[derive(Debug, Parser)]
#[command(name = "netpay")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Settings file (TOML). Every key is optional.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Log filter, e.g. `debug` or `netpay_cli=trace`. Overrides RUST_LOG.
    #[arg(long)]
    pub log_level: Option<String>,

    /// Report format. Overrides the settings file.
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Prompt for gross income and contract type (the default).
    Interactive,

    /// Calculate a single income without prompting.
    Calc {
        /// Gross income, e.g. `4000.00`.
        #[arg(short, long)]
        income: String,

        /// Contract type: `employment` or `mandate`.
        #[arg(short = 't', long)]
        contract: ContractType,
    },

    /// Calculate every row of a CSV file with `gross_income,contract_type` columns.
    Batch {
        /// Path to the CSV file.
        #[arg(short, long)]
        file: PathBuf,
    },
}

impl Cli {
    /// The subcommand to run, defaulting to the interactive prompt.
    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Interactive)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn no_subcommand_defaults_to_interactive() {
        let cli = Cli::try_parse_from(["netpay"]).unwrap();

        assert_eq!(cli.command(), Command::Interactive);
    }

    #[test]
    fn calc_parses_income_and_contract() {
        let cli =
            Cli::try_parse_from(["netpay", "calc", "--income", "4000", "--contract", "mandate"])
                .unwrap();

        assert_eq!(
            cli.command(),
            Command::Calc {
                income: "4000".to_string(),
                contract: ContractType::Mandate,
            }
        );
    }

    #[test]
    fn calc_rejects_unknown_contract() {
        let result =
            Cli::try_parse_from(["netpay", "calc", "--income", "4000", "--contract", "b2b"]);

        assert!(result.is_err());
    }

    #[test]
    fn global_flags_are_parsed() {
        let cli = Cli::try_parse_from([
            "netpay",
            "--format",
            "csv",
            "--log-level",
            "debug",
            "batch",
            "--file",
            "incomes.csv",
        ])
        .unwrap();

        assert_eq!(cli.format, Some(OutputFormat::Csv));
        assert_eq!(cli.log_level.as_deref(), Some("debug"));
        assert_eq!(
            cli.command(),
            Command::Batch {
                file: PathBuf::from("incomes.csv"),
            }
        );
    }
}
