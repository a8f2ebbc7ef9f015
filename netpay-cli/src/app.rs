//! Command dispatch: gathers input, runs the pipeline, writes the report.

use std::io::{self, BufRead, Write};
use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use netpay_core::{CalculationResult, ContractType, NetPayCalculator, TaxBase};
use tracing::{debug, info, warn};

use crate::batch::{self, BatchEntry};
use crate::cli::{Cli, Command};
use crate::prompt::Prompter;
use crate::report::{OutputFormat, write_results};
use crate::settings::Settings;

/// Runs the selected command, writing reports to stdout.
pub fn run(
    cli: &Cli,
    settings: &Settings,
) -> Result<ExitCode> {
    let format = cli.format.unwrap_or(settings.report.format);
    let calculator = NetPayCalculator::default();
    let stdout = io::stdout();

    match cli.command() {
        Command::Interactive => {
            let stdin = io::stdin();
            run_interactive(&calculator, stdin.lock(), stdout.lock(), format)
        }
        Command::Calc { income, contract } => {
            run_single(&calculator, &income, contract, stdout.lock(), format)
        }
        Command::Batch { file } => run_batch(&calculator, &file, stdout.lock(), format),
    }
}

fn calculate(
    calculator: &NetPayCalculator<'_>,
    base: &TaxBase,
    contract: ContractType,
) -> Result<CalculationResult> {
    debug!(gross = %base.amount(), %contract, "running net pay pipeline");
    calculator
        .calculate(base, contract)
        .with_context(|| {
            format!(
                "cannot calculate net pay for {contract} income {}",
                base.amount()
            )
        })
}

/// Prompts on `input`/`output`, then prints the report to `output`.
pub fn run_interactive<R: BufRead, W: Write>(
    calculator: &NetPayCalculator<'_>,
    input: R,
    mut output: W,
    format: OutputFormat,
) -> Result<ExitCode> {
    let mut prompter = Prompter::new(input, &mut output);
    let base = prompter.gross_income()?;
    let contract = prompter.contract_type()?;

    let result = calculate(calculator, &base, contract)?;
    writeln!(output)?;
    write_results(output, format, &[result])?;
    Ok(ExitCode::SUCCESS)
}

/// Calculates one income given on the command line.
pub fn run_single<W: Write>(
    calculator: &NetPayCalculator<'_>,
    income: &str,
    contract: ContractType,
    output: W,
    format: OutputFormat,
) -> Result<ExitCode> {
    let base =
        TaxBase::parse(income).with_context(|| format!("invalid gross income '{income}'"))?;
    let result = calculate(calculator, &base, contract)?;
    write_results(output, format, &[result])?;
    Ok(ExitCode::SUCCESS)
}

/// Calculates every row of a CSV file.
///
/// Rows whose calculation fails are reported and skipped; the exit code is
/// non-zero if any row failed.
pub fn run_batch<W: Write>(
    calculator: &NetPayCalculator<'_>,
    path: &Path,
    output: W,
    format: OutputFormat,
) -> Result<ExitCode> {
    let entries = batch::load_from_file(path)
        .with_context(|| format!("Failed to load batch input: {}", path.display()))?;
    info!(rows = entries.len(), file = %path.display(), "loaded batch input");

    let (results, failed) = calculate_entries(calculator, &entries);
    write_results(output, format, &results)?;

    info!(succeeded = results.len(), failed, "batch complete");
    if failed > 0 {
        eprintln!("{failed} of {} rows could not be calculated", entries.len());
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

/// Returns the successful results in row order and the number of failures.
fn calculate_entries(
    calculator: &NetPayCalculator<'_>,
    entries: &[BatchEntry],
) -> (Vec<CalculationResult>, usize) {
    let mut results = Vec::with_capacity(entries.len());
    let mut failed = 0;

    for entry in entries {
        match calculate(calculator, &entry.base, entry.contract) {
            Ok(result) => results.push(result),
            Err(error) => {
                let message = format!("{error:#}");
                warn!(row = entry.row, error = %message, "row skipped");
                eprintln!("row {}: {message}", entry.row);
                failed += 1;
            }
        }
    }

    (results, failed)
}
