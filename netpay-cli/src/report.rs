//! Rendering of calculation results.
//!
//! [`Report`] prints the itemized text report a person reads; [`write_csv`]
//! writes one flat row per result for spreadsheets.

use std::fmt;
use std::io::Write;

use clap::ValueEnum;
use netpay_core::{Amount, CalculationResult, RateTable, TaxKind};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Csv,
}

const LABEL_WIDTH: usize = 44;
const AMOUNT_WIDTH: usize = 12;

/// Itemized text report for one result.
pub struct Report<'a>(pub &'a CalculationResult);

impl Report<'_> {
    fn line(
        f: &mut fmt::Formatter<'_>,
        label: &str,
        amount: Amount,
    ) -> fmt::Result {
        writeln!(
            f,
            "  {label:<LABEL_WIDTH$}{:>AMOUNT_WIDTH$}",
            amount.to_string()
        )
    }
}

/// Label with the kind's percentage appended, e.g. `Rent tax (1.5%)`.
fn rate_label(
    name: &str,
    kind: TaxKind,
) -> String {
    match RateTable::standard().percentage(kind) {
        Ok(percent) => format!("{name} ({percent}%)"),
        Err(_) => name.to_string(),
    }
}

impl fmt::Display for Report<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let result = self.0;
        let social = result.social();
        let health = result.health();
        let income_tax = result.income_tax();

        writeln!(f, "{}", result.contract_type().label())?;
        Self::line(f, "Gross income", result.gross_base())?;
        Self::line(f, &rate_label("Retirement tax", TaxKind::Retirement), social.retirement())?;
        Self::line(f, &rate_label("Rent tax", TaxKind::Rent), social.rent())?;
        Self::line(f, &rate_label("Sickness tax", TaxKind::Sick), social.sick())?;
        Self::line(f, "Health tax base", result.tax_base())?;
        Self::line(f, &rate_label("Health tax", TaxKind::HealthUpper), health.upper())?;
        Self::line(
            f,
            &rate_label("Health tax, deductible", TaxKind::HealthLower),
            health.lower(),
        )?;
        Self::line(f, "Deductible costs", income_tax.deductible_costs())?;
        Self::line(f, "Income tax base", income_tax.income_tax_base())?;
        Self::line(f, "Income tax base, rounded", income_tax.rounded_income_tax_base())?;
        Self::line(
            f,
            &rate_label("Income tax advance", TaxKind::TaxAdvance),
            income_tax.income_tax_18(),
        )?;
        if let Some(tax_free) = result.tax_free_amount() {
            Self::line(f, "Tax-free amount", tax_free)?;
        }
        Self::line(f, "Collected tax", income_tax.collected_tax())?;
        Self::line(f, "Tax office advance", income_tax.tax_office_advance())?;
        Self::line(f, "Tax office advance, rounded", income_tax.rounded_tax_office_advance())?;
        Self::line(f, "Net pay", result.pay())
    }
}

/// One CSV row. Fields that do not apply to a contract type are left empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportRow {
    pub contract_type: &'static str,
    pub gross_income: Decimal,
    pub retirement_tax: Decimal,
    pub rent_tax: Decimal,
    pub sick_tax: Decimal,
    pub tax_base: Decimal,
    pub health_upper_tax: Decimal,
    pub health_lower_tax: Decimal,
    pub deductible_costs: Decimal,
    pub income_tax_base: Decimal,
    pub rounded_income_tax_base: Decimal,
    pub income_tax_18: Decimal,
    pub tax_free_amount: Option<Decimal>,
    pub collected_tax: Decimal,
    pub tax_office_advance: Decimal,
    pub rounded_tax_office_advance: Decimal,
    pub pay: Decimal,
}

impl From<&CalculationResult> for ReportRow {
    fn from(result: &CalculationResult) -> Self {
        let social = result.social();
        let health = result.health();
        let income_tax = result.income_tax();

        Self {
            contract_type: result.contract_type().as_str(),
            gross_income: result.gross_base().value(),
            retirement_tax: social.retirement().value(),
            rent_tax: social.rent().value(),
            sick_tax: social.sick().value(),
            tax_base: result.tax_base().value(),
            health_upper_tax: health.upper().value(),
            health_lower_tax: health.lower().value(),
            deductible_costs: income_tax.deductible_costs().value(),
            income_tax_base: income_tax.income_tax_base().value(),
            rounded_income_tax_base: income_tax.rounded_income_tax_base().value(),
            income_tax_18: income_tax.income_tax_18().value(),
            tax_free_amount: result.tax_free_amount().map(|a| a.value()),
            collected_tax: income_tax.collected_tax().value(),
            tax_office_advance: income_tax.tax_office_advance().value(),
            rounded_tax_office_advance: income_tax.rounded_tax_office_advance().value(),
            pay: result.pay().value(),
        }
    }
}

/// Writes a header row and one row per result.
pub fn write_csv<W: Write>(
    writer: W,
    results: &[CalculationResult],
) -> Result<(), csv::Error> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for result in results {
        csv_writer.serialize(ReportRow::from(result))?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Writes `results` to `out` in the requested format.
pub fn write_results<W: Write>(
    mut out: W,
    format: OutputFormat,
    results: &[CalculationResult],
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => {
            for (idx, result) in results.iter().enumerate() {
                if idx > 0 {
                    writeln!(out)?;
                }
                write!(out, "{}", Report(result))?;
            }
        }
        OutputFormat::Csv => write_csv(&mut out, results)?,
    }
    out.flush()?;
    Ok(())
}
