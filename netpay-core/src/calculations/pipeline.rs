//! Net pay calculation for employment and mandate contracts.
//!
//! # Pipeline
//!
//! Each step reads only values stored by earlier steps. Stored values are
//! already rounded, so later steps build on the rounded figures.
//!
//! | Step | Field | Employment | Mandate |
//! |------|-------|------------|---------|
//! | 1    | `retirement_tax`, `rent_tax`, `sick_tax` | gross × rate | gross × rate |
//! | 2    | `tax_base` | gross − social taxes | gross − social taxes |
//! | 3    | `health_upper_tax`, `health_lower_tax` | tax_base × rate | tax_base × rate |
//! | 4    | `deductible_costs` | 111.25 | tax_base × 20 % |
//! | 5    | `income_tax_base` (+ rounded to 0 dp) | tax_base − deductible_costs | tax_base − deductible_costs |
//! | 6    | `income_tax_18` | rounded base × 18 % | rounded base × 18 % |
//! | 7    | `collected_tax` | income_tax_18 − 46.33 | income_tax_18 |
//! | 8    | `tax_office_advance` (+ rounded to 0 dp) | income_tax_18 − health_lower − 46.33 | income_tax_18 − health_lower |
//! | 9    | `pay` | gross − (social + health_upper + rounded advance) | same |
//!
//! Any field that would be negative stops the calculation with
//! [`TaxError::NegativeTaxValue`]; nothing partially filled is returned.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use netpay_core::{ContractType, NetPayCalculator, RateTable, TaxBase};
//!
//! let calculator = NetPayCalculator::new(RateTable::standard());
//! let base = TaxBase::new(dec!(4000.00)).unwrap();
//!
//! let result = calculator.calculate(&base, ContractType::Employment).unwrap();
//!
//! assert_eq!(result.social().retirement().value(), dec!(390.40));
//! assert_eq!(result.income_tax().rounded_tax_office_advance().value(), dec!(287));
//! assert_eq!(result.pay().value(), dec!(2853.96));
//! ```

use rust_decimal::Decimal;

use crate::TaxError;
use crate::calculations::rates::{
    EMPLOYMENT_DEDUCTIBLE_COSTS, EMPLOYMENT_TAX_FREE_AMOUNT, MANDATE_DEDUCTIBLE_RATE, RateTable,
    TaxKind, compute,
};
use crate::models::{
    Amount, CalculationResult, ContractType, EmploymentResult, HealthTaxes, IncomeTax,
    MandateResult, SocialTaxes, TaxBase,
};

/// Runs the net pay pipeline against a rate table.
///
/// The calculator only borrows the table, so one table can back many
/// calculators across threads.
#[derive(Debug, Clone, Copy)]
pub struct NetPayCalculator<'a> {
    rates: &'a RateTable,
}

impl Default for NetPayCalculator<'static> {
    fn default() -> Self {
        Self::new(RateTable::standard())
    }
}

impl<'a> NetPayCalculator<'a> {
    pub fn new(rates: &'a RateTable) -> Self {
        Self { rates }
    }

    /// Calculates net pay for `base` under `contract`.
    ///
    /// # Errors
    ///
    /// Returns [`TaxError`] if:
    /// - a computed field is negative ([`TaxError::NegativeTaxValue`])
    /// - the rate table lacks one of the six tax kinds ([`TaxError::UnknownTaxKind`])
    pub fn calculate(
        &self,
        base: &TaxBase,
        contract: ContractType,
    ) -> Result<CalculationResult, TaxError> {
        let gross_base = Amount::currency("gross_base", base.amount())?;

        // Step 1: social taxes from gross
        let social = self.social_taxes(gross_base)?;

        // Step 2: base for health taxes
        let tax_base = self.health_tax_base(gross_base, &social)?;

        // Step 3: health taxes
        let health = self.health_taxes(tax_base)?;

        // Steps 4-8: income tax advance
        let income_tax = self.income_tax(contract, tax_base, &health)?;

        // Step 9: net pay
        let pay = self.net_pay(gross_base, &social, &health, &income_tax)?;

        let result = match contract {
            ContractType::Employment => CalculationResult::Employment(EmploymentResult {
                gross_base,
                social,
                tax_base,
                health,
                income_tax,
                tax_free_amount: Amount::currency("tax_free_amount", tax_free_amount(contract))?,
                pay,
            }),
            ContractType::Mandate => CalculationResult::Mandate(MandateResult {
                gross_base,
                social,
                tax_base,
                health,
                income_tax,
                pay,
            }),
        };

        Ok(result)
    }

    /// Computes one tax kind from a stored amount and stores it under the
    /// kind's field name.
    fn tax(
        &self,
        kind: TaxKind,
        base: Amount,
    ) -> Result<Amount, TaxError> {
        Amount::currency(kind.field_name(), compute(self.rates, kind, base.value())?)
    }

    /// Calculates retirement, rent and sick contributions (step 1).
    fn social_taxes(
        &self,
        gross_base: Amount,
    ) -> Result<SocialTaxes, TaxError> {
        let [retirement, rent, sick] = TaxKind::SOCIAL.map(|kind| self.tax(kind, gross_base));
        Ok(SocialTaxes {
            retirement: retirement?,
            rent: rent?,
            sick: sick?,
        })
    }

    /// Subtracts social taxes from gross income (step 2).
    fn health_tax_base(
        &self,
        gross_base: Amount,
        social: &SocialTaxes,
    ) -> Result<Amount, TaxError> {
        Amount::currency("tax_base", gross_base.value() - social.total())
    }

    /// Calculates both health contributions from the health-taxable base (step 3).
    fn health_taxes(
        &self,
        tax_base: Amount,
    ) -> Result<HealthTaxes, TaxError> {
        let [upper, lower] = TaxKind::HEALTH.map(|kind| self.tax(kind, tax_base));
        Ok(HealthTaxes {
            upper: upper?,
            lower: lower?,
        })
    }

    /// Calculates the income-tax lines (steps 4 to 8).
    fn income_tax(
        &self,
        contract: ContractType,
        tax_base: Amount,
        health: &HealthTaxes,
    ) -> Result<IncomeTax, TaxError> {
        let deductible_costs = self.deductible_costs(contract, tax_base)?;

        let income_tax_base =
            Amount::currency("income_tax_base", tax_base.value() - deductible_costs.value())?;
        let rounded_income_tax_base =
            Amount::integer("rounded_income_tax_base", income_tax_base.value())?;

        let income_tax_18 = self.tax(TaxKind::TaxAdvance, rounded_income_tax_base)?;

        let tax_free = tax_free_amount(contract);
        let collected_tax = Amount::currency("collected_tax", income_tax_18.value() - tax_free)?;

        let tax_office_advance = Amount::currency(
            "tax_office_advance",
            income_tax_18.value() - health.lower.value() - tax_free,
        )?;
        let rounded_tax_office_advance =
            Amount::integer("rounded_tax_office_advance", tax_office_advance.value())?;

        Ok(IncomeTax {
            deductible_costs,
            income_tax_base,
            rounded_income_tax_base,
            income_tax_18,
            collected_tax,
            tax_office_advance,
            rounded_tax_office_advance,
        })
    }

    /// Deductible costs: flat for employment, proportional for mandate (step 4).
    fn deductible_costs(
        &self,
        contract: ContractType,
        tax_base: Amount,
    ) -> Result<Amount, TaxError> {
        let costs = match contract {
            ContractType::Employment => EMPLOYMENT_DEDUCTIBLE_COSTS,
            ContractType::Mandate => tax_base.value() * MANDATE_DEDUCTIBLE_RATE,
        };
        Amount::currency("deductible_costs", costs)
    }

    /// Gross income less everything withheld (step 9).
    fn net_pay(
        &self,
        gross_base: Amount,
        social: &SocialTaxes,
        health: &HealthTaxes,
        income_tax: &IncomeTax,
    ) -> Result<Amount, TaxError> {
        let withheld =
            social.total() + health.upper.value() + income_tax.rounded_tax_office_advance.value();
        Amount::currency("pay", gross_base.value() - withheld)
    }
}

/// Allowance credited against the income-tax advance.
fn tax_free_amount(contract: ContractType) -> Decimal {
    match contract {
        ContractType::Employment => EMPLOYMENT_TAX_FREE_AMOUNT,
        ContractType::Mandate => Decimal::ZERO,
    }
}
