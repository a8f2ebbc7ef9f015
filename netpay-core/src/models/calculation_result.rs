//! Result records filled in by the calculation pipeline.
//!
//! Every monetary field is an [`Amount`]: a value that has already been
//! rounded to its storage scale and checked to be non-negative. The only way
//! to get one is through [`Amount::currency`] or [`Amount::integer`], so a
//! record can never hold an unrounded or negative field.

use std::fmt;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::TaxError;
use crate::calculations::money::{round_half_up, round_to_integer};
use crate::models::ContractType;

/// A validated, non-negative amount stored in a result record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Amount(Decimal);

impl Amount {
    /// Rounds `raw` half-up to two decimal places and validates it.
    ///
    /// # Errors
    ///
    /// Returns [`TaxError::NegativeTaxValue`] naming `field` if the rounded
    /// value is below zero.
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use netpay_core::Amount;
    ///
    /// let tax = Amount::currency("rent_tax", dec!(45.4536)).unwrap();
    /// assert_eq!(tax.value(), dec!(45.45));
    ///
    /// assert!(Amount::currency("collected_tax", dec!(-0.01)).is_err());
    /// ```
    pub fn currency(
        field: &'static str,
        raw: Decimal,
    ) -> Result<Self, TaxError> {
        Self::validated(field, round_half_up(raw))
    }

    /// Rounds `raw` half-up to whole units and validates it.
    ///
    /// # Errors
    ///
    /// Returns [`TaxError::NegativeTaxValue`] naming `field` if the rounded
    /// value is below zero.
    pub fn integer(
        field: &'static str,
        raw: Decimal,
    ) -> Result<Self, TaxError> {
        Self::validated(field, round_to_integer(raw))
    }

    fn validated(
        field: &'static str,
        mut value: Decimal,
    ) -> Result<Self, TaxError> {
        if value < Decimal::ZERO {
            return Err(TaxError::NegativeTaxValue { field, value });
        }
        // -0.004 rounds to a signed zero
        value.set_sign_positive(true);
        Ok(Self(value))
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

impl fmt::Display for Amount {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Social-insurance contributions, all computed from gross income.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SocialTaxes {
    pub(crate) retirement: Amount,
    pub(crate) rent: Amount,
    pub(crate) sick: Amount,
}

impl SocialTaxes {
    pub fn retirement(&self) -> Amount {
        self.retirement
    }

    pub fn rent(&self) -> Amount {
        self.rent
    }

    pub fn sick(&self) -> Amount {
        self.sick
    }

    /// Sum of the three stored contributions.
    pub fn total(&self) -> Decimal {
        self.retirement.value() + self.rent.value() + self.sick.value()
    }
}

/// Health-insurance contributions, computed from the health-taxable base.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthTaxes {
    pub(crate) upper: Amount,
    pub(crate) lower: Amount,
}

impl HealthTaxes {
    /// Full health contribution, deducted from pay.
    pub fn upper(&self) -> Amount {
        self.upper
    }

    /// Portion of the health contribution credited against the tax advance.
    pub fn lower(&self) -> Amount {
        self.lower
    }
}

/// Income-tax-advance lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IncomeTax {
    pub(crate) deductible_costs: Amount,
    pub(crate) income_tax_base: Amount,
    pub(crate) rounded_income_tax_base: Amount,
    pub(crate) income_tax_18: Amount,
    pub(crate) collected_tax: Amount,
    pub(crate) tax_office_advance: Amount,
    pub(crate) rounded_tax_office_advance: Amount,
}

impl IncomeTax {
    pub fn deductible_costs(&self) -> Amount {
        self.deductible_costs
    }

    pub fn income_tax_base(&self) -> Amount {
        self.income_tax_base
    }

    /// Income-tax base rounded to whole units.
    pub fn rounded_income_tax_base(&self) -> Amount {
        self.rounded_income_tax_base
    }

    /// 18 % of the rounded income-tax base.
    pub fn income_tax_18(&self) -> Amount {
        self.income_tax_18
    }

    pub fn collected_tax(&self) -> Amount {
        self.collected_tax
    }

    pub fn tax_office_advance(&self) -> Amount {
        self.tax_office_advance
    }

    /// Tax-office advance rounded to whole units.
    pub fn rounded_tax_office_advance(&self) -> Amount {
        self.rounded_tax_office_advance
    }
}

/// Result for income paid under an employment contract.
///
/// Fields are read through [`CalculationResult`]. Only the pipeline fills
/// them in, so a finished record cannot be edited into an inconsistent one:
///
/// ```compile_fail
/// use netpay_core::{ContractType, NetPayCalculator, TaxBase};
///
/// let base = TaxBase::parse("4000").unwrap();
/// let result = NetPayCalculator::default()
///     .calculate(&base, ContractType::Employment)
///     .unwrap();
/// if let netpay_core::CalculationResult::Employment(mut r) = result {
///     r.pay = r.gross_base;
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmploymentResult {
    pub(crate) gross_base: Amount,
    pub(crate) social: SocialTaxes,
    /// Gross income less social taxes.
    pub(crate) tax_base: Amount,
    pub(crate) health: HealthTaxes,
    pub(crate) income_tax: IncomeTax,
    /// Monthly allowance subtracted from the tax advance.
    pub(crate) tax_free_amount: Amount,
    pub(crate) pay: Amount,
}

/// Result for income paid under a mandate contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MandateResult {
    pub(crate) gross_base: Amount,
    pub(crate) social: SocialTaxes,
    /// Gross income less social taxes.
    pub(crate) tax_base: Amount,
    pub(crate) health: HealthTaxes,
    pub(crate) income_tax: IncomeTax,
    pub(crate) pay: Amount,
}

/// A finished calculation, one shape per contract type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "contract_type", rename_all = "lowercase")]
pub enum CalculationResult {
    Employment(EmploymentResult),
    Mandate(MandateResult),
}

impl CalculationResult {
    pub fn contract_type(&self) -> ContractType {
        match self {
            Self::Employment(_) => ContractType::Employment,
            Self::Mandate(_) => ContractType::Mandate,
        }
    }

    pub fn gross_base(&self) -> Amount {
        match self {
            Self::Employment(r) => r.gross_base,
            Self::Mandate(r) => r.gross_base,
        }
    }

    pub fn social(&self) -> &SocialTaxes {
        match self {
            Self::Employment(r) => &r.social,
            Self::Mandate(r) => &r.social,
        }
    }

    pub fn tax_base(&self) -> Amount {
        match self {
            Self::Employment(r) => r.tax_base,
            Self::Mandate(r) => r.tax_base,
        }
    }

    pub fn health(&self) -> &HealthTaxes {
        match self {
            Self::Employment(r) => &r.health,
            Self::Mandate(r) => &r.health,
        }
    }

    pub fn income_tax(&self) -> &IncomeTax {
        match self {
            Self::Employment(r) => &r.income_tax,
            Self::Mandate(r) => &r.income_tax,
        }
    }

    /// The tax-free amount, which only employment contracts receive.
    pub fn tax_free_amount(&self) -> Option<Amount> {
        match self {
            Self::Employment(r) => Some(r.tax_free_amount),
            Self::Mandate(_) => None,
        }
    }

    /// Net pay.
    pub fn pay(&self) -> Amount {
        match self {
            Self::Employment(r) => r.pay,
            Self::Mandate(r) => r.pay,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn currency_amount_is_rounded_half_up() {
        let amount = Amount::currency("health_upper_tax", dec!(310.644)).unwrap();

        assert_eq!(amount.value(), dec!(310.64));
    }

    #[test]
    fn integer_amount_has_no_decimal_places() {
        let amount = Amount::integer("rounded_tax_office_advance", dec!(287.37)).unwrap();

        assert_eq!(amount.to_string(), "287");
    }

    #[test]
    fn negative_amount_names_the_field() {
        let result = Amount::currency("income_tax_base", dec!(-111.25));

        assert_eq!(
            result,
            Err(TaxError::NegativeTaxValue {
                field: "income_tax_base",
                value: dec!(-111.25),
            })
        );
    }

    #[test]
    fn value_rounding_to_zero_is_accepted_without_sign() {
        let amount = Amount::currency("collected_tax", dec!(-0.004)).unwrap();

        assert_eq!(amount.to_string(), "0.00");
    }

    #[test]
    fn social_total_sums_stored_values() {
        let social = SocialTaxes {
            retirement: Amount::currency("retirement_tax", dec!(390.40)).unwrap(),
            rent: Amount::currency("rent_tax", dec!(60.00)).unwrap(),
            sick: Amount::currency("sick_tax", dec!(98.00)).unwrap(),
        };

        assert_eq!(social.total(), dec!(548.40));
        assert_eq!(social.rent().value(), dec!(60.00));
    }

    #[test]
    fn result_accessors_read_the_stored_record() {
        let amount = |raw| Amount::currency("test", raw).unwrap();
        let result = CalculationResult::Mandate(MandateResult {
            gross_base: amount(dec!(3000.00)),
            social: SocialTaxes {
                retirement: amount(dec!(292.80)),
                rent: amount(dec!(45.00)),
                sick: amount(dec!(73.50)),
            },
            tax_base: amount(dec!(2588.70)),
            health: HealthTaxes {
                upper: amount(dec!(232.98)),
                lower: amount(dec!(200.62)),
            },
            income_tax: IncomeTax {
                deductible_costs: amount(dec!(517.74)),
                income_tax_base: amount(dec!(2070.96)),
                rounded_income_tax_base: Amount::integer("test", dec!(2071)).unwrap(),
                income_tax_18: amount(dec!(372.78)),
                collected_tax: amount(dec!(372.78)),
                tax_office_advance: amount(dec!(172.16)),
                rounded_tax_office_advance: Amount::integer("test", dec!(172)).unwrap(),
            },
            pay: amount(dec!(2183.72)),
        });

        assert_eq!(result.contract_type(), ContractType::Mandate);
        assert_eq!(result.health().lower().value(), dec!(200.62));
        assert_eq!(result.income_tax().rounded_tax_office_advance().value(), dec!(172));
        assert_eq!(result.tax_free_amount(), None);
        assert_eq!(result.pay().value(), dec!(2183.72));
    }
}
