//! Fixed contribution rates and the per-kind tax calculator.
//!
//! | Kind           | Rate   | Base                  |
//! |----------------|--------|-----------------------|
//! | `retirement`   | 9.76 % | gross income          |
//! | `rent`         | 1.5 %  | gross income          |
//! | `sick`         | 2.45 % | gross income          |
//! | `health_upper` | 9 %    | health-taxable base   |
//! | `health_lower` | 7.75 % | health-taxable base   |
//! | `tax_advance`  | 18 %   | rounded income-tax base |
//!
//! Rates are compiled in. A [`RateTable`] is immutable once built, so a single
//! table can be shared by any number of concurrent calculations.

use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::TaxError;
use crate::calculations::money::Money;

const RETIREMENT_PERCENT: Decimal = dec!(9.76);
const RENT_PERCENT: Decimal = dec!(1.5);
const SICK_PERCENT: Decimal = dec!(2.45);
const HEALTH_UPPER_PERCENT: Decimal = dec!(9);
const HEALTH_LOWER_PERCENT: Decimal = dec!(7.75);
const TAX_ADVANCE_PERCENT: Decimal = dec!(18);

/// Flat deductible costs for an employment contract.
pub const EMPLOYMENT_DEDUCTIBLE_COSTS: Decimal = dec!(111.25);

/// Monthly tax-free amount credited on an employment contract.
pub const EMPLOYMENT_TAX_FREE_AMOUNT: Decimal = dec!(46.33);

/// Share of the health-taxable base deductible on a mandate contract.
pub const MANDATE_DEDUCTIBLE_RATE: Decimal = dec!(0.20);

/// One category of percentage-based withholding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaxKind {
    Retirement,
    Rent,
    Sick,
    HealthUpper,
    HealthLower,
    TaxAdvance,
}

impl TaxKind {
    /// Every tax kind, in pipeline order.
    pub const ALL: [TaxKind; 6] = [
        TaxKind::Retirement,
        TaxKind::Rent,
        TaxKind::Sick,
        TaxKind::HealthUpper,
        TaxKind::HealthLower,
        TaxKind::TaxAdvance,
    ];

    /// Social taxes, deducted first from gross income.
    pub const SOCIAL: [TaxKind; 3] = [TaxKind::Retirement, TaxKind::Rent, TaxKind::Sick];

    /// Health taxes, computed from the post-social-tax base.
    pub const HEALTH: [TaxKind; 2] = [TaxKind::HealthUpper, TaxKind::HealthLower];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Retirement => "retirement",
            Self::Rent => "rent",
            Self::Sick => "sick",
            Self::HealthUpper => "health_upper",
            Self::HealthLower => "health_lower",
            Self::TaxAdvance => "tax_advance",
        }
    }

    /// Resolves a tax-kind identifier such as `"rent"`.
    ///
    /// # Errors
    ///
    /// Returns [`TaxError::UnknownTaxKind`] for any other identifier.
    pub fn parse(s: &str) -> Result<Self, TaxError> {
        match s {
            "retirement" => Ok(Self::Retirement),
            "rent" => Ok(Self::Rent),
            "sick" => Ok(Self::Sick),
            "health_upper" => Ok(Self::HealthUpper),
            "health_lower" => Ok(Self::HealthLower),
            "tax_advance" => Ok(Self::TaxAdvance),
            _ => Err(TaxError::UnknownTaxKind(s.to_string())),
        }
    }
}

impl TaxKind {
    /// Name of the result field this kind's tax is stored under.
    pub fn field_name(&self) -> &'static str {
        match self {
            Self::Retirement => "retirement_tax",
            Self::Rent => "rent_tax",
            Self::Sick => "sick_tax",
            Self::HealthUpper => "health_upper_tax",
            Self::HealthLower => "health_lower_tax",
            Self::TaxAdvance => "income_tax_18",
        }
    }
}

impl fmt::Display for TaxKind {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lookup from tax kind to its rate (percentage / 100).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateTable {
    rates: HashMap<TaxKind, Decimal>,
}

impl RateTable {
    /// The compiled-in rate table.
    pub fn standard() -> &'static RateTable {
        static STANDARD: OnceLock<RateTable> = OnceLock::new();
        STANDARD.get_or_init(|| {
            Self::from_percentages([
                (TaxKind::Retirement, RETIREMENT_PERCENT),
                (TaxKind::Rent, RENT_PERCENT),
                (TaxKind::Sick, SICK_PERCENT),
                (TaxKind::HealthUpper, HEALTH_UPPER_PERCENT),
                (TaxKind::HealthLower, HEALTH_LOWER_PERCENT),
                (TaxKind::TaxAdvance, TAX_ADVANCE_PERCENT),
            ])
        })
    }

    pub(crate) fn from_percentages(
        percentages: impl IntoIterator<Item = (TaxKind, Decimal)>
    ) -> Self {
        let rates = percentages
            .into_iter()
            .map(|(kind, percent)| (kind, percent / Decimal::ONE_HUNDRED))
            .collect();
        Self { rates }
    }

    /// Returns the rate for `kind`.
    ///
    /// # Errors
    ///
    /// Returns [`TaxError::UnknownTaxKind`] if the table has no entry for `kind`.
    pub fn rate(
        &self,
        kind: TaxKind,
    ) -> Result<Decimal, TaxError> {
        self.rates
            .get(&kind)
            .copied()
            .ok_or_else(|| TaxError::UnknownTaxKind(kind.as_str().to_string()))
    }

    /// The rate for `kind` as a percentage, e.g. `9.76` for retirement.
    pub fn percentage(
        &self,
        kind: TaxKind,
    ) -> Result<Decimal, TaxError> {
        self.rate(kind)
            .map(|rate| (rate * Decimal::ONE_HUNDRED).normalize())
    }
}

/// Computes `base × rate` for one tax kind.
///
/// The product is returned unrounded; rounding happens when the value is
/// stored into a result.
///
/// # Errors
///
/// Returns [`TaxError::UnknownTaxKind`] if `rates` has no entry for `kind`.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use netpay_core::calculations::rates::{RateTable, TaxKind, compute};
///
/// let tax = compute(RateTable::standard(), TaxKind::Rent, dec!(3030.24)).unwrap();
/// assert_eq!(tax, dec!(45.4536));
/// ```
pub fn compute(
    rates: &RateTable,
    kind: TaxKind,
    base: Money,
) -> Result<Money, TaxError> {
    Ok(base * rates.rate(kind)?)
}

/// A calculator bound to a single tax kind and its rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaxCalculator {
    kind: TaxKind,
    rate: Decimal,
}

impl TaxCalculator {
    pub fn kind(&self) -> TaxKind {
        self.kind
    }

    pub fn rate(&self) -> Decimal {
        self.rate
    }

    /// Returns `base × rate`, unrounded.
    pub fn apply(
        &self,
        base: Money,
    ) -> Money {
        base * self.rate
    }
}

/// Builds a calculator for the tax kind named `kind` from the standard rates.
///
/// # Errors
///
/// Returns [`TaxError::UnknownTaxKind`] if `kind` is not a known identifier.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use netpay_core::calculations::rates::make_tax_calculator;
///
/// let rent = make_tax_calculator("rent").unwrap();
/// assert_eq!(rent.apply(dec!(3030.24)), dec!(45.4536));
///
/// assert!(make_tax_calculator("unknown").is_err());
/// ```
pub fn make_tax_calculator(kind: &str) -> Result<TaxCalculator, TaxError> {
    let kind = TaxKind::parse(kind)?;
    let rate = RateTable::standard().rate(kind)?;
    Ok(TaxCalculator { kind, rate })
}
