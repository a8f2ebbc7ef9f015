use std::str::FromStr;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::TaxError;
use crate::calculations::money::{Money, to_currency};

/// Gross income a calculation starts from.
///
/// Holds an exact, non-negative [`Decimal`]. There is no constructor taking a
/// float; see [`currency_from_f64_approx`](crate::calculations::money::currency_from_f64_approx)
/// for the explicit conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TaxBase(Decimal);

impl TaxBase {
    /// Wraps a gross income amount.
    ///
    /// # Errors
    ///
    /// Returns [`TaxError::NegativeAmount`] if `amount` is below zero.
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use netpay_core::TaxBase;
    ///
    /// assert_eq!(TaxBase::new(dec!(23.32)).unwrap().amount(), dec!(23.32));
    /// assert!(TaxBase::new(dec!(-23.32)).is_err());
    /// ```
    pub fn new(amount: Decimal) -> Result<Self, TaxError> {
        if amount < Decimal::ZERO {
            return Err(TaxError::NegativeAmount(amount));
        }
        Ok(Self(amount))
    }

    /// Parses user input into a currency-rounded gross income.
    ///
    /// # Errors
    ///
    /// Returns [`TaxError::InvalidAmount`] if `input` is not a number and
    /// [`TaxError::NegativeAmount`] if it is below zero.
    pub fn parse(input: &str) -> Result<Self, TaxError> {
        Self::new(to_currency(input)?)
    }

    pub fn amount(&self) -> Money {
        self.0
    }
}

impl FromStr for TaxBase {
    type Err = TaxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<Decimal> for TaxBase {
    type Error = TaxError;

    fn try_from(amount: Decimal) -> Result<Self, Self::Error> {
        Self::new(amount)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn new_keeps_exact_amount() {
        let base = TaxBase::new(dec!(23.32)).unwrap();

        assert_eq!(base.amount(), dec!(23.32));
    }

    #[test]
    fn new_accepts_zero() {
        assert!(TaxBase::new(Decimal::ZERO).is_ok());
    }

    #[test]
    fn new_rejects_negative() {
        assert_eq!(
            TaxBase::new(dec!(-23.32)),
            Err(TaxError::NegativeAmount(dec!(-23.32)))
        );
    }

    #[test]
    fn parse_rounds_to_currency() {
        let base: TaxBase = "4000.005".parse().unwrap();

        assert_eq!(base.amount(), dec!(4000.01));
    }

    #[test]
    fn parse_rejects_non_decimal_input() {
        assert_eq!(
            TaxBase::parse("23,32 PLN"),
            Err(TaxError::InvalidAmount("23,32 PLN".to_string()))
        );
    }

    #[test]
    fn parse_rejects_decimal_comma() {
        assert_eq!(
            TaxBase::parse("4000,00"),
            Err(TaxError::InvalidAmount("4000,00".to_string()))
        );
    }

    #[test]
    fn parse_accepts_thousands_separator() {
        assert_eq!(TaxBase::parse("4,000.00").unwrap().amount(), dec!(4000.00));
    }

    #[test]
    fn parse_rejects_negative_input() {
        assert!(matches!(
            TaxBase::parse("-1"),
            Err(TaxError::NegativeAmount(_))
        ));
    }
}
