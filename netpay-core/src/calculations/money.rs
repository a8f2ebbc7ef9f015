//! Exact decimal money utilities.
//!
//! Every amount in this crate is a [`Decimal`]. Values are quantized when they
//! are fixed into a result: to two decimal places for currency, or to whole
//! units for the two integer-rounded fields. Both use half-up rounding, where
//! a value exactly on the midpoint moves away from zero.
//!
//! Binary floats never enter a calculation. [`MoneySource`] is implemented for
//! strings, integers and [`Decimal`] only; a float has to go through
//! [`currency_from_f64_approx`], which names the approximation it makes.

use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::TaxError;

/// A monetary amount.
pub type Money = Decimal;

/// Number of decimal places a currency value is stored with.
pub const CURRENCY_SCALE: u32 = 2;

/// Rounds a decimal value to exactly two decimal places using half-up rounding.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use netpay_core::calculations::money::round_half_up;
///
/// assert_eq!(round_half_up(dec!(123.454)), dec!(123.45));
/// assert_eq!(round_half_up(dec!(123.455)), dec!(123.46));
/// assert_eq!(round_half_up(dec!(-123.455)), dec!(-123.46)); // Away from zero
/// ```
pub fn round_half_up(value: Decimal) -> Money {
    let mut rounded =
        value.round_dp_with_strategy(CURRENCY_SCALE, RoundingStrategy::MidpointAwayFromZero);
    // Pad whole numbers so that 23 is carried as 23.00.
    rounded.rescale(CURRENCY_SCALE);
    rounded
}

/// Rounds a decimal value to whole units using half-up rounding.
///
/// ```
/// use rust_decimal_macros::dec;
/// use netpay_core::calculations::money::round_to_integer;
///
/// assert_eq!(round_to_integer(dec!(287.37)), dec!(287));
/// assert_eq!(round_to_integer(dec!(23.50)), dec!(24));
/// ```
pub fn round_to_integer(value: Decimal) -> Money {
    value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Input types that can be turned into money without approximation.
pub trait MoneySource {
    /// Returns the exact decimal value of `self`.
    fn to_decimal(self) -> Result<Decimal, TaxError>;
}

impl MoneySource for Decimal {
    fn to_decimal(self) -> Result<Decimal, TaxError> {
        Ok(self)
    }
}

impl MoneySource for &Decimal {
    fn to_decimal(self) -> Result<Decimal, TaxError> {
        Ok(*self)
    }
}

impl MoneySource for &str {
    fn to_decimal(self) -> Result<Decimal, TaxError> {
        parse_decimal(self)
    }
}

impl MoneySource for String {
    fn to_decimal(self) -> Result<Decimal, TaxError> {
        parse_decimal(&self)
    }
}

impl MoneySource for &String {
    fn to_decimal(self) -> Result<Decimal, TaxError> {
        parse_decimal(self)
    }
}

macro_rules! integer_money_source {
    ($($ty:ty),*) => {
        $(
            impl MoneySource for $ty {
                fn to_decimal(self) -> Result<Decimal, TaxError> {
                    Ok(Decimal::from(self))
                }
            }
        )*
    };
}

integer_money_source!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

/// Digits grouped in threes by commas, with an optional fractional part.
static THOUSANDS_GROUPED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?\d{1,3}(,\d{3})+(\.\d+)?$").expect("valid thousands regex")
});

/// Trims whitespace and strips thousands separators.
///
/// Returns `None` when a comma is present but does not separate groups of
/// three digits, as in the decimal-comma form `3000,50`.
fn normalize_decimal_input(s: &str) -> Option<String> {
    let trimmed = s.trim();
    if !trimmed.contains(',') {
        return Some(trimmed.to_string());
    }
    THOUSANDS_GROUPED
        .is_match(trimmed)
        .then(|| trimmed.replace(',', ""))
}

/// Parses a string into an exact [`Decimal`].
///
/// Accepts comma thousands separators (e.g. `"1,234.56"`). Any other comma,
/// including a decimal comma, is rejected rather than guessed at. Empty input
/// is not a number and is rejected too.
pub fn parse_decimal(s: &str) -> Result<Decimal, TaxError> {
    let invalid = || TaxError::InvalidAmount(s.to_string());
    let normalized = normalize_decimal_input(s).ok_or_else(invalid)?;
    if normalized.is_empty() {
        return Err(invalid());
    }
    Decimal::from_str(&normalized).map_err(|_| invalid())
}

/// Converts a value into a currency amount with two decimal places.
///
/// # Errors
///
/// Returns [`TaxError::InvalidAmount`] if a string input cannot be parsed.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use netpay_core::calculations::money::to_currency;
///
/// assert_eq!(to_currency("23.435").unwrap(), dec!(23.44));
/// assert_eq!(to_currency(23).unwrap(), dec!(23.00));
/// assert_eq!(to_currency(dec!(23.43256)).unwrap(), dec!(23.43));
/// assert!(to_currency("twenty").is_err());
/// ```
pub fn to_currency<T: MoneySource>(value: T) -> Result<Money, TaxError> {
    value.to_decimal().map(round_half_up)
}

/// Converts a value into a whole-unit amount.
///
/// # Errors
///
/// Returns [`TaxError::InvalidAmount`] if a string input cannot be parsed.
///
/// ```
/// use rust_decimal_macros::dec;
/// use netpay_core::calculations::money::to_integer;
///
/// assert_eq!(to_integer("23.50").unwrap(), dec!(24));
/// assert_eq!(to_integer("23.49").unwrap(), dec!(23));
/// ```
pub fn to_integer<T: MoneySource>(value: T) -> Result<Money, TaxError> {
    value.to_decimal().map(round_to_integer)
}

/// Converts a binary float into a currency amount.
///
/// The float is first read as the shortest decimal that round-trips to the
/// same `f64`, then rounded to two places. Use this only at an input boundary
/// that really receives floats.
///
/// # Errors
///
/// Returns [`TaxError::InvalidAmount`] for NaN, infinities, and values outside
/// the range of [`Decimal`].
pub fn currency_from_f64_approx(value: f64) -> Result<Money, TaxError> {
    if !value.is_finite() {
        return Err(TaxError::InvalidAmount(value.to_string()));
    }
    Decimal::try_from(value)
        .map(round_half_up)
        .map_err(|_| TaxError::InvalidAmount(value.to_string()))
}
