use rust_decimal::Decimal;
use thiserror::Error;

/// Errors raised while validating input or running a net pay calculation.
///
/// The core never retries or logs; every variant is handed back to the
/// caller, which decides whether to re-prompt, skip a row, or abort.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TaxError {
    /// The value could not be read as an exact decimal number.
    #[error("invalid amount '{0}'")]
    InvalidAmount(String),

    /// Gross income must not be negative.
    #[error("gross income cannot be less than 0, got {0}")]
    NegativeAmount(Decimal),

    /// The contract selector is neither employment nor mandate.
    #[error("invalid contract type '{0}', expected employment or mandate")]
    InvalidContractType(String),

    /// A rate was requested for a tax kind the rate table does not know.
    #[error("unknown tax kind '{0}'")]
    UnknownTaxKind(String),

    /// A computed result field came out negative.
    #[error("{field} cannot be negative, got {value}")]
    NegativeTaxValue { field: &'static str, value: Decimal },
}
