//! Net pay calculation for employment and mandate contracts.
//!
//! The crate turns a gross income into an itemized [`CalculationResult`]:
//! social-insurance contributions, health-insurance contributions and the
//! income-tax advance, all in exact decimal arithmetic with half-up rounding.
//! Rates and allowances are compiled in.

pub mod calculations;
pub mod error;
pub mod models;

pub use calculations::money::{Money, to_currency, to_integer};
pub use calculations::pipeline::NetPayCalculator;
pub use calculations::rates::{RateTable, TaxCalculator, TaxKind, make_tax_calculator};
pub use error::TaxError;
pub use models::*;
