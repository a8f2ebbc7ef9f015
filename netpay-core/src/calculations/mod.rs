//! Calculation logic for net pay.
//!
//! [`money`] holds the rounding rules, [`rates`] the fixed rate table and
//! per-kind calculator, and [`pipeline`] the ordered steps that fill in a
//! result record.

pub mod money;
pub mod pipeline;
pub mod rates;

pub use pipeline::NetPayCalculator;
pub use rates::{RateTable, TaxCalculator, TaxKind, compute, make_tax_calculator};
