//! CSV loader for batch calculations.
//!
//! ## CSV Format
//!
//! Headers are matched by name, so column order does not matter. Values are
//! trimmed before parsing.
//!
//! | Column          | Type    | Notes                                       |
//! |-----------------|---------|---------------------------------------------|
//! | `gross_income`  | decimal | e.g. `4000.00`; `,` thousands separators ok |
//! | `contract_type` | string  | `employment` or `mandate`, any case         |
//!
//! ```csv
//! gross_income,contract_type
//! 4000.00,employment
//! 3000.00,mandate
//! ```
use std::io::Read;
use std::path::{Path, PathBuf};

use netpay_core::{ContractType, TaxBase, TaxError};
use serde::Deserialize;

// ---------------------------------------------------------------------------
// Serde-compatible row that mirrors the CSV layout exactly
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct CsvRow {
    gross_income: String,
    contract_type: String,
}

/// One validated input row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchEntry {
    /// 1-based data row number (the header is row 0).
    pub row: usize,
    pub base: TaxBase,
    pub contract: ContractType,
}

// ---------------------------------------------------------------------------
// Public error type
// ---------------------------------------------------------------------------

/// Errors that can occur while loading batch input.
#[derive(Debug, thiserror::Error)]
pub enum BatchLoadError {
    /// The file could not be read.
    #[error("cannot read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The underlying CSV deserialisation failed (bad structure, missing
    /// column, etc.).
    #[error("CSV parse error: {0}")]
    Parse(#[from] csv::Error),

    /// A `gross_income` cell was not a non-negative decimal.
    #[error("row {row}: {source}")]
    InvalidAmount {
        row: usize,
        #[source]
        source: TaxError,
    },

    /// A `contract_type` cell was not a recognised contract.
    #[error("row {row}: {source}")]
    InvalidContractType {
        row: usize,
        #[source]
        source: TaxError,
    },
}

// ---------------------------------------------------------------------------
// Core loader
// ---------------------------------------------------------------------------

fn convert_row(
    row: CsvRow,
    row_number: usize,
) -> Result<BatchEntry, BatchLoadError> {
    let base = TaxBase::parse(&row.gross_income).map_err(|source| {
        BatchLoadError::InvalidAmount {
            row: row_number,
            source,
        }
    })?;
    let contract = ContractType::parse(&row.contract_type).map_err(|source| {
        BatchLoadError::InvalidContractType {
            row: row_number,
            source,
        }
    })?;

    Ok(BatchEntry {
        row: row_number,
        base,
        contract,
    })
}

/// Parse CSV from any reader and return the entries in file order.
///
/// # Errors
///
/// * [BatchLoadError::Parse] – if the CSV is structurally invalid.
/// * [BatchLoadError::InvalidAmount] – if a gross income is not a
///   non-negative number.
/// * [BatchLoadError::InvalidContractType] – if a contract type is unknown.
pub fn load_from_reader<R: Read>(reader: R) -> Result<Vec<BatchEntry>, BatchLoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(false)
        .from_reader(reader);

    reader
        .deserialize::<CsvRow>()
        .enumerate()
        .map(|(idx, result)| {
            let row = result?;
            convert_row(row, idx + 1)
        })
        .collect()
}

/// Parse CSV text held in memory.
pub fn load_from_str(input: &str) -> Result<Vec<BatchEntry>, BatchLoadError> {
    load_from_reader(input.as_bytes())
}

/// Read a file from disk and delegate to [load_from_reader].
pub fn load_from_file(path: &Path) -> Result<Vec<BatchEntry>, BatchLoadError> {
    let file = std::fs::File::open(path).map_err(|source| BatchLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    load_from_reader(std::io::BufReader::new(file))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
