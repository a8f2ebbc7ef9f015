use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::TaxError;

/// The kind of contract the gross income is paid under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContractType {
    Employment,
    Mandate,
}

impl ContractType {
    pub fn all() -> &'static [ContractType] {
        &[ContractType::Employment, ContractType::Mandate]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Employment => "employment",
            Self::Mandate => "mandate",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Employment => "Employment contract",
            Self::Mandate => "Mandate contract",
        }
    }

    /// Parses a contract identifier, ignoring case and surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`TaxError::InvalidContractType`] for anything other than
    /// `employment` or `mandate`.
    pub fn parse(s: &str) -> Result<Self, TaxError> {
        match s.trim().to_ascii_lowercase().as_str() {
            "employment" => Ok(Self::Employment),
            "mandate" => Ok(Self::Mandate),
            _ => Err(TaxError::InvalidContractType(s.to_string())),
        }
    }
}

impl FromStr for ContractType {
    type Err = TaxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for ContractType {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
