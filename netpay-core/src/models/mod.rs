mod calculation_result;
mod contract_type;
mod tax_base;

pub use calculation_result::{
    Amount, CalculationResult, EmploymentResult, HealthTaxes, IncomeTax, MandateResult,
    SocialTaxes,
};
pub use contract_type::ContractType;
pub use tax_base::TaxBase;
