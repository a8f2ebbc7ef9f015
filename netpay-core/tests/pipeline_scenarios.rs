//! End-to-end scenarios run through the public API.

use std::thread;

use netpay_core::{
    CalculationResult, ContractType, NetPayCalculator, RateTable, TaxBase, TaxError,
};
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn calculate(
    gross: &str,
    contract: ContractType,
) -> Result<CalculationResult, TaxError> {
    let base = TaxBase::parse(gross)?;
    NetPayCalculator::new(RateTable::standard()).calculate(&base, contract)
}

#[test]
fn employment_4000_matches_every_line() {
    let result = calculate("4000.00", ContractType::Employment).unwrap();

    assert_eq!(result.contract_type(), ContractType::Employment);

    assert_eq!(result.gross_base().value(), dec!(4000.00));
    assert_eq!(result.social().retirement().value(), dec!(390.40));
    assert_eq!(result.social().rent().value(), dec!(60.00));
    assert_eq!(result.social().sick().value(), dec!(98.00));
    assert_eq!(result.tax_base().value(), dec!(3451.60));
    assert_eq!(result.health().upper().value(), dec!(310.64));
    assert_eq!(result.health().lower().value(), dec!(267.50));
    assert_eq!(result.income_tax().deductible_costs().value(), dec!(111.25));
    assert_eq!(result.income_tax().income_tax_base().value(), dec!(3340.35));
    assert_eq!(result.income_tax().rounded_income_tax_base().value(), dec!(3340));
    assert_eq!(result.income_tax().income_tax_18().value(), dec!(601.20));
    assert_eq!(result.income_tax().collected_tax().value(), dec!(554.87));
    assert_eq!(result.income_tax().tax_office_advance().value(), dec!(287.37));
    assert_eq!(result.income_tax().rounded_tax_office_advance().value(), dec!(287));
    assert_eq!(result.tax_free_amount().unwrap().value(), dec!(46.33));
    assert_eq!(result.pay().value(), dec!(2853.96));
}

#[test]
fn mandate_3000_matches_every_line() {
    let result = calculate("3000.00", ContractType::Mandate).unwrap();

    assert_eq!(result.contract_type(), ContractType::Mandate);

    assert_eq!(result.gross_base().value(), dec!(3000.00));
    assert_eq!(result.social().retirement().value(), dec!(292.80));
    assert_eq!(result.social().rent().value(), dec!(45.00));
    assert_eq!(result.social().sick().value(), dec!(73.50));
    assert_eq!(result.tax_base().value(), dec!(2588.70));
    assert_eq!(result.health().upper().value(), dec!(232.98));
    assert_eq!(result.health().lower().value(), dec!(200.62));
    assert_eq!(result.income_tax().deductible_costs().value(), dec!(517.74));
    assert_eq!(result.income_tax().income_tax_base().value(), dec!(2070.96));
    assert_eq!(result.income_tax().rounded_income_tax_base().value(), dec!(2071));
    assert_eq!(result.income_tax().income_tax_18().value(), dec!(372.78));
    assert_eq!(result.income_tax().collected_tax().value(), dec!(372.78));
    assert_eq!(result.income_tax().tax_office_advance().value(), dec!(172.16));
    assert_eq!(result.income_tax().rounded_tax_office_advance().value(), dec!(172));
    assert_eq!(result.pay().value(), dec!(2183.72));
}

#[test]
fn currency_fields_carry_two_places_and_rounded_fields_none() {
    let result = calculate("4000", ContractType::Employment).unwrap();

    assert_eq!(result.gross_base().to_string(), "4000.00");
    assert_eq!(result.social().rent().to_string(), "60.00");
    assert_eq!(result.income_tax().rounded_income_tax_base().to_string(), "3340");
    assert_eq!(result.income_tax().rounded_tax_office_advance().to_string(), "287");
}

#[test]
fn repeated_runs_are_identical() {
    for contract in ContractType::all() {
        let first = calculate("5123.45", *contract).unwrap();
        let second = calculate("5123.45", *contract).unwrap();

        assert_eq!(first, second);
    }
}

#[test]
fn one_rate_table_serves_parallel_calculations() {
    let rates = RateTable::standard();

    let handles: Vec<_> = ["2500", "4000", "7300.10", "12000"]
        .into_iter()
        .map(|gross| {
            thread::spawn(move || {
                let base = TaxBase::parse(gross).unwrap();
                NetPayCalculator::new(rates)
                    .calculate(&base, ContractType::Mandate)
                    .unwrap()
            })
        })
        .collect();

    for handle in handles {
        let result = handle.join().unwrap();
        assert!(result.pay().value() > Decimal::ZERO);
    }
}

#[test]
fn low_employment_income_is_rejected_not_clamped() {
    let result = calculate("200.00", ContractType::Employment);

    // 18 % of the rounded base is 10.98, below the 46.33 tax-free amount
    assert_eq!(
        result,
        Err(TaxError::NegativeTaxValue {
            field: "collected_tax",
            value: dec!(-35.35),
        })
    );
}

#[test]
fn negative_gross_income_is_rejected_before_calculation() {
    assert_eq!(
        calculate("-4000", ContractType::Mandate),
        Err(TaxError::NegativeAmount(dec!(-4000.00)))
    );
}

#[test]
fn unparsable_gross_income_is_invalid_amount() {
    assert_eq!(
        calculate("four thousand", ContractType::Mandate),
        Err(TaxError::InvalidAmount("four thousand".to_string()))
    );
}
