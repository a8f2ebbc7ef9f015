//! Interactive console input.
//!
//! [`Prompter`] asks for a gross income and a contract type and keeps asking
//! until the answer is valid. It works over any `BufRead`/`Write` pair, so the
//! real program hands it stdin and stdout while tests hand it byte buffers.

use std::io::{self, BufRead, Write};

use netpay_core::{ContractType, TaxBase, TaxError};
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum PromptError {
    /// Input ended before a valid answer was given.
    #[error("input closed before a valid {0} was entered")]
    InputClosed(&'static str),

    #[error("console I/O failed: {0}")]
    Io(#[from] io::Error),
}

pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(
        input: R,
        output: W,
    ) -> Self {
        Self { input, output }
    }

    /// Prints `prompt` and reads one line. `None` means end of input.
    fn ask(
        &mut self,
        prompt: &str,
    ) -> Result<Option<String>, PromptError> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Asks for the gross income until it parses as a non-negative amount.
    pub fn gross_income(&mut self) -> Result<TaxBase, PromptError> {
        loop {
            let Some(answer) = self.ask("Gross income: ")? else {
                return Err(PromptError::InputClosed("gross income"));
            };
            match TaxBase::parse(&answer) {
                Ok(base) => return Ok(base),
                Err(error) => {
                    warn!(input = %answer, %error, "rejected gross income");
                    writeln!(self.output, "{error}. Please try again.")?;
                }
            }
        }
    }

    /// Shows the contract menu until a listed number or name is chosen.
    pub fn contract_type(&mut self) -> Result<ContractType, PromptError> {
        loop {
            writeln!(self.output, "Contract type:")?;
            for (idx, contract) in ContractType::all().iter().enumerate() {
                writeln!(self.output, "  {}) {}", idx + 1, contract.label())?;
            }

            let Some(answer) = self.ask("Select: ")? else {
                return Err(PromptError::InputClosed("contract type"));
            };
            match parse_selection(&answer) {
                Ok(contract) => return Ok(contract),
                Err(error) => {
                    warn!(input = %answer, %error, "rejected contract selection");
                    writeln!(self.output, "{error}. Please try again.")?;
                }
            }
        }
    }
}

/// Accepts a 1-based menu number or a contract name.
fn parse_selection(answer: &str) -> Result<ContractType, TaxError> {
    let contracts = ContractType::all();
    match answer.parse::<usize>() {
        Ok(n) if (1..=contracts.len()).contains(&n) => Ok(contracts[n - 1]),
        Ok(_) => Err(TaxError::InvalidContractType(answer.to_string())),
        Err(_) => ContractType::parse(answer),
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn prompter(input: &str) -> Prompter<Cursor<Vec<u8>>, Vec<u8>> {
        Prompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    fn output(prompter: &Prompter<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8(prompter.output.clone()).unwrap()
    }

    // =========================================================================
    // gross_income tests
    // =========================================================================

    #[test]
    fn gross_income_accepts_first_valid_answer() {
        let mut prompter = prompter("4000.00\n");

        let base = prompter.gross_income().unwrap();

        assert_eq!(base.amount(), dec!(4000.00));
    }

    #[test]
    fn gross_income_retries_on_garbage_and_negative() {
        let mut prompter = prompter("abc\n-10\n 2,500.5 \n");

        let base = prompter.gross_income().unwrap();

        assert_eq!(base.amount(), dec!(2500.50));
        let text = output(&prompter);
        assert_eq!(text.matches("Gross income: ").count(), 3);
        assert!(text.contains("invalid amount 'abc'. Please try again."));
        assert!(text.contains("cannot be less than 0"));
    }

    #[test]
    fn gross_income_fails_when_input_ends() {
        let mut prompter = prompter("abc\n");

        let result = prompter.gross_income();

        assert!(matches!(result, Err(PromptError::InputClosed("gross income"))));
    }

    // =========================================================================
    // contract_type tests
    // =========================================================================

    #[test]
    fn contract_type_accepts_menu_number() {
        let mut prompter = prompter("2\n");

        assert_eq!(prompter.contract_type().unwrap(), ContractType::Mandate);
        assert!(output(&prompter).contains("  1) Employment contract\n  2) Mandate contract\n"));
    }

    #[test]
    fn contract_type_accepts_name() {
        let mut prompter = prompter("Employment\n");

        assert_eq!(prompter.contract_type().unwrap(), ContractType::Employment);
    }

    #[test]
    fn contract_type_retries_until_valid() {
        let mut prompter = prompter("3\nfreelance\n1\n");

        assert_eq!(prompter.contract_type().unwrap(), ContractType::Employment);
        assert_eq!(output(&prompter).matches("Select: ").count(), 3);
    }

    #[test]
    fn contract_type_fails_when_input_ends() {
        let mut prompter = prompter("");

        assert!(matches!(
            prompter.contract_type(),
            Err(PromptError::InputClosed("contract type"))
        ));
    }

    // =========================================================================
    // parse_selection tests
    // =========================================================================

    #[test]
    fn parse_selection_rejects_zero() {
        assert_eq!(
            parse_selection("0"),
            Err(TaxError::InvalidContractType("0".to_string()))
        );
    }
}
