use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::decimal::{Money, Rate};
use crate::errors::{CalculatorError, Result};

/// mortgage repayment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RepaymentType {
    /// each payment covers interest and part of the principal
    Repayment,
    /// pay interest only, principal at the end of the term
    InterestOnly,
}

impl fmt::Display for RepaymentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RepaymentType::Repayment => write!(f, "repayment"),
            RepaymentType::InterestOnly => write!(f, "interest-only"),
        }
    }
}

impl FromStr for RepaymentType {
    type Err = CalculatorError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "repayment" => Ok(RepaymentType::Repayment),
            "interest-only" | "interest_only" | "interestonly" => Ok(RepaymentType::InterestOnly),
            other => Err(CalculatorError::InvalidLoan {
                message: format!("unknown repayment type: {other}"),
            }),
        }
    }
}

/// a form field that can carry an error flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Field {
    Amount,
    Term,
    Rate,
    RepaymentType,
}

impl Field {
    pub const ALL: [Field; 4] = [Field::Amount, Field::Term, Field::Rate, Field::RepaymentType];
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::Amount => "mortgage amount",
            Field::Term => "mortgage term",
            Field::Rate => "interest rate",
            Field::RepaymentType => "mortgage type",
        };
        write!(f, "{name}")
    }
}

/// the three free-text inputs of the form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InputField {
    Amount,
    Term,
    Rate,
}

impl From<InputField> for Field {
    fn from(input: InputField) -> Self {
        match input {
            InputField::Amount => Field::Amount,
            InputField::Term => Field::Term,
            InputField::Rate => Field::Rate,
        }
    }
}

/// validated loan parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanInput {
    principal: Money,
    term_years: Decimal,
    annual_rate: Rate,
    repayment_type: RepaymentType,
}

impl LoanInput {
    /// build a loan, rejecting a non-positive principal or term and a negative rate
    pub fn new(
        principal: Money,
        term_years: Decimal,
        annual_rate_percent: Decimal,
        repayment_type: RepaymentType,
    ) -> Result<Self> {
        if !principal.is_positive() {
            return Err(CalculatorError::InvalidLoan {
                message: format!("principal must be greater than zero, got {principal}"),
            });
        }
        if term_years <= Decimal::ZERO {
            return Err(CalculatorError::InvalidLoan {
                message: format!("term must be greater than zero, got {term_years}"),
            });
        }
        if annual_rate_percent < Decimal::ZERO {
            return Err(CalculatorError::InvalidLoan {
                message: format!("interest rate cannot be negative, got {annual_rate_percent}"),
            });
        }

        Ok(Self {
            principal,
            term_years,
            annual_rate: Rate::from_percent(annual_rate_percent),
            repayment_type,
        })
    }

    pub fn principal(&self) -> Money {
        self.principal
    }

    pub fn term_years(&self) -> Decimal {
        self.term_years
    }

    pub fn annual_rate(&self) -> Rate {
        self.annual_rate
    }

    pub fn repayment_type(&self) -> RepaymentType {
        self.repayment_type
    }

    /// total number of monthly payments, may be fractional
    pub fn number_of_payments(&self) -> Decimal {
        self.term_years * Decimal::from(12)
    }
}

/// monthly and lifetime cost of a loan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentResult {
    pub monthly_payment: Money,
    pub total_payment: Money,
}

impl PaymentResult {
    /// amount paid on top of the principal
    pub fn total_interest(&self, principal: Money) -> Money {
        self.total_payment - principal
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_loan_input_rejects_zero_term() {
        let result = LoanInput::new(
            Money::from_major(100_000),
            Decimal::ZERO,
            dec!(5),
            RepaymentType::Repayment,
        );
        assert!(matches!(result, Err(CalculatorError::InvalidLoan { .. })));
    }

    #[test]
    fn test_loan_input_rejects_non_positive_principal() {
        let result = LoanInput::new(Money::ZERO, dec!(25), dec!(5), RepaymentType::Repayment);
        assert!(result.is_err());

        let result = LoanInput::new(Money::from_major(-10), dec!(25), dec!(5), RepaymentType::Repayment);
        assert!(result.is_err());
    }

    #[test]
    fn test_loan_input_accepts_zero_rate() {
        let loan = LoanInput::new(Money::from_major(1_000), dec!(1), Decimal::ZERO, RepaymentType::Repayment)
            .unwrap();
        assert!(loan.annual_rate().is_zero());
        assert_eq!(loan.number_of_payments(), dec!(12));
    }

    #[test]
    fn test_loan_input_rejects_negative_rate() {
        let result = LoanInput::new(Money::from_major(1_000), dec!(1), dec!(-0.5), RepaymentType::Repayment);
        assert!(result.is_err());
    }

    #[test]
    fn test_repayment_type_parsing() {
        assert_eq!("repayment".parse::<RepaymentType>().unwrap(), RepaymentType::Repayment);
        assert_eq!("Interest-Only".parse::<RepaymentType>().unwrap(), RepaymentType::InterestOnly);
        assert!("balloon".parse::<RepaymentType>().is_err());
        assert_eq!(RepaymentType::InterestOnly.to_string(), "interest-only");
    }
}
