//! Input validation for the mortgage form.
//!
//! Every numeric field must hold a number strictly greater than zero once
//! grouping separators are stripped, and exactly one repayment type must be
//! selected. Form validation evaluates every check so that all errors can be
//! reported together.

use rust_decimal::Decimal;
use std::str::FromStr;
use tracing::debug;

use crate::config::CalculatorConfig;
use crate::decimal::Money;
use crate::errors::{CalculatorError, FieldError, Result};
use crate::types::{Field, LoanInput, RepaymentType};

/// exponents beyond this magnitude either overflow or round to zero
const MAX_EXPONENT: u32 = 64;

/// outcome of validating the whole form, one entry per field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    pub amount: std::result::Result<Decimal, FieldError>,
    pub term: std::result::Result<Decimal, FieldError>,
    pub rate: std::result::Result<Decimal, FieldError>,
    pub repayment_type: std::result::Result<RepaymentType, FieldError>,
}

impl ValidationReport {
    /// true iff every field passed
    pub fn is_valid(&self) -> bool {
        Field::ALL.iter().all(|field| self.is_field_valid(*field))
    }

    pub fn is_field_valid(&self, field: Field) -> bool {
        self.error(field).is_none()
    }

    pub fn error(&self, field: Field) -> Option<&FieldError> {
        match field {
            Field::Amount => self.amount.as_ref().err(),
            Field::Term => self.term.as_ref().err(),
            Field::Rate => self.rate.as_ref().err(),
            Field::RepaymentType => self.repayment_type.as_ref().err(),
        }
    }

    /// all failing fields, in form order
    pub fn errors(&self) -> Vec<(Field, FieldError)> {
        Field::ALL
            .iter()
            .filter_map(|field| self.error(*field).map(|e| (*field, e.clone())))
            .collect()
    }

    /// failing fields as crate errors, for callers that report them one by one
    pub fn into_errors(self) -> Vec<CalculatorError> {
        self.errors()
            .into_iter()
            .map(|(field, source)| CalculatorError::InvalidField { field, source })
            .collect()
    }

    /// assemble the loan once every field is valid
    pub fn into_loan_input(self) -> Result<LoanInput> {
        match (self.amount, self.term, self.rate, self.repayment_type) {
            (Ok(amount), Ok(term), Ok(rate), Ok(repayment_type)) => {
                LoanInput::new(Money::from_decimal(amount), term, rate, repayment_type)
            }
            (amount, term, rate, repayment_type) => {
                let count = [amount.is_err(), term.is_err(), rate.is_err(), repayment_type.is_err()]
                    .iter()
                    .filter(|failed| **failed)
                    .count();
                Err(CalculatorError::InvalidForm { count })
            }
        }
    }
}

/// field validator for a given number format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Validator {
    grouping_separator: char,
    decimal_separator: char,
}

impl Default for Validator {
    fn default() -> Self {
        Self {
            grouping_separator: ',',
            decimal_separator: '.',
        }
    }
}

impl Validator {
    pub fn new(grouping_separator: char, decimal_separator: char) -> Self {
        Self {
            grouping_separator,
            decimal_separator,
        }
    }

    pub fn from_config(config: &CalculatorConfig) -> Self {
        Self::new(
            config.number_format.grouping_separator,
            config.number_format.decimal_separator,
        )
    }

    /// parse a raw field value, reporting why it is unusable
    pub fn check_field(&self, raw: &str) -> std::result::Result<Decimal, FieldError> {
        let cleaned: String = raw
            .chars()
            .filter(|c| *c != self.grouping_separator)
            .collect();
        let cleaned = cleaned.trim();

        if cleaned.is_empty() {
            return Err(FieldError::Empty);
        }

        let normalized = if self.decimal_separator == '.' {
            cleaned.to_string()
        } else {
            cleaned.replace(self.decimal_separator, ".")
        };

        let value = parse_number(&normalized).ok_or_else(|| FieldError::NotANumber {
            value: cleaned.to_string(),
        })?;

        if value <= Decimal::ZERO {
            return Err(FieldError::NotPositive {
                value: cleaned.to_string(),
            });
        }

        Ok(value)
    }

    /// true iff the raw value is a number strictly greater than zero
    pub fn validate_field(&self, raw: &str) -> bool {
        self.check_field(raw).is_ok()
    }

    /// check all fields without stopping at the first failure
    pub fn validate_form(
        &self,
        amount: &str,
        term: &str,
        rate: &str,
        selection: Option<RepaymentType>,
    ) -> ValidationReport {
        let report = ValidationReport {
            amount: self.check_field(amount),
            term: self.check_field(term),
            rate: self.check_field(rate),
            repayment_type: check_selection(selection),
        };

        for (field, error) in report.errors() {
            debug!(%field, %error, "field failed validation");
        }
        debug!(valid = report.is_valid(), "form validated");

        report
    }
}

/// validate a field using the default en-GB number format
pub fn validate_field(raw: &str) -> bool {
    Validator::default().validate_field(raw)
}

/// parse a field using the default en-GB number format
pub fn check_field(raw: &str) -> std::result::Result<Decimal, FieldError> {
    Validator::default().check_field(raw)
}

pub fn check_selection(selected: Option<RepaymentType>) -> std::result::Result<RepaymentType, FieldError> {
    selected.ok_or(FieldError::NoSelection)
}

/// true iff a repayment type has been chosen
pub fn validate_selection(selected: Option<RepaymentType>) -> bool {
    selected.is_some()
}

/// validate the whole form using the default en-GB number format
pub fn validate_form(
    amount: &str,
    term: &str,
    rate: &str,
    selection: Option<RepaymentType>,
) -> ValidationReport {
    Validator::default().validate_form(amount, term, rate, selection)
}

/// parse a plain decimal number with optional sign and exponent
///
/// Accepts `12`, `-5`, `+3.5`, `.5`, `5.` and `1.2e3`. Anything else,
/// including values too large for a `Decimal`, yields `None`.
fn parse_number(text: &str) -> Option<Decimal> {
    let (negative, body) = match text.as_bytes().first()? {
        b'-' => (true, &text[1..]),
        b'+' => (false, &text[1..]),
        _ => (false, text),
    };

    let (mantissa, exponent) = match body.find(['e', 'E']) {
        Some(idx) => (&body[..idx], Some(&body[idx + 1..])),
        None => (body, None),
    };

    let (int_part, frac_part) = mantissa.split_once('.').unwrap_or((mantissa, ""));
    if int_part.is_empty() && frac_part.is_empty() {
        return None;
    }
    if !is_digits(int_part) || !is_digits(frac_part) {
        return None;
    }

    let int_part = if int_part.is_empty() { "0" } else { int_part };
    let literal = if frac_part.is_empty() {
        int_part.to_string()
    } else {
        format!("{int_part}.{frac_part}")
    };
    let mut value = Decimal::from_str(&literal).ok()?;

    if let Some(exponent) = exponent {
        let (exp_negative, exp_digits) = match exponent.as_bytes().first()? {
            b'-' => (true, &exponent[1..]),
            b'+' => (false, &exponent[1..]),
            _ => (false, exponent),
        };
        if exp_digits.is_empty() || !is_digits(exp_digits) {
            return None;
        }
        let magnitude: u32 = exp_digits.parse().unwrap_or(u32::MAX);
        let ten = Decimal::TEN;

        if exp_negative {
            for _ in 0..magnitude.min(MAX_EXPONENT) {
                value = value.checked_div(ten)?;
            }
        } else if !value.is_zero() {
            if magnitude > MAX_EXPONENT {
                return None;
            }
            for _ in 0..magnitude {
                value = value.checked_mul(ten)?;
            }
        }
    }

    Some(if negative { -value } else { value })
}

fn is_digits(s: &str) -> bool {
    s.bytes().all(|b| b.is_ascii_digit())
}
