use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, MathematicalOps};
use tracing::debug;

use crate::decimal::{Money, Rate};
use crate::errors::{CalculatorError, Result};
use crate::types::{LoanInput, PaymentResult, RepaymentType};

const MONTHS_PER_YEAR: Decimal = Decimal::from_parts(12, 0, 0, false, 0);

/// closed-form mortgage payment calculator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AmortizationCalculator {
    repayment_type: RepaymentType,
}

impl AmortizationCalculator {
    pub fn new(repayment_type: RepaymentType) -> Self {
        Self { repayment_type }
    }

    pub fn repayment_type(&self) -> RepaymentType {
        self.repayment_type
    }

    /// monthly and total payment for the loan
    ///
    /// Callers are expected to pass validated values (see [`LoanInput`]).
    /// The only errors left are a term that yields no payments and totals
    /// beyond `Decimal` range.
    pub fn calculate(
        &self,
        principal: Money,
        annual_rate: Rate,
        term_years: Decimal,
    ) -> Result<PaymentResult> {
        let monthly_rate = annual_rate.monthly_rate().as_decimal();
        let number_of_payments = term_years
            .checked_mul(MONTHS_PER_YEAR)
            .ok_or_else(|| overflow("number of payments"))?;

        if number_of_payments <= Decimal::ZERO {
            return Err(CalculatorError::CalculationError {
                message: format!("term of {term_years} years gives no payments"),
            });
        }

        let result = match self.repayment_type {
            RepaymentType::Repayment => {
                self.calculate_repayment(principal, monthly_rate, number_of_payments)?
            }
            RepaymentType::InterestOnly => {
                self.calculate_interest_only(principal, monthly_rate, number_of_payments)?
            }
        };

        debug!(
            repayment_type = %self.repayment_type,
            %principal,
            %annual_rate,
            %number_of_payments,
            monthly_payment = %result.monthly_payment,
            total_payment = %result.total_payment,
            "mortgage calculated"
        );

        Ok(result)
    }

    /// annuity payment, straight-line when the rate is zero
    fn calculate_repayment(
        &self,
        principal: Money,
        monthly_rate: Decimal,
        number_of_payments: Decimal,
    ) -> Result<PaymentResult> {
        let monthly_payment = if monthly_rate.is_zero() {
            principal
                .checked_div(number_of_payments)
                .ok_or_else(|| overflow("monthly payment"))?
        } else {
            // M = P * r / (1 - (1 + r)^-n), same as P * r(1 + r)^n / ((1 + r)^n - 1)
            let discount = discount_factor(monthly_rate, number_of_payments)
                .ok_or_else(|| overflow("discount factor"))?;
            let denominator = Decimal::ONE - discount;

            if denominator.is_zero() {
                // rate too small to register over the term
                principal
                    .checked_div(number_of_payments)
                    .ok_or_else(|| overflow("monthly payment"))?
            } else {
                principal
                    .checked_mul(monthly_rate)
                    .and_then(|m| m.checked_div(denominator))
                    .ok_or_else(|| overflow("monthly payment"))?
            }
        };

        let total_payment = monthly_payment
            .checked_mul(number_of_payments)
            .ok_or_else(|| overflow("total payment"))?;

        Ok(PaymentResult {
            monthly_payment,
            total_payment,
        })
    }

    /// interest each month, principal repaid at the end of the term
    fn calculate_interest_only(
        &self,
        principal: Money,
        monthly_rate: Decimal,
        number_of_payments: Decimal,
    ) -> Result<PaymentResult> {
        let monthly_payment = principal
            .checked_mul(monthly_rate)
            .ok_or_else(|| overflow("monthly payment"))?;

        let total_payment = monthly_payment
            .checked_mul(number_of_payments)
            .and_then(|interest| interest.checked_add(principal))
            .ok_or_else(|| overflow("total payment"))?;

        Ok(PaymentResult {
            monthly_payment,
            total_payment,
        })
    }
}

/// calculate payments for a validated loan
pub fn calculate(loan: &LoanInput) -> Result<PaymentResult> {
    AmortizationCalculator::new(loan.repayment_type()).calculate(
        loan.principal(),
        loan.annual_rate(),
        loan.term_years(),
    )
}

/// (1 + r)^-n for a positive rate
///
/// Stays in (0, 1] and shrinks toward zero over long terms, where (1 + r)^n
/// itself would overflow. Whole payments use exact integer powers; a
/// fractional remainder is applied with a real-valued power below one.
fn discount_factor(monthly_rate: Decimal, periods: Decimal) -> Option<Decimal> {
    let base = Decimal::ONE.checked_div(Decimal::ONE + monthly_rate)?;
    let whole = periods.trunc();
    let fraction = periods - whole;

    let mut factor = base.checked_powu(whole.to_u64()?)?;
    if !fraction.is_zero() {
        factor = factor.checked_mul(base.checked_powd(fraction)?)?;
    }
    Some(factor)
}

fn overflow(what: &str) -> CalculatorError {
    CalculatorError::CalculationError {
        message: format!("{what} is out of range"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn loan(principal: i64, rate: Decimal, years: Decimal, repayment_type: RepaymentType) -> LoanInput {
        LoanInput::new(Money::from_major(principal), years, rate, repayment_type).unwrap()
    }

    fn assert_close(actual: Money, expected: Decimal, tolerance: Decimal) {
        let diff = (actual.as_decimal() - expected).abs();
        assert!(diff <= tolerance, "expected {expected}, got {actual} (diff {diff})");
    }

    #[test]
    fn test_repayment_mortgage() {
        let result = calculate(&loan(200_000, dec!(5), dec!(25), RepaymentType::Repayment)).unwrap();

        assert_close(result.monthly_payment, dec!(1169.180083), dec!(0.000001));
        assert_close(result.total_payment, dec!(350754.024905), dec!(0.0001));
        assert_eq!(result.monthly_payment.round_to_minor(2).as_decimal(), dec!(1169.18));
        assert_eq!(result.total_payment.round_to_minor(2).as_decimal(), dec!(350754.02));
    }

    #[test]
    fn test_interest_only_mortgage() {
        let principal = Money::from_major(200_000);
        let result = calculate(&loan(200_000, dec!(5), dec!(25), RepaymentType::InterestOnly)).unwrap();

        assert_eq!(result.monthly_payment.round_to_minor(2).as_decimal(), dec!(833.33));
        assert_eq!(result.total_payment.round_to_minor(2).as_decimal(), dec!(450000.00));
        assert_eq!(
            result.total_payment,
            result.monthly_payment * dec!(300) + principal
        );
    }

    #[test]
    fn test_zero_rate_is_straight_line() {
        let result = calculate(&loan(100_000, Decimal::ZERO, dec!(30), RepaymentType::Repayment)).unwrap();

        assert_close(result.monthly_payment, dec!(100000) / dec!(360), dec!(0.0000001));
        assert_close(result.total_payment, dec!(100000), dec!(0.0000001));
    }

    #[test]
    fn test_zero_rate_interest_only_repays_principal() {
        let result = calculate(&loan(50_000, Decimal::ZERO, dec!(10), RepaymentType::InterestOnly)).unwrap();

        assert!(result.monthly_payment.is_zero());
        assert_eq!(result.total_payment, Money::from_major(50_000));
    }

    #[test]
    fn test_repayment_total_covers_principal() {
        for (principal, rate, years) in [
            (1_000, dec!(0.1), dec!(1)),
            (150_000, dec!(4), dec!(30)),
            (350_000, dec!(7.25), dec!(15)),
            (80_000, dec!(19.9), dec!(5)),
        ] {
            let result = calculate(&loan(principal, rate, years, RepaymentType::Repayment)).unwrap();
            assert!(result.total_payment >= Money::from_major(principal));
            assert!(result.total_interest(Money::from_major(principal)) > Money::ZERO);
        }
    }

    #[test]
    fn test_fractional_term() {
        // 1.3 years is 15.6 monthly payments
        let result = calculate(&loan(10_000, dec!(6), dec!(1.3), RepaymentType::Repayment)).unwrap();

        assert_close(result.monthly_payment, dec!(667.95103), dec!(0.0001));
        assert_close(result.total_payment, dec!(10420.03608), dec!(0.001));
    }

    #[test]
    fn test_direct_call_rejects_zero_term() {
        let calculator = AmortizationCalculator::new(RepaymentType::Repayment);
        let result = calculator.calculate(Money::from_major(1_000), Rate::ZERO, Decimal::ZERO);

        assert!(matches!(result, Err(CalculatorError::CalculationError { .. })));
    }

    #[test]
    fn test_very_long_term_converges_to_interest() {
        // 12,000 payments; (1 + r)^n is far beyond Decimal range
        let result = calculate(&loan(200_000, dec!(7.25), dec!(1000), RepaymentType::Repayment)).unwrap();

        assert_close(result.monthly_payment, dec!(1208.333333), dec!(0.000001));
        assert_eq!(result.monthly_payment.round_to_minor(2).as_decimal(), dec!(1208.33));
        assert_eq!(result.total_payment.round_to_minor(2).as_decimal(), dec!(14500000.00));
    }

    #[test]
    fn test_extreme_valid_inputs_do_not_error() {
        for (rate, years) in [(dec!(1), dec!(10000)), (dec!(99), dec!(100)), (dec!(5000), dec!(100))] {
            let result = calculate(&loan(200_000, rate, years, RepaymentType::Repayment)).unwrap();
            let interest = Money::from_major(200_000) * Rate::from_percent(rate).monthly_rate().as_decimal();
            assert!(result.monthly_payment >= interest);
            assert!(result.total_payment >= Money::from_major(200_000));
        }
    }

    #[test]
    fn test_total_beyond_decimal_range_is_an_error() {
        let loan = LoanInput::new(
            Money::from_decimal(Decimal::MAX),
            dec!(25),
            dec!(5),
            RepaymentType::Repayment,
        )
        .unwrap();

        assert!(matches!(calculate(&loan), Err(CalculatorError::CalculationError { .. })));
    }
}
