use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Mul, Sub};

/// Money type backed by an exact decimal.
///
/// Arithmetic keeps full precision; rounding only happens when a value is
/// presented (see [`Money::round_to_minor`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
pub struct Money(Decimal);

impl Money {
    pub const ZERO: Money = Money(Decimal::ZERO);
    pub const ONE: Money = Money(Decimal::ONE);

    /// create from decimal
    pub fn from_decimal(d: Decimal) -> Self {
        Money(d)
    }

    /// create from integer amount (pounds, euros, etc)
    pub fn from_major(amount: i64) -> Self {
        Money(Decimal::from(amount))
    }

    /// get underlying decimal
    pub fn as_decimal(&self) -> Decimal {
        self.0
    }

    /// round half away from zero, the way prices are displayed
    pub fn round_to_minor(&self, dp: u32) -> Self {
        Money(
            self.0
                .round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero),
        )
    }

    /// check if zero
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// strictly greater than zero
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// check if negative
    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    pub fn checked_add(self, other: Money) -> Option<Money> {
        self.0.checked_add(other.0).map(Money)
    }

    pub fn checked_mul(self, factor: Decimal) -> Option<Money> {
        self.0.checked_mul(factor).map(Money)
    }

    pub fn checked_div(self, divisor: Decimal) -> Option<Money> {
        self.0.checked_div(divisor).map(Money)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, other: Money) -> Money {
        Money(self.0 + other.0)
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, other: Money) -> Money {
        Money(self.0 - other.0)
    }
}

impl Mul<Decimal> for Money {
    type Output = Money;

    fn mul(self, other: Decimal) -> Money {
        Money(self.0 * other)
    }
}

/// rate type for interest rates, stored as a fraction (0.05 for 5%)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub struct Rate(Decimal);

impl Rate {
    pub const ZERO: Rate = Rate(Decimal::ZERO);

    /// create from a percentage figure as typed into the form (e.g., 5.25 for 5.25%)
    pub fn from_percent(p: Decimal) -> Self {
        Rate(p / Decimal::ONE_HUNDRED)
    }

    /// get as decimal
    pub fn as_decimal(&self) -> Decimal {
        self.0
    }

    /// get as percentage
    pub fn as_percentage(&self) -> Decimal {
        self.0 * Decimal::ONE_HUNDRED
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// monthly rate from annual rate
    pub fn monthly_rate(&self) -> Rate {
        Rate(self.0 / Decimal::from(12))
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.as_percentage().normalize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_money_keeps_precision() {
        let m = Money::from_decimal(dec!(100.123456789)) * dec!(3);
        assert_eq!(m.to_string(), "300.370370367");
    }

    #[test]
    fn test_round_to_minor_is_half_away_from_zero() {
        assert_eq!(Money::from_decimal(dec!(2.345)).round_to_minor(2).as_decimal(), dec!(2.35));
        assert_eq!(Money::from_decimal(dec!(2.355)).round_to_minor(2).as_decimal(), dec!(2.36));
        assert_eq!(Money::from_decimal(dec!(-2.345)).round_to_minor(2).as_decimal(), dec!(-2.35));
    }

    #[test]
    fn test_rate_from_percent() {
        let rate = Rate::from_percent(dec!(5));
        assert_eq!(rate.as_decimal(), dec!(0.05));
        assert_eq!(rate.to_string(), "5%");

        let monthly = Rate::from_percent(dec!(12)).monthly_rate();
        assert_eq!(monthly.as_decimal(), dec!(0.01));
    }

    #[test]
    fn test_positive_excludes_zero() {
        assert!(!Money::ZERO.is_positive());
        assert!(Money::ONE.is_positive());
        assert!(Money::from_major(-1).is_negative());
    }

    #[test]
    fn test_checked_ops_report_overflow() {
        assert!(Money::from_decimal(Decimal::MAX).checked_mul(dec!(2)).is_none());
        assert!(Money::ONE.checked_div(Decimal::ZERO).is_none());
        assert_eq!(
            Money::ONE.checked_add(Money::ONE),
            Some(Money::from_major(2))
        );
    }
}
