//! Fixed-point money in whole cents.

use core::fmt;
use core::iter::Sum;
use core::ops::{Add, AddAssign, Neg, Sub, SubAssign};
use core::str::FromStr;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

use crate::value_object::ValueObject;

/// Number of decimal places in the currency unit.
pub const SCALE: u32 = 2;

/// Signed monetary amount, stored as an integer number of cents.
///
/// Serialised as a JSON number with exactly two decimal places (`30.00`).
/// Deserialises from either a JSON number or a numeric string, rounding to the
/// nearest cent (midpoint away from zero).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(i64);

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MoneyError {
    #[error("not a decimal number: {0:?}")]
    NotANumber(String),

    #[error("amount out of range: {0}")]
    OutOfRange(Decimal),
}

impl Money {
    pub const ZERO: Self = Self(0);

    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    pub const fn cents(self) -> i64 {
        self.0
    }

    /// Round a decimal to the nearest cent (midpoint away from zero).
    ///
    /// Returns `None` if the value does not fit.
    pub fn from_decimal(value: Decimal) -> Option<Self> {
        value
            .round_dp_with_strategy(SCALE, RoundingStrategy::MidpointAwayFromZero)
            .checked_mul(Decimal::ONE_HUNDRED)?
            .to_i64()
            .map(Self)
    }

    pub fn to_decimal(self) -> Decimal {
        Decimal::new(self.0, SCALE)
    }

    pub fn abs(self) -> Self {
        Self(self.0.saturating_abs())
    }

    pub fn saturating_add(self, rhs: Self) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }

    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Self)
    }

    pub fn checked_sub(self, rhs: Self) -> Option<Self> {
        self.0.checked_sub(rhs.0).map(Self)
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0
    }

    pub fn is_positive(self) -> bool {
        self.0 > 0
    }

    pub fn is_negative(self) -> bool {
        self.0 < 0
    }
}

impl ValueObject for Money {}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{sign}{}.{:02}", abs / 100, abs % 100)
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        rust_decimal::serde::arbitrary_precision::serialize(&self.to_decimal(), serializer)
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = rust_decimal::serde::arbitrary_precision::deserialize(deserializer)?;
        Self::try_from(value).map_err(serde::de::Error::custom)
    }
}

impl FromStr for Money {
    type Err = MoneyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = Decimal::from_str(s.trim()).map_err(|_| MoneyError::NotANumber(s.to_string()))?;
        Self::try_from(value)
    }
}

impl TryFrom<Decimal> for Money {
    type Error = MoneyError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::from_decimal(value).ok_or(MoneyError::OutOfRange(value))
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    #[test]
    fn display_always_has_two_decimals() {
        assert_eq!(Money::from_cents(3000).to_string(), "30.00");
        assert_eq!(Money::from_cents(-3500).to_string(), "-35.00");
        assert_eq!(Money::from_cents(-5).to_string(), "-0.05");
        assert_eq!(Money::from_cents(7).to_string(), "0.07");
        assert_eq!(Money::ZERO.to_string(), "0.00");
    }

    #[test]
    fn from_decimal_rounds_midpoint_away_from_zero() {
        assert_eq!(Money::from_decimal(dec!(10.005)), Some(Money::from_cents(1001)));
        assert_eq!(Money::from_decimal(dec!(-10.005)), Some(Money::from_cents(-1001)));
        assert_eq!(Money::from_decimal(dec!(10.004)), Some(Money::from_cents(1000)));
        assert_eq!(Money::from_decimal(dec!(90)), Some(Money::from_cents(9000)));
    }

    #[test]
    fn parses_from_string() {
        assert_eq!("35.5".parse::<Money>().unwrap(), Money::from_cents(3550));
        assert!(matches!("abc".parse::<Money>(), Err(MoneyError::NotANumber(_))));
    }

    #[test]
    fn serde_uses_two_decimal_numbers() {
        assert_eq!(serde_json::to_string(&Money::from_cents(6000)).unwrap(), "60.00");
        assert_eq!(serde_json::to_string(&Money::from_cents(-5)).unwrap(), "-0.05");

        let value = serde_json::to_value(Money::from_cents(3500)).unwrap();
        assert!(value.is_number());
        assert_eq!(value.to_string(), "35.00");

        let from_number: Money = serde_json::from_str("12.5").unwrap();
        assert_eq!(from_number, Money::from_cents(1250));
        let from_string: Money = serde_json::from_str("\"-0.01\"").unwrap();
        assert_eq!(from_string, Money::from_cents(-1));
    }

    #[test]
    fn arithmetic_is_exact() {
        let parts = [Money::from_cents(3334), Money::from_cents(3333), Money::from_cents(3333)];
        let total: Money = parts.iter().sum();
        assert_eq!(total, Money::from_cents(10000));
        assert_eq!(-(total - Money::from_cents(1)), Money::from_cents(-9999));
    }

    #[test]
    fn checked_arithmetic_reports_overflow() {
        let max = Money::from_cents(i64::MAX);
        assert_eq!(max.checked_add(Money::from_cents(1)), None);
        assert_eq!(Money::from_cents(i64::MIN).checked_sub(Money::from_cents(1)), None);
        assert_eq!(
            Money::from_cents(10).checked_add(Money::from_cents(-3)),
            Some(Money::from_cents(7))
        );
        assert_eq!(Money::from_cents(i64::MIN).abs(), max);
        assert_eq!(max.saturating_add(Money::from_cents(1)), max);
    }

    proptest! {
        #[test]
        fn display_parses_back(cents in -10_000_000i64..10_000_000i64) {
            let money = Money::from_cents(cents);
            prop_assert_eq!(money.to_string().parse::<Money>().unwrap(), money);
        }
    }
}
