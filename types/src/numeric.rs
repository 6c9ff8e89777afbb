//! Fixed-point decimal used for stakes and voting-power percentages.
//!
//! A [`Dec`] stores `value * 10^18` in an arbitrary-precision integer, so
//! addition and subtraction are exact and every multiplication or division
//! is rounded back to 18 fractional digits with banker's rounding
//! (round half to even). The rounding rule is part of consensus: two nodes
//! computing a roster from the same slots must end up with identical digits.

use num_bigint::{BigInt, Sign};
use num_traits::{Signed, Zero};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Div, Mul, Neg, Sub};
use std::str::FromStr;

use crate::error::ParseDecError;

/// Number of fractional decimal digits carried by every [`Dec`].
pub const PRECISION: u32 = 18;

fn precision_multiplier() -> BigInt {
    BigInt::from(10u32).pow(PRECISION)
}

/// Drop the lowest [`PRECISION`] digits of `d`, rounding half to even.
fn chop_precision_and_round(d: BigInt) -> BigInt {
    if d.sign() == Sign::Minus {
        return -chop_precision_and_round(-d);
    }

    let multiplier = precision_multiplier();
    let quo = &d / &multiplier;
    let rem = &d % &multiplier;
    if rem.is_zero() {
        return quo;
    }

    let half = multiplier / 2u32;
    match rem.cmp(&half) {
        Ordering::Less => quo,
        Ordering::Greater => quo + 1u32,
        Ordering::Equal => {
            if (&quo % 2u32).is_zero() {
                quo
            } else {
                quo + 1u32
            }
        }
    }
}

/// An 18-digit fixed-point decimal of unbounded magnitude.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Dec(BigInt);

impl Dec {
    pub fn zero() -> Self {
        Self(BigInt::zero())
    }

    pub fn one() -> Self {
        Self(precision_multiplier())
    }

    /// The whole number `i`.
    pub fn from_int(i: i64) -> Self {
        Self(BigInt::from(i) * precision_multiplier())
    }

    /// `i * 10^-prec`, e.g. `Dec::with_prec(68, 2)` is `0.68`.
    ///
    /// # Panics
    /// Panics if `prec` exceeds [`PRECISION`].
    pub fn with_prec(i: i64, prec: u32) -> Self {
        assert!(prec <= PRECISION, "too much precision: {prec} > {PRECISION}");
        Self(BigInt::from(i) * BigInt::from(10u32).pow(PRECISION - prec))
    }

    /// Wrap an already scaled integer (`raw == value * 10^18`).
    pub fn from_raw(raw: BigInt) -> Self {
        Self(raw)
    }

    /// The scaled integer backing this value.
    pub fn raw(&self) -> &BigInt {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn is_positive(&self) -> bool {
        self.0.is_positive()
    }

    pub fn is_negative(&self) -> bool {
        self.0.is_negative()
    }

    pub fn abs(&self) -> Self {
        Self(self.0.abs())
    }

    /// Product rounded to [`PRECISION`] digits.
    pub fn mul_dec(&self, other: &Dec) -> Self {
        Self(chop_precision_and_round(&self.0 * &other.0))
    }

    /// Quotient rounded to [`PRECISION`] digits, or `None` if `other` is zero.
    ///
    /// The dividend is scaled by `10^36` before a truncating integer division,
    /// then the extra 18 digits are chopped with banker's rounding.
    pub fn checked_quo(&self, other: &Dec) -> Option<Self> {
        if other.is_zero() {
            return None;
        }
        let multiplier = precision_multiplier();
        let scaled = &self.0 * &multiplier * &multiplier;
        Some(Self(chop_precision_and_round(scaled / &other.0)))
    }

    /// Quotient by a whole number, or `None` if `n` is zero.
    pub fn checked_quo_int(&self, n: u64) -> Option<Self> {
        if n == 0 {
            return None;
        }
        self.checked_quo(&Dec(BigInt::from(n) * precision_multiplier()))
    }
}

impl Add for Dec {
    type Output = Dec;
    fn add(self, rhs: Dec) -> Dec {
        Dec(self.0 + rhs.0)
    }
}

impl<'a> Add<&'a Dec> for &'a Dec {
    type Output = Dec;
    fn add(self, rhs: &'a Dec) -> Dec {
        Dec(&self.0 + &rhs.0)
    }
}

impl Sub for Dec {
    type Output = Dec;
    fn sub(self, rhs: Dec) -> Dec {
        Dec(self.0 - rhs.0)
    }
}

impl<'a> Sub<&'a Dec> for &'a Dec {
    type Output = Dec;
    fn sub(self, rhs: &'a Dec) -> Dec {
        Dec(&self.0 - &rhs.0)
    }
}

impl Mul for Dec {
    type Output = Dec;
    fn mul(self, rhs: Dec) -> Dec {
        self.mul_dec(&rhs)
    }
}

impl<'a> Mul<&'a Dec> for &'a Dec {
    type Output = Dec;
    fn mul(self, rhs: &'a Dec) -> Dec {
        self.mul_dec(rhs)
    }
}

/// # Panics
/// Panics on division by zero, like integer division. Use
/// [`Dec::checked_quo`] when the divisor comes from untrusted input.
impl Div for Dec {
    type Output = Dec;
    fn div(self, rhs: Dec) -> Dec {
        self.checked_quo(&rhs).expect("attempt to divide Dec by zero")
    }
}

impl<'a> Div<&'a Dec> for &'a Dec {
    type Output = Dec;
    fn div(self, rhs: &'a Dec) -> Dec {
        self.checked_quo(rhs).expect("attempt to divide Dec by zero")
    }
}

impl Neg for Dec {
    type Output = Dec;
    fn neg(self) -> Dec {
        Dec(-self.0)
    }
}

impl Sum for Dec {
    fn sum<I: Iterator<Item = Dec>>(iter: I) -> Dec {
        iter.fold(Dec::zero(), |acc, d| acc + d)
    }
}

impl<'a> Sum<&'a Dec> for Dec {
    fn sum<I: Iterator<Item = &'a Dec>>(iter: I) -> Dec {
        iter.fold(Dec::zero(), |acc, d| &acc + d)
    }
}

impl From<i64> for Dec {
    fn from(i: i64) -> Self {
        Self::from_int(i)
    }
}

impl FromStr for Dec {
    type Err = ParseDecError;

    /// Parse `[-]digits[.digits]` with at most 18 fractional digits.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(ParseDecError::Empty);
        }

        let (negative, unsigned) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s),
        };

        let mut parts = unsigned.split('.');
        let int_part = parts.next().unwrap_or_default();
        let frac_part = parts.next().unwrap_or_default();
        if parts.next().is_some() {
            return Err(ParseDecError::TooManyPoints(s.to_string()));
        }
        if int_part.is_empty() {
            return Err(ParseDecError::MissingIntegerPart(s.to_string()));
        }
        if unsigned.ends_with('.') {
            return Err(ParseDecError::MissingFraction(s.to_string()));
        }
        if frac_part.len() > PRECISION as usize {
            return Err(ParseDecError::TooPrecise {
                input: s.to_string(),
                digits: frac_part.len(),
            });
        }
        if !int_part
            .chars()
            .chain(frac_part.chars())
            .all(|c| c.is_ascii_digit())
        {
            return Err(ParseDecError::InvalidDigit(s.to_string()));
        }

        let padded = format!(
            "{int_part}{frac_part}{}",
            "0".repeat(PRECISION as usize - frac_part.len())
        );
        let magnitude = BigInt::parse_bytes(padded.as_bytes(), 10)
            .ok_or_else(|| ParseDecError::InvalidDigit(s.to_string()))?;

        Ok(Self(if negative { -magnitude } else { magnitude }))
    }
}

impl fmt::Display for Dec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = self.0.abs().to_str_radix(10);
        let width = PRECISION as usize + 1;
        let padded = format!("{digits:0>width$}");
        let (int_part, frac_part) = padded.split_at(padded.len() - PRECISION as usize);
        let sign = if self.is_negative() { "-" } else { "" };
        write!(f, "{sign}{int_part}.{frac_part}")
    }
}

impl fmt::Debug for Dec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Dec({self})")
    }
}

impl Serialize for Dec {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Dec {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Dec {
        s.parse().unwrap()
    }

    #[test]
    fn parse_and_display() {
        assert_eq!(dec("0.68").to_string(), "0.680000000000000000");
        assert_eq!(dec("100").to_string(), "100.000000000000000000");
        assert_eq!(dec("-1.5").to_string(), "-1.500000000000000000");
        assert_eq!(
            dec("0.000000000000000001").to_string(),
            "0.000000000000000001"
        );
        assert_eq!(dec("0").to_string(), "0.000000000000000000");
    }

    #[test]
    fn parse_rejects_malformed_input() {
        assert!(matches!("".parse::<Dec>(), Err(ParseDecError::Empty)));
        assert!(matches!(
            "1.2.3".parse::<Dec>(),
            Err(ParseDecError::TooManyPoints(_))
        ));
        assert!(matches!(
            ".5".parse::<Dec>(),
            Err(ParseDecError::MissingIntegerPart(_))
        ));
        assert!(matches!(
            "5.".parse::<Dec>(),
            Err(ParseDecError::MissingFraction(_))
        ));
        assert!(matches!(
            "1x".parse::<Dec>(),
            Err(ParseDecError::InvalidDigit(_))
        ));
        assert!(matches!(
            "0.0000000000000000001".parse::<Dec>(),
            Err(ParseDecError::TooPrecise { digits: 19, .. })
        ));
    }

    #[test]
    fn constructors_agree() {
        assert_eq!(Dec::from_int(3), dec("3"));
        assert_eq!(Dec::one(), dec("1.0"));
        assert_eq!(Dec::zero(), dec("0.000"));
        assert_eq!(Dec::from(-2), dec("-2"));
        assert_eq!(Dec::with_prec(68, 2), dec("0.68"));
        assert_eq!(Dec::with_prec(1, 18), dec("0.000000000000000001"));
        assert_eq!(Dec::with_prec(7, 0), dec("7"));
    }

    #[test]
    fn add_sub_are_exact() {
        assert_eq!(dec("0.68") + dec("0.32"), Dec::one());
        assert_eq!(&Dec::one() - &dec("0.32"), dec("0.68"));
        assert_eq!(dec("0.1") - dec("0.3"), dec("-0.2"));
    }

    #[test]
    fn multiplication_rounds_half_to_even() {
        // 0.333333333333333333 * 0.32 = 0.10666666666666666656
        assert_eq!(
            dec("0.333333333333333333") * dec("0.32"),
            dec("0.106666666666666667")
        );
        // exact half, even quotient stays
        assert_eq!(
            dec("0.000000000000000002") * dec("0.25"),
            dec("0.000000000000000000")
        );
        // exact half, odd quotient rounds up
        assert_eq!(
            dec("0.000000000000000001") * dec("0.5"),
            dec("0.000000000000000000")
        );
        assert_eq!(
            dec("0.000000000000000003") * dec("0.5"),
            dec("0.000000000000000002")
        );
    }

    #[test]
    fn division_rounds_half_to_even() {
        assert_eq!(dec("1") / dec("3"), dec("0.333333333333333333"));
        assert_eq!(dec("2") / dec("3"), dec("0.666666666666666667"));
        assert_eq!(dec("60") / dec("100"), dec("0.6"));
        assert_eq!(dec("0.68") / dec("2"), dec("0.34"));
        assert_eq!(dec("-2") / dec("3"), dec("-0.666666666666666667"));
    }

    #[test]
    fn checked_quo_rejects_zero_divisor() {
        assert_eq!(Dec::one().checked_quo(&Dec::zero()), None);
        assert_eq!(Dec::one().checked_quo_int(0), None);
        assert_eq!(dec("0.68").checked_quo_int(4), Some(dec("0.17")));
    }

    #[test]
    #[should_panic(expected = "divide Dec by zero")]
    fn div_operator_panics_on_zero() {
        let _ = Dec::one() / Dec::zero();
    }

    #[test]
    fn sign_predicates() {
        assert!(dec("0.1").is_positive());
        assert!(dec("-0.1").is_negative());
        assert!(!Dec::zero().is_positive());
        assert!(!Dec::zero().is_negative());
        assert!(Dec::zero().is_zero());
        assert_eq!(dec("-0.1").abs(), dec("0.1"));
    }

    #[test]
    fn sum_of_values() {
        let parts = vec![dec("0.34"), dec("0.34"), dec("0.192"), dec("0.128")];
        let borrowed: Dec = parts.iter().sum();
        let owned: Dec = parts.into_iter().sum();
        assert_eq!(borrowed, Dec::one());
        assert_eq!(owned, Dec::one());
    }

    #[test]
    fn serde_uses_decimal_string() {
        let json = serde_json::to_string(&dec("0.32")).unwrap();
        assert_eq!(json, "\"0.320000000000000000\"");
        let back: Dec = serde_json::from_str("\"0.32\"").unwrap();
        assert_eq!(back, dec("0.32"));
        assert!(serde_json::from_str::<Dec>("\"abc\"").is_err());
    }

    #[test]
    fn ordering_follows_value() {
        assert!(dec("0.1") < dec("0.2"));
        assert!(dec("-1") < Dec::zero());
        assert_eq!(dec("1.50").cmp(&dec("1.5")), Ordering::Equal);
    }
}
