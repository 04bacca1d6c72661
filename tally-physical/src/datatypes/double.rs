//! This module defines a wrapper type [Double] for [f64] that excludes NaN on construction
//! and provides a total order in which `0.0` and `-0.0` are the same value.

use std::{
    cmp::Ordering,
    fmt,
    hash::{Hash, Hasher},
    ops::{Add, AddAssign, Div, Mul},
};

use num::Zero;

#[cfg(test)]
use quickcheck::{Arbitrary, Gen};

use crate::error::Error;

/// Wrapper for [f64] that can be used as a group key.
///
/// Values created with [Double::new] are never NaN.
/// Intermediate results of arithmetic may be NaN; they are turned into missing cells
/// before they reach a table.
/// Negative zero is stored as positive zero. Values are ordered by [f64::total_cmp].
#[derive(Copy, Clone, Debug, Default)]
pub struct Double(f64);

impl Double {
    /// Wraps the given [f64]-`value` as a value over [Double].
    ///
    /// # Errors
    /// Returns an error if `value` is [f64::NAN].
    pub fn new(value: f64) -> Result<Self, Error> {
        if value.is_nan() {
            return Err(Error::FloatIsNaN);
        }

        Ok(Self::from_arithmetic(value))
    }

    /// Wraps the result of an arithmetic operation without checking for NaN.
    pub(crate) fn from_arithmetic(value: f64) -> Self {
        // Maps -0.0 to 0.0
        Self(if value == 0.0 { 0.0 } else { value })
    }

    /// Returns the wrapped [f64].
    pub fn value(self) -> f64 {
        self.0
    }
}

impl PartialEq for Double {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Double {}

impl PartialOrd for Double {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Double {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl Hash for Double {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state)
    }
}

impl Add for Double {
    type Output = Double;

    fn add(self, rhs: Self) -> Self::Output {
        Double::from_arithmetic(self.0.add(rhs.0))
    }
}

impl AddAssign for Double {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Mul for Double {
    type Output = Double;

    fn mul(self, rhs: Self) -> Self::Output {
        Double::from_arithmetic(self.0.mul(rhs.0))
    }
}

impl Div for Double {
    type Output = Double;

    fn div(self, rhs: Self) -> Self::Output {
        Double::from_arithmetic(self.0.div(rhs.0))
    }
}

impl Zero for Double {
    fn zero() -> Self {
        Double(f64::zero())
    }

    fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl fmt::Display for Double {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<f64> for Double {
    type Error = Error;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Double> for f64 {
    fn from(value: Double) -> Self {
        value.0
    }
}

#[cfg(test)]
impl Arbitrary for Double {
    fn arbitrary(g: &mut Gen) -> Self {
        let mut value = f64::arbitrary(g);
        while !value.is_finite() {
            value = f64::arbitrary(g);
        }

        Self::from_arithmetic(value)
    }
}

#[cfg(test)]
mod test {
    use std::hash::{BuildHasher, RandomState};

    use super::Double;
    use crate::error::Error;
    use test_log::test;

    #[test]
    fn nan_is_rejected() {
        assert_eq!(Double::new(f64::NAN), Err(Error::FloatIsNaN));
        assert!(Double::new(f64::INFINITY).is_ok());
    }

    #[test]
    fn total_order() {
        let mut values = vec![
            Double::new(2.5).unwrap(),
            Double::new(-1.0).unwrap(),
            Double::new(f64::NEG_INFINITY).unwrap(),
            Double::new(0.0).unwrap(),
        ];
        values.sort();

        assert_eq!(
            values.into_iter().map(f64::from).collect::<Vec<_>>(),
            vec![f64::NEG_INFINITY, -1.0, 0.0, 2.5]
        );
    }

    #[test]
    fn signed_zeros_are_equal() {
        let zero = Double::new(0.0).unwrap();
        let negative_zero = Double::new(-0.0).unwrap();
        let hasher = RandomState::new();

        assert_eq!(zero, negative_zero);
        assert_eq!(hasher.hash_one(zero), hasher.hash_one(negative_zero));
        assert!(negative_zero.value().is_sign_positive());
        assert_eq!(negative_zero * Double::new(5.0).unwrap(), zero);
    }
}
