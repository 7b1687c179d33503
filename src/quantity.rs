pub mod cost;
pub mod power;
pub mod rate;

use std::ops::{Div, Mul};

use serde::{Deserialize, Serialize};

/// Physical quantity tagged with the exponents of its base dimensions.
#[derive(
    Clone,
    Copy,
    Default,
    Deserialize,
    PartialEq,
    PartialOrd,
    Serialize,
    derive_more::Add,
    derive_more::AddAssign,
    derive_more::From,
    derive_more::FromStr,
    derive_more::Neg,
    derive_more::Sub,
    derive_more::SubAssign,
    derive_more::Sum,
)]
#[serde(transparent)]
pub struct Quantity<T, const POWER: isize, const TIME: isize, const COST: isize>(pub T);

impl<const POWER: isize, const TIME: isize, const COST: isize> Quantity<f64, POWER, TIME, COST> {
    pub const ZERO: Self = Self(0.0);
}

impl<T, const POWER: isize, const TIME: isize, const COST: isize> Mul<T>
    for Quantity<T, POWER, TIME, COST>
where
    T: Mul<T>,
{
    type Output = Quantity<T::Output, POWER, TIME, COST>;

    fn mul(self, rhs: T) -> Self::Output {
        Quantity(self.0 * rhs)
    }
}

impl<T, const POWER: isize, const TIME: isize, const COST: isize> Div<T>
    for Quantity<T, POWER, TIME, COST>
where
    T: Div<T>,
{
    type Output = Quantity<T::Output, POWER, TIME, COST>;

    fn div(self, rhs: T) -> Self::Output {
        Quantity(self.0 / rhs)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::quantity::{cost::Cost, rate::MegawattHourRate};

    #[test]
    fn test_scalar_arithmetic() {
        let rate = MegawattHourRate::from(40.0) * 1.5 / 2.0;
        assert_abs_diff_eq!(rate.0, 30.0);
    }

    #[test]
    fn test_sum() {
        let total: Cost = [Cost::from(1.5), Cost::from(-0.5), Cost::from(2.0)].into_iter().sum();
        assert_abs_diff_eq!(total.0, 3.0);
    }

    #[test]
    fn test_parse() {
        let rate: MegawattHourRate = "42.5".parse().unwrap();
        assert_abs_diff_eq!(rate.0, 42.5);
    }
}
