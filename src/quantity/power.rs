use std::{
    fmt::{Debug, Display, Formatter},
    ops::Mul,
};

use crate::quantity::{Quantity, cost::Cost, rate::MegawattHourRate};

pub type Megawatts = Quantity<f64, 1, 0, 0>;

impl Megawatts {
    pub const fn from_watts(watts: f64) -> Self {
        Self(watts / 1_000_000.0)
    }
}

impl Display for Megawatts {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2} MW", self.0)
    }
}

impl Debug for Megawatts {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.3}MW", self.0)
    }
}

/// Power running through one unit of the duration axis at the given price.
///
/// The duration axis is measured in percent of the horizon, and each percent point counts as an hour.
impl Mul<MegawattHourRate> for Megawatts {
    type Output = Cost;

    fn mul(self, rhs: MegawattHourRate) -> Self::Output {
        Quantity(self.0 * rhs.0)
    }
}
