use std::fmt::{Debug, Display, Formatter};

use crate::quantity::Quantity;

/// Dollars per megawatt-hour, the unit of wholesale electricity prices.
pub type MegawattHourRate = Quantity<f64, -1, -1, 1>;

impl Display for MegawattHourRate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2} $/MWh", self.0)
    }
}

impl Debug for MegawattHourRate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}$/MWh", self.0)
    }
}
