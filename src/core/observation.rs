use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::quantity::rate::MegawattHourRate;

/// Wholesale price over one market interval.
#[must_use]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PriceObservation {
    pub start_time: DateTime<FixedOffset>,
    pub end_time: DateTime<FixedOffset>,
    pub operating_date: NaiveDate,

    /// Market operating hour, `1..=25` to allow for the daylight saving transition.
    pub operating_hour: u8,

    pub price: MegawattHourRate,
}

/// Order the observations chronologically.
pub fn sort_by_start_time(observations: &mut [PriceObservation]) {
    observations.sort_by_key(|observation| observation.start_time);
}
