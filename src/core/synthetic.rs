//! Synthetic price days for the unit tests.

use chrono::{DateTime, NaiveDate, TimeDelta};

use crate::{
    core::{
        context::Context,
        curve::CurveModel,
        duration_curve::DurationCurve,
        observation::PriceObservation,
        plant::PlantParameters,
    },
    quantity::rate::MegawattHourRate,
};

pub const N_INTERVALS: usize = 96;

fn quarter_hours(date: &str, price: impl Fn(usize) -> f64) -> Vec<PriceObservation> {
    let operating_date = NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap();
    let midnight = DateTime::parse_from_rfc3339(&format!("{date}T00:00:00+00:00")).unwrap();
    (0..N_INTERVALS)
        .map(|index| {
            let start_time = midnight + TimeDelta::minutes(15 * index as i64);
            PriceObservation {
                start_time,
                end_time: start_time + TimeDelta::minutes(15),
                operating_date,
                operating_hour: u8::try_from(index / 4 + 1).unwrap(),
                price: MegawattHourRate::from(price(index)),
            }
        })
        .collect()
}

/// Day of 96 quarter-hour prices whose duration curve is exactly `price = 100 - duration`.
///
/// The prices are shuffled in time so that the ranking has some work to do.
pub fn linear_day() -> Vec<PriceObservation> {
    quarter_hours("2016-09-01", |index| {
        let rank = (index * 37) % N_INTERVALS + 1;
        100.0 - 100.0 * rank as f64 / (N_INTERVALS + 1) as f64
    })
}

pub fn flat_day(date: &str, price: f64) -> Vec<PriceObservation> {
    quarter_hours(date, |_| price)
}

/// Run the closure against the reference plant and the fitted [`linear_day`] curve.
pub fn with_linear_context(f: impl FnOnce(&Context<'_>)) {
    let curve = DurationCurve::try_build(&linear_day()).unwrap();
    let model = CurveModel::try_fit(&curve, CurveModel::DEFAULT_DEGREE).unwrap();
    let context =
        Context::builder().plant(PlantParameters::default()).curve(&curve).model(&model).build();
    f(&context);
}
