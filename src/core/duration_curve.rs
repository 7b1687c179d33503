use itertools::Itertools;
use serde::Serialize;

use crate::{
    core::{error::CoreError, observation::PriceObservation, rank::exceedance_ranks},
    prelude::*,
    quantity::rate::MegawattHourRate,
};

/// Price paired with the percentage of time it is equalled or exceeded.
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct DurationPoint {
    /// Exceedance frequency in percent, `(0, 100)`.
    pub duration: f64,

    pub price: MegawattHourRate,
}

/// Empirical price-duration curve, ordered from the highest price to the lowest.
#[must_use]
#[derive(Clone, Debug)]
pub struct DurationCurve(Vec<DurationPoint>);

impl DurationCurve {
    #[instrument(skip_all, fields(n_observations = observations.len()))]
    pub fn try_build(observations: &[PriceObservation]) -> Result<Self, CoreError> {
        Self::try_from_prices(observations.iter().map(|observation| observation.price))
    }

    pub fn try_from_prices(
        prices: impl IntoIterator<Item = MegawattHourRate>,
    ) -> Result<Self, CoreError> {
        let (prices, skipped): (Vec<_>, Vec<_>) =
            prices.into_iter().map(|price| price.0).partition(|price| price.is_finite());
        if !skipped.is_empty() {
            warn!(n_skipped = skipped.len(), "skipped non-finite prices");
        }
        if prices.is_empty() {
            return Err(CoreError::EmptySeries);
        }

        #[expect(clippy::cast_precision_loss)]
        let denominator = (prices.len() + 1) as f64;
        let points = exceedance_ranks(&prices)
            .into_iter()
            .zip(prices)
            .map(|(rank, price)| DurationPoint {
                duration: 100.0 * rank / denominator,
                price: MegawattHourRate::from(price),
            })
            .sorted_by(|lhs, rhs| rhs.price.0.total_cmp(&lhs.price.0))
            .collect_vec();
        debug!(
            n_points = points.len(),
            max_price = ?points[0].price,
            min_price = ?points[points.len() - 1].price,
            "built the price-duration curve",
        );
        Ok(Self(points))
    }

    pub fn points(&self) -> &[DurationPoint] {
        &self.0
    }

    pub const fn len(&self) -> usize {
        self.0.len()
    }

    /// Total duration `H_T`: the largest duration percent on the curve.
    pub fn total_duration(&self) -> f64 {
        self.0.last().map_or(0.0, |point| point.duration)
    }

    /// Observed points whose duration lies strictly within the bounds, in the ascending duration order.
    pub fn points_within(&self, start: f64, end: f64) -> impl Iterator<Item = DurationPoint> + '_ {
        self.0.iter().copied().filter(move |point| start < point.duration && point.duration < end)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::core::synthetic;

    fn curve_of(prices: &[f64]) -> DurationCurve {
        DurationCurve::try_from_prices(prices.iter().copied().map(MegawattHourRate::from)).unwrap()
    }

    #[test]
    fn test_empty() {
        assert_eq!(
            DurationCurve::try_from_prices(std::iter::empty()).unwrap_err(),
            CoreError::EmptySeries,
        );
    }

    #[test]
    fn test_single_point() {
        let curve = curve_of(&[42.0]);
        assert_eq!(curve.len(), 1);
        assert_abs_diff_eq!(curve.points()[0].duration, 50.0);
        assert_abs_diff_eq!(curve.total_duration(), 50.0);
    }

    #[test]
    fn test_sorted_by_price_descending() {
        let curve = curve_of(&[20.0, 40.0, 10.0, 30.0]);
        let prices = curve.points().iter().map(|point| point.price.0).collect_vec();
        assert_eq!(prices, [40.0, 30.0, 20.0, 10.0]);
        let durations = curve.points().iter().map(|point| point.duration).collect_vec();
        assert_eq!(durations, [20.0, 40.0, 60.0, 80.0]);
    }

    #[test]
    fn test_ties_share_duration() {
        let curve = curve_of(&[10.0, 10.0, 20.0]);
        let points = curve.points();
        assert_abs_diff_eq!(points[0].duration, 25.0);
        assert_abs_diff_eq!(points[1].duration, 62.5);
        assert_abs_diff_eq!(points[2].duration, 62.5);
    }

    #[test]
    fn test_monotonic_without_ties() {
        let curve = DurationCurve::try_build(&synthetic::linear_day()).unwrap();
        assert_eq!(curve.len(), 96);
        for (lhs, rhs) in curve.points().iter().tuple_windows() {
            assert!(lhs.duration < rhs.duration);
            assert!(lhs.price.0 > rhs.price.0);
        }
        assert!(curve.points().iter().all(|point| point.duration > 0.0 && point.duration < 100.0));
        assert_abs_diff_eq!(curve.total_duration(), 9600.0 / 97.0, epsilon = 1e-12);
    }

    #[test]
    fn test_skips_non_finite_prices() {
        let curve = curve_of(&[f64::NAN, 10.0, 20.0]);
        assert_eq!(curve.len(), 2);
    }

    #[test]
    fn test_points_within_is_strict() {
        let curve = curve_of(&[40.0, 30.0, 20.0, 10.0]);
        let within = curve.points_within(20.0, 80.0).map(|point| point.duration).collect_vec();
        assert_eq!(within, [40.0, 60.0]);
    }
}
