use itertools::Itertools;
use linfa::{Dataset, traits::Fit};
use linfa_linear::LinearRegression;
use ndarray::{Array1, Array2};
use ordered_float::OrderedFloat;
use serde::Serialize;

use crate::{
    core::{duration_curve::DurationCurve, error::CoreError},
    prelude::*,
    quantity::rate::MegawattHourRate,
};

/// Least-squares polynomial mapping the duration percent to the price.
///
/// The duration axis is rescaled onto `[-1, 1]` before fitting to keep the normal equations
/// well-conditioned for higher degrees.
#[must_use]
#[derive(Clone, Debug, Serialize)]
pub struct CurveModel {
    degree: usize,
    center: f64,
    half_width: f64,
    intercept: f64,

    /// Coefficients of `t¹..=tⁿ` on the rescaled axis.
    coefficients: Vec<f64>,
}

impl CurveModel {
    pub const DEFAULT_DEGREE: usize = 9;

    #[instrument(skip_all, fields(degree = degree, n_points = curve.len()))]
    pub fn try_fit(curve: &DurationCurve, degree: usize) -> Result<Self> {
        let points = curve.points();
        let n_distinct = points.iter().map(|point| OrderedFloat(point.duration)).unique().count();
        if n_distinct < degree + 1 {
            bail!(CoreError::DegenerateFit { degree, n_points: points.len(), n_distinct });
        }

        let (min_duration, max_duration) = points
            .iter()
            .map(|point| point.duration)
            .minmax_by(f64::total_cmp)
            .into_option()
            .context("the curve is empty")?;
        let center = f64::midpoint(min_duration, max_duration);
        let half_width = match (max_duration - min_duration) / 2.0 {
            half_width if half_width > 0.0 => half_width,
            _ => 1.0,
        };

        if degree == 0 {
            #[expect(clippy::cast_precision_loss)]
            let mean = points.iter().map(|point| point.price.0).sum::<f64>() / points.len() as f64;
            return Ok(Self { degree, center, half_width, intercept: mean, coefficients: vec![] });
        }

        let records = points
            .iter()
            .flat_map(|point| {
                let t = (point.duration - center) / half_width;
                std::iter::successors(Some(t), move |power| Some(power * t)).take(degree)
            })
            .collect_vec();
        let records = Array2::from_shape_vec((points.len(), degree), records)?;
        let targets = points.iter().map(|point| point.price.0).collect::<Array1<_>>();
        let regression = LinearRegression::new()
            .fit(&Dataset::new(records, targets))
            .context("failed to fit the price-duration curve")?;

        let this = Self {
            degree,
            center,
            half_width,
            intercept: regression.intercept(),
            coefficients: regression.params().to_vec(),
        };
        ensure!(
            this.intercept.is_finite() && this.coefficients.iter().all(|c| c.is_finite()),
            CoreError::DegenerateFit { degree, n_points: points.len(), n_distinct },
        );
        debug!(rmse = this.rmse(curve), "fitted the price-duration curve");
        Ok(this)
    }

    /// Evaluate the fitted price at any duration, including extrapolation beyond the data.
    pub fn evaluate(&self, duration: f64) -> MegawattHourRate {
        let t = (duration - self.center) / self.half_width;
        let polynomial =
            self.coefficients.iter().rev().fold(0.0, |accumulator, c| accumulator * t + c) * t;
        MegawattHourRate::from(self.intercept + polynomial)
    }

    /// Root-mean-square residual over the curve points.
    pub fn rmse(&self, curve: &DurationCurve) -> f64 {
        let points = curve.points();
        #[expect(clippy::cast_precision_loss)]
        let n_points = points.len().max(1) as f64;
        (points
            .iter()
            .map(|point| (self.evaluate(point.duration).0 - point.price.0).powi(2))
            .sum::<f64>()
            / n_points)
            .sqrt()
    }
}
