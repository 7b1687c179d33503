use std::iter::once;

use itertools::Itertools;
use serde::Serialize;

use crate::{
    core::{context::Context, error::CoreError},
    prelude::*,
    quantity::rate::MegawattHourRate,
};

/// Duration interval to integrate the price over, in percent.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Window {
    pub start: f64,
    pub end: f64,
}

impl Window {
    /// The top slice of the duration curve: `[0, split]`.
    pub const fn generation(split: f64) -> Self {
        Self { start: 0.0, end: split }
    }

    /// The bottom slice of the duration curve: `[H_T - split, H_T]`.
    pub const fn pumping(split: f64, total_duration: f64) -> Self {
        Self { start: total_duration - split, end: total_duration }
    }

    pub const fn width(self) -> f64 {
        (self.end - self.start).max(0.0)
    }

    /// Number of grid steps needed to cover the window.
    ///
    /// Ratios within rounding noise of an integer are not rounded up: `42 / 0.1` is 420 steps.
    #[expect(clippy::cast_possible_truncation)]
    #[expect(clippy::cast_sign_loss)]
    fn n_steps(self, step: f64) -> usize {
        let ratio = self.width() / step;
        let nearest = ratio.round();
        let n_steps =
            if (ratio - nearest).abs() <= 1e-9 * nearest.max(1.0) { nearest } else { ratio.ceil() };
        n_steps as usize
    }

    /// Left grid nodes `start, start + step, …` strictly below the end.
    #[expect(clippy::cast_precision_loss)]
    fn grid(self, step: f64) -> impl Iterator<Item = f64> {
        (0..self.n_steps(step)).map(move |index| self.start + index as f64 * step)
    }
}

/// Integration of the price over a duration window.
pub trait Integrate {
    fn integrate(&self, context: &Context<'_>, window: Window) -> MegawattHourRate;
}

/// Trapezoidal rule over the fitted curve on a fixed grid that always ends at the window end.
#[derive(Copy, Clone, Debug)]
pub struct Trapezoidal {
    pub step: f64,
}

impl Integrate for Trapezoidal {
    fn integrate(&self, context: &Context<'_>, window: Window) -> MegawattHourRate {
        if window.width() <= 0.0 {
            return MegawattHourRate::ZERO;
        }
        let nodes = window
            .grid(self.step)
            .chain(once(window.end))
            .map(|duration| (duration, context.model.evaluate(duration).0));
        MegawattHourRate::from(trapezoid(nodes))
    }
}

/// Left Riemann sum over the fitted curve on a fixed grid.
#[derive(Copy, Clone, Debug)]
pub struct LeftRiemann {
    pub step: f64,
}

impl Integrate for LeftRiemann {
    fn integrate(&self, context: &Context<'_>, window: Window) -> MegawattHourRate {
        window.grid(self.step).map(|duration| context.model.evaluate(duration) * self.step).sum()
    }
}

/// Trapezoidal rule over the observed points strictly within the window, without any curve fit.
#[derive(Copy, Clone, Debug)]
pub struct Empirical;

impl Empirical {
    fn try_integrate(context: &Context<'_>, window: Window) -> Result<f64, CoreError> {
        let mut nodes = context
            .curve
            .points_within(window.start, window.end)
            .map(|point| (point.duration, point.price.0))
            .peekable();
        if nodes.peek().is_none() {
            return Err(CoreError::IntegrationWindowEmpty { start: window.start, end: window.end });
        }
        Ok(trapezoid(nodes))
    }
}

impl Integrate for Empirical {
    fn integrate(&self, context: &Context<'_>, window: Window) -> MegawattHourRate {
        let integral = Self::try_integrate(context, window).unwrap_or_else(|error| {
            trace!(%error, "integrating to zero");
            0.0
        });
        MegawattHourRate::from(integral)
    }
}

/// Which integration to use in the profit objective.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    /// Trapezoidal rule over the fitted curve.
    Continuous,

    /// Left Riemann sum over the fitted curve.
    Discrete,

    /// Trapezoidal rule over the observed prices, no curve fit involved.
    #[default]
    Empirical,
}

impl Strategy {
    pub const DEFAULT_STEP: f64 = 0.1;

    pub fn integrator(self, step: f64) -> Box<dyn Integrate> {
        match self {
            Self::Continuous => Box::new(Trapezoidal { step }),
            Self::Discrete => Box::new(LeftRiemann { step }),
            Self::Empirical => Box::new(Empirical),
        }
    }
}

/// Trapezoidal rule over `(x, y)` nodes sorted by `x`.
fn trapezoid(nodes: impl Iterator<Item = (f64, f64)>) -> f64 {
    nodes.tuple_windows().map(|((x1, y1), (x2, y2))| (x2 - x1) * (y1 + y2) / 2.0).sum()
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::core::synthetic;

    #[test]
    fn test_trapezoid() {
        assert_abs_diff_eq!(trapezoid([(0.0, 0.0), (1.0, 2.0), (3.0, 2.0)].into_iter()), 5.0);
        assert_abs_diff_eq!(trapezoid([(1.0, 7.0)].into_iter()), 0.0);
    }

    #[test]
    fn test_grid() {
        let nodes = Window { start: 1.0, end: 1.35 }.grid(0.1).collect_vec();
        assert_eq!(nodes.len(), 4);
        assert_abs_diff_eq!(nodes[3], 1.3, epsilon = 1e-12);
        assert_eq!(Window::generation(0.0).grid(0.1).count(), 0);
    }

    #[test]
    fn test_grid_ignores_rounding_noise() {
        assert_eq!(Window::generation(42.0).grid(0.1).count(), 420);
        assert_eq!(Window::pumping(0.3, 1.0).grid(0.1).count(), 3);
    }

    #[test]
    fn test_pumping_window() {
        let window = Window::pumping(30.0, 98.0);
        assert_abs_diff_eq!(window.start, 68.0);
        assert_abs_diff_eq!(window.width(), 30.0);
    }

    #[test]
    fn test_trapezoidal_exact_on_linear_curve() {
        synthetic::with_linear_context(|context| {
            let integral = Trapezoidal { step: 0.1 }.integrate(context, Window::generation(42.35));
            // ∫₀ˣ (100 - ω) dω = 100x - x²/2
            assert_abs_diff_eq!(integral.0, 100.0 * 42.35 - 42.35 * 42.35 / 2.0, epsilon = 1e-3);
        });
    }

    #[test]
    fn test_left_riemann_converges() {
        synthetic::with_linear_context(|context| {
            let window = Window::generation(40.0);
            let exact = 100.0 * 40.0 - 40.0 * 40.0 / 2.0;
            let coarse = LeftRiemann { step: 0.1 }.integrate(context, window).0;
            let fine = LeftRiemann { step: 0.001 }.integrate(context, window).0;
            assert!((fine - exact).abs() < (coarse - exact).abs());
            assert_abs_diff_eq!(fine, exact, epsilon = 0.05);
        });
    }

    #[test]
    fn test_empirical_uses_observed_points() {
        synthetic::with_linear_context(|context| {
            // Points at 100·k/97 for k = 1..=4 fall within (0, 5):
            let integral = Empirical.integrate(context, Window::generation(5.0)).0;
            let (first, last) = (100.0 / 97.0, 400.0 / 97.0);
            let expected = (last - first) * ((100.0 - first) + (100.0 - last)) / 2.0;
            assert_abs_diff_eq!(integral, expected, epsilon = 1e-9);
        });
    }

    #[test]
    fn test_empirical_empty_window_is_zero() {
        synthetic::with_linear_context(|context| {
            assert_abs_diff_eq!(Empirical.integrate(context, Window::generation(0.5)).0, 0.0);
            assert!(matches!(
                Empirical::try_integrate(context, Window::generation(0.5)),
                Err(CoreError::IntegrationWindowEmpty { .. }),
            ));
        });
    }

    #[test]
    fn test_zero_width_windows() {
        synthetic::with_linear_context(|context| {
            for strategy in [Strategy::Continuous, Strategy::Discrete, Strategy::Empirical] {
                let integrator = strategy.integrator(Strategy::DEFAULT_STEP);
                assert_abs_diff_eq!(integrator.integrate(context, Window::generation(0.0)).0, 0.0);
                let pumping = Window::pumping(0.0, context.total_duration);
                assert_abs_diff_eq!(integrator.integrate(context, pumping).0, 0.0);
            }
        });
    }
}
