use serde::Serialize;

use crate::{core::objective::Objective, prelude::*, quantity::cost::Cost};

/// Profit at a single grid split.
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct EnumerationPoint {
    pub split: f64,
    pub profit: Cost,
}

/// Brute-force profit series over `0, step, 2·step, …` up to `H_T`.
#[must_use]
#[derive(Clone, Debug)]
pub struct Enumeration(Vec<EnumerationPoint>);

impl Enumeration {
    pub const DEFAULT_STEP: f64 = 1.0;

    #[instrument(skip_all, fields(step = step))]
    #[expect(clippy::cast_precision_loss)]
    pub fn run(objective: &Objective<'_>, step: f64) -> Self {
        let n_steps = Self::n_steps(*objective.bounds().end(), step);
        let points: Vec<_> = (0..=n_steps)
            .map(|index| index as f64 * step)
            .map(|split| EnumerationPoint { split, profit: objective.profit(split) })
            .collect();
        debug!(n_points = points.len(), "enumerated");
        Self(points)
    }

    /// Number of whole steps within `[0, end]`.
    ///
    /// Ratios within rounding noise of an integer are not rounded down: `98 / 0.1` is 980 steps.
    #[expect(clippy::cast_possible_truncation)]
    #[expect(clippy::cast_sign_loss)]
    fn n_steps(end: f64, step: f64) -> usize {
        let ratio = (end / step).max(0.0);
        let nearest = ratio.round();
        let n_steps =
            if (ratio - nearest).abs() <= 1e-9 * nearest.max(1.0) { nearest } else { ratio.floor() };
        n_steps as usize
    }

    pub fn points(&self) -> &[EnumerationPoint] {
        &self.0
    }

    /// The first grid point with the highest profit.
    pub fn argmax(&self) -> Option<EnumerationPoint> {
        self.0
            .iter()
            .copied()
            .reduce(|best, point| if point.profit > best.profit { point } else { best })
    }

    /// Compare the grid argmax with a split found elsewhere.
    pub fn cross_check(&self, split: f64) -> Option<CrossCheck> {
        self.argmax().map(|best| CrossCheck {
            split: best.split,
            profit: best.profit,
            distance: (best.split - split).abs(),
        })
    }
}

/// Grid argmax and how far it lies from the solver split.
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct CrossCheck {
    pub split: f64,
    pub profit: Cost,
    pub distance: f64,
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::core::{integrator::Strategy, synthetic};

    #[test]
    fn test_grid_covers_bounds() {
        synthetic::with_linear_context(|context| {
            let objective = Objective::new(*context, Strategy::Empirical.integrator(0.1));
            let enumeration = Enumeration::run(&objective, Enumeration::DEFAULT_STEP);
            assert_eq!(enumeration.points().len(), 99);
            assert_abs_diff_eq!(enumeration.points()[0].split, 0.0);
            assert_abs_diff_eq!(enumeration.points()[98].split, 98.0);
            assert_abs_diff_eq!(enumeration.points()[0].profit.0, 0.0);
        });
    }

    #[test]
    fn test_grid_with_fractional_step() {
        synthetic::with_linear_context(|context| {
            let objective = Objective::new(*context, Strategy::Empirical.integrator(0.1));
            let enumeration = Enumeration::run(&objective, 0.7);
            // ⌊(9600 / 97) / 0.7⌋ = 141 steps:
            assert_eq!(enumeration.points().len(), 142);
            let last = enumeration.points()[141].split;
            assert_abs_diff_eq!(last, 141.0 * 0.7, epsilon = 1e-9);
            assert!(last <= context.total_duration);
        });
    }

    #[test]
    fn test_n_steps() {
        assert_eq!(Enumeration::n_steps(98.0, 0.1), 980);
        assert_eq!(Enumeration::n_steps(98.969, 1.0), 98);
        assert_eq!(Enumeration::n_steps(0.5, 1.0), 0);
        assert_eq!(Enumeration::n_steps(98.969, 1e-3), 98_969);
    }

    #[test]
    fn test_cross_check() {
        let enumeration = Enumeration(vec![
            EnumerationPoint { split: 0.0, profit: Cost::from(0.0) },
            EnumerationPoint { split: 1.0, profit: Cost::from(2.0) },
            EnumerationPoint { split: 2.0, profit: Cost::from(1.0) },
        ]);
        let cross_check = enumeration.cross_check(1.25).unwrap();
        assert_abs_diff_eq!(cross_check.split, 1.0);
        assert_abs_diff_eq!(cross_check.distance, 0.25);
        assert_eq!(cross_check.profit, Cost::from(2.0));
        assert!(Enumeration(Vec::new()).cross_check(1.0).is_none());
    }

    #[test]
    fn test_argmax_prefers_first() {
        let enumeration = Enumeration(vec![
            EnumerationPoint { split: 0.0, profit: Cost::from(1.0) },
            EnumerationPoint { split: 1.0, profit: Cost::from(3.0) },
            EnumerationPoint { split: 2.0, profit: Cost::from(3.0) },
        ]);
        assert_abs_diff_eq!(enumeration.argmax().unwrap().split, 1.0);
        assert!(Enumeration(Vec::new()).argmax().is_none());
    }
}
