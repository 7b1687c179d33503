//! Marginal-value condition for the split point, solved without any integration.
//!
//! At the optimum, the last generated percent earns as much as the last pumped percent costs:
//! `P_g · f(H_G) = P_p · f(H_T - H_G)`. With equal flows and heads, it reduces to
//! `e_g · e_p = f(H_T - H_G) / f(H_G)`.

use crate::{core::context::Context, prelude::*};

const MAX_ITERATIONS: usize = 100;
const TOLERANCE: f64 = 1e-9;

/// Bisect the marginal condition over `[0, H_T / 2]`.
///
/// Returns [`None`] when the condition does not change its sign within the interval.
#[instrument(skip_all)]
pub fn analytic_split(context: &Context<'_>) -> Option<f64> {
    let generating_power = context.plant.generating_power().0;
    let pumping_power = context.plant.pumping_power().0;
    let marginal = |split: f64| {
        generating_power * context.model.evaluate(split).0
            - pumping_power * context.model.evaluate(context.total_duration - split).0
    };

    let (mut low, mut high) = (0.0, context.total_duration / 2.0);
    let (mut low_value, high_value) = (marginal(low), marginal(high));
    if low_value.signum() == high_value.signum() {
        warn!(low_value, high_value, "the marginal condition has no root");
        return None;
    }
    for _ in 0..MAX_ITERATIONS {
        let middle = f64::midpoint(low, high);
        let value = marginal(middle);
        if value.signum() == low_value.signum() {
            (low, low_value) = (middle, value);
        } else {
            high = middle;
        }
        if high - low < TOLERANCE {
            break;
        }
    }
    Some(f64::midpoint(low, high))
}
