use std::ops::RangeInclusive;

use serde::Serialize;

use crate::{
    core::{
        context::Context,
        integrator::{Integrate, Window},
    },
    quantity::cost::Cost,
};

/// Economic result of operating at a split point.
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct Outcome {
    pub revenue: Cost,
    pub pumping_cost: Cost,

    /// Revenue minus the pumping cost.
    pub profit: Cost,
}

/// Net profit of generating over `[0, split]` and pumping over `[H_T - split, H_T]`.
///
/// [`Objective::profit`] is to be maximized, and [`Objective::cost`] is its negation for minimizers.
pub struct Objective<'a> {
    context: Context<'a>,
    integrator: Box<dyn Integrate>,
}

impl<'a> Objective<'a> {
    pub fn new(context: Context<'a>, integrator: Box<dyn Integrate>) -> Self {
        Self { context, integrator }
    }

    /// Feasible split points: `[0, H_T]`.
    pub const fn bounds(&self) -> RangeInclusive<f64> {
        0.0..=self.context.total_duration
    }

    pub fn evaluate(&self, split: f64) -> Outcome {
        let generation = self.integrator.integrate(&self.context, Window::generation(split));
        let pumping = self
            .integrator
            .integrate(&self.context, Window::pumping(split, self.context.total_duration));
        let revenue = self.context.plant.generating_power() * generation;
        let pumping_cost = self.context.plant.pumping_power() * pumping;
        Outcome { revenue, pumping_cost, profit: revenue - pumping_cost }
    }

    pub fn profit(&self, split: f64) -> Cost {
        self.evaluate(split).profit
    }

    pub fn cost(&self, split: f64) -> Cost {
        -self.profit(split)
    }
}
