use std::ops::RangeInclusive;

use bon::Builder;
use fastrand::Rng;
use itertools::Itertools;
use serde::Serialize;

use crate::{
    core::{
        error::CoreError,
        objective::{Objective, Outcome},
    },
    prelude::*,
};

/// Seeded differential evolution, `best/1/bin` with dithered mutation and immediate updating.
///
/// The population lives in the unit hypercube and is scaled onto the bounds for evaluation.
#[derive(Clone, Debug, Builder)]
pub struct DifferentialEvolution {
    #[builder(default = 1)]
    seed: u64,

    /// Population size multiplier: the population holds this many members per parameter.
    #[builder(default = 15)]
    population_size: usize,

    #[builder(default = 1000)]
    max_iterations: usize,

    /// Relative convergence tolerance on the population energies.
    #[builder(default = 0.01)]
    tolerance: f64,

    #[builder(default = 0.0)]
    absolute_tolerance: f64,

    /// Crossover probability.
    #[builder(default = 0.7)]
    recombination: f64,

    /// Differential weight range, re-drawn every generation.
    #[builder(default = 0.5..=1.0)]
    mutation: RangeInclusive<f64>,
}

/// Best point found by [`DifferentialEvolution::minimize`].
#[derive(Clone, Debug)]
pub struct Minimum {
    pub x: Vec<f64>,
    pub cost: f64,
    pub n_iterations: usize,
    pub n_evaluations: usize,
    pub converged: bool,
}

/// Optimal split point together with its economics.
#[derive(Copy, Clone, Debug, Serialize)]
pub struct Solution {
    /// Generating hours `H_G`, in duration percent.
    pub split: f64,

    #[serde(flatten)]
    pub outcome: Outcome,

    pub n_iterations: usize,
    pub n_evaluations: usize,

    /// Whether the population has converged before the iteration budget was exhausted.
    pub converged: bool,
}

impl Default for DifferentialEvolution {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl DifferentialEvolution {
    pub const MIN_POPULATION_SIZE: usize = 5;

    /// Find the profit-maximizing split point within `[0, H_T]`.
    #[instrument(skip_all, fields(seed = self.seed))]
    pub fn solve(&self, objective: &Objective<'_>) -> Solution {
        let minimum = self.minimize(&[objective.bounds()], |x| objective.cost(x[0]).0);
        let split = minimum.x[0];
        debug!(split, cost = minimum.cost, "minimized");
        let solution = Solution {
            split,
            outcome: objective.evaluate(split),
            n_iterations: minimum.n_iterations,
            n_evaluations: minimum.n_evaluations,
            converged: minimum.converged,
        };
        if !solution.converged {
            let error = CoreError::SolverDidNotConverge { n_iterations: solution.n_iterations };
            warn!(%error, split, "returning the best split found so far");
        }
        info!(
            split = %format!("{split:.2}"),
            profit = %solution.outcome.profit,
            n_iterations = solution.n_iterations,
            n_evaluations = solution.n_evaluations,
            "solved",
        );
        solution
    }

    /// Minimize the cost function over the box bounds.
    #[expect(clippy::cast_precision_loss)]
    pub fn minimize(
        &self,
        bounds: &[RangeInclusive<f64>],
        mut cost: impl FnMut(&[f64]) -> f64,
    ) -> Minimum {
        let n_parameters = bounds.len();
        let mut rng = Rng::with_seed(self.seed);
        let n_members = (self.population_size * n_parameters).max(Self::MIN_POPULATION_SIZE);

        let scale = |unit: &[f64]| -> Vec<f64> {
            unit.iter()
                .zip(bounds)
                .map(|(u, bound)| bound.start() + u * (bound.end() - bound.start()))
                .collect()
        };

        let mut population = Self::latin_hypercube(&mut rng, n_members, n_parameters);
        let mut energies = population.iter().map(|member| cost(&scale(member))).collect_vec();
        let mut n_evaluations = n_members;
        let mut best = Self::argmin(&energies);
        trace!(n_members, best = energies[best], "initialized the population");

        let mut n_iterations = 0;
        let mut converged = false;
        while n_iterations < self.max_iterations {
            n_iterations += 1;
            let weight = self.mutation.start()
                + rng.f64() * (self.mutation.end() - self.mutation.start());

            for index in 0..n_members {
                let (r0, r1) = Self::select_pair(&mut rng, n_members, index);
                let fill_point = rng.usize(0..n_parameters);
                let trial = (0..n_parameters)
                    .map(|parameter| {
                        if parameter == fill_point || rng.f64() < self.recombination {
                            let mutant = population[best][parameter]
                                + weight * (population[r0][parameter] - population[r1][parameter]);
                            if (0.0..=1.0).contains(&mutant) { mutant } else { rng.f64() }
                        } else {
                            population[index][parameter]
                        }
                    })
                    .collect_vec();

                let energy = cost(&scale(&trial));
                n_evaluations += 1;
                if energy <= energies[index] {
                    population[index] = trial;
                    energies[index] = energy;
                    if energy < energies[best] {
                        best = index;
                    }
                }
            }

            let mean = energies.iter().sum::<f64>() / n_members as f64;
            let variance =
                energies.iter().map(|energy| (energy - mean).powi(2)).sum::<f64>() / n_members as f64;
            if variance.sqrt() <= self.absolute_tolerance + self.tolerance * mean.abs() {
                converged = true;
                break;
            }
        }

        debug!(n_iterations, n_evaluations, converged, "finished");
        Minimum {
            x: scale(&population[best]),
            cost: energies[best],
            n_iterations,
            n_evaluations,
            converged,
        }
    }

    /// Stratified initial population: every parameter axis gets exactly one member per stratum.
    #[expect(clippy::cast_precision_loss)]
    fn latin_hypercube(rng: &mut Rng, n_members: usize, n_parameters: usize) -> Vec<Vec<f64>> {
        let mut population = vec![vec![0.0; n_parameters]; n_members];
        for parameter in 0..n_parameters {
            let mut strata = (0..n_members)
                .map(|stratum| (stratum as f64 + rng.f64()) / n_members as f64)
                .collect_vec();
            rng.shuffle(&mut strata);
            for (member, value) in population.iter_mut().zip(strata) {
                member[parameter] = value;
            }
        }
        population
    }

    /// Two distinct members other than the current one.
    fn select_pair(rng: &mut Rng, n_members: usize, index: usize) -> (usize, usize) {
        let mut pick = |excluded: &[usize]| loop {
            let candidate = rng.usize(0..n_members);
            if !excluded.contains(&candidate) {
                break candidate;
            }
        };
        let r0 = pick(&[index]);
        let r1 = pick(&[index, r0]);
        (r0, r1)
    }

    fn argmin(energies: &[f64]) -> usize {
        energies.iter().position_min_by(|lhs, rhs| lhs.total_cmp(rhs)).unwrap_or_default()
    }
}
