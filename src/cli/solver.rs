use clap::Parser;

use crate::{core::solver::DifferentialEvolution, prelude::*};

#[derive(Copy, Clone, Parser)]
pub struct SolverArgs {
    /// Random seed of the differential evolution.
    #[clap(long = "seed", env = "SOLVER_SEED", default_value = "1")]
    pub seed: u64,

    /// Population members per optimized parameter.
    #[clap(long = "population-size", env = "SOLVER_POPULATION_SIZE", default_value = "15")]
    pub population_size: usize,

    #[clap(long = "max-iterations", env = "SOLVER_MAX_ITERATIONS", default_value = "1000")]
    pub max_iterations: usize,

    /// Relative tolerance on the spread of the population costs.
    #[clap(long = "tolerance", env = "SOLVER_TOLERANCE", default_value = "0.01")]
    pub tolerance: f64,

    /// Crossover probability.
    #[clap(long = "recombination", env = "SOLVER_RECOMBINATION", default_value = "0.7")]
    pub recombination: f64,

    #[clap(long = "mutation-min", env = "SOLVER_MUTATION_MIN", default_value = "0.5")]
    pub mutation_min: f64,

    #[clap(long = "mutation-max", env = "SOLVER_MUTATION_MAX", default_value = "1.0")]
    pub mutation_max: f64,
}

impl SolverArgs {
    pub fn solver(self) -> Result<DifferentialEvolution> {
        ensure!(self.max_iterations != 0, "the iteration budget must be positive");
        ensure!(self.tolerance >= 0.0, "the tolerance must not be negative");
        ensure!(
            (0.0..=1.0).contains(&self.recombination),
            "the recombination must be within `0..=1`, got {}",
            self.recombination,
        );
        ensure!(
            0.0 <= self.mutation_min && self.mutation_min <= self.mutation_max,
            "the mutation range `{}..={}` is invalid",
            self.mutation_min,
            self.mutation_max,
        );
        Ok(DifferentialEvolution::builder()
            .seed(self.seed)
            .population_size(self.population_size)
            .max_iterations(self.max_iterations)
            .tolerance(self.tolerance)
            .recombination(self.recombination)
            .mutation(self.mutation_min..=self.mutation_max)
            .build())
    }
}
