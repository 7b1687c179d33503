use std::path::PathBuf;

use clap::Parser;

use crate::{
    core::{context::Context, integrator::Strategy, objective::Objective, plant::PlantParameters},
    prelude::*,
};

#[derive(Parser)]
pub struct ObjectiveArgs {
    /// How to integrate the price over the generating and pumping windows.
    #[clap(long = "strategy", env = "STRATEGY", value_enum, default_value = "empirical")]
    pub strategy: Strategy,

    /// Integration step in duration percent for the fitted-curve strategies.
    #[clap(
        long = "integration-step",
        env = "INTEGRATION_STEP",
        default_value_t = Strategy::DEFAULT_STEP
    )]
    pub integration_step: f64,

    #[clap(flatten)]
    pub plant: PlantArgs,
}

impl ObjectiveArgs {
    pub fn objective<'a>(&self, context: Context<'a>) -> Result<Objective<'a>> {
        ensure!(
            self.integration_step > 0.0,
            "the integration step must be positive, got {}",
            self.integration_step,
        );
        Ok(Objective::new(context, self.strategy.integrator(self.integration_step)))
    }
}

#[derive(Parser)]
pub struct PlantArgs {
    /// TOML file with the plant parameters, which replaces the individual options.
    #[clap(long = "plant-config", env = "PLANT_CONFIG")]
    pub config: Option<PathBuf>,

    #[clap(flatten)]
    pub parameters: PlantParameters,
}

impl PlantArgs {
    pub fn load(&self) -> Result<PlantParameters> {
        let parameters = match &self.config {
            Some(path) => PlantParameters::read_from(path)?,
            None => self.parameters,
        };
        let parameters = parameters.validate()?;
        info!(
            generating_power = %parameters.generating_power(),
            pumping_power = %parameters.pumping_power(),
            round_trip_efficiency = %format!("{:.3}", parameters.round_trip_efficiency()),
            "loaded the plant",
        );
        Ok(parameters)
    }
}
