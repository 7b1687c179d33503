use clap::Parser;

use crate::{
    cli::{
        inputs::{FitArgs, Inputs, PricesArgs},
        objective::ObjectiveArgs,
    },
    core::enumeration::Enumeration,
    fmt::FormattedPercentage,
    prelude::*,
    tables::build_enumeration_table,
};

#[derive(Parser)]
pub struct EnumerateArgs {
    #[clap(flatten)]
    pub prices: PricesArgs,

    #[clap(flatten)]
    pub fit: FitArgs,

    #[clap(flatten)]
    pub objective: ObjectiveArgs,

    #[clap(flatten)]
    pub grid: GridArgs,

    /// Print the series as JSON.
    #[clap(long)]
    pub json: bool,
}

#[derive(Copy, Clone, Parser)]
pub struct GridArgs {
    /// Enumeration grid step in duration percent.
    #[clap(
        long = "enumeration-step",
        env = "ENUMERATION_STEP",
        default_value_t = Enumeration::DEFAULT_STEP
    )]
    pub enumeration_step: f64,
}

impl GridArgs {
    pub fn step(self) -> Result<f64> {
        ensure!(
            self.enumeration_step.is_finite() && self.enumeration_step > 0.0,
            "the enumeration step must be positive, got {}",
            self.enumeration_step,
        );
        Ok(self.enumeration_step)
    }
}

#[instrument(skip_all)]
pub fn enumerate(args: &EnumerateArgs) -> Result {
    let step = args.grid.step()?;
    let plant = args.objective.plant.load()?;
    let inputs = Inputs::load(&args.prices, args.fit)?;
    let objective = args.objective.objective(inputs.context(plant))?;

    let enumeration = Enumeration::run(&objective, step);
    let best = enumeration.argmax().context("the enumeration grid is empty")?;
    info!(split = ?FormattedPercentage(best.split), profit = %best.profit, "best grid point");

    if args.json {
        println!("{}", serde_json::to_string_pretty(enumeration.points())?);
    } else {
        println!("{}", build_enumeration_table(&enumeration));
    }
    Ok(())
}
