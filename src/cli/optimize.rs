use std::path::PathBuf;

use clap::Parser;
use serde::Serialize;

use crate::{
    cli::{
        enumerate::GridArgs,
        inputs::{FitArgs, Inputs, PricesArgs},
        objective::ObjectiveArgs,
        solver::SolverArgs,
    },
    core::{
        analytic::analytic_split,
        curve::CurveModel,
        enumeration::{CrossCheck, Enumeration},
        integrator::Strategy,
        plant::PlantParameters,
        schedule::{OperationCounts, Thresholds, schedule},
        solver::Solution,
    },
    export::export,
    prelude::*,
    tables::{build_schedule_table, build_summary_table},
};

#[derive(Parser)]
pub struct OptimizeArgs {
    #[clap(flatten)]
    pub prices: PricesArgs,

    #[clap(flatten)]
    pub fit: FitArgs,

    #[clap(flatten)]
    pub objective: ObjectiveArgs,

    #[clap(flatten)]
    pub solver: SolverArgs,

    #[clap(flatten)]
    pub grid: GridArgs,

    /// Print the JSON report instead of the tables.
    #[clap(long)]
    pub json: bool,

    /// Also print the operation of every selected interval.
    #[clap(long = "show-schedule")]
    pub show_schedule: bool,

    /// Directory to export the ordered prices and the price-duration curve to.
    #[clap(long = "output-dir", env = "OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,
}

/// Machine-readable outcome of the optimization.
#[derive(Serialize)]
struct Report<'a> {
    period: String,
    strategy: Strategy,
    plant: PlantParameters,
    curve: &'a CurveModel,
    solution: Solution,
    analytic_split: Option<f64>,
    enumeration: Option<CrossCheck>,
    thresholds: Thresholds,
    counts: OperationCounts,
}

#[instrument(skip_all)]
pub fn optimize(args: &OptimizeArgs) -> Result {
    let solver = args.solver.solver()?;
    let step = args.grid.step()?;
    let plant = args.objective.plant.load()?;
    let inputs = Inputs::load(&args.prices, args.fit)?;
    let context = inputs.context(plant);

    let objective = args.objective.objective(context)?;
    let solution = solver.solve(&objective);
    let analytic_split = analytic_split(&context);
    if let Some(analytic_split) = analytic_split {
        debug!(analytic_split = %format!("{analytic_split:.2}"), "cross-checked");
    }
    let enumeration = Enumeration::run(&objective, step).cross_check(solution.split);
    if let Some(enumeration) = enumeration {
        info!(
            split = %format!("{:.2}", enumeration.split),
            distance = %format!("{:.2}", enumeration.distance),
            "enumerated",
        );
    }

    let thresholds = Thresholds::new(&context, solution.split);
    let scheduled = schedule(&inputs.observations, thresholds);
    let counts: OperationCounts = scheduled.iter().collect();

    if let Some(output_dir) = &args.output_dir {
        export(output_dir, inputs.period, &scheduled, &inputs.curve, &inputs.model)?;
    }

    if args.json {
        let report = Report {
            period: inputs.period.to_string(),
            strategy: args.objective.strategy,
            plant,
            curve: &inputs.model,
            solution,
            analytic_split,
            enumeration,
            thresholds,
            counts,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        if args.show_schedule {
            println!("{}", build_schedule_table(&scheduled));
        }
        println!("{}", build_summary_table(&solution, thresholds, counts, analytic_split, enumeration));
    }
    Ok(())
}
