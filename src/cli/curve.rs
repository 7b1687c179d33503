use clap::Parser;

use crate::{
    cli::inputs::{FitArgs, Inputs, PricesArgs},
    prelude::*,
    tables::build_duration_curve_table,
};

#[derive(Parser)]
pub struct CurveArgs {
    #[clap(flatten)]
    pub prices: PricesArgs,

    #[clap(flatten)]
    pub fit: FitArgs,
}

#[instrument(skip_all)]
pub fn curve(args: &CurveArgs) -> Result {
    let inputs = Inputs::load(&args.prices, args.fit)?;
    println!("{}", build_duration_curve_table(&inputs.curve, &inputs.model));
    Ok(())
}
