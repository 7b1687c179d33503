use std::{io::Read, path::PathBuf};

use clap::Parser;

use crate::{
    core::{
        context,
        curve::CurveModel,
        duration_curve::DurationCurve,
        observation::{PriceObservation, sort_by_start_time},
        period::Period,
        plant::PlantParameters,
    },
    oasis,
    prelude::*,
};

#[derive(Parser)]
pub struct PricesArgs {
    /// CAISO OASIS price report in CSV.
    #[clap(long = "prices", env = "PRICES_PATH")]
    pub path: PathBuf,

    /// Price component to select from the `LMP_TYPE` column.
    #[clap(long = "price-type", env = "PRICE_TYPE", default_value = oasis::DEFAULT_PRICE_TYPE)]
    pub price_type: String,

    /// Period length: `annual`, `monthly`, or `daily`.
    #[clap(long = "duration", env = "DURATION")]
    pub duration: String,

    /// Period within the duration: `2016`, `Aug`, `2016-08`, or `2016-09-01`.
    #[clap(long = "period", env = "PERIOD")]
    pub period: String,
}

#[derive(Copy, Clone, Parser)]
pub struct FitArgs {
    /// Degree of the polynomial fitted to the price-duration curve.
    #[clap(
        long = "curve-degree",
        env = "CURVE_DEGREE",
        default_value_t = CurveModel::DEFAULT_DEGREE
    )]
    pub degree: usize,
}

/// Selected prices along with their duration curve and its fit.
pub struct Inputs {
    pub period: Period,
    pub observations: Vec<PriceObservation>,
    pub curve: DurationCurve,
    pub model: CurveModel,
}

impl Inputs {
    #[instrument(skip_all, fields(duration = %prices.duration, period = %prices.period))]
    pub fn load(prices: &PricesArgs, fit: FitArgs) -> Result<Self> {
        let period = Period::parse(&prices.duration, &prices.period)?;
        Self::read_from(oasis::open(&prices.path)?, &prices.price_type, period, fit)
    }

    /// Select the period from the report, then build and fit its duration curve.
    pub fn read_from<R: Read>(
        reader: csv::Reader<R>,
        price_type: &str,
        period: Period,
        fit: FitArgs,
    ) -> Result<Self> {
        let observations = oasis::read_from(reader, price_type)?;
        let mut observations = period.select(&observations);
        sort_by_start_time(&mut observations);

        let curve = DurationCurve::try_build(&observations)
            .with_context(|| format!("failed to build the duration curve for `{period}`"))?;
        let model = CurveModel::try_fit(&curve, fit.degree)
            .with_context(|| format!("failed to fit the duration curve for `{period}`"))?;
        info!(
            n_observations = observations.len(),
            total_duration = %format!("{:.2}", curve.total_duration()),
            rmse = %format!("{:.3}", model.rmse(&curve)),
            "fitted the price-duration curve",
        );
        Ok(Self { period, observations, curve, model })
    }

    pub fn context(&self, plant: PlantParameters) -> context::Context<'_> {
        context::Context::builder().plant(plant).curve(&self.curve).model(&self.model).build()
    }
}
