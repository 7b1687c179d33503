//! CAISO OASIS price exports.

use std::{fs::File, io::Read, path::Path};

use chrono::{DateTime, NaiveDate};
use serde::Deserialize;

use crate::{core::observation::PriceObservation, prelude::*, quantity::rate::MegawattHourRate};

/// Price component that CAISO reports under `LMP_TYPE`.
pub const DEFAULT_PRICE_TYPE: &str = "LMP";

/// Row of an OASIS locational marginal price report.
///
/// Other columns of the report are ignored.
#[derive(Deserialize)]
struct Record {
    #[serde(rename = "INTERVALSTARTTIME_GMT")]
    start_time: String,

    #[serde(rename = "INTERVALENDTIME_GMT")]
    end_time: String,

    #[serde(rename = "OPR_DT")]
    operating_date: String,

    #[serde(rename = "OPR_HR")]
    operating_hour: u8,

    /// Price component: `LMP`, `MCE` (energy), `MCC` (congestion), `MCL` (loss), or `MGHG`.
    #[serde(rename = "LMP_TYPE")]
    price_type: String,

    /// Despite the name, this is the price in $/MWh.
    #[serde(rename = "MW")]
    price: f64,
}

impl Record {
    fn try_into_observation(self) -> Result<PriceObservation> {
        ensure!(self.price.is_finite(), "non-finite price `{}`", self.price);
        Ok(PriceObservation {
            start_time: DateTime::parse_from_rfc3339(&self.start_time)
                .with_context(|| format!("invalid interval start `{}`", self.start_time))?,
            end_time: DateTime::parse_from_rfc3339(&self.end_time)
                .with_context(|| format!("invalid interval end `{}`", self.end_time))?,
            operating_date: NaiveDate::parse_from_str(&self.operating_date, "%Y-%m-%d")
                .with_context(|| format!("invalid operating date `{}`", self.operating_date))?,
            operating_hour: self.operating_hour,
            price: MegawattHourRate::from(self.price),
        })
    }
}

/// Open an OASIS CSV file for [`read_from`].
pub fn open(path: &Path) -> Result<csv::Reader<File>> {
    let file = File::open(path).with_context(|| format!("failed to open `{}`", path.display()))?;
    Ok(csv::Reader::from_reader(file))
}

#[instrument(skip_all, fields(price_type = price_type))]
pub fn read_from<R: Read>(
    mut reader: csv::Reader<R>,
    price_type: &str,
) -> Result<Vec<PriceObservation>> {
    let mut observations = Vec::new();
    for (index, record) in reader.deserialize::<Record>().enumerate() {
        // Header is the first line, and lines are numbered from one:
        let line = index + 2;
        let record = record.with_context(|| format!("malformed record on line {line}"))?;
        if record.price_type == price_type {
            observations.push(
                record
                    .try_into_observation()
                    .with_context(|| format!("malformed record on line {line}"))?,
            );
        }
    }
    info!(n_observations = observations.len(), "read the prices");
    Ok(observations)
}
