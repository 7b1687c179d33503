//! CSV tables for the downstream analysis.

use std::{fs::File, io::Write, path::Path};

use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::Serialize;

use crate::{
    core::{
        curve::CurveModel,
        duration_curve::DurationCurve,
        period::Period,
        schedule::{Operation, ScheduledObservation},
    },
    prelude::*,
};

#[derive(Serialize)]
struct OrderedRow {
    #[serde(rename = "INTERVALSTARTTIME_GMT")]
    start_time: DateTime<FixedOffset>,

    #[serde(rename = "INTERVALENDTIME_GMT")]
    end_time: DateTime<FixedOffset>,

    #[serde(rename = "OPR_DT")]
    operating_date: NaiveDate,

    #[serde(rename = "OPR_HR")]
    operating_hour: u8,

    #[serde(rename = "Price")]
    price: f64,

    #[serde(rename = "Operation")]
    operation: Operation,
}

#[derive(Serialize)]
struct DurationRow {
    #[serde(rename = "Price")]
    price: f64,

    #[serde(rename = "Frequency")]
    duration: f64,

    #[serde(rename = "Fit")]
    fitted_price: f64,
}

/// Write `price_ordered_<period>.csv` and `price_duration_<period>.csv` into the directory.
#[instrument(skip_all, fields(directory = %directory.display(), period = %period))]
pub fn export(
    directory: &Path,
    period: Period,
    scheduled: &[ScheduledObservation],
    curve: &DurationCurve,
    model: &CurveModel,
) -> Result {
    std::fs::create_dir_all(directory)
        .with_context(|| format!("failed to create `{}`", directory.display()))?;

    let path = directory.join(format!("price_ordered_{period}.csv"));
    write_ordered(create(&path)?, scheduled)
        .with_context(|| format!("failed to write `{}`", path.display()))?;
    info!(path = %path.display(), "exported the ordered prices");

    let path = directory.join(format!("price_duration_{period}.csv"));
    write_duration(create(&path)?, curve, model)
        .with_context(|| format!("failed to write `{}`", path.display()))?;
    info!(path = %path.display(), "exported the price-duration curve");

    Ok(())
}

fn create(path: &Path) -> Result<File> {
    File::create(path).with_context(|| format!("failed to create `{}`", path.display()))
}

/// Chronologically ordered observations, as they are given.
pub fn write_ordered<W: Write>(writer: W, scheduled: &[ScheduledObservation]) -> Result {
    let mut writer = csv::Writer::from_writer(writer);
    for ScheduledObservation { observation, operation } in scheduled {
        writer.serialize(OrderedRow {
            start_time: observation.start_time,
            end_time: observation.end_time,
            operating_date: observation.operating_date,
            operating_hour: observation.operating_hour,
            price: observation.price.0,
            operation: *operation,
        })?;
    }
    writer.flush()?;
    Ok(())
}

/// Duration curve from the highest price to the lowest, along with the fitted prices.
pub fn write_duration<W: Write>(writer: W, curve: &DurationCurve, model: &CurveModel) -> Result {
    let mut writer = csv::Writer::from_writer(writer);
    for point in curve.points() {
        writer.serialize(DurationRow {
            price: point.price.0,
            duration: point.duration,
            fitted_price: model.evaluate(point.duration).0,
        })?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        core::{
            observation::PriceObservation,
            schedule::{Thresholds, schedule},
        },
        quantity::rate::MegawattHourRate,
    };

    #[test]
    fn test_write_ordered() {
        let observation = PriceObservation {
            start_time: DateTime::parse_from_rfc3339("2016-09-01T07:00:00+00:00").unwrap(),
            end_time: DateTime::parse_from_rfc3339("2016-09-01T07:15:00+00:00").unwrap(),
            operating_date: NaiveDate::from_ymd_opt(2016, 9, 1).unwrap(),
            operating_hour: 1,
            price: MegawattHourRate::from(31.25),
        };
        let thresholds = Thresholds {
            generating: MegawattHourRate::from(30.0),
            pumping: MegawattHourRate::from(10.0),
        };
        let scheduled = schedule(&[observation], thresholds);

        let mut buffer = Vec::new();
        write_ordered(&mut buffer, &scheduled).unwrap();
        assert_eq!(
            String::from_utf8(buffer).unwrap(),
            "INTERVALSTARTTIME_GMT,INTERVALENDTIME_GMT,OPR_DT,OPR_HR,Price,Operation\n\
             2016-09-01T07:00:00+00:00,2016-09-01T07:15:00+00:00,2016-09-01,1,31.25,Generate\n",
        );
    }

    #[test]
    fn test_write_duration() {
        let curve = DurationCurve::try_from_prices([3.0, 1.0, 2.0].map(MegawattHourRate::from))
            .unwrap();
        let model = CurveModel::try_fit(&curve, 1).unwrap();
        let mut buffer = Vec::new();
        write_duration(&mut buffer, &curve, &model).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "Price,Frequency,Fit");
        assert!(lines[1].starts_with("3.0,25.0,"), "{}", lines[1]);
        assert!(lines[3].starts_with("1.0,75.0,"), "{}", lines[3]);
    }
}
