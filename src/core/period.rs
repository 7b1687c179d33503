use std::{
    fmt::{Display, Formatter},
    str::FromStr,
};

use chrono::{Datelike, Month, NaiveDate};

use crate::{
    core::{error::CoreError, observation::PriceObservation},
    prelude::*,
};

/// Length of the period to build the duration curve over.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum DurationKind {
    Annual,
    Monthly,
    Daily,
}

impl DurationKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Annual => "annual",
            Self::Monthly => "monthly",
            Self::Daily => "daily",
        }
    }
}

impl FromStr for DurationKind {
    type Err = CoreError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        match text.trim().to_ascii_lowercase().as_str() {
            "annual" | "yearly" => Ok(Self::Annual),
            "monthly" => Ok(Self::Monthly),
            "daily" => Ok(Self::Daily),
            _ => Err(CoreError::invalid_period(
                text,
                "",
                "expected one of `annual`, `monthly`, or `daily`",
            )),
        }
    }
}

impl Display for DurationKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Calendar period to select the prices from.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Period {
    Annual { year: i32 },

    /// Month of a given year, or of every year when the year is absent.
    Monthly { year: Option<i32>, month: Month },

    Daily { date: NaiveDate },
}

impl Period {
    /// Parse the period text according to the duration kind.
    ///
    /// Accepted forms: `2016` for annual, `Aug`, `August`, or `2016-08` for monthly,
    /// and `2016-09-01` for daily.
    pub fn try_new(kind: DurationKind, text: &str) -> Result<Self, CoreError> {
        let invalid = |reason: &str| CoreError::invalid_period(kind.as_str(), text, reason);
        let trimmed = text.trim();
        match kind {
            DurationKind::Annual => trimmed
                .parse()
                .map(|year| Self::Annual { year })
                .map_err(|_| invalid("expected a year like `2016`")),
            DurationKind::Monthly => {
                if let Some((year, month)) = trimmed.split_once('-') {
                    let year = year.parse().map_err(|_| invalid("expected a year before `-`"))?;
                    let month = month
                        .parse::<u8>()
                        .ok()
                        .and_then(|month| Month::try_from(month).ok())
                        .ok_or_else(|| invalid("expected a month number `1..=12` after `-`"))?;
                    Ok(Self::Monthly { year: Some(year), month })
                } else {
                    trimmed
                        .parse()
                        .map(|month| Self::Monthly { year: None, month })
                        .map_err(|_| invalid("expected a month name like `Aug` or `2016-08`"))
                }
            }
            DurationKind::Daily => NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
                .map(|date| Self::Daily { date })
                .map_err(|_| invalid("expected a date like `2016-09-01`")),
        }
    }

    /// Parse both the duration kind and the period text.
    pub fn parse(duration: &str, text: &str) -> Result<Self, CoreError> {
        let kind = duration
            .parse()
            .map_err(|_| CoreError::invalid_period(duration, text, "unknown duration kind"))?;
        Self::try_new(kind, text)
    }

    pub fn contains(self, date: NaiveDate) -> bool {
        match self {
            Self::Annual { year } => date.year() == year,
            Self::Monthly { year, month } => {
                date.month() == month.number_from_month()
                    && year.is_none_or(|year| date.year() == year)
            }
            Self::Daily { date: day } => date == day,
        }
    }

    /// Select the observations within the period, keeping their original order.
    #[instrument(skip_all, fields(period = %self, n_observations = observations.len()))]
    pub fn select(self, observations: &[PriceObservation]) -> Vec<PriceObservation> {
        let selected: Vec<_> = observations
            .iter()
            .filter(|observation| self.contains(observation.operating_date))
            .cloned()
            .collect();
        if selected.is_empty() {
            warn!(period = %self, "no observations within the period, check the period and the price type");
        } else {
            debug!(n_selected = selected.len(), "selected");
        }
        selected
    }
}

impl Display for Period {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Annual { year } => write!(f, "{year}"),
            Self::Monthly { year: Some(year), month } => {
                write!(f, "{year}-{:02}", month.number_from_month())
            }
            Self::Monthly { year: None, month } => write!(f, "{}", &month.name()[..3]),
            Self::Daily { date } => write!(f, "{}", date.format("%Y-%m-%d")),
        }
    }
}
