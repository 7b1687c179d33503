use std::fmt::{Display, Formatter};

use comfy_table::Color;
use serde::Serialize;

use crate::{
    core::{context::Context, observation::PriceObservation},
    quantity::rate::MegawattHourRate,
};

/// What the plant does during an interval.
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq, Serialize)]
pub enum Operation {
    Generate,
    Pump,
    Idle,
}

impl Operation {
    pub const fn color(self) -> Color {
        match self {
            Self::Generate => Color::Green,
            Self::Pump => Color::Blue,
            Self::Idle => Color::Reset,
        }
    }
}

impl Display for Operation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Generate => f.write_str("generate"),
            Self::Pump => f.write_str("pump"),
            Self::Idle => f.write_str("idle"),
        }
    }
}

/// Price thresholds implied by a split point.
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct Thresholds {
    /// Generate at or above this price: `f(H_G)`.
    pub generating: MegawattHourRate,

    /// Pump at or below this price: `f(H_T - H_G)`.
    pub pumping: MegawattHourRate,
}

impl Thresholds {
    pub fn new(context: &Context<'_>, split: f64) -> Self {
        Self {
            generating: context.model.evaluate(split),
            pumping: context.model.evaluate(context.total_duration - split),
        }
    }

    /// Generation wins over pumping when the thresholds cross.
    pub fn classify(self, price: MegawattHourRate) -> Operation {
        if price >= self.generating {
            Operation::Generate
        } else if price <= self.pumping {
            Operation::Pump
        } else {
            Operation::Idle
        }
    }
}

/// Observation paired with its operation.
#[derive(Clone, Debug, Serialize)]
pub struct ScheduledObservation {
    #[serde(flatten)]
    pub observation: PriceObservation,

    pub operation: Operation,
}

/// Classify every observation, preserving their order.
pub fn schedule(
    observations: &[PriceObservation],
    thresholds: Thresholds,
) -> Vec<ScheduledObservation> {
    observations
        .iter()
        .map(|observation| ScheduledObservation {
            observation: observation.clone(),
            operation: thresholds.classify(observation.price),
        })
        .collect()
}

/// Number of generating, pumping, and idle intervals.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct OperationCounts {
    pub generate: usize,
    pub pump: usize,
    pub idle: usize,
}

impl<'a> FromIterator<&'a ScheduledObservation> for OperationCounts {
    fn from_iter<I: IntoIterator<Item = &'a ScheduledObservation>>(iter: I) -> Self {
        let mut counts = Self::default();
        for scheduled in iter {
            match scheduled.operation {
                Operation::Generate => counts.generate += 1,
                Operation::Pump => counts.pump += 1,
                Operation::Idle => counts.idle += 1,
            }
        }
        counts
    }
}
