use bon::bon;

use crate::core::{curve::CurveModel, duration_curve::DurationCurve, plant::PlantParameters};

/// Immutable inputs shared by every objective evaluation.
#[derive(Copy, Clone)]
pub struct Context<'a> {
    pub plant: PlantParameters,
    pub curve: &'a DurationCurve,
    pub model: &'a CurveModel,

    /// `H_T`, the largest observed duration percent.
    pub total_duration: f64,
}

#[bon]
impl<'a> Context<'a> {
    #[builder]
    pub fn new(plant: PlantParameters, curve: &'a DurationCurve, model: &'a CurveModel) -> Self {
        Self { plant, curve, model, total_duration: curve.total_duration() }
    }
}
