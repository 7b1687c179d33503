use std::path::Path;

use clap::Parser;
use serde::{Deserialize, Serialize};

use crate::{prelude::*, quantity::power::Megawatts};

/// Hydraulic constants of the pumped-storage plant.
#[must_use]
#[derive(Copy, Clone, Debug, PartialEq, Parser, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlantParameters {
    /// Turbine efficiency, `0..=1`.
    #[clap(long = "generation-efficiency", default_value = "0.9", env = "GENERATION_EFFICIENCY")]
    pub generation_efficiency: f64,

    /// Pump efficiency, `0..=1`.
    #[clap(long = "pumping-efficiency", default_value = "0.85", env = "PUMPING_EFFICIENCY")]
    pub pumping_efficiency: f64,

    /// Gravitational acceleration in m/s².
    #[clap(long = "gravity", default_value = "9.81", env = "GRAVITY")]
    #[serde(rename = "gravity_metres_per_second_squared")]
    pub gravity: f64,

    /// Water density in kg/m³.
    #[clap(long = "water-density", default_value = "1000", env = "WATER_DENSITY")]
    #[serde(rename = "water_density_kilograms_per_cubic_metre")]
    pub water_density: f64,

    /// Turbine water flow in m³/s.
    #[clap(long = "generation-flow", default_value = "100", env = "GENERATION_FLOW")]
    #[serde(rename = "generation_flow_cubic_metres_per_second")]
    pub generation_flow: f64,

    /// Pump water flow in m³/s.
    #[clap(long = "pumping-flow", default_value = "100", env = "PUMPING_FLOW")]
    #[serde(rename = "pumping_flow_cubic_metres_per_second")]
    pub pumping_flow: f64,

    /// Generating head in metres.
    #[clap(long = "generation-head", default_value = "100", env = "GENERATION_HEAD")]
    #[serde(rename = "generation_head_metres")]
    pub generation_head: f64,

    /// Pumping head in metres.
    #[clap(long = "pumping-head", default_value = "100", env = "PUMPING_HEAD")]
    #[serde(rename = "pumping_head_metres")]
    pub pumping_head: f64,
}

impl Default for PlantParameters {
    fn default() -> Self {
        Self {
            generation_efficiency: 0.9,
            pumping_efficiency: 0.85,
            gravity: 9.81,
            water_density: 1000.0,
            generation_flow: 100.0,
            pumping_flow: 100.0,
            generation_head: 100.0,
            pumping_head: 100.0,
        }
    }
}

impl PlantParameters {
    #[instrument(skip_all, fields(path = %path.display()))]
    pub fn read_from(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read `{}`", path.display()))?;
        let this: Self = toml::from_str(&text)
            .with_context(|| format!("failed to parse `{}`", path.display()))?;
        this.validate()
    }

    pub fn validate(self) -> Result<Self> {
        for (name, value) in [
            ("generation efficiency", self.generation_efficiency),
            ("pumping efficiency", self.pumping_efficiency),
            ("gravity", self.gravity),
            ("water density", self.water_density),
            ("generation flow", self.generation_flow),
            ("pumping flow", self.pumping_flow),
            ("generation head", self.generation_head),
            ("pumping head", self.pumping_head),
        ] {
            ensure!(value.is_finite() && value > 0.0, "{name} must be positive, got {value}");
        }
        ensure!(
            self.generation_efficiency <= 1.0,
            "generation efficiency must not exceed 1, got {}",
            self.generation_efficiency,
        );
        ensure!(
            self.pumping_efficiency <= 1.0,
            "pumping efficiency must not exceed 1, got {}",
            self.pumping_efficiency,
        );
        Ok(self)
    }

    /// Electric output of the turbines: `e_g · g · ρ · Q_g · h_g`.
    pub fn generating_power(&self) -> Megawatts {
        Megawatts::from_watts(
            self.generation_efficiency
                * self.gravity
                * self.water_density
                * self.generation_flow
                * self.generation_head,
        )
    }

    /// Electric input of the pumps: `g · ρ · Q_p · h_p / e_p`.
    pub fn pumping_power(&self) -> Megawatts {
        Megawatts::from_watts(
            self.gravity * self.water_density * self.pumping_flow * self.pumping_head
                / self.pumping_efficiency,
        )
    }

    pub fn round_trip_efficiency(&self) -> f64 {
        self.generation_efficiency * self.pumping_efficiency
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn test_powers() {
        let plant = PlantParameters::default();
        assert_abs_diff_eq!(plant.generating_power().0, 88.29, epsilon = 1e-9);
        assert_abs_diff_eq!(plant.pumping_power().0, 98.1 / 0.85, epsilon = 1e-9);
        assert_abs_diff_eq!(plant.round_trip_efficiency(), 0.765, epsilon = 1e-12);
    }

    #[test]
    fn test_validate() {
        assert!(PlantParameters::default().validate().is_ok());
        assert!(PlantParameters { pumping_efficiency: 1.2, ..Default::default() }.validate().is_err());
        assert!(PlantParameters { generation_head: 0.0, ..Default::default() }.validate().is_err());
        assert!(PlantParameters { gravity: f64::NAN, ..Default::default() }.validate().is_err());
    }

    #[test]
    fn test_toml() {
        let plant: PlantParameters = toml::from_str(
            r#"
            generation_efficiency = 0.92
            pumping_efficiency = 0.88
            gravity_metres_per_second_squared = 9.81
            water_density_kilograms_per_cubic_metre = 1000.0
            generation_flow_cubic_metres_per_second = 150.0
            pumping_flow_cubic_metres_per_second = 120.0
            generation_head_metres = 300.0
            pumping_head_metres = 310.0
            "#,
        )
        .unwrap();
        assert_abs_diff_eq!(plant.generation_flow, 150.0);
        assert_abs_diff_eq!(plant.pumping_head, 310.0);
        assert!(plant.validate().is_ok());
    }
}
