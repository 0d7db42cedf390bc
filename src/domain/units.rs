//! Charging rate units and current/power conversion.

use serde::{Deserialize, Serialize};

use crate::config::ChargingConfig;
use crate::domain::error::UnitConversionError;

/// Unit a charging rate limit is expressed in.
///
/// Wire representation matches the OCPP 1.6 `ChargingRateUnitType` strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChargingRateUnit {
    /// Amperes per phase.
    #[serde(rename = "A")]
    Amps,
    /// Watts across all phases.
    #[serde(rename = "W")]
    Watts,
}

impl std::fmt::Display for ChargingRateUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Amps => write!(f, "A"),
            Self::Watts => write!(f, "W"),
        }
    }
}

/// Converts limits between current and power using the configured
/// nominal voltage: `P = I × V × numberPhases`.
///
/// Pure arithmetic, IEEE-754 double precision, no rounding. Conversion is
/// only attempted when source and target unit actually differ.
#[derive(Debug, Clone)]
pub struct RateConverter {
    nominal_voltage: Option<f64>,
}

impl RateConverter {
    pub fn new(config: &ChargingConfig) -> Self {
        Self {
            nominal_voltage: config.nominal_voltage,
        }
    }

    /// Convert `limit` from `from` to `to` for a period using
    /// `number_phases` phases.
    pub fn convert(
        &self,
        limit: f64,
        from: ChargingRateUnit,
        to: ChargingRateUnit,
        number_phases: u32,
    ) -> Result<f64, UnitConversionError> {
        if from == to {
            return Ok(limit);
        }
        let voltage = self
            .nominal_voltage
            .ok_or(UnitConversionError::MissingVoltage { from, to })?;
        let factor = voltage * f64::from(number_phases);
        Ok(match (from, to) {
            (ChargingRateUnit::Amps, ChargingRateUnit::Watts) => limit * factor,
            (ChargingRateUnit::Watts, ChargingRateUnit::Amps) => limit / factor,
            _ => unreachable!("equal units are returned above"),
        })
    }
}
