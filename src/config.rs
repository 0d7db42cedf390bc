//! Charge point configuration consumed by the composite schedule engine.

use crate::domain::units::ChargingRateUnit;

/// Electrical model and defaults for schedule resolution.
///
/// Threaded explicitly into the engine so that `resolve()` stays a pure
/// function of its inputs; nothing here is read from ambient state.
#[derive(Debug, Clone)]
pub struct ChargingConfig {
    /// Nominal AC supply voltage in volts, used to convert between
    /// current-based and power-based limits. `None` means no voltage
    /// assumption is available and cross-unit conversion fails.
    pub nominal_voltage: Option<f64>,
    /// Rate unit used when a caller does not request one explicitly.
    pub default_rate_unit: ChargingRateUnit,
}

impl ChargingConfig {
    pub fn new(nominal_voltage: f64, default_rate_unit: ChargingRateUnit) -> Self {
        Self {
            nominal_voltage: Some(nominal_voltage),
            default_rate_unit,
        }
    }

    /// Configuration without a voltage assumption. Resolution still works as
    /// long as no cross-unit conversion is required.
    pub fn without_voltage(default_rate_unit: ChargingRateUnit) -> Self {
        Self {
            nominal_voltage: None,
            default_rate_unit,
        }
    }
}

impl Default for ChargingConfig {
    fn default() -> Self {
        Self {
            // EU nominal line voltage; multi-phase scaling comes from each
            // period's numberPhases.
            nominal_voltage: Some(230.0),
            default_rate_unit: ChargingRateUnit::Watts,
        }
    }
}
