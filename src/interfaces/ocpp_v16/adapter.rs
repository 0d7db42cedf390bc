//! OCPP 1.6 smart-charging adapter
//!
//! Converts inbound wire profiles into the validated domain model, and maps
//! a resolved composite schedule back to the wire `ChargingSchedule` for a
//! GetCompositeSchedule response.

use chrono::{DateTime, Duration, Utc};

use crate::application::smart_charging::{ResolvedSchedule, ResolvedPeriod};
use crate::domain::charging_profile as domain;
use crate::domain::error::ProfileInvariantViolation;

use super::types;

fn purpose_from_wire(purpose: types::ChargingProfilePurposeType) -> domain::ChargingProfilePurpose {
    match purpose {
        types::ChargingProfilePurposeType::ChargePointMaxProfile => {
            domain::ChargingProfilePurpose::ChargePointMaxProfile
        }
        types::ChargingProfilePurposeType::TxDefaultProfile => {
            domain::ChargingProfilePurpose::TxDefaultProfile
        }
        types::ChargingProfilePurposeType::TxProfile => domain::ChargingProfilePurpose::TxProfile,
    }
}

impl From<types::ClearChargingProfileRequest> for domain::ClearProfileCriteria {
    fn from(wire: types::ClearChargingProfileRequest) -> Self {
        Self {
            profile_id: wire.id,
            // A negative connector id cannot refer to any connector, so it
            // matches nothing rather than everything.
            connector_id: wire.connector_id.map(|c| u32::try_from(c).unwrap_or(u32::MAX)),
            purpose: wire.charging_profile_purpose.map(purpose_from_wire),
            stack_level: wire.stack_level,
        }
    }
}

impl TryFrom<types::ChargingProfile> for domain::ChargingProfile {
    type Error = ProfileInvariantViolation;

    /// Reconcile the wire's split kind/recurrencyKind fields into the closed
    /// domain kind, then run the full invariant check.
    fn try_from(wire: types::ChargingProfile) -> Result<Self, Self::Error> {
        let kind = match (wire.charging_profile_kind, wire.recurrency_kind) {
            (types::ChargingProfileKindType::Absolute, None) => domain::ChargingProfileKind::Absolute,
            (types::ChargingProfileKindType::Relative, None) => domain::ChargingProfileKind::Relative,
            (types::ChargingProfileKindType::Recurring, Some(recurrency)) => {
                domain::ChargingProfileKind::Recurring(match recurrency {
                    types::RecurrencyKindType::Daily => domain::RecurrencyKind::Daily,
                    types::RecurrencyKindType::Weekly => domain::RecurrencyKind::Weekly,
                })
            }
            (types::ChargingProfileKindType::Recurring, None) => {
                return Err(ProfileInvariantViolation::MissingRecurrencyKind)
            }
            (_, Some(_)) => return Err(ProfileInvariantViolation::RecurrencyOutsideRecurring),
        };

        let schedule = &wire.charging_schedule;
        let periods = schedule
            .charging_schedule_period
            .iter()
            .map(|p| domain::ChargingSchedulePeriod {
                start_offset: Duration::seconds(i64::from(p.start_period)),
                limit: p.limit,
                // Out-of-range phase counts become 0 and fail validation.
                number_phases: p.number_phases.map(|n| u32::try_from(n).unwrap_or(0)),
            })
            .collect();

        let profile = domain::ChargingProfile {
            id: wire.charging_profile_id,
            stack_level: wire.stack_level,
            purpose: purpose_from_wire(wire.charging_profile_purpose),
            kind,
            valid_from: wire.valid_from,
            valid_to: wire.valid_to,
            transaction_id: wire.transaction_id,
            schedule: domain::ChargingSchedule {
                rate_unit: schedule.charging_rate_unit,
                periods,
                duration: schedule.duration.map(|d| Duration::seconds(i64::from(d))),
                start_schedule: schedule.start_schedule,
                min_charging_rate: schedule.min_charging_rate.unwrap_or(0.0),
            },
        };
        profile.validate()?;
        Ok(profile)
    }
}

/// Map a resolved schedule to the wire representation.
///
/// Millisecond offsets are truncated (not rounded) to whole seconds.
/// The wire schema has no way to express "no limit" — each period lasts
/// until the next `startPeriod`, so an unconstrained period cannot simply
/// be dropped. It is materialized at `unconstrained_limit`, the charge
/// point's own maximum supplied by the caller.
pub fn to_wire(
    resolved: &ResolvedSchedule,
    schedule_start: DateTime<Utc>,
    unconstrained_limit: f64,
) -> types::ChargingSchedule {
    let mut periods: Vec<types::ChargingSchedulePeriod> = Vec::new();
    for period in &resolved.periods {
        let wire_period = types::ChargingSchedulePeriod {
            start_period: (period.start_offset.num_milliseconds() / 1000) as i32,
            limit: effective_limit(period, unconstrained_limit),
            number_phases: Some(period.number_phases as i32),
        };
        // Substituting the hardware maximum can make neighbours identical.
        if let Some(last) = periods.last() {
            if last.limit == wire_period.limit && last.number_phases == wire_period.number_phases {
                continue;
            }
        }
        periods.push(wire_period);
    }

    types::ChargingSchedule {
        duration: Some(resolved.duration.num_seconds() as i32),
        start_schedule: Some(schedule_start),
        charging_rate_unit: resolved.rate_unit,
        charging_schedule_period: periods,
        min_charging_rate: None,
    }
}

fn effective_limit(period: &ResolvedPeriod, unconstrained_limit: f64) -> f64 {
    period.limit.unwrap_or(unconstrained_limit)
}
