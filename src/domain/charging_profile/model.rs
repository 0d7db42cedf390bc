//! ChargingProfile domain entity
//!
//! One authority's requested limit curve for a connector: purpose, stack
//! level, validity window, recurrence, and the owned schedule. Modeled with
//! closed enums so that "recurrencyKind only under Recurring" holds by
//! construction rather than by runtime checks; the remaining invariants are
//! enforced by [`ChargingProfile::validate`].

use chrono::{DateTime, Duration, Utc};

use crate::domain::error::ProfileInvariantViolation;
use crate::domain::units::ChargingRateUnit;

/// numberPhases default when a period does not specify one.
pub const DEFAULT_NUMBER_PHASES: u32 = 3;

/// Which authority a profile represents, in ascending override priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ChargingProfilePurpose {
    /// Station-wide hardware/contract cap.
    ChargePointMaxProfile,
    /// Default policy applied to transactions.
    TxDefaultProfile,
    /// Override for one specific transaction.
    TxProfile,
}

impl ChargingProfilePurpose {
    /// All purposes, in the fixed order resolution iterates them.
    pub const ALL: [Self; 3] = [
        Self::ChargePointMaxProfile,
        Self::TxDefaultProfile,
        Self::TxProfile,
    ];
}

/// Calendar cycle of a Recurring profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecurrencyKind {
    Daily,
    Weekly,
}

impl RecurrencyKind {
    /// Length of one recurrence cycle.
    pub fn cycle(&self) -> Duration {
        match self {
            Self::Daily => Duration::hours(24),
            Self::Weekly => Duration::hours(7 * 24),
        }
    }
}

/// How a profile's schedule is anchored in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChargingProfileKind {
    /// Schedule starts at the schedule's fixed `start_schedule` timestamp.
    Absolute,
    /// Schedule repeats on a calendar cycle anchored at `start_schedule`.
    Recurring(RecurrencyKind),
    /// Schedule starts when it is put to use (for the engine: at the
    /// requested window start), not at any fixed clock time.
    Relative,
}

/// One segment of a schedule.
///
/// The effective end of a period is the next period's start, the schedule's
/// `duration`, or open-ended if it is the last period of a schedule without
/// a duration.
#[derive(Debug, Clone, PartialEq)]
pub struct ChargingSchedulePeriod {
    /// Offset from the schedule start; non-negative, strictly increasing
    /// within one schedule.
    pub start_offset: Duration,
    /// Non-negative limit in the schedule's rate unit.
    pub limit: f64,
    /// Number of phases to use; defaults to 3.
    pub number_phases: Option<u32>,
}

impl ChargingSchedulePeriod {
    pub fn new(start_offset: Duration, limit: f64) -> Self {
        Self {
            start_offset,
            limit,
            number_phases: None,
        }
    }

    pub fn phases(&self) -> u32 {
        self.number_phases.unwrap_or(DEFAULT_NUMBER_PHASES)
    }
}

/// Limit curve owned by exactly one [`ChargingProfile`].
#[derive(Debug, Clone, PartialEq)]
pub struct ChargingSchedule {
    /// Unit all period limits and `min_charging_rate` are expressed in.
    pub rate_unit: ChargingRateUnit,
    /// Ordered periods; never empty in a valid schedule.
    pub periods: Vec<ChargingSchedulePeriod>,
    /// Total schedule length; open-ended when absent.
    pub duration: Option<Duration>,
    /// Fixed anchor; required for Absolute and Recurring, forbidden for
    /// Relative.
    pub start_schedule: Option<DateTime<Utc>>,
    /// Floor applied after the purposes' limits are merged.
    pub min_charging_rate: f64,
}

/// Stored charging profile as supplied to the engine.
#[derive(Debug, Clone, PartialEq)]
pub struct ChargingProfile {
    /// Profile ID from the OCPP ChargingProfile object; unique per station.
    pub id: i32,
    /// Stack level (higher = higher priority within the same purpose).
    pub stack_level: i32,
    pub purpose: ChargingProfilePurpose,
    pub kind: ChargingProfileKind,
    /// Applicability bound; unbounded when absent.
    pub valid_from: Option<DateTime<Utc>>,
    /// Applicability bound; unbounded when absent.
    pub valid_to: Option<DateTime<Utc>>,
    /// Required and binding for TxProfile, meaningless otherwise.
    pub transaction_id: Option<i32>,
    pub schedule: ChargingSchedule,
}

impl ChargingProfile {
    /// Check the data-model invariants that the closed enums cannot enforce.
    pub fn validate(&self) -> Result<(), ProfileInvariantViolation> {
        match self.kind {
            ChargingProfileKind::Absolute | ChargingProfileKind::Recurring(_) => {
                if self.schedule.start_schedule.is_none() {
                    return Err(ProfileInvariantViolation::MissingStartSchedule);
                }
            }
            ChargingProfileKind::Relative => {
                if self.schedule.start_schedule.is_some() {
                    return Err(ProfileInvariantViolation::UnexpectedStartSchedule);
                }
            }
        }

        if self.purpose == ChargingProfilePurpose::TxProfile && self.transaction_id.is_none() {
            return Err(ProfileInvariantViolation::MissingTransactionId);
        }

        if let (Some(from), Some(to)) = (self.valid_from, self.valid_to) {
            if from > to {
                return Err(ProfileInvariantViolation::InvertedValidity { from, to });
            }
        }

        if let Some(duration) = self.schedule.duration {
            if duration < Duration::zero() {
                return Err(ProfileInvariantViolation::NegativeDuration);
            }
        }

        if self.schedule.periods.is_empty() {
            return Err(ProfileInvariantViolation::EmptyPeriods);
        }
        if !self.schedule.min_charging_rate.is_finite() || self.schedule.min_charging_rate < 0.0 {
            return Err(ProfileInvariantViolation::InvalidMinChargingRate);
        }
        let mut previous: Option<Duration> = None;
        for (index, period) in self.schedule.periods.iter().enumerate() {
            if period.start_offset < Duration::zero() {
                return Err(ProfileInvariantViolation::NegativeOffset { index });
            }
            // NaN and infinity would otherwise survive the merge arithmetic
            // and surface as a nonsensical output limit.
            if !period.limit.is_finite() {
                return Err(ProfileInvariantViolation::NonFiniteLimit { index });
            }
            if period.limit < 0.0 {
                return Err(ProfileInvariantViolation::NegativeLimit {
                    index,
                    limit: period.limit,
                });
            }
            if period.number_phases == Some(0) {
                return Err(ProfileInvariantViolation::ZeroPhases { index });
            }
            if let Some(prev) = previous {
                if period.start_offset <= prev {
                    return Err(ProfileInvariantViolation::UnsortedPeriods { index });
                }
            }
            previous = Some(period.start_offset);
        }

        Ok(())
    }

    /// Whether this profile constrains the given active transaction.
    ///
    /// Only TxProfile is transaction-bound; for it the stored transaction id
    /// must equal the active one.
    pub fn applies_to_transaction(&self, active_transaction_id: Option<i32>) -> bool {
        match self.purpose {
            ChargingProfilePurpose::TxProfile => {
                self.transaction_id.is_some() && self.transaction_id == active_transaction_id
            }
            _ => true,
        }
    }

    /// Whether `[valid_from, valid_to]` intersects the half-open request
    /// window `[window_start, window_end)`.
    pub fn validity_intersects(&self, window_start: DateTime<Utc>, window_end: DateTime<Utc>) -> bool {
        if let Some(from) = self.valid_from {
            if from >= window_end {
                return false;
            }
        }
        if let Some(to) = self.valid_to {
            if to < window_start {
                return false;
            }
        }
        true
    }
}
